use bytemuck::{Pod, Zeroable};
use derive_more::Constructor;
use primbatch_graphics_hal::{texture::TextureHandle, vertex_buffer::Vertex};
use primbatch_renderer::{
    textured_index_range_map::Size,
    textured_index_range_map_builder::TexturedIndexRangeMapBuilder,
    vertex_list_builder::triangulated_vertex_count, PrimType, TextureKey,
};

#[repr(C)]
#[derive(Copy, Clone, Debug, Constructor, Zeroable, Pod, Vertex)]
struct ModelVertex {
    position: [f32; 3],
    uv: [f32; 2],
}

/// A face of a model, as a model parser would produce it.
struct Face {
    texture: TextureKey,
    vertices: Vec<ModelVertex>,
}

fn faces() -> Vec<Face> {
    let wood = TextureHandle::new(1);
    let stone = TextureHandle::new(2);

    let quad = |z: f32| {
        vec![
            ModelVertex::new([0.0, 0.0, z], [0.0, 0.0]),
            ModelVertex::new([1.0, 0.0, z], [1.0, 0.0]),
            ModelVertex::new([1.0, 1.0, z], [1.0, 1.0]),
            ModelVertex::new([0.0, 1.0, z], [0.0, 1.0]),
        ]
    };
    let triangle = |z: f32| {
        vec![
            ModelVertex::new([0.0, 0.0, z], [0.0, 0.0]),
            ModelVertex::new([1.0, 0.0, z], [1.0, 0.0]),
            ModelVertex::new([0.0, 1.0, z], [0.0, 1.0]),
        ]
    };

    vec![
        Face { texture: wood, vertices: quad(0.0) },
        Face { texture: stone, vertices: triangle(1.0) },
        Face { texture: wood, vertices: triangle(2.0) },
        Face { texture: stone, vertices: quad(3.0) },
        Face { texture: None, vertices: quad(4.0) },
    ]
}

fn main() {
    env_logger::init();

    let faces = faces();

    // Sizing pass: mirror every add of the fill pass.
    let mut size = Size::new();
    for face in &faces {
        match face.vertices.len() {
            3 => size.inc(face.texture, PrimType::Triangles, 3),
            n if face.texture.is_none() => size.inc(None, PrimType::Triangles, triangulated_vertex_count(n)),
            n => size.inc(face.texture, PrimType::Polygon, n),
        }
    }
    log::info!("planned {} vertices", size.vertex_count());

    let mut builder = TexturedIndexRangeMapBuilder::with_size(&size);
    for face in &faces {
        match face.vertices.as_slice() {
            [a, b, c] => builder.add_triangle(face.texture, *a, *b, *c),
            polygon if face.texture.is_none() => builder.add_triangulated_polygon(None, polygon),
            polygon => builder.add_polygon(face.texture, polygon),
        };
    }

    let (vertices, indices) = builder.into_parts();
    if let Err(e) = indices.validate(vertices.len()) {
        log::error!("{}", e);
        return;
    }

    println!(
        "{} vertices, {} ranges, {} textures, {} vertex attributes",
        vertices.len(),
        indices.range_count(),
        indices.textures().count(),
        ModelVertex::FORMAT.len()
    );
    indices.for_each_primitive(|texture, prim_type, index, count| {
        let texture = texture.map_or("none".to_string(), |t| t.id().to_string());
        println!("texture {texture:>4}  {prim_type:?} {index}..{}", index + count);
    });
}
