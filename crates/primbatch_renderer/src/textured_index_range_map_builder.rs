use primbatch_graphics_hal::{prim_type::PrimType, ranges::Range};

use crate::{
    textured_index_range_map::{Size, TexturedIndexRangeMap},
    vertex_list_builder::VertexListBuilder,
    TextureKey,
};

/// Builds a vertex list together with the [`TexturedIndexRangeMap`] describing it.
#[derive(Clone, Debug)]
pub struct TexturedIndexRangeMapBuilder<V: Copy> {
    vertices: VertexListBuilder<V>,
    indices: TexturedIndexRangeMap,
}

impl<V: Copy> Default for TexturedIndexRangeMapBuilder<V> {
    fn default() -> Self {
        Self {
            vertices: VertexListBuilder::new(),
            indices: TexturedIndexRangeMap::new(),
        }
    }
}

impl<V: Copy> TexturedIndexRangeMapBuilder<V> {
    /// Creates a builder for exactly `vertex_count` vertices and the ranges planned in `size`.
    pub fn new(vertex_count: usize, size: &Size) -> Self {
        Self {
            vertices: VertexListBuilder::with_capacity(vertex_count),
            indices: TexturedIndexRangeMap::with_size(size),
        }
    }

    pub fn with_size(size: &Size) -> Self {
        Self::new(size.vertex_count(), size)
    }

    pub fn vertices(&self) -> &[V] {
        self.vertices.vertices()
    }

    pub fn indices(&self) -> &TexturedIndexRangeMap {
        &self.indices
    }

    pub fn into_parts(self) -> (Vec<V>, TexturedIndexRangeMap) {
        (self.vertices.into_vertices(), self.indices)
    }

    fn record(&mut self, texture: TextureKey, prim_type: PrimType, range: Range) -> Range {
        self.indices.add(texture, prim_type, range.index, range.count);
        range
    }

    pub fn add_point(&mut self, texture: TextureKey, v: V) -> Range {
        let range = self.vertices.add_point(v);
        self.record(texture, PrimType::Points, range)
    }

    pub fn add_points(&mut self, texture: TextureKey, vertices: &[V]) -> Range {
        let range = self.vertices.add_points(vertices);
        self.record(texture, PrimType::Points, range)
    }

    pub fn add_line(&mut self, texture: TextureKey, v1: V, v2: V) -> Range {
        let range = self.vertices.add_line(v1, v2);
        self.record(texture, PrimType::Lines, range)
    }

    pub fn add_lines(&mut self, texture: TextureKey, vertices: &[V]) -> Range {
        let range = self.vertices.add_lines(vertices);
        self.record(texture, PrimType::Lines, range)
    }

    pub fn add_line_strip(&mut self, texture: TextureKey, vertices: &[V]) -> Range {
        let range = self.vertices.add_line_strip(vertices);
        self.record(texture, PrimType::LineStrip, range)
    }

    pub fn add_line_loop(&mut self, texture: TextureKey, vertices: &[V]) -> Range {
        let range = self.vertices.add_line_loop(vertices);
        self.record(texture, PrimType::LineLoop, range)
    }

    pub fn add_triangle(&mut self, texture: TextureKey, v1: V, v2: V, v3: V) -> Range {
        let range = self.vertices.add_triangle(v1, v2, v3);
        self.record(texture, PrimType::Triangles, range)
    }

    pub fn add_triangles(&mut self, texture: TextureKey, vertices: &[V]) -> Range {
        let range = self.vertices.add_triangles(vertices);
        self.record(texture, PrimType::Triangles, range)
    }

    pub fn add_triangle_fan(&mut self, texture: TextureKey, vertices: &[V]) -> Range {
        let range = self.vertices.add_triangle_fan(vertices);
        self.record(texture, PrimType::TriangleFan, range)
    }

    pub fn add_triangle_strip(&mut self, texture: TextureKey, vertices: &[V]) -> Range {
        let range = self.vertices.add_triangle_strip(vertices);
        self.record(texture, PrimType::TriangleStrip, range)
    }

    pub fn add_quad(&mut self, texture: TextureKey, v1: V, v2: V, v3: V, v4: V) -> Range {
        let range = self.vertices.add_quad(v1, v2, v3, v4);
        self.record(texture, PrimType::Quads, range)
    }

    pub fn add_quads(&mut self, texture: TextureKey, vertices: &[V]) -> Range {
        let range = self.vertices.add_quads(vertices);
        self.record(texture, PrimType::Quads, range)
    }

    pub fn add_quad_strip(&mut self, texture: TextureKey, vertices: &[V]) -> Range {
        let range = self.vertices.add_quad_strip(vertices);
        self.record(texture, PrimType::QuadStrip, range)
    }

    /// Records the polygon untriangulated, as a single [`PrimType::Polygon`] range.
    pub fn add_polygon(&mut self, texture: TextureKey, vertices: &[V]) -> Range {
        let range = self.vertices.add_polygon(vertices);
        self.record(texture, PrimType::Polygon, range)
    }

    /// Fan-triangulates the polygon into a [`PrimType::Triangles`] range.
    pub fn add_triangulated_polygon(&mut self, texture: TextureKey, vertices: &[V]) -> Range {
        let range = self.vertices.add_triangulated_polygon(vertices);
        self.record(texture, PrimType::Triangles, range)
    }
}
