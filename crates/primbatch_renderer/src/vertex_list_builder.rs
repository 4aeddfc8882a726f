use primbatch_graphics_hal::ranges::Range;

use crate::sizing_mismatch;

/// Appends vertices to a flat list and reports where each primitive landed.
///
/// Every `add_*` method returns the [`Range`] it just wrote. Ranges follow
/// each other without gaps or overlaps, in the order they were added.
#[derive(Clone, Debug)]
pub struct VertexListBuilder<V: Copy> {
    vertices: Vec<V>,
    // Vertex count planned by the sizing pass, if there was one.
    reserved: Option<usize>,
}

impl<V: Copy> Default for VertexListBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Copy> VertexListBuilder<V> {
    /// Creates a builder which grows as vertices are added.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            reserved: None,
        }
    }

    /// Creates a builder holding exactly `vertex_count` vertices.
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            reserved: Some(vertex_count),
        }
    }

    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<V> {
        self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn capacity(&self) -> usize {
        self.vertices.capacity()
    }

    fn append(&mut self, vertices: &[V]) -> Range {
        let index = self.vertices.len();
        if let Some(reserved) = self.reserved {
            if index + vertices.len() > reserved {
                sizing_mismatch(format_args!(
                    "{} vertices added after {}, but only {} were planned",
                    vertices.len(),
                    index,
                    reserved
                ));
            }
        }

        self.vertices.extend_from_slice(vertices);
        Range::new(index as u32, vertices.len() as u32)
    }

    pub fn add_point(&mut self, v: V) -> Range {
        self.append(&[v])
    }

    pub fn add_points(&mut self, vertices: &[V]) -> Range {
        self.append(vertices)
    }

    pub fn add_line(&mut self, v1: V, v2: V) -> Range {
        self.append(&[v1, v2])
    }

    /// Adds independent lines, two vertices each.
    pub fn add_lines(&mut self, vertices: &[V]) -> Range {
        debug_assert!(vertices.len() % 2 == 0, "lines need an even vertex count");
        self.append(vertices)
    }

    pub fn add_line_strip(&mut self, vertices: &[V]) -> Range {
        debug_assert!(vertices.len() >= 2, "a line strip needs at least 2 vertices");
        self.append(vertices)
    }

    pub fn add_line_loop(&mut self, vertices: &[V]) -> Range {
        debug_assert!(vertices.len() >= 2, "a line loop needs at least 2 vertices");
        self.append(vertices)
    }

    pub fn add_triangle(&mut self, v1: V, v2: V, v3: V) -> Range {
        self.append(&[v1, v2, v3])
    }

    /// Adds independent triangles, three vertices each.
    pub fn add_triangles(&mut self, vertices: &[V]) -> Range {
        debug_assert!(vertices.len() % 3 == 0, "triangles need a multiple of 3 vertices");
        self.append(vertices)
    }

    pub fn add_triangle_fan(&mut self, vertices: &[V]) -> Range {
        debug_assert!(vertices.len() >= 3, "a triangle fan needs at least 3 vertices");
        self.append(vertices)
    }

    pub fn add_triangle_strip(&mut self, vertices: &[V]) -> Range {
        debug_assert!(vertices.len() >= 3, "a triangle strip needs at least 3 vertices");
        self.append(vertices)
    }

    pub fn add_quad(&mut self, v1: V, v2: V, v3: V, v4: V) -> Range {
        self.append(&[v1, v2, v3, v4])
    }

    /// Adds independent quads, four vertices each.
    pub fn add_quads(&mut self, vertices: &[V]) -> Range {
        debug_assert!(vertices.len() % 4 == 0, "quads need a multiple of 4 vertices");
        self.append(vertices)
    }

    pub fn add_quad_strip(&mut self, vertices: &[V]) -> Range {
        debug_assert!(
            vertices.len() >= 4 && vertices.len() % 2 == 0,
            "a quad strip needs an even count of at least 4 vertices"
        );
        self.append(vertices)
    }

    /// Adds the polygon's vertices as they are. Drawn as a polygon or a
    /// triangle fan rooted at the first vertex.
    pub fn add_polygon(&mut self, vertices: &[V]) -> Range {
        debug_assert!(vertices.len() >= 3, "a polygon needs at least 3 vertices");
        self.append(vertices)
    }

    /// Fan-triangulates a convex polygon into independent triangles.
    ///
    /// An N-gon is written as `3 * (N - 2)` vertices. Fewer than 3 vertices
    /// yield an empty range at the current end of the list.
    pub fn add_triangulated_polygon(&mut self, vertices: &[V]) -> Range {
        let index = self.vertices.len() as u32;
        let Some((&first, rest)) = vertices.split_first() else {
            return Range::new(index, 0);
        };

        let mut count = 0;
        for pair in rest.windows(2) {
            let triangle = self.append(&[first, pair[0], pair[1]]);
            count += triangle.count;
        }

        Range::new(index, count)
    }
}

/// Vertex count of [`VertexListBuilder::add_triangulated_polygon`] for an
/// N-gon, for use in sizing passes.
pub fn triangulated_vertex_count(polygon_vertices: usize) -> usize {
    3 * polygon_vertices.saturating_sub(2)
}
