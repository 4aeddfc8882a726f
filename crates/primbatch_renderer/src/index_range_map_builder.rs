use primbatch_graphics_hal::{prim_type::PrimType, ranges::Range};

use crate::{
    index_range_map::{IndexRangeMap, Size},
    vertex_list_builder::VertexListBuilder,
};

/// Builds a vertex list together with the [`IndexRangeMap`] describing it.
///
/// Each `add_*` call appends vertices and records their range under the
/// matching primitive type, so the two can't get out of sync.
#[derive(Clone, Debug)]
pub struct IndexRangeMapBuilder<V: Copy> {
    vertices: VertexListBuilder<V>,
    indices: IndexRangeMap,
}

impl<V: Copy> Default for IndexRangeMapBuilder<V> {
    fn default() -> Self {
        Self {
            vertices: VertexListBuilder::new(),
            indices: IndexRangeMap::new(),
        }
    }
}

impl<V: Copy> IndexRangeMapBuilder<V> {
    /// Creates a builder for exactly `vertex_count` vertices and the ranges planned in `size`.
    pub fn new(vertex_count: usize, size: &Size) -> Self {
        Self {
            vertices: VertexListBuilder::with_capacity(vertex_count),
            indices: IndexRangeMap::with_size(size),
        }
    }

    /// Creates a builder sized from its sizing pass alone.
    pub fn with_size(size: &Size) -> Self {
        Self::new(size.vertex_count(), size)
    }

    pub fn vertices(&self) -> &[V] {
        self.vertices.vertices()
    }

    pub fn indices(&self) -> &IndexRangeMap {
        &self.indices
    }

    pub fn into_parts(self) -> (Vec<V>, IndexRangeMap) {
        (self.vertices.into_vertices(), self.indices)
    }

    fn record(&mut self, prim_type: PrimType, range: Range) -> Range {
        self.indices.add(prim_type, range.index, range.count);
        range
    }

    pub fn add_point(&mut self, v: V) -> Range {
        let range = self.vertices.add_point(v);
        self.record(PrimType::Points, range)
    }

    pub fn add_points(&mut self, vertices: &[V]) -> Range {
        let range = self.vertices.add_points(vertices);
        self.record(PrimType::Points, range)
    }

    pub fn add_line(&mut self, v1: V, v2: V) -> Range {
        let range = self.vertices.add_line(v1, v2);
        self.record(PrimType::Lines, range)
    }

    pub fn add_lines(&mut self, vertices: &[V]) -> Range {
        let range = self.vertices.add_lines(vertices);
        self.record(PrimType::Lines, range)
    }

    pub fn add_line_strip(&mut self, vertices: &[V]) -> Range {
        let range = self.vertices.add_line_strip(vertices);
        self.record(PrimType::LineStrip, range)
    }

    pub fn add_line_loop(&mut self, vertices: &[V]) -> Range {
        let range = self.vertices.add_line_loop(vertices);
        self.record(PrimType::LineLoop, range)
    }

    pub fn add_triangle(&mut self, v1: V, v2: V, v3: V) -> Range {
        let range = self.vertices.add_triangle(v1, v2, v3);
        self.record(PrimType::Triangles, range)
    }

    pub fn add_triangles(&mut self, vertices: &[V]) -> Range {
        let range = self.vertices.add_triangles(vertices);
        self.record(PrimType::Triangles, range)
    }

    pub fn add_triangle_fan(&mut self, vertices: &[V]) -> Range {
        let range = self.vertices.add_triangle_fan(vertices);
        self.record(PrimType::TriangleFan, range)
    }

    pub fn add_triangle_strip(&mut self, vertices: &[V]) -> Range {
        let range = self.vertices.add_triangle_strip(vertices);
        self.record(PrimType::TriangleStrip, range)
    }

    pub fn add_quad(&mut self, v1: V, v2: V, v3: V, v4: V) -> Range {
        let range = self.vertices.add_quad(v1, v2, v3, v4);
        self.record(PrimType::Quads, range)
    }

    pub fn add_quads(&mut self, vertices: &[V]) -> Range {
        let range = self.vertices.add_quads(vertices);
        self.record(PrimType::Quads, range)
    }

    pub fn add_quad_strip(&mut self, vertices: &[V]) -> Range {
        let range = self.vertices.add_quad_strip(vertices);
        self.record(PrimType::QuadStrip, range)
    }

    /// Records the polygon untriangulated, as a single [`PrimType::Polygon`] range.
    pub fn add_polygon(&mut self, vertices: &[V]) -> Range {
        let range = self.vertices.add_polygon(vertices);
        self.record(PrimType::Polygon, range)
    }

    /// Fan-triangulates the polygon into a [`PrimType::Triangles`] range.
    pub fn add_triangulated_polygon(&mut self, vertices: &[V]) -> Range {
        let range = self.vertices.add_triangulated_polygon(vertices);
        self.record(PrimType::Triangles, range)
    }
}
