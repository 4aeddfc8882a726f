use bytemuck::Pod;
use primbatch_graphics_hal::{vertex_buffer::Vertex, Graphics};

use crate::{error::RangeError, index_range_map::IndexRangeMap, vertex_array::VertexArray};

/// Draws an [`IndexRangeMap`] from the vertex array its ranges point into.
pub struct IndexRangeRenderer<G: Graphics, V: Vertex + Pod> {
    vertex_array: VertexArray<G, V>,
    indices: IndexRangeMap,
}

impl<G: Graphics, V: Vertex + Pod> IndexRangeRenderer<G, V> {
    /// Ranges aren't checked against the vertex array. See [`Self::try_new`].
    pub fn new(vertex_array: VertexArray<G, V>, indices: IndexRangeMap) -> Self {
        Self {
            vertex_array,
            indices,
        }
    }

    /// Like [`Self::new`], but fails if a range points past the end of the vertex array.
    pub fn try_new(vertex_array: VertexArray<G, V>, indices: IndexRangeMap) -> Result<Self, RangeError> {
        indices.validate(vertex_array.vertex_count())?;
        Ok(Self::new(vertex_array, indices))
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_array.is_empty()
    }

    pub fn prepare(&mut self, ctx: &G) {
        self.vertex_array.prepare(ctx);
    }

    /// Draws all ranges, one multi-draw call per primitive type.
    ///
    /// If the vertex array is already set up, it is drawn from as is and left set up.
    pub fn render(&mut self) {
        if self.is_empty() {
            return;
        }

        let setup = self.vertex_array.setup();
        self.indices.render(&self.vertex_array);
        if setup {
            self.vertex_array.cleanup();
        }
    }

    pub fn vertex_array_mut(&mut self) -> &mut VertexArray<G, V> {
        &mut self.vertex_array
    }

    pub fn indices(&self) -> &IndexRangeMap {
        &self.indices
    }
}
