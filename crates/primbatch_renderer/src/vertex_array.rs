use bytemuck::Pod;
use primbatch_graphics_hal::{
    buffer::{Buffer, BufferUsage},
    prim_type::PrimType,
    ranges::Ranges,
    vertex_buffer::{AsVertexBindings, Vertex},
    Graphics,
};

enum State<G: Graphics, V: Pod> {
    Unprepared(Vec<V>),
    Prepared { ctx: G, buffer: Buffer<G, V> },
}

/// A list of vertices that is uploaded to a GPU once and then drawn from.
///
/// Drawing happens between `setup`, which binds the vertex attributes, and
/// `cleanup`, which unbinds them. Setting up twice is allowed, so a renderer
/// can be driven from a context where its vertex array is already bound.
pub struct VertexArray<G: Graphics, V: Vertex + Pod> {
    state: State<G, V>,
    vertex_count: usize,
    setup: bool,
}

impl<G: Graphics, V: Vertex + Pod> VertexArray<G, V> {
    pub fn new(vertices: Vec<V>) -> Self {
        Self {
            vertex_count: vertices.len(),
            state: State::Unprepared(vertices),
            setup: false,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }

    pub fn is_prepared(&self) -> bool {
        matches!(self.state, State::Prepared { .. })
    }

    pub fn is_setup(&self) -> bool {
        self.setup
    }

    /// The CPU side vertices. They are released once the array is prepared.
    pub fn vertices(&self) -> Option<&[V]> {
        match &self.state {
            State::Unprepared(vertices) => Some(vertices),
            State::Prepared { .. } => None,
        }
    }

    /// The context the vertices were uploaded with.
    pub fn graphics(&self) -> Option<&G> {
        match &self.state {
            State::Unprepared(_) => None,
            State::Prepared { ctx, .. } => Some(ctx),
        }
    }

    /// Uploads the vertices into a static GPU buffer.
    ///
    /// Does nothing if the array is already prepared or has no vertices.
    pub fn prepare(&mut self, ctx: &G) {
        if self.is_empty() {
            return;
        }

        let buffer = match &self.state {
            State::Unprepared(vertices) => ctx.new_buffer(BufferUsage::Static, vertices),
            State::Prepared { .. } => return,
        };

        log::debug!("prepared vertex array of {} vertices", self.vertex_count);

        self.state = State::Prepared {
            ctx: ctx.clone(),
            buffer,
        };
    }

    /// Binds the vertex attributes. Returns false if they were already bound,
    /// in which case the caller must not call `cleanup`.
    ///
    /// Panics if the array isn't prepared.
    pub fn setup(&mut self) -> bool {
        let State::Prepared { ctx, buffer } = &self.state else {
            panic!("vertex array must be prepared before it is set up");
        };

        if self.setup {
            return false;
        }

        ctx.bind_vertices(&buffer.bindings());
        self.setup = true;
        true
    }

    pub fn cleanup(&mut self) {
        if !self.setup {
            return;
        }

        if let State::Prepared { ctx, buffer } = &self.state {
            ctx.unbind_vertices(&buffer.bindings());
        }
        self.setup = false;
    }

    /// Draws all vertices as a single primitive of the given type.
    pub fn render(&mut self, prim_type: PrimType) {
        if self.is_empty() {
            return;
        }

        let setup = self.setup();
        if let Some(ctx) = self.graphics() {
            ctx.draw_arrays(prim_type, 0, self.vertex_count as u32);
        }
        if setup {
            self.cleanup();
        }
    }

    pub(crate) fn draw_ranges(&self, prim_type: PrimType, ranges: &Ranges) {
        match &self.state {
            State::Prepared { ctx, .. } => {
                debug_assert!(self.setup, "vertex array must be set up before drawing");
                ctx.multi_draw_arrays(prim_type, ranges);
            }
            State::Unprepared(_) => panic!("vertex array must be prepared before drawing"),
        }
    }
}
