use bytemuck::Pod;
use primbatch_graphics_hal::{vertex_buffer::Vertex, Graphics};

use crate::{
    error::RangeError,
    texture_render_func::{DefaultTextureRenderFunc, TextureRenderFunc},
    textured_index_range_map::TexturedIndexRangeMap,
    vertex_array::VertexArray,
};

/// Anything that draws textured geometry from its own vertices.
///
/// Object safe, so renderers with different vertex types can be drawn
/// together by a [`MultiTexturedIndexRangeRenderer`].
pub trait TexturedRenderer<G: Graphics> {
    fn is_empty(&self) -> bool;

    /// Uploads vertices to the GPU. Must happen before the first render.
    fn prepare(&mut self, ctx: &G);

    /// Draws all buckets, binding each texture while its bucket is drawn.
    fn render(&mut self);

    /// Draws all buckets, bracketing each with `func`.
    fn render_with(&mut self, func: &mut dyn TextureRenderFunc);
}

pub struct TexturedIndexRangeRenderer<G: Graphics, V: Vertex + Pod> {
    vertex_array: VertexArray<G, V>,
    indices: TexturedIndexRangeMap,
}

impl<G: Graphics, V: Vertex + Pod> TexturedIndexRangeRenderer<G, V> {
    pub fn new(vertex_array: VertexArray<G, V>, indices: TexturedIndexRangeMap) -> Self {
        Self {
            vertex_array,
            indices,
        }
    }

    pub fn try_new(
        vertex_array: VertexArray<G, V>,
        indices: TexturedIndexRangeMap,
    ) -> Result<Self, RangeError> {
        indices.validate(vertex_array.vertex_count())?;
        Ok(Self::new(vertex_array, indices))
    }

    pub fn vertex_array_mut(&mut self) -> &mut VertexArray<G, V> {
        &mut self.vertex_array
    }

    pub fn indices(&self) -> &TexturedIndexRangeMap {
        &self.indices
    }

    fn draw<F: TextureRenderFunc + ?Sized>(&mut self, func: &mut F) {
        let setup = self.vertex_array.setup();
        self.indices.render_with(&self.vertex_array, func);
        if setup {
            self.vertex_array.cleanup();
        }
    }
}

impl<G: Graphics, V: Vertex + Pod> TexturedRenderer<G> for TexturedIndexRangeRenderer<G, V> {
    fn is_empty(&self) -> bool {
        self.vertex_array.is_empty()
    }

    fn prepare(&mut self, ctx: &G) {
        self.vertex_array.prepare(ctx);
    }

    fn render(&mut self) {
        if self.is_empty() {
            return;
        }

        let Some(ctx) = self.vertex_array.graphics().cloned() else {
            panic!("vertex array must be prepared before it is set up");
        };
        self.draw(&mut DefaultTextureRenderFunc::new(&ctx));
    }

    fn render_with(&mut self, func: &mut dyn TextureRenderFunc) {
        if self.is_empty() {
            return;
        }

        self.draw(func);
    }
}

/// Draws several textured renderers as one, in the order they were added.
pub struct MultiTexturedIndexRangeRenderer<G: Graphics> {
    renderers: Vec<Box<dyn TexturedRenderer<G>>>,
}

impl<G: Graphics> Default for MultiTexturedIndexRangeRenderer<G> {
    fn default() -> Self {
        Self {
            renderers: Vec::new(),
        }
    }
}

impl<G: Graphics> MultiTexturedIndexRangeRenderer<G> {
    pub fn new(renderers: Vec<Box<dyn TexturedRenderer<G>>>) -> Self {
        Self { renderers }
    }

    pub fn push(&mut self, renderer: impl TexturedRenderer<G> + 'static) {
        self.renderers.push(Box::new(renderer));
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }
}

impl<G: Graphics> TexturedRenderer<G> for MultiTexturedIndexRangeRenderer<G> {
    fn is_empty(&self) -> bool {
        self.renderers.iter().all(|r| r.is_empty())
    }

    fn prepare(&mut self, ctx: &G) {
        for renderer in &mut self.renderers {
            renderer.prepare(ctx);
        }
    }

    fn render(&mut self) {
        for renderer in &mut self.renderers {
            renderer.render();
        }
    }

    fn render_with(&mut self, func: &mut dyn TextureRenderFunc) {
        for renderer in &mut self.renderers {
            renderer.render_with(func);
        }
    }
}
