use primbatch_graphics_hal::Graphics;

use crate::TextureKey;

/// Brackets the draw calls of every texture bucket.
///
/// `before` is called right before the bucket's primitives are drawn
/// and `after` right after, once per bucket.
pub trait TextureRenderFunc {
    fn before(&mut self, texture: TextureKey);
    fn after(&mut self, texture: TextureKey);
}

/// Binds each bucket's texture while it is drawn. Untextured buckets are drawn
/// with whatever texture state is current.
pub struct DefaultTextureRenderFunc<'a, G: Graphics> {
    ctx: &'a G,
}

impl<'a, G: Graphics> DefaultTextureRenderFunc<'a, G> {
    pub fn new(ctx: &'a G) -> Self {
        Self { ctx }
    }
}

impl<'a, G: Graphics> TextureRenderFunc for DefaultTextureRenderFunc<'a, G> {
    fn before(&mut self, texture: TextureKey) {
        if let Some(texture) = texture {
            self.ctx.activate_texture(texture);
        }
    }

    fn after(&mut self, texture: TextureKey) {
        if let Some(texture) = texture {
            self.ctx.deactivate_texture(texture);
        }
    }
}

/// Leaves texture state alone, e.g. for depth-only or picking passes.
#[derive(Default, Clone, Copy, Debug)]
pub struct NoTextureRenderFunc;

impl TextureRenderFunc for NoTextureRenderFunc {
    fn before(&mut self, _: TextureKey) {}
    fn after(&mut self, _: TextureKey) {}
}

/// A `(before, after)` pair of closures.
impl<B, A> TextureRenderFunc for (B, A)
where
    B: FnMut(TextureKey),
    A: FnMut(TextureKey),
{
    fn before(&mut self, texture: TextureKey) {
        (self.0)(texture)
    }

    fn after(&mut self, texture: TextureKey) {
        (self.1)(texture)
    }
}
