use std::{borrow::Cow, rc::Rc};

use buffer::GlesBuffer;
use constants::GlConstant;
use context::GlesContext;
use derive_more::Deref;
use glow::HasContext;
use primbatch_graphics_hal::{
    buffer::BufferUsage,
    prim_type::PrimType,
    ranges::{Range, Ranges},
    texture::TextureHandle,
    vertex_buffer::VertexBindings,
    Graphics, WindowBackend,
};
use smart_default::SmartDefault;

mod buffer;
mod constants;
mod context;

#[derive(Deref)]
pub struct Gles<B: WindowBackend>(pub Rc<GlesContext<B>>);

#[derive(SmartDefault, Clone, Debug)]
pub struct GlesSettings {
    /// If true, quads, quad strips and polygons are rewritten into triangle
    /// fans and strips before they reach GL, since GLES and core profiles
    /// reject those modes.
    ///
    /// Disable only on desktop compatibility profile contexts.
    #[default(true)]
    pub emulate_legacy_primitives: bool,
}

impl GlesSettings {
    /// Whether `mode` is rewritten before it reaches GL.
    pub fn lowers(&self, mode: PrimType) -> bool {
        self.emulate_legacy_primitives && mode.is_legacy()
    }

    /// Resolves the mode and ranges that are actually sent to GL.
    pub fn resolve<'a>(&self, mode: PrimType, ranges: &'a Ranges) -> (PrimType, Cow<'a, Ranges>) {
        if self.lowers(mode) {
            let (mode, ranges) = mode.lower(ranges);
            (mode, Cow::Owned(ranges))
        } else {
            (mode, Cow::Borrowed(ranges))
        }
    }
}

impl<B: WindowBackend> Gles<B> {
    pub fn new(backend: B) -> Self {
        Self::new_with_settings(backend, Default::default())
    }

    pub fn new_with_settings(backend: B, settings: GlesSettings) -> Self {
        Self(Rc::new(unsafe { GlesContext::new(backend, settings) }))
    }
}

impl<B: WindowBackend> Clone for Gles<B> {
    fn clone(&self) -> Self {
        Gles(self.0.clone())
    }
}

/// Wraps a GL texture name so it can key textured batches.
pub fn texture_handle(texture: glow::Texture) -> TextureHandle {
    TextureHandle(texture.0)
}

fn gl_texture(handle: TextureHandle) -> glow::Texture {
    glow::NativeTexture(handle.0)
}

impl<B: WindowBackend> Graphics for Gles<B> {
    type BufferUsage = BufferUsage;
    type ByteBuffer = GlesBuffer<B>;

    fn bind_vertices(&self, bindings: &VertexBindings<Self>) {
        let mut ctx = self.get_ref();
        ctx.bind_buffer(Some(bindings.buffer.buffer));

        let stride = bindings.stride as i32;
        for attribute in bindings.attributes {
            ctx.enable_attribute(attribute.location);
            unsafe {
                ctx.gl.vertex_attrib_pointer_f32(
                    attribute.location,
                    attribute.size.size() as i32,
                    attribute.kind.gl_const(),
                    false,
                    stride,
                    attribute.offset as i32,
                );
            }
        }
    }

    fn unbind_vertices(&self, bindings: &VertexBindings<Self>) {
        let mut ctx = self.get_ref();
        for attribute in bindings.attributes {
            ctx.disable_attribute(attribute.location);
        }
    }

    fn draw_arrays(&self, mode: PrimType, first: u32, count: u32) {
        if self.settings.lowers(mode) {
            let ranges: Ranges = [Range::new(first, count)].into_iter().collect();
            return self.multi_draw_arrays(mode, &ranges);
        }

        let ctx = self.get_ref();
        unsafe { ctx.gl.draw_arrays(mode.gl_const(), first as i32, count as i32) };
    }

    fn multi_draw_arrays(&self, mode: PrimType, ranges: &Ranges) {
        let (mode, ranges) = self.settings.resolve(mode, ranges);
        log::trace!("multi draw {:?}: {} ranges", mode, ranges.len());

        // GLES2 has no glMultiDrawArrays, the batch is replayed range by range
        // inside a single backend call.
        let ctx = self.get_ref();
        let mode = mode.gl_const();
        for range in ranges.iter() {
            unsafe {
                ctx.gl
                    .draw_arrays(mode, range.index as i32, range.count as i32)
            };
        }
    }

    fn activate_texture(&self, texture: TextureHandle) {
        self.get_ref().bind_texture(Some(gl_texture(texture)));
    }

    fn deactivate_texture(&self, texture: TextureHandle) {
        let mut ctx = self.get_ref();
        if ctx.state.bound_texture == Some(gl_texture(texture)) {
            ctx.bind_texture(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use super::*;

    #[test]
    fn test_legacy_primitives_are_emulated_by_default() {
        assert!(GlesSettings::default().emulate_legacy_primitives);
    }

    fn ranges(ranges: &[(u32, u32)]) -> Ranges {
        ranges.iter().map(|&(index, count)| Range::new(index, count)).collect()
    }

    #[test]
    fn test_legacy_primitives_are_lowered_when_emulated() {
        let settings = GlesSettings::default();
        assert!(settings.lowers(PrimType::Polygon));
        assert!(!settings.lowers(PrimType::TriangleFan));

        let polygons = ranges(&[(0, 5), (5, 3)]);
        let (mode, lowered) = settings.resolve(PrimType::Polygon, &polygons);
        assert_eq!(mode, PrimType::TriangleFan);
        assert_eq!(lowered.iter().collect::<Vec<_>>(), polygons.iter().collect::<Vec<_>>());

        let strips = ranges(&[(2, 6)]);
        let (mode, _) = settings.resolve(PrimType::QuadStrip, &strips);
        assert_eq!(mode, PrimType::TriangleStrip);

        let quads = ranges(&[(0, 8)]);
        let (mode, lowered) = settings.resolve(PrimType::Quads, &quads);
        assert_eq!(mode, PrimType::TriangleFan);
        assert_eq!(
            lowered.iter().collect::<Vec<_>>(),
            vec![Range::new(0, 4), Range::new(4, 4)]
        );

        let triangles = ranges(&[(0, 3)]);
        let (mode, resolved) = settings.resolve(PrimType::Triangles, &triangles);
        assert_eq!(mode, PrimType::Triangles);
        assert!(matches!(resolved, Cow::Borrowed(_)));
    }

    #[test]
    fn test_legacy_primitives_pass_through_when_not_emulated() {
        let settings = GlesSettings {
            emulate_legacy_primitives: false,
        };

        for mode in [PrimType::Quads, PrimType::QuadStrip, PrimType::Polygon] {
            assert!(!settings.lowers(mode));
            let original = ranges(&[(0, 4), (4, 8)]);
            let (resolved_mode, resolved) = settings.resolve(mode, &original);
            assert_eq!(resolved_mode, mode);
            assert!(matches!(resolved, Cow::Borrowed(_)));
            assert_eq!(
                resolved.iter().collect::<Vec<_>>(),
                vec![Range::new(0, 4), Range::new(4, 8)]
            );
        }
    }

    #[test]
    fn test_texture_handle_keeps_gl_name() {
        let name = NonZeroU32::new(42).unwrap();
        let handle = texture_handle(glow::NativeTexture(name));
        assert_eq!(handle.id(), 42);
        assert_eq!(gl_texture(handle), glow::NativeTexture(name));
    }
}
