use glow::HasContext;
use primbatch_graphics_hal::{
    buffer::{BufferUsage, ByteBuffer},
    WindowBackend,
};

use crate::{constants::GlConstant, Gles};

/// A GL array buffer holding vertex data.
pub struct GlesBuffer<B: WindowBackend> {
    pub ctx: Gles<B>,
    pub len: usize,
    pub buffer: glow::Buffer,
}

impl<B: WindowBackend> ByteBuffer<Gles<B>> for GlesBuffer<B> {
    type Usage = BufferUsage;

    fn upload(ctx: Gles<B>, usage: Self::Usage, bytes: &[u8]) -> Self {
        let buffer = {
            let mut context = ctx.get_ref();
            let buffer = unsafe { context.gl.create_buffer() }.expect("Unable to create buffer.");

            context.bind_buffer(Some(buffer));
            unsafe {
                context
                    .gl
                    .buffer_data_u8_slice(glow::ARRAY_BUFFER, bytes, usage.gl_const())
            };

            buffer
        };

        log::debug!("uploaded {} bytes of vertices as {:?}", bytes.len(), usage);

        Self {
            ctx,
            len: bytes.len(),
            buffer,
        }
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl<B: WindowBackend> Drop for GlesBuffer<B> {
    fn drop(&mut self) {
        let mut context = self.ctx.get_ref();
        if context.state.bound_buffer == Some(self.buffer) {
            context.bind_buffer(None);
        }
        unsafe { context.gl.delete_buffer(self.buffer) };
    }
}
