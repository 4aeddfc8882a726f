use std::ffi::c_void;

use buffer::{Buffer, BufferUsage, ByteBuffer};
use bytemuck::Pod;
use prim_type::PrimType;
use ranges::Ranges;
use texture::TextureHandle;
use vertex_buffer::VertexBindings;

pub mod buffer;
pub mod prim_type;
pub mod ranges;
pub mod texture;
pub mod vertex_buffer;

pub trait WindowBackend
where
    Self: 'static,
{
    fn get_proc_address(&self, symbol: &str) -> *const c_void;
}

/// The GPU side of the batching pipeline.
///
/// An implementation owns a graphics context, allocates vertex buffers on it,
/// binds vertex attribute state and issues draw calls. All methods must be
/// called from the thread that owns the context.
pub trait Graphics
where
    Self: Sized + Clone + 'static,
{
    type BufferUsage: From<BufferUsage>;
    type ByteBuffer: ByteBuffer<Self, Usage = Self::BufferUsage>;

    /// Uploads `data` into a new vertex buffer.
    fn new_buffer<T: Pod>(&self, usage: impl Into<Self::BufferUsage>, data: &[T]) -> Buffer<Self, T> {
        Buffer::new(self.clone(), usage.into(), data)
    }

    /// Enables and points every attribute of the bindings at its buffer.
    fn bind_vertices(&self, bindings: &VertexBindings<Self>);

    /// Disables the attributes enabled by a matching `bind_vertices`.
    fn unbind_vertices(&self, bindings: &VertexBindings<Self>);

    fn draw_arrays(&self, mode: PrimType, first: u32, count: u32);

    /// Draws every range of `ranges` with the same primitive mode as a single call.
    fn multi_draw_arrays(&self, mode: PrimType, ranges: &Ranges);

    fn activate_texture(&self, texture: TextureHandle);

    fn deactivate_texture(&self, texture: TextureHandle);
}
