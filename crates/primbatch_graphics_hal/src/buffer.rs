use std::{marker::PhantomData, mem::size_of, rc::Rc};

use bytemuck::Pod;

use crate::Graphics;

/// How the contents of a vertex buffer are used once uploaded.
///
/// Vertex arrays are uploaded once and never written again, so static draw
/// is the only usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    /// Uploaded once and drawn many times.
    Static,
}

/// Vertex memory owned by a GPU, holding raw bytes.
///
/// The memory is released when the buffer is dropped.
pub trait ByteBuffer<G: Graphics> {
    type Usage;

    /// Allocates a buffer sized to `bytes` and uploads them.
    fn upload(ctx: G, usage: Self::Usage, bytes: &[u8]) -> Self;

    /// Size of the buffer in bytes.
    fn len(&self) -> usize;
}

/// A typed view of a [`ByteBuffer`] holding a list of `T`.
pub struct Buffer<G: Graphics, T: Pod> {
    pub bytes: Rc<G::ByteBuffer>,
    _t: PhantomData<T>,
}

impl<G: Graphics, T: Pod> Clone for Buffer<G, T> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
            _t: PhantomData,
        }
    }
}

impl<G: Graphics, T: Pod> Buffer<G, T> {
    pub(crate) fn new(ctx: G, usage: G::BufferUsage, data: &[T]) -> Self {
        Self {
            bytes: Rc::new(G::ByteBuffer::upload(ctx, usage, bytemuck::cast_slice(data))),
            _t: PhantomData,
        }
    }

    /// Number of `T` in the buffer.
    pub fn len(&self) -> usize {
        self.bytes.len() / size_of::<T>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
