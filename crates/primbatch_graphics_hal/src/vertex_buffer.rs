use std::{mem::size_of, rc::Rc};

use bytemuck::Pod;
use derive_more::Constructor;
pub use primbatch_graphics_hal_macro::Vertex;

use crate::{buffer::Buffer, Graphics};

pub trait Vertex {
    // The layout is fixed at compile time, so a list of vertices
    // is uploaded to a GPU as a plain byte slice with bytemuck.
    const FORMAT: &'static [VertexAttribute];
}

/// One field of a vertex, bound to a generic vertex attribute location.
#[derive(Constructor, Clone, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    pub location: u32,
    pub offset: usize,
    pub kind: AttributeKind,
    pub size: VectorSize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeKind {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    F32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VectorSize {
    N1,
    N2,
    N3,
    N4,
}

impl VectorSize {
    pub fn size(self) -> usize {
        match self {
            VectorSize::N1 => 1,
            VectorSize::N2 => 2,
            VectorSize::N3 => 3,
            VectorSize::N4 => 4,
        }
    }
}

pub trait AsAttributeKind {
    const KIND: AttributeKind;
    const SIZE: VectorSize;
}

macro_rules! impl_as_attribute_kind {
    ($(($t:ty, $cons:ident)),*) => {
        $(
        impl AsAttributeKind for $t {
            const KIND: AttributeKind = AttributeKind::$cons;
            const SIZE: VectorSize = VectorSize::N1;
        }
        impl AsAttributeKind for [$t; 1] {
            const KIND: AttributeKind = AttributeKind::$cons;
            const SIZE: VectorSize = VectorSize::N1;
        }
        impl AsAttributeKind for [$t; 2] {
            const KIND: AttributeKind = AttributeKind::$cons;
            const SIZE: VectorSize = VectorSize::N2;
        }
        impl AsAttributeKind for [$t; 3] {
            const KIND: AttributeKind = AttributeKind::$cons;
            const SIZE: VectorSize = VectorSize::N3;
        }
        impl AsAttributeKind for [$t; 4] {
            const KIND: AttributeKind = AttributeKind::$cons;
            const SIZE: VectorSize = VectorSize::N4;
        }
        )*
    };
}

impl_as_attribute_kind!(
    (i8, I8),
    (u8, U8),
    (i16, I16),
    (u16, U16),
    (i32, I32),
    (u32, U32),
    (f32, F32)
);

/// A vertex buffer with its type erased, together with the layout
/// needed to bind it as vertex attribute state.
pub struct VertexBindings<'a, G: Graphics> {
    pub buffer: Rc<G::ByteBuffer>,
    pub attributes: &'a [VertexAttribute],
    /// Size of one vertex in bytes.
    pub stride: usize,
}

impl<'a, G: Graphics> Clone for VertexBindings<'a, G> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
            attributes: self.attributes,
            stride: self.stride,
        }
    }
}

pub trait AsVertexBindings<G: Graphics> {
    fn bindings(&self) -> VertexBindings<'static, G>;
}

impl<T: Vertex + Pod, G: Graphics> AsVertexBindings<G> for Buffer<G, T> {
    fn bindings(&self) -> VertexBindings<'static, G> {
        VertexBindings {
            buffer: self.bytes.clone(),
            attributes: T::FORMAT,
            stride: size_of::<T>(),
        }
    }
}
