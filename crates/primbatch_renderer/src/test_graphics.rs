//! A [`Graphics`] implementation which records calls instead of drawing.

use std::{cell::RefCell, rc::Rc};

use bytemuck::{Pod, Zeroable};
use derive_more::Constructor;
use primbatch_graphics_hal::{
    buffer::{BufferUsage, ByteBuffer},
    prim_type::PrimType,
    ranges::{Range, Ranges},
    texture::TextureHandle,
    vertex_buffer::{Vertex, VertexBindings},
    Graphics,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Upload { bytes: usize },
    Bind { attributes: usize },
    Unbind { attributes: usize },
    DrawArrays { mode: PrimType, first: u32, count: u32 },
    MultiDraw { mode: PrimType, ranges: Vec<Range> },
    Activate(TextureHandle),
    Deactivate(TextureHandle),
}

impl Call {
    pub fn is_draw(&self) -> bool {
        matches!(self, Call::DrawArrays { .. } | Call::MultiDraw { .. })
    }
}

#[derive(Clone, Default)]
pub struct RecordingGraphics(Rc<RefCell<Vec<Call>>>);

impl RecordingGraphics {
    fn record(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub fn draw_calls(&self) -> Vec<Call> {
        self.0.borrow().iter().filter(|c| c.is_draw()).cloned().collect()
    }

    pub fn uploads(&self) -> usize {
        self.0
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::Upload { .. }))
            .count()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

pub struct RecordingBuffer {
    len: usize,
}

impl ByteBuffer<RecordingGraphics> for RecordingBuffer {
    type Usage = BufferUsage;

    fn upload(ctx: RecordingGraphics, usage: Self::Usage, bytes: &[u8]) -> Self {
        assert_eq!(usage, BufferUsage::Static);
        ctx.record(Call::Upload { bytes: bytes.len() });
        Self { len: bytes.len() }
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl Graphics for RecordingGraphics {
    type BufferUsage = BufferUsage;
    type ByteBuffer = RecordingBuffer;

    fn bind_vertices(&self, bindings: &VertexBindings<Self>) {
        self.record(Call::Bind {
            attributes: bindings.attributes.len(),
        });
    }

    fn unbind_vertices(&self, bindings: &VertexBindings<Self>) {
        self.record(Call::Unbind {
            attributes: bindings.attributes.len(),
        });
    }

    fn draw_arrays(&self, mode: PrimType, first: u32, count: u32) {
        self.record(Call::DrawArrays { mode, first, count });
    }

    fn multi_draw_arrays(&self, mode: PrimType, ranges: &Ranges) {
        self.record(Call::MultiDraw {
            mode,
            ranges: ranges.iter().collect(),
        });
    }

    fn activate_texture(&self, texture: TextureHandle) {
        self.record(Call::Activate(texture));
    }

    fn deactivate_texture(&self, texture: TextureHandle) {
        self.record(Call::Deactivate(texture));
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Constructor, Zeroable, Pod, Vertex)]
pub struct TestVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

pub fn vertex(i: u32) -> TestVertex {
    TestVertex::new([i as f32, 0.0, 0.0], [0.0, 0.0])
}

pub fn vertices(count: u32) -> Vec<TestVertex> {
    (0..count).map(vertex).collect()
}
