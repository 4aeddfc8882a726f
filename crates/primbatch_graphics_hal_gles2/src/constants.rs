use primbatch_graphics_hal::{
    buffer::BufferUsage, prim_type::PrimType, vertex_buffer::AttributeKind,
};

// Compatibility profile primitive modes. GLES and core profiles don't define them,
// they're only sent when legacy primitive emulation is disabled.
const QUADS: u32 = 0x0007;
const QUAD_STRIP: u32 = 0x0008;
const POLYGON: u32 = 0x0009;

pub trait GlConstant {
    fn gl_const(self) -> u32;
}

impl GlConstant for AttributeKind {
    fn gl_const(self) -> u32 {
        match self {
            AttributeKind::I8 => glow::BYTE,
            AttributeKind::U8 => glow::UNSIGNED_BYTE,
            AttributeKind::I16 => glow::SHORT,
            AttributeKind::U16 => glow::UNSIGNED_SHORT,
            AttributeKind::I32 => glow::INT,
            AttributeKind::U32 => glow::UNSIGNED_INT,
            AttributeKind::F32 => glow::FLOAT,
        }
    }
}

impl GlConstant for BufferUsage {
    fn gl_const(self) -> u32 {
        match self {
            BufferUsage::Static => glow::STATIC_DRAW,
        }
    }
}

impl GlConstant for PrimType {
    fn gl_const(self) -> u32 {
        match self {
            PrimType::Points => glow::POINTS,
            PrimType::Lines => glow::LINES,
            PrimType::Triangles => glow::TRIANGLES,
            PrimType::Quads => QUADS,
            PrimType::LineStrip => glow::LINE_STRIP,
            PrimType::LineLoop => glow::LINE_LOOP,
            PrimType::TriangleFan => glow::TRIANGLE_FAN,
            PrimType::TriangleStrip => glow::TRIANGLE_STRIP,
            PrimType::QuadStrip => QUAD_STRIP,
            PrimType::Polygon => POLYGON,
        }
    }
}
