use primbatch_graphics_hal::prim_type::PrimType;
use thiserror::Error;

use crate::TextureKey;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("{prim_type:?} range at {index} with {count} vertices exceeds a vertex array of {vertex_count} vertices")]
    OutOfBounds {
        prim_type: PrimType,
        index: u32,
        count: u32,
        vertex_count: usize,
    },

    #[error("in bucket of texture {texture:?}: {source}")]
    Textured {
        texture: TextureKey,
        source: Box<RangeError>,
    },
}
