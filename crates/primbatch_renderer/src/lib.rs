//! Texture-keyed batching of primitive index ranges.
//!
//! Geometry is produced in two passes. A sizing pass records, with `inc`, every
//! primitive that will be added. A builder created from that size then appends
//! vertices and records the range each primitive occupies, grouped by texture
//! and primitive type. Renderers upload the vertices once and draw every
//! texture bucket with one multi-draw call per primitive type.

use std::fmt::Arguments;

use primbatch_graphics_hal::texture::TextureHandle;

pub mod error;
pub mod index_range_map;
pub mod index_range_map_builder;
pub mod index_range_renderer;
pub mod texture_render_func;
pub mod textured_index_range_map;
pub mod textured_index_range_map_builder;
pub mod textured_index_range_renderer;
pub mod vertex_array;
pub mod vertex_list_builder;

mod buckets;

#[cfg(test)]
mod test_graphics;

pub use primbatch_graphics_hal::{
    prim_type::PrimType,
    ranges::{Range, Ranges},
};

/// Key of a texture bucket. `None` groups untextured geometry.
pub type TextureKey = Option<TextureHandle>;

/// Reports a fill that doesn't match its sizing pass.
///
/// This is a bug in the caller, so debug builds panic. Release builds
/// keep going with a reallocation and log it.
#[track_caller]
pub(crate) fn sizing_mismatch(message: Arguments) {
    if cfg!(debug_assertions) {
        panic!("sizing mismatch: {}", message);
    }
    log::warn!("sizing mismatch: {}", message);
}
