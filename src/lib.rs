//! Texture-keyed batching of primitive index ranges, with an OpenGL ES 2 backend.

pub use primbatch_graphics_hal as graphics_hal;
pub use primbatch_graphics_hal_gles2 as gles2;
pub use primbatch_renderer as renderer;
