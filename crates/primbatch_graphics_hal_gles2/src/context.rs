use std::cell::{RefCell, RefMut};

use bitvec::prelude::BitArray;
use glow::HasContext;
use primbatch_graphics_hal::WindowBackend;

use crate::GlesSettings;

/// Generic vertex attribute locations are tracked in a 32 bit set.
pub const MAX_ATTRIBUTES: usize = 32;

/// Keep current state for optimizations here, such as
/// currently bound objects.
#[derive(Default)]
pub struct GlesState {
    pub bound_buffer: Option<glow::Buffer>,
    pub bound_texture: Option<glow::Texture>,
    pub enabled_attributes: BitArray<u32>,
    pub attribute_limit: usize,
}

pub struct GlesContext<B: WindowBackend> {
    pub gl: glow::Context,
    pub backend: B,
    pub state: RefCell<GlesState>,
    pub settings: GlesSettings,
}

impl<B: WindowBackend> GlesContext<B> {
    /// # Safety
    ///
    /// The GL context the backend resolves symbols for must be current on this thread.
    pub unsafe fn new(backend: B, settings: GlesSettings) -> Self {
        let gl = glow::Context::from_loader_function(|s| backend.get_proc_address(s));

        let attribute_limit =
            (gl.get_parameter_i32(glow::MAX_VERTEX_ATTRIBS) as usize).min(MAX_ATTRIBUTES);

        log::debug!(
            "created GL context: {} vertex attributes, legacy primitive emulation {}",
            attribute_limit,
            settings.emulate_legacy_primitives,
        );

        // Only the first texture unit is used for batch textures.
        gl.active_texture(glow::TEXTURE0);

        Self {
            gl,
            backend,
            state: RefCell::new(GlesState {
                attribute_limit,
                ..Default::default()
            }),
            settings,
        }
    }

    pub fn get_ref(&self) -> GlesContextRef<'_> {
        GlesContextRef {
            gl: &self.gl,
            state: self.state.borrow_mut(),
        }
    }
}

pub struct GlesContextRef<'a> {
    pub gl: &'a glow::Context,
    pub state: RefMut<'a, GlesState>,
}

impl<'a> GlesContextRef<'a> {
    pub fn bind_buffer(&mut self, buffer: Option<glow::Buffer>) {
        if self.state.bound_buffer != buffer {
            unsafe { self.gl.bind_buffer(glow::ARRAY_BUFFER, buffer) };
            self.state.bound_buffer = buffer;
        }
    }

    pub fn bind_texture(&mut self, texture: Option<glow::Texture>) {
        if self.state.bound_texture != texture {
            unsafe { self.gl.bind_texture(glow::TEXTURE_2D, texture) };
            self.state.bound_texture = texture;
        }
    }

    pub fn enable_attribute(&mut self, location: u32) {
        let index = location as usize;
        assert!(
            index < self.state.attribute_limit,
            "vertex attribute location {} exceeds the limit of {}",
            location,
            self.state.attribute_limit
        );

        if !self.state.enabled_attributes[index] {
            unsafe { self.gl.enable_vertex_attrib_array(location) };
            self.state.enabled_attributes.set(index, true);
        }
    }

    pub fn disable_attribute(&mut self, location: u32) {
        let index = location as usize;
        if index < self.state.attribute_limit && self.state.enabled_attributes[index] {
            unsafe { self.gl.disable_vertex_attrib_array(location) };
            self.state.enabled_attributes.set(index, false);
        }
    }
}
