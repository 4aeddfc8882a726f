use std::num::NonZeroU32;

/// An opaque, copyable identity of a texture living on a GPU.
///
/// Handles are used purely as keys for grouping geometry by texture.
/// Whoever creates a handle keeps the texture alive for as long as
/// the handle is used for rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextureHandle(pub NonZeroU32);

impl TextureHandle {
    /// Returns None for zero, which graphics APIs reserve for "no texture".
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(Self)
    }

    pub fn id(self) -> u32 {
        self.0.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_not_a_texture() {
        assert_eq!(TextureHandle::new(0), None);
        assert_eq!(TextureHandle::new(7).map(TextureHandle::id), Some(7));
    }

    #[test]
    fn test_untextured_orders_first() {
        let a = TextureHandle::new(3);
        let b = TextureHandle::new(1);
        let mut keys = vec![a, None, b];
        keys.sort();
        assert_eq!(keys, vec![None, b, a]);
    }
}
