use enum_map::Enum;

use crate::ranges::{Range, Ranges};

/// The primitive mode of a draw call. Every vertex of one draw call
/// is interpreted with the same primitive type.
///
/// Declaration order defines the order in which per-primitive batches are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Enum)]
pub enum PrimType {
    Points,
    Lines,
    Triangles,
    Quads,
    LineStrip,
    LineLoop,
    TriangleFan,
    TriangleStrip,
    QuadStrip,
    Polygon,
}

impl PrimType {
    /// Quads, quad strips and polygons are missing from GLES and from
    /// core profiles of desktop GL.
    pub fn is_legacy(self) -> bool {
        matches!(self, PrimType::Quads | PrimType::QuadStrip | PrimType::Polygon)
    }

    /// Rewrites ranges of a legacy primitive type into ranges of a type that
    /// every backend can draw, producing the same rasterized surface for
    /// convex input.
    ///
    /// Non-legacy types are returned as is.
    pub fn lower(self, ranges: &Ranges) -> (PrimType, Ranges) {
        match self {
            PrimType::Polygon => (PrimType::TriangleFan, ranges.clone()),
            PrimType::QuadStrip => (PrimType::TriangleStrip, ranges.clone()),
            PrimType::Quads => {
                let quads = ranges.iter().map(|r| r.count as usize / 4).sum();
                let mut fans = Ranges::with_capacity(quads);
                for range in ranges.iter() {
                    for quad in 0..range.count / 4 {
                        fans.push(Range::new(range.index + quad * 4, 4));
                    }
                }
                (PrimType::TriangleFan, fans)
            }
            other => (other, ranges.clone()),
        }
    }
}
