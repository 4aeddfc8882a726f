use bytemuck::Pod;
use derive_more::Constructor;
use enum_map::EnumMap;
use primbatch_graphics_hal::{
    prim_type::PrimType,
    ranges::{Range, Ranges},
    vertex_buffer::Vertex,
    Graphics,
};

use crate::{error::RangeError, sizing_mismatch, vertex_array::VertexArray};

/// Number of ranges and vertices planned for one primitive type.
#[derive(Constructor, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RangeSize {
    pub count: usize,
    pub vertices: usize,
}

/// The sizing pass of an [`IndexRangeMap`].
///
/// `inc` must be called once for every range that will later be added,
/// with the same primitive type and vertex count.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Size {
    sizes: EnumMap<PrimType, RangeSize>,
}

impl Size {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plans one range of `prim_type` spanning `vertex_count` vertices.
    pub fn inc(&mut self, prim_type: PrimType, vertex_count: usize) {
        let size = &mut self.sizes[prim_type];
        size.count += 1;
        size.vertices += vertex_count;
    }

    /// Adds every planned range of `other` to this size.
    pub fn merge(&mut self, other: &Size) {
        for (prim_type, size) in other.sizes.iter() {
            let mine = &mut self.sizes[prim_type];
            mine.count += size.count;
            mine.vertices += size.vertices;
        }
    }

    pub fn get(&self, prim_type: PrimType) -> RangeSize {
        self.sizes[prim_type]
    }

    pub fn range_count(&self) -> usize {
        self.sizes.values().map(|s| s.count).sum()
    }

    pub fn vertex_count(&self) -> usize {
        self.sizes.values().map(|s| s.vertices).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.range_count() == 0
    }

    /// Iterates primitive types with at least one planned range.
    pub fn iter(&self) -> impl Iterator<Item = (PrimType, RangeSize)> + '_ {
        self.sizes
            .iter()
            .filter(|(_, size)| size.count > 0)
            .map(|(prim_type, size)| (prim_type, *size))
    }
}

/// Ranges of a vertex array, grouped by primitive type.
///
/// Within a primitive type ranges keep the order they were added in, which
/// is also the order they are drawn in.
#[derive(Clone, Debug, Default)]
pub struct IndexRangeMap {
    ranges: EnumMap<PrimType, Ranges>,
    // Set when the map was sized up front: the number of ranges
    // reserved per primitive type.
    reserved: Option<EnumMap<PrimType, usize>>,
}

impl IndexRangeMap {
    /// Creates an empty map which grows as ranges are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a map with storage reserved for exactly the ranges planned in `size`.
    pub fn with_size(size: &Size) -> Self {
        let mut ranges = EnumMap::<PrimType, Ranges>::default();
        let mut reserved = EnumMap::<PrimType, usize>::default();

        for (prim_type, size) in size.iter() {
            ranges[prim_type] = Ranges::with_capacity(size.count);
            reserved[prim_type] = size.count;
        }

        Self {
            ranges,
            reserved: Some(reserved),
        }
    }

    /// Creates a growable map holding a single range.
    pub fn single(prim_type: PrimType, index: u32, count: u32) -> Self {
        let mut map = Self::new();
        map.add(prim_type, index, count);
        map
    }

    /// Appends a range of `count` vertices starting at `index`.
    ///
    /// The range is not checked against any vertex array.
    pub fn add(&mut self, prim_type: PrimType, index: u32, count: u32) {
        if let Some(reserved) = &self.reserved {
            let used = self.ranges[prim_type].len();
            if used >= reserved[prim_type] {
                sizing_mismatch(format_args!(
                    "{:?} range {} added, but only {} were planned",
                    prim_type,
                    used + 1,
                    reserved[prim_type]
                ));
            }
        }

        self.ranges[prim_type].push(Range::new(index, count));
    }

    /// Appends all ranges of `other`, per primitive type, after the ranges of this map.
    pub fn merge(&mut self, other: &IndexRangeMap) {
        for (prim_type, theirs) in other.ranges.iter() {
            if theirs.is_empty() {
                continue;
            }

            let mine = &mut self.ranges[prim_type];
            match &self.reserved {
                Some(reserved) if mine.len() + theirs.len() > reserved[prim_type] => {
                    sizing_mismatch(format_args!(
                        "merging {} {:?} ranges into {} of {} planned",
                        theirs.len(),
                        prim_type,
                        mine.len(),
                        reserved[prim_type]
                    ));
                }
                Some(_) => {}
                None => mine.reserve(theirs.len()),
            }

            mine.extend_from(theirs);
        }
    }

    pub fn ranges(&self, prim_type: PrimType) -> &Ranges {
        &self.ranges[prim_type]
    }

    /// Iterates primitive types that have ranges, in primitive type order.
    pub fn iter(&self) -> impl Iterator<Item = (PrimType, &Ranges)> + '_ {
        self.ranges
            .iter()
            .filter(|(_, ranges)| !ranges.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn range_count(&self) -> usize {
        self.ranges.values().map(Ranges::len).sum()
    }

    pub fn vertex_count(&self) -> usize {
        self.ranges.values().map(Ranges::vertex_count).sum()
    }

    /// Returns the size a sizing pass needs to record to hold this map's contents.
    pub fn size(&self) -> Size {
        let mut size = Size::new();
        self.for_each_primitive(|prim_type, _, count| size.inc(prim_type, count as usize));
        size
    }

    /// Checks that every range lies within a vertex array of `vertex_count` vertices.
    pub fn validate(&self, vertex_count: usize) -> Result<(), RangeError> {
        for (prim_type, ranges) in self.iter() {
            for range in ranges.iter() {
                if range.index as usize + range.count as usize > vertex_count {
                    return Err(RangeError::OutOfBounds {
                        prim_type,
                        index: range.index,
                        count: range.count,
                        vertex_count,
                    });
                }
            }
        }

        Ok(())
    }

    /// Draws every primitive type with a single multi-draw call.
    ///
    /// The vertex array must be prepared and set up.
    pub fn render<G: Graphics, V: Vertex + Pod>(&self, vertex_array: &VertexArray<G, V>) {
        for (prim_type, ranges) in self.iter() {
            vertex_array.draw_ranges(prim_type, ranges);
        }
    }

    /// Visits every range in primitive type order, then in the order they were added.
    pub fn for_each_primitive(&self, mut f: impl FnMut(PrimType, u32, u32)) {
        for (prim_type, ranges) in self.iter() {
            for range in ranges.iter() {
                f(prim_type, range.index, range.count);
            }
        }
    }
}

/// Maps are equal when they hold the same ranges, regardless of how they were sized.
impl PartialEq for IndexRangeMap {
    fn eq(&self, other: &Self) -> bool {
        self.ranges == other.ranges
    }
}

impl Eq for IndexRangeMap {}

#[cfg(test)]
mod tests {
    use super::*;

    fn primitives(map: &IndexRangeMap) -> Vec<(PrimType, u32, u32)> {
        let mut result = Vec::new();
        map.for_each_primitive(|prim_type, index, count| result.push((prim_type, index, count)));
        result
    }

    #[test]
    fn test_size_counts_ranges_and_vertices() {
        let mut size = Size::new();
        size.inc(PrimType::Polygon, 4);
        size.inc(PrimType::Polygon, 5);
        size.inc(PrimType::Triangles, 3);

        assert_eq!(size.get(PrimType::Polygon), RangeSize::new(2, 9));
        assert_eq!(size.get(PrimType::Triangles), RangeSize::new(1, 3));
        assert_eq!(size.get(PrimType::Lines), RangeSize::default());
        assert_eq!(size.range_count(), 3);
        assert_eq!(size.vertex_count(), 12);
    }

    #[test]
    fn test_size_merge() {
        let mut a = Size::new();
        a.inc(PrimType::TriangleFan, 6);
        let mut b = Size::new();
        b.inc(PrimType::TriangleFan, 4);
        b.inc(PrimType::TriangleStrip, 8);

        a.merge(&b);

        assert_eq!(a.get(PrimType::TriangleFan), RangeSize::new(2, 10));
        assert_eq!(a.get(PrimType::TriangleStrip), RangeSize::new(1, 8));
    }

    #[test]
    fn test_sized_map_doesnt_reallocate() {
        let mut size = Size::new();
        for count in [3, 4, 5] {
            size.inc(PrimType::Polygon, count);
        }
        size.inc(PrimType::Lines, 2);

        let mut map = IndexRangeMap::with_size(&size);
        let capacity = map.ranges(PrimType::Polygon).capacity();
        let indices = map.ranges(PrimType::Polygon).indices().as_ptr();

        map.add(PrimType::Polygon, 0, 3);
        map.add(PrimType::Lines, 3, 2);
        map.add(PrimType::Polygon, 5, 4);
        map.add(PrimType::Polygon, 9, 5);

        assert_eq!(map.ranges(PrimType::Polygon).capacity(), capacity);
        assert_eq!(map.ranges(PrimType::Polygon).indices().as_ptr(), indices);
        assert_eq!(map.size(), size);
        assert_eq!(map.vertex_count(), size.vertex_count());
    }

    #[test]
    #[should_panic(expected = "sizing mismatch")]
    fn test_sized_map_rejects_unplanned_range() {
        let mut size = Size::new();
        size.inc(PrimType::Triangles, 3);

        let mut map = IndexRangeMap::with_size(&size);
        map.add(PrimType::Triangles, 0, 3);
        map.add(PrimType::Triangles, 3, 3);
    }

    #[test]
    fn test_ranges_keep_insertion_order() {
        let mut map = IndexRangeMap::new();
        map.add(PrimType::TriangleFan, 10, 4);
        map.add(PrimType::Lines, 0, 2);
        map.add(PrimType::TriangleFan, 2, 5);
        map.add(PrimType::TriangleFan, 7, 3);

        assert_eq!(
            primitives(&map),
            vec![
                (PrimType::Lines, 0, 2),
                (PrimType::TriangleFan, 10, 4),
                (PrimType::TriangleFan, 2, 5),
                (PrimType::TriangleFan, 7, 3),
            ]
        );
    }

    #[test]
    fn test_merge_appends_after_own_ranges() {
        let mut a = IndexRangeMap::new();
        a.add(PrimType::Triangles, 0, 3);
        a.add(PrimType::Points, 3, 1);

        let mut b = IndexRangeMap::new();
        b.add(PrimType::Triangles, 4, 6);
        b.add(PrimType::LineLoop, 10, 4);

        let mut replayed = a.clone();
        b.for_each_primitive(|prim_type, index, count| replayed.add(prim_type, index, count));

        a.merge(&b);

        assert_eq!(a, replayed);
        assert_eq!(
            a.ranges(PrimType::Triangles).iter().collect::<Vec<_>>(),
            vec![Range::new(0, 3), Range::new(4, 6)]
        );
    }

    #[test]
    fn test_merge_into_sized_map() {
        let mut size = Size::new();
        size.inc(PrimType::Triangles, 3);
        size.inc(PrimType::Triangles, 3);

        let mut map = IndexRangeMap::with_size(&size);
        map.add(PrimType::Triangles, 0, 3);
        map.merge(&IndexRangeMap::single(PrimType::Triangles, 3, 3));

        assert_eq!(map.size(), size);
    }

    #[test]
    fn test_validate() {
        let mut map = IndexRangeMap::new();
        map.add(PrimType::Triangles, 0, 3);
        map.add(PrimType::Quads, 3, 4);

        assert_eq!(map.validate(7), Ok(()));
        assert_eq!(
            map.validate(6),
            Err(RangeError::OutOfBounds {
                prim_type: PrimType::Quads,
                index: 3,
                count: 4,
                vertex_count: 6,
            })
        );
    }

    #[test]
    fn test_empty_map() {
        let map = IndexRangeMap::new();
        assert!(map.is_empty());
        assert_eq!(map.range_count(), 0);
        assert!(primitives(&map).is_empty());
        assert!(IndexRangeMap::with_size(&Size::new()).is_empty());
    }
}
