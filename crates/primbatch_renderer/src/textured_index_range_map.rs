use bytemuck::Pod;
use primbatch_graphics_hal::{prim_type::PrimType, vertex_buffer::Vertex, Graphics};

use crate::{
    buckets::Buckets,
    error::RangeError,
    index_range_map::{self, IndexRangeMap},
    sizing_mismatch,
    texture_render_func::{DefaultTextureRenderFunc, TextureRenderFunc},
    vertex_array::VertexArray,
    TextureKey,
};

/// The sizing pass of a [`TexturedIndexRangeMap`]: one [`index_range_map::Size`]
/// per texture.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Size {
    buckets: Buckets<index_range_map::Size>,
}

impl Size {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plans one range of `prim_type` spanning `vertex_count` vertices,
    /// drawn with `texture`.
    pub fn inc(&mut self, texture: TextureKey, prim_type: PrimType, vertex_count: usize) {
        self.buckets
            .get_or_insert_with(texture, index_range_map::Size::new)
            .inc(prim_type, vertex_count);
    }

    /// Adds every planned range of `other`, texture by texture.
    pub fn merge(&mut self, other: &Size) {
        for (texture, size) in other.buckets.iter() {
            self.buckets
                .get_or_insert_with(texture, index_range_map::Size::new)
                .merge(size);
        }
    }

    pub fn get(&self, texture: TextureKey) -> Option<&index_range_map::Size> {
        self.buckets.get(texture)
    }

    pub fn vertex_count(&self) -> usize {
        self.buckets.iter().map(|(_, size)| size.vertex_count()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|(_, size)| size.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (TextureKey, &index_range_map::Size)> + '_ {
        self.buckets.iter()
    }
}

/// Index ranges grouped by texture, then by primitive type.
///
/// Buckets are ordered by texture handle, with untextured geometry first.
/// Rendering binds each texture once and draws everything that uses it.
#[derive(Clone, Debug, Default)]
pub struct TexturedIndexRangeMap {
    buckets: Buckets<IndexRangeMap>,
    // Sized maps only accept textures that were planned.
    fixed: bool,
}

impl TexturedIndexRangeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a map with a sized bucket for every texture planned in `size`.
    pub fn with_size(size: &Size) -> Self {
        let mut buckets = Buckets::with_capacity(size.buckets.len());
        for (texture, size) in size.iter() {
            buckets.get_or_insert_with(texture, || IndexRangeMap::with_size(size));
        }

        Self {
            buckets,
            fixed: true,
        }
    }

    /// Creates a map holding `map` as the only bucket.
    pub fn single(texture: TextureKey, map: IndexRangeMap) -> Self {
        let mut result = Self::new();
        result.add_map(texture, map);
        result
    }

    /// Creates a map holding a single range.
    pub fn single_range(
        texture: TextureKey,
        prim_type: PrimType,
        index: u32,
        count: u32,
    ) -> Self {
        Self::single(texture, IndexRangeMap::single(prim_type, index, count))
    }

    fn bucket_mut(&mut self, texture: TextureKey) -> &mut IndexRangeMap {
        if self.fixed && self.buckets.get_mut(texture).is_none() {
            sizing_mismatch(format_args!("texture {:?} was not planned", texture));
        }

        self.buckets.get_or_insert_with(texture, IndexRangeMap::new)
    }

    /// Appends a range to the bucket of `texture`.
    pub fn add(&mut self, texture: TextureKey, prim_type: PrimType, index: u32, count: u32) {
        self.bucket_mut(texture).add(prim_type, index, count);
    }

    /// Adds all ranges of `map` under `texture`. The map becomes the bucket if
    /// there is none yet.
    pub fn add_map(&mut self, texture: TextureKey, map: IndexRangeMap) {
        if let Some(bucket) = self.buckets.get_mut(texture) {
            bucket.merge(&map);
            return;
        }

        if self.fixed {
            sizing_mismatch(format_args!("texture {:?} was not planned", texture));
        }
        self.buckets.get_or_insert_with(texture, || map);
    }

    /// Merges the buckets of `other` into this map, texture by texture.
    pub fn merge(&mut self, other: &TexturedIndexRangeMap) {
        for (texture, map) in other.buckets.iter() {
            self.bucket_mut(texture).merge(map);
        }
    }

    pub fn get(&self, texture: TextureKey) -> Option<&IndexRangeMap> {
        self.buckets.get(texture)
    }

    /// Textures that have at least one range, in render order.
    pub fn textures(&self) -> impl Iterator<Item = TextureKey> + '_ {
        self.iter().map(|(texture, _)| texture)
    }

    /// Non-empty buckets in render order.
    pub fn iter(&self) -> impl Iterator<Item = (TextureKey, &IndexRangeMap)> + '_ {
        self.buckets.iter().filter(|(_, map)| !map.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn range_count(&self) -> usize {
        self.buckets.iter().map(|(_, map)| map.range_count()).sum()
    }

    pub fn vertex_count(&self) -> usize {
        self.buckets.iter().map(|(_, map)| map.vertex_count()).sum()
    }

    pub fn size(&self) -> Size {
        let mut size = Size::new();
        self.for_each_primitive(|texture, prim_type, _, count| {
            size.inc(texture, prim_type, count as usize)
        });
        size
    }

    pub fn validate(&self, vertex_count: usize) -> Result<(), RangeError> {
        for (texture, map) in self.iter() {
            map.validate(vertex_count)
                .map_err(|source| RangeError::Textured {
                    texture,
                    source: Box::new(source),
                })?;
        }

        Ok(())
    }

    /// Draws every bucket with its texture bound. An empty map draws nothing.
    pub fn render<G: Graphics, V: Vertex + Pod>(&self, vertex_array: &VertexArray<G, V>) {
        if self.is_empty() {
            return;
        }

        let Some(ctx) = vertex_array.graphics() else {
            panic!("vertex array must be prepared before drawing");
        };

        self.render_with(vertex_array, &mut DefaultTextureRenderFunc::new(ctx));
    }

    /// Draws every bucket between `func.before` and `func.after`.
    pub fn render_with<G, V, F>(&self, vertex_array: &VertexArray<G, V>, func: &mut F)
    where
        G: Graphics,
        V: Vertex + Pod,
        F: TextureRenderFunc + ?Sized,
    {
        for (texture, map) in self.iter() {
            func.before(texture);
            map.render(vertex_array);
            func.after(texture);
        }
    }

    /// Visits every range tagged with its texture, bucket by bucket.
    pub fn for_each_primitive(&self, mut f: impl FnMut(TextureKey, PrimType, u32, u32)) {
        for (texture, map) in self.iter() {
            map.for_each_primitive(|prim_type, index, count| f(texture, prim_type, index, count));
        }
    }
}

impl PartialEq for TexturedIndexRangeMap {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for TexturedIndexRangeMap {}

#[cfg(test)]
mod tests {
    use primbatch_graphics_hal::{ranges::Range, texture::TextureHandle};

    use super::*;
    use crate::test_graphics::{vertices, Call, RecordingGraphics, TestVertex};

    fn texture(id: u32) -> TextureKey {
        TextureHandle::new(id)
    }

    fn primitives(map: &TexturedIndexRangeMap) -> Vec<(TextureKey, PrimType, u32, u32)> {
        let mut result = Vec::new();
        map.for_each_primitive(|texture, prim_type, index, count| {
            result.push((texture, prim_type, index, count))
        });
        result
    }

    #[test]
    fn test_size_per_texture() {
        let mut size = Size::new();
        size.inc(texture(1), PrimType::Triangles, 3);
        size.inc(None, PrimType::Lines, 2);
        size.inc(texture(1), PrimType::Polygon, 5);

        let textured = size.get(texture(1)).unwrap();
        assert_eq!(textured.range_count(), 2);
        assert_eq!(textured.vertex_count(), 8);
        assert_eq!(size.get(None).unwrap().vertex_count(), 2);
        assert_eq!(size.get(texture(2)), None);
        assert_eq!(size.vertex_count(), 10);
    }

    #[test]
    fn test_size_merge_creates_buckets() {
        let mut a = Size::new();
        a.inc(texture(1), PrimType::Triangles, 3);

        let mut b = Size::new();
        b.inc(texture(1), PrimType::Triangles, 6);
        b.inc(texture(2), PrimType::Points, 1);

        a.merge(&b);

        assert_eq!(a.get(texture(1)).unwrap().vertex_count(), 9);
        assert_eq!(a.get(texture(2)).unwrap().range_count(), 1);
    }

    #[test]
    fn test_interleaved_adds_land_in_their_buckets() {
        let (a, b) = (texture(7), texture(3));

        let mut size = Size::new();
        size.inc(a, PrimType::Triangles, 3);
        size.inc(b, PrimType::Triangles, 3);
        size.inc(a, PrimType::Triangles, 3);

        let mut interleaved = TexturedIndexRangeMap::with_size(&size);
        interleaved.add(a, PrimType::Triangles, 0, 3);
        interleaved.add(b, PrimType::Triangles, 3, 3);
        interleaved.add(a, PrimType::Triangles, 6, 3);

        let mut grouped = TexturedIndexRangeMap::with_size(&size);
        grouped.add(a, PrimType::Triangles, 0, 3);
        grouped.add(a, PrimType::Triangles, 6, 3);
        grouped.add(b, PrimType::Triangles, 3, 3);

        assert_eq!(interleaved, grouped);

        let bucket = interleaved.get(a).unwrap();
        assert_eq!(bucket.range_count(), 2);
        assert_eq!(bucket.vertex_count(), 6);
        assert_eq!(
            interleaved.get(b).unwrap().ranges(PrimType::Triangles).iter().collect::<Vec<_>>(),
            vec![Range::new(3, 3)]
        );
    }

    #[test]
    fn test_primitives_are_tagged_with_texture() {
        let mut map = TexturedIndexRangeMap::new();
        map.add(texture(2), PrimType::TriangleFan, 0, 4);
        map.add(None, PrimType::Lines, 4, 2);
        map.add(texture(1), PrimType::Triangles, 6, 3);
        map.add(texture(2), PrimType::Triangles, 9, 3);
        map.add(texture(2), PrimType::TriangleFan, 12, 5);

        assert_eq!(
            primitives(&map),
            vec![
                (None, PrimType::Lines, 4, 2),
                (texture(1), PrimType::Triangles, 6, 3),
                (texture(2), PrimType::Triangles, 9, 3),
                (texture(2), PrimType::TriangleFan, 0, 4),
                (texture(2), PrimType::TriangleFan, 12, 5),
            ]
        );
        assert_eq!(
            map.textures().collect::<Vec<_>>(),
            vec![None, texture(1), texture(2)]
        );
    }

    #[test]
    #[should_panic(expected = "sizing mismatch")]
    fn test_sized_map_rejects_unplanned_texture() {
        let mut size = Size::new();
        size.inc(texture(1), PrimType::Triangles, 3);

        let mut map = TexturedIndexRangeMap::with_size(&size);
        map.add(texture(2), PrimType::Triangles, 0, 3);
    }

    #[test]
    fn test_add_map_merges_into_existing_bucket() {
        let mut map = TexturedIndexRangeMap::single_range(texture(4), PrimType::Points, 0, 1);
        map.add_map(texture(4), IndexRangeMap::single(PrimType::Points, 1, 1));
        map.add_map(None, IndexRangeMap::single(PrimType::Lines, 2, 2));

        assert_eq!(
            primitives(&map),
            vec![
                (None, PrimType::Lines, 2, 2),
                (texture(4), PrimType::Points, 0, 1),
                (texture(4), PrimType::Points, 1, 1),
            ]
        );
    }

    #[test]
    fn test_merge_is_replay() {
        let mut a = TexturedIndexRangeMap::new();
        a.add(texture(1), PrimType::Triangles, 0, 3);

        let mut b = TexturedIndexRangeMap::new();
        b.add(texture(2), PrimType::Triangles, 3, 3);
        b.add(texture(1), PrimType::Polygon, 6, 4);

        let mut replayed = a.clone();
        b.for_each_primitive(|texture, prim_type, index, count| {
            replayed.add(texture, prim_type, index, count)
        });

        a.merge(&b);

        assert_eq!(a, replayed);
        assert_eq!(a.size(), replayed.size());
    }

    #[test]
    fn test_validate_names_texture() {
        let map = TexturedIndexRangeMap::single_range(texture(5), PrimType::Lines, 8, 2);

        assert_eq!(map.validate(10), Ok(()));
        assert_eq!(
            map.validate(9),
            Err(RangeError::Textured {
                texture: texture(5),
                source: Box::new(RangeError::OutOfBounds {
                    prim_type: PrimType::Lines,
                    index: 8,
                    count: 2,
                    vertex_count: 9,
                }),
            })
        );
    }

    #[test]
    fn test_render_empty_map_draws_nothing() {
        let ctx = RecordingGraphics::default();

        let mut empty = VertexArray::<RecordingGraphics, TestVertex>::new(Vec::new());
        empty.prepare(&ctx);
        TexturedIndexRangeMap::new().render(&empty);

        let mut array = VertexArray::new(vertices(3));
        array.prepare(&ctx);
        array.setup();
        TexturedIndexRangeMap::with_size(&Size::new()).render(&array);
        array.cleanup();

        assert!(ctx.draw_calls().is_empty());
        assert!(!ctx
            .calls()
            .iter()
            .any(|c| matches!(c, Call::Activate(_) | Call::Deactivate(_))));
    }

    #[test]
    fn test_empty_map() {
        let map = TexturedIndexRangeMap::with_size(&Size::new());
        assert!(map.is_empty());
        assert!(primitives(&map).is_empty());
        assert_eq!(map.textures().count(), 0);
    }
}
