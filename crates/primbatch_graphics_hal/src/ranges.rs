use derive_more::Constructor;

/// A contiguous run of `count` vertices starting at `index` in a vertex buffer.
#[derive(Constructor, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Range {
    pub index: u32,
    pub count: u32,
}

/// A list of ranges laid out the way multi-draw calls consume them:
/// one array of first indices and one parallel array of counts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ranges {
    indices: Vec<u32>,
    counts: Vec<u32>,
}

impl Ranges {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            indices: Vec::with_capacity(capacity),
            counts: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, range: Range) {
        self.indices.push(range.index);
        self.counts.push(range.count);
    }

    /// Appends all ranges of `other` after the ranges of `self`.
    pub fn extend_from(&mut self, other: &Ranges) {
        self.indices.extend_from_slice(&other.indices);
        self.counts.extend_from_slice(&other.counts);
    }

    pub fn reserve(&mut self, additional: usize) {
        self.indices.reserve(additional);
        self.counts.reserve(additional);
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.indices.capacity().min(self.counts.capacity())
    }

    /// Sum of vertex counts over all ranges.
    pub fn vertex_count(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn iter(&self) -> impl Iterator<Item = Range> + '_ {
        self.indices
            .iter()
            .zip(self.counts.iter())
            .map(|(&index, &count)| Range::new(index, count))
    }
}

impl FromIterator<Range> for Ranges {
    fn from_iter<I: IntoIterator<Item = Range>>(iter: I) -> Self {
        let mut ranges = Ranges::default();
        for range in iter {
            ranges.push(range);
        }
        ranges
    }
}
