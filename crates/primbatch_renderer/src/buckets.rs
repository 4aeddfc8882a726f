use crate::TextureKey;

/// Values keyed by texture, kept sorted by texture identity.
///
/// Geometry is usually added in long runs for the same texture, so the
/// position of the last accessed bucket is cached and checked before
/// searching. Any access to another texture moves the cursor.
#[derive(Clone, Debug)]
pub(crate) struct Buckets<V> {
    entries: Vec<(TextureKey, V)>,
    current: Option<usize>,
}

impl<V> Default for Buckets<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            current: None,
        }
    }
}

impl<V> Buckets<V> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            current: None,
        }
    }

    fn position(&self, key: TextureKey) -> Result<usize, usize> {
        if let Some(current) = self.current {
            if self.entries[current].0 == key {
                return Ok(current);
            }
        }

        self.entries.binary_search_by(|(k, _)| k.cmp(&key))
    }

    pub fn get(&self, key: TextureKey) -> Option<&V> {
        self.position(key).ok().map(|i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: TextureKey) -> Option<&mut V> {
        self.current = self.position(key).ok();
        let position = self.current?;
        Some(&mut self.entries[position].1)
    }

    pub fn get_or_insert_with(&mut self, key: TextureKey, f: impl FnOnce() -> V) -> &mut V {
        let position = match self.position(key) {
            Ok(position) => position,
            Err(position) => {
                // Insertion shifts the entries after it, so the cursor is
                // always reassigned below.
                self.entries.insert(position, (key, f()));
                position
            }
        };

        self.current = Some(position);
        &mut self.entries[position].1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TextureKey, &V)> + '_ {
        self.entries.iter().map(|(key, value)| (*key, value))
    }

    #[cfg(test)]
    pub fn current(&self) -> Option<TextureKey> {
        self.current.map(|i| self.entries[i].0)
    }
}

impl<V: PartialEq> PartialEq for Buckets<V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<V: Eq> Eq for Buckets<V> {}
