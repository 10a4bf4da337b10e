use std::{fmt, hash::Hash};

use crate::ecs::storage::{DenseMap, Error};

/// A dense set of keys: a [`DenseMap`] with no payload, exposing the packed keys as a slice.
#[derive(Clone)]
pub struct DenseSet<K> {
    map: DenseMap<K, ()>,
}

impl<K> DenseSet<K>
where
    K: Copy + Eq + Hash,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            map: DenseMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: DenseMap::with_capacity(capacity),
        }
    }

    /// Insert a key that is not yet present.
    #[inline]
    pub fn insert(&mut self, key: K) -> Result<(), Error> {
        self.map.insert(key, ())
    }

    /// Remove a present key, moving the last key into its slot.
    #[inline]
    pub fn remove(&mut self, key: K) -> Result<(), Error> {
        self.map.erase(key)
    }

    #[inline]
    pub fn contains(&self, key: K) -> bool {
        self.map.contains(key)
    }

    /// The keys in dense order.
    #[inline]
    pub fn as_slice(&self) -> &[K] {
        self.map.keys()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        self.map.keys().iter().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<K> Default for DenseSet<K>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for DenseSet<K>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.map.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_semantics() {
        // Given
        let mut set = DenseSet::new();
        set.insert(1u32).unwrap();
        set.insert(2u32).unwrap();
        set.insert(3u32).unwrap();

        // When
        set.remove(1).unwrap();

        // Then
        assert_eq!(set.as_slice(), &[3, 2]);
        assert_eq!(set.insert(2), Err(Error::Occupied));
        assert_eq!(set.remove(1), Err(Error::Vacant));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![3, 2]);
        assert_eq!(set.len(), 2);
    }
}
