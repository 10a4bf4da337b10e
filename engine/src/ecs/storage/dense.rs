use std::{collections::HashMap, fmt, hash::Hash};

use crate::ecs::storage::Error;

/// A keyed container with O(1) insert, lookup and removal, and contiguous value storage.
///
/// Values are packed in insertion order. Removing a key moves the last value into the vacated
/// slot, so iteration order is insertion order only until the first removal.
///
/// # Example
///
/// ```rust,ignore
/// let mut map = DenseMap::new();
/// map.insert(1, "one")?;
/// map.insert(2, "two")?;
/// map.insert(3, "three")?;
///
/// map.remove(1)?;
/// assert_eq!(map.values(), &["three", "two"]);
/// ```
pub struct DenseMap<K, V> {
    /// Key to slot in the packed arrays.
    index: HashMap<K, usize>,

    /// Slot to key. Always the same length as `values`.
    keys: Vec<K>,

    /// The packed values.
    values: Vec<V>,
}

impl<K, V> DenseMap<K, V>
where
    K: Copy + Eq + Hash,
{
    /// Create a new, empty map.
    #[inline]
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            keys: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Create a new, empty map with room for `capacity` entries before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: HashMap::with_capacity(capacity),
            keys: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Insert a value for a key that is not yet present.
    ///
    /// Returns [`Error::Occupied`] and leaves the map untouched if the key already exists.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), Error> {
        if self.index.contains_key(&key) {
            return Err(Error::Occupied);
        }
        self.index.insert(key, self.values.len());
        self.keys.push(key);
        self.values.push(value);
        Ok(())
    }

    /// Replace the value for a present key, returning the previous value.
    pub fn update(&mut self, key: K, value: V) -> Result<V, Error> {
        let slot = self.slot(key)?;
        Ok(std::mem::replace(&mut self.values[slot], value))
    }

    /// Remove a present key, returning its value.
    ///
    /// The last value is swapped into the vacated slot.
    pub fn remove(&mut self, key: K) -> Result<V, Error> {
        let slot = self.index.remove(&key).ok_or(Error::Vacant)?;
        let value = self.values.swap_remove(slot);
        self.keys.swap_remove(slot);

        // Re-point the key that was moved into the hole, unless the hole was the tail.
        if let Some(&moved) = self.keys.get(slot) {
            self.index.insert(moved, slot);
        }
        Ok(value)
    }

    /// Remove a present key, dropping its value.
    #[inline]
    pub fn erase(&mut self, key: K) -> Result<(), Error> {
        self.remove(key).map(drop)
    }

    /// Check if the key is present.
    #[inline]
    pub fn contains(&self, key: K) -> bool {
        self.index.contains_key(&key)
    }

    /// Get the value for a present key.
    #[inline]
    pub fn get(&self, key: K) -> Result<&V, Error> {
        let slot = self.slot(key)?;
        Ok(&self.values[slot])
    }

    /// Get the value for a present key, mutably.
    #[inline]
    pub fn get_mut(&mut self, key: K) -> Result<&mut V, Error> {
        let slot = self.slot(key)?;
        Ok(&mut self.values[slot])
    }

    /// The packed values in dense order.
    #[inline]
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// The packed values in dense order, mutably.
    #[inline]
    pub fn values_mut(&mut self) -> &mut [V] {
        &mut self.values
    }

    /// The keys in dense order. `keys()[i]` owns `values()[i]`.
    #[inline]
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Iterate `(key, value)` pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> {
        self.keys.iter().copied().zip(self.values.iter())
    }

    /// Iterate `(key, value)` pairs in dense order with mutable values.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (K, &mut V)> {
        self.keys.iter().copied().zip(self.values.iter_mut())
    }

    /// The number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the map holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.index.clear();
        self.keys.clear();
        self.values.clear();
    }

    #[inline]
    fn slot(&self, key: K) -> Result<usize, Error> {
        self.index.get(&key).copied().ok_or(Error::Vacant)
    }
}

impl<K, V> Default for DenseMap<K, V>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for DenseMap<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            index: self.index.clone(),
            keys: self.keys.clone(),
            values: self.values.clone(),
        }
    }
}

impl<K, V> fmt::Debug for DenseMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.keys.iter().zip(self.values.iter())).finish()
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use super::*;

    // ==================== Insert / Lookup ====================

    #[test]
    fn insert_and_get() {
        // Given
        let mut map = DenseMap::new();

        // When
        map.insert(7u32, "seven").unwrap();
        map.insert(2u32, "two").unwrap();

        // Then
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(7), Ok(&"seven"));
        assert_eq!(map.get(2), Ok(&"two"));
        assert_eq!(map.values(), &["seven", "two"]);
        assert_eq!(map.keys(), &[7, 2]);
    }

    #[test]
    fn insert_existing_key_fails_and_keeps_value() {
        // Given
        let mut map = DenseMap::new();
        map.insert(1u32, 10).unwrap();

        // When
        let result = map.insert(1, 20);

        // Then
        assert_eq!(result, Err(Error::Occupied));
        assert_eq!(map.get(1), Ok(&10));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn get_missing_key_fails() {
        let mut map = DenseMap::<u32, u32>::new();

        assert_eq!(map.get(3), Err(Error::Vacant));
        assert_eq!(map.get_mut(3), Err(Error::Vacant));
        assert!(!map.contains(3));
    }

    // ==================== Update ====================

    #[test]
    fn update_replaces_value() {
        // Given
        let mut map = DenseMap::new();
        map.insert(1u32, 10).unwrap();

        // When
        let previous = map.update(1, 11);

        // Then
        assert_eq!(previous, Ok(10));
        assert_eq!(map.get(1), Ok(&11));
    }

    #[test]
    fn update_missing_key_fails() {
        let mut map = DenseMap::<u32, u32>::new();

        assert_eq!(map.update(1, 11), Err(Error::Vacant));
        assert!(map.is_empty());
    }

    #[test]
    fn get_mut_writes_through() {
        let mut map = DenseMap::new();
        map.insert(4u32, 1.0f32).unwrap();

        *map.get_mut(4).unwrap() += 0.5;

        assert_eq!(map.get(4), Ok(&1.5));
    }

    // ==================== Removal ====================

    #[test]
    fn remove_swaps_last_into_hole() {
        // Given
        let mut map = DenseMap::new();
        map.insert(1u32, 'a').unwrap();
        map.insert(2u32, 'b').unwrap();
        map.insert(3u32, 'c').unwrap();

        // When
        let removed = map.remove(1);

        // Then - the tail moved into slot 0
        assert_eq!(removed, Ok('a'));
        assert_eq!(map.values(), &['c', 'b']);
        assert_eq!(map.keys(), &[3, 2]);

        // Then - the moved key is still addressable
        assert_eq!(map.get(3), Ok(&'c'));
        assert_eq!(map.get(2), Ok(&'b'));
        assert!(!map.contains(1));
    }

    #[test]
    fn remove_tail_does_not_move_anything() {
        let mut map = DenseMap::new();
        map.insert(1u32, 'a').unwrap();
        map.insert(2u32, 'b').unwrap();

        map.erase(2).unwrap();

        assert_eq!(map.values(), &['a']);
        assert_eq!(map.get(1), Ok(&'a'));
    }

    #[test]
    fn remove_missing_key_fails() {
        let mut map = DenseMap::<u32, char>::new();
        map.insert(1, 'a').unwrap();

        assert_eq!(map.remove(2), Err(Error::Vacant));
        assert_eq!(map.erase(2), Err(Error::Vacant));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn reinsert_after_remove() {
        let mut map = DenseMap::new();
        map.insert(1u32, 'a').unwrap();
        map.erase(1).unwrap();

        map.insert(1, 'z').unwrap();

        assert_eq!(map.get(1), Ok(&'z'));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn clear_empties_everything() {
        let mut map = DenseMap::new();
        map.insert(1u32, 'a').unwrap();
        map.insert(2u32, 'b').unwrap();

        map.clear();

        assert!(map.is_empty());
        assert!(!map.contains(1));
        assert!(map.keys().is_empty());
        map.insert(1, 'c').unwrap();
        assert_eq!(map.values(), &['c']);
    }

    // ==================== Iteration ====================

    #[test]
    fn iter_pairs_keys_with_values() {
        let mut map = DenseMap::new();
        map.insert(10u32, 100).unwrap();
        map.insert(20u32, 200).unwrap();
        map.insert(30u32, 300).unwrap();
        map.erase(10).unwrap();

        let pairs: Vec<_> = map.iter().map(|(k, v)| (k, *v)).collect();

        assert_eq!(pairs, vec![(30, 300), (20, 200)]);
    }

    #[test]
    fn iter_mut_updates_in_place() {
        let mut map = DenseMap::new();
        map.insert(1u32, 1).unwrap();
        map.insert(2u32, 2).unwrap();

        for (key, value) in map.iter_mut() {
            *value *= key * 10;
        }

        assert_eq!(map.get(1), Ok(&10));
        assert_eq!(map.get(2), Ok(&40));
    }

    #[test]
    fn random_sequence_matches_model() {
        // Given - a seeded generator and a HashMap as the reference model
        let mut rng = ChaCha8Rng::seed_from_u64(0x2545_f491);
        let mut map = DenseMap::new();
        let mut model = HashMap::new();

        // When
        for step in 0..5_000u64 {
            let key = rng.gen_range(0..64u32);
            if rng.gen_ratio(1, 3) {
                assert_eq!(map.remove(key).ok(), model.remove(&key));
            } else {
                let inserted = map.insert(key, step).is_ok();
                assert_eq!(inserted, !model.contains_key(&key));
                model.entry(key).or_insert(step);
            }

            // Then - the invariants hold after every step
            assert_eq!(map.len(), model.len());
            assert_eq!(map.keys().len(), map.values().len());
        }

        for (key, value) in &model {
            assert!(map.contains(*key));
            assert_eq!(map.get(*key), Ok(value));
        }

        let mut seen: Vec<_> = map.keys().to_vec();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), model.len());
    }
}
