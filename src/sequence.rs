//! Sequence: keys and values in two lists kept in lockstep by position.
//!
//! The sequence never decides uniqueness; the dictionary validates keys
//! before handing them over. Each key carries the hash computed when it was
//! inserted so that later re-indexing never calls back into the strategy.

use crate::error::DictionaryError;

#[derive(Clone, Debug)]
pub(crate) struct Bucket<K> {
    pub(crate) hash: u64,
    pub(crate) key: K,
}

#[derive(Clone, Debug)]
pub(crate) struct Sequence<K, V> {
    keys: Vec<Bucket<K>>,
    values: Vec<V>,
}

impl<K, V> Sequence<K, V> {
    pub(crate) const fn new() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        debug_assert_eq!(self.keys.len(), self.values.len());
        self.keys.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.keys.capacity().min(self.values.capacity())
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.keys.reserve(additional);
        self.values.reserve(additional);
    }

    #[inline]
    pub(crate) fn keys(&self) -> &[Bucket<K>] {
        &self.keys
    }

    #[inline]
    pub(crate) fn values(&self) -> &[V] {
        &self.values
    }

    #[inline]
    pub(crate) fn values_mut(&mut self) -> &mut [V] {
        &mut self.values
    }

    /// Both lists at once, for iterators that need the keys shared while
    /// the values are borrowed mutably.
    #[inline]
    pub(crate) fn split_mut(&mut self) -> (&[Bucket<K>], &mut [V]) {
        (&self.keys, &mut self.values)
    }

    #[inline]
    fn check(&self, position: usize, len: usize) -> Result<(), DictionaryError> {
        if position < len {
            Ok(())
        } else {
            Err(DictionaryError::IndexOutOfRange {
                position,
                len: self.len(),
            })
        }
    }

    /// Fails unless `position` names an occupied slot.
    #[inline]
    pub(crate) fn check_occupied(&self, position: usize) -> Result<(), DictionaryError> {
        self.check(position, self.len())
    }

    /// Fails unless `position` is a valid insertion point (`0..=len`).
    #[inline]
    pub(crate) fn check_insertable(&self, position: usize) -> Result<(), DictionaryError> {
        self.check(position, self.len() + 1)
    }

    pub(crate) fn append(&mut self, bucket: Bucket<K>, value: V) {
        self.keys.push(bucket);
        self.values.push(value);
    }

    /// Shifts every entry at `position..` one slot to the right.
    pub(crate) fn insert_at(
        &mut self,
        position: usize,
        bucket: Bucket<K>,
        value: V,
    ) -> Result<(), DictionaryError> {
        self.check_insertable(position)?;
        self.keys.insert(position, bucket);
        self.values.insert(position, value);
        Ok(())
    }

    /// Shifts every entry after `position` one slot to the left.
    pub(crate) fn remove_at(&mut self, position: usize) -> Result<(Bucket<K>, V), DictionaryError> {
        self.check_occupied(position)?;
        let bucket = self.keys.remove(position);
        let value = self.values.remove(position);
        Ok((bucket, value))
    }

    pub(crate) fn pop(&mut self) -> Option<(Bucket<K>, V)> {
        let bucket = self.keys.pop()?;
        let value = self.values.pop()?;
        Some((bucket, value))
    }

    pub(crate) fn get(&self, position: usize) -> Result<(&K, &V), DictionaryError> {
        self.check_occupied(position)?;
        Ok((&self.keys[position].key, &self.values[position]))
    }

    pub(crate) fn get_mut(&mut self, position: usize) -> Result<(&K, &mut V), DictionaryError> {
        self.check_occupied(position)?;
        Ok((&self.keys[position].key, &mut self.values[position]))
    }

    /// Cached hash of the key at `position`. Callers have already checked
    /// the bound.
    #[inline]
    pub(crate) fn hash_at(&self, position: usize) -> u64 {
        self.keys[position].hash
    }

    /// Replaces the value in place and returns the old one.
    pub(crate) fn set_value(&mut self, position: usize, value: V) -> Result<V, DictionaryError> {
        self.check_occupied(position)?;
        Ok(core::mem::replace(&mut self.values[position], value))
    }

    /// Replaces key and value in place and returns the old pair.
    pub(crate) fn set_key_and_value(
        &mut self,
        position: usize,
        bucket: Bucket<K>,
        value: V,
    ) -> Result<(Bucket<K>, V), DictionaryError> {
        self.check_occupied(position)?;
        let old_bucket = core::mem::replace(&mut self.keys[position], bucket);
        let old_value = core::mem::replace(&mut self.values[position], value);
        Ok((old_bucket, old_value))
    }

    pub(crate) fn clear(&mut self) {
        self.keys.clear();
        self.values.clear();
    }

    pub(crate) fn into_parts(self) -> (Vec<Bucket<K>>, Vec<V>) {
        (self.keys, self.values)
    }
}
