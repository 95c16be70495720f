//! OrderedDictionary: public surface over the position index and the
//! sequence.
//!
//! Every mutation validates first and only then touches the sequence and
//! the index, so a failed call never leaves them out of step.

use crate::error::DictionaryError;
use crate::iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
use crate::position_index::PositionIndex;
use crate::read_only::ReadOnlyDictionary;
use crate::sequence::{Bucket, Sequence};
use crate::strategy::{HashEq, KeyStrategy};
use core::borrow::Borrow;
use core::fmt;
use core::ops::{Index, IndexMut};
use std::collections::hash_map::RandomState;

/// An insertion-ordered dictionary with key-based and positional access.
///
/// Keys are unique under the strategy `S`. Positions are dense
/// (`0..len()`) and shift when an earlier entry is inserted or removed, so
/// a position returned by [`index_of`](Self::index_of) is only meaningful
/// until the next structural change.
#[derive(Clone)]
pub struct OrderedDictionary<K, V, S = HashEq<RandomState>> {
    index: PositionIndex<S>,
    sequence: Sequence<K, V>,
}

impl<K, V> OrderedDictionary<K, V> {
    pub fn new() -> Self {
        Self::with_strategy(HashEq::default())
    }

    /// Pre-sizes storage for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_strategy(capacity, HashEq::default())
    }
}

impl<K, V, H> OrderedDictionary<K, V, HashEq<H>> {
    /// `Hash + Eq` keys hashed with `hasher`.
    pub fn with_hasher(hasher: H) -> Self {
        Self::with_strategy(HashEq::new(hasher))
    }
}

impl<K, V, S: Default> Default for OrderedDictionary<K, V, S> {
    fn default() -> Self {
        Self::with_strategy(S::default())
    }
}

impl<K, V, S> OrderedDictionary<K, V, S> {
    pub fn with_strategy(strategy: S) -> Self {
        Self {
            index: PositionIndex::new(strategy),
            sequence: Sequence::new(),
        }
    }

    pub fn with_capacity_and_strategy(capacity: usize, strategy: S) -> Self {
        Self {
            index: PositionIndex::with_capacity(capacity, strategy),
            sequence: Sequence::with_capacity(capacity),
        }
    }

    pub fn strategy(&self) -> &S {
        self.index.strategy()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sequence.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.sequence.capacity().min(self.index.capacity())
    }

    pub fn reserve(&mut self, additional: usize) {
        self.sequence.reserve(additional);
        self.index.reserve(self.sequence.keys(), additional);
    }

    fn find<Q>(&self, q: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: KeyStrategy<Q>,
    {
        if self.is_empty() {
            return None;
        }
        let hash = self.index.hash(q);
        self.index.lookup(self.sequence.keys(), hash, q)
    }

    /// Value for `key`, or `None` when absent.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: KeyStrategy<Q>,
    {
        let p = self.find(key)?;
        Some(&self.sequence.values()[p])
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: KeyStrategy<Q>,
    {
        let p = self.find(key)?;
        Some(&mut self.sequence.values_mut()[p])
    }

    /// Stored key and value for `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: KeyStrategy<Q>,
    {
        let p = self.find(key)?;
        self.sequence.get(p).ok()
    }

    /// Like [`get`](Self::get), but absence is an error.
    pub fn lookup<Q>(&self, key: &Q) -> Result<&V, DictionaryError>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: KeyStrategy<Q>,
    {
        self.get(key).ok_or(DictionaryError::KeyNotFound)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: KeyStrategy<Q>,
    {
        self.find(key).is_some()
    }

    /// Current position of `key`.
    pub fn index_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: KeyStrategy<Q>,
    {
        self.find(key)
    }

    /// Removes `key` and returns its value. Every later entry moves one
    /// position to the left.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: KeyStrategy<Q>,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: KeyStrategy<Q>,
    {
        let p = self.find(key)?;
        self.remove_at(p).ok()
    }

    /// `true` when `key` is present and its value equals `value`.
    pub fn contains_pair<Q>(&self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: KeyStrategy<Q>,
        V: PartialEq,
    {
        self.index_of_pair(key, value).is_some()
    }

    /// Position of `key`, provided its value equals `value`.
    pub fn index_of_pair<Q>(&self, key: &Q, value: &V) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: KeyStrategy<Q>,
        V: PartialEq,
    {
        let p = self.find(key)?;
        if self.sequence.values()[p] == *value {
            Some(p)
        } else {
            None
        }
    }

    /// Removes `key` only if its value equals `value`. A matching key with
    /// a different value is left alone and reported as absent.
    pub fn remove_pair<Q>(&mut self, key: &Q, value: &V) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: KeyStrategy<Q>,
        V: PartialEq,
    {
        let p = self.index_of_pair(key, value)?;
        self.remove_at(p).ok()
    }

    pub fn get_at(&self, position: usize) -> Result<(&K, &V), DictionaryError> {
        self.sequence.get(position)
    }

    pub fn get_at_mut(&mut self, position: usize) -> Result<(&K, &mut V), DictionaryError> {
        self.sequence.get_mut(position)
    }

    /// Replaces the value at `position`, keeping its key.
    pub fn set_value_at(&mut self, position: usize, value: V) -> Result<V, DictionaryError> {
        self.sequence.set_value(position, value)
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        self.sequence.get(0).ok()
    }

    pub fn last(&self) -> Option<(&K, &V)> {
        let p = self.len().checked_sub(1)?;
        self.sequence.get(p).ok()
    }

    /// Removes the entry at `position`; every later entry moves one
    /// position to the left.
    pub fn remove_at(&mut self, position: usize) -> Result<(K, V), DictionaryError> {
        self.sequence.check_occupied(position)?;
        self.index.remove(self.sequence.hash_at(position), position);
        let (bucket, value) = self.sequence.remove_at(position)?;
        self.index.shift_down(self.sequence.keys(), position);
        Ok((bucket.key, value))
    }

    /// Removes the last entry. Nothing needs re-indexing.
    pub fn pop(&mut self) -> Option<(K, V)> {
        let (bucket, value) = self.sequence.pop()?;
        self.index.remove(bucket.hash, self.sequence.len());
        Some((bucket.key, value))
    }

    /// Drops every entry. The strategy is kept.
    pub fn clear(&mut self) {
        log::trace!("clearing {} entries", self.len());
        self.sequence.clear();
        self.index.clear();
    }

    /// Clones every entry, in order, into `destination[start..]`.
    pub fn copy_into(&self, destination: &mut [(K, V)], start: usize) -> Result<(), DictionaryError>
    where
        K: Clone,
        V: Clone,
    {
        let available = destination
            .len()
            .checked_sub(start)
            .ok_or(DictionaryError::InvalidArgument(
                "start offset is past the end of the destination",
            ))?;
        if available < self.len() {
            return Err(DictionaryError::InvalidArgument(
                "destination is too small to hold every entry",
            ));
        }
        for (slot, (k, v)) in destination[start..].iter_mut().zip(self.iter()) {
            *slot = (k.clone(), v.clone());
        }
        Ok(())
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.sequence.keys(), self.sequence.values())
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let (keys, values) = self.sequence.split_mut();
        IterMut::new(keys, values)
    }

    pub fn keys(&self) -> Keys<'_, K> {
        Keys::new(self.sequence.keys())
    }

    pub fn values(&self) -> Values<'_, V> {
        self.sequence.values().iter()
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, V> {
        self.sequence.values_mut().iter_mut()
    }

    /// Read-only view over this dictionary.
    pub fn as_read_only(&self) -> ReadOnlyDictionary<'_, K, V, S> {
        ReadOnlyDictionary::new(self)
    }
}

impl<K, V, S> OrderedDictionary<K, V, S>
where
    S: KeyStrategy<K>,
{
    /// Appends a new entry. Fails with `DuplicateKey` if `key` is present.
    pub fn add(&mut self, key: K, value: V) -> Result<(), DictionaryError> {
        let hash = self.index.hash(&key);
        let position = self.sequence.len();
        self.index
            .insert(self.sequence.keys(), hash, &key, position)?;
        self.sequence.append(Bucket { hash, key }, value);
        Ok(())
    }

    /// [`add`](Self::add) for a `(key, value)` pair.
    pub fn add_pair(&mut self, pair: (K, V)) -> Result<(), DictionaryError> {
        self.add(pair.0, pair.1)
    }

    /// Overwrites the value of a present key in place, or appends a new
    /// entry. Returns the previous value.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.index.hash(&key);
        match self.index.lookup(self.sequence.keys(), hash, &key) {
            Some(p) => Some(core::mem::replace(
                &mut self.sequence.values_mut()[p],
                value,
            )),
            None => {
                let position = self.sequence.len();
                self.sequence.append(Bucket { hash, key }, value);
                self.index.insert_unique(self.sequence.keys(), position);
                None
            }
        }
    }

    /// Inserts a new entry at `position` (`0..=len()`); every entry from
    /// `position` on moves one position to the right.
    pub fn insert_at(&mut self, position: usize, key: K, value: V) -> Result<(), DictionaryError> {
        self.sequence.check_insertable(position)?;
        let hash = self.index.hash(&key);
        if self
            .index
            .lookup(self.sequence.keys(), hash, &key)
            .is_some()
        {
            return Err(DictionaryError::DuplicateKey);
        }
        self.place_at(position, Bucket { hash, key }, value)
    }

    // Caller has validated `position` and the key's absence.
    fn place_at(
        &mut self,
        position: usize,
        bucket: Bucket<K>,
        value: V,
    ) -> Result<(), DictionaryError> {
        self.sequence.insert_at(position, bucket, value)?;
        self.index.shift_up(self.sequence.keys(), position);
        self.index.insert_unique(self.sequence.keys(), position);
        Ok(())
    }

    /// Replaces the entry at `position` in place and returns the old pair.
    /// No other entry moves.
    ///
    /// Fails with `DuplicateKey` if `key` is present at another position.
    pub fn set_at(&mut self, position: usize, key: K, value: V) -> Result<(K, V), DictionaryError> {
        self.sequence.check_occupied(position)?;
        let hash = self.index.hash(&key);
        match self.index.lookup(self.sequence.keys(), hash, &key) {
            Some(p) if p != position => Err(DictionaryError::DuplicateKey),
            // Same key: equal keys hash equal, the index is already right.
            Some(_) => {
                let (old, v) = self
                    .sequence
                    .set_key_and_value(position, Bucket { hash, key }, value)?;
                Ok((old.key, v))
            }
            None => {
                self.index.remove(self.sequence.hash_at(position), position);
                let (old, v) = self
                    .sequence
                    .set_key_and_value(position, Bucket { hash, key }, value)?;
                self.index.insert_unique(self.sequence.keys(), position);
                Ok((old.key, v))
            }
        }
    }

    /// Replaces the entry at `position` by removing it and inserting the new
    /// pair at the same position. Ends in the same state as
    /// [`set_at`](Self::set_at) but re-indexes the tail twice; this is the
    /// path taken through [`PairList`](crate::PairList).
    ///
    /// Duplicate keys are rejected before anything is removed.
    pub fn reinsert_at(
        &mut self,
        position: usize,
        key: K,
        value: V,
    ) -> Result<(K, V), DictionaryError> {
        self.sequence.check_occupied(position)?;
        let current = &self.sequence.keys()[position];
        if self.index.keys_equal(&current.key, &key) {
            let hash = current.hash;
            let (old, v) = self
                .sequence
                .set_key_and_value(position, Bucket { hash, key }, value)?;
            return Ok((old.key, v));
        }

        let hash = self.index.hash(&key);
        if self
            .index
            .lookup(self.sequence.keys(), hash, &key)
            .is_some()
        {
            return Err(DictionaryError::DuplicateKey);
        }
        let old = self.remove_at(position)?;
        self.place_at(position, Bucket { hash, key }, value)?;
        Ok(old)
    }

    /// Panics if the index and the sequence disagree anywhere.
    #[doc(hidden)]
    pub fn check_invariants(&self) {
        let keys = self.sequence.keys();
        let len = self.sequence.len();
        assert_eq!(self.sequence.values().len(), len, "values out of step");
        assert_eq!(self.index.len(), len, "index size out of step");

        let mut seen = vec![false; len];
        for p in self.index.positions() {
            assert!(p < len, "index holds position {} past len {}", p, len);
            assert!(!seen[p], "index holds position {} twice", p);
            seen[p] = true;
        }

        for (i, b) in keys.iter().enumerate() {
            assert_eq!(self.index.hash(&b.key), b.hash, "stale hash at {}", i);
            assert_eq!(
                self.index.lookup(keys, b.hash, &b.key),
                Some(i),
                "key at {} resolves elsewhere",
                i
            );
        }
    }
}

impl<K, V, S> fmt::Debug for OrderedDictionary<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Order-sensitive: equal dictionaries hold equal pairs at equal positions.
impl<K, V, S1, S2> PartialEq<OrderedDictionary<K, V, S2>> for OrderedDictionary<K, V, S1>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &OrderedDictionary<K, V, S2>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, S> Eq for OrderedDictionary<K, V, S> {}

impl<K, V, Q, S> Index<&Q> for OrderedDictionary<K, V, S>
where
    K: Borrow<Q>,
    Q: ?Sized,
    S: KeyStrategy<Q>,
{
    type Output = V;

    /// Panics if `key` is absent.
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Some(v) => v,
            None => panic!("OrderedDictionary: key not found"),
        }
    }
}

impl<K, V, Q, S> IndexMut<&Q> for OrderedDictionary<K, V, S>
where
    K: Borrow<Q>,
    Q: ?Sized,
    S: KeyStrategy<Q>,
{
    fn index_mut(&mut self, key: &Q) -> &mut V {
        match self.get_mut(key) {
            Some(v) => v,
            None => panic!("OrderedDictionary: key not found"),
        }
    }
}

impl<K, V, S> Index<usize> for OrderedDictionary<K, V, S> {
    type Output = V;

    /// Value at `position`. Panics if out of range.
    fn index(&self, position: usize) -> &V {
        match self.sequence.get(position) {
            Ok((_, v)) => v,
            Err(e) => panic!("OrderedDictionary: {}", e),
        }
    }
}

impl<K, V, S> IndexMut<usize> for OrderedDictionary<K, V, S> {
    fn index_mut(&mut self, position: usize) -> &mut V {
        match self.sequence.get_mut(position) {
            Ok((_, v)) => v,
            Err(e) => panic!("OrderedDictionary: {}", e),
        }
    }
}

/// Upsert semantics: a repeated key overwrites the earlier value and keeps
/// its original position.
impl<K, V, S> Extend<(K, V)> for OrderedDictionary<K, V, S>
where
    S: KeyStrategy<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for OrderedDictionary<K, V, S>
where
    S: KeyStrategy<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut d = Self::default();
        d.extend(iter);
        d
    }
}

impl<K, V, S> IntoIterator for OrderedDictionary<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let (keys, values) = self.sequence.into_parts();
        IntoIter::new(keys, values)
    }
}

impl<'a, K, V, S> IntoIterator for &'a OrderedDictionary<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut OrderedDictionary<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::AsciiCaseInsensitive;
    use core::hash::{BuildHasher, Hasher};

    fn dict(keys: &[&'static str]) -> OrderedDictionary<&'static str, i32> {
        let mut d = OrderedDictionary::new();
        for (i, k) in keys.iter().enumerate() {
            d.add(*k, i as i32 + 1).unwrap();
        }
        d
    }

    fn order<V, S>(d: &OrderedDictionary<&'static str, V, S>) -> Vec<&'static str> {
        d.keys().copied().collect()
    }

    fn positions<V, S: KeyStrategy<&'static str>>(
        d: &OrderedDictionary<&'static str, V, S>,
    ) -> Vec<(&'static str, usize)> {
        d.keys().map(|k| (*k, d.index_of(k).unwrap())).collect()
    }

    /// Invariant: removing by key moves every later key down by one.
    #[test]
    fn remove_reindexes_tail() {
        let mut d = dict(&["A", "B", "C", "D"]);
        assert_eq!(d.remove(&"B"), Some(2));
        assert_eq!(positions(&d), [("A", 0), ("C", 1), ("D", 2)]);
        assert_eq!(d.remove(&"B"), None);
        d.check_invariants();
    }

    /// Invariant: inserting at a position moves every key from there on up
    /// by one.
    #[test]
    fn insert_at_reindexes_tail() {
        let mut d = dict(&["A", "B", "C"]);
        d.insert_at(1, "X", 9).unwrap();
        assert_eq!(
            positions(&d),
            [("A", 0), ("X", 1), ("B", 2), ("C", 3)]
        );
        d.check_invariants();
    }

    /// Invariant: `set_at` with a new key replaces exactly one entry and
    /// leaves every neighbour where it was.
    #[test]
    fn set_at_replaces_in_place() {
        let mut d = dict(&["A", "B", "C"]);
        assert_eq!(d.set_at(1, "X", 9).unwrap(), ("B", 2));
        assert_eq!(
            d.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(),
            [("A", 1), ("X", 9), ("C", 3)]
        );
        assert!(!d.contains_key(&"B"));
        d.check_invariants();

        // Same key only swaps the value.
        assert_eq!(d.set_at(1, "X", 10).unwrap(), ("X", 9));
        assert_eq!(d[&"X"], 10);
        d.check_invariants();
    }

    /// Invariant: `set_at` and `reinsert_at` reject a key held elsewhere
    /// and leave the dictionary untouched.
    #[test]
    fn positional_replace_rejects_duplicates() {
        let mut d = dict(&["A", "B", "C"]);
        let before = d.clone();
        assert_eq!(d.set_at(0, "C", 0), Err(DictionaryError::DuplicateKey));
        assert_eq!(d.reinsert_at(0, "C", 0), Err(DictionaryError::DuplicateKey));
        assert_eq!(d, before);
        d.check_invariants();
    }

    /// Invariant: `reinsert_at` ends in the same state as `set_at`.
    #[test]
    fn reinsert_matches_set_at() {
        let mut a = dict(&["A", "B", "C", "D"]);
        let mut b = a.clone();
        assert_eq!(a.set_at(1, "X", 9), b.reinsert_at(1, "X", 9));
        assert_eq!(a, b);
        assert_eq!(positions(&a), positions(&b));
        b.check_invariants();

        assert_eq!(b.reinsert_at(3, "D", 40).unwrap(), ("D", 4));
        assert_eq!(order(&b), ["A", "X", "C", "D"]);
        b.check_invariants();
    }

    /// Invariant: every failing call leaves count, order and positions
    /// unchanged.
    #[test]
    fn failures_are_all_or_nothing() {
        let mut d = dict(&["A", "B"]);
        let before = d.clone();
        assert_eq!(d.add("A", 5), Err(DictionaryError::DuplicateKey));
        assert_eq!(d.insert_at(0, "B", 5), Err(DictionaryError::DuplicateKey));
        assert_eq!(
            d.insert_at(3, "Z", 5),
            Err(DictionaryError::IndexOutOfRange {
                position: 3,
                len: 2
            })
        );
        assert!(d.remove_at(2).is_err());
        assert!(d.set_at(2, "Z", 5).is_err());
        assert!(d.get_at(2).is_err());
        assert_eq!(d, before);
        d.check_invariants();
    }

    /// Invariant: pair operations require the value to match as well.
    #[test]
    fn pair_operations_compare_values() {
        let mut d = dict(&["A", "B", "C"]);
        assert!(d.contains_pair(&"B", &2));
        assert!(!d.contains_pair(&"B", &3));
        assert_eq!(d.index_of_pair(&"C", &3), Some(2));
        assert_eq!(d.index_of_pair(&"C", &4), None);
        assert_eq!(d.remove_pair(&"B", &7), None);
        assert_eq!(d.len(), 3);
        assert_eq!(d.remove_pair(&"B", &2), Some(("B", 2)));
        assert_eq!(order(&d), ["A", "C"]);
        d.check_invariants();
    }

    /// Invariant: upsert keeps the original position of an existing key.
    #[test]
    fn insert_overwrites_in_place() {
        let mut d = dict(&["A", "B"]);
        assert_eq!(d.insert("A", 10), Some(1));
        assert_eq!(d.insert("C", 3), None);
        assert_eq!(order(&d), ["A", "B", "C"]);
        assert_eq!(d.lookup(&"A"), Ok(&10));
        assert_eq!(d.lookup(&"Z"), Err(DictionaryError::KeyNotFound));
        d.check_invariants();
    }

    /// Invariant: `pop` and `clear` keep the index in step without
    /// re-indexing, and the strategy survives `clear`.
    #[test]
    fn pop_and_clear() {
        let mut d: OrderedDictionary<String, i32, _> =
            OrderedDictionary::with_strategy(AsciiCaseInsensitive::<RandomState>::default());
        d.add("Host".to_string(), 1).unwrap();
        d.add("Accept".to_string(), 2).unwrap();
        assert_eq!(d.pop(), Some(("Accept".to_string(), 2)));
        d.check_invariants();
        d.clear();
        assert!(d.is_empty());
        d.check_invariants();
        d.add("HOST".to_string(), 3).unwrap();
        assert_eq!(d.add("host".to_string(), 4), Err(DictionaryError::DuplicateKey));
        assert_eq!(d.get("Host"), Some(&3));
    }

    /// Invariant: under a case-insensitive strategy, upsert keeps the stored
    /// spelling while positional replace stores the new one.
    #[test]
    fn case_variant_spelling() {
        let mut d: OrderedDictionary<String, i32, _> =
            OrderedDictionary::with_strategy(AsciiCaseInsensitive::<RandomState>::default());
        d.add("Host".to_string(), 1).unwrap();
        d.add("Accept".to_string(), 2).unwrap();
        assert_eq!(d.insert("HOST".to_string(), 10), Some(1));
        assert_eq!(d.get_at(0).unwrap(), (&"Host".to_string(), &10));

        let old = d.set_at(0, "HOST".to_string(), 11).unwrap();
        assert_eq!(old, ("Host".to_string(), 10));
        assert_eq!(d.get_at(0).unwrap(), (&"HOST".to_string(), &11));
        let old = d.reinsert_at(1, "accept".to_string(), 12).unwrap();
        assert_eq!(old, ("Accept".to_string(), 2));
        assert_eq!(d.get_at(1).unwrap(), (&"accept".to_string(), &12));
        assert_eq!(d.index_of("host"), Some(0));
        d.check_invariants();
    }

    /// Invariant: `copy_into` needs room for every entry from `start` on.
    #[test]
    fn copy_into_checks_capacity() {
        let d = dict(&["A", "B"]);
        let mut dest = vec![("", 0); 3];
        assert!(matches!(
            d.copy_into(&mut dest, 2),
            Err(DictionaryError::InvalidArgument(_))
        ));
        assert!(matches!(
            d.copy_into(&mut dest, 4),
            Err(DictionaryError::InvalidArgument(_))
        ));
        assert_eq!(dest, [("", 0); 3]);
        d.copy_into(&mut dest, 1).unwrap();
        assert_eq!(dest, [("", 0), ("A", 1), ("B", 2)]);
    }

    /// Invariant: re-indexing is correct when every key collides.
    #[test]
    fn reindexing_under_total_collision() {
        #[derive(Clone, Default)]
        struct ConstBuildHasher;
        struct ConstHasher;
        impl BuildHasher for ConstBuildHasher {
            type Hasher = ConstHasher;
            fn build_hasher(&self) -> Self::Hasher {
                ConstHasher
            }
        }
        impl Hasher for ConstHasher {
            fn write(&mut self, _bytes: &[u8]) {}
            fn finish(&self) -> u64 {
                0
            }
        }

        let mut d = OrderedDictionary::with_hasher(ConstBuildHasher);
        for (i, k) in ["a", "b", "c", "d", "e"].into_iter().enumerate() {
            d.add(k, i).unwrap();
        }
        d.insert_at(0, "z", 99).unwrap();
        d.check_invariants();
        d.remove(&"c");
        d.check_invariants();
        d.set_at(2, "y", 7).unwrap();
        d.check_invariants();
        d.reinsert_at(1, "x", 8).unwrap();
        d.check_invariants();
        assert_eq!(order(&d), ["z", "x", "y", "d", "e"]);
    }

    /// Invariant (debug-only): calling back into the dictionary from inside
    /// a strategy method panics instead of observing a half-updated index.
    #[cfg(debug_assertions)]
    #[test]
    fn reentrancy_from_strategy_panics() {
        use std::cell::Cell;
        use std::rc::Rc;

        type Snooped = OrderedDictionary<&'static str, i32, Snooping>;

        #[derive(Clone)]
        struct Snooping {
            target: Rc<Cell<*const ()>>,
        }
        impl KeyStrategy<&'static str> for Snooping {
            fn hash_key(&self, _key: &&'static str) -> u64 {
                0
            }
            fn keys_equal(&self, a: &&'static str, b: &&'static str) -> bool {
                let p = self.target.get();
                if !p.is_null() {
                    // Attempt to re-enter the same dictionary during a probe.
                    unsafe {
                        let d = &*(p as *const Snooped);
                        let _ = d.contains_key(&"zzz");
                    }
                }
                a == b
            }
        }

        let target = Rc::new(Cell::new(core::ptr::null()));
        let mut d: Snooped = OrderedDictionary::with_strategy(Snooping {
            target: target.clone(),
        });
        d.add("a", 1).unwrap();
        target.set(&d as *const Snooped as *const ());
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = d.contains_key(&"b");
        }));
        assert!(res.is_err(), "expected reentrancy to panic in debug builds");

        target.set(core::ptr::null());
        assert!(d.contains_key(&"a"));
        d.check_invariants();
    }

    /// Invariant: the dictionary can move between threads (behind a lock).
    #[test]
    fn is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<OrderedDictionary<String, Vec<u8>>>();
    }

    /// Invariant: positional indexing panics out of range; key indexing
    /// panics on an absent key.
    #[test]
    fn index_operators() {
        let mut d = dict(&["A", "B"]);
        d[1] += 10;
        d[&"A"] += 100;
        assert_eq!((d[0], d[1]), (101, 12));
        let r = std::panic::catch_unwind(|| dict(&["A"])[1]);
        assert!(r.is_err());
        let r = std::panic::catch_unwind(|| dict(&["A"])[&"B"]);
        assert!(r.is_err());
    }
}
