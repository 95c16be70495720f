//! PositionIndex: key -> position table with debug reentrancy guard.
//!
//! The table stores bare positions. Probing compares the cached hash of
//! the key at a stored position and then asks the strategy for equality,
//! so the key itself lives only in the sequence. Re-indexing rewrites
//! stored positions by matching on the old position value; it never calls
//! into the strategy.

use crate::error::DictionaryError;
use crate::reentrancy::DebugReentrancy;
use crate::sequence::Bucket;
use crate::strategy::KeyStrategy;
use core::borrow::Borrow;
use hashbrown::hash_table::Entry;
use hashbrown::HashTable;

#[derive(Clone)]
pub(crate) struct PositionIndex<S> {
    table: HashTable<usize>,
    strategy: S,
    reentrancy: DebugReentrancy,
}

#[inline]
fn rehash<K>(keys: &[Bucket<K>]) -> impl Fn(&usize) -> u64 + '_ {
    move |&p| keys[p].hash
}

impl<S> PositionIndex<S> {
    pub(crate) fn new(strategy: S) -> Self {
        Self {
            table: HashTable::new(),
            strategy,
            reentrancy: DebugReentrancy::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize, strategy: S) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            strategy,
            reentrancy: DebugReentrancy::new(),
        }
    }

    #[inline]
    pub(crate) fn strategy(&self) -> &S {
        &self.strategy
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.table.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.table.capacity()
    }

    pub(crate) fn reserve<K>(&mut self, keys: &[Bucket<K>], additional: usize) {
        let _g = self.reentrancy.enter("reserve");
        self.table.reserve(additional, rehash(keys));
    }

    pub(crate) fn clear(&mut self) {
        let _g = self.reentrancy.enter("clear");
        self.table.clear();
    }

    /// Stored positions in table order.
    pub(crate) fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.table.iter().copied()
    }

    pub(crate) fn hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized,
        S: KeyStrategy<Q>,
    {
        let _g = self.reentrancy.enter("hash");
        self.strategy.hash_key(q)
    }

    pub(crate) fn keys_equal<Q>(&self, a: &Q, b: &Q) -> bool
    where
        Q: ?Sized,
        S: KeyStrategy<Q>,
    {
        let _g = self.reentrancy.enter("keys_equal");
        self.strategy.keys_equal(a, b)
    }

    /// Position of the key equal to `q`, given its precomputed `hash`.
    pub(crate) fn lookup<K, Q>(&self, keys: &[Bucket<K>], hash: u64, q: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: KeyStrategy<Q>,
    {
        let _g = self.reentrancy.enter("lookup");
        self.table
            .find(hash, |&p| {
                let b = &keys[p];
                b.hash == hash && self.strategy.keys_equal(b.key.borrow(), q)
            })
            .copied()
    }

    /// Maps `key` to `position`. `keys` must already be consistent with
    /// every position in the table; `position` itself need not be occupied
    /// yet. Fails if an equal key is already mapped, leaving the table
    /// unchanged.
    pub(crate) fn insert<K>(
        &mut self,
        keys: &[Bucket<K>],
        hash: u64,
        key: &K,
        position: usize,
    ) -> Result<(), DictionaryError>
    where
        S: KeyStrategy<K>,
    {
        let _g = self.reentrancy.enter("insert");
        let strategy = &self.strategy;
        match self.table.entry(
            hash,
            |&p| {
                let b = &keys[p];
                b.hash == hash && strategy.keys_equal(&b.key, key)
            },
            rehash(keys),
        ) {
            Entry::Occupied(_) => Err(DictionaryError::DuplicateKey),
            Entry::Vacant(v) => {
                let _ = v.insert(position);
                Ok(())
            }
        }
    }

    /// Maps a key already known to be absent. `keys[position]` must hold it.
    pub(crate) fn insert_unique<K>(&mut self, keys: &[Bucket<K>], position: usize) {
        let _g = self.reentrancy.enter("insert_unique");
        let hash = keys[position].hash;
        self.table.insert_unique(hash, position, rehash(keys));
    }

    /// Drops the mapping stored as `position`. `hash` must be the cached hash
    /// of the key that was at `position`; no-op when `position` is unmapped.
    pub(crate) fn remove(&mut self, hash: u64, position: usize) {
        let _g = self.reentrancy.enter("remove");
        if let Ok(e) = self.table.find_entry(hash, |&p| p == position) {
            let _ = e.remove();
        }
    }

    /// Rewrites the mapping stored as `from` under `hash` to `to`.
    #[inline]
    fn reassign(table: &mut HashTable<usize>, hash: u64, from: usize, to: usize) {
        match table.find_mut(hash, |&p| p == from) {
            Some(p) => *p = to,
            None => debug_assert!(false, "no mapping for position {}", from),
        }
    }

    /// Re-index after an insertion at `start`: the entries now at
    /// `start + 1..keys.len()` were each one slot to the left.
    ///
    /// Walks from the tail so that a rewritten position never collides with
    /// one that still has to be found.
    pub(crate) fn shift_up<K>(&mut self, keys: &[Bucket<K>], start: usize) {
        let _g = self.reentrancy.enter("shift_up");
        let moved = keys.len().saturating_sub(start + 1);
        log::trace!("re-indexing {} positions up from {}", moved, start);
        for i in (start + 1..keys.len()).rev() {
            Self::reassign(&mut self.table, keys[i].hash, i - 1, i);
        }
    }

    /// Re-index after a removal at `start`: the entries now at
    /// `start..keys.len()` were each one slot to the right.
    ///
    /// Walks from the front for the same reason `shift_up` walks from the
    /// tail.
    pub(crate) fn shift_down<K>(&mut self, keys: &[Bucket<K>], start: usize) {
        let _g = self.reentrancy.enter("shift_down");
        let moved = keys.len().saturating_sub(start);
        log::trace!("re-indexing {} positions down from {}", moved, start);
        for (i, b) in keys.iter().enumerate().skip(start) {
            Self::reassign(&mut self.table, b.hash, i + 1, i);
        }
    }
}
