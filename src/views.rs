//! Capability views: the three contracts an ordered dictionary satisfies.
//!
//! All three traits are object safe so collaborators can hold a
//! `&dyn MapView<K, V>`, `&mut dyn MapMut<K, V>` or `&mut dyn PairList<K, V>`
//! without knowing the concrete strategy type.

use crate::error::DictionaryError;
use crate::ordered_dictionary::OrderedDictionary;
use crate::read_only::ReadOnlyDictionary;
use crate::strategy::KeyStrategy;

/// Read-only key/value mapping.
pub trait MapView<K, V> {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, key: &K) -> Option<&V>;

    /// Like `get`, but absence is an error.
    fn lookup(&self, key: &K) -> Result<&V, DictionaryError> {
        self.get(key).ok_or(DictionaryError::KeyNotFound)
    }

    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Entries in positional order.
    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_>;

    fn keys<'a>(&'a self) -> Box<dyn Iterator<Item = &'a K> + 'a>
    where
        K: 'a,
        V: 'a,
    {
        Box::new(self.entries().map(|(k, _)| k))
    }

    fn values<'a>(&'a self) -> Box<dyn Iterator<Item = &'a V> + 'a>
    where
        K: 'a,
        V: 'a,
    {
        Box::new(self.entries().map(|(_, v)| v))
    }
}

/// Mutable key/value mapping.
pub trait MapMut<K, V>: MapView<K, V> {
    fn get_mut(&mut self, key: &K) -> Option<&mut V>;

    /// Overwrite or append; returns the previous value.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Append; fails with `DuplicateKey` if `key` is present.
    fn add(&mut self, key: K, value: V) -> Result<(), DictionaryError>;

    fn remove(&mut self, key: &K) -> Option<V>;

    fn clear(&mut self);
}

/// Mutable ordered list of `(key, value)` pairs.
pub trait PairList<K, V> {
    fn len(&self) -> usize;

    fn pair_at(&self, position: usize) -> Result<(&K, &V), DictionaryError>;

    /// Replaces the pair at `position` and returns the old one. A pair with
    /// a different key is removed and re-inserted at the same position.
    fn set_pair_at(&mut self, position: usize, pair: (K, V)) -> Result<(K, V), DictionaryError>;

    fn insert_pair_at(&mut self, position: usize, pair: (K, V)) -> Result<(), DictionaryError>;

    fn remove_pair_at(&mut self, position: usize) -> Result<(K, V), DictionaryError>;

    fn push_pair(&mut self, pair: (K, V)) -> Result<(), DictionaryError>;

    fn contains_pair(&self, key: &K, value: &V) -> bool;

    fn index_of_pair(&self, key: &K, value: &V) -> Option<usize>;

    /// Removes the pair if both key and value match.
    fn remove_pair(&mut self, key: &K, value: &V) -> bool;

    fn clear(&mut self);
}

impl<K, V, S> MapView<K, V> for OrderedDictionary<K, V, S>
where
    S: KeyStrategy<K>,
{
    fn len(&self) -> usize {
        OrderedDictionary::len(self)
    }

    fn get(&self, key: &K) -> Option<&V> {
        OrderedDictionary::get(self, key)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(self.iter())
    }
}

impl<K, V, S> MapMut<K, V> for OrderedDictionary<K, V, S>
where
    S: KeyStrategy<K>,
{
    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        OrderedDictionary::get_mut(self, key)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        OrderedDictionary::insert(self, key, value)
    }

    fn add(&mut self, key: K, value: V) -> Result<(), DictionaryError> {
        OrderedDictionary::add(self, key, value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        OrderedDictionary::remove(self, key)
    }

    fn clear(&mut self) {
        OrderedDictionary::clear(self)
    }
}

impl<K, V, S> PairList<K, V> for OrderedDictionary<K, V, S>
where
    S: KeyStrategy<K>,
    V: PartialEq,
{
    fn len(&self) -> usize {
        OrderedDictionary::len(self)
    }

    fn pair_at(&self, position: usize) -> Result<(&K, &V), DictionaryError> {
        self.get_at(position)
    }

    fn set_pair_at(&mut self, position: usize, pair: (K, V)) -> Result<(K, V), DictionaryError> {
        self.reinsert_at(position, pair.0, pair.1)
    }

    fn insert_pair_at(&mut self, position: usize, pair: (K, V)) -> Result<(), DictionaryError> {
        self.insert_at(position, pair.0, pair.1)
    }

    fn remove_pair_at(&mut self, position: usize) -> Result<(K, V), DictionaryError> {
        self.remove_at(position)
    }

    fn push_pair(&mut self, pair: (K, V)) -> Result<(), DictionaryError> {
        self.add_pair(pair)
    }

    fn contains_pair(&self, key: &K, value: &V) -> bool {
        OrderedDictionary::contains_pair(self, key, value)
    }

    fn index_of_pair(&self, key: &K, value: &V) -> Option<usize> {
        OrderedDictionary::index_of_pair(self, key, value)
    }

    fn remove_pair(&mut self, key: &K, value: &V) -> bool {
        OrderedDictionary::remove_pair(self, key, value).is_some()
    }

    fn clear(&mut self) {
        OrderedDictionary::clear(self)
    }
}

impl<'a, K, V, S> MapView<K, V> for ReadOnlyDictionary<'a, K, V, S>
where
    S: KeyStrategy<K>,
{
    fn len(&self) -> usize {
        ReadOnlyDictionary::len(self)
    }

    fn get(&self, key: &K) -> Option<&V> {
        ReadOnlyDictionary::get(self, key)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(self.iter())
    }
}
