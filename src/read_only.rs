//! Borrowed read-only view of a dictionary.

use crate::error::DictionaryError;
use crate::iter::{Iter, Keys, Values};
use crate::ordered_dictionary::OrderedDictionary;
use crate::strategy::KeyStrategy;
use core::borrow::Borrow;
use core::fmt;

/// Read-only access to an [`OrderedDictionary`]. Cheap to copy; hand it to
/// collaborators that must not mutate.
pub struct ReadOnlyDictionary<'a, K, V, S> {
    inner: &'a OrderedDictionary<K, V, S>,
}

impl<'a, K, V, S> Clone for ReadOnlyDictionary<'a, K, V, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K, V, S> Copy for ReadOnlyDictionary<'a, K, V, S> {}

impl<'a, K, V, S> ReadOnlyDictionary<'a, K, V, S> {
    pub(crate) fn new(inner: &'a OrderedDictionary<K, V, S>) -> Self {
        Self { inner }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&'a V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: KeyStrategy<Q>,
    {
        self.inner.get(key)
    }

    pub fn lookup<Q>(&self, key: &Q) -> Result<&'a V, DictionaryError>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: KeyStrategy<Q>,
    {
        self.inner.lookup(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: KeyStrategy<Q>,
    {
        self.inner.contains_key(key)
    }

    pub fn index_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: KeyStrategy<Q>,
    {
        self.inner.index_of(key)
    }

    pub fn get_at(&self, position: usize) -> Result<(&'a K, &'a V), DictionaryError> {
        self.inner.get_at(position)
    }

    pub fn iter(&self) -> Iter<'a, K, V> {
        self.inner.iter()
    }

    pub fn keys(&self) -> Keys<'a, K> {
        self.inner.keys()
    }

    pub fn values(&self) -> Values<'a, V> {
        self.inner.values()
    }
}

impl<'a, K, V, S> IntoIterator for ReadOnlyDictionary<'a, K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl<'a, K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ReadOnlyDictionary<'a, K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.inner, f)
    }
}
