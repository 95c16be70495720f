//! Iterators over a dictionary in positional order.
//!
//! Every iterator borrows the dictionary (or owns its storage), so a live
//! enumeration can never observe a structural change.

use crate::sequence::Bucket;
use core::iter::FusedIterator;
use core::slice;
use std::vec;

/// Iterator over `(&K, &V)` in positional order.
pub struct Iter<'a, K, V> {
    keys: slice::Iter<'a, Bucket<K>>,
    values: slice::Iter<'a, V>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(keys: &'a [Bucket<K>], values: &'a [V]) -> Self {
        Self {
            keys: keys.iter(),
            values: values.iter(),
        }
    }
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
            values: self.values.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        Some((&self.keys.next()?.key, self.values.next()?))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        Some((&self.keys.next_back()?.key, self.values.next_back()?))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}
impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

/// Iterator over `(&K, &mut V)` in positional order.
pub struct IterMut<'a, K, V> {
    keys: slice::Iter<'a, Bucket<K>>,
    values: slice::IterMut<'a, V>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(keys: &'a [Bucket<K>], values: &'a mut [V]) -> Self {
        Self {
            keys: keys.iter(),
            values: values.iter_mut(),
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        Some((&self.keys.next()?.key, self.values.next()?))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        Some((&self.keys.next_back()?.key, self.values.next_back()?))
    }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}
impl<'a, K, V> FusedIterator for IterMut<'a, K, V> {}

/// Owning iterator over `(K, V)` in positional order.
pub struct IntoIter<K, V> {
    keys: vec::IntoIter<Bucket<K>>,
    values: vec::IntoIter<V>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(keys: Vec<Bucket<K>>, values: Vec<V>) -> Self {
        Self {
            keys: keys.into_iter(),
            values: values.into_iter(),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        Some((self.keys.next()?.key, self.values.next()?))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        Some((self.keys.next_back()?.key, self.values.next_back()?))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

/// Iterator over keys in positional order.
pub struct Keys<'a, K> {
    keys: slice::Iter<'a, Bucket<K>>,
}

impl<'a, K> Keys<'a, K> {
    pub(crate) fn new(keys: &'a [Bucket<K>]) -> Self {
        Self { keys: keys.iter() }
    }
}

impl<'a, K> Clone for Keys<'a, K> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
        }
    }
}

impl<'a, K> Iterator for Keys<'a, K> {
    type Item = &'a K;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.keys.next().map(|b| &b.key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<'a, K> DoubleEndedIterator for Keys<'a, K> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.keys.next_back().map(|b| &b.key)
    }
}

impl<'a, K> ExactSizeIterator for Keys<'a, K> {}
impl<'a, K> FusedIterator for Keys<'a, K> {}

/// Values in positional order.
pub type Values<'a, V> = slice::Iter<'a, V>;

/// Mutable values in positional order.
pub type ValuesMut<'a, V> = slice::IterMut<'a, V>;
