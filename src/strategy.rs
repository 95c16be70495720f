//! Pluggable key equality and hashing.
//!
//! A strategy is fixed when the dictionary is constructed. It drives the
//! position index and every key comparison the dictionary makes.

use core::hash::{BuildHasher, Hash, Hasher};
use std::collections::hash_map::RandomState;

/// Equality and hashing for keys of type `Q`.
///
/// Implementations must be consistent: keys that compare equal must hash
/// equal. When a dictionary keyed by `K` is queried with a borrowed `&Q`
/// (`K: Borrow<Q>`), `hash_key` must produce the same value for a key and
/// its borrowed form.
pub trait KeyStrategy<Q: ?Sized> {
    fn hash_key(&self, key: &Q) -> u64;
    fn keys_equal(&self, a: &Q, b: &Q) -> bool;
}

/// Default strategy: `Hash + Eq` with a `BuildHasher`.
#[derive(Clone, Debug, Default)]
pub struct HashEq<S = RandomState> {
    hasher: S,
}

impl<S> HashEq<S> {
    pub fn new(hasher: S) -> Self {
        Self { hasher }
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }
}

impl<Q, S> KeyStrategy<Q> for HashEq<S>
where
    Q: ?Sized + Hash + Eq,
    S: BuildHasher,
{
    #[inline]
    fn hash_key(&self, key: &Q) -> u64 {
        self.hasher.hash_one(key)
    }

    #[inline]
    fn keys_equal(&self, a: &Q, b: &Q) -> bool {
        a == b
    }
}

/// String keys compared without regard to ASCII case.
///
/// `"Content-Type"` and `"content-type"` are the same key. `insert` and
/// `add` keep whichever spelling was stored first; `set_at` and
/// `reinsert_at` store the spelling they are given.
#[derive(Clone, Debug, Default)]
pub struct AsciiCaseInsensitive<S = RandomState> {
    hasher: S,
}

impl<S> AsciiCaseInsensitive<S> {
    pub fn new(hasher: S) -> Self {
        Self { hasher }
    }
}

impl<S: BuildHasher> KeyStrategy<str> for AsciiCaseInsensitive<S> {
    fn hash_key(&self, key: &str) -> u64 {
        let mut h = self.hasher.build_hasher();
        for b in key.bytes() {
            h.write_u8(b.to_ascii_lowercase());
        }
        // Length terminator, mirroring `str`'s own `Hash` impl.
        h.write_u8(0xff);
        h.finish()
    }

    fn keys_equal(&self, a: &str, b: &str) -> bool {
        a.eq_ignore_ascii_case(b)
    }
}

impl<S: BuildHasher> KeyStrategy<String> for AsciiCaseInsensitive<S> {
    fn hash_key(&self, key: &String) -> u64 {
        KeyStrategy::<str>::hash_key(self, key.as_str())
    }

    fn keys_equal(&self, a: &String, b: &String) -> bool {
        a.eq_ignore_ascii_case(b)
    }
}
