//! ordered-dictionary: an insertion-ordered dictionary with both
//! key-based and positional access.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: dictionary semantics (unique keys, lookup, update, removal)
//!   together with list semantics (stable order, insertion and removal at
//!   a position, access by position).
//! - Layers:
//!   - Sequence<K, V>: keys and values in two position-aligned `Vec`s.
//!     Each key carries the hash computed when it was inserted.
//!   - PositionIndex<S>: a `hashbrown::HashTable<usize>` mapping each key
//!     to its position. It stores positions only and probes against the
//!     sequence for equality; it owns the key strategy and a debug-only
//!     reentrancy guard.
//!   - OrderedDictionary<K, V, S>: public API. Validates, then mutates the
//!     sequence and the index together.
//!
//! Invariants (before and after every public call)
//! - `sequence.len() == index.len() == len()`.
//! - For every key at position `p`, the index maps it to `p`.
//! - Keys are pairwise distinct under the strategy.
//! - Positions are exactly `0..len()`.
//!
//! Re-indexing
//! - Inserting at `p` moves the entries at `p..` one to the right;
//!   removing at `p` moves the entries after `p` one to the left. The
//!   index is rewritten for exactly those entries, O(len - p), matching on
//!   the old position under the cached hash. No strategy code runs.
//! - Replacing the entry at `p` (`set_at`) rewrites one mapping and moves
//!   nothing. `reinsert_at` is the pair-list flavour: remove then insert.
//!
//! Failure atomicity
//! - Every precondition (bounds, duplicate key, destination size) is
//!   checked before the first mutation. A failing call changes nothing.
//!
//! Concurrency
//! - Single-threaded: the dictionary is `Send` but not `Sync`. Share it
//!   behind a `Mutex`.
//! - Iterators borrow the dictionary, so mutating during an enumeration
//!   is rejected at compile time.
//!
//! Reentrancy
//! - Only the index calls user code (the strategy's hash and equality).
//!   Each index method takes a debug-only guard; calling back into the
//!   same dictionary from a strategy panics in debug builds.
//!
//! Notes and non-goals
//! - Order is positional only; nothing is sorted.
//! - No persistence or serialization.

mod error;
pub mod iter;
mod ordered_dictionary;
mod ordered_dictionary_proptest;
mod position_index;
mod read_only;
mod reentrancy;
mod sequence;
mod strategy;
mod views;

// Public surface
pub use error::DictionaryError;
pub use ordered_dictionary::OrderedDictionary;
pub use read_only::ReadOnlyDictionary;
pub use strategy::{AsciiCaseInsensitive, HashEq, KeyStrategy};
pub use views::{MapMut, MapView, PairList};
