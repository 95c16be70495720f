#![cfg(test)]

// Property tests for OrderedDictionary kept inside the crate so they can
// run the hidden invariant check after every step.

use crate::error::DictionaryError;
use crate::ordered_dictionary::OrderedDictionary;
use crate::strategy::{HashEq, KeyStrategy};
use proptest::prelude::*;
use std::fmt;
use std::hash::{BuildHasher, Hasher};

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations so shrinking moves towards earlier keys and
// shorter op lists. Positions are raw and may be out of range on purpose.
#[derive(Clone, Debug)]
enum Op {
    Add(usize, i32),
    Insert(usize, i32),
    InsertAt(usize, usize, i32),
    Remove(usize),
    RemoveAt(usize),
    SetAt(usize, usize, i32),
    ReinsertAt(usize, usize, i32),
    RemovePair(usize, i32),
    Get(usize),
    Contains(String),
    Pop,
    Clear,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let pos = 0usize..12;
        let val = -4i32..4;
        let op = prop_oneof![
            4 => (idx.clone(), val.clone()).prop_map(|(i, v)| Op::Add(i, v)),
            2 => (idx.clone(), val.clone()).prop_map(|(i, v)| Op::Insert(i, v)),
            3 => (pos.clone(), idx.clone(), val.clone()).prop_map(|(p, i, v)| Op::InsertAt(p, i, v)),
            2 => idx.clone().prop_map(Op::Remove),
            2 => pos.clone().prop_map(Op::RemoveAt),
            2 => (pos.clone(), idx.clone(), val.clone()).prop_map(|(p, i, v)| Op::SetAt(p, i, v)),
            2 => (pos.clone(), idx.clone(), val.clone()).prop_map(|(p, i, v)| Op::ReinsertAt(p, i, v)),
            1 => (idx.clone(), val.clone()).prop_map(|(i, v)| Op::RemovePair(i, v)),
            2 => idx.clone().prop_map(Op::Get),
            1 => "[a-z]{0,4}".prop_map(Op::Contains),
            1 => Just(Op::Pop),
            1 => Just(Op::Clear),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn model_pos(model: &[(Key, i32)], k: &Key) -> Option<usize> {
    model.iter().position(|(mk, _)| mk == k)
}

fn out_of_range(position: usize, len: usize) -> DictionaryError {
    DictionaryError::IndexOutOfRange { position, len }
}

// State-machine equivalence against a `Vec<(K, V)>` model. After every op:
// - the hidden invariant check passes (index and sequence agree);
// - enumeration order equals the model's order;
// - every key resolves to its model position.
fn run<S>(
    mut sut: OrderedDictionary<Key, i32, S>,
    pool: Vec<String>,
    ops: Vec<Op>,
) -> Result<(), TestCaseError>
where
    S: KeyStrategy<Key> + KeyStrategy<str>,
{
    let mut model: Vec<(Key, i32)> = Vec::new();

    for op in ops {
        let reinsert = matches!(op, Op::ReinsertAt(..));
        match op {
            Op::Add(i, v) => {
                let k = key_from(&pool, i);
                let expected = if model_pos(&model, &k).is_some() {
                    Err(DictionaryError::DuplicateKey)
                } else {
                    model.push((k.clone(), v));
                    Ok(())
                };
                prop_assert_eq!(sut.add(k, v), expected);
            }
            Op::Insert(i, v) => {
                let k = key_from(&pool, i);
                let expected = match model_pos(&model, &k) {
                    Some(p) => Some(std::mem::replace(&mut model[p].1, v)),
                    None => {
                        model.push((k.clone(), v));
                        None
                    }
                };
                prop_assert_eq!(sut.insert(k, v), expected);
            }
            Op::InsertAt(p, i, v) => {
                let k = key_from(&pool, i);
                let expected = if p > model.len() {
                    Err(out_of_range(p, model.len()))
                } else if model_pos(&model, &k).is_some() {
                    Err(DictionaryError::DuplicateKey)
                } else {
                    model.insert(p, (k.clone(), v));
                    Ok(())
                };
                prop_assert_eq!(sut.insert_at(p, k, v), expected);
            }
            Op::Remove(i) => {
                let k = key_from(&pool, i);
                let expected = model_pos(&model, &k).map(|p| model.remove(p).1);
                prop_assert_eq!(sut.remove(k.0.as_str()), expected);
            }
            Op::RemoveAt(p) => {
                let expected = if p < model.len() {
                    Ok(model.remove(p))
                } else {
                    Err(out_of_range(p, model.len()))
                };
                prop_assert_eq!(sut.remove_at(p), expected);
            }
            Op::SetAt(p, i, v) | Op::ReinsertAt(p, i, v) => {
                let k = key_from(&pool, i);
                let expected = if p >= model.len() {
                    Err(out_of_range(p, model.len()))
                } else {
                    match model_pos(&model, &k) {
                        Some(q) if q != p => Err(DictionaryError::DuplicateKey),
                        _ => Ok(std::mem::replace(&mut model[p], (k.clone(), v))),
                    }
                };
                let got = if reinsert {
                    sut.reinsert_at(p, k, v)
                } else {
                    sut.set_at(p, k, v)
                };
                prop_assert_eq!(got, expected);
            }
            Op::RemovePair(i, v) => {
                let k = key_from(&pool, i);
                let expected = match model_pos(&model, &k) {
                    Some(p) if model[p].1 == v => Some(model.remove(p)),
                    _ => None,
                };
                prop_assert_eq!(sut.remove_pair(&k, &v), expected);
            }
            Op::Get(i) => {
                let k = key_from(&pool, i);
                let p = model_pos(&model, &k);
                prop_assert_eq!(sut.index_of(&k), p);
                prop_assert_eq!(sut.get(&k), p.map(|p| &model[p].1));
                match p {
                    Some(p) => prop_assert_eq!(sut.lookup(&k), Ok(&model[p].1)),
                    None => prop_assert_eq!(sut.lookup(&k), Err(DictionaryError::KeyNotFound)),
                }
            }
            Op::Contains(s) => {
                let has_model = model.iter().any(|(k, _)| k.0 == s);
                prop_assert_eq!(sut.contains_key(s.as_str()), has_model);
            }
            Op::Pop => {
                prop_assert_eq!(sut.pop(), model.pop());
            }
            Op::Clear => {
                sut.clear();
                model.clear();
            }
        }

        sut.check_invariants();
        prop_assert_eq!(sut.len(), model.len());
        let got: Vec<(Key, i32)> = sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
        prop_assert_eq!(&got, &model);
        for (p, (k, _)) in model.iter().enumerate() {
            prop_assert_eq!(sut.index_of(k.0.as_str()), Some(p));
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run(OrderedDictionary::new(), pool, ops)?;
    }
}

// Collision variant using a constant hasher to stress re-indexing when
// every key shares one probe sequence.
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

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let sut: OrderedDictionary<Key, i32, HashEq<ConstBuildHasher>> =
            OrderedDictionary::with_hasher(ConstBuildHasher);
        run(sut, pool, ops)?;
    }
}
