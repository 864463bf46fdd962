use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::BTreeMap;

fn key_strategy() -> impl Strategy<Value = String> {
    // A small alphabet keeps repeated inserts and hits on delete common.
    "[a-f]{1,3}"
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 5)]
    Insert(#[proptest(strategy = "key_strategy()")] String),
    #[proptest(weight = 4)]
    Delete(#[proptest(strategy = "key_strategy()")] String),
    #[proptest(weight = 1)]
    Query(#[proptest(strategy = "key_strategy()")] String),
}

fn model_delete(m: &mut BTreeMap<String, u32>, key: &str) -> Result<u32, TreeError> {
    if m.is_empty() {
        return Err(TreeError::EmptyTree);
    }
    let Some(count) = m.get_mut(key) else {
        return Err(TreeError::NotFound {
            key: key.to_string(),
        });
    };
    *count -= 1;
    let left = *count;
    if left == 0 {
        m.remove(key);
    }
    Ok(left)
}

fn model_query(m: &BTreeMap<String, u32>, key: &str) -> Result<u32, TreeError> {
    if m.is_empty() {
        return Err(TreeError::EmptyTree);
    }
    m.get(key).copied().ok_or_else(|| TreeError::NotFound {
        key: key.to_string(),
    })
}

fn run_ops<T: FrequencyTree>(
    t: &mut T,
    ops: Vec<Op>,
    validate: impl Fn(&T),
) -> Result<(), TestCaseError> {
    let mut m: BTreeMap<String, u32> = BTreeMap::new();
    for op in ops {
        match op {
            Op::Insert(key) => {
                let count = m.entry(key.clone()).or_insert(0);
                *count += 1;
                prop_assert_eq!(t.insert(key), *count);
            }
            Op::Delete(key) => {
                prop_assert_eq!(t.delete(&key), model_delete(&mut m, &key));
            }
            Op::Query(key) => {
                prop_assert_eq!(t.frequency(&key), model_query(&m, &key));
            }
        }
        validate(&*t);
        prop_assert_eq!(t.len(), m.len());
    }

    let got: Vec<(String, u32)> = t.iter().map(|(k, c)| (k.to_string(), c)).collect();
    let expected: Vec<(String, u32)> = m.into_iter().collect();
    prop_assert_eq!(got, expected);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_avl_matches_model(ops in prop::collection::vec(any::<Op>(), 0..=400)) {
        let mut t = AvlTree::new();
        run_ops(&mut t, ops, AvlTree::validate)?;
    }

    #[test]
    fn prop_bst_matches_model(ops in prop::collection::vec(any::<Op>(), 0..=400)) {
        let mut t = BstTree::new();
        run_ops(&mut t, ops, BstTree::validate)?;
    }

    #[test]
    fn prop_avl_height_bound(keys in prop::collection::btree_set("[a-z]{1,8}", 1..=600)) {
        let t: AvlTree = keys.into_iter().collect();
        let n = t.len() as f64;
        prop_assert!(f64::from(t.height()) <= 1.45 * (n + 2.0).log2());
    }

    #[test]
    fn prop_trees_agree_on_contents(ops in prop::collection::vec(any::<Op>(), 0..=200)) {
        let mut avl = AvlTree::new();
        let mut bst = BstTree::new();
        for op in ops {
            match op {
                Op::Insert(key) => {
                    prop_assert_eq!(avl.insert(key.clone()), bst.insert(key));
                }
                Op::Delete(key) => {
                    prop_assert_eq!(avl.delete(&key), bst.delete(&key));
                }
                Op::Query(key) => {
                    prop_assert_eq!(avl.frequency(&key), bst.frequency(&key));
                }
            }
        }
        prop_assert!(avl.iter().eq(bst.iter()));
        avl.validate();
    }
}

/// Calls `f` once per ordering of `keys`, permuting a scratch copy in place.
fn for_each_permutation(keys: &[&str], mut f: impl FnMut(&[&str])) {
    fn permute(keys: &mut [&str], fixed: usize, f: &mut impl FnMut(&[&str])) {
        if fixed == keys.len() {
            f(keys);
            return;
        }
        for i in fixed..keys.len() {
            keys.swap(fixed, i);
            permute(keys, fixed + 1, f);
            keys.swap(fixed, i);
        }
    }

    let mut scratch = keys.to_vec();
    permute(&mut scratch, 0, &mut f);
}

const SMALL_SET: [&str; 7] = ["a", "b", "c", "d", "e", "f", "g"];

#[test]
fn exhaustive_insert_order_small_set() {
    for_each_permutation(&SMALL_SET, |perm| {
        let mut t = AvlTree::new();
        for k in perm {
            t.insert(k.to_string());
            t.validate();
        }
        assert_eq!(t.len(), SMALL_SET.len());
        assert!(t.height() <= 4, "{perm:?} produced height {}", t.height());
        let keys: Vec<&str> = t.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, SMALL_SET);
    });
}

#[test]
fn exhaustive_delete_order_small_set() {
    // Insert in a fixed order, then delete in all permutations.
    let base: AvlTree = SMALL_SET.iter().map(|k| k.to_string()).collect();
    base.validate();

    for_each_permutation(&SMALL_SET, |perm| {
        let mut t = base.clone();
        for (i, k) in perm.iter().enumerate() {
            assert_eq!(t.delete(k), Ok(0));
            t.validate();
            assert_eq!(t.len(), SMALL_SET.len() - i - 1);
        }
        assert!(t.is_empty());
        assert_eq!(t.delete("a"), Err(TreeError::EmptyTree));
    });
}

#[test]
fn exhaustive_bst_delete_order_small_set() {
    let mut base = BstTree::new();
    for k in ["d", "b", "f", "a", "c", "e", "g"] {
        base.insert(k.to_string());
    }

    for_each_permutation(&SMALL_SET, |perm| {
        let mut t = base.clone();
        for k in perm {
            assert_eq!(t.delete(k), Ok(0));
            t.validate();
        }
        assert!(t.is_empty());
    });
}
