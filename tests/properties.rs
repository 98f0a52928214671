//! Model-based checks against `BTreeMap`, plus structural validation of
//! the tree shape through `inspect`.

use std::collections::BTreeMap;

use proptest::prelude::*;

use stemtree::{ByteTree, CharTree, KeySpace, PathTree, Paths, RadixTree};

/// Walks every node and checks the canonical shape: no dead branches, no
/// uncompressed chains, and as many value-bearing nodes as `len` claims.
fn assert_canonical<K: KeySpace, V>(tree: &RadixTree<K, V>) {
    let mut leaves = 0;
    tree.inspect(|node| {
        if node.depth == 0 {
            assert!(node.prefix.is_empty(), "root must keep an empty prefix");
        } else if node.value.is_none() {
            assert!(
                node.children >= 2,
                "valueless node with {} children at {:?}",
                node.children,
                node.key,
            );
        }
        if node.value.is_some() {
            leaves += 1;
        }
        false
    });
    assert_eq!(leaves, tree.len(), "reachable values must match len");
}

fn segments(key: &str) -> Vec<String> {
    Paths::default().segments(key).map(str::to_owned).collect()
}

#[derive(Clone, Debug)]
enum Op {
    Insert(String, u32),
    Remove(String),
    RemovePrefix(String),
    Get(String),
}

fn key_strategy() -> impl Strategy<Value = String> + Clone {
    // Uniform random strings almost never share stems; building keys from a
    // tiny fragment alphabet makes splits, merges, and overlaps common.
    prop::collection::vec(prop::sample::select(vec!["a", "b", "to", "tom", "/"]), 0..=6)
        .prop_map(|parts| parts.concat())
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        5 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        2 => key.clone().prop_map(Op::Remove),
        1 => key.clone().prop_map(Op::RemovePrefix),
        2 => key.prop_map(Op::Get),
    ];
    prop::collection::vec(op, 0..=120)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn byte_tree_matches_btreemap(ops in ops_strategy()) {
        let mut tree = ByteTree::new();
        let mut model: BTreeMap<String, u32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, val) => {
                    prop_assert_eq!(tree.insert(&key, val), model.insert(key, val));
                }
                Op::Remove(key) => {
                    prop_assert_eq!(tree.remove(&key), model.remove(&key));
                }
                Op::RemovePrefix(prefix) => {
                    let doomed: Vec<String> = model
                        .keys()
                        .filter(|k| k.starts_with(prefix.as_str()))
                        .cloned()
                        .collect();
                    for k in &doomed {
                        model.remove(k);
                    }
                    prop_assert_eq!(tree.remove_prefix(&prefix), doomed.len());
                }
                Op::Get(key) => {
                    prop_assert_eq!(tree.get(&key), model.get(&key));
                }
            }
            prop_assert_eq!(tree.len(), model.len());
        }

        assert_canonical(&tree);
        let got: Vec<(&str, &u32)> = tree.iter().collect();
        let expected: Vec<(&str, &u32)> = model.iter().map(|(k, v)| (k.as_str(), v)).collect();
        prop_assert_eq!(got, expected);

        // Path walks see exactly the stored prefixes of a probe, shortest
        // first; lexical model order coincides with length order here.
        for probe in ["", "a", "b", "tob", "tomtoma"] {
            let walked: Vec<&str> = tree.iter_path(probe).map(|(k, _)| k).collect();
            let expected: Vec<&str> = model
                .keys()
                .filter(|k| probe.starts_with(k.as_str()))
                .map(String::as_str)
                .collect();
            prop_assert_eq!(walked, expected, "probe {:?}", probe);
        }

        // A cursor fed a stored key symbol by symbol lands on its value.
        for (key, val) in &model {
            let mut cursor = tree.stepper();
            for b in key.bytes() {
                prop_assert!(cursor.step(b), "step {:?} of {:?}", b, key);
            }
            prop_assert_eq!(cursor.value(), Some(val));
        }
    }

    #[test]
    fn char_and_byte_trees_agree_on_ascii(ops in ops_strategy()) {
        let mut bytes = ByteTree::new();
        let mut chars = CharTree::new();

        for op in ops {
            match op {
                Op::Insert(key, val) => {
                    prop_assert_eq!(bytes.insert(&key, val), chars.insert(&key, val));
                }
                Op::Remove(key) => {
                    prop_assert_eq!(bytes.remove(&key), chars.remove(&key));
                }
                Op::RemovePrefix(prefix) => {
                    prop_assert_eq!(bytes.remove_prefix(&prefix), chars.remove_prefix(&prefix));
                }
                Op::Get(key) => {
                    prop_assert_eq!(bytes.get(&key), chars.get(&key));
                }
            }
            prop_assert_eq!(bytes.len(), chars.len());
        }

        assert_canonical(&bytes);
        assert_canonical(&chars);
        let b: Vec<(&str, &u32)> = bytes.iter().collect();
        let c: Vec<(&str, &u32)> = chars.iter().collect();
        prop_assert_eq!(b, c);
    }

    #[test]
    fn path_tree_matches_segmented_model(ops in ops_strategy()) {
        let mut tree = PathTree::new();
        let mut model: BTreeMap<Vec<String>, u32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, val) => {
                    prop_assert_eq!(tree.insert(&key, val), model.insert(segments(&key), val));
                }
                Op::Remove(key) => {
                    prop_assert_eq!(tree.remove(&key), model.remove(&segments(&key)));
                }
                Op::RemovePrefix(prefix) => {
                    let segs = segments(&prefix);
                    let doomed: Vec<Vec<String>> = model
                        .keys()
                        .filter(|k| k.len() >= segs.len() && k[..segs.len()] == segs[..])
                        .cloned()
                        .collect();
                    for k in &doomed {
                        model.remove(k);
                    }
                    prop_assert_eq!(tree.remove_prefix(&prefix), doomed.len());
                }
                Op::Get(key) => {
                    prop_assert_eq!(tree.get(&key), model.get(&segments(&key)));
                }
            }
            prop_assert_eq!(tree.len(), model.len());
        }

        assert_canonical(&tree);
        // Segment-wise tree order coincides with the model's Vec ordering.
        let got: Vec<Vec<String>> = tree.iter().map(|(k, _)| segments(k)).collect();
        let expected: Vec<Vec<String>> = model.keys().cloned().collect();
        prop_assert_eq!(got, expected);
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn insert_order_never_changes_the_outcome() {
    let keys = ["", "to", "tom", "tomato", "torn", "tag"];

    for_each_permutation(&keys, |perm| {
        let mut tree = ByteTree::new();
        for (i, key) in perm.iter().enumerate() {
            assert_eq!(tree.insert(key, i), None);
        }
        assert_canonical(&tree);
        let got: Vec<&str> = tree.iter().map(|(k, _)| k).collect();
        assert_eq!(got, ["", "tag", "to", "tom", "tomato", "torn"]);
    });
}

#[test]
fn remove_order_always_restores_the_shape() {
    let keys = ["", "to", "tom", "tomato", "torn", "tag"];
    let mut base = ByteTree::new();
    for (i, key) in keys.iter().enumerate() {
        base.insert(key, i);
    }

    for_each_permutation(&keys, |perm| {
        let mut tree = base.clone();
        for key in perm {
            assert!(tree.remove(key).is_some());
            assert_canonical(&tree);
        }
        assert!(tree.is_empty());
    });
}
