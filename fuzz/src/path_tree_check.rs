#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use stemtree::keys::{KeySpace, Paths};
use stemtree::PathTree;

#[derive(Arbitrary, Debug)]
enum PathMethod {
    Get { key: String },
    Insert { key: String, val: u32 },
    Delete { key: String },
    DeletePrefix { prefix: String },
}

/// Oracle key: the canonical segment spelling, so `"a//b/"` and `"a/b"`
/// collide the way the tree makes them collide.
fn canonical(key: &str) -> Vec<String> {
    Paths::default().segments(key).map(str::to_owned).collect()
}

fuzz_target!(|methods: Vec<PathMethod>| {
    let mut tree = PathTree::new();
    let mut bt_map = BTreeMap::<Vec<String>, u32>::new();

    for m in &methods {
        match m {
            PathMethod::Get { key } => {
                assert_eq!(tree.get(key), bt_map.get(&canonical(key)));
            }
            PathMethod::Insert { key, val } => {
                assert_eq!(tree.insert(key, *val), bt_map.insert(canonical(key), *val));
            }
            PathMethod::Delete { key } => {
                assert_eq!(tree.remove(key), bt_map.remove(&canonical(key)));
            }
            PathMethod::DeletePrefix { prefix } => {
                let segs = canonical(prefix);
                let doomed: Vec<Vec<String>> = bt_map
                    .keys()
                    .filter(|k| k.len() >= segs.len() && k[..segs.len()] == segs[..])
                    .cloned()
                    .collect();
                for k in &doomed {
                    bt_map.remove(k);
                }
                assert_eq!(tree.remove_prefix(prefix), doomed.len());
            }
        }
        assert_eq!(tree.len(), bt_map.len());
    }

    // Segment-wise tree order coincides with the oracle's Vec ordering.
    let keys: Vec<Vec<String>> = tree.iter().map(|(k, _)| canonical(k)).collect();
    let expected: Vec<Vec<String>> = bt_map.keys().cloned().collect();
    assert_eq!(keys, expected);
});
