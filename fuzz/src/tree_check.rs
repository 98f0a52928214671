#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use stemtree::ByteTree;

#[derive(Arbitrary, Debug)]
enum MapMethod {
    Get { key: String },
    Insert { key: String, val: u64 },
    Update { key: String, val: u64 },
    Delete { key: String },
    DeletePrefix { prefix: String },
}

fuzz_target!(|methods: Vec<MapMethod>| {
    let mut tree = ByteTree::new();
    let mut bt_map = BTreeMap::<String, u64>::new();

    for m in &methods {
        match m {
            MapMethod::Get { key } => {
                assert_eq!(tree.get(key), bt_map.get(key));
            }
            MapMethod::Insert { key, val } => {
                assert_eq!(tree.insert(key, *val), bt_map.insert(key.clone(), *val));
            }
            MapMethod::Update { key, val } => {
                let old_bt = bt_map.get_mut(key);
                let old_tree = tree.get_mut(key);
                assert_eq!(old_tree, old_bt);
                if let Some(old_bt) = old_bt {
                    *old_bt = *val;
                    *old_tree.unwrap() = *val;
                }
            }
            MapMethod::Delete { key } => {
                assert_eq!(tree.remove(key), bt_map.remove(key));
            }
            MapMethod::DeletePrefix { prefix } => {
                // Keys starting with the prefix form one contiguous run.
                let doomed: Vec<String> = bt_map
                    .range(prefix.clone()..)
                    .take_while(|(k, _)| k.starts_with(prefix.as_str()))
                    .map(|(k, _)| k.clone())
                    .collect();
                for k in &doomed {
                    bt_map.remove(k);
                }
                assert_eq!(tree.remove_prefix(prefix), doomed.len());
            }
        }
        assert_eq!(tree.len(), bt_map.len());
    }

    let entries: Vec<(&str, &u64)> = tree.iter().collect();
    let expected: Vec<(&str, &u64)> = bt_map.iter().map(|(k, v)| (k.as_str(), v)).collect();
    assert_eq!(entries, expected);
});
