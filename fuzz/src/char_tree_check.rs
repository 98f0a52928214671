#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use stemtree::CharTree;

#[derive(Arbitrary, Debug)]
enum MapMethod {
    Get { key: String },
    Insert { key: String, val: u32 },
    Delete { key: String },
    DeletePrefix { prefix: String },
}

// UTF-8 preserves code point order, so `String` keys sort the same for the
// oracle and for char-granular edges, arbitrary Unicode included.
fuzz_target!(|methods: Vec<MapMethod>| {
    let mut tree = CharTree::new();
    let mut bt_map = BTreeMap::<String, u32>::new();

    for m in &methods {
        match m {
            MapMethod::Get { key } => {
                assert_eq!(tree.get(key), bt_map.get(key));
            }
            MapMethod::Insert { key, val } => {
                assert_eq!(tree.insert(key, *val), bt_map.insert(key.clone(), *val));
            }
            MapMethod::Delete { key } => {
                assert_eq!(tree.remove(key), bt_map.remove(key));
            }
            MapMethod::DeletePrefix { prefix } => {
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

    let entries: Vec<(&str, &u32)> = tree.iter().collect();
    let expected: Vec<(&str, &u32)> = bt_map.iter().map(|(k, v)| (k.as_str(), v)).collect();
    assert_eq!(entries, expected);
});
