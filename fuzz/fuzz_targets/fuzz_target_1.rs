#![no_main]

use libfuzzer_sys::fuzz_target;
use skippy_map::{cursor::Cursor, SkipList};
use std::collections::BTreeMap;

fuzz_target!(|data: &[u8]| {
    let mut list = SkipList::new().with_max_level(8);
    let mut oracle = BTreeMap::new();

    for chunk in data.chunks(3) {
        match chunk {
            [0, key, val] => assert_eq!(list.set(*key, *val), oracle.insert(*key, *val)),
            [1, key, _] => assert_eq!(list.delete(key), oracle.remove(key)),
            [2, from, to] => {
                let got: Vec<_> = list.range(*from, *to).map(|(k, _)| *k).collect();
                let expected: Vec<_> = if from < to {
                    oracle.range(*from..*to).map(|(k, _)| *k).collect()
                } else {
                    Vec::new()
                };
                assert_eq!(got, expected);
            }
            [3, key, _] => {
                let expected = oracle.range(*key..).next().map(|(k, _)| *k);
                let mut cursor = list.cursor();
                assert_eq!(cursor.seek(key), expected.is_some());
                assert_eq!(cursor.key().copied(), expected);
            }
            _ => {}
        }
    }

    assert_eq!(list.len(), oracle.len());
    assert!(list.iter().map(|(k, _)| k).eq(oracle.keys()));
    assert!(list.iter().rev().map(|(k, _)| k).eq(oracle.keys().rev()));
});
