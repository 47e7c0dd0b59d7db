#![no_main]

use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use markov_speaker::HashTable;
use std::collections::HashMap as StdHashMap;

#[derive(Debug, Arbitrary)]
enum Operation {
    Insert(u8, u32),
    Remove(u8),
    Get(u8),
    Contains(u8),
    Increment(u8),
    Len,
    IsEmpty,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    capacity: u8,
    load_factor: u8,
    growth_factor: u8,
    operations: Vec<Operation>,
}

// Keys are drawn from a small space so that the probe sequences collide.
fn key(k: u8) -> String {
    format!("{}", k % 64)
}

fn fuzz_table(input: FuzzInput) {
    let capacity = usize::from(input.capacity).max(1);
    // (0, 1], excluding 1 so that inserts never exhaust the table
    let load_factor = (f64::from(input.load_factor) + 1.0) / 257.0;
    let growth_factor = usize::from(input.growth_factor % 8) + 2;

    let mut std_map = StdHashMap::new();
    let mut table = HashTable::new(capacity, 0, load_factor, growth_factor).unwrap();

    for op in input.operations {
        match op {
            Operation::Insert(k, v) => {
                let std_result = std_map.insert(key(k), v);
                let table_result = table.insert(&key(k), v).unwrap();
                assert_eq!(std_result, table_result);
            }
            Operation::Remove(k) => {
                let std_result = std_map.remove(&key(k)).is_some();
                let table_result = table.remove(&key(k));
                assert_eq!(std_result, table_result);
            }
            Operation::Get(k) => {
                assert_eq!(std_map.get(&key(k)), table.get(&key(k)));
            }
            Operation::Contains(k) => {
                assert_eq!(std_map.contains_key(&key(k)), table.contains_key(&key(k)));
            }
            Operation::Increment(k) => {
                let std_result = std_map.entry(key(k)).or_insert(0);
                *std_result = std_result.wrapping_add(1);

                let next = table.get_or_default(&key(k)).wrapping_add(1);
                table.insert(&key(k), next).unwrap();
                assert_eq!(Some(&*std_result), table.get(&key(k)));
            }
            Operation::Len => {
                assert_eq!(std_map.len(), table.len());
            }
            Operation::IsEmpty => {
                assert_eq!(std_map.is_empty(), table.is_empty());
            }
        }

        assert!(table.len() as f64 / table.capacity() as f64 <= load_factor);
    }

    // Final consistency checks
    for (k, v) in std_map.iter() {
        assert_eq!(Some(v), table.get(k));
    }
    assert_eq!(std_map.len(), table.len());
    assert_eq!(std_map.len(), table.iter().count());
}

fuzz_target!(|input: FuzzInput| {
    fuzz_table(input);
});
