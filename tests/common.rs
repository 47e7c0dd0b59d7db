#![allow(dead_code)]

use markov_speaker::HashTable;

// Run the test on different configurations of a `HashTable`.
pub fn with_table<V: Default>(mut test: impl FnMut(&dyn Fn() -> HashTable<V>)) {
    // The default configuration.
    test(&(|| HashTable::default()));

    // A single slot that must grow on the first insert.
    test(&(|| HashTable::builder().capacity(1).build().unwrap()));

    // A dense table with a large growth factor to stress long probe sequences.
    test(
        &(|| {
            HashTable::builder()
                .capacity(7)
                .load_factor(0.9)
                .growth_factor(3)
                .build()
                .unwrap()
        }),
    );
}

// Returns `count` distinct keys that all hash to the same home slot of a
// table with `capacity` slots.
pub fn colliding_keys(capacity: usize, count: usize) -> Vec<String> {
    let home = hash("k0", capacity);
    (0..)
        .map(|i| format!("k{i}"))
        .filter(|key| hash(key, capacity) == home)
        .take(count)
        .collect()
}

// Mirrors the table's polynomial hash.
pub fn hash(key: &str, capacity: usize) -> usize {
    key.chars()
        .fold(0u128, |h, c| (h * 37 + u128::from(u32::from(c))) % capacity as u128) as usize
}

// Reference texts used by the model tests.
pub const SPEAKER_A: &str = "it was the best of times, it was the worst of times, \
     it was the age of wisdom, it was the age of foolishness";
pub const SPEAKER_B: &str = "call me ishmael. some years ago, never mind how long precisely, \
     having little or no money in my purse";
