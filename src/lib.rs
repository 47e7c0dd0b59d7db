#![doc = include_str!("../README.md")]

mod error;
mod map;
mod markov;
mod raw;
mod speaker;
mod store;

#[cfg(feature = "serde")]
mod serde_impls;

pub use error::{Error, Result};
pub use map::{
    HashTable, HashTableBuilder, Iter, Keys, Values, DEFAULT_CAPACITY, DEFAULT_GROWTH_FACTOR,
    DEFAULT_LOAD_FACTOR,
};
pub use markov::Markov;
pub use speaker::{identify_speaker, Identification, Speaker};
pub use store::{Backend, Map};
