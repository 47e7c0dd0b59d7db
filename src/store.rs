use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::map::HashTable;

/// The key-value contract shared by every backing store of a [`Markov`](crate::Markov) model.
///
/// Implemented by [`HashTable`] and by the standard library `HashMap`, so the
/// two can be swapped at runtime without touching model logic.
pub trait Map<V> {
    /// Returns the value stored for `key`, if any.
    fn get(&self, key: &str) -> Option<&V>;

    /// Stores `value` for `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: V) -> Result<()>;

    /// Removes `key`, returning `true` if it was present.
    fn delete(&mut self, key: &str) -> bool;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over all stored pairs in unspecified order.
    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &V)> + '_>;
}

impl<V> Map<V> for HashTable<V> {
    fn get(&self, key: &str) -> Option<&V> {
        HashTable::get(self, key)
    }

    fn set(&mut self, key: &str, value: V) -> Result<()> {
        self.insert(key, value).map(drop)
    }

    fn delete(&mut self, key: &str) -> bool {
        self.remove(key)
    }

    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn len(&self) -> usize {
        HashTable::len(self)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &V)> + '_> {
        Box::new(self.iter())
    }
}

impl<V, S> Map<V> for HashMap<String, V, S>
where
    S: BuildHasher,
{
    fn get(&self, key: &str) -> Option<&V> {
        HashMap::get(self, key)
    }

    fn set(&mut self, key: &str, value: V) -> Result<()> {
        match self.get_mut(key) {
            Some(slot) => *slot = value,
            None => {
                self.insert(key.to_owned(), value);
            }
        }

        Ok(())
    }

    fn delete(&mut self, key: &str) -> bool {
        self.remove(key).is_some()
    }

    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &V)> + '_> {
        Box::new(self.iter().map(|(key, value)| (key.as_str(), value)))
    }
}

/// Selects the backing store of a model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Backend {
    /// The open-addressing [`HashTable`] with its default configuration.
    #[default]
    CustomTable,
    /// The standard library `HashMap`.
    GenericMap,
}

impl Backend {
    /// Every backend, in a stable order.
    pub const ALL: [Backend; 2] = [Backend::CustomTable, Backend::GenericMap];

    /// Creates a fresh, empty store of this kind.
    pub fn store<V>(self) -> Box<dyn Map<V>>
    where
        V: Default + 'static,
    {
        match self {
            Backend::CustomTable => Box::new(HashTable::<V>::default()),
            Backend::GenericMap => Box::new(HashMap::<String, V>::new()),
        }
    }

    /// A short name for reports, `"hashtable"` or `"dict"`.
    pub fn name(self) -> &'static str {
        match self {
            Backend::CustomTable => "hashtable",
            Backend::GenericMap => "dict",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = Error;

    /// Accepts the backend names as well as the numeric states `1` (custom
    /// table) and `0` (generic map).
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "hashtable" | "custom" | "custom_table" => Ok(Backend::CustomTable),
            "0" | "dict" | "map" | "generic" | "generic_map" => Ok(Backend::GenericMap),
            _ => Err(Error::UnknownBackend(s.to_owned())),
        }
    }
}
