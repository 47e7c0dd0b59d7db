use crate::error::{Error, Result};
use crate::raw;

use std::fmt;

/// The initial number of slots used by [`HashTable::default`] and
/// [`HashTableBuilder`].
pub const DEFAULT_CAPACITY: usize = 57;

/// The default ratio of live entries to slots above which the table grows.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.5;

/// The default factor by which the number of slots is multiplied on growth.
pub const DEFAULT_GROWTH_FACTOR: usize = 2;

/// An open-addressing hash table keyed by strings.
///
/// Collisions are resolved with linear probing. Removed entries are kept as
/// tombstones until the table grows, and the table grows by a constant factor
/// once the ratio of live entries to slots exceeds its load factor.
///
/// Lookups of missing keys can fall back to a configured default value with
/// [`HashTable::get_or_default`].
///
/// # Examples
///
/// ```
/// use markov_speaker::HashTable;
///
/// let mut table = HashTable::new(57, 0, 0.5, 2)?;
/// table.insert("ab", 1)?;
/// assert_eq!(table.get("ab"), Some(&1));
/// assert_eq!(table.get_or_default("ba"), &0);
/// # Ok::<(), markov_speaker::Error>(())
/// ```
#[derive(Clone)]
pub struct HashTable<V> {
    raw: raw::RawTable<V>,
    default: V,
}

/// A builder for a [`HashTable`].
///
/// Every option starts at its default: [`DEFAULT_CAPACITY`] slots,
/// [`DEFAULT_LOAD_FACTOR`], [`DEFAULT_GROWTH_FACTOR`] and `V::default()` as
/// the default value. Options are validated by [`HashTableBuilder::build`].
#[derive(Clone, Debug)]
pub struct HashTableBuilder<V> {
    capacity: usize,
    default: V,
    load_factor: f64,
    growth_factor: usize,
}

impl<V: Default> HashTableBuilder<V> {
    fn new() -> HashTableBuilder<V> {
        HashTableBuilder {
            capacity: DEFAULT_CAPACITY,
            default: V::default(),
            load_factor: DEFAULT_LOAD_FACTOR,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }
}

impl<V> HashTableBuilder<V> {
    /// Set the initial number of slots.
    pub fn capacity(self, capacity: usize) -> HashTableBuilder<V> {
        HashTableBuilder { capacity, ..self }
    }

    /// Set the value returned by [`HashTable::get_or_default`] for missing keys.
    pub fn default_value(self, default: V) -> HashTableBuilder<V> {
        HashTableBuilder { default, ..self }
    }

    /// Set the maximum ratio of live entries to slots, in `(0, 1]`.
    pub fn load_factor(self, load_factor: f64) -> HashTableBuilder<V> {
        HashTableBuilder {
            load_factor,
            ..self
        }
    }

    /// Set the factor by which the number of slots grows, greater than 1.
    pub fn growth_factor(self, growth_factor: usize) -> HashTableBuilder<V> {
        HashTableBuilder {
            growth_factor,
            ..self
        }
    }

    /// Construct a [`HashTable`] from the builder.
    ///
    /// # Errors
    ///
    /// Returns an error if the capacity is zero, the load factor is outside
    /// `(0, 1]`, or the growth factor is less than 2.
    pub fn build(self) -> Result<HashTable<V>> {
        HashTable::new(
            self.capacity,
            self.default,
            self.load_factor,
            self.growth_factor,
        )
    }
}

impl<V: Default> Default for HashTable<V> {
    fn default() -> Self {
        HashTable {
            raw: raw::RawTable::new(
                DEFAULT_CAPACITY,
                DEFAULT_LOAD_FACTOR,
                DEFAULT_GROWTH_FACTOR,
            ),
            default: V::default(),
        }
    }
}

impl<V: Default> HashTable<V> {
    /// Returns a builder for a `HashTable`.
    ///
    /// # Examples
    ///
    /// ```
    /// use markov_speaker::HashTable;
    ///
    /// let table: HashTable<u64> = HashTable::builder()
    ///     .capacity(16)
    ///     .load_factor(0.75)
    ///     .growth_factor(3)
    ///     .build()?;
    /// assert_eq!(table.capacity(), 16);
    /// # Ok::<(), markov_speaker::Error>(())
    /// ```
    pub fn builder() -> HashTableBuilder<V> {
        HashTableBuilder::new()
    }
}

impl<V> HashTable<V> {
    /// Creates an empty `HashTable`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCapacity`] if `capacity` is zero,
    /// [`Error::InvalidLoadFactor`] if `load_factor` is not in `(0, 1]`, and
    /// [`Error::InvalidGrowthFactor`] if `growth_factor` is less than 2.
    pub fn new(
        capacity: usize,
        default: V,
        load_factor: f64,
        growth_factor: usize,
    ) -> Result<HashTable<V>> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity);
        }

        // written to also reject NaN
        if !(load_factor > 0.0 && load_factor <= 1.0) {
            return Err(Error::InvalidLoadFactor(load_factor));
        }

        if growth_factor < 2 {
            return Err(Error::InvalidGrowthFactor(growth_factor));
        }

        Ok(HashTable {
            raw: raw::RawTable::new(capacity, load_factor, growth_factor),
            default,
        })
    }

    /// Returns the number of live entries in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the table contains no live entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the current number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.raw.load_factor()
    }

    #[inline]
    pub fn growth_factor(&self) -> usize {
        self.raw.growth_factor()
    }

    /// Returns the value used for missing keys.
    #[inline]
    pub fn default_value(&self) -> &V {
        &self.default
    }

    /// Returns a reference to the value corresponding to the key.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.raw.get(key)
    }

    /// Returns a reference to the value corresponding to the key, or the
    /// table's default value if the key is not present.
    #[inline]
    pub fn get_or_default(&self, key: &str) -> &V {
        self.get(key).unwrap_or(&self.default)
    }

    /// Returns `true` if the table contains a live value for the key.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Inserts a key-value pair into the table.
    ///
    /// If the table did not have this key present, `None` is returned. If
    /// the key was present, its value is replaced and the old value is
    /// returned. A previously removed key is revived with the new value.
    ///
    /// The table grows before this method returns if the insert pushed it
    /// over its load factor, or if the only free slots left are tombstones.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TableExhausted`] if every slot holds a different live
    /// key, which can only happen with a load factor of 1. The table is left
    /// unchanged.
    #[inline]
    pub fn insert(&mut self, key: &str, value: V) -> Result<Option<V>> {
        self.raw.insert(key, value)
    }

    /// Removes a key from the table, returning `true` if it was present.
    ///
    /// The slot is kept as a tombstone until the table next grows.
    #[inline]
    pub fn remove(&mut self, key: &str) -> bool {
        self.raw.remove(key)
    }

    /// An iterator visiting all live key-value pairs in arbitrary order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            raw: self.raw.iter(),
        }
    }

    /// An iterator visiting all live keys in arbitrary order.
    #[inline]
    pub fn keys(&self) -> Keys<'_, V> {
        Keys { iter: self.iter() }
    }

    /// An iterator visiting all live values in arbitrary order.
    #[inline]
    pub fn values(&self) -> Values<'_, V> {
        Values { iter: self.iter() }
    }
}

impl<V: PartialEq> PartialEq for HashTable<V> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }

        self.iter()
            .all(|(key, value)| other.get(key).map_or(false, |v| *value == *v))
    }
}

impl<V: fmt::Debug> fmt::Debug for HashTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashTable")?;
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over a table's entries.
///
/// This struct is created by the [`iter`](HashTable::iter) method on [`HashTable`].
pub struct Iter<'a, V> {
    raw: raw::Iter<'a, V>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.raw.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.raw.size_hint()
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> fmt::Debug for Iter<'_, V>
where
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(Iter {
                raw: self.raw.clone(),
            })
            .finish()
    }
}

/// An iterator over a table's keys.
///
/// This struct is created by the [`keys`](HashTable::keys) method on [`HashTable`].
pub struct Keys<'a, V> {
    iter: Iter<'a, V>,
}

impl<'a, V> Iterator for Keys<'a, V> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (key, _) = self.iter.next()?;
        Some(key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {}

/// An iterator over a table's values.
///
/// This struct is created by the [`values`](HashTable::values) method on [`HashTable`].
pub struct Values<'a, V> {
    iter: Iter<'a, V>,
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (_, value) = self.iter.next()?;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {}
