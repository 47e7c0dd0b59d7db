mod probe;

use std::mem;

use self::probe::Probe;
use crate::error::{Error, Result};

use tracing::{debug, trace, warn};

// An open-addressing hash table with linear probing.
//
// Deleted entries stay in place as dead slots until the table grows, so a
// lookup only stops at a truly empty slot.
#[derive(Clone)]
pub struct RawTable<V> {
    slots: Box<[Slot<V>]>,
    // The number of live entries.
    len: usize,
    load_factor: f64,
    growth_factor: usize,
}

// A slot in the table.
#[derive(Clone)]
pub enum Slot<V> {
    // Never written since the table was allocated. Terminates lookups.
    Empty,
    // A live entry.
    Live(Entry<V>),
    // A deleted entry. The key and value are retained, and lookups continue
    // past it.
    Dead(Entry<V>),
}

#[derive(Clone)]
pub struct Entry<V> {
    pub key: String,
    pub value: V,
}

impl<V> Slot<V> {
    // Flips a dead slot back to live.
    fn revive(&mut self) {
        *self = match mem::replace(self, Slot::Empty) {
            Slot::Dead(entry) => Slot::Live(entry),
            slot => slot,
        };
    }

    // Flips a live slot to dead.
    fn kill(&mut self) {
        *self = match mem::replace(self, Slot::Empty) {
            Slot::Live(entry) => Slot::Dead(entry),
            slot => slot,
        };
    }
}

impl<V> RawTable<V> {
    // Creates a table of `capacity` empty slots.
    //
    // The configuration must already be validated: `capacity > 0`,
    // `load_factor` in (0, 1] and `growth_factor > 1`.
    pub fn new(capacity: usize, load_factor: f64, growth_factor: usize) -> RawTable<V> {
        debug_assert!(capacity > 0);
        debug_assert!(load_factor > 0.0 && load_factor <= 1.0);
        debug_assert!(growth_factor > 1);

        RawTable {
            slots: RawTable::alloc(capacity),
            len: 0,
            load_factor,
            growth_factor,
        }
    }

    fn alloc(capacity: usize) -> Box<[Slot<V>]> {
        (0..capacity).map(|_| Slot::Empty).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    #[inline]
    pub fn growth_factor(&self) -> usize {
        self.growth_factor
    }

    // Returns the index of the live entry for `key`.
    fn find(&self, key: &str) -> Option<usize> {
        let (mut probe, limit) = Probe::start(key, self.capacity());

        while probe.len < limit {
            match &self.slots[probe.i] {
                // keys are never stored past an empty slot in their probe sequence
                Slot::Empty => return None,
                Slot::Live(entry) if entry.key == key => return Some(probe.i),
                // a dead slot or a different key, keep searching
                _ => {}
            }

            probe.next();
        }

        // every slot is occupied by another key
        None
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        match &self.slots[self.find(key)?] {
            Slot::Live(entry) => Some(&entry.value),
            _ => None,
        }
    }

    // Inserts or updates `key`, returning the previous live value.
    //
    // If the probe sequence wraps around the table without finding an empty
    // slot or an entry for `key`, the table grows when it holds tombstones.
    // Otherwise every slot is live, the table is left unchanged and
    // `Error::TableExhausted` is returned.
    pub fn insert(&mut self, key: &str, value: V) -> Result<Option<V>> {
        let (mut probe, limit) = Probe::start(key, self.capacity());

        while probe.len < limit {
            let slot = &mut self.slots[probe.i];

            match slot {
                Slot::Empty => {
                    *slot = Slot::Live(Entry {
                        key: key.to_owned(),
                        value,
                    });
                    self.len += 1;
                    self.grow_if_needed();
                    return Ok(None);
                }
                Slot::Live(entry) if entry.key == key => {
                    return Ok(Some(mem::replace(&mut entry.value, value)));
                }
                Slot::Dead(entry) if entry.key == key => {
                    trace!(key, "reviving deleted entry");
                    entry.value = value;
                    slot.revive();
                    self.len += 1;
                    self.grow_if_needed();
                    return Ok(None);
                }
                _ => probe.next(),
            }
        }

        // every remaining slot is a tombstone, growing clears them
        if self.len < self.capacity() {
            let capacity = self
                .capacity()
                .checked_mul(self.growth_factor)
                .expect("capacity overflow");
            self.grow(capacity);
            return self.insert(key, value);
        }

        warn!(
            key,
            capacity = self.capacity(),
            "probe sequence exhausted, insert was not applied"
        );

        Err(Error::TableExhausted {
            key: key.to_owned(),
            capacity: self.capacity(),
        })
    }

    // Marks the live entry for `key` as dead.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.find(key) {
            Some(i) => {
                self.slots[i].kill();
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    fn overloaded(&self, capacity: usize) -> bool {
        self.len as f64 / capacity as f64 > self.load_factor
    }

    fn grow_if_needed(&mut self) {
        if !self.overloaded(self.capacity()) {
            return;
        }

        let mut capacity = self.capacity();
        while self.overloaded(capacity) {
            capacity = capacity
                .checked_mul(self.growth_factor)
                .expect("capacity overflow");
        }

        self.grow(capacity);
    }

    // Moves every live entry into a fresh table of `capacity` empty slots.
    // Dead slots are dropped.
    fn grow(&mut self, capacity: usize) {
        debug!(
            from = self.capacity(),
            to = capacity,
            len = self.len,
            "growing table"
        );

        let old = mem::replace(&mut self.slots, RawTable::alloc(capacity));

        for slot in old.into_vec() {
            if let Slot::Live(entry) = slot {
                self.place(entry);
            }
        }
    }

    // Writes an entry into the first empty slot of its probe sequence.
    //
    // Only used while growing: keys are unique and the new table always
    // has room.
    fn place(&mut self, entry: Entry<V>) {
        let (mut probe, limit) = Probe::start(&entry.key, self.capacity());

        while probe.len < limit {
            if let Slot::Empty = self.slots[probe.i] {
                self.slots[probe.i] = Slot::Live(entry);
                return;
            }

            probe.next();
        }

        unreachable!("grown table has no empty slot");
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.len,
        }
    }
}

// An iterator over the live entries of a table.
pub struct Iter<'a, V> {
    slots: std::slice::Iter<'a, Slot<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Slot::Live(entry) = slot {
                self.remaining -= 1;
                return Some((entry.key.as_str(), &entry.value));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Iter {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}
