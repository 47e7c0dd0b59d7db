// Multiplier for the polynomial string hash.
pub const MULTIPLIER: u128 = 37;

// Polynomial rolling hash of `key` over its Unicode scalar values, reduced
// modulo `capacity` at every step (Horner's method).
//
// The intermediate product is widened so that large capacities cannot
// overflow.
#[inline]
pub fn hash(key: &str, capacity: usize) -> usize {
    let capacity = capacity as u128;
    let hash = key.chars().fold(0u128, |hash, c| {
        (hash * MULTIPLIER + u128::from(u32::from(c))) % capacity
    });

    hash as usize
}

// A linear probe sequence.
//
// The sequence starts at the home slot of a key and walks forward one slot
// at a time, wrapping at the end of the table. It visits every slot exactly
// once in `capacity` steps.
pub struct Probe {
    // The current index in the probe sequence.
    pub i: usize,
    // The number of slots visited so far.
    pub len: usize,
    // The length of the table.
    capacity: usize,
}

impl Probe {
    // Initialize the probe sequence for `key`, returning the maximum probe limit.
    #[inline]
    pub fn start(key: &str, capacity: usize) -> (Probe, usize) {
        let probe = Probe {
            i: hash(key, capacity),
            len: 0,
            capacity,
        };

        (probe, capacity)
    }

    // Increment the probe sequence.
    #[inline]
    pub fn next(&mut self) {
        self.len += 1;
        self.i += 1;

        if self.i == self.capacity {
            self.i = 0;
        }
    }
}
