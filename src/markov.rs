use std::collections::HashSet;
use std::fmt;

use crate::error::{Error, Result};
use crate::store::{Backend, Map};

use tracing::debug;

/// An order-k character Markov model over a fixed text.
///
/// The model counts every k-character and (k+1)-character window of the
/// text, treating the text as circular so that each position starts exactly
/// one window of each length. Both kinds of window share one backing store.
///
/// A fitted model is read-only: scoring never changes it.
pub struct Markov {
    k: usize,
    text_len: usize,
    alphabet: HashSet<char>,
    counts: Box<dyn Map<u64>>,
}

impl Markov {
    /// Fits a model of order `k` to `text`, counting into a fresh store of
    /// the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyText`] if `text` is empty and
    /// [`Error::InvalidOrder`] unless `0 < k < len(text)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use markov_speaker::{Backend, Markov};
    ///
    /// let model = Markov::new("abab", 1, Backend::CustomTable)?;
    /// assert_eq!(model.count("a"), 2);
    /// assert_eq!(model.count("ba"), 2);
    /// # Ok::<(), markov_speaker::Error>(())
    /// ```
    pub fn new(text: &str, k: usize, backend: Backend) -> Result<Markov> {
        Markov::with_store(text, k, backend.store())
    }

    /// Fits a model of order `k` to `text`, counting into `store`.
    ///
    /// `store` is expected to be empty; existing counts are added to.
    pub fn with_store(text: &str, k: usize, store: Box<dyn Map<u64>>) -> Result<Markov> {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return Err(Error::EmptyText);
        }

        if k == 0 || k >= chars.len() {
            return Err(Error::InvalidOrder {
                k,
                len: chars.len(),
            });
        }

        let mut model = Markov {
            k,
            text_len: chars.len(),
            alphabet: HashSet::new(),
            counts: store,
        };
        model.populate(&chars)?;

        debug!(
            k,
            text_len = model.text_len,
            alphabet = model.alphabet.len(),
            grams = model.counts.len(),
            "fitted markov model"
        );

        Ok(model)
    }

    fn populate(&mut self, chars: &[char]) -> Result<()> {
        for (i, &c) in chars.iter().enumerate() {
            self.alphabet.insert(c);

            let (k_gram, next_gram) = window(chars, i, self.k);
            increment(self.counts.as_mut(), &k_gram)?;
            increment(self.counts.as_mut(), &next_gram)?;
        }

        Ok(())
    }

    /// Returns the log-probability that the modeled speaker produced
    /// `candidate`.
    ///
    /// Every circular position `i` of the candidate contributes
    /// `ln((M + 1) / (N + S))`, where `N` and `M` are the fitted counts of the
    /// k-gram and (k+1)-gram starting at `i`, and `S` is the number of
    /// distinct characters in the fitting text. Windows wrap modulo the
    /// candidate's own length. The sum is not normalized.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyText`] if `candidate` is empty.
    pub fn log_probability(&self, candidate: &str) -> Result<f64> {
        let chars: Vec<char> = candidate.chars().collect();
        if chars.is_empty() {
            return Err(Error::EmptyText);
        }

        let alphabet = self.alphabet.len() as f64;

        let mut total = 0.0;
        for i in 0..chars.len() {
            let (k_gram, next_gram) = window(&chars, i, self.k);
            let n = self.count(&k_gram) as f64;
            let m = self.count(&next_gram) as f64;

            total += ((m + 1.0) / (n + alphabet)).ln();
        }

        Ok(total)
    }

    /// Returns how often `gram` was seen while fitting, zero if never.
    pub fn count(&self, gram: &str) -> u64 {
        self.counts.get(gram).copied().unwrap_or(0)
    }

    /// The order `k` of the model.
    pub fn order(&self) -> usize {
        self.k
    }

    /// The number of characters in the fitting text.
    pub fn text_len(&self) -> usize {
        self.text_len
    }

    /// The number of distinct characters in the fitting text.
    pub fn alphabet_size(&self) -> usize {
        self.alphabet.len()
    }

    /// The number of distinct k-grams and (k+1)-grams stored.
    pub fn grams(&self) -> usize {
        self.counts.len()
    }

    /// Iterates over every stored gram and its count in unspecified order.
    pub fn counts(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.entries().map(|(gram, &count)| (gram, count))
    }
}

impl fmt::Debug for Markov {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Markov")
            .field("k", &self.k)
            .field("text_len", &self.text_len)
            .field("alphabet", &self.alphabet.len())
            .field("grams", &self.counts.len())
            .finish()
    }
}

// Returns the k-gram and (k+1)-gram starting at `i`, wrapping around the end
// of `chars`.
fn window(chars: &[char], i: usize, k: usize) -> (String, String) {
    let mut gram: String = (0..k).map(|j| chars[(i + j) % chars.len()]).collect();
    let k_gram = gram.clone();
    gram.push(chars[(i + k) % chars.len()]);

    (k_gram, gram)
}

fn increment(counts: &mut dyn Map<u64>, gram: &str) -> Result<()> {
    let count = counts.get(gram).copied().unwrap_or(0);
    counts.set(gram, count + 1)
}
