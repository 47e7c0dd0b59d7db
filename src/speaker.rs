use std::fmt;

use crate::error::{Error, Result};
use crate::markov::Markov;
use crate::store::Backend;

use tracing::debug;

/// One of the two reference speakers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Speaker {
    A,
    B,
}

impl Speaker {
    /// The one-character label of the speaker.
    pub fn label(self) -> char {
        match self {
            Speaker::A => 'A',
            Speaker::B => 'B',
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The outcome of scoring an unknown text against two speaker models.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Identification {
    /// Length-normalized log-probability under speaker A's model.
    pub score_a: f64,
    /// Length-normalized log-probability under speaker B's model.
    pub score_b: f64,
    /// The more likely speaker.
    pub verdict: Speaker,
}

impl Identification {
    /// Builds an identification from two normalized scores.
    ///
    /// The verdict is [`Speaker::A`] only if `score_a` is strictly greater
    /// than `score_b`; equal scores resolve to [`Speaker::B`].
    pub fn from_scores(score_a: f64, score_b: f64) -> Identification {
        let verdict = if score_a > score_b {
            Speaker::A
        } else {
            Speaker::B
        };

        Identification {
            score_a,
            score_b,
            verdict,
        }
    }

    /// Scores `unknown` against two fitted models.
    ///
    /// Each score is the model's log-probability of `unknown` divided by the
    /// number of characters in `unknown`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyText`] if `unknown` is empty.
    pub fn compare(model_a: &Markov, model_b: &Markov, unknown: &str) -> Result<Identification> {
        let len = unknown.chars().count();
        if len == 0 {
            return Err(Error::EmptyText);
        }

        let score_a = model_a.log_probability(unknown)? / len as f64;
        let score_b = model_b.log_probability(unknown)? / len as f64;

        Ok(Identification::from_scores(score_a, score_b))
    }
}

/// Decides which of two speakers more likely produced `unknown`.
///
/// Fits an order-`k` model to each reference text using the same backend,
/// then compares the length-normalized log-probabilities of `unknown` under
/// both models.
///
/// # Errors
///
/// Propagates fitting errors for either reference text and returns
/// [`Error::EmptyText`] if `unknown` is empty.
///
/// # Examples
///
/// ```
/// use markov_speaker::{identify_speaker, Backend, Speaker};
///
/// let result = identify_speaker("aaaa", "abab", "aaaa", 1, Backend::CustomTable)?;
/// assert!(result.score_a > result.score_b);
/// assert_eq!(result.verdict, Speaker::A);
/// # Ok::<(), markov_speaker::Error>(())
/// ```
pub fn identify_speaker(
    text_a: &str,
    text_b: &str,
    unknown: &str,
    k: usize,
    backend: Backend,
) -> Result<Identification> {
    let model_a = Markov::new(text_a, k, backend)?;
    let model_b = Markov::new(text_b, k, backend)?;

    let result = Identification::compare(&model_a, &model_b, unknown)?;

    debug!(
        k,
        %backend,
        score_a = result.score_a,
        score_b = result.score_b,
        verdict = %result.verdict,
        "identified speaker"
    );

    Ok(result)
}
