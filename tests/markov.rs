mod common;

use common::{SPEAKER_A, SPEAKER_B};
use markov_speaker::{Backend, Error, HashTable, Map, Markov};

use std::collections::HashMap;

fn with_backend(mut test: impl FnMut(Backend)) {
    for backend in Backend::ALL {
        test(backend);
    }
}

#[test]
fn fit_circular_text() {
    with_backend(|backend| {
        let model = Markov::new("abab", 1, backend).unwrap();

        assert_eq!(model.count("a"), 2);
        assert_eq!(model.count("b"), 2);
        assert_eq!(model.count("ab"), 2);
        // position 3 wraps around to index 0
        assert_eq!(model.count("ba"), 2);
        assert_eq!(model.count("aa"), 0);
        assert_eq!(model.grams(), 4);
        assert_eq!(model.alphabet_size(), 2);
        assert_eq!(model.text_len(), 4);
        assert_eq!(model.order(), 1);
    });
}

#[test]
fn fit_counts_every_position() {
    with_backend(|backend| {
        for k in 1..6 {
            let model = Markov::new(SPEAKER_A, k, backend).unwrap();
            let total: u64 = model.counts().map(|(_, count)| count).sum();
            let len = SPEAKER_A.chars().count() as u64;

            // one k-gram and one (k+1)-gram per position
            assert_eq!(total, 2 * len);

            for (gram, _) in model.counts() {
                let n = gram.chars().count();
                assert!(n == k || n == k + 1);
            }
        }
    });
}

#[test]
fn fit_multibyte_text() {
    with_backend(|backend| {
        let model = Markov::new("naïve café", 2, backend).unwrap();
        assert_eq!(model.text_len(), 10);
        assert_eq!(model.count("ïv"), 1);
        assert_eq!(model.count("éna"), 1);
        assert_eq!(model.alphabet_size(), 9);
    });
}

#[test]
fn invalid_inputs() {
    with_backend(|backend| {
        assert_eq!(Markov::new("", 1, backend).unwrap_err(), Error::EmptyText);
        assert_eq!(
            Markov::new("abc", 0, backend).unwrap_err(),
            Error::InvalidOrder { k: 0, len: 3 }
        );
        assert_eq!(
            Markov::new("abc", 3, backend).unwrap_err(),
            Error::InvalidOrder { k: 3, len: 3 }
        );
        assert!(Markov::new("abc", 2, backend).is_ok());

        let model = Markov::new("abc", 1, backend).unwrap();
        assert_eq!(model.log_probability("").unwrap_err(), Error::EmptyText);
    });
}

#[test]
fn log_probability_by_hand() {
    with_backend(|backend| {
        let model = Markov::new("abab", 1, backend).unwrap();

        // "a" -> "ab" and "b" -> "ba" (wrapping within the candidate): ln(3/4) each
        let expected = 2.0 * (3.0f64 / 4.0).ln();
        let actual = model.log_probability("ab").unwrap();
        assert!((actual - expected).abs() < 1e-12);

        // "c" was never seen: ln((0 + 1) / (0 + 2))
        let actual = model.log_probability("c").unwrap();
        assert!((actual - 0.5f64.ln()).abs() < 1e-12);
    });
}

#[test]
fn unseen_grams_are_finite() {
    with_backend(|backend| {
        let model = Markov::new(SPEAKER_A, 3, backend).unwrap();
        let score = model.log_probability("zzzz qqqq xxxx 12345 ✓✓✓").unwrap();
        assert!(score.is_finite());
        assert!(score < 0.0);
    });
}

#[test]
fn candidate_shorter_than_order() {
    with_backend(|backend| {
        let model = Markov::new("abcabcabc", 4, backend).unwrap();
        let score = model.log_probability("ab").unwrap();
        assert!(score.is_finite());
    });
}

#[test]
fn log_probability_is_idempotent() {
    with_backend(|backend| {
        let model = Markov::new(SPEAKER_B, 2, backend).unwrap();
        let grams = model.grams();

        let first = model.log_probability(SPEAKER_A).unwrap();
        let second = model.log_probability(SPEAKER_A).unwrap();

        assert_eq!(first.to_bits(), second.to_bits());
        assert_eq!(model.grams(), grams);
    });
}

#[test]
fn backends_are_bit_identical() {
    for k in 1..8 {
        for (text, candidate) in [
            (SPEAKER_A, SPEAKER_B),
            (SPEAKER_B, SPEAKER_A),
            (SPEAKER_A, "it was"),
            ("abab", "baba"),
        ] {
            if k >= text.chars().count() {
                continue;
            }

            let custom = Markov::new(text, k, Backend::CustomTable).unwrap();
            let generic = Markov::new(text, k, Backend::GenericMap).unwrap();

            let custom_score = custom.log_probability(candidate).unwrap();
            let generic_score = generic.log_probability(candidate).unwrap();
            assert_eq!(custom_score.to_bits(), generic_score.to_bits(), "k = {k}");

            let mut custom_counts: Vec<_> = custom.counts().collect();
            let mut generic_counts: Vec<_> = generic.counts().collect();
            custom_counts.sort();
            generic_counts.sort();
            assert_eq!(custom_counts, generic_counts);
        }
    }
}

#[test]
fn injected_store() {
    let tiny = HashTable::<u64>::new(1, 0, 0.5, 3).unwrap();
    let model = Markov::with_store(SPEAKER_A, 3, Box::new(tiny)).unwrap();
    let reference = Markov::new(SPEAKER_A, 3, Backend::GenericMap).unwrap();

    assert_eq!(model.grams(), reference.grams());
    assert_eq!(
        model.log_probability(SPEAKER_B).unwrap().to_bits(),
        reference.log_probability(SPEAKER_B).unwrap().to_bits()
    );

    let store: Box<dyn Map<u64>> = Box::new(HashMap::<String, u64>::new());
    let model = Markov::with_store("abab", 1, store).unwrap();
    assert_eq!(model.count("ba"), 2);
}

#[test]
fn exhausted_store_fails_fitting() {
    // a full table never grows with a load factor of 1
    let table = HashTable::<u64>::new(2, 0, 1.0, 2).unwrap();
    let err = Markov::with_store("abc", 1, Box::new(table)).unwrap_err();
    assert!(matches!(err, Error::TableExhausted { capacity: 2, .. }));
}
