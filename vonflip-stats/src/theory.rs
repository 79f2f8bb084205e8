//! Theoretical Expectations
//!
//! Closed-form values for Von Neumann extraction over a source that yields
//! tails with probability `p` and heads with probability `1 - p`.
//!
//! A pair is accepted when its two flips differ, which happens with
//! probability `2p(1 - p)`. The number of pairs per emitted bit is therefore
//! geometric with mean `1 / (2p(1 - p))`. Accepted bits are fair regardless
//! of `p`, so a sequence of `L` bits has `L / 2` expected heads and a
//! standard deviation of `sqrt(L) / 2`.

use crate::{FAIR_BIT_VARIANCE, FAIR_PROBABILITY};
use serde::{Deserialize, Serialize};

/// Expected behavior of one sequence for a given bias and length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Expectation {
    /// Probability that a single biased flip lands on tails
    pub bias: f64,
    /// Number of unbiased bits per sequence
    pub sequence_length: u64,
    /// Expected head count per sequence
    pub expected_heads: f64,
    /// Standard deviation of the head count per sequence
    pub heads_std_dev: f64,
    /// Probability that a pair is accepted
    pub acceptance_probability: f64,
    /// Expected pairs drawn per emitted bit
    pub expected_pairs_per_bit: f64,
    /// Expected biased flips drawn per emitted bit
    pub expected_flips_per_bit: f64,
}

impl Expectation {
    /// Compute expectations for `bias` and `sequence_length`
    ///
    /// `bias` is assumed to lie in (0, 1); at the boundaries the per-bit
    /// draw counts are infinite.
    pub fn new(bias: f64, sequence_length: u64) -> Self {
        let acceptance_probability = 2.0 * bias * (1.0 - bias);
        let expected_pairs_per_bit = 1.0 / acceptance_probability;
        let length = sequence_length as f64;

        Self {
            bias,
            sequence_length,
            expected_heads: length * FAIR_PROBABILITY,
            heads_std_dev: (length * FAIR_BIT_VARIANCE).sqrt(),
            acceptance_probability,
            expected_pairs_per_bit,
            expected_flips_per_bit: 2.0 * expected_pairs_per_bit,
        }
    }

    /// Whether `heads` lies within `k` standard deviations of the expectation
    pub fn heads_within(&self, heads: f64, k: f64) -> bool {
        (heads - self.expected_heads).abs() <= k * self.heads_std_dev
    }
}

/// Relative error of `observed` against `expected` (0.0 when both are zero)
pub fn relative_error(observed: f64, expected: f64) -> f64 {
    if expected == 0.0 {
        if observed == 0.0 { 0.0 } else { f64::INFINITY }
    } else {
        (observed - expected).abs() / expected.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_configuration() {
        let exp = Expectation::new(0.4, 1_000_000);

        assert!((exp.expected_heads - 500_000.0).abs() < f64::EPSILON);
        assert!((exp.heads_std_dev - 500.0).abs() < 1e-9);
        assert!((exp.acceptance_probability - 0.48).abs() < 1e-12);
        assert!((exp.expected_pairs_per_bit - 1.0 / 0.48).abs() < 1e-12);
        assert!((exp.expected_flips_per_bit - 2.0 / 0.48).abs() < 1e-12);
    }

    #[test]
    fn test_fair_source_needs_fewest_draws() {
        let fair = Expectation::new(0.5, 100);
        let skewed = Expectation::new(0.9, 100);

        assert!((fair.expected_pairs_per_bit - 2.0).abs() < 1e-12);
        assert!(skewed.expected_pairs_per_bit > fair.expected_pairs_per_bit);
        // Output distribution does not depend on bias
        assert_eq!(fair.expected_heads, skewed.expected_heads);
        assert_eq!(fair.heads_std_dev, skewed.heads_std_dev);
    }

    #[test]
    fn test_draws_symmetric_in_bias() {
        let low = Expectation::new(0.2, 10);
        let high = Expectation::new(0.8, 10);
        assert!((low.expected_pairs_per_bit - high.expected_pairs_per_bit).abs() < 1e-9);
    }

    #[test]
    fn test_empty_sequence() {
        let exp = Expectation::new(0.4, 0);
        assert_eq!(exp.expected_heads, 0.0);
        assert_eq!(exp.heads_std_dev, 0.0);
        assert!(exp.heads_within(0.0, 1.0));
    }

    #[test]
    fn test_heads_within() {
        let exp = Expectation::new(0.4, 1_000_000);
        assert!(exp.heads_within(504_000.0, 10.0));
        assert!(!exp.heads_within(510_000.0, 10.0));
    }

    #[test]
    fn test_relative_error() {
        assert!((relative_error(110.0, 100.0) - 0.1).abs() < 1e-12);
        assert_eq!(relative_error(0.0, 0.0), 0.0);
        assert!(relative_error(1.0, 0.0).is_infinite());
    }
}
