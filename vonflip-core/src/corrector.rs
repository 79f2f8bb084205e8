//! Bias Corrector - Von Neumann Extraction
//!
//! Draws pairs of flips from a [`BiasedSource`] and emits one unbiased bit
//! per disagreeing pair:
//!
//! ```text
//! (T, T) → reject      (T, H) → Heads
//! (H, H) → reject      (H, T) → Tails
//! ```
//!
//! `P(T, H) = P(H, T) = p(1 - p)`, so the emitted bit is exactly fair for
//! any `p` in (0, 1). Only the number of rejected pairs depends on `p`.

use crate::error::{Error, Result};
use crate::source::{BiasedSource, Coin, UniformSampler};
use serde::{Deserialize, Serialize};

/// Running tallies of the extractor's work
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawCounters {
    /// Individual biased flips drawn
    pub flips: u64,
    /// Pairs drawn (accepted and rejected)
    pub pairs: u64,
    /// Pairs discarded because both flips agreed
    pub rejected_pairs: u64,
    /// Unbiased bits emitted
    pub bits: u64,
}

impl DrawCounters {
    /// Counters accumulated since `earlier`
    pub fn since(&self, earlier: &DrawCounters) -> DrawCounters {
        DrawCounters {
            flips: self.flips - earlier.flips,
            pairs: self.pairs - earlier.pairs,
            rejected_pairs: self.rejected_pairs - earlier.rejected_pairs,
            bits: self.bits - earlier.bits,
        }
    }

    /// Average pairs drawn per emitted bit (0.0 before the first bit)
    pub fn pairs_per_bit(&self) -> f64 {
        if self.bits == 0 {
            0.0
        } else {
            self.pairs as f64 / self.bits as f64
        }
    }

    /// Average biased flips drawn per emitted bit (0.0 before the first bit)
    pub fn flips_per_bit(&self) -> f64 {
        if self.bits == 0 {
            0.0
        } else {
            self.flips as f64 / self.bits as f64
        }
    }
}

/// Von Neumann extractor over an injected sampler
///
/// The rejection loop is unbounded by default. With a pair cap set via
/// [`BiasCorrector::with_pair_cap`], a bit that needs more pairs than the
/// cap fails with [`Error::Exhausted`] instead of spinning.
#[derive(Debug, Clone)]
pub struct BiasCorrector<S> {
    source: BiasedSource,
    sampler: S,
    max_pairs: Option<u64>,
    counters: DrawCounters,
}

impl<S: UniformSampler> BiasCorrector<S> {
    /// Create an uncapped extractor
    pub fn new(source: BiasedSource, sampler: S) -> Self {
        Self {
            source,
            sampler,
            max_pairs: None,
            counters: DrawCounters::default(),
        }
    }

    /// Create an extractor giving up after `max_pairs` pairs per bit
    pub fn with_pair_cap(source: BiasedSource, sampler: S, max_pairs: u64) -> Result<Self> {
        if max_pairs == 0 {
            return Err(Error::InvalidPairCap);
        }
        Ok(Self {
            max_pairs: Some(max_pairs),
            ..Self::new(source, sampler)
        })
    }

    /// The biased source being corrected
    pub fn source(&self) -> BiasedSource {
        self.source
    }

    /// Configured pair cap, if any
    pub fn max_pairs(&self) -> Option<u64> {
        self.max_pairs
    }

    /// Draw counters accumulated since creation or the last reset
    pub fn counters(&self) -> DrawCounters {
        self.counters
    }

    /// Zero the draw counters
    pub fn reset_counters(&mut self) {
        self.counters = DrawCounters::default();
    }

    /// Consume the corrector and return its sampler
    pub fn into_sampler(self) -> S {
        self.sampler
    }

    /// Draw one flip from the biased source
    #[inline]
    pub fn sample_biased_bit(&mut self) -> Coin {
        self.counters.flips += 1;
        self.source.flip(self.sampler.sample())
    }

    /// Draw pairs until they disagree and return the second flip
    pub fn unbiased_bit(&mut self) -> Result<Coin> {
        let mut attempts: u64 = 0;
        loop {
            if self.max_pairs.is_some_and(|cap| attempts >= cap) {
                tracing::warn!(pairs = attempts, "pair cap reached without a disagreeing pair");
                return Err(Error::Exhausted { pairs: attempts });
            }

            let first = self.sample_biased_bit();
            let second = self.sample_biased_bit();
            attempts += 1;
            self.counters.pairs += 1;

            if first != second {
                self.counters.bits += 1;
                return Ok(second);
            }
            self.counters.rejected_pairs += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{ReplaySampler, RngSampler};

    fn source(p: f64) -> BiasedSource {
        BiasedSource::new(p).unwrap()
    }

    #[test]
    fn test_sample_biased_bit() {
        let mut corrector = BiasCorrector::new(source(0.5), ReplaySampler::new(vec![0.2, 0.7]));

        assert_eq!(corrector.sample_biased_bit(), Coin::Tails);
        assert_eq!(corrector.sample_biased_bit(), Coin::Heads);
        assert_eq!(corrector.counters().flips, 2);
    }

    #[test]
    fn test_rejects_agreeing_pairs() {
        // (T, T), (H, H), (T, H) with p = 0.5
        let script = vec![0.1, 0.2, 0.8, 0.9, 0.3, 0.6];
        let mut corrector = BiasCorrector::new(source(0.5), ReplaySampler::new(script));

        assert_eq!(corrector.unbiased_bit(), Ok(Coin::Heads));

        let counters = corrector.counters();
        assert_eq!(counters.flips, 6);
        assert_eq!(counters.pairs, 3);
        assert_eq!(counters.rejected_pairs, 2);
        assert_eq!(counters.bits, 1);
    }

    #[test]
    fn test_returns_second_flip() {
        // (H, T) → Tails
        let mut corrector = BiasCorrector::new(source(0.5), ReplaySampler::new(vec![0.9, 0.1]));
        assert_eq!(corrector.unbiased_bit(), Ok(Coin::Tails));
    }

    #[test]
    fn test_pair_cap_exhausted() {
        // Every pair agrees
        let mut corrector =
            BiasCorrector::with_pair_cap(source(0.5), ReplaySampler::new(vec![0.1]), 4).unwrap();

        assert_eq!(corrector.unbiased_bit(), Err(Error::Exhausted { pairs: 4 }));
        assert_eq!(corrector.counters().pairs, 4);
        assert_eq!(corrector.counters().bits, 0);
    }

    #[test]
    fn test_pair_cap_allows_success() {
        let script = vec![0.1, 0.2, 0.1, 0.9];
        let mut corrector =
            BiasCorrector::with_pair_cap(source(0.5), ReplaySampler::new(script), 2).unwrap();

        assert_eq!(corrector.unbiased_bit(), Ok(Coin::Heads));
        assert_eq!(corrector.max_pairs(), Some(2));
    }

    #[test]
    fn test_zero_pair_cap_rejected() {
        let result = BiasCorrector::with_pair_cap(source(0.5), ReplaySampler::new(vec![0.1]), 0);
        assert!(matches!(result, Err(Error::InvalidPairCap)));
    }

    #[test]
    fn test_output_is_fair_for_skewed_bias() {
        let mut corrector = BiasCorrector::new(source(0.9), RngSampler::seeded(11));
        let n = 20_000;
        let heads = (0..n)
            .filter(|_| corrector.unbiased_bit().unwrap().is_heads())
            .count();

        let sd = (n as f64).sqrt() / 2.0;
        assert!((heads as f64 - n as f64 / 2.0).abs() < 6.0 * sd);
    }

    #[test]
    fn test_counters_since() {
        let before = DrawCounters {
            flips: 4,
            pairs: 2,
            rejected_pairs: 1,
            bits: 1,
        };
        let after = DrawCounters {
            flips: 10,
            pairs: 5,
            rejected_pairs: 2,
            bits: 3,
        };
        let delta = after.since(&before);

        assert_eq!(delta.flips, 6);
        assert_eq!(delta.bits, 2);
        assert!((delta.pairs_per_bit() - 1.5).abs() < f64::EPSILON);
        assert!((delta.flips_per_bit() - 3.0).abs() < f64::EPSILON);
        assert_eq!(DrawCounters::default().pairs_per_bit(), 0.0);
    }

    #[test]
    fn test_reset_counters() {
        let mut corrector = BiasCorrector::new(source(0.5), ReplaySampler::new(vec![0.1, 0.9]));
        corrector.unbiased_bit().unwrap();
        corrector.reset_counters();
        assert_eq!(corrector.counters(), DrawCounters::default());
    }
}
