//! Unbiased sequence generation
//!
//! A sequence is never stored: only its head count matters, so bits are
//! tallied as they are emitted.

use crate::corrector::{BiasCorrector, DrawCounters};
use crate::error::Result;
use crate::measure::{Elapsed, timed};
use crate::source::UniformSampler;
use serde::{Deserialize, Serialize};

/// Head count of one sequence together with its cost
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    /// Number of heads (bit = 1) in the sequence
    pub heads: u64,
    /// Requested number of unbiased bits
    pub sequence_length: u64,
    /// Time spent generating the sequence
    pub elapsed: Elapsed,
    /// Extractor work consumed by this sequence
    pub draws: DrawCounters,
}

impl TrialResult {
    /// Elapsed wall-clock time in seconds
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Fraction of heads in the sequence (0.0 for an empty sequence)
    pub fn heads_fraction(&self) -> f64 {
        if self.sequence_length == 0 {
            0.0
        } else {
            self.heads as f64 / self.sequence_length as f64
        }
    }
}

/// Emit `length` unbiased bits and return how many were heads
///
/// `length = 0` returns 0 without touching the sampler.
pub fn generate_unbiased_sequence<S: UniformSampler>(
    corrector: &mut BiasCorrector<S>,
    length: u64,
) -> Result<u64> {
    let mut heads = 0u64;
    for _ in 0..length {
        heads += u64::from(corrector.unbiased_bit()?.bit());
    }
    Ok(heads)
}

/// Generate one sequence inside a scoped timer
pub fn timed_sequence<S: UniformSampler>(
    corrector: &mut BiasCorrector<S>,
    length: u64,
) -> Result<TrialResult> {
    let before = corrector.counters();
    let (heads, elapsed) = timed(|| generate_unbiased_sequence(corrector, length));
    let heads = heads?;

    Ok(TrialResult {
        heads,
        sequence_length: length,
        elapsed,
        draws: corrector.counters().since(&before),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::source::{BiasedSource, ReplaySampler, RngSampler};

    fn corrector(p: f64, seed: u64) -> BiasCorrector<RngSampler> {
        BiasCorrector::new(BiasedSource::new(p).unwrap(), RngSampler::seeded(seed))
    }

    #[test]
    fn test_empty_sequence_draws_nothing() {
        let sampler = ReplaySampler::new(vec![0.1, 0.9]);
        let mut corrector = BiasCorrector::new(BiasedSource::new(0.4).unwrap(), sampler);

        assert_eq!(generate_unbiased_sequence(&mut corrector, 0), Ok(0));
        assert_eq!(corrector.counters(), DrawCounters::default());
        assert_eq!(corrector.into_sampler().draws(), 0);
    }

    #[test]
    fn test_heads_within_length() {
        let mut corrector = corrector(0.4, 3);
        for length in [1u64, 2, 17, 1000] {
            let heads = generate_unbiased_sequence(&mut corrector, length).unwrap();
            assert!(heads <= length);
        }
    }

    #[test]
    fn test_scripted_sequence() {
        // p = 0.5: (T, H) → 1, (H, T) → 0, (T, T) rejected, (T, H) → 1
        let script = vec![0.1, 0.9, 0.9, 0.1, 0.2, 0.3, 0.4, 0.6];
        let mut corrector = BiasCorrector::new(BiasedSource::new(0.5).unwrap(), ReplaySampler::new(script));

        assert_eq!(generate_unbiased_sequence(&mut corrector, 3), Ok(2));
        assert_eq!(corrector.counters().rejected_pairs, 1);
    }

    #[test]
    fn test_same_seed_same_output() {
        let a = generate_unbiased_sequence(&mut corrector(0.3, 99), 10_000).unwrap();
        let b = generate_unbiased_sequence(&mut corrector(0.3, 99), 10_000).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_timed_sequence_counts_its_own_draws() {
        let mut corrector = corrector(0.4, 5);
        generate_unbiased_sequence(&mut corrector, 50).unwrap();

        let trial = timed_sequence(&mut corrector, 100).unwrap();
        assert_eq!(trial.sequence_length, 100);
        assert_eq!(trial.draws.bits, 100);
        assert_eq!(trial.draws.flips, 2 * trial.draws.pairs);
        assert!(trial.heads <= 100);
        assert!(trial.elapsed_secs() >= 0.0);
    }

    #[test]
    fn test_exhaustion_propagates() {
        let sampler = ReplaySampler::new(vec![0.9]);
        let mut corrector =
            BiasCorrector::with_pair_cap(BiasedSource::new(0.5).unwrap(), sampler, 8).unwrap();

        assert_eq!(
            generate_unbiased_sequence(&mut corrector, 10),
            Err(Error::Exhausted { pairs: 8 })
        );
    }

    #[test]
    fn test_heads_fraction() {
        let trial = TrialResult {
            heads: 3,
            sequence_length: 4,
            elapsed: Elapsed::default(),
            draws: DrawCounters::default(),
        };
        assert!((trial.heads_fraction() - 0.75).abs() < f64::EPSILON);
    }
}
