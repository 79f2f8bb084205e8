//! Randomness and the Biased Source
//!
//! The extractor never reaches for a global generator: randomness is the
//! [`UniformSampler`] capability, injected by the caller. Production code
//! uses [`RngSampler`] over `rand`'s `StdRng`; tests can pin every draw
//! with [`ReplaySampler`].

use crate::error::{Error, Result};
use rand::SeedableRng;
use rand::distributions::Standard;
use rand::rngs::StdRng;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Outcome of one coin flip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coin {
    /// Bit 0
    Tails = 0,
    /// Bit 1
    Heads = 1,
}

impl Coin {
    /// Numeric bit value (0 for tails, 1 for heads)
    #[inline]
    pub fn bit(self) -> u8 {
        self as u8
    }

    /// Whether this flip landed on heads
    #[inline]
    pub fn is_heads(self) -> bool {
        self == Coin::Heads
    }
}

/// Source of uniform reals in `[0, 1)`
pub trait UniformSampler {
    /// Draw one uniform real in `[0, 1)`
    fn sample(&mut self) -> f64;
}

impl<S: UniformSampler + ?Sized> UniformSampler for &mut S {
    #[inline]
    fn sample(&mut self) -> f64 {
        (**self).sample()
    }
}

/// [`UniformSampler`] backed by a `rand` generator
#[derive(Debug, Clone)]
pub struct RngSampler<R = StdRng> {
    rng: R,
}

impl<R: RngCore> RngSampler<R> {
    /// Wrap an existing generator
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Consume the sampler and return the generator
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RngSampler<StdRng> {
    /// Generator seeded from operating system entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Deterministic generator for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Seeded when `seed` is given, entropy-seeded otherwise
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: RngCore> UniformSampler for RngSampler<R> {
    #[inline]
    fn sample(&mut self) -> f64 {
        self.rng.sample(Standard)
    }
}

/// Deterministic sampler replaying a fixed script of draws in a cycle
///
/// Intended for tests that need exact control over every flip.
#[derive(Debug, Clone)]
pub struct ReplaySampler {
    script: Vec<f64>,
    position: usize,
}

impl ReplaySampler {
    /// Build a sampler over `script`; an empty script replays `0.0`
    pub fn new(script: impl Into<Vec<f64>>) -> Self {
        let mut script = script.into();
        if script.is_empty() {
            script.push(0.0);
        }
        Self {
            script,
            position: 0,
        }
    }

    /// Number of draws served so far
    pub fn draws(&self) -> usize {
        self.position
    }
}

impl UniformSampler for ReplaySampler {
    fn sample(&mut self) -> f64 {
        let value = self.script[self.position % self.script.len()];
        self.position += 1;
        value
    }
}

/// Binary source that lands on tails with probability `p`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct BiasedSource {
    p: f64,
}

impl BiasedSource {
    /// Validate `p` as a tails probability strictly between 0 and 1
    ///
    /// At `p = 0` or `p = 1` every pair agrees and extraction never
    /// terminates, so both are rejected.
    pub fn new(p: f64) -> Result<Self> {
        if p.is_finite() && p > 0.0 && p < 1.0 {
            Ok(Self { p })
        } else {
            Err(Error::InvalidBias(p))
        }
    }

    /// Probability of tails (bit 0)
    #[inline]
    pub fn tails_probability(&self) -> f64 {
        self.p
    }

    /// Probability of heads (bit 1)
    #[inline]
    pub fn heads_probability(&self) -> f64 {
        1.0 - self.p
    }

    /// Map one uniform draw to a flip: tails below `p`, heads otherwise
    #[inline]
    pub fn flip(&self, uniform: f64) -> Coin {
        if uniform < self.p {
            Coin::Tails
        } else {
            Coin::Heads
        }
    }
}

impl Default for BiasedSource {
    fn default() -> Self {
        Self {
            p: crate::DEFAULT_BIAS,
        }
    }
}

impl TryFrom<f64> for BiasedSource {
    type Error = Error;

    fn try_from(p: f64) -> Result<Self> {
        Self::new(p)
    }
}

impl From<BiasedSource> for f64 {
    fn from(source: BiasedSource) -> f64 {
        source.p
    }
}
