//! Error taxonomy for the extractor and the experiment runner.

use thiserror::Error;

/// Errors raised by the bias corrector and the experiment runner
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The tails probability is not finite or lies outside the open interval (0, 1).
    #[error("Invalid bias: {0} (must be strictly between 0 and 1)")]
    InvalidBias(f64),

    /// An experiment was requested with no trials.
    #[error("Invalid trial count: at least one trial is required")]
    InvalidTrialCount,

    /// A pair cap of zero can never yield a bit.
    #[error("Invalid pair cap: must be at least 1")]
    InvalidPairCap,

    /// The configured pair cap was reached without a disagreeing pair.
    #[error("Extractor exhausted: no disagreeing pair after {pairs} pairs")]
    Exhausted {
        /// Pairs drawn before giving up
        pairs: u64,
    },
}

/// Result alias for extractor and runner operations
pub type Result<T> = std::result::Result<T, Error>;
