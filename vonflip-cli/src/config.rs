//! Configuration loading from vonflip.toml
//!
//! Vonflip configuration can be specified in a `vonflip.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use vonflip_core::{BiasedSource, DEFAULT_SEQUENCE_LENGTH, DEFAULT_TRIAL_COUNT};

/// Name of the configuration file looked up by [`VonflipConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "vonflip.toml";

/// Vonflip configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VonflipConfig {
    /// Experiment configuration
    #[serde(default)]
    pub experiment: ExperimentSection,
    /// Output configuration
    #[serde(default)]
    pub output: OutputSection,
}

/// Experiment parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentSection {
    /// Probability that a biased flip lands on tails, strictly between 0 and 1
    #[serde(default = "default_bias")]
    pub bias: BiasedSource,
    /// Number of trials per experiment
    #[serde(default = "default_trials")]
    pub trials: u32,
    /// Unbiased bits generated per trial
    #[serde(default = "default_sequence_length")]
    pub sequence_length: u64,
    /// Seed for reproducible runs (entropy-seeded when absent)
    #[serde(default)]
    pub seed: Option<u64>,
    /// Give up on a bit after this many agreeing pairs (unbounded when absent)
    #[serde(default)]
    pub max_pairs: Option<u64>,
}

impl Default for ExperimentSection {
    fn default() -> Self {
        Self {
            bias: default_bias(),
            trials: default_trials(),
            sequence_length: default_sequence_length(),
            seed: None,
            max_pairs: None,
        }
    }
}

fn default_bias() -> BiasedSource {
    BiasedSource::default()
}
fn default_trials() -> u32 {
    DEFAULT_TRIAL_COUNT
}
fn default_sequence_length() -> u64 {
    DEFAULT_SEQUENCE_LENGTH
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    /// Default output format: "human" or "json"
    #[serde(default = "default_format")]
    pub format: String,
    /// Show a progress bar while trials run
    #[serde(default = "default_progress")]
    pub progress: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: default_format(),
            progress: default_progress(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}
fn default_progress() -> bool {
    true
}

impl VonflipConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    ///
    /// A file that exists but fails to parse is reported and skipped.
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => {
                        tracing::debug!(path = %config_path.display(), "loaded configuration");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!("ignoring {}: {:#}", config_path.display(), e);
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# Vonflip Configuration

[experiment]
# Probability that a single biased flip lands on tails (0 < bias < 1)
bias = 0.4
# Number of independent trials
trials = 10
# Unbiased bits generated per trial
sequence_length = 1000000
# Seed for reproducible runs (uncomment to enable)
# seed = 42
# Give up on a bit after this many agreeing pairs (uncomment to enable)
# max_pairs = 1000000

[output]
# Default output format: human, json
format = "human"
# Show a progress bar while trials run
progress = true
"#
        .to_string()
    }
}
