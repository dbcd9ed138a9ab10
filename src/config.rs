//! Experiment configuration.
//!
//! Loaded from TOML so table sizes and plot geometry can change without
//! rebuilding:
//!
//! ```
//! use quad_sort_growth::ExperimentConfig;
//!
//! let config = ExperimentConfig::from_toml_str(r#"
//!     max_n = 50
//!     num_trials = 20
//!     random_seed = 7
//!
//!     [plot]
//!     width = 800
//! "#).unwrap();
//!
//! assert_eq!(config.max_n, 50);
//! assert_eq!(config.random_seed, Some(7));
//! assert_eq!(config.plot.width, 800);
//! assert_eq!(config.plot.height, 650);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GrowthError, Result};

/// Settings for table generation and plotting.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ExperimentConfig {
    /// Length of each sampled sequence; columns per table.
    pub max_n: usize,

    /// Trials per table; rows per table.
    pub num_trials: usize,

    /// Seed for reproducible tables. Entropy-seeded when absent.
    pub random_seed: Option<u64>,

    /// Run trials on the rayon thread pool.
    pub parallel: bool,

    /// Directory where trial tables are written and looked up.
    pub output_dir: PathBuf,

    pub plot: PlotConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            max_n: 100,
            num_trials: 100,
            random_seed: None,
            parallel: false,
            output_dir: PathBuf::from("."),
            plot: PlotConfig::default(),
        }
    }
}

impl ExperimentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn with_max_n(mut self, max_n: usize) -> Self {
        self.max_n = max_n;
        self
    }

    pub fn with_num_trials(mut self, num_trials: usize) -> Self {
        self.num_trials = num_trials;
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Rejects sizes that would produce a table with nothing to average.
    pub fn validate(&self) -> Result<()> {
        if self.max_n == 0 {
            return Err(GrowthError::InvalidParameter(
                "max_n must be at least 1".to_string(),
            ));
        }
        if self.num_trials == 0 {
            return Err(GrowthError::InvalidParameter(
                "num_trials must be at least 1".to_string(),
            ));
        }
        self.plot.validate()
    }
}

/// Canvas geometry for rendered growth curves.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PlotConfig {
    pub width: u32,
    pub height: u32,
    /// Pixels from the left edge to x = 0.
    pub origin_x: u32,
    /// Pixels from the bottom edge to y = 0.
    pub origin_y: u32,
}

/// Canvases must be larger than this in both dimensions.
pub const MIN_CANVAS_SIZE: u32 = 100;

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 650,
            height: 650,
            origin_x: 40,
            origin_y: 40,
        }
    }
}

impl PlotConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width <= MIN_CANVAS_SIZE || self.height <= MIN_CANVAS_SIZE {
            return Err(GrowthError::InvalidParameter(format!(
                "canvas {}x{} is too small",
                self.width, self.height
            )));
        }
        if self.origin_x >= self.width || self.origin_y >= self.height {
            return Err(GrowthError::InvalidParameter(format!(
                "origin ({}, {}) lies outside the {}x{} canvas",
                self.origin_x, self.origin_y, self.width, self.height
            )));
        }
        Ok(())
    }
}
