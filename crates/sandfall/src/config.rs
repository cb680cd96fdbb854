//! Runner configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `sandfall.ron` file (if exists)
//! 3. Environment variables prefixed with `SANDFALL_`
//!
//! Example environment variable: `SANDFALL_SIM__BOUNDARY_EPSILON=2.0`

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use sandfall_core::SimConfig;
use serde::{Deserialize, Serialize};

/// Main runner configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub sim: SimConfig,

    #[serde(default)]
    pub run: RunConfig,
}

/// How a run is set up and paced
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Level width in pixels, a multiple of 64
    pub width: u32,
    /// Level height in pixels, a multiple of 64
    pub height: u32,
    /// Scenario used to fill a new level
    pub scenario: String,
    /// Ticks to simulate before exiting
    pub ticks: u64,
    /// Seed for the simulation random source
    pub seed: u64,
    /// Catch-up limit for the real-time loop
    pub max_steps_per_frame: u32,
    /// Ticks between activity reports
    pub report_interval: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 192,
            scenario: "sandpile".to_string(),
            ticks: 600,
            seed: 0,
            max_steps_per_frame: 2,
            report_interval: 60,
        }
    }
}

impl AppConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `sandfall.ron` file (if exists)
    /// 3. Environment variables prefixed with `SANDFALL_` (highest priority)
    pub fn load() -> Result<Self> {
        Self::load_from("sandfall")
    }

    /// Same as [`AppConfig::load`] with a different file name (without extension)
    pub fn load_from(file_name: &str) -> Result<Self> {
        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("run.width", 256_i64)?
            .set_default("run.height", 192_i64)?
            .set_default("run.scenario", "sandpile")?
            .set_default("run.ticks", 600_i64)?
            .set_default("run.seed", 0_i64)?
            .set_default("run.max_steps_per_frame", 2_i64)?
            .set_default("run.report_interval", 60_i64)?
            .set_default("sim.time_step", 1.0 / 60.0)?
            .set_default("sim.boundary_epsilon", 1.5)?
            // Layer 2: Config file (optional, won't error if missing)
            .add_source(
                File::with_name(file_name)
                    .format(config::FileFormat::Ron)
                    .required(false),
            )
            // Layer 3: Environment variables (SANDFALL_RUN__TICKS, etc.)
            .add_source(Environment::with_prefix("SANDFALL").separator("__"));

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Pretty RON rendering, suitable as a starting `sandfall.ron`
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, Default::default()).context("Failed to serialize configuration")
    }
}
