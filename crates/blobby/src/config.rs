//! Application configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `config.ron` file (if exists)
//! 3. Environment variables prefixed with `BLOBBY_`
//!
//! Example environment variable: `BLOBBY_CREATURE__LIMBS=6`

use anyhow::{Context, Result, ensure};
use blobby_core::creature::RigConfig;
use blobby_core::world::WorldGenConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub world: WorldConfig,

    #[serde(default)]
    pub creature: RigConfig,

    #[serde(default)]
    pub sim: SimConfig,

    #[serde(default)]
    pub debug: DebugConfig,
}

/// Terrain settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Seed for terrain noise and the creature's RNG
    pub seed: u64,
    #[serde(default)]
    pub generation: WorldGenConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            generation: WorldGenConfig::default(),
        }
    }
}

/// Frame loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Frames simulated by a headless run
    pub frames: u32,
    /// Fixed frame rate of a headless run
    pub frame_rate: f32,
    /// Upper bound on a single frame's delta, in seconds
    pub max_delta: f32,
    /// Seconds between random move requests, 0 disables them
    pub move_interval: f32,
    /// Use the wall clock instead of fixed steps
    pub realtime: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            frame_rate: 60.0,
            max_delta: 1.0,
            move_interval: 2.0,
            realtime: false,
        }
    }
}

/// Debug/development settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Enable verbose logging
    pub verbose_logging: bool,
}

impl AppConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `config.ron` file (if exists)
    /// 3. Environment variables prefixed with `BLOBBY_` (highest priority)
    pub fn load() -> Result<Self> {
        let builder = Self::defaults()?
            // Layer 2: Config file (optional, won't error if missing)
            .add_source(
                File::with_name("config")
                    .format(FileFormat::Ron)
                    .required(false),
            )
            // Layer 3: Environment variables (BLOBBY_SIM__FRAMES, etc.)
            .add_source(
                Environment::with_prefix("BLOBBY")
                    .prefix_separator("_")
                    .separator("__"),
            );

        Self::build(builder)
    }

    /// Load defaults overlaid with a RON document
    pub fn from_ron(text: &str) -> Result<Self> {
        let builder = Self::defaults()?.add_source(File::from_str(text, FileFormat::Ron));
        Self::build(builder)
    }

    // Layer 1: Compiled defaults
    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let sim = SimConfig::default();
        let creature = RigConfig::default();
        let builder = Config::builder()
            .set_default("world.seed", 1_i64)?
            .set_default("creature.limbs", creature.limbs as i64)?
            .set_default("creature.clearance", creature.clearance as i64)?
            .set_default("sim.frames", sim.frames as i64)?
            .set_default("sim.frame_rate", sim.frame_rate as f64)?
            .set_default("sim.max_delta", sim.max_delta as f64)?
            .set_default("sim.move_interval", sim.move_interval as f64)?
            .set_default("sim.realtime", sim.realtime)?
            .set_default("debug.verbose_logging", false)?;
        Ok(builder)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config = builder.build().context("Failed to build configuration")?;

        let app: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        app.creature
            .validate()
            .context("Invalid creature configuration")?;
        ensure!(
            app.world.generation.height >= 2,
            "world.generation.height must be at least 2, got {}",
            app.world.generation.height
        );
        ensure!(
            app.sim.frame_rate > 0.0,
            "sim.frame_rate must be positive, got {}",
            app.sim.frame_rate
        );
        ensure!(
            app.sim.max_delta > 0.0,
            "sim.max_delta must be positive, got {}",
            app.sim.max_delta
        );
        Ok(app)
    }

    /// Pretty RON rendering of the effective configuration
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize configuration")
    }
}
