//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level gameplay configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Focal point motion.
    pub motion: MotionConfig,
    /// Zoom limits.
    pub zoom: ZoomConfig,
    /// Proximity scanning.
    pub scan: ScanConfig,
    /// Fast travel to named bodies.
    pub autopilot: AutopilotConfig,
    /// Movement trail.
    pub trail: TrailConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Motion integrator tunables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    /// Acceleration per tick at full input.
    pub player_speed: f64,
    /// Velocity multiplier applied after every tick.
    pub drag: f64,
    /// The focal point counts as stopped below this speed on both axes.
    pub stop_speed: f64,
    /// Frame deltas are clamped to this many milliseconds.
    pub max_step_ms: f64,
    /// Frame length the autopilot speed is expressed against.
    pub reference_frame_ms: f64,
}

/// Zoom limits. Higher zoom shows more of the world and slows apparent motion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ZoomConfig {
    pub min: f64,
    pub max: f64,
    /// Zoom at startup.
    pub initial: f64,
    /// Change per zoom step.
    pub step: f64,
}

/// Scan tunables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScanConfig {
    /// Scan reach beyond a planet's own radius.
    pub radius: f64,
    /// Time the focal point must stay still before a dossier is revealed.
    pub duration_ms: f64,
}

/// Autopilot tunables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AutopilotConfig {
    /// Travel speed as a multiple of `motion.player_speed`.
    pub speed_multiplier: f64,
    /// Arrival when the focal point is this close to the target.
    pub arrival_threshold: f64,
    /// Distance from the focal point at which a named target is placed.
    pub travel_distance: f64,
    /// Approach point scatter around the target, as a fraction of a chunk.
    pub approach_scatter: f64,
    /// Seed for the travel RNG. `None` seeds from entropy.
    pub seed: Option<u64>,
}

/// Movement trail tunables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrailConfig {
    /// Trail points fade out over this many milliseconds.
    pub lifetime_ms: f64,
    /// Minimum on-screen movement before a new point is laid.
    pub min_spacing: f64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            player_speed: 0.1,
            drag: 0.95,
            stop_speed: 0.01,
            max_step_ms: 100.0,
            reference_frame_ms: 16.0,
        }
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: 50.0,
            max: 200.0,
            initial: 100.0,
            step: 5.0,
        }
    }
}

impl ZoomConfig {
    /// Clamp a zoom level into `[min, max]`.
    pub fn clamp(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min, self.max)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            radius: 100.0,
            duration_ms: 1500.0,
        }
    }
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self {
            speed_multiplier: 5.0,
            arrival_threshold: 10.0,
            travel_distance: 10_000.0,
            approach_scatter: 0.5,
            seed: None,
        }
    }
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            lifetime_ms: 2000.0,
            min_spacing: 0.5,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Platform config directory for Xeil, e.g. `~/.config/xeil` on Linux.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("xeil"))
}

// --- Persistence ---

impl Config {
    /// Path of the config file inside `config_dir`.
    pub fn path_in(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_FILE)
    }

    /// Reads `config.ron` from `config_dir`, writing the defaults there first
    /// if the file does not exist yet.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = Self::path_in(config_dir);
        if !path.exists() {
            let config = Self::default();
            config.save(config_dir)?;
            log::info!("Wrote default config to {}", path.display());
            return Ok(config);
        }
        let config = Self::read(&path)?;
        log::info!("Using config {}", path.display());
        Ok(config)
    }

    /// Writes `config.ron` into `config_dir`, creating the directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let path = Self::path_in(config_dir);
        let write_err = |source| ConfigError::Write {
            path: path.clone(),
            source,
        };

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let text = ron::ser::to_string_pretty(self, pretty)?;

        std::fs::create_dir_all(config_dir).map_err(write_err)?;
        std::fs::write(&path, text).map_err(write_err)
    }

    /// Re-reads `config.ron`. Returns the new config only if it differs
    /// from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let fresh = Self::read(&Self::path_in(config_dir))?;
        if fresh == *self {
            return Ok(None);
        }
        log::info!("Config changed on disk");
        Ok(Some(fresh))
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
