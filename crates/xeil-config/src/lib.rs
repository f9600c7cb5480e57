//! Runtime configuration for Xeil.
//!
//! Gameplay tunables persist to disk as a RON file. Missing sections and
//! fields fall back to defaults, unknown fields are ignored, and command-line
//! flags override whatever was loaded. World generation constants are not
//! configurable and live in `xeil-cosmos`.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    AutopilotConfig, Config, DebugConfig, MotionConfig, ScanConfig, TrailConfig, ZoomConfig,
    default_config_dir,
};
pub use error::ConfigError;
