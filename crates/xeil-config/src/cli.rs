//! Command-line overrides for Xeil.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Xeil command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "xeil", about = "Xeil infinite-space explorer")]
pub struct CliArgs {
    /// Directory holding `config.ron` instead of the platform default.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `info,xeil_world=trace`.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Initial zoom level.
    #[arg(long)]
    pub zoom: Option<f64>,

    /// Scan duration in milliseconds.
    #[arg(long)]
    pub scan_duration_ms: Option<f64>,

    /// Seed for the autopilot travel RNG.
    #[arg(long)]
    pub travel_seed: Option<u64>,
}

impl Config {
    /// Overwrites the loaded values with any flags that were given. Zoom is
    /// clamped into the zoom limits and scan duration floored at zero.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(level) = &args.log_level {
            self.debug.log_level.clone_from(level);
        }
        if let Some(zoom) = args.zoom {
            self.zoom.initial = self.zoom.clamp(zoom);
        }
        if let Some(ms) = args.scan_duration_ms {
            self.scan.duration_ms = ms.max(0.0);
        }
        if let Some(seed) = args.travel_seed {
            self.autopilot.seed = Some(seed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overridden(args: CliArgs) -> Config {
        let mut config = Config::default();
        config.apply_cli_overrides(&args);
        config
    }

    #[test]
    fn test_flags_override_loaded_values() {
        let config = overridden(CliArgs {
            log_level: Some("debug".to_string()),
            scan_duration_ms: Some(300.0),
            travel_seed: Some(9),
            ..Default::default()
        });
        assert_eq!(config.debug.log_level, "debug");
        assert_eq!(config.scan.duration_ms, 300.0);
        assert_eq!(config.autopilot.seed, Some(9));
        assert_eq!(config.zoom.initial, 100.0, "zoom was not passed");
        assert_eq!(config.scan.radius, 100.0);
    }

    #[test]
    fn test_out_of_range_flags_are_clamped() {
        let config = overridden(CliArgs {
            zoom: Some(1000.0),
            scan_duration_ms: Some(-20.0),
            ..Default::default()
        });
        assert_eq!(config.zoom.initial, 200.0);
        assert_eq!(config.scan.duration_ms, 0.0);
    }

    #[test]
    fn test_no_flags_keep_config() {
        assert_eq!(overridden(CliArgs::default()), Config::default());
    }

    #[test]
    fn test_parse_command_line() {
        let args = CliArgs::parse_from([
            "xeil",
            "--zoom",
            "75",
            "--log-level",
            "warn",
            "--config",
            "/tmp/xeil",
            "--travel-seed",
            "12",
        ]);
        assert_eq!(args.zoom, Some(75.0));
        assert_eq!(args.log_level.as_deref(), Some("warn"));
        assert_eq!(args.config, Some(PathBuf::from("/tmp/xeil")));
        assert_eq!(args.travel_seed, Some(12));
        assert_eq!(args.scan_duration_ms, None);
    }
}
