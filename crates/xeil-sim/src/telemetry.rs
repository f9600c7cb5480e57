//! Running travel statistics.

use glam::DVec2;
use serde::Serialize;

use crate::motion::zoom_scale;

/// World units per kilometre.
pub const PIXELS_PER_KM: f64 = 10_000.0;

/// Scan count, distance and speed readouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Telemetry {
    /// Planets revealed so far, each counted once.
    pub total_scans: u32,
    /// Distance flown under integration. Teleports are not counted.
    pub distance_km: f64,
    /// Current speed.
    pub speed_km_s: f64,
}

impl Telemetry {
    /// Accounts for one integrated tick.
    pub fn record_motion(&mut self, displacement: DVec2, velocity: DVec2, zoom: f64) {
        self.distance_km += displacement.length() * PIXELS_PER_KM / 1000.0;
        self.speed_km_s = velocity.length() * zoom_scale(zoom) * PIXELS_PER_KM / 1000.0;
    }
}
