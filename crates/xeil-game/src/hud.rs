//! Text and JSON readouts of a frame.
//!
//! Shows position, zoom and telemetry, then the scan overlay: progress
//! while scanning, and each body's dossier once revealed.

use serde::Serialize;
use xeil_cosmos::Dossier;
use xeil_sim::{Frame, Telemetry};

/// Serializable snapshot of the HUD.
#[derive(Debug, Serialize)]
pub struct HudReport<'a> {
    pub ticks: u64,
    pub position: [f64; 2],
    pub zoom: f64,
    pub telemetry: Telemetry,
    /// Name of the autopilot target while travelling.
    pub autopilot: Option<&'a str>,
    pub scan: Option<ScanReport<'a>>,
}

/// The scan overlay of a [`HudReport`].
#[derive(Debug, Serialize)]
pub struct ScanReport<'a> {
    pub candidate: String,
    pub progress: f64,
    pub revealed: bool,
    /// Planet first, then its moons. Empty until revealed.
    pub dossiers: Vec<&'a Dossier>,
}

impl<'a> HudReport<'a> {
    pub fn from_frame(frame: &Frame<'a>, ticks: u64) -> Self {
        let scan = frame.scan.as_ref().map(|overlay| ScanReport {
            candidate: overlay.candidate.to_string(),
            progress: overlay
                .entries
                .first()
                .map_or(0.0, |entry| entry.progress),
            revealed: overlay.revealed,
            dossiers: overlay.entries.iter().filter_map(|entry| entry.dossier).collect(),
        });
        Self {
            ticks,
            position: [frame.position.x, frame.position.y],
            zoom: frame.zoom,
            telemetry: frame.telemetry,
            autopilot: frame.autopilot.map(|session| session.target_name.as_str()),
            scan,
        }
    }

    /// Human-readable lines: status first, then one block per dossier.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!(
                "Position: ({:.1}, {:.1})  Zoom: {:.0}",
                self.position[0], self.position[1], self.zoom
            ),
            format!(
                "Distance: {:.2} km  Speed: {:.2} km/s  Scans: {}",
                self.telemetry.distance_km, self.telemetry.speed_km_s, self.telemetry.total_scans
            ),
        ];
        if let Some(target) = self.autopilot {
            lines.push(format!("Autopilot: en route to {target}"));
        }

        let Some(scan) = &self.scan else {
            return lines;
        };
        if !scan.revealed {
            lines.push(format!(
                "Scanning {}: {:.0}%",
                scan.candidate,
                scan.progress * 100.0
            ));
            return lines;
        }

        let moon_count = scan.dossiers.len().saturating_sub(1);
        for dossier in &scan.dossiers {
            lines.push(String::new());
            lines.extend(dossier.lines(moon_count));
        }
        lines
    }
}
