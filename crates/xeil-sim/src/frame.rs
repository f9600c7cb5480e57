//! Per-tick render data handed to the presentation layer.

use glam::DVec2;
use xeil_cosmos::{Dossier, EntityId, Planet, PlanetId, Star};
use xeil_world::StreamReport;

use crate::autopilot::AutopilotSession;
use crate::telemetry::Telemetry;
use crate::trail::TrailMark;

/// A planet and where its moons are right now.
#[derive(Debug, Clone)]
pub struct PlanetView<'a> {
    pub planet: &'a Planet,
    /// Indexed like `planet.moons`.
    pub moon_positions: Vec<DVec2>,
}

/// One body in the scan overlay.
#[derive(Debug, Clone)]
pub struct ScanEntry<'a> {
    pub entity: EntityId,
    pub position: DVec2,
    /// Loading indicator fraction in `[0, 1]`.
    pub progress: f64,
    /// Present once revealed.
    pub dossier: Option<&'a Dossier>,
}

/// The scan overlay: the candidate planet first, then its moons.
#[derive(Debug, Clone)]
pub struct ScanOverlay<'a> {
    pub candidate: PlanetId,
    pub revealed: bool,
    pub entries: Vec<ScanEntry<'a>>,
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    /// Wall-clock time the frame was produced at.
    pub time_ms: f64,
    pub position: DVec2,
    pub velocity: DVec2,
    pub zoom: f64,
    /// Active stars that are currently lit.
    pub stars: Vec<&'a Star>,
    pub planets: Vec<PlanetView<'a>>,
    pub trail: Vec<TrailMark>,
    pub scan: Option<ScanOverlay<'a>>,
    pub autopilot: Option<&'a AutopilotSession>,
    pub telemetry: Telemetry,
    /// Streaming work done by the tick that produced this frame.
    pub stream: StreamReport,
}

impl Frame<'_> {
    /// Dossier shown for `entity` in this frame, if any.
    pub fn dossier(&self, entity: &EntityId) -> Option<&Dossier> {
        self.scan
            .as_ref()?
            .entries
            .iter()
            .find(|entry| &entry.entity == entity)?
            .dossier
    }
}
