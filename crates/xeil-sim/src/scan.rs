//! Proximity scan state machine.
//!
//! ```text
//!          candidate in range            elapsed >= duration
//!   Idle ──────────────────────▶ Scanning ───────────────────▶ Revealed
//!    ▲                              │                             │
//!    └──────────────────────────────┴─────────────────────────────┘
//!        moving, autopilot, or no candidate in range
//! ```
//!
//! A different nearest candidate restarts `Scanning` from zero. Arrival by
//! autopilot jumps straight to `Revealed` through [`ScanTracker::force_reveal`].

use glam::DVec2;
use xeil_cosmos::{Planet, PlanetId};

/// Current scan phase.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ScanState {
    #[default]
    Idle,
    /// Holding still near `candidate` for `elapsed_ms`.
    Scanning { candidate: PlanetId, elapsed_ms: f64 },
    /// The candidate's dossier is on display.
    Revealed { candidate: PlanetId },
}

impl ScanState {
    /// The planet being scanned or shown.
    pub fn candidate(&self) -> Option<&PlanetId> {
        match self {
            Self::Idle => None,
            Self::Scanning { candidate, .. } | Self::Revealed { candidate } => Some(candidate),
        }
    }

    /// Progress in `[0, 1]`: elapsed over duration while scanning, 1 once
    /// revealed, 0 when idle.
    pub fn progress(&self, duration_ms: f64) -> f64 {
        match self {
            Self::Idle => 0.0,
            Self::Scanning { elapsed_ms, .. } if duration_ms > 0.0 => {
                (elapsed_ms / duration_ms).min(1.0)
            }
            Self::Scanning { .. } | Self::Revealed { .. } => 1.0,
        }
    }

    pub fn is_revealed(&self) -> bool {
        matches!(self, Self::Revealed { .. })
    }
}

/// What a scan update changed.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    Unchanged,
    /// A new candidate started scanning, replacing any previous one.
    Started(PlanetId),
    /// The previous candidate was dropped and nothing replaced it.
    Cancelled(PlanetId),
    /// The candidate's scan just completed.
    Revealed(PlanetId),
}

/// Drives [`ScanState`] from the per-tick nearest candidate.
#[derive(Debug, Clone, Default)]
pub struct ScanTracker {
    state: ScanState,
}

impl ScanTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    /// Advances the machine by `dt_ms`.
    ///
    /// `nearest` is the closest scannable planet, or `None` when the focal
    /// point is moving, the autopilot is engaged, or nothing is in range.
    pub fn update(&mut self, nearest: Option<&PlanetId>, dt_ms: f64, duration_ms: f64) -> ScanEvent {
        let Some(nearest) = nearest else {
            return match self.reset() {
                Some(previous) => ScanEvent::Cancelled(previous),
                None => ScanEvent::Unchanged,
            };
        };

        let mut event = ScanEvent::Unchanged;
        if self.state.candidate() != Some(nearest) {
            self.state = ScanState::Scanning {
                candidate: nearest.clone(),
                elapsed_ms: 0.0,
            };
            event = ScanEvent::Started(nearest.clone());
        } else if let ScanState::Scanning { elapsed_ms, .. } = &mut self.state {
            *elapsed_ms += dt_ms;
        }

        if let ScanState::Scanning {
            candidate,
            elapsed_ms,
        } = &self.state
            && *elapsed_ms >= duration_ms
        {
            let candidate = candidate.clone();
            self.state = ScanState::Revealed {
                candidate: candidate.clone(),
            };
            event = ScanEvent::Revealed(candidate);
        }
        event
    }

    /// Jumps to `Revealed` for `candidate`, skipping the delay.
    pub fn force_reveal(&mut self, candidate: PlanetId) {
        self.state = ScanState::Revealed { candidate };
    }

    /// Returns to `Idle`, discarding progress. Returns the dropped candidate.
    pub fn reset(&mut self) -> Option<PlanetId> {
        match std::mem::take(&mut self.state) {
            ScanState::Idle => None,
            ScanState::Scanning { candidate, .. } | ScanState::Revealed { candidate } => {
                Some(candidate)
            }
        }
    }
}

/// The closest planet whose scan reach covers `focal`.
///
/// Reach is `scan_radius` plus the planet's own radius; the boundary itself
/// is out of reach. Ties on distance go to the smaller id.
pub fn nearest_candidate<'a>(
    planets: impl IntoIterator<Item = &'a Planet>,
    focal: DVec2,
    scan_radius: f64,
) -> Option<&'a Planet> {
    planets
        .into_iter()
        .filter_map(|planet| {
            let dist_sq = planet.position.distance_squared(focal);
            let reach = scan_radius + planet.radius();
            (dist_sq < reach * reach).then_some((dist_sq, planet))
        })
        .min_by(|(da, a), (db, b)| da.total_cmp(db).then_with(|| a.id.cmp(&b.id)))
        .map(|(_, planet)| planet)
}
