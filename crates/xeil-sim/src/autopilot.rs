//! Fast travel to a named body.
//!
//! Engaging the autopilot is a teleport plus a short cruise: the caller
//! resets the world around the target and places the focal point at
//! [`Autopilot::approach_point`]; every tick [`Autopilot::steer`] then sets
//! the velocity straight at the target until it is within the arrival
//! threshold.
//!
//! The travel RNG only picks headings and approach points. World generation
//! never reads it.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use xeil_config::{AutopilotConfig, MotionConfig};
use xeil_cosmos::{CHUNK_SIZE, PlanetId};

/// An active trip.
#[derive(Debug, Clone, PartialEq)]
pub struct AutopilotSession {
    /// Where the target planet sits.
    pub target: DVec2,
    /// Name the target was synthesised from, as typed.
    pub target_name: String,
    /// Id of the synthesised target planet.
    pub target_id: PlanetId,
}

/// Outcome of one steering step.
#[derive(Debug, Clone, PartialEq)]
pub enum Steering {
    /// Autopilot inactive; manual control applies.
    Manual,
    /// Velocity to use this tick.
    Cruise(DVec2),
    /// The target was reached; the session is over.
    Arrived(AutopilotSession),
}

/// Autopilot controller.
#[derive(Debug, Clone)]
pub struct Autopilot {
    config: AutopilotConfig,
    session: Option<AutopilotSession>,
    rng: ChaCha8Rng,
}

impl Autopilot {
    /// Creates an inactive autopilot. The travel RNG is seeded from
    /// `config.seed`, or from the thread RNG when unset.
    pub fn new(config: &AutopilotConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        Self {
            config: config.clone(),
            session: None,
            rng,
        }
    }

    pub fn config(&self) -> &AutopilotConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&AutopilotSession> {
        self.session.as_ref()
    }

    /// A destination `travel_distance` away from `from` on a random heading.
    pub fn pick_destination(&mut self, from: DVec2) -> DVec2 {
        let angle = self.rng.random::<f64>() * TAU;
        from + DVec2::from_angle(angle) * self.config.travel_distance
    }

    /// A point near `target`, off by up to half the scatter span on each axis.
    pub fn approach_point(&mut self, target: DVec2) -> DVec2 {
        let span = CHUNK_SIZE * self.config.approach_scatter;
        let dx = (self.rng.random::<f64>() - 0.5) * span;
        let dy = (self.rng.random::<f64>() - 0.5) * span;
        target - DVec2::new(dx, dy)
    }

    /// Starts a session, replacing any current one.
    pub fn engage(&mut self, session: AutopilotSession) {
        self.session = Some(session);
    }

    /// Ends the session without arriving.
    pub fn cancel(&mut self) -> Option<AutopilotSession> {
        self.session.take()
    }

    /// One steering step from `position` over `dt_ms`.
    ///
    /// Cruise speed is `player_speed × speed_multiplier` per reference frame,
    /// scaled by `dt_ms`. Arrival is `distance <= arrival_threshold`.
    pub fn steer(&mut self, position: DVec2, dt_ms: f64, motion: &MotionConfig) -> Steering {
        let Some(session) = &self.session else {
            return Steering::Manual;
        };

        let offset = session.target - position;
        let distance = offset.length();
        if distance <= self.config.arrival_threshold {
            return match self.session.take() {
                Some(session) => Steering::Arrived(session),
                None => Steering::Manual,
            };
        }

        let speed = motion.player_speed * self.config.speed_multiplier * dt_ms
            / motion.reference_frame_ms;
        Steering::Cruise(offset / distance * speed)
    }
}
