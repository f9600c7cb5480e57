//! The single-owner simulation state and its tick.
//!
//! One [`Simulation`] owns the focal point, the streamed world, input, the
//! scan and autopilot machines and every cache. Each tick runs, in order:
//!
//! 1. steering (manual thrust or autopilot cruise, or arrival)
//! 2. integration and drag
//! 3. world streaming
//! 4. star blinking
//! 5. trail
//! 6. scanning
//! 7. telemetry
//!
//! and returns a [`Frame`] borrowing from the simulation.

use glam::DVec2;
use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};
use xeil_config::Config;
use xeil_cosmos::{
    Dossier, EntityId, MAX_COORDINATE, PlanetId, RESERVED_LANDMARK_NAME,
    RESERVED_LANDMARK_POSITION, generate_named_planet,
};
use xeil_world::{StreamReport, World};

use crate::autopilot::{Autopilot, AutopilotSession, Steering};
use crate::clock::{Clock, SystemClock};
use crate::dossier_cache::DossierCache;
use crate::frame::{Frame, PlanetView, ScanEntry, ScanOverlay};
use crate::input::{Direction, InputState};
use crate::motion::FocalPoint;
use crate::scan::{ScanEvent, ScanState, ScanTracker, nearest_candidate};
use crate::telemetry::Telemetry;
use crate::trail::Trail;

/// Stars are checked for blinking at most this often.
pub const STAR_BLINK_INTERVAL_MS: f64 = 100.0;

/// The whole game state, advanced by [`Simulation::tick`].
pub struct Simulation<C: Clock = SystemClock> {
    config: Config,
    clock: C,
    world: World,
    focal: FocalPoint,
    zoom: f64,
    input: InputState,
    autopilot: Autopilot,
    scan: ScanTracker,
    dossiers: DossierCache,
    /// Planets that already counted toward `telemetry.total_scans`. Like
    /// `dossiers`, it holds one entry per distinct body revealed this
    /// session and is never pruned.
    scanned: FxHashSet<PlanetId>,
    trail: Trail,
    telemetry: Telemetry,
    blink_timer_ms: f64,
    last_stream: StreamReport,
    ticks: u64,
}

impl Simulation<SystemClock> {
    /// Creates a simulation reading the system clock.
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> Simulation<C> {
    /// Creates a simulation at the origin, at rest, with nothing generated
    /// until the first tick.
    pub fn with_clock(config: Config, clock: C) -> Self {
        let zoom = config.zoom.clamp(config.zoom.initial);
        Self {
            autopilot: Autopilot::new(&config.autopilot),
            trail: Trail::new(&config.trail),
            clock,
            world: World::new(),
            focal: FocalPoint::default(),
            zoom,
            input: InputState::new(),
            scan: ScanTracker::new(),
            dossiers: DossierCache::new(),
            scanned: FxHashSet::default(),
            telemetry: Telemetry::default(),
            blink_timer_ms: 0.0,
            last_stream: StreamReport::default(),
            ticks: 0,
            config,
        }
    }

    // --- Accessors ---

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn position(&self) -> DVec2 {
        self.focal.position
    }

    pub fn velocity(&self) -> DVec2 {
        self.focal.velocity
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn scan_state(&self) -> &ScanState {
        self.scan.state()
    }

    pub fn autopilot_session(&self) -> Option<&AutopilotSession> {
        self.autopilot.session()
    }

    pub fn telemetry(&self) -> Telemetry {
        self.telemetry
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Dossier of a revealed planet or moon.
    pub fn entity_dossier(&self, id: &EntityId) -> Option<&Dossier> {
        self.dossiers.get(id)
    }

    // --- Input ---

    /// Holds the direction bound to `key`. Returns `false` for unbound keys.
    pub fn press_key(&mut self, key: &str) -> bool {
        let Some(direction) = Direction::from_key(key) else {
            return false;
        };
        self.press(direction);
        true
    }

    /// Releases the direction bound to `key`. Returns `false` for unbound keys.
    pub fn release_key(&mut self, key: &str) -> bool {
        let Some(direction) = Direction::from_key(key) else {
            return false;
        };
        self.release(direction);
        true
    }

    /// Holds a direction. Cancels the autopilot.
    pub fn press(&mut self, direction: Direction) {
        self.input.press(direction);
        self.cancel_autopilot("manual input");
    }

    pub fn release(&mut self, direction: Direction) {
        self.input.release(direction);
    }

    /// Steers toward `vector`, measured from the screen centre.
    ///
    /// Vectors inside the dead zone release the pointer and change nothing
    /// else. Others cancel the autopilot. Returns whether the pointer is
    /// engaged.
    pub fn submit_directional_input(&mut self, vector: DVec2) -> bool {
        let engaged = self.input.set_pointer(vector);
        if engaged {
            self.cancel_autopilot("pointer input");
        }
        engaged
    }

    pub fn release_pointer(&mut self) {
        self.input.clear_pointer();
    }

    /// Adjusts the zoom within its limits. Cancels the autopilot.
    pub fn submit_zoom_delta(&mut self, delta: f64) {
        if !delta.is_finite() {
            return;
        }
        self.zoom = self.config.zoom.clamp(self.zoom + delta);
        self.cancel_autopilot("zoom");
    }

    /// Zooms by `steps` notches of `zoom.step`; positive zooms in.
    pub fn submit_zoom_steps(&mut self, steps: i32) {
        self.submit_zoom_delta(f64::from(steps) * self.config.zoom.step);
    }

    // --- Autopilot ---

    /// Travels to the planet named `name`, placed `travel_distance` away on
    /// a random heading. Blank names are ignored and return `false`.
    pub fn request_autopilot(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let target = self.autopilot.pick_destination(self.focal.position);
        self.engage_autopilot(name, target);
        true
    }

    /// Travels to `(x, y)`, where a planet named `coord-{x}-{y}` is placed.
    /// The reserved landmark's position targets the landmark itself.
    ///
    /// Coordinates that are not finite or lie beyond [`MAX_COORDINATE`] on
    /// either axis are ignored and return `false`.
    pub fn request_autopilot_to(&mut self, x: f64, y: f64) -> bool {
        let target = DVec2::new(x, y);
        if !target.is_finite() || target.abs().max_element() > MAX_COORDINATE {
            warn!("Ignoring autopilot target ({x}, {y})");
            return false;
        }
        if target == RESERVED_LANDMARK_POSITION {
            self.engage_autopilot(RESERVED_LANDMARK_NAME, target);
        } else {
            self.engage_autopilot(&format!("coord-{x}-{y}"), target);
        }
        true
    }

    /// Clears the world, synthesises the target, and drops the focal point
    /// near it.
    fn engage_autopilot(&mut self, name: &str, target: DVec2) {
        let now = self.clock.now_ms();
        self.autopilot.cancel();

        self.world.reset();
        let planet = generate_named_planet(name, target);
        let session = AutopilotSession {
            target,
            target_name: name.to_string(),
            target_id: planet.id.clone(),
        };
        self.world.insert_landmark(planet, now);
        self.last_stream = self.world.tick(target, now);

        self.focal = FocalPoint::at(self.autopilot.approach_point(target));
        if let Some(previous) = self.scan.reset() {
            debug!("Scan of {previous} dropped for autopilot");
        }
        self.trail.clear();

        info!(
            "Autopilot engaged: {name} at ({:.0}, {:.0}), starting from ({:.0}, {:.0})",
            target.x, target.y, self.focal.position.x, self.focal.position.y
        );
        self.autopilot.engage(session);
    }

    /// Stops the autopilot in place, if it is running.
    fn cancel_autopilot(&mut self, reason: &str) {
        if let Some(session) = self.autopilot.cancel() {
            self.focal.halt();
            info!("Autopilot to {} cancelled by {reason}", session.target_name);
        }
    }

    /// Snaps onto the target and reveals it without the scan delay.
    fn arrive(&mut self, session: AutopilotSession) {
        self.focal.position = session.target;
        self.focal.halt();
        info!("Autopilot arrived at {}", session.target_name);

        if self.reveal(&session.target_id) {
            self.scan.force_reveal(session.target_id);
        } else {
            warn!("Arrived, but {} is not in the active set", session.target_id);
            self.scan.reset();
        }
    }

    // --- Tick ---

    /// Advances the simulation by `dt_ms`, clamped to `[0, max_step_ms]`.
    pub fn tick(&mut self, dt_ms: f64) -> Frame<'_> {
        let dt = self.clamp_step(dt_ms);
        let now = self.clock.now_ms();

        match self.autopilot.steer(self.focal.position, dt, &self.config.motion) {
            Steering::Manual => {
                let motion = &self.config.motion;
                let accel = motion.player_speed * dt / motion.reference_frame_ms;
                self.focal.velocity += self.input.thrust() * accel;
            }
            Steering::Cruise(velocity) => self.focal.velocity = velocity,
            Steering::Arrived(session) => self.arrive(session),
        }
        let displacement = self.focal.integrate(self.zoom, self.config.motion.drag);

        self.last_stream = self.world.tick(self.focal.position, now);

        self.blink_timer_ms += dt;
        if self.blink_timer_ms > STAR_BLINK_INTERVAL_MS {
            self.blink_timer_ms = 0.0;
            self.world.update_blinks(now);
        }

        self.trail.update(self.focal.position, self.zoom, now);
        self.update_scan(dt);
        self.telemetry
            .record_motion(displacement, self.focal.velocity, self.zoom);
        self.ticks += 1;

        self.frame()
    }

    fn clamp_step(&self, dt_ms: f64) -> f64 {
        let max = self.config.motion.max_step_ms;
        if dt_ms.is_nan() || dt_ms < 0.0 {
            warn!("Ignoring invalid frame delta {dt_ms}");
            0.0
        } else if dt_ms > max {
            warn!("Frame delta {dt_ms:.1}ms exceeds maximum, clamping to {max:.1}ms");
            max
        } else {
            dt_ms
        }
    }

    /// True when nothing is pushing the focal point and it has come to rest.
    pub fn is_stopped(&self) -> bool {
        !self.autopilot.is_active()
            && !self.input.is_active()
            && self.focal.is_stopped(self.config.motion.stop_speed)
    }

    fn update_scan(&mut self, dt: f64) {
        let nearest = if self.is_stopped() {
            nearest_candidate(
                self.world.planets(),
                self.focal.position,
                self.config.scan.radius,
            )
            .map(|planet| planet.id.clone())
        } else {
            None
        };

        match self
            .scan
            .update(nearest.as_ref(), dt, self.config.scan.duration_ms)
        {
            ScanEvent::Unchanged => {}
            ScanEvent::Started(id) => debug!("Scanning {id}"),
            ScanEvent::Cancelled(id) => debug!("Scan of {id} cancelled"),
            ScanEvent::Revealed(id) => {
                if self.reveal(&id) {
                    info!("Scan revealed {id}");
                } else {
                    warn!("Scan finished, but {id} is not in the active set");
                    self.scan.reset();
                }
            }
        }
    }

    /// Caches the dossiers of an active planet and its moons and counts the
    /// scan. Returns `false` if the planet is not active.
    fn reveal(&mut self, id: &PlanetId) -> bool {
        let Some(planet) = self.world.find_planet(id) else {
            return false;
        };
        self.dossiers.reveal(planet);
        if self.scanned.insert(id.clone()) {
            self.telemetry.total_scans += 1;
        }
        true
    }

    // --- Output ---

    /// Render data for the current state.
    pub fn frame(&self) -> Frame<'_> {
        let now = self.clock.now_ms();

        Frame {
            time_ms: now,
            position: self.focal.position,
            velocity: self.focal.velocity,
            zoom: self.zoom,
            stars: self.world.stars().filter(|star| star.visible).collect(),
            planets: self
                .world
                .planets()
                .map(|planet| PlanetView {
                    planet,
                    moon_positions: planet.moon_positions(now).collect(),
                })
                .collect(),
            trail: self.trail.marks(now).collect(),
            scan: self.scan_overlay(now),
            autopilot: self.autopilot.session(),
            telemetry: self.telemetry,
            stream: self.last_stream,
        }
    }

    fn scan_overlay(&self, now: f64) -> Option<ScanOverlay<'_>> {
        let state = self.scan.state();
        let planet = self.world.find_planet(state.candidate()?)?;
        let progress = state.progress(self.config.scan.duration_ms);
        let revealed = state.is_revealed();

        let mut entries = Vec::with_capacity(1 + planet.moons.len());
        entries.push(self.scan_entry(planet.entity_id(), planet.position, progress, revealed));
        for moon in &planet.moons {
            entries.push(self.scan_entry(
                planet.moon_entity_id(moon.index),
                moon.position_at(planet.position, now),
                progress,
                revealed,
            ));
        }

        Some(ScanOverlay {
            candidate: planet.id.clone(),
            revealed,
            entries,
        })
    }

    fn scan_entry(
        &self,
        entity: EntityId,
        position: DVec2,
        progress: f64,
        revealed: bool,
    ) -> ScanEntry<'_> {
        let dossier = if revealed {
            self.dossiers.get(&entity)
        } else {
            None
        };
        ScanEntry {
            entity,
            position,
            progress,
            dossier,
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
