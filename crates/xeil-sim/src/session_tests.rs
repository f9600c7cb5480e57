//! End-to-end sessions: travel, arrival, scanning and determinism.

use super::*;
use crate::clock::ManualClock;
use crate::telemetry::PIXELS_PER_KM;
use xeil_cosmos::{MAX_COORDINATE, RESERVED_LANDMARK_NAME, RESERVED_SPECIES};

const FRAME_MS: f64 = 16.0;

/// Helper: a simulation on a manual clock with a fixed travel seed.
fn seeded_sim(seed: u64) -> (Simulation<ManualClock>, ManualClock) {
    let clock = ManualClock::new(1_000.0);
    let mut config = Config::default();
    config.autopilot.seed = Some(seed);
    (Simulation::with_clock(config, clock.clone()), clock)
}

fn step(sim: &mut Simulation<ManualClock>, clock: &ManualClock) {
    clock.advance(FRAME_MS);
    sim.tick(FRAME_MS);
}

/// Helper: engage the autopilot and tick until it lets go.
fn fly_to(sim: &mut Simulation<ManualClock>, clock: &ManualClock, name: &str) -> AutopilotSession {
    assert!(sim.request_autopilot(name));
    finish_trip(sim, clock)
}

fn finish_trip(sim: &mut Simulation<ManualClock>, clock: &ManualClock) -> AutopilotSession {
    let session = sim.autopilot_session().cloned().unwrap();
    for _ in 0..5_000 {
        step(sim, clock);
        if sim.autopilot_session().is_none() {
            return session;
        }
    }
    panic!("autopilot never arrived at {}", session.target_name);
}

#[test]
fn test_autopilot_arrival_reveals_target() {
    let (mut sim, clock) = seeded_sim(7);
    let session = fly_to(&mut sim, &clock, "Vega");

    // Snapped exactly onto the target, at rest.
    assert_eq!(sim.position(), session.target);
    assert_eq!(sim.velocity(), DVec2::ZERO);
    assert!((session.target.length() - 10_000.0).abs() < 1e-6);

    assert_eq!(
        sim.scan_state(),
        &ScanState::Revealed {
            candidate: PlanetId::named("vega")
        }
    );
    let planet_entity = EntityId::Planet(PlanetId::named("vega"));
    let dossier = sim.entity_dossier(&planet_entity).unwrap();
    assert_eq!(dossier.name, "Vega");
    assert!(!dossier.is_moon);
    assert_eq!(sim.telemetry().total_scans, 1);

    // The frame shows the planet and every moon, all with dossiers.
    let frame = sim.frame();
    let overlay = frame.scan.as_ref().unwrap();
    assert!(overlay.revealed);
    let planet = sim.world().find_planet(&PlanetId::named("vega")).unwrap();
    assert!(!planet.moons.is_empty());
    assert_eq!(overlay.entries.len(), 1 + planet.moons.len());
    assert!(overlay.entries.iter().all(|entry| entry.dossier.is_some()));
    assert_eq!(frame.dossier(&planet_entity), Some(dossier));
    assert_eq!(frame.planets[0].planet.id, PlanetId::named("vega"));
}

#[test]
fn test_arrival_holds_after_more_ticks() {
    let (mut sim, clock) = seeded_sim(7);
    let session = fly_to(&mut sim, &clock, "Vega");
    for _ in 0..200 {
        step(&mut sim, &clock);
    }
    assert_eq!(sim.position(), session.target);
    assert!(sim.scan_state().is_revealed());
    assert_eq!(sim.telemetry().total_scans, 1);
}

#[test]
fn test_motion_resets_scan() {
    let (mut sim, clock) = seeded_sim(3);
    fly_to(&mut sim, &clock, "Altair");
    assert!(sim.scan_state().is_revealed());

    sim.press(Direction::Right);
    step(&mut sim, &clock);
    assert_eq!(sim.scan_state(), &ScanState::Idle);
    assert!(sim.frame().scan.is_none());
}

#[test]
fn test_rescan_after_drifting_to_rest() {
    let (mut sim, clock) = seeded_sim(3);
    fly_to(&mut sim, &clock, "Altair");

    sim.press(Direction::Up);
    for _ in 0..3 {
        step(&mut sim, &clock);
    }
    sim.release(Direction::Up);

    // Coast to a stop, then hold still through a full scan.
    let mut started = false;
    for _ in 0..400 {
        step(&mut sim, &clock);
        if let ScanState::Scanning { candidate, .. } = sim.scan_state() {
            assert_eq!(candidate, &PlanetId::named("altair"));
            started = true;
        }
        if sim.scan_state().is_revealed() {
            break;
        }
    }
    assert!(started);
    assert!(sim.is_stopped());
    assert!(sim.scan_state().is_revealed());
    // Re-scanning a planet does not count twice.
    assert_eq!(sim.telemetry().total_scans, 1);
}

#[test]
fn test_scan_progress_is_partial_mid_scan() {
    let (mut sim, clock) = seeded_sim(3);
    fly_to(&mut sim, &clock, "Altair");
    sim.press(Direction::Left);
    step(&mut sim, &clock);
    sim.release(Direction::Left);

    for _ in 0..400 {
        step(&mut sim, &clock);
        if let ScanState::Scanning { elapsed_ms, .. } = sim.scan_state()
            && *elapsed_ms > 0.0
        {
            let frame = sim.frame();
            let overlay = frame.scan.as_ref().unwrap();
            assert!(!overlay.revealed);
            assert!(overlay.entries.iter().all(|entry| entry.dossier.is_none()));
            let progress = overlay.entries[0].progress;
            assert!(progress > 0.0 && progress < 1.0);
            return;
        }
    }
    panic!("scan never progressed");
}

#[test]
fn test_same_seed_same_session() {
    let (mut a, clock_a) = seeded_sim(42);
    let (mut b, clock_b) = seeded_sim(42);
    a.request_autopilot("Deneb");
    b.request_autopilot("Deneb");
    assert_eq!(a.autopilot_session(), b.autopilot_session());
    assert_eq!(a.position(), b.position());

    for _ in 0..50 {
        step(&mut a, &clock_a);
        step(&mut b, &clock_b);
    }
    assert_eq!(a.position(), b.position());

    let ids = |sim: &Simulation<ManualClock>| -> Vec<PlanetId> {
        let mut ids: Vec<_> = sim.world().planets().map(|p| p.id.clone()).collect();
        ids.sort();
        ids
    };
    assert_eq!(ids(&a), ids(&b));
}

#[test]
fn test_reserved_name_has_fixed_life() {
    let (mut sim, clock) = seeded_sim(9);
    fly_to(&mut sim, &clock, "  OLLIVIA ");

    let dossier = sim
        .entity_dossier(&EntityId::Planet(PlanetId::named("ollivia")))
        .unwrap();
    assert_eq!(dossier.name, "OLLIVIA");
    assert!(dossier.has_life);
    assert!(dossier.population >= 100_000_000);
    assert_eq!(dossier.species.as_deref(), Some(RESERVED_SPECIES));
    assert!((15..=25).contains(&dossier.temperature_c));
}

#[test]
fn test_autopilot_replaces_previous_trip() {
    let (mut sim, clock) = seeded_sim(5);
    sim.request_autopilot("Vega");
    step(&mut sim, &clock);
    sim.request_autopilot("Rigel");

    let session = sim.autopilot_session().unwrap();
    assert_eq!(session.target_name, "Rigel");
    assert!(sim.world().find_planet(&PlanetId::named("vega")).is_none());
    assert!(sim.world().find_planet(&PlanetId::named("rigel")).is_some());
}

#[test]
fn test_arrival_outside_active_set_reveals_nothing() {
    // Approach points up to four chunks out: the target is culled before
    // the autopilot reaches it.
    let clock = ManualClock::new(1_000.0);
    let mut config = Config::default();
    config.autopilot.seed = Some(7);
    config.autopilot.approach_scatter = 8.0;
    config.autopilot.speed_multiplier = 50.0;
    let mut sim = Simulation::with_clock(config, clock.clone());

    let mut culled = false;
    for attempt in 0..20 {
        assert!(sim.request_autopilot(&format!("Far-{attempt}")));
        let session = sim.autopilot_session().cloned().unwrap();
        step(&mut sim, &clock);
        if sim.world().find_planet(&session.target_id).is_none() {
            culled = true;
            finish_trip(&mut sim, &clock);
            assert_eq!(sim.position(), session.target);
            // Nothing is revealed. A chunk planet nearby may start a fresh scan.
            assert!(!sim.scan_state().is_revealed());
            assert_ne!(sim.scan_state().candidate(), Some(&session.target_id));
            assert!(
                sim.entity_dossier(&EntityId::Planet(session.target_id.clone()))
                    .is_none()
            );
            assert_eq!(sim.telemetry().total_scans, 0);
            break;
        }
    }
    assert!(culled, "no approach point left the target out of range");
}

#[test]
fn test_key_press_cancels_trip_in_place() {
    let (mut sim, clock) = seeded_sim(4);
    sim.request_autopilot("Vega");
    for _ in 0..5 {
        step(&mut sim, &clock);
    }
    let position = sim.position();
    assert!(sim.press_key("w"));
    assert!(sim.autopilot_session().is_none());
    assert_eq!(sim.position(), position);
    assert_eq!(sim.velocity(), DVec2::ZERO);

    // Manual thrust takes over from rest.
    step(&mut sim, &clock);
    assert!(sim.position().y < position.y);
    assert_eq!(sim.position().x, position.x);
}

#[test]
fn test_pointer_cancels_trip_in_place() {
    let (mut sim, clock) = seeded_sim(4);
    sim.request_autopilot("Vega");
    for _ in 0..5 {
        step(&mut sim, &clock);
    }
    let position = sim.position();

    // Inside the dead zone: nothing changes.
    assert!(!sim.submit_directional_input(DVec2::new(3.0, 4.0)));
    assert!(sim.autopilot_session().is_some());

    assert!(sim.submit_directional_input(DVec2::new(50.0, 0.0)));
    assert!(sim.autopilot_session().is_none());
    assert_eq!(sim.position(), position);
    assert_eq!(sim.velocity(), DVec2::ZERO);
}

#[test]
fn test_direction_press_cancels_without_snapping() {
    let (mut sim, clock) = seeded_sim(4);
    let session = {
        sim.request_autopilot("Vega");
        sim.autopilot_session().cloned().unwrap()
    };
    step(&mut sim, &clock);
    let position = sim.position();
    sim.press(Direction::Up);
    sim.release(Direction::Up);
    assert!(sim.autopilot_session().is_none());
    assert_eq!(sim.position(), position);
    assert_ne!(sim.position(), session.target);

    // Later ticks do not resume the trip.
    for _ in 0..50 {
        step(&mut sim, &clock);
    }
    assert!(sim.autopilot_session().is_none());
    assert_eq!(sim.position(), position);
}

#[test]
fn test_trip_to_reserved_landmark_reveals_it_once() {
    let (mut sim, clock) = seeded_sim(6);
    let target = xeil_cosmos::RESERVED_LANDMARK_POSITION;
    assert!(sim.request_autopilot_to(target.x, target.y));
    let session = finish_trip(&mut sim, &clock);
    assert_eq!(session.target_name, RESERVED_LANDMARK_NAME);
    assert_eq!(sim.position(), target);
    assert_eq!(sim.world().landmark_count(), 1);

    let dossier = sim
        .entity_dossier(&EntityId::Planet(PlanetId::named(RESERVED_LANDMARK_NAME)))
        .unwrap();
    assert_eq!(dossier.name, RESERVED_LANDMARK_NAME);
    assert_eq!(dossier.species.as_deref(), Some(RESERVED_SPECIES));
}

#[test]
fn test_trip_at_coordinate_bound_arrives() {
    let (mut sim, clock) = seeded_sim(8);
    assert!(sim.request_autopilot_to(MAX_COORDINATE, -MAX_COORDINATE));
    let session = finish_trip(&mut sim, &clock);
    assert_eq!(sim.position(), session.target);
    assert!(sim.scan_state().is_revealed());
}

#[test]
fn test_frame_uses_clock_time() {
    let (mut sim, clock) = seeded_sim(1);
    clock.set(12_345.0);
    let time = sim.tick(FRAME_MS).time_ms;
    assert_eq!(time, 12_345.0);
}

#[test]
fn test_telemetry_tracks_manual_flight() {
    let (mut sim, clock) = seeded_sim(1);
    sim.press(Direction::Right);
    for _ in 0..20 {
        step(&mut sim, &clock);
    }
    let telemetry = sim.telemetry();
    let expected_km = sim.position().x * PIXELS_PER_KM / 1000.0;
    assert!((telemetry.distance_km - expected_km).abs() < 1e-9);
    assert!(telemetry.speed_km_s > 0.0);
    assert_eq!(telemetry.total_scans, 0);
}
