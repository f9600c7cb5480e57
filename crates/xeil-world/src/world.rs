//! Materialised chunks, landmarks and the active set.
//!
//! Chunks own their generated entities. The active set is a view over them:
//! every entity strictly closer than [`RENDER_DISTANCE`] to the focal point on
//! both axes. Eviction works on whole chunks and only touches chunks beyond
//! `EVICT_RADIUS`, whose entities are out of render range anyway, so an
//! evicted chunk that is revisited is regenerated bit for bit.
//!
//! One planet lives outside the grid at a fixed position: the reserved
//! landmark. It joins the landmarks whenever the focal point comes within
//! render distance and is culled like any other landmark.

use glam::DVec2;
use rustc_hash::FxHashMap;
use tracing::debug;
use xeil_cosmos::{
    ChunkCoord, Planet, PlanetId, RENDER_DISTANCE, RESERVED_LANDMARK_NAME,
    RESERVED_LANDMARK_POSITION, Star, generate_chunk_planets, generate_chunk_stars,
    generate_halo_stars, generate_named_planet,
};

/// Chunks within this Chebyshev radius of the focal chunk are materialised.
const LOAD_RADIUS: i64 = 1;

/// Chunks beyond this radius are evicted. At least
/// `RENDER_DISTANCE / CHUNK_SIZE`, so no evicted entity is still in range.
const EVICT_RADIUS: u64 = 2;

/// Result of a single streaming tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StreamReport {
    /// Chunks generated this tick.
    pub materialized: u32,
    /// Chunks dropped this tick.
    pub evicted: u32,
}

impl StreamReport {
    /// True if the tick neither generated nor dropped anything.
    pub fn is_idle(&self) -> bool {
        self.materialized == 0 && self.evicted == 0
    }
}

#[derive(Debug)]
struct ChunkContents {
    stars: Vec<Star>,
    planets: Vec<Planet>,
}

/// True when `position` is strictly inside the render distance of `focal`
/// on both axes.
pub fn in_render_range(position: DVec2, focal: DVec2) -> bool {
    (position.x - focal.x).abs() < RENDER_DISTANCE && (position.y - focal.y).abs() < RENDER_DISTANCE
}

/// The streamed world around the focal point.
#[derive(Debug, Default)]
pub struct World {
    chunks: FxHashMap<ChunkCoord, ChunkContents>,
    /// Planets synthesised from a name, outside any chunk.
    landmarks: Vec<Planet>,
    /// Stars scattered around the landmarks.
    halo: Vec<Star>,
    focal: DVec2,
}

impl World {
    /// Creates an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Focal point of the last tick.
    pub fn focal(&self) -> DVec2 {
        self.focal
    }

    /// Runs one streaming step for a focal point at `focal`.
    ///
    /// 1. Materialises every missing chunk of the focal neighbourhood, with
    ///    star blink schedules starting at `now_ms`.
    /// 2. Evicts chunks beyond `EVICT_RADIUS`.
    /// 3. Drops landmarks and halo stars that left the render distance.
    /// 4. Places the reserved landmark if it came into range and is not
    ///    already held.
    ///
    /// Repeated calls with the focal point in the same chunk do no work.
    pub fn tick(&mut self, focal: DVec2, now_ms: f64) -> StreamReport {
        let mut report = StreamReport::default();
        self.focal = focal;
        let centre = ChunkCoord::containing(focal);

        // --- Step 1: materialise the neighbourhood ---
        for coord in centre.neighborhood(LOAD_RADIUS) {
            if self.chunks.contains_key(&coord) {
                continue;
            }
            let contents = ChunkContents {
                stars: generate_chunk_stars(coord, now_ms),
                planets: generate_chunk_planets(coord),
            };
            debug!(
                "Materialised chunk {coord}: {} stars, {} planets",
                contents.stars.len(),
                contents.planets.len()
            );
            self.chunks.insert(coord, contents);
            report.materialized += 1;
        }

        // --- Step 2: evict distant chunks ---
        let before = self.chunks.len();
        self.chunks.retain(|coord, _| {
            let keep = coord.chebyshev_distance(centre) <= EVICT_RADIUS;
            if !keep {
                debug!("Evicted chunk {coord}");
            }
            keep
        });
        report.evicted = (before - self.chunks.len()) as u32;

        // --- Step 3: cull landmarks ---
        self.landmarks.retain(|planet| in_render_range(planet.position, focal));
        self.halo.retain(|star| in_render_range(star.position, focal));

        // --- Step 4: reserved landmark ---
        if in_render_range(RESERVED_LANDMARK_POSITION, focal) {
            let id = PlanetId::named(RESERVED_LANDMARK_NAME);
            if !self.landmarks.iter().any(|planet| planet.id == id) {
                let planet =
                    generate_named_planet(RESERVED_LANDMARK_NAME, RESERVED_LANDMARK_POSITION);
                self.insert_landmark(planet, now_ms);
            }
        }

        report
    }

    /// Adds a named planet and its star halo outside the chunk grid.
    ///
    /// Halo stars left over from an earlier placement of the same planet are
    /// replaced, not doubled.
    pub fn insert_landmark(&mut self, planet: Planet, now_ms: f64) {
        debug!("Landmark {} placed at {}", planet.id, planet.position);
        let halo = generate_halo_stars(&planet, now_ms);
        self.halo
            .retain(|star| !halo.iter().any(|fresh| fresh.position == star.position));
        self.halo.extend(halo);
        self.landmarks.push(planet);
    }

    /// Forgets every chunk, landmark and halo star.
    pub fn reset(&mut self) {
        debug!(
            "World reset: dropping {} chunks and {} landmarks",
            self.chunks.len(),
            self.landmarks.len()
        );
        self.chunks.clear();
        self.landmarks.clear();
        self.halo.clear();
    }

    /// Toggles the stars in the active set whose blink is due.
    /// Returns the number of toggles.
    pub fn update_blinks(&mut self, now_ms: f64) -> usize {
        let focal = self.focal;
        self.chunks
            .values_mut()
            .flat_map(|chunk| chunk.stars.iter_mut())
            .chain(self.halo.iter_mut())
            .filter(|star| in_render_range(star.position, focal))
            .map(|star| star.update_blink(now_ms))
            .filter(|&toggled| toggled)
            .count()
    }

    /// Stars in the active set.
    pub fn stars(&self) -> impl Iterator<Item = &Star> {
        let focal = self.focal;
        self.chunks
            .values()
            .flat_map(|chunk| chunk.stars.iter())
            .chain(self.halo.iter())
            .filter(move |star| in_render_range(star.position, focal))
    }

    /// Planets in the active set, landmarks first.
    pub fn planets(&self) -> impl Iterator<Item = &Planet> {
        let focal = self.focal;
        self.landmarks
            .iter()
            .chain(self.chunks.values().flat_map(|chunk| chunk.planets.iter()))
            .filter(move |planet| in_render_range(planet.position, focal))
    }

    /// Active planet with the given id.
    pub fn find_planet(&self, id: &PlanetId) -> Option<&Planet> {
        self.planets().find(|planet| &planet.id == id)
    }

    /// Whether a chunk is currently materialised.
    pub fn is_materialized(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    /// Number of materialised chunks.
    pub fn materialized_count(&self) -> usize {
        self.chunks.len()
    }

    /// Number of landmarks still held.
    pub fn landmark_count(&self) -> usize {
        self.landmarks.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use xeil_cosmos::CHUNK_SIZE;

    fn active_counts(world: &World) -> (usize, usize) {
        (world.stars().count(), world.planets().count())
    }

    #[test]
    fn test_first_tick_materialises_neighbourhood() {
        let mut world = World::new();
        let report = world.tick(DVec2::new(500.0, 500.0), 0.0);
        assert_eq!(report.materialized, 9);
        assert_eq!(report.evicted, 0);
        for coord in ChunkCoord::new(0, 0).neighborhood(1) {
            assert!(world.is_materialized(coord), "{coord} missing");
        }
    }

    #[test]
    fn test_materialisation_is_idempotent() {
        let mut world = World::new();
        world.tick(DVec2::new(120.0, 880.0), 0.0);
        let counts = active_counts(&world);

        let report = world.tick(DVec2::new(130.0, 870.0), 16.0);
        assert!(report.is_idle(), "same chunk must not generate: {report:?}");
        let report = world.tick(DVec2::new(120.0, 880.0), 32.0);
        assert!(report.is_idle());
        assert_eq!(world.materialized_count(), 9);
        assert_eq!(active_counts(&world), counts);
    }

    #[test]
    fn test_active_set_respects_render_distance() {
        let mut world = World::new();
        let focal = DVec2::new(1500.0, -700.0);
        world.tick(focal, 0.0);
        assert!(world.stars().count() > 0);
        for star in world.stars() {
            assert!(in_render_range(star.position, focal));
        }
        for planet in world.planets() {
            assert!(in_render_range(planet.position, focal));
        }
    }

    #[test]
    fn test_render_range_boundary() {
        let focal = DVec2::new(2250.5, 0.0);
        // Exactly at the threshold: excluded.
        assert!(!in_render_range(DVec2::new(250.5, 0.0), focal));
        assert!(!in_render_range(DVec2::new(4250.5, 0.0), focal));
        assert!(!in_render_range(DVec2::new(2250.5, 2000.0), focal));
        // Just inside: included.
        assert!(in_render_range(DVec2::new(250.75, 0.0), focal));
        assert!(in_render_range(DVec2::new(4250.25, 1999.75), focal));
    }

    #[test]
    fn test_landmark_culled_at_threshold() {
        let origin = DVec2::new(-50_000.0, 0.0);
        let mut world = World::new();
        world.insert_landmark(generate_named_planet("Vega", origin), 0.0);

        world.tick(origin + DVec2::new(1999.5, 0.0), 0.0);
        assert_eq!(world.landmark_count(), 1);
        assert!(world.find_planet(&PlanetId::named("vega")).is_some());

        world.tick(origin + DVec2::new(2000.0, 0.0), 0.0);
        assert_eq!(world.landmark_count(), 0, "landmark at exactly 2000 must be culled");
        assert!(world.find_planet(&PlanetId::named("vega")).is_none());
    }

    #[test]
    fn test_far_chunks_are_evicted_and_regenerate_identically() {
        let mut world = World::new();
        let home = DVec2::new(500.0, 500.0);
        world.tick(home, 0.0);
        let before: Vec<Planet> = {
            let mut planets: Vec<_> = world.planets().cloned().collect();
            planets.sort_by(|a, b| a.id.cmp(&b.id));
            planets
        };

        let report = world.tick(DVec2::new(500.0 + 10.0 * CHUNK_SIZE, 500.0), 0.0);
        assert_eq!(report.evicted, 9);
        assert!(!world.is_materialized(ChunkCoord::new(0, 0)));

        let report = world.tick(home, 5_000.0);
        assert_eq!(report.materialized, 9);
        let mut after: Vec<_> = world.planets().cloned().collect();
        after.sort_by(|a, b| a.id.cmp(&b.id));
        assert_eq!(before, after);
    }

    #[test]
    fn test_hysteresis_keeps_recent_chunks() {
        let mut world = World::new();
        world.tick(DVec2::new(500.0, 500.0), 0.0);
        // One chunk east: the west column is at distance 2 and stays.
        let report = world.tick(DVec2::new(1500.0, 500.0), 0.0);
        assert_eq!(report.materialized, 3);
        assert_eq!(report.evicted, 0);
        assert!(world.is_materialized(ChunkCoord::new(-1, 0)));
        // Two chunks east: the west column is at distance 3 and goes.
        let report = world.tick(DVec2::new(2500.0, 500.0), 0.0);
        assert_eq!(report.evicted, 3);
        assert!(!world.is_materialized(ChunkCoord::new(-1, 0)));
    }

    #[test]
    fn test_reset_forgets_everything() {
        let mut world = World::new();
        world.tick(DVec2::ZERO, 0.0);
        world.insert_landmark(generate_named_planet("Vega", DVec2::ZERO), 0.0);
        world.reset();
        assert_eq!(world.materialized_count(), 0);
        assert_eq!(world.landmark_count(), 0);
        assert_eq!(world.stars().count(), 0);
        assert_eq!(world.planets().count(), 0);
    }

    #[test]
    fn test_landmark_brings_halo() {
        let focal = DVec2::new(50_000.0, 0.0);
        let mut plain = World::new();
        plain.tick(focal, 0.0);

        let mut world = World::new();
        world.insert_landmark(generate_named_planet("Vega", focal), 0.0);
        world.tick(focal, 0.0);

        assert_eq!(
            world.stars().count(),
            plain.stars().count() + xeil_cosmos::HALO_STARS
        );
        assert_eq!(world.planets().count(), plain.planets().count() + 1);
        let first = world.planets().next().unwrap();
        assert_eq!(first.explicit_name.as_deref(), Some("Vega"));
    }

    fn reserved_id() -> PlanetId {
        PlanetId::named(RESERVED_LANDMARK_NAME)
    }

    #[test]
    fn test_reserved_landmark_appears_once_in_range() {
        let mut world = World::new();
        world.tick(DVec2::new(-900.0, 69.0), 0.0);
        assert_eq!(world.landmark_count(), 1);
        for step in 0..20 {
            world.tick(DVec2::new(-900.0 + 100.0 * step as f64, 69.0), 16.0 * step as f64);
        }
        assert_eq!(world.landmark_count(), 1);

        let planet = world.find_planet(&reserved_id()).unwrap();
        assert_eq!(planet.position, RESERVED_LANDMARK_POSITION);
        assert_eq!(planet.explicit_name.as_deref(), Some(RESERVED_LANDMARK_NAME));
        assert_eq!(world.planets().next().map(|p| &p.id), Some(&reserved_id()));
    }

    #[test]
    fn test_reserved_landmark_culled_at_threshold() {
        let mut world = World::new();
        let inside = RESERVED_LANDMARK_POSITION + DVec2::new(0.0, 1999.5);
        world.tick(inside, 0.0);
        assert!(world.find_planet(&reserved_id()).is_some());

        world.tick(RESERVED_LANDMARK_POSITION + DVec2::new(0.0, 2000.0), 0.0);
        assert_eq!(world.landmark_count(), 0);
        assert!(world.find_planet(&reserved_id()).is_none());

        // Coming back places it again, unchanged.
        world.tick(inside, 500.0);
        assert_eq!(world.landmark_count(), 1);
        let planet = world.find_planet(&reserved_id()).unwrap();
        assert_eq!(
            planet,
            &generate_named_planet(RESERVED_LANDMARK_NAME, RESERVED_LANDMARK_POSITION)
        );
    }

    #[test]
    fn test_reserved_landmark_not_duplicated_by_trip() {
        let mut world = World::new();
        world.insert_landmark(
            generate_named_planet(RESERVED_LANDMARK_NAME, RESERVED_LANDMARK_POSITION),
            0.0,
        );
        world.tick(RESERVED_LANDMARK_POSITION, 0.0);
        assert_eq!(world.landmark_count(), 1);
        assert_eq!(world.stars().count(), {
            let mut plain = World::new();
            plain.tick(RESERVED_LANDMARK_POSITION, 0.0);
            plain.stars().count()
        });
    }

    #[test]
    fn test_reserved_landmark_halo_not_doubled_on_return() {
        let home = RESERVED_LANDMARK_POSITION;
        let mut world = World::new();
        world.tick(home, 0.0);
        // Landmark out of range, part of its halo still in.
        world.tick(home + DVec2::new(2000.0, 0.0), 0.0);
        assert_eq!(world.landmark_count(), 0);
        world.tick(home, 0.0);

        let mut plain = World::new();
        plain.tick(home, 0.0);
        assert_eq!(world.landmark_count(), 1);
        assert_eq!(world.stars().count(), plain.stars().count());
    }

    #[test]
    fn test_reserved_landmark_absent_far_away() {
        let mut world = World::new();
        world.tick(DVec2::new(50_000.0, 0.0), 0.0);
        assert_eq!(world.landmark_count(), 0);
        world.tick(DVec2::new(3000.0, 69.0), 0.0);
        assert_eq!(world.landmark_count(), 0);
    }

    #[test]
    fn test_update_blinks_toggles_due_stars() {
        let mut world = World::new();
        world.tick(DVec2::new(500.0, 500.0), 0.0);
        // Every blink offset lies below the longest period.
        let toggled = world.update_blinks(7_001.0);
        assert_eq!(toggled, world.stars().count());
        assert!(world.stars().all(|s| !s.visible));
        assert_eq!(world.update_blinks(7_002.0), 0);
    }
}
