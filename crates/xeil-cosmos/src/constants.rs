//! Fixed generation constants.
//!
//! These are deliberately not configurable: chunk generation must remain a
//! pure function of the chunk coordinate, so changing any of them changes
//! the universe.

use glam::DVec2;

/// Side length of a square world chunk, in world units.
pub const CHUNK_SIZE: f64 = 1000.0;

/// Stars per unit of area.
pub const STAR_DENSITY: f64 = 0.005;

/// Planets per unit of area.
pub const PLANET_DENSITY: f64 = 0.000_04;

/// Entities farther than this from the focal point on either axis are culled.
pub const RENDER_DISTANCE: f64 = CHUNK_SIZE * 2.0;

/// Largest absolute world coordinate a trip may target. Beyond it a cruise
/// step is lost to rounding and the chunk grid runs out.
pub const MAX_COORDINATE: f64 = 1e12;

/// Name of the planet that always sits at [`RESERVED_LANDMARK_POSITION`].
pub const RESERVED_LANDMARK_NAME: &str = "Ollivia";

/// Fixed world position of the reserved planet.
pub const RESERVED_LANDMARK_POSITION: DVec2 = DVec2::new(1000.0, 69.0);

/// Smallest planet diameter in character cells.
pub const PLANET_SIZE_MIN: u32 = 15;

/// Planet sizes are drawn from `[PLANET_SIZE_MIN, PLANET_SIZE_MAX)`.
pub const PLANET_SIZE_MAX: u32 = 22;

/// Smallest moon diameter in character cells.
pub const MOON_SIZE_MIN: u32 = 2;

/// Moon sizes are drawn from `[MOON_SIZE_MIN, MOON_SIZE_MAX)`.
pub const MOON_SIZE_MAX: u32 = 10;

/// Upper bound on the number of moons orbiting a planet.
pub const MAX_MOONS: u32 = 6;

/// Moon angular speed in radians per millisecond of wall-clock time.
pub const MOON_ORBIT_SPEED: f64 = 0.0005;

/// Number of stars generated per chunk.
pub fn stars_per_chunk() -> usize {
    (CHUNK_SIZE * CHUNK_SIZE * STAR_DENSITY).floor() as usize
}

/// Number of planets generated per chunk.
pub fn planets_per_chunk() -> usize {
    (CHUNK_SIZE * CHUNK_SIZE * PLANET_DENSITY).floor() as usize
}
