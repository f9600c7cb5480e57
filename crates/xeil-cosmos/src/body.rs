//! Planets and their moons.
//!
//! Chunk planets and named planets share one entry point,
//! [`generate_planet`]; the two only differ in how the id, stream and
//! position are obtained.

use std::f64::consts::{PI, TAU};

use glam::DVec2;

use crate::constants::{
    CHUNK_SIZE, MAX_MOONS, MOON_ORBIT_SPEED, MOON_SIZE_MAX, MOON_SIZE_MIN, PLANET_SIZE_MAX,
    PLANET_SIZE_MIN, planets_per_chunk,
};
use crate::dossier::{Dossier, generate_dossier, is_reserved_name};
use crate::id::{ChunkCoord, EntityId, PlanetId};
use crate::pattern::{Pattern, generate_pattern};
use crate::rng::Mulberry32;
use crate::seed::{moon_key, string_seed};

/// Extra orbit distance drawn on top of the contact radius.
const ORBIT_JITTER: f64 = 20.0;

/// A moon. Its position is never stored; see [`Moon::position_at`].
#[derive(Clone, Debug, PartialEq)]
pub struct Moon {
    /// Index among the parent's moons.
    pub index: usize,
    /// Seed of the moon's own stream, also used for its dossier.
    pub seed: u32,
    /// Diameter in cells.
    pub size: u32,
    /// Distance from the parent's centre.
    pub orbit_radius: f64,
    /// Orbit angle at time zero, radians.
    pub orbit_phase: f64,
    /// Tilt of the orbit plane, in `[-π/6, π/6)`.
    pub orbit_inclination: f64,
    /// Sprite.
    pub pattern: Pattern,
}

impl Moon {
    /// Position at `time_ms` around a parent at `planet_position`.
    ///
    /// The inclination foreshortens the horizontal axis only.
    pub fn position_at(&self, planet_position: DVec2, time_ms: f64) -> DVec2 {
        let angle = self.orbit_phase + time_ms * MOON_ORBIT_SPEED;
        DVec2::new(
            planet_position.x + self.orbit_radius * angle.cos() * self.orbit_inclination.cos(),
            planet_position.y + self.orbit_radius * angle.sin(),
        )
    }

    /// Dossier of this moon. Moons are always named from the table.
    pub fn dossier(&self) -> Dossier {
        generate_dossier(self.seed, true, None)
    }
}

/// A planet with its moons.
#[derive(Clone, Debug, PartialEq)]
pub struct Planet {
    /// Identity.
    pub id: PlanetId,
    /// Seed of the planet's own stream, also used for its dossier.
    pub seed: u32,
    /// Name as typed, for planets synthesised from a name.
    pub explicit_name: Option<String>,
    /// World position of the centre.
    pub position: DVec2,
    /// Diameter in cells.
    pub size: u32,
    /// Sprite.
    pub pattern: Pattern,
    /// Moons in index order.
    pub moons: Vec<Moon>,
}

impl Planet {
    /// Entity id of the planet itself.
    pub fn entity_id(&self) -> EntityId {
        EntityId::Planet(self.id.clone())
    }

    /// Entity id of the `index`-th moon.
    pub fn moon_entity_id(&self, index: usize) -> EntityId {
        EntityId::Moon(self.id.clone(), index)
    }

    /// Half the diameter.
    pub fn radius(&self) -> f64 {
        f64::from(self.size) / 2.0
    }

    /// Dossier of the planet.
    pub fn dossier(&self) -> Dossier {
        generate_dossier(self.seed, false, self.explicit_name.as_deref())
    }

    /// Cache key identifying the inputs of [`Planet::dossier`].
    pub fn dossier_key(&self) -> (u32, Option<&str>) {
        (self.seed, self.explicit_name.as_deref())
    }

    /// Current position of every moon, by index.
    pub fn moon_positions(&self, time_ms: f64) -> impl Iterator<Item = DVec2> + '_ {
        self.moons
            .iter()
            .map(move |moon| moon.position_at(self.position, time_ms))
    }
}

/// Generate a planet from its own stream, after any position draws.
///
/// Draw order: size, moon coin, moon count (only with moons), the moons
/// from their own streams, then the pattern. Planets with an explicit name
/// always carry moons; the coin is still drawn.
pub fn generate_planet(
    id: PlanetId,
    explicit_name: Option<&str>,
    position: DVec2,
    rng: &mut Mulberry32,
) -> Planet {
    let seed = id.seed();
    let size = PLANET_SIZE_MIN + rng.below((PLANET_SIZE_MAX - PLANET_SIZE_MIN) as usize) as u32;

    let has_moons = rng.chance(0.5) || explicit_name.is_some();
    let moons = if has_moons {
        let count = 1 + rng.below(MAX_MOONS as usize);
        let reserved_parent = explicit_name.filter(|name| is_reserved_name(name));
        (0..count)
            .map(|index| generate_moon(seed, index, size, reserved_parent))
            .collect()
    } else {
        Vec::new()
    };

    let pattern = generate_pattern(size, false, explicit_name, rng);

    Planet {
        id,
        seed,
        explicit_name: explicit_name.map(|name| name.trim().to_string()),
        position,
        size,
        pattern,
        moons,
    }
}

fn generate_moon(
    planet_seed: u32,
    index: usize,
    planet_size: u32,
    parent_name: Option<&str>,
) -> Moon {
    let seed = string_seed(&moon_key(planet_seed, index));
    let mut rng = Mulberry32::new(seed);

    let size = MOON_SIZE_MIN + rng.below((MOON_SIZE_MAX - MOON_SIZE_MIN) as usize) as u32;
    let orbit_radius =
        f64::from(planet_size) / 2.0 + f64::from(size) + rng.next_f64() * ORBIT_JITTER;
    let orbit_phase = rng.next_f64() * TAU;
    let orbit_inclination = (rng.next_f64() - 0.5) * PI / 3.0;
    let pattern = generate_pattern(size, true, parent_name, &mut rng);

    Moon {
        index,
        seed,
        size,
        orbit_radius,
        orbit_phase,
        orbit_inclination,
        pattern,
    }
}

/// Synthesise the planet named `name` at `position`.
///
/// The id and seed come from the normalised name, so case and surrounding
/// space do not matter; the display name keeps the typed case.
pub fn generate_named_planet(name: &str, position: DVec2) -> Planet {
    let id = PlanetId::named(name);
    let mut rng = Mulberry32::new(id.seed());
    generate_planet(id, Some(name), position, &mut rng)
}

/// All planets of a chunk, in index order.
pub fn generate_chunk_planets(chunk: ChunkCoord) -> Vec<Planet> {
    let origin = chunk.origin();
    (0..planets_per_chunk())
        .map(|index| {
            let id = PlanetId::Chunk { chunk, index };
            let mut rng = Mulberry32::new(id.seed());
            let x = origin.x + rng.next_f64() * CHUNK_SIZE;
            let y = origin.y + rng.next_f64() * CHUNK_SIZE;
            generate_planet(id, None, DVec2::new(x, y), &mut rng)
        })
        .collect()
}
