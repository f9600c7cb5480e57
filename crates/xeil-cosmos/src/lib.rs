//! Deterministic procedural generation of the Xeil universe: a seeded RNG,
//! string-keyed seed derivation, and generators for stars, planets, moons,
//! their character patterns and their scan dossiers.
//!
//! Every generator in this crate is a pure function of its inputs. The same
//! chunk coordinate or explicit name always yields the same bodies, bit for
//! bit, regardless of when or how often it is generated.

mod body;
mod constants;
mod dossier;
mod id;
mod palette;
mod pattern;
mod rng;
mod seed;
mod star;

pub use body::{
    Moon, Planet, generate_chunk_planets, generate_named_planet, generate_planet,
};
pub use constants::*;
pub use dossier::{Dossier, RESERVED_SPECIES, generate_dossier, is_reserved_name};
pub use id::{ChunkCoord, EntityId, PlanetId};
pub use palette::{Rgb, mix, random_color};
pub use pattern::{Cell, Pattern, generate_pattern};
pub use rng::{Mulberry32, seeded_stream};
pub use seed::{chunk_key, halo_key, moon_key, name_key, planet_key, string_seed};
pub use star::{HALO_STARS, Star, generate_chunk_stars, generate_halo_stars};
