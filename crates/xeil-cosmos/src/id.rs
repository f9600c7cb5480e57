//! Chunk coordinates and entity identifiers.

use std::fmt;

use glam::DVec2;

use crate::constants::CHUNK_SIZE;
use crate::seed::{chunk_key, name_key, planet_key, string_seed};

/// Integer coordinate of a square chunk on the infinite plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    /// Chunk-grid X coordinate.
    pub x: i64,
    /// Chunk-grid Y coordinate.
    pub y: i64,
}

impl ChunkCoord {
    /// Creates a chunk coordinate.
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The chunk containing a world position.
    pub fn containing(position: DVec2) -> Self {
        Self {
            x: (position.x / CHUNK_SIZE).floor() as i64,
            y: (position.y / CHUNK_SIZE).floor() as i64,
        }
    }

    /// Returns the chunk offset by `(dx, dy)`, saturating at the edge of
    /// the grid.
    pub fn offset(self, dx: i64, dy: i64) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// World position of the chunk's minimum corner.
    pub fn origin(self) -> DVec2 {
        DVec2::new(self.x as f64 * CHUNK_SIZE, self.y as f64 * CHUNK_SIZE)
    }

    /// Chebyshev (chessboard) distance in chunks.
    pub fn chebyshev_distance(self, other: Self) -> u64 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// The `(2r+1)²` chunks centred on this one, row by row.
    pub fn neighborhood(self, radius: i64) -> impl Iterator<Item = ChunkCoord> {
        (-radius..=radius)
            .flat_map(move |dy| (-radius..=radius).map(move |dx| self.offset(dx, dy)))
    }

    /// Seed of the chunk's star stream.
    pub fn seed(self) -> u32 {
        string_seed(&chunk_key(self.x, self.y))
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Identity of a planet.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlanetId {
    /// The `index`-th planet generated for a chunk.
    Chunk {
        /// Owning chunk.
        chunk: ChunkCoord,
        /// Position in the chunk's planet list.
        index: usize,
    },
    /// A planet synthesised directly from an explicit name. Holds the
    /// normalised (trimmed, lowercased) name.
    Named(String),
}

impl PlanetId {
    /// Id for a planet synthesised from a user-entered name.
    pub fn named(name: &str) -> Self {
        Self::Named(name_key(name))
    }

    /// Seed of the planet's own stream.
    pub fn seed(&self) -> u32 {
        match self {
            Self::Chunk { chunk, index } => string_seed(&planet_key(chunk.x, chunk.y, *index)),
            Self::Named(key) => string_seed(key),
        }
    }
}

impl fmt::Display for PlanetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chunk { chunk, index } => write!(f, "planet-{}-{}-{index}", chunk.x, chunk.y),
            Self::Named(key) => write!(f, "planet-{key}"),
        }
    }
}

/// Identity of any scannable body.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityId {
    /// A planet.
    Planet(PlanetId),
    /// The `index`-th moon of a planet.
    Moon(PlanetId, usize),
}

impl EntityId {
    /// True for moons.
    pub fn is_moon(&self) -> bool {
        matches!(self, Self::Moon(..))
    }

    /// The planet this entity is, or orbits.
    pub fn planet(&self) -> &PlanetId {
        match self {
            Self::Planet(id) | Self::Moon(id, _) => id,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Planet(id) => id.fmt(f),
            Self::Moon(PlanetId::Chunk { chunk, index }, m) => {
                write!(f, "moon-{}-{}-{index}-{m}", chunk.x, chunk.y)
            }
            Self::Moon(PlanetId::Named(key), m) => write!(f, "moon-{key}-{m}"),
        }
    }
}
