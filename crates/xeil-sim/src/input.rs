//! Directional input state.
//!
//! [`InputState`] holds which directions are currently held (keyboard keys
//! and on-screen touch pads both map to a [`Direction`]) plus an optional
//! pointer vector measured from the screen centre. The presentation layer
//! forwards raw events; the simulation reads the combined thrust each tick.

use glam::DVec2;
use rustc_hash::FxHashSet;

/// Pointer vectors no longer than this are ignored.
pub const POINTER_DEAD_ZONE: f64 = 10.0;

/// One of the four screen directions. Screen Y grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Maps a key or touch-pad name to a direction.
    ///
    /// Accepts `w a s d`, the arrow key names (`ArrowUp` ...) and the pad
    /// names `up down left right`, all case-insensitive.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "w" | "arrowup" | "up" => Some(Self::Up),
            "s" | "arrowdown" | "down" => Some(Self::Down),
            "a" | "arrowleft" | "left" => Some(Self::Left),
            "d" | "arrowright" | "right" => Some(Self::Right),
            _ => None,
        }
    }

    /// Unit vector in world axes.
    pub fn unit(self) -> DVec2 {
        match self {
            Self::Up => DVec2::NEG_Y,
            Self::Down => DVec2::Y,
            Self::Left => DVec2::NEG_X,
            Self::Right => DVec2::X,
        }
    }
}

/// Held directions and the active pointer.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: FxHashSet<Direction>,
    pointer: Option<DVec2>,
}

impl InputState {
    /// Creates an input state with nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a direction as held.
    pub fn press(&mut self, direction: Direction) {
        self.held.insert(direction);
    }

    /// Marks a direction as released.
    pub fn release(&mut self, direction: Direction) {
        self.held.remove(&direction);
    }

    /// Returns `true` while the direction is held.
    pub fn is_held(&self, direction: Direction) -> bool {
        self.held.contains(&direction)
    }

    /// Sets the pointer vector. Returns `false`, and clears the pointer,
    /// when the vector is not finite or falls inside the dead zone.
    pub fn set_pointer(&mut self, vector: DVec2) -> bool {
        if vector.is_finite() && vector.length() > POINTER_DEAD_ZONE {
            self.pointer = Some(vector);
            true
        } else {
            self.pointer = None;
            false
        }
    }

    /// Releases the pointer.
    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    /// Releases everything.
    pub fn clear(&mut self) {
        self.held.clear();
        self.pointer = None;
    }

    /// Returns `true` if any direction or the pointer is engaged.
    pub fn is_active(&self) -> bool {
        !self.held.is_empty() || self.pointer.is_some()
    }

    /// Combined thrust direction, unscaled.
    ///
    /// Each held direction contributes its unit vector and the pointer
    /// contributes its normalised vector, so opposite keys cancel and a
    /// diagonal is faster than a single axis.
    pub fn thrust(&self) -> DVec2 {
        let keys: DVec2 = self.held.iter().map(|d| d.unit()).sum();
        keys + self.pointer.map_or(DVec2::ZERO, DVec2::normalize)
    }
}
