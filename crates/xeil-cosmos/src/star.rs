//! Background stars.

use std::f64::consts::TAU;

use glam::DVec2;

use crate::body::Planet;
use crate::constants::{CHUNK_SIZE, stars_per_chunk};
use crate::id::ChunkCoord;
use crate::rng::Mulberry32;
use crate::seed::{halo_key, string_seed};

/// Number of stars scattered around a named planet.
pub const HALO_STARS: usize = 50;

const BLINK_PERIOD_MIN_MS: f64 = 2000.0;
const BLINK_PERIOD_SPAN_MS: f64 = 5000.0;

/// A single blinking star.
///
/// Everything but the blink schedule is fixed at generation time.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub position: DVec2,
    /// `'.'` or `'*'`.
    pub glyph: char,
    /// 1 (faint) to 4 (bright).
    pub brightness: u8,
    pub blink_period_ms: f64,
    /// Wall-clock time of the next visibility toggle.
    pub next_blink_ms: f64,
    pub visible: bool,
}

impl Star {
    /// Draw opacity in `(0, 1)`.
    pub fn opacity(&self) -> f32 {
        f32::from(self.brightness) / 5.0
    }

    /// Toggle visibility if the scheduled blink has passed. Returns true on
    /// a toggle.
    pub fn update_blink(&mut self, now_ms: f64) -> bool {
        if now_ms > self.next_blink_ms {
            self.visible = !self.visible;
            self.next_blink_ms = now_ms + self.blink_period_ms;
            true
        } else {
            false
        }
    }
}

/// Draws brightness, glyph, period and offset, in that order.
fn draw_star(position: DVec2, epoch_ms: f64, rng: &mut Mulberry32) -> Star {
    let brightness = 1 + rng.below(4) as u8;
    let glyph = if rng.chance(0.5) { '.' } else { '*' };
    let blink_period_ms = rng.next_f64() * BLINK_PERIOD_SPAN_MS + BLINK_PERIOD_MIN_MS;
    let next_blink_ms = epoch_ms + rng.next_f64() * blink_period_ms;
    Star {
        position,
        glyph,
        brightness,
        blink_period_ms,
        next_blink_ms,
        visible: true,
    }
}

/// All stars of a chunk, from the chunk's stream.
///
/// Per star the draws are x, y, then [`draw_star`]. Only the blink schedule
/// depends on `epoch_ms`.
pub fn generate_chunk_stars(chunk: ChunkCoord, epoch_ms: f64) -> Vec<Star> {
    let origin = chunk.origin();
    let mut rng = Mulberry32::new(chunk.seed());
    (0..stars_per_chunk())
        .map(|_| {
            let x = origin.x + rng.next_f64() * CHUNK_SIZE;
            let y = origin.y + rng.next_f64() * CHUNK_SIZE;
            draw_star(DVec2::new(x, y), epoch_ms, &mut rng)
        })
        .collect()
}

/// A ring of [`HALO_STARS`] stars 50 to 150 units around a named planet.
pub fn generate_halo_stars(planet: &Planet, epoch_ms: f64) -> Vec<Star> {
    let mut rng = Mulberry32::new(string_seed(&halo_key(planet.seed)));
    (0..HALO_STARS)
        .map(|_| {
            let angle = rng.next_f64() * TAU;
            let distance = rng.next_f64() * 100.0 + 50.0;
            let position = planet.position + DVec2::new(angle.cos(), angle.sin()) * distance;
            draw_star(position, epoch_ms, &mut rng)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::generate_named_planet;

    #[test]
    fn test_chunk_origin_regenerates_identically() {
        let first = generate_chunk_stars(ChunkCoord::new(0, 0), 0.0);
        let second = generate_chunk_stars(ChunkCoord::new(0, 0), 0.0);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!((a.position, a.glyph), (b.position, b.glyph));
        }
        assert_eq!(first, second);
    }

    #[test]
    fn test_epoch_only_shifts_blink_schedule() {
        let early = generate_chunk_stars(ChunkCoord::new(2, -1), 0.0);
        let late = generate_chunk_stars(ChunkCoord::new(2, -1), 60_000.0);
        for (a, b) in early.iter().zip(&late) {
            assert_eq!(a.position, b.position);
            assert_eq!(a.brightness, b.brightness);
            assert_eq!(a.next_blink_ms + 60_000.0, b.next_blink_ms);
        }
    }

    #[test]
    fn test_star_fields_in_range() {
        let chunk = ChunkCoord::new(-4, 9);
        let stars = generate_chunk_stars(chunk, 100.0);
        assert_eq!(stars.len(), 5000);
        for star in &stars {
            assert_eq!(ChunkCoord::containing(star.position), chunk);
            assert!((1..=4).contains(&star.brightness));
            assert!(matches!(star.glyph, '.' | '*'));
            assert!((2000.0..7000.0).contains(&star.blink_period_ms));
            assert!(star.next_blink_ms >= 100.0);
            assert!(star.next_blink_ms < 100.0 + star.blink_period_ms);
            assert!(star.visible);
        }
    }

    #[test]
    fn test_update_blink_toggles_and_reschedules() {
        let mut star = generate_chunk_stars(ChunkCoord::new(0, 0), 0.0).remove(0);
        let due = star.next_blink_ms;
        assert!(!star.update_blink(due), "blink fires strictly after the due time");
        assert!(star.visible);
        assert!(star.update_blink(due + 1.0));
        assert!(!star.visible);
        assert_eq!(star.next_blink_ms, due + 1.0 + star.blink_period_ms);
    }

    #[test]
    fn test_halo_surrounds_planet() {
        let planet = generate_named_planet("Vega", DVec2::new(-300.0, 40.0));
        let halo = generate_halo_stars(&planet, 0.0);
        assert_eq!(halo.len(), HALO_STARS);
        for star in &halo {
            let d = star.position.distance(planet.position);
            assert!((50.0 - 1e-9..150.0 + 1e-9).contains(&d), "halo star at {d}");
        }
        assert_eq!(halo, generate_halo_stars(&planet, 0.0));
    }
}
