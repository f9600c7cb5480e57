//! Character-and-colour sprites for planets and moons.
//!
//! A body is rasterised as a disc of its size into a grid of [`Cell`]s.
//! Gas giants get wavy horizontal bands; solid bodies get craters and an
//! altitude shading that peaks at the centre of the disc. Planets may carry
//! a flat ring drawn as an ellipse squashed toward the horizontal midline,
//! in front of the disc on the lower half and behind it on the upper half.
//!
//! Draw order (one body stream, never reordered):
//! 1. gas giant coin (planets only)
//! 2. ring coin and ring tilt (planets only)
//! 3. palette: three colours, skipped for the reserved name
//! 4. crater count, then x, y, radius per crater
//! 5. band phase
//! 6. per-cell glyph noise, row by row

use std::f64::consts::{PI, TAU};

use crate::dossier::is_reserved_name;
use crate::palette::{Rgb, mix, random_color};
use crate::rng::Mulberry32;

const GAS_GLYPHS: [char; 11] = ['@', '#', '-', '•', '+', '=', '8', '~', '.', ':', 'o'];

const RING_INNER: f64 = 1.15;
const RING_OUTER: f64 = 1.6;
const RING_EXTENT: f64 = 1.7;

/// One character cell of a sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Glyph to draw; `' '` for transparent cells.
    pub glyph: char,
    /// Foreground colour; `None` for transparent cells.
    pub color: Option<Rgb>,
}

impl Cell {
    /// A transparent cell.
    pub const BLANK: Self = Self {
        glyph: ' ',
        color: None,
    };

    fn new(glyph: char, color: Rgb) -> Self {
        Self {
            glyph,
            color: Some(color),
        }
    }

    /// True for cells that draw nothing.
    pub fn is_blank(&self) -> bool {
        self.color.is_none()
    }
}

/// A rectangular grid of cells, row-major, centred on the body.
#[derive(Clone, Debug, PartialEq)]
pub struct Pattern {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    gas_giant: bool,
    ringed: bool,
}

impl Pattern {
    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Glyph-only text rows, handy for logging and tests.
    pub fn lines(&self) -> Vec<String> {
        self.rows()
            .map(|row| row.iter().map(|c| c.glyph).collect())
            .collect()
    }

    /// Number of non-transparent cells.
    pub fn filled_cells(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_blank()).count()
    }

    /// Whether the body was drawn as a gas giant.
    pub fn is_gas_giant(&self) -> bool {
        self.gas_giant
    }

    /// Whether the body carries a ring.
    pub fn has_rings(&self) -> bool {
        self.ringed
    }
}

struct Palette {
    base: Rgb,
    secondary: Rgb,
    highlight: Rgb,
}

impl Palette {
    fn reserved() -> Self {
        Self {
            base: Rgb::PINK,
            secondary: Rgb::WHITE,
            highlight: Rgb::WHITE,
        }
    }

    fn random(rng: &mut Mulberry32) -> Self {
        let base = random_color(rng);
        let secondary = random_color(rng);
        let highlight = random_color(rng);
        Self {
            base,
            secondary,
            highlight,
        }
    }
}

struct Crater {
    x: f64,
    y: f64,
    radius: f64,
}

/// Rasterise a body of diameter `size`.
///
/// `explicit_name` only matters for the reserved name, which swaps the drawn
/// palette for a fixed pastel one. Moons never become gas giants and never
/// carry rings.
pub fn generate_pattern(
    size: u32,
    is_moon: bool,
    explicit_name: Option<&str>,
    rng: &mut Mulberry32,
) -> Pattern {
    let size_f = f64::from(size);
    let center = size_f / 2.0;
    let radius_sq = center * center;

    let gas_giant = if is_moon { false } else { rng.chance(0.5) };
    let (ringed, tilt) = if is_moon {
        (false, 1.0)
    } else {
        let ringed = rng.chance(0.7);
        (ringed, rng.range(0.3, 0.6))
    };

    let palette = if explicit_name.is_some_and(is_reserved_name) {
        Palette::reserved()
    } else {
        Palette::random(rng)
    };

    let crater_count = 1 + rng.below(5);
    let craters: Vec<Crater> = (0..crater_count)
        .map(|_| Crater {
            x: rng.next_f64() * size_f - center,
            y: rng.next_f64() * size_f - center,
            radius: rng.next_f64() * (size_f / 4.0) + 1.0,
        })
        .collect();

    let band_phase = rng.next_f64() * TAU;
    let band_freq = PI / (center / 3.0).max(1.0);

    let half = if ringed {
        (center * RING_EXTENT).ceil() as i64
    } else {
        center.ceil() as i64
    };
    let side = (half * 2) as usize;
    let mut cells = Vec::with_capacity(side * side);

    let ring_inner_sq = (center * RING_INNER).powi(2);
    let ring_outer_sq = (center * RING_OUTER).powi(2);

    for y in -half..half {
        for x in -half..half {
            let (xf, yf) = (x as f64, y as f64);
            let dist_sq = xf * xf + yf * yf;

            let on_ring = ringed && {
                let ey = yf / tilt;
                let ring_sq = xf * xf + ey * ey;
                ring_sq > ring_inner_sq && ring_sq < ring_outer_sq
            };

            let cell = if on_ring && y > 0 {
                ring_cell(&palette, rng)
            } else if dist_sq <= radius_sq {
                if gas_giant {
                    let noise = rng.next_f64() * 0.4;
                    let wave = libm::sin(yf * band_freq + band_phase + noise)
                        + 0.3 * libm::sin(xf * 0.5 + band_phase);
                    let color = if wave > 0.6 {
                        palette.highlight
                    } else if wave > -0.2 {
                        palette.secondary
                    } else {
                        palette.base
                    };
                    Cell::new(*rng.pick(&GAS_GLYPHS), color)
                } else if craters.iter().any(|c| {
                    (xf - c.x).powi(2) + (yf - c.y).powi(2) < c.radius * c.radius
                }) {
                    Cell::new(if rng.chance(0.7) { 'o' } else { 'O' }, Rgb::CRATER)
                } else {
                    let altitude = 1.0 - dist_sq / radius_sq + (rng.next_f64() - 0.5) * 0.15;
                    terrain_cell(altitude, &palette, rng)
                }
            } else if on_ring {
                ring_cell(&palette, rng)
            } else {
                Cell::BLANK
            };
            cells.push(cell);
        }
    }

    Pattern {
        width: side,
        height: side,
        cells,
        gas_giant,
        ringed,
    }
}

fn ring_cell(palette: &Palette, rng: &mut Mulberry32) -> Cell {
    Cell::new(if rng.chance(0.6) { ':' } else { '.' }, palette.highlight)
}

/// Altitude tiers: peaks, highlands, midlands, lowlands.
fn terrain_cell(altitude: f64, palette: &Palette, rng: &mut Mulberry32) -> Cell {
    let alt = rng.chance(0.7);
    if altitude > 0.8 {
        Cell::new(
            if alt { '^' } else { '*' },
            mix(palette.highlight, palette.secondary, 0.7),
        )
    } else if altitude > 0.55 {
        Cell::new(
            if alt { '#' } else { '%' },
            mix(palette.secondary, palette.highlight, 0.6),
        )
    } else if altitude > 0.3 {
        Cell::new(
            if alt { '&' } else { '=' },
            mix(palette.secondary, palette.base, 0.5),
        )
    } else {
        Cell::new(
            if alt { '.' } else { '~' },
            mix(palette.base, palette.secondary, 0.8),
        )
    }
}
