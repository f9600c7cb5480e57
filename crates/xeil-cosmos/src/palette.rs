//! Colour tables and blending for body patterns.

use std::fmt;

use crate::rng::Mulberry32;

/// An 8-bit sRGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Pure white.
    pub const WHITE: Self = Self::hex(0xFFFFFF);
    /// Crater grey.
    pub const CRATER: Self = Self::hex(0x888888);
    /// Soft pink.
    pub const PINK: Self = Self::hex(0xFFC0CB);

    /// Build a colour from a packed `0xRRGGBB` value.
    pub const fn hex(packed: u32) -> Self {
        Self {
            r: ((packed >> 16) & 0xFF) as u8,
            g: ((packed >> 8) & 0xFF) as u8,
            b: (packed & 0xFF) as u8,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Blend two colours: `weight` 1.0 yields `a`, 0.0 yields `b`.
pub fn mix(a: Rgb, b: Rgb, weight: f64) -> Rgb {
    let channel = |x: u8, y: u8| {
        (f64::from(x) * weight + f64::from(y) * (1.0 - weight))
            .round()
            .clamp(0.0, 255.0) as u8
    };
    Rgb {
        r: channel(a.r, b.r),
        g: channel(a.g, b.g),
        b: channel(a.b, b.b),
    }
}

#[rustfmt::skip]
const PASTELS: [Rgb; 40] = [
    Rgb::hex(0xFFD1DC), Rgb::hex(0xFFECB8), Rgb::hex(0xB5EAD7), Rgb::hex(0xC7CEEA),
    Rgb::hex(0xE2F0CB), Rgb::hex(0xFFDAC1), Rgb::hex(0xFF9AA2), Rgb::hex(0xFFB7B2),
    Rgb::hex(0xF8B195), Rgb::hex(0xF67280), Rgb::hex(0xC06C84), Rgb::hex(0x6C5B7B),
    Rgb::hex(0x355C7D), Rgb::hex(0xA8E6CE), Rgb::hex(0xDCEDC2), Rgb::hex(0xFFD3B5),
    Rgb::hex(0xFFAAA6), Rgb::hex(0xFF8C94), Rgb::hex(0xF6CD61), Rgb::hex(0x4DD0E1),
    Rgb::hex(0xFFEE58), Rgb::hex(0xFFCA28), Rgb::hex(0xFFA000), Rgb::hex(0xE0BBE4),
    Rgb::hex(0x957DAD), Rgb::hex(0xD291BC), Rgb::hex(0xFDCA40), Rgb::hex(0xF79C81),
    Rgb::hex(0xFC94AF), Rgb::hex(0xBDE0FE), Rgb::hex(0xA2D2FF), Rgb::hex(0xFFEDD8),
    Rgb::hex(0xC3F8FA), Rgb::hex(0xFFFD98), Rgb::hex(0xFFB347), Rgb::hex(0xFFCC99),
    Rgb::hex(0xE6E6FA), Rgb::hex(0xFFE4E1), Rgb::hex(0xF0FFF0), Rgb::hex(0xFFF0F5),
];

#[rustfmt::skip]
const BRIGHTS: [Rgb; 32] = [
    Rgb::hex(0xFF5733), Rgb::hex(0x33FF57), Rgb::hex(0x3357FF), Rgb::hex(0xF3FF33),
    Rgb::hex(0xFF33F3), Rgb::hex(0x33FFF3), Rgb::hex(0x8A2BE2), Rgb::hex(0xFF6347),
    Rgb::hex(0x7CFC00), Rgb::hex(0xFFD700), Rgb::hex(0xFF8C00), Rgb::hex(0x40E0D0),
    Rgb::hex(0xF08080), Rgb::hex(0x90EE90), Rgb::hex(0xFF69B4), Rgb::hex(0x00FFFF),
    Rgb::hex(0xFFA07A), Rgb::hex(0x7B68EE), Rgb::hex(0x00FA9A), Rgb::hex(0xFF4500),
    Rgb::hex(0xDA70D6), Rgb::hex(0x1E90FF), Rgb::hex(0x00BFFF), Rgb::hex(0xFF1493),
    Rgb::hex(0x7FFFD4), Rgb::hex(0xFF7F50), Rgb::hex(0x6495ED), Rgb::hex(0xDC143C),
    Rgb::hex(0x9932CC), Rgb::hex(0x00CED1), Rgb::hex(0xDEB887), Rgb::hex(0x5F9EA0),
];

/// Draw one colour: pastel 80% of the time, bright otherwise. Two draws.
pub fn random_color(rng: &mut Mulberry32) -> Rgb {
    if rng.next_f64() < 0.8 {
        *rng.pick(&PASTELS)
    } else {
        *rng.pick(&BRIGHTS)
    }
}
