//! Seed derivation from semantic string keys.
//!
//! Chunks, planets, moons and user-named bodies are all identified by a
//! string key built with exact interpolation. Hashing that key yields the
//! seed for the body's [`Mulberry32`](crate::Mulberry32) stream, so the same
//! key always reproduces the same body.

/// Stable, order-sensitive 32-bit string hash.
///
/// Rolling `hash * 31 + unit` over the UTF-16 code units with 32-bit
/// wrapping, returning the absolute value of the signed result.
pub fn string_seed(s: &str) -> u32 {
    let hash = s.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    });
    hash.unsigned_abs()
}

/// Key of a chunk: `"{cx},{cy}"`.
pub fn chunk_key(cx: i64, cy: i64) -> String {
    format!("{cx},{cy}")
}

/// Key of the `index`-th planet of a chunk: `"{cx},{cy},{index}"`.
pub fn planet_key(cx: i64, cy: i64, index: usize) -> String {
    format!("{cx},{cy},{index}")
}

/// Key of the `index`-th moon of a planet: `"{planet_seed}-{index}"`.
pub fn moon_key(planet_seed: u32, index: usize) -> String {
    format!("{planet_seed}-{index}")
}

/// Key of the star halo around a named planet: `"{planet_seed}-halo"`.
pub fn halo_key(planet_seed: u32) -> String {
    format!("{planet_seed}-halo")
}

/// Normalised key of a user-entered name: trimmed and lowercased.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}
