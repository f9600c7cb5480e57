//! Seeded 32-bit pseudo-random stream.
//!
//! A small multiply-xorshift generator. It is fast and well mixed but not
//! cryptographic. Every generator in this crate draws from it in a fixed
//! order, so adding, removing or reordering a single draw changes every value
//! that follows it.

/// Increment applied to the state before every draw.
const GOLDEN_STEP: u32 = 0x6D2B_79F5;

/// `2^32` as a float, used to map a `u32` draw into `[0, 1)`.
const U32_RANGE: f64 = 4_294_967_296.0;

/// Deterministic pseudo-random stream seeded from a `u32`.
///
/// Two streams built from the same seed yield the same sequence forever.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Create a stream from a seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next raw 32-bit draw.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(GOLDEN_STEP);
        let t = self.state;
        let mut t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t >> 13;
        t
    }

    /// Next draw in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / U32_RANGE
    }

    /// Uniform draw in `[lo, hi)`.
    #[inline]
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Uniform index in `[0, n)`, computed as `floor(next_f64() * n)`.
    #[inline]
    pub fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize
    }

    /// True when the next draw exceeds `threshold`.
    #[inline]
    pub fn chance(&mut self, threshold: f64) -> bool {
        self.next_f64() > threshold
    }

    /// Pick an element of a non-empty slice with one draw.
    #[inline]
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }
}

/// Closure form of [`Mulberry32`]: every call yields the next value in `[0, 1)`.
pub fn seeded_stream(seed: u32) -> impl FnMut() -> f64 {
    let mut rng = Mulberry32::new(seed);
    move || rng.next_f64()
}
