//! Chunk streaming around a moving focal point.
//!
//! The [`World`] materialises the 3×3 chunk neighbourhood of the focal point,
//! evicts chunks that drift far behind it, and exposes the stars and planets
//! that lie inside the render distance as the active set. A reserved
//! landmark planet at a fixed position joins the set whenever it is in range.

mod world;

pub use world::{StreamReport, World, in_render_range};
