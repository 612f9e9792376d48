//! pic-core: stable foundation for the boundary and moving-window crates.
//!
//! Contains:
//! - geometry (closed geometry/axis/side/slot vocabulary + boundary kinds)
//! - numeric (Real + float checks)
//! - error (shared error types)

pub mod error;
pub mod geometry;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{PicError, PicResult};
pub use geometry::*;
pub use numeric::*;
