//! pn-core: shared foundation for polarnet.
//!
//! Contains:
//! - ids (stable compact IDs for vertices and edges)
//! - numeric (Real + finiteness check)
//! - geometry (planar positions and Euclidean distance)
//! - error (shared error types)

pub mod error;
pub mod geometry;
pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use geometry::Position;
pub use ids::*;
pub use numeric::*;
