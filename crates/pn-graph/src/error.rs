//! Graph-specific error types.

use pn_core::{CoreError, EdgeId, Real, VertexId};
use thiserror::Error;

pub type GraphResult<T> = Result<T, GraphError>;

/// Errors raised by graph mutations and queries.
///
/// Not finding a path within a radius is a normal outcome and is reported as
/// `Ok(None)` by `Graph::find_path`; `NoPath` only comes from queries that
/// require the two stations to be connected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// An edge already joins this unordered pair of vertices.
    #[error("Edge already exists between vertex {u} and vertex {v}")]
    DuplicateEdge { u: VertexId, v: VertexId },

    /// The vertex was never inserted or has been removed.
    #[error("Vertex {0} not found in graph")]
    VertexNotFound(VertexId),

    /// The edge was never inserted or has been removed.
    #[error("Edge {0} not found in graph")]
    EdgeNotFound(EdgeId),

    /// No path connects the two vertices, whatever the radius.
    #[error("No path from vertex {start} to vertex {end}")]
    NoPath { start: VertexId, end: VertexId },

    #[error("Invalid search radius: {0}")]
    InvalidRadius(Real),

    #[error("Invalid configuration: {what}")]
    InvalidConfig { what: &'static str },

    /// The arena has used up the `u32` id space.
    #[error("Cannot allocate another {what} id")]
    CapacityExceeded { what: &'static str },

    /// Adjacency bookkeeping disagrees with the arenas.
    #[error("Graph invariant violated: {what}")]
    BrokenInvariant { what: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}
