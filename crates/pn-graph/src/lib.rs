//! pn-graph: the base-station graph for polarnet.
//!
//! Provides:
//! - An arena-backed undirected graph of positioned stations (Vertex, Edge, Graph)
//! - Radius-bounded breadth-first search with path reconstruction
//! - Derived range queries (emergency range, minimum sufficient radius)
//! - A consistency checker for the adjacency invariants
//!
//! # Example
//!
//! ```
//! use pn_graph::Graph;
//!
//! let mut graph = Graph::new();
//! let a = graph.insert_vertex(0.0, 0.0).unwrap();
//! let b = graph.insert_vertex(3.0, 4.0).unwrap();
//! graph.insert_edge(a, b).unwrap();
//!
//! assert_eq!(graph.distance(a, b).unwrap(), 5.0);
//! assert_eq!(graph.find_path(a, b, 5.0).unwrap(), Some(vec![a, b]));
//! assert_eq!(graph.find_path(a, b, 4.9).unwrap(), None);
//! ```

pub mod error;
pub mod graph;
pub mod query;
pub mod search;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use error::{GraphError, GraphResult};
pub use graph::{Edge, Graph, Vertex};
pub use query::{RadiusEstimate, RefineConfig};
pub use search::Traversal;

pub use pn_core::{EdgeId, Position, Real, VertexId};
