//! Core graph data structures and structural operations.

use pn_core::{EdgeId, Id, Position, Real, VertexId};
use tracing::debug;

use crate::error::{GraphError, GraphResult};

/// A base station on the map.
///
/// The incident list keeps insertion order; breadth-first searches expand
/// edges in that order.
#[derive(Debug, Clone)]
pub struct Vertex {
    pub id: VertexId,
    pub position: Position,
    pub(crate) incident: Vec<EdgeId>,
}

impl Vertex {
    /// Edges touching this vertex, oldest first.
    pub fn incident(&self) -> &[EdgeId] {
        &self.incident
    }

    pub fn degree(&self) -> usize {
        self.incident.len()
    }

    /// Structural equality: both vertices sit at exactly the same position.
    pub fn same_position(&self, other: &Vertex) -> bool {
        self.position == other.position
    }
}

/// An undirected link between two vertices.
///
/// Equality ignores the id and the orientation: `(u, v)` equals `(v, u)`.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub id: EdgeId,
    pub u: VertexId,
    pub v: VertexId,
}

impl Edge {
    pub fn endpoints(&self) -> (VertexId, VertexId) {
        (self.u, self.v)
    }

    /// Whether this edge joins `a` and `b`, in either order.
    pub fn connects(&self, a: VertexId, b: VertexId) -> bool {
        (self.u == a && self.v == b) || (self.u == b && self.v == a)
    }

    /// The endpoint that is not `v`, or `None` if `v` is not on this edge.
    pub fn opposite(&self, v: VertexId) -> Option<VertexId> {
        if v == self.u {
            Some(self.v)
        } else if v == self.v {
            Some(self.u)
        } else {
            None
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.connects(other.u, other.v)
    }
}

impl Eq for Edge {}

/// The station graph.
///
/// Vertices and edges live in two arenas indexed by their ids. Removal leaves
/// a tombstone so ids stay stable and are never handed out twice. Each vertex
/// lists the ids of its incident edges; an edge is shared by both endpoints
/// and owned by neither.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub(crate) vertices: Vec<Option<Vertex>>,
    pub(crate) edges: Vec<Option<Edge>>,
    live_vertices: usize,
    live_edges: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices currently in the graph.
    pub fn vertex_count(&self) -> usize {
        self.live_vertices
    }

    /// Number of edges currently in the graph.
    pub fn edge_count(&self) -> usize {
        self.live_edges
    }

    pub fn is_empty(&self) -> bool {
        self.live_vertices == 0
    }

    /// Iterate over live vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertices.iter().flatten()
    }

    /// Iterate over live edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().flatten()
    }

    /// Get a vertex by ID (returns None if unknown or removed).
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.slot()).and_then(Option::as_ref)
    }

    /// Get an edge by ID (returns None if unknown or removed).
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.slot()).and_then(Option::as_ref)
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertex(id).is_some()
    }

    /// Position of a vertex.
    pub fn position(&self, id: VertexId) -> GraphResult<Position> {
        self.require_vertex(id).map(|v| v.position)
    }

    /// Edge ids incident to a vertex (empty for an unknown vertex).
    pub fn incident_edges(&self, id: VertexId) -> &[EdgeId] {
        self.vertex(id).map(Vertex::incident).unwrap_or(&[])
    }

    /// Vertices one hop away from `id`, in incident-edge order.
    pub fn neighbors(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.incident_edges(id)
            .iter()
            .filter_map(move |&e| self.opposite(e, id))
    }

    /// The edge joining `u` and `v`, found by scanning `u`'s incident edges.
    pub fn edge_between(&self, u: VertexId, v: VertexId) -> Option<EdgeId> {
        self.incident_edges(u)
            .iter()
            .copied()
            .find(|&e| self.edge(e).is_some_and(|edge| edge.connects(u, v)))
    }

    /// Insert a vertex at `(x, y)` and return its id.
    ///
    /// No deduplication happens: several vertices may share a position.
    pub fn insert_vertex(&mut self, x: Real, y: Real) -> GraphResult<VertexId> {
        let position = Position::new(x, y)?;
        let id = next_id(self.vertices.len(), "vertex")?;
        self.vertices.push(Some(Vertex {
            id,
            position,
            incident: Vec::new(),
        }));
        self.live_vertices += 1;
        debug!(vertex = %id, %position, "inserted vertex");
        Ok(id)
    }

    /// Link `u` and `v` with a new undirected edge.
    ///
    /// Fails without touching either vertex if an endpoint is missing or if
    /// the pair is already linked (in either order).
    pub fn insert_edge(&mut self, u: VertexId, v: VertexId) -> GraphResult<EdgeId> {
        self.require_vertex(u)?;
        self.require_vertex(v)?;
        if self.edge_between(u, v).is_some() {
            return Err(GraphError::DuplicateEdge { u, v });
        }

        let id = next_id(self.edges.len(), "edge")?;
        self.edges.push(Some(Edge { id, u, v }));
        self.live_edges += 1;

        self.vertex_mut(u)?.incident.push(id);
        if u != v {
            self.vertex_mut(v)?.incident.push(id);
        }
        debug!(edge = %id, %u, %v, "inserted edge");
        Ok(id)
    }

    /// Remove a vertex and every edge incident to it.
    ///
    /// Each removed edge is also unlinked from the opposite endpoint.
    pub fn remove_vertex(&mut self, id: VertexId) -> GraphResult<Vertex> {
        let vertex = self
            .vertices
            .get_mut(id.slot())
            .and_then(Option::take)
            .ok_or(GraphError::VertexNotFound(id))?;
        self.live_vertices -= 1;

        for &e in vertex.incident.iter().rev() {
            let Some(edge) = self.edges.get_mut(e.slot()).and_then(Option::take) else {
                continue;
            };
            self.live_edges -= 1;
            if let Some(other) = edge.opposite(id).filter(|&o| o != id) {
                self.unlink(other, e);
            }
        }
        debug!(vertex = %id, edges = vertex.incident.len(), "removed vertex");
        Ok(vertex)
    }

    /// Remove a single edge, unlinking it from both endpoints.
    pub fn remove_edge(&mut self, id: EdgeId) -> GraphResult<Edge> {
        let edge = self
            .edges
            .get_mut(id.slot())
            .and_then(Option::take)
            .ok_or(GraphError::EdgeNotFound(id))?;
        self.live_edges -= 1;

        self.unlink(edge.u, id);
        if edge.v != edge.u {
            self.unlink(edge.v, id);
        }
        debug!(edge = %id, u = %edge.u, v = %edge.v, "removed edge");
        Ok(edge)
    }

    /// Euclidean distance between two vertices.
    pub fn distance(&self, u: VertexId, v: VertexId) -> GraphResult<Real> {
        let a = self.position(u)?;
        let b = self.position(v)?;
        Ok(a.distance(&b))
    }

    /// The vertex at the other end of `e` from `v`.
    ///
    /// Returns `None` if `e` is unknown or `v` is not one of its endpoints.
    pub fn opposite(&self, e: EdgeId, v: VertexId) -> Option<VertexId> {
        self.edge(e)?.opposite(v)
    }

    /// Move a vertex to `(x, y)` unless a vertex already sits exactly there.
    ///
    /// Returns `Ok(false)` when the target is occupied. This includes the
    /// vertex's own current position.
    pub fn move_vertex(&mut self, id: VertexId, x: Real, y: Real) -> GraphResult<bool> {
        self.require_vertex(id)?;
        let target = Position::new(x, y)?;

        if self.vertices().any(|v| v.position == target) {
            debug!(vertex = %id, %target, "move rejected: position occupied");
            return Ok(false);
        }

        self.vertex_mut(id)?.position = target;
        debug!(vertex = %id, %target, "moved vertex");
        Ok(true)
    }

    /// Check the adjacency invariants between the vertex and edge arenas.
    pub fn check_consistency(&self) -> GraphResult<()> {
        crate::validate::check_consistency(self)
    }

    pub(crate) fn require_vertex(&self, id: VertexId) -> GraphResult<&Vertex> {
        self.vertex(id).ok_or(GraphError::VertexNotFound(id))
    }

    fn vertex_mut(&mut self, id: VertexId) -> GraphResult<&mut Vertex> {
        self.vertices
            .get_mut(id.slot())
            .and_then(Option::as_mut)
            .ok_or(GraphError::VertexNotFound(id))
    }

    fn unlink(&mut self, vertex: VertexId, edge: EdgeId) {
        if let Ok(v) = self.vertex_mut(vertex) {
            v.incident.retain(|&e| e != edge);
        }
    }
}

/// Id for the next arena slot. Ids are never reused, so this only fails
/// after about four billion insertions.
fn next_id(len: usize, what: &'static str) -> GraphResult<Id> {
    Id::try_from_index(len).ok_or(GraphError::CapacityExceeded { what })
}
