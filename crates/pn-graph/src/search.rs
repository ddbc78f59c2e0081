//! Radius-bounded breadth-first search.
//!
//! A station with radio range `radius` can only relay through stations that
//! lie within `radius` of itself in a straight line, however many hops away
//! they are. The search therefore filters candidates by their distance from
//! the start vertex, not by the length of the edge that reaches them.

use std::collections::HashMap;

use pn_core::{Real, VertexId};
use tracing::trace;

use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;

#[derive(Debug, Clone, Copy)]
struct Discovery {
    parent: Option<VertexId>,
    hops: usize,
}

/// Result of a bounded breadth-first search.
///
/// Holds all traversal state (layers, parents, hop counts), so searches never
/// write to the graph and can be run side by side.
#[derive(Debug, Clone)]
pub struct Traversal {
    start: VertexId,
    radius: Real,
    layers: Vec<Vec<VertexId>>,
    discovered: HashMap<VertexId, Discovery>,
}

impl Traversal {
    pub fn start(&self) -> VertexId {
        self.start
    }

    pub fn radius(&self) -> Real {
        self.radius
    }

    /// Layer `k` holds the vertices first discovered `k` hops from the start.
    pub fn layers(&self) -> &[Vec<VertexId>] {
        &self.layers
    }

    /// Whether `v` was reached.
    pub fn contains(&self, v: VertexId) -> bool {
        self.discovered.contains_key(&v)
    }

    /// The vertex `v` was discovered from. `None` for the start vertex and
    /// for vertices that were not reached.
    pub fn parent(&self, v: VertexId) -> Option<VertexId> {
        self.discovered.get(&v).and_then(|d| d.parent)
    }

    /// Hop count from the start, if reached.
    pub fn hops(&self, v: VertexId) -> Option<usize> {
        self.discovered.get(&v).map(|d| d.hops)
    }

    /// All reached vertices in discovery order.
    pub fn reached(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.layers.iter().flatten().copied()
    }

    pub fn reached_count(&self) -> usize {
        self.discovered.len()
    }

    /// Walk parent links back from `end` and return the path from the start.
    pub fn path_to(&self, end: VertexId) -> Option<Vec<VertexId>> {
        if !self.contains(end) {
            return None;
        }
        let mut path = vec![end];
        let mut current = end;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        Some(path)
    }
}

impl Graph {
    /// Breadth-first search from `start`, admitting only vertices whose
    /// straight-line distance from `start` is at most `radius`.
    ///
    /// `radius` may be infinite. The start vertex is always layer 0.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn bounded_bfs(&self, start: VertexId, radius: Real) -> GraphResult<Traversal> {
        if radius.is_nan() {
            return Err(GraphError::InvalidRadius(radius));
        }
        let origin = self.position(start)?;

        let mut discovered = HashMap::new();
        discovered.insert(
            start,
            Discovery {
                parent: None,
                hops: 0,
            },
        );

        let mut layers: Vec<Vec<VertexId>> = Vec::new();
        let mut frontier = vec![start];

        while !frontier.is_empty() {
            let hops = layers.len() + 1;
            let mut next = Vec::new();

            for &u in &frontier {
                for &e in self.incident_edges(u) {
                    let Some(w) = self.opposite(e, u) else {
                        continue;
                    };
                    if discovered.contains_key(&w) {
                        continue;
                    }
                    let Some(vertex) = self.vertex(w) else {
                        continue;
                    };
                    if origin.distance(&vertex.position) > radius {
                        continue;
                    }
                    discovered.insert(
                        w,
                        Discovery {
                            parent: Some(u),
                            hops,
                        },
                    );
                    next.push(w);
                }
            }

            trace!(layer = layers.len(), size = frontier.len(), "bfs layer");
            layers.push(frontier);
            frontier = next;
        }

        Ok(Traversal {
            start,
            radius,
            layers,
            discovered,
        })
    }

    /// Whether `target` is reachable from `start` through vertices within
    /// `radius` of `start`.
    pub fn reachable_within(
        &self,
        start: VertexId,
        target: VertexId,
        radius: Real,
    ) -> GraphResult<bool> {
        self.require_vertex(target)?;
        Ok(self.bounded_bfs(start, radius)?.contains(target))
    }

    /// A path from `start` to `end` (both inclusive) that never leaves the
    /// disc of `radius` around `start`.
    ///
    /// `Ok(None)` means no such path exists, which is an expected answer.
    pub fn find_path(
        &self,
        start: VertexId,
        end: VertexId,
        radius: Real,
    ) -> GraphResult<Option<Vec<VertexId>>> {
        self.require_vertex(end)?;
        Ok(self.bounded_bfs(start, radius)?.path_to(end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A(0,0) - B(1,0) - C(2,0) - D(3,0), plus a detour B - E(1,5) - D.
    fn line() -> (Graph, [VertexId; 5]) {
        let mut g = Graph::new();
        let a = g.insert_vertex(0.0, 0.0).unwrap();
        let b = g.insert_vertex(1.0, 0.0).unwrap();
        let c = g.insert_vertex(2.0, 0.0).unwrap();
        let d = g.insert_vertex(3.0, 0.0).unwrap();
        let e = g.insert_vertex(1.0, 5.0).unwrap();
        g.insert_edge(a, b).unwrap();
        g.insert_edge(b, c).unwrap();
        g.insert_edge(c, d).unwrap();
        g.insert_edge(b, e).unwrap();
        g.insert_edge(e, d).unwrap();
        (g, [a, b, c, d, e])
    }

    #[test]
    fn layers_follow_hop_count() {
        let (g, [a, b, c, d, e]) = line();
        let t = g.bounded_bfs(a, Real::INFINITY).unwrap();
        assert_eq!(t.layers(), &[vec![a], vec![b], vec![c, e], vec![d]]);
        assert_eq!(t.hops(d), Some(3));
        assert_eq!(t.parent(d), Some(c));
        assert_eq!(t.parent(a), None);
        assert_eq!(t.reached_count(), 5);
    }

    #[test]
    fn radius_is_measured_from_start() {
        let (g, [a, b, c, d, e]) = line();
        let t = g.bounded_bfs(a, 2.0).unwrap();
        assert_eq!(t.reached().collect::<Vec<_>>(), vec![a, b, c]);
        assert!(!t.contains(d));
        assert!(!t.contains(e));
    }

    #[test]
    fn radius_boundary_is_inclusive() {
        let (g, [a, _, _, d, _]) = line();
        assert!(g.reachable_within(a, d, 3.0).unwrap());
        assert!(!g.reachable_within(a, d, 2.999).unwrap());
    }

    #[test]
    fn state_does_not_leak_between_searches() {
        let (g, [a, _, _, d, _]) = line();
        let wide = g.bounded_bfs(a, 10.0).unwrap();
        let narrow = g.bounded_bfs(a, 1.0).unwrap();
        assert!(wide.contains(d));
        assert!(!narrow.contains(d));
        assert_eq!(narrow.layers().len(), 2);
    }

    #[test]
    fn path_follows_first_discovery() {
        let (g, [a, b, c, d, _]) = line();
        let path = g.find_path(a, d, Real::INFINITY).unwrap();
        assert_eq!(path, Some(vec![a, b, c, d]));
    }

    #[test]
    fn path_to_self_is_single_vertex() {
        let (g, [_, _, c, _, _]) = line();
        assert_eq!(g.find_path(c, c, 0.0).unwrap(), Some(vec![c]));
        assert_eq!(g.find_path(c, c, -1.0).unwrap(), Some(vec![c]));
    }

    #[test]
    fn disconnected_vertex_has_no_path() {
        let (mut g, [a, _, _, _, _]) = line();
        let island = g.insert_vertex(0.5, 0.5).unwrap();
        assert_eq!(g.find_path(a, island, Real::INFINITY).unwrap(), None);
    }

    #[test]
    fn nan_radius_is_rejected() {
        let (g, [a, _, _, _, _]) = line();
        assert!(matches!(
            g.bounded_bfs(a, Real::NAN),
            Err(GraphError::InvalidRadius(_))
        ));
    }

    #[test]
    fn unknown_endpoints_are_errors() {
        let (g, [a, _, _, _, _]) = line();
        let ghost = VertexId::from_index(99);
        assert_eq!(
            g.find_path(a, ghost, 1.0).unwrap_err(),
            GraphError::VertexNotFound(ghost)
        );
        assert_eq!(
            g.find_path(ghost, a, 1.0).unwrap_err(),
            GraphError::VertexNotFound(ghost)
        );
    }
}
