//! Adjacency consistency checks.

use std::collections::HashSet;

use pn_core::VertexId;

use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;

fn broken(what: String) -> GraphError {
    GraphError::BrokenInvariant { what }
}

/// Verify that the vertex and edge arenas agree with each other.
pub(crate) fn check_consistency(graph: &Graph) -> GraphResult<()> {
    // Slots must hold the object whose id matches the slot
    for (i, vertex) in graph.vertices.iter().enumerate() {
        if let Some(v) = vertex {
            if v.id.slot() != i {
                return Err(broken(format!("vertex {} stored in slot {}", v.id, i)));
            }
        }
    }
    for (i, edge) in graph.edges.iter().enumerate() {
        if let Some(e) = edge {
            if e.id.slot() != i {
                return Err(broken(format!("edge {} stored in slot {}", e.id, i)));
            }
        }
    }

    // Every edge joins live vertices, appears in both incident lists, and is
    // the only edge for its unordered pair
    let mut pairs: HashSet<(VertexId, VertexId)> = HashSet::new();
    for edge in graph.edges() {
        for end in [edge.u, edge.v] {
            let Some(vertex) = graph.vertex(end) else {
                return Err(broken(format!(
                    "edge {} references missing vertex {}",
                    edge.id, end
                )));
            };
            if !vertex.incident().contains(&edge.id) {
                return Err(broken(format!(
                    "edge {} missing from vertex {}'s incident list",
                    edge.id, end
                )));
            }
        }
        let key = (edge.u.min(edge.v), edge.u.max(edge.v));
        if !pairs.insert(key) {
            return Err(broken(format!(
                "vertices {} and {} are linked twice",
                key.0, key.1
            )));
        }
    }

    // Every incident entry is a live edge touching its vertex, listed once
    let mut listed = 0;
    for vertex in graph.vertices() {
        let mut seen = HashSet::new();
        for &e in vertex.incident() {
            if !seen.insert(e) {
                return Err(broken(format!(
                    "edge {} listed twice on vertex {}",
                    e, vertex.id
                )));
            }
            match graph.edge(e) {
                Some(edge) if edge.opposite(vertex.id).is_some() => {
                    if edge.u != edge.v {
                        listed += 1;
                    } else {
                        listed += 2;
                    }
                }
                Some(_) => {
                    return Err(broken(format!(
                        "vertex {} lists edge {} that does not touch it",
                        vertex.id, e
                    )));
                }
                None => {
                    return Err(broken(format!(
                        "vertex {} lists missing edge {}",
                        vertex.id, e
                    )));
                }
            }
        }
    }

    if graph.vertices().count() != graph.vertex_count() {
        return Err(broken("vertex count out of sync".to_string()));
    }
    if graph.edges().count() != graph.edge_count() || listed != 2 * graph.edge_count() {
        return Err(broken("edge count out of sync".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph_is_consistent() {
        assert!(check_consistency(&Graph::new()).is_ok());
    }

    #[test]
    fn dangling_incident_entry_is_reported() {
        let mut g = Graph::new();
        let a = g.insert_vertex(0.0, 0.0).unwrap();
        let b = g.insert_vertex(1.0, 0.0).unwrap();
        let e = g.insert_edge(a, b).unwrap();
        // Drop the edge from the arena only, leaving both incident lists stale.
        g.edges[e.slot()] = None;
        let err = check_consistency(&g).unwrap_err();
        assert!(matches!(err, GraphError::BrokenInvariant { .. }));
    }

    #[test]
    fn one_sided_link_is_reported() {
        let mut g = Graph::new();
        let a = g.insert_vertex(0.0, 0.0).unwrap();
        let b = g.insert_vertex(1.0, 0.0).unwrap();
        g.insert_edge(a, b).unwrap();
        if let Some(Some(v)) = g.vertices.get_mut(b.slot()) {
            v.incident.clear();
        }
        let err = check_consistency(&g).unwrap_err();
        assert!(err.to_string().contains("incident list"));
    }
}
