//! Integration tests for pn-graph.

use pn_graph::{Graph, GraphError, Real, RefineConfig, VertexId};

const TOL: Real = 1e-3;

fn approx(a: Real, b: Real) -> bool {
    (a - b).abs() <= TOL
}

/// The expedition map used throughout the exercise:
///
/// ```text
///           A
///         / | \
///        B  C  D
///          / \ |
///         E    F
/// ```
struct Expedition {
    graph: Graph,
    a: VertexId,
    b: VertexId,
    c: VertexId,
    d: VertexId,
    e: VertexId,
    f: VertexId,
}

fn expedition() -> Expedition {
    let mut graph = Graph::new();
    let a = graph.insert_vertex(0.0, 0.0).unwrap();
    let b = graph.insert_vertex(2.0, 0.0).unwrap();
    let c = graph.insert_vertex(2.0, 70.0).unwrap();
    let d = graph.insert_vertex(2.0, 99.0).unwrap();
    let e = graph.insert_vertex(3.0, 3.0).unwrap();
    let f = graph.insert_vertex(4.0, 6.0).unwrap();
    graph.insert_edge(a, b).unwrap();
    graph.insert_edge(a, c).unwrap();
    graph.insert_edge(a, d).unwrap();
    graph.insert_edge(c, e).unwrap();
    graph.insert_edge(c, f).unwrap();
    graph.insert_edge(d, f).unwrap();
    Expedition {
        graph,
        a,
        b,
        c,
        d,
        e,
        f,
    }
}

#[test]
fn minimum_range_regression() {
    let x = expedition();
    let estimate = x
        .graph
        .minimum_sufficient_radius_detailed(x.a, x.f, &RefineConfig::default())
        .unwrap();

    // A - C - F is discovered first; nothing beats C's distance from A.
    assert!(approx(estimate.radius, 4904.0_f64.sqrt()));
    assert!(approx(estimate.radius, 70.02857));
    assert_eq!(estimate.path, vec![x.a, x.c, x.f]);
    assert!(estimate.radius >= x.graph.distance(x.a, x.f).unwrap());
}

#[test]
fn minimum_range_after_reshaping_the_map() {
    let Expedition {
        mut graph, a, c, f, ..
    } = expedition();

    assert!(graph.move_vertex(f, 1.0, 1.0).unwrap());
    graph.remove_vertex(c).unwrap();
    graph.insert_edge(a, f).unwrap();

    let radius = graph.minimum_sufficient_radius(a, f).unwrap();
    assert!(approx(radius, 2.0_f64.sqrt()));
    graph.check_consistency().unwrap();
}

#[test]
fn path_respects_radius_and_edges() {
    let x = expedition();
    let radius = 75.0;
    let path = x.graph.find_path(x.a, x.e, radius).unwrap().unwrap();

    assert_eq!(path.first(), Some(&x.a));
    assert_eq!(path.last(), Some(&x.e));
    for pair in path.windows(2) {
        assert!(x.graph.edge_between(pair[0], pair[1]).is_some());
    }
    for &v in &path {
        assert!(x.graph.distance(x.a, v).unwrap() <= radius);
    }
}

#[test]
fn path_within_too_small_radius_is_none() {
    let x = expedition();
    assert_eq!(x.graph.find_path(x.a, x.f, 50.0).unwrap(), None);
    assert!(!x.graph.reachable_within(x.a, x.e, 50.0).unwrap());
    assert!(x.graph.reachable_within(x.a, x.b, 2.0).unwrap());
}

#[test]
fn duplicate_edges_are_undirected() {
    let mut x = expedition();
    assert!(matches!(
        x.graph.insert_edge(x.a, x.b),
        Err(GraphError::DuplicateEdge { .. })
    ));
    assert!(matches!(
        x.graph.insert_edge(x.f, x.d),
        Err(GraphError::DuplicateEdge { .. })
    ));
}

#[test]
fn removing_a_vertex_clears_every_reference() {
    let mut x = expedition();
    x.graph.remove_vertex(x.c).unwrap();

    for vertex in x.graph.vertices() {
        for &e in vertex.incident() {
            let edge = x.graph.edge(e).unwrap();
            assert_ne!(edge.u, x.c);
            assert_ne!(edge.v, x.c);
        }
    }
    assert_eq!(x.graph.edge_count(), 3);
    assert_eq!(
        x.graph.insert_edge(x.a, x.c).unwrap_err(),
        GraphError::VertexNotFound(x.c)
    );
    x.graph.check_consistency().unwrap();
}

#[test]
fn emergency_range_spans_the_whole_map() {
    let x = expedition();
    let expected = x.graph.distance(x.a, x.d).unwrap();
    assert!(approx(x.graph.max_eccentricity(x.a).unwrap(), expected));
}

#[test]
fn moving_onto_an_occupied_station_fails() {
    let mut x = expedition();
    assert!(!x.graph.move_vertex(x.e, 2.0, 0.0).unwrap());
    assert_eq!(x.graph.position(x.e).unwrap().x, 3.0);
    assert_eq!(x.graph.position(x.e).unwrap().y, 3.0);
}
