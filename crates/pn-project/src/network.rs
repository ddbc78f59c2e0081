//! Turning a station map into a live graph.

use std::collections::HashMap;

use pn_core::VertexId;
use pn_graph::Graph;

use crate::schema::{LATEST_VERSION, LinkDef, StationDef, StationMap};
use crate::validate::validate_map;
use crate::{ProjectError, ProjectResult};

/// A graph built from a station map, with lookups between station ids and
/// vertex ids.
#[derive(Debug, Clone)]
pub struct StationNetwork {
    name: String,
    graph: Graph,
    by_label: HashMap<String, VertexId>,
    by_vertex: HashMap<VertexId, String>,
}

impl StationNetwork {
    /// Validate `map` and build its graph. Stations are inserted in file
    /// order, then links in file order.
    pub fn from_map(map: &StationMap) -> ProjectResult<Self> {
        validate_map(map)?;

        let mut graph = Graph::new();
        let mut by_label = HashMap::with_capacity(map.stations.len());
        let mut by_vertex = HashMap::with_capacity(map.stations.len());
        for station in &map.stations {
            let id = graph.insert_vertex(station.position.x, station.position.y)?;
            by_label.insert(station.id.clone(), id);
            by_vertex.insert(id, station.id.clone());
        }

        let mut network = Self {
            name: map.name.clone(),
            graph,
            by_label,
            by_vertex,
        };
        for LinkDef(a, b) in &map.links {
            let u = network.id_of(a)?;
            let v = network.id_of(b)?;
            network.graph.insert_edge(u, v)?;
        }

        tracing::debug!(
            name = %network.name,
            stations = network.graph.vertex_count(),
            links = network.graph.edge_count(),
            "built station network"
        );
        Ok(network)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Mutable access for moving or removing stations. Vertices removed here
    /// keep their label until `to_map` drops them.
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    /// Vertex id of a station, by its map id.
    pub fn id_of(&self, label: &str) -> ProjectResult<VertexId> {
        self.by_label
            .get(label)
            .copied()
            .filter(|&id| self.graph.contains_vertex(id))
            .ok_or_else(|| ProjectError::UnknownStation(label.to_string()))
    }

    /// Map id of a vertex, if it came from the map.
    pub fn label_of(&self, id: VertexId) -> Option<&str> {
        self.by_vertex.get(&id).map(String::as_str)
    }

    /// Label for display: the map id, or `#<vertex id>` for vertices added
    /// after loading. When a station already uses that id, a `-<n>` suffix is
    /// appended until the label is free, so snapshots never repeat an id.
    pub fn display_label(&self, id: VertexId) -> String {
        if let Some(label) = self.label_of(id) {
            return label.to_string();
        }
        let base = format!("#{id}");
        let mut label = base.clone();
        let mut n = 1;
        while self.by_label.contains_key(&label) {
            label = format!("{base}-{n}");
            n += 1;
        }
        label
    }

    /// Snapshot the current graph back into the file format.
    pub fn to_map(&self) -> StationMap {
        let stations = self
            .graph
            .vertices()
            .map(|v| StationDef {
                id: self.display_label(v.id),
                position: v.position,
            })
            .collect();
        let links = self
            .graph
            .edges()
            .map(|e| LinkDef(self.display_label(e.u), self.display_label(e.v)))
            .collect();
        StationMap {
            version: LATEST_VERSION,
            name: self.name.clone(),
            stations,
            links,
        }
    }
}
