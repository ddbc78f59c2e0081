//! Station map schema definitions.

use pn_core::Position;
use serde::{Deserialize, Serialize};

/// Newest map format version this crate reads and writes.
pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StationMap {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub stations: Vec<StationDef>,
    #[serde(default)]
    pub links: Vec<LinkDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StationDef {
    pub id: String,
    #[serde(flatten)]
    pub position: Position,
}

impl StationDef {
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            position: Position { x, y },
        }
    }
}

/// An undirected link between two station ids, written as `[a, b]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkDef(pub String, pub String);

impl LinkDef {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self(a.into(), b.into())
    }
}

impl StationMap {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: LATEST_VERSION,
            name: name.into(),
            stations: Vec::new(),
            links: Vec::new(),
        }
    }
}
