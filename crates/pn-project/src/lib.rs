//! pn-project: station map file format, validation and loading.

pub mod network;
pub mod schema;
pub mod validate;

pub use network::StationNetwork;
pub use schema::*;
pub use validate::{ValidationError, validate_map};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Graph error: {0}")]
    Graph(#[from] pn_graph::GraphError),

    #[error("Unknown station: {0}")]
    UnknownStation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<StationMap> {
    let content = std::fs::read_to_string(path)?;
    let map: StationMap = serde_yaml::from_str(&content)?;
    validate_map(&map)?;
    tracing::debug!(path = %path.display(), stations = map.stations.len(), "loaded station map");
    Ok(map)
}

pub fn save_yaml(path: &std::path::Path, map: &StationMap) -> ProjectResult<()> {
    validate_map(map)?;
    let content = serde_yaml::to_string(map)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<StationMap> {
    let content = std::fs::read_to_string(path)?;
    let map: StationMap = serde_json::from_str(&content)?;
    validate_map(&map)?;
    Ok(map)
}

pub fn save_json(path: &std::path::Path, map: &StationMap) -> ProjectResult<()> {
    validate_map(map)?;
    let content = serde_json::to_string_pretty(map)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a map, picking the format from the file extension (`.json` or YAML).
pub fn load_any(path: &std::path::Path) -> ProjectResult<StationMap> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => load_json(path),
        _ => load_yaml(path),
    }
}
