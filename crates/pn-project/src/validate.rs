//! Station map validation logic.

use std::collections::HashSet;

use crate::schema::{LATEST_VERSION, StationMap};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Duplicate link between {a} and {b}")]
    DuplicateLink { a: String, b: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_map(map: &StationMap) -> Result<(), ValidationError> {
    if map.version == 0 || map.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: map.version,
        });
    }

    let mut station_ids = HashSet::new();
    for station in &map.stations {
        if station.id.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "station.id".to_string(),
                value: format!("{:?}", station.id),
                reason: "must not be empty".to_string(),
            });
        }
        if !station_ids.insert(station.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: station.id.clone(),
                context: "stations".to_string(),
            });
        }
        validate_finite(&format!("{}.x", station.id), station.position.x)?;
        validate_finite(&format!("{}.y", station.id), station.position.y)?;
    }

    let mut pairs = HashSet::new();
    for link in &map.links {
        for end in [&link.0, &link.1] {
            if !station_ids.contains(end.as_str()) {
                return Err(ValidationError::MissingReference {
                    id: end.clone(),
                    context: "links".to_string(),
                });
            }
        }
        let key = if link.0 <= link.1 {
            (link.0.as_str(), link.1.as_str())
        } else {
            (link.1.as_str(), link.0.as_str())
        };
        if !pairs.insert(key) {
            return Err(ValidationError::DuplicateLink {
                a: link.0.clone(),
                b: link.1.clone(),
            });
        }
    }

    Ok(())
}

fn validate_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be finite".to_string(),
        });
    }
    Ok(())
}
