//! Existing-relationships file loader
//!
//! The file holds `{ "connections": [ { "source_id", "target_id", "type", ... } ] }`.
//! Extra fields are ignored and a missing `connections` key means no relationships.

use crate::CuratorError;
use lenskit_domain::{RelationshipKind, RelationshipRef};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ConnectionsFile {
    #[serde(default)]
    connections: Vec<ConnectionEntry>,
}

#[derive(Debug, Deserialize)]
struct ConnectionEntry {
    source_id: Option<String>,
    target_id: Option<String>,
    #[serde(rename = "type", default)]
    kind: String,
}

/// Parse relationships from JSON text
///
/// Contrast entries must name both endpoints. Entries of other types without
/// them (cluster records and the like) are ignored.
pub fn parse_connections(text: &str) -> Result<Vec<RelationshipRef>, CuratorError> {
    let file: ConnectionsFile =
        serde_json::from_str(text).map_err(|e| CuratorError::Connections(e.to_string()))?;

    let mut relationships = Vec::with_capacity(file.connections.len());
    for (index, entry) in file.connections.into_iter().enumerate() {
        let kind = RelationshipKind::parse(&entry.kind);
        match (entry.source_id, entry.target_id) {
            (Some(source_id), Some(target_id)) => {
                relationships.push(RelationshipRef::new(source_id, target_id, kind))
            }
            _ if kind == RelationshipKind::Contrast => {
                return Err(CuratorError::Connections(format!(
                    "contrast entry {} is missing source_id or target_id",
                    index
                )));
            }
            _ => tracing::debug!(index, kind = %entry.kind, "skipping connection without endpoints"),
        }
    }
    Ok(relationships)
}

/// Read relationships from a file
pub fn load_connections(path: &Path) -> Result<Vec<RelationshipRef>, CuratorError> {
    let text = fs::read_to_string(path)
        .map_err(|e| CuratorError::Connections(format!("{}: {}", path.display(), e)))?;
    let relationships = parse_connections(&text)?;
    tracing::info!(
        path = %path.display(),
        total = relationships.len(),
        contrasts = relationships.iter().filter(|r| r.kind == RelationshipKind::Contrast).count(),
        "loaded existing relationships"
    );
    Ok(relationships)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_mixed_types() {
        let text = r#"{
            "connections": [
                {"source_id": "a", "target_id": "b", "type": "contrast", "weight": 0.9},
                {"source_id": "b", "target_id": "c", "type": "complement"}
            ],
            "version": 3
        }"#;
        let rels = parse_connections(text).unwrap();
        assert_eq!(rels.len(), 2);
        assert_eq!(rels[0].kind, RelationshipKind::Contrast);
        assert_eq!(rels[1].kind, RelationshipKind::Other("complement".to_string()));
    }

    #[test]
    fn test_entries_without_endpoints_ignored() {
        let text = r#"{
            "connections": [
                {"source_id": "a", "target_id": "b", "type": "contrast"},
                {"type": "cluster", "members": ["x", "y"]}
            ]
        }"#;
        let rels = parse_connections(text).unwrap();
        assert_eq!(rels, vec![RelationshipRef::new("a", "b", RelationshipKind::Contrast)]);
    }

    #[test]
    fn test_contrast_without_target_is_error() {
        let text = r#"{"connections": [{"source_id": "a", "type": "contrast"}]}"#;
        assert!(matches!(parse_connections(text), Err(CuratorError::Connections(_))));
    }

    #[test]
    fn test_missing_connections_key() {
        assert!(parse_connections("{}").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_file_is_error() {
        assert!(matches!(parse_connections("not json"), Err(CuratorError::Connections(_))));
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"connections": [{{"source_id": "x", "target_id": "y", "type": "contrast"}}]}}"#)
            .unwrap();
        let rels = load_connections(file.path()).unwrap();
        assert_eq!(rels.len(), 1);
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = load_connections(Path::new("/nonexistent/connections.json"));
        assert!(matches!(result, Err(CuratorError::Connections(_))));
    }
}
