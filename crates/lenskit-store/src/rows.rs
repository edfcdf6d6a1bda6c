//! Row decoding for the lens table
//!
//! The `embedding` column has been written both as a native array and as a
//! JSON-encoded string over the life of the dataset. [`EmbeddingField`] accepts
//! either and decodes to a single canonical `Vec<f32>`.

use crate::inspect::json_type_name;
use crate::StoreError;
use lenskit_domain::{Embedding, EmbeddingProbe, EmbeddingState, Lens};
use serde::Deserialize;

/// Columns selected when listing lenses
pub const LENS_COLUMNS: &str = "id,name,definition,related_concepts,lens_type";

/// Columns selected for an embedding census
pub const CENSUS_COLUMNS: &str = "id,name,embedding";

/// A lens row as returned by the REST API
#[derive(Debug, Clone, Deserialize)]
pub struct LensRow {
    /// Lens id
    pub id: String,

    /// Lens name
    #[serde(default)]
    pub name: Option<String>,

    /// Definition text (nullable)
    #[serde(default)]
    pub definition: Option<String>,

    /// Related-concept tags (nullable)
    #[serde(default)]
    pub related_concepts: Option<Vec<String>>,

    /// Category tag
    #[serde(default)]
    pub lens_type: Option<String>,
}

impl From<LensRow> for Lens {
    fn from(row: LensRow) -> Self {
        Lens {
            name: row.name.unwrap_or_else(|| row.id.clone()),
            id: row.id,
            definition: row.definition.unwrap_or_default(),
            related_concepts: row.related_concepts.unwrap_or_default(),
            lens_type: row.lens_type,
        }
    }
}

/// Raw `embedding` column value
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingField {
    /// Native numeric array
    Vector(Vec<f32>),

    /// JSON-encoded numeric array, e.g. `"[0.1, 0.2]"`
    Encoded(String),

    /// Anything else
    Other(serde_json::Value),
}

impl EmbeddingField {
    /// Decode into the canonical numeric form
    ///
    /// Empty arrays and empty strings decode to `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lenskit_store::rows::EmbeddingField;
    ///
    /// let field: EmbeddingField = serde_json::from_str(r#""[0.5, -1]""#).unwrap();
    /// assert_eq!(field.decode().unwrap(), Some(vec![0.5, -1.0]));
    /// ```
    pub fn decode(&self) -> Result<Option<Embedding>, StoreError> {
        match self {
            EmbeddingField::Vector(values) => Ok(non_empty(values.clone())),
            EmbeddingField::Encoded(text) => {
                if text.trim().is_empty() {
                    return Ok(None);
                }
                let values: Vec<f32> = serde_json::from_str(text).map_err(|e| {
                    StoreError::Decode(format!("embedding string is not a numeric array: {}", e))
                })?;
                Ok(non_empty(values))
            }
            EmbeddingField::Other(value) => Err(StoreError::InvalidData(format!(
                "expected numeric array or encoded string, got {}",
                json_type_name(value)
            ))),
        }
    }

    /// Classify the raw value without failing
    pub fn state(&self) -> EmbeddingState {
        match self {
            EmbeddingField::Vector(values) if values.is_empty() => EmbeddingState::Empty,
            EmbeddingField::Vector(values) => EmbeddingState::Native(values.len()),
            EmbeddingField::Encoded(_) => match self.decode() {
                Ok(Some(values)) => EmbeddingState::Encoded(values.len()),
                Ok(None) => EmbeddingState::Empty,
                Err(e) => EmbeddingState::Malformed(e.to_string()),
            },
            EmbeddingField::Other(value) => EmbeddingState::Malformed(format!(
                "unexpected {} value",
                json_type_name(value)
            )),
        }
    }
}

fn non_empty(values: Vec<f32>) -> Option<Embedding> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

/// Row holding only the embedding column
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingRow {
    /// Raw embedding value (absent or NULL → `None`)
    #[serde(default)]
    pub embedding: Option<EmbeddingField>,
}

impl EmbeddingRow {
    /// Decode the embedding column
    pub fn decode(&self) -> Result<Option<Embedding>, StoreError> {
        match &self.embedding {
            Some(field) => field.decode(),
            None => Ok(None),
        }
    }
}

/// Row used for an embedding census
#[derive(Debug, Clone, Deserialize)]
pub struct CensusRow {
    /// Lens id
    pub id: String,

    /// Lens name
    #[serde(default)]
    pub name: Option<String>,

    /// Raw embedding value
    #[serde(default)]
    pub embedding: Option<EmbeddingField>,
}

impl From<CensusRow> for EmbeddingProbe {
    fn from(row: CensusRow) -> Self {
        let state = match &row.embedding {
            Some(field) => field.state(),
            None => EmbeddingState::Missing,
        };
        EmbeddingProbe {
            name: row.name.unwrap_or_else(|| row.id.clone()),
            id: row.id,
            state,
        }
    }
}

/// Row returned after an update (only the id is selected)
#[derive(Debug, Clone, Deserialize)]
pub struct IdRow {
    /// Lens id
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lens_row_with_nulls() {
        let json = r#"{"id": "lens_a", "name": "A", "definition": null, "related_concepts": null}"#;
        let row: LensRow = serde_json::from_str(json).unwrap();
        let lens: Lens = row.into();
        assert_eq!(lens.id, "lens_a");
        assert_eq!(lens.definition, "");
        assert!(lens.related_concepts.is_empty());
        assert!(lens.lens_type.is_none());
    }

    #[test]
    fn test_lens_row_full() {
        let json = r#"{
            "id": "lens_b",
            "name": "Second Order Thinking",
            "definition": "Consider consequences of consequences",
            "related_concepts": ["Systems Thinking", "Causality"],
            "lens_type": "mental_model"
        }"#;
        let lens: Lens = serde_json::from_str::<LensRow>(json).unwrap().into();
        assert_eq!(lens.name, "Second Order Thinking");
        assert_eq!(lens.related_concepts.len(), 2);
        assert_eq!(lens.lens_type.as_deref(), Some("mental_model"));
    }

    #[test]
    fn test_native_vector_decodes() {
        let row: EmbeddingRow = serde_json::from_str(r#"{"embedding": [0.1, 0.2, 3]}"#).unwrap();
        assert_eq!(row.decode().unwrap(), Some(vec![0.1, 0.2, 3.0]));
    }

    #[test]
    fn test_encoded_vector_decodes() {
        let row: EmbeddingRow = serde_json::from_str(r#"{"embedding": "[0.1,0.2,3]"}"#).unwrap();
        assert_eq!(row.decode().unwrap(), Some(vec![0.1, 0.2, 3.0]));
    }

    #[test]
    fn test_null_and_absent_decode_to_none() {
        let null: EmbeddingRow = serde_json::from_str(r#"{"embedding": null}"#).unwrap();
        let absent: EmbeddingRow = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(null.decode().unwrap(), None);
        assert_eq!(absent.decode().unwrap(), None);
    }

    #[test]
    fn test_empty_forms_decode_to_none() {
        assert_eq!(EmbeddingField::Vector(vec![]).decode().unwrap(), None);
        assert_eq!(EmbeddingField::Encoded("  ".into()).decode().unwrap(), None);
        assert_eq!(EmbeddingField::Encoded("[]".into()).decode().unwrap(), None);
    }

    #[test]
    fn test_garbage_string_is_decode_error() {
        let field = EmbeddingField::Encoded("not a vector".into());
        assert!(matches!(field.decode(), Err(StoreError::Decode(_))));
    }

    #[test]
    fn test_unexpected_type_is_invalid() {
        let row: EmbeddingRow = serde_json::from_str(r#"{"embedding": {"x": 1}}"#).unwrap();
        assert!(matches!(row.decode(), Err(StoreError::InvalidData(_))));
    }

    #[test]
    fn test_census_states() {
        let rows = r#"[
            {"id": "a", "name": "A", "embedding": [1.0, 2.0]},
            {"id": "b", "name": "B", "embedding": "[1.0, 2.0, 3.0]"},
            {"id": "c", "name": "C", "embedding": null},
            {"id": "d", "name": "D", "embedding": []},
            {"id": "e", "name": "E", "embedding": "oops"},
            {"id": "f", "name": "F", "embedding": true}
        ]"#;
        let rows: Vec<CensusRow> = serde_json::from_str(rows).unwrap();
        let probes: Vec<EmbeddingProbe> = rows.into_iter().map(Into::into).collect();

        assert_eq!(probes[0].state, EmbeddingState::Native(2));
        assert_eq!(probes[1].state, EmbeddingState::Encoded(3));
        assert_eq!(probes[2].state, EmbeddingState::Missing);
        assert_eq!(probes[3].state, EmbeddingState::Empty);
        assert!(matches!(probes[4].state, EmbeddingState::Malformed(_)));
        assert!(matches!(probes[5].state, EmbeddingState::Malformed(_)));
    }
}
