//! Inspect command implementation.

use crate::cli::InspectArgs;
use crate::error::Result;
use crate::output::Formatter;
use lenskit_store::inspect::{describe_row, describe_value};
use lenskit_store::rows::CENSUS_COLUMNS;
use lenskit_store::SupabaseStore;
use serde::Serialize;
use serde_json::{Map, Value};

/// One described column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldLine {
    /// Column name
    pub name: String,
    /// Rendered summary
    pub description: String,
}

/// Embedding column of one sampled row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbeddingLine {
    /// Lens id
    pub id: String,
    /// Lens name
    pub name: String,
    /// Rendered summary of the embedding value
    pub embedding: String,
}

/// Raw row formats as returned by the REST API.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InspectionReport {
    /// Rows fetched with every column
    pub rows: Vec<Vec<FieldLine>>,
    /// Embedding column of further sampled rows
    pub embeddings: Vec<EmbeddingLine>,
}

impl InspectionReport {
    /// Describe full rows and `id, name, embedding` samples.
    pub fn from_rows(full: &[Map<String, Value>], census: &[Map<String, Value>]) -> Self {
        let rows = full
            .iter()
            .map(|row| {
                describe_row(row)
                    .into_iter()
                    .map(|(name, summary)| FieldLine {
                        name,
                        description: summary.to_string(),
                    })
                    .collect()
            })
            .collect();

        let embeddings = census
            .iter()
            .map(|row| EmbeddingLine {
                id: text_field(row, "id"),
                name: text_field(row, "name"),
                embedding: describe_value(row.get("embedding").unwrap_or(&Value::Null)).to_string(),
            })
            .collect();

        Self { rows, embeddings }
    }
}

fn text_field(row: &Map<String, Value>, key: &str) -> String {
    match row.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Execute the inspect command.
pub fn execute_inspect(args: InspectArgs, store: &SupabaseStore, formatter: &Formatter) -> Result<()> {
    let full = store.sample_rows("*", args.full_rows)?;
    let census = store.sample_rows(CENSUS_COLUMNS, args.rows)?;
    tracing::debug!(full = full.len(), sampled = census.len(), "fetched rows for inspection");

    let report = InspectionReport::from_rows(&full, &census);
    println!("{}", formatter.format_inspection(&report)?);
    Ok(())
}
