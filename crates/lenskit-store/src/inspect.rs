//! Raw field descriptions for diagnosing column formats

use serde_json::{Map, Value};
use std::fmt;

/// Characters of a long string shown in a preview
pub const PREVIEW_CHARS: usize = 100;

/// Number of list elements shown in a preview
pub const LIST_HEAD: usize = 3;

/// Name of a JSON value's type
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

/// Summary of one raw field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSummary {
    /// JSON null
    Null,

    /// Array with its length, element type of the first entry and first few entries
    List {
        /// Number of elements
        len: usize,
        /// Type of the first element
        first_type: Option<&'static str>,
        /// First [`LIST_HEAD`] elements
        head: Vec<Value>,
    },

    /// String with its character length and a preview
    Text {
        /// Length in characters
        len: usize,
        /// First [`PREVIEW_CHARS`] characters
        preview: String,
        /// Whether the preview is shorter than the value
        truncated: bool,
    },

    /// Any other value, rendered as JSON
    Scalar {
        /// JSON type name
        type_name: &'static str,
        /// Rendered value
        rendered: String,
    },
}

/// Describe a single value
pub fn describe_value(value: &Value) -> FieldSummary {
    match value {
        Value::Null => FieldSummary::Null,
        Value::Array(items) => FieldSummary::List {
            len: items.len(),
            first_type: items.first().map(json_type_name),
            head: items.iter().take(LIST_HEAD).cloned().collect(),
        },
        Value::String(text) => {
            let len = text.chars().count();
            FieldSummary::Text {
                len,
                preview: text.chars().take(PREVIEW_CHARS).collect(),
                truncated: len > PREVIEW_CHARS,
            }
        }
        other => FieldSummary::Scalar {
            type_name: json_type_name(other),
            rendered: other.to_string(),
        },
    }
}

/// Describe every field of a row, sorted by column name
pub fn describe_row(row: &Map<String, Value>) -> Vec<(String, FieldSummary)> {
    let mut fields: Vec<(String, FieldSummary)> = row
        .iter()
        .map(|(key, value)| (key.clone(), describe_value(value)))
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
}

fn render_head(head: &[Value]) -> String {
    let items: Vec<String> = head.iter().map(Value::to_string).collect();
    format!("[{}]", items.join(", "))
}

impl fmt::Display for FieldSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSummary::Null => write!(f, "NULL"),
            FieldSummary::List {
                len,
                first_type: Some(first_type),
                head,
            } => write!(
                f,
                "list (length {}), first value type: {}, first {}: {}",
                len,
                first_type,
                head.len(),
                render_head(head)
            ),
            FieldSummary::List { len, .. } => write!(f, "list (length {})", len),
            FieldSummary::Text { len, preview, truncated: true } => {
                write!(f, "string (length {}, truncated), preview: {}...", len, preview)
            }
            FieldSummary::Text { len, preview, .. } => write!(f, "string (length {}) = {}", len, preview),
            FieldSummary::Scalar { type_name, rendered } => write!(f, "{} = {}", type_name, rendered),
        }
    }
}
