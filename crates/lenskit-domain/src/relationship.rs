//! Relationship module: existing relationships and generated contrasts

use std::fmt;

/// Type tag of a relationship between lenses
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    /// Dialectical tension between two lenses
    Contrast,

    /// Any other relationship type, kept verbatim
    Other(String),
}

impl RelationshipKind {
    /// Parse a type tag; unknown tags are preserved as [`RelationshipKind::Other`]
    pub fn parse(tag: &str) -> Self {
        match tag {
            "contrast" => RelationshipKind::Contrast,
            other => RelationshipKind::Other(other.to_string()),
        }
    }

    /// Tag as written in relationship documents
    pub fn as_str(&self) -> &str {
        match self {
            RelationshipKind::Contrast => "contrast",
            RelationshipKind::Other(tag) => tag,
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A relationship that already exists between two lenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipRef {
    /// Source lens id
    pub source_id: String,

    /// Target lens id
    pub target_id: String,

    /// Relationship type
    pub kind: RelationshipKind,
}

impl RelationshipRef {
    /// Create a new relationship reference
    pub fn new(source_id: impl Into<String>, target_id: impl Into<String>, kind: RelationshipKind) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            kind,
        }
    }
}

/// Scores and context recorded alongside a generated contrast
#[derive(Debug, Clone, PartialEq)]
pub struct ContrastMetadata {
    /// Cosine distance between the two embeddings
    pub distance: f64,

    /// Opposing-keyword score of the two definitions
    pub dialectic_score: f64,

    /// Blended ranking score
    pub combined_score: f64,

    /// Related concepts both lenses share (sorted)
    pub shared_concepts: Vec<String>,

    /// Tool that produced the record
    pub generated_by: String,
}

/// A generated contrast relationship awaiting review
///
/// Stored with a fixed direction (source → target) once created, but treated as
/// symmetric when checking coverage.
#[derive(Debug, Clone, PartialEq)]
pub struct Contrast {
    /// Source lens id
    pub source_id: String,

    /// Target lens id
    pub target_id: String,

    /// Presentation weight in [0.80, 0.95]
    pub weight: f64,

    /// Generated explanation text
    pub insight: String,

    /// Scores behind the choice
    pub metadata: ContrastMetadata,
}

impl Contrast {
    /// Relationship type of every generated contrast
    pub fn kind(&self) -> RelationshipKind {
        RelationshipKind::Contrast
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse() {
        assert_eq!(RelationshipKind::parse("contrast"), RelationshipKind::Contrast);
        assert_eq!(
            RelationshipKind::parse("complement"),
            RelationshipKind::Other("complement".to_string())
        );
    }

    #[test]
    fn test_kind_display_roundtrip() {
        for tag in ["contrast", "complement", "builds_on"] {
            assert_eq!(RelationshipKind::parse(tag).to_string(), tag);
        }
    }

    #[test]
    fn test_contrast_kind_tag() {
        let contrast = Contrast {
            source_id: "a".into(),
            target_id: "b".into(),
            weight: 0.84,
            insight: String::new(),
            metadata: ContrastMetadata {
                distance: 0.75,
                dialectic_score: 0.2,
                combined_score: 0.585,
                shared_concepts: vec!["ai".into()],
                generated_by: "test".into(),
            },
        };
        assert_eq!(contrast.kind(), RelationshipKind::Contrast);
        assert_eq!(contrast.kind().to_string(), "contrast");
    }
}
