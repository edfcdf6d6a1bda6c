//! Lens module - the fundamental entity of the knowledge graph

use std::collections::BTreeSet;

/// A single knowledge-graph entity: a named concept with a definition and tags.
///
/// Lenses are created externally and are read-only from the perspective of the
/// maintenance jobs, except for their embedding column (see [`crate::traits::LensStore`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lens {
    /// Unique identifier (e.g. `lens_first_principles`)
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Free-text definition (may be empty)
    pub definition: String,

    /// Related-concept tags as stored; compare through [`Lens::concept_set`]
    pub related_concepts: Vec<String>,

    /// Optional category tag
    pub lens_type: Option<String>,
}

impl Lens {
    /// Create a lens with no related concepts and no type
    pub fn new(id: impl Into<String>, name: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            definition: definition.into(),
            related_concepts: Vec::new(),
            lens_type: None,
        }
    }

    /// Builder-style helper to attach related concepts
    pub fn with_concepts<I, S>(mut self, concepts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.related_concepts = concepts.into_iter().map(Into::into).collect();
        self
    }

    /// Related concepts as a case-folded, trimmed set
    ///
    /// # Examples
    ///
    /// ```
    /// use lenskit_domain::Lens;
    ///
    /// let lens = Lens::new("l1", "Lens", "").with_concepts(["AI", " Control", "ai"]);
    /// let set = lens.concept_set();
    /// assert_eq!(set.len(), 2);
    /// assert!(set.contains("control"));
    /// ```
    pub fn concept_set(&self) -> BTreeSet<String> {
        self.related_concepts
            .iter()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect()
    }

    /// Text handed to the embedding model: `"{name}: {definition}"`
    pub fn embedding_text(&self) -> String {
        format!("{}: {}", self.name, self.definition)
    }

    /// Prefix of the id before the first underscore (the whole id when there is none)
    pub fn id_prefix(&self) -> &str {
        id_prefix(&self.id)
    }
}

/// Prefix of a lens id before the first underscore
pub fn id_prefix(id: &str) -> &str {
    id.split_once('_').map(|(prefix, _)| prefix).unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concept_set_case_folds_and_dedups() {
        let lens = Lens::new("lens_a", "A", "def").with_concepts(["Systems Thinking", "systems thinking", "AI"]);
        let set = lens.concept_set();
        assert_eq!(set.len(), 2);
        assert!(set.contains("systems thinking"));
        assert!(set.contains("ai"));
    }

    #[test]
    fn test_concept_set_drops_blank_tags() {
        let lens = Lens::new("lens_a", "A", "def").with_concepts(["", "  ", "ai"]);
        assert_eq!(lens.concept_set().len(), 1);
    }

    #[test]
    fn test_embedding_text() {
        let lens = Lens::new("lens_a", "Inversion", "Think backwards");
        assert_eq!(lens.embedding_text(), "Inversion: Think backwards");
    }

    #[test]
    fn test_id_prefix() {
        assert_eq!(id_prefix("lens_first_principles"), "lens");
        assert_eq!(id_prefix("model_x"), "model");
        assert_eq!(id_prefix("standalone"), "standalone");
        assert_eq!(Lens::new("lens_a", "A", "").id_prefix(), "lens");
    }
}
