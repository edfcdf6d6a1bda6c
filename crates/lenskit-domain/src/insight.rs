//! Template-based insight text for generated contrasts
//!
//! Pure string formatting; output is meant for manual review and may cut a
//! definition mid-sentence.

use crate::Lens;

/// Number of definition characters quoted in an insight by default
pub const DEFAULT_EXCERPT_CHARS: usize = 100;

/// First `max_chars` characters of `text`, never splitting a code point
pub fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Describe the contrast between two lenses
///
/// # Examples
///
/// ```
/// use lenskit_domain::{compose_insight, Lens};
///
/// let a = Lens::new("a", "Hierarchy", "Authority flows from the top");
/// let b = Lens::new("b", "Network", "Authority emerges from links");
/// let text = compose_insight(&a, &b, &["power".to_string()], 100);
/// assert!(text.starts_with("Hierarchy and Network represent contrasting perspectives within power."));
/// ```
pub fn compose_insight(source: &Lens, target: &Lens, shared_concepts: &[String], excerpt_chars: usize) -> String {
    format!(
        "{source} and {target} represent contrasting perspectives within {shared}. \
         While {source} focuses on {source_def}..., \
         {target} emphasizes {target_def}... \
         Together they map complementary approaches to the same domain.",
        source = source.name,
        target = target.name,
        shared = shared_concepts.join(", "),
        source_def = excerpt(&source.definition, excerpt_chars),
        target_def = excerpt(&target.definition, excerpt_chars),
    )
}
