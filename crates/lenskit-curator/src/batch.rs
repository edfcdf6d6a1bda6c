//! Review file for generated contrasts

use crate::CuratorError;
use lenskit_domain::weight::round_to;
use lenskit_domain::Contrast;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default output file name
pub const DEFAULT_OUTPUT: &str = "new_contrasts.json";

/// Scores recorded with each contrast, rounded to three decimals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// Cosine distance
    pub distance: f64,
    /// Dialectic keyword score
    pub dialectic_score: f64,
    /// Combined ranking score
    pub combined_score: f64,
    /// Shared related concepts
    pub shared_concepts: Vec<String>,
    /// Producing tool and version
    pub generated_by: String,
}

/// One contrast as written for review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrastRecord {
    /// Source lens id
    pub source_id: String,
    /// Target lens id
    pub target_id: String,
    /// Presentation weight
    pub weight: f64,
    /// Relationship type, always `contrast`
    #[serde(rename = "type")]
    pub kind: String,
    /// Explanation text
    pub insight: String,
    /// Scores behind the choice
    pub metadata: RecordMetadata,
}

impl From<&Contrast> for ContrastRecord {
    fn from(contrast: &Contrast) -> Self {
        let meta = &contrast.metadata;
        Self {
            source_id: contrast.source_id.clone(),
            target_id: contrast.target_id.clone(),
            weight: contrast.weight,
            kind: contrast.kind().to_string(),
            insight: contrast.insight.clone(),
            metadata: RecordMetadata {
                distance: round_to(meta.distance, 3),
                dialectic_score: round_to(meta.dialectic_score, 3),
                combined_score: round_to(meta.combined_score, 3),
                shared_concepts: meta.shared_concepts.clone(),
                generated_by: meta.generated_by.clone(),
            },
        }
    }
}

/// Next steps for the reviewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instructions {
    /// What to review
    pub review: String,
    /// How to merge once reviewed
    pub merge: String,
}

/// The review file: every contrast from one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrastBatch {
    /// Number of contrasts in the file
    pub generated_count: usize,
    /// Generated contrasts, in generation order
    pub new_contrasts: Vec<ContrastRecord>,
    /// Reviewer instructions
    pub instructions: Instructions,
}

impl ContrastBatch {
    /// Assemble a batch destined for `output`
    pub fn new(contrasts: &[Contrast], output: &Path) -> Self {
        Self {
            generated_count: contrasts.len(),
            new_contrasts: contrasts.iter().map(ContrastRecord::from).collect(),
            instructions: Instructions {
                review: "Review the contrasts above and edit or remove any that are not high quality".to_string(),
                merge: format!(
                    "Merge the reviewed entries of {} into the connections file",
                    output.display()
                ),
            },
        }
    }
}

/// Write a batch as pretty-printed JSON, creating parent directories
pub fn write_batch(path: &Path, batch: &ContrastBatch) -> Result<(), CuratorError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(batch)?;
    fs::write(path, json)?;
    tracing::info!(path = %path.display(), count = batch.generated_count, "wrote contrast batch");
    Ok(())
}
