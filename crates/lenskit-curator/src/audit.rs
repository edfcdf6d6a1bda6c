//! Embedding coverage audit and migration readiness report

use lenskit_domain::lens::id_prefix;
use lenskit_domain::{EmbeddingProbe, EmbeddingState};
use serde::Serialize;
use std::collections::BTreeMap;

/// Lenses with embeddings shown as samples
pub const SAMPLE_COUNT: usize = 5;

/// Lenses without embeddings listed by id
pub const MISSING_LISTED: usize = 10;

/// A lens with a usable embedding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbeddedSample {
    /// Lens id
    pub id: String,
    /// Lens name
    pub name: String,
    /// Vector length
    pub dimension: usize,
    /// `native` or `encoded`
    pub storage: &'static str,
}

/// A lens whose embedding column is empty or unreadable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidEntry {
    /// Lens id
    pub id: String,
    /// Lens name
    pub name: String,
    /// What is wrong with the value
    pub reason: String,
}

/// Embedding coverage of the lens table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuditReport {
    /// Lenses inspected
    pub total: usize,
    /// Lenses holding a native numeric array
    pub native: usize,
    /// Lenses holding a JSON-encoded array
    pub encoded: usize,
    /// Lenses with a NULL embedding
    pub missing: usize,
    /// Lenses with an empty or unreadable embedding
    pub invalid: usize,
    /// First few lenses with embeddings
    pub samples: Vec<EmbeddedSample>,
    /// First few ids without embeddings
    pub missing_ids: Vec<String>,
    /// Ids without embeddings beyond `missing_ids`
    pub missing_more: usize,
    /// Every empty or unreadable embedding
    pub invalid_entries: Vec<InvalidEntry>,
    /// Lens count per vector length
    pub dimensions: BTreeMap<usize, usize>,
    /// Lens count per id prefix (text before the first `_`)
    pub prefixes: BTreeMap<String, usize>,
}

impl AuditReport {
    /// Classify a census
    pub fn from_probes(probes: &[EmbeddingProbe]) -> Self {
        let mut report = AuditReport {
            total: probes.len(),
            ..Default::default()
        };

        for probe in probes {
            *report.prefixes.entry(id_prefix(&probe.id).to_string()).or_insert(0) += 1;

            match &probe.state {
                EmbeddingState::Native(d) | EmbeddingState::Encoded(d) => {
                    let storage = if matches!(probe.state, EmbeddingState::Native(_)) {
                        report.native += 1;
                        "native"
                    } else {
                        report.encoded += 1;
                        "encoded"
                    };
                    *report.dimensions.entry(*d).or_insert(0) += 1;
                    if report.samples.len() < SAMPLE_COUNT {
                        report.samples.push(EmbeddedSample {
                            id: probe.id.clone(),
                            name: probe.name.clone(),
                            dimension: *d,
                            storage,
                        });
                    }
                }
                EmbeddingState::Missing => {
                    report.missing += 1;
                    if report.missing_ids.len() < MISSING_LISTED {
                        report.missing_ids.push(probe.id.clone());
                    } else {
                        report.missing_more += 1;
                    }
                }
                EmbeddingState::Empty | EmbeddingState::Malformed(_) => {
                    report.invalid += 1;
                    report.invalid_entries.push(InvalidEntry {
                        id: probe.id.clone(),
                        name: probe.name.clone(),
                        reason: match &probe.state {
                            EmbeddingState::Malformed(reason) => reason.clone(),
                            _ => "empty".to_string(),
                        },
                    });
                }
            }
        }

        report
    }

    /// Lenses with a usable embedding
    pub fn with_embeddings(&self) -> usize {
        self.native + self.encoded
    }

    /// Most common vector length, if any lens has an embedding
    pub fn dominant_dimension(&self) -> Option<usize> {
        self.dimensions
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
            .map(|(dim, _)| *dim)
    }
}

/// Read-only summary of what a move to a native vector column involves
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MigrationReport {
    /// Lenses inspected
    pub total: usize,
    /// Lenses stored as JSON-encoded strings
    pub encoded: usize,
    /// Lenses stored as native arrays
    pub native: usize,
    /// Lenses without a usable embedding
    pub unusable: usize,
    /// Dimension of the target vector column
    pub dimension: usize,
    /// SQL steps for an operator to run in the database console
    pub runbook: Vec<String>,
}

impl MigrationReport {
    /// Build the report from a census; `fallback_dimension` applies when no lens has an embedding
    pub fn from_probes(probes: &[EmbeddingProbe], table: &str, fallback_dimension: usize) -> Self {
        let audit = AuditReport::from_probes(probes);
        let dimension = audit.dominant_dimension().unwrap_or(fallback_dimension);
        let runbook = vec![
            "CREATE EXTENSION IF NOT EXISTS vector;".to_string(),
            format!(
                "ALTER TABLE {} ADD COLUMN IF NOT EXISTS embedding_vector VECTOR({});",
                table, dimension
            ),
            format!(
                "UPDATE {} SET embedding_vector = embedding::text::vector WHERE embedding IS NOT NULL;",
                table
            ),
            format!(
                "SELECT count(*) FROM {} WHERE embedding_vector IS NOT NULL; -- expect {}",
                table,
                audit.with_embeddings()
            ),
        ];
        Self {
            total: audit.total,
            encoded: audit.encoded,
            native: audit.native,
            unusable: audit.missing + audit.invalid,
            dimension,
            runbook,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(id: &str, state: EmbeddingState) -> EmbeddingProbe {
        EmbeddingProbe {
            id: id.to_string(),
            name: id.to_uppercase(),
            state,
        }
    }

    fn census() -> Vec<EmbeddingProbe> {
        vec![
            probe("lens_a", EmbeddingState::Native(384)),
            probe("lens_b", EmbeddingState::Encoded(384)),
            probe("model_c", EmbeddingState::Missing),
            probe("d", EmbeddingState::Empty),
            probe("lens_e", EmbeddingState::Malformed("bad".into())),
            probe("model_f", EmbeddingState::Native(768)),
        ]
    }

    #[test]
    fn test_classification_counts() {
        let report = AuditReport::from_probes(&census());
        assert_eq!(report.total, 6);
        assert_eq!(report.native, 2);
        assert_eq!(report.encoded, 1);
        assert_eq!(report.missing, 1);
        assert_eq!(report.invalid, 2);
        assert_eq!(report.with_embeddings(), 3);
        assert_eq!(report.missing_ids, vec!["model_c".to_string()]);
        assert_eq!(report.invalid_entries[0].reason, "empty");
        assert_eq!(report.invalid_entries[1].reason, "bad");
    }

    #[test]
    fn test_prefix_histogram() {
        let report = AuditReport::from_probes(&census());
        let prefixes: Vec<_> = report.prefixes.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(prefixes, vec![("d", 1), ("lens", 3), ("model", 2)]);
    }

    #[test]
    fn test_missing_list_capped() {
        let probes: Vec<_> = (0..13)
            .map(|i| probe(&format!("lens_{}", i), EmbeddingState::Missing))
            .collect();
        let report = AuditReport::from_probes(&probes);
        assert_eq!(report.missing_ids.len(), 10);
        assert_eq!(report.missing_more, 3);
    }

    #[test]
    fn test_samples_capped() {
        let probes: Vec<_> = (0..8)
            .map(|i| probe(&format!("lens_{}", i), EmbeddingState::Native(384)))
            .collect();
        let report = AuditReport::from_probes(&probes);
        assert_eq!(report.samples.len(), SAMPLE_COUNT);
        assert_eq!(report.samples[0].storage, "native");
    }

    #[test]
    fn test_dominant_dimension() {
        let report = AuditReport::from_probes(&census());
        assert_eq!(report.dominant_dimension(), Some(384));
        assert_eq!(AuditReport::from_probes(&[]).dominant_dimension(), None);
    }

    #[test]
    fn test_migration_runbook() {
        let report = MigrationReport::from_probes(&census(), "lenses", 384);
        assert_eq!(report.encoded, 1);
        assert_eq!(report.native, 2);
        assert_eq!(report.unusable, 3);
        assert_eq!(report.dimension, 384);
        assert!(report.runbook[0].contains("CREATE EXTENSION"));
        assert!(report.runbook[1].contains("VECTOR(384)"));
        assert!(report.runbook[3].contains("expect 3"));
    }

    #[test]
    fn test_migration_fallback_dimension() {
        let report = MigrationReport::from_probes(&[], "lenses", 384);
        assert_eq!(report.dimension, 384);
    }
}
