//! Candidate search and ranking for a single source lens

use crate::ContrastConfig;
use lenskit_domain::traits::EmbeddingSource;
use lenskit_domain::{cosine_distance, CoverageIndex, DialecticTable, Lens};
use std::collections::BTreeSet;

/// A lens admitted as a contrast target, with its scores
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<'l> {
    /// Target lens
    pub target: &'l Lens,

    /// Cosine distance to the source
    pub distance: f64,

    /// Opposing-keyword score of the two definitions
    pub dialectic_score: f64,

    /// Blended ranking score
    pub combined_score: f64,

    /// Related concepts both lenses share, sorted
    pub shared_concepts: Vec<String>,
}

/// Scores and ranks contrast candidates
#[derive(Debug, Clone)]
pub struct CandidateScorer {
    min_distance: f64,
    max_distance: f64,
    min_specific_shared: usize,
    min_total_shared: usize,
    distance_weight: f64,
    dialectic_weight: f64,
    generic: BTreeSet<String>,
    table: DialecticTable,
}

impl CandidateScorer {
    /// Build a scorer from configuration
    pub fn new(config: &ContrastConfig) -> Self {
        Self {
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            min_specific_shared: config.min_specific_shared,
            min_total_shared: config.min_total_shared,
            distance_weight: config.distance_weight,
            dialectic_weight: config.dialectic_weight,
            generic: config.generic_set(),
            table: config.dialectic_table(),
        }
    }

    /// Admission rule: distance inside the band and enough shared context
    ///
    /// `shared` counts all shared concepts, `specific` the ones not on the
    /// generic stoplist.
    pub fn admits(&self, distance: f64, shared: usize, specific: usize) -> bool {
        let in_band = distance >= self.min_distance && distance <= self.max_distance;
        let enough_context = specific >= self.min_specific_shared || shared >= self.min_total_shared;
        in_band && enough_context
    }

    /// Blend distance and dialectic score
    pub fn combined_score(&self, distance: f64, dialectic_score: f64) -> f64 {
        self.distance_weight * distance + self.dialectic_weight * dialectic_score
    }

    /// Dialectic score of two definitions
    pub fn dialectic_score(&self, source_definition: &str, target_definition: &str) -> f64 {
        self.table.score(source_definition, target_definition)
    }

    /// Rank every admissible target for `source`, best first, keeping at most `limit`
    ///
    /// The source itself and pairs already present in `coverage` are never
    /// candidates. Targets without an embedding, or whose distance is
    /// undefined, are skipped. Ties keep pool order.
    pub fn find_candidates<'l, E>(
        &self,
        source: &Lens,
        pool: &'l [Lens],
        coverage: &CoverageIndex,
        embeddings: &E,
        limit: usize,
    ) -> Vec<Candidate<'l>>
    where
        E: EmbeddingSource + ?Sized,
    {
        let Some(source_embedding) = embeddings.embedding(&source.id) else {
            return Vec::new();
        };
        let source_concepts = source.concept_set();

        let mut candidates = Vec::new();
        for target in pool {
            if target.id == source.id || coverage.has_pair(&source.id, &target.id) {
                continue;
            }
            let Some(target_embedding) = embeddings.embedding(&target.id) else {
                continue;
            };
            let Some(distance) = cosine_distance(&source_embedding, &target_embedding) else {
                tracing::debug!(source = %source.id, target = %target.id, "distance undefined, skipping");
                continue;
            };

            let shared: Vec<String> = source_concepts
                .intersection(&target.concept_set())
                .cloned()
                .collect();
            let specific = shared.iter().filter(|c| !self.generic.contains(*c)).count();

            if !self.admits(distance, shared.len(), specific) {
                continue;
            }

            let dialectic_score = self.dialectic_score(&source.definition, &target.definition);
            candidates.push(Candidate {
                target,
                distance,
                dialectic_score,
                combined_score: self.combined_score(distance, dialectic_score),
                shared_concepts: shared,
            });
        }

        candidates.sort_by(|a, b| b.combined_score.total_cmp(&a.combined_score));
        candidates.truncate(limit);
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Fixed(HashMap<String, Vec<f32>>);

    impl EmbeddingSource for Fixed {
        fn embedding(&self, id: &str) -> Option<Vec<f32>> {
            self.0.get(id).cloned()
        }
    }

    fn fixed(entries: &[(&str, Vec<f32>)]) -> Fixed {
        Fixed(entries.iter().map(|(id, v)| (id.to_string(), v.clone())).collect())
    }

    /// Unit vector at the given cosine distance from [1, 0]
    fn at_distance(distance: f32) -> Vec<f32> {
        let cos = 1.0 - distance;
        vec![cos, (1.0 - cos * cos).sqrt()]
    }

    fn scorer() -> CandidateScorer {
        CandidateScorer::new(&ContrastConfig::default())
    }

    #[test]
    fn test_admission_rule() {
        let scorer = scorer();
        assert!(!scorer.admits(0.5, 3, 3));
        assert!(!scorer.admits(0.8, 0, 0));
        assert!(scorer.admits(0.8, 1, 1));
        assert!(scorer.admits(0.8, 2, 0));
        assert!(!scorer.admits(0.8, 1, 0));
        assert!(scorer.admits(0.65, 1, 1));
        assert!(scorer.admits(0.92, 1, 1));
        assert!(!scorer.admits(0.93, 1, 1));
    }

    #[test]
    fn test_combined_score() {
        let scorer = scorer();
        assert!((scorer.combined_score(0.75, 0.2) - 0.585).abs() < 1e-9);
    }

    #[test]
    fn test_distance_outside_band_excluded() {
        let source = Lens::new("s", "S", "").with_concepts(["ai"]);
        let pool = vec![source.clone(), Lens::new("t", "T", "").with_concepts(["ai"])];
        let embeddings = fixed(&[("s", vec![1.0, 0.0]), ("t", at_distance(0.5))]);
        let found = scorer().find_candidates(&source, &pool, &CoverageIndex::new(), &embeddings, 3);
        assert!(found.is_empty());
    }

    #[test]
    fn test_shared_concept_required() {
        let source = Lens::new("s", "S", "").with_concepts(["ai"]);
        let pool = vec![
            Lens::new("t1", "T1", "").with_concepts(["biology"]),
            Lens::new("t2", "T2", "").with_concepts(["AI"]),
        ];
        let embeddings = fixed(&[
            ("s", vec![1.0, 0.0]),
            ("t1", at_distance(0.8)),
            ("t2", at_distance(0.8)),
        ]);
        let found = scorer().find_candidates(&source, &pool, &CoverageIndex::new(), &embeddings, 3);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].target.id, "t2");
        assert_eq!(found[0].shared_concepts, vec!["ai".to_string()]);
    }

    #[test]
    fn test_generic_only_needs_two() {
        let source = Lens::new("s", "S", "").with_concepts(["strategy", "management"]);
        let pool = vec![
            Lens::new("t1", "T1", "").with_concepts(["strategy"]),
            Lens::new("t2", "T2", "").with_concepts(["strategy", "management"]),
        ];
        let embeddings = fixed(&[
            ("s", vec![1.0, 0.0]),
            ("t1", at_distance(0.8)),
            ("t2", at_distance(0.8)),
        ]);
        let found = scorer().find_candidates(&source, &pool, &CoverageIndex::new(), &embeddings, 3);
        let ids: Vec<_> = found.iter().map(|c| c.target.id.as_str()).collect();
        assert_eq!(ids, vec!["t2"]);
    }

    #[test]
    fn test_self_and_existing_pairs_skipped() {
        let source = Lens::new("s", "S", "").with_concepts(["ai"]);
        let pool = vec![source.clone(), Lens::new("t", "T", "").with_concepts(["ai"])];
        let embeddings = fixed(&[("s", vec![1.0, 0.0]), ("t", at_distance(0.8))]);

        let mut coverage = CoverageIndex::new();
        coverage.insert("t", "s");
        let found = scorer().find_candidates(&source, &pool, &coverage, &embeddings, 3);
        assert!(found.is_empty());
    }

    #[test]
    fn test_missing_embeddings_skipped() {
        let source = Lens::new("s", "S", "").with_concepts(["ai"]);
        let pool = vec![Lens::new("t", "T", "").with_concepts(["ai"])];

        let no_source = fixed(&[("t", at_distance(0.8))]);
        assert!(scorer()
            .find_candidates(&source, &pool, &CoverageIndex::new(), &no_source, 3)
            .is_empty());

        let no_target = fixed(&[("s", vec![1.0, 0.0])]);
        assert!(scorer()
            .find_candidates(&source, &pool, &CoverageIndex::new(), &no_target, 3)
            .is_empty());
    }

    #[test]
    fn test_mismatched_dimensions_skipped() {
        let source = Lens::new("s", "S", "").with_concepts(["ai"]);
        let pool = vec![Lens::new("t", "T", "").with_concepts(["ai"])];
        let embeddings = fixed(&[("s", vec![1.0, 0.0]), ("t", vec![0.2, 0.9, 0.1])]);
        assert!(scorer()
            .find_candidates(&source, &pool, &CoverageIndex::new(), &embeddings, 3)
            .is_empty());
    }

    #[test]
    fn test_ranked_and_truncated() {
        let source = Lens::new("s", "S", "Central control").with_concepts(["ai"]);
        let pool: Vec<Lens> = ["t1", "t2", "t3", "t4"]
            .iter()
            .map(|id| Lens::new(*id, *id, "").with_concepts(["ai"]))
            .collect();
        let embeddings = fixed(&[
            ("s", vec![1.0, 0.0]),
            ("t1", at_distance(0.7)),
            ("t2", at_distance(0.9)),
            ("t3", at_distance(0.8)),
            ("t4", at_distance(0.75)),
        ]);
        let found = scorer().find_candidates(&source, &pool, &CoverageIndex::new(), &embeddings, 3);
        let ids: Vec<_> = found.iter().map(|c| c.target.id.as_str()).collect();
        assert_eq!(ids, vec!["t2", "t3", "t4"]);
    }

    #[test]
    fn test_dialectic_breaks_distance_order() {
        let source = Lens::new("s", "S", "Favours central control").with_concepts(["ai"]);
        let pool = vec![
            Lens::new("far", "Far", "Unrelated").with_concepts(["ai"]),
            Lens::new("opposed", "Opposed", "Favours freedom").with_concepts(["ai"]),
        ];
        let embeddings = fixed(&[
            ("s", vec![1.0, 0.0]),
            ("far", at_distance(0.85)),
            ("opposed", at_distance(0.8)),
        ]);
        let found = scorer().find_candidates(&source, &pool, &CoverageIndex::new(), &embeddings, 3);
        assert_eq!(found[0].target.id, "opposed");
        assert!((found[0].dialectic_score - 0.2).abs() < 1e-9);
    }
}
