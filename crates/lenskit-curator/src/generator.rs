//! Contrast batch driver
//!
//! Walks every lens without a contrast, picks its best admissible partner and
//! assembles the relationship. Pairs generated during the run are registered
//! immediately, so the same unordered pair is never produced twice; a lens that
//! became the target of an earlier contrast is still processed as a source.

use crate::scorer::CandidateScorer;
use crate::{ContrastConfig, CuratorError, RunMetrics};
use lenskit_domain::traits::EmbeddingSource;
use lenskit_domain::{compose_insight, Contrast, ContrastMetadata, CoverageIndex, Lens, RelationshipRef, WeightMapping};
use std::time::Instant;

/// Value of `generated_by` in every contrast this crate produces
pub const GENERATED_BY: &str = concat!("lenskit-curator/", env!("CARGO_PKG_VERSION"));

/// Result of a generation run
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// Generated contrasts, in processing order
    pub contrasts: Vec<Contrast>,

    /// Run counters
    pub metrics: RunMetrics,
}

/// Generates contrasts for uncovered lenses
pub struct ContrastGenerator {
    config: ContrastConfig,
    scorer: CandidateScorer,
    weights: WeightMapping,
    lenses: Vec<Lens>,
    coverage: CoverageIndex,
}

impl ContrastGenerator {
    /// Create a generator over `lenses` given the relationships that already exist
    ///
    /// Only contrast relationships count toward coverage.
    pub fn new(
        config: ContrastConfig,
        lenses: Vec<Lens>,
        existing: &[RelationshipRef],
    ) -> Result<Self, CuratorError> {
        config.validate()?;
        let coverage = CoverageIndex::from_relationships(existing);
        tracing::info!(
            lenses = lenses.len(),
            covered = coverage.covered_count(),
            pairs = coverage.pair_count(),
            "loaded contrast coverage"
        );
        Ok(Self {
            scorer: CandidateScorer::new(&config),
            weights: config.weight_mapping(),
            config,
            lenses,
            coverage,
        })
    }

    /// Current coverage, including pairs generated so far
    pub fn coverage(&self) -> &CoverageIndex {
        &self.coverage
    }

    /// Lenses not covered by any contrast, in store order
    pub fn uncovered(&self) -> Vec<&Lens> {
        self.coverage.partition(&self.lenses).1
    }

    /// Run one batch, processing at most `limit` uncovered lenses
    pub fn generate<E>(&mut self, embeddings: &E, limit: Option<usize>) -> GenerationOutcome
    where
        E: EmbeddingSource + ?Sized,
    {
        let start = Instant::now();
        let mut metrics = RunMetrics::new();

        let (covered, uncovered) = self.coverage.partition(&self.lenses);
        metrics.lenses_total = self.lenses.len();
        metrics.covered_before = covered.len();
        let mut queue: Vec<Lens> = uncovered.into_iter().cloned().collect();
        if let Some(limit) = limit {
            queue.truncate(limit);
            tracing::info!("Processing first {} uncovered lenses", queue.len());
        }
        metrics.queued = queue.len();

        let total = queue.len();
        let mut contrasts = Vec::new();
        for (i, source) in queue.iter().enumerate() {
            tracing::info!("[{}/{}] Finding contrasts for: {}", i + 1, total, source.name);

            let contrast = self.best_contrast(source, embeddings);
            metrics.record_processed(contrast.is_some());

            match contrast {
                Some(contrast) => {
                    self.coverage.insert(&contrast.source_id, &contrast.target_id);
                    contrasts.push(contrast);
                }
                None => tracing::info!("  No suitable candidates found"),
            }
        }

        metrics.elapsed = start.elapsed();
        tracing::info!(
            processed = metrics.processed,
            generated = metrics.generated,
            without_candidate = metrics.without_candidate,
            "contrast run complete"
        );
        GenerationOutcome { contrasts, metrics }
    }

    fn best_contrast<E>(&self, source: &Lens, embeddings: &E) -> Option<Contrast>
    where
        E: EmbeddingSource + ?Sized,
    {
        let candidates =
            self.scorer
                .find_candidates(source, &self.lenses, &self.coverage, embeddings, self.config.top_n);
        let best = candidates.into_iter().next()?;

        let weight = self.weights.weight(best.combined_score);
        tracing::info!(
            "  → {} (dist: {:.3}, dial: {:.2}, score: {:.3}, weight: {:.2})",
            best.target.name,
            best.distance,
            best.dialectic_score,
            best.combined_score,
            weight
        );

        Some(Contrast {
            source_id: source.id.clone(),
            target_id: best.target.id.clone(),
            weight,
            insight: compose_insight(source, best.target, &best.shared_concepts, self.config.excerpt_chars),
            metadata: ContrastMetadata {
                distance: best.distance,
                dialectic_score: best.dialectic_score,
                combined_score: best.combined_score,
                shared_concepts: best.shared_concepts,
                generated_by: GENERATED_BY.to_string(),
            },
        })
    }
}
