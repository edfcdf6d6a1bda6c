//! Bulk re-embedding of every lens with a new model

use crate::{CuratorError, ReembedConfig};
use lenskit_domain::traits::{EmbeddingModel, LensStore};
use serde::Serialize;
use std::fmt::Display;
use std::thread;

/// Names listed by a dry run
pub const PREVIEW_COUNT: usize = 5;

/// Per-invocation options
#[derive(Debug, Clone, Default)]
pub struct ReembedOptions {
    /// Process only the first N lenses
    pub limit: Option<usize>,

    /// Report what would be updated without embedding or writing
    pub dry_run: bool,
}

/// Outcome of a re-embedding run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReembedReport {
    /// Lenses selected for processing
    pub total: usize,

    /// Embeddings written
    pub updated: usize,

    /// Lenses that failed to embed or update
    pub errors: usize,

    /// Names of the failed lenses
    pub failed: Vec<String>,

    /// Whether this was a dry run
    pub dry_run: bool,

    /// First few lens names (dry run only)
    pub preview: Vec<String>,
}

/// Recompute and store the embedding of every lens
///
/// Failing to list lenses aborts the run; a failure on one lens is logged,
/// counted, and the loop moves on.
pub fn reembed<S, M>(
    store: &mut S,
    model: &M,
    config: &ReembedConfig,
    options: &ReembedOptions,
) -> Result<ReembedReport, CuratorError>
where
    S: LensStore,
    S::Error: Display,
    M: EmbeddingModel,
    M::Error: Display,
{
    config.validate()?;

    let mut lenses = store
        .list_lenses()
        .map_err(|e| CuratorError::Store(e.to_string()))?;
    tracing::info!("Found {} lenses", lenses.len());
    if let Some(limit) = options.limit {
        lenses.truncate(limit);
        tracing::info!("Limited to {} lenses", lenses.len());
    }

    let mut report = ReembedReport {
        total: lenses.len(),
        dry_run: options.dry_run,
        ..Default::default()
    };

    if options.dry_run {
        report.preview = lenses.iter().take(PREVIEW_COUNT).map(|l| l.name.clone()).collect();
        tracing::info!("DRY RUN: would update {} lenses", lenses.len());
        return Ok(report);
    }

    let expected = model.dimension();
    let throttle = config.throttle();

    for (i, lens) in lenses.iter().enumerate() {
        let result = model
            .embed(&lens.embedding_text())
            .map_err(|e| e.to_string())
            .and_then(|vector| {
                if vector.len() == expected {
                    Ok(vector)
                } else {
                    Err(format!("expected {} dimensions, got {}", expected, vector.len()))
                }
            })
            .and_then(|vector| {
                store
                    .update_embedding(&lens.id, &vector)
                    .map_err(|e| e.to_string())
            });

        match result {
            Ok(()) => report.updated += 1,
            Err(e) => {
                tracing::error!(lens_id = %lens.id, "Error processing {}: {}", lens.name, e);
                report.errors += 1;
                report.failed.push(lens.name.clone());
            }
        }

        if (i + 1) % config.progress_every == 0 {
            tracing::info!("Progress: {}/{} lenses", i + 1, lenses.len());
        }
        if !throttle.is_zero() {
            thread::sleep(throttle);
        }
    }

    tracing::info!(
        updated = report.updated,
        errors = report.errors,
        "re-embedding complete"
    );
    Ok(report)
}
