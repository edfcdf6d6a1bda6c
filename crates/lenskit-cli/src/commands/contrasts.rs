//! Contrasts command implementation.

use crate::cli::ContrastsArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use lenskit_curator::{
    load_connections, write_batch, ContrastBatch, ContrastConfig, ContrastGenerator, GenerationOutcome,
    StoreEmbeddings,
};
use lenskit_domain::traits::LensStore;
use lenskit_store::StoreError;

/// Execute the contrasts command.
///
/// Fails before any scoring when the connections file or the lens list
/// cannot be read.
pub fn execute_contrasts<S>(
    args: ContrastsArgs,
    store: &S,
    config: &ContrastConfig,
    formatter: &Formatter,
) -> Result<GenerationOutcome>
where
    S: LensStore<Error = StoreError>,
{
    let mut config = config.clone();
    if let Some(top_n) = args.top_n {
        if top_n == 0 {
            return Err(CliError::InvalidInput("--top-n must be at least 1".to_string()));
        }
        config.top_n = top_n;
    }

    let existing = load_connections(&args.connections)?;
    let lenses = store.list_lenses()?;
    tracing::info!("Found {} lenses", lenses.len());

    let mut generator = ContrastGenerator::new(config, lenses, &existing)?;
    tracing::info!("Lenses without contrasts: {}", generator.uncovered().len());

    let embeddings = StoreEmbeddings::new(store);
    let mut outcome = generator.generate(&embeddings, args.limit);
    outcome.metrics.embedding_misses = embeddings.misses();
    outcome.metrics.embedding_failures = embeddings.failures();

    let batch = ContrastBatch::new(&outcome.contrasts, &args.output);
    write_batch(&args.output, &batch)?;

    if formatter.is_json() {
        println!("{}", formatter.json(&batch)?);
        return Ok(outcome);
    }

    println!("{}", formatter.format_contrasts(&outcome.contrasts));
    println!();
    println!(
        "{}",
        formatter.success(&format!(
            "Generated {} new contrasts, saved to {}",
            outcome.contrasts.len(),
            args.output.display()
        ))
    );
    println!("{}", formatter.info("Next steps:"));
    println!("  1. Review {} and edit or remove weak contrasts", args.output.display());
    println!("  2. Merge the reviewed entries into {}", args.connections.display());
    println!();
    println!("{}", outcome.metrics.summary());

    Ok(outcome)
}
