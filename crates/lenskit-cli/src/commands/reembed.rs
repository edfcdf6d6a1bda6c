//! Reembed command implementation.

use crate::cli::ReembedArgs;
use crate::error::Result;
use crate::output::Formatter;
use lenskit_curator::{reembed, ReembedConfig, ReembedOptions, ReembedReport};
use lenskit_domain::traits::{EmbeddingModel, LensStore};
use std::fmt::Display;

/// Execute the reembed command.
pub fn execute_reembed<S, M>(
    args: ReembedArgs,
    store: &mut S,
    model: &M,
    config: &ReembedConfig,
    formatter: &Formatter,
) -> Result<ReembedReport>
where
    S: LensStore,
    S::Error: Display,
    M: EmbeddingModel,
    M::Error: Display,
{
    let options = ReembedOptions {
        limit: args.limit,
        dry_run: args.dry_run,
    };
    tracing::info!(dimension = model.dimension(), dry_run = options.dry_run, "re-embedding lenses");

    let report = reembed(store, model, config, &options)?;
    println!("{}", formatter.format_reembed(&report)?);
    Ok(report)
}
