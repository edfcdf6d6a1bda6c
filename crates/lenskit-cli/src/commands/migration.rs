//! Migration command implementation.

use crate::error::Result;
use crate::output::Formatter;
use lenskit_curator::MigrationReport;
use lenskit_domain::traits::LensStore;
use lenskit_store::StoreError;

/// Execute the migration command.
///
/// Read-only: the schema statements are printed for an operator, never run.
pub fn execute_migration<S>(
    store: &S,
    table: &str,
    fallback_dimension: usize,
    formatter: &Formatter,
) -> Result<MigrationReport>
where
    S: LensStore<Error = StoreError>,
{
    let probes = store.embedding_census()?;
    let report = MigrationReport::from_probes(&probes, table, fallback_dimension);
    tracing::info!(
        encoded = report.encoded,
        native = report.native,
        dimension = report.dimension,
        "migration census complete"
    );
    println!("{}", formatter.format_migration(&report)?);
    Ok(report)
}
