//! Audit command implementation.

use crate::error::Result;
use crate::output::Formatter;
use lenskit_curator::AuditReport;
use lenskit_domain::traits::LensStore;
use lenskit_store::StoreError;

/// Execute the audit command.
pub fn execute_audit<S>(store: &S, formatter: &Formatter) -> Result<AuditReport>
where
    S: LensStore<Error = StoreError>,
{
    let probes = store.embedding_census()?;
    tracing::info!("Found {} lenses", probes.len());

    let report = AuditReport::from_probes(&probes);
    println!("{}", formatter.format_audit(&report)?);
    Ok(report)
}
