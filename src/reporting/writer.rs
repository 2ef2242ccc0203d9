use std::path::{Path, PathBuf};
use tracing::info;
use crate::errors::ReportError;
use crate::models::ReportBatch;
use super::csv::render_csv;
use super::naming::OutputTarget;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written { path: PathBuf, rows: usize },
    /// Batch had no findings; nothing was created on disk.
    Empty,
}

/// Write a batch as CSV under `dir`. An empty batch, or one whose records
/// carry no fields, creates no file.
///
/// The path is resolved only once there is something to write, so an empty
/// report never claims a free `output_<n>.csv` slot.
pub async fn write_report(batch: &ReportBatch, dir: &Path, target: OutputTarget) -> Result<WriteOutcome, ReportError> {
    let Some(data) = render_csv(batch)? else {
        info!("No findings in report, skipping CSV output");
        return Ok(WriteOutcome::Empty);
    };

    tokio::fs::create_dir_all(dir).await?;
    let path = target.resolve(dir);
    tokio::fs::write(&path, &data).await?;

    info!(path = %path.display(), rows = batch.len(), "Report saved");
    Ok(WriteOutcome::Written { path, rows: batch.len() })
}
