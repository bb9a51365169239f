use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use visormon_store::SharedStore;

use crate::{ExportError, export_rows, write_csv};

/// Periodically exports the current store contents to timestamped CSV
/// files in a target directory.
///
/// Runs independently of ingestion: each tick reads the then-current
/// snapshot copy. An empty store is a no-op, not an error, and a failed
/// write is logged without stopping the schedule.
pub struct AutoExporter {
    store: SharedStore,
    dir: PathBuf,
    period: Duration,
}

impl AutoExporter {
    pub fn new(store: SharedStore, dir: impl Into<PathBuf>, period: Duration) -> Self {
        Self {
            store,
            dir: dir.into(),
            period,
        }
    }

    /// Export the current snapshot once.
    ///
    /// Returns the written path, or `None` when the store holds no
    /// samples.
    pub fn export_once(&self) -> Result<Option<PathBuf>, ExportError> {
        let samples = self.store.samples();
        if samples.is_empty() {
            return Ok(None);
        }

        let table = export_rows(&samples);
        let filename = format!("vr_telemetry_{}.csv", Utc::now().format("%Y%m%d_%H%M%S"));
        let path = self.dir.join(filename);
        write_csv(&path, &table)?;
        Ok(Some(path))
    }

    /// Run the export schedule until cancellation.
    ///
    /// A zero period disables auto-export entirely.
    pub async fn run(&self, cancel: CancellationToken) {
        if self.period.is_zero() {
            tracing::info!("auto-export disabled");
            return;
        }

        let mut interval = tokio::time::interval(self.period);
        interval.tick().await; // Skip immediate first tick.

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("auto-exporter stopped");
                    return;
                }
                _ = interval.tick() => match self.export_once() {
                    Ok(Some(path)) => {
                        tracing::info!(path = %path.display(), "exported telemetry");
                    }
                    Ok(None) => {
                        tracing::debug!("store empty, skipping export");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "export failed");
                    }
                }
            }
        }
    }

    /// Target directory for exported files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
