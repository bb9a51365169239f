use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{IngestError, Pipeline};

/// Drains the transport collaborator's delivery channel into the pipeline.
///
/// The transport serializes delivery callbacks, so at most one ingest call
/// is in flight at any instant. The loop ends on cancellation (clean stop,
/// `Ok`) or when the transport drops its sender
/// ([`IngestError::StreamClosed`]); either way the store keeps serving
/// whatever was accumulated.
pub struct Consumer {
    pipeline: Pipeline,
}

impl Consumer {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    /// Consume deliveries until the stream closes or `cancel` fires.
    ///
    /// Malformed payloads are logged and skipped — they never end the
    /// loop.
    pub async fn run(
        &self,
        mut deliveries: mpsc::Receiver<Vec<u8>>,
        cancel: CancellationToken,
    ) -> Result<(), IngestError> {
        tracing::info!("consumer started");
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!(
                        total = self.pipeline.store().stats().total_messages,
                        "consumer stopped"
                    );
                    return Ok(());
                }
                delivery = deliveries.recv() => match delivery {
                    Some(raw) => {
                        if let Err(e) = self.pipeline.ingest(&raw) {
                            tracing::warn!(error = %e, "skipping payload");
                        }
                    }
                    None => {
                        tracing::warn!(
                            total = self.pipeline.store().stats().total_messages,
                            "delivery stream closed"
                        );
                        return Err(IngestError::StreamClosed);
                    }
                }
            }
        }
    }

    /// The pipeline driving the store.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }
}
