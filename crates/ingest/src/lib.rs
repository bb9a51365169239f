//! Ingestion path from raw broker payloads to the aggregation store.
//!
//! The transport collaborator (broker client) delivers opaque byte
//! payloads over a channel; the [`Consumer`] drains that channel and feeds
//! each payload through the [`Pipeline`], which decodes it, stamps the
//! ingestion time, and folds it into the shared store. One bad message
//! never halts the stream — malformed payloads are counted, logged, and
//! dropped.

mod consumer;
mod pipeline;

pub use consumer::Consumer;
pub use pipeline::Pipeline;

/// Errors produced by the ingestion path.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The payload did not decode as a telemetry JSON object. Per-message
    /// and non-fatal: the consumer loop counts it and moves on.
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// The transport collaborator closed the delivery stream. Terminal
    /// for the consumer loop; the accumulated store state stays valid
    /// and readable.
    #[error("delivery stream closed")]
    StreamClosed,
}
