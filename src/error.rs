// error.rs

use crate::coordinator::Phase;
use crate::message::MessageKind;
use thiserror::Error;

/// Failure of the external text-generation call. Callers do not retry;
/// a failed call aborts the phase that issued it.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The generation service raised (network, quota, model missing, ...).
    #[error("generation service error: {0}")]
    Service(String),

    /// The service answered but returned no usable content.
    #[error("generation returned no usable content")]
    EmptyResponse,
}

/// Errors surfaced by a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The generation call inside a phase failed.
    #[error("{phase} phase failed: {source}")]
    Generation {
        phase: Phase,
        #[source]
        source: GenerationError,
    },

    /// A downstream phase found no matching message in its inbox. Fatal for
    /// the run; the coordinator never returns a partial result.
    #[error("pipeline incomplete: no {expected} message reached the {phase} phase")]
    Incomplete {
        phase: Phase,
        expected: MessageKind,
    },

    /// The finished article could not be written to the persistence sink.
    /// The article text is carried here so the caller can still recover it.
    #[error("failed to persist article for topic '{topic}': {source}")]
    Persistence {
        topic: String,
        article: String,
        #[source]
        source: std::io::Error,
    },

    /// The mailbox audit log could not be exported.
    #[error("message log export failed: {0}")]
    LogExport(#[source] std::io::Error),
}
