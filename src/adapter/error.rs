//! Adapter error definitions.

use std::io;
use thiserror::Error;

/// Fatal failures while writing a session context to the host.
///
/// Body-read failures on the inbound side never surface here; they are
/// recovered inside the translator.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// A pipeline stage left the context without a response message.
    #[error("session context has no response message to write")]
    MissingResponse,

    /// The host transport rejected the status, a header or the body.
    #[error("failed writing response to host: {0}")]
    Write(#[source] io::Error),
}

/// Coarse classification of an [`AdapterError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterErrorKind {
    /// Programming-contract violation inside the pipeline.
    Invariant,
    /// Transport failure; the connection is assumed broken.
    Io,
}

impl AdapterError {
    pub fn kind(&self) -> AdapterErrorKind {
        match self {
            AdapterError::MissingResponse => AdapterErrorKind::Invariant,
            AdapterError::Write(_) => AdapterErrorKind::Io,
        }
    }
}

/// Result type for adapter write operations.
pub type AdapterResult<T> = Result<T, AdapterError>;
