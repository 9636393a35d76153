//! Request body buffering.
//!
//! # Responsibilities
//! - Drain a host body stream into one contiguous buffer
//! - Tell a read timeout apart from any other read failure
//!
//! # Design Decisions
//! - A timeout is either reported by the host (`ErrorKind::TimedOut`) or
//!   enforced here per chunk when a read timeout is configured
//! - Whatever was read before a failure is discarded
//! - A stream that ends without yielding bytes means "no body"

use std::io;
use std::time::Duration;

use axum::body::Bytes;
use futures_util::{Stream, StreamExt};

/// Why a body could not be buffered.
#[derive(Debug)]
pub enum BodyReadFailure {
    /// The host, or the configured read timeout, gave up waiting for data.
    TimedOut,
    /// Any other read error.
    Io(io::Error),
}

impl BodyReadFailure {
    /// Metric/log label for this failure.
    pub fn label(&self) -> &'static str {
        match self {
            BodyReadFailure::TimedOut => "timeout",
            BodyReadFailure::Io(_) => "io",
        }
    }
}

/// Read `body` to the end.
///
/// Returns `Ok(None)` for an empty body.
pub async fn buffer_body<S>(
    mut body: S,
    read_timeout: Option<Duration>,
) -> Result<Option<Bytes>, BodyReadFailure>
where
    S: Stream<Item = io::Result<Bytes>> + Unpin,
{
    let mut chunks: Vec<Bytes> = Vec::new();

    loop {
        let next = match read_timeout {
            Some(limit) => tokio::time::timeout(limit, body.next())
                .await
                .map_err(|_| BodyReadFailure::TimedOut)?,
            None => body.next().await,
        };

        match next {
            Some(Ok(chunk)) => {
                if !chunk.is_empty() {
                    chunks.push(chunk);
                }
            }
            Some(Err(err)) if err.kind() == io::ErrorKind::TimedOut => {
                return Err(BodyReadFailure::TimedOut);
            }
            Some(Err(err)) => return Err(BodyReadFailure::Io(err)),
            None => break,
        }
    }

    Ok(match chunks.len() {
        0 => None,
        1 => chunks.pop(),
        _ => Some(Bytes::from(chunks.concat())),
    })
}
