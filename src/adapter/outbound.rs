//! Outbound writing: session context → host response.
//!
//! Headers go through the host's replacing setter one stored value at a
//! time, so a header name with several values ends up with only the last
//! one on the wire.

use tokio::io::AsyncWriteExt;

use crate::adapter::{AdapterError, AdapterResult, ContextFactory};
use crate::context::SessionContext;
use crate::host::HostResponse;
use crate::observability::metrics;

impl ContextFactory {
    /// Write the context's response message to `host`.
    pub async fn write_context<W>(&self, ctx: &SessionContext, host: &mut W) -> AdapterResult<()>
    where
        W: HostResponse,
    {
        let result = write_response(ctx, host).await;
        match &result {
            Ok(()) => metrics::record_response_written("ok"),
            Err(AdapterError::MissingResponse) => {
                metrics::record_response_written("missing_response");
                tracing::error!(
                    method = %ctx.request().method(),
                    path = %ctx.request().path(),
                    "No response message attached to session context"
                );
            }
            Err(AdapterError::Write(err)) => {
                metrics::record_response_written("write_error");
                tracing::error!(
                    method = %ctx.request().method(),
                    path = %ctx.request().path(),
                    error = %err,
                    "Failed writing response to host"
                );
            }
        }
        result
    }
}

async fn write_response<W: HostResponse>(ctx: &SessionContext, host: &mut W) -> AdapterResult<()> {
    let response = ctx.response().ok_or(AdapterError::MissingResponse)?;

    host.set_status(response.status())
        .map_err(AdapterError::Write)?;

    for (name, value) in response.headers().entries() {
        host.set_header(name, value).map_err(AdapterError::Write)?;
    }

    if let Some(body) = response.body() {
        let output = host.output();
        output.write_all(body).await.map_err(AdapterError::Write)?;
        output.flush().await.map_err(AdapterError::Write)?;
    }

    Ok(())
}
