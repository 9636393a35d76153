//! Host ⇄ pipeline boundary adapter.
//!
//! # Data Flow
//! ```text
//! HostRequest
//!     → inbound.rs (headers, query, request message, body, default response)
//!     → [decorator]
//!     → SessionContext → pipeline (external)
//!     → outbound.rs (status, headers, body)
//!     → HostResponse
//! ```
//!
//! # Design Decisions
//! - One factory instance serves every request; the decorator is its only
//!   shared state
//! - Body read failures are recovered on the way in; write failures are fatal
//!   on the way out

pub mod body;
pub mod error;
pub mod inbound;
pub mod outbound;

use std::sync::Arc;
use std::time::Duration;

pub use error::{AdapterError, AdapterErrorKind, AdapterResult};

use crate::config::AdapterConfig;
use crate::context::{
    ForwardedHeadersDecorator, SessionContext, SessionContextDecorator, SessionContextFactory,
};
use crate::host::{HostRequest, HostResponse};

/// Builds session contexts from host requests and writes them back.
#[derive(Clone, Default)]
pub struct ContextFactory {
    decorator: Option<Arc<dyn SessionContextDecorator>>,
    body_read_timeout: Option<Duration>,
}

impl ContextFactory {
    /// Factory with an optional decorator and no adapter-side read timeout.
    pub fn new(decorator: Option<Arc<dyn SessionContextDecorator>>) -> Self {
        Self {
            decorator,
            body_read_timeout: None,
        }
    }

    pub fn from_config(config: &AdapterConfig) -> Self {
        let decorator: Option<Arc<dyn SessionContextDecorator>> = if config.forwarded_headers {
            Some(Arc::new(ForwardedHeadersDecorator))
        } else {
            None
        };

        Self::new(decorator).with_body_read_timeout(config.body_read_timeout())
    }

    /// Give up on a body chunk that takes longer than `timeout` to arrive.
    pub fn with_body_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.body_read_timeout = timeout;
        self
    }

    pub fn body_read_timeout(&self) -> Option<Duration> {
        self.body_read_timeout
    }

    pub fn has_decorator(&self) -> bool {
        self.decorator.is_some()
    }

    fn decorate(&self, ctx: SessionContext) -> SessionContext {
        match &self.decorator {
            Some(decorator) => decorator.decorate(ctx),
            None => ctx,
        }
    }
}

impl std::fmt::Debug for ContextFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextFactory")
            .field("decorator", &self.decorator.is_some())
            .field("body_read_timeout", &self.body_read_timeout)
            .finish()
    }
}

impl<Req, Resp> SessionContextFactory<Req, Resp> for ContextFactory
where
    Req: HostRequest + Send,
    Resp: HostResponse + Send,
{
    async fn create(&self, request: Req) -> SessionContext {
        self.create_context(request).await
    }

    async fn write(&self, ctx: &SessionContext, response: &mut Resp) -> AdapterResult<()> {
        self.write_context(ctx, response).await
    }
}
