//! Context decoration hook.
//!
//! # Responsibilities
//! - Let a deployment transform or replace a freshly built context
//! - Ship one stock decorator that stamps forwarding headers
//!
//! # Design Decisions
//! - One method, injected once at startup as `Option<Arc<dyn ...>>`
//! - Shared by every in-flight request, hence `Send + Sync`
//! - The returned context replaces the input entirely

use crate::context::session::SessionContext;

pub const X_FORWARDED_FOR: &str = "X-Forwarded-For";
pub const X_FORWARDED_PROTO: &str = "X-Forwarded-Proto";

/// Transforms a session context before it enters the pipeline.
pub trait SessionContextDecorator: Send + Sync {
    fn decorate(&self, ctx: SessionContext) -> SessionContext;
}

impl<F> SessionContextDecorator for F
where
    F: Fn(SessionContext) -> SessionContext + Send + Sync,
{
    fn decorate(&self, ctx: SessionContext) -> SessionContext {
        self(ctx)
    }
}

/// Stamps `X-Forwarded-For` and `X-Forwarded-Proto` onto the request.
///
/// Values sent by the client are discarded: both headers are rewritten from
/// the peer address and scheme this edge actually observed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardedHeadersDecorator;

impl SessionContextDecorator for ForwardedHeadersDecorator {
    fn decorate(&self, mut ctx: SessionContext) -> SessionContext {
        let request = ctx.request();
        let mut headers = request.headers().clone();
        if request.client_address().is_empty() {
            headers.remove(X_FORWARDED_FOR);
        } else {
            headers.set(X_FORWARDED_FOR, request.client_address());
        }
        headers.set(X_FORWARDED_PROTO, request.scheme());

        let rebuilt = request.clone().with_headers(headers);
        ctx.replace_request(rebuilt);
        ctx
    }
}
