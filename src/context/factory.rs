//! Session context factory seam.
//!
//! The two operations every host binding needs: turn a host request into a
//! [`SessionContext`], and write a finished context to a host response.

use std::future::Future;

use crate::adapter::AdapterResult;
use crate::context::session::SessionContext;

/// Creates contexts from `Req` and writes them to `Resp`.
///
/// `create` resolves immediately for in-memory hosts, but callers must
/// always await it.
pub trait SessionContextFactory<Req, Resp> {
    fn create(&self, request: Req) -> impl Future<Output = SessionContext> + Send;

    fn write(
        &self,
        ctx: &SessionContext,
        response: &mut Resp,
    ) -> impl Future<Output = AdapterResult<()>> + Send;
}
