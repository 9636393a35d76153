//! Host transport abstraction.
//!
//! # Data Flow
//! ```text
//! host transport (hyper/axum)
//!     → HostRequest (headers, query, protocol, method, path, scheme, client, body)
//!     → [adapter builds SessionContext]
//!     → [pipeline]
//!     → [adapter writes SessionContext]
//!     → HostResponse (status, headers, output stream)
//!     → host transport
//! ```
//!
//! # Design Decisions
//! - HTTP syntax is parsed by the host; these traits only expose accessors
//! - The body is a stream of byte chunks so the adapter decides how to buffer
//! - Header output goes through a replacing setter, like most host APIs

pub mod axum_host;

use std::io;

use axum::body::Bytes;
use futures_util::Stream;
use tokio::io::AsyncWrite;

/// Inbound side of the host transport.
pub trait HostRequest {
    /// Body chunks. Errors of kind [`io::ErrorKind::TimedOut`] are treated as
    /// read timeouts.
    type Body: Stream<Item = io::Result<Bytes>> + Send + Unpin;

    /// Distinct header names, in the host's enumeration order.
    fn header_names(&self) -> Vec<String>;

    /// Every value of `name`, in the host's enumeration order.
    fn header_values(&self, name: &str) -> Vec<String>;

    /// Raw query string without the leading `?`.
    fn query_string(&self) -> Option<&str>;

    fn protocol(&self) -> String;

    fn method(&self) -> &str;

    fn path(&self) -> &str;

    fn scheme(&self) -> &str;

    fn client_address(&self) -> String;

    /// Hand over the body stream. Called once, after the accessors above.
    fn take_body(&mut self) -> Self::Body;
}

/// Outbound side of the host transport.
pub trait HostResponse {
    type Output: AsyncWrite + Send + Unpin;

    fn set_status(&mut self, status: u16) -> io::Result<()>;

    /// Set `name` to `value`, replacing whatever was set for `name` before.
    fn set_header(&mut self, name: &str, value: &str) -> io::Result<()>;

    fn output(&mut self) -> &mut Self::Output;
}
