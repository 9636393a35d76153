//! Inbound request representation.
//!
//! A request message is fixed once the inbound translator has built it. A
//! stage that wants a different request builds a new one and swaps it into
//! the [`SessionContext`](crate::context::SessionContext).

use axum::body::Bytes;

use crate::message::headers::Headers;
use crate::message::query::QueryParams;

/// Protocol-agnostic view of one inbound HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequestMessage {
    protocol: String,
    method: String,
    path: String,
    query_params: QueryParams,
    headers: Headers,
    client_address: String,
    scheme: String,
    body: Option<Bytes>,
}

impl HttpRequestMessage {
    /// Create a request with no body.
    pub fn new(
        protocol: impl Into<String>,
        method: impl Into<String>,
        path: impl Into<String>,
        query_params: QueryParams,
        headers: Headers,
        client_address: impl Into<String>,
        scheme: impl Into<String>,
    ) -> Self {
        Self {
            protocol: protocol.into(),
            method: method.into(),
            path: path.into(),
            query_params,
            headers,
            client_address: client_address.into(),
            scheme: scheme.into(),
            body: None,
        }
    }

    /// Attach the buffered body. Only used while the message is being built.
    pub fn with_body(mut self, body: Option<Bytes>) -> Self {
        self.body = body;
        self
    }

    /// Same request with a different header set.
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Protocol version as reported by the host, e.g. `HTTP/1.1`.
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_params(&self) -> &QueryParams {
        &self.query_params
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn client_address(&self) -> &str {
        &self.client_address
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Buffered payload. `None` when the request had no body or it could
    /// not be read.
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }
}
