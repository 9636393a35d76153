//! axum/hyper implementation of the host traits.
//!
//! # Responsibilities
//! - Expose an `axum::extract::Request` and its peer address as a [`HostRequest`]
//! - Collect status, headers and body written by the adapter into an
//!   `axum::response::Response`
//!
//! # Design Decisions
//! - Header names come out lowercased, as hyper stores them
//! - Non-UTF-8 header bytes are decoded lossily rather than dropped
//! - Body errors take the `io::ErrorKind` of the first `io::Error` in their
//!   source chain, so a transport timeout wrapped by hyper still reads as a
//!   timeout

use std::error::Error as StdError;
use std::io;
use std::net::SocketAddr;
use std::pin::Pin;

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{request::Parts, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::Response,
};
use futures_util::{stream, Stream, StreamExt};

use crate::host::{HostRequest, HostResponse};

/// Body chunk stream handed to the adapter.
pub type BodyStream = Pin<Box<dyn Stream<Item = io::Result<Bytes>> + Send>>;

/// An inbound axum request viewed through [`HostRequest`].
pub struct AxumHostRequest {
    parts: Parts,
    body: Option<Body>,
    remote_addr: Option<SocketAddr>,
}

impl AxumHostRequest {
    pub fn new(request: Request, remote_addr: Option<SocketAddr>) -> Self {
        let (parts, body) = request.into_parts();
        Self {
            parts,
            body: Some(body),
            remote_addr,
        }
    }
}

impl HostRequest for AxumHostRequest {
    type Body = BodyStream;

    fn header_names(&self) -> Vec<String> {
        self.parts
            .headers
            .keys()
            .map(|name| name.as_str().to_string())
            .collect()
    }

    fn header_values(&self, name: &str) -> Vec<String> {
        self.parts
            .headers
            .get_all(name)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .collect()
    }

    fn query_string(&self) -> Option<&str> {
        self.parts.uri.query()
    }

    fn protocol(&self) -> String {
        format!("{:?}", self.parts.version)
    }

    fn method(&self) -> &str {
        self.parts.method.as_str()
    }

    fn path(&self) -> &str {
        self.parts.uri.path()
    }

    fn scheme(&self) -> &str {
        self.parts.uri.scheme_str().unwrap_or("http")
    }

    fn client_address(&self) -> String {
        self.remote_addr
            .map(|addr| addr.ip().to_string())
            .unwrap_or_default()
    }

    fn take_body(&mut self) -> Self::Body {
        match self.body.take() {
            Some(body) => Box::pin(
                body.into_data_stream()
                    .map(|chunk| chunk.map_err(into_io_error)),
            ),
            None => Box::pin(stream::empty()),
        }
    }
}

fn into_io_error(err: axum::Error) -> io::Error {
    let inner = err.into_inner();
    let kind = io_kind_in_chain(inner.as_ref()).unwrap_or(io::ErrorKind::Other);
    match inner.downcast::<io::Error>() {
        Ok(io_err) => *io_err,
        Err(other) => io::Error::new(kind, other),
    }
}

fn io_kind_in_chain(err: &(dyn StdError + 'static)) -> Option<io::ErrorKind> {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(io_err) = e.downcast_ref::<io::Error>() {
            return Some(io_err.kind());
        }
        current = e.source();
    }
    None
}

/// Collects what the adapter writes and turns it into an axum response.
#[derive(Debug)]
pub struct AxumHostResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl AxumHostResponse {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

impl Default for AxumHostResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl HostResponse for AxumHostResponse {
    type Output = Vec<u8>;

    fn set_status(&mut self, status: u16) -> io::Result<()> {
        self.status = StatusCode::from_u16(status)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        Ok(())
    }

    fn set_header(&mut self, name: &str, value: &str) -> io::Result<()> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        self.headers.insert(name, value);
        Ok(())
    }

    fn output(&mut self) -> &mut Self::Output {
        &mut self.body
    }
}
