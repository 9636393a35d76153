//! Outbound response representation.
//!
//! # Design Decisions
//! - Created with status 200 and nothing else by the inbound translator
//! - Pipeline stages fill it in through the setters before the writer runs
//! - Status is a plain `u16`; the host decides what it accepts

use axum::body::Bytes;

use crate::message::headers::Headers;

/// Protocol-agnostic response populated by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponseMessage {
    status: u16,
    headers: Headers,
    body: Option<Bytes>,
}

impl HttpResponseMessage {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Headers::new(),
            body: None,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = Some(body.into());
    }

    pub fn clear_body(&mut self) {
        self.body = None;
    }
}

impl Default for HttpResponseMessage {
    fn default() -> Self {
        Self::new(200)
    }
}
