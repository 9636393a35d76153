//! Per-request session context.
//!
//! # States
//! ```text
//! Created → [Decorated]? → (pipeline) → Written
//! ```
//! A context is owned by the task serving its request, so nothing here is
//! synchronised. Either half can be swapped for a new instance, and the
//! response slot can be emptied by a stage that takes ownership of it.

use crate::message::{HttpRequestMessage, HttpResponseMessage};

/// Request/response pairing threaded through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    request: HttpRequestMessage,
    response: Option<HttpResponseMessage>,
}

impl SessionContext {
    pub fn new(request: HttpRequestMessage, response: HttpResponseMessage) -> Self {
        Self {
            request,
            response: Some(response),
        }
    }

    pub fn request(&self) -> &HttpRequestMessage {
        &self.request
    }

    /// Swap in a new request, returning the old one.
    pub fn replace_request(&mut self, request: HttpRequestMessage) -> HttpRequestMessage {
        std::mem::replace(&mut self.request, request)
    }

    pub fn response(&self) -> Option<&HttpResponseMessage> {
        self.response.as_ref()
    }

    pub fn response_mut(&mut self) -> Option<&mut HttpResponseMessage> {
        self.response.as_mut()
    }

    /// Attach a response, returning the previous one if any.
    pub fn set_response(&mut self, response: HttpResponseMessage) -> Option<HttpResponseMessage> {
        self.response.replace(response)
    }

    /// Detach the response, leaving the slot empty.
    pub fn take_response(&mut self) -> Option<HttpResponseMessage> {
        self.response.take()
    }

    pub fn into_parts(self) -> (HttpRequestMessage, Option<HttpResponseMessage>) {
        (self.request, self.response)
    }
}
