//! Pipeline seam.
//!
//! Everything between context creation and context writing (routing,
//! filters, backend calls) belongs to a [`Pipeline`]. The server only needs
//! the trait; [`EchoPipeline`] is the stand-in used when nothing else is
//! plugged in.

use futures_util::future::BoxFuture;
use serde::Serialize;

use crate::context::SessionContext;
use crate::message::HttpRequestMessage;

/// Processes a session context and hands it back with a response attached.
pub trait Pipeline: Send + Sync {
    fn process(&self, ctx: SessionContext) -> BoxFuture<'_, SessionContext>;
}

/// Describes the inbound request back to the client as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoPipeline;

#[derive(Serialize)]
struct EchoBody<'a> {
    protocol: &'a str,
    method: &'a str,
    path: &'a str,
    scheme: &'a str,
    client_address: &'a str,
    query: Vec<(&'a str, &'a str)>,
    headers: Vec<(&'a str, &'a str)>,
    body_bytes: Option<usize>,
}

impl<'a> From<&'a HttpRequestMessage> for EchoBody<'a> {
    fn from(request: &'a HttpRequestMessage) -> Self {
        Self {
            protocol: request.protocol(),
            method: request.method(),
            path: request.path(),
            scheme: request.scheme(),
            client_address: request.client_address(),
            query: request.query_params().entries().collect(),
            headers: request.headers().entries().collect(),
            body_bytes: request.body().map(|b| b.len()),
        }
    }
}

impl Pipeline for EchoPipeline {
    fn process(&self, mut ctx: SessionContext) -> BoxFuture<'_, SessionContext> {
        Box::pin(async move {
            let rendered = serde_json::to_vec(&EchoBody::from(ctx.request()));
            if let Some(response) = ctx.response_mut() {
                match rendered {
                    Ok(json) => {
                        response.set_status(200);
                        response.headers_mut().set("Content-Type", "application/json");
                        response
                            .headers_mut()
                            .set("Content-Length", json.len().to_string());
                        response.set_body(json);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to render echo body");
                        response.set_status(500);
                    }
                }
            }
            ctx
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Headers, HttpResponseMessage, QueryParams};

    #[tokio::test]
    async fn echoes_request_as_json() {
        let mut headers = Headers::new();
        headers.add("X-Trace", "t1");
        headers.add("X-Trace", "t2");
        let request = HttpRequestMessage::new(
            "HTTP/1.1",
            "GET",
            "/foo",
            QueryParams::parse(Some("a=1&b")),
            headers,
            "127.0.0.1",
            "http",
        );
        let ctx = SessionContext::new(request, HttpResponseMessage::default());

        let ctx = EchoPipeline.process(ctx).await;
        let response = ctx.response().unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers().first("content-type"), Some("application/json"));

        let json: serde_json::Value = serde_json::from_slice(response.body().unwrap()).unwrap();
        assert_eq!(json["path"], "/foo");
        assert_eq!(json["headers"][1][1], "t2");
        assert_eq!(json["query"][1][0], "b");
        assert!(json["body_bytes"].is_null());
    }

    #[tokio::test]
    async fn leaves_context_without_response_untouched() {
        let request = HttpRequestMessage::new(
            "HTTP/1.1",
            "GET",
            "/",
            QueryParams::new(),
            Headers::new(),
            "",
            "http",
        );
        let mut ctx = SessionContext::new(request, HttpResponseMessage::default());
        ctx.take_response();

        let ctx = EchoPipeline.process(ctx).await;
        assert!(ctx.response().is_none());
    }
}
