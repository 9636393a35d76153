//! Inbound translation: host request → session context.

use axum::body::Bytes;

use crate::adapter::body::{buffer_body, BodyReadFailure};
use crate::adapter::ContextFactory;
use crate::context::SessionContext;
use crate::host::HostRequest;
use crate::message::{Headers, HttpRequestMessage, HttpResponseMessage, QueryParams};
use crate::observability::metrics;

impl ContextFactory {
    /// Build the session context for one host request.
    ///
    /// Never fails: a body that cannot be read is logged and left absent.
    pub async fn create_context<R>(&self, mut host: R) -> SessionContext
    where
        R: HostRequest,
    {
        let headers = collect_headers(&host);
        let query_params = QueryParams::parse(host.query_string());

        let request = HttpRequestMessage::new(
            host.protocol(),
            host.method(),
            host.path(),
            query_params,
            headers,
            host.client_address(),
            host.scheme(),
        );

        let body = match buffer_body(host.take_body(), self.body_read_timeout).await {
            Ok(body) => body,
            Err(failure) => recover_body_read(&request, failure),
        };
        if let Some(bytes) = &body {
            metrics::record_body_size(bytes.len());
        }
        let request = request.with_body(body);

        let response = HttpResponseMessage::new(200);
        let ctx = SessionContext::new(request, response);
        metrics::record_context_created();

        tracing::debug!(
            method = %ctx.request().method(),
            path = %ctx.request().path(),
            client = %ctx.request().client_address(),
            "Session context created"
        );

        self.decorate(ctx)
    }
}

fn collect_headers<R: HostRequest>(host: &R) -> Headers {
    let mut headers = Headers::new();
    for name in host.header_names() {
        for value in host.header_values(&name) {
            headers.add(name.clone(), value);
        }
    }
    headers
}

/// Logs and counts a failed body read; the request proceeds with no body.
fn recover_body_read(request: &HttpRequestMessage, failure: BodyReadFailure) -> Option<Bytes> {
    metrics::record_body_read_failure(failure.label());
    match failure {
        BodyReadFailure::TimedOut => {
            tracing::error!(
                method = %request.method(),
                path = %request.path(),
                "Timed out reading request body, continuing without it"
            );
        }
        BodyReadFailure::Io(err) => {
            tracing::error!(
                method = %request.method(),
                path = %request.path(),
                error = %err,
                "Failed to read request body, continuing without it"
            );
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use futures_util::{stream, StreamExt};

    use super::*;
    use crate::context::SessionContextDecorator;
    use crate::host::axum_host::BodyStream;

    struct MockRequest {
        headers: Vec<(&'static str, Vec<&'static str>)>,
        query: Option<&'static str>,
        body: Option<BodyStream>,
    }

    impl MockRequest {
        fn new(query: Option<&'static str>, body: BodyStream) -> Self {
            Self {
                headers: Vec::new(),
                query,
                body: Some(body),
            }
        }

        fn header(mut self, name: &'static str, values: Vec<&'static str>) -> Self {
            self.headers.push((name, values));
            self
        }
    }

    impl HostRequest for MockRequest {
        type Body = BodyStream;

        fn header_names(&self) -> Vec<String> {
            self.headers.iter().map(|(n, _)| n.to_string()).collect()
        }

        fn header_values(&self, name: &str) -> Vec<String> {
            self.headers
                .iter()
                .filter(|(n, _)| *n == name)
                .flat_map(|(_, values)| values.iter().map(|v| v.to_string()))
                .collect()
        }

        fn query_string(&self) -> Option<&str> {
            self.query
        }

        fn protocol(&self) -> String {
            "HTTP/1.1".to_string()
        }

        fn method(&self) -> &str {
            "GET"
        }

        fn path(&self) -> &str {
            "/foo"
        }

        fn scheme(&self) -> &str {
            "http"
        }

        fn client_address(&self) -> String {
            "198.51.100.4".to_string()
        }

        fn take_body(&mut self) -> Self::Body {
            self.body.take().unwrap_or_else(|| Box::pin(stream::empty()))
        }
    }

    fn body(parts: Vec<io::Result<&'static str>>) -> BodyStream {
        Box::pin(stream::iter(
            parts
                .into_iter()
                .map(|p| p.map(|s| Bytes::from_static(s.as_bytes()))),
        ))
    }

    fn scenario_request(body: BodyStream) -> MockRequest {
        MockRequest::new(Some("a=1&a=2&b"), body)
            .header("Accept", vec!["text/html"])
            .header("X-Trace", vec!["t1", "t2"])
    }

    #[tokio::test]
    async fn builds_request_message() {
        let factory = ContextFactory::default();
        let ctx = factory.create_context(scenario_request(body(vec![]))).await;

        let request = ctx.request();
        assert_eq!(request.protocol(), "HTTP/1.1");
        assert_eq!(request.method(), "GET");
        assert_eq!(request.path(), "/foo");
        assert_eq!(request.scheme(), "http");
        assert_eq!(request.client_address(), "198.51.100.4");
        assert_eq!(
            request.query_params().entries().collect::<Vec<_>>(),
            vec![("a", "1"), ("a", "2"), ("b", "")]
        );
        assert_eq!(request.headers().get("X-Trace"), vec!["t1", "t2"]);
        assert_eq!(request.headers().get("Accept"), vec!["text/html"]);
        assert!(request.body().is_none());

        let response = ctx.response().expect("default response");
        assert_eq!(response.status(), 200);
        assert!(response.headers().is_empty());
        assert!(response.body().is_none());
    }

    #[tokio::test]
    async fn headers_keep_every_pair() {
        let request = MockRequest::new(None, body(vec![]))
            .header("Via", vec!["a", "b", "a"])
            .header("Host", vec!["example.com"]);
        let ctx = ContextFactory::default().create_context(request).await;

        let entries: Vec<_> = ctx.request().headers().entries().collect();
        assert_eq!(
            entries,
            vec![("Via", "a"), ("Via", "b"), ("Via", "a"), ("Host", "example.com")]
        );
        assert!(ctx.request().query_params().is_empty());
    }

    #[tokio::test]
    async fn buffers_body() {
        let request = scenario_request(body(vec![Ok("{\"id\":"), Ok("7}")]));
        let ctx = ContextFactory::default().create_context(request).await;
        assert_eq!(ctx.request().body().map(|b| b.as_ref()), Some(&b"{\"id\":7}"[..]));
    }

    #[tokio::test]
    async fn body_timeout_is_recovered() {
        let request = scenario_request(body(vec![
            Ok("partial"),
            Err(io::Error::new(io::ErrorKind::TimedOut, "read timed out")),
        ]));
        let ctx = ContextFactory::default().create_context(request).await;

        assert!(ctx.request().body().is_none());
        assert_eq!(ctx.request().path(), "/foo");
        assert_eq!(ctx.response().map(|r| r.status()), Some(200));
    }

    #[tokio::test]
    async fn body_io_error_is_recovered() {
        let request = scenario_request(body(vec![Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "truncated",
        ))]));
        let ctx = ContextFactory::default().create_context(request).await;
        assert!(ctx.request().body().is_none());
    }

    #[tokio::test]
    async fn stalled_body_is_recovered_with_read_timeout() {
        let stalled: BodyStream = Box::pin(body(vec![Ok("head")]).chain(stream::pending()));
        let factory = ContextFactory::default()
            .with_body_read_timeout(Some(Duration::from_millis(20)));

        let ctx = factory.create_context(scenario_request(stalled)).await;
        assert!(ctx.request().body().is_none());
    }

    struct CountingDecorator {
        calls: AtomicUsize,
    }

    impl SessionContextDecorator for CountingDecorator {
        fn decorate(&self, ctx: SessionContext) -> SessionContext {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let replacement = HttpRequestMessage::new(
                "HTTP/2.0",
                "POST",
                "/replaced",
                QueryParams::new(),
                Headers::new(),
                ctx.request().client_address(),
                "https",
            );
            let mut response = HttpResponseMessage::new(202);
            response.set_body("decorated");
            SessionContext::new(replacement, response)
        }
    }

    #[tokio::test]
    async fn decorator_runs_once_and_replaces_context() {
        let decorator = Arc::new(CountingDecorator {
            calls: AtomicUsize::new(0),
        });
        let shared: Arc<dyn SessionContextDecorator> = decorator.clone();
        let factory = ContextFactory::new(Some(shared));

        let ctx = factory.create_context(scenario_request(body(vec![]))).await;
        assert_eq!(decorator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(ctx.request().path(), "/replaced");
        assert_eq!(ctx.request().method(), "POST");
        assert_eq!(ctx.response().map(|r| r.status()), Some(202));

        factory.create_context(scenario_request(body(vec![]))).await;
        assert_eq!(decorator.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn without_decorator_context_passes_through() {
        let factory = ContextFactory::new(None);
        assert!(!factory.has_decorator());

        let ctx = factory.create_context(scenario_request(body(vec![]))).await;
        assert_eq!(ctx.request().path(), "/foo");
        assert_eq!(ctx.response().map(|r| r.status()), Some(200));
    }
}
