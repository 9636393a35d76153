//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the axum Router that hands every request to the adapter
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Bind server to listener and shut down gracefully
//! - Map fatal adapter errors to a bare 500

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::adapter::{AdapterError, ContextFactory};
use crate::config::EdgeConfig;
use crate::context::SessionContextFactory;
use crate::host::axum_host::{AxumHostRequest, AxumHostResponse};
use crate::observability::metrics;
use crate::pipeline::{EchoPipeline, Pipeline};

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub factory: Arc<ContextFactory>,
    pub pipeline: Arc<dyn Pipeline>,
}

/// HTTP server hosting the session adapter.
pub struct HttpServer {
    router: Router,
    config: EdgeConfig,
}

impl HttpServer {
    /// Server with the adapter built from `config` and the echo pipeline.
    pub fn new(config: EdgeConfig) -> Self {
        let factory = ContextFactory::from_config(&config.adapter);
        Self::with_pipeline(config, factory, Arc::new(EchoPipeline))
    }

    pub fn with_pipeline(
        config: EdgeConfig,
        factory: ContextFactory,
        pipeline: Arc<dyn Pipeline>,
    ) -> Self {
        let state = AppState {
            factory: Arc::new(factory),
            pipeline,
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &EdgeConfig, state: AppState) -> Router {
        Router::new()
            .fallback(session_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// The fully layered router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` resolves.
    pub async fn run<S>(self, listener: TcpListener, shutdown: S) -> Result<(), std::io::Error>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            forwarded_headers = self.config.adapter.forwarded_headers,
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &EdgeConfig {
        &self.config
    }
}

/// Host request → context → pipeline → host response.
async fn session_handler(State(state): State<AppState>, request: Request) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let host_request = AxumHostRequest::new(request, remote_addr);
    match exchange(state.factory.as_ref(), state.pipeline.as_ref(), host_request).await {
        Ok(host_response) => {
            metrics::record_request_duration(&method, host_response.status().as_u16(), start);
            host_response.into_response()
        }
        Err(_) => {
            metrics::record_request_duration(&method, 500, start);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn exchange<F>(
    factory: &F,
    pipeline: &dyn Pipeline,
    request: AxumHostRequest,
) -> Result<AxumHostResponse, AdapterError>
where
    F: SessionContextFactory<AxumHostRequest, AxumHostResponse>,
{
    let ctx = factory.create(request).await;
    let ctx = pipeline.process(ctx).await;

    let mut response = AxumHostResponse::new();
    factory.write(&ctx, &mut response).await?;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SessionContext;
    use axum::body::{to_bytes, Body};
    use axum::http::Request as HttpRequest;
    use futures_util::future::BoxFuture;
    use tower::ServiceExt;

    struct DropResponse;

    impl Pipeline for DropResponse {
        fn process(&self, mut ctx: SessionContext) -> BoxFuture<'_, SessionContext> {
            Box::pin(async move {
                ctx.take_response();
                ctx
            })
        }
    }

    #[tokio::test]
    async fn echo_round_trip() {
        let server = HttpServer::new(EdgeConfig::default());
        let request = HttpRequest::builder()
            .uri("/foo?a=1&a=2&b")
            .header("X-Trace", "t1")
            .body(Body::from("abc"))
            .unwrap();

        let response = server.router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["path"], "/foo");
        assert_eq!(json["body_bytes"], 3);
    }

    fn small_body_limit() -> EdgeConfig {
        let mut config = EdgeConfig::default();
        config.listener.max_body_bytes = 8;
        config
    }

    #[tokio::test]
    async fn declared_oversize_body_is_rejected() {
        let server = HttpServer::new(small_body_limit());
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/upload")
            .header("content-length", "16")
            .body(Body::from(vec![1u8; 16]))
            .unwrap();

        let response = server.router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn streamed_oversize_body_arrives_absent() {
        let server = HttpServer::new(small_body_limit());
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/upload")
            .body(Body::from(vec![1u8; 16]))
            .unwrap();

        let response = server.router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["method"], "POST");
        assert!(json["body_bytes"].is_null());
    }

    #[tokio::test]
    async fn missing_response_becomes_500() {
        let server = HttpServer::with_pipeline(
            EdgeConfig::default(),
            ContextFactory::default(),
            Arc::new(DropResponse),
        );
        let request = HttpRequest::builder().uri("/").body(Body::empty()).unwrap();

        let response = server.router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
