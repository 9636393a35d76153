//! Session context adapter for an HTTP edge pipeline.

pub mod adapter;
pub mod config;
pub mod context;
pub mod host;
pub mod http;
pub mod lifecycle;
pub mod message;
pub mod observability;
pub mod pipeline;

pub use adapter::{AdapterError, ContextFactory};
pub use config::EdgeConfig;
pub use context::{SessionContext, SessionContextDecorator, SessionContextFactory};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
