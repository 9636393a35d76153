//! HTTP hosting subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, request ID, tracing, limits)
//!     → host::axum_host (request/response views)
//!     → adapter (create context)
//!     → pipeline
//!     → adapter (write context)
//!     → Send to client
//! ```

pub mod server;

pub use server::HttpServer;
