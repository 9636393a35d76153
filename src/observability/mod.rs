//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! adapter, server, pipeline:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (tracing-subscriber fmt layer)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID set by the server layer is echoed on every response
//! - Metric updates are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
