//! Session context subsystem.
//!
//! # Data Flow
//! ```text
//! inbound adapter
//!     → session.rs (request + default response)
//!     → decorator.rs (optional, replaces the context)
//!     → pipeline (external)
//!     → outbound adapter
//! ```
//!
//! # Design Decisions
//! - Context lives for exactly one request and is never pooled
//! - Decoration may swap the whole context; only the request/response
//!   pairing is guaranteed to survive

pub mod decorator;
pub mod factory;
pub mod session;

pub use decorator::{ForwardedHeadersDecorator, SessionContextDecorator};
pub use factory::SessionContextFactory;
pub use session::SessionContext;
