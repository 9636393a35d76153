//! Pipeline-internal message model.
//!
//! # Data Flow
//! ```text
//! host request
//!     → headers.rs (every name/value pair, in host order)
//!     → query.rs (raw query string → ordered key/value pairs)
//!     → request.rs (protocol, method, path, query, headers, client, scheme, body)
//!
//! pipeline
//!     → response.rs (status, headers, body)
//!     → host response
//! ```
//!
//! # Design Decisions
//! - Nothing here knows about the host transport
//! - Each message owns its headers; nothing is shared between messages

pub mod headers;
pub mod query;
pub mod request;
pub mod response;

pub use headers::Headers;
pub use query::QueryParams;
pub use request::HttpRequestMessage;
pub use response::HttpResponseMessage;
