//! Trait definitions for the memoir story generation service.
//!
//! The story pipeline depends only on these capabilities, never on a concrete
//! HTTP client, log sink, or rate limit table.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod backend;
mod gate;
mod timing;

pub use backend::CompletionBackend;
pub use gate::RequestGate;
pub use timing::TimingSink;
