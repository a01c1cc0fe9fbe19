//! Story generation for the memoir service.
//!
//! Turns a validated [`GenerationRequest`](memoir_core::GenerationRequest)
//! into a ghostwriting prompt, sends it to a
//! [`CompletionBackend`](memoir_interface::CompletionBackend), and splits the
//! completion into titled [`Story`](memoir_core::Story) records.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod parser;
mod pipeline;
mod prompt;
mod timing;

pub use parser::parse_stories;
pub use pipeline::StoryPipeline;
pub use prompt::{build_prompt, build_request_prompt, format_responses};
pub use timing::LoggingTimingSink;
