//! # souq-vision
//!
//! Turns an uploaded product photo into keyword-dense search text by asking
//! an OpenAI-compatible vision chat model to describe it.

pub mod client;
pub mod prompt;

pub use client::VisionClient;
