//! # souq-observability
//!
//! Structured logging for souq processes: subscriber setup driven by
//! `SOUQ_LOG` / `observability.*` config, plus named log events for
//! lifecycle operations.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, init_tracing_with_filter};
