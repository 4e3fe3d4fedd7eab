//! # souq-runtime
//!
//! Owns the assembled search engine for the lifetime of the process.
//! Hosts call [`initialize`] once at startup and [`search`] per request.

pub mod runtime;

pub use runtime::{get, initialize, is_initialized, search, RuntimeOptions, SouqRuntime};
