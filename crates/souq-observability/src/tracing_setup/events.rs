//! Structured log events for lifecycle operations.
//!
//! Each function emits one `tracing` event with an `event` field.

/// The runtime finished building its collaborators.
pub fn runtime_initialized(reranker: &str, vision: bool, embedding_model: &str) {
    tracing::info!(
        event = "runtime_initialized",
        reranker = %reranker,
        vision = vision,
        embedding_model = %embedding_model,
        "runtime initialized"
    );
}

/// An optional collaborator is unavailable and the pipeline runs without it.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

/// A request failed in a way that must stop the process.
pub fn fatal_search_error(error: &str) {
    tracing::error!(
        event = "fatal_search_error",
        error = %error,
        "fatal search error"
    );
}
