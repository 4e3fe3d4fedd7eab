/// Retrieval subsystem errors.
///
/// Messages double as the `{error}` text of rejected requests.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("Invalid mode={mode}")]
    InvalidMode { mode: String },

    #[error("Empty query")]
    EmptyQuery,
}
