/// Candidate source (document store) errors.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("request to {backend} failed: {reason}")]
    RequestFailed { backend: String, reason: String },

    #[error("{backend} returned an error: {message}")]
    QueryFailed { backend: String, message: String },

    #[error("malformed response from {backend}: {reason}")]
    MalformedResponse { backend: String, reason: String },
}
