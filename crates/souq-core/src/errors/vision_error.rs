/// Image-to-text errors.
#[derive(Debug, thiserror::Error)]
pub enum VisionError {
    #[error("vision request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("vision response had no choices")]
    EmptyResponse,
}
