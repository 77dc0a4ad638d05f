use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Reasons a single delivery attempt can fail at the provider seam.
///
/// These never escape a provider: they are flattened into a failed
/// `DeliveryResult` carrying the rendered message.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("{0} is not configured")]
    MissingConfig(&'static str),
    #[error("invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },
    #[error("failed to build message: {0}")]
    Build(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("provider rejected message ({status}): {reason}")]
    Rejected { status: u16, reason: String },
}
