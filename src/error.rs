use crate::domain::validation::ValidationErrors;
use thiserror::Error;

/// Failures surfaced by the payment methods.
///
/// Every variant is returned to the immediate caller; nothing is retried or
/// downgraded to a success inside the crate.
#[derive(Error, Debug)]
pub enum PaymentError {
    /// The merged request violates the schema of the active command.
    /// Raised before any dispatch.
    #[error("validation failed: {0}")]
    ValidationFailure(ValidationErrors),
    /// A status response did not carry a valid gateway signature.
    #[error("gateway integrity check failed: {reason}")]
    GatewayIntegrityFailure { reason: String },
    /// The gateway reported a status outside the settled set.
    #[error("incomplete payment: {message}")]
    IncompletePayment {
        status: Option<String>,
        message: String,
    },
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("configuration error: {0}")]
    Config(String),
}

impl PaymentError {
    /// The gateway message carried by an `IncompletePayment`.
    pub fn incomplete_message(&self) -> Option<&str> {
        match self {
            Self::IncompletePayment { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Failures of the network layer, passed through unchanged.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("gateway returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed gateway response: {0}")]
    MalformedBody(#[from] serde_json::Error),
    /// The gateway could not answer at all, e.g. an adapter with nothing
    /// left to serve.
    #[error("gateway unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, PaymentError>;
