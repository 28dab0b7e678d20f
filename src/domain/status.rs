use super::parameters::GatewayResponse;
use serde::Serialize;

/// Status codes meaning the money has moved: capture success and purchase success.
pub const SETTLED_CODES: [&str; 2] = ["04", "14"];

/// Codes for transactions the gateway has not finished with yet.
///
/// `02` authorization success (awaiting capture), `15` uncertain,
/// `19` pending.
pub const PENDING_CODES: [&str; 3] = ["02", "15", "19"];

/// Message used when the gateway reports a failing status without text.
pub const UNKNOWN_STATUS_MESSAGE: &str = "Unknown transaction status";

/// Semantic reading of a `transaction_status` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionOutcome {
    Settled,
    Pending,
    Incomplete,
}

impl TransactionOutcome {
    /// Classifies a status code. An absent code has not been resolved yet
    /// and reads as pending.
    pub fn from_status(status: Option<&str>) -> Self {
        match status {
            Some(code) if is_settled(code) => Self::Settled,
            Some(code) if PENDING_CODES.contains(&code) => Self::Pending,
            Some(_) => Self::Incomplete,
            None => Self::Pending,
        }
    }

    pub fn from_response(response: &GatewayResponse) -> Self {
        Self::from_status(response.transaction_status().as_deref())
    }
}

pub fn is_settled(code: &str) -> bool {
    SETTLED_CODES.contains(&code)
}
