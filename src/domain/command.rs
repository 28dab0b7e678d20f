use serde::{Deserialize, Serialize};
use std::fmt;

/// Gateway commands this crate issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    Authorization,
    Purchase,
    CheckStatus,
    Tokenization,
}

impl Command {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Authorization => "AUTHORIZATION",
            Self::Purchase => "PURCHASE",
            Self::CheckStatus => "CHECK_STATUS",
            Self::Tokenization => "TOKENIZATION",
        }
    }

    /// The request field the gateway reads this command from.
    pub fn field(self) -> &'static str {
        match self {
            Self::Authorization | Self::Purchase => "command",
            Self::CheckStatus => "query_command",
            Self::Tokenization => "service_command",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment method variants. They differ only in the defaults they merge
/// into requests and in the rule tables used for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    /// Device-tokenized Apple Pay payments.
    ApplePay,
    /// Card payments tokenized on the hosted merchant page.
    MerchantPage,
}

impl MethodKind {
    /// Value of the `digital_wallet` field, for wallet variants.
    pub fn digital_wallet(self) -> Option<&'static str> {
        match self {
            Self::ApplePay => Some("APPLE_PAY"),
            Self::MerchantPage => None,
        }
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApplePay => f.write_str("apple_pay"),
            Self::MerchantPage => f.write_str("merchant_page"),
        }
    }
}
