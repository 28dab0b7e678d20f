use crate::domain::signature::ShaType;
use crate::error::{PaymentError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

const SANDBOX_API_URL: &str = "https://sbpaymentservices.payfort.com/FortAPI/paymentApi";
const PRODUCTION_API_URL: &str = "https://paymentservices.payfort.com/FortAPI/paymentApi";
const SANDBOX_PAGE_URL: &str = "https://sbcheckout.payfort.com/FortAPI/paymentPage";
const PRODUCTION_PAGE_URL: &str = "https://checkout.payfort.com/FortAPI/paymentPage";

fn default_language() -> String {
    "en".to_string()
}

fn default_currency() -> String {
    "AED".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Merchant account settings, supplied once at construction.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub merchant_identifier: String,
    pub access_code: String,
    /// Phrase used to sign outgoing requests.
    pub sha_request_phrase: String,
    /// Phrase the gateway signs its responses with.
    pub sha_response_phrase: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub sandbox: bool,
    #[serde(default)]
    pub sha_type: ShaType,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl GatewayConfig {
    /// Creates a sandbox configuration with default language, currency and hash.
    pub fn new(
        merchant_identifier: impl Into<String>,
        access_code: impl Into<String>,
        sha_request_phrase: impl Into<String>,
        sha_response_phrase: impl Into<String>,
    ) -> Self {
        Self {
            merchant_identifier: merchant_identifier.into(),
            access_code: access_code.into(),
            sha_request_phrase: sha_request_phrase.into(),
            sha_response_phrase: sha_response_phrase.into(),
            language: default_language(),
            currency: default_currency(),
            sandbox: true,
            sha_type: ShaType::default(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| PaymentError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the gateway would refuse on every request.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("merchant_identifier", &self.merchant_identifier),
            ("access_code", &self.access_code),
            ("sha_request_phrase", &self.sha_request_phrase),
            ("sha_response_phrase", &self.sha_response_phrase),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(PaymentError::Config(format!("{name} must not be empty")));
            }
        }
        if !matches!(self.language.as_str(), "en" | "ar") {
            return Err(PaymentError::Config(format!(
                "unsupported language {:?}, expected \"en\" or \"ar\"",
                self.language
            )));
        }
        if self.currency.len() != 3 || !self.currency.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(PaymentError::Config(format!(
                "currency must be a 3-letter ISO code, got {:?}",
                self.currency
            )));
        }
        if self.timeout_secs == 0 {
            return Err(PaymentError::Config("timeout_secs must be positive".into()));
        }
        Ok(())
    }

    /// Server-to-server endpoint for the configured environment.
    pub fn api_url(&self) -> &'static str {
        if self.sandbox {
            SANDBOX_API_URL
        } else {
            PRODUCTION_API_URL
        }
    }

    /// Hosted merchant page endpoint for the configured environment.
    pub fn page_url(&self) -> &'static str {
        if self.sandbox {
            SANDBOX_PAGE_URL
        } else {
            PRODUCTION_PAGE_URL
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// Phrases are secrets and stay out of logs.
impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("merchant_identifier", &self.merchant_identifier)
            .field("access_code", &self.access_code)
            .field("sha_request_phrase", &"<redacted>")
            .field("sha_response_phrase", &"<redacted>")
            .field("language", &self.language)
            .field("currency", &self.currency)
            .field("sandbox", &self.sandbox)
            .field("sha_type", &self.sha_type)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_applies_defaults() {
        let config = GatewayConfig::from_json(
            r#"{
                "merchant_identifier": "CycHZxVj",
                "access_code": "zx0IPmPy5jp1vAz8Kpg7",
                "sha_request_phrase": "in",
                "sha_response_phrase": "out",
                "sha_type": "SHA-512"
            }"#,
        )
        .unwrap();

        assert_eq!(config.language, "en");
        assert_eq!(config.currency, "AED");
        assert!(!config.sandbox);
        assert_eq!(config.sha_type, ShaType::Sha512);
        assert_eq!(config.api_url(), PRODUCTION_API_URL);
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let mut config = GatewayConfig::new("m", "a", "in", "out");
        assert!(config.validate().is_ok());

        config.currency = "dollars".into();
        assert!(matches!(config.validate(), Err(PaymentError::Config(_))));

        config.currency = "USD".into();
        config.sha_request_phrase = "  ".into();
        assert!(matches!(config.validate(), Err(PaymentError::Config(_))));
    }

    #[test]
    fn test_debug_redacts_phrases() {
        let config = GatewayConfig::new("m", "a", "top-secret-in", "top-secret-out");
        let debug = format!("{config:?}");
        assert!(!debug.contains("top-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_sandbox_urls() {
        let config = GatewayConfig::new("m", "a", "in", "out");
        assert_eq!(config.api_url(), SANDBOX_API_URL);
        assert_eq!(config.page_url(), SANDBOX_PAGE_URL);
    }
}
