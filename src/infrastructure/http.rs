//! HTTP transport for the gateway's server-to-server API.
//!
//! Both operations POST the validated parameters as a JSON object to the
//! same `paymentApi` endpoint; the command field inside the body selects
//! the operation.

use super::mask::{secure_parameters, secure_value};
use crate::config::GatewayConfig;
use crate::domain::parameters::{GatewayResponse, ValidatedParameters};
use crate::domain::ports::GatewayClient;
use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Gateway client backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpGatewayClient {
    client: Client,
    url: String,
}

impl HttpGatewayClient {
    /// Creates a client for the endpoint and timeout in `config`.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, TransportError> {
        Self::new(config.api_url(), config.timeout())
    }

    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn post(
        &self,
        operation: &'static str,
        params: ValidatedParameters,
    ) -> Result<GatewayResponse, TransportError> {
        debug!(
            url = %self.url,
            operation,
            data = %secure_parameters(params.as_parameters()),
            "Gateway API request"
        );

        let response = self.client.post(&self.url).json(&params).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, operation, "Gateway API returned an error status");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let value: serde_json::Value = serde_json::from_str(&body)?;
        debug!(data = %secure_value(&value), %status, operation, "Gateway API response");
        Ok(serde_json::from_value(value)?)
    }
}

#[async_trait]
impl GatewayClient for HttpGatewayClient {
    async fn authorize_transaction(
        &self,
        params: ValidatedParameters,
    ) -> Result<GatewayResponse, TransportError> {
        self.post("authorization", params).await
    }

    async fn check_status(
        &self,
        params: ValidatedParameters,
    ) -> Result<GatewayResponse, TransportError> {
        self.post("check_status", params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_targets_configured_environment() {
        let mut config = GatewayConfig::new("m", "a", "in", "out");
        let sandbox = HttpGatewayClient::from_config(&config).unwrap();
        assert!(sandbox.url().starts_with("https://sbpaymentservices."));

        config.sandbox = false;
        let production = HttpGatewayClient::from_config(&config).unwrap();
        assert!(production.url().starts_with("https://paymentservices."));
    }
}
