use crate::config::GatewayConfig;
use crate::domain::command::{Command, MethodKind};
use crate::domain::parameters::{GatewayResponse, Parameters, SIGNATURE_FIELD, ValidatedParameters};
use crate::domain::ports::{GatewayClientBox, ValidationRulesBox};
use crate::domain::signature::SignatureEngine;
use crate::domain::status::{UNKNOWN_STATUS_MESSAGE, is_settled};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use serde::Serialize;

/// Signed form posted by the browser to the hosted merchant page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenizationForm {
    pub url: String,
    pub fields: ValidatedParameters,
}

/// Operations every payment method variant offers.
#[async_trait]
pub trait PaymentMethod: Send + Sync {
    /// Signs, validates and sends an authorization. The gateway response is
    /// returned as is, without status interpretation.
    async fn authorize(&self, params: Parameters) -> Result<GatewayResponse>;

    /// Queries a transaction and checks the gateway signature on the answer.
    async fn check_status(&self, params: Parameters) -> Result<GatewayResponse>;

    /// Queries a transaction and fails with `IncompletePayment` unless the
    /// gateway reports it settled (`04` or `14`).
    ///
    /// A response without `transaction_status` is passed through as a
    /// success. Callers needing a stricter reading should inspect the raw
    /// code from [`PaymentMethod::check_status`] or use
    /// [`TransactionOutcome`](crate::domain::status::TransactionOutcome).
    async fn check_transaction_status(&self, params: Parameters) -> Result<GatewayResponse> {
        let response = self.check_status(params).await?;

        if let Some(status) = response.transaction_status()
            && !is_settled(&status)
        {
            let message = response
                .transaction_message()
                .unwrap_or(UNKNOWN_STATUS_MESSAGE)
                .to_string();
            return Err(PaymentError::IncompletePayment {
                status: Some(status),
                message,
            });
        }

        Ok(response)
    }

    /// Form data for the hosted tokenization page, or `None` when the
    /// method tokenizes elsewhere.
    fn prepare_tokenization_data(&self, params: Parameters) -> Result<Option<TokenizationForm>>;
}

/// Where a default field stands against caller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Precedence {
    /// Caller values replace the default.
    Overridable,
    /// Always the configured value.
    Enforced,
}

/// The shared orchestration routine. Variants are values of this type that
/// differ only in their [`MethodKind`].
pub struct GatewayMethod {
    kind: MethodKind,
    config: GatewayConfig,
    signer: SignatureEngine,
    rules: ValidationRulesBox,
    client: GatewayClientBox,
}

impl GatewayMethod {
    /// Creates a method after validating `config`.
    pub fn new(
        kind: MethodKind,
        config: GatewayConfig,
        rules: ValidationRulesBox,
        client: GatewayClientBox,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            kind,
            signer: SignatureEngine::new(config.sha_type),
            config,
            rules,
            client,
        })
    }

    pub fn apple_pay(
        config: GatewayConfig,
        rules: ValidationRulesBox,
        client: GatewayClientBox,
    ) -> Result<Self> {
        Self::new(MethodKind::ApplePay, config, rules, client)
    }

    pub fn merchant_page(
        config: GatewayConfig,
        rules: ValidationRulesBox,
        client: GatewayClientBox,
    ) -> Result<Self> {
        Self::new(MethodKind::MerchantPage, config, rules, client)
    }

    pub fn kind(&self) -> MethodKind {
        self.kind
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Default table for `command`.
    fn defaults(&self, command: Command) -> Vec<(&'static str, String, Precedence)> {
        use Precedence::*;

        let mut table = vec![
            (command.field(), command.as_str().to_string(), Enforced),
            ("access_code", self.config.access_code.clone(), Enforced),
            ("merchant_identifier", self.config.merchant_identifier.clone(), Enforced),
            ("language", self.config.language.clone(), Overridable),
        ];
        if matches!(command, Command::Authorization | Command::Purchase) {
            if let Some(wallet) = self.kind.digital_wallet() {
                table.push(("digital_wallet", wallet.to_string(), Enforced));
            }
            table.push(("currency", self.config.currency.clone(), Overridable));
        }
        table
    }

    /// Merges defaults with caller params and signs the result when the
    /// caller did not bring a signature.
    pub fn build_request(&self, command: Command, params: Parameters) -> Parameters {
        let defaults = self.defaults(command);

        let mut merged = Parameters::new();
        for (field, value, precedence) in &defaults {
            if *precedence == Precedence::Overridable {
                merged.insert(*field, value.as_str());
            }
        }
        merged.extend(params);
        for (field, value, precedence) in defaults {
            if precedence == Precedence::Enforced {
                merged.insert(field, value);
            }
        }

        if !merged.has_signature() {
            let signature = self.signer.sign(&merged, &self.config.sha_request_phrase);
            merged.insert(SIGNATURE_FIELD, signature);
        }
        merged
    }

    /// Builds the request for `command` and runs it through its schema.
    pub fn prepare(&self, command: Command, params: Parameters) -> Result<ValidatedParameters> {
        let request = self.build_request(command, params);
        self.rules
            .schema(command, self.kind)
            .validate(request)
            .map_err(PaymentError::ValidationFailure)
    }

    fn verify_response(&self, response: &GatewayResponse) -> Result<()> {
        if response.fields().signature().is_none() {
            return Err(PaymentError::GatewayIntegrityFailure {
                reason: "response carries no signature".to_string(),
            });
        }
        if !self
            .signer
            .verify(response.fields(), &self.config.sha_response_phrase)
        {
            return Err(PaymentError::GatewayIntegrityFailure {
                reason: "response signature does not match".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PaymentMethod for GatewayMethod {
    async fn authorize(&self, params: Parameters) -> Result<GatewayResponse> {
        let validated = self.prepare(Command::Authorization, params)?;
        Ok(self.client.authorize_transaction(validated).await?)
    }

    async fn check_status(&self, params: Parameters) -> Result<GatewayResponse> {
        let validated = self.prepare(Command::CheckStatus, params)?;
        let response = self.client.check_status(validated).await?;
        self.verify_response(&response)?;
        Ok(response)
    }

    fn prepare_tokenization_data(&self, params: Parameters) -> Result<Option<TokenizationForm>> {
        match self.kind {
            // Apple Pay tokenizes on the device.
            MethodKind::ApplePay => Ok(None),
            MethodKind::MerchantPage => {
                let fields = self.prepare(Command::Tokenization, params)?;
                Ok(Some(TokenizationForm {
                    url: self.config.page_url().to_string(),
                    fields,
                }))
            }
        }
    }
}
