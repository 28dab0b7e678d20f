#![allow(dead_code)]

use fortpay::application::method::GatewayMethod;
use fortpay::config::GatewayConfig;
use fortpay::domain::parameters::Parameters;
use fortpay::domain::signature::SignatureEngine;
use fortpay::infrastructure::in_memory::RecordingGateway;
use fortpay::infrastructure::rules::FortRules;
use serde_json::json;

pub const REQUEST_PHRASE: &str = "TESTSHAIN";
pub const RESPONSE_PHRASE: &str = "TESTSHAOUT";

pub fn config() -> GatewayConfig {
    GatewayConfig::new(
        "CycHZxVj",
        "zx0IPmPy5jp1vAz8Kpg7",
        REQUEST_PHRASE,
        RESPONSE_PHRASE,
    )
}

/// A gateway that signs its status responses like the real one.
pub fn signing_gateway() -> RecordingGateway {
    RecordingGateway::new().signing_with(SignatureEngine::default(), RESPONSE_PHRASE)
}

pub fn apple_pay(gateway: &RecordingGateway) -> GatewayMethod {
    GatewayMethod::apple_pay(config(), Box::new(FortRules), Box::new(gateway.clone())).unwrap()
}

pub fn merchant_page(gateway: &RecordingGateway) -> GatewayMethod {
    GatewayMethod::merchant_page(config(), Box::new(FortRules), Box::new(gateway.clone())).unwrap()
}

/// Caller fields for a complete Apple Pay authorization.
pub fn apple_pay_params() -> Parameters {
    Parameters::new()
        .with("merchant_reference", "ORD-1001")
        .with("amount", 10000)
        .with("customer_email", "buyer@example.com")
        .with("customer_ip", "192.168.1.10")
        .with("apple_data", "k0wQvY0n1bX6Pp1mC+Qr")
        .with("apple_signature", "MIAGCSqGSIb3DQEHAqCAMIACAQExDzANBglghkgBZQMEAgEFADCABgkqhkiG9w0BBwEAAKCAMIID")
        .with(
            "apple_header",
            json!({
                "apple_transactionId": "c0a5e1d7b9",
                "apple_ephemeralPublicKey": "MFkwEwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAE",
                "apple_publicKeyHash": "tkGGi4j4S5X5NfjBv0S3"
            }),
        )
        .with(
            "apple_paymentMethod",
            json!({
                "apple_displayName": "Visa 0492",
                "apple_network": "Visa",
                "apple_type": "debit"
            }),
        )
}

/// Caller fields for a tokenized card authorization.
pub fn card_params() -> Parameters {
    Parameters::new()
        .with("merchant_reference", "ORD-2002")
        .with("amount", 2500)
        .with("customer_email", "buyer@example.com")
        .with("token_name", "Op9Vmp")
}

pub fn status_query(reference: &str) -> Parameters {
    Parameters::new().with("merchant_reference", reference)
}
