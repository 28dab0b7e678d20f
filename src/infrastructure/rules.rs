//! Default FortAPI field tables.

use crate::domain::command::{Command, MethodKind};
use crate::domain::ports::ValidationRules;
use crate::domain::validation::{FieldKind, FieldRule, Schema};

const LANGUAGES: &[&str] = &["en", "ar"];
const YES_NO: &[&str] = &["YES", "NO"];
const ECI: &[&str] = &["ECOMMERCE", "MOTO", "RECURRING"];

/// Rule tables published for the gateway's server-to-server API.
#[derive(Debug, Clone, Copy, Default)]
pub struct FortRules;

impl ValidationRules for FortRules {
    fn schema(&self, command: Command, method: MethodKind) -> Schema {
        match (command, method) {
            (Command::Authorization | Command::Purchase, MethodKind::ApplePay) => {
                apple_pay_purchase(command)
            }
            (Command::Authorization | Command::Purchase, MethodKind::MerchantPage) => {
                card_purchase(command)
            }
            (Command::CheckStatus, _) => check_status(),
            (Command::Tokenization, _) => tokenization(),
        }
    }
}

fn identity(schema: Schema) -> Schema {
    schema
        .field("access_code", FieldRule::required(FieldKind::Text).max(20))
        .field("merchant_identifier", FieldRule::required(FieldKind::Text).max(20))
        .field("language", FieldRule::required(FieldKind::Text).one_of(LANGUAGES))
        .field("signature", FieldRule::required(FieldKind::Text).max(200))
}

fn order(schema: Schema, command: Command) -> Schema {
    let allowed: &'static [&'static str] = match command {
        Command::Purchase => &["PURCHASE"],
        _ => &["AUTHORIZATION"],
    };
    identity(schema)
        .field("command", FieldRule::required(FieldKind::Text).one_of(allowed))
        .field("merchant_reference", FieldRule::required(FieldKind::Text).max(40))
        .field("amount", FieldRule::required(FieldKind::Numeric).max(10))
        .field("currency", FieldRule::required(FieldKind::Text).length(3, 3))
        .field("customer_email", FieldRule::required(FieldKind::Email).max(254))
        .field("customer_name", FieldRule::optional(FieldKind::Text).max(40))
        .field("order_description", FieldRule::optional(FieldKind::Text).max(150))
        .field("settlement_reference", FieldRule::optional(FieldKind::Text).max(34))
        .field("phone_number", FieldRule::optional(FieldKind::Text).max(19))
        .field("merchant_extra", FieldRule::optional(FieldKind::Text).max(999))
        .field("merchant_extra1", FieldRule::optional(FieldKind::Text).max(250))
        .field("merchant_extra2", FieldRule::optional(FieldKind::Text).max(250))
        .field("merchant_extra3", FieldRule::optional(FieldKind::Text).max(250))
        .field("merchant_extra4", FieldRule::optional(FieldKind::Text).max(250))
        .field("merchant_extra5", FieldRule::optional(FieldKind::Text).max(250))
}

/// Apple Pay authorization or purchase with the device payment token.
pub fn apple_pay_purchase(command: Command) -> Schema {
    order(Schema::new(), command)
        .field("digital_wallet", FieldRule::required(FieldKind::Text).one_of(&["APPLE_PAY"]))
        .field("apple_data", FieldRule::required(FieldKind::Text).max(500))
        .field("apple_signature", FieldRule::required(FieldKind::Text).max(3000))
        .field("apple_header", FieldRule::required(FieldKind::Object))
        .field("apple_paymentMethod", FieldRule::required(FieldKind::Object))
        .field("customer_ip", FieldRule::required(FieldKind::Text).max(45))
}

/// Card authorization or purchase with a merchant page token.
pub fn card_purchase(command: Command) -> Schema {
    order(Schema::new(), command)
        .field("token_name", FieldRule::required(FieldKind::Text).max(100))
        .field("customer_ip", FieldRule::optional(FieldKind::Text).max(45))
        .field("card_security_code", FieldRule::optional(FieldKind::Numeric).length(3, 4))
        .field("return_url", FieldRule::optional(FieldKind::Url).max(400))
        .field("remember_me", FieldRule::optional(FieldKind::Text).one_of(YES_NO))
        .field("eci", FieldRule::optional(FieldKind::Text).one_of(ECI))
}

pub fn check_status() -> Schema {
    identity(Schema::new())
        .field("query_command", FieldRule::required(FieldKind::Text).one_of(&["CHECK_STATUS"]))
        .field("merchant_reference", FieldRule::required(FieldKind::Text).max(40))
        .field("fort_id", FieldRule::optional(FieldKind::Numeric).max(20))
        .field("return_third_party_response_codes", FieldRule::optional(FieldKind::Text).one_of(YES_NO))
}

pub fn tokenization() -> Schema {
    identity(Schema::new())
        .field("service_command", FieldRule::required(FieldKind::Text).one_of(&["TOKENIZATION"]))
        .field("merchant_reference", FieldRule::required(FieldKind::Text).max(40))
        .field("return_url", FieldRule::optional(FieldKind::Url).max(400))
        .field("token_name", FieldRule::optional(FieldKind::Text).max(100))
}
