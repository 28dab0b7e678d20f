//! Request and response signatures.
//!
//! The gateway signs a message built from every field except `signature`,
//! sorted by name and rendered as `name=value` with no separator, wrapped in
//! the shared phrase on both sides:
//!
//! ```text
//! hex(H(phrase || k1=v1 || k2=v2 || ... || phrase))
//! ```

use super::parameters::{Parameters, SIGNATURE_FIELD};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use std::str::FromStr;

/// Hash function used for signatures, as selected in the merchant account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShaType {
    #[default]
    #[serde(rename = "SHA-256")]
    Sha256,
    #[serde(rename = "SHA-512")]
    Sha512,
}

impl fmt::Display for ShaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha256 => f.write_str("SHA-256"),
            Self::Sha512 => f.write_str("SHA-512"),
        }
    }
}

impl FromStr for ShaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('_', "-").as_str() {
            "SHA-256" | "SHA256" => Ok(Self::Sha256),
            "SHA-512" | "SHA512" => Ok(Self::Sha512),
            other => Err(format!("unsupported signature hash: {other}")),
        }
    }
}

/// Computes and checks gateway signatures.
///
/// Holds no state besides the hash choice, so one engine can be shared by
/// any number of concurrent requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignatureEngine {
    sha_type: ShaType,
}

impl SignatureEngine {
    pub fn new(sha_type: ShaType) -> Self {
        Self { sha_type }
    }

    pub fn sha_type(&self) -> ShaType {
        self.sha_type
    }

    /// Signs `fields` with `phrase`. Any `signature` entry is ignored.
    pub fn sign(&self, fields: &Parameters, phrase: &str) -> String {
        let message = signing_string(fields, phrase);
        match self.sha_type {
            ShaType::Sha256 => hex::encode(Sha256::digest(message.as_bytes())),
            ShaType::Sha512 => hex::encode(Sha512::digest(message.as_bytes())),
        }
    }

    /// Returns true when `fields` carry a signature matching the one
    /// recomputed over the remaining fields.
    pub fn verify(&self, fields: &Parameters, phrase: &str) -> bool {
        match fields.signature() {
            Some(carried) => carried.eq_ignore_ascii_case(&self.sign(fields, phrase)),
            None => false,
        }
    }
}

/// Builds the exact message that is hashed.
pub fn signing_string(fields: &Parameters, phrase: &str) -> String {
    let mut message = String::from(phrase);
    // Parameters iterate in key order, which is the canonical order.
    for (name, value) in fields.iter().filter(|(name, _)| *name != SIGNATURE_FIELD) {
        message.push_str(name);
        message.push('=');
        render_value(value, &mut message);
    }
    message.push_str(phrase);
    message
}

fn render_value(value: &Value, out: &mut String) {
    match value {
        Value::Null => {}
        Value::String(s) => out.push_str(s),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        // Nested blocks (apple_header, apple_paymentMethod) sign as {k=v, k=v}
        Value::Object(map) => {
            out.push('{');
            for (i, (k, v)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(k);
                out.push('=');
                render_value(v, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, v) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render_value(v, out);
            }
            out.push(']');
        }
    }
}
