use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Name of the field carrying the request or response signature.
pub const SIGNATURE_FIELD: &str = "signature";

/// Field-name to value mapping sent to (or received from) the gateway.
///
/// Keys are kept in ascending order so iteration matches the canonical
/// order used when signing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(BTreeMap<String, Value>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the value of `key` if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The signature carried by these parameters, ignoring blank values.
    pub fn signature(&self) -> Option<&str> {
        self.get_str(SIGNATURE_FIELD).filter(|s| !s.is_empty())
    }

    /// Whether a non-blank `signature` is present, whatever its type.
    pub fn has_signature(&self) -> bool {
        self.get(SIGNATURE_FIELD).is_some_and(|value| !is_blank(value))
    }

    /// Copies every entry of `other` over `self`.
    pub fn extend(&mut self, other: Parameters) {
        self.0.extend(other.0);
    }

    /// Parses a JSON object into parameters.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Parameters that passed the schema of the command they are sent with.
///
/// Only [`Schema::validate`](crate::domain::validation::Schema::validate)
/// constructs this type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedParameters(Parameters);

impl ValidatedParameters {
    pub(crate) fn new(params: Parameters) -> Self {
        Self(params)
    }

    pub fn as_parameters(&self) -> &Parameters {
        &self.0
    }

    pub fn into_inner(self) -> Parameters {
        self.0
    }
}

/// Raw response returned by the gateway. Immutable once received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GatewayResponse(Parameters);

impl GatewayResponse {
    pub fn new(fields: Parameters) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Parameters {
        &self.0
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get_str(key)
    }

    /// Two-digit `transaction_status` code, if the gateway sent one.
    ///
    /// Numeric codes are rendered in their two-digit wire form (`4` reads
    /// as `"04"`). Only a missing, `null` or empty value counts as absent.
    pub fn transaction_status(&self) -> Option<String> {
        self.0.get("transaction_status").and_then(status_code)
    }

    pub fn transaction_message(&self) -> Option<&str> {
        self.0.get_str("transaction_message")
    }

    pub fn into_inner(self) -> Parameters {
        self.0
    }
}

impl From<Parameters> for GatewayResponse {
    fn from(fields: Parameters) -> Self {
        Self(fields)
    }
}

/// `null` and `""` carry no value.
pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn status_code(value: &Value) -> Option<String> {
    match value {
        _ if is_blank(value) => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(match n.as_u64() {
            Some(code) => format!("{code:02}"),
            None => n.to_string(),
        }),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parameters_iterate_in_key_order() {
        let params = Parameters::new()
            .with("merchant_reference", "ORD-1")
            .with("amount", 1000)
            .with("currency", "AED");

        let keys: Vec<&str> = params.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["amount", "currency", "merchant_reference"]);
    }

    #[test]
    fn test_blank_signature_is_absent() {
        let params = Parameters::new().with(SIGNATURE_FIELD, "");
        assert!(params.signature().is_none());

        let params = Parameters::new().with(SIGNATURE_FIELD, "abc");
        assert_eq!(params.signature(), Some("abc"));
    }

    #[test]
    fn test_non_string_signature_is_still_present() {
        let params = Parameters::new().with(SIGNATURE_FIELD, 12345);
        assert!(params.signature().is_none());
        assert!(params.has_signature());

        assert!(!Parameters::new().with(SIGNATURE_FIELD, Value::Null).has_signature());
        assert!(!Parameters::new().with(SIGNATURE_FIELD, "").has_signature());
    }

    #[test]
    fn test_numeric_status_reads_as_code() {
        let status = |value: Value| {
            GatewayResponse::new(Parameters::new().with("transaction_status", value))
                .transaction_status()
        };

        assert_eq!(status(json!(20)).as_deref(), Some("20"));
        assert_eq!(status(json!(14)).as_deref(), Some("14"));
        assert_eq!(status(json!(4)).as_deref(), Some("04"));
        assert_eq!(status(json!(true)).as_deref(), Some("true"));
        assert_eq!(status(json!("")), None);
        assert_eq!(status(Value::Null), None);
        assert_eq!(GatewayResponse::default().transaction_status(), None);
    }

    #[test]
    fn test_response_deserializes_from_json() {
        let raw = json!({
            "transaction_status": "14",
            "transaction_message": "Success",
            "amount": 1000
        });
        let response: GatewayResponse = serde_json::from_value(raw).unwrap();

        assert_eq!(response.transaction_status().as_deref(), Some("14"));
        assert_eq!(response.transaction_message(), Some("Success"));
        assert_eq!(response.fields().get("amount"), Some(&json!(1000)));
    }
}
