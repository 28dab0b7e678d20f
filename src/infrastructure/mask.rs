//! Masking of card and wallet data before it reaches the logs.

use crate::domain::parameters::Parameters;
use serde_json::Value;

/// Keeps the last four characters of a card number.
fn mask_pan(pan: &str) -> String {
    let len = pan.chars().count();
    if len > 4 {
        let tail: String = pan.chars().skip(len - 4).collect();
        "*".repeat(len - 4) + &tail
    } else {
        pan.to_string()
    }
}

fn is_pan_key(key: &str) -> bool {
    let k = key.to_lowercase();
    k == "card_number" || (k.contains("card") && k.contains("num"))
}

fn is_secret_key(key: &str) -> bool {
    let k = key.to_lowercase();
    k.contains("security_code")
        || k == "expiry_date"
        || k.contains("cvv")
        || k == "apple_data"
        || k == "apple_signature"
        || k == "token_name"
}

/// Returns a copy of `params` safe to log.
pub fn secure_parameters(params: &Parameters) -> Value {
    let value = serde_json::to_value(params).unwrap_or(Value::Null);
    secure_value(&value)
}

pub fn secure_value(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut new = serde_json::Map::with_capacity(map.len());
            for (k, val) in map {
                let new_val = match val {
                    Value::String(s) if is_pan_key(k) => Value::String(mask_pan(s)),
                    Value::Number(n) if is_pan_key(k) => Value::String(mask_pan(&n.to_string())),
                    Value::String(_) | Value::Number(_) if is_secret_key(k) => {
                        Value::String("***".to_string())
                    }
                    _ => secure_value(val),
                };
                new.insert(k.clone(), new_val);
            }
            Value::Object(new)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(secure_value).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_card_fields_are_masked() {
        let params = Parameters::new()
            .with("card_number", "4005550000000001")
            .with("card_security_code", "123")
            .with("apple_data", "opaque-blob")
            .with("merchant_reference", "ORD-1");

        let secured = secure_parameters(&params);

        assert_eq!(secured["card_number"], json!("************0001"));
        assert_eq!(secured["card_security_code"], json!("***"));
        assert_eq!(secured["apple_data"], json!("***"));
        assert_eq!(secured["merchant_reference"], json!("ORD-1"));
    }

    #[test]
    fn test_nested_values_are_masked() {
        let value = json!({"apple_paymentMethod": {"apple_displayName": "Visa 0492"}, "card": [{"card_number": 4111111111111111u64}]});
        let secured = secure_value(&value);
        assert_eq!(secured["card"][0]["card_number"], json!("************1111"));
        assert_eq!(secured["apple_paymentMethod"]["apple_displayName"], json!("Visa 0492"));
    }
}
