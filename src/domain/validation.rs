//! Field-level schemas and the validation pass run before every dispatch.
//!
//! Validation is total: every field of the request is checked, and a field
//! the schema does not name is rejected rather than silently dropped, since
//! it has already been covered by the signature.

use super::parameters::{Parameters, ValidatedParameters, is_blank};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Shape a field value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any string.
    Text,
    /// Digits only, as a JSON integer or a numeric string.
    Numeric,
    Email,
    /// Absolute http(s) URL.
    Url,
    /// Flat JSON object (Apple Pay header blocks).
    Object,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Numeric => "numeric",
            Self::Email => "email",
            Self::Url => "url",
            Self::Object => "object",
        };
        f.write_str(name)
    }
}

/// Constraints on a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    pub required: bool,
    pub kind: FieldKind,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
    pub allowed: Option<&'static [&'static str]>,
}

impl FieldRule {
    pub fn required(kind: FieldKind) -> Self {
        Self {
            required: true,
            kind,
            min_len: None,
            max_len: None,
            allowed: None,
        }
    }

    pub fn optional(kind: FieldKind) -> Self {
        Self {
            required: false,
            ..Self::required(kind)
        }
    }

    pub fn max(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    pub fn length(mut self, min_len: usize, max_len: usize) -> Self {
        self.min_len = Some(min_len);
        self.max_len = Some(max_len);
        self
    }

    pub fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed = Some(allowed);
        self
    }

    fn check(&self, value: &Value) -> Option<Violation> {
        let text = match (self.kind, value) {
            (FieldKind::Object, Value::Object(_)) => return None,
            (FieldKind::Object, _) => return Some(Violation::WrongKind(self.kind)),
            (FieldKind::Numeric, Value::Number(n)) if n.is_u64() => n.to_string(),
            (_, Value::String(s)) => s.clone(),
            _ => return Some(Violation::WrongKind(self.kind)),
        };

        let well_formed = match self.kind {
            FieldKind::Text | FieldKind::Object => true,
            FieldKind::Numeric => !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()),
            FieldKind::Email => is_email(&text),
            FieldKind::Url => text.starts_with("https://") || text.starts_with("http://"),
        };
        if !well_formed {
            return Some(Violation::WrongKind(self.kind));
        }

        let len = text.chars().count();
        if let Some(min) = self.min_len
            && len < min
        {
            return Some(Violation::TooShort(min));
        }
        if let Some(max) = self.max_len
            && len > max
        {
            return Some(Violation::TooLong(max));
        }
        if let Some(allowed) = self.allowed
            && !allowed.contains(&text.as_str())
        {
            return Some(Violation::NotAllowed(allowed.join(", ")));
        }
        None
    }
}

fn is_email(text: &str) -> bool {
    match text.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

/// What is wrong with a field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("is required")]
    Missing,
    #[error("is not accepted by this command")]
    Unknown,
    #[error("must be {0}")]
    WrongKind(FieldKind),
    #[error("must be at least {0} characters")]
    TooShort(usize),
    #[error("must be at most {0} characters")]
    TooLong(usize),
    #[error("must be one of: {0}")]
    NotAllowed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub violation: Violation,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.violation)
    }
}

/// All field errors found in one request, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the violation reported for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&Violation> {
        self.0.iter().find(|e| e.field == field).map(|e| &e.violation)
    }

    fn push(&mut self, field: impl Into<String>, violation: Violation) {
        self.0.push(FieldError {
            field: field.into(),
            violation,
        });
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Field name to rule mapping for one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: BTreeMap<&'static str, FieldRule>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &'static str, rule: FieldRule) -> Self {
        self.fields.insert(name, rule);
        self
    }

    pub fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.fields.get(name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|(_, r)| r.required).map(|(name, _)| *name)
    }

    /// Checks every field of `params`. Null and blank values count as absent.
    pub fn validate(&self, params: Parameters) -> Result<ValidatedParameters, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        for (name, rule) in &self.fields {
            if rule.required && params.get(name).is_none_or(is_blank) {
                errors.push(*name, Violation::Missing);
            }
        }

        for (name, value) in &params {
            match self.fields.get(name.as_str()) {
                None => errors.push(name.as_str(), Violation::Unknown),
                Some(_) if is_blank(value) => {}
                Some(rule) => {
                    if let Some(violation) = rule.check(value) {
                        errors.push(name.as_str(), violation);
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(ValidatedParameters::new(params))
        } else {
            errors.0.sort_by(|a, b| a.field.cmp(&b.field));
            Err(errors)
        }
    }
}
