use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;

/// Field name to human-readable message. Valid input produces an empty map.
pub type FieldErrors = BTreeMap<&'static str, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Email,
}

/// One required field with its length/format constraints.
pub struct FieldRule {
    pub name: &'static str,
    pub label: &'static str,
    pub min: usize,
    pub max: usize,
    pub format: Option<Format>,
}

pub const REGISTER: &[FieldRule] = &[
    FieldRule { name: "displayName", label: "Name", min: 2, max: 50, format: None },
    FieldRule { name: "email", label: "Email", min: 0, max: 0, format: Some(Format::Email) },
    FieldRule { name: "password", label: "Password", min: 6, max: 30, format: None },
];

pub const LOGIN: &[FieldRule] = &[
    FieldRule { name: "email", label: "Email", min: 0, max: 0, format: Some(Format::Email) },
    FieldRule { name: "password", label: "Password", min: 0, max: 0, format: None },
];

pub const POST: &[FieldRule] = &[
    FieldRule { name: "text", label: "Text", min: 0, max: 0, format: None },
];

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Check `fields` against `schema`. A field absent from `fields` is treated
/// as present-but-empty so the caller still gets a specific message.
pub fn check(schema: &[FieldRule], fields: &[(&'static str, Option<&str>)]) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for rule in schema {
        let value = fields
            .iter()
            .find(|(name, _)| *name == rule.name)
            .and_then(|(_, v)| *v)
            .unwrap_or("")
            .trim();

        if value.is_empty() {
            errors.insert(rule.name, format!("{} field is required", rule.label));
            continue;
        }
        if rule.max > 0 {
            let len = value.chars().count();
            if len < rule.min || len > rule.max {
                errors.insert(
                    rule.name,
                    format!(
                        "{} must be between {} and {} characters",
                        rule.label, rule.min, rule.max
                    ),
                );
                continue;
            }
        }
        if rule.format == Some(Format::Email) && !is_valid_email(value) {
            errors.insert(rule.name, format!("{} is invalid", rule.label));
        }
    }
    errors
}
