//! Field validation rules.
//!
//! Rules run in a fixed order and the first failing rule wins:
//! required, email shape, phone shape, textarea detail, minimum length.
//! Every rule sees the trimmed value. Validation never fails as an
//! operation; unknown combinations fall through to valid.

use super::types::{FieldKind, FieldSpec, FormValues, ValidationResult};
use crate::error::ValidationError;

/// Shortest accepted textarea when the field sets no `min_length`
pub const DEFAULT_TEXTAREA_MIN: usize = 10;

pub const EMAIL_MESSAGE: &str = "Please enter a valid email address (e.g., name@example.com)";
pub const PHONE_MESSAGE: &str =
    "Please enter a valid South African phone number (e.g., +27 12 345 6789 or 012 345 6789)";

/// Validate one value against its field spec
pub fn validate(spec: &FieldSpec, raw: &str) -> ValidationResult {
    let value = raw.trim();

    if spec.required && value.is_empty() {
        return ValidationResult::invalid(format!("{} is required.", spec.display_name()));
    }

    if spec.kind == FieldKind::Email && !value.is_empty() && !is_email_shape(value) {
        return ValidationResult::invalid(EMAIL_MESSAGE);
    }

    if spec.is_phone() && !value.is_empty() && !is_phone_number(value) {
        return ValidationResult::invalid(PHONE_MESSAGE);
    }

    let length = value.chars().count();

    if spec.kind == FieldKind::Textarea {
        let min = spec.min_length.unwrap_or(DEFAULT_TEXTAREA_MIN);
        if length < min {
            return ValidationResult::invalid(format!(
                "Please provide more details (minimum {} characters required)",
                min
            ));
        }
    } else if let Some(min) = spec.min_length {
        if !value.is_empty() && length < min {
            return ValidationResult::invalid(format!(
                "{} must be at least {} characters.",
                spec.display_name(),
                min
            ));
        }
    }

    ValidationResult::ok()
}

/// Validate every present field of a partial form snapshot, returning all
/// failures in field order.
///
/// Fields without an entry in `values` are not validated.
pub fn validate_form(fields: &[FieldSpec], values: &FormValues) -> Vec<ValidationError> {
    collect_failures(fields.iter().filter_map(|spec| {
        values.get(&spec.name).map(|raw| (spec, raw.as_str()))
    }))
}

/// Validate every field of a form definition. A field the user never
/// filled in is checked as empty.
pub fn validate_all(fields: &[FieldSpec], values: &FormValues) -> Vec<ValidationError> {
    collect_failures(fields.iter().map(|spec| {
        let raw = values.get(&spec.name).map(String::as_str).unwrap_or("");
        (spec, raw)
    }))
}

fn collect_failures<'a>(
    fields: impl Iterator<Item = (&'a FieldSpec, &'a str)>,
) -> Vec<ValidationError> {
    fields
        .filter_map(|(spec, raw)| {
            let result = validate(spec, raw);
            tracing::debug!(field = %spec.name, valid = result.valid, "validated field");
            match result.message {
                Some(message) if !result.valid => Some(ValidationError {
                    field: spec.name.clone(),
                    message,
                }),
                _ => None,
            }
        })
        .collect()
}

/// `local@domain.tld` shape: one `@`, non-empty parts, a dot inside the
/// domain with text on both sides, and no whitespace anywhere.
pub fn is_email_shape(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// South African number: `0` plus nine digits, or `27`/`+27` plus nine digits.
/// Spaces, hyphens and parentheses are ignored.
pub fn is_phone_number(value: &str) -> bool {
    let clean: String = value
        .chars()
        .filter(|c| !(c.is_whitespace() || matches!(c, '-' | '(' | ')')))
        .collect();

    let all_digits = |s: &str, n: usize| s.len() == n && s.bytes().all(|b| b.is_ascii_digit());

    if let Some(rest) = clean.strip_prefix('0') {
        return all_digits(rest, 9);
    }

    let international = clean.strip_prefix('+').unwrap_or(&clean);
    international
        .strip_prefix("27")
        .is_some_and(|rest| all_digits(rest, 9))
}
