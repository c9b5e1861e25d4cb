//! Form submission helpers shared by the create handlers
//!
//! Every create form follows the same flow: trim the submitted strings, run
//! the `validator` rules, and either hand back a record ready to insert or
//! the original input together with the messages to show next to it.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

static ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());

/// One message attached to a form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Validation messages for a rejected form, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    /// Flatten `validator` output, ordering fields the way the form lays them out.
    pub fn from_validation(errors: ValidationErrors, field_order: &[&str]) -> Self {
        let mut collected: Vec<(usize, FieldError)> = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            let field = field.to_string();
            let rank = field_rank(field_order, &field);
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                collected.push((
                    rank,
                    FieldError {
                        field: field.clone(),
                        message,
                    },
                ));
            }
        }
        // stable: keeps per-field rule order
        collected.sort_by_key(|(rank, _)| *rank);
        Self(collected.into_iter().map(|(_, error)| error).collect())
    }

    /// Add a message for `field` after any earlier fields' messages.
    pub fn insert(&mut self, field: &str, message: impl Into<String>, field_order: &[&str]) {
        let rank = field_rank(field_order, field);
        let at = self
            .0
            .iter()
            .position(|e| field_rank(field_order, &e.field) > rank)
            .unwrap_or(self.0.len());
        self.0.insert(
            at,
            FieldError {
                field: field.to_string(),
                message: message.into(),
            },
        );
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

fn field_rank(field_order: &[&str], field: &str) -> usize {
    field_order
        .iter()
        .position(|name| *name == field)
        .unwrap_or(field_order.len())
}

/// A submission that failed validation, kept so the form can be re-rendered
#[derive(Debug, Clone)]
pub struct Invalid<F> {
    pub form: F,
    pub errors: FormErrors,
}

/// Parse an ISO-8601 calendar date or date-time, keeping only the date part.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Medium date format used across the views ("Jan 5, 1920")
pub fn format_medium_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Letters and digits only. Empty input is left to the `length` rule.
pub fn validate_alphanumeric(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || ALPHANUMERIC.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new("alphanumeric"))
    }
}

/// Empty means "not provided"; anything else must be an ISO-8601 date.
pub fn validate_optional_iso_date(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || parse_iso_date(value).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("iso8601"))
    }
}

/// Reference fields carry a record id chosen from a dropdown. Empty input
/// is left to the `length` rule, so only a filled-in bad id gets a message.
pub fn parse_record_id(
    value: &str,
    field: &str,
    message: &str,
    errors: &mut FormErrors,
    field_order: &[&str],
) -> Option<Uuid> {
    let id = Uuid::parse_str(value).ok();
    if id.is_none() && !value.is_empty() {
        errors.insert(field, message, field_order);
    }
    id
}
