//! Form validation.
//!
//! Stricter than the calculator: before anything is sent, every required
//! field must be filled and every number must parse and be in range.
//! All violations are collected so the user sees them in one pass.

use std::fmt;

use crate::form::{Field, FieldKind, FormValues};
use crate::i18n::Locale;

/// Why a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Problem {
    Required,
    InvalidEmail,
    NotSelected,
    NotANumber,
    Negative,
    NotPositive,
    NotInteger,
}

impl Problem {
    pub fn text(self, locale: Locale) -> &'static str {
        match locale {
            Locale::Tr => match self {
                Problem::Required => "alanı boş bırakılamaz",
                Problem::InvalidEmail => "geçerli bir e-posta adresi olmalıdır",
                Problem::NotSelected => "seçilmelidir",
                Problem::NotANumber => "için geçerli bir değer giriniz",
                Problem::Negative => "negatif olamaz",
                Problem::NotPositive => "sıfırdan büyük olmalıdır",
                Problem::NotInteger => "tam sayı olmalıdır",
            },
            Locale::En => match self {
                Problem::Required => "is required",
                Problem::InvalidEmail => "must be a valid e-mail address",
                Problem::NotSelected => "must be selected",
                Problem::NotANumber => "must be a number",
                Problem::Negative => "must not be negative",
                Problem::NotPositive => "must be greater than zero",
                Problem::NotInteger => "must be a whole number",
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub key: &'static str,
    pub label: &'static str,
    pub problem: Problem,
}

impl FieldError {
    pub fn message(&self, locale: Locale) -> String {
        format!("{} {}", self.label, self.problem.text(locale))
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message(Locale::Tr))
    }
}

/// Every field problem found in one validation pass, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn push(&mut self, key: &'static str, label: &'static str, problem: Problem) {
        self.errors.push(FieldError {
            key,
            label,
            problem,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn get(&self, key: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.key == key)
    }

    /// All problems joined into a single line.
    pub fn message(&self, locale: Locale) -> String {
        self.errors
            .iter()
            .map(|e| e.message(locale))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message(Locale::Tr))
    }
}

impl std::error::Error for ValidationErrors {}

/// Parse a decimal as typed into a form; a comma is accepted as the
/// decimal separator.
pub(crate) fn parse_decimal(raw: &str) -> Option<f64> {
    let v: f64 = raw.trim().replace(',', ".").parse().ok()?;
    v.is_finite().then_some(v)
}

/// Check `values` against `schema`.
pub fn validate(values: &FormValues, schema: &[Field]) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    for field in schema {
        let raw = values.get(field.key).trim();
        if let Some(problem) = check(field.kind, raw) {
            errors.push(field.key, field.label, problem);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        tracing::debug!(count = errors.len(), "form rejected: {}", errors);
        Err(errors)
    }
}

fn check(kind: FieldKind, raw: &str) -> Option<Problem> {
    if raw.is_empty() {
        return Some(match kind {
            FieldKind::Select => Problem::NotSelected,
            _ => Problem::Required,
        });
    }

    match kind {
        FieldKind::Text => None,
        FieldKind::Email => (!raw.contains('@')).then_some(Problem::InvalidEmail),
        FieldKind::Select => match raw.parse::<i64>() {
            Ok(id) if id > 0 => None,
            _ => Some(Problem::NotSelected),
        },
        FieldKind::Price => match parse_decimal(raw) {
            None => Some(Problem::NotANumber),
            Some(v) if v < 0.0 => Some(Problem::Negative),
            Some(_) => None,
        },
        FieldKind::Dimension => match parse_decimal(raw) {
            None => Some(Problem::NotANumber),
            Some(v) if v <= 0.0 => Some(Problem::NotPositive),
            Some(_) => None,
        },
        FieldKind::Quantity => match parse_decimal(raw) {
            None => Some(Problem::NotANumber),
            Some(v) if v <= 0.0 => Some(Problem::NotPositive),
            Some(v) if v.fract() != 0.0 || v > f64::from(u32::MAX) => Some(Problem::NotInteger),
            Some(_) => None,
        },
    }
}
