//! Coercion of raw form entries into calculator inputs.
//!
//! Nothing here fails: empty, non-numeric, negative, or non-finite entries
//! become zero and the calculator then reports its "no result yet" state.

use serde::Deserialize;
use tracing::warn;

use super::types::Compounding;

/// A field as it arrives from a form, a query string, or a JSON body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Number(f64),
    Text(String),
}

impl RawField {
    fn as_number(&self) -> Option<f64> {
        match self {
            RawField::Number(v) => Some(*v),
            RawField::Text(s) => parse_number(s),
        }
    }

    pub fn amount(&self) -> f64 {
        sanitize(self.as_number(), self)
    }

    pub fn count(&self) -> u32 {
        to_count(sanitize(self.as_number(), self))
    }

    pub fn months(&self) -> u32 {
        self.count().min(11)
    }

    pub fn compounding(&self) -> Compounding {
        match self {
            RawField::Number(v) => compounding_from_number(*v),
            RawField::Text(s) => compounding_from_text(s),
        }
    }
}

impl From<f64> for RawField {
    fn from(value: f64) -> Self {
        RawField::Number(value)
    }
}

impl From<&str> for RawField {
    fn from(value: &str) -> Self {
        RawField::Text(value.to_string())
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

fn sanitize(value: Option<f64>, raw: &RawField) -> f64 {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        Some(_) => {
            warn!(?raw, "discarding negative or non-finite entry");
            0.0
        }
        None => {
            if !matches!(raw, RawField::Text(s) if s.trim().is_empty()) {
                warn!(?raw, "discarding non-numeric entry");
            }
            0.0
        }
    }
}

fn to_count(value: f64) -> u32 {
    if value >= u32::MAX as f64 {
        u32::MAX
    } else {
        value.trunc() as u32
    }
}

fn compounding_from_number(value: f64) -> Compounding {
    if value.fract() == 0.0 && (1.0..=12.0).contains(&value) {
        if let Some(c) = Compounding::from_periods(value as u32) {
            return c;
        }
    }
    warn!(value, "unknown compounding frequency, using quarterly");
    Compounding::default()
}

fn compounding_from_text(text: &str) -> Compounding {
    let normalized = text.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "yearly" | "annually" | "annual" => Compounding::Yearly,
        "half-yearly" | "half_yearly" | "halfyearly" | "semi-annually" => Compounding::HalfYearly,
        "quarterly" => Compounding::Quarterly,
        "monthly" => Compounding::Monthly,
        other => match parse_number(other) {
            Some(v) => compounding_from_number(v),
            None => {
                warn!(text, "unknown compounding frequency, using quarterly");
                Compounding::default()
            }
        },
    }
}

/// Principal or rate entry.
pub fn coerce_amount(text: &str) -> f64 {
    RawField::from(text).amount()
}

/// Whole years entry.
pub fn coerce_count(text: &str) -> u32 {
    RawField::from(text).count()
}

/// Additional months entry, capped at 11.
pub fn coerce_months(text: &str) -> u32 {
    RawField::from(text).months()
}
