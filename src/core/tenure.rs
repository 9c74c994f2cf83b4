use std::fmt;

use serde::Serialize;

pub const MIN_TENURE_MONTHS: u32 = 1;
pub const MAX_TENURE_MONTHS: u32 = 120;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenure {
    pub years: u32,
    pub months: u32,
}

impl Tenure {
    pub fn new(years: u32, months: u32) -> Self {
        Self { years, months }
    }

    /// Splits a slider position into years and months, clamping it to 1..=120 first.
    pub fn from_total_months(total: u32) -> Self {
        let total = total.clamp(MIN_TENURE_MONTHS, MAX_TENURE_MONTHS);
        Self {
            years: total / 12,
            months: total % 12,
        }
    }

    pub fn total_months(self) -> u32 {
        self.years.saturating_mul(12).saturating_add(self.months)
    }

    pub fn label(self) -> String {
        self.to_string()
    }
}

fn plural(count: u32, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

impl fmt::Display for Tenure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.years, self.months) {
            (0, 0) => f.write_str("0 months"),
            (y, 0) => f.write_str(&plural(y, "year")),
            (0, m) => f.write_str(&plural(m, "month")),
            (y, m) => write!(f, "{} {}", plural(y, "year"), plural(m, "month")),
        }
    }
}
