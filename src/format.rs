use std::str::FromStr;

use fixed_decimal::FixedDecimal;
use icu::decimal::{FixedDecimalFormatter, options::FixedDecimalFormatterOptions};
use icu::locid::Locale;
use writeable::Writeable;

use crate::error::CalcError;

pub const DEFAULT_LOCALE: &str = "en-IN";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Most fraction digits ever shown.
const MAX_FRACTION_DIGITS: i16 = 2;

/// Locale-grouped currency amounts, e.g. `₹ 12,34,567.89` for `en-IN`.
pub struct CurrencyFormat {
    locale: Locale,
    symbol: String,
    formatter: FixedDecimalFormatter,
}

impl std::fmt::Debug for CurrencyFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrencyFormat")
            .field("locale", &self.locale.to_string())
            .field("symbol", &self.symbol)
            .finish()
    }
}

impl CurrencyFormat {
    pub fn new(locale: &str, symbol: &str) -> Result<Self, CalcError> {
        let parsed: Locale = locale
            .parse()
            .map_err(|e| CalcError::InvalidLocale(format!("{locale}: {e}")))?;
        let formatter =
            FixedDecimalFormatter::try_new(&parsed.clone().into(), FixedDecimalFormatterOptions::default())
                .map_err(|e| CalcError::InvalidLocale(format!("{locale}: {e}")))?;
        Ok(Self {
            locale: parsed,
            symbol: symbol.to_string(),
            formatter,
        })
    }

    pub fn locale(&self) -> String {
        self.locale.to_string()
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Grouped number without the symbol.
    pub fn format_number(&self, amount: f64) -> String {
        let decimal = rounded_decimal(amount);
        self.formatter.format(&decimal).write_to_string().into_owned()
    }

    pub fn format(&self, amount: f64) -> String {
        format!("{} {}", self.symbol, self.format_number(amount))
    }
}

/// Half-up (away from zero) to two places, trailing fractional zeros dropped.
fn rounded_decimal(amount: f64) -> FixedDecimal {
    let amount = if amount.is_finite() && amount != 0.0 {
        amount
    } else {
        0.0
    };
    // f64's Display is the shortest round-tripping decimal and never uses exponents.
    let mut decimal =
        FixedDecimal::from_str(&amount.to_string()).unwrap_or_else(|_| FixedDecimal::from(0));
    decimal.half_expand(-MAX_FRACTION_DIGITS);
    decimal.trim_end();
    decimal
}
