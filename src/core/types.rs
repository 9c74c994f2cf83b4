use serde::Serialize;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Compounding {
    Yearly,
    HalfYearly,
    #[default]
    Quarterly,
    Monthly,
}

impl Compounding {
    pub const ALL: [Compounding; 4] = [
        Compounding::Yearly,
        Compounding::HalfYearly,
        Compounding::Quarterly,
        Compounding::Monthly,
    ];

    /// Times per year interest is credited.
    pub fn periods_per_year(self) -> u32 {
        match self {
            Compounding::Yearly => 1,
            Compounding::HalfYearly => 2,
            Compounding::Quarterly => 4,
            Compounding::Monthly => 12,
        }
    }

    pub fn from_periods(periods: u32) -> Option<Self> {
        match periods {
            1 => Some(Compounding::Yearly),
            2 => Some(Compounding::HalfYearly),
            4 => Some(Compounding::Quarterly),
            12 => Some(Compounding::Monthly),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Compounding::Yearly => "Yearly",
            Compounding::HalfYearly => "Half-yearly",
            Compounding::Quarterly => "Quarterly",
            Compounding::Monthly => "Monthly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositInputs {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub tenure_years: u32,
    pub tenure_months: u32,
    pub compounding: Compounding,
}

impl Default for DepositInputs {
    fn default() -> Self {
        Self {
            principal: 100_000.0,
            annual_rate_percent: 6.5,
            tenure_years: 5,
            tenure_months: 0,
            compounding: Compounding::Quarterly,
        }
    }
}

impl DepositInputs {
    /// Tenure as fractional years.
    pub fn tenure_in_years(&self) -> f64 {
        self.tenure_years as f64 + self.tenure_months as f64 / 12.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Maturity {
    pub total_interest: f64,
    pub maturity_amount: f64,
}

impl Maturity {
    pub const ZERO: Maturity = Maturity {
        total_interest: 0.0,
        maturity_amount: 0.0,
    };
}
