use tracing::warn;

use super::types::{DepositInputs, Maturity};

/// True when the inputs do not yet describe a deposit worth evaluating.
pub fn is_degenerate(inputs: &DepositInputs) -> bool {
    !(inputs.principal.is_finite() && inputs.principal > 0.0)
        || !(inputs.annual_rate_percent.is_finite() && inputs.annual_rate_percent > 0.0)
        || (inputs.tenure_years == 0 && inputs.tenure_months == 0)
}

/// Discrete compound interest: `P * (1 + r/n)^(n*t)` with fractional `t`.
///
/// Degenerate inputs, and results too large to represent, yield
/// [`Maturity::ZERO`] rather than an error.
pub fn compute_maturity(inputs: &DepositInputs) -> Maturity {
    if is_degenerate(inputs) {
        return Maturity::ZERO;
    }

    let rate = inputs.annual_rate_percent / 100.0;
    let periods = inputs.compounding.periods_per_year() as f64;
    let years = inputs.tenure_in_years();

    let maturity_amount = inputs.principal * (1.0 + rate / periods).powf(periods * years);
    if !maturity_amount.is_finite() {
        warn!(?inputs, "maturity amount overflowed");
        return Maturity::ZERO;
    }
    Maturity {
        total_interest: maturity_amount - inputs.principal,
        maturity_amount,
    }
}
