use serde::Serialize;
use tracing::debug;

use super::chart::{ChartHost, ChartSeries, ChartSurface};
use super::input::RawField;
use super::maturity::compute_maturity;
use super::slider::{PRINCIPAL_SLIDER, RATE_SLIDER, TENURE_SLIDER};
use super::tenure::Tenure;
use super::types::{Compounding, DepositInputs, Maturity};

/// The three summary cards shown under the form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_interest: f64,
    pub total_investment: f64,
    pub maturity_amount: f64,
}

impl Summary {
    pub fn new(inputs: &DepositInputs, result: &Maturity) -> Self {
        Self {
            total_interest: result.total_interest,
            total_investment: inputs.principal,
            maturity_amount: result.maturity_amount,
        }
    }
}

/// One calculator instance: the current inputs, the pair computed from
/// them, and the chart surface it redraws.
///
/// Every mutation recomputes before returning, so `result()` always
/// matches `inputs()`.
pub struct Calculator<S: ChartSurface> {
    inputs: DepositInputs,
    result: Maturity,
    chart: ChartHost<S>,
}

impl<S: ChartSurface> Calculator<S> {
    pub fn new(inputs: DepositInputs, surface: S) -> Self {
        let mut calculator = Self {
            inputs,
            result: Maturity::ZERO,
            chart: ChartHost::new(surface),
        };
        calculator.recompute();
        calculator
    }

    /// Calculator without a chart; redraws are skipped until one is mounted.
    pub fn headless(inputs: DepositInputs) -> Self {
        let mut calculator = Self {
            inputs,
            result: Maturity::ZERO,
            chart: ChartHost::default(),
        };
        calculator.recompute();
        calculator
    }

    pub fn inputs(&self) -> &DepositInputs {
        &self.inputs
    }

    pub fn result(&self) -> Maturity {
        self.result
    }

    pub fn summary(&self) -> Summary {
        Summary::new(&self.inputs, &self.result)
    }

    pub fn series(&self) -> ChartSeries {
        ChartSeries::from_result(&self.result, self.inputs.principal)
    }

    pub fn tenure(&self) -> Tenure {
        Tenure::new(self.inputs.tenure_years, self.inputs.tenure_months)
    }

    pub fn chart(&self) -> Option<&S> {
        self.chart.surface()
    }

    /// Replaces the drawing surface, destroying the old one first, and draws the current pair.
    pub fn remount_chart(&mut self, surface: S) {
        self.chart.mount(surface);
        let series = self.series();
        self.chart.push(&series);
    }

    pub fn unmount_chart(&mut self) {
        self.chart.unmount();
    }

    pub fn set_principal(&mut self, raw: impl Into<RawField>) {
        self.inputs.principal = raw.into().amount();
        self.recompute();
    }

    pub fn set_rate(&mut self, raw: impl Into<RawField>) {
        self.inputs.annual_rate_percent = raw.into().amount();
        self.recompute();
    }

    pub fn set_years(&mut self, raw: impl Into<RawField>) {
        self.inputs.tenure_years = raw.into().count();
        self.recompute();
    }

    pub fn set_months(&mut self, raw: impl Into<RawField>) {
        self.inputs.tenure_months = raw.into().months();
        self.recompute();
    }

    pub fn set_compounding(&mut self, compounding: Compounding) {
        self.inputs.compounding = compounding;
        self.recompute();
    }

    pub fn slide_principal(&mut self, value: f64) {
        self.inputs.principal = PRINCIPAL_SLIDER.snap(value);
        self.recompute();
    }

    pub fn slide_rate(&mut self, value: f64) {
        self.inputs.annual_rate_percent = RATE_SLIDER.snap(value);
        self.recompute();
    }

    /// Moves the combined tenure slider; years and months follow.
    pub fn slide_tenure(&mut self, total_months: u32) {
        let tenure = Tenure::from_total_months(total_months);
        self.inputs.tenure_years = tenure.years;
        self.inputs.tenure_months = tenure.months;
        self.recompute();
    }

    /// Slider positions reflecting the current fields.
    pub fn principal_slider(&self) -> f64 {
        PRINCIPAL_SLIDER.position(self.inputs.principal)
    }

    pub fn rate_slider(&self) -> f64 {
        RATE_SLIDER.position(self.inputs.annual_rate_percent)
    }

    pub fn tenure_slider(&self) -> u32 {
        TENURE_SLIDER.position(self.tenure().total_months() as f64) as u32
    }

    fn recompute(&mut self) {
        self.result = compute_maturity(&self.inputs);
        debug!(
            inputs = ?self.inputs,
            interest = self.result.total_interest,
            maturity = self.result.maturity_amount,
            "recomputed maturity"
        );
        let series = self.series();
        self.chart.push(&series);
    }
}
