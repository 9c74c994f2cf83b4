use serde::Serialize;

use super::tenure::{MAX_TENURE_MONTHS, MIN_TENURE_MONTHS};

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

pub const PRINCIPAL_SLIDER: SliderRange = SliderRange {
    min: 1_000.0,
    max: 1_000_000.0,
    step: 1_000.0,
};

pub const RATE_SLIDER: SliderRange = SliderRange {
    min: 1.0,
    max: 15.0,
    step: 0.1,
};

pub const TENURE_SLIDER: SliderRange = SliderRange {
    min: MIN_TENURE_MONTHS as f64,
    max: MAX_TENURE_MONTHS as f64,
    step: 1.0,
};

impl SliderRange {
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    /// Clamps, then moves to the nearest step counted from `min`.
    pub fn snap(&self, value: f64) -> f64 {
        let clamped = self.clamp(value);
        let steps = ((clamped - self.min) / self.step).round();
        // Result carries no more decimals than the step.
        let snapped = self.min + steps * self.step;
        let decimals = step_decimals(self.step);
        let factor = 10f64.powi(decimals);
        ((snapped * factor).round() / factor).clamp(self.min, self.max)
    }

    /// Where an out-of-range field value sits on the track.
    pub fn position(&self, value: f64) -> f64 {
        self.clamp(value)
    }
}

fn step_decimals(step: f64) -> i32 {
    let mut decimals = 0;
    let mut scaled = step;
    while decimals < 6 && (scaled - scaled.round()).abs() > 1e-9 {
        scaled *= 10.0;
        decimals += 1;
    }
    decimals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn principal_slider_snaps_to_thousands() {
        assert_eq!(PRINCIPAL_SLIDER.snap(12_345.0), 12_000.0);
        assert_eq!(PRINCIPAL_SLIDER.snap(12_500.0), 13_000.0);
        assert_eq!(PRINCIPAL_SLIDER.snap(10.0), 1_000.0);
        assert_eq!(PRINCIPAL_SLIDER.snap(5_000_000.0), 1_000_000.0);
    }

    #[test]
    fn rate_slider_snaps_to_tenths() {
        assert_eq!(RATE_SLIDER.snap(6.54), 6.5);
        assert_eq!(RATE_SLIDER.snap(6.56), 6.6);
        assert_eq!(RATE_SLIDER.snap(0.0), 1.0);
        assert_eq!(RATE_SLIDER.snap(20.0), 15.0);
    }

    #[test]
    fn tenure_slider_covers_one_to_one_hundred_twenty_months() {
        assert_eq!(TENURE_SLIDER.snap(0.0), 1.0);
        assert_eq!(TENURE_SLIDER.snap(60.4), 60.0);
        assert_eq!(TENURE_SLIDER.snap(121.0), 120.0);
    }

    #[test]
    fn position_clamps_without_snapping() {
        assert_eq!(PRINCIPAL_SLIDER.position(1_500.5), 1_500.5);
        assert_eq!(PRINCIPAL_SLIDER.position(0.0), 1_000.0);
        assert_eq!(RATE_SLIDER.position(f64::NAN), 1.0);
    }
}
