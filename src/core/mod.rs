mod chart;
mod input;
mod maturity;
mod session;
mod slider;
mod tenure;
mod types;

pub use chart::{
    ChartHost, ChartSeries, ChartSurface, RingChart, RingStyle, SERIES_LABELS, render_ring_svg,
};
pub use input::{RawField, coerce_amount, coerce_count, coerce_months};
pub use maturity::{compute_maturity, is_degenerate};
pub use session::{Calculator, Summary};
pub use slider::{PRINCIPAL_SLIDER, RATE_SLIDER, SliderRange, TENURE_SLIDER};
pub use tenure::{MAX_TENURE_MONTHS, MIN_TENURE_MONTHS, Tenure};
pub use types::{Compounding, DepositInputs, Maturity};
