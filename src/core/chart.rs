//! Ring chart of the interest/principal split and the owner of its drawing surface.

use std::f64::consts::PI;

use serde::Serialize;
use tracing::trace;

use super::types::Maturity;

pub const SERIES_LABELS: [&str; 2] = ["Total Interest", "Principal Amount"];

/// `[total_interest, principal]`, in that order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ChartSeries(pub [f64; 2]);

impl ChartSeries {
    pub fn new(total_interest: f64, principal: f64) -> Self {
        Self([total_interest, principal])
    }

    pub fn from_result(result: &Maturity, principal: f64) -> Self {
        Self::new(result.total_interest, principal)
    }

    pub fn interest(&self) -> f64 {
        self.0[0]
    }

    pub fn principal(&self) -> f64 {
        self.0[1]
    }

    pub fn total(&self) -> f64 {
        self.0.iter().map(|v| v.max(0.0)).sum()
    }

    /// Fraction of the ring taken by interest; zero for an empty series.
    pub fn interest_share(&self) -> f64 {
        let total = self.total();
        if total > 0.0 {
            self.interest().max(0.0) / total
        } else {
            0.0
        }
    }
}

/// A drawing surface that renders a two-segment ring.
pub trait ChartSurface {
    fn draw(&mut self, series: &ChartSeries);
    fn destroy(&mut self);
}

/// Exclusive owner of at most one live surface.
///
/// Mounting destroys the previous surface first; unmounting and dropping
/// destroy the current one. A destroyed surface is never drawn to again.
pub struct ChartHost<S: ChartSurface> {
    surface: Option<S>,
}

impl<S: ChartSurface> Default for ChartHost<S> {
    fn default() -> Self {
        Self { surface: None }
    }
}

impl<S: ChartSurface> ChartHost<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface: Some(surface),
        }
    }

    pub fn mount(&mut self, surface: S) {
        self.unmount();
        self.surface = Some(surface);
    }

    pub fn unmount(&mut self) {
        if let Some(mut surface) = self.surface.take() {
            trace!("destroying chart surface");
            surface.destroy();
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn push(&mut self, series: &ChartSeries) {
        if let Some(surface) = self.surface.as_mut() {
            trace!(interest = series.interest(), principal = series.principal(), "redrawing chart");
            surface.draw(series);
        }
    }
}

impl<S: ChartSurface> Drop for ChartHost<S> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RingStyle {
    pub size: f64,
    pub thickness: f64,
    pub colors: [&'static str; 2],
    pub empty_color: &'static str,
    pub legend: bool,
}

impl Default for RingStyle {
    fn default() -> Self {
        Self {
            size: 240.0,
            thickness: 36.0,
            colors: ["#4f46e5", "#e0e7ff"],
            empty_color: "#e5e7eb",
            legend: true,
        }
    }
}

const LEGEND_ROW_HEIGHT: f64 = 22.0;

/// Renders the series as a standalone SVG document.
pub fn render_ring_svg(series: &ChartSeries, style: &RingStyle) -> String {
    let size = style.size;
    let center = size / 2.0;
    let radius = (size - style.thickness) / 2.0;
    let circumference = 2.0 * PI * radius;
    let legend_height = if style.legend {
        LEGEND_ROW_HEIGHT * 2.0 + 12.0
    } else {
        0.0
    };
    let height = size + legend_height;

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size:.0}" height="{height:.0}" viewBox="0 0 {size:.0} {height:.0}" role="img">"#
    ));

    if series.total() <= 0.0 {
        svg.push_str(&format!(
            r#"<circle cx="{center:.2}" cy="{center:.2}" r="{radius:.2}" fill="none" stroke="{}" stroke-width="{:.2}"/>"#,
            style.empty_color, style.thickness
        ));
    } else {
        let interest_len = series.interest_share() * circumference;
        svg.push_str(&format!(
            r#"<circle cx="{center:.2}" cy="{center:.2}" r="{radius:.2}" fill="none" stroke="{}" stroke-width="{:.2}"/>"#,
            style.colors[1], style.thickness
        ));
        if interest_len > 0.0 {
            svg.push_str(&format!(
                r#"<circle cx="{center:.2}" cy="{center:.2}" r="{radius:.2}" fill="none" stroke="{}" stroke-width="{:.2}" stroke-dasharray="{interest_len:.2} {:.2}" transform="rotate(-90 {center:.2} {center:.2})"/>"#,
                style.colors[0],
                style.thickness,
                circumference - interest_len
            ));
        }
    }

    if style.legend {
        for (row, label) in SERIES_LABELS.iter().enumerate() {
            let y = size + 8.0 + row as f64 * LEGEND_ROW_HEIGHT;
            svg.push_str(&format!(
                r#"<rect x="12" y="{y:.2}" width="14" height="14" rx="3" fill="{}"/><text x="34" y="{:.2}" font-family="sans-serif" font-size="13">{label}</text>"#,
                style.colors[row],
                y + 12.0
            ));
        }
    }

    svg.push_str("</svg>");
    svg
}

/// In-memory SVG surface; keeps the markup of the latest draw.
#[derive(Debug, Default)]
pub struct RingChart {
    style: RingStyle,
    svg: Option<String>,
    draws: u64,
    destroyed: bool,
}

impl RingChart {
    pub fn new(style: RingStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn svg(&self) -> Option<&str> {
        self.svg.as_deref()
    }

    pub fn draws(&self) -> u64 {
        self.draws
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl ChartSurface for RingChart {
    fn draw(&mut self, series: &ChartSeries) {
        if self.destroyed {
            return;
        }
        self.svg = Some(render_ring_svg(series, &self.style));
        self.draws += 1;
    }

    fn destroy(&mut self) {
        self.svg = None;
        self.destroyed = true;
    }
}
