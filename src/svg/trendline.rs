//! Trendline area chart.
//!
//! Draws an area series over a UTC time axis with a vertical gradient fill,
//! a hover crosshair snapped to each datum and a native `<title>` tooltip.

use super::renderer::{escape_xml, fmt_num};
use super::styles::{ChartMargin, StrokeWidths, CROSSHAIR_DASH, CROSSHAIR_RADIUS};
use crate::types::TrendPoint;

/// Produces tooltip text for one datum
pub type TooltipRenderer<'a> = &'a dyn Fn(&TrendPoint) -> String;

/// Draws a trend chart into a `width` x `height` region, returning an SVG
/// fragment positioned at the region origin.
pub trait TrendRenderer {
    fn render(
        &self,
        series: &[TrendPoint],
        width: f64,
        height: f64,
        color: &str,
        gradient_id: &str,
        tooltip: TooltipRenderer<'_>,
    ) -> String;
}

/// Linear scale from a data domain onto a pixel range
#[derive(Debug, Clone, Copy)]
struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }
}

/// Default SVG trend renderer
#[derive(Debug, Clone)]
pub struct SvgTrendRenderer {
    pub start_y_axis_at_zero: bool,
    pub aria_label: String,
}

impl SvgTrendRenderer {
    pub fn new(start_y_axis_at_zero: bool, aria_label: impl Into<String>) -> Self {
        Self {
            start_y_axis_at_zero,
            aria_label: aria_label.into(),
        }
    }

    fn scales(&self, series: &[TrendPoint], width: f64, height: f64) -> (LinearScale, LinearScale) {
        let x_min = series.first().map(|p| p.x).unwrap_or(0) as f64;
        let x_max = series.last().map(|p| p.x).unwrap_or(0) as f64;
        let (mut y_min, mut y_max) = series
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
        if self.start_y_axis_at_zero {
            y_min = y_min.min(0.0);
            y_max = y_max.max(0.0);
        }
        let x = LinearScale {
            domain: (x_min, x_max),
            range: (ChartMargin::LEFT, width - ChartMargin::RIGHT),
        };
        let y = LinearScale {
            domain: (y_min, y_max),
            range: (height - ChartMargin::BOTTOM, ChartMargin::TOP),
        };
        (x, y)
    }
}

impl TrendRenderer for SvgTrendRenderer {
    fn render(
        &self,
        series: &[TrendPoint],
        width: f64,
        height: f64,
        color: &str,
        gradient_id: &str,
        tooltip: TooltipRenderer<'_>,
    ) -> String {
        let mut parts: Vec<String> = Vec::new();
        parts.push(format!(
            r#"<g class="trendline" role="img" aria-label="{}">"#,
            escape_xml(&self.aria_label)
        ));
        parts.push(format!(
            r##"<defs><linearGradient id="{}" x1="0" y1="0" x2="0" y2="1"><stop offset="0%" stop-color="{}" stop-opacity="1" /><stop offset="100%" stop-color="#fff" stop-opacity="1" /></linearGradient></defs>"##,
            gradient_id,
            escape_xml(color)
        ));

        if series.is_empty() {
            parts.push("</g>".to_string());
            return parts.join("\n");
        }

        let (x, y) = self.scales(series, width, height);
        let points: Vec<(f64, f64)> = series
            .iter()
            .map(|p| (x.map(p.x as f64), y.map(p.y)))
            .collect();
        let top = ChartMargin::TOP;
        let bottom = height - ChartMargin::BOTTOM;

        // Area down to the bottom of the plot, then the line on top of it
        let line = points
            .iter()
            .map(|(px, py)| format!("{},{}", fmt_num(*px), fmt_num(*py)))
            .collect::<Vec<_>>()
            .join(" L");
        let (first_x, _) = points[0];
        let (last_x, _) = points[points.len() - 1];
        parts.push(format!(
            r#"<path class="area" d="M{},{} L{} L{},{} Z" fill="url(#{})" stroke="none" />"#,
            fmt_num(first_x),
            fmt_num(bottom),
            line,
            fmt_num(last_x),
            fmt_num(bottom),
            gradient_id
        ));
        parts.push(format!(
            r#"<path class="line" d="M{}" fill="none" stroke="{}" stroke-width="{}" />"#,
            line,
            escape_xml(color),
            StrokeWidths::TREND_LINE
        ));

        // Hover bands split halfway between neighbouring points
        for (i, (point, &(px, py))) in series.iter().zip(&points).enumerate() {
            let left = if i == 0 {
                ChartMargin::LEFT
            } else {
                (points[i - 1].0 + px) / 2.0
            };
            let right = if i + 1 == points.len() {
                width - ChartMargin::RIGHT
            } else {
                (px + points[i + 1].0) / 2.0
            };
            parts.push(format!(
                r##"<g class="hover-target"><rect x="{}" y="{}" width="{}" height="{}" fill="transparent" /><g class="crosshair"><line x1="{px}" y1="{}" x2="{px}" y2="{}" stroke="{color}" stroke-width="{}" stroke-dasharray="{}" /><circle cx="{px}" cy="{}" r="{}" fill="{color}" stroke="#fff" /></g><title>{}</title></g>"##,
                fmt_num(left),
                fmt_num(top),
                fmt_num((right - left).max(0.0)),
                fmt_num(bottom - top),
                fmt_num(top),
                fmt_num(bottom),
                StrokeWidths::CROSSHAIR,
                CROSSHAIR_DASH,
                fmt_num(py),
                CROSSHAIR_RADIUS,
                escape_xml(&tooltip(point)),
                px = fmt_num(px),
                color = escape_xml(color),
            ));
        }

        parts.push("</g>".to_string());
        parts.join("\n")
    }
}
