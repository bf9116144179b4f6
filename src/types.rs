//! Type definitions for metric card layout

use serde::{Deserialize, Serialize};

use crate::error::{Result, VizError};

/// Area allotted to a widget by the host, in px
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutBox {
    pub width: f64,
    pub height: f64,
}

impl LayoutBox {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Reject boxes that cannot hold anything.
    pub fn validate(&self) -> Result<()> {
        let ok = |d: f64| d.is_finite() && d > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(VizError::InvalidDimension {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Vertical split of a metric card.
///
/// `header` and `subheader` are fractions of the full height, scaled by
/// `1 - trendline` when a trendline is shown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Proportions {
    pub header: f64,
    pub subheader: f64,
    pub trendline: f64,
}

impl Default for Proportions {
    fn default() -> Self {
        Self {
            header: 0.3,
            subheader: 0.125,
            trendline: 0.3,
        }
    }
}

impl Proportions {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("header", self.header),
            ("subheader", self.subheader),
            ("trendline", self.trendline),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(VizError::InvalidProportion { name, value });
            }
        }
        Ok(())
    }
}

/// One sample of the trendline. `x` is a UTC timestamp in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub x: i64,
    pub y: f64,
}

/// What a big number card shows for a single render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricDisplay {
    pub big_number: f64,
    pub subheader_text: String,
    pub show_trend_line: bool,
    pub trend_series: Vec<TrendPoint>,
}

impl MetricDisplay {
    /// Check the trend series when a trendline is requested.
    ///
    /// The series is never reordered: it must already be sorted by `x`.
    pub fn validate_series(&self) -> Result<()> {
        if !self.show_trend_line {
            return Ok(());
        }
        if self.trend_series.is_empty() {
            return Err(VizError::InvalidSeries("trendline requested with no data".to_string()));
        }
        if let Some(p) = self.trend_series.iter().find(|p| !p.y.is_finite()) {
            return Err(VizError::InvalidSeries(format!("non-finite value at x={}", p.x)));
        }
        if let Some(w) = self.trend_series.windows(2).find(|w| w[1].x < w[0].x) {
            return Err(VizError::InvalidSeries(format!(
                "series not sorted by x: {} follows {}",
                w[1].x, w[0].x
            )));
        }
        Ok(())
    }
}

/// A text region of the plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRegion {
    pub height: f64,
    pub font_size: f64,
}

/// The trendline region of the plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendRegion {
    pub height: f64,
}

/// Ready-to-draw layout of a big number card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPlan {
    pub header_text: String,
    pub header_box: TextRegion,
    pub subheader_box: TextRegion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend_box: Option<TrendRegion>,
}

impl RenderPlan {
    pub fn total_height(&self) -> f64 {
        self.header_box.height
            + self.subheader_box.height
            + self.trend_box.map(|t| t.height).unwrap_or(0.0)
    }
}
