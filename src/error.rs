//! Error taxonomy shared by layout, formatting and the widgets.

use thiserror::Error;

/// Errors raised while planning or drawing a widget.
#[derive(Debug, Error)]
pub enum VizError {
    /// Non-positive or non-finite box. Nothing is drawn.
    #[error("invalid dimension: {width}x{height}")]
    InvalidDimension { width: f64, height: f64 },

    /// Trendline requested without usable data.
    #[error("invalid trend series: {0}")]
    InvalidSeries(String),

    /// The measurement surface failed. The temporary node is already released.
    #[error("text measurement failed: {0}")]
    MeasurementFailure(String),

    #[error("proportion `{name}` must lie in [0, 1], got {value}")]
    InvalidProportion { name: &'static str, value: f64 },

    #[error("invalid number format: {0:?}")]
    InvalidFormat(String),

    #[error("invalid props: {0}")]
    InvalidProps(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VizError>;
