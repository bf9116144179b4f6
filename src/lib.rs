//! metricviz - Big number and alarm metric cards rendered to SVG
//!
//! The big number card splits its box into header, subheader and optional
//! trendline regions and fits each line of text to its region. Text is
//! measured through a [`layout::fitter::MeasurementSurface`], so the layout
//! has no dependency on a document model.
//!
//! # Example
//!
//! ```rust
//! let svg = metricviz::render_big_number(
//!     r#"{"width": 330, "height": 110, "bigNumber": 12300, "subheader": "Alarmas"}"#,
//! )
//! .unwrap();
//! assert!(svg.starts_with("<svg"));
//! ```
//!
//! # Widgets
//!
//! - Big number, with or without trendline ([`widget::BigNumberWidget`])
//! - Alarm panel ([`widget::AlarmWidget`])

pub mod error;
pub mod types;
pub mod format;
pub mod layout;
pub mod svg;
pub mod widget;

pub use error::{Result, VizError};
pub use layout::layout;
pub use types::*;
pub use widget::{AlarmWidget, BigNumberWidget, Element, Widget};

/// Render a big number card from JSON props to SVG text.
///
/// # Example
/// ```rust
/// let svg = metricviz::render_big_number(r#"{"width": 200, "height": 80, "bigNumber": 7}"#).unwrap();
/// assert!(svg.contains(">7</text>"));
/// ```
pub fn render_big_number(props_json: &str) -> Result<String> {
    let props: serde_json::Value = serde_json::from_str(props_json)?;
    render_with(&mut BigNumberWidget::new(), &props)
}

/// Render an alarm panel from JSON props to SVG text.
pub fn render_alarm(props_json: &str) -> Result<String> {
    let props: serde_json::Value = serde_json::from_str(props_json)?;
    render_with(&mut AlarmWidget::new(), &props)
}

fn render_with(widget: &mut dyn Widget, props: &serde_json::Value) -> Result<String> {
    let mut element = Element::new(widget.name());
    widget.render(&mut element, props)?;
    Ok(element.content().to_string())
}
