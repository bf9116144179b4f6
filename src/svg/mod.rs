//! SVG renderer - converts planned widgets into SVG strings.
//!
//! - Big number cards (render_big_number_svg) with an optional trendline
//!   (SvgTrendRenderer)
//! - Alarm panels (render_alarm_svg)
//!
//! Pure string building, no DOM manipulation.

mod renderer;
mod theme;
pub mod styles;
pub mod trendline;
pub mod alarm;

pub use renderer::{escape_xml, render_big_number_svg, CardFrame};
pub use theme::{CardColors, BRAND_COLOR};
pub use trendline::{SvgTrendRenderer, TooltipRenderer, TrendRenderer};
pub use alarm::{render_alarm_svg, AlarmColumn, AlarmPanel};
