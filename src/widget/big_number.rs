//! Big number card with optional trendline.

use log::{debug, warn};
use serde::Deserialize;
use uuid::Uuid;

use super::{Element, Widget};
use crate::error::{Result, VizError};
use crate::format::{
    default_date_formatter, identity_formatter, number_formatter, tooltip_text, Locale,
    ValueFormatter,
};
use crate::layout::fitter::{EstimatedSurface, SearchingFitter, TextFitter};
use crate::layout::layout;
use crate::svg::styles::Proportion;
use crate::svg::{render_big_number_svg, CardColors, CardFrame, SvgTrendRenderer, TrendRenderer, BRAND_COLOR};
use crate::types::{LayoutBox, MetricDisplay, Proportions, RenderPlan, TrendPoint};

const CONTAINER_CLASS: &str = "big-number";
const NO_TRENDLINE_CLASS: &str = "no-trendline";

fn default_header_fraction() -> f64 {
    Proportion::HEADER
}

fn default_subheader_fraction() -> f64 {
    Proportion::SUBHEADER
}

fn default_true() -> bool {
    true
}

fn default_main_color() -> String {
    BRAND_COLOR.to_string()
}

/// Props supplied by the host for one render
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BigNumberProps {
    #[serde(default)]
    pub class_name: String,
    pub width: f64,
    pub height: f64,
    pub big_number: f64,
    /// d3 format specifier; the number is printed as-is when absent
    #[serde(default)]
    pub format_big_number: Option<String>,
    /// Number locale name (`en`, `es`)
    #[serde(default)]
    pub locale: Option<String>,
    /// Header height as a fraction of the text area
    #[serde(default = "default_header_fraction")]
    pub header_font_size: f64,
    #[serde(default)]
    pub subheader: String,
    #[serde(default = "default_subheader_fraction")]
    pub subheader_font_size: f64,
    #[serde(default)]
    pub show_trend_line: bool,
    #[serde(default = "default_true")]
    pub start_y_axis_at_zero: bool,
    #[serde(default)]
    pub trend_line_data: Option<Vec<TrendPoint>>,
    #[serde(default = "default_main_color")]
    pub main_color: String,
}

impl BigNumberProps {
    fn display(&self) -> MetricDisplay {
        MetricDisplay {
            big_number: self.big_number,
            subheader_text: self.subheader.clone(),
            show_trend_line: self.show_trend_line,
            trend_series: self.trend_line_data.clone().unwrap_or_default(),
        }
    }

    fn proportions(&self) -> Proportions {
        Proportions {
            header: self.header_font_size,
            subheader: self.subheader_font_size,
            trendline: Proportion::TRENDLINE,
        }
    }

    fn value_formatter(&self) -> Result<ValueFormatter> {
        let Some(ref specifier) = self.format_big_number else {
            return Ok(identity_formatter());
        };
        let locale = match self.locale.as_deref() {
            Some(name) => {
                Locale::from_name(name).ok_or_else(|| VizError::InvalidFormat(name.to_string()))?
            }
            None => Locale::en_us(),
        };
        number_formatter(specifier, locale)
    }

    fn container_class(&self, with_trend: bool) -> String {
        let mut names = vec![CONTAINER_CLASS];
        if !self.class_name.is_empty() {
            names.push(self.class_name.as_str());
        }
        if !with_trend {
            names.push(NO_TRENDLINE_CLASS);
        }
        names.join(" ")
    }
}

/// Big number widget instance.
///
/// Owns the gradient id used by its trendline so several cards can share a
/// page, and the fitter used to size its text.
pub struct BigNumberWidget {
    gradient_id: String,
    fitter: Box<dyn TextFitter>,
    colors: CardColors,
    font: String,
}

impl Default for BigNumberWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl BigNumberWidget {
    pub fn new() -> Self {
        Self::with_fitter(Box::new(SearchingFitter::new(EstimatedSurface::new())))
    }

    pub fn with_fitter(fitter: Box<dyn TextFitter>) -> Self {
        Self {
            gradient_id: format!("gradient-{}", Uuid::new_v4().simple()),
            fitter,
            colors: CardColors::default(),
            font: "Inter".to_string(),
        }
    }

    pub fn with_colors(mut self, colors: CardColors) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    pub fn gradient_id(&self) -> &str {
        &self.gradient_id
    }

    /// Compute the layout for `props` without drawing.
    pub fn plan(&mut self, props: &BigNumberProps) -> Result<RenderPlan> {
        self.plan_display(props).map(|(plan, _)| plan)
    }

    /// Plan the card, dropping the trendline if its data is unusable.
    fn plan_display(&mut self, props: &BigNumberProps) -> Result<(RenderPlan, MetricDisplay)> {
        let layout_box = LayoutBox::new(props.width, props.height);
        let proportions = props.proportions();
        let format_value = props.value_formatter()?;
        let mut display = props.display();

        let plan = match layout(
            layout_box,
            &display,
            &proportions,
            &format_value,
            self.fitter.as_mut(),
        ) {
            Err(VizError::InvalidSeries(reason)) => {
                warn!("big number trendline dropped: {}", reason);
                display.show_trend_line = false;
                layout(
                    layout_box,
                    &display,
                    &proportions,
                    &format_value,
                    self.fitter.as_mut(),
                )?
            }
            other => other?,
        };
        Ok((plan, display))
    }

    /// Draw typed props into `element`.
    ///
    /// The element is cleared first and stays empty when the box is invalid.
    pub fn render_props(&mut self, element: &mut Element, props: &BigNumberProps) -> Result<()> {
        element.clear();
        let (plan, display) = self.plan_display(props)?;

        let trend = match plan.trend_box {
            Some(region) => {
                let format_date = default_date_formatter();
                let format_value = props.value_formatter()?;
                let tooltip = move |p: &TrendPoint| tooltip_text(p, &format_date, &format_value);
                let renderer = SvgTrendRenderer::new(
                    props.start_y_axis_at_zero,
                    format!("Big number visualization {}", props.subheader),
                );
                Some(renderer.render(
                    &display.trend_series,
                    props.width.floor(),
                    region.height,
                    &props.main_color,
                    &self.gradient_id,
                    &tooltip,
                ))
            }
            None => None,
        };

        let class_name = props.container_class(plan.trend_box.is_some());
        let frame = CardFrame {
            width: props.width,
            height: props.height,
            class_name: &class_name,
            colors: &self.colors,
            font: &self.font,
            transparent: false,
        };
        let svg = render_big_number_svg(&plan, &display.subheader_text, trend.as_deref(), &frame);
        debug!("big number rendered into #{} ({} bytes)", element.id, svg.len());

        element.class_name = class_name;
        element.append(&svg);
        Ok(())
    }
}

impl Widget for BigNumberWidget {
    fn name(&self) -> &'static str {
        "big_number"
    }

    fn render(&mut self, element: &mut Element, props: &serde_json::Value) -> Result<()> {
        element.clear();
        let props = BigNumberProps::deserialize(props)?;
        self.render_props(element, &props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_props_defaults() {
        let props: BigNumberProps =
            serde_json::from_value(json!({"width": 330, "height": 110, "bigNumber": 12300})).unwrap();
        assert_eq!(props.header_font_size, 0.3);
        assert_eq!(props.subheader_font_size, 0.125);
        assert!(props.start_y_axis_at_zero);
        assert!(!props.show_trend_line);
        assert_eq!(props.main_color, "#00A699");
        assert_eq!(props.container_class(false), "big-number no-trendline");
    }

    #[test]
    fn test_container_class_with_host_class() {
        let props: BigNumberProps = serde_json::from_value(json!({
            "width": 330, "height": 110, "bigNumber": 1, "className": "dashboard-tile"
        }))
        .unwrap();
        assert_eq!(props.container_class(true), "big-number dashboard-tile");
    }

    #[test]
    fn test_gradient_id_is_stable_and_unique() {
        let a = BigNumberWidget::new();
        let b = BigNumberWidget::new();
        assert_ne!(a.gradient_id(), b.gradient_id());
        assert!(a.gradient_id().starts_with("gradient-"));
        let id = a.gradient_id().to_string();
        let mut a = a;
        let mut element = Element::new("chart");
        let props = json!({
            "width": 330, "height": 110, "bigNumber": 5,
            "showTrendLine": true,
            "trendLineData": [{"x": 0, "y": 1}, {"x": 1000, "y": 2}]
        });
        a.render(&mut element, &props).unwrap();
        a.render(&mut element, &props).unwrap();
        assert_eq!(a.gradient_id(), id);
        assert!(element.content().contains(&format!("url(#{})", id)));
    }

    #[test]
    fn test_unknown_locale_is_rejected() {
        let props: BigNumberProps = serde_json::from_value(json!({
            "width": 330, "height": 110, "bigNumber": 1,
            "formatBigNumber": ",", "locale": "xx"
        }))
        .unwrap();
        assert!(matches!(
            BigNumberWidget::new().plan(&props),
            Err(VizError::InvalidFormat(_))
        ));
    }
}
