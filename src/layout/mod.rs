//! Fitted metric layout.
//!
//! Splits a card into header, subheader and optional trendline regions and
//! fits each text line into its region. Region heights round up for text and
//! down for the trendline; any overflow left by rounding is trimmed so the
//! regions never exceed the card.

pub mod fitter;

use log::debug;

use crate::error::Result;
use crate::format::ValueFormatter;
use crate::types::{LayoutBox, MetricDisplay, Proportions, RenderPlan, TextRegion, TrendRegion};
use fitter::{FitRequest, TextFitter};

pub const HEADER_CLASS: &str = "header-line";
pub const SUBHEADER_CLASS: &str = "subheader-line";

/// Region heights before font fitting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionHeights {
    pub header: f64,
    pub subheader: f64,
    pub trend: Option<f64>,
}

/// Compute region heights for a card of `height` px.
pub fn region_heights(height: f64, proportions: &Proportions, with_trend: bool) -> RegionHeights {
    let (mut header, mut subheader, trend) = if with_trend {
        let text_share = 1.0 - proportions.trendline;
        (
            (proportions.header * text_share * height).ceil(),
            (proportions.subheader * text_share * height).ceil(),
            Some((proportions.trendline * height).floor()),
        )
    } else {
        (
            (proportions.header * height).ceil(),
            (proportions.subheader * height).ceil(),
            None,
        )
    };

    let overflow = (header + subheader + trend.unwrap_or(0.0) - height).ceil();
    if overflow > 0.0 {
        let from_sub = overflow.min(subheader);
        subheader -= from_sub;
        header = (header - (overflow - from_sub)).max(0.0);
    }

    RegionHeights {
        header,
        subheader,
        trend,
    }
}

/// Plan a big number card.
///
/// Fails with `InvalidDimension` for an empty box, `InvalidProportion` for
/// fractions outside `[0, 1]` and `InvalidSeries` when a trendline is asked
/// for without sorted data.
pub fn layout(
    layout_box: LayoutBox,
    display: &MetricDisplay,
    proportions: &Proportions,
    format_value: &ValueFormatter,
    fitter: &mut dyn TextFitter,
) -> Result<RenderPlan> {
    layout_box.validate()?;
    proportions.validate()?;
    display.validate_series()?;

    let heights = region_heights(layout_box.height, proportions, display.show_trend_line);
    let max_width = layout_box.width.floor();

    let header_text = format_value(display.big_number);
    let header_font = fitter.fit_font_size(&FitRequest {
        text: &header_text,
        max_width,
        max_height: heights.header,
        style_class: HEADER_CLASS,
    })?;

    let subheader_font = if display.subheader_text.is_empty() {
        0.0
    } else {
        fitter.fit_font_size(&FitRequest {
            text: &display.subheader_text,
            max_width,
            max_height: heights.subheader,
            style_class: SUBHEADER_CLASS,
        })?
    };

    let plan = RenderPlan {
        header_text,
        header_box: TextRegion {
            height: heights.header,
            font_size: header_font,
        },
        subheader_box: TextRegion {
            height: heights.subheader,
            font_size: subheader_font,
        },
        trend_box: heights.trend.map(|height| TrendRegion { height }),
    };
    debug!("layout {}x{} -> {:?}", layout_box.width, layout_box.height, plan);
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VizError;
    use crate::format::identity_formatter;
    use crate::types::TrendPoint;
    use fitter::{EstimatedSurface, MeasurementSurface, SearchingFitter};

    /// Records every request and answers with the region height.
    #[derive(Default)]
    struct RecordingFitter {
        requests: Vec<(String, f64, f64, String)>,
    }

    impl TextFitter for RecordingFitter {
        fn fit_font_size(&mut self, request: &FitRequest<'_>) -> Result<f64> {
            self.requests.push((
                request.text.to_string(),
                request.max_width,
                request.max_height,
                request.style_class.to_string(),
            ));
            Ok(request.max_height)
        }
    }

    fn alarm_display(show_trend_line: bool, trend_series: Vec<TrendPoint>) -> MetricDisplay {
        MetricDisplay {
            big_number: 12300.0,
            subheader_text: "Alarmas".to_string(),
            show_trend_line,
            trend_series,
        }
    }

    #[test]
    fn test_layout_without_trendline() {
        let mut fitter = RecordingFitter::default();
        let proportions = Proportions {
            header: 0.3,
            subheader: 0.125,
            trendline: 0.0,
        };
        let plan = layout(
            LayoutBox::new(330.0, 110.0),
            &alarm_display(false, Vec::new()),
            &proportions,
            &identity_formatter(),
            &mut fitter,
        )
        .unwrap();
        assert_eq!(plan.header_box.height, 33.0);
        assert_eq!(plan.subheader_box.height, 14.0);
        assert!(plan.trend_box.is_none());
        assert_eq!(plan.header_text, "12300");
        assert_eq!(fitter.requests[0], ("12300".to_string(), 330.0, 33.0, HEADER_CLASS.to_string()));
        assert_eq!(fitter.requests[1].3, SUBHEADER_CLASS);
    }

    #[test]
    fn test_layout_with_trendline() {
        let mut fitter = RecordingFitter::default();
        let proportions = Proportions {
            header: 0.3,
            subheader: 0.125,
            trendline: 0.3,
        };
        let series = vec![TrendPoint { x: 0, y: 1.0 }, TrendPoint { x: 1, y: 2.0 }];
        let plan = layout(
            LayoutBox::new(330.0, 110.0),
            &alarm_display(true, series),
            &proportions,
            &identity_formatter(),
            &mut fitter,
        )
        .unwrap();
        assert_eq!(plan.trend_box, Some(TrendRegion { height: 33.0 }));
        assert_eq!(plan.header_box.height, 24.0);
        assert_eq!(plan.subheader_box.height, 10.0);
    }

    #[test]
    fn test_empty_subheader_is_not_measured() {
        let mut fitter = RecordingFitter::default();
        let mut display = alarm_display(false, Vec::new());
        display.subheader_text.clear();
        let plan = layout(
            LayoutBox::new(200.0, 100.0),
            &display,
            &Proportions::default(),
            &identity_formatter(),
            &mut fitter,
        )
        .unwrap();
        assert_eq!(plan.subheader_box.font_size, 0.0);
        assert_eq!(fitter.requests.len(), 1);
        assert_eq!(fitter.requests[0].3, HEADER_CLASS);
    }

    #[test]
    fn test_invalid_dimension() {
        for (w, h) in [(0.0, 10.0), (10.0, 0.0), (-1.0, 10.0), (f64::NAN, 10.0)] {
            let err = layout(
                LayoutBox::new(w, h),
                &alarm_display(false, Vec::new()),
                &Proportions::default(),
                &identity_formatter(),
                &mut RecordingFitter::default(),
            )
            .unwrap_err();
            assert!(matches!(err, VizError::InvalidDimension { .. }));
        }
    }

    #[test]
    fn test_empty_series_rejected() {
        let mut fitter = RecordingFitter::default();
        let err = layout(
            LayoutBox::new(330.0, 110.0),
            &alarm_display(true, Vec::new()),
            &Proportions::default(),
            &identity_formatter(),
            &mut fitter,
        )
        .unwrap_err();
        assert!(matches!(err, VizError::InvalidSeries(_)));
        assert!(fitter.requests.is_empty());
    }

    #[test]
    fn test_unsorted_series_rejected() {
        let series = vec![TrendPoint { x: 5, y: 1.0 }, TrendPoint { x: 2, y: 2.0 }];
        let err = layout(
            LayoutBox::new(330.0, 110.0),
            &alarm_display(true, series),
            &Proportions::default(),
            &identity_formatter(),
            &mut RecordingFitter::default(),
        )
        .unwrap_err();
        assert!(matches!(err, VizError::InvalidSeries(_)));
    }

    #[test]
    fn test_out_of_range_proportion() {
        let proportions = Proportions {
            header: 1.2,
            ..Proportions::default()
        };
        let err = layout(
            LayoutBox::new(330.0, 110.0),
            &alarm_display(false, Vec::new()),
            &proportions,
            &identity_formatter(),
            &mut RecordingFitter::default(),
        )
        .unwrap_err();
        assert!(matches!(err, VizError::InvalidProportion { name: "header", .. }));
    }

    #[test]
    fn test_heights_never_exceed_box() {
        let splits = [(0.5, 0.5, 0.0), (0.3, 0.125, 0.3), (0.7, 0.3, 0.5), (0.45, 0.55, 0.33)];
        for height in 1..200 {
            let height = height as f64 * 0.75;
            for &(header, subheader, trendline) in &splits {
                let p = Proportions {
                    header,
                    subheader,
                    trendline,
                };
                for with_trend in [false, true] {
                    let r = region_heights(height, &p, with_trend);
                    let total = r.header + r.subheader + r.trend.unwrap_or(0.0);
                    assert!(total <= height, "{:?} at {} -> {:?}", p, height, r);
                }
            }
        }
    }

    #[test]
    fn test_layout_is_idempotent() {
        let mut fitter = SearchingFitter::new(EstimatedSurface::new());
        let display = alarm_display(
            true,
            vec![TrendPoint { x: 0, y: 3.0 }, TrendPoint { x: 60_000, y: 4.0 }],
        );
        let run = |fitter: &mut SearchingFitter<EstimatedSurface>| {
            layout(
                LayoutBox::new(330.0, 110.0),
                &display,
                &Proportions::default(),
                &identity_formatter(),
                fitter,
            )
            .unwrap()
        };
        let first = run(&mut fitter);
        let second = run(&mut fitter);
        assert_eq!(first, second);
        assert_eq!(fitter.surface().attached_nodes(), 0);
    }
}
