//! SVG renderer - converts a RenderPlan into a big number card.
//!
//! Pure string building, no DOM manipulation.
//! The text block (header, subheader) is centred in the space above the
//! trendline; the trendline fragment is translated below it.

use super::styles::TEXT_BASELINE_SHIFT;
use super::theme::{build_style_block, svg_open_tag, CardColors};
use crate::layout::{HEADER_CLASS, SUBHEADER_CLASS};
use crate::types::RenderPlan;

/// Outer frame of a card
#[derive(Debug, Clone)]
pub struct CardFrame<'a> {
    pub width: f64,
    pub height: f64,
    pub class_name: &'a str,
    pub colors: &'a CardColors,
    pub font: &'a str,
    pub transparent: bool,
}

/// Render a planned big number card as an SVG string.
///
/// `trend` is the already-rendered trendline fragment, drawn only when the
/// plan has a trend region.
pub fn render_big_number_svg(
    plan: &RenderPlan,
    subheader: &str,
    trend: Option<&str>,
    frame: &CardFrame<'_>,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    parts.push(svg_open_tag(
        frame.width,
        frame.height,
        frame.colors,
        frame.class_name,
        frame.transparent,
    ));
    parts.push(build_style_block(frame.font));

    let trend_height = plan.trend_box.map(|t| t.height).unwrap_or(0.0);
    let text_area = frame.height - trend_height;
    let block = plan.header_box.height + plan.subheader_box.height;
    let top = ((text_area - block) / 2.0).max(0.0);
    let cx = frame.width / 2.0;

    parts.push(format!(
        r#"<g class="text-container" data-height="{}">"#,
        fmt_num(text_area)
    ));
    parts.push(render_text_line(
        &plan.header_text,
        cx,
        top + plan.header_box.height / 2.0,
        plan.header_box.font_size,
        HEADER_CLASS,
    ));
    parts.push(render_text_line(
        subheader,
        cx,
        top + plan.header_box.height + plan.subheader_box.height / 2.0,
        plan.subheader_box.font_size,
        SUBHEADER_CLASS,
    ));
    parts.push("</g>".to_string());

    if let (Some(_), Some(trend)) = (plan.trend_box, trend) {
        parts.push(format!(r#"<g transform="translate(0,{})">"#, fmt_num(text_area)));
        parts.push(trend.to_string());
        parts.push("</g>".to_string());
    }

    parts.push("</svg>".to_string());
    parts.retain(|p| !p.is_empty());
    parts.join("\n")
}

fn render_text_line(text: &str, cx: f64, cy: f64, font_size: f64, class: &str) -> String {
    if text.is_empty() || font_size <= 0.0 {
        return String::new();
    }
    format!(
        r#"<text class="{}" x="{}" y="{}" text-anchor="middle" dy="{}" font-size="{}">{}</text>"#,
        class,
        fmt_num(cx),
        fmt_num(cy),
        TEXT_BASELINE_SHIFT,
        fmt_num(font_size),
        escape_xml(text)
    )
}

// ============================================================================
// Utilities
// ============================================================================

/// Escape special XML characters in text content
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Format a coordinate with at most two decimals and no trailing zeros.
pub fn fmt_num(n: f64) -> String {
    let s = format!("{:.2}", n);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TextRegion, TrendRegion};

    fn plan(trend: bool) -> RenderPlan {
        RenderPlan {
            header_text: "12300".to_string(),
            header_box: TextRegion {
                height: 33.0,
                font_size: 33.0,
            },
            subheader_box: TextRegion {
                height: 14.0,
                font_size: 14.0,
            },
            trend_box: if trend { Some(TrendRegion { height: 33.0 }) } else { None },
        }
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(33.0), "33");
        assert_eq!(fmt_num(23.126), "23.13");
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(-0.001), "0");
    }

    #[test]
    fn test_text_block_is_centered() {
        let colors = CardColors::default();
        let frame = CardFrame {
            width: 330.0,
            height: 110.0,
            class_name: "big-number no-trendline",
            colors: &colors,
            font: "Inter",
            transparent: false,
        };
        let svg = render_big_number_svg(&plan(false), "Alarmas", None, &frame);
        // (110 - 47) / 2 = 31.5 above the block
        assert!(svg.contains(r#"class="header-line" x="165" y="48""#));
        assert!(svg.contains(r#"class="subheader-line" x="165" y="71.5""#));
        assert!(!svg.contains("translate"));
    }

    #[test]
    fn test_trend_fragment_below_text() {
        let colors = CardColors::default();
        let frame = CardFrame {
            width: 330.0,
            height: 110.0,
            class_name: "big-number",
            colors: &colors,
            font: "Inter",
            transparent: true,
        };
        let svg = render_big_number_svg(&plan(true), "", Some("<g class=\"trendline\"></g>"), &frame);
        assert!(svg.contains(r#"<g transform="translate(0,77)">"#));
        assert!(!svg.contains("subheader-line\" x="));
    }
}
