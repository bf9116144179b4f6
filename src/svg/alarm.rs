//! SVG renderer for the alarm panel
//!
//! A fixed 335x110 tile: application-colored background, the application
//! logo on the left and two right-aligned columns (value, ratio, label).

use super::renderer::{escape_xml, fmt_num};
use super::styles::{AlarmGeometry, FontWeights, StrokeWidths};

/// Tile colors per application (brand palette)
const APPLICATION_COLORS: &[(&str, &str)] = &[
    ("video", "#d40f1c"),
    ("web", "#808080"),
    ("facebook", "#3b5998"),
    ("whatsapp", "#37cd57"),
    ("instagram", "#ec008b"),
    ("twitter", "#04a9f4"),
];

/// Color for applications outside the palette
pub const FALLBACK_COLOR: &str = "#555555";

/// Background color for an application, if it has one.
pub fn application_color(application: &str) -> Option<&'static str> {
    APPLICATION_COLORS
        .iter()
        .find(|(name, _)| *name == application)
        .map(|(_, color)| *color)
}

/// Logo path for an application in the palette
pub fn application_logo(application: &str) -> Option<String> {
    application_color(application).map(|_| format!("./images/{}_logo.png", application))
}

/// One right-aligned column of the panel
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmColumn {
    pub x: f64,
    pub value: String,
    pub ratio: String,
    pub label: String,
}

/// Everything the panel draws, already formatted
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmPanel {
    pub color: String,
    pub logo: Option<String>,
    pub columns: Vec<AlarmColumn>,
}

/// Render an alarm panel to an SVG string.
pub fn render_alarm_svg(panel: &AlarmPanel) -> String {
    let w = AlarmGeometry::WIDTH;
    let h = AlarmGeometry::HEIGHT;
    let mut svg = String::new();

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" preserveAspectRatio="xMinYMin meet" viewBox="0 0 {} {}" class="svg-content">"#,
        fmt_num(w),
        fmt_num(h)
    ));
    svg.push_str("\n<g>\n");
    svg.push_str(&format!(
        r#"<rect x="0" y="0" width="{}" height="{}" fill="{}" stroke="white" stroke-width="{}" />"#,
        fmt_num(w),
        fmt_num(h),
        escape_xml(&panel.color),
        StrokeWidths::ALARM_BORDER
    ));
    svg.push('\n');

    if let Some(ref logo) = panel.logo {
        svg.push_str(&format!(
            r#"<image x="{inset}" y="{inset}" width="{size}" height="{size}" xlink:href="{}" />"#,
            escape_xml(logo),
            inset = fmt_num(AlarmGeometry::LOGO_INSET),
            size = fmt_num(AlarmGeometry::LOGO_SIZE),
        ));
        svg.push('\n');
    }

    let value_y = AlarmGeometry::V_MARGIN + AlarmGeometry::VALUE_FONT;
    let ratio_y = value_y + AlarmGeometry::RATIO_FONT;
    let label_y = value_y + 3.0 * AlarmGeometry::RATIO_FONT;
    for column in &panel.columns {
        for (text, y, size) in [
            (&column.value, value_y, AlarmGeometry::VALUE_FONT),
            (&column.ratio, ratio_y, AlarmGeometry::RATIO_FONT),
            (&column.label, label_y, AlarmGeometry::LABEL_FONT),
        ] {
            svg.push_str(&format!(
                r#"<text text-anchor="end" x="{}" y="{}" fill="white" font-size="{}" style="font-weight: {}; font-family: Arial">{}</text>"#,
                fmt_num(column.x),
                fmt_num(y),
                fmt_num(size),
                FontWeights::ALARM,
                escape_xml(text)
            ));
            svg.push('\n');
        }
    }

    svg.push_str("</g>\n</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette() {
        assert_eq!(application_color("facebook"), Some("#3b5998"));
        assert_eq!(application_color("myspace"), None);
        assert_eq!(
            application_logo("twitter").as_deref(),
            Some("./images/twitter_logo.png")
        );
        assert_eq!(application_logo("myspace"), None);
    }

    #[test]
    fn test_column_rows() {
        let panel = AlarmPanel {
            color: "#3b5998".to_string(),
            logo: None,
            columns: vec![AlarmColumn {
                x: AlarmGeometry::FIRST_COLUMN_X,
                value: "12.300".to_string(),
                ratio: "10%".to_string(),
                label: "Alarmas".to_string(),
            }],
        };
        let svg = render_alarm_svg(&panel);
        assert!(svg.contains(r#"viewBox="0 0 335 110""#));
        assert!(svg.contains(r#"x="198" y="38" fill="white" font-size="21""#));
        assert!(svg.contains(r#"x="198" y="54.8" fill="white" font-size="16.8""#));
        assert!(svg.contains(r#"x="198" y="88.4" fill="white" font-size="17""#));
        assert!(!svg.contains("<image"));
    }
}
