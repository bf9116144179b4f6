//! Font metrics and styling constants.
//!
//! Calibrated for Inter font with fallback to system UI fonts.

/// Average character width in px at the given font size and weight
pub fn estimate_text_width(text: &str, font_size: f64, font_weight: u32) -> f64 {
    // Inter average character widths as fraction of fontSize, per weight.
    // Heavier weights are slightly wider.
    let width_ratio = if font_weight >= 600 {
        0.58
    } else if font_weight >= 500 {
        0.55
    } else {
        0.52
    };
    text.chars().count() as f64 * font_size * width_ratio
}

/// Card text uses `line-height: 1em`
pub const LINE_HEIGHT_RATIO: f64 = 1.0;

/// Default vertical split of a big number card
pub struct Proportion;

impl Proportion {
    pub const HEADER: f64 = 0.3;
    pub const SUBHEADER: f64 = 0.125;
    pub const TRENDLINE: f64 = 0.3;
}

/// Font weights used per element type
pub struct FontWeights;

impl FontWeights {
    pub const HEADER: u32 = 600;
    pub const SUBHEADER: u32 = 200;
    pub const BODY: u32 = 400;
    pub const ALARM: u32 = 700;
}

/// Inner margin of the trendline chart (in px)
pub struct ChartMargin;

impl ChartMargin {
    pub const TOP: f64 = 4.0;
    pub const RIGHT: f64 = 4.0;
    pub const BOTTOM: f64 = 4.0;
    pub const LEFT: f64 = 4.0;
}

/// Trendline strokes
pub struct StrokeWidths;

impl StrokeWidths {
    pub const TREND_LINE: f64 = 1.5;
    pub const CROSSHAIR: f64 = 1.0;
    pub const ALARM_BORDER: f64 = 2.0;
}

pub const CROSSHAIR_DASH: &str = "5,2";
pub const CROSSHAIR_RADIUS: f64 = 4.0;

/// Fixed geometry of the alarm panel (in px)
pub struct AlarmGeometry;

impl AlarmGeometry {
    pub const H_MARGIN: f64 = 5.0;
    pub const V_MARGIN: f64 = 17.0;
    pub const HEIGHT: f64 = 110.0;
    pub const WIDTH: f64 = 3.0 * Self::HEIGHT + Self::H_MARGIN;
    pub const FIRST_COLUMN_X: f64 = 2.0 * 0.9 * Self::HEIGHT;
    pub const SECOND_COLUMN_X: f64 = 3.0 * 0.95 * Self::HEIGHT;
    pub const VALUE_FONT: f64 = 21.0;
    pub const RATIO_FONT: f64 = 0.8 * Self::VALUE_FONT;
    pub const LABEL_FONT: f64 = 17.0;
    pub const LOGO_INSET: f64 = 2.0;
    pub const LOGO_SIZE: f64 = Self::HEIGHT - 5.0;
}

/// Vertical shift applied to all text elements for font-agnostic centering.
/// Using 0.35em ensures it scales with font size.
pub const TEXT_BASELINE_SHIFT: &str = "0.35em";
