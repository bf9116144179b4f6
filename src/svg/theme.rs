//! Theme system - CSS custom property-based theming for metric cards.
//!
//! Architecture:
//!   - Two required variables: --bg (background) and --fg (foreground)
//!   - Optional enrichment variables: --muted (subheader text), --brand (trendline)
//!   - Unset optionals fall back to color-mix() derivations from bg + fg

use serde::{Deserialize, Serialize};

/// Default trendline color token
pub const BRAND_COLOR: &str = "#00A699";

/// Card color configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardColors {
    /// Background color → CSS variable --bg
    pub bg: String,
    /// Big number color → CSS variable --fg
    pub fg: String,
    /// Subheader text → CSS variable --muted (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted: Option<String>,
    /// Fallback trendline color → CSS variable --brand
    #[serde(default = "default_brand")]
    pub brand: String,
}

fn default_brand() -> String {
    BRAND_COLOR.to_string()
}

impl Default for CardColors {
    fn default() -> Self {
        Self {
            bg: "#FFFFFF".to_string(),
            fg: "#484848".to_string(),
            muted: None,
            brand: default_brand(),
        }
    }
}

/// color-mix() weights for derived CSS variables
pub struct Mix;

impl Mix {
    pub const TEXT_MUTED: u8 = 70;
}

/// Build the <style> block with font import, derived variables and the
/// card classes.
pub fn build_style_block(font: &str) -> String {
    let font_encoded = font.replace(' ', "%20");

    format!(
        r#"<style>
  @import url('https://fonts.googleapis.com/css2?family={}:wght@200;400;600;700&amp;display=swap');
  text {{ font-family: '{}', system-ui, sans-serif; }}
  svg {{
    --_text:       var(--fg);
    --_text-muted: var(--muted, color-mix(in srgb, var(--fg) {}%, var(--bg)));
  }}
  .header-line {{ font-weight: 600; fill: var(--_text); }}
  .subheader-line {{ font-weight: 200; fill: var(--_text-muted); }}
  .crosshair {{ opacity: 0; }}
  .hover-target:hover .crosshair {{ opacity: 1; }}
</style>"#,
        font_encoded,
        font,
        Mix::TEXT_MUTED
    )
}

/// Format a dimension - integer if whole, otherwise without trailing zeros.
pub fn format_dim(d: f64) -> String {
    if d.fract() == 0.0 {
        format!("{}", d as i64)
    } else {
        let s = format!("{}", d);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Build the SVG opening tag with CSS variables set as inline styles.
pub fn svg_open_tag(
    width: f64,
    height: f64,
    colors: &CardColors,
    class_name: &str,
    transparent: bool,
) -> String {
    let mut vars = vec![format!("--bg:{}", colors.bg), format!("--fg:{}", colors.fg)];
    if let Some(ref muted) = colors.muted {
        vars.push(format!("--muted:{}", muted));
    }
    vars.push(format!("--brand:{}", colors.brand));

    let vars_str = vars.join(";");
    let bg_style = if transparent {
        ""
    } else {
        ";background:var(--bg)"
    };

    let w_str = format_dim(width);
    let h_str = format_dim(height);

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="{}" viewBox="0 0 {} {}" width="{}" height="{}" style="{}{}">"#,
        class_name, w_str, h_str, w_str, h_str, vars_str, bg_style
    )
}
