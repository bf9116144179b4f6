//! Alarm panel: per-application alarm and user counts with their ratios.

use log::{debug, warn};
use serde::Deserialize;

use super::{Element, Widget};
use crate::error::{Result, VizError};
use crate::format::{Locale, NumberFormat};
use crate::svg::alarm::{application_color, application_logo, FALLBACK_COLOR};
use crate::svg::styles::AlarmGeometry;
use crate::svg::{render_alarm_svg, AlarmColumn, AlarmPanel};

fn default_alarms_label() -> String {
    "Alarmas".to_string()
}

fn default_users_label() -> String {
    "Usuarios".to_string()
}

fn default_locale() -> String {
    "es".to_string()
}

/// Query result row for the panel
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AlarmData {
    /// First entry names the application
    pub application_name: Vec<String>,
    pub alarms: f64,
    pub alarm_ratio: f64,
    pub users: f64,
    pub user_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmProps {
    pub data: AlarmData,
    #[serde(default = "default_alarms_label")]
    pub alarms_label: String,
    #[serde(default = "default_users_label")]
    pub users_label: String,
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl AlarmProps {
    /// Resolve colors, logo and formatted text.
    pub fn panel(&self) -> Result<AlarmPanel> {
        let locale = Locale::from_name(&self.locale)
            .ok_or_else(|| VizError::InvalidFormat(self.locale.clone()))?;
        let count = NumberFormat::parse(",", locale.clone())?;
        let ratio = NumberFormat::parse("%", locale)?;

        let application = self
            .data
            .application_name
            .first()
            .map(|s| s.to_ascii_lowercase())
            .unwrap_or_default();
        let color = match application_color(&application) {
            Some(color) => color,
            None => {
                warn!("no palette entry for application {:?}", application);
                FALLBACK_COLOR
            }
        };

        Ok(AlarmPanel {
            color: color.to_string(),
            logo: application_logo(&application),
            columns: vec![
                AlarmColumn {
                    x: AlarmGeometry::FIRST_COLUMN_X,
                    value: count.format(self.data.alarms),
                    ratio: ratio.format(self.data.alarm_ratio),
                    label: self.alarms_label.clone(),
                },
                AlarmColumn {
                    x: AlarmGeometry::SECOND_COLUMN_X,
                    value: count.format(self.data.users),
                    ratio: ratio.format(self.data.user_ratio),
                    label: self.users_label.clone(),
                },
            ],
        })
    }
}

/// Alarm panel widget
#[derive(Debug, Default)]
pub struct AlarmWidget;

impl AlarmWidget {
    pub fn new() -> Self {
        Self
    }

    pub fn render_props(&self, element: &mut Element, props: &AlarmProps) -> Result<()> {
        element.clear();
        let panel = props.panel()?;
        let svg = render_alarm_svg(&panel);
        debug!("alarm panel rendered into #{} ({} bytes)", element.id, svg.len());
        element.class_name = "svg-container".to_string();
        element.append(&svg);
        Ok(())
    }
}

impl Widget for AlarmWidget {
    fn name(&self) -> &'static str {
        "alarm"
    }

    fn render(&mut self, element: &mut Element, props: &serde_json::Value) -> Result<()> {
        element.clear();
        let props = AlarmProps::deserialize(props)?;
        self.render_props(element, &props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(app: &str) -> AlarmProps {
        serde_json::from_value(json!({
            "data": {
                "application_name": [app],
                "alarms": 12300,
                "alarm_ratio": 0.1,
                "users": 1131550,
                "user_ratio": 0.25
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_panel_formatting() {
        let panel = props("facebook").panel().unwrap();
        assert_eq!(panel.color, "#3b5998");
        assert_eq!(panel.logo.as_deref(), Some("./images/facebook_logo.png"));
        assert_eq!(panel.columns[0].value, "12.300");
        assert_eq!(panel.columns[0].ratio, "10%");
        assert_eq!(panel.columns[0].label, "Alarmas");
        assert_eq!(panel.columns[1].value, "1.131.550");
        assert_eq!(panel.columns[1].ratio, "25%");
        assert_eq!(panel.columns[1].label, "Usuarios");
    }

    #[test]
    fn test_unknown_application_falls_back() {
        let panel = props("Myspace").panel().unwrap();
        assert_eq!(panel.color, FALLBACK_COLOR);
        assert!(panel.logo.is_none());
    }

    #[test]
    fn test_english_locale() {
        let mut p = props("web");
        p.locale = "en".to_string();
        let panel = p.panel().unwrap();
        assert_eq!(panel.columns[1].value, "1,131,550");
    }
}
