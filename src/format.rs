//! Value and date formatting for card text and tooltips.
//!
//! Number formats use the d3 specifier grammar:
//! `[[fill]align][sign][symbol][0][width][,][.precision][~][type]`
//! with types `d`, `e`, `f`, `s`, `%` or none. As in the locale-aware
//! formatter the alarm panel was designed against, `f` and `%` default to
//! zero decimals.

use chrono::{DateTime, Datelike, SecondsFormat, Timelike, Utc};
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Result, VizError};
use crate::types::TrendPoint;

/// Turns the big number into header text.
pub type ValueFormatter = Box<dyn Fn(f64) -> String>;

/// Turns a UTC epoch-millisecond timestamp into text.
pub type DateFormatter = Box<dyn Fn(i64) -> String>;

lazy_static! {
    static ref RE_SPECIFIER: Regex =
        Regex::new(r"^(?:(.)?([<>=^]))?([+\-( ])?([$#])?(0)?(\d+)?(,)?(\.\d+)?(~)?([desf%])?$")
            .unwrap();
}

const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

/// Number locale: separators and currency affixes
#[derive(Debug, Clone, PartialEq)]
pub struct Locale {
    pub decimal: String,
    pub thousands: String,
    pub grouping: Vec<usize>,
    pub currency: (String, String),
}

impl Locale {
    pub fn en_us() -> Self {
        Self {
            decimal: ".".to_string(),
            thousands: ",".to_string(),
            grouping: vec![3],
            currency: ("$".to_string(), String::new()),
        }
    }

    /// Spanish-style separators: `12.300,5`
    pub fn es() -> Self {
        Self {
            decimal: ",".to_string(),
            thousands: ".".to_string(),
            grouping: vec![3],
            currency: ("$".to_string(), String::new()),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en_us" => Some(Self::en_us()),
            "es" | "es-es" | "es_es" => Some(Self::es()),
            _ => None,
        }
    }

    /// Insert thousands separators into a run of digits, stopping once
    /// `width` characters are produced.
    fn group(&self, digits: &str, width: usize) -> String {
        let chars: Vec<char> = digits.chars().collect();
        let mut i = chars.len();
        let mut parts: Vec<String> = Vec::new();
        let mut length = 0;
        let mut j = 0;
        let mut g = self.grouping.first().copied().unwrap_or(0);
        while i > 0 && g > 0 {
            if length + g + 1 > width {
                g = width.saturating_sub(length).max(1);
            }
            let start = i.saturating_sub(g);
            parts.push(chars[start..i].iter().collect());
            i = start;
            length += g + 1;
            if length > width {
                break;
            }
            j = (j + 1) % self.grouping.len();
            g = self.grouping[j];
        }
        parts.reverse();
        parts.join(&self.thousands)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
    AfterSign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Default,
    Decimal,
    Exponent,
    Fixed,
    Percent,
    Si,
}

/// A parsed number format bound to a locale
#[derive(Debug, Clone)]
pub struct NumberFormat {
    fill: char,
    align: Align,
    sign: char,
    currency: bool,
    zero: bool,
    width: usize,
    comma: bool,
    precision: Option<usize>,
    trim: bool,
    kind: Kind,
    locale: Locale,
}

impl NumberFormat {
    pub fn parse(specifier: &str, locale: Locale) -> Result<Self> {
        let caps = RE_SPECIFIER
            .captures(specifier)
            .ok_or_else(|| VizError::InvalidFormat(specifier.to_string()))?;
        let text = |i: usize| caps.get(i).map(|m| m.as_str());

        let mut fill = text(1).and_then(|s| s.chars().next()).unwrap_or(' ');
        let mut align = match text(2) {
            Some("<") => Align::Left,
            Some("^") => Align::Center,
            Some("=") => Align::AfterSign,
            _ => Align::Right,
        };
        let zero = text(5).is_some();
        if zero {
            fill = '0';
            align = Align::AfterSign;
        }
        let kind = match text(10) {
            Some("d") => Kind::Decimal,
            Some("e") => Kind::Exponent,
            Some("f") => Kind::Fixed,
            Some("s") => Kind::Si,
            Some("%") => Kind::Percent,
            _ => Kind::Default,
        };
        let precision = match text(8) {
            Some(p) => Some(
                p[1..]
                    .parse::<usize>()
                    .map_err(|_| VizError::InvalidFormat(specifier.to_string()))?
                    .min(20),
            ),
            None => None,
        };

        Ok(Self {
            fill,
            align,
            sign: text(3).and_then(|s| s.chars().next()).unwrap_or('-'),
            currency: text(4) == Some("$"),
            zero,
            width: text(6).and_then(|w| w.parse().ok()).unwrap_or(0),
            comma: text(7).is_some(),
            precision,
            trim: text(9).is_some() || (kind == Kind::Default && precision.is_some()),
            kind,
            locale,
        })
    }

    pub fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
            return text.to_string();
        }

        let mut negative = value < 0.0;
        let (mut body, si_prefix) = self.format_magnitude(value.abs());
        if self.trim {
            body = trim_insignificant(&body);
        }
        if negative && body.chars().all(|c| c == '0' || c == '.') {
            negative = false;
        }

        let mut prefix = String::new();
        if negative {
            prefix.push(if self.sign == '(' { '(' } else { '-' });
        } else if self.sign == '+' || self.sign == ' ' {
            prefix.push(self.sign);
        }
        let mut suffix = si_prefix.to_string();
        if self.currency {
            prefix.push_str(&self.locale.currency.0);
            suffix.push_str(&self.locale.currency.1);
        }
        if self.kind == Kind::Percent {
            suffix.push('%');
        }
        if negative && self.sign == '(' {
            suffix.push(')');
        }

        // Split into the groupable integer run and the rest.
        let (mut digits, rest) = match body.find(|c: char| !c.is_ascii_digit()) {
            Some(i) if body[i..].starts_with('.') => {
                (body[..i].to_string(), format!("{}{}", self.locale.decimal, &body[i + 1..]))
            }
            Some(i) => (body[..i].to_string(), body[i..].to_string()),
            None => (body.clone(), String::new()),
        };
        let suffix = format!("{}{}", rest, suffix);

        if self.comma && !self.zero {
            digits = self.locale.group(&digits, usize::MAX);
        }
        let length = prefix.chars().count() + digits.chars().count() + suffix.chars().count();
        let mut padding: String = if length < self.width {
            std::iter::repeat(self.fill).take(self.width - length).collect()
        } else {
            String::new()
        };
        if self.comma && self.zero {
            let width = if padding.is_empty() {
                usize::MAX
            } else {
                self.width.saturating_sub(suffix.chars().count())
            };
            digits = self.locale.group(&format!("{}{}", padding, digits), width);
            padding.clear();
        }

        match self.align {
            Align::Left => format!("{}{}{}{}", prefix, digits, suffix, padding),
            Align::AfterSign => format!("{}{}{}{}", prefix, padding, digits, suffix),
            Align::Center => {
                let half = padding.chars().count() / 2;
                let left: String = padding.chars().take(half).collect();
                let right: String = padding.chars().skip(half).collect();
                format!("{}{}{}{}{}", left, prefix, digits, suffix, right)
            }
            Align::Right => format!("{}{}{}{}", padding, prefix, digits, suffix),
        }
    }

    /// Format a non-negative finite value, returning the SI prefix for `s`.
    fn format_magnitude(&self, x: f64) -> (String, &'static str) {
        match self.kind {
            Kind::Default => match self.precision {
                Some(p) => (to_precision(x, p.max(1)), ""),
                None => (format!("{}", x), ""),
            },
            Kind::Decimal => (format!("{:.0}", x.round()), ""),
            Kind::Fixed => (format!("{:.*}", self.precision.unwrap_or(0), x), ""),
            Kind::Percent => (format!("{:.*}", self.precision.unwrap_or(0), x * 100.0), ""),
            Kind::Exponent => {
                let raw = match self.precision {
                    Some(p) => format!("{:.*e}", p, x),
                    None => format!("{:e}", x),
                };
                (js_exponent(&raw), "")
            }
            Kind::Si => {
                let p = self.precision.unwrap_or(3).max(1);
                if x == 0.0 {
                    return (to_precision(0.0, p), "");
                }
                let rounded: f64 = format!("{:.*e}", p - 1, x).parse().unwrap_or(x);
                let exponent = (rounded.log10().floor() as i32).div_euclid(3).clamp(-8, 8);
                let scaled = x / 10f64.powi(exponent * 3);
                let mut body = to_precision(scaled, p);
                if self.precision.is_none() {
                    body = trim_insignificant(&body);
                }
                (body, SI_PREFIXES[(exponent + 8) as usize])
            }
        }
    }
}

/// `Number.prototype.toPrecision` for non-negative values.
fn to_precision(x: f64, p: usize) -> String {
    let sci = format!("{:.*e}", p - 1, x);
    let exponent: i32 = sci
        .split_once('e')
        .and_then(|(_, e)| e.parse().ok())
        .unwrap_or(0);
    if exponent < -6 || exponent >= p as i32 {
        js_exponent(&sci)
    } else {
        let decimals = (p as i32 - 1 - exponent).max(0) as usize;
        format!("{:.*}", decimals, x)
    }
}

/// Rust writes `1.5e3`; JavaScript writes `1.5e+3`.
fn js_exponent(raw: &str) -> String {
    match raw.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => raw.to_string(),
    }
}

/// Drop trailing fractional zeros: `1.500` → `1.5`, `2.000e+3` → `2e+3`.
fn trim_insignificant(s: &str) -> String {
    let (mantissa, exponent) = match s.find('e') {
        Some(i) => (&s[..i], &s[i..]),
        None => (s, ""),
    };
    if !mantissa.contains('.') {
        return s.to_string();
    }
    let trimmed = mantissa.trim_end_matches('0').trim_end_matches('.');
    format!("{}{}", trimmed, exponent)
}

/// Prints numbers as-is.
pub fn identity_formatter() -> ValueFormatter {
    Box::new(|v: f64| v.to_string())
}

/// Build a value formatter from a d3 specifier.
pub fn number_formatter(specifier: &str, locale: Locale) -> Result<ValueFormatter> {
    let format = NumberFormat::parse(specifier, locale)?;
    Ok(Box::new(move |v: f64| format.format(v)))
}

/// Format at the coarsest granularity that still shows the timestamp exactly.
pub fn smart_date_verbose(timestamp_ms: i64) -> String {
    let Some(dt) = DateTime::<Utc>::from_timestamp_millis(timestamp_ms) else {
        return timestamp_ms.to_string();
    };
    let pattern = if dt.timestamp_subsec_millis() != 0 {
        "%.3f"
    } else if dt.second() != 0 {
        "%a %b %d, %I:%M:%S %p"
    } else if dt.minute() != 0 {
        "%a %b %d, %I:%M %p"
    } else if dt.hour() != 0 {
        "%a %b %d, %I %p"
    } else if dt.day() != 1 {
        "%a %b %-d"
    } else if dt.month() != 1 {
        "%b %Y"
    } else {
        "%Y"
    };
    dt.format(pattern).to_string()
}

pub fn iso_date(timestamp_ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(timestamp_ms) {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => timestamp_ms.to_string(),
    }
}

pub fn default_date_formatter() -> DateFormatter {
    Box::new(smart_date_verbose)
}

/// Tooltip body for one trend point: date on the first line, value below.
pub fn tooltip_text(point: &TrendPoint, format_date: &DateFormatter, format_value: &ValueFormatter) -> String {
    format!("{}\n{}", format_date(point.x), format_value(point.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(specifier: &str, value: f64) -> String {
        NumberFormat::parse(specifier, Locale::en_us()).unwrap().format(value)
    }

    #[test]
    fn test_grouping_by_locale() {
        let es = NumberFormat::parse(",", Locale::es()).unwrap();
        assert_eq!(es.format(12300.0), "12.300");
        assert_eq!(es.format(1131550.0), "1.131.550");
        assert_eq!(fmt(",", 1131550.0), "1,131,550");
        assert_eq!(fmt(",.2f", -1234.5), "-1,234.50");
    }

    #[test]
    fn test_percent() {
        assert_eq!(fmt("%", 0.1), "10%");
        assert_eq!(fmt("%", 0.25), "25%");
        assert_eq!(fmt(".1%", 0.1234), "12.3%");
        let es = NumberFormat::parse(".1%", Locale::es()).unwrap();
        assert_eq!(es.format(0.1234), "12,3%");
    }

    #[test]
    fn test_si_and_exponent() {
        assert_eq!(fmt("s", 12300.0), "12.3k");
        assert_eq!(fmt(".2s", 1_500_000.0), "1.5M");
        assert_eq!(fmt("s", 999_999.0), "1M");
        assert_eq!(fmt(".2e", 12345.0), "1.23e+4");
    }

    #[test]
    fn test_sign_padding_and_currency() {
        assert_eq!(fmt("+d", 42.0), "+42");
        assert_eq!(fmt("(.1f", -3.26), "(3.3)");
        assert_eq!(fmt("08.2f", -3.5), "-0003.50");
        assert_eq!(fmt("$,.2f", 1234.5), "$1,234.50");
        assert_eq!(fmt("*^7d", 42.0), "**42***");
        assert_eq!(fmt("010,d", 1234.0), "00,001,234");
    }

    #[test]
    fn test_default_type() {
        assert_eq!(fmt("", 12300.0), "12300");
        assert_eq!(fmt(".3", 3.14159), "3.14");
        assert_eq!(fmt(".2", 1.0), "1");
        assert_eq!(fmt("d", -0.2), "0");
    }

    #[test]
    fn test_invalid_specifier() {
        assert!(matches!(
            NumberFormat::parse("not a format", Locale::en_us()),
            Err(VizError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_identity() {
        let f = identity_formatter();
        assert_eq!(f(12300.0), "12300");
        assert_eq!(f(0.5), "0.5");
    }

    #[test]
    fn test_smart_date_granularity() {
        // 2021-03-04T05:06:07.089Z
        let base = 1_614_834_367_089;
        assert_eq!(smart_date_verbose(base), ".089");
        assert_eq!(smart_date_verbose(base - 89), "Thu Mar 04, 05:06:07 AM");
        assert_eq!(smart_date_verbose(1_614_834_360_000), "Thu Mar 04, 05:06 AM");
        assert_eq!(smart_date_verbose(1_614_834_000_000), "Thu Mar 04, 05 AM");
        assert_eq!(smart_date_verbose(1_614_816_000_000), "Thu Mar 4");
        assert_eq!(smart_date_verbose(1_614_556_800_000), "Mar 2021");
        assert_eq!(smart_date_verbose(1_609_459_200_000), "2021");
    }

    #[test]
    fn test_iso_and_tooltip() {
        assert_eq!(iso_date(0), "1970-01-01T00:00:00.000Z");
        let format_date: DateFormatter = Box::new(iso_date);
        let text = tooltip_text(&TrendPoint { x: 0, y: 2.5 }, &format_date, &identity_formatter());
        assert_eq!(text, "1970-01-01T00:00:00.000Z\n2.5");
    }
}
