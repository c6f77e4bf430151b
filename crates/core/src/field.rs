use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date formats the snapshot generator is known to emit, tried in order.
const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%m/%d/%Y", "%m-%d-%Y", "%Y/%m/%d", "%d/%m/%Y"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FieldValue {
    Null,
    Text(String),
    Number(f64),
    Boolean(bool),
    Date(NaiveDate),
    TextList(Vec<String>),
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b).is_eq(),
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::TextList(a), Self::TextList(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for FieldValue {}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Render the value for display surfaces: distinct-value lists, CSV cells.
    /// `Null` renders as the empty string.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            FieldValue::Boolean(b) => b.to_string(),
            FieldValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            FieldValue::TextList(items) => items.join("; "),
        }
    }
}

/// Parse a date string in any of the generator's formats.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Parse a numeric string, tolerating `$` and `,` decoration ("$1,500,000").
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_parsing_accepts_generator_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        for text in ["2025-03-14", "03/14/2025", "03-14-2025", "2025/03/14"] {
            assert_eq!(parse_date(text), Some(expected), "format: {text}");
        }
        assert_eq!(parse_date("soon"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn number_parsing_strips_currency_decoration() {
        assert_eq!(parse_number("$1,500,000"), Some(1_500_000.0));
        assert_eq!(parse_number("250000"), Some(250_000.0));
        assert_eq!(parse_number("  42.5 "), Some(42.5));
        assert_eq!(parse_number("TBD"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn number_equality_is_total() {
        assert_eq!(FieldValue::Number(f64::NAN), FieldValue::Number(f64::NAN));
        assert_ne!(FieldValue::Number(0.0), FieldValue::Number(-0.0));
    }

    #[test]
    fn display_renders_whole_numbers_without_fraction() {
        assert_eq!(FieldValue::Number(500_000.0).display(), "500000");
        assert_eq!(FieldValue::Number(0.5).display(), "0.5");
        assert_eq!(FieldValue::Null.display(), "");
        assert_eq!(
            FieldValue::TextList(vec!["HHS".into(), "DOD".into()]).display(),
            "HHS; DOD"
        );
    }
}
