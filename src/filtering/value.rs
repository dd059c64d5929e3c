//! Filter values and the value sanitizer.
//!
//! Raw values are a closed union ([`FilterValue`]) so that sanitizing and formatting are
//! exhaustive matches. Sanitizing produces a [`SanitizedValue`], which can no longer be
//! empty, blank, `NaN` or an unparseable date.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{FilterError, Result};

/// A single filter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Number(f64),
    Bool(bool),
    /// `None` is an unparseable date and never survives sanitizing.
    Date(Option<DateTime<Utc>>),
}

impl Scalar {
    /// Parse an RFC 3339 timestamp or a `YYYY-MM-DD` date (midnight UTC).
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidDate`] if the input matches neither format.
    pub fn try_parse_date(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self::Date(Some(timestamp.with_timezone(&Utc))));
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(Self::from(date));
        }
        Err(FilterError::InvalidDate(input.to_string()))
    }

    /// Lenient counterpart of [`Scalar::try_parse_date`]: unparseable input becomes an
    /// invalid date, which the sanitizer later discards.
    #[must_use]
    pub fn parse_date(input: &str) -> Self {
        Self::try_parse_date(input).unwrap_or(Self::Date(None))
    }

    /// `NaN`, unparseable dates and empty strings, the entries dropped from every list.
    fn is_missing(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Number(number) => number.is_nan(),
            Self::Date(date) => date.is_none(),
            Self::Bool(_) => false,
        }
    }

    /// Sanitize a standalone scalar. Strings are trimmed.
    fn sanitize(self) -> Option<Self> {
        match self {
            Self::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| Self::Text(trimmed.to_string()))
            }
            Self::Number(number) if number.is_nan() => None,
            Self::Date(None) => None,
            valid @ (Self::Number(_) | Self::Bool(_) | Self::Date(Some(_))) => Some(valid),
        }
    }
}

/// Numbers render the way the CRNK clients always sent them: integral values without a
/// fractional part, exponent notation (`1e+21`, `1.5e-7`) outside `1e-6..1e21`.
#[allow(clippy::float_cmp)]
fn format_number(number: f64) -> String {
    if number.is_nan() {
        "NaN".to_string()
    } else if number.is_infinite() {
        let infinity = if number.is_sign_positive() { "Infinity" } else { "-Infinity" };
        infinity.to_string()
    } else if number == 0.0 {
        "0".to_string()
    } else if number.abs() >= 1e21 || number.abs() < 1e-6 {
        let exponential = format!("{number:e}");
        match exponential.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => exponential,
        }
    } else {
        number.to_string()
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => f.write_str(&format_number(*number)),
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Date(Some(date)) => f.write_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Self::Date(None) => f.write_str("Invalid Date"),
        }
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for Scalar {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<u64> for Scalar {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: u64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(Some(value))
    }
}

impl From<NaiveDate> for Scalar {
    fn from(value: NaiveDate) -> Self {
        Self::Date(Some(Utc.from_utc_datetime(&value.and_time(NaiveTime::MIN))))
    }
}

/// JSON `null` maps to `None`; objects and nested arrays keep their JSON text.
fn scalar_from_json(value: &serde_json::Value) -> Option<Scalar> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(flag) => Some(Scalar::Bool(*flag)),
        serde_json::Value::Number(number) => number.as_f64().map(Scalar::Number),
        serde_json::Value::String(text) => Some(Scalar::Text(text.clone())),
        other => Some(Scalar::Text(other.to_string())),
    }
}

impl From<&Scalar> for serde_json::Value {
    fn from(value: &Scalar) -> Self {
        match value {
            Scalar::Text(text) => Self::String(text.clone()),
            Scalar::Number(number) if number.is_infinite() => Self::String(value.to_string()),
            Scalar::Number(number) => {
                serde_json::Number::from_f64(*number).map_or(Self::Null, Self::Number)
            }
            Scalar::Bool(flag) => Self::Bool(*flag),
            Scalar::Date(Some(_)) => Self::String(value.to_string()),
            Scalar::Date(None) => Self::Null,
        }
    }
}

/// Raw filter value as supplied by the caller.
///
/// `Undefined` and `Null` are distinct: a nullable filter accepts an explicit `Null`
/// ("IS NULL") but never `Undefined`. When deserializing, a missing field becomes
/// `Undefined` and a JSON `null` becomes `Null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum FilterValue {
    #[default]
    Undefined,
    Null,
    Scalar(Scalar),
    /// `None` entries are nulls inside the list and are compacted away.
    List(Vec<Option<Scalar>>),
}

impl FilterValue {
    /// Run the value sanitizer.
    ///
    /// - strings are trimmed and blank strings rejected
    /// - lists drop null, empty, `NaN` and unparseable-date entries; a list of only
    ///   strings is then trimmed, a mixed list only loses its blank strings and keeps
    ///   the others as given
    /// - an empty list is rejected, even for nullable filters
    /// - `NaN` and unparseable dates are rejected
    /// - `Null` is accepted only when `nullable` is set; `Undefined` never is
    #[must_use]
    pub fn sanitize(&self, nullable: bool) -> Option<SanitizedValue> {
        match self {
            Self::Undefined => None,
            Self::Null => nullable.then_some(SanitizedValue::Null),
            Self::Scalar(scalar) => scalar.clone().sanitize().map(SanitizedValue::Scalar),
            Self::List(items) => {
                let compacted: Vec<&Scalar> =
                    items.iter().flatten().filter(|item| !item.is_missing()).collect();
                let only_text = compacted.iter().all(|item| matches!(item, Scalar::Text(_)));
                let entries: Vec<Scalar> = compacted
                    .into_iter()
                    .filter_map(|item| match item {
                        Scalar::Text(text) if text.trim().is_empty() => None,
                        Scalar::Text(text) if only_text => Some(Scalar::Text(text.trim().to_string())),
                        other => Some(other.clone()),
                    })
                    .collect();
                (!entries.is_empty()).then_some(SanitizedValue::List(entries))
            }
        }
    }

    /// Whether this value can never become a filter, whatever `nullable` says.
    ///
    /// Such values are left out when a [`FilterSpec`](crate::FilterSpec) is serialized, so
    /// they read back as `Undefined` instead of an explicit `null`.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        match self {
            Self::Undefined => true,
            Self::Scalar(Scalar::Number(number)) => number.is_nan(),
            Self::Scalar(Scalar::Date(date)) => date.is_none(),
            Self::Null | Self::Scalar(_) | Self::List(_) => false,
        }
    }
}

impl From<serde_json::Value> for FilterValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Array(items) => {
                Self::List(items.iter().map(scalar_from_json).collect())
            }
            other => scalar_from_json(&other).map_or(Self::Null, Self::Scalar),
        }
    }
}

impl From<FilterValue> for serde_json::Value {
    fn from(value: FilterValue) -> Self {
        match value {
            FilterValue::Undefined | FilterValue::Null => Self::Null,
            FilterValue::Scalar(scalar) => Self::from(&scalar),
            FilterValue::List(items) => Self::Array(
                items
                    .iter()
                    .map(|item| item.as_ref().map_or(Self::Null, Self::from))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Scalar(Scalar::from(value))
    }
}

impl From<Option<&str>> for FilterValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::Null, Self::from)
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(|v| Some(Scalar::from(v))).collect())
    }
}

impl From<Vec<Option<&str>>> for FilterValue {
    fn from(values: Vec<Option<&str>>) -> Self {
        Self::List(values.into_iter().map(|v| v.map(Scalar::from)).collect())
    }
}

macro_rules! impl_filter_value_from {
    ($($ty:ty),* $(,)?) => {$(
        impl From<$ty> for FilterValue {
            fn from(value: $ty) -> Self {
                Self::Scalar(Scalar::from(value))
            }
        }

        impl From<Option<$ty>> for FilterValue {
            fn from(value: Option<$ty>) -> Self {
                value.map_or(Self::Null, Self::from)
            }
        }

        impl From<Vec<$ty>> for FilterValue {
            fn from(values: Vec<$ty>) -> Self {
                Self::List(values.into_iter().map(|v| Some(Scalar::from(v))).collect())
            }
        }

        impl From<Vec<Option<$ty>>> for FilterValue {
            fn from(values: Vec<Option<$ty>>) -> Self {
                Self::List(values.into_iter().map(|v| v.map(Scalar::from)).collect())
            }
        }
    )*};
}

impl_filter_value_from!(
    Scalar,
    String,
    bool,
    f32,
    f64,
    i32,
    i64,
    u32,
    u64,
    DateTime<Utc>,
    NaiveDate,
);

/// A value that passed the sanitizer: never blank, never empty, never `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub enum SanitizedValue {
    /// Explicit "IS NULL" value of a nullable filter
    Null,
    Scalar(Scalar),
    /// Non-empty list
    List(Vec<Scalar>),
}

impl SanitizedValue {
    /// Flat (`filter[path][OP]=...`) representation: comma list without brackets.
    #[must_use]
    pub fn to_flat(&self, wildcard: bool) -> String {
        let suffix = if wildcard { "%" } else { "" };
        match self {
            Self::Null => "null".to_string(),
            Self::Scalar(scalar) => format!("{scalar}{suffix}"),
            Self::List(items) => items
                .iter()
                .map(|item| format!("{item}{suffix}"))
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Nested representation: quoted strings, `[a, b]` lists, bare `null`.
    ///
    /// A list with a single entry renders as that quoted entry, not as a one-element
    /// list. Backends built against the CRNK clients depend on this.
    #[must_use]
    pub fn to_nested(&self, wildcard: bool) -> String {
        let suffix = if wildcard { "%" } else { "" };
        match self {
            Self::Null => "null".to_string(),
            Self::Scalar(scalar) => format!("\"{scalar}{suffix}\""),
            Self::List(items) => {
                let quoted: Vec<String> = items
                    .iter()
                    .map(|item| format!("\"{item}{suffix}\""))
                    .collect();
                match quoted.as_slice() {
                    [single] => single.clone(),
                    _ => format!("[{}]", quoted.join(", ")),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_trims_strings() {
        let value = FilterValue::from("  Mazda   ");
        assert_eq!(
            value.sanitize(false),
            Some(SanitizedValue::Scalar(Scalar::Text("Mazda".to_string())))
        );
    }

    #[test]
    fn test_sanitize_rejects_blank_string() {
        assert_eq!(FilterValue::from("    ").sanitize(false), None);
        assert_eq!(FilterValue::from("").sanitize(true), None);
    }

    #[test]
    fn test_sanitize_null_depends_on_nullable() {
        assert_eq!(FilterValue::Null.sanitize(false), None);
        assert_eq!(FilterValue::Null.sanitize(true), Some(SanitizedValue::Null));
        assert_eq!(FilterValue::Undefined.sanitize(true), None);
    }

    #[test]
    fn test_sanitize_rejects_nan() {
        assert_eq!(FilterValue::from(f64::NAN).sanitize(false), None);
        assert_eq!(FilterValue::from(f64::NAN).sanitize(true), None);
    }

    #[test]
    fn test_sanitize_keeps_false_and_zero() {
        assert_eq!(
            FilterValue::from(false).sanitize(false),
            Some(SanitizedValue::Scalar(Scalar::Bool(false)))
        );
        assert_eq!(
            FilterValue::from(vec![0, 1]).sanitize(false),
            Some(SanitizedValue::List(vec![Scalar::Number(0.0), Scalar::Number(1.0)]))
        );
    }

    #[test]
    fn test_sanitize_mixed_list_keeps_strings_untrimmed() {
        let value = FilterValue::List(vec![
            Some(Scalar::from(15153)),
            Some(Scalar::from("  ")),
            None,
            Some(Scalar::from(" 651515 ")),
            Some(Scalar::from(f64::NAN)),
            Some(Scalar::from("")),
        ]);
        assert_eq!(
            value.sanitize(false),
            Some(SanitizedValue::List(vec![
                Scalar::Number(15153.0),
                Scalar::Text(" 651515 ".to_string()),
            ]))
        );
    }

    #[test]
    fn test_sanitize_string_list_is_trimmed() {
        let value = FilterValue::from(vec![Some("Gustav     "), None, Some("  "), Some("  Strasse ")]);
        assert_eq!(
            value.sanitize(false),
            Some(SanitizedValue::List(vec![Scalar::from("Gustav"), Scalar::from("Strasse")]))
        );
    }

    #[test]
    fn test_absent_values() {
        assert!(FilterValue::Undefined.is_absent());
        assert!(FilterValue::from(f64::NAN).is_absent());
        assert!(FilterValue::from(Scalar::parse_date("asd")).is_absent());
        assert!(!FilterValue::Null.is_absent());
        assert!(!FilterValue::from("").is_absent());
        assert!(!FilterValue::from(0).is_absent());
    }

    #[test]
    fn test_infinity_serializes_as_text() {
        let json = serde_json::to_value(FilterValue::from(f64::INFINITY)).unwrap();
        assert_eq!(json, serde_json::json!("Infinity"));
    }

    #[test]
    fn test_sanitize_rejects_list_of_blanks_even_when_nullable() {
        let value = FilterValue::from(vec![None, Some(""), Some("  ")]);
        assert_eq!(value.sanitize(true), None);
        assert_eq!(FilterValue::List(Vec::new()).sanitize(false), None);
    }

    #[test]
    fn test_sanitize_rejects_invalid_date() {
        assert_eq!(
            FilterValue::Scalar(Scalar::parse_date("asd")).sanitize(false),
            None
        );
    }

    #[test]
    fn test_parse_date_formats() {
        let date = Scalar::parse_date("2012-07-28");
        assert_eq!(date.to_string(), "2012-07-28T00:00:00.000Z");

        let timestamp = Scalar::parse_date("2012-07-28T10:15:00+02:00");
        assert_eq!(timestamp.to_string(), "2012-07-28T08:15:00.000Z");

        assert_eq!(
            Scalar::try_parse_date("gasfasd"),
            Err(FilterError::InvalidDate("gasfasd".to_string()))
        );
    }

    #[test]
    fn test_number_rendering() {
        assert_eq!(Scalar::from(12).to_string(), "12");
        assert_eq!(Scalar::from(1.5).to_string(), "1.5");
        assert_eq!(Scalar::from(-0.0).to_string(), "0");
        assert_eq!(Scalar::from(f64::INFINITY).to_string(), "Infinity");
    }

    #[test]
    fn test_number_rendering_uses_exponent_outside_plain_range() {
        assert_eq!(Scalar::from(1e21).to_string(), "1e+21");
        assert_eq!(Scalar::from(-1.5e22).to_string(), "-1.5e+22");
        assert_eq!(Scalar::from(1e-7).to_string(), "1e-7");
        assert_eq!(Scalar::from(1.5e-7).to_string(), "1.5e-7");
        assert_eq!(Scalar::from(1e20).to_string(), "100000000000000000000");
        assert_eq!(Scalar::from(0.000_001).to_string(), "0.000001");
    }

    #[test]
    fn test_flat_formatting() {
        let list = SanitizedValue::List(vec![Scalar::from(13513), Scalar::from(23151)]);
        assert_eq!(list.to_flat(false), "13513,23151");
        assert_eq!(list.to_flat(true), "13513%,23151%");

        let single = SanitizedValue::List(vec![Scalar::from("Auto")]);
        assert_eq!(single.to_flat(true), "Auto%");
        assert_eq!(SanitizedValue::Null.to_flat(true), "null");
    }

    #[test]
    fn test_nested_formatting() {
        let list = SanitizedValue::List(vec![Scalar::from("Toy"), Scalar::from("Maz")]);
        assert_eq!(list.to_nested(true), r#"["Toy%", "Maz%"]"#);
        assert_eq!(list.to_nested(false), r#"["Toy", "Maz"]"#);

        let single = SanitizedValue::List(vec![Scalar::from("Mazda")]);
        assert_eq!(single.to_nested(false), r#""Mazda""#);

        let number = SanitizedValue::Scalar(Scalar::from(10));
        assert_eq!(number.to_nested(false), r#""10""#);
        assert_eq!(SanitizedValue::Null.to_nested(false), "null");
    }

    #[test]
    fn test_filter_value_from_json() {
        let value: FilterValue = serde_json::from_value(serde_json::json!([1, null, "a"])).unwrap();
        assert_eq!(
            value,
            FilterValue::List(vec![Some(Scalar::Number(1.0)), None, Some(Scalar::from("a"))])
        );

        let null: FilterValue = serde_json::from_str("null").unwrap();
        assert_eq!(null, FilterValue::Null);
    }

    #[test]
    fn test_option_conversions() {
        assert_eq!(FilterValue::from(None::<i32>), FilterValue::Null);
        assert_eq!(FilterValue::from(Some(3)), FilterValue::Scalar(Scalar::Number(3.0)));
    }
}
