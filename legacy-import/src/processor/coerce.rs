//! Total coercions from loosely typed legacy values.
//!
//! Every function here accepts whatever the export holds (strings, numbers,
//! booleans, null, missing) and always produces a value. None of them panic
//! or return errors.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use super::registry::number_key;

const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
];

/// Parse `text` as a finite float, falling back to its longest numeric
/// prefix (`"3.5kg"` reads as `3.5`).
fn parse_float(text: &str) -> Option<f64> {
    let text = text.trim();
    if let Ok(value) = text.parse::<f64>() {
        if value.is_finite() {
            return Some(value);
        }
    }
    numeric_prefix(text)
        .and_then(|prefix| prefix.parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

fn numeric_prefix(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - digits_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while fraction_end < bytes.len() && bytes[fraction_end].is_ascii_digit() {
            fraction_end += 1;
        }
        if fraction_end > fraction_start || digits > 0 {
            digits += fraction_end - fraction_start;
            end = fraction_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+') | Some(b'-')) {
            exponent_end += 1;
        }
        let exponent_digits = exponent_end;
        while exponent_end < bytes.len() && bytes[exponent_end].is_ascii_digit() {
            exponent_end += 1;
        }
        if exponent_end > exponent_digits {
            end = exponent_end;
        }
    }

    Some(&text[..end])
}

/// Coerce to a float; `None` when the value is missing or has no number in it.
pub fn coerce_optional_float(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => parse_float(s),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Coerce to a float, using `default` for empty, null or unparsable input.
///
/// # Example
///
/// ```
/// use legacy_import::processor::coerce_float;
/// use serde_json::json;
///
/// assert_eq!(coerce_float(Some(&json!("")), 5.0), 5.0);
/// assert_eq!(coerce_float(Some(&json!("3.5")), 0.0), 3.5);
/// assert_eq!(coerce_float(Some(&json!("abc")), 0.0), 0.0);
/// ```
pub fn coerce_float(value: Option<&Value>, default: f64) -> f64 {
    coerce_optional_float(value).unwrap_or(default)
}

/// Coerce to an integer, truncating toward zero; `None` when there is no
/// number to read.
pub fn coerce_optional_int(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .ok()
            .or_else(|| parse_float(s).map(|f| f.trunc() as i64)),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Coerce to an integer, using `default` when there is no number to read.
pub fn coerce_int(value: Option<&Value>, default: i64) -> i64 {
    coerce_optional_int(value).unwrap_or(default)
}

/// Parse a legacy timestamp.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS[.fff]` with a space or `T`,
/// `YYYY-MM-DD`, and epoch milliseconds given as a JSON number. Naive values
/// are taken as UTC. MySQL zero dates, the number `0`, empty and unparsable
/// input yield `None`.
pub fn coerce_optional_date(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::Number(n) => {
            let millis = n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))?;
            if millis == 0 {
                return None;
            }
            Utc.timestamp_millis_opt(millis).single()
        }
        Value::String(s) => parse_date_text(s.trim()),
        _ => None,
    }
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    if text.is_empty() || text.starts_with("0000-00-00") {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Coerce to a timestamp, substituting `now` for zero, missing or
/// unparsable dates.
pub fn coerce_date_at(value: Option<&Value>, now: DateTime<Utc>) -> DateTime<Utc> {
    coerce_optional_date(value).unwrap_or(now)
}

/// Coerce to a timestamp, substituting the current time for zero, missing
/// or unparsable dates.
pub fn coerce_date(value: Option<&Value>) -> DateTime<Utc> {
    coerce_date_at(value, Utc::now())
}

/// Coerce a legacy flag.
///
/// `1`, `"1"`, `true`, `"true"` and `"yes"` are true; `0`, `"0"`, `false`,
/// `"false"` and `"no"` are false; anything else is `default`.
pub fn coerce_bool(value: Option<&Value>, default: bool) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if f == 1.0 => true,
            Some(f) if f == 0.0 => false,
            _ => default,
        },
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => true,
            "0" | "false" | "no" => false,
            _ => default,
        },
        _ => default,
    }
}

/// Coerce to trimmed text. Empty strings, null and structured values are
/// `None`; numbers and booleans are printed.
pub fn coerce_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(number_key(n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Convert a chrono timestamp into the BSON date stored in documents.
pub fn to_bson_date(date: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(date.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_float_defaults() {
        assert_eq!(coerce_float(Some(&json!("")), 5.0), 5.0);
        assert_eq!(coerce_float(None, 5.0), 5.0);
        assert_eq!(coerce_float(Some(&json!(null)), 2.0), 2.0);
        assert_eq!(coerce_float(Some(&json!("abc")), 0.0), 0.0);
        assert_eq!(coerce_float(Some(&json!("inf")), 1.0), 1.0);
    }

    #[test]
    fn test_float_parsing() {
        assert_eq!(coerce_float(Some(&json!("3.5")), 0.0), 3.5);
        assert_eq!(coerce_float(Some(&json!(" 150.50 ")), 0.0), 150.5);
        assert_eq!(coerce_float(Some(&json!(42)), 0.0), 42.0);
        assert_eq!(coerce_float(Some(&json!(true)), 0.0), 1.0);
        assert_eq!(coerce_float(Some(&json!("-2e2")), 0.0), -200.0);
    }

    #[test]
    fn test_float_numeric_prefix() {
        assert_eq!(coerce_float(Some(&json!("3.5kg")), 0.0), 3.5);
        assert_eq!(coerce_float(Some(&json!("12 pcs")), 0.0), 12.0);
        assert_eq!(coerce_float(Some(&json!(".5L")), 0.0), 0.5);
        assert_eq!(coerce_float(Some(&json!("7.e")), 0.0), 7.0);
        assert_eq!(coerce_optional_float(Some(&json!("-"))), None);
        assert_eq!(coerce_optional_float(Some(&json!("."))), None);
    }

    #[test]
    fn test_overflowing_floats_are_rejected() {
        assert_eq!(coerce_optional_float(Some(&json!("1e999"))), None);
        assert_eq!(coerce_optional_float(Some(&json!("-1e999kg"))), None);
        assert_eq!(coerce_float(Some(&json!("1e999")), 4.0), 4.0);
        assert_eq!(coerce_optional_int(Some(&json!("1e999"))), None);
    }

    #[test]
    fn test_optional_float() {
        assert_eq!(coerce_optional_float(Some(&json!(""))), None);
        assert_eq!(coerce_optional_float(Some(&json!("99.9"))), Some(99.9));
        assert_eq!(coerce_optional_float(Some(&json!([1]))), None);
    }

    #[test]
    fn test_int_truncates() {
        assert_eq!(coerce_int(Some(&json!("3.9")), 0), 3);
        assert_eq!(coerce_int(Some(&json!("-3.9")), 0), -3);
        assert_eq!(coerce_int(Some(&json!(4.7)), 0), 4);
        assert_eq!(coerce_int(Some(&json!("12")), 0), 12);
        assert_eq!(coerce_int(Some(&json!("9007199254740993")), 0), 9007199254740993);
    }

    #[test]
    fn test_int_defaults() {
        assert_eq!(coerce_int(Some(&json!("")), 1), 1);
        assert_eq!(coerce_int(Some(&json!("active")), 1), 1);
        assert_eq!(coerce_int(None, 0), 0);
        assert_eq!(coerce_int(Some(&json!(false)), 1), 0);
        assert_eq!(coerce_optional_int(Some(&json!(null))), None);
    }

    #[test]
    fn test_zero_dates_become_now() {
        let now = fixed_now();
        assert_eq!(coerce_date_at(Some(&json!("0000-00-00 00:00:00")), now), now);
        assert_eq!(coerce_date_at(Some(&json!("0000-00-00")), now), now);
        assert_eq!(coerce_date_at(Some(&json!("")), now), now);
        assert_eq!(coerce_date_at(None, now), now);
        assert_eq!(coerce_date_at(Some(&json!("yesterday")), now), now);
        assert_eq!(coerce_date_at(Some(&json!(0)), now), now);
    }

    #[test]
    fn test_zero_date_without_fixed_clock_is_current() {
        let before = Utc::now();
        let coerced = coerce_date(Some(&json!("0000-00-00 00:00:00")));
        let after = Utc::now();

        assert!(coerced >= before - Duration::seconds(1));
        assert!(coerced <= after + Duration::seconds(1));
    }

    #[test]
    fn test_date_formats() {
        let expected = Utc.with_ymd_and_hms(2019, 3, 14, 9, 30, 0).unwrap();
        let now = fixed_now();

        assert_eq!(coerce_date_at(Some(&json!("2019-03-14 09:30:00")), now), expected);
        assert_eq!(coerce_date_at(Some(&json!("2019-03-14T09:30:00")), now), expected);
        assert_eq!(coerce_date_at(Some(&json!("2019-03-14T09:30:00Z")), now), expected);
        assert_eq!(
            coerce_date_at(Some(&json!("2019-03-14T15:00:00+05:30")), now),
            expected
        );
        assert_eq!(
            coerce_date_at(Some(&json!(expected.timestamp_millis())), now),
            expected
        );
        assert_eq!(
            coerce_date_at(Some(&json!("2019-03-14")), now),
            Utc.with_ymd_and_hms(2019, 3, 14, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_fractional_seconds() {
        let parsed = coerce_optional_date(Some(&json!("2019-03-14 09:30:00.250"))).unwrap();
        assert_eq!(parsed.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_optional_date() {
        assert_eq!(coerce_optional_date(Some(&json!("0000-00-00 00:00:00"))), None);
        assert_eq!(coerce_optional_date(Some(&json!(null))), None);
        assert_eq!(coerce_optional_date(Some(&json!("2019-02-30"))), None);
        assert!(coerce_optional_date(Some(&json!("2020-01-01"))).is_some());
    }

    #[test]
    fn test_bool() {
        for truthy in [json!(1), json!("1"), json!(true), json!("true"), json!("Yes")] {
            assert!(coerce_bool(Some(&truthy), false), "{truthy} should be true");
        }
        for falsy in [json!(0), json!("0"), json!(false), json!("no")] {
            assert!(!coerce_bool(Some(&falsy), true), "{falsy} should be false");
        }
        assert!(coerce_bool(Some(&json!("maybe")), true));
        assert!(!coerce_bool(None, false));
    }

    #[test]
    fn test_text() {
        assert_eq!(coerce_text(Some(&json!("  Delhi "))).as_deref(), Some("Delhi"));
        assert_eq!(coerce_text(Some(&json!("   "))), None);
        assert_eq!(coerce_text(Some(&json!(110001))).as_deref(), Some("110001"));
        assert_eq!(coerce_text(Some(&json!(null))), None);
        assert_eq!(coerce_text(Some(&json!({ "a": 1 }))), None);
    }

    #[test]
    fn test_bson_date_keeps_millis() {
        let date = Utc.with_ymd_and_hms(2021, 7, 4, 10, 0, 0).unwrap();
        assert_eq!(to_bson_date(date).timestamp_millis(), date.timestamp_millis());
    }
}
