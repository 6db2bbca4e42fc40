//! Type coercion and conversion.
//!
//! Coercion is best-effort and never raises: values that cannot be
//! reinterpreted as the target type become nulls in the produced array and
//! are flagged in a parallel boolean mask. Originally-missing values are
//! nulls too, but are never flagged as invalid.

use std::fmt::Write;
use std::str::FromStr;

use arrow_array::{
    BooleanArray, Date32Array, Float64Array, StringArray, TimestampMicrosecondArray,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::column::{Column, Value};
use crate::errors::ValidationError;
use crate::message::WarningSink;

/// Conversion target for [`mask_nonconvertible`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Numeric,
    Datetime,
}

impl FromStr for TargetKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "numeric" => Ok(TargetKind::Numeric),
            "datetime" => Ok(TargetKind::Datetime),
            other => Err(ValidationError::InvalidTargetKind(other.to_string())),
        }
    }
}

/// Float rendering used by [`to_string`].
///
/// `General` is the shortest-form rendering (6 significant digits, trailing
/// zeros stripped, scientific notation for very small or very large
/// magnitudes); the other variants are fixed-point and scientific with an
/// explicit precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FloatFormat {
    #[default]
    General,
    Fixed(usize),
    Scientific(usize),
}

/// A column reinterpreted as a target type.
///
/// Invariant: `invalid_type` is true exactly at the non-missing input
/// positions that could not be reinterpreted, and `values` is null at every
/// flagged position.
pub struct Coerced<A> {
    pub values: A,
    pub invalid_type: BooleanArray,
}

/// Flag values that cannot be reinterpreted as `kind`.
///
/// Missing values are not flagged; they are already missing, not invalid.
/// `datetime_format` and `exact` only apply to the `Datetime` target:
/// with `exact` the format must consume the whole string, otherwise it may
/// match anywhere inside it.
pub fn mask_nonconvertible(
    column: &Column,
    kind: TargetKind,
    datetime_format: Option<&str>,
    exact: bool,
) -> BooleanArray {
    column
        .values()
        .iter()
        .map(|value| {
            if value.is_missing() {
                return Some(false);
            }
            let convertible = match kind {
                TargetKind::Numeric => match value {
                    Value::Int(_) | Value::Float(_) => true,
                    Value::Str(s) => parse_numeric(s).is_some(),
                    _ => false,
                },
                TargetKind::Datetime => match value {
                    Value::Date(_) | Value::Timestamp(_) => true,
                    Value::Str(s) => parse_datetime(s, datetime_format, exact).is_some(),
                    _ => false,
                },
            };
            Some(!convertible)
        })
        .collect()
}

/// Convert a column to numeric, substituting NaN (null) for values that
/// cannot be converted. Emits a single warning to `sink` when at least one
/// substitution happened.
pub fn to_numeric(column: &Column, sink: &dyn WarningSink) -> Float64Array {
    let mut substituted = false;
    let converted: Float64Array = column
        .values()
        .iter()
        .map(|value| match value {
            _ if value.is_missing() => None,
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Str(s) => match parse_numeric(s) {
                Some(f) if !f.is_nan() => Some(f),
                Some(_) => None,
                None => {
                    substituted = true;
                    None
                }
            },
            _ => {
                substituted = true;
                None
            }
        })
        .collect();
    if substituted {
        let text = format!(
            "'{}': value(s) not converted to numeric set as NaN",
            column.name()
        );
        sink.print_warning(&text);
    }
    converted
}

/// Convert a column to timestamps (microsecond precision), substituting NaT
/// (null) for values that cannot be converted. Emits a single warning to
/// `sink` when at least one substitution happened.
pub fn to_datetime(
    column: &Column,
    format: Option<&str>,
    exact: bool,
    sink: &dyn WarningSink,
) -> TimestampMicrosecondArray {
    let mut substituted = false;
    let converted: TimestampMicrosecondArray = column
        .values()
        .iter()
        .map(|value| match value {
            _ if value.is_missing() => None,
            Value::Timestamp(ts) => Some(timestamp_to_micros(*ts)),
            Value::Date(d) => Some(timestamp_to_micros(d.and_time(NaiveTime::MIN))),
            Value::Str(s) => match parse_datetime(s, format, exact) {
                Some(ts) => Some(timestamp_to_micros(ts)),
                None => {
                    substituted = true;
                    None
                }
            },
            _ => {
                substituted = true;
                None
            }
        })
        .collect();
    if substituted {
        let text = format!(
            "'{}': value(s) not converted to datetime set as NaT",
            column.name()
        );
        sink.print_warning(&text);
    }
    converted
}

/// Convert every value of a column to its canonical string form.
///
/// This is a pure converter, not a validator: it never fails and flags
/// nothing. Integers render in decimal, floats through `float_format`,
/// temporal values through `datetime_format` (chrono strftime codes),
/// bytes as lossy UTF-8, strings pass through and missing stays missing.
pub fn to_string(column: &Column, float_format: FloatFormat, datetime_format: &str) -> StringArray {
    column
        .values()
        .iter()
        .map(|value| match value {
            _ if value.is_missing() => None,
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(format_float(*f, float_format)),
            Value::Str(s) => Some(s.clone()),
            Value::Bytes(b) => Some(String::from_utf8_lossy(b).into_owned()),
            Value::Date(d) => Some(format_date(*d, datetime_format)),
            Value::Timestamp(ts) => Some(format_timestamp(*ts, datetime_format)),
            Value::Missing => None,
        })
        .collect()
}

/// Per-element numeric view used by `validate_numeric`.
///
/// Only values that already are numbers pass; strings are not parsed here
/// (that is [`to_numeric`]'s job). NaN floats count as missing, not invalid.
pub fn numeric_values(column: &Column) -> Coerced<Float64Array> {
    let mut invalid = Vec::with_capacity(column.len());
    let values: Float64Array = column
        .values()
        .iter()
        .map(|value| match value {
            Value::Int(i) => {
                invalid.push(false);
                Some(*i as f64)
            }
            Value::Float(f) if !f.is_nan() => {
                invalid.push(false);
                Some(*f)
            }
            Value::Float(_) | Value::Missing => {
                invalid.push(false);
                None
            }
            _ => {
                invalid.push(true);
                None
            }
        })
        .collect();
    Coerced {
        values,
        invalid_type: BooleanArray::from(invalid),
    }
}

/// Per-element string view used by `validate_string`. Non-string values are
/// flagged, never stringified.
pub fn string_values(column: &Column) -> Coerced<StringArray> {
    let mut invalid = Vec::with_capacity(column.len());
    let values: StringArray = column
        .values()
        .iter()
        .map(|value| match value {
            Value::Str(s) => {
                invalid.push(false);
                Some(s.as_str())
            }
            _ if value.is_missing() => {
                invalid.push(false);
                None
            }
            _ => {
                invalid.push(true);
                None
            }
        })
        .collect();
    Coerced {
        values,
        invalid_type: BooleanArray::from(invalid),
    }
}

/// Per-element date view used by `validate_date` (days since epoch, like
/// `Date32`). Timestamps are accepted and truncated to their calendar date.
/// When `convert_format` is given, strings are parsed with it first;
/// non-parsing strings stay invalid.
pub fn date_values(column: &Column, convert_format: Option<&str>) -> Coerced<Date32Array> {
    let mut invalid = Vec::with_capacity(column.len());
    let values: Date32Array = column
        .values()
        .iter()
        .map(|value| match value {
            Value::Date(d) => {
                invalid.push(false);
                Some(date_to_days(*d))
            }
            Value::Timestamp(ts) => {
                invalid.push(false);
                Some(date_to_days(ts.date()))
            }
            Value::Str(s) => match convert_format.and_then(|f| NaiveDate::parse_from_str(s, f).ok())
            {
                Some(d) => {
                    invalid.push(false);
                    Some(date_to_days(d))
                }
                None => {
                    invalid.push(true);
                    None
                }
            },
            _ if value.is_missing() => {
                invalid.push(false);
                None
            }
            _ => {
                invalid.push(true);
                None
            }
        })
        .collect();
    Coerced {
        values,
        invalid_type: BooleanArray::from(invalid),
    }
}

/// Per-element timestamp view used by `validate_timestamp`. This is a strict
/// type-identity check: calendar dates and parseable strings do not pass.
pub fn timestamp_values(column: &Column) -> Coerced<TimestampMicrosecondArray> {
    let mut invalid = Vec::with_capacity(column.len());
    let values: TimestampMicrosecondArray = column
        .values()
        .iter()
        .map(|value| match value {
            Value::Timestamp(ts) => {
                invalid.push(false);
                Some(timestamp_to_micros(*ts))
            }
            _ if value.is_missing() => {
                invalid.push(false);
                None
            }
            _ => {
                invalid.push(true);
                None
            }
        })
        .collect();
    Coerced {
        values,
        invalid_type: BooleanArray::from(invalid),
    }
}

pub(crate) fn date_to_days(d: NaiveDate) -> i32 {
    // 1970-01-01 is a valid existing date
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    d.signed_duration_since(epoch).num_days() as i32
}

pub(crate) fn timestamp_to_micros(ts: NaiveDateTime) -> i64 {
    ts.and_utc().timestamp_micros()
}

fn parse_numeric(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok()
}

fn parse_datetime(s: &str, format: Option<&str>, exact: bool) -> Option<NaiveDateTime> {
    match format {
        Some(fmt) if exact => NaiveDateTime::parse_from_str(s, fmt)
            .ok()
            .or_else(|| date_at_midnight(NaiveDate::parse_from_str(s, fmt).ok())),
        Some(fmt) => {
            // The format may match anywhere inside the string.
            for (idx, _) in s.char_indices() {
                let tail = &s[idx..];
                if let Ok((ts, _)) = NaiveDateTime::parse_and_remainder(tail, fmt) {
                    return Some(ts);
                }
                if let Ok((d, _)) = NaiveDate::parse_and_remainder(tail, fmt) {
                    return Some(d.and_time(NaiveTime::MIN));
                }
            }
            None
        }
        None => {
            let trimmed = s.trim();
            for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
                if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, fmt) {
                    return Some(ts);
                }
            }
            date_at_midnight(NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok())
        }
    }
}

fn date_at_midnight(d: Option<NaiveDate>) -> Option<NaiveDateTime> {
    d.map(|d| d.and_time(NaiveTime::MIN))
}

pub(crate) fn format_float(v: f64, format: FloatFormat) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    match format {
        FloatFormat::Fixed(precision) => format!("{:.*}", precision, v),
        FloatFormat::Scientific(precision) => format!("{:.*e}", precision, v),
        FloatFormat::General => format_general(v),
    }
}

/// Shortest-form float rendering with 6 significant digits, matching the
/// conventional general ("%g") style.
fn format_general(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    if v.is_infinite() {
        return if v.is_sign_positive() { "inf" } else { "-inf" }.to_string();
    }
    let exp = v.abs().log10().floor() as i32;
    if !(-4..6).contains(&exp) {
        let mantissa = strip_trailing_zeros(&format!("{:.5}", v / 10f64.powi(exp)));
        format!("{}e{}", mantissa, exp)
    } else {
        let precision = (5 - exp).max(0) as usize;
        strip_trailing_zeros(&format!("{:.*}", precision, v))
    }
}

fn strip_trailing_zeros(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}

fn format_date(d: NaiveDate, format: &str) -> String {
    let mut out = String::new();
    // Display on a delayed format fails for malformed format strings;
    // fall back to ISO instead of panicking.
    match write!(out, "{}", d.format(format)) {
        Ok(()) => out,
        Err(_) => d.to_string(),
    }
}

fn format_timestamp(ts: NaiveDateTime, format: &str) -> String {
    let mut out = String::new();
    match write!(out, "{}", ts.format(format)) {
        Ok(()) => out,
        Err(_) => ts.to_string(),
    }
}
