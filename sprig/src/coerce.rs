//! Conversion of raw command-line strings into typed values.
//!
//! Every receiver field has a [`ValueKind`]. Raw tokens (and declared
//! option defaults) are converted with [`coerce`], then handed to the
//! receiver, which turns the [`Value`] into its concrete field type via
//! [`FromValue`].

use crate::error::DispatchError;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Semantic type of a receiver field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    String,
    Integer,
    Float,
    Boolean,
    Duration,
    StringArray,
}

impl ValueKind {
    pub fn is_array(self) -> bool {
        matches!(self, ValueKind::StringArray)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Float => "number",
            ValueKind::Boolean => "boolean (true|false)",
            ValueKind::Duration => "duration (hh:mm:ss)",
            ValueKind::StringArray => "list of strings",
        };
        f.write_str(name)
    }
}

/// A coerced field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Duration(Duration),
    StringArray(Vec<String>),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::String(_) => ValueKind::String,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Duration(_) => ValueKind::Duration,
            Value::StringArray(_) => ValueKind::StringArray,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Duration(d) => f.write_str(&format_duration(*d)),
            Value::StringArray(items) => f.write_str(&items.join(" ")),
        }
    }
}

/// Convert `raw` into a value of `kind`.
///
/// `field` only feeds the error message.
pub fn coerce(field: &str, raw: &str, kind: ValueKind) -> Result<Value, DispatchError> {
    let invalid = || DispatchError::invalid_format(field, raw, kind);

    match kind {
        ValueKind::String => Ok(Value::String(raw.to_string())),
        ValueKind::Integer => raw
            .trim()
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| invalid()),
        ValueKind::Float => raw
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| invalid()),
        ValueKind::Boolean => parse_bool(raw).map(Value::Boolean).ok_or_else(invalid),
        ValueKind::Duration => parse_clock(raw)
            .or_else(|| parse_general_duration(raw))
            .map(Value::Duration)
            .ok_or_else(invalid),
        ValueKind::StringArray => Ok(Value::StringArray(vec![raw.to_string()])),
    }
}

/// Render a duration the way [`coerce`] reads it back.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let days = total / SECS_PER_DAY;
    let hours = (total % SECS_PER_DAY) / SECS_PER_HOUR;
    let minutes = (total % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let seconds = total % SECS_PER_MINUTE;

    let mut out = String::new();
    if days > 0 {
        out.push_str(&format!("{}.", days));
    }
    out.push_str(&format!("{:02}:{:02}:{:02}", hours, minutes, seconds));

    let nanos = duration.subsec_nanos();
    if nanos > 0 {
        let frac = format!("{:09}", nanos);
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    out
}

fn parse_bool(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Strict `hh:mm:ss`, two digits per component.
fn parse_clock(raw: &str) -> Option<Duration> {
    let parts: Vec<&str> = raw.split(':').collect();
    if parts.len() != 3 || parts.iter().any(|p| p.len() != 2) {
        return None;
    }

    let hours = two_digits(parts[0])?;
    let minutes = two_digits(parts[1])?;
    let seconds = two_digits(parts[2])?;
    if hours > 23 || minutes > 59 || seconds > 59 {
        return None;
    }

    Some(Duration::from_secs(
        hours * SECS_PER_HOUR + minutes * SECS_PER_MINUTE + seconds,
    ))
}

fn two_digits(part: &str) -> Option<u64> {
    if part.bytes().all(|b| b.is_ascii_digit()) {
        part.parse().ok()
    } else {
        None
    }
}

/// Looser forms tried after the strict clock: a bare count of seconds,
/// or `[d.]h:mm[:ss[.fraction]]`.
fn parse_general_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw.parse::<u64>().ok().map(Duration::from_secs);
    }

    let first_colon = raw.find(':')?;
    let (days, clock) = match raw[..first_colon].find('.') {
        Some(dot) => (raw[..dot].parse::<u64>().ok()?, &raw[dot + 1..]),
        None => (0, raw),
    };

    let parts: Vec<&str> = clock.split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return None;
    }

    let hours: u64 = digits(parts[0])?;
    let minutes: u64 = digits(parts[1])?;
    let (seconds, nanos) = match parts.get(2) {
        Some(sec) => split_seconds(sec)?,
        None => (0, 0),
    };
    if hours > 23 || minutes > 59 || seconds > 59 {
        return None;
    }

    let secs = days
        .checked_mul(SECS_PER_DAY)?
        .checked_add(hours * SECS_PER_HOUR + minutes * SECS_PER_MINUTE + seconds)?;
    Some(Duration::new(secs, nanos))
}

fn digits(part: &str) -> Option<u64> {
    if !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()) {
        part.parse().ok()
    } else {
        None
    }
}

fn split_seconds(part: &str) -> Option<(u64, u32)> {
    match part.split_once('.') {
        Some((whole, frac)) => {
            if frac.is_empty() || frac.len() > 9 || !frac.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let nanos = format!("{:0<9}", frac).parse::<u32>().ok()?;
            Some((digits(whole)?, nanos))
        }
        None => Some((digits(part)?, 0)),
    }
}

// ============================================================================
// Field conversion
// ============================================================================

/// Field types a receiver can declare.
///
/// Only `Vec<String>` implements this among collection types, so array
/// slots of any other element type do not compile.
pub trait FromValue: Sized {
    /// Kind raw input is coerced to before [`FromValue::from_value`].
    fn kind() -> ValueKind;

    /// Returns `None` when the value does not fit this type.
    fn from_value(value: Value) -> Option<Self>;
}

/// Convert a coerced value into a concrete field type.
pub fn convert<T: FromValue>(field: &str, value: Value) -> Result<T, DispatchError> {
    let shown = value.to_string();
    T::from_value(value).ok_or_else(|| DispatchError::invalid_format(field, shown, T::kind()))
}

impl FromValue for String {
    fn kind() -> ValueKind {
        ValueKind::String
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    fn kind() -> ValueKind {
        ValueKind::Integer
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Integer(n) => Some(n),
            _ => None,
        }
    }
}

macro_rules! narrow_integer {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn kind() -> ValueKind {
                    ValueKind::Integer
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::Integer(n) => <$ty>::try_from(n).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

narrow_integer!(i32, u32, u64, usize);

impl FromValue for f64 {
    fn kind() -> ValueKind {
        ValueKind::Float
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(n) => Some(n),
            Value::Integer(n) => Some(n as f64),
            _ => None,
        }
    }
}

impl FromValue for bool {
    fn kind() -> ValueKind {
        ValueKind::Boolean
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Boolean(b) => Some(b),
            _ => None,
        }
    }
}

impl FromValue for Duration {
    fn kind() -> ValueKind {
        ValueKind::Duration
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Duration(d) => Some(d),
            _ => None,
        }
    }
}

impl FromValue for Vec<String> {
    fn kind() -> ValueKind {
        ValueKind::StringArray
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::StringArray(items) => Some(items),
            Value::String(s) => Some(vec![s]),
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn kind() -> ValueKind {
        T::kind()
    }

    fn from_value(value: Value) -> Option<Self> {
        T::from_value(value).map(Some)
    }
}
