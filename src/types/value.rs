use crate::common::error::{DuckChunkError, DuckChunkResult};
use crate::types::type_id::TypeId;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single decoded value from a vector
/// Nested values own their children; a value never refers back into a chunk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Null value (the type lives with the vector)
    Null,
    Boolean(bool),
    TinyInt(i8),
    SmallInt(i16),
    Integer(i32),
    BigInt(i64),
    HugeInt(i128),
    UTinyInt(u8),
    USmallInt(u16),
    UInteger(u32),
    UBigInt(u64),
    UHugeInt(u128),
    Float(f32),
    Double(f64),
    /// Decimal value: unscaled integer paired with the type's width and scale
    Decimal { value: i128, width: u8, scale: u8 },
    Varchar(String),
    Blob(Vec<u8>),
    Bit(Vec<bool>),
    /// Days since 1970-01-01
    Date(i32),
    /// Microseconds since midnight
    Time(i64),
    /// Microseconds since midnight with a UTC offset in seconds
    TimeTz { micros: i64, offset: i32 },
    /// Microseconds since 1970-01-01 00:00:00
    Timestamp(i64),
    TimestampS(i64),
    TimestampMs(i64),
    TimestampNs(i64),
    /// Microseconds since 1970-01-01 00:00:00 UTC
    TimestampTz(i64),
    Interval { months: i32, days: i32, micros: i64 },
    Uuid(uuid::Uuid),
    /// Enum member, resolved through the type's dictionary
    Enum(String),
    List(Vec<Value>),
    Array(Vec<Value>),
    /// Key/value pairs in stored order; keys are not deduplicated
    Map(Vec<(Value, Value)>),
    Struct(Vec<(String, Value)>),
    /// Union value with the index of the active member
    Union { tag: u8, value: Box<Value> },
}

impl Value {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Identifier of the kind of this value. `Null` reports `SQLNULL`.
    pub fn type_id(&self) -> TypeId {
        match self {
            Value::Null => TypeId::SqlNull,
            Value::Boolean(_) => TypeId::Boolean,
            Value::TinyInt(_) => TypeId::TinyInt,
            Value::SmallInt(_) => TypeId::SmallInt,
            Value::Integer(_) => TypeId::Integer,
            Value::BigInt(_) => TypeId::BigInt,
            Value::HugeInt(_) => TypeId::HugeInt,
            Value::UTinyInt(_) => TypeId::UTinyInt,
            Value::USmallInt(_) => TypeId::USmallInt,
            Value::UInteger(_) => TypeId::UInteger,
            Value::UBigInt(_) => TypeId::UBigInt,
            Value::UHugeInt(_) => TypeId::UHugeInt,
            Value::Float(_) => TypeId::Float,
            Value::Double(_) => TypeId::Double,
            Value::Decimal { .. } => TypeId::Decimal,
            Value::Varchar(_) => TypeId::Varchar,
            Value::Blob(_) => TypeId::Blob,
            Value::Bit(_) => TypeId::Bit,
            Value::Date(_) => TypeId::Date,
            Value::Time(_) => TypeId::Time,
            Value::TimeTz { .. } => TypeId::TimeTz,
            Value::Timestamp(_) => TypeId::Timestamp,
            Value::TimestampS(_) => TypeId::TimestampS,
            Value::TimestampMs(_) => TypeId::TimestampMs,
            Value::TimestampNs(_) => TypeId::TimestampNs,
            Value::TimestampTz(_) => TypeId::TimestampTz,
            Value::Interval { .. } => TypeId::Interval,
            Value::Uuid(_) => TypeId::Uuid,
            Value::Enum(_) => TypeId::Enum,
            Value::List(_) => TypeId::List,
            Value::Array(_) => TypeId::Array,
            Value::Map(_) => TypeId::Map,
            Value::Struct(_) => TypeId::Struct,
            Value::Union { .. } => TypeId::Union,
        }
    }

    /// Try to extract a boolean value
    pub fn try_as_boolean(&self) -> DuckChunkResult<bool> {
        match self {
            Value::Boolean(value) => Ok(*value),
            _ => Err(DuckChunkError::mismatch("BOOLEAN", self.type_id())),
        }
    }

    /// Try to extract a signed 64-bit integer from any integer value that fits
    pub fn try_as_i64(&self) -> DuckChunkResult<i64> {
        let wide: i128 = match self {
            Value::TinyInt(v) => *v as i128,
            Value::SmallInt(v) => *v as i128,
            Value::Integer(v) => *v as i128,
            Value::BigInt(v) => *v as i128,
            Value::HugeInt(v) => *v,
            Value::UTinyInt(v) => *v as i128,
            Value::USmallInt(v) => *v as i128,
            Value::UInteger(v) => *v as i128,
            Value::UBigInt(v) => *v as i128,
            Value::UHugeInt(v) => i128::try_from(*v).unwrap_or(i128::MAX),
            _ => return Err(DuckChunkError::mismatch("integer", self.type_id())),
        };
        i64::try_from(wide)
            .map_err(|_| DuckChunkError::InvalidValue(format!("{} does not fit in BIGINT", self)))
    }

    /// Try to extract an f64 value
    pub fn try_as_f64(&self) -> DuckChunkResult<f64> {
        match self {
            Value::Double(value) => Ok(*value),
            Value::Float(value) => Ok(*value as f64),
            Value::Decimal { value, scale, .. } => Ok(*value as f64 / 10_f64.powi(*scale as i32)),
            _ => self.try_as_i64().map(|v| v as f64),
        }
    }

    /// Try to extract a string value
    pub fn try_as_str(&self) -> DuckChunkResult<&str> {
        match self {
            Value::Varchar(value) | Value::Enum(value) => Ok(value),
            _ => Err(DuckChunkError::mismatch("VARCHAR", self.type_id())),
        }
    }

    /// Try to extract the elements of a list or array value
    pub fn try_as_list(&self) -> DuckChunkResult<&[Value]> {
        match self {
            Value::List(values) | Value::Array(values) => Ok(values),
            _ => Err(DuckChunkError::mismatch("LIST", self.type_id())),
        }
    }

    /// Convert a decimal value for arithmetic. Fails when the unscaled value
    /// exceeds the 96-bit mantissa `rust_decimal` supports.
    pub fn to_decimal(&self) -> DuckChunkResult<rust_decimal::Decimal> {
        match self {
            Value::Decimal { value, scale, .. } => {
                rust_decimal::Decimal::try_from_i128_with_scale(*value, *scale as u32).map_err(
                    |e| DuckChunkError::InvalidValue(format!("{} is out of range: {}", self, e)),
                )
            }
            _ => Err(DuckChunkError::mismatch("DECIMAL", self.type_id())),
        }
    }

    pub fn varchar(value: impl Into<String>) -> Self {
        Value::Varchar(value.into())
    }

    pub fn decimal(value: i128, width: u8, scale: u8) -> Self {
        Value::Decimal {
            value,
            width,
            scale,
        }
    }
}

/// Date for a number of days since the epoch
pub fn date_from_days(days: i32) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp(days as i64 * 86_400, 0).map(|dt| dt.date_naive())
}

/// Date and time for a count of `units_per_second` ticks since the epoch
pub fn timestamp_from_ticks(ticks: i64, units_per_second: i64) -> Option<NaiveDateTime> {
    let secs = ticks.div_euclid(units_per_second);
    let nanos = ticks.rem_euclid(units_per_second) * (1_000_000_000 / units_per_second);
    DateTime::<Utc>::from_timestamp(secs, nanos as u32).map(|dt| dt.naive_utc())
}

/// Render a timestamp, printing fractional seconds only when present
pub fn format_timestamp(ticks: i64, units_per_second: i64) -> String {
    match timestamp_from_ticks(ticks, units_per_second) {
        Some(ts) => {
            let nanos = ts.and_utc().timestamp_subsec_nanos();
            if nanos == 0 {
                ts.format("%Y-%m-%d %H:%M:%S").to_string()
            } else if units_per_second > 1_000_000 {
                ts.format("%Y-%m-%d %H:%M:%S%.9f").to_string()
            } else {
                ts.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
            }
        }
        None => format!("{} (out of range)", ticks),
    }
}

/// Render microseconds since midnight as `HH:MM:SS[.ffffff]`
pub fn format_time(micros: i64) -> String {
    let total_secs = micros.div_euclid(1_000_000);
    let fraction = micros.rem_euclid(1_000_000);
    let (hours, minutes, seconds) = (total_secs / 3600, (total_secs / 60) % 60, total_secs % 60);
    if fraction == 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}:{:02}.{:06}", hours, minutes, seconds, fraction)
    }
}

/// Render a duration magnitude in microseconds as `HH:MM:SS[.ffffff]`; hours are unbounded
fn format_duration(micros: u64) -> String {
    let total_secs = micros / 1_000_000;
    let fraction = micros % 1_000_000;
    let (hours, minutes, seconds) = (total_secs / 3600, (total_secs / 60) % 60, total_secs % 60);
    if fraction == 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}:{:02}.{:06}", hours, minutes, seconds, fraction)
    }
}

/// Render a UTC offset in seconds as `+HH[:MM[:SS]]`
pub fn format_offset(offset: i32) -> String {
    let sign = if offset < 0 { '-' } else { '+' };
    let abs = offset.unsigned_abs();
    let (hours, minutes, seconds) = (abs / 3600, (abs / 60) % 60, abs % 60);
    if seconds != 0 {
        format!("{}{:02}:{:02}:{:02}", sign, hours, minutes, seconds)
    } else if minutes != 0 {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        format!("{}{:02}", sign, hours)
    }
}

/// Render an unscaled decimal with its scale
pub fn format_decimal(value: i128, scale: u8) -> String {
    if scale == 0 {
        return value.to_string();
    }
    let divisor = 10_u128.pow(scale as u32);
    let magnitude = value.unsigned_abs();
    let sign = if value < 0 { "-" } else { "" };
    format!(
        "{}{}.{:0width$}",
        sign,
        magnitude / divisor,
        magnitude % divisor,
        width = scale as usize
    )
}

/// Render blob bytes, escaping anything that is not printable ASCII as `\xNN`
pub fn format_blob(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for &byte in bytes {
        if (32..127).contains(&byte) && byte != b'\\' && byte != b'\'' && byte != b'"' {
            text.push(byte as char);
        } else {
            text.push_str(&format!("\\x{:02X}", byte));
        }
    }
    text
}

/// Render an interval the way the engine prints it
pub fn format_interval(months: i32, days: i32, micros: i64) -> String {
    let mut parts = Vec::new();
    let (years, months) = (months / 12, months % 12);
    if years != 0 {
        parts.push(format!("{} year{}", years, if years.unsigned_abs() == 1 { "" } else { "s" }));
    }
    if months != 0 {
        parts.push(format!("{} month{}", months, if months.unsigned_abs() == 1 { "" } else { "s" }));
    }
    if days != 0 {
        parts.push(format!("{} day{}", days, if days.unsigned_abs() == 1 { "" } else { "s" }));
    }
    if micros != 0 || parts.is_empty() {
        let sign = if micros < 0 { "-" } else { "" };
        parts.push(format!("{}{}", sign, format_duration(micros.unsigned_abs())));
    }
    parts.join(" ")
}

fn write_list(f: &mut fmt::Formatter<'_>, values: &[Value]) -> fmt::Result {
    write!(f, "[")?;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", value)?;
    }
    write!(f, "]")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::TinyInt(value) => write!(f, "{}", value),
            Value::SmallInt(value) => write!(f, "{}", value),
            Value::Integer(value) => write!(f, "{}", value),
            Value::BigInt(value) => write!(f, "{}", value),
            Value::HugeInt(value) => write!(f, "{}", value),
            Value::UTinyInt(value) => write!(f, "{}", value),
            Value::USmallInt(value) => write!(f, "{}", value),
            Value::UInteger(value) => write!(f, "{}", value),
            Value::UBigInt(value) => write!(f, "{}", value),
            Value::UHugeInt(value) => write!(f, "{}", value),
            Value::Float(value) => write!(f, "{}", value),
            Value::Double(value) => write!(f, "{}", value),
            Value::Decimal { value, scale, .. } => write!(f, "{}", format_decimal(*value, *scale)),
            Value::Varchar(value) | Value::Enum(value) => write!(f, "{}", value),
            Value::Blob(bytes) => write!(f, "{}", format_blob(bytes)),
            Value::Bit(bits) => {
                for bit in bits {
                    write!(f, "{}", if *bit { '1' } else { '0' })?;
                }
                Ok(())
            }
            Value::Date(days) => match date_from_days(*days) {
                Some(date) => write!(f, "{}", date.format("%Y-%m-%d")),
                None => write!(f, "{} (out of range)", days),
            },
            Value::Time(micros) => write!(f, "{}", format_time(*micros)),
            Value::TimeTz { micros, offset } => {
                write!(f, "{}{}", format_time(*micros), format_offset(*offset))
            }
            Value::Timestamp(micros) => write!(f, "{}", format_timestamp(*micros, 1_000_000)),
            Value::TimestampS(secs) => write!(f, "{}", format_timestamp(*secs, 1)),
            Value::TimestampMs(millis) => write!(f, "{}", format_timestamp(*millis, 1_000)),
            Value::TimestampNs(nanos) => write!(f, "{}", format_timestamp(*nanos, 1_000_000_000)),
            Value::TimestampTz(micros) => {
                write!(f, "{}+00", format_timestamp(*micros, 1_000_000))
            }
            Value::Interval {
                months,
                days,
                micros,
            } => write!(f, "{}", format_interval(*months, *days, *micros)),
            Value::Uuid(uuid) => write!(f, "{}", uuid),
            Value::List(values) | Value::Array(values) => write_list(f, values),
            Value::Struct(fields) => {
                write!(f, "{{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "'{}': {}", name, value)?;
                }
                write!(f, "}}")
            }
            Value::Map(pairs) => {
                write!(f, "{{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}={}", key, value)?;
                }
                write!(f, "}}")
            }
            Value::Union { value, .. } => write!(f, "{}", value),
        }
    }
}
