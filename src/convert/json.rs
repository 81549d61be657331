//! JSON conversion in both directions
//!
//! Values that JSON numbers cannot hold exactly (64 and 128-bit integers,
//! decimals) become strings. Temporal values become ISO-8601 text.

use super::{RowConverter, ValueConverter};
use crate::common::config::ChunkConfig;
use crate::common::constants::MAX_TZ_OFFSET;
use crate::common::error::{DuckChunkError, DuckChunkResult};
use crate::types::data_chunk::DataChunk;
use crate::types::logical_type::{LogicalType, TypeKind};
use crate::types::type_id::TypeId;
use crate::types::value::{format_blob, format_time, timestamp_from_ticks, Value};
use crate::{invalid_param, invalid_value};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde_json::{json, Map, Number, Value as Json};

/// Converts each value to a JSON value
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonValueConverter;

impl ValueConverter for JsonValueConverter {
    type Output = Json;

    fn convert_value(&self, value: Value, logical_type: &LogicalType) -> DuckChunkResult<Json> {
        to_json(value, logical_type)
    }
}

/// Converts each row to a JSON object keyed by column name
#[derive(Debug, Clone, Default)]
pub struct JsonObjectRows {
    names: Vec<String>,
}

impl JsonObjectRows {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Name columns `column0`, `column1`, ...
    pub fn numbered(columns: usize) -> Self {
        Self::new((0..columns).map(|i| format!("column{}", i)))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl RowConverter for JsonObjectRows {
    type Output = Json;

    fn convert_row(&self, row: Vec<Value>, types: &[&LogicalType]) -> DuckChunkResult<Json> {
        if row.len() != self.names.len() || types.len() != self.names.len() {
            return Err(invalid_param!(
                "Row has {} values but {} column names",
                row.len(),
                self.names.len()
            ));
        }
        let mut object = Map::with_capacity(row.len());
        for ((name, value), logical_type) in self.names.iter().zip(row).zip(types) {
            object.insert(name.clone(), to_json(value, logical_type)?);
        }
        Ok(Json::Object(object))
    }
}

fn float_to_json(value: f64) -> Json {
    match Number::from_f64(value) {
        Some(number) => Json::Number(number),
        None if value.is_nan() => Json::String("NaN".into()),
        None if value > 0.0 => Json::String("Infinity".into()),
        None => Json::String("-Infinity".into()),
    }
}

/// Widen through the shortest decimal text so `0.1f32` stays `0.1`
fn widen_float(value: f32) -> f64 {
    value.to_string().parse().unwrap_or(value as f64)
}

fn iso_timestamp(ticks: i64, units_per_second: i64) -> DuckChunkResult<String> {
    timestamp_from_ticks(ticks, units_per_second)
        .map(|ts| ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
        .ok_or_else(|| invalid_value!("timestamp {} is out of range", ticks))
}

fn to_json(value: Value, logical_type: &LogicalType) -> DuckChunkResult<Json> {
    Ok(match value {
        Value::Null => Json::Null,
        Value::Boolean(v) => Json::Bool(v),
        Value::TinyInt(v) => json!(v),
        Value::SmallInt(v) => json!(v),
        Value::Integer(v) => json!(v),
        Value::UTinyInt(v) => json!(v),
        Value::USmallInt(v) => json!(v),
        Value::UInteger(v) => json!(v),
        Value::Float(v) => float_to_json(widen_float(v)),
        Value::Double(v) => float_to_json(v),
        value @ (Value::BigInt(_)
        | Value::HugeInt(_)
        | Value::UBigInt(_)
        | Value::UHugeInt(_)
        | Value::Decimal { .. }
        | Value::Uuid(_)
        | Value::Bit(_)
        | Value::Date(_)
        | Value::TimeTz { .. }) => Json::String(value.to_string()),
        Value::Varchar(text) | Value::Enum(text) => Json::String(text),
        Value::Blob(bytes) => Json::String(format_blob(&bytes)),
        Value::Time(micros) => Json::String(format_time(micros)),
        Value::Timestamp(micros) => Json::String(iso_timestamp(micros, 1_000_000)?),
        Value::TimestampS(secs) => Json::String(iso_timestamp(secs, 1)?),
        Value::TimestampMs(millis) => Json::String(iso_timestamp(millis, 1_000)?),
        Value::TimestampNs(nanos) => Json::String(iso_timestamp(nanos, 1_000_000_000)?),
        Value::TimestampTz(micros) => Json::String(format!("{}Z", iso_timestamp(micros, 1_000_000)?)),
        Value::Interval {
            months,
            days,
            micros,
        } => json!({ "months": months, "days": days, "micros": micros }),
        Value::List(elements) | Value::Array(elements) => {
            let child = match logical_type.kind() {
                TypeKind::Array { .. } => logical_type.array_child_type()?,
                _ => logical_type.list_child_type()?,
            };
            Json::Array(
                elements
                    .into_iter()
                    .map(|element| to_json(element, &child))
                    .collect::<DuckChunkResult<_>>()?,
            )
        }
        Value::Map(pairs) => {
            let key_type = logical_type.map_key_type()?;
            let value_type = logical_type.map_value_type()?;
            Json::Array(
                pairs
                    .into_iter()
                    .map(|(key, item)| {
                        Ok(json!({
                            "key": to_json(key, &key_type)?,
                            "value": to_json(item, &value_type)?,
                        }))
                    })
                    .collect::<DuckChunkResult<_>>()?,
            )
        }
        Value::Struct(fields) => {
            let mut object = Map::with_capacity(fields.len());
            for (i, (name, field)) in fields.into_iter().enumerate() {
                let field_type = logical_type.struct_child_type(i)?;
                object.insert(name, to_json(field, &field_type)?);
            }
            Json::Object(object)
        }
        Value::Union { tag, value } => {
            let index = tag as usize;
            json!({
                "tag": logical_type.union_member_name(index)?,
                "value": to_json(*value, &logical_type.union_member_type(index)?)?,
            })
        }
    })
}

fn expected(what: &str, logical_type: &LogicalType, json: &Json) -> DuckChunkError {
    invalid_value!("expected {} for {}, got {}", what, logical_type, json)
}

fn json_integer(json: &Json, logical_type: &LogicalType) -> DuckChunkResult<i128> {
    let parsed = match json {
        Json::Number(number) => number
            .as_i64()
            .map(i128::from)
            .or_else(|| number.as_u64().map(i128::from)),
        Json::String(text) => text.trim().parse::<i128>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| expected("an integer", logical_type, json))
}

fn fit<T: TryFrom<i128>>(value: i128, logical_type: &LogicalType) -> DuckChunkResult<T> {
    T::try_from(value).map_err(|_| invalid_value!("{} is out of range for {}", value, logical_type))
}

fn json_float(json: &Json, logical_type: &LogicalType) -> DuckChunkResult<f64> {
    match json {
        Json::Number(number) => number.as_f64(),
        Json::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| expected("a number", logical_type, json))
}

fn json_str<'a>(json: &'a Json, logical_type: &LogicalType) -> DuckChunkResult<&'a str> {
    json.as_str()
        .ok_or_else(|| expected("a string", logical_type, json))
}

/// Ticks since the epoch for ISO-8601 text, a bare date, or a plain number
fn json_timestamp(
    json: &Json,
    logical_type: &LogicalType,
    units_per_second: i64,
) -> DuckChunkResult<i64> {
    if let Json::Number(_) = json {
        return fit(json_integer(json, logical_type)?, logical_type);
    }
    let text = json_str(json, logical_type)?.trim();
    let text = text
        .strip_suffix('Z')
        .or_else(|| text.strip_suffix("+00"))
        .unwrap_or(text);
    let timestamp = NaiveDateTime::parse_from_str(&text.replacen(' ', "T", 1), "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d").map(|date| date.and_time(NaiveTime::default()))
        })
        .map_err(|e| invalid_value!("cannot parse '{}' as {}: {}", text, logical_type, e))?
        .and_utc();
    let nanos_per_tick = 1_000_000_000 / units_per_second;
    timestamp
        .timestamp()
        .checked_mul(units_per_second)
        .and_then(|ticks| ticks.checked_add(timestamp.timestamp_subsec_nanos() as i64 / nanos_per_tick))
        .ok_or_else(|| invalid_value!("'{}' is out of range for {}", text, logical_type))
}

fn parse_time(text: &str, logical_type: &LogicalType) -> DuckChunkResult<i64> {
    let time = NaiveTime::parse_from_str(text, "%H:%M:%S%.f")
        .map_err(|e| invalid_value!("cannot parse '{}' as {}: {}", text, logical_type, e))?;
    Ok(time.num_seconds_from_midnight() as i64 * 1_000_000 + (time.nanosecond() / 1_000) as i64)
}

/// Offsets look like `+HH`, `-HH:MM` or `+HH:MM:SS`
fn parse_offset(text: &str, logical_type: &LogicalType) -> DuckChunkResult<i32> {
    let bad = || invalid_value!("cannot parse offset '{}' for {}", text, logical_type);
    let (sign, rest) = if let Some(rest) = text.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = text.strip_prefix('-') {
        (-1, rest)
    } else {
        return Err(bad());
    };
    let parts: Vec<&str> = rest.split(':').collect();
    if parts.len() > 3 {
        return Err(bad());
    }
    let mut seconds: i32 = 0;
    for (i, (part, unit)) in parts.iter().zip([3600, 60, 1]).enumerate() {
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
            return Err(bad());
        }
        let part: i32 = part.parse().map_err(|_| bad())?;
        if i > 0 && part >= 60 {
            return Err(bad());
        }
        seconds = part
            .checked_mul(unit)
            .and_then(|value| seconds.checked_add(value))
            .ok_or_else(bad)?;
    }
    if seconds > MAX_TZ_OFFSET {
        return Err(bad());
    }
    Ok(sign * seconds)
}

/// Unscaled integer for decimal text at the given scale, rounding half away from zero
fn parse_decimal(text: &str, scale: u8, logical_type: &LogicalType) -> DuckChunkResult<i128> {
    let bad = || invalid_value!("cannot parse '{}' as {}", text, logical_type);
    if text.contains(|c| c == 'e' || c == 'E') {
        let float: f64 = text.parse().map_err(|_| bad())?;
        return Ok((float * 10_f64.powi(scale as i32)).round() as i128);
    }
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    if (whole.is_empty() && fraction.is_empty())
        || !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit())
    {
        return Err(bad());
    }
    let mut unscaled: i128 = 0;
    let mut fraction_digits = fraction.chars();
    let digits = whole
        .chars()
        .chain((0..scale).map(|_| fraction_digits.next().unwrap_or('0')));
    for digit in digits {
        unscaled = unscaled
            .checked_mul(10)
            .and_then(|v| v.checked_add(digit as i128 - '0' as i128))
            .ok_or_else(bad)?;
    }
    if fraction_digits.next().is_some_and(|next| next >= '5') {
        unscaled = unscaled.checked_add(1).ok_or_else(bad)?;
    }
    Ok(if negative { -unscaled } else { unscaled })
}

fn parse_blob(text: &str, logical_type: &LogicalType) -> DuckChunkResult<Vec<u8>> {
    let mut bytes = Vec::with_capacity(text.len());
    let mut rest = text.as_bytes();
    while let Some((&byte, tail)) = rest.split_first() {
        if byte == b'\\' && tail.first() == Some(&b'x') && tail.len() >= 3 {
            let hex = std::str::from_utf8(&tail[1..3]).unwrap_or("");
            let decoded = u8::from_str_radix(hex, 16)
                .map_err(|_| invalid_value!("invalid escape in '{}' for {}", text, logical_type))?;
            bytes.push(decoded);
            rest = &tail[3..];
        } else {
            bytes.push(byte);
            rest = tail;
        }
    }
    Ok(bytes)
}

/// Build a value of the given type from JSON, for populating vectors.
///
/// JSON `null` is NULL for every type. Numbers and strings are accepted for
/// numeric types, arrays for LIST and ARRAY, objects (or positional arrays)
/// for STRUCT, `{key, value}` arrays or plain objects for MAP, and
/// `{tag, value}` objects for UNION where the tag is a member name or index.
pub fn value_from_json(json: &Json, logical_type: &LogicalType) -> DuckChunkResult<Value> {
    if json.is_null() {
        return Ok(Value::Null);
    }
    match logical_type.kind() {
        TypeKind::Primitive(id) => primitive_from_json(*id, json, logical_type),
        TypeKind::Decimal { width, scale, .. } => {
            let unscaled = match json {
                Json::Number(number) => parse_decimal(&number.to_string(), *scale, logical_type)?,
                Json::String(text) => parse_decimal(text.trim(), *scale, logical_type)?,
                _ => return Err(expected("a number", logical_type, json)),
            };
            Ok(Value::Decimal {
                value: unscaled,
                width: *width,
                scale: *scale,
            })
        }
        TypeKind::Enum { dictionary, .. } => {
            let member = match json {
                Json::String(text) => dictionary.iter().find(|member| *member == text),
                Json::Number(number) => number
                    .as_u64()
                    .and_then(|index| dictionary.get(index as usize)),
                _ => return Err(expected("a string", logical_type, json)),
            };
            member
                .map(|member| Value::Enum(member.clone()))
                .ok_or_else(|| invalid_value!("{} is not a member of {}", json, logical_type))
        }
        TypeKind::List(child) => {
            let elements = json
                .as_array()
                .ok_or_else(|| expected("an array", logical_type, json))?;
            Ok(Value::List(
                elements
                    .iter()
                    .map(|element| value_from_json(element, child))
                    .collect::<DuckChunkResult<_>>()?,
            ))
        }
        TypeKind::Array { child, size } => {
            let elements = json
                .as_array()
                .ok_or_else(|| expected("an array", logical_type, json))?;
            if elements.len() != *size {
                return Err(invalid_value!(
                    "{} needs {} elements, got {}",
                    logical_type,
                    size,
                    elements.len()
                ));
            }
            Ok(Value::Array(
                elements
                    .iter()
                    .map(|element| value_from_json(element, child))
                    .collect::<DuckChunkResult<_>>()?,
            ))
        }
        TypeKind::Map { key, value } => {
            let pairs = match json {
                Json::Object(object) => object
                    .iter()
                    .map(|(k, v)| {
                        Ok((
                            value_from_json(&Json::String(k.clone()), key)?,
                            value_from_json(v, value)?,
                        ))
                    })
                    .collect::<DuckChunkResult<Vec<_>>>()?,
                Json::Array(entries) => entries
                    .iter()
                    .map(|entry| {
                        let k = entry
                            .get("key")
                            .ok_or_else(|| expected("a {key, value} entry", logical_type, entry))?;
                        let v = entry.get("value").unwrap_or(&Json::Null);
                        Ok((value_from_json(k, key)?, value_from_json(v, value)?))
                    })
                    .collect::<DuckChunkResult<Vec<_>>>()?,
                _ => return Err(expected("an object", logical_type, json)),
            };
            Ok(Value::Map(pairs))
        }
        TypeKind::Struct(fields) => {
            let values = match json {
                Json::Object(object) => {
                    if let Some(unknown) = object
                        .keys()
                        .find(|k| !fields.iter().any(|(name, _)| name.eq_ignore_ascii_case(k)))
                    {
                        return Err(invalid_value!("{} has no field '{}'", logical_type, unknown));
                    }
                    fields
                        .iter()
                        .map(|(name, field_type)| {
                            let field = object
                                .iter()
                                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                                .map(|(_, v)| v)
                                .unwrap_or(&Json::Null);
                            Ok((name.clone(), value_from_json(field, field_type)?))
                        })
                        .collect::<DuckChunkResult<Vec<_>>>()?
                }
                Json::Array(elements) if elements.len() == fields.len() => fields
                    .iter()
                    .zip(elements)
                    .map(|((name, field_type), field)| {
                        Ok((name.clone(), value_from_json(field, field_type)?))
                    })
                    .collect::<DuckChunkResult<Vec<_>>>()?,
                _ => return Err(expected("an object", logical_type, json)),
            };
            Ok(Value::Struct(values))
        }
        TypeKind::Union(members) => {
            let tag = json
                .get("tag")
                .ok_or_else(|| expected("a {tag, value} object", logical_type, json))?;
            let index = match tag {
                Json::String(name) => members
                    .iter()
                    .position(|(member, _)| member.eq_ignore_ascii_case(name)),
                Json::Number(number) => number
                    .as_u64()
                    .map(|index| index as usize)
                    .filter(|index| *index < members.len()),
                _ => None,
            }
            .ok_or_else(|| invalid_value!("{} is not a member of {}", tag, logical_type))?;
            let inner = json.get("value").unwrap_or(&Json::Null);
            Ok(Value::Union {
                tag: fit(index as i128, logical_type)?,
                value: Box::new(value_from_json(inner, &members[index].1)?),
            })
        }
    }
}

/// Load a JSON array of rows into chunks, starting a new chunk whenever the
/// current one is full. Rows are arrays in column order or objects keyed by
/// column name; missing object keys are NULL.
pub fn chunks_from_json(
    rows: &Json,
    types: &[LogicalType],
    names: &[String],
    config: &ChunkConfig,
) -> DuckChunkResult<Vec<DataChunk>> {
    if names.len() != types.len() {
        return Err(invalid_param!(
            "{} column names for {} column types",
            names.len(),
            types.len()
        ));
    }
    let rows = rows
        .as_array()
        .ok_or_else(|| invalid_value!("expected a JSON array of rows"))?;

    let mut chunks = Vec::new();
    let mut chunk = DataChunk::with_config(types, config)?;
    for (index, row) in rows.iter().enumerate() {
        let cells: Vec<&Json> = match row {
            Json::Array(cells) if cells.len() == types.len() => cells.iter().collect(),
            Json::Object(object) => names
                .iter()
                .map(|name| object.get(name).unwrap_or(&Json::Null))
                .collect(),
            _ => {
                return Err(invalid_value!(
                    "row {} must be an array of {} values or an object",
                    index,
                    types.len()
                ))
            }
        };
        let values = cells
            .into_iter()
            .zip(types)
            .map(|(cell, logical_type)| value_from_json(cell, logical_type))
            .collect::<DuckChunkResult<Vec<_>>>()?;
        if chunk.row_count() == chunk.capacity() {
            let full = std::mem::replace(&mut chunk, DataChunk::with_config(types, config)?);
            chunks.push(full);
        }
        chunk.append_row(&values)?;
    }
    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    tracing::debug!(rows = rows.len(), chunks = chunks.len(), "loaded JSON rows");
    Ok(chunks)
}

fn primitive_from_json(id: TypeId, json: &Json, logical_type: &LogicalType) -> DuckChunkResult<Value> {
    Ok(match id {
        TypeId::Boolean => match json {
            Json::Bool(v) => Value::Boolean(*v),
            _ => return Err(expected("a boolean", logical_type, json)),
        },
        TypeId::TinyInt => Value::TinyInt(fit(json_integer(json, logical_type)?, logical_type)?),
        TypeId::SmallInt => Value::SmallInt(fit(json_integer(json, logical_type)?, logical_type)?),
        TypeId::Integer => Value::Integer(fit(json_integer(json, logical_type)?, logical_type)?),
        TypeId::BigInt => Value::BigInt(fit(json_integer(json, logical_type)?, logical_type)?),
        TypeId::HugeInt => Value::HugeInt(json_integer(json, logical_type)?),
        TypeId::UTinyInt => Value::UTinyInt(fit(json_integer(json, logical_type)?, logical_type)?),
        TypeId::USmallInt => {
            Value::USmallInt(fit(json_integer(json, logical_type)?, logical_type)?)
        }
        TypeId::UInteger => Value::UInteger(fit(json_integer(json, logical_type)?, logical_type)?),
        TypeId::UBigInt => Value::UBigInt(fit(json_integer(json, logical_type)?, logical_type)?),
        TypeId::UHugeInt => match json {
            Json::String(text) => Value::UHugeInt(
                text.trim()
                    .parse()
                    .map_err(|_| expected("an unsigned integer", logical_type, json))?,
            ),
            _ => Value::UHugeInt(fit(json_integer(json, logical_type)?, logical_type)?),
        },
        TypeId::Float => Value::Float(json_float(json, logical_type)? as f32),
        TypeId::Double => Value::Double(json_float(json, logical_type)?),
        TypeId::Varchar => Value::Varchar(json_str(json, logical_type)?.to_string()),
        TypeId::Blob => Value::Blob(parse_blob(json_str(json, logical_type)?, logical_type)?),
        TypeId::Bit => Value::Bit(
            json_str(json, logical_type)?
                .chars()
                .map(|c| match c {
                    '0' => Ok(false),
                    '1' => Ok(true),
                    _ => Err(expected("a bit string", logical_type, json)),
                })
                .collect::<DuckChunkResult<_>>()?,
        ),
        TypeId::Date => match json {
            Json::Number(_) => Value::Date(fit(json_integer(json, logical_type)?, logical_type)?),
            _ => {
                let text = json_str(json, logical_type)?.trim();
                let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|e| {
                    invalid_value!("cannot parse '{}' as {}: {}", text, logical_type, e)
                })?;
                let days = date.signed_duration_since(NaiveDate::default()).num_days();
                Value::Date(fit(days as i128, logical_type)?)
            }
        },
        TypeId::Time => match json {
            Json::Number(_) => Value::Time(fit(json_integer(json, logical_type)?, logical_type)?),
            _ => Value::Time(parse_time(json_str(json, logical_type)?.trim(), logical_type)?),
        },
        TypeId::TimeTz => {
            let text = json_str(json, logical_type)?.trim();
            let split = text
                .rfind(|c| c == '+' || c == '-')
                .ok_or_else(|| expected("a time with offset", logical_type, json))?;
            Value::TimeTz {
                micros: parse_time(&text[..split], logical_type)?,
                offset: parse_offset(&text[split..], logical_type)?,
            }
        }
        TypeId::Timestamp => Value::Timestamp(json_timestamp(json, logical_type, 1_000_000)?),
        TypeId::TimestampS => Value::TimestampS(json_timestamp(json, logical_type, 1)?),
        TypeId::TimestampMs => Value::TimestampMs(json_timestamp(json, logical_type, 1_000)?),
        TypeId::TimestampNs => {
            Value::TimestampNs(json_timestamp(json, logical_type, 1_000_000_000)?)
        }
        TypeId::TimestampTz => Value::TimestampTz(json_timestamp(json, logical_type, 1_000_000)?),
        TypeId::Interval => {
            let object = json
                .as_object()
                .ok_or_else(|| expected("a {months, days, micros} object", logical_type, json))?;
            let part = |name: &str| -> DuckChunkResult<i128> {
                object
                    .get(name)
                    .map(|v| json_integer(v, logical_type))
                    .unwrap_or(Ok(0))
            };
            Value::Interval {
                months: fit(part("months")?, logical_type)?,
                days: fit(part("days")?, logical_type)?,
                micros: fit(part("micros")?, logical_type)?,
            }
        }
        TypeId::Uuid => Value::Uuid(
            uuid::Uuid::parse_str(json_str(json, logical_type)?.trim())
                .map_err(|e| invalid_value!("invalid UUID for {}: {}", logical_type, e))?,
        ),
        other => return Err(DuckChunkError::mismatch("a type with JSON input", other)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn to(value: Value, logical_type: &LogicalType) -> Json {
        JsonValueConverter.convert_value(value, logical_type).unwrap()
    }

    fn from(text: &str, logical_type: &LogicalType) -> Value {
        value_from_json(&serde_json::from_str(text).unwrap(), logical_type).unwrap()
    }

    #[test]
    fn test_scalar_json() {
        let integer = LogicalType::integer();
        assert_eq!(to(Value::Null, &integer), Json::Null);
        assert_eq!(to(Value::Integer(-4), &integer), json!(-4));
        assert_eq!(
            to(Value::BigInt(1 << 60), &LogicalType::bigint()),
            json!("1152921504606846976")
        );
        assert_eq!(
            to(Value::decimal(-12345, 18, 3), &LogicalType::decimal(18, 3).unwrap()),
            json!("-12.345")
        );
        assert_eq!(to(Value::Double(f64::NAN), &LogicalType::double()), json!("NaN"));
        assert_eq!(
            to(Value::Double(f64::NEG_INFINITY), &LogicalType::double()),
            json!("-Infinity")
        );
        assert_eq!(
            to(Value::Date(19_000), &LogicalType::primitive(TypeId::Date).unwrap()),
            json!("2022-01-08")
        );
        assert_eq!(
            to(
                Value::Timestamp(1_500_000),
                &LogicalType::primitive(TypeId::Timestamp).unwrap()
            ),
            json!("1970-01-01T00:00:01.500")
        );
        assert_eq!(
            to(
                Value::TimestampTz(0),
                &LogicalType::primitive(TypeId::TimestampTz).unwrap()
            ),
            json!("1970-01-01T00:00:00Z")
        );
        assert_eq!(
            to(
                Value::Interval {
                    months: 1,
                    days: 2,
                    micros: 3
                },
                &LogicalType::primitive(TypeId::Interval).unwrap()
            ),
            json!({"months": 1, "days": 2, "micros": 3})
        );
    }

    #[test]
    fn test_nested_json() {
        let map = LogicalType::map(&LogicalType::varchar(), &LogicalType::integer());
        assert_eq!(
            to(
                Value::Map(vec![(Value::varchar("a"), Value::Integer(1))]),
                &map
            ),
            json!([{"key": "a", "value": 1}])
        );

        let union = LogicalType::union_type([
            ("num", LogicalType::integer()),
            ("str", LogicalType::varchar()),
        ])
        .unwrap();
        let value = Value::Union {
            tag: 1,
            value: Box::new(Value::varchar("x")),
        };
        assert_eq!(to(value.clone(), &union), json!({"tag": "str", "value": "x"}));
        assert_eq!(from(r#"{"tag": "str", "value": "x"}"#, &union), value);
        assert_eq!(from(r#"{"tag": 1, "value": "x"}"#, &union), value);

        let point = LogicalType::struct_type([
            ("x", LogicalType::integer()),
            ("tags", LogicalType::list(&LogicalType::varchar())),
        ])
        .unwrap();
        let value = Value::Struct(vec![
            ("x".into(), Value::Integer(1)),
            ("tags".into(), Value::List(vec![Value::varchar("a")])),
        ]);
        assert_eq!(to(value.clone(), &point), json!({"x": 1, "tags": ["a"]}));
        assert_eq!(from(r#"{"x": 1, "tags": ["a"]}"#, &point), value);
        assert_eq!(from(r#"[1, ["a"]]"#, &point), value);
    }

    #[test]
    fn test_object_rows() {
        let converter = JsonObjectRows::new(["id", "name"]);
        let integer = LogicalType::integer();
        let varchar = LogicalType::varchar();
        let row = converter
            .convert_row(
                vec![Value::Integer(7), Value::Null],
                &[&integer, &varchar],
            )
            .unwrap();
        assert_eq!(row, json!({"id": 7, "name": null}));
        assert!(converter
            .convert_row(vec![Value::Integer(7)], &[&integer])
            .is_err());
        assert_eq!(JsonObjectRows::numbered(2).names(), ["column0", "column1"]);
    }

    #[test]
    fn test_chunks_from_json_splits_at_capacity() {
        let types = [LogicalType::integer(), LogicalType::varchar()];
        let names = ["id".to_string(), "name".to_string()];
        let config = ChunkConfig::with_vector_size(2).unwrap();
        let rows = json!([[1, "a"], {"id": 2}, [3, "c"]]);
        let chunks = chunks_from_json(&rows, &types, &names, &config).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].row_count(), 2);
        assert_eq!(
            chunks[0].get_row_values(1).unwrap(),
            vec![Value::Integer(2), Value::Null]
        );
        assert_eq!(
            chunks[1].get_row_values(0).unwrap(),
            vec![Value::Integer(3), Value::varchar("c")]
        );

        assert!(chunks_from_json(&json!([[1]]), &types, &names, &config).is_err());
        assert!(chunks_from_json(&json!({}), &types, &names, &config).is_err());
        assert!(chunks_from_json(&json!([]), &types, &names, &config)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_values_from_json() {
        assert_eq!(from("42", &LogicalType::integer()), Value::Integer(42));
        assert_eq!(from("\"42\"", &LogicalType::bigint()), Value::BigInt(42));
        assert!(value_from_json(&json!(300), &LogicalType::utinyint()).is_err());
        assert!(value_from_json(&json!("x"), &LogicalType::integer()).is_err());

        let decimal = LogicalType::decimal(9, 2).unwrap();
        assert_eq!(from("1.005", &decimal), Value::decimal(101, 9, 2));
        assert_eq!(from("\"-3.1\"", &decimal), Value::decimal(-310, 9, 2));
        assert_eq!(from("7", &decimal), Value::decimal(700, 9, 2));

        let date = LogicalType::primitive(TypeId::Date).unwrap();
        assert_eq!(from("\"1969-12-31\"", &date), Value::Date(-1));

        let timestamp = LogicalType::primitive(TypeId::TimestampMs).unwrap();
        assert_eq!(
            from("\"1970-01-01 00:00:01.5\"", &timestamp),
            Value::TimestampMs(1_500)
        );
        assert_eq!(from("\"1970-01-02\"", &timestamp), Value::TimestampMs(86_400_000));

        let time_tz = LogicalType::primitive(TypeId::TimeTz).unwrap();
        assert_eq!(
            from("\"01:00:00-05:30\"", &time_tz),
            Value::TimeTz {
                micros: 3_600_000_000,
                offset: -(5 * 3600 + 30 * 60)
            }
        );

        let blob = LogicalType::primitive(TypeId::Blob).unwrap();
        assert_eq!(from(r#""a\\x00\\xFF""#, &blob), Value::Blob(vec![b'a', 0, 255]));

        let mood = LogicalType::enumeration(["sad", "happy"]).unwrap();
        assert_eq!(from("\"happy\"", &mood), Value::Enum("happy".into()));
        assert!(value_from_json(&json!("angry"), &mood).is_err());

        let map = LogicalType::map(&LogicalType::integer(), &LogicalType::varchar());
        assert_eq!(
            from(r#"{"1": "one"}"#, &map),
            Value::Map(vec![(Value::Integer(1), Value::varchar("one"))])
        );

        let array = LogicalType::array(&LogicalType::integer(), 2).unwrap();
        assert!(value_from_json(&json!([1]), &array).is_err());
        assert_eq!(from("null", &array), Value::Null);
    }

    #[test]
    fn test_offsets_from_json() {
        let time_tz = LogicalType::primitive(TypeId::TimeTz).unwrap();
        assert_eq!(
            from("\"12:00:00+15:59:59\"", &time_tz),
            Value::TimeTz {
                micros: 43_200_000_000,
                offset: MAX_TZ_OFFSET
            }
        );
        assert_eq!(
            from("\"00:00:00-03\"", &time_tz),
            Value::TimeTz {
                micros: 0,
                offset: -3 * 3600
            }
        );
        for bad in [
            "01:00:00+9999999",
            "01:00:00+2147483647",
            "01:00:00+16",
            "01:00:00+01:60",
            "01:00:00+01:00:60",
            "01:00:00+01:00:00:00",
            "01:00:00+",
            "01:00:00+01::00",
        ] {
            assert!(
                matches!(
                    value_from_json(&json!(bad), &time_tz),
                    Err(DuckChunkError::InvalidValue(_))
                ),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_float_keeps_its_shortest_form() {
        let float = LogicalType::primitive(TypeId::Float).unwrap();
        assert_eq!(
            to(Value::Float(0.1), &float),
            json!(0.1)
        );
        assert_eq!(
            to(Value::Float(f32::INFINITY), &float),
            json!("Infinity")
        );
        assert_eq!(
            to(Value::Float(f32::NAN), &float),
            json!("NaN")
        );
    }
}
