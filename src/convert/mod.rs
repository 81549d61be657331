//! Row conversion
//!
//! The same columnar data can be materialized into different target
//! representations. A [`ValueConverter`] turns one decoded value into the
//! target form; a [`RowConverter`] turns one decoded row. Every value
//! converter works as a row converter through [`PerValue`].

mod json;

pub use json::{chunks_from_json, value_from_json, JsonObjectRows, JsonValueConverter};

use crate::common::error::DuckChunkResult;
use crate::invalid_param;
use crate::types::{DataChunk, LogicalType, Value};

/// Converts a single value, given the logical type of the column it came from
pub trait ValueConverter {
    type Output;

    fn convert_value(&self, value: Value, logical_type: &LogicalType)
        -> DuckChunkResult<Self::Output>;
}

/// Converts a whole row, given the logical types of its columns
pub trait RowConverter {
    type Output;

    fn convert_row(&self, row: Vec<Value>, types: &[&LogicalType])
        -> DuckChunkResult<Self::Output>;
}

/// Row converter that applies a value converter to every column
#[derive(Debug, Clone, Copy, Default)]
pub struct PerValue<C>(pub C);

impl<C: ValueConverter> RowConverter for PerValue<C> {
    type Output = Vec<C::Output>;

    fn convert_row(&self, row: Vec<Value>, types: &[&LogicalType]) -> DuckChunkResult<Self::Output> {
        if row.len() != types.len() {
            return Err(invalid_param!(
                "Row has {} values but {} column types",
                row.len(),
                types.len()
            ));
        }
        row.into_iter()
            .zip(types)
            .map(|(value, logical_type)| self.0.convert_value(value, logical_type))
            .collect()
    }
}

/// Row converter backed by a closure, see [`from_fn`]
#[derive(Clone, Copy)]
pub struct FnRowConverter<F>(F);

/// Use a closure as a row converter
///
/// ```
/// use duckchunk::convert::{from_fn, RowConverter};
/// use duckchunk::{LogicalType, Value};
///
/// let count_nulls = from_fn(|row: Vec<Value>, _types: &[&LogicalType]| {
///     Ok(row.iter().filter(|value| value.is_null()).count())
/// });
/// let integer = LogicalType::integer();
/// let nulls = count_nulls
///     .convert_row(vec![Value::Null, Value::Integer(1)], &[&integer, &integer])
///     .unwrap();
/// assert_eq!(nulls, 1);
/// ```
pub fn from_fn<T, F>(convert: F) -> FnRowConverter<F>
where
    F: Fn(Vec<Value>, &[&LogicalType]) -> DuckChunkResult<T>,
{
    FnRowConverter(convert)
}

impl<T, F> RowConverter for FnRowConverter<F>
where
    F: Fn(Vec<Value>, &[&LogicalType]) -> DuckChunkResult<T>,
{
    type Output = T;

    fn convert_row(&self, row: Vec<Value>, types: &[&LogicalType]) -> DuckChunkResult<T> {
        (self.0)(row, types)
    }
}

/// Keeps decoded values as they are
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainValues;

impl ValueConverter for PlainValues {
    type Output = Value;

    fn convert_value(&self, value: Value, _logical_type: &LogicalType) -> DuckChunkResult<Value> {
        Ok(value)
    }
}

impl RowConverter for PlainValues {
    type Output = Vec<Value>;

    fn convert_row(&self, row: Vec<Value>, _types: &[&LogicalType]) -> DuckChunkResult<Vec<Value>> {
        Ok(row)
    }
}

/// Convert every row of every chunk, in chunk order and then row order.
/// Any failure aborts the whole conversion.
pub fn convert_rows_from_chunks<'a, I, R>(chunks: I, converter: &R) -> DuckChunkResult<Vec<R::Output>>
where
    I: IntoIterator<Item = &'a DataChunk>,
    R: RowConverter + ?Sized,
{
    let mut rows = Vec::new();
    let mut chunk_count = 0usize;
    for chunk in chunks {
        let types = chunk.column_type_refs();
        rows.reserve(chunk.row_count());
        for row in chunk.row_iter() {
            rows.push(converter.convert_row(row?, &types)?);
        }
        chunk_count += 1;
    }
    tracing::debug!(chunks = chunk_count, rows = rows.len(), "converted rows");
    Ok(rows)
}
