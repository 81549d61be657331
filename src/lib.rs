//! duckchunk - logical types and data chunks in the DuckDB vector layout
//!
//! Describe column types with [`LogicalType`], move batches of rows in a
//! [`DataChunk`] of [`Vector`]s, and turn the columnar data back into rows
//! with a pluggable [`convert::RowConverter`].

pub mod common;
pub mod convert;
pub mod types;

// Re-export common types for convenience
pub use common::{ChunkConfig, DuckChunkError, DuckChunkResult};

// Re-export type system for convenience
pub use types::{DataChunk, LogicalType, TypeId, TypeKind, ValidityMask, Value, Vector};

// Re-export conversion strategies for convenience
pub use convert::{
    chunks_from_json, convert_rows_from_chunks, from_fn, value_from_json, JsonObjectRows, JsonValueConverter,
    PerValue, PlainValues, RowConverter, ValueConverter,
};
