//! Type system module
//!
//! This module contains the core type system components:
//! - TypeId: The engine's type identifiers and their numeric codes
//! - LogicalType: Type descriptions including every layout parameter
//! - Value: Single decoded values
//! - Vector: Columnar buffers with validity masks
//! - DataChunk: Collections of vectors for batch transfer

pub mod data_chunk;
pub mod logical_type;
pub mod type_id;
pub mod value;
pub mod vector;

// Re-export main types for convenience
pub use data_chunk::{DataChunk, RowIterator};
pub use logical_type::{decimal_internal_type, enum_internal_type, LogicalType, TypeKind};
pub use type_id::TypeId;
pub use value::Value;
pub use vector::{ValidityMask, Vector};
