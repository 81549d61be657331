//! Constants used throughout duckchunk

/// Default vector size: the number of rows a data chunk is allocated for
pub const STANDARD_VECTOR_SIZE: usize = 2048;

/// Upper bound accepted for a configured vector size
pub const MAX_VECTOR_SIZE: usize = 1 << 20;

/// Maximum number of elements per row of an ARRAY type
pub const MAX_ARRAY_SIZE: usize = 100_000;

/// Maximum decimal width (digits)
pub const MAX_DECIMAL_WIDTH: u8 = 38;

/// Maximum number of members in a UNION type (the tag is a UTINYINT)
pub const MAX_UNION_MEMBERS: usize = u8::MAX as usize;

/// Size of a string record in a VARCHAR/BLOB/BIT vector
pub const STRING_RECORD_SIZE: usize = 16;

/// Strings up to this many bytes are stored inside the record itself
pub const STRING_INLINE_LENGTH: usize = 12;

/// Size of a list entry (`u64` offset + `u64` length)
pub const LIST_ENTRY_SIZE: usize = 16;

/// Largest encodable TIME WITH TIME ZONE offset in seconds (15:59:59)
pub const MAX_TZ_OFFSET: i32 = 16 * 60 * 60 - 1;
