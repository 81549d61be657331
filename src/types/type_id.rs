use serde::{Deserialize, Serialize};
use std::fmt;

/// Type identifiers as the engine numbers them
/// The numeric codes are stable and match the engine's C API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u32)]
pub enum TypeId {
    /// Invalid/unknown type
    Invalid = 0,
    /// Boolean value
    Boolean = 1,
    /// 8-bit signed integer
    TinyInt = 2,
    /// 16-bit signed integer
    SmallInt = 3,
    /// 32-bit signed integer
    Integer = 4,
    /// 64-bit signed integer
    BigInt = 5,
    /// 8-bit unsigned integer
    UTinyInt = 6,
    /// 16-bit unsigned integer
    USmallInt = 7,
    /// 32-bit unsigned integer
    UInteger = 8,
    /// 64-bit unsigned integer
    UBigInt = 9,
    /// 32-bit floating point
    Float = 10,
    /// 64-bit double precision
    Double = 11,
    /// Timestamp (microseconds since epoch)
    Timestamp = 12,
    /// Date (days since epoch)
    Date = 13,
    /// Time of day (microseconds since midnight)
    Time = 14,
    /// Interval (months, days, microseconds)
    Interval = 15,
    /// 128-bit signed integer
    HugeInt = 16,
    /// Variable length string
    Varchar = 17,
    /// Binary large object
    Blob = 18,
    /// Fixed-point decimal
    Decimal = 19,
    /// Timestamp (seconds since epoch)
    TimestampS = 20,
    /// Timestamp (milliseconds since epoch)
    TimestampMs = 21,
    /// Timestamp (nanoseconds since epoch)
    TimestampNs = 22,
    /// Enumeration over a string dictionary
    Enum = 23,
    /// Variable length list
    List = 24,
    /// Struct with named fields
    Struct = 25,
    /// Map (list of key/value pairs)
    Map = 26,
    /// UUID
    Uuid = 27,
    /// Tagged union
    Union = 28,
    /// Bit string
    Bit = 29,
    /// Time of day with time zone offset
    TimeTz = 30,
    /// Timestamp with time zone (microseconds since epoch, UTC)
    TimestampTz = 31,
    /// 128-bit unsigned integer
    UHugeInt = 32,
    /// Fixed length array
    Array = 33,
    /// The type of a bare NULL literal
    SqlNull = 36,
}

impl TypeId {
    /// Every supported identifier, in code order
    pub const ALL: [TypeId; 35] = [
        TypeId::Invalid,
        TypeId::Boolean,
        TypeId::TinyInt,
        TypeId::SmallInt,
        TypeId::Integer,
        TypeId::BigInt,
        TypeId::UTinyInt,
        TypeId::USmallInt,
        TypeId::UInteger,
        TypeId::UBigInt,
        TypeId::Float,
        TypeId::Double,
        TypeId::Timestamp,
        TypeId::Date,
        TypeId::Time,
        TypeId::Interval,
        TypeId::HugeInt,
        TypeId::Varchar,
        TypeId::Blob,
        TypeId::Decimal,
        TypeId::TimestampS,
        TypeId::TimestampMs,
        TypeId::TimestampNs,
        TypeId::Enum,
        TypeId::List,
        TypeId::Struct,
        TypeId::Map,
        TypeId::Uuid,
        TypeId::Union,
        TypeId::Bit,
        TypeId::TimeTz,
        TypeId::TimestampTz,
        TypeId::UHugeInt,
        TypeId::Array,
        TypeId::SqlNull,
    ];

    /// The engine's numeric code for this identifier
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Look up an identifier by its numeric code
    pub fn from_code(code: u32) -> Option<TypeId> {
        Self::ALL.iter().copied().find(|id| id.code() == code)
    }

    /// Check if this identifier needs parameters to describe a type
    pub fn is_parameterized(self) -> bool {
        matches!(self, TypeId::Decimal | TypeId::Enum)
    }

    /// Check if this identifier describes a type that contains other types
    pub fn is_nested(self) -> bool {
        matches!(
            self,
            TypeId::List | TypeId::Struct | TypeId::Map | TypeId::Union | TypeId::Array
        )
    }

    /// Check if a type with this identifier can be created without parameters
    pub fn is_primitive(self) -> bool {
        self != TypeId::Invalid && !self.is_parameterized() && !self.is_nested()
    }

    /// Size in bytes of one element in a vector of this type, for identifiers
    /// whose layout does not depend on type parameters
    pub fn fixed_size(self) -> Option<usize> {
        match self {
            TypeId::Boolean | TypeId::TinyInt | TypeId::UTinyInt => Some(1),
            TypeId::SmallInt | TypeId::USmallInt => Some(2),
            TypeId::Integer | TypeId::UInteger | TypeId::Float | TypeId::Date => Some(4),
            TypeId::BigInt
            | TypeId::UBigInt
            | TypeId::Double
            | TypeId::Time
            | TypeId::TimeTz
            | TypeId::Timestamp
            | TypeId::TimestampS
            | TypeId::TimestampMs
            | TypeId::TimestampNs
            | TypeId::TimestampTz => Some(8),
            TypeId::HugeInt | TypeId::UHugeInt | TypeId::Uuid | TypeId::Interval => Some(16),
            TypeId::Varchar | TypeId::Blob | TypeId::Bit => Some(16), // string records
            TypeId::SqlNull => Some(0),
            _ => None,
        }
    }

    /// Check if values of this identifier are stored as string records
    pub fn is_string_like(self) -> bool {
        matches!(self, TypeId::Varchar | TypeId::Blob | TypeId::Bit)
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeId::Invalid => "INVALID",
            TypeId::Boolean => "BOOLEAN",
            TypeId::TinyInt => "TINYINT",
            TypeId::SmallInt => "SMALLINT",
            TypeId::Integer => "INTEGER",
            TypeId::BigInt => "BIGINT",
            TypeId::UTinyInt => "UTINYINT",
            TypeId::USmallInt => "USMALLINT",
            TypeId::UInteger => "UINTEGER",
            TypeId::UBigInt => "UBIGINT",
            TypeId::Float => "FLOAT",
            TypeId::Double => "DOUBLE",
            TypeId::Timestamp => "TIMESTAMP",
            TypeId::Date => "DATE",
            TypeId::Time => "TIME",
            TypeId::Interval => "INTERVAL",
            TypeId::HugeInt => "HUGEINT",
            TypeId::Varchar => "VARCHAR",
            TypeId::Blob => "BLOB",
            TypeId::Decimal => "DECIMAL",
            TypeId::TimestampS => "TIMESTAMP_S",
            TypeId::TimestampMs => "TIMESTAMP_MS",
            TypeId::TimestampNs => "TIMESTAMP_NS",
            TypeId::Enum => "ENUM",
            TypeId::List => "LIST",
            TypeId::Struct => "STRUCT",
            TypeId::Map => "MAP",
            TypeId::Uuid => "UUID",
            TypeId::Union => "UNION",
            TypeId::Bit => "BIT",
            TypeId::TimeTz => "TIME WITH TIME ZONE",
            TypeId::TimestampTz => "TIMESTAMP WITH TIME ZONE",
            TypeId::UHugeInt => "UHUGEINT",
            TypeId::Array => "ARRAY",
            TypeId::SqlNull => "NULL",
        };
        write!(f, "{}", name)
    }
}
