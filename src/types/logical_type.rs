use crate::common::constants::{MAX_ARRAY_SIZE, MAX_DECIMAL_WIDTH, MAX_UNION_MEMBERS};
use crate::common::error::{DuckChunkError, DuckChunkResult};
use crate::invalid_param;
use crate::types::type_id::TypeId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// The shape of a logical type, one variant per kind of type the engine can describe
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    /// A type fully described by its identifier
    Primitive(TypeId),
    /// Fixed-point decimal stored in the smallest integer that holds `width` digits
    Decimal {
        width: u8,
        scale: u8,
        internal: TypeId,
    },
    /// Dictionary-encoded strings stored as indices of the smallest sufficient width
    Enum {
        dictionary: Vec<String>,
        internal: TypeId,
    },
    /// Variable length list
    List(Box<LogicalType>),
    /// Fixed length array
    Array { child: Box<LogicalType>, size: usize },
    /// Map from keys to values
    Map {
        key: Box<LogicalType>,
        value: Box<LogicalType>,
    },
    /// Struct with named fields
    Struct(Vec<(String, LogicalType)>),
    /// Tagged union with named members
    Union(Vec<(String, LogicalType)>),
}

/// Logical types describe the data an engine vector holds, including every
/// parameter that determines the vector's physical layout.
///
/// A `LogicalType` is an owned value. Building a container type copies the child
/// types it is given, and asking a container for a child returns a new value, so
/// every type has its own lifetime and is released when dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogicalType {
    kind: TypeKind,
    alias: Option<String>,
}

impl LogicalType {
    fn from_kind(kind: TypeKind) -> Self {
        Self { kind, alias: None }
    }

    /// Create a type that needs no parameters
    pub fn primitive(type_id: TypeId) -> DuckChunkResult<LogicalType> {
        if !type_id.is_primitive() {
            return Err(invalid_param!(
                "{} cannot be created as a primitive type",
                type_id
            ));
        }
        Ok(Self::from_kind(TypeKind::Primitive(type_id)))
    }

    pub fn boolean() -> LogicalType {
        Self::from_kind(TypeKind::Primitive(TypeId::Boolean))
    }

    pub fn integer() -> LogicalType {
        Self::from_kind(TypeKind::Primitive(TypeId::Integer))
    }

    pub fn bigint() -> LogicalType {
        Self::from_kind(TypeKind::Primitive(TypeId::BigInt))
    }

    pub fn double() -> LogicalType {
        Self::from_kind(TypeKind::Primitive(TypeId::Double))
    }

    pub fn varchar() -> LogicalType {
        Self::from_kind(TypeKind::Primitive(TypeId::Varchar))
    }

    pub fn utinyint() -> LogicalType {
        Self::from_kind(TypeKind::Primitive(TypeId::UTinyInt))
    }

    /// The `STRUCT(key, value)` type map entries are stored as
    pub(crate) fn map_entry_type(key: &LogicalType, value: &LogicalType) -> LogicalType {
        Self::from_kind(TypeKind::Struct(vec![
            ("key".to_string(), key.clone()),
            ("value".to_string(), value.clone()),
        ]))
    }

    /// Create a decimal type with validation
    pub fn decimal(width: u8, scale: u8) -> DuckChunkResult<LogicalType> {
        if width == 0 || width > MAX_DECIMAL_WIDTH {
            return Err(invalid_param!(
                "Decimal width must be between 1 and {}, got {}",
                MAX_DECIMAL_WIDTH,
                width
            ));
        }
        if scale > width {
            return Err(invalid_param!(
                "Decimal scale ({}) cannot be greater than width ({})",
                scale,
                width
            ));
        }
        let internal = decimal_internal_type(width);
        tracing::trace!(width, scale, internal = %internal, "created decimal type");
        Ok(Self::from_kind(TypeKind::Decimal {
            width,
            scale,
            internal,
        }))
    }

    /// Create an enum type over an ordered dictionary of unique members
    pub fn enumeration<I, S>(members: I) -> DuckChunkResult<LogicalType>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dictionary: Vec<String> = members.into_iter().map(Into::into).collect();
        if dictionary.is_empty() {
            return Err(invalid_param!("Enum dictionary must not be empty"));
        }
        let mut seen = HashSet::with_capacity(dictionary.len());
        for member in &dictionary {
            if !seen.insert(member.as_str()) {
                return Err(invalid_param!("Duplicate enum member '{}'", member));
            }
        }
        let internal = enum_internal_type(dictionary.len())?;
        tracing::trace!(size = dictionary.len(), internal = %internal, "created enum type");
        Ok(Self::from_kind(TypeKind::Enum {
            dictionary,
            internal,
        }))
    }

    /// Create a list type. The element type is copied; the caller keeps ownership of it.
    pub fn list(element_type: &LogicalType) -> LogicalType {
        Self::from_kind(TypeKind::List(Box::new(element_type.clone())))
    }

    /// Create a fixed size array type
    pub fn array(element_type: &LogicalType, size: usize) -> DuckChunkResult<LogicalType> {
        if size == 0 || size > MAX_ARRAY_SIZE {
            return Err(invalid_param!(
                "Array size must be between 1 and {}, got {}",
                MAX_ARRAY_SIZE,
                size
            ));
        }
        Ok(Self::from_kind(TypeKind::Array {
            child: Box::new(element_type.clone()),
            size,
        }))
    }

    /// Create a map type
    pub fn map(key_type: &LogicalType, value_type: &LogicalType) -> LogicalType {
        Self::from_kind(TypeKind::Map {
            key: Box::new(key_type.clone()),
            value: Box::new(value_type.clone()),
        })
    }

    /// Create a struct type from named fields
    pub fn struct_type<I, S>(fields: I) -> DuckChunkResult<LogicalType>
    where
        I: IntoIterator<Item = (S, LogicalType)>,
        S: Into<String>,
    {
        let fields = named_children(fields, "Struct")?;
        Ok(Self::from_kind(TypeKind::Struct(fields)))
    }

    /// Create a union type from named members
    pub fn union_type<I, S>(members: I) -> DuckChunkResult<LogicalType>
    where
        I: IntoIterator<Item = (S, LogicalType)>,
        S: Into<String>,
    {
        let members = named_children(members, "Union")?;
        if members.len() > MAX_UNION_MEMBERS {
            return Err(invalid_param!(
                "Union supports at most {} members, got {}",
                MAX_UNION_MEMBERS,
                members.len()
            ));
        }
        Ok(Self::from_kind(TypeKind::Union(members)))
    }

    /// Attach an alias to this type
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn set_alias(&mut self, alias: Option<String>) {
        self.alias = alias;
    }

    /// The user-assigned name of this type, if any
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Get the type identifier. Defined for every kind of type.
    pub fn type_id(&self) -> TypeId {
        match &self.kind {
            TypeKind::Primitive(id) => *id,
            TypeKind::Decimal { .. } => TypeId::Decimal,
            TypeKind::Enum { .. } => TypeId::Enum,
            TypeKind::List(_) => TypeId::List,
            TypeKind::Array { .. } => TypeId::Array,
            TypeKind::Map { .. } => TypeId::Map,
            TypeKind::Struct(_) => TypeId::Struct,
            TypeKind::Union(_) => TypeId::Union,
        }
    }

    /// Release this type. Equivalent to dropping it.
    pub fn release(self) {
        tracing::trace!(type_id = %self.type_id(), "released logical type");
    }

    pub fn decimal_width(&self) -> DuckChunkResult<u8> {
        match &self.kind {
            TypeKind::Decimal { width, .. } => Ok(*width),
            _ => Err(self.mismatch("DECIMAL")),
        }
    }

    pub fn decimal_scale(&self) -> DuckChunkResult<u8> {
        match &self.kind {
            TypeKind::Decimal { scale, .. } => Ok(*scale),
            _ => Err(self.mismatch("DECIMAL")),
        }
    }

    /// The integer type a decimal's unscaled value is stored in
    pub fn decimal_internal_type(&self) -> DuckChunkResult<TypeId> {
        match &self.kind {
            TypeKind::Decimal { internal, .. } => Ok(*internal),
            _ => Err(self.mismatch("DECIMAL")),
        }
    }

    /// The unsigned integer type an enum's dictionary index is stored in
    pub fn enum_internal_type(&self) -> DuckChunkResult<TypeId> {
        match &self.kind {
            TypeKind::Enum { internal, .. } => Ok(*internal),
            _ => Err(self.mismatch("ENUM")),
        }
    }

    pub fn enum_dictionary_size(&self) -> DuckChunkResult<usize> {
        Ok(self.enum_dictionary()?.len())
    }

    pub fn enum_dictionary_value(&self, index: usize) -> DuckChunkResult<&str> {
        let dictionary = self.enum_dictionary()?;
        dictionary
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| DuckChunkError::out_of_range("enum dictionary", index, dictionary.len()))
    }

    pub fn enum_dictionary(&self) -> DuckChunkResult<&[String]> {
        match &self.kind {
            TypeKind::Enum { dictionary, .. } => Ok(dictionary),
            _ => Err(self.mismatch("ENUM")),
        }
    }

    pub fn list_child_type(&self) -> DuckChunkResult<LogicalType> {
        match &self.kind {
            TypeKind::List(child) => Ok(child.as_ref().clone()),
            _ => Err(self.mismatch("LIST")),
        }
    }

    pub fn array_child_type(&self) -> DuckChunkResult<LogicalType> {
        match &self.kind {
            TypeKind::Array { child, .. } => Ok(child.as_ref().clone()),
            _ => Err(self.mismatch("ARRAY")),
        }
    }

    pub fn array_size(&self) -> DuckChunkResult<usize> {
        match &self.kind {
            TypeKind::Array { size, .. } => Ok(*size),
            _ => Err(self.mismatch("ARRAY")),
        }
    }

    pub fn map_key_type(&self) -> DuckChunkResult<LogicalType> {
        match &self.kind {
            TypeKind::Map { key, .. } => Ok(key.as_ref().clone()),
            _ => Err(self.mismatch("MAP")),
        }
    }

    pub fn map_value_type(&self) -> DuckChunkResult<LogicalType> {
        match &self.kind {
            TypeKind::Map { value, .. } => Ok(value.as_ref().clone()),
            _ => Err(self.mismatch("MAP")),
        }
    }

    pub fn struct_child_count(&self) -> DuckChunkResult<usize> {
        Ok(self.struct_fields()?.len())
    }

    pub fn struct_child_name(&self, index: usize) -> DuckChunkResult<&str> {
        let fields = self.struct_fields()?;
        fields
            .get(index)
            .map(|(name, _)| name.as_str())
            .ok_or_else(|| DuckChunkError::out_of_range("struct child", index, fields.len()))
    }

    pub fn struct_child_type(&self, index: usize) -> DuckChunkResult<LogicalType> {
        let fields = self.struct_fields()?;
        fields
            .get(index)
            .map(|(_, child)| child.clone())
            .ok_or_else(|| DuckChunkError::out_of_range("struct child", index, fields.len()))
    }

    fn struct_fields(&self) -> DuckChunkResult<&[(String, LogicalType)]> {
        match &self.kind {
            TypeKind::Struct(fields) => Ok(fields),
            _ => Err(self.mismatch("STRUCT")),
        }
    }

    pub fn union_member_count(&self) -> DuckChunkResult<usize> {
        Ok(self.union_members()?.len())
    }

    pub fn union_member_name(&self, index: usize) -> DuckChunkResult<&str> {
        let members = self.union_members()?;
        members
            .get(index)
            .map(|(name, _)| name.as_str())
            .ok_or_else(|| DuckChunkError::out_of_range("union member", index, members.len()))
    }

    pub fn union_member_type(&self, index: usize) -> DuckChunkResult<LogicalType> {
        let members = self.union_members()?;
        members
            .get(index)
            .map(|(_, member)| member.clone())
            .ok_or_else(|| DuckChunkError::out_of_range("union member", index, members.len()))
    }

    fn union_members(&self) -> DuckChunkResult<&[(String, LogicalType)]> {
        match &self.kind {
            TypeKind::Union(members) => Ok(members),
            _ => Err(self.mismatch("UNION")),
        }
    }

    /// Size in bytes of one element in the vector's own data buffer.
    /// Zero for types whose payload lives entirely in child vectors.
    pub fn element_size(&self) -> usize {
        match &self.kind {
            TypeKind::Primitive(id) => id.fixed_size().unwrap_or(0),
            TypeKind::Decimal { internal, .. } | TypeKind::Enum { internal, .. } => {
                internal.fixed_size().unwrap_or(0)
            }
            TypeKind::List(_) | TypeKind::Map { .. } => crate::common::LIST_ENTRY_SIZE,
            TypeKind::Array { .. } | TypeKind::Struct(_) | TypeKind::Union(_) => 0,
        }
    }

    /// Check if this type contains other types
    pub fn is_nested(&self) -> bool {
        self.type_id().is_nested()
    }

    fn mismatch(&self, expected: &str) -> DuckChunkError {
        DuckChunkError::mismatch(expected, self.type_id())
    }
}

/// The integer type used to store a decimal of the given width
pub fn decimal_internal_type(width: u8) -> TypeId {
    match width {
        0..=4 => TypeId::SmallInt,
        5..=9 => TypeId::Integer,
        10..=18 => TypeId::BigInt,
        _ => TypeId::HugeInt,
    }
}

/// The index type used to store an enum with the given number of members
pub fn enum_internal_type(size: usize) -> DuckChunkResult<TypeId> {
    let size = size as u64;
    if size <= 1 << 8 {
        Ok(TypeId::UTinyInt)
    } else if size <= 1 << 16 {
        Ok(TypeId::USmallInt)
    } else if size <= 1 << 32 {
        Ok(TypeId::UInteger)
    } else {
        Err(invalid_param!("Enum dictionary too large: {} members", size))
    }
}

fn named_children<I, S>(children: I, what: &str) -> DuckChunkResult<Vec<(String, LogicalType)>>
where
    I: IntoIterator<Item = (S, LogicalType)>,
    S: Into<String>,
{
    let children: Vec<(String, LogicalType)> = children
        .into_iter()
        .map(|(name, child)| (name.into(), child))
        .collect();
    if children.is_empty() {
        return Err(invalid_param!("{} type needs at least one member", what));
    }
    let mut seen = HashSet::with_capacity(children.len());
    for (name, _) in &children {
        if !seen.insert(name.to_lowercase()) {
            return Err(invalid_param!("Duplicate {} member name '{}'", what, name));
        }
    }
    Ok(children)
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str, quote: char) -> fmt::Result {
    write!(f, "{}", quote)?;
    for c in text.chars() {
        if c == quote {
            write!(f, "{}", quote)?;
        }
        write!(f, "{}", c)?;
    }
    write!(f, "{}", quote)
}

fn write_named(
    f: &mut fmt::Formatter<'_>,
    keyword: &str,
    children: &[(String, LogicalType)],
) -> fmt::Result {
    write!(f, "{}(", keyword)?;
    for (i, (name, child)) in children.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write_quoted(f, name, '"')?;
        write!(f, " {}", child)?;
    }
    write!(f, ")")
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeKind::Primitive(id) => write!(f, "{}", id),
            TypeKind::Decimal { width, scale, .. } => write!(f, "DECIMAL({},{})", width, scale),
            TypeKind::Enum { dictionary, .. } => {
                write!(f, "ENUM(")?;
                for (i, member) in dictionary.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write_quoted(f, member, '\'')?;
                }
                write!(f, ")")
            }
            TypeKind::List(child) => write!(f, "{}[]", child),
            TypeKind::Array { child, size } => write!(f, "{}[{}]", child, size),
            TypeKind::Map { key, value } => write!(f, "MAP({}, {})", key, value),
            TypeKind::Struct(fields) => write_named(f, "STRUCT", fields),
            TypeKind::Union(members) => write_named(f, "UNION", members),
        }
    }
}

impl FromStr for LogicalType {
    type Err = DuckChunkError;

    /// Parse an engine type string such as `DECIMAL(18,6)`, `VARCHAR[]`,
    /// `INTEGER[3]`, `MAP(VARCHAR, INTEGER)` or `STRUCT(a INTEGER, "b c" VARCHAR)`
    fn from_str(s: &str) -> DuckChunkResult<Self> {
        let mut parser = TypeParser { input: s, pos: 0 };
        let parsed = parser.parse_type()?;
        parser.skip_whitespace();
        if parser.pos < s.len() {
            return Err(invalid_param!(
                "Unexpected input at position {} in type '{}'",
                parser.pos,
                s
            ));
        }
        Ok(parsed)
    }
}

fn primitive_from_name(name: &str) -> Option<TypeId> {
    let id = match name {
        "BOOLEAN" | "BOOL" | "LOGICAL" => TypeId::Boolean,
        "TINYINT" | "INT1" => TypeId::TinyInt,
        "SMALLINT" | "INT2" | "SHORT" => TypeId::SmallInt,
        "INTEGER" | "INT" | "INT4" | "SIGNED" => TypeId::Integer,
        "BIGINT" | "INT8" | "LONG" => TypeId::BigInt,
        "HUGEINT" | "INT128" => TypeId::HugeInt,
        "UTINYINT" => TypeId::UTinyInt,
        "USMALLINT" => TypeId::USmallInt,
        "UINTEGER" => TypeId::UInteger,
        "UBIGINT" => TypeId::UBigInt,
        "UHUGEINT" => TypeId::UHugeInt,
        "FLOAT" | "FLOAT4" | "REAL" => TypeId::Float,
        "DOUBLE" | "FLOAT8" => TypeId::Double,
        "DATE" => TypeId::Date,
        "TIME" => TypeId::Time,
        "TIMETZ" => TypeId::TimeTz,
        "TIMESTAMP" | "DATETIME" => TypeId::Timestamp,
        "TIMESTAMP_S" => TypeId::TimestampS,
        "TIMESTAMP_MS" => TypeId::TimestampMs,
        "TIMESTAMP_NS" => TypeId::TimestampNs,
        "TIMESTAMPTZ" => TypeId::TimestampTz,
        "INTERVAL" => TypeId::Interval,
        "VARCHAR" | "TEXT" | "STRING" | "CHAR" | "BPCHAR" => TypeId::Varchar,
        "BLOB" | "BYTEA" | "BINARY" | "VARBINARY" => TypeId::Blob,
        "BIT" | "BITSTRING" => TypeId::Bit,
        "UUID" => TypeId::Uuid,
        "NULL" => TypeId::SqlNull,
        _ => return None,
    };
    Some(id)
}

/// Recursive descent parser over engine type strings
struct TypeParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TypeParser<'a> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> DuckChunkResult<()> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(invalid_param!(
                "Expected '{}' at position {} in type '{}'",
                expected,
                self.pos,
                self.input
            ))
        }
    }

    fn identifier(&mut self) -> DuckChunkResult<&'a str> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !(c.is_alphanumeric() || c == '_') {
                break;
            }
            self.pos += c.len_utf8();
        }
        if start == self.pos {
            return Err(invalid_param!(
                "Expected a type name at position {} in type '{}'",
                start,
                self.input
            ));
        }
        Ok(&self.input[start..self.pos])
    }

    fn number(&mut self) -> DuckChunkResult<usize> {
        self.skip_whitespace();
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        self.input[start..self.pos].parse().map_err(|_| {
            invalid_param!(
                "Expected a number at position {} in type '{}'",
                start,
                self.input
            )
        })
    }

    fn quoted(&mut self, quote: char) -> DuckChunkResult<String> {
        self.expect(quote)?;
        let mut text = String::new();
        loop {
            match self.peek() {
                Some(c) if c == quote => {
                    self.pos += c.len_utf8();
                    if self.peek() == Some(quote) {
                        self.pos += c.len_utf8();
                        text.push(quote);
                    } else {
                        return Ok(text);
                    }
                }
                Some(c) => {
                    self.pos += c.len_utf8();
                    text.push(c);
                }
                None => {
                    return Err(invalid_param!(
                        "Unterminated quoted name in type '{}'",
                        self.input
                    ))
                }
            }
        }
    }

    /// Consume a sequence of keywords, or nothing if they are not all present
    fn eat_keywords(&mut self, keywords: &[&str]) -> bool {
        let saved = self.pos;
        for keyword in keywords {
            match self.identifier() {
                Ok(word) if word.eq_ignore_ascii_case(keyword) => {}
                _ => {
                    self.pos = saved;
                    return false;
                }
            }
        }
        true
    }

    fn parse_type(&mut self) -> DuckChunkResult<LogicalType> {
        let mut parsed = self.parse_base()?;
        while self.eat('[') {
            if self.eat(']') {
                parsed = LogicalType::list(&parsed);
            } else {
                let size = self.number()?;
                self.expect(']')?;
                parsed = LogicalType::array(&parsed, size)?;
            }
        }
        Ok(parsed)
    }

    fn parse_named_children(&mut self) -> DuckChunkResult<Vec<(String, LogicalType)>> {
        self.expect('(')?;
        let mut children = Vec::new();
        loop {
            self.skip_whitespace();
            let name = if self.peek() == Some('"') {
                self.quoted('"')?
            } else {
                self.identifier()?.to_string()
            };
            children.push((name, self.parse_type()?));
            if !self.eat(',') {
                break;
            }
        }
        self.expect(')')?;
        Ok(children)
    }

    fn decimal_parameter(&mut self) -> DuckChunkResult<u8> {
        let value = self.number()?;
        u8::try_from(value).map_err(|_| invalid_param!("Decimal parameter {} out of range", value))
    }

    fn parse_base(&mut self) -> DuckChunkResult<LogicalType> {
        let word = self.identifier()?.to_ascii_uppercase();
        match word.as_str() {
            "DECIMAL" | "NUMERIC" => {
                if !self.eat('(') {
                    return LogicalType::decimal(18, 3);
                }
                let width = self.decimal_parameter()?;
                let scale = if self.eat(',') {
                    self.decimal_parameter()?
                } else {
                    0
                };
                self.expect(')')?;
                LogicalType::decimal(width, scale)
            }
            "ENUM" => {
                self.expect('(')?;
                let mut members = Vec::new();
                loop {
                    members.push(self.quoted('\'')?);
                    if !self.eat(',') {
                        break;
                    }
                }
                self.expect(')')?;
                LogicalType::enumeration(members)
            }
            "MAP" => {
                self.expect('(')?;
                let key = self.parse_type()?;
                self.expect(',')?;
                let value = self.parse_type()?;
                self.expect(')')?;
                Ok(LogicalType::map(&key, &value))
            }
            "STRUCT" => LogicalType::struct_type(self.parse_named_children()?),
            "UNION" => LogicalType::union_type(self.parse_named_children()?),
            "TIME" | "TIMESTAMP" => {
                let with_zone = if self.eat_keywords(&["WITH", "TIME", "ZONE"]) {
                    true
                } else {
                    self.eat_keywords(&["WITHOUT", "TIME", "ZONE"]);
                    false
                };
                let id = match (word.as_str(), with_zone) {
                    ("TIME", true) => TypeId::TimeTz,
                    ("TIME", false) => TypeId::Time,
                    (_, true) => TypeId::TimestampTz,
                    (_, false) => TypeId::Timestamp,
                };
                LogicalType::primitive(id)
            }
            "DOUBLE" => {
                self.eat_keywords(&["PRECISION"]);
                Ok(LogicalType::double())
            }
            other => match primitive_from_name(other) {
                Some(id) => LogicalType::primitive(id),
                None => Err(invalid_param!("Unknown type name '{}'", other)),
            },
        }
    }
}
