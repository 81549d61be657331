use crate::common::constants::{
    LIST_ENTRY_SIZE, MAX_TZ_OFFSET, STRING_INLINE_LENGTH, STRING_RECORD_SIZE,
};
use crate::common::error::{DuckChunkError, DuckChunkResult};
use crate::types::logical_type::{LogicalType, TypeKind};
use crate::types::type_id::TypeId;
use crate::types::value::{format_decimal, Value};
use crate::{invalid_param, invalid_value};
use byteorder::{ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};

/// UUIDs are stored as HUGEINT with the top bit flipped so they sort as unsigned
const UUID_SIGN_FLIP: u128 = 1 << 127;

/// A validity mask for tracking null values in a vector
/// Uses a bitset for efficient storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityMask {
    /// Bitset where each bit represents whether the corresponding value is valid (1) or null (0)
    data: Vec<u64>,
    /// Number of entries in the mask
    count: usize,
}

impl ValidityMask {
    /// Create a validity mask where all entries are valid
    pub fn all_valid(count: usize) -> Self {
        Self {
            data: vec![u64::MAX; count.div_ceil(64)],
            count,
        }
    }

    /// Set the validity of a specific entry
    pub fn set_valid(&mut self, index: usize, valid: bool) {
        if index >= self.count {
            return;
        }
        let word_index = index / 64;
        let bit_index = index % 64;

        if valid {
            self.data[word_index] |= 1u64 << bit_index;
        } else {
            self.data[word_index] &= !(1u64 << bit_index);
        }
    }

    /// Set a specific entry as invalid (null)
    pub fn set_invalid(&mut self, index: usize) {
        self.set_valid(index, false);
    }

    /// Check if a specific entry is valid
    pub fn is_valid(&self, index: usize) -> bool {
        if index >= self.count {
            return false;
        }
        (self.data[index / 64] & (1u64 << (index % 64))) != 0
    }

    /// Get the number of entries in the mask
    pub fn count(&self) -> usize {
        self.count
    }

    /// Count the number of null entries
    pub fn null_count(&self) -> usize {
        (0..self.count).filter(|&i| !self.is_valid(i)).count()
    }

    /// Resize the validity mask. New entries start out valid.
    pub fn resize(&mut self, new_count: usize) {
        self.data.resize(new_count.div_ceil(64), u64::MAX);
        self.count = new_count;
    }

    /// Mark every entry valid again
    pub fn set_all_valid(&mut self) {
        self.data.fill(u64::MAX);
    }
}

/// One column of a data chunk: raw little-endian element storage, an
/// out-of-line heap for long strings, a validity mask and the child vectors
/// of nested types.
///
/// The logical type is fixed at creation and decides how the bytes are read:
/// LIST and MAP rows are `{offset, length}` entries into one growing child
/// (for MAP a `STRUCT(key, value)` child), ARRAY rows are a fixed stride of
/// the child, STRUCT has one child per field and UNION has a UTINYINT tag
/// child followed by one child per member.
#[derive(Debug, Clone)]
pub struct Vector {
    /// The logical type of this vector
    logical_type: LogicalType,
    /// Number of rows the vector is allocated for
    capacity: usize,
    /// Number of rows in use
    count: usize,
    /// Fixed-width element storage
    data: Vec<u8>,
    /// Out-of-line bytes of strings longer than the inline limit
    heap: Vec<u8>,
    /// Validity mask for null values
    validity: ValidityMask,
    children: Vec<Vector>,
    /// Entries of the list child in use (LIST and MAP only)
    child_len: usize,
}

/// Buffer sizes of a vector and its children at one point in time
#[derive(Debug)]
pub(crate) struct WriteMark {
    count: usize,
    heap: usize,
    child_len: usize,
    children: Vec<WriteMark>,
}

impl Vector {
    /// Create a new vector with the specified type and capacity
    pub fn new(logical_type: LogicalType, capacity: usize) -> Self {
        let children = match logical_type.kind() {
            TypeKind::List(child) => vec![Vector::new(child.as_ref().clone(), capacity)],
            TypeKind::Map { key, value } => vec![Vector::new(
                LogicalType::map_entry_type(key, value),
                capacity,
            )],
            TypeKind::Array { child, size } => {
                vec![Vector::new(child.as_ref().clone(), capacity * size)]
            }
            TypeKind::Struct(fields) => fields
                .iter()
                .map(|(_, field)| Vector::new(field.clone(), capacity))
                .collect(),
            TypeKind::Union(members) => std::iter::once(LogicalType::utinyint())
                .chain(members.iter().map(|(_, member)| member.clone()))
                .map(|member| Vector::new(member, capacity))
                .collect(),
            TypeKind::Primitive(_) | TypeKind::Decimal { .. } | TypeKind::Enum { .. } => Vec::new(),
        };
        let element_size = logical_type.element_size();

        Self {
            logical_type,
            capacity,
            count: 0,
            data: vec![0u8; element_size * capacity],
            heap: Vec::new(),
            validity: ValidityMask::all_valid(capacity),
            children,
            child_len: 0,
        }
    }

    /// Create a vector holding exactly the given values
    pub fn from_values(logical_type: LogicalType, values: &[Value]) -> DuckChunkResult<Self> {
        let mut vector = Self::new(logical_type, values.len());
        for (row, value) in values.iter().enumerate() {
            vector.set_value(row, value)?;
        }
        vector.set_count(values.len());
        Ok(vector)
    }

    /// Get the logical type of this vector
    pub fn logical_type(&self) -> &LogicalType {
        &self.logical_type
    }

    /// Get the capacity of the vector
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the number of rows in the vector
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check if the vector is empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Get the validity mask for this vector
    pub fn validity(&self) -> &ValidityMask {
        &self.validity
    }

    /// Check whether a row holds a value (as opposed to NULL)
    pub fn is_valid(&self, row: usize) -> DuckChunkResult<bool> {
        self.check_row(row)?;
        Ok(self.validity.is_valid(row))
    }

    /// The element vector of a LIST, or the `STRUCT(key, value)` entry vector of a MAP
    pub fn list_child(&self) -> DuckChunkResult<&Vector> {
        match self.logical_type.type_id() {
            TypeId::List | TypeId::Map => Ok(&self.children[0]),
            other => Err(DuckChunkError::mismatch("LIST", other)),
        }
    }

    /// Number of child entries used by all rows of a LIST or MAP
    pub fn list_size(&self) -> DuckChunkResult<usize> {
        self.list_child().map(|_| self.child_len)
    }

    pub fn array_child(&self) -> DuckChunkResult<&Vector> {
        match self.logical_type.type_id() {
            TypeId::Array => Ok(&self.children[0]),
            other => Err(DuckChunkError::mismatch("ARRAY", other)),
        }
    }

    pub fn struct_child(&self, index: usize) -> DuckChunkResult<&Vector> {
        match self.logical_type.type_id() {
            TypeId::Struct => self
                .children
                .get(index)
                .ok_or_else(|| DuckChunkError::out_of_range("struct child", index, self.children.len())),
            other => Err(DuckChunkError::mismatch("STRUCT", other)),
        }
    }

    /// Decode the value at a row. Rows at or past the row count are out of range.
    pub fn get_value(&self, row: usize) -> DuckChunkResult<Value> {
        self.check_row(row)?;
        self.value_at(row)
    }

    /// Decode every row in use, in row order
    pub fn to_values(&self) -> DuckChunkResult<Vec<Value>> {
        (0..self.count).map(|row| self.value_at(row)).collect()
    }

    /// Store a value at a row. The value must be of the vector's kind; DECIMAL
    /// vectors also accept integers and floating point values.
    pub fn set_value(&mut self, row: usize, value: &Value) -> DuckChunkResult<()> {
        if row >= self.capacity {
            return Err(DuckChunkError::out_of_range("row", row, self.capacity));
        }
        if value.is_null() {
            self.validity.set_invalid(row);
            return Ok(());
        }
        self.write_value(row, value)?;
        self.validity.set_valid(row, true);
        Ok(())
    }

    pub fn set_null(&mut self, row: usize) -> DuckChunkResult<()> {
        self.set_value(row, &Value::Null)
    }

    /// Set the number of rows in use. Struct, union and array children follow;
    /// list children keep their own size.
    pub(crate) fn set_count(&mut self, count: usize) {
        self.count = count;
        if let TypeKind::Array { size, .. } = self.logical_type.kind() {
            let size = *size;
            self.children[0].set_count(count * size);
        } else if matches!(self.logical_type.type_id(), TypeId::Struct | TypeId::Union) {
            for child in &mut self.children {
                child.set_count(count);
            }
        }
    }

    /// Clear all rows: zeroed data, every row valid, empty heap and list children
    pub(crate) fn reset(&mut self) {
        self.data.fill(0);
        self.heap.clear();
        self.validity.set_all_valid();
        self.count = 0;
        self.child_len = 0;
        for child in &mut self.children {
            child.reset();
        }
    }

    /// Record the buffer sizes before a row is written
    pub(crate) fn write_mark(&self) -> WriteMark {
        WriteMark {
            count: self.count,
            heap: self.heap.len(),
            child_len: self.child_len,
            children: self.children.iter().map(Vector::write_mark).collect(),
        }
    }

    /// Drop everything written since `mark` and leave `row` NULL
    pub(crate) fn rollback(&mut self, row: usize, mark: &WriteMark) {
        self.restore(mark);
        self.validity.set_invalid(row);
    }

    fn restore(&mut self, mark: &WriteMark) {
        self.count = mark.count;
        self.heap.truncate(mark.heap);
        self.child_len = mark.child_len;
        for (child, child_mark) in self.children.iter_mut().zip(&mark.children) {
            child.restore(child_mark);
        }
    }

    fn check_row(&self, row: usize) -> DuckChunkResult<()> {
        if row >= self.count {
            return Err(DuckChunkError::out_of_range("row", row, self.count));
        }
        Ok(())
    }

    /// Grow to hold at least `required` rows. Only list children need this.
    fn reserve(&mut self, required: usize) {
        if required <= self.capacity {
            return;
        }
        let new_capacity = required.max(self.capacity * 2);
        self.data
            .resize(self.logical_type.element_size() * new_capacity, 0);
        self.validity.resize(new_capacity);
        if let TypeKind::Array { size, .. } = self.logical_type.kind() {
            let size = *size;
            self.children[0].reserve(new_capacity * size);
        } else if matches!(self.logical_type.type_id(), TypeId::Struct | TypeId::Union) {
            for child in &mut self.children {
                child.reserve(new_capacity);
            }
        }
        self.capacity = new_capacity;
    }

    fn value_mismatch(&self, value: &Value) -> DuckChunkError {
        DuckChunkError::mismatch(self.logical_type.to_string(), value.type_id())
    }

    fn value_at(&self, row: usize) -> DuckChunkResult<Value> {
        if !self.validity.is_valid(row) {
            return Ok(Value::Null);
        }
        match self.logical_type.kind() {
            TypeKind::Primitive(id) => self.primitive_at(*id, row),
            TypeKind::Decimal {
                width,
                scale,
                internal,
            } => Ok(Value::Decimal {
                value: self.integer_at(*internal, row)?,
                width: *width,
                scale: *scale,
            }),
            TypeKind::Enum {
                dictionary,
                internal,
            } => {
                let index = self.integer_at(*internal, row)? as usize;
                dictionary
                    .get(index)
                    .map(|member| Value::Enum(member.clone()))
                    .ok_or_else(|| {
                        DuckChunkError::out_of_range("enum dictionary", index, dictionary.len())
                    })
            }
            TypeKind::List(_) => {
                let (offset, length) = self.list_entry(row)?;
                let child = &self.children[0];
                let elements = (offset..offset + length)
                    .map(|i| child.value_at(i))
                    .collect::<DuckChunkResult<Vec<_>>>()?;
                Ok(Value::List(elements))
            }
            TypeKind::Map { .. } => {
                let (offset, length) = self.list_entry(row)?;
                let entries = &self.children[0];
                let pairs = (offset..offset + length)
                    .map(|i| {
                        Ok((
                            entries.children[0].value_at(i)?,
                            entries.children[1].value_at(i)?,
                        ))
                    })
                    .collect::<DuckChunkResult<Vec<_>>>()?;
                Ok(Value::Map(pairs))
            }
            TypeKind::Array { size, .. } => {
                let child = &self.children[0];
                let elements = (row * size..(row + 1) * size)
                    .map(|i| child.value_at(i))
                    .collect::<DuckChunkResult<Vec<_>>>()?;
                Ok(Value::Array(elements))
            }
            TypeKind::Struct(fields) => {
                let values = fields
                    .iter()
                    .zip(&self.children)
                    .map(|((name, _), child)| Ok((name.clone(), child.value_at(row)?)))
                    .collect::<DuckChunkResult<Vec<_>>>()?;
                Ok(Value::Struct(values))
            }
            TypeKind::Union(members) => {
                let tag = self.children[0].data[row];
                let member = self.children.get(1 + tag as usize).ok_or_else(|| {
                    DuckChunkError::out_of_range("union tag", tag as usize, members.len())
                })?;
                Ok(Value::Union {
                    tag,
                    value: Box::new(member.value_at(row)?),
                })
            }
        }
    }

    fn list_entry(&self, row: usize) -> DuckChunkResult<(usize, usize)> {
        let at = row * LIST_ENTRY_SIZE;
        let offset = LittleEndian::read_u64(&self.data[at..]) as usize;
        let length = LittleEndian::read_u64(&self.data[at + 8..]) as usize;
        match offset.checked_add(length) {
            Some(end) if end <= self.child_len => Ok((offset, length)),
            _ => Err(invalid_value!(
                "list entry at row {} ({} + {}) exceeds child size {}",
                row,
                offset,
                length,
                self.child_len
            )),
        }
    }

    /// Read the integer stored for a DECIMAL or ENUM row
    fn integer_at(&self, id: TypeId, row: usize) -> DuckChunkResult<i128> {
        let data = &self.data;
        Ok(match id {
            TypeId::TinyInt => data[row] as i8 as i128,
            TypeId::SmallInt => LittleEndian::read_i16(&data[row * 2..]) as i128,
            TypeId::Integer => LittleEndian::read_i32(&data[row * 4..]) as i128,
            TypeId::BigInt => LittleEndian::read_i64(&data[row * 8..]) as i128,
            TypeId::HugeInt => LittleEndian::read_i128(&data[row * 16..]),
            TypeId::UTinyInt => data[row] as i128,
            TypeId::USmallInt => LittleEndian::read_u16(&data[row * 2..]) as i128,
            TypeId::UInteger => LittleEndian::read_u32(&data[row * 4..]) as i128,
            other => return Err(DuckChunkError::mismatch("integer storage", other)),
        })
    }

    fn write_integer(&mut self, id: TypeId, row: usize, value: i128) -> DuckChunkResult<()> {
        let overflow = || invalid_param!("{} does not fit in {}", value, id);
        let data = &mut self.data;
        match id {
            TypeId::TinyInt => data[row] = i8::try_from(value).map_err(|_| overflow())? as u8,
            TypeId::SmallInt => LittleEndian::write_i16(
                &mut data[row * 2..],
                i16::try_from(value).map_err(|_| overflow())?,
            ),
            TypeId::Integer => LittleEndian::write_i32(
                &mut data[row * 4..],
                i32::try_from(value).map_err(|_| overflow())?,
            ),
            TypeId::BigInt => LittleEndian::write_i64(
                &mut data[row * 8..],
                i64::try_from(value).map_err(|_| overflow())?,
            ),
            TypeId::HugeInt => LittleEndian::write_i128(&mut data[row * 16..], value),
            TypeId::UTinyInt => data[row] = u8::try_from(value).map_err(|_| overflow())?,
            TypeId::USmallInt => LittleEndian::write_u16(
                &mut data[row * 2..],
                u16::try_from(value).map_err(|_| overflow())?,
            ),
            TypeId::UInteger => LittleEndian::write_u32(
                &mut data[row * 4..],
                u32::try_from(value).map_err(|_| overflow())?,
            ),
            other => return Err(DuckChunkError::mismatch("integer storage", other)),
        }
        Ok(())
    }

    fn primitive_at(&self, id: TypeId, row: usize) -> DuckChunkResult<Value> {
        let data = &self.data;
        Ok(match id {
            TypeId::Boolean => Value::Boolean(data[row] != 0),
            TypeId::TinyInt => Value::TinyInt(data[row] as i8),
            TypeId::SmallInt => Value::SmallInt(LittleEndian::read_i16(&data[row * 2..])),
            TypeId::Integer => Value::Integer(LittleEndian::read_i32(&data[row * 4..])),
            TypeId::BigInt => Value::BigInt(LittleEndian::read_i64(&data[row * 8..])),
            TypeId::HugeInt => Value::HugeInt(LittleEndian::read_i128(&data[row * 16..])),
            TypeId::UTinyInt => Value::UTinyInt(data[row]),
            TypeId::USmallInt => Value::USmallInt(LittleEndian::read_u16(&data[row * 2..])),
            TypeId::UInteger => Value::UInteger(LittleEndian::read_u32(&data[row * 4..])),
            TypeId::UBigInt => Value::UBigInt(LittleEndian::read_u64(&data[row * 8..])),
            TypeId::UHugeInt => Value::UHugeInt(LittleEndian::read_u128(&data[row * 16..])),
            TypeId::Float => Value::Float(LittleEndian::read_f32(&data[row * 4..])),
            TypeId::Double => Value::Double(LittleEndian::read_f64(&data[row * 8..])),
            TypeId::Date => Value::Date(LittleEndian::read_i32(&data[row * 4..])),
            TypeId::Time => Value::Time(LittleEndian::read_i64(&data[row * 8..])),
            TypeId::TimeTz => {
                let bits = LittleEndian::read_u64(&data[row * 8..]);
                Value::TimeTz {
                    micros: (bits >> 24) as i64,
                    offset: MAX_TZ_OFFSET - (bits & 0xFF_FFFF) as i32,
                }
            }
            TypeId::Timestamp => Value::Timestamp(LittleEndian::read_i64(&data[row * 8..])),
            TypeId::TimestampS => Value::TimestampS(LittleEndian::read_i64(&data[row * 8..])),
            TypeId::TimestampMs => Value::TimestampMs(LittleEndian::read_i64(&data[row * 8..])),
            TypeId::TimestampNs => Value::TimestampNs(LittleEndian::read_i64(&data[row * 8..])),
            TypeId::TimestampTz => Value::TimestampTz(LittleEndian::read_i64(&data[row * 8..])),
            TypeId::Interval => {
                let at = row * 16;
                Value::Interval {
                    months: LittleEndian::read_i32(&data[at..]),
                    days: LittleEndian::read_i32(&data[at + 4..]),
                    micros: LittleEndian::read_i64(&data[at + 8..]),
                }
            }
            TypeId::Uuid => Value::Uuid(uuid::Uuid::from_u128(
                LittleEndian::read_u128(&data[row * 16..]) ^ UUID_SIGN_FLIP,
            )),
            TypeId::Varchar => {
                let bytes = self.string_at(row)?;
                Value::Varchar(String::from_utf8(bytes.to_vec()).map_err(|e| {
                    invalid_value!("invalid UTF-8 in VARCHAR at row {}: {}", row, e)
                })?)
            }
            TypeId::Blob => Value::Blob(self.string_at(row)?.to_vec()),
            TypeId::Bit => Value::Bit(decode_bits(self.string_at(row)?)?),
            TypeId::SqlNull => Value::Null,
            other => return Err(DuckChunkError::mismatch("primitive type", other)),
        })
    }

    fn string_at(&self, row: usize) -> DuckChunkResult<&[u8]> {
        let at = row * STRING_RECORD_SIZE;
        let record = &self.data[at..at + STRING_RECORD_SIZE];
        let length = LittleEndian::read_u32(record) as usize;
        if length <= STRING_INLINE_LENGTH {
            return Ok(&record[4..4 + length]);
        }
        let offset = LittleEndian::read_u64(&record[8..]) as usize;
        offset
            .checked_add(length)
            .and_then(|end| self.heap.get(offset..end))
            .ok_or_else(|| invalid_value!("string at row {} points outside the heap", row))
    }

    fn write_string(&mut self, row: usize, bytes: &[u8]) -> DuckChunkResult<()> {
        let length = u32::try_from(bytes.len())
            .map_err(|_| invalid_param!("string of {} bytes is too long", bytes.len()))?;
        let at = row * STRING_RECORD_SIZE;
        let record = &mut self.data[at..at + STRING_RECORD_SIZE];
        record.fill(0);
        LittleEndian::write_u32(&mut record[..4], length);
        if bytes.len() <= STRING_INLINE_LENGTH {
            record[4..4 + bytes.len()].copy_from_slice(bytes);
        } else {
            record[4..8].copy_from_slice(&bytes[..4]);
            LittleEndian::write_u64(&mut record[8..], self.heap.len() as u64);
            self.heap.extend_from_slice(bytes);
        }
        Ok(())
    }

    fn write_value(&mut self, row: usize, value: &Value) -> DuckChunkResult<()> {
        match self.logical_type.kind() {
            TypeKind::Primitive(id) => {
                let id = *id;
                self.write_primitive(id, row, value)
            }
            TypeKind::Decimal {
                width,
                scale,
                internal,
            } => {
                let (width, scale, internal) = (*width, *scale, *internal);
                let unscaled = match coerce_to_decimal(value, scale)? {
                    Some(unscaled) => unscaled,
                    None => return Err(self.value_mismatch(value)),
                };
                if unscaled.unsigned_abs() >= 10_u128.pow(width as u32) {
                    return Err(invalid_param!(
                        "{} does not fit in DECIMAL({},{})",
                        format_decimal(unscaled, scale),
                        width,
                        scale
                    ));
                }
                self.write_integer(internal, row, unscaled)
            }
            TypeKind::Enum {
                dictionary,
                internal,
            } => {
                let internal = *internal;
                let index = match value {
                    Value::Enum(member) => dictionary
                        .iter()
                        .position(|entry| entry == member)
                        .ok_or_else(|| invalid_value!("'{}' is not a member of {}", member, self.logical_type))?,
                    _ => return Err(self.value_mismatch(value)),
                };
                self.write_integer(internal, row, index as i128)
            }
            TypeKind::List(_) => self.write_list(row, value),
            TypeKind::Map { .. } => self.write_map(row, value),
            TypeKind::Array { size, .. } => {
                let size = *size;
                self.write_array(row, size, value)
            }
            TypeKind::Struct(_) => self.write_struct(row, value),
            TypeKind::Union(_) => self.write_union(row, value),
        }
    }

    fn write_primitive(&mut self, id: TypeId, row: usize, value: &Value) -> DuckChunkResult<()> {
        match (id, value) {
            (TypeId::Boolean, Value::Boolean(v)) => self.data[row] = *v as u8,
            (TypeId::TinyInt, Value::TinyInt(v)) => self.data[row] = *v as u8,
            (TypeId::SmallInt, Value::SmallInt(v)) => {
                LittleEndian::write_i16(&mut self.data[row * 2..], *v)
            }
            (TypeId::Integer, Value::Integer(v)) | (TypeId::Date, Value::Date(v)) => {
                LittleEndian::write_i32(&mut self.data[row * 4..], *v)
            }
            (TypeId::BigInt, Value::BigInt(v))
            | (TypeId::Time, Value::Time(v))
            | (TypeId::Timestamp, Value::Timestamp(v))
            | (TypeId::TimestampS, Value::TimestampS(v))
            | (TypeId::TimestampMs, Value::TimestampMs(v))
            | (TypeId::TimestampNs, Value::TimestampNs(v))
            | (TypeId::TimestampTz, Value::TimestampTz(v)) => {
                LittleEndian::write_i64(&mut self.data[row * 8..], *v)
            }
            (TypeId::HugeInt, Value::HugeInt(v)) => {
                LittleEndian::write_i128(&mut self.data[row * 16..], *v)
            }
            (TypeId::UTinyInt, Value::UTinyInt(v)) => self.data[row] = *v,
            (TypeId::USmallInt, Value::USmallInt(v)) => {
                LittleEndian::write_u16(&mut self.data[row * 2..], *v)
            }
            (TypeId::UInteger, Value::UInteger(v)) => {
                LittleEndian::write_u32(&mut self.data[row * 4..], *v)
            }
            (TypeId::UBigInt, Value::UBigInt(v)) => {
                LittleEndian::write_u64(&mut self.data[row * 8..], *v)
            }
            (TypeId::UHugeInt, Value::UHugeInt(v)) => {
                LittleEndian::write_u128(&mut self.data[row * 16..], *v)
            }
            (TypeId::Float, Value::Float(v)) => {
                LittleEndian::write_f32(&mut self.data[row * 4..], *v)
            }
            (TypeId::Double, Value::Double(v)) => {
                LittleEndian::write_f64(&mut self.data[row * 8..], *v)
            }
            (TypeId::TimeTz, Value::TimeTz { micros, offset }) => {
                if offset.unsigned_abs() > MAX_TZ_OFFSET as u32 {
                    return Err(invalid_param!(
                        "time zone offset {}s exceeds {}s",
                        offset,
                        MAX_TZ_OFFSET
                    ));
                }
                if *micros < 0 || *micros >= 1 << 40 {
                    return Err(invalid_param!("time of day {}us is out of range", micros));
                }
                let bits = ((*micros as u64) << 24) | (MAX_TZ_OFFSET - *offset) as u64;
                LittleEndian::write_u64(&mut self.data[row * 8..], bits)
            }
            (TypeId::Interval, Value::Interval {
                months,
                days,
                micros,
            }) => {
                let at = row * 16;
                LittleEndian::write_i32(&mut self.data[at..], *months);
                LittleEndian::write_i32(&mut self.data[at + 4..], *days);
                LittleEndian::write_i64(&mut self.data[at + 8..], *micros);
            }
            (TypeId::Uuid, Value::Uuid(uuid)) => LittleEndian::write_u128(
                &mut self.data[row * 16..],
                uuid.as_u128() ^ UUID_SIGN_FLIP,
            ),
            (TypeId::Varchar, Value::Varchar(text)) => {
                return self.write_string(row, text.as_bytes())
            }
            (TypeId::Blob, Value::Blob(bytes)) => return self.write_string(row, bytes),
            (TypeId::Bit, Value::Bit(bits)) => return self.write_string(row, &encode_bits(bits)),
            _ => return Err(self.value_mismatch(value)),
        }
        Ok(())
    }

    fn write_list(&mut self, row: usize, value: &Value) -> DuckChunkResult<()> {
        let elements = match value {
            Value::List(elements) | Value::Array(elements) => elements,
            _ => return Err(self.value_mismatch(value)),
        };
        let offset = self.child_len;
        let child = &mut self.children[0];
        child.reserve(offset + elements.len());
        for (i, element) in elements.iter().enumerate() {
            child.set_value(offset + i, element)?;
        }
        self.push_list_entry(row, offset, elements.len());
        Ok(())
    }

    fn write_map(&mut self, row: usize, value: &Value) -> DuckChunkResult<()> {
        let pairs = match value {
            Value::Map(pairs) => pairs,
            _ => return Err(self.value_mismatch(value)),
        };
        let offset = self.child_len;
        let entries = &mut self.children[0];
        entries.reserve(offset + pairs.len());
        for (i, (key, item)) in pairs.iter().enumerate() {
            if key.is_null() {
                return Err(invalid_param!("map keys cannot be NULL"));
            }
            entries.children[0].set_value(offset + i, key)?;
            entries.children[1].set_value(offset + i, item)?;
            entries.validity.set_valid(offset + i, true);
        }
        self.push_list_entry(row, offset, pairs.len());
        Ok(())
    }

    fn push_list_entry(&mut self, row: usize, offset: usize, length: usize) {
        self.child_len = offset + length;
        self.children[0].set_count(self.child_len);
        let at = row * LIST_ENTRY_SIZE;
        LittleEndian::write_u64(&mut self.data[at..], offset as u64);
        LittleEndian::write_u64(&mut self.data[at + 8..], length as u64);
    }

    fn write_array(&mut self, row: usize, size: usize, value: &Value) -> DuckChunkResult<()> {
        let elements = match value {
            Value::Array(elements) | Value::List(elements) => elements,
            _ => return Err(self.value_mismatch(value)),
        };
        if elements.len() != size {
            return Err(invalid_param!(
                "array value has {} elements, type {} needs {}",
                elements.len(),
                self.logical_type,
                size
            ));
        }
        let child = &mut self.children[0];
        for (i, element) in elements.iter().enumerate() {
            child.set_value(row * size + i, element)?;
        }
        Ok(())
    }

    /// Fields are matched to children by position
    fn write_struct(&mut self, row: usize, value: &Value) -> DuckChunkResult<()> {
        let fields = match value {
            Value::Struct(fields) => fields,
            _ => return Err(self.value_mismatch(value)),
        };
        if fields.len() != self.children.len() {
            return Err(invalid_param!(
                "struct value has {} fields, type {} has {}",
                fields.len(),
                self.logical_type,
                self.children.len()
            ));
        }
        for (child, (_, field)) in self.children.iter_mut().zip(fields) {
            child.set_value(row, field)?;
        }
        Ok(())
    }

    fn write_union(&mut self, row: usize, value: &Value) -> DuckChunkResult<()> {
        let (tag, inner) = match value {
            Value::Union { tag, value } => (*tag, value.as_ref()),
            _ => return Err(self.value_mismatch(value)),
        };
        let members = self.children.len() - 1;
        if tag as usize >= members {
            return Err(DuckChunkError::out_of_range("union tag", tag as usize, members));
        }
        self.children[0].set_value(row, &Value::UTinyInt(tag))?;
        for (i, member) in self.children[1..].iter_mut().enumerate() {
            if i == tag as usize {
                member.set_value(row, inner)?;
            } else {
                member.set_null(row)?;
            }
        }
        Ok(())
    }
}

/// Unscaled integer for a value stored into a decimal of the given scale.
/// `None` when the value is not numeric.
fn coerce_to_decimal(value: &Value, scale: u8) -> DuckChunkResult<Option<i128>> {
    let factor = 10_i128.pow(scale as u32);
    let unscaled = match value {
        Value::Decimal {
            value: unscaled,
            scale: from,
            ..
        } => rescale(*unscaled, *from, scale)?,
        Value::Double(_) | Value::Float(_) => {
            let float = value.try_as_f64()?;
            if !float.is_finite() {
                return Err(invalid_param!("{} cannot be stored as a decimal", float));
            }
            (float * factor as f64).round() as i128
        }
        other => {
            let integer: i128 = match other {
                Value::TinyInt(v) => (*v).into(),
                Value::SmallInt(v) => (*v).into(),
                Value::Integer(v) => (*v).into(),
                Value::BigInt(v) => (*v).into(),
                Value::HugeInt(v) => *v,
                Value::UTinyInt(v) => (*v).into(),
                Value::USmallInt(v) => (*v).into(),
                Value::UInteger(v) => (*v).into(),
                Value::UBigInt(v) => (*v).into(),
                Value::UHugeInt(v) => i128::try_from(*v)
                    .map_err(|_| invalid_param!("{} overflows a decimal", v))?,
                _ => return Ok(None),
            };
            integer
                .checked_mul(factor)
                .ok_or_else(|| invalid_param!("{} overflows at scale {}", integer, scale))?
        }
    };
    Ok(Some(unscaled))
}

fn rescale(unscaled: i128, from: u8, to: u8) -> DuckChunkResult<i128> {
    if from <= to {
        unscaled
            .checked_mul(10_i128.pow((to - from) as u32))
            .ok_or_else(|| invalid_param!("decimal overflows at scale {}", to))
    } else {
        let divisor = 10_i128.pow((from - to) as u32);
        if unscaled % divisor != 0 {
            return Err(invalid_param!(
                "{} loses precision at scale {}",
                format_decimal(unscaled, from),
                to
            ));
        }
        Ok(unscaled / divisor)
    }
}

/// Bit strings are a padding count byte followed by the bits, most significant
/// first. Padding bits at the front of the first byte are set.
fn encode_bits(bits: &[bool]) -> Vec<u8> {
    let padding = (8 - bits.len() % 8) % 8;
    let mut bytes = vec![0u8; 1 + (padding + bits.len()) / 8];
    bytes[0] = padding as u8;
    for position in 0..padding + bits.len() {
        if position < padding || bits[position - padding] {
            bytes[1 + position / 8] |= 0x80 >> (position % 8);
        }
    }
    bytes
}

fn decode_bits(bytes: &[u8]) -> DuckChunkResult<Vec<bool>> {
    let (&padding, payload) = bytes
        .split_first()
        .ok_or_else(|| invalid_value!("empty BIT payload"))?;
    let padding = padding as usize;
    if padding > 7 || (payload.is_empty() && padding > 0) {
        return Err(invalid_value!("invalid BIT padding {}", padding));
    }
    Ok((padding..payload.len() * 8)
        .map(|position| payload[position / 8] & (0x80 >> (position % 8)) != 0)
        .collect())
}
