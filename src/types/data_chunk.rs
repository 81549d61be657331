use crate::common::config::ChunkConfig;
use crate::common::error::{DuckChunkError, DuckChunkResult};
use crate::convert::ValueConverter;
use crate::invalid_param;
use crate::types::logical_type::LogicalType;
use crate::types::value::Value;
use crate::types::vector::{Vector, WriteMark};
use std::fmt;

/// A DataChunk is a batch of equally long columns, one vector per column.
/// This is the unit of bulk transfer to and from the engine.
///
/// The chunk owns its vectors: column access hands out references to the
/// same vector every time, and releasing the chunk releases all of them.
#[derive(Debug, Clone)]
pub struct DataChunk {
    /// The vectors (columns) in this chunk
    vectors: Vec<Vector>,
    /// The number of rows in this chunk
    count: usize,
    /// The capacity of this chunk
    capacity: usize,
}

impl DataChunk {
    /// Create a chunk with one column per type and the default capacity.
    /// The types are copied; the caller keeps ownership of them.
    pub fn create(types: &[LogicalType]) -> Self {
        Self::allocate(types, ChunkConfig::default().vector_size)
    }

    /// Create a chunk with the capacity taken from a configuration
    pub fn with_config(types: &[LogicalType], config: &ChunkConfig) -> DuckChunkResult<Self> {
        config.validate()?;
        Ok(Self::allocate(types, config.vector_size))
    }

    /// Create a chunk with an explicit capacity
    pub fn with_capacity(types: &[LogicalType], capacity: usize) -> DuckChunkResult<Self> {
        let config = ChunkConfig::with_vector_size(capacity)?;
        Ok(Self::allocate(types, config.vector_size))
    }

    fn allocate(types: &[LogicalType], capacity: usize) -> Self {
        let vectors: Vec<Vector> = types
            .iter()
            .map(|logical_type| Vector::new(logical_type.clone(), capacity))
            .collect();
        tracing::trace!(columns = vectors.len(), capacity, "created data chunk");

        Self {
            vectors,
            count: 0,
            capacity,
        }
    }

    /// Clear all rows. Column count and types are unchanged.
    pub fn reset(&mut self) {
        tracing::debug!(rows = self.count, "resetting data chunk");
        for vector in &mut self.vectors {
            vector.reset();
        }
        self.count = 0;
    }

    /// Get the number of vectors (columns) in this chunk
    pub fn column_count(&self) -> usize {
        self.vectors.len()
    }

    /// Get the types of all columns. Each type is a fresh copy.
    pub fn column_types(&self) -> Vec<LogicalType> {
        self.vectors
            .iter()
            .map(|vector| vector.logical_type().clone())
            .collect()
    }

    pub(crate) fn column_type_refs(&self) -> Vec<&LogicalType> {
        self.vectors.iter().map(Vector::logical_type).collect()
    }

    /// Get the capacity of this chunk
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the number of rows in this chunk
    pub fn row_count(&self) -> usize {
        self.count
    }

    /// Check if this chunk is empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Set the number of rows in use, after the engine has filled the vectors
    pub fn set_row_count(&mut self, count: usize) -> DuckChunkResult<()> {
        if count > self.capacity {
            return Err(invalid_param!(
                "Row count {} exceeds chunk capacity {}",
                count,
                self.capacity
            ));
        }
        for vector in &mut self.vectors {
            vector.set_count(count);
        }
        self.count = count;
        Ok(())
    }

    /// Get the vector of a column
    pub fn get_column_vector(&self, column: usize) -> DuckChunkResult<&Vector> {
        let columns = self.vectors.len();
        self.vectors
            .get(column)
            .ok_or_else(|| DuckChunkError::out_of_range("column", column, columns))
    }

    /// Get the vector of a column for population
    pub fn get_column_vector_mut(&mut self, column: usize) -> DuckChunkResult<&mut Vector> {
        let columns = self.vectors.len();
        self.vectors
            .get_mut(column)
            .ok_or_else(|| DuckChunkError::out_of_range("column", column, columns))
    }

    /// Decode every row of one column
    pub fn get_column_values(&self, column: usize) -> DuckChunkResult<Vec<Value>> {
        self.get_column_vector(column)?.to_values()
    }

    /// Decode the chunk column by column
    pub fn get_columns(&self) -> DuckChunkResult<Vec<Vec<Value>>> {
        self.vectors.iter().map(Vector::to_values).collect()
    }

    /// Decode the chunk row by row. Transposes every column, so it costs
    /// rows x columns decodes.
    pub fn get_rows(&self) -> DuckChunkResult<Vec<Vec<Value>>> {
        let mut columns: Vec<_> = self
            .get_columns()?
            .into_iter()
            .map(Vec::into_iter)
            .collect();
        let rows: Vec<Vec<Value>> = (0..self.count)
            .map(|_| {
                columns
                    .iter_mut()
                    .map(|column| column.next().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();
        tracing::debug!(
            rows = rows.len(),
            columns = self.vectors.len(),
            "assembled rows"
        );
        Ok(rows)
    }

    /// Decode one row
    pub fn get_row_values(&self, row: usize) -> DuckChunkResult<Vec<Value>> {
        if row >= self.count {
            return Err(DuckChunkError::out_of_range("row", row, self.count));
        }
        self.vectors
            .iter()
            .map(|vector| vector.get_value(row))
            .collect()
    }

    /// Decode one row and convert each value
    pub fn convert_row_values<C>(&self, row: usize, converter: &C) -> DuckChunkResult<Vec<C::Output>>
    where
        C: ValueConverter + ?Sized,
    {
        self.get_row_values(row)?
            .into_iter()
            .zip(&self.vectors)
            .map(|(value, vector)| converter.convert_value(value, vector.logical_type()))
            .collect()
    }

    /// Append a row to this chunk. If any value cannot be written, every
    /// column is returned to its state before the call.
    pub fn append_row(&mut self, values: &[Value]) -> DuckChunkResult<()> {
        if values.len() != self.vectors.len() {
            return Err(invalid_param!(
                "Expected {} values, got {}",
                self.vectors.len(),
                values.len()
            ));
        }
        if self.count >= self.capacity {
            return Err(invalid_param!(
                "Data chunk is full ({} rows)",
                self.capacity
            ));
        }

        let row = self.count;
        let marks: Vec<WriteMark> = self.vectors.iter().map(Vector::write_mark).collect();
        for column in 0..self.vectors.len() {
            if let Err(e) = self.vectors[column].set_value(row, &values[column]) {
                for (vector, mark) in self.vectors.iter_mut().zip(&marks).take(column + 1) {
                    vector.rollback(row, mark);
                }
                return Err(e);
            }
        }
        self.set_row_count(row + 1)
    }

    /// Get an iterator over rows in this chunk
    pub fn row_iter(&self) -> RowIterator<'_> {
        RowIterator {
            chunk: self,
            row: 0,
        }
    }

    /// Release the chunk and every vector it owns. Equivalent to dropping it.
    pub fn release(self) {
        tracing::trace!(
            columns = self.vectors.len(),
            rows = self.count,
            "released data chunk"
        );
    }
}

impl fmt::Display for DataChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DataChunk {{")?;
        writeln!(
            f,
            "  rows: {}, columns: {}, capacity: {}",
            self.count,
            self.vectors.len(),
            self.capacity
        )?;

        for (i, vector) in self.vectors.iter().enumerate() {
            writeln!(f, "  column {}: {}", i, vector.logical_type())?;
        }

        write!(f, "}}")
    }
}

/// Iterator for rows in a DataChunk
pub struct RowIterator<'a> {
    chunk: &'a DataChunk,
    row: usize,
}

impl<'a> Iterator for RowIterator<'a> {
    type Item = DuckChunkResult<Vec<Value>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.row >= self.chunk.count {
            None
        } else {
            let row = self.chunk.get_row_values(self.row);
            self.row += 1;
            Some(row)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.chunk.count.saturating_sub(self.row);
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::constants::STANDARD_VECTOR_SIZE;
    use crate::convert::PlainValues;
    use pretty_assertions::assert_eq;

    fn sample_chunk() -> DataChunk {
        let mut chunk = DataChunk::with_capacity(
            &[LogicalType::integer(), LogicalType::varchar()],
            4,
        )
        .unwrap();
        chunk
            .append_row(&[Value::Integer(1), Value::varchar("one")])
            .unwrap();
        chunk
            .append_row(&[Value::Null, Value::varchar("two")])
            .unwrap();
        chunk
    }

    #[test]
    fn test_data_chunk_creation() {
        let types = vec![
            LogicalType::integer(),
            LogicalType::varchar(),
            LogicalType::boolean(),
        ];
        let chunk = DataChunk::create(&types);

        assert_eq!(chunk.column_count(), 3);
        assert_eq!(chunk.capacity(), STANDARD_VECTOR_SIZE);
        assert_eq!(chunk.row_count(), 0);
        assert!(chunk.is_empty());
        assert_eq!(chunk.column_types(), types);
    }

    #[test]
    fn test_config_controls_capacity() {
        let config = ChunkConfig::with_vector_size(16).unwrap();
        let chunk = DataChunk::with_config(&[LogicalType::integer()], &config).unwrap();
        assert_eq!(chunk.capacity(), 16);
        assert_eq!(chunk.get_column_vector(0).unwrap().capacity(), 16);

        let bad = ChunkConfig { vector_size: 0 };
        assert!(DataChunk::with_config(&[LogicalType::integer()], &bad).is_err());
    }

    #[test]
    fn test_row_count_bounds() {
        let mut chunk = DataChunk::with_capacity(&[LogicalType::integer()], 8).unwrap();
        chunk.set_row_count(8).unwrap();
        assert_eq!(chunk.row_count(), 8);
        assert_eq!(chunk.get_column_vector(0).unwrap().len(), 8);
        assert!(matches!(
            chunk.set_row_count(9).unwrap_err(),
            DuckChunkError::InvalidParameter(_)
        ));
        assert_eq!(chunk.row_count(), 8);
    }

    #[test]
    fn test_column_access() {
        let chunk = sample_chunk();
        assert_eq!(
            chunk.get_column_vector(2).unwrap_err(),
            DuckChunkError::out_of_range("column", 2, 2)
        );
        let first = chunk.get_column_vector(1).unwrap();
        let second = chunk.get_column_vector(1).unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(
            chunk.get_column_values(0).unwrap(),
            vec![Value::Integer(1), Value::Null]
        );
    }

    #[test]
    fn test_rows_and_columns() {
        let chunk = sample_chunk();
        assert_eq!(
            chunk.get_rows().unwrap(),
            vec![
                vec![Value::Integer(1), Value::varchar("one")],
                vec![Value::Null, Value::varchar("two")],
            ]
        );
        assert_eq!(
            chunk.get_columns().unwrap(),
            vec![
                vec![Value::Integer(1), Value::Null],
                vec![Value::varchar("one"), Value::varchar("two")],
            ]
        );
        assert_eq!(
            chunk.get_row_values(1).unwrap(),
            vec![Value::Null, Value::varchar("two")]
        );
        assert!(chunk.get_row_values(2).is_err());
        assert_eq!(
            chunk.row_iter().collect::<DuckChunkResult<Vec<_>>>().unwrap(),
            chunk.get_rows().unwrap()
        );
    }

    #[test]
    fn test_append_row_errors() {
        let mut chunk = sample_chunk();
        assert!(matches!(
            chunk.append_row(&[Value::Integer(1)]).unwrap_err(),
            DuckChunkError::InvalidParameter(_)
        ));
        assert!(matches!(
            chunk
                .append_row(&[Value::varchar("x"), Value::varchar("y")])
                .unwrap_err(),
            DuckChunkError::TypeMismatch { .. }
        ));
        assert_eq!(chunk.row_count(), 2);

        chunk.append_row(&[Value::Integer(3), Value::Null]).unwrap();
        chunk.append_row(&[Value::Integer(4), Value::Null]).unwrap();
        assert!(matches!(
            chunk.append_row(&[Value::Integer(5), Value::Null]).unwrap_err(),
            DuckChunkError::InvalidParameter(_)
        ));
    }

    #[test]
    fn test_failed_append_rolls_back_written_columns() {
        let types = [
            LogicalType::list(&LogicalType::varchar()),
            LogicalType::varchar(),
            LogicalType::integer(),
        ];
        let mut chunk = DataChunk::with_capacity(&types, 4).unwrap();
        chunk
            .append_row(&[
                Value::List(vec![Value::varchar("kept")]),
                Value::varchar("kept as well"),
                Value::Integer(1),
            ])
            .unwrap();
        let list_size = chunk.get_column_vector(0).unwrap().list_size().unwrap();

        let err = chunk
            .append_row(&[
                Value::List(vec![
                    Value::varchar("a string longer than twelve bytes"),
                    Value::varchar("b"),
                ]),
                Value::varchar("another string past the inline limit"),
                Value::varchar("not an integer"),
            ])
            .unwrap_err();
        assert!(matches!(err, DuckChunkError::TypeMismatch { .. }));
        assert_eq!(chunk.row_count(), 1);
        assert_eq!(
            chunk.get_column_vector(0).unwrap().list_size().unwrap(),
            list_size
        );

        // the abandoned slot reads as NULL if the row count is raised over it
        chunk.set_row_count(2).unwrap();
        assert_eq!(
            chunk.get_row_values(1).unwrap(),
            vec![Value::Null, Value::Null, Value::Null]
        );
        chunk.set_row_count(1).unwrap();

        chunk
            .append_row(&[
                Value::List(vec![Value::varchar("next")]),
                Value::varchar("next row"),
                Value::Integer(2),
            ])
            .unwrap();
        assert_eq!(
            chunk.get_rows().unwrap(),
            vec![
                vec![
                    Value::List(vec![Value::varchar("kept")]),
                    Value::varchar("kept as well"),
                    Value::Integer(1),
                ],
                vec![
                    Value::List(vec![Value::varchar("next")]),
                    Value::varchar("next row"),
                    Value::Integer(2),
                ],
            ]
        );
    }

    #[test]
    fn test_reset() {
        let mut chunk = sample_chunk();
        chunk.reset();
        chunk.set_row_count(0).unwrap();
        assert_eq!(chunk.row_count(), 0);
        assert!(chunk.get_rows().unwrap().is_empty());
        assert_eq!(chunk.get_columns().unwrap(), vec![vec![], vec![]]);
        assert_eq!(chunk.column_count(), 2);

        chunk.set_row_count(1).unwrap();
        assert_eq!(
            chunk.get_row_values(0).unwrap(),
            vec![Value::Integer(0), Value::varchar("")]
        );
    }

    #[test]
    fn test_convert_row_values() {
        let chunk = sample_chunk();
        assert_eq!(
            chunk.convert_row_values(0, &PlainValues).unwrap(),
            vec![Value::Integer(1), Value::varchar("one")]
        );
    }

    #[test]
    fn test_display() {
        let chunk = sample_chunk();
        let text = chunk.to_string();
        assert!(text.contains("rows: 2, columns: 2, capacity: 4"));
        assert!(text.contains("column 1: VARCHAR"));
        chunk.release();
    }
}
