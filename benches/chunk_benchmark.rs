use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use duckchunk::convert::PerValue;
use duckchunk::{
    convert_rows_from_chunks, DataChunk, JsonValueConverter, LogicalType, PlainValues, Value,
};
use std::hint::black_box;

fn filled_chunk(rows: usize) -> DataChunk {
    let types = [
        LogicalType::integer(),
        LogicalType::varchar(),
        LogicalType::list(&LogicalType::double()),
    ];
    let mut chunk = DataChunk::with_capacity(&types, rows).unwrap();
    for i in 0..rows {
        chunk
            .append_row(&[
                Value::Integer(i as i32),
                Value::Varchar(format!("row number {}", i)),
                Value::List(vec![Value::Double(i as f64), Value::Double(0.5)]),
            ])
            .unwrap();
    }
    chunk
}

fn bench_append_rows(c: &mut Criterion) {
    c.bench_function("append_rows_2048", |b| {
        b.iter(|| black_box(filled_chunk(2048)))
    });
}

fn bench_get_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_rows");
    for rows in [64, 512, 2048] {
        let chunk = filled_chunk(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &chunk, |b, chunk| {
            b.iter(|| black_box(chunk.get_rows().unwrap()))
        });
    }
    group.finish();
}

fn bench_convert_rows(c: &mut Criterion) {
    let chunks = vec![filled_chunk(2048), filled_chunk(2048)];
    c.bench_function("convert_plain_rows", |b| {
        b.iter(|| black_box(convert_rows_from_chunks(&chunks, &PlainValues).unwrap()))
    });
    c.bench_function("convert_json_rows", |b| {
        b.iter(|| {
            black_box(convert_rows_from_chunks(&chunks, &PerValue(JsonValueConverter)).unwrap())
        })
    });
}

criterion_group!(benches, bench_append_rows, bench_get_rows, bench_convert_rows);
criterion_main!(benches);
