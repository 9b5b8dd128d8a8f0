use std::hint::black_box;
use std::io::Write;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use csv_records::CsvStreamReader;
use tempfile::NamedTempFile;

/// Generate a synthetic named CSV file with N records
fn generate_csv_file(num_records: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();

    writeln!(file, "Id,First Name,Last Name,Mailing Address").unwrap();
    for i in 0..num_records {
        writeln!(file, "{},First {},Last {},\"{} Main Street, Springfield, XX\"", i, i, i, i)
            .unwrap();
    }

    file.flush().unwrap();
    file
}

fn bench_read_named(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_to_end_named");

    for size in [100, 1_000, 10_000, 50_000].iter() {
        let file = generate_csv_file(*size);
        let mut reader = CsvStreamReader::open(file.path()).unwrap();

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(reader.read_to_end().unwrap()));
        });
    }

    group.finish();
}

fn bench_read_unnamed(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_to_end_unnamed");

    for size in [1_000, 10_000].iter() {
        let file = generate_csv_file(*size);
        let mut reader = CsvStreamReader::open_unnamed(file.path()).unwrap();

        group.throughput(Throughput::Elements(*size as u64 + 1));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(reader.read_to_end().unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_read_named, bench_read_unnamed);
criterion_main!(benches);
