use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use oxdiff::{BytesPerRow, Configuration, Endianness, NumericFormat, Transcoder};
use std::io::Cursor;

const INPUT_SIZE: usize = 1024 * 1024;

fn transcode_benchmark(c: &mut Criterion) {
    let data: Vec<u8> = (0..INPUT_SIZE).map(|value| (value * 31) as u8).collect();
    let mut group = c.benchmark_group("transcode");
    group.throughput(Throughput::Bytes(INPUT_SIZE as u64));
    for bytes_per_row in [8_usize, 64] {
        for format in [None, Some(NumericFormat::Float64)] {
            let config = Configuration::new(
                BytesPerRow::try_from(bytes_per_row).unwrap(),
                format,
                Endianness::Little,
            );
            let transcoder = Transcoder::new(config).unwrap();
            let id = BenchmarkId::new(
                format.map_or("plain".to_string(), |format| format.to_string()),
                bytes_per_row,
            );
            group.bench_with_input(id, &data, |b, data| {
                b.iter(|| {
                    let mut output: Vec<u8> = Vec::with_capacity(INPUT_SIZE * 4);
                    transcoder
                        .transcode(&mut Cursor::new(black_box(data)), &mut output)
                        .unwrap();
                    output
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, transcode_benchmark);
criterion_main!(benches);
