use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lascodec::{
    Header, Reader, Version, Writer,
    point::{Format, Point},
};
use std::{hint::black_box, io::Cursor};

fn roundtrip(npoints: usize) {
    let header = Header::new(Version::new(1, 2), 3).unwrap();
    let mut writer = Writer::new(Cursor::new(Vec::new()), header, &[]).unwrap();
    let point = Point::new(Format::new(3).unwrap());
    for _ in 0..npoints {
        writer.write_point(&point).unwrap();
    }
    let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
    for point in reader.points().unwrap() {
        let _ = black_box(point.unwrap());
    }
}

fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("roundtrip");
    for npoints in [0, 1, 100, 10000] {
        let _ = group.bench_with_input(
            BenchmarkId::from_parameter(npoints),
            &npoints,
            |b, &npoints| b.iter(|| roundtrip(npoints)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench);
criterion_main!(benches);
