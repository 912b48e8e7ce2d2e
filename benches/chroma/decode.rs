use criterion::Criterion;
use libchroma::chroma::decode_collection;
use std::hint::black_box;

const SMALL: &[u8] = br#"{"id":"2b1f5c7e-9c2a-4f0e-8d9b-6f3c1a7e4d21","name":"TestCollection"}"#;

pub fn bench_decode_collection(c: &mut Criterion) {
    let mut large = String::from(r#"{"metadata":{"tags":["#);
    for i in 0..200 {
        if i > 0 {
            large.push(',');
        }
        large.push_str(&format!(r#"{{"k{i}":{i}.5,"v":"value-{i}"}}"#));
    }
    large.push_str(r#"]},"tenant":"default_tenant","name":"TestCollection","id":"2b1f5c7e-9c2a-4f0e-8d9b-6f3c1a7e4d21"}"#);

    let mut group = c.benchmark_group("decode_collection");
    group.bench_function("small", |b| {
        b.iter(|| black_box(decode_collection(black_box(SMALL))))
    });
    group.bench_function("nested_metadata", |b| {
        b.iter(|| black_box(decode_collection(black_box(large.as_bytes()))))
    });
    group.bench_function("invalid", |b| {
        b.iter(|| black_box(decode_collection(black_box(b"not json"))))
    });
    group.finish();
}
