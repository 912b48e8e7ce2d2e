use criterion::{criterion_group, criterion_main};

mod chroma;
mod network;

criterion_group!(
    benches,
    network::application::http::buffer::bench_fill_from,
    network::application::http::buffer::bench_chunked_request,
    chroma::decode::bench_decode_collection,
);
criterion_main!(benches);
