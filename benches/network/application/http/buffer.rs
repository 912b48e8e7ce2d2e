use criterion::{Criterion, Throughput};
use libchroma::network::application::http::{Client, Method, Request, ResponseBuffer};
use libchroma::network::error::Error;
use libchroma::network::{Close, Connection, Read, Write};
use std::hint::black_box;

const BODY_LEN: usize = 4000;

/// Serves `data` in reads of at most `chunk` bytes.
struct Replay<'a> {
    data: &'a [u8],
    pos: usize,
    chunk: usize,
}

impl Read for Replay<'_> {
    type Error = Error;
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let n = buf.len().min(self.chunk).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

impl Write for Replay<'_> {
    type Error = Error;
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Close for Replay<'_> {
    type Error = Error;
    fn close(self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Connection for Replay<'_> {}

pub fn bench_fill_from(c: &mut Criterion) {
    let data = vec![b'x'; BODY_LEN];
    let mut group = c.benchmark_group("response_buffer");
    group.throughput(Throughput::Bytes(BODY_LEN as u64));

    for chunk in [16, 256, 1460] {
        group.bench_function(format!("fill_from/{chunk}"), |b| {
            b.iter(|| {
                let mut source = Replay {
                    data: &data,
                    pos: 0,
                    chunk,
                };
                let mut buf: ResponseBuffer<4096> = ResponseBuffer::new();
                buf.fill_from(&mut source).unwrap();
                black_box(buf.len())
            })
        });
    }
    group.finish();
}

pub fn bench_chunked_request(c: &mut Criterion) {
    let mut raw = String::from("HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n");
    for _ in 0..(BODY_LEN / 100) {
        raw.push_str("64\r\n");
        raw.push_str(&"y".repeat(100));
        raw.push_str("\r\n");
    }
    raw.push_str("0\r\n\r\n");

    let mut group = c.benchmark_group("http_client");
    group.throughput(Throughput::Bytes(raw.len() as u64));
    group.bench_function("chunked_response", |b| {
        b.iter(|| {
            let connection = Replay {
                data: raw.as_bytes(),
                pos: 0,
                chunk: 536,
            };
            let mut client = Client::new(connection);
            let request = Request {
                method: Method::Get,
                path: "/api/v1/collections/bench",
                headers: heapless::Vec::new(),
                body: None,
            };
            let response = client.request::<4096>(&request).unwrap();
            black_box(response.body.len())
        })
    });
    group.finish();
}
