//! Scripted in-memory transport shared by the integration tests.

#![allow(dead_code)]

use libchroma::network::error::Error;
use libchroma::network::{Close, Connect, Connection, Read, Write};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// Connection that replays a canned server reply in fixed-size reads and
/// records everything written to it.
#[derive(Debug)]
pub struct MockConnection {
    reply: Vec<u8>,
    read_pos: usize,
    chunk: usize,
    written: Rc<RefCell<Vec<u8>>>,
    closed: Rc<Cell<bool>>,
}

impl MockConnection {
    pub fn new(reply: impl Into<Vec<u8>>, chunk: usize) -> Self {
        Self {
            reply: reply.into(),
            read_pos: 0,
            chunk,
            written: Rc::default(),
            closed: Rc::default(),
        }
    }

    pub fn written(&self) -> Vec<u8> {
        self.written.borrow().clone()
    }
}

impl Read for MockConnection {
    type Error = Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if self.closed.get() {
            return Err(Error::NotOpen);
        }
        let remaining = self.reply.len() - self.read_pos;
        let n = buf.len().min(self.chunk).min(remaining);
        buf[..n].copy_from_slice(&self.reply[self.read_pos..self.read_pos + n]);
        self.read_pos += n;
        Ok(n)
    }
}

impl Write for MockConnection {
    type Error = Error;

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.closed.get() {
            return Err(Error::NotOpen);
        }
        // Accept at most 7 bytes per call to exercise partial writes.
        let n = buf.len().min(7);
        self.written.borrow_mut().extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Close for MockConnection {
    type Error = Error;

    fn close(self) -> Result<(), Self::Error> {
        self.closed.set(true);
        Ok(())
    }
}

impl Connection for MockConnection {}

/// Connector handing out one [`MockConnection`] per scripted reply.
///
/// When no replies are left, `connect` fails with `ConnectionRefused`.
#[derive(Debug, Default)]
pub struct MockNetwork {
    replies: VecDeque<Vec<u8>>,
    chunk: usize,
    remotes: Vec<String>,
    requests: Vec<Rc<RefCell<Vec<u8>>>>,
    closed: Vec<Rc<Cell<bool>>>,
}

impl MockNetwork {
    /// A network whose connections deliver at most `chunk` bytes per read.
    pub fn new(chunk: usize) -> Self {
        Self {
            chunk,
            ..Self::default()
        }
    }

    /// Queues the reply for the next connection.
    pub fn reply(mut self, reply: impl Into<Vec<u8>>) -> Self {
        self.replies.push_back(reply.into());
        self
    }

    /// Addresses passed to `connect`, in order.
    pub fn remotes(&self) -> &[String] {
        &self.remotes
    }

    /// Request bytes written on each connection, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .iter()
            .map(|w| String::from_utf8(w.borrow().clone()).unwrap())
            .collect()
    }

    /// Whether every connection handed out was closed again.
    pub fn all_closed(&self) -> bool {
        self.closed.iter().all(|c| c.get())
    }
}

impl Connect for MockNetwork {
    type Connection = MockConnection;
    type Error = Error;

    fn connect(&mut self, remote: &str) -> Result<Self::Connection, Self::Error> {
        self.remotes.push(remote.to_string());
        let reply = self.replies.pop_front().ok_or(Error::ConnectionRefused)?;
        let connection = MockConnection::new(reply, self.chunk);
        self.requests.push(Rc::clone(&connection.written));
        self.closed.push(Rc::clone(&connection.closed));
        Ok(connection)
    }
}

/// A `Content-Length` framed reply.
pub fn reply(status: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\n\r\n{body}",
        body.len()
    )
}

/// A chunked reply splitting `body` into pieces of `piece` bytes.
pub fn chunked_reply(status: &str, body: &str, piece: usize) -> String {
    let mut out = format!(
        "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ntransfer-encoding: chunked\r\n\r\n"
    );
    for part in body.as_bytes().chunks(piece) {
        out.push_str(&format!("{:x}\r\n", part.len()));
        out.push_str(std::str::from_utf8(part).unwrap());
        out.push_str("\r\n");
    }
    out.push_str("0\r\n\r\n");
    out
}
