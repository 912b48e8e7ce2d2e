//! Blocking TCP transport for hosted targets.
//!
//! [`TcpConnector`] opens a fresh [`TcpConnection`] per call to
//! [`Connect::connect`]. No timeout is set unless one is configured with
//! [`TcpConnector::with_timeout`], so the operating system defaults apply.

use super::error::Error;
use super::{Close, Connect, Connection, Read, Write};
use std::io::{ErrorKind, Read as StdRead, Write as StdWrite};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

/// Opens TCP connections with `std::net`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpConnector {
    timeout: Option<Duration>,
}

impl TcpConnector {
    /// A connector that relies on the system's default timeouts.
    pub fn new() -> Self {
        Self { timeout: None }
    }

    /// Applies `timeout` to connects, reads and writes.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    fn open(&self, remote: &str) -> std::io::Result<TcpStream> {
        let Some(timeout) = self.timeout else {
            return TcpStream::connect(remote);
        };

        // connect_timeout takes a single address, so try each resolved one.
        let mut last_err = None;
        for addr in std::net::ToSocketAddrs::to_socket_addrs(remote)? {
            match TcpStream::connect_timeout(&addr, timeout) {
                Ok(stream) => {
                    stream.set_read_timeout(Some(timeout))?;
                    stream.set_write_timeout(Some(timeout))?;
                    return Ok(stream);
                }
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| ErrorKind::AddrNotAvailable.into()))
    }
}

impl Connect for TcpConnector {
    type Connection = TcpConnection;
    type Error = Error;

    fn connect(&mut self, remote: &str) -> Result<Self::Connection, Self::Error> {
        let stream = self.open(remote).map_err(|e| match e.kind() {
            ErrorKind::TimedOut | ErrorKind::WouldBlock => Error::Timeout,
            ErrorKind::InvalidInput | ErrorKind::AddrNotAvailable => Error::InvalidAddress,
            _ => Error::ConnectionRefused,
        })?;
        Ok(TcpConnection { stream })
    }
}

/// A connected TCP stream.
#[derive(Debug)]
pub struct TcpConnection {
    stream: TcpStream,
}

impl Read for TcpConnection {
    type Error = Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.stream.read(buf).map_err(|e| match e.kind() {
            ErrorKind::WouldBlock | ErrorKind::TimedOut => Error::Timeout,
            _ => Error::ReadError,
        })
    }
}

impl Write for TcpConnection {
    type Error = Error;

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.stream.write(buf).map_err(|e| match e.kind() {
            ErrorKind::WouldBlock | ErrorKind::TimedOut => Error::Timeout,
            _ => Error::WriteError,
        })
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.stream.flush().map_err(|_| Error::WriteError)
    }
}

impl Close for TcpConnection {
    type Error = Error;

    fn close(self) -> Result<(), Self::Error> {
        match self.stream.shutdown(Shutdown::Both) {
            // The server may already have hung up after `Connection: close`.
            Err(e) if e.kind() != ErrorKind::NotConnected => Err(Error::ConnectionClosed),
            _ => Ok(()),
        }
    }
}

impl Connection for TcpConnection {}
