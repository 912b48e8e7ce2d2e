use super::buffer::{CHUNK_LEN, ResponseBuffer};
use super::chunked::ChunkedDecoder;
use crate::network::Connection;
use crate::network::error::Error;
use core::fmt::Write;
use heapless::{String, Vec};

const MAX_HEADERS: usize = 16;
const MAX_HEADER_NAME_LEN: usize = 64;
const MAX_HEADER_VALUE_LEN: usize = 256;

/// Largest serialized request line plus headers.
const MAX_REQUEST_HEAD_LEN: usize = 2048;
/// Largest status line plus headers accepted from a server.
const MAX_RESPONSE_HEAD_LEN: usize = 2048;

const DEFAULT_USER_AGENT: &str = concat!("libchroma/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String<MAX_HEADER_NAME_LEN>,
    pub value: String<MAX_HEADER_VALUE_LEN>,
}

impl Header {
    /// Builds a header, failing if either part exceeds its fixed capacity.
    pub fn new(name: &str, value: &str) -> Result<Self, Error> {
        Ok(Self {
            name: String::try_from(name).map_err(|_| Error::OutOfMemory)?,
            value: String::try_from(value).map_err(|_| Error::OutOfMemory)?,
        })
    }
}

#[derive(Debug)]
pub struct Request<'a> {
    pub method: Method,
    pub path: &'a str,
    pub headers: Vec<Header, MAX_HEADERS>,
    pub body: Option<&'a [u8]>,
}

#[derive(Debug)]
pub struct Response<const N: usize> {
    pub status_code: u16,
    pub headers: Vec<Header, MAX_HEADERS>,
    pub body: ResponseBuffer<N>,
}

impl<const N: usize> Response<N> {
    /// Whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Looks up a response header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }
}

/// How the end of a response body is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Framing {
    Length(usize),
    Chunked,
    UntilClose,
}

#[derive(Debug)]
struct Head {
    status_code: u16,
    headers: Vec<Header, MAX_HEADERS>,
    framing: Framing,
}

#[derive(Debug)]
pub struct Client<C: Connection> {
    connection: C,
}

impl<C: Connection> Client<C> {
    pub fn new(connection: C) -> Self {
        Self { connection }
    }

    /// Gives back the underlying connection, e.g. to close it.
    pub fn into_inner(self) -> C {
        self.connection
    }

    /// Sends `request` and reads the whole response.
    ///
    /// The body is accumulated into a [`ResponseBuffer`] of capacity `N`; a
    /// larger body fails with [`Error::OutOfMemory`].
    pub fn request<const N: usize>(&mut self, request: &Request) -> Result<Response<N>, Error> {
        // --- Send Request ---
        let head = encode_head(request)?;
        self.write_all(&head)?;
        if let Some(body) = request.body {
            self.write_all(body)?;
        }
        self.connection.flush().map_err(|_| Error::WriteError)?;

        // --- Receive Response Head ---
        let mut received: Vec<u8, { MAX_RESPONSE_HEAD_LEN + CHUNK_LEN }> = Vec::new();
        let mut chunk = [0u8; CHUNK_LEN];
        let head_end = loop {
            if let Some(pos) = find_slice(&received, b"\r\n\r\n") {
                break pos;
            }
            if received.len() >= MAX_RESPONSE_HEAD_LEN {
                return Err(Error::ProtocolError);
            }
            match self.connection.read(&mut chunk) {
                Ok(0) => return Err(Error::ConnectionClosed),
                Ok(n) => received
                    .extend_from_slice(&chunk[..n])
                    .map_err(|_| Error::ProtocolError)?,
                Err(_) => return Err(Error::ReadError),
            }
        };

        let head = parse_head(&received[..head_end])?;
        // Whatever followed the blank line is the start of the body.
        let leftover = &received[head_end + 4..];

        // --- Receive Response Body ---
        let mut body = ResponseBuffer::new();
        match head.framing {
            Framing::Length(len) => self.read_sized(len, leftover, &mut body)?,
            Framing::Chunked => self.read_chunked(leftover, &mut body)?,
            Framing::UntilClose => {
                body.append(leftover)?;
                body.fill_from(&mut self.connection)?;
            }
        }

        Ok(Response {
            status_code: head.status_code,
            headers: head.headers,
            body,
        })
    }

    fn write_all(&mut self, mut data: &[u8]) -> Result<(), Error> {
        while !data.is_empty() {
            match self.connection.write(data) {
                Ok(0) | Err(_) => return Err(Error::WriteError),
                Ok(n) => data = &data[n..],
            }
        }
        Ok(())
    }

    fn read_sized<const N: usize>(
        &mut self,
        len: usize,
        leftover: &[u8],
        body: &mut ResponseBuffer<N>,
    ) -> Result<(), Error> {
        let first = &leftover[..len.min(leftover.len())];
        body.append(first)?;

        let mut remaining = len - first.len();
        let mut chunk = [0u8; CHUNK_LEN];
        while remaining > 0 {
            let want = remaining.min(chunk.len());
            match self.connection.read(&mut chunk[..want]) {
                Ok(0) => return Err(Error::ConnectionClosed), // Prematurely closed
                Ok(n) => {
                    body.append(&chunk[..n])?;
                    remaining -= n;
                }
                Err(_) => return Err(Error::ReadError),
            }
        }
        Ok(())
    }

    fn read_chunked<const N: usize>(
        &mut self,
        leftover: &[u8],
        body: &mut ResponseBuffer<N>,
    ) -> Result<(), Error> {
        let mut decoder = ChunkedDecoder::new();
        decoder.feed(leftover, body)?;

        let mut chunk = [0u8; CHUNK_LEN];
        while !decoder.is_done() {
            match self.connection.read(&mut chunk) {
                Ok(0) => return Err(Error::ConnectionClosed),
                Ok(n) => decoder.feed(&chunk[..n], body)?,
                Err(_) => return Err(Error::ReadError),
            }
        }
        Ok(())
    }
}

/// Serializes the request line and headers, terminated by the blank line.
fn encode_head(request: &Request) -> Result<Vec<u8, MAX_REQUEST_HEAD_LEN>, Error> {
    let mut buf: Vec<u8, MAX_REQUEST_HEAD_LEN> = Vec::new();
    let mut push = |bytes: &[u8]| buf.extend_from_slice(bytes).map_err(|_| Error::WriteError);

    // Request line
    push(request.method.as_str().as_bytes())?;
    push(b" ")?;
    push(request.path.as_bytes())?;
    push(b" HTTP/1.1\r\n")?;

    // Headers
    let mut has_user_agent = false;
    for header in &request.headers {
        if header.name.eq_ignore_ascii_case("User-Agent") {
            has_user_agent = true;
        }
        if header.name.eq_ignore_ascii_case("Content-Length") {
            continue;
        }
        push(header.name.as_bytes())?;
        push(b": ")?;
        push(header.value.as_bytes())?;
        push(b"\r\n")?;
    }

    if !has_user_agent {
        push(b"User-Agent: ")?;
        push(DEFAULT_USER_AGENT.as_bytes())?;
        push(b"\r\n")?;
    }

    if let Some(body) = request.body {
        let mut len_str: String<20> = String::new();
        write!(len_str, "{}", body.len()).map_err(|_| Error::WriteError)?;
        push(b"Content-Length: ")?;
        push(len_str.as_bytes())?;
        push(b"\r\n")?;
    }

    push(b"\r\n")?;
    Ok(buf)
}

fn parse_head(data: &[u8]) -> Result<Head, Error> {
    let header_str = core::str::from_utf8(data).map_err(|_| Error::ProtocolError)?;
    let mut lines = header_str.split("\r\n");

    // Parse status line
    let status_line = lines.next().ok_or(Error::ProtocolError)?;
    let mut status_parts = status_line.splitn(3, ' ');
    let version = status_parts.next().ok_or(Error::ProtocolError)?;
    if !version.starts_with("HTTP/") {
        return Err(Error::ProtocolError);
    }
    let status_code = status_parts
        .next()
        .ok_or(Error::ProtocolError)?
        .parse::<u16>()
        .map_err(|_| Error::ProtocolError)?;

    // Parse headers
    let mut headers: Vec<Header, MAX_HEADERS> = Vec::new();
    let mut content_length: Option<usize> = None;
    let mut chunked = false;

    for line in lines {
        if line.is_empty() {
            continue;
        }
        let (name, value) = line.split_once(':').ok_or(Error::ProtocolError)?;
        let (name, value) = (name.trim(), value.trim());

        if name.eq_ignore_ascii_case("Content-Length") {
            content_length = Some(value.parse::<usize>().map_err(|_| Error::ProtocolError)?);
        } else if name.eq_ignore_ascii_case("Transfer-Encoding") {
            chunked = value
                .rsplit(',')
                .next()
                .is_some_and(|coding| coding.trim().eq_ignore_ascii_case("chunked"));
        }

        // Headers beyond the fixed capacity are dropped; framing was read above.
        if let Ok(header) = Header::new(name, value) {
            let _ = headers.push(header);
        }
    }

    let framing = if matches!(status_code, 100..=199 | 204 | 304) {
        Framing::Length(0)
    } else if chunked {
        Framing::Chunked
    } else if let Some(len) = content_length {
        Framing::Length(len)
    } else {
        Framing::UntilClose
    };

    Ok(Head {
        status_code,
        headers,
        framing,
    })
}

/// Finds the first occurrence of a slice in another slice and returns its starting position.
fn find_slice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
