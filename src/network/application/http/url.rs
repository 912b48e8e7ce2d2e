use crate::network::error::Error;
use core::fmt::Write;
use heapless::String;

/// Longest `host:port` string handed to a connector.
pub const MAX_REMOTE_LEN: usize = 262;

const SCHEME: &str = "http://";
const DEFAULT_PORT: u16 = 80;

/// A parsed `http://host[:port][/prefix]` base URL.
///
/// Only plain HTTP is supported. User info, query strings and fragments are
/// rejected so that request paths can be built by simple concatenation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint<'a> {
    authority: &'a str,
    host: &'a str,
    port: u16,
    prefix: &'a str,
}

impl<'a> Endpoint<'a> {
    /// Parses a base URL such as `http://localhost:8000`.
    pub fn parse(url: &'a str) -> Result<Self, Error> {
        let rest = match url.get(..SCHEME.len()) {
            Some(scheme) if scheme.eq_ignore_ascii_case(SCHEME) => &url[SCHEME.len()..],
            _ => return Err(Error::InvalidAddress),
        };
        if rest.contains(['?', '#', '@']) {
            return Err(Error::InvalidAddress);
        }

        let (authority, prefix) = match rest.find('/') {
            Some(pos) => (&rest[..pos], rest[pos..].trim_end_matches('/')),
            None => (rest, ""),
        };
        let (host, port) = split_host_port(authority)?;

        Ok(Self {
            authority,
            host,
            port,
            prefix,
        })
    }

    /// The `host[:port]` part, as sent in the `Host` header.
    pub fn authority(&self) -> &'a str {
        self.authority
    }

    /// The host name or address, IPv6 literals keep their brackets.
    pub fn host(&self) -> &'a str {
        self.host
    }

    /// The port, 80 when the URL doesn't name one.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Path prefix without a trailing slash, empty for a bare host.
    pub fn prefix(&self) -> &'a str {
        self.prefix
    }

    /// The `host:port` string to hand to a [`Connect`](crate::network::Connect).
    pub fn remote(&self) -> Result<String<MAX_REMOTE_LEN>, Error> {
        let mut remote = String::new();
        write!(remote, "{}:{}", self.host, self.port).map_err(|_| Error::InvalidAddress)?;
        Ok(remote)
    }

    /// Builds a request path by appending `segments` to the prefix.
    ///
    /// Segments are copied verbatim, so each should start with `/`.
    pub fn path<const M: usize>(&self, segments: &[&str]) -> Result<String<M>, Error> {
        let mut path = String::new();
        path.push_str(self.prefix).map_err(|_| Error::OutOfMemory)?;
        for segment in segments {
            path.push_str(segment).map_err(|_| Error::OutOfMemory)?;
        }
        if path.is_empty() {
            path.push('/').map_err(|_| Error::OutOfMemory)?;
        }
        Ok(path)
    }
}

fn split_host_port(authority: &str) -> Result<(&str, u16), Error> {
    let (host, port) = if authority.starts_with('[') {
        let end = authority.find(']').ok_or(Error::InvalidAddress)?;
        let (host, tail) = authority.split_at(end + 1);
        match tail {
            "" => (host, None),
            _ => (host, Some(tail.strip_prefix(':').ok_or(Error::InvalidAddress)?)),
        }
    } else {
        match authority.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (authority, None),
        }
    };

    if host.is_empty() || host == "[]" {
        return Err(Error::InvalidAddress);
    }
    let port = match port {
        Some(port) => port.parse::<u16>().map_err(|_| Error::InvalidAddress)?,
        None => DEFAULT_PORT,
    };
    Ok((host, port))
}
