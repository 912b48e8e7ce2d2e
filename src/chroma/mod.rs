#![deny(unsafe_code)]

//! # Chroma Client
//!
//! A blocking client for the [Chroma](https://docs.trychroma.com) vector
//! database HTTP API, built on the crate's HTTP layer and therefore usable
//! with any transport that implements [`Connect`](crate::network::Connect).
//!
//! ## Design
//!
//! A [`ChromaClient`] is created once with a connector and [`Options`] and then
//! reused. Every operation opens its own connection, performs exactly one
//! request/response exchange and closes it again. There are no retries.
//!
//! Each operation comes in two flavours:
//!
//! * `try_*` methods return a `Result` carrying an [`Error`].
//! * The plain methods never fail loudly. They log the error, remember it
//!   for [`ChromaClient::last_error`] and return `false` or an empty buffer.
//!
//! Response bodies for "get collection" are turned into a [`CollectionRef`]
//! by [`decode_collection`], which keeps string `id`/`name` fields and treats
//! anything else as absent.

use heapless::String;

pub mod client;
pub mod decode;

pub use client::ChromaClient;
pub use decode::{decode_collection, parse_collection};

use crate::network::application::http::ResponseBuffer;
use crate::network::error::Error as NetworkError;

/// Capacity of a decoded collection id.
pub const MAX_ID_LEN: usize = 64;
/// Capacity of a decoded collection name.
pub const MAX_NAME_LEN: usize = 64;
/// Longest collection name accepted by [`validate_name`].
pub const MAX_COLLECTION_NAME_LEN: usize = 63;
/// Capacity of the buffer a response body is accumulated into.
pub const MAX_RESPONSE_LEN: usize = 4096;

/// The raw body returned by [`ChromaClient::get_collection`].
pub type ResponseBody = ResponseBuffer<MAX_RESPONSE_LEN>;

/// A collection as reported by the server.
///
/// Either field is empty when the server's reply lacked it or carried a
/// non-string value. Use [`CollectionRef::is_complete`] to check that
/// decoding found both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionRef {
    /// Server-assigned identifier (a UUID for Chroma).
    pub id: String<MAX_ID_LEN>,
    /// The collection's name.
    pub name: String<MAX_NAME_LEN>,
}

impl CollectionRef {
    /// Whether both `id` and `name` were found.
    pub fn is_complete(&self) -> bool {
        !self.id.is_empty() && !self.name.is_empty()
    }
}

/// What counts as a successful exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// Any status outside 200-299 is reported as [`Error::Status`].
    #[default]
    Require2xx,
    /// Only transport failures count; the status code is not inspected.
    Ignore,
}

/// Options for configuring a [`ChromaClient`].
#[derive(Debug, Clone, Copy)]
pub struct Options<'a> {
    /// Base URL of the server, e.g. `http://localhost:8000`.
    pub base_url: &'a str,
    /// How HTTP status codes are judged.
    pub status_policy: StatusPolicy,
    /// Value of the `User-Agent` header.
    pub user_agent: &'a str,
}

impl<'a> Options<'a> {
    /// Default options for `base_url`.
    pub fn new(base_url: &'a str) -> Self {
        Self {
            base_url,
            status_policy: StatusPolicy::default(),
            user_agent: concat!("libchroma/", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Errors reported by Chroma operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The connection could not be opened or the exchange failed.
    Transport(NetworkError),
    /// The response did not fit into its fixed-capacity buffer.
    OutOfMemory,
    /// The body was not a JSON object.
    Decode,
    /// The server answered with a non-2xx status.
    Status(u16),
    /// The collection name contains characters outside `[A-Za-z0-9_-]`,
    /// is empty, or is too long.
    InvalidName,
}

impl From<NetworkError> for Error {
    fn from(err: NetworkError) -> Self {
        match err {
            NetworkError::OutOfMemory => Error::OutOfMemory,
            other => Error::Transport(other),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Transport(e) => defmt::write!(f, "Transport({})", e),
            Error::OutOfMemory => defmt::write!(f, "OutOfMemory"),
            Error::Decode => defmt::write!(f, "Decode"),
            Error::Status(code) => defmt::write!(f, "Status({})", code),
            Error::InvalidName => defmt::write!(f, "InvalidName"),
        }
    }
}

/// Checks that `name` is safe to place in a URL path and a JSON string.
///
/// Names must be 1 to 63 bytes of ASCII letters, digits, `-` or `_`.
pub fn validate_name(name: &str) -> Result<(), Error> {
    let valid = !name.is_empty()
        && name.len() <= MAX_COLLECTION_NAME_LEN
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if valid { Ok(()) } else { Err(Error::InvalidName) }
}
