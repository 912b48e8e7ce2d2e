//! HTTP/1.1 protocol implementation for embedded systems.
//!
//! This module provides a lightweight HTTP client implementation designed specifically
//! for embedded systems and `no_std` environments. It focuses on simplicity,
//! predictable memory usage, and compatibility with resource-constrained devices.
//!
//! # Features
//!
//! - Synchronous request/response model, one exchange per connection
//! - Fixed-size buffers for predictable memory usage
//! - Response bodies accumulated into an append-only [`ResponseBuffer`]
//! - `Content-Length`, chunked and read-until-close body framing
//! - Base URL parsing through [`Endpoint`]
//!
//! # Usage
//!
//! The main entry point is the [`Client`] which works with any connection
//! type implementing the [`crate::network::Connection`] trait.
//!
//! ```rust,no_run
//! use libchroma::network::application::http::{Client, Request, Method};
//! # use libchroma::network::Connection;
//! # struct MockConnection;
//! # impl Connection for MockConnection {}
//! # impl libchroma::network::Read for MockConnection {
//! #     type Error = ();
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl libchroma::network::Write for MockConnection {
//! #     type Error = ();
//! #     fn write(&mut self, _buf: &[u8]) -> Result<usize, Self::Error> { Ok(0) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl libchroma::network::Close for MockConnection {
//! #     type Error = ();
//! #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//!
//! let connection = MockConnection;
//! let mut client = Client::new(connection);
//!
//! let request = Request {
//!     method: Method::Get,
//!     path: "/api/v1/collections/docs",
//!     headers: heapless::Vec::new(),
//!     body: None,
//! };
//!
//! // let response = client.request::<4096>(&request)?;
//! ```

/// Append-only response body storage.
pub mod buffer;

/// HTTP client implementation and supporting types.
///
/// Contains the main [`Client`](client::Client) struct and all related types
/// for making HTTP requests and handling responses.
pub mod client;

/// Decoder for `Transfer-Encoding: chunked` bodies.
pub mod chunked;

/// Parsing of `http://host:port/prefix` base URLs.
pub mod url;

pub use buffer::ResponseBuffer;
pub use client::{Client, Header, Method, Request, Response};
pub use url::Endpoint;
