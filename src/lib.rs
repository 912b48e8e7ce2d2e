//! # libchroma - Chroma client for embedded and hosted Rust
//!
//! A small client for the [Chroma](https://docs.trychroma.com) vector database
//! HTTP API. It runs on anything that can open a byte stream: the transport is
//! abstracted behind the traits in [`network`], and everything works without
//! an allocator, in `no_std` environments.
//!
//! ## Features
//!
//! - **Chroma API**: heartbeat, create collection, get collection
//! - **HTTP Client**: HTTP/1.1 with `Content-Length`, chunked and
//!   read-until-close bodies
//! - **Fixed memory**: response bodies accumulate into fixed-capacity buffers;
//!   an oversized reply is an error, never an allocation
//! - **Lenient decoding**: collection replies are reduced to their `id` and
//!   `name` strings, anything else is ignored
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! libchroma = "0.1.0"
//! ```
//!
//! ### Basic Example
//!
//! ```rust,no_run
//! use libchroma::chroma::{ChromaClient, Options};
//! # use libchroma::network::error::Error;
//! # use libchroma::network::{Connect, Connection};
//! # struct MockConnection;
//! # impl Connection for MockConnection {}
//! # impl libchroma::network::Read for MockConnection {
//! #     type Error = ();
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl libchroma::network::Write for MockConnection {
//! #     type Error = ();
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl libchroma::network::Close for MockConnection {
//! #     type Error = ();
//! #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockNetwork;
//! # impl Connect for MockNetwork {
//! #     type Connection = MockConnection;
//! #     type Error = Error;
//! #     fn connect(&mut self, _remote: &str) -> Result<MockConnection, Error> { Ok(MockConnection) }
//! # }
//!
//! let network = MockNetwork;
//! let mut client = ChromaClient::new(network, Options::new("http://localhost:8000")).unwrap();
//!
//! if client.heartbeat() && client.create_collection("TestCollection") {
//!     let collection = client.fetch_collection("TestCollection");
//!     if collection.is_complete() {
//!         // collection.id, collection.name
//!     }
//! }
//! ```
//!
//! With the `std` feature, `network::tcp::TcpConnector` provides a ready-made
//! connector on top of `std::net::TcpStream`.
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support and the TCP connector (default: disabled)
//! - `defmt`: Enable defmt logging support for embedded debugging

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

#[macro_use]
mod fmt;

/// Network abstraction layer providing the transport traits and the HTTP client.
///
/// Any byte-stream transport can be plugged in by implementing the traits in
/// this module.
pub mod network;

/// Chroma vector database API client.
///
/// Builds the API's requests on top of the HTTP client and decodes its
/// collection responses.
pub mod chroma;
