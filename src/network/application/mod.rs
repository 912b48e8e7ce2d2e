//! # Application Layer Network Protocols
//!
//! Application layer (OSI Layer 7) protocols implemented on top of the core
//! network traits.
//!
//! ## Available Protocols
//!
//! - **[`http`]**: HTTP/1.1 client used to talk to REST services such as Chroma
//!
//! ## Design Principles
//!
//! - **Connection Agnostic**: Work with any type implementing [`Connection`](crate::network::Connection)
//! - **No-std Compatible**: No heap allocation, fixed-size buffers throughout
//! - **Error Handling**: Every failure surfaces as a [`crate::network::error::Error`]
//!
//! ## Usage Pattern
//!
//! 1. Create a connection using your transport layer
//! 2. Wrap it with the protocol client
//! 3. Use protocol-specific methods for communication
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
//! // 1. Create connection (implementation-specific)
//! let connection = MockConnection;
//!
//! // 2. Wrap with protocol client
//! let mut client = Client::new(connection);
//!
//! // 3. Use protocol methods
//! let request = Request {
//!     method: Method::Get,
//!     path: "/api/v1/heartbeat",
//!     headers: heapless::Vec::new(),
//!     body: None,
//! };
//! // let response = client.request::<1024>(&request)?;
//! ```

/// HTTP client implementation.
///
/// Provides a simple HTTP/1.1 client suitable for embedded systems,
/// supporting GET and POST methods with custom headers.
pub mod http;
