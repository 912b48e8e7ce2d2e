use crate::network::Read;
use crate::network::error::Error;
use core::ops::Deref;
use heapless::Vec;

/// Size of the scratch chunk used when draining a [`Read`] source.
pub const CHUNK_LEN: usize = 256;

/// An append-only byte buffer holding one response body.
///
/// The buffer only ever grows: there is no way to truncate, clear or rewrite
/// bytes once they have been appended. Its capacity is fixed at `N`; running
/// out of room is reported as [`Error::OutOfMemory`] and leaves the buffer
/// exactly as it was before the failing append.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResponseBuffer<const N: usize> {
    bytes: Vec<u8, N>,
}

impl<const N: usize> ResponseBuffer<N> {
    /// Creates an empty buffer.
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Appends `chunk` after everything received so far.
    ///
    /// Either the whole chunk is appended or, if it doesn't fit, nothing is.
    pub fn append(&mut self, chunk: &[u8]) -> Result<(), Error> {
        self.bytes
            .extend_from_slice(chunk)
            .map_err(|_| Error::OutOfMemory)
    }

    /// Reads `source` until it reports end of stream, appending every chunk.
    ///
    /// Returns the number of bytes added by this call.
    pub fn fill_from<R: Read>(&mut self, source: &mut R) -> Result<usize, Error> {
        let start = self.bytes.len();
        let mut chunk = [0u8; CHUNK_LEN];
        loop {
            match source.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => self.append(&chunk[..n])?,
                Err(_) => return Err(Error::ReadError),
            }
        }
        Ok(self.bytes.len() - start)
    }

    /// Number of bytes accumulated so far.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether nothing has been received.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Maximum number of bytes this buffer can hold.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// The accumulated bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// The accumulated bytes as text, if they are valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.bytes).ok()
    }
}

impl<const N: usize> Deref for ResponseBuffer<N> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl<const N: usize> AsRef<[u8]> for ResponseBuffer<N> {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
