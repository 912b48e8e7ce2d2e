use super::buffer::ResponseBuffer;
use crate::network::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Reading the hex chunk size; `ext` once a `;` extension has started.
    Size { value: usize, digits: u8, ext: bool },
    SizeLf { value: usize },
    Data { remaining: usize },
    DataCr,
    DataLf,
    /// Reading trailer lines after the last chunk.
    Trailer { line_empty: bool },
    TrailerLf { line_empty: bool },
    Done,
}

const SIZE_START: State = State::Size {
    value: 0,
    digits: 0,
    ext: false,
};

/// Incremental decoder for `Transfer-Encoding: chunked`.
///
/// Bytes can be fed in pieces of any size; chunk payloads are appended to the
/// body as they arrive and all framing, extensions and trailers are dropped.
#[derive(Debug, Clone)]
pub struct ChunkedDecoder {
    state: State,
}

impl ChunkedDecoder {
    /// A decoder positioned at the first chunk-size line.
    pub fn new() -> Self {
        Self { state: SIZE_START }
    }

    /// Whether the terminating zero-size chunk and trailers have been seen.
    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    /// Decodes `input`, appending payload bytes to `body`.
    ///
    /// Bytes following the end of the message are ignored.
    pub fn feed<const N: usize>(
        &mut self,
        mut input: &[u8],
        body: &mut ResponseBuffer<N>,
    ) -> Result<(), Error> {
        while !input.is_empty() {
            if let State::Data { remaining } = self.state {
                let take = remaining.min(input.len());
                body.append(&input[..take])?;
                input = &input[take..];
                self.state = if take == remaining {
                    State::DataCr
                } else {
                    State::Data {
                        remaining: remaining - take,
                    }
                };
                continue;
            }
            if self.state == State::Done {
                break;
            }
            self.state = step(self.state, input[0])?;
            input = &input[1..];
        }
        Ok(())
    }
}

impl Default for ChunkedDecoder {
    fn default() -> Self {
        Self::new()
    }
}

fn step(state: State, byte: u8) -> Result<State, Error> {
    let next = match (state, byte) {
        (State::Size { digits: 0, .. }, b'\r') => return Err(Error::ProtocolError),
        (State::Size { value, .. }, b'\r') => State::SizeLf { value },
        (State::Size { value, digits, ext }, _) if ext => State::Size { value, digits, ext },
        (State::Size { value, digits, .. }, b';' | b' ' | b'\t') => State::Size {
            value,
            digits,
            ext: true,
        },
        (State::Size { value, digits, .. }, _) => {
            let digit = (byte as char).to_digit(16).ok_or(Error::ProtocolError)? as usize;
            let value = value
                .checked_mul(16)
                .and_then(|v| v.checked_add(digit))
                .ok_or(Error::ProtocolError)?;
            State::Size {
                value,
                digits: digits.saturating_add(1),
                ext: false,
            }
        }
        (State::SizeLf { value: 0 }, b'\n') => State::Trailer { line_empty: true },
        (State::SizeLf { value }, b'\n') => State::Data { remaining: value },
        (State::DataCr, b'\r') => State::DataLf,
        (State::DataLf, b'\n') => SIZE_START,
        (State::Trailer { line_empty }, b'\r') => State::TrailerLf { line_empty },
        (State::Trailer { .. }, _) => State::Trailer { line_empty: false },
        (State::TrailerLf { line_empty: true }, b'\n') => State::Done,
        (State::TrailerLf { line_empty: false }, b'\n') => State::Trailer { line_empty: true },
        (State::Done, _) => State::Done,
        _ => return Err(Error::ProtocolError),
    };
    Ok(next)
}
