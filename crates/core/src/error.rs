//! Error types for the huffpix codec.
//!
//! Every operation returns a structured error rather than panicking. None of
//! them are retried internally: the codec is a pure function of its inputs, so
//! the caller has to fix the frequency table, the pixel data or the container
//! and start a new session.

use thiserror::Error;

/// Top-level error type for all codec operations.
///
/// Each variant corresponds to a specific failure domain:
/// - Input validation: frequency tables, side-channel files, shapes
/// - Encoding: symbols missing from the code table, header overflow
/// - Decoding: truncated or corrupted containers
/// - Bit I/O: reading past the end of a buffer
/// - I/O: the storage boundary
#[derive(Debug, Error)]
pub enum Error {
    /// Frequency data or caller arguments are unusable (empty, negative, NaN,
    /// duplicate symbols, malformed side-channel lines, shape mismatch).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The encoder was asked for a symbol that has no codeword.
    #[error("unknown symbol {symbol:?} at position {position}")]
    UnknownSymbol { symbol: String, position: usize },

    /// A logical dimension does not fit the 16-bit header field.
    #[error("{field} {value} exceeds the 16-bit container limit of {max}", max = u16::MAX)]
    DimensionOverflow { field: &'static str, value: usize },

    /// The container could not be decoded.
    #[error("malformed stream: {0}")]
    MalformedStream(#[from] MalformedStream),

    /// Bit I/O operation failed
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidInput(message.into())
    }
}

/// Ways a container can fail to decode.
///
/// A tree built from a different frequency source than the encoder's usually
/// surfaces as `OutOfBits`, but it can also decode silently into the wrong
/// symbols; the stream carries nothing that could detect that.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedStream {
    /// Fewer bytes than the fixed header
    #[error("container is {actual} bytes, header needs {required}")]
    TruncatedHeader { required: usize, actual: usize },

    /// Body exhausted before the declared element count was reached
    #[error("ran out of bits after {decoded} of {expected} symbols")]
    OutOfBits { decoded: usize, expected: usize },

    /// Single-symbol streams only carry the `0` placeholder code
    #[error("expected placeholder bit 0 at bit position {position}")]
    InvalidPlaceholderBit { position: usize },
}

/// Bit-level I/O errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitIoError {
    /// Attempted to read past the end of the buffer
    #[error("unexpected end of bit stream")]
    UnexpectedEof,
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
