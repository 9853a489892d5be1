//! Compressed container layout and storage.
//!
//! # Container Format
//!
//! ```text
//! +------------------+
//! | width (2)        |  u16 big-endian logical width
//! +------------------+
//! | height (2)       |  u16 big-endian logical height
//! +------------------+
//! | body             |  codeword bits, MSB-first, in 16-bit big-endian
//! | (variable)       |  groups, zero-padded in the final group
//! +------------------+
//! ```
//!
//! There is no magic number, version tag or code table. The dimensions only
//! bound decoding: exactly `width * height` symbols are read from the body.

use crate::error::{Error, MalformedStream, Result};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

/// Size of the fixed header in bytes.
pub const HEADER_SIZE: usize = 4;

/// A parsed container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub width: u16,
    pub height: u16,
    /// Packed codeword bits, padding included
    pub body: Vec<u8>,
}

impl Container {
    /// Create a container, checking that both dimensions fit the header.
    ///
    /// # Errors
    /// `Error::DimensionOverflow` naming the offending field.
    pub fn new(width: usize, height: usize, body: Vec<u8>) -> Result<Self> {
        Ok(Self {
            width: header_field("width", width)?,
            height: header_field("height", height)?,
            body,
        })
    }

    /// Number of symbols the body carries.
    pub fn element_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Serialize header and body.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE + self.body.len());
        bytes.extend_from_slice(&self.width.to_be_bytes());
        bytes.extend_from_slice(&self.height.to_be_bytes());
        bytes.extend_from_slice(&self.body);
        bytes
    }

    /// Parse a container from bytes.
    ///
    /// # Errors
    /// `MalformedStream::TruncatedHeader` if `bytes` is shorter than the header.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (width, height) = read_header(bytes)?;
        Ok(Self {
            width,
            height,
            body: bytes[HEADER_SIZE..].to_vec(),
        })
    }

    /// Write the container to `path`, replacing any existing file.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(&self.to_bytes())?;
        writer.flush()?;
        debug!(
            path = %path.display(),
            width = self.width,
            height = self.height,
            body_bytes = self.body.len(),
            "wrote container"
        );
        Ok(())
    }

    /// Read a container from `path`.
    pub fn read_from_file(path: &Path) -> Result<Self> {
        let mut bytes = Vec::new();
        File::open(path)?.read_to_end(&mut bytes)?;
        let container = Self::from_bytes(&bytes)?;
        debug!(
            path = %path.display(),
            width = container.width,
            height = container.height,
            body_bytes = container.body.len(),
            "read container"
        );
        Ok(container)
    }
}

/// Read just the (width, height) header.
pub fn read_header(bytes: &[u8]) -> Result<(u16, u16)> {
    match bytes {
        [w0, w1, h0, h1, ..] => Ok((
            u16::from_be_bytes([*w0, *w1]),
            u16::from_be_bytes([*h0, *h1]),
        )),
        _ => Err(MalformedStream::TruncatedHeader {
            required: HEADER_SIZE,
            actual: bytes.len(),
        }
        .into()),
    }
}

fn header_field(field: &'static str, value: usize) -> Result<u16> {
    u16::try_from(value).map_err(|_| Error::DimensionOverflow { field, value })
}
