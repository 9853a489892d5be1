//! Bit-stream encoder.
//!
//! Concatenates the codeword of every symbol in order and packs the result
//! behind the (width, height) header. The body is always a whole number of
//! 16-bit groups, so its length alone cannot tell how many symbols it holds;
//! the decoder relies on `width * height` for that.

use crate::bitio::BitWriter;
use crate::codes::CodeTable;
use crate::container::Container;
use crate::error::{Error, Result};
use tracing::debug;

/// Result of encoding, with the bit accounting the container hides.
#[derive(Debug, Clone)]
pub struct Encoded {
    pub container: Container,
    /// Codeword bits, padding excluded
    pub payload_bits: usize,
    /// Zero bits appended to complete the final group
    pub padding_bits: usize,
}

/// Encode `symbols` into a container.
///
/// # Errors
/// - `Error::DimensionOverflow` if width or height exceeds 65535
/// - `Error::InvalidInput` if `symbols.len() != width * height`
/// - `Error::UnknownSymbol` for the first symbol without a codeword
pub fn encode_container<S: AsRef<str>>(
    codes: &CodeTable,
    symbols: &[S],
    width: usize,
    height: usize,
) -> Result<Encoded> {
    // Validates the header fields before any bits are produced
    let mut container = Container::new(width, height, Vec::new())?;

    let expected = container.element_count();
    if symbols.len() != expected {
        return Err(Error::invalid(format!(
            "{} symbols do not match a {width}x{height} shape ({expected} expected)",
            symbols.len()
        )));
    }

    let mut words = Vec::with_capacity(symbols.len());
    for (position, symbol) in symbols.iter().enumerate() {
        let symbol = symbol.as_ref();
        let code = codes.get(symbol).ok_or_else(|| Error::UnknownSymbol {
            symbol: symbol.to_owned(),
            position,
        })?;
        words.push(code.bits());
    }

    let mut writer = BitWriter::with_capacity(words.iter().map(|bits| bits.len()).sum());
    for bits in words {
        writer.write_slice(bits);
    }

    let payload_bits = writer.bit_len();
    let padding_bits = writer.padding_bits();
    container.body = writer.finish();

    debug!(
        symbols = symbols.len(),
        payload_bits, padding_bits, "encoded symbol stream"
    );

    Ok(Encoded {
        container,
        payload_bits,
        padding_bits,
    })
}

/// Encode `symbols` into container bytes.
pub fn encode<S: AsRef<str>>(
    codes: &CodeTable,
    symbols: &[S],
    width: usize,
    height: usize,
) -> Result<Vec<u8>> {
    Ok(encode_container(codes, symbols, width, height)?
        .container
        .to_bytes())
}
