//! Conversion between 8-bit grayscale pixels and codec symbols.
//!
//! Pixel intensities travel through the codec as their decimal string form
//! (`"0"` to `"255"`), which is also how they appear in side-channel files.

use crate::error::{Error, Result};
use crate::frequency::{FrequencyTable, Symbol};

/// Decimal symbols for every pixel, row-major.
pub fn to_symbols(pixels: &[u8]) -> Vec<Symbol> {
    pixels.iter().map(u8::to_string).collect()
}

/// Pixel intensities back from decimal symbols.
///
/// # Errors
/// `Error::InvalidInput` for a symbol that is not a decimal value in 0-255.
pub fn from_symbols<S: AsRef<str>>(symbols: &[S]) -> Result<Vec<u8>> {
    symbols
        .iter()
        .enumerate()
        .map(|(position, symbol)| {
            let symbol = symbol.as_ref();
            symbol.parse::<u8>().map_err(|_| {
                Error::invalid(format!(
                    "symbol {symbol:?} at position {position} is not a pixel intensity"
                ))
            })
        })
        .collect()
}

/// Frequency table of the intensities present in `pixels`.
pub fn frequencies(pixels: &[u8]) -> Result<FrequencyTable> {
    FrequencyTable::from_samples(pixels.iter().map(u8::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_round_trip() {
        let pixels = [0u8, 7, 128, 255];
        let symbols = to_symbols(&pixels);
        assert_eq!(symbols, vec!["0", "7", "128", "255"]);
        assert_eq!(from_symbols(&symbols).unwrap(), pixels);
    }

    #[test]
    fn test_rejects_non_pixel() {
        assert!(matches!(
            from_symbols(&["12", "256"]),
            Err(Error::InvalidInput(_))
        ));
        assert!(from_symbols(&["A"]).is_err());
    }

    #[test]
    fn test_frequencies() {
        let table = frequencies(&[10, 10, 20, 10]).unwrap();
        assert_eq!(table.get("10"), Some(0.75));
        assert_eq!(table.get("20"), Some(0.25));
        assert!(frequencies(&[]).is_err());
    }
}
