//! Symbol frequency tables.
//!
//! A `FrequencyTable` is the shared contract between the encoding and the
//! decoding side: both rebuild the same tree from it, so it has to be
//! reproduced exactly. It is either computed from sample data or loaded from
//! the side-channel text file.
//!
//! # Side-channel Format
//!
//! ```text
//! <symbol> : <frequency>
//! ```
//!
//! One record per line, frequency written as a decimal real. Blank lines are
//! ignored. Symbols are non-empty, carry no surrounding whitespace and contain
//! neither a line break nor the separator, so every table reads back as saved. `save` writes records in ascending symbol order using the shortest
//! representation that parses back to the same `f64`.

use crate::error::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Opaque token being compressed (in practice a pixel intensity in decimal).
pub type Symbol = String;

/// Separator between symbol and frequency in the side-channel file.
const RECORD_SEPARATOR: &str = " : ";

/// One (symbol, frequency) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyEntry {
    pub symbol: Symbol,
    pub frequency: f64,
}

impl FrequencyEntry {
    pub fn new(symbol: impl Into<Symbol>, frequency: f64) -> Self {
        Self {
            symbol: symbol.into(),
            frequency,
        }
    }
}

/// Validated mapping from symbol to relative frequency.
///
/// # Invariants
/// - at least one symbol
/// - every frequency is finite and >= 0
/// - iteration is in ascending symbol order
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable {
    entries: BTreeMap<Symbol, f64>,
}

/// Mean and standard deviation of a distribution over numeric symbols.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionStats {
    pub mean: f64,
    pub std_dev: f64,
}

impl FrequencyTable {
    /// Build a table from explicit entries.
    ///
    /// # Errors
    /// `Error::InvalidInput` if there are no entries, a symbol cannot be
    /// written as a side-channel record, a frequency is negative, NaN or
    /// infinite, or a symbol appears twice.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = FrequencyEntry>,
    {
        let mut map = BTreeMap::new();

        for FrequencyEntry { symbol, frequency } in entries {
            validate_symbol(&symbol)?;
            validate_frequency(&symbol, frequency)?;
            if map.insert(symbol.clone(), frequency).is_some() {
                return Err(Error::invalid(format!("duplicate symbol {symbol:?}")));
            }
        }

        if map.is_empty() {
            return Err(Error::invalid("frequency table is empty"));
        }

        Ok(Self { entries: map })
    }

    /// Relative frequency of every distinct symbol in `samples`
    /// (occurrences / sample length).
    pub fn from_samples<I, S>(samples: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts: HashMap<String, u64> = HashMap::new();
        let mut total = 0u64;

        for sample in samples {
            *counts.entry(sample.as_ref().to_owned()).or_insert(0) += 1;
            total += 1;
        }

        if total == 0 {
            return Err(Error::invalid("cannot compute frequencies of an empty sample"));
        }

        debug!(distinct = counts.len(), total, "computed sample frequencies");

        Self::from_entries(
            counts
                .into_iter()
                .map(|(symbol, count)| FrequencyEntry::new(symbol, count as f64 / total as f64)),
        )
    }

    /// Parse the side-channel text format.
    ///
    /// # Errors
    /// `Error::InvalidInput` naming the 1-based line of the first malformed
    /// record, or any validation failure of `from_entries`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut entries = Vec::new();

        for (idx, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            let (symbol, frequency) = line.split_once(RECORD_SEPARATOR).ok_or_else(|| {
                Error::invalid(format!(
                    "line {}: expected `<symbol>{RECORD_SEPARATOR}<frequency>`, got {line:?}",
                    idx + 1
                ))
            })?;

            let symbol = symbol.trim();
            if symbol.is_empty() {
                return Err(Error::invalid(format!("line {}: empty symbol", idx + 1)));
            }

            let frequency: f64 = frequency.trim().parse().map_err(|_| {
                Error::invalid(format!(
                    "line {}: frequency {:?} is not a decimal number",
                    idx + 1,
                    frequency.trim()
                ))
            })?;

            entries.push(FrequencyEntry::new(symbol, frequency));
        }

        Self::from_entries(entries)
    }

    /// Load a side-channel file.
    pub fn load(path: &Path) -> Result<Self> {
        let mut text = String::new();
        File::open(path)?.read_to_string(&mut text)?;
        let table = Self::parse(&text)?;
        debug!(path = %path.display(), symbols = table.len(), "loaded frequency table");
        Ok(table)
    }

    /// Write the table as a side-channel file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        debug!(path = %path.display(), symbols = self.len(), "saved frequency table");
        Ok(())
    }

    /// Write the side-channel records to any sink.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(self.to_text().as_bytes())?;
        Ok(())
    }

    /// Canonical side-channel text of this table.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for (symbol, frequency) in &self.entries {
            // Writing to a String cannot fail
            let _ = writeln!(text, "{symbol}{RECORD_SEPARATOR}{frequency}");
        }
        text
    }

    /// CRC32 of the canonical text.
    ///
    /// Two tables with the same fingerprint build the same tree, so comparing
    /// the value logged at encode time with the one at decode time catches a
    /// mismatched side-channel file.
    pub fn fingerprint(&self) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(self.to_text().as_bytes());
        hasher.finalize()
    }

    /// Mean and standard deviation of the pixel intensities (symbols `0` to
    /// `255`), weighted by frequency. Other symbols are skipped. `None` when
    /// no intensity carries weight.
    pub fn numeric_stats(&self) -> Option<DistributionStats> {
        let numeric: Vec<(f64, f64)> = self
            .entries
            .iter()
            .filter_map(|(symbol, &weight)| {
                symbol.parse::<u8>().ok().map(|v| (f64::from(v), weight))
            })
            .collect();

        let total: f64 = numeric.iter().map(|&(_, w)| w).sum();
        if total <= 0.0 {
            return None;
        }

        let mean = numeric.iter().map(|&(v, w)| v * w).sum::<f64>() / total;
        let variance = numeric
            .iter()
            .map(|&(v, w)| (v - mean).powi(2) * w)
            .sum::<f64>()
            / total;

        Some(DistributionStats {
            mean,
            std_dev: variance.sqrt(),
        })
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.entries.get(symbol).copied()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.contains_key(symbol)
    }

    /// Sum of all frequencies.
    pub fn total(&self) -> f64 {
        self.entries.values().sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(s, &f)| (s.as_str(), f))
    }
}

impl FromStr for FrequencyTable {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<HashMap<Symbol, f64>> for FrequencyTable {
    type Error = Error;

    fn try_from(map: HashMap<Symbol, f64>) -> Result<Self> {
        Self::from_entries(map.into_iter().map(|(s, f)| FrequencyEntry::new(s, f)))
    }
}

/// Symbols must survive `save` followed by `load` unchanged.
fn validate_symbol(symbol: &str) -> Result<()> {
    if symbol.is_empty() {
        return Err(Error::invalid("empty symbol"));
    }
    if symbol.trim() != symbol {
        return Err(Error::invalid(format!(
            "symbol {symbol:?} has leading or trailing whitespace"
        )));
    }
    if symbol.contains(['\n', '\r']) || symbol.contains(RECORD_SEPARATOR) {
        return Err(Error::invalid(format!(
            "symbol {symbol:?} contains a line break or the {RECORD_SEPARATOR:?} separator"
        )));
    }
    Ok(())
}

fn validate_frequency(symbol: &str, frequency: f64) -> Result<()> {
    if !frequency.is_finite() || frequency < 0.0 {
        return Err(Error::invalid(format!(
            "symbol {symbol:?} has frequency {frequency}, expected a finite value >= 0"
        )));
    }
    Ok(())
}
