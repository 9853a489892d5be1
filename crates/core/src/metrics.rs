//! Metrics collection and reporting for codec sessions.
//!
//! This module makes the cost of a session visible:
//! - Sizes (raw pixels vs. container bytes)
//! - Bit accounting (payload bits vs. padding)
//! - Timing information
//!
//! # Thread Safety
//!
//! `CodecMetrics` is plain data owned by one session. Sessions running on
//! separate threads keep separate instances.

use crate::container::HEADER_SIZE;
use crate::encoder::Encoded;
use std::time::{Duration, Instant};

/// Counters and timings for one encode or decode session.
#[derive(Debug, Clone)]
pub struct CodecMetrics {
    // === Timing ===
    /// When the session started
    pub start_time: Instant,

    /// When the session ended (set on completion)
    pub end_time: Option<Instant>,

    // === Sizes ===
    /// Raw input size (one byte per pixel)
    pub raw_bytes: u64,

    /// Container size including the header
    pub container_bytes: u64,

    // === Bits ===
    /// Symbols carried by the container
    pub symbols: u64,

    /// Codeword bits, padding excluded
    pub payload_bits: u64,

    /// Zero bits added to complete the final 16-bit group
    pub padding_bits: u64,

    // === Table ===
    /// Distinct symbols in the code table
    pub distinct_symbols: u64,

    /// Expected code length under the frequency table
    pub average_code_length: f64,
}

impl CodecMetrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            raw_bytes: 0,
            container_bytes: 0,
            symbols: 0,
            payload_bits: 0,
            padding_bits: 0,
            distinct_symbols: 0,
            average_code_length: 0.0,
        }
    }

    /// Record the outcome of an encode.
    pub fn record_encoded(&mut self, encoded: &Encoded) {
        self.symbols = encoded.container.element_count() as u64;
        self.payload_bits = encoded.payload_bits as u64;
        self.padding_bits = encoded.padding_bits as u64;
        self.container_bytes = (HEADER_SIZE + encoded.container.body.len()) as u64;
    }

    /// Mark the session as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Compute compression ratio (container / raw).
    ///
    /// Returns 0.0 if nothing was recorded.
    pub fn compression_ratio(&self) -> f64 {
        if self.raw_bytes == 0 {
            0.0
        } else {
            self.container_bytes as f64 / self.raw_bytes as f64
        }
    }

    /// Payload bits per symbol actually spent.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.symbols == 0 {
            0.0
        } else {
            self.payload_bits as f64 / self.symbols as f64
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Session Summary ===");
        println!("Duration: {} ms", self.duration().as_millis());
        println!();

        println!("=== Sizes ===");
        println!("Raw:       {} bytes", self.raw_bytes);
        println!("Container: {} bytes ({} header)", self.container_bytes, HEADER_SIZE);
        println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        println!();

        println!("=== Bits ===");
        println!("Symbols: {}", self.symbols);
        println!("Payload bits: {}", self.payload_bits);
        println!("Padding bits: {}", self.padding_bits);
        println!("Bits per symbol: {:.3}", self.bits_per_symbol());
        println!();

        println!("=== Code Table ===");
        println!("Distinct symbols: {}", self.distinct_symbols);
        println!("Average code length: {:.3}", self.average_code_length);
        println!();
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             raw_bytes={}\n\
             container_bytes={}\n\
             compression_ratio={:.4}\n\
             symbols={}\n\
             payload_bits={}\n\
             padding_bits={}\n\
             bits_per_symbol={:.4}\n\
             distinct_symbols={}\n\
             average_code_length={:.4}\n",
            self.duration().as_millis(),
            self.raw_bytes,
            self.container_bytes,
            self.compression_ratio(),
            self.symbols,
            self.payload_bits,
            self.padding_bits,
            self.bits_per_symbol(),
            self.distinct_symbols,
            self.average_code_length,
        )
    }
}

impl Default for CodecMetrics {
    fn default() -> Self {
        Self::new()
    }
}
