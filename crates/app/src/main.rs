//! huffpix: Huffman compression for raw 8-bit grayscale images.
//!
//! Each subcommand is one step of a session. The frequency file written by
//! `freqs` is the side channel both `encode` and `decode` rebuild the tree from.

mod config;
mod input_gen;

use config::{Command, Config};
use huffpix_core::metrics::CodecMetrics;
use huffpix_core::{pixels, Error, FrequencyTable, HuffmanCodec, Result};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let config = Config::from_args(std::env::args_os()).unwrap_or_else(|e| e.exit());
    init_tracing(&config.log_level);

    if config.print_config {
        config.print();
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// RUST_LOG takes precedence over `--log-level`.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(config: &Config) -> Result<()> {
    match &config.command {
        Command::Freqs { input, out } => run_freqs(input, out),
        Command::Codes { freqs, out } => run_codes(freqs, out.as_deref()),
        Command::Encode {
            input,
            freqs,
            width,
            height,
            out,
        } => run_encode(config, input, freqs, *width, *height, out),
        Command::Decode { input, freqs, out } => run_decode(config, input, freqs, out),
        Command::Sample {
            out, width, height, ..
        } => {
            input_gen::write_sample_file(out, config.seed, *width, *height)?;
            info!(
                path = %out.display(),
                width,
                height,
                seed = config.seed,
                "sample image written"
            );
            Ok(())
        }
    }
}

fn run_freqs(input: &Path, out: &Path) -> Result<()> {
    let image = fs::read(input)?;
    let table = pixels::frequencies(&image)?;
    table.save(out)?;

    info!(
        path = %out.display(),
        pixels = image.len(),
        distinct = table.len(),
        fingerprint = %format!("{:#010x}", table.fingerprint()),
        "frequency table written"
    );
    if let Some(stats) = table.numeric_stats() {
        println!("Mean intensity:     {:.3}", stats.mean);
        println!("Standard deviation: {:.3}", stats.std_dev);
    }
    Ok(())
}

fn run_codes(freqs: &Path, out: Option<&Path>) -> Result<()> {
    let table = FrequencyTable::load(freqs)?;
    let codec = HuffmanCodec::new(&table)?;

    match out {
        Some(path) => {
            let mut writer = BufWriter::new(fs::File::create(path)?);
            codec.codes().write_report(&mut writer, &table)?;
            writer.flush()?;
            info!(path = %path.display(), symbols = codec.codes().len(), "code table written");
        }
        None => {
            let stdout = io::stdout();
            codec.codes().write_report(&mut stdout.lock(), &table)?;
        }
    }
    Ok(())
}

fn run_encode(
    config: &Config,
    input: &Path,
    freqs: &Path,
    width: usize,
    height: usize,
    out: &Path,
) -> Result<()> {
    let mut metrics = CodecMetrics::new();

    let image = fs::read(input)?;
    let expected = width.checked_mul(height).ok_or_else(|| {
        Error::InvalidInput(format!("{width} x {height} overflows the pixel count"))
    })?;
    if image.len() != expected {
        return Err(Error::InvalidInput(format!(
            "{} holds {} pixels, expected {width} x {height} = {expected}",
            input.display(),
            image.len()
        )));
    }

    let table = FrequencyTable::load(freqs)?;
    let codec = HuffmanCodec::new(&table)?;
    debug!(symbols = codec.codes().len(), "code table ready");

    let encoded = codec.encode_to_file(out, &pixels::to_symbols(&image), width, height)?;

    metrics.raw_bytes = image.len() as u64;
    metrics.record_encoded(&encoded);
    metrics.distinct_symbols = codec.codes().len() as u64;
    metrics.average_code_length = codec.codes().average_length(&table);
    metrics.complete();

    if config.print_metrics {
        metrics.print_summary();
    }
    Ok(())
}

fn run_decode(config: &Config, input: &Path, freqs: &Path, out: &Path) -> Result<()> {
    let mut metrics = CodecMetrics::new();

    let table = FrequencyTable::load(freqs)?;
    let codec = HuffmanCodec::new(&table)?;

    let (container, symbols) = codec.decode_from_file(input)?;
    let image = pixels::from_symbols(&symbols)?;
    fs::write(out, &image)?;
    info!(path = %out.display(), pixels = image.len(), "raw image written");

    metrics.raw_bytes = image.len() as u64;
    metrics.container_bytes = container.to_bytes().len() as u64;
    metrics.symbols = symbols.len() as u64;
    metrics.payload_bits = symbols
        .iter()
        .filter_map(|s| codec.codes().get(s))
        .map(|code| code.len() as u64)
        .sum();
    metrics.padding_bits = (container.body.len() as u64 * 8).saturating_sub(metrics.payload_bits);
    metrics.distinct_symbols = codec.codes().len() as u64;
    metrics.average_code_length = codec.codes().average_length(&table);
    metrics.complete();

    if config.print_metrics {
        metrics.print_summary();
    }
    Ok(())
}
