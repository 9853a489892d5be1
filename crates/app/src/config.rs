//! Configuration for the huffpix application.
//!
//! Handles parsing command-line arguments and filling in defaults. Every
//! subcommand works with only its required inputs; output paths default to
//! files in the working directory and the sample seed defaults to the clock.
//! `--print-config` shows the resolved values so runs are reproducible.

use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// Command-line arguments as parsed by clap.
#[derive(Parser, Debug)]
#[command(
    name = "huffpix",
    version,
    about = "Huffman compression for 8-bit grayscale images"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Log level when RUST_LOG is not set (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Print resolved configuration
    #[arg(long, global = true, default_value_t = false)]
    pub print_config: bool,

    /// Don't print metrics summary
    #[arg(long, global = true, default_value_t = false)]
    pub no_metrics: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Compute the frequency table of a raw grayscale image
    Freqs {
        /// Raw image, one byte per pixel
        #[arg(long)]
        input: PathBuf,
        /// Side-channel frequency file to write
        #[arg(long, default_value = "distribution.txt")]
        out: PathBuf,
    },
    /// Write the code table derived from a frequency file
    Codes {
        /// Side-channel frequency file
        #[arg(long)]
        freqs: PathBuf,
        /// Report destination (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Compress a raw grayscale image
    Encode {
        /// Raw image, one byte per pixel, row-major
        #[arg(long)]
        input: PathBuf,
        /// Side-channel frequency file
        #[arg(long)]
        freqs: PathBuf,
        #[arg(short = 'W', long)]
        width: usize,
        #[arg(short = 'H', long)]
        height: usize,
        #[arg(long, default_value = "compressed.huff")]
        out: PathBuf,
    },
    /// Decompress a container back into a raw grayscale image
    Decode {
        /// Compressed container
        #[arg(long)]
        input: PathBuf,
        /// Side-channel frequency file used when compressing
        #[arg(long)]
        freqs: PathBuf,
        #[arg(long, default_value = "decompressed.raw")]
        out: PathBuf,
    },
    /// Generate a synthetic raw grayscale image
    Sample {
        #[arg(long, default_value = "sample.raw")]
        out: PathBuf,
        #[arg(short = 'W', long, default_value_t = 256)]
        width: usize,
        #[arg(short = 'H', long, default_value_t = 256)]
        height: usize,
        /// Random seed for determinism (default: time-based)
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Complete configuration for a run.
#[derive(Debug, Clone)]
pub struct Config {
    pub command: Command,

    /// Filter directive for the tracing subscriber
    pub log_level: String,

    /// Seed for sample generation (explicit or time-based)
    pub seed: u64,

    /// Whether to print detailed config
    pub print_config: bool,

    /// Whether to print detailed metrics summary
    pub print_metrics: bool,
}

impl Config {
    /// Parse configuration from command-line arguments (program name first).
    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Ok(Self::resolve(Args::try_parse_from(args)?))
    }

    fn resolve(args: Args) -> Self {
        let explicit_seed = match &args.command {
            Command::Sample { seed, .. } => *seed,
            _ => None,
        };

        // Determine seed (explicit or time-based)
        let seed = explicit_seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });

        Config {
            command: args.command,
            log_level: args.log_level,
            seed,
            print_config: args.print_config,
            print_metrics: !args.no_metrics,
        }
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        match &self.command {
            Command::Freqs { input, out } => {
                println!("Task:        frequency table");
                println!("Input image: {}", input.display());
                println!("Output:      {}", out.display());
            }
            Command::Codes { freqs, out } => {
                println!("Task:        code table");
                println!("Frequencies: {}", freqs.display());
                println!(
                    "Output:      {}",
                    out.as_ref()
                        .map_or_else(|| "(stdout)".to_string(), |p| p.display().to_string())
                );
            }
            Command::Encode {
                input,
                freqs,
                width,
                height,
                out,
            } => {
                println!("Task:        compress");
                println!("Input image: {}", input.display());
                println!("Frequencies: {}", freqs.display());
                println!("Shape:       {width} x {height}");
                println!("Output:      {}", out.display());
            }
            Command::Decode { input, freqs, out } => {
                println!("Task:        decompress");
                println!("Container:   {}", input.display());
                println!("Frequencies: {}", freqs.display());
                println!("Output:      {}", out.display());
            }
            Command::Sample {
                out, width, height, ..
            } => {
                println!("Task:        sample image");
                println!("Shape:       {width} x {height}");
                println!("Seed:        {}", self.seed);
                println!("Output:      {}", out.display());
            }
        }
        println!("Log level:   {}", self.log_level);
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_args() {
        let config = Config::from_args([
            "huffpix", "encode", "--input", "img.raw", "--freqs", "f.txt", "-W", "4", "-H", "3",
        ])
        .unwrap();

        assert_eq!(
            config.command,
            Command::Encode {
                input: PathBuf::from("img.raw"),
                freqs: PathBuf::from("f.txt"),
                width: 4,
                height: 3,
                out: PathBuf::from("compressed.huff"),
            }
        );
        assert!(config.print_metrics);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_global_flags() {
        let config = Config::from_args([
            "huffpix",
            "decode",
            "--input",
            "c.huff",
            "--freqs",
            "f.txt",
            "--no-metrics",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert!(!config.print_metrics);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_sample_seed() {
        let config = Config::from_args(["huffpix", "sample", "--seed", "42"]).unwrap();
        assert_eq!(config.seed, 42);
        assert!(matches!(
            config.command,
            Command::Sample {
                width: 256,
                height: 256,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_required() {
        assert!(Config::from_args(["huffpix", "encode", "--input", "img.raw"]).is_err());
        assert!(Config::from_args(["huffpix"]).is_err());
    }
}
