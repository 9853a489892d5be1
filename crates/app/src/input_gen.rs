//! Sample image generation for testing.
//!
//! When no real image is at hand, we generate a raw 8-bit grayscale image with
//! interesting compression characteristics.
//!
//! # Design
//!
//! The image is cut into horizontal bands of random height, each of one kind:
//! - Flat bands (a single intensity, compresses to ~1 bit per pixel)
//! - Gradients (a handful of intensities, moderately compressible)
//! - Textured bands (a short repeating pattern)
//! - Noise (uniform intensities, close to 8 bits per pixel)
//!
//! This makes the effect of the frequency table visible in metrics.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::Write;

/// Generate a row-major grayscale image of `width * height` pixels.
pub fn generate_sample_image(seed: u64, width: usize, height: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut pixels = Vec::with_capacity(width * height);

    let mut row = 0;
    while row < height {
        let band = rng.gen_range(1..=32).min(height - row);

        // Choose band type randomly
        let band_type: u8 = rng.gen_range(0..10);

        match band_type {
            // 30% flat
            0..=2 => {
                let value: u8 = rng.gen();
                pixels.extend(std::iter::repeat(value).take(band * width));
            }

            // 30% horizontal gradient over a narrow intensity range
            3..=5 => {
                let base: u8 = rng.gen_range(0..=192);
                let span: usize = rng.gen_range(2..=64);
                for _ in 0..band {
                    for x in 0..width {
                        let step = if width > 1 { x * (span - 1) / (width - 1) } else { 0 };
                        pixels.push(base.saturating_add(step as u8));
                    }
                }
            }

            // 20% texture
            6..=7 => {
                let pattern = generate_pattern(&mut rng);
                for y in 0..band {
                    for x in 0..width {
                        pixels.push(pattern[(x + y) % pattern.len()]);
                    }
                }
            }

            // 20% noise
            _ => {
                for _ in 0..band * width {
                    pixels.push(rng.gen());
                }
            }
        }

        row += band;
    }

    pixels
}

/// Generate a small repeating pattern.
fn generate_pattern(rng: &mut ChaCha8Rng) -> Vec<u8> {
    let pattern_len = rng.gen_range(2..=16);
    (0..pattern_len).map(|_| rng.gen()).collect()
}

/// Write a generated image to a file.
pub fn write_sample_file(
    path: &std::path::Path,
    seed: u64,
    width: usize,
    height: usize,
) -> std::io::Result<()> {
    let data = generate_sample_image(seed, width, height);
    let mut file = std::fs::File::create(path)?;
    file.write_all(&data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_sample_image() {
        let image = generate_sample_image(42, 40, 25);
        assert_eq!(image.len(), 1000);
    }

    #[test]
    fn test_determinism() {
        let image1 = generate_sample_image(12345, 64, 64);
        let image2 = generate_sample_image(12345, 64, 64);

        assert_eq!(image1, image2);
    }

    #[test]
    fn test_different_seeds() {
        let image1 = generate_sample_image(1, 64, 64);
        let image2 = generate_sample_image(2, 64, 64);

        assert_ne!(image1, image2);
    }

    #[test]
    fn test_various_shapes() {
        for (w, h) in [(0, 0), (1, 1), (0, 10), (10, 0), (1, 100), (100, 1), (300, 200)] {
            let image = generate_sample_image(999, w, h);
            assert_eq!(image.len(), w * h);
        }
    }

    #[test]
    fn test_write_sample_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.raw");

        write_sample_file(&path, 7, 16, 8).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), generate_sample_image(7, 16, 8));
    }
}
