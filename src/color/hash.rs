use super::hsl::Hsl;
use md5::{Digest, Md5};

// Tuning constants. Changing any of them recolors every user.
const LUMINANCE_PIVOT: f64 = 0.2;
const LUMINANCE_SCALE: f64 = -150.0;
const DARK_THRESHOLD: f64 = 18.0;
const DARK_STEEPNESS: f64 = 2.5;
const LIGHT_DAMPING: f64 = 3.0;
const BLUE_BAND_WIDTH: f64 = 15.0;
const BLUE_BAND_DIVISOR: f64 = 3.0;
const BLUE_BAND_CENTERS: [f64; 2] = [180.0, 240.0];

/// Every intermediate of the hash pipeline, kept for previews and audits.
#[derive(Debug, Clone, PartialEq)]
pub struct HashedColor {
    pub digest: String,
    pub seed: Hsl,
    pub luminance: f64,
    pub correction: f64,
    pub adjusted: Hsl,
    pub hex: String,
}

/// Derives the display color for an already-normalized user key.
pub fn hash_color(key: &str) -> HashedColor {
    let digest = md5_hex(key);
    let seed = seed_from_digest(&digest);
    let luminance = seed.to_rgb().cubic_luminance();
    let correction = lightness_correction(luminance) + blue_band_boost(seed.hue);
    let adjusted = Hsl::new(
        seed.hue,
        seed.saturation,
        (seed.lightness + correction).clamp(0.0, 100.0),
    );
    let hex = adjusted.to_rgb().to_hex();
    HashedColor {
        digest,
        seed,
        luminance,
        correction,
        adjusted,
        hex,
    }
}

fn md5_hex(key: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(key.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

fn seed_from_digest(digest: &str) -> Hsl {
    let saturation = nibble_window(digest, 0) % 50 + 40;
    let hue = nibble_window(digest, 4) % 360;
    let lightness = nibble_window(digest, 8) % 20 + 30;
    Hsl::new(hue as f64, saturation as f64, lightness as f64)
}

/// Four hex digits starting at `offset`, read as a big-endian number.
fn nibble_window(digest: &str, offset: usize) -> u32 {
    digest
        .get(offset..offset + 4)
        .and_then(|window| u32::from_str_radix(window, 16).ok())
        .unwrap_or(0)
}

fn lightness_correction(luminance: f64) -> f64 {
    let delta = (luminance - LUMINANCE_PIVOT) * LUMINANCE_SCALE;
    if delta > DARK_THRESHOLD {
        (delta - DARK_THRESHOLD) * DARK_STEEPNESS
    } else if delta < 0.0 {
        delta / LIGHT_DAMPING
    } else {
        0.0
    }
}

fn blue_band_boost(hue: f64) -> f64 {
    let distance = BLUE_BAND_CENTERS
        .iter()
        .map(|center| (center - hue).abs())
        .fold(f64::INFINITY, f64::min);
    if distance < BLUE_BAND_WIDTH {
        (BLUE_BAND_WIDTH - distance) / BLUE_BAND_DIVISOR
    } else {
        0.0
    }
}
