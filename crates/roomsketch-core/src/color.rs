//! Stroke and room fill colors.

use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opacity of every generated room fill.
pub const ROOM_FILL_OPACITY: f32 = 0.24;

/// Serializable color: 8-bit RGB channels with a fractional alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Outline blue used for strokes and handles (`#3272ED`).
    pub const fn outline() -> Self {
        Self::opaque(0x32, 0x72, 0xED)
    }
}

impl From<Rgba> for Color {
    fn from(c: Rgba) -> Self {
        Color::from_rgb8(c.r, c.g, c.b).with_alpha(c.a)
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b, f32::from(rgba.a) / 255.0)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// splitmix32 finalizer.
fn mix(seed: u32) -> u32 {
    let mut x = seed.wrapping_mul(0x9E3779B9);
    x ^= x >> 16;
    x = x.wrapping_mul(0x85EBCA6B);
    x ^= x >> 13;
    x = x.wrapping_mul(0xC2B2AE35);
    x ^= x >> 16;
    x
}

/// Generate a fresh seed for a new room fill.
/// Counter + hash, so it needs no clock or OS entropy.
pub fn generate_seed() -> u32 {
    use std::sync::atomic::{AtomicU32, Ordering};

    static SEED_COUNTER: AtomicU32 = AtomicU32::new(1);

    mix(SEED_COUNTER.fetch_add(1, Ordering::Relaxed))
}

/// Translucent room fill derived from `seed`.
///
/// Each channel is one byte of the mixed seed, so channels are uniform over
/// `0..=255`; the alpha is always [`ROOM_FILL_OPACITY`].
pub fn room_fill(seed: u32) -> Rgba {
    let [r, g, b, _] = mix(seed).to_le_bytes();
    Rgba::new(r, g, b, ROOM_FILL_OPACITY)
}
