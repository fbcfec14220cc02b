//! Brightness to color mapping
//!
//! A firefly keeps one hue for its whole flash and only varies intensity, so a
//! color is described by three channel multipliers applied to a single
//! brightness value. Multipliers are the channel values of the target color
//! divided by 255.

use libm::floorf;

/// Scale a brightness by a channel multiplier and floor the result.
///
/// Multipliers outside `[0, 1]` are not clamped: the product goes through
/// `i32`, so oversized or negative channels spill into the packed word.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel(brightness: u8, mult: f32) -> u32 {
    floorf(f32::from(brightness) * mult) as i32 as u32
}

/// Compute a packed `0xRRGGBB` color for a brightness and channel multipliers.
///
/// The packing is plain RGB; wire order is the frame buffer's concern.
pub fn compute_color(brightness: u8, r_mult: f32, g_mult: f32, b_mult: f32) -> u32 {
    let r = channel(brightness, r_mult);
    let g = channel(brightness, g_mult);
    let b = channel(brightness, b_mult);
    (r << 16) | (g << 8) | b
}

/// Color of *Photinus pyralis*, the common eastern firefly.
///
/// Approximates its 562 nm emission peak, `rgb(201, 255, 0)`.
pub fn pyralis_color(brightness: u8) -> u32 {
    ColorProfile::PYRALIS.color(brightness)
}

/// Channel multipliers describing a species' flash color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorProfile {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl ColorProfile {
    /// ~562 nm yellow-green
    pub const PYRALIS: Self = Self::new(0.788, 1.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Packed color for the given brightness
    pub fn color(self, brightness: u8) -> u32 {
        compute_color(brightness, self.r, self.g, self.b)
    }
}

impl Default for ColorProfile {
    fn default() -> Self {
        Self::PYRALIS
    }
}
