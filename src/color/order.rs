//! Wire channel order
//!
//! WS28xx parts disagree on the byte order they expect. Colors inside the
//! crate are always logical RGB; the frame buffer reorders them right before
//! they are handed to the output driver.

use crate::color::Rgb;

/// Order in which the strip expects the three channels
///
/// The reordered color keeps the first wire byte in `r`, the second in `g`
/// and the third in `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorOrder {
    Rgb,
    Rbg,
    /// Most WS2812B strips
    #[default]
    Grb,
    Gbr,
    Brg,
    /// Common on WS2812B "fairy light" strings
    Bgr,
}

impl ColorOrder {
    /// Reorder a logical color into wire order
    pub const fn apply(self, color: Rgb) -> Rgb {
        let Rgb { r, g, b } = color;
        let (first, second, third) = match self {
            Self::Rgb => (r, g, b),
            Self::Rbg => (r, b, g),
            Self::Grb => (g, r, b),
            Self::Gbr => (g, b, r),
            Self::Brg => (b, r, g),
            Self::Bgr => (b, g, r),
        };
        Rgb {
            r: first,
            g: second,
            b: third,
        }
    }
}
