#![no_std]

pub mod color;
pub mod firefly;
pub mod jar;
pub mod pixels;
pub mod random;

pub use firefly::{DelayRanges, FireflyConfig, FlashTiming, FlashUnit, Phase, Step};
pub use jar::{Jar, JarConfig, JarError, PassResult};
pub use pixels::{FrameBuffer, PixelBuffer, SmartLedsDriver};
pub use random::{DelayRange, RandomSource, RngSource};

pub use color::{ColorOrder, ColorProfile, Rgb, compute_color, pyralis_color};
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The frame buffer is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED strip, already in wire order
    fn write(&mut self, colors: &[Rgb]);
}
