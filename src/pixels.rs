//! Shared pixel buffer
//!
//! Fireflies never touch the strip directly. They write packed colors into a
//! [`PixelBuffer`] slot and ask it to flush; the buffer owns wire ordering and
//! the actual output driver.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use smart_leds::{RGB8, SmartLedsWrite};

use crate::OutputDriver;
use crate::color::{BLACK, ColorOrder, Rgb, rgb_from_u32};

/// Slot-addressed color buffer with an explicit flush
pub trait PixelBuffer {
    /// Number of slots
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set slot `index` to a packed `0xRRGGBB` color
    ///
    /// Panics if `index` is out of range.
    fn set_pixel(&mut self, index: usize, color: u32);

    /// Push the buffer to the hardware
    fn flush(&mut self);

    /// Wire channel order used by later flushes
    ///
    /// Buffers that do not reorder channels ignore it.
    fn set_color_order(&mut self, _order: ColorOrder) {}
}

/// Fixed-size frame buffer in front of an [`OutputDriver`]
pub struct FrameBuffer<D: OutputDriver, const N: usize> {
    driver: D,
    order: ColorOrder,
    pixels: [Rgb; N],
    wire: [Rgb; N],
}

impl<D: OutputDriver, const N: usize> FrameBuffer<D, N> {
    /// Create a dark frame buffer
    pub const fn new(driver: D, order: ColorOrder) -> Self {
        Self {
            driver,
            order,
            pixels: [BLACK; N],
            wire: [BLACK; N],
        }
    }

    /// Logical color of slot `index`
    pub fn pixel(&self, index: usize) -> Option<Rgb> {
        self.pixels.get(index).copied()
    }

    /// Logical colors of all slots
    pub const fn pixels(&self) -> &[Rgb; N] {
        &self.pixels
    }

    /// Turn every slot off without flushing
    pub fn clear(&mut self) {
        self.pixels.fill(BLACK);
    }

    pub const fn order(&self) -> ColorOrder {
        self.order
    }

    pub const fn driver(&self) -> &D {
        &self.driver
    }

    pub const fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}

impl<D: OutputDriver, const N: usize> PixelBuffer for FrameBuffer<D, N> {
    fn len(&self) -> usize {
        N
    }

    fn set_pixel(&mut self, index: usize, color: u32) {
        assert!(index < N, "pixel {index} out of range (strip has {N})");
        self.pixels[index] = rgb_from_u32(color);
    }

    fn flush(&mut self) {
        for (wire, pixel) in self.wire.iter_mut().zip(self.pixels.iter()) {
            *wire = self.order.apply(*pixel);
        }
        self.driver.write(&self.wire);
    }

    fn set_color_order(&mut self, order: ColorOrder) {
        self.order = order;
    }
}

/// [`OutputDriver`] over any `smart-leds` writer
///
/// Write errors are counted and otherwise dropped; the next flush sends the
/// whole frame again.
pub struct SmartLedsDriver<W> {
    writer: W,
    failures: u32,
}

impl<W> SmartLedsDriver<W>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            failures: 0,
        }
    }

    /// Number of writes the strip rejected
    pub const fn failures(&self) -> u32 {
        self.failures
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> OutputDriver for SmartLedsDriver<W>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    fn write(&mut self, colors: &[Rgb]) {
        if self.writer.write(colors.iter().copied()).is_err() {
            self.failures = self.failures.saturating_add(1);
            #[cfg(feature = "esp32-log")]
            println!("[SmartLedsDriver.write] strip write failed ({})", self.failures);
        }
    }
}
