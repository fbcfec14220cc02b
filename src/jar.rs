//! Round-robin firefly scheduler
//!
//! The jar owns the fireflies, the shared pixel buffer and the random source.
//! Each pass advances every firefly once, in index order, and reports when the
//! next firefly wakes so the caller can sleep instead of spinning.

use core::fmt;

use embassy_time::{Duration, Instant};
#[cfg(feature = "esp32-log")]
use esp_println::println;
use heapless::Vec;

use crate::color::{ColorOrder, ColorProfile};
use crate::firefly::{DelayRanges, FireflyConfig, FlashUnit};
use crate::pixels::PixelBuffer;
use crate::random::RandomSource;

/// Number of fireflies in the default jar.
pub const DEFAULT_PIXEL_COUNT: usize = 10;

/// Configuration for the jar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JarConfig {
    /// Number of fireflies, one per leading pixel
    pub pixel_count: usize,
    /// Wire channel order of the strip
    pub color_order: ColorOrder,
    /// Timing and color shared by every firefly
    pub firefly: FireflyConfig,
}

impl JarConfig {
    pub const DEFAULT: Self = Self {
        pixel_count: DEFAULT_PIXEL_COUNT,
        color_order: ColorOrder::Bgr,
        firefly: FireflyConfig::DEFAULT,
    };

    #[must_use]
    pub const fn with_pixel_count(mut self, pixel_count: usize) -> Self {
        self.pixel_count = pixel_count;
        self
    }

    #[must_use]
    pub const fn with_color_order(mut self, color_order: ColorOrder) -> Self {
        self.color_order = color_order;
        self
    }

    #[must_use]
    pub const fn with_delays(mut self, delays: DelayRanges) -> Self {
        self.firefly.delays = delays;
        self
    }

    #[must_use]
    pub const fn with_color(mut self, color: ColorProfile) -> Self {
        self.firefly.color = color;
        self
    }
}

impl Default for JarConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Error returned when a jar can not be built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JarError {
    /// More fireflies requested than the jar can hold
    TooManyFireflies { requested: usize, capacity: usize },
    /// The pixel buffer has fewer slots than fireflies
    BufferTooSmall { requested: usize, available: usize },
}

impl fmt::Display for JarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyFireflies {
                requested,
                capacity,
            } => write!(f, "{requested} fireflies requested, jar holds {capacity}"),
            Self::BufferTooSmall {
                requested,
                available,
            } => write!(f, "{requested} fireflies requested, strip has {available} pixels"),
        }
    }
}

impl core::error::Error for JarError {}

/// Result of a scheduler pass.
#[derive(Debug, Clone, Copy)]
pub struct PassResult {
    /// Earliest instant any firefly has work to do.
    pub next_deadline: Instant,
    /// How long to wait until then (zero if something is already due).
    pub sleep_duration: Duration,
}

/// A jar of fireflies sharing one strip
///
/// # Usage
///
/// ```ignore
/// let pixels = FrameBuffer::<_, 10>::new(driver, ColorOrder::default());
/// let rng = RngSource::new(SmallRng::seed_from_u64(seed));
/// let mut jar = Jar::<_, _, 10>::new(&JarConfig::default(), pixels, rng)?;
///
/// jar.run(Instant::now);
/// ```
pub struct Jar<B: PixelBuffer, R: RandomSource, const MAX_FIREFLIES: usize> {
    pixels: B,
    rng: R,
    fireflies: Vec<FlashUnit, MAX_FIREFLIES>,
}

impl<B: PixelBuffer, R: RandomSource, const MAX_FIREFLIES: usize> Jar<B, R, MAX_FIREFLIES> {
    /// Build the jar
    ///
    /// Applies the configured wire order to the buffer, turns off the pixels
    /// the fireflies will use, then creates one firefly per pixel with its
    /// first timing already rolled.
    pub fn new(config: &JarConfig, mut pixels: B, mut rng: R) -> Result<Self, JarError> {
        let count = config.pixel_count;
        if count > MAX_FIREFLIES {
            return Err(JarError::TooManyFireflies {
                requested: count,
                capacity: MAX_FIREFLIES,
            });
        }
        if count > pixels.len() {
            return Err(JarError::BufferTooSmall {
                requested: count,
                available: pixels.len(),
            });
        }

        pixels.set_color_order(config.color_order);
        for index in 0..count {
            pixels.set_pixel(index, 0);
        }
        pixels.flush();

        let fireflies: Vec<FlashUnit, MAX_FIREFLIES> = (0..count)
            .map(|index| FlashUnit::rolled(index, config.firefly, &mut rng))
            .collect();

        #[cfg(feature = "esp32-log")]
        println!("[Jar.new] {} fireflies in the jar", count);

        Ok(Self {
            pixels,
            rng,
            fireflies,
        })
    }

    /// Advance every firefly once, in index order.
    pub fn tick(&mut self, now: Instant) -> PassResult {
        let mut next_deadline: Option<Instant> = None;
        for firefly in &mut self.fireflies {
            let _ = firefly.tick(now, &mut self.pixels, &mut self.rng);
            let resume_at = firefly.resume_at();
            next_deadline = Some(next_deadline.map_or(resume_at, |d| d.min(resume_at)));
        }

        let next_deadline = next_deadline.unwrap_or(now);
        let sleep_duration = next_deadline
            .checked_duration_since(now)
            .unwrap_or(Duration::from_ticks(0));

        PassResult {
            next_deadline,
            sleep_duration,
        }
    }

    /// Run `passes` scheduler passes, reading the time before each.
    pub fn run_for(&mut self, passes: usize, mut clock: impl FnMut() -> Instant) {
        for _ in 0..passes {
            let _ = self.tick(clock());
        }
    }

    /// Run forever.
    pub fn run(&mut self, mut clock: impl FnMut() -> Instant) -> ! {
        loop {
            let _ = self.tick(clock());
        }
    }

    pub fn fireflies(&self) -> &[FlashUnit] {
        &self.fireflies
    }

    pub const fn pixels(&self) -> &B {
        &self.pixels
    }

    pub const fn pixels_mut(&mut self) -> &mut B {
        &mut self.pixels
    }
}
