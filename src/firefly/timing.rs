//! Randomized flash timing
//!
//! Every flash cycle draws three delays. The dark wait is counted in
//! milliseconds while the per-step rising and falling delays are counted in
//! microseconds, even though all three are drawn from ranges of similar
//! magnitude. The two resolutions are kept as they are; they set the look of
//! the jar (long dark gaps, fast fades).

#[cfg(feature = "esp32-log")]
use esp_println::println;

use embassy_time::Duration;

use crate::random::{DelayRange, RandomSource};

const DEFAULT_DARK_MS: DelayRange = DelayRange::new(4000, 7000);
const DEFAULT_RISING_US: DelayRange = DelayRange::new(1000, 1300);
const DEFAULT_FALLING_US: DelayRange = DelayRange::new(1500, 2000);

/// Ranges the three delays are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRanges {
    /// Dark wait between flashes, milliseconds
    pub dark: DelayRange,
    /// Delay between rising steps, microseconds
    pub rising: DelayRange,
    /// Delay between falling steps, microseconds
    pub falling: DelayRange,
}

impl DelayRanges {
    pub const DEFAULT: Self = Self {
        dark: DEFAULT_DARK_MS,
        rising: DEFAULT_RISING_US,
        falling: DEFAULT_FALLING_US,
    };
}

impl Default for DelayRanges {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Delays of a single flash cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashTiming {
    dark: u32,
    rising: u32,
    falling: u32,
}

impl FlashTiming {
    /// Timing before the first roll: every delay at its range minimum
    pub const fn initial(ranges: &DelayRanges) -> Self {
        Self {
            dark: ranges.dark.min(),
            rising: ranges.rising.min(),
            falling: ranges.falling.min(),
        }
    }

    /// Draw a fresh set of delays
    pub fn roll<R: RandomSource + ?Sized>(ranges: &DelayRanges, rng: &mut R) -> Self {
        let timing = Self {
            dark: ranges.dark.sample(rng),
            rising: ranges.rising.sample(rng),
            falling: ranges.falling.sample(rng),
        };
        #[cfg(feature = "esp32-log")]
        println!(
            "[FlashTiming.roll] dark={}ms rising={}us falling={}us",
            timing.dark, timing.rising, timing.falling
        );
        timing
    }

    /// Raw dark wait value (milliseconds)
    pub const fn dark_delay(self) -> u32 {
        self.dark
    }

    /// Raw rising step value (microseconds)
    pub const fn rising_delay(self) -> u32 {
        self.rising
    }

    /// Raw falling step value (microseconds)
    pub const fn falling_delay(self) -> u32 {
        self.falling
    }

    #[allow(clippy::cast_lossless)]
    pub const fn dark_wait(self) -> Duration {
        Duration::from_millis(self.dark as u64)
    }

    #[allow(clippy::cast_lossless)]
    pub const fn rising_step(self) -> Duration {
        Duration::from_micros(self.rising as u64)
    }

    #[allow(clippy::cast_lossless)]
    pub const fn falling_step(self) -> Duration {
        Duration::from_micros(self.falling as u64)
    }

    /// Whether this cycle is drawn at all
    ///
    /// Only cycles with an even dark delay reach the strip. Since the dark
    /// delay only changes on a roll, a whole flash is either shown or hidden.
    pub const fn is_visible(self) -> bool {
        self.dark % 2 == 0
    }
}
