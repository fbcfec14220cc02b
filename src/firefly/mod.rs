//! Firefly flash state machine
//!
//! One [`FlashUnit`] drives one LED. Units never block: a suspended unit
//! stores the instant it may run again and every [`FlashUnit::tick`] before
//! that instant is a no-op. This lets a single thread advance any number of
//! fireflies in round-robin.

mod timing;

use embassy_time::Instant;
pub use timing::{DelayRanges, FlashTiming};

use crate::color::ColorProfile;
use crate::pixels::PixelBuffer;
use crate::random::RandomSource;

/// Per-firefly configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireflyConfig {
    pub delays: DelayRanges,
    pub color: ColorProfile,
}

impl FireflyConfig {
    pub const DEFAULT: Self = Self {
        delays: DelayRanges::DEFAULT,
        color: ColorProfile::PYRALIS,
    };
}

impl Default for FireflyConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Flash phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Brightness goes up one step per tick
    Rising,
    /// Brightness goes down one step per tick
    Falling,
    /// Dark between two flashes; rising starts once the wait is over
    DarkWait,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Still suspended, nothing happened
    Waiting,
    /// Dark wait ended, the first rising step is scheduled
    Resumed,
    /// Brightness moved by one
    Advanced {
        brightness: u8,
        /// Whether the pixel was written and flushed
        shown: bool,
    },
}

/// State machine of a single firefly
#[derive(Debug, Clone)]
pub struct FlashUnit {
    index: usize,
    config: FireflyConfig,
    brightness: u8,
    phase: Phase,
    timing: FlashTiming,
    resume_at: Instant,
}

impl FlashUnit {
    /// Create a firefly for pixel `index`
    ///
    /// The unit starts rising from zero with [`FlashTiming::initial`], so the
    /// first flash uses the minimum of every range. The first roll happens at
    /// the end of that flash.
    pub const fn new(index: usize, config: FireflyConfig) -> Self {
        Self {
            index,
            config,
            brightness: 0,
            phase: Phase::Rising,
            timing: FlashTiming::initial(&config.delays),
            resume_at: Instant::from_ticks(0),
        }
    }

    /// Create a firefly with its first timing already rolled
    pub fn rolled<R: RandomSource + ?Sized>(
        index: usize,
        config: FireflyConfig,
        rng: &mut R,
    ) -> Self {
        let mut unit = Self::new(index, config);
        unit.timing = FlashTiming::roll(&config.delays, rng);
        unit
    }

    /// Advance the state machine by one step
    ///
    /// Writes only to slot [`Self::index`] of `pixels`.
    pub fn tick<B, R>(&mut self, now: Instant, pixels: &mut B, rng: &mut R) -> Step
    where
        B: PixelBuffer + ?Sized,
        R: RandomSource + ?Sized,
    {
        if now < self.resume_at {
            return Step::Waiting;
        }

        let rising = match self.phase {
            Phase::Rising => true,
            Phase::Falling => false,
            Phase::DarkWait => {
                self.phase = Phase::Rising;
                self.resume_at = now + self.timing.rising_step();
                return Step::Resumed;
            }
        };

        self.brightness = if rising {
            self.brightness.saturating_add(1)
        } else {
            self.brightness.saturating_sub(1)
        };

        let shown = self.timing.is_visible();
        if shown {
            pixels.set_pixel(self.index, self.config.color.color(self.brightness));
            pixels.flush();
        }

        if rising && self.brightness == u8::MAX {
            self.phase = Phase::Falling;
        } else if !rising && self.brightness == 0 {
            self.timing = FlashTiming::roll(&self.config.delays, rng);
            self.phase = Phase::DarkWait;
            self.resume_at = now + self.timing.dark_wait();
            return Step::Advanced {
                brightness: self.brightness,
                shown,
            };
        }

        let step = match self.phase {
            Phase::Falling => self.timing.falling_step(),
            Phase::Rising | Phase::DarkWait => self.timing.rising_step(),
        };
        self.resume_at = now + step;

        Step::Advanced {
            brightness: self.brightness,
            shown,
        }
    }

    /// Pixel slot this firefly owns
    pub const fn index(&self) -> usize {
        self.index
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// True while rising or waiting to rise
    pub const fn is_rising(&self) -> bool {
        !matches!(self.phase, Phase::Falling)
    }

    /// Delays of the current flash cycle
    pub const fn timing(&self) -> FlashTiming {
        self.timing
    }

    /// Earliest instant the next tick does anything
    pub const fn resume_at(&self) -> Instant {
        self.resume_at
    }
}
