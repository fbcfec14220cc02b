//! Terminal preview of a firefly jar
//!
//! Runs the jar on the host clock and draws the strip as a row of colored
//! dots. Frames are throttled; the jar itself flushes far more often than a
//! terminal can redraw.

#![allow(clippy::print_stdout)]

use std::io::Write as _;
use std::time::{Duration as StdDuration, Instant as StdInstant};

use firefly_jar::{
    ColorOrder, FrameBuffer, Instant, Jar, JarConfig, OutputDriver, Rgb, RngSource,
};
use rand::{SeedableRng, rngs::SmallRng};

const FIREFLIES: usize = 24;
const REDRAW: StdDuration = StdDuration::from_millis(33);

struct Terminal {
    last_draw: Option<StdInstant>,
}

impl OutputDriver for Terminal {
    fn write(&mut self, colors: &[Rgb]) {
        if self.last_draw.is_some_and(|t| t.elapsed() < REDRAW) {
            return;
        }
        self.last_draw = Some(StdInstant::now());

        let mut line = String::from("\r");
        for c in colors {
            line.push_str(&format!("\x1b[38;2;{};{};{}m\u{25cf} ", c.r, c.g, c.b));
        }
        line.push_str("\x1b[0m");
        print!("{line}");
        let _ = std::io::stdout().flush();
    }
}

fn main() {
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_secs());

    let config = JarConfig::default()
        .with_pixel_count(FIREFLIES)
        .with_color_order(ColorOrder::Rgb);
    let pixels = FrameBuffer::<_, FIREFLIES>::new(Terminal { last_draw: None }, ColorOrder::Rgb);
    let rng = RngSource::new(SmallRng::seed_from_u64(seed));
    let mut jar = match Jar::<_, _, FIREFLIES>::new(&config, pixels, rng) {
        Ok(jar) => jar,
        Err(error) => {
            println!("{error}");
            return;
        }
    };

    loop {
        let result = jar.tick(Instant::now());
        std::thread::sleep(StdDuration::from_micros(result.sleep_duration.as_micros()));
    }
}
