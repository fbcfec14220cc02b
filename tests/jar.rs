mod tests {
    use embassy_time::{Duration, Instant};
    use firefly_jar::color::BLACK;
    use firefly_jar::{
        ColorOrder, FrameBuffer, Jar, JarConfig, JarError, OutputDriver, Phase, PixelBuffer,
        RandomSource, Rgb, RngSource, SmartLedsDriver,
    };
    use rand::{SeedableRng, rngs::SmallRng};
    use smart_leds::{RGB8, SmartLedsWrite};

    const GREEN_1: Rgb = Rgb { r: 0, g: 1, b: 0 };

    /// Output driver that keeps every frame it was given
    #[derive(Default)]
    struct Capture {
        frames: Vec<Vec<Rgb>>,
    }

    impl OutputDriver for Capture {
        fn write(&mut self, colors: &[Rgb]) {
            self.frames.push(colors.to_vec());
        }
    }

    struct Lowest;

    impl RandomSource for Lowest {
        fn random_range(&mut self, low: u32, _high: u32) -> u32 {
            low
        }
    }

    fn jar_of<const N: usize>(count: usize) -> Jar<FrameBuffer<Capture, N>, Lowest, N> {
        let config = JarConfig::default().with_pixel_count(count);
        let pixels = FrameBuffer::new(Capture::default(), ColorOrder::Rgb);
        Jar::new(&config, pixels, Lowest).expect("jar fits")
    }

    #[test]
    fn test_default_config() {
        let config = JarConfig::default();
        assert_eq!(config.pixel_count, 10);
        assert_eq!(config.color_order, ColorOrder::Bgr);
        assert_eq!(config.firefly.delays.dark.min(), 4000);
        assert_eq!(config.firefly.delays.dark.max(), 7000);
    }

    #[test]
    fn test_too_many_fireflies() {
        let config = JarConfig::default().with_pixel_count(9);
        let pixels = FrameBuffer::<_, 16>::new(Capture::default(), ColorOrder::Rgb);
        let result = Jar::<_, _, 8>::new(&config, pixels, Lowest);
        assert_eq!(
            result.err(),
            Some(JarError::TooManyFireflies {
                requested: 9,
                capacity: 8
            })
        );
    }

    #[test]
    fn test_buffer_too_small() {
        let config = JarConfig::default().with_pixel_count(5);
        let pixels = FrameBuffer::<_, 4>::new(Capture::default(), ColorOrder::Rgb);
        let result = Jar::<_, _, 8>::new(&config, pixels, Lowest);
        assert_eq!(
            result.err(),
            Some(JarError::BufferTooSmall {
                requested: 5,
                available: 4
            })
        );
    }

    #[test]
    fn test_new_blacks_out_and_flushes() {
        let mut pixels = FrameBuffer::<_, 6>::new(Capture::default(), ColorOrder::Rgb);
        for index in 0..6 {
            pixels.set_pixel(index, 0x00FF_FFFF);
        }
        let config = JarConfig::default().with_pixel_count(4);
        let jar = Jar::<_, _, 6>::new(&config, pixels, Lowest).expect("jar fits");

        let frames = &jar.pixels().driver().frames;
        assert_eq!(frames.len(), 1);
        assert_eq!(&frames[0][..4], &[BLACK; 4]);
        // Pixels without a firefly are left alone
        assert_eq!(jar.pixels().pixel(4), Some(Rgb { r: 255, g: 255, b: 255 }));

        let indices: Vec<usize> = jar.fireflies().iter().map(|f| f.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert!(jar.fireflies().iter().all(|f| f.timing().dark_delay() == 4000));
    }

    #[test]
    fn test_tick_advances_every_firefly_once() {
        let mut jar = jar_of::<5>(5);
        let result = jar.tick(Instant::from_millis(0));

        assert!(jar.fireflies().iter().all(|f| f.brightness() == 1));
        assert_eq!(jar.pixels().pixels(), &[GREEN_1; 5]);
        // One flush at start-up, then one per visible firefly
        assert_eq!(jar.pixels().driver().frames.len(), 6);

        assert_eq!(result.next_deadline, Instant::from_micros(1000));
        assert_eq!(result.sleep_duration, Duration::from_micros(1000));
    }

    #[test]
    fn test_tick_before_deadline_is_idle() {
        let mut jar = jar_of::<3>(3);
        let _ = jar.tick(Instant::from_millis(0));
        let frames = jar.pixels().driver().frames.len();

        let result = jar.tick(Instant::from_micros(400));
        assert!(jar.fireflies().iter().all(|f| f.brightness() == 1));
        assert_eq!(jar.pixels().driver().frames.len(), frames);
        assert_eq!(result.sleep_duration, Duration::from_micros(600));
    }

    #[test]
    fn test_run_for_reaches_peak() {
        let mut jar = jar_of::<4>(4);
        let mut t = 0;
        jar.run_for(255, || {
            let now = Instant::from_millis(t);
            t += 1;
            now
        });

        for firefly in jar.fireflies() {
            assert_eq!(firefly.brightness(), 255);
            assert_eq!(firefly.phase(), Phase::Falling);
        }
        assert_eq!(
            jar.pixels().pixel(0),
            Some(Rgb {
                r: 200,
                g: 255,
                b: 0
            })
        );
    }

    #[test]
    fn test_configured_order_reaches_driver() {
        // Buffer built as RGB, the jar config asks for BGR
        let config = JarConfig::default().with_pixel_count(1);
        let pixels = FrameBuffer::<_, 1>::new(Capture::default(), ColorOrder::Rgb);
        let mut jar = Jar::<_, _, 1>::new(&config, pixels, Lowest).expect("jar fits");
        assert_eq!(jar.pixels().order(), ColorOrder::Bgr);
        assert!(!jar.pixels().is_empty());

        jar.pixels_mut().driver_mut().frames.clear();
        let mut t = 0;
        jar.run_for(255, || {
            let now = Instant::from_millis(t);
            t += 1;
            now
        });

        let frames = &jar.pixels().driver().frames;
        assert_eq!(frames.len(), 255);
        assert_eq!(
            frames.last(),
            Some(&vec![Rgb {
                r: 0,
                g: 255,
                b: 200
            }])
        );
        assert_eq!(
            jar.pixels().pixel(0),
            Some(Rgb {
                r: 200,
                g: 255,
                b: 0
            })
        );
    }

    #[test]
    fn test_with_color_order_overrides_default() {
        let config = JarConfig::default()
            .with_pixel_count(2)
            .with_color_order(ColorOrder::Grb);
        let pixels = FrameBuffer::<_, 2>::new(Capture::default(), ColorOrder::Bgr);
        let mut jar = Jar::<_, _, 2>::new(&config, pixels, Lowest).expect("jar fits");
        assert_eq!(jar.pixels().order(), ColorOrder::Grb);

        let _ = jar.tick(Instant::from_millis(0));
        let last = jar.pixels().driver().frames.last().cloned();
        // GREEN_1 in GRB puts the green byte first
        assert_eq!(last, Some(vec![Rgb { r: 1, g: 0, b: 0 }; 2]));
    }

    #[test]
    fn test_fireflies_roll_independent_timings() {
        let config = JarConfig::default().with_pixel_count(8);
        let pixels = FrameBuffer::<_, 8>::new(Capture::default(), ColorOrder::Grb);
        let rng = RngSource::new(SmallRng::seed_from_u64(1));
        let mut jar = Jar::<_, _, 8>::new(&config, pixels, rng).expect("jar fits");

        let first = jar.fireflies()[0].timing();
        assert!(jar.fireflies().iter().any(|f| f.timing() != first));

        let mut t = 0;
        jar.run_for(2_000, || {
            let now = Instant::from_micros(t);
            t += 250;
            now
        });
        for (index, firefly) in jar.fireflies().iter().enumerate() {
            assert_eq!(firefly.index(), index);
            assert!(firefly.brightness() > 0);
        }
    }

    #[test]
    fn test_frame_buffer_applies_wire_order() {
        let mut pixels = FrameBuffer::<_, 2>::new(Capture::default(), ColorOrder::Bgr);
        pixels.set_pixel(1, 0x00C8_FF00);
        pixels.flush();

        assert_eq!(
            pixels.pixel(1),
            Some(Rgb {
                r: 200,
                g: 255,
                b: 0
            })
        );
        assert_eq!(
            pixels.driver().frames[0],
            vec![
                BLACK,
                Rgb {
                    r: 0,
                    g: 255,
                    b: 200
                }
            ]
        );

        pixels.clear();
        assert_eq!(pixels.pixels(), &[BLACK; 2]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_frame_buffer_rejects_foreign_slot() {
        let mut pixels = FrameBuffer::<_, 2>::new(Capture::default(), ColorOrder::Rgb);
        pixels.set_pixel(2, 0);
    }

    /// `smart-leds` writer that can be told to fail
    struct Strip {
        fail: bool,
        received: Vec<RGB8>,
    }

    impl SmartLedsWrite for Strip {
        type Error = ();
        type Color = RGB8;

        fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
        where
            T: IntoIterator<Item = I>,
            I: Into<Self::Color>,
        {
            self.received = iterator.into_iter().map(Into::into).collect();
            if self.fail { Err(()) } else { Ok(()) }
        }
    }

    #[test]
    fn test_smart_leds_driver() {
        let mut driver = SmartLedsDriver::new(Strip {
            fail: false,
            received: Vec::new(),
        });
        driver.write(&[GREEN_1, BLACK]);
        assert_eq!(driver.failures(), 0);

        let strip = driver.into_inner();
        assert_eq!(strip.received, vec![GREEN_1, BLACK]);

        let mut driver = SmartLedsDriver::new(Strip {
            fail: true,
            received: Vec::new(),
        });
        driver.write(&[GREEN_1]);
        driver.write(&[GREEN_1]);
        assert_eq!(driver.failures(), 2);
    }

    #[test]
    fn test_jar_error_display() {
        let error = JarError::BufferTooSmall {
            requested: 12,
            available: 10,
        };
        assert_eq!(
            error.to_string(),
            "12 fireflies requested, strip has 10 pixels"
        );
    }
}
