mod tests {
    use myrtio_touch_dimmer::lut::BRIGHTNESS_STEPS;
    use myrtio_touch_dimmer::{BrightnessTable, ConfigError, DEFAULT_BRIGHTNESS_STEPS};

    #[test]
    fn test_default_table_is_monotonic() {
        for i in 1..BRIGHTNESS_STEPS {
            assert!(
                DEFAULT_BRIGHTNESS_STEPS[i - 1] >= DEFAULT_BRIGHTNESS_STEPS[i],
                "Duty rises at index {i}"
            );
        }
        assert_eq!(
            BrightnessTable::new(DEFAULT_BRIGHTNESS_STEPS),
            Ok(BrightnessTable::default())
        );
    }

    #[test]
    fn test_default_table_endpoints() {
        let table = BrightnessTable::default();
        assert_eq!(table.duty(0), 16010);
        assert_eq!(table.duty(10), 16005);
        assert_eq!(table.duty(150), 11761);
        assert_eq!(table.duty(255), 0);
    }

    #[test]
    fn test_stevens_matches_default_table() {
        let generated = BrightnessTable::stevens(16010, 0, 0.4).unwrap();
        for (i, (&generated, &shipped)) in generated
            .steps()
            .iter()
            .zip(DEFAULT_BRIGHTNESS_STEPS.iter())
            .enumerate()
        {
            assert!(
                generated.abs_diff(shipped) <= 1,
                "Index {i}: generated {generated}, shipped {shipped}"
            );
        }
    }

    #[test]
    fn test_stevens_respects_duty_range() {
        let table = BrightnessTable::stevens(1000, 200, 0.5).unwrap();
        assert_eq!(table.duty(0), 1000);
        assert_eq!(table.duty(255), 200);
        // Square law: halfway index is a quarter of the way down
        assert_eq!(table.duty(128), 1000 - 202);
    }

    #[test]
    fn test_rejects_rising_duty() {
        let mut steps = DEFAULT_BRIGHTNESS_STEPS;
        steps[100] = steps[99] + 1;
        assert_eq!(
            BrightnessTable::new(steps),
            Err(ConfigError::NonMonotonicTable { index: 100 })
        );
    }

    #[test]
    fn test_flat_table_is_accepted() {
        assert!(BrightnessTable::new([512; BRIGHTNESS_STEPS]).is_ok());
    }
}
