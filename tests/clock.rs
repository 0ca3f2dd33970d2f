mod tests {
    use myrtio_touch_dimmer::clock::{duration_ms, elapsed_ms};
    use myrtio_touch_dimmer::{Clock, Duration, EmbassyClock};

    #[test]
    fn test_elapsed_wraps() {
        assert_eq!(elapsed_ms(10, 5), 5);
        assert_eq!(elapsed_ms(4, u32::MAX - 5), 10);
        assert_eq!(elapsed_ms(0, 0), 0);
    }

    #[test]
    fn test_duration_ms_saturates() {
        assert_eq!(duration_ms(Duration::from_millis(250)), 250);
        assert_eq!(duration_ms(Duration::from_secs(u64::from(u32::MAX))), u32::MAX);
    }

    #[test]
    fn test_embassy_clock_delay_blocks() {
        let clock = EmbassyClock;
        let start = clock.now_ms();
        clock.delay_ms(5);
        assert!(elapsed_ms(clock.now_ms(), start) >= 5);
    }
}
