mod common;

mod tests {
    use std::cell::RefCell;

    use embedded_hal::pwm::{ErrorKind, ErrorType, SetDutyCycle};
    use myrtio_touch_dimmer::{BrightnessRamp, BrightnessTable, DutyOutput, PwmChannel, RampConfig};

    use crate::common::{ManualClock, RecordingOutput};

    struct FakePwm {
        duty: u16,
        fail: bool,
    }

    impl ErrorType for FakePwm {
        type Error = ErrorKind;
    }

    impl SetDutyCycle for FakePwm {
        fn max_duty_cycle(&self) -> u16 {
            16383
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            self.duty = duty;
            Ok(())
        }
    }

    #[test]
    fn test_pwm_channel_forwards_duty() {
        let mut channel = PwmChannel::new(FakePwm {
            duty: 0,
            fail: false,
        });
        assert_eq!(channel.max_duty(), 16383);

        channel.set_duty(4242);
        assert_eq!(channel.into_inner().duty, 4242);
    }

    #[test]
    fn test_pwm_write_errors_are_dropped() {
        let mut channel = PwmChannel::new(FakePwm {
            duty: 7,
            fail: true,
        });
        channel.set_duty(4242);
        assert_eq!(channel.into_inner().duty, 7);
    }

    #[test]
    fn test_ramp_drives_borrowed_pwm_channels() {
        let clock = ManualClock::starting_at(0);
        let table = BrightnessTable::default();
        let mut left = PwmChannel::new(FakePwm {
            duty: 0,
            fail: false,
        });
        let mut right = PwmChannel::new(FakePwm {
            duty: 0,
            fail: false,
        });

        {
            let mut ramp =
                BrightnessRamp::new([&mut left, &mut right], &clock, &table, &RampConfig::default())
                    .unwrap();
            ramp.set(255);
        }

        assert_eq!(left.into_inner().duty, 0);
        assert_eq!(right.into_inner().duty, 0);
    }

    #[test]
    fn test_ramp_hands_outputs_back() {
        let clock = ManualClock::starting_at(0);
        let table = BrightnessTable::default();
        let log = RefCell::new(Vec::new());

        let mut ramp = BrightnessRamp::new(
            [RecordingOutput::new(&log)],
            &clock,
            &table,
            &RampConfig::default(),
        )
        .unwrap();
        ramp.set(128);
        let [mut output] = ramp.free();
        output.set_duty(1);

        assert_eq!(*log.borrow(), vec![table.duty(128), 1]);
    }
}
