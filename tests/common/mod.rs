#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use myrtio_touch_dimmer::{Clock, DutyOutput, TouchAdc};

/// Clock that only moves when told to; delays advance it instantly
pub struct ManualClock {
    now: Cell<u32>,
}

impl ManualClock {
    pub fn starting_at(ms: u32) -> Self {
        Self { now: Cell::new(ms) }
    }

    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }

    fn delay_ms(&self, ms: u32) {
        self.advance(ms);
    }
}

/// Output channel that records every duty written to it
pub struct RecordingOutput<'a> {
    log: &'a RefCell<Vec<u16>>,
}

impl<'a> RecordingOutput<'a> {
    pub fn new(log: &'a RefCell<Vec<u16>>) -> Self {
        Self { log }
    }
}

impl DutyOutput for RecordingOutput<'_> {
    fn set_duty(&mut self, duty: u16) {
        self.log.borrow_mut().push(duty);
    }
}

/// Output channel that records each duty together with the clock reading
pub struct TimedOutput<'a> {
    clock: &'a ManualClock,
    log: &'a RefCell<Vec<(u32, u16)>>,
}

impl<'a> TimedOutput<'a> {
    pub fn new(clock: &'a ManualClock, log: &'a RefCell<Vec<(u32, u16)>>) -> Self {
        Self { clock, log }
    }
}

impl DutyOutput for TimedOutput<'_> {
    fn set_duty(&mut self, duty: u16) {
        self.log.borrow_mut().push((self.clock.now_ms(), duty));
    }
}

/// Observable state of a [`FakeTouchAdc`]
#[derive(Default)]
pub struct AdcProbe {
    pub level: Cell<u32>,
    pub reads: Cell<usize>,
    pub inits: Cell<usize>,
    pub last_pin: Cell<u8>,
    pub last_oversample: Cell<u16>,
}

impl AdcProbe {
    pub fn set_level(&self, level: u32) {
        self.level.set(level);
    }
}

/// Touch ADC returning whatever level the test dials in
pub struct FakeTouchAdc {
    probe: Rc<AdcProbe>,
}

impl FakeTouchAdc {
    pub fn new(level: u32) -> (Self, Rc<AdcProbe>) {
        let probe = Rc::new(AdcProbe::default());
        probe.set_level(level);
        (
            Self {
                probe: Rc::clone(&probe),
            },
            probe,
        )
    }
}

impl TouchAdc for FakeTouchAdc {
    type Pin = u8;

    fn init(&mut self) {
        self.probe.inits.set(self.probe.inits.get() + 1);
    }

    fn read(&mut self, pin: u8, oversample: u16) -> u32 {
        self.probe.reads.set(self.probe.reads.get() + 1);
        self.probe.last_pin.set(pin);
        self.probe.last_oversample.set(oversample);
        self.probe.level.get()
    }
}
