//! Shared touch ADC.
//!
//! All touch sensors on a board share one converter. The converter is set up
//! exactly once, when the [`TouchSubsystem`] is built, and every sensor then
//! borrows the subsystem instead of touching the peripheral itself.

use core::cell::RefCell;

use critical_section::Mutex;

#[cfg(feature = "esp32-log")]
use esp_println::println;

/// Oversampled capacitive-touch acquisition
///
/// Implement this for the touch front end of the target (charge-transfer
/// ADC, touch controller, mock).
pub trait TouchAdc {
    /// Identifies one touch input (pin, ADC channel, ...)
    type Pin: Copy;

    /// One-time peripheral setup, run by [`TouchSubsystem::new`]
    fn init(&mut self) {}

    /// Read `pin`, accumulating `oversample` acquisitions into one scalar
    ///
    /// Blocks for the oversampling duration only.
    fn read(&mut self, pin: Self::Pin, oversample: u16) -> u32;
}

/// Handle to the initialized touch ADC, shared by every sensor
///
/// Each acquisition runs inside one critical section, so interrupts stay
/// masked for the whole oversampled read. Keep `oversample_iterations` short
/// enough that timer interrupts are not held off for too long.
pub struct TouchSubsystem<A> {
    adc: Mutex<RefCell<A>>,
}

impl<A: TouchAdc> TouchSubsystem<A> {
    /// Initialize the converter and take ownership of it
    pub fn new(mut adc: A) -> Self {
        adc.init();
        #[cfg(feature = "esp32-log")]
        println!("[TouchSubsystem.new] touch ADC initialized");
        Self {
            adc: Mutex::new(RefCell::new(adc)),
        }
    }

    /// Take one oversampled reading of `pin`
    pub fn sample(&self, pin: A::Pin, oversample: u16) -> u32 {
        critical_section::with(|cs| self.adc.borrow(cs).borrow_mut().read(pin, oversample))
    }

    /// Give the converter back
    pub fn free(self) -> A {
        self.adc.into_inner().into_inner()
    }
}
