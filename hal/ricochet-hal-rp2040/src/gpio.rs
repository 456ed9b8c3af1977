//! GPIO output wrapper

use embassy_rp::gpio::Output;
use ricochet_hal::OutputPin;

/// Status LED (or any push-pull output) driven through `embassy-rp`
pub struct LedPin {
    pin: Output<'static>,
}

impl LedPin {
    pub fn new(pin: Output<'static>) -> Self {
        Self { pin }
    }
}

impl OutputPin for LedPin {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
