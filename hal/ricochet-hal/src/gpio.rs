//! GPIO pin abstractions
//!
//! The pager only drives outputs (the status LED). Inputs stay with the
//! chip HAL until something needs them.

/// Digital output pin
///
/// Implementations handle the register access for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently driven high
    fn is_set_high(&self) -> bool;

    /// Invert the current level
    fn toggle(&mut self) {
        let high = self.is_set_high();
        self.set_state(!high);
    }
}

/// Output pin wrapper for active-low wiring
///
/// Many boards sink LED current through the GPIO, so "on" means driving
/// the pin low. Wrapping the pin keeps callers thinking in logical levels.
pub struct ActiveLow<P>(pub P);

impl<P: OutputPin> OutputPin for ActiveLow<P> {
    fn set_high(&mut self) {
        self.0.set_low();
    }

    fn set_low(&mut self) {
        self.0.set_high();
    }

    fn is_set_high(&self) -> bool {
        !self.0.is_set_high()
    }
}
