//! LED control module for the D-pad Rover.
//!
//! Two indicator LEDs hang off plain GPIO outputs, one per side.

use embedded_hal::digital::OutputPin;

/// Indicator LED, numbered by the edge-connector pin it is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LedId {
    Left = 8,
    Right = 12,
}

impl LedId {
    /// Look up the LED wired to `pin`, if any.
    pub const fn from_pin(pin: u8) -> Option<Self> {
        match pin {
            8 => Some(LedId::Left),
            12 => Some(LedId::Right),
            _ => None,
        }
    }

    pub const fn pin(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedSwitch {
    On,
    Off,
}

/// Drives the left and right indicator pins. Nothing is read back.
pub struct LedController<P> {
    left: P,
    right: P,
}

impl<P> LedController<P>
where
    P: OutputPin,
{
    pub fn new(
        left: P,
        right: P,
    ) -> Self {
        Self { left, right }
    }

    /// Write `switch` to the pin behind `id`.
    pub fn set_led(
        &mut self,
        id: LedId,
        switch: LedSwitch,
    ) -> Result<(), P::Error> {
        tracing::debug!(?id, ?switch, pin = id.pin(), "led write");
        let pin = match id {
            LedId::Left => &mut self.left,
            LedId::Right => &mut self.right,
        };
        match switch {
            LedSwitch::On => pin.set_high(),
            LedSwitch::Off => pin.set_low(),
        }
    }

    /// Same as `set_led`, addressed by raw pin number. Unknown pins are ignored.
    pub fn set_led_pin(
        &mut self,
        pin: u8,
        switch: LedSwitch,
    ) -> Result<(), P::Error> {
        match LedId::from_pin(pin) {
            Some(id) => self.set_led(id, switch),
            None => {
                tracing::trace!(pin, "no LED on pin");
                Ok(())
            }
        }
    }
}
