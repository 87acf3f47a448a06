//! I2C motor driver for the D-pad Rover.
//!
//! The driver chip takes 3-byte frames `[channel, direction, speed]` at a
//! fixed address. Writes are best-effort: the outcome is classified into a
//! `CommandStatus` and never retried.

use core::cell::RefCell;

use embedded_hal::i2c::{ErrorKind, I2c};
use embedded_hal_bus::i2c::RefCellDevice;

/// 7-bit address of the motor driver (0x20 in the 8-bit form the micro:bit DAL takes).
pub const MOTOR_ADDRESS: u8 = 0x10;

/// Motor output on the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorSelector {
    M1,
    M2,
}

impl MotorSelector {
    /// Channel-select byte understood by the driver chip.
    pub const fn channel(self) -> u8 {
        match self {
            MotorSelector::M1 => 0x00,
            MotorSelector::M2 => 0x02,
        }
    }
}

/// Rotation direction bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Direction {
    Cw = 0x00,
    Ccw = 0x01,
}

/// One command for the motor driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotorFrame {
    pub channel: u8,
    pub direction: u8,
    pub speed: u8,
}

impl MotorFrame {
    pub const fn run(
        motor: MotorSelector,
        direction: Direction,
        speed: u8,
    ) -> Self {
        Self {
            channel: motor.channel(),
            direction: direction as u8,
            speed,
        }
    }

    /// Zero-speed frame for `motor`.
    pub const fn stop(motor: MotorSelector) -> Self {
        Self {
            channel: motor.channel(),
            direction: 0,
            speed: 0,
        }
    }

    pub const fn to_bytes(self) -> [u8; 3] {
        [self.channel, self.direction, self.speed]
    }
}

/// Outcome of a single motor command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// Frame written.
    Ok,
    /// The bus reported a transport failure (NACK, bus fault, arbitration, overrun).
    TransportError,
    /// The write failed for a reason that is not reported.
    Unreported,
}

impl CommandStatus {
    fn classify<E: embedded_hal::i2c::Error>(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => CommandStatus::Ok,
            Err(e) => match e.kind() {
                ErrorKind::Bus
                | ErrorKind::ArbitrationLoss
                | ErrorKind::NoAcknowledge(_)
                | ErrorKind::Overrun => CommandStatus::TransportError,
                _ => CommandStatus::Unreported,
            },
        }
    }
}

/// Motor driver sitting on the shared I2C bus.
pub struct MotorDriver<'a, I2C: 'static> {
    dev: RefCellDevice<'a, I2C>,
}

impl<'a, I2C> MotorDriver<'a, I2C>
where
    I2C: I2c + 'static,
{
    pub fn new(i2c_bus: &'a RefCell<I2C>) -> Self {
        MotorDriver {
            dev: RefCellDevice::new(i2c_bus),
        }
    }

    /// Write one frame to the driver.
    pub fn send_frame(
        &mut self,
        frame: MotorFrame,
    ) -> Result<(), I2C::Error> {
        tracing::debug!(?frame, "motor frame");
        self.dev.write(MOTOR_ADDRESS, &frame.to_bytes())
    }

    /// Run `motor` in `direction` at `speed` and report how the write went.
    pub fn run_motor(
        &mut self,
        motor: MotorSelector,
        direction: Direction,
        speed: u8,
    ) -> CommandStatus {
        let result = self.send_frame(MotorFrame::run(motor, direction, speed));
        if let Err(e) = &result {
            tracing::warn!(?motor, ?e, "motor run failed");
        }
        CommandStatus::classify(result)
    }

    /// Stop M1 then M2. Both frames are always sent.
    pub fn stop_all(&mut self) {
        for motor in [MotorSelector::M1, MotorSelector::M2] {
            if let Err(e) = self.send_frame(MotorFrame::stop(motor)) {
                tracing::debug!(?motor, ?e, "stop frame not acknowledged");
            }
        }
    }
}
