//! Shared fakes for the integration tests.
#![allow(dead_code)]

use core::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use dpr_core::utils::controllers::SystemController;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::i2c::{self, ErrorKind, I2c, Operation};
use dpr_core::utils::display::{Glyph, StatusDisplay};
use embedded_hal_mock::eh1::digital::{Mock as PinMock, Transaction as PinTrans};
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};

/// I2C address of the motor driver.
pub const MOTOR_ADDRESS: u8 = 0x10;

/// Create a write transaction for the motor driver.
pub fn frame(bytes: [u8; 3]) -> I2cTrans {
    I2cTrans::write(MOTOR_ADDRESS, bytes.to_vec())
}

/// Display fake that records every glyph and scroll.
#[derive(Default)]
pub struct RecordingDisplay {
    pub glyphs: Vec<char>,
    pub scrolled: Vec<String>,
}

impl StatusDisplay for RecordingDisplay {
    type Error = core::convert::Infallible;

    fn print(
        &mut self,
        glyph: Glyph,
    ) -> Result<(), Self::Error> {
        self.glyphs.push(glyph.as_char());
        Ok(())
    }

    fn scroll(
        &mut self,
        text: &str,
    ) -> Result<(), Self::Error> {
        self.scrolled.push(text.to_owned());
        Ok(())
    }
}

/// Bus, pins and display wired into a controller, with handles kept for verification.
pub struct Rig {
    pub bus: RefCell<I2cMock>,
    pub left: PinMock,
    pub right: PinMock,
}

impl Rig {
    pub fn new(
        frames: &[I2cTrans],
        left: &[PinTrans],
        right: &[PinTrans],
    ) -> Self {
        Rig {
            bus: RefCell::new(I2cMock::new(frames)),
            left: PinMock::new(left),
            right: PinMock::new(right),
        }
    }

    pub fn controller(&self) -> SystemController<'_, I2cMock, RecordingDisplay, PinMock> {
        SystemController::new(
            &self.bus,
            RecordingDisplay::default(),
            self.left.clone(),
            self.right.clone(),
            None,
        )
    }

    pub fn done(mut self) {
        self.bus.borrow_mut().done();
        self.left.done();
        self.right.done();
    }
}


/// One observable side effect, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Glyph(char),
    Write(u8, Vec<u8>),
    Pin(u8, bool),
}

/// Shared, ordered record of every side effect across bus, pins and display.
pub type StepLog = Rc<RefCell<Vec<Step>>>;

/// I2C bus that appends each write to the step log.
pub struct LoggedBus {
    pub log: StepLog,
}

impl i2c::ErrorType for LoggedBus {
    type Error = ErrorKind;
}

impl I2c for LoggedBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for op in operations.iter() {
            if let Operation::Write(bytes) = op {
                self.log
                    .borrow_mut()
                    .push(Step::Write(address, bytes.to_vec()));
            }
        }
        Ok(())
    }
}

/// Output pin that appends each level change to the step log.
pub struct LoggedPin {
    pub pin: u8,
    pub log: StepLog,
}

impl digital::ErrorType for LoggedPin {
    type Error = Infallible;
}

impl OutputPin for LoggedPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Step::Pin(self.pin, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Step::Pin(self.pin, true));
        Ok(())
    }
}

/// Display that appends each glyph to the step log.
pub struct LoggedDisplay {
    pub log: StepLog,
}

impl StatusDisplay for LoggedDisplay {
    type Error = Infallible;

    fn print(
        &mut self,
        glyph: Glyph,
    ) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Step::Glyph(glyph.as_char()));
        Ok(())
    }

    fn scroll(
        &mut self,
        _text: &str,
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Frame write as it appears on the wire.
pub fn wire(bytes: [u8; 3]) -> Step {
    Step::Write(MOTOR_ADDRESS, bytes.to_vec())
}

/// Controller whose collaborators all record into one shared log.
pub fn logged_controller<'a>(
    bus: &'a RefCell<LoggedBus>,
    log: &StepLog,
) -> SystemController<'a, LoggedBus, LoggedDisplay, LoggedPin> {
    SystemController::new(
        bus,
        LoggedDisplay { log: log.clone() },
        LoggedPin {
            pin: 8,
            log: log.clone(),
        },
        LoggedPin {
            pin: 12,
            log: log.clone(),
        },
        None,
    )
}
