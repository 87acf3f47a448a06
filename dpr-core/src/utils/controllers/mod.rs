//! Module Exports
//!
//! This file exports the hardware controllers and the `SystemController`
//! that ties them to incoming bus events.
//!
//! - `i2c`: motor driver frames over the shared I2C bus.
//! - `leds`: left and right indicator LEDs on GPIO.

/// Module for the I2C motor driver.
pub mod i2c;
pub mod leds;

use core::cell::RefCell;

use embedded_hal::digital::OutputPin;

pub use i2c::{CommandStatus, Direction, MotorDriver, MotorFrame, MotorSelector, MOTOR_ADDRESS};
pub use leds::{LedController, LedId, LedSwitch};

use crate::utils::{
    connection::{
        events::{BusEvent, ControllerEvent, Listener, EVENT_CHANNEL},
        LinkStatus,
    },
    display::{Glyph, StatusDisplay},
};

/// Speed used for every motor run unless configured otherwise.
pub const DEFAULT_DRIVE_SPEED: u8 = 50;

/// Greeting scrolled once at boot.
pub const BOOT_BANNER: &str = "Hello World!";

/// Handle owning every collaborator an event handler may touch.
pub struct SystemController<'a, I2C: 'static, D, P> {
    motors: MotorDriver<'a, I2C>,
    leds: LedController<P>,
    display: D,
    drive_speed: u8,
}

impl<'a, I2C, D, P> SystemController<'a, I2C, D, P>
where
    I2C: embedded_hal::i2c::I2c + 'static,
    D: StatusDisplay,
    P: OutputPin,
{
    pub fn new(
        i2c_bus: &'a RefCell<I2C>,
        display: D,
        left_led: P,
        right_led: P,
        drive_speed: Option<u8>,
    ) -> Self {
        SystemController {
            motors: MotorDriver::new(i2c_bus),
            leds: LedController::new(left_led, right_led),
            display,
            drive_speed: drive_speed.unwrap_or(DEFAULT_DRIVE_SPEED),
        }
    }

    pub fn drive_speed(&self) -> u8 {
        self.drive_speed
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Show the boot banner. Call once before `event_ch`.
    pub fn boot(&mut self) {
        tracing::info!(drive_speed = self.drive_speed, "D-pad rover booting");
        if let Err(e) = self.display.scroll(BOOT_BANNER) {
            tracing::warn!(?e, "boot banner not shown");
        }
    }

    /// Serve `EVENT_CHANNEL` forever, one event at a time in dequeue order.
    pub async fn event_ch(&mut self) -> ! {
        let receiver = EVENT_CHANNEL.receiver();
        loop {
            let event = receiver.receive().await;
            self.handle(event);
        }
    }

    /// Route a bus event to its listener and run it to completion.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn handle(
        &mut self,
        event: BusEvent,
    ) {
        match Listener::route(event) {
            Some(Listener::Controller(value)) => self.on_controller_event(value),
            Some(Listener::Connected) => self.on_link(LinkStatus::Connected),
            Some(Listener::Disconnected) => self.on_link(LinkStatus::Disconnected),
            None => tracing::trace!("no listener"),
        }
    }

    /// Translate one D-pad transition into motor and LED commands.
    pub fn on_controller_event(
        &mut self,
        value: u16,
    ) {
        use ControllerEvent::*;
        use Direction::{Ccw, Cw};
        use MotorSelector::{M1, M2};

        let event = match ControllerEvent::try_from(value) {
            Ok(event) => event,
            Err(code) => {
                tracing::trace!(code, "unknown controller code");
                return;
            }
        };
        let speed = self.drive_speed;

        match event {
            Dpad1UpOn => {
                self.print(Glyph::Forward);
                self.run_motor(M1, Cw, speed);
                self.run_motor(M2, Cw, speed);
            }
            Dpad1DownOn => {
                self.print(Glyph::Reverse);
                self.run_motor(M1, Ccw, speed);
                self.run_motor(M2, Ccw, speed);
            }
            // Turns pivot on one wheel.
            Dpad1LeftOn => {
                self.print(Glyph::Left);
                self.set_led(LedId::Left, LedSwitch::On);
                self.run_motor(M2, Cw, speed);
            }
            Dpad1RightOn => {
                self.print(Glyph::Right);
                self.set_led(LedId::Right, LedSwitch::On);
                self.run_motor(M1, Cw, speed);
            }
            Dpad1UpOff | Dpad1DownOff | Dpad1LeftOff | Dpad1RightOff => self.stop_all_motors(),
            Dpad2LeftOn => self.set_led(LedId::Left, LedSwitch::Off),
            Dpad2RightOn => self.set_led(LedId::Right, LedSwitch::Off),
            Dpad2UpOn | Dpad2UpOff | Dpad2DownOn | Dpad2DownOff | Dpad2LeftOff | Dpad2RightOff => {
                tracing::trace!(?event, "unhandled controller event");
            }
        }
    }

    pub fn on_connected(&mut self) {
        self.on_link(LinkStatus::Connected);
    }

    pub fn on_disconnected(&mut self) {
        self.on_link(LinkStatus::Disconnected);
    }

    fn on_link(
        &mut self,
        status: LinkStatus,
    ) {
        tracing::info!(?status, "remote link changed");
        self.print(status.glyph());
    }

    /// Run one motor and show 'O' or 'E' for the outcome.
    pub fn run_motor(
        &mut self,
        motor: MotorSelector,
        direction: Direction,
        speed: u8,
    ) -> CommandStatus {
        let status = self.motors.run_motor(motor, direction, speed);
        match status {
            CommandStatus::Ok => self.print(Glyph::Ok),
            CommandStatus::TransportError => self.print(Glyph::Error),
            CommandStatus::Unreported => {}
        }
        status
    }

    pub fn stop_all_motors(&mut self) {
        self.motors.stop_all();
    }

    pub fn set_led(
        &mut self,
        id: LedId,
        switch: LedSwitch,
    ) {
        if let Err(e) = self.leds.set_led(id, switch) {
            tracing::error!(?id, ?e, "LED write failed");
        }
    }

    /// Raw-pin variant of `set_led`; pins without an LED are ignored.
    pub fn set_led_pin(
        &mut self,
        pin: u8,
        switch: LedSwitch,
    ) {
        if let Err(e) = self.leds.set_led_pin(pin, switch) {
            tracing::error!(pin, ?e, "LED write failed");
        }
    }

    fn print(
        &mut self,
        glyph: Glyph,
    ) {
        if let Err(e) = self.display.print(glyph) {
            tracing::warn!(?glyph, ?e, "display print failed");
        }
    }
}
