//! Message bus events delivered by the host radio stack.
//!
//! Every event is a `(source, value)` pair. The rover listens to the D-pad
//! controller source for any value and to two notifications on the BLE
//! source. Events arrive through `EVENT_CHANNEL` and are resolved to a
//! `Listener` before dispatch.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use serde::Deserialize;

/// Channel standing in for the host message bus (`BusEvent` messages).
pub static EVENT_CHANNEL: embassy_sync::channel::Channel<CriticalSectionRawMutex, BusEvent, 16> =
    embassy_sync::channel::Channel::new();

/// Source id of the remote D-pad controller.
pub const DPAD_CONTROLLER_ID: u16 = 1104;
/// Source id of the BLE stack.
pub const BLE_ID: u16 = 1000;
/// BLE event value sent when a central connects.
pub const BLE_EVT_CONNECTED: u16 = 1;
/// BLE event value sent when the central disconnects.
pub const BLE_EVT_DISCONNECTED: u16 = 2;

/// Raw event as dequeued from the message bus.
///
/// Decoded from JSON `{"source": 1104, "value": 1}`.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct BusEvent {
    pub source: u16,
    pub value: u16,
}

impl BusEvent {
    pub const fn new(
        source: u16,
        value: u16,
    ) -> Self {
        Self { source, value }
    }

    /// Event on the D-pad controller source.
    pub const fn dpad(code: ControllerEvent) -> Self {
        Self::new(DPAD_CONTROLLER_ID, code as u16)
    }

    /// Decode a single JSON event frame.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// D-pad button transitions reported by the remote controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ControllerEvent {
    Dpad1UpOn = 1,
    Dpad1UpOff = 2,
    Dpad1DownOn = 3,
    Dpad1DownOff = 4,
    Dpad1LeftOn = 5,
    Dpad1LeftOff = 6,
    Dpad1RightOn = 7,
    Dpad1RightOff = 8,
    Dpad2UpOn = 9,
    Dpad2UpOff = 10,
    Dpad2DownOn = 11,
    Dpad2DownOff = 12,
    Dpad2LeftOn = 13,
    Dpad2LeftOff = 14,
    Dpad2RightOn = 15,
    Dpad2RightOff = 16,
}

impl ControllerEvent {
    pub const ALL: [ControllerEvent; 16] = [
        ControllerEvent::Dpad1UpOn,
        ControllerEvent::Dpad1UpOff,
        ControllerEvent::Dpad1DownOn,
        ControllerEvent::Dpad1DownOff,
        ControllerEvent::Dpad1LeftOn,
        ControllerEvent::Dpad1LeftOff,
        ControllerEvent::Dpad1RightOn,
        ControllerEvent::Dpad1RightOff,
        ControllerEvent::Dpad2UpOn,
        ControllerEvent::Dpad2UpOff,
        ControllerEvent::Dpad2DownOn,
        ControllerEvent::Dpad2DownOff,
        ControllerEvent::Dpad2LeftOn,
        ControllerEvent::Dpad2LeftOff,
        ControllerEvent::Dpad2RightOn,
        ControllerEvent::Dpad2RightOff,
    ];
}

impl TryFrom<u16> for ControllerEvent {
    type Error = u16;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1..=16 => Ok(Self::ALL[value as usize - 1]),
            other => Err(other),
        }
    }
}

/// The three handlers registered on the message bus at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listener {
    /// Any value on the D-pad controller source.
    Controller(u16),
    Connected,
    Disconnected,
}

impl Listener {
    /// Resolve which listener, if any, receives `event`.
    pub fn route(event: BusEvent) -> Option<Self> {
        match (event.source, event.value) {
            (DPAD_CONTROLLER_ID, value) => Some(Listener::Controller(value)),
            (BLE_ID, BLE_EVT_CONNECTED) => Some(Listener::Connected),
            (BLE_ID, BLE_EVT_DISCONNECTED) => Some(Listener::Disconnected),
            _ => None,
        }
    }
}
