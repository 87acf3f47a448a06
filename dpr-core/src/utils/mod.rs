//! Utility re-exports and helper macros for the D-pad Rover.
//!
//! This module re-exports the event plumbing, the hardware controllers and the
//! status display contract:
//!
//! - `connection`: bus events, listener routing and the connection indicator
//! - `controllers`: I2C motor driver, GPIO LEDs and the event dispatcher
//! - `display`: glyph-based status display used as a developer log
//!
//! The `mk_static!` macro simplifies static initialization in no-std contexts.

pub mod connection;
pub mod controllers;
pub mod display;

pub use connection::events::{BusEvent, Listener, EVENT_CHANNEL};
pub use controllers::SystemController;
pub use display::{Glyph, StatusDisplay};

#[macro_export]
/// Initialize a no-std static cell and write the given value into it.
///
/// This macro creates a `static_cell::StaticCell` for type `$t` and initializes
/// it with `$val`, returning a mutable reference to the stored value.
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        STATIC_CELL.uninit().write($val)
    }};
}
