//! Module Exports
//!
//! This file exports the modules that handle traffic from the remote
//! controller link.
//!
//! # Modules
//! - `events`: bus event types, the event channel and listener routing.
//! - `status`: connect/disconnect indication.

/// Module for bus events and listener routing.
pub mod events;
pub mod status;

pub use status::LinkStatus;
