//! Connection indicator.

use crate::utils::display::Glyph;

/// Link state carried by a BLE notification. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    Connected,
    Disconnected,
}

impl LinkStatus {
    pub const fn glyph(self) -> Glyph {
        match self {
            LinkStatus::Connected => Glyph::Connected,
            LinkStatus::Disconnected => Glyph::Disconnected,
        }
    }
}
