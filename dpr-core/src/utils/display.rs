//! Status display contract.
//!
//! The rover has no UI. A 5x5 matrix (or whatever the board provides) shows a
//! single character at a time as a terse developer log.

/// Single-character status indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// Remote link established.
    Connected,
    /// Remote link lost.
    Disconnected,
    /// Driving forward.
    Forward,
    /// Driving in reverse.
    Reverse,
    /// Pivoting left.
    Left,
    /// Pivoting right.
    Right,
    /// Motor frame acknowledged by the driver.
    Ok,
    /// Motor frame failed on the bus.
    Error,
}

impl Glyph {
    /// Character shown for this glyph. `Disconnected` and `Reverse` share 'D'.
    pub const fn as_char(self) -> char {
        match self {
            Glyph::Connected => 'C',
            Glyph::Disconnected | Glyph::Reverse => 'D',
            Glyph::Forward => 'F',
            Glyph::Left => 'L',
            Glyph::Right => 'R',
            Glyph::Ok => 'O',
            Glyph::Error => 'E',
        }
    }
}

/// Output side of the board display, supplied by the host runtime.
pub trait StatusDisplay {
    type Error: core::fmt::Debug;

    /// Replace whatever is shown with a single glyph.
    fn print(
        &mut self,
        glyph: Glyph,
    ) -> Result<(), Self::Error>;

    /// Scroll a short message across the display.
    fn scroll(
        &mut self,
        text: &str,
    ) -> Result<(), Self::Error>;
}
