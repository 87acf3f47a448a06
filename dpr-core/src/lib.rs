//! Core event dispatch and drivers for the D-pad Rover on no-std embedded platforms.
//!
//! For a host-side runnable build, see the `dpr-app/mock-mcu` crate.
#![no_std]

pub mod utils;
