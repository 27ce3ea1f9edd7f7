#![cfg_attr(not(test), no_std)]

//! First-boot setup wizard for a Nunchuk-driven mecanum base: display
//! check, stick calibration, LED and per-wheel stepper exercises.

// Lets the test doubles name this crate the same way from unit tests and
// from the scenario tests under `tests/`.
#[cfg(test)]
extern crate self as mecanum_setup;

pub mod config;
pub mod drivers;
pub mod input;
pub mod led;
pub mod motor;
pub mod platform;
pub mod runtime;
pub mod setup;
pub mod storage;
pub mod ui;

#[cfg(test)]
#[path = "../tests/common/doubles.rs"]
mod testing;
