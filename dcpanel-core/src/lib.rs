//! Driver core for serial-attached HMI panels
//!
//! This crate carries all driver logic that does not depend on a
//! specific serial backend:
//!
//! - Transport loop (frame transmit, response polling, event queue)
//! - Panel session (lifecycle, device-global commands, local mirrors)
//! - Control catalogue (text, buttons, value widgets, icons, drawing)
//! - Driver error type
//!
//! Bring your own channel: anything implementing the
//! [`dcpanel_hal::SerialPort`] and [`dcpanel_hal::Clock`] traits works,
//! from a host serial port to a bare-metal UART.

#![no_std]
#![deny(unsafe_code)]

mod controls;
pub mod error;
pub mod session;
pub mod transport;

#[cfg(test)]
mod testutil;

pub use error::Error;
pub use session::{FirmwareVersion, Panel};
pub use transport::{PollConfig, Transport};
