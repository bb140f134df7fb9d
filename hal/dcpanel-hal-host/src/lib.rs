//! Host (std) backend for the dcpanel driver
//!
//! Implements the [`dcpanel_hal`] channel and clock traits on top of a
//! desktop serial port, and provides a one-call [`connect`] that opens
//! the port, wraps it in a [`dcpanel_core::Panel`] and performs the
//! initial handshake.

#![deny(unsafe_code)]

mod clock;
mod serial;

pub use clock::SystemClock;
pub use serial::HostSerial;

use dcpanel_core::{Error, Panel};
use dcpanel_hal::SerialConfig;
use dcpanel_protocol::BaudRate;

/// Open a serial device and establish a panel session
///
/// The handshake is attempted once; a panel that does not answer is
/// logged and the session is returned anyway, since some firmware
/// revisions only respond after their boot screen finishes.
pub fn connect(path: &str, baudrate: BaudRate) -> Result<Panel<HostSerial, SystemClock>, serialport::Error> {
    let config = SerialConfig {
        baudrate: baudrate.bps(),
        ..SerialConfig::default()
    };
    let port = HostSerial::open(path, &config)?;
    let mut panel = Panel::new(port, SystemClock::new());

    match panel.handshake() {
        Ok(()) => tracing::debug!(path, "panel handshake ok"),
        Err(Error::Timeout) => {
            tracing::warn!(path, "panel did not answer handshake, continuing")
        }
        Err(e) => tracing::warn!(path, error = ?e, "panel handshake failed, continuing"),
    }
    Ok(panel)
}
