//! Desktop serial channel
//!
//! Wraps a [`serialport`] handle behind the driver's channel trait. The
//! port is opened with a near-zero read timeout so the driver's polling
//! loop stays in charge of pacing; a timed-out read is reported as "no
//! data" rather than an error.

use std::io::{Read, Write};
use std::time::Duration;

use dcpanel_hal::{DataBits, FlowControl, Parity, SerialConfig, StopBits};

/// Read timeout for the underlying handle
///
/// The driver polls, so this only bounds how long a single empty read
/// can block the loop.
const READ_TIMEOUT: Duration = Duration::from_millis(1);

/// Serial channel backed by a host tty / COM port
pub struct HostSerial {
    port: Box<dyn serialport::SerialPort>,
}

impl HostSerial {
    /// Open and configure a serial device
    ///
    /// Any stale bytes in the OS buffers (panel boot chatter, a previous
    /// session's leftovers) are discarded before use.
    pub fn open(path: &str, config: &SerialConfig) -> Result<Self, serialport::Error> {
        let port = serialport::new(path, config.baudrate)
            .data_bits(match config.data_bits {
                DataBits::Seven => serialport::DataBits::Seven,
                DataBits::Eight => serialport::DataBits::Eight,
            })
            .parity(match config.parity {
                Parity::None => serialport::Parity::None,
                Parity::Even => serialport::Parity::Even,
                Parity::Odd => serialport::Parity::Odd,
            })
            .stop_bits(match config.stop_bits {
                StopBits::One => serialport::StopBits::One,
                StopBits::Two => serialport::StopBits::Two,
            })
            .flow_control(match config.flow_control {
                FlowControl::None => serialport::FlowControl::None,
                FlowControl::Software => serialport::FlowControl::Software,
            })
            .timeout(READ_TIMEOUT)
            .open()?;
        port.clear(serialport::ClearBuffer::All)?;
        tracing::debug!(path, baudrate = config.baudrate, "serial port opened");
        Ok(Self { port })
    }
}

impl dcpanel_hal::SerialPort for HostSerial {
    type Error = std::io::Error;

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        self.port.write(data)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        match self.port.read(buf) {
            Ok(n) => Ok(n),
            Err(e)
                if e.kind() == std::io::ErrorKind::TimedOut
                    || e.kind() == std::io::ErrorKind::WouldBlock =>
            {
                Ok(0)
            }
            Err(e) => Err(e),
        }
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.port.flush()
    }
}
