//! Serial channel abstractions
//!
//! Provides the duplex byte-channel trait the driver core is written
//! against, plus the line settings the panel expects. Implementations
//! handle the actual device (a host tty, an embedded UART, or a test
//! double).

/// Duplex byte channel to the panel
///
/// The driver assumes a single owner: one `SerialPort` value is the only
/// reader and the only writer on the underlying descriptor.
pub trait SerialPort {
    /// Error type for channel operations
    type Error: core::fmt::Debug;

    /// Write data to the channel
    ///
    /// A single write attempt; returns the number of bytes actually
    /// accepted, which may be less than `data.len()`. The driver treats a
    /// short write as a failed transmission and does not retry.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Read whatever bytes are pending, without blocking
    ///
    /// Returns the number of bytes placed into `buf`; `0` means no data
    /// was available.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Drain the transmit path
    ///
    /// When this returns, previously written bytes are physically queued
    /// on the wire (not necessarily received by the panel).
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Serial line settings
///
/// The panel speaks 8N1 raw with no software flow control at an
/// enumerated set of baud rates; that is the default here.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
    /// Software flow control
    pub flow_control: FlowControl,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baudrate: 115_200,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            flow_control: FlowControl::None,
        }
    }
}

/// Number of data bits per character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

/// Flow control mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlowControl {
    None,
    Software,
}
