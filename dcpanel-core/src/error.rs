//! Driver error type

use core::fmt;

use dcpanel_protocol::FrameError;

/// Errors returned by transport and session operations
///
/// Generic over the link error type of the underlying serial channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Operation attempted on a closed or never-opened channel
    NotConnected,
    /// The channel accepted fewer bytes than the frame length
    ShortWrite { expected: usize, written: usize },
    /// Frame does not fit the destination buffer
    BufferTooSmall,
    /// Accumulation buffer filled without a recognizable frame
    BufferOverflow,
    /// No valid response frame within the deadline
    Timeout,
    /// A frame arrived but its fields fail the caller's shape check
    MalformedResponse,
    /// Error reported by the serial channel itself
    Link(E),
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotConnected => write!(f, "channel is not connected"),
            Error::ShortWrite { expected, written } => {
                write!(f, "short write: {written} of {expected} bytes accepted")
            }
            Error::BufferTooSmall => write!(f, "frame does not fit the destination buffer"),
            Error::BufferOverflow => {
                write!(f, "receive buffer filled without a recognizable frame")
            }
            Error::Timeout => write!(f, "no response within the deadline"),
            Error::MalformedResponse => write!(f, "response frame has an unexpected shape"),
            Error::Link(e) => write!(f, "serial channel error: {e:?}"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}

impl<E> From<FrameError> for Error<E> {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::PayloadTooLarge | FrameError::BufferTooSmall => Error::BufferTooSmall,
        }
    }
}
