//! Byte transport over the serial channel
//!
//! Owns the open channel and implements the two blocking primitives the
//! session layer is built on: write-with-drain and a deadline-bounded
//! poll loop that recovers response frames from the unframed byte stream.
//!
//! The transport is also the only reader on the descriptor. Unsolicited
//! panel reports (touch, control activity) arriving while a response is
//! awaited are diverted into an internal queue instead of being lost or
//! racing a second reader; [`Transport::poll_event`] drains that queue.

use core::time::Duration;

use dcpanel_hal::{Clock, SerialPort};
use dcpanel_protocol::{try_extract_response, Frame, PanelEvent, MAX_FRAME_SIZE};
use heapless::{Deque, Vec};

use crate::error::Error;

/// How many unsolicited events are buffered before the oldest is dropped
pub const EVENT_QUEUE_DEPTH: usize = 16;

/// Read chunk size per poll iteration
const READ_CHUNK: usize = 64;

/// Scheduling policy for the response wait loop
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollConfig {
    /// Sleep between read attempts
    pub poll_interval: Duration,
    /// Default deadline for request/response exchanges
    pub response_timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(1),
            response_timeout: Duration::from_millis(1000),
        }
    }
}

/// Blocking transport over a single owned serial channel
pub struct Transport<P: SerialPort, C: Clock> {
    port: Option<P>,
    clock: C,
    poll: PollConfig,
    rx: Vec<u8, MAX_FRAME_SIZE>,
    events: Deque<PanelEvent, EVENT_QUEUE_DEPTH>,
}

impl<P: SerialPort, C: Clock> Transport<P, C> {
    /// Create a transport over an already-opened channel
    pub fn new(port: P, clock: C) -> Self {
        Self::with_poll_config(port, clock, PollConfig::default())
    }

    /// Create a transport with an explicit scheduling policy
    pub fn with_poll_config(port: P, clock: C, poll: PollConfig) -> Self {
        Self {
            port: Some(port),
            clock,
            poll,
            rx: Vec::new(),
            events: Deque::new(),
        }
    }

    /// The active scheduling policy
    pub fn poll_config(&self) -> PollConfig {
        self.poll
    }

    /// Whether the channel is still open
    pub fn is_connected(&self) -> bool {
        self.port.is_some()
    }

    /// Close the channel and drop all buffered state
    ///
    /// Every subsequent operation fails with `NotConnected`.
    pub fn close(&mut self) {
        self.port = None;
        self.rx.clear();
        self.events.clear();
    }

    /// Write a complete frame to the channel
    ///
    /// A single write attempt; if the channel accepts fewer bytes than the
    /// frame length the whole operation fails with `ShortWrite` and nothing
    /// is retried. On success the channel is drained before returning, so
    /// the bytes are physically queued (not necessarily received).
    pub fn write_frame(&mut self, bytes: &[u8]) -> Result<(), Error<P::Error>> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;

        let written = port.write(bytes).map_err(Error::Link)?;
        if written != bytes.len() {
            return Err(Error::ShortWrite {
                expected: bytes.len(),
                written,
            });
        }

        port.flush().map_err(Error::Link)
    }

    /// Wait for a response frame, up to `timeout`
    ///
    /// Repeatedly performs a non-blocking read into the accumulation
    /// buffer, re-running frame extraction after every successful read and
    /// sleeping `poll_interval` between attempts. Touch-report frames are
    /// queued for [`Transport::poll_event`] and the wait continues; the
    /// first other frame is returned as an owned copy. Fails with
    /// `Timeout` once the elapsed monotonic time exceeds `timeout`, and
    /// with `BufferOverflow` if the buffer fills without a frame boundary.
    pub fn await_response(&mut self, timeout: Duration) -> Result<Frame, Error<P::Error>> {
        let start = self.clock.now();

        loop {
            let port = self.port.as_mut().ok_or(Error::NotConnected)?;
            let n = fill_rx(port, &mut self.rx)?;

            if n > 0 {
                if let Some(response) = try_extract_response(&self.rx) {
                    // Only touch reports are unambiguous here: a control
                    // notification has the same wire shape as a read-control
                    // response, and with a request in flight the frame
                    // belongs to the waiter.
                    let event = PanelEvent::from_response(response.command, response.data)
                        .filter(PanelEvent::is_touch);
                    match event {
                        Some(event) => {
                            if self.events.is_full() {
                                self.events.pop_front();
                            }
                            let _ = self.events.push_back(event);
                            self.rx.clear();
                        }
                        None => {
                            let frame = Frame::new(response.command, response.data)?;
                            self.rx.clear();
                            return Ok(frame);
                        }
                    }
                }
            }

            let elapsed = self.clock.now().saturating_sub(start);
            if elapsed >= timeout {
                return Err(Error::Timeout);
            }
            self.clock.sleep(self.poll.poll_interval);
        }
    }

    /// Fetch one unsolicited panel report, if any
    ///
    /// Drains events queued during an earlier response wait first, then
    /// makes a single non-blocking read attempt. Never sleeps. A frame
    /// that is neither an event nor awaited by anyone is discarded.
    pub fn poll_event(&mut self) -> Result<Option<PanelEvent>, Error<P::Error>> {
        if let Some(event) = self.events.pop_front() {
            return Ok(Some(event));
        }

        let port = self.port.as_mut().ok_or(Error::NotConnected)?;
        let n = fill_rx(port, &mut self.rx)?;
        if n == 0 && self.rx.is_empty() {
            return Ok(None);
        }

        if let Some(response) = try_extract_response(&self.rx) {
            let event = PanelEvent::from_response(response.command, response.data);
            self.rx.clear();
            return Ok(event);
        }

        Ok(None)
    }

    #[cfg(test)]
    pub(crate) fn port_ref(&self) -> &P {
        self.port.as_ref().expect("transport closed")
    }
}

/// Append whatever bytes are pending on the channel to the accumulation
/// buffer. Fails once the buffer is full; the stream offers no way to
/// resynchronize past a lost frame boundary.
fn fill_rx<P: SerialPort>(
    port: &mut P,
    rx: &mut Vec<u8, MAX_FRAME_SIZE>,
) -> Result<usize, Error<P::Error>> {
    if rx.is_full() {
        return Err(Error::BufferOverflow);
    }

    let mut chunk = [0u8; READ_CHUNK];
    let room = (rx.capacity() - rx.len()).min(READ_CHUNK);
    let n = port.read(&mut chunk[..room]).map_err(Error::Link)?;
    if n > 0 {
        rx.extend_from_slice(&chunk[..n])
            .map_err(|_| Error::BufferOverflow)?;
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{MockClock, MockPort};

    fn transport(port: MockPort) -> Transport<MockPort, MockClock> {
        Transport::new(port, MockClock::new())
    }

    #[test]
    fn test_write_frame_and_drain() {
        let port = MockPort::new();
        let mut t = transport(port);

        t.write_frame(&[0xEE, 0x04, 0xFF, 0xFC, 0xFF, 0xFF]).unwrap();
        assert_eq!(t.port.as_ref().unwrap().written(), &[0xEE, 0x04, 0xFF, 0xFC, 0xFF, 0xFF]);
        assert_eq!(t.port.as_ref().unwrap().flushes, 1);
    }

    #[test]
    fn test_short_write() {
        let mut port = MockPort::new();
        port.short_write = Some(2);
        let mut t = transport(port);

        let result = t.write_frame(&[0xEE, 0x04, 0xFF, 0xFC, 0xFF, 0xFF]);
        assert_eq!(
            result,
            Err(Error::ShortWrite {
                expected: 6,
                written: 2
            })
        );
        // No drain after a failed transmission
        assert_eq!(t.port.as_ref().unwrap().flushes, 0);
    }

    #[test]
    fn test_await_response_single_read() {
        let mut port = MockPort::new();
        port.script_read(&[0xEE, 0x55, 0xFF, 0xFC, 0xFF, 0xFF]);
        let mut t = transport(port);

        let frame = t.await_response(Duration::from_millis(1000)).unwrap();
        assert_eq!(frame.command, 0x55);
        assert!(frame.payload.is_empty());
    }

    #[test]
    fn test_await_response_split_across_reads() {
        let mut port = MockPort::new();
        port.script_read(&[0xEE, 0xFE, 0x01, 0x02]);
        port.script_read(&[0x00, 0x03, 0x00, 0x05, 0xFF, 0xFC, 0xFF, 0xFF]);
        let mut t = transport(port);

        let frame = t.await_response(Duration::from_millis(1000)).unwrap();
        assert_eq!(frame.command, 0xFE);
        assert_eq!(frame.payload, &[0x01, 0x02, 0x00, 0x03, 0x00, 0x05]);
    }

    #[test]
    fn test_await_response_leaves_later_bytes_unread() {
        let mut port = MockPort::new();
        port.script_read(&[0xEE, 0x55, 0xFF, 0xFC, 0xFF, 0xFF]);
        port.script_read(&[0xEE, 0x01, 0x00]); // next frame, still in the driver
        let mut t = transport(port);

        t.await_response(Duration::from_millis(1000)).unwrap();
        assert_eq!(t.port.as_ref().unwrap().pending_reads(), 1);
    }

    #[test]
    fn test_await_response_timeout() {
        let mut t = transport(MockPort::new());

        let result = t.await_response(Duration::from_millis(50));
        assert_eq!(result, Err(Error::Timeout));
        // The fake clock only advances inside sleep(), so the loop ran
        // ~50 poll intervals before giving up.
        assert!(t.clock.now() >= Duration::from_millis(50));
    }

    #[test]
    fn test_await_response_diverts_events() {
        let mut port = MockPort::new();
        // A touch report arrives before the actual response
        port.script_read(&[0xEE, 0x01, 0x00, 0x64, 0x00, 0xC8, 0xFF, 0xFC, 0xFF, 0xFF]);
        port.script_read(&[0xEE, 0x55, 0xFF, 0xFC, 0xFF, 0xFF]);
        let mut t = transport(port);

        let frame = t.await_response(Duration::from_millis(1000)).unwrap();
        assert_eq!(frame.command, 0x55);

        let event = t.poll_event().unwrap();
        assert_eq!(event, Some(PanelEvent::TouchDown { x: 100, y: 200 }));
        assert_eq!(t.poll_event().unwrap(), None);
    }

    #[test]
    fn test_buffer_overflow_on_garbage_stream() {
        let mut port = MockPort::new();
        // Junk with no header byte, more than the buffer can hold
        for _ in 0..20 {
            port.script_read(&[0x00; 64]);
        }
        let mut t = transport(port);

        let result = t.await_response(Duration::from_millis(1000));
        assert_eq!(result, Err(Error::BufferOverflow));
    }

    #[test]
    fn test_poll_event_direct_read() {
        let mut port = MockPort::new();
        port.script_read(&[0xEE, 0x03, 0x01, 0x2C, 0x00, 0x0A, 0xFF, 0xFC, 0xFF, 0xFF]);
        let mut t = transport(port);

        let event = t.poll_event().unwrap();
        assert_eq!(event, Some(PanelEvent::TouchUp { x: 300, y: 10 }));
    }

    #[test]
    fn test_closed_transport_rejects_everything() {
        let mut t = transport(MockPort::new());
        t.close();

        assert!(!t.is_connected());
        assert_eq!(
            t.write_frame(&[0xEE, 0x04, 0xFF, 0xFC, 0xFF, 0xFF]),
            Err(Error::NotConnected)
        );
        assert_eq!(
            t.await_response(Duration::from_millis(10)),
            Err(Error::NotConnected)
        );
        assert_eq!(t.poll_event(), Err(Error::NotConnected));
    }
}
