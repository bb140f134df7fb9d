//! Test doubles for the HAL seams
//!
//! A scripted serial port and a manually advanced clock, so the poll
//! loop's timing behavior is deterministic under test.

use core::convert::Infallible;
use core::time::Duration;

use dcpanel_hal::{Clock, SerialPort};
use heapless::{Deque, Vec};

/// Scripted serial channel
///
/// Each call to `read` delivers at most one scripted chunk; with no
/// chunks left it reports "no data pending". Writes are recorded.
pub struct MockPort {
    reads: Deque<Vec<u8, 64>, 32>,
    written: Vec<u8, 2048>,
    /// Number of successful flush calls
    pub flushes: usize,
    /// When set, `write` accepts at most this many bytes
    pub short_write: Option<usize>,
}

impl MockPort {
    pub fn new() -> Self {
        Self {
            reads: Deque::new(),
            written: Vec::new(),
            flushes: 0,
            short_write: None,
        }
    }

    /// Queue a chunk to be delivered by a future `read` call
    pub fn script_read(&mut self, data: &[u8]) {
        let mut chunk = Vec::new();
        chunk.extend_from_slice(data).unwrap();
        self.reads.push_back(chunk).unwrap();
    }

    /// Everything written so far
    pub fn written(&self) -> &[u8] {
        &self.written
    }

    /// Scripted chunks not yet consumed
    pub fn pending_reads(&self) -> usize {
        self.reads.len()
    }
}

impl SerialPort for MockPort {
    type Error = Infallible;

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        let accepted = match self.short_write {
            Some(limit) => data.len().min(limit),
            None => data.len(),
        };
        self.written.extend_from_slice(&data[..accepted]).unwrap();
        Ok(accepted)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        match self.reads.pop_front() {
            Some(chunk) => {
                // Chunks are sized to fit the driver's read window
                let n = chunk.len().min(buf.len());
                buf[..n].copy_from_slice(&chunk[..n]);
                Ok(n)
            }
            None => Ok(0),
        }
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }
}

/// Clock that only moves when slept on
pub struct MockClock {
    now: Duration,
}

impl MockClock {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }
}

impl Clock for MockClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.now += duration;
    }
}
