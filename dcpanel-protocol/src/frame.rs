//! Frame encoding and response extraction for the DC panel protocol.
//!
//! Frame format:
//! - HEADER (1 byte): 0xEE
//! - COMMAND (1 byte): command identifier
//! - PAYLOAD (0..1018 bytes): command-specific data, big-endian fields
//! - TAIL (4 bytes): 0xFF 0xFC 0xFF 0xFF
//!
//! There is no length field and no checksum; the tail byte sequence is the
//! only framing delimiter. A payload whose final bytes happen to equal the
//! tail will therefore terminate the frame early on the receive side. The
//! protocol does not escape payloads, so that collision is an inherent
//! limitation of the wire format, not something this codec detects or
//! corrects.

use heapless::Vec;

/// Frame header byte
pub const FRAME_HEADER: u8 = 0xEE;

/// Frame tail byte sequence
pub const FRAME_TAIL: [u8; 4] = [0xFF, 0xFC, 0xFF, 0xFF];

/// Smallest possible frame: header + command + tail
pub const MIN_FRAME_SIZE: usize = 6;

/// Maximum complete frame size, matching the device's receive window
pub const MAX_FRAME_SIZE: usize = 1024;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = MAX_FRAME_SIZE - MIN_FRAME_SIZE;

/// Errors that can occur during frame construction or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Destination buffer too small for encoding
    BufferTooSmall,
}

/// A command frame to be sent to the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Command identifier
    pub command: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Create a new frame with the given command and payload
    pub fn new(command: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let mut payload_vec = Vec::new();
        payload_vec
            .extend_from_slice(payload)
            .map_err(|_| FrameError::PayloadTooLarge)?;

        Ok(Self {
            command,
            payload: payload_vec,
        })
    }

    /// Create a frame with no payload
    pub fn empty(command: u8) -> Self {
        Self {
            command,
            payload: Vec::new(),
        }
    }

    /// Total encoded length of this frame in bytes
    pub fn encoded_len(&self) -> usize {
        MIN_FRAME_SIZE + self.payload.len()
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written. Fails with `BufferTooSmall`
    /// before touching the buffer; a partial frame is never written.
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = self.encoded_len();
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        buffer[0] = FRAME_HEADER;
        buffer[1] = self.command;
        buffer[2..2 + self.payload.len()].copy_from_slice(&self.payload);
        buffer[2 + self.payload.len()..frame_len].copy_from_slice(&FRAME_TAIL);

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| FrameError::BufferTooSmall)?;
        Ok(vec)
    }
}

/// A response frame recognized inside a receive buffer
///
/// Borrows the data bytes from the buffer it was extracted from; the
/// header, command echo and tail have been stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response<'a> {
    /// Echo of the command this frame answers (or event identifier)
    pub command: u8,
    /// Payload data between command byte and tail
    pub data: &'a [u8],
}

/// Try to recognize a complete response frame in an accumulation buffer.
///
/// A match requires at least [`MIN_FRAME_SIZE`] bytes, the first byte equal
/// to [`FRAME_HEADER`] and the last four bytes equal to [`FRAME_TAIL`].
/// The check is not incremental: callers re-invoke it on every grown buffer
/// state. It stays cheap because only both ends of the buffer are inspected,
/// and the buffer itself is bounded by the 1024-byte receive window.
pub fn try_extract_response(buffer: &[u8]) -> Option<Response<'_>> {
    if buffer.len() < MIN_FRAME_SIZE {
        return None;
    }
    if buffer[0] != FRAME_HEADER {
        return None;
    }
    if buffer[buffer.len() - 4..] != FRAME_TAIL {
        return None;
    }

    Some(Response {
        command: buffer[1],
        data: &buffer[2..buffer.len() - 4],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_empty_payload() {
        let frame = Frame::empty(0x04); // handshake
        let mut buffer = [0u8; 16];
        let len = frame.encode(&mut buffer).unwrap();

        assert_eq!(len, 6);
        assert_eq!(buffer[..6], [0xEE, 0x04, 0xFF, 0xFC, 0xFF, 0xFF]);
    }

    #[test]
    fn test_encode_with_payload() {
        let frame = Frame::new(0x60, &[0x80]).unwrap(); // backlight
        let mut buffer = [0u8; 16];
        let len = frame.encode(&mut buffer).unwrap();

        assert_eq!(len, 7);
        assert_eq!(buffer[..7], [0xEE, 0x60, 0x80, 0xFF, 0xFC, 0xFF, 0xFF]);
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let frame = Frame::new(0x20, &[1, 2, 3, 4]).unwrap();
        let mut buffer = [0xAAu8; 8]; // needs 10
        assert_eq!(frame.encode(&mut buffer), Err(FrameError::BufferTooSmall));
        // Nothing was written
        assert_eq!(buffer, [0xAA; 8]);
    }

    #[test]
    fn test_payload_too_large() {
        let large = [0u8; MAX_PAYLOAD_SIZE + 1];
        assert_eq!(Frame::new(0x20, &large), Err(FrameError::PayloadTooLarge));
    }

    #[test]
    fn test_extract_roundtrip() {
        let frame = Frame::new(0xFE, &[1, 2, 0, 3, 0, 5]).unwrap();
        let encoded = frame.encode_to_vec().unwrap();

        let response = try_extract_response(&encoded).unwrap();
        assert_eq!(response.command, 0xFE);
        assert_eq!(response.data, &[1, 2, 0, 3, 0, 5]);
    }

    #[test]
    fn test_extract_too_short() {
        assert!(try_extract_response(&[0xEE, 0x55, 0xFF, 0xFC, 0xFF]).is_none());
    }

    #[test]
    fn test_extract_wrong_header() {
        assert!(try_extract_response(&[0x00, 0x55, 0xFF, 0xFC, 0xFF, 0xFF]).is_none());
    }

    #[test]
    fn test_extract_wrong_tail() {
        assert!(try_extract_response(&[0xEE, 0x55, 0xFF, 0xFC, 0xFF, 0xFE]).is_none());
        assert!(try_extract_response(&[0xEE, 0x55, 0x01, 0x02, 0x03, 0x04]).is_none());
    }

    #[test]
    fn test_extract_incomplete_grows_to_match() {
        let frame = Frame::new(0xB1, &[0x01, 0x00, 0x07]).unwrap();
        let encoded = frame.encode_to_vec().unwrap();

        // Every proper prefix fails, the full buffer matches
        for n in 1..encoded.len() {
            assert!(try_extract_response(&encoded[..n]).is_none());
        }
        assert!(try_extract_response(&encoded).is_some());
    }

    #[test]
    fn test_tail_collision_terminates_early() {
        // A payload ending in the tail sequence is indistinguishable from
        // a frame boundary; the extractor reports the shorter frame.
        let mut buffer = heapless::Vec::<u8, 32>::new();
        buffer
            .extend_from_slice(&[0xEE, 0x20, 0x01, 0xFF, 0xFC, 0xFF, 0xFF])
            .unwrap();
        let response = try_extract_response(&buffer).unwrap();
        assert_eq!(response.command, 0x20);
        assert_eq!(response.data, &[0x01]);
    }
}
