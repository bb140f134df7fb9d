//! Property tests for the frame codec

use dcpanel_protocol::{try_extract_response, Frame, FRAME_HEADER, FRAME_TAIL, MAX_PAYLOAD_SIZE};
use proptest::prelude::*;

proptest! {
    /// Any encodable (command, payload) pair survives encode + extract.
    #[test]
    fn extract_recovers_encoded_frame(
        command in any::<u8>(),
        payload in proptest::collection::vec(any::<u8>(), 0..MAX_PAYLOAD_SIZE),
    ) {
        let frame = Frame::new(command, &payload).unwrap();
        let encoded = frame.encode_to_vec().unwrap();

        prop_assert_eq!(encoded[0], FRAME_HEADER);
        prop_assert_eq!(&encoded[encoded.len() - 4..], &FRAME_TAIL[..]);

        let response = try_extract_response(&encoded).unwrap();
        prop_assert_eq!(response.command, command);
        prop_assert_eq!(response.data, &payload[..]);
    }

    /// Encoding into an undersized buffer fails and writes nothing.
    #[test]
    fn undersized_buffer_never_partially_written(
        payload in proptest::collection::vec(any::<u8>(), 1..64),
        shortfall in 1usize..6,
    ) {
        let frame = Frame::new(0x20, &payload).unwrap();
        let needed = frame.encoded_len();
        let mut buffer = vec![0x5Au8; needed - shortfall];

        prop_assert!(frame.encode(&mut buffer).is_err());
        prop_assert!(buffer.iter().all(|&b| b == 0x5A));
    }
}
