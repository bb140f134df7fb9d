//! Wire protocol for DC-series serial HMI panels
//!
//! This crate defines the byte-oriented command protocol spoken by the
//! panel over its UART: a header-delimited, tail-terminated frame format
//! carrying one command byte and an opaque payload.
//!
//! # Frame Format
//!
//! ```text
//! ┌────────┬─────────┬─────────────┬─────────────────────┐
//! │ HEADER │ COMMAND │ PAYLOAD     │ TAIL                │
//! │ 0xEE   │ 1B      │ 0–1018B     │ 0xFF 0xFC 0xFF 0xFF │
//! └────────┴─────────┴─────────────┴─────────────────────┘
//! ```
//!
//! There is no length prefix and no response correlation id; the tail
//! sequence is the only delimiter and callers serialize one
//! request/response exchange at a time.

#![no_std]
#![deny(unsafe_code)]

pub mod commands;
pub mod events;
pub mod frame;

pub use commands::{cfg, cmd, BaudRate, Color, DataFormat, FontSize, TouchConfig};
pub use commands::{HANDSHAKE_ACK, RESET_KEY};
pub use events::PanelEvent;
pub use frame::{
    try_extract_response, Frame, FrameError, Response, FRAME_HEADER, FRAME_TAIL, MAX_FRAME_SIZE,
    MAX_PAYLOAD_SIZE, MIN_FRAME_SIZE,
};
