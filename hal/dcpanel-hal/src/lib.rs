//! dcpanel Hardware Abstraction Layer
//!
//! This crate defines the two seams the driver core depends on: a duplex
//! serial byte channel and a monotonic clock. Implementations live in
//! platform crates (dcpanel-hal-host for a desktop tty) or in test
//! doubles, so the same protocol and session code runs everywhere.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (dcpanel-demo, ...)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dcpanel-core (session + transport)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dcpanel-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ dcpanel-hal-  │       │ test doubles  │
//! │     host      │       │ (mock port)   │
//! └───────────────┘       └───────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod serial;

// Re-export key traits at crate root for convenience
pub use clock::Clock;
pub use serial::{DataBits, FlowControl, Parity, SerialConfig, SerialPort, StopBits};
