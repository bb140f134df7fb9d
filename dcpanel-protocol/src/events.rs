//! Unsolicited reports sent by the panel
//!
//! The panel pushes touch and control activity over the same serial line
//! used for request/response traffic, in ordinary frame format. These are
//! distinguished from command responses purely by their command byte and
//! payload shape.

use crate::commands::{cfg, cmd};

/// An unsolicited device-originated report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelEvent {
    /// Finger pressed at pixel coordinates
    TouchDown { x: u16, y: u16 },
    /// Finger released at pixel coordinates
    TouchUp { x: u16, y: u16 },
    /// A control reported user activity (button press, slider drag, ...)
    ControlNotify {
        screen: u16,
        control: u16,
        control_type: u8,
    },
}

impl PanelEvent {
    /// Parse an event from an extracted frame's command byte and data.
    ///
    /// Returns `None` for frames that do not look like an unsolicited
    /// report; those are command responses and belong to whoever is
    /// awaiting one.
    pub fn from_response(command: u8, data: &[u8]) -> Option<Self> {
        match command {
            cmd::TOUCH_DOWN if data.len() >= 4 => Some(PanelEvent::TouchDown {
                x: u16::from_be_bytes([data[0], data[1]]),
                y: u16::from_be_bytes([data[2], data[3]]),
            }),
            cmd::TOUCH_UP if data.len() >= 4 => Some(PanelEvent::TouchUp {
                x: u16::from_be_bytes([data[0], data[1]]),
                y: u16::from_be_bytes([data[2], data[3]]),
            }),
            cmd::CONFIG if data.len() >= 6 && data[0] == cfg::READ_CONTROL => {
                Some(PanelEvent::ControlNotify {
                    screen: u16::from_be_bytes([data[1], data[2]]),
                    control: u16::from_be_bytes([data[3], data[4]]),
                    control_type: data[5],
                })
            }
            _ => None,
        }
    }

    /// Returns true for touch press/release events
    pub fn is_touch(&self) -> bool {
        matches!(
            self,
            PanelEvent::TouchDown { .. } | PanelEvent::TouchUp { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::try_extract_response;

    #[test]
    fn test_touch_down() {
        let raw = [0xEE, 0x01, 0x00, 0x64, 0x00, 0xC8, 0xFF, 0xFC, 0xFF, 0xFF];
        let response = try_extract_response(&raw).unwrap();
        let event = PanelEvent::from_response(response.command, response.data).unwrap();
        assert_eq!(event, PanelEvent::TouchDown { x: 100, y: 200 });
        assert!(event.is_touch());
    }

    #[test]
    fn test_touch_up() {
        let event = PanelEvent::from_response(0x03, &[0x01, 0x2C, 0x00, 0x0A]).unwrap();
        assert_eq!(event, PanelEvent::TouchUp { x: 300, y: 10 });
    }

    #[test]
    fn test_control_notify() {
        let data = [0x11, 0x00, 0x02, 0x00, 0x05, 0x10, 0x01];
        let event = PanelEvent::from_response(0xB1, &data).unwrap();
        assert_eq!(
            event,
            PanelEvent::ControlNotify {
                screen: 2,
                control: 5,
                control_type: 0x10,
            }
        );
        assert!(!event.is_touch());
    }

    #[test]
    fn test_non_events() {
        // Handshake acknowledgement is a response, not an event
        assert!(PanelEvent::from_response(0x55, &[]).is_none());
        // Version response
        assert!(PanelEvent::from_response(0xFE, &[1, 2, 0, 3, 0, 5]).is_none());
        // Config frame with a non-notify sub-command
        assert!(PanelEvent::from_response(0xB1, &[0x01, 0x00, 0x02]).is_none());
        // Truncated touch payload
        assert!(PanelEvent::from_response(0x01, &[0x00, 0x64]).is_none());
    }
}
