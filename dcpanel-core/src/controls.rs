//! Per-control commands and basic drawing
//!
//! Everything here is a thin caller of the session's frame primitives:
//! control operations ride the shared config command (0xB1) with a
//! sub-command byte, drawing operations are plain commands. Controls are
//! addressed by `(screen_id, control_id)`, both big-endian on the wire.
//!
//! Read-backs interpret the response payload at fixed offsets; the panel
//! echoes the control address before the value. Progress bars, sliders
//! and meters all share the 32-bit value wire shape, so one pair of
//! update/read methods covers the three of them.

use dcpanel_hal::{Clock, SerialPort};
use dcpanel_protocol::{cfg, cmd, Color, DataFormat, FontSize, Frame, MAX_PAYLOAD_SIZE};
use heapless::Vec;

use crate::error::Error;
use crate::session::Panel;

/// Offset of a read-back value inside a read-control response payload:
/// sub-command echo (1) + screen id (2) + control id (2)
const VALUE_OFFSET: usize = 5;

fn addr(screen_id: u16, control_id: u16) -> [u8; 4] {
    let s = screen_id.to_be_bytes();
    let c = control_id.to_be_bytes();
    [s[0], s[1], c[0], c[1]]
}

impl<P: SerialPort, C: Clock> Panel<P, C> {
    /// Send a config-prefixed command (sub-command + arguments)
    pub fn config_request(&mut self, sub: u8, args: &[u8]) -> Result<(), Error<P::Error>> {
        let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
        payload.push(sub).map_err(|_| Error::BufferTooSmall)?;
        payload
            .extend_from_slice(args)
            .map_err(|_| Error::BufferTooSmall)?;
        self.send_request(cmd::CONFIG, &payload)
    }

    /// Send a config-prefixed command and wait for its response
    pub fn config_query(&mut self, sub: u8, args: &[u8]) -> Result<Frame, Error<P::Error>> {
        let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
        payload.push(sub).map_err(|_| Error::BufferTooSmall)?;
        payload
            .extend_from_slice(args)
            .map_err(|_| Error::BufferTooSmall)?;
        let timeout = self.response_timeout();
        self.send_and_await(cmd::CONFIG, &payload, timeout)
    }

    // ------------------------------------------------------------------
    // Text controls
    // ------------------------------------------------------------------

    /// Replace a text control's content
    pub fn update_text(
        &mut self,
        screen_id: u16,
        control_id: u16,
        text: &str,
    ) -> Result<(), Error<P::Error>> {
        let mut args = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
        args.extend_from_slice(&addr(screen_id, control_id))
            .map_err(|_| Error::BufferTooSmall)?;
        args.extend_from_slice(text.as_bytes())
            .map_err(|_| Error::BufferTooSmall)?;
        self.config_request(cfg::UPDATE_CONTROL, &args)
    }

    /// Clear a text control (update with empty content)
    pub fn clear_text(&mut self, screen_id: u16, control_id: u16) -> Result<(), Error<P::Error>> {
        self.config_request(cfg::UPDATE_CONTROL, &addr(screen_id, control_id))
    }

    /// Read a text control's content into `out`
    ///
    /// Returns the number of bytes copied; content longer than `out` is
    /// truncated.
    pub fn read_text(
        &mut self,
        screen_id: u16,
        control_id: u16,
        out: &mut [u8],
    ) -> Result<usize, Error<P::Error>> {
        let response = self.config_query(cfg::READ_CONTROL, &addr(screen_id, control_id))?;
        let data = &response.payload;
        if data.len() <= VALUE_OFFSET {
            return Err(Error::MalformedResponse);
        }
        let text = &data[VALUE_OFFSET..];
        let n = text.len().min(out.len());
        out[..n].copy_from_slice(&text[..n]);
        Ok(n)
    }

    /// Blink a text control with the given period (10 ms units, 0 stops)
    pub fn set_text_blink(
        &mut self,
        screen_id: u16,
        control_id: u16,
        cycle_10ms: u16,
    ) -> Result<(), Error<P::Error>> {
        let a = addr(screen_id, control_id);
        let cy = cycle_10ms.to_be_bytes();
        self.config_request(cfg::SET_BLINK, &[a[0], a[1], a[2], a[3], cy[0], cy[1]])
    }

    /// Scroll a text control at the given speed
    pub fn set_text_scroll(
        &mut self,
        screen_id: u16,
        control_id: u16,
        speed: u16,
    ) -> Result<(), Error<P::Error>> {
        let a = addr(screen_id, control_id);
        let sp = speed.to_be_bytes();
        self.config_request(cfg::SET_SCROLL, &[a[0], a[1], a[2], a[3], sp[0], sp[1]])
    }

    /// Recolor one control (two frames: background, then foreground)
    pub fn set_text_color(
        &mut self,
        screen_id: u16,
        control_id: u16,
        fg: Color,
        bg: Color,
    ) -> Result<(), Error<P::Error>> {
        let a = addr(screen_id, control_id);
        let bg_bytes = bg.to_be_bytes();
        self.config_request(
            cfg::SET_BK_COLOR,
            &[a[0], a[1], a[2], a[3], bg_bytes[0], bg_bytes[1]],
        )?;
        let fg_bytes = fg.to_be_bytes();
        self.config_request(
            cfg::SET_FG_COLOR,
            &[a[0], a[1], a[2], a[3], fg_bytes[0], fg_bytes[1]],
        )
    }

    /// Have the panel format a number into a text control
    pub fn format_number(
        &mut self,
        screen_id: u16,
        control_id: u16,
        format: DataFormat,
        decimals: u8,
        value: u32,
    ) -> Result<(), Error<P::Error>> {
        let a = addr(screen_id, control_id);
        let v = value.to_be_bytes();
        self.config_request(
            cfg::FORMAT_TEXT,
            &[
                a[0],
                a[1],
                a[2],
                a[3],
                format as u8,
                decimals,
                v[0],
                v[1],
                v[2],
                v[3],
            ],
        )
    }

    // ------------------------------------------------------------------
    // Buttons
    // ------------------------------------------------------------------

    /// Press or release a button control programmatically
    pub fn set_button_state(
        &mut self,
        screen_id: u16,
        control_id: u16,
        pressed: bool,
    ) -> Result<(), Error<P::Error>> {
        let a = addr(screen_id, control_id);
        self.config_request(cfg::UPDATE_CONTROL, &[a[0], a[1], a[2], a[3], pressed as u8])
    }

    /// Read back a button control's state byte
    pub fn read_button_state(
        &mut self,
        screen_id: u16,
        control_id: u16,
    ) -> Result<u8, Error<P::Error>> {
        let response = self.config_query(cfg::READ_CONTROL, &addr(screen_id, control_id))?;
        let data = &response.payload;
        // Button responses carry a control-type byte before the state
        if data.len() < 7 {
            return Err(Error::MalformedResponse);
        }
        Ok(data[6])
    }

    // ------------------------------------------------------------------
    // Value widgets (progress bar, slider, meter)
    // ------------------------------------------------------------------

    /// Write a value widget's 32-bit value
    pub fn update_value(
        &mut self,
        screen_id: u16,
        control_id: u16,
        value: u32,
    ) -> Result<(), Error<P::Error>> {
        let a = addr(screen_id, control_id);
        let v = value.to_be_bytes();
        self.config_request(
            cfg::UPDATE_CONTROL,
            &[a[0], a[1], a[2], a[3], v[0], v[1], v[2], v[3]],
        )
    }

    /// Read back a value widget's 32-bit value
    pub fn read_value(&mut self, screen_id: u16, control_id: u16) -> Result<u32, Error<P::Error>> {
        let response = self.config_query(cfg::READ_CONTROL, &addr(screen_id, control_id))?;
        let data = &response.payload;
        if data.len() < VALUE_OFFSET + 4 {
            return Err(Error::MalformedResponse);
        }
        Ok(u32::from_be_bytes([
            data[VALUE_OFFSET],
            data[VALUE_OFFSET + 1],
            data[VALUE_OFFSET + 2],
            data[VALUE_OFFSET + 3],
        ]))
    }

    // ------------------------------------------------------------------
    // Icons and animations
    // ------------------------------------------------------------------

    /// Show a specific frame of an icon control
    pub fn show_icon_frame(
        &mut self,
        screen_id: u16,
        control_id: u16,
        frame_id: u8,
    ) -> Result<(), Error<P::Error>> {
        let a = addr(screen_id, control_id);
        self.config_request(cfg::ANIM_FRAME, &[a[0], a[1], a[2], a[3], frame_id])
    }

    /// Move an icon control to pixel coordinates
    pub fn set_icon_position(
        &mut self,
        screen_id: u16,
        control_id: u16,
        x: u16,
        y: u16,
    ) -> Result<(), Error<P::Error>> {
        let a = addr(screen_id, control_id);
        let (xb, yb) = (x.to_be_bytes(), y.to_be_bytes());
        self.config_request(
            cfg::SET_ICON_POS,
            &[a[0], a[1], a[2], a[3], xb[0], xb[1], yb[0], yb[1]],
        )
    }

    /// Read back which frame an icon control is showing
    pub fn read_icon_frame(
        &mut self,
        screen_id: u16,
        control_id: u16,
    ) -> Result<u8, Error<P::Error>> {
        let response = self.config_query(cfg::READ_CONTROL, &addr(screen_id, control_id))?;
        let data = &response.payload;
        if data.len() <= VALUE_OFFSET {
            return Err(Error::MalformedResponse);
        }
        Ok(data[VALUE_OFFSET])
    }

    /// Start an animation control
    pub fn start_animation(
        &mut self,
        screen_id: u16,
        control_id: u16,
    ) -> Result<(), Error<P::Error>> {
        self.config_request(cfg::ANIM_START, &addr(screen_id, control_id))
    }

    /// Stop an animation control
    pub fn stop_animation(
        &mut self,
        screen_id: u16,
        control_id: u16,
    ) -> Result<(), Error<P::Error>> {
        self.config_request(cfg::ANIM_STOP, &addr(screen_id, control_id))
    }

    /// Pause an animation control
    pub fn pause_animation(
        &mut self,
        screen_id: u16,
        control_id: u16,
    ) -> Result<(), Error<P::Error>> {
        self.config_request(cfg::ANIM_PAUSE, &addr(screen_id, control_id))
    }

    /// Jump an animation control to a specific frame
    pub fn set_animation_frame(
        &mut self,
        screen_id: u16,
        control_id: u16,
        frame_id: u8,
    ) -> Result<(), Error<P::Error>> {
        let a = addr(screen_id, control_id);
        self.config_request(cfg::ANIM_FRAME, &[a[0], a[1], a[2], a[3], frame_id])
    }

    // ------------------------------------------------------------------
    // Basic drawing
    // ------------------------------------------------------------------

    /// Draw a single point in the foreground color
    pub fn draw_point(&mut self, x: u16, y: u16) -> Result<(), Error<P::Error>> {
        let (xb, yb) = (x.to_be_bytes(), y.to_be_bytes());
        self.send_request(cmd::DRAW_POINT, &[xb[0], xb[1], yb[0], yb[1]])
    }

    /// Draw a line between two points
    pub fn draw_line(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> Result<(), Error<P::Error>> {
        let (a, b) = (x0.to_be_bytes(), y0.to_be_bytes());
        let (c, d) = (x1.to_be_bytes(), y1.to_be_bytes());
        self.send_request(
            cmd::DRAW_LINE,
            &[a[0], a[1], b[0], b[1], c[0], c[1], d[0], d[1]],
        )
    }

    /// Draw a rectangle given two opposite corners
    pub fn draw_rect(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        filled: bool,
    ) -> Result<(), Error<P::Error>> {
        let (a, b) = (x0.to_be_bytes(), y0.to_be_bytes());
        let (c, d) = (x1.to_be_bytes(), y1.to_be_bytes());
        let command = if filled {
            cmd::DRAW_RECT_FILL
        } else {
            cmd::DRAW_RECT
        };
        self.send_request(command, &[a[0], a[1], b[0], b[1], c[0], c[1], d[0], d[1]])
    }

    /// Draw a circle around a center point
    pub fn draw_circle(
        &mut self,
        x: u16,
        y: u16,
        radius: u16,
        filled: bool,
    ) -> Result<(), Error<P::Error>> {
        let (xb, yb, rb) = (x.to_be_bytes(), y.to_be_bytes(), radius.to_be_bytes());
        let command = if filled {
            cmd::DRAW_CIRCLE_FILL
        } else {
            cmd::DRAW_CIRCLE
        };
        self.send_request(command, &[xb[0], xb[1], yb[0], yb[1], rb[0], rb[1]])
    }

    /// Render text at a pixel position in the current colors
    ///
    /// `opaque` fills the text background with the background color;
    /// otherwise the text is drawn transparently.
    pub fn display_text(
        &mut self,
        x: u16,
        y: u16,
        opaque: bool,
        font: FontSize,
        text: &str,
    ) -> Result<(), Error<P::Error>> {
        let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
        let (xb, yb) = (x.to_be_bytes(), y.to_be_bytes());
        payload
            .extend_from_slice(&[xb[0], xb[1], yb[0], yb[1], opaque as u8, font as u8])
            .map_err(|_| Error::BufferTooSmall)?;
        payload
            .extend_from_slice(text.as_bytes())
            .map_err(|_| Error::BufferTooSmall)?;
        self.send_request(cmd::TEXT_DISPLAY, &payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{MockClock, MockPort};

    fn panel(port: MockPort) -> Panel<MockPort, MockClock> {
        Panel::new(port, MockClock::new())
    }

    fn written(panel: &Panel<MockPort, MockClock>) -> &[u8] {
        panel.port_ref().written()
    }

    #[test]
    fn test_update_text_frame_layout() {
        let mut p = panel(MockPort::new());
        p.update_text(1, 2, "Hi").unwrap();
        assert_eq!(
            written(&p),
            &[0xEE, 0xB1, 0x10, 0x00, 0x01, 0x00, 0x02, b'H', b'i', 0xFF, 0xFC, 0xFF, 0xFF]
        );
    }

    #[test]
    fn test_read_text_truncates_to_caller_buffer() {
        let mut port = MockPort::new();
        // EE B1 [11 screen control "Hello"] tail
        port.script_read(&[
            0xEE, 0xB1, 0x11, 0x00, 0x01, 0x00, 0x02, b'H', b'e', b'l', b'l', b'o', 0xFF, 0xFC,
            0xFF, 0xFF,
        ]);
        let mut p = panel(port);

        let mut out = [0u8; 3];
        let n = p.read_text(1, 2, &mut out).unwrap();
        assert_eq!(n, 3);
        assert_eq!(&out, b"Hel");
    }

    #[test]
    fn test_read_text_empty_response_is_malformed() {
        let mut port = MockPort::new();
        port.script_read(&[0xEE, 0xB1, 0x11, 0x00, 0x01, 0x00, 0x02, 0xFF, 0xFC, 0xFF, 0xFF]);
        let mut p = panel(port);

        let mut out = [0u8; 8];
        assert_eq!(p.read_text(1, 2, &mut out), Err(Error::MalformedResponse));
    }

    #[test]
    fn test_update_value_frame_layout() {
        let mut p = panel(MockPort::new());
        p.update_value(0x0001, 0x0003, 75).unwrap();
        assert_eq!(
            written(&p),
            &[
                0xEE, 0xB1, 0x10, 0x00, 0x01, 0x00, 0x03, 0x00, 0x00, 0x00, 0x4B, 0xFF, 0xFC,
                0xFF, 0xFF
            ]
        );
    }

    #[test]
    fn test_read_value() {
        let mut port = MockPort::new();
        // Value 0x01020304 after the echoed address
        port.script_read(&[
            0xEE, 0xB1, 0x11, 0x00, 0x01, 0x00, 0x03, 0x01, 0x02, 0x03, 0x04, 0xFF, 0xFC, 0xFF,
            0xFF,
        ]);
        let mut p = panel(port);

        assert_eq!(p.read_value(1, 3).unwrap(), 0x0102_0304);
    }

    #[test]
    fn test_read_button_state() {
        let mut port = MockPort::new();
        // Control-type byte 0x10, then state 0x01
        port.script_read(&[
            0xEE, 0xB1, 0x11, 0x00, 0x01, 0x00, 0x04, 0x10, 0x01, 0xFF, 0xFC, 0xFF, 0xFF,
        ]);
        let mut p = panel(port);

        assert_eq!(p.read_button_state(1, 4).unwrap(), 0x01);
    }

    #[test]
    fn test_draw_circle_filled_picks_fill_command() {
        let mut p = panel(MockPort::new());
        p.draw_circle(400, 75, 20, true).unwrap();
        assert_eq!(
            written(&p),
            &[0xEE, 0x53, 0x01, 0x90, 0x00, 0x4B, 0x00, 0x14, 0xFF, 0xFC, 0xFF, 0xFF]
        );
    }

    #[test]
    fn test_display_text_payload_layout() {
        let mut p = panel(MockPort::new());
        p.display_text(50, 150, true, FontSize::Ascii12x24, "Demo")
            .unwrap();
        assert_eq!(
            written(&p),
            &[
                0xEE, 0x20, 0x00, 0x32, 0x00, 0x96, 0x01, 0x02, b'D', b'e', b'm', b'o', 0xFF,
                0xFC, 0xFF, 0xFF
            ]
        );
    }

    #[test]
    fn test_animation_sequencing() {
        let mut p = panel(MockPort::new());
        p.start_animation(1, 9).unwrap();
        p.pause_animation(1, 9).unwrap();
        p.stop_animation(1, 9).unwrap();

        let bytes = written(&p);
        // Three config frames, differing only in sub-command
        assert_eq!(bytes.len(), 11 * 3);
        assert_eq!(bytes[2], 0x20);
        assert_eq!(bytes[13], 0x22);
        assert_eq!(bytes[24], 0x21);
    }
}
