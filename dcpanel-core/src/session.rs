//! Panel session: connection lifecycle and device-global commands
//!
//! A [`Panel`] is an owned value wrapping the transport plus the local
//! state the protocol cannot read back cheaply: the current screen id and
//! the active drawing colors. Those fields mirror the last value *sent*,
//! not anything the device confirmed — setters update them before the
//! frame leaves the transport, and a later write failure does not roll
//! them back. Callers that need certainty issue an explicit read-back.

use core::fmt;
use core::time::Duration;

use dcpanel_hal::{Clock, SerialPort};
use dcpanel_protocol::{cfg, cmd, BaudRate, Color, Frame, PanelEvent, TouchConfig, HANDSHAKE_ACK, MAX_FRAME_SIZE, RESET_KEY};

use crate::error::Error;
use crate::transport::{PollConfig, Transport};

/// Firmware version as reported by the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FirmwareVersion {
    pub major: u8,
    pub minor: u8,
    pub build: u16,
    pub patch: u16,
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.patch
        )
    }
}

/// Logical connection to one HMI panel
pub struct Panel<P: SerialPort, C: Clock> {
    transport: Transport<P, C>,
    current_screen: u16,
    fg_color: Color,
    bg_color: Color,
}

impl<P: SerialPort, C: Clock> Panel<P, C> {
    /// Wrap an already-opened serial channel
    ///
    /// The channel must be configured for the panel's line settings
    /// (8N1, raw, no flow control); that setup belongs to the port
    /// implementation, not to this layer.
    pub fn new(port: P, clock: C) -> Self {
        Self::with_poll_config(port, clock, PollConfig::default())
    }

    /// Wrap a channel with an explicit response-poll policy
    pub fn with_poll_config(port: P, clock: C, poll: PollConfig) -> Self {
        Self {
            transport: Transport::with_poll_config(port, clock, poll),
            current_screen: 0,
            fg_color: Color::WHITE,
            bg_color: Color::BLACK,
        }
    }

    /// Whether the underlying channel is still open
    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// Close the channel; all further operations fail with `NotConnected`
    pub fn close(&mut self) {
        self.transport.close();
    }

    /// The configured default deadline for request/response exchanges
    pub(crate) fn response_timeout(&self) -> Duration {
        self.transport.poll_config().response_timeout
    }

    #[cfg(test)]
    pub(crate) fn port_ref(&self) -> &P {
        self.transport.port_ref()
    }

    // ------------------------------------------------------------------
    // Frame-level primitives
    // ------------------------------------------------------------------

    /// Send a fire-and-forget command (no response expected)
    pub fn send_request(&mut self, command: u8, payload: &[u8]) -> Result<(), Error<P::Error>> {
        let frame = Frame::new(command, payload)?;
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = frame.encode(&mut buffer)?;
        self.transport.write_frame(&buffer[..len])
    }

    /// Send a command and wait for its response frame
    pub fn send_and_await(
        &mut self,
        command: u8,
        payload: &[u8],
        timeout: Duration,
    ) -> Result<Frame, Error<P::Error>> {
        self.send_request(command, payload)?;
        self.transport.await_response(timeout)
    }

    /// Fetch one unsolicited panel report (touch, control activity)
    pub fn poll_event(&mut self) -> Result<Option<PanelEvent>, Error<P::Error>> {
        self.transport.poll_event()
    }

    // ------------------------------------------------------------------
    // Connection lifecycle
    // ------------------------------------------------------------------

    /// Liveness check
    ///
    /// Sends the zero-payload handshake command and expects the fixed
    /// acknowledgement echo within the response deadline. Failure is not
    /// fatal to the connection; callers may keep using the session.
    pub fn handshake(&mut self) -> Result<(), Error<P::Error>> {
        let timeout = self.response_timeout();
        let response = self.send_and_await(cmd::HANDSHAKE, &[], timeout)?;
        if response.command != HANDSHAKE_ACK {
            return Err(Error::MalformedResponse);
        }
        Ok(())
    }

    /// Reboot the panel
    pub fn reset(&mut self) -> Result<(), Error<P::Error>> {
        self.send_request(cmd::RESET_DEVICE, &RESET_KEY)
    }

    /// Query the firmware version
    pub fn version(&mut self) -> Result<FirmwareVersion, Error<P::Error>> {
        let timeout = self.response_timeout();
        let response = self.send_and_await(cmd::GET_VERSION, &[0x01], timeout)?;
        if response.command != cmd::GET_VERSION || response.payload.len() < 6 {
            return Err(Error::MalformedResponse);
        }
        let data = &response.payload;
        Ok(FirmwareVersion {
            major: data[0],
            minor: data[1],
            build: u16::from_be_bytes([data[2], data[3]]),
            patch: u16::from_be_bytes([data[4], data[5]]),
        })
    }

    // ------------------------------------------------------------------
    // Device-global commands
    // ------------------------------------------------------------------

    /// Clear the whole screen to the background color
    pub fn clear_screen(&mut self) -> Result<(), Error<P::Error>> {
        self.send_request(cmd::CLEAR_SCREEN, &[])
    }

    /// Set backlight brightness (0 = full, device-specific scale)
    pub fn set_backlight(&mut self, level: u8) -> Result<(), Error<P::Error>> {
        self.send_request(cmd::SET_BACKLIGHT, &[level])
    }

    /// Sound the buzzer for `time_10ms` * 10 milliseconds
    pub fn buzz(&mut self, time_10ms: u8) -> Result<(), Error<P::Error>> {
        self.send_request(cmd::BUZZER, &[time_10ms])
    }

    /// Ask the panel to switch its serial baud rate
    ///
    /// The local channel keeps its old rate; reconfiguring it is the
    /// caller's follow-up.
    pub fn set_baud_rate(&mut self, baudrate: BaudRate) -> Result<(), Error<P::Error>> {
        self.send_request(cmd::SET_BAUDRATE, &[baudrate.code()])
    }

    // ------------------------------------------------------------------
    // Colors (optimistic local mirror)
    // ------------------------------------------------------------------

    /// Set the foreground drawing color
    pub fn set_fg_color(&mut self, color: Color) -> Result<(), Error<P::Error>> {
        self.fg_color = color;
        self.send_request(cmd::SET_FG_COLOR, &color.to_be_bytes())
    }

    /// Set the background drawing color
    pub fn set_bg_color(&mut self, color: Color) -> Result<(), Error<P::Error>> {
        self.bg_color = color;
        self.send_request(cmd::SET_BG_COLOR, &color.to_be_bytes())
    }

    /// Set both drawing colors in one frame
    pub fn set_colors(&mut self, fg: Color, bg: Color) -> Result<(), Error<P::Error>> {
        self.fg_color = fg;
        self.bg_color = bg;
        let fg_bytes = fg.to_be_bytes();
        let bg_bytes = bg.to_be_bytes();
        self.send_request(
            cmd::SET_COLORS,
            &[fg_bytes[0], fg_bytes[1], bg_bytes[0], bg_bytes[1]],
        )
    }

    /// Last foreground color sent (not device-confirmed)
    pub fn fg_color(&self) -> Color {
        self.fg_color
    }

    /// Last background color sent (not device-confirmed)
    pub fn bg_color(&self) -> Color {
        self.bg_color
    }

    // ------------------------------------------------------------------
    // Screens
    // ------------------------------------------------------------------

    /// Switch to a screen by id
    pub fn switch_screen(&mut self, screen_id: u16) -> Result<(), Error<P::Error>> {
        self.current_screen = screen_id;
        let id = screen_id.to_be_bytes();
        self.config_request(cfg::SWITCH_SCREEN, &id)
    }

    /// Switch screens with a transition effect, optionally clipped to a
    /// rectangular area
    #[allow(clippy::too_many_arguments)]
    pub fn switch_screen_with_effect(
        &mut self,
        screen_id: u16,
        effect: u8,
        area_enable: bool,
        left: u16,
        right: u16,
        top: u16,
        bottom: u16,
    ) -> Result<(), Error<P::Error>> {
        self.current_screen = screen_id;
        let id = screen_id.to_be_bytes();
        let (l, r) = (left.to_be_bytes(), right.to_be_bytes());
        let (t, b) = (top.to_be_bytes(), bottom.to_be_bytes());
        self.config_request(
            cfg::ANIM_SWITCH,
            &[
                id[0],
                id[1],
                effect,
                area_enable as u8,
                l[0],
                l[1],
                r[0],
                r[1],
                t[0],
                t[1],
                b[0],
                b[1],
            ],
        )
    }

    /// Read back the screen id the panel is actually showing
    pub fn read_screen(&mut self) -> Result<u16, Error<P::Error>> {
        let response = self.config_query(cfg::READ_SCREEN, &[])?;
        let data = &response.payload;
        if data.len() < 3 {
            return Err(Error::MalformedResponse);
        }
        Ok(u16::from_be_bytes([data[1], data[2]]))
    }

    /// Screen id of the last switch command (not device-confirmed)
    pub fn current_screen(&self) -> u16 {
        self.current_screen
    }

    // ------------------------------------------------------------------
    // Touch panel
    // ------------------------------------------------------------------

    /// Configure touch reporting
    pub fn configure_touch(&mut self, config: TouchConfig) -> Result<(), Error<P::Error>> {
        self.send_request(cmd::TOUCH_CONFIG, &[config.to_byte()])
    }

    /// Enter the panel's touch calibration routine
    pub fn calibrate_touch(&mut self) -> Result<(), Error<P::Error>> {
        self.send_request(cmd::TOUCH_CALIBRATE, &[])
    }

    /// Toggle touch test mode (panel echoes touches on screen)
    pub fn touch_test(&mut self, enable: bool) -> Result<(), Error<P::Error>> {
        self.send_request(cmd::TOUCH_TEST, &[enable as u8])
    }
}
