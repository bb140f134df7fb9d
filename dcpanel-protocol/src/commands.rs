//! Command catalogue and wire-level value types for the DC panel protocol
//!
//! All multi-byte payload fields are packed big-endian.

/// Command bytes (second frame byte)
pub mod cmd {
    /// Clear the whole screen
    pub const CLEAR_SCREEN: u8 = 0x01;
    /// Liveness check; the panel answers with [`super::HANDSHAKE_ACK`]
    pub const HANDSHAKE: u8 = 0x04;
    /// Reboot the panel (requires the fixed key payload)
    pub const RESET_DEVICE: u8 = 0x07;
    /// Query firmware version
    pub const GET_VERSION: u8 = 0xFE;
    /// Backlight brightness (one payload byte)
    pub const SET_BACKLIGHT: u8 = 0x60;
    /// Buzzer pulse (duration in 10 ms units)
    pub const BUZZER: u8 = 0x61;
    /// Touch panel configuration bitfield
    pub const TOUCH_CONFIG: u8 = 0x70;
    /// Enter touch calibration
    pub const TOUCH_CALIBRATE: u8 = 0x72;
    /// Touch test mode on/off
    pub const TOUCH_TEST: u8 = 0x73;
    /// Switch serial baud rate
    pub const SET_BAUDRATE: u8 = 0xA0;
    /// Foreground drawing color
    pub const SET_FG_COLOR: u8 = 0x41;
    /// Background drawing color
    pub const SET_BG_COLOR: u8 = 0x42;
    /// Foreground and background color in one frame
    pub const SET_COLORS: u8 = 0x40;
    /// Render text at a pixel position
    pub const TEXT_DISPLAY: u8 = 0x20;
    /// Draw a single point
    pub const DRAW_POINT: u8 = 0x50;
    /// Draw a line
    pub const DRAW_LINE: u8 = 0x51;
    /// Draw a circle outline
    pub const DRAW_CIRCLE: u8 = 0x52;
    /// Draw a filled circle
    pub const DRAW_CIRCLE_FILL: u8 = 0x53;
    /// Draw a rectangle outline
    pub const DRAW_RECT: u8 = 0x54;
    /// Draw a filled rectangle
    pub const DRAW_RECT_FILL: u8 = 0x55;
    /// Prefix for screen/control configuration sub-commands
    pub const CONFIG: u8 = 0xB1;
    /// Unsolicited touch press report
    pub const TOUCH_DOWN: u8 = 0x01;
    /// Unsolicited touch release report
    pub const TOUCH_UP: u8 = 0x03;
}

/// Sub-commands carried as the first payload byte of a [`cmd::CONFIG`] frame
pub mod cfg {
    /// Switch to a screen by id
    pub const SWITCH_SCREEN: u8 = 0x00;
    /// Read back the current screen id
    pub const READ_SCREEN: u8 = 0x01;
    /// Screen switch with transition effect
    pub const ANIM_SWITCH: u8 = 0x05;
    /// Numeric formatting into a text control
    pub const FORMAT_TEXT: u8 = 0x07;
    /// Write a control's value
    pub const UPDATE_CONTROL: u8 = 0x10;
    /// Read back a control's value (also the unsolicited notify shape)
    pub const READ_CONTROL: u8 = 0x11;
    /// Text blink period
    pub const SET_BLINK: u8 = 0x15;
    /// Text scroll speed
    pub const SET_SCROLL: u8 = 0x16;
    /// Per-control background color
    pub const SET_BK_COLOR: u8 = 0x18;
    /// Per-control foreground color
    pub const SET_FG_COLOR: u8 = 0x19;
    /// Start an animation control
    pub const ANIM_START: u8 = 0x20;
    /// Stop an animation control
    pub const ANIM_STOP: u8 = 0x21;
    /// Pause an animation control
    pub const ANIM_PAUSE: u8 = 0x22;
    /// Jump an animation/icon to a frame
    pub const ANIM_FRAME: u8 = 0x23;
    /// Move an icon control
    pub const SET_ICON_POS: u8 = 0x28;
}

/// Command echo the panel sends in answer to a handshake
pub const HANDSHAKE_ACK: u8 = 0x55;

/// Fixed key payload required by [`cmd::RESET_DEVICE`]
pub const RESET_KEY: [u8; 4] = [0x35, 0x5A, 0x53, 0xA5];

/// An RGB565 color as used by the panel's drawing commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color(pub u16);

impl Color {
    pub const BLACK: Color = Color(0x0000);
    pub const WHITE: Color = Color(0xFFFF);
    pub const RED: Color = Color(0xF800);
    pub const GREEN: Color = Color(0x07E0);
    pub const BLUE: Color = Color(0x001F);
    pub const YELLOW: Color = Color(0xFFE0);
    pub const CYAN: Color = Color(0x07FF);
    pub const MAGENTA: Color = Color(0xF81F);

    /// Pack 8-bit RGB components into RGB565
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color((((r & 0xF8) as u16) << 8) | (((g & 0xFC) as u16) << 3) | ((b >> 3) as u16))
    }

    /// Big-endian wire representation
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

/// Baud rates the panel's serial interface supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BaudRate {
    B1200,
    B2400,
    B4800,
    B9600,
    B19200,
    B38400,
    B57600,
    B115200,
    B1M,
    B2M,
}

impl BaudRate {
    /// Wire code for [`cmd::SET_BAUDRATE`]
    pub fn code(self) -> u8 {
        match self {
            BaudRate::B1200 => 0x00,
            BaudRate::B2400 => 0x01,
            BaudRate::B4800 => 0x02,
            BaudRate::B9600 => 0x03,
            BaudRate::B19200 => 0x04,
            BaudRate::B38400 => 0x05,
            BaudRate::B57600 => 0x06,
            BaudRate::B115200 => 0x07,
            BaudRate::B1M => 0x08,
            BaudRate::B2M => 0x09,
        }
    }

    /// Bits per second
    pub fn bps(self) -> u32 {
        match self {
            BaudRate::B1200 => 1_200,
            BaudRate::B2400 => 2_400,
            BaudRate::B4800 => 4_800,
            BaudRate::B9600 => 9_600,
            BaudRate::B19200 => 19_200,
            BaudRate::B38400 => 38_400,
            BaudRate::B57600 => 57_600,
            BaudRate::B115200 => 115_200,
            BaudRate::B1M => 1_000_000,
            BaudRate::B2M => 2_000_000,
        }
    }
}

/// Fonts selectable by [`cmd::TEXT_DISPLAY`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontSize {
    Ascii8x12 = 0x00,
    Ascii8x16 = 0x01,
    Ascii12x24 = 0x02,
    Ascii16x32 = 0x03,
    Gbk12x12 = 0x04,
    Gbk16x16 = 0x05,
    Gbk24x24 = 0x06,
    Gb2312_32x32 = 0x07,
    Ascii32x64 = 0x08,
    Gb2312_64x64 = 0x09,
}

/// Value interpretation for [`cfg::FORMAT_TEXT`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataFormat {
    Unsigned = 0x00,
    Signed = 0x01,
    Float = 0x02,
    Double = 0x03,
}

/// Touch panel configuration, packed into one byte for [`cmd::TOUCH_CONFIG`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchConfig {
    /// Touch input enabled
    pub enable: bool,
    /// Beep on touch
    pub beep: bool,
    /// Event upload mode (0-7): which of press/release are reported
    pub upload_mode: u8,
    /// Lock out user-initiated calibration
    pub calibrate_disable: bool,
}

impl TouchConfig {
    /// Pack into the wire byte
    pub fn to_byte(self) -> u8 {
        let mut byte = 0u8;
        byte |= self.enable as u8;
        byte |= (self.beep as u8) << 1;
        byte |= (self.upload_mode & 0x07) << 2;
        byte |= (self.calibrate_disable as u8) << 5;
        byte
    }
}
