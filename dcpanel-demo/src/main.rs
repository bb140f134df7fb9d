//! Scripted exercise of a connected HMI panel
//!
//! Usage: `dcpanel-demo [device] [baud]`, defaulting to
//! `/dev/ttyUSB0` at 115200. Walks through drawing, control updates and
//! animations on screens 1-3, then polls touch reports until killed.
//!
//! The control demos assume a panel project with matching screen and
//! control ids; on a blank panel the frames are simply ignored.

use std::thread;
use std::time::Duration;

use dcpanel_core::{Error, Panel};
use dcpanel_hal_host::{HostSerial, SystemClock};
use dcpanel_protocol::{BaudRate, Color, FontSize, PanelEvent, TouchConfig};

type DemoPanel = Panel<HostSerial, SystemClock>;
type DemoError = Error<std::io::Error>;

fn pause_ms(ms: u64) {
    thread::sleep(Duration::from_millis(ms));
}

fn demo_basics(panel: &mut DemoPanel) -> Result<(), DemoError> {
    tracing::info!("basic functions");
    panel.clear_screen()?;
    pause_ms(1000);

    for level in (0..=255u16).step_by(32) {
        panel.set_backlight(level as u8)?;
        pause_ms(200);
    }
    panel.set_backlight(0)?;

    panel.buzz(10)?;
    pause_ms(500);
    Ok(())
}

fn demo_drawing(panel: &mut DemoPanel) -> Result<(), DemoError> {
    tracing::info!("drawing");
    panel.set_colors(Color::YELLOW, Color::BLUE)?;
    panel.clear_screen()?;

    for i in (0..100u16).step_by(5) {
        panel.draw_point(10 + i, 10 + i / 2)?;
    }
    pause_ms(1000);

    panel.set_fg_color(Color::RED)?;
    panel.draw_line(50, 50, 200, 100)?;
    panel.draw_line(50, 100, 200, 50)?;
    pause_ms(1000);

    panel.set_fg_color(Color::GREEN)?;
    panel.draw_rect(220, 30, 350, 120, false)?;
    panel.draw_rect(230, 40, 340, 110, true)?;
    pause_ms(1000);

    panel.set_fg_color(Color::CYAN)?;
    panel.draw_circle(400, 75, 40, false)?;
    panel.draw_circle(400, 75, 20, true)?;
    pause_ms(1000);

    panel.set_fg_color(Color::WHITE)?;
    panel.display_text(50, 150, true, FontSize::Gbk16x16, "Panel self test")?;
    panel.display_text(50, 180, false, FontSize::Ascii12x24, "dcpanel demo")?;
    pause_ms(2000);
    Ok(())
}

fn demo_controls(panel: &mut DemoPanel) -> Result<(), DemoError> {
    tracing::info!("control updates");
    panel.switch_screen(1)?;
    pause_ms(1000);

    for i in 0..100u32 {
        panel.update_text(1, 1, &format!("count {i}"))?;
        pause_ms(50);
    }

    // Progress bar and meter share the value-widget wire shape
    for i in 0..=100u32 {
        panel.update_value(1, 2, i)?;
        pause_ms(50);
    }
    for i in (0..=100u32).step_by(5) {
        panel.update_value(1, 3, i)?;
        pause_ms(100);
    }

    for _ in 0..5 {
        panel.set_button_state(1, 4, true)?;
        pause_ms(500);
        panel.set_button_state(1, 4, false)?;
        pause_ms(500);
    }
    Ok(())
}

fn demo_animation(panel: &mut DemoPanel) -> Result<(), DemoError> {
    tracing::info!("animation and icons");
    panel.switch_screen(2)?;
    pause_ms(1000);

    panel.start_animation(2, 1)?;
    pause_ms(3000);
    panel.pause_animation(2, 1)?;
    pause_ms(2000);
    panel.start_animation(2, 1)?;
    pause_ms(2000);
    panel.stop_animation(2, 1)?;

    for i in 0..5u8 {
        panel.show_icon_frame(2, 2, i % 3)?;
        pause_ms(500);
    }
    Ok(())
}

fn demo_text_effects(panel: &mut DemoPanel) -> Result<(), DemoError> {
    tracing::info!("text effects");
    panel.switch_screen(3)?;
    pause_ms(1000);

    let colors = [
        Color::RED,
        Color::GREEN,
        Color::BLUE,
        Color::YELLOW,
        Color::CYAN,
        Color::MAGENTA,
    ];
    for color in colors {
        panel.set_text_color(3, 1, color, Color::BLACK)?;
        panel.update_text(3, 1, "color cycle")?;
        pause_ms(1000);
    }

    panel.set_text_blink(3, 2, 50)?;
    panel.update_text(3, 2, "blinking")?;
    pause_ms(5000);
    panel.set_text_blink(3, 2, 0)?;

    panel.update_text(3, 3, "a long line of text to exercise scrolling")?;
    panel.set_text_scroll(3, 3, 50)?;
    pause_ms(10_000);
    panel.set_text_scroll(3, 3, 0)?;
    Ok(())
}

fn poll_events(panel: &mut DemoPanel) -> Result<(), DemoError> {
    tracing::info!("polling panel events, ctrl-c to quit");
    loop {
        match panel.poll_event()? {
            Some(PanelEvent::TouchDown { x, y }) => tracing::info!(x, y, "touch down"),
            Some(PanelEvent::TouchUp { x, y }) => tracing::info!(x, y, "touch up"),
            Some(PanelEvent::ControlNotify {
                screen,
                control,
                control_type,
            }) => tracing::info!(screen, control, control_type, "control activity"),
            None => pause_ms(10),
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let device = args.next().unwrap_or_else(|| "/dev/ttyUSB0".into());
    let baudrate = match args.next().as_deref() {
        None => BaudRate::B115200,
        Some("9600") => BaudRate::B9600,
        Some("19200") => BaudRate::B19200,
        Some("38400") => BaudRate::B38400,
        Some("57600") => BaudRate::B57600,
        Some("115200") => BaudRate::B115200,
        Some(other) => return Err(format!("unsupported baud rate: {other}").into()),
    };

    let mut panel = dcpanel_hal_host::connect(&device, baudrate)?;
    tracing::info!(device = %device, baudrate = baudrate.bps(), "connected");

    match panel.version() {
        Ok(version) => tracing::info!(%version, "panel firmware"),
        Err(e) => tracing::warn!(error = ?e, "version query failed"),
    }

    panel.configure_touch(TouchConfig {
        enable: true,
        beep: true,
        upload_mode: 3,
        calibrate_disable: false,
    })?;

    demo_basics(&mut panel)?;
    demo_drawing(&mut panel)?;
    demo_controls(&mut panel)?;
    demo_animation(&mut panel)?;
    demo_text_effects(&mut panel)?;
    poll_events(&mut panel)?;
    Ok(())
}

fn main() {
    tracing_subscriber::fmt().init();
    if let Err(e) = run() {
        tracing::error!(error = %e, "demo failed");
        std::process::exit(1);
    }
}
