//! Display command emitter.
//!
//! The display is driven by short ASCII commands over a dedicated serial
//! channel. A command names an object on the active page and assigns one of
//! its fields (`RPM.val=7000`, `Batt.txt="13.20"`, `WARN_ECTO.pic=1`,
//! `page Params`), and every command is terminated by three `0xFF` bytes.
//!
//! The emitter is the only module that knows the command syntax; everything
//! above it hands over object names and typed values. Output goes through
//! the [`DisplayLink`] trait so the firmware can back it with a UART and
//! tests can capture the byte stream.

use core::fmt::Write as _;

use heapless::String;

/// Fixed terminator sequence the display requires after every command.
pub const COMMAND_TERMINATOR: [u8; 3] = [0xFF, 0xFF, 0xFF];

/// Longest command this system emits (timer text assignments).
const CMD_CAPACITY: usize = 48;

/// Byte sink for display commands.
pub trait DisplayLink {
    /// Write raw bytes to the display serial channel.
    fn write_bytes(
        &mut self,
        bytes: &[u8],
    );
}

/// Send one already-formatted command followed by the terminator.
pub fn send_command(
    link: &mut impl DisplayLink,
    command: &str,
) {
    link.write_bytes(command.as_bytes());
    link.write_bytes(&COMMAND_TERMINATOR);
}

/// Select a page on the display.
pub fn select_page(
    link: &mut impl DisplayLink,
    name: &str,
) {
    let mut cmd: String<CMD_CAPACITY> = String::new();
    write!(cmd, "page {name}").ok();
    send_command(link, &cmd);
}

/// Assign an integer value field: `<object>.val=<value>`.
pub fn set_value(
    link: &mut impl DisplayLink,
    object: &str,
    value: i32,
) {
    let mut cmd: String<CMD_CAPACITY> = String::new();
    write!(cmd, "{object}.val={value}").ok();
    send_command(link, &cmd);
}

/// Assign a picture field: `<object>.pic=<index>`.
pub fn set_picture(
    link: &mut impl DisplayLink,
    object: &str,
    index: u8,
) {
    let mut cmd: String<CMD_CAPACITY> = String::new();
    write!(cmd, "{object}.pic={index}").ok();
    send_command(link, &cmd);
}

/// Assign a text field from a float: `<object>.txt="<value>"` with two
/// decimal places.
pub fn set_text_float(
    link: &mut impl DisplayLink,
    object: &str,
    value: f32,
) {
    let mut cmd: String<CMD_CAPACITY> = String::new();
    write!(cmd, "{object}.txt=\"{value:.2}\"").ok();
    send_command(link, &cmd);
}

/// Assign a text field verbatim: `<object>.txt="<text>"`.
pub fn set_text(
    link: &mut impl DisplayLink,
    object: &str,
    text: &str,
) {
    let mut cmd: String<CMD_CAPACITY> = String::new();
    write!(cmd, "{object}.txt=\"{text}\"").ok();
    send_command(link, &cmd);
}

/// Format a millisecond count as `<minutes>:<seconds>` with zero-padded
/// seconds (65000 ms -> `1:05`).
pub fn format_duration(ms: u32) -> String<16> {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    let mut out: String<16> = String::new();
    write!(out, "{minutes}:{seconds:02}").ok();
    out
}

// =============================================================================
// Test Support
// =============================================================================


// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::capture::CaptureLink;
    use super::*;

    #[test]
    fn test_command_has_terminator() {
        let mut link = CaptureLink::new();
        set_value(&mut link, "RPM", 7000);
        assert_eq!(link.commands(), vec!["RPM.val=7000"]);
    }

    #[test]
    fn test_select_page() {
        let mut link = CaptureLink::new();
        select_page(&mut link, "Config1");
        assert_eq!(link.commands(), vec!["page Config1"]);
    }

    #[test]
    fn test_set_picture() {
        let mut link = CaptureLink::new();
        set_picture(&mut link, "WARN_ECTO", 4);
        assert_eq!(link.commands(), vec!["WARN_ECTO.pic=4"]);
    }

    #[test]
    fn test_float_text_two_decimals() {
        let mut link = CaptureLink::new();
        set_text_float(&mut link, "Batt", 13.2);
        assert_eq!(link.commands(), vec!["Batt.txt=\"13.20\""]);
    }

    #[test]
    fn test_negative_value() {
        let mut link = CaptureLink::new();
        set_value(&mut link, "ETC", -40);
        assert_eq!(link.commands(), vec!["ETC.val=-40"]);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(65_000).as_str(), "1:05");
        assert_eq!(format_duration(5_000).as_str(), "0:05");
        assert_eq!(format_duration(600_000).as_str(), "10:00");
    }

    #[test]
    fn test_format_duration_zero() {
        assert_eq!(format_duration(0).as_str(), "0:00");
    }

    #[test]
    fn test_format_duration_just_under_a_minute() {
        assert_eq!(format_duration(59_999).as_str(), "0:59");
    }
}
