//! Text rendering of frames and LED colors
//!
//! A character cell covers two pixel rows, so a 128x64 frame becomes 32
//! lines of 128 half-block characters.

use core::fmt::Write;

use heapless::String;
use weightloss_protocol::{Frame, LedFrame, FRAME_HEIGHT, FRAME_WIDTH, LED_COUNT};

/// Lines in a frame preview
pub const PREVIEW_ROWS: usize = FRAME_HEIGHT / 2;

/// Largest preview line in bytes (every block glyph is 3 bytes of UTF-8)
pub const PREVIEW_ROW_BYTES: usize = FRAME_WIDTH * 3;

/// `#RRGGBB` per LED, separated by spaces
pub const LED_ROW_BYTES: usize = LED_COUNT * 8;

fn cell(top: bool, bottom: bool) -> char {
    match (top, bottom) {
        (true, true) => '█',
        (true, false) => '▀',
        (false, true) => '▄',
        (false, false) => ' ',
    }
}

/// One preview line covering pixel rows `2 * row` and `2 * row + 1`
///
/// Lines past the end of the frame are empty.
pub fn preview_row(frame: &Frame, row: usize) -> String<PREVIEW_ROW_BYTES> {
    let mut line = String::new();
    if row >= PREVIEW_ROWS {
        return line;
    }
    for x in 0..FRAME_WIDTH {
        let glyph = cell(frame.pixel(x, 2 * row), frame.pixel(x, 2 * row + 1));
        // capacity covers FRAME_WIDTH three byte glyphs
        let _ = line.push(glyph);
    }
    line
}

/// LED colors as `#RRGGBB` words, in strip order
pub fn led_hex_row(leds: &LedFrame) -> String<LED_ROW_BYTES> {
    let mut line = String::new();
    for (i, color) in leds.colors().iter().enumerate() {
        if i > 0 {
            let _ = line.push(' ');
        }
        let _ = write!(line, "{}", color);
    }
    line
}
