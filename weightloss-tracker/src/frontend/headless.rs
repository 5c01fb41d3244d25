//! Log-only frontend

use log::info;
use weightloss_display::{led_hex_row, DisplayBackend, DisplayError};
use weightloss_protocol::{Frame, LedFrame};

/// Reports every frame and LED update to the log
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    frames: u64,
    last_leds: Option<LedFrame>,
}

impl DisplayBackend for HeadlessBackend {
    fn show_frame(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        self.frames += 1;
        info!(
            "frame #{} digest={:08x} lit={}",
            self.frames,
            frame.digest(),
            frame.lit_pixels()
        );
        Ok(())
    }

    fn show_leds(&mut self, leds: &LedFrame) -> Result<(), DisplayError> {
        if self.last_leds != Some(*leds) {
            info!("leds {}", led_hex_row(leds));
        }
        self.last_leds = Some(*leds);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }
}
