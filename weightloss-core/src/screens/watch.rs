//! Clock screen

use alloc::string::{String, ToString};

use weightloss_protocol::Frame;

use super::cadence::{Cadence, RedrawCounter};
use super::canvas::{Canvas, Palette};
use crate::led::LedPatternKind;
use crate::traits::SharedClock;

/// Polls between two redraws
pub const WATCH_REDRAW_EVERY: u32 = 5;

/// Time, weekday and date on three lines
pub struct WatchScreen {
    redraw: RedrawCounter,
    clock: SharedClock,
}

impl WatchScreen {
    pub fn new(clock: SharedClock) -> Self {
        Self {
            redraw: RedrawCounter::new(Cadence::EveryNth(WATCH_REDRAW_EVERY)),
            clock,
        }
    }

    pub fn does_need_update(&mut self) -> bool {
        self.redraw.poll()
    }

    pub fn polls(&self) -> u32 {
        self.redraw.polls()
    }

    /// `HH:MM:SS`, weekday name, `YYYY-MM-DD`
    pub fn lines(&self) -> [String; 3] {
        let now = self.clock.now();
        [
            now.format("%H:%M:%S").to_string(),
            now.format("%A").to_string(),
            now.format("%Y-%m-%d").to_string(),
        ]
    }

    pub fn create_image(&self) -> Frame {
        let mut canvas = Canvas::new(Palette::LIGHT_ON_DARK);
        for (row, line) in (0i32..).zip(self.lines().iter()) {
            canvas.text(0, row * 18, line);
        }
        canvas.finish()
    }

    pub fn preferred_led_pattern(&self) -> Option<LedPatternKind> {
        Some(LedPatternKind::RedBlinking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixedClock;

    #[test]
    fn test_lines() {
        let screen = WatchScreen::new(FixedClock::at(2024, 3, 15, 7, 5, 9));
        assert_eq!(screen.lines(), ["07:05:09", "Friday", "2024-03-15"].map(String::from));
    }

    #[test]
    fn test_redraw_every_fifth_poll() {
        let mut screen = WatchScreen::new(FixedClock::at(2024, 3, 15, 7, 5, 9));
        for _ in 0..50 {
            let due = screen.does_need_update();
            assert_eq!(due, screen.polls() % 5 == 0);
        }
    }

    #[test]
    fn test_renders_light_on_dark() {
        let screen = WatchScreen::new(FixedClock::at(2024, 3, 15, 7, 5, 9));
        let frame = screen.create_image();
        assert!(frame.lit_pixels() > 0);
        assert!(frame.lit_pixels() < weightloss_protocol::FRAME_BYTES * 4);
        assert!(!frame.pixel(127, 63));
    }

    #[test]
    fn test_frame_follows_clock() {
        let clock = FixedClock::at(2024, 3, 15, 7, 5, 9);
        let screen = WatchScreen::new(clock.clone());
        let before = screen.create_image();
        clock.advance_seconds(1);
        assert_ne!(screen.create_image(), before);
    }
}
