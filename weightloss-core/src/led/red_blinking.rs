use weightloss_protocol::{LedFrame, Rgb};

/// Time between two LED frames
pub const BLINK_PERIOD_MS: u64 = 2000;

/// Whole strip alternating between red and off
///
/// The gate is wall-clock based: the threshold starts at the whole second
/// at or below the start time and moves forward by [`BLINK_PERIOD_MS`]
/// every time it opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedBlinkingPattern {
    next_update_ms: u64,
    frames_sent: u32,
    running: bool,
}

impl RedBlinkingPattern {
    pub fn new(now_ms: u64) -> Self {
        Self {
            next_update_ms: now_ms - now_ms % 1000,
            frames_sent: 0,
            running: true,
        }
    }

    pub fn does_need_update(&mut self, now_ms: u64) -> bool {
        if self.running && self.next_update_ms < now_ms {
            self.next_update_ms += BLINK_PERIOD_MS;
            return true;
        }
        false
    }

    /// Odd calls light the strip, even calls darken it
    pub fn create_led_pattern(&mut self) -> LedFrame {
        self.frames_sent = self.frames_sent.wrapping_add(1);
        if self.frames_sent % 2 == 1 {
            LedFrame::uniform(Rgb::RED)
        } else {
            LedFrame::off()
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn end_led_pattern(&self) -> LedFrame {
        LedFrame::off()
    }
}
