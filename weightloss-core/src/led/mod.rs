//! LED strip patterns
//!
//! A pattern is a time-driven sequence of LED frames. The controller owns at
//! most one running pattern and polls it every tick.

mod red_blinking;

pub use red_blinking::{RedBlinkingPattern, BLINK_PERIOD_MS};

use weightloss_protocol::LedFrame;

/// Names a pattern without instantiating it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedPatternKind {
    RedBlinking,
}

/// A running LED pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedPattern {
    RedBlinking(RedBlinkingPattern),
}

impl LedPattern {
    /// Start a pattern of `kind` at `now_ms`
    pub fn start(kind: LedPatternKind, now_ms: u64) -> Self {
        match kind {
            LedPatternKind::RedBlinking => LedPattern::RedBlinking(RedBlinkingPattern::new(now_ms)),
        }
    }

    pub fn kind(&self) -> LedPatternKind {
        match self {
            LedPattern::RedBlinking(_) => LedPatternKind::RedBlinking,
        }
    }

    /// Whether a new LED frame is due at `now_ms`
    pub fn does_need_update(&mut self, now_ms: u64) -> bool {
        match self {
            LedPattern::RedBlinking(p) => p.does_need_update(now_ms),
        }
    }

    /// Next LED frame of the sequence
    pub fn create_led_pattern(&mut self) -> LedFrame {
        match self {
            LedPattern::RedBlinking(p) => p.create_led_pattern(),
        }
    }

    /// Stop for good
    pub fn stop(&mut self) {
        match self {
            LedPattern::RedBlinking(p) => p.stop(),
        }
    }

    /// Frame to send once the pattern is stopped
    pub fn end_led_pattern(&self) -> LedFrame {
        match self {
            LedPattern::RedBlinking(p) => p.end_led_pattern(),
        }
    }
}
