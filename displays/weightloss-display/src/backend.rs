//! Display backend trait
//!
//! Defines the interface for the different frontends.

use weightloss_protocol::{ControllerMessage, Frame, LedFrame};

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Writing to the device or terminal failed
    Communication,
    /// The output went away
    Closed,
}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DisplayError::Communication => write!(f, "display communication failed"),
            DisplayError::Closed => write!(f, "display closed"),
        }
    }
}

impl core::error::Error for DisplayError {}

/// Display backend trait
///
/// Implementations own the output device. Frames and LED colors replace
/// whatever was shown before.
pub trait DisplayBackend {
    /// Show a full 128x64 frame
    fn show_frame(&mut self, frame: &Frame) -> Result<(), DisplayError>;

    /// Set the LED strip colors
    fn show_leds(&mut self, leds: &LedFrame) -> Result<(), DisplayError>;

    /// Push buffered output to the device
    fn flush(&mut self) -> Result<(), DisplayError>;
}

/// Hand one controller message to `backend`
pub fn present<B: DisplayBackend + ?Sized>(
    backend: &mut B,
    message: &ControllerMessage,
) -> Result<(), DisplayError> {
    match message {
        ControllerMessage::Frame(frame) => backend.show_frame(frame),
        ControllerMessage::Leds(leds) => backend.show_leds(leds),
    }
}
