//! Frontend abstractions for the weightloss tracker
//!
//! This crate provides:
//! - `DisplayBackend` trait for anything that can show a frame and the LED
//!   strip (OLED panel, terminal preview, log sink)
//! - `InputSource` trait for anything that produces input events (rotary
//!   encoder, keyboard, line reader)
//! - Text rasterising of frames and LED colors for character displays
//!
//! # Architecture
//!
//! A frontend receives `ControllerMessage`s from the channel and hands them
//! to [`present`], which dispatches to its backend. Input sources run
//! independently and only produce `InputEvent`s; they never touch screen
//! state.

#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod backend;
pub mod input;
pub mod preview;

// Re-export key types
pub use backend::{present, DisplayBackend, DisplayError};
pub use input::InputSource;
pub use preview::{led_hex_row, preview_row, PREVIEW_ROWS};
