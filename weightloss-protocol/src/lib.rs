//! Controller ↔ Frontend Channel Protocol
//!
//! This crate defines the data model and byte-level protocol between the
//! controller (owns screen state, renders frames) and the frontend (shows
//! frames, forwards input). The two sides share nothing but a duplex byte
//! stream.
//!
//! # Protocol Overview
//!
//! All messages use a simple binary packet format:
//! ```text
//! ┌───────┬──────────┬──────┬───────────────┬──────────┐
//! │ START │ LENGTH   │ TYPE │ PAYLOAD       │ CHECKSUM │
//! │ 1B    │ 2B (LE)  │ 1B   │ 0–1024B       │ 1B       │
//! └───────┴──────────┴──────┴───────────────┴──────────┘
//! ```
//!
//! The frontend acts as a "dumb terminal": it handles only input capture and
//! display. All screen logic remains in the controller.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod bitmap;
pub mod events;
pub mod led;
pub mod messages;
pub mod packet;

pub use bitmap::{Frame, FrameBuffer, FRAME_BYTES, FRAME_HEIGHT, FRAME_WIDTH};
pub use events::InputEvent;
pub use led::{LedFrame, Rgb, LED_COUNT};
pub use messages::{ControllerMessage, FrontendMessage};
pub use packet::{
    Packet, PacketError, PacketParser, MAX_PACKET_SIZE, MAX_PAYLOAD_SIZE, PACKET_START,
};
