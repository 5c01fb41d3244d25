//! Message types for the controller/frontend channel
//!
//! Message types are divided into two directions:
//! - Frontend → Controller: input events
//! - Controller → Frontend: rendered frames and LED colors

use crate::bitmap::Frame;
use crate::events::InputEvent;
use crate::led::LedFrame;
use crate::packet::{Packet, PacketError};

// Message type IDs: Frontend → Controller
pub const MSG_INPUT: u8 = 0x01;

// Message type IDs: Controller → Frontend
pub const MSG_FRAME: u8 = 0x20;
pub const MSG_LEDS: u8 = 0x21;

fn build_packet(msg_type: u8, payload: &[u8]) -> Result<Packet, PacketError> {
    let payload = heapless::Vec::from_slice(payload).map_err(|_| PacketError::PayloadTooLarge)?;
    Ok(Packet { msg_type, payload })
}

/// Messages from the controller to the frontend
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerMessage {
    /// Replace the displayed bitmap
    Frame(Frame),
    /// Replace the LED strip colors
    Leds(LedFrame),
}

impl ControllerMessage {
    /// Encode this message into a packet
    pub fn to_packet(&self) -> Result<Packet, PacketError> {
        match self {
            ControllerMessage::Frame(frame) => build_packet(MSG_FRAME, frame.as_bytes()),
            ControllerMessage::Leds(leds) => build_packet(MSG_LEDS, &leds.to_bytes()),
        }
    }

    /// Parse a message from a controller-originated packet
    pub fn from_packet(packet: &Packet) -> Result<Self, PacketError> {
        match packet.msg_type {
            MSG_FRAME => Frame::from_bytes(&packet.payload)
                .map(ControllerMessage::Frame)
                .ok_or(PacketError::MalformedPayload),
            MSG_LEDS => LedFrame::from_bytes(&packet.payload)
                .map(ControllerMessage::Leds)
                .ok_or(PacketError::MalformedPayload),
            other => Err(PacketError::UnknownMessage(other)),
        }
    }
}

/// Messages from the frontend to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrontendMessage {
    /// User input event
    Input(InputEvent),
}

impl FrontendMessage {
    /// Parse a message from a frontend-originated packet
    pub fn from_packet(packet: &Packet) -> Result<Self, PacketError> {
        match packet.msg_type {
            MSG_INPUT => {
                if packet.payload.len() != 1 {
                    return Err(PacketError::MalformedPayload);
                }
                let byte = packet.payload[0];
                let event = InputEvent::from_byte(byte).ok_or(PacketError::UnknownEvent(byte))?;
                Ok(FrontendMessage::Input(event))
            }
            other => Err(PacketError::UnknownMessage(other)),
        }
    }

    /// Encode this message into a packet
    pub fn to_packet(&self) -> Result<Packet, PacketError> {
        match self {
            FrontendMessage::Input(event) => build_packet(MSG_INPUT, &[event.to_byte()]),
        }
    }
}
