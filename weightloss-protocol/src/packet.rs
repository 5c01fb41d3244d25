//! Packet encoding and decoding for the channel byte stream.
//!
//! Packet format:
//! - START (1 byte): 0xAA synchronization byte
//! - LENGTH (2 bytes): payload length, little endian (0-1024)
//! - TYPE (1 byte): message type identifier
//! - PAYLOAD (0-1024 bytes): type-specific data
//! - CHECKSUM (1 byte): XOR of both LENGTH bytes, TYPE, and all PAYLOAD bytes
//!
//! The channel is a reliable in-process pipe, so unlike a UART link there is
//! nothing to resynchronize after: any byte outside a packet is an error.

use core::{fmt, mem};

use heapless::Vec;

/// Packet synchronization byte
pub const PACKET_START: u8 = 0xAA;

/// Maximum payload size in bytes (one full 128x64 bitmap)
pub const MAX_PAYLOAD_SIZE: usize = 1024;

/// Bytes added around the payload (START + LENGTH + TYPE + CHECKSUM)
pub const PACKET_OVERHEAD: usize = 1 + 2 + 1 + 1;

/// Maximum complete packet size
pub const MAX_PACKET_SIZE: usize = PACKET_OVERHEAD + MAX_PAYLOAD_SIZE;

/// START, LENGTH and TYPE
const HEADER_LEN: usize = 4;

/// Errors that can occur during packet parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Checksum mismatch
    InvalidChecksum,
    /// A byte arrived where a START byte was required
    UnexpectedByte(u8),
    /// Message type is not part of the protocol
    UnknownMessage(u8),
    /// Payload has the wrong shape for its message type
    MalformedPayload,
    /// Input event byte is not a known event
    UnknownEvent(u8),
    /// Buffer too small for encoding
    BufferTooSmall,
}

impl fmt::Display for PacketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PacketError::PayloadTooLarge => {
                write!(f, "payload exceeds {} bytes", MAX_PAYLOAD_SIZE)
            }
            PacketError::InvalidChecksum => write!(f, "checksum mismatch"),
            PacketError::UnexpectedByte(b) => {
                write!(f, "unexpected byte 0x{:02X} outside a packet", b)
            }
            PacketError::UnknownMessage(t) => write!(f, "unknown message type 0x{:02X}", t),
            PacketError::MalformedPayload => write!(f, "malformed payload"),
            PacketError::UnknownEvent(e) => write!(f, "unknown input event 0x{:02X}", e),
            PacketError::BufferTooSmall => write!(f, "buffer too small"),
        }
    }
}

impl core::error::Error for PacketError {}

/// One framed message: a type byte and its payload
///
/// Packets are built by [`crate::ControllerMessage::to_packet`] and
/// [`crate::FrontendMessage::to_packet`], or come out of a [`PacketParser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub msg_type: u8,
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

/// XOR over the LENGTH and TYPE bytes and the payload
fn checksum(length_and_type: &[u8], payload: &[u8]) -> u8 {
    length_and_type
        .iter()
        .chain(payload)
        .fold(0, |acc, &byte| acc ^ byte)
}

impl Packet {
    fn header(&self) -> [u8; HEADER_LEN] {
        let [lo, hi] = (self.payload.len() as u16).to_le_bytes();
        [PACKET_START, lo, hi, self.msg_type]
    }

    /// Write the packet to `buffer`, returning the number of bytes used
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, PacketError> {
        let body_end = HEADER_LEN + self.payload.len();
        if buffer.len() <= body_end {
            return Err(PacketError::BufferTooSmall);
        }

        let header = self.header();
        buffer[..HEADER_LEN].copy_from_slice(&header);
        buffer[HEADER_LEN..body_end].copy_from_slice(&self.payload);
        buffer[body_end] = checksum(&header[1..], &self.payload);
        Ok(body_end + 1)
    }
}

/// Incremental packet reader
///
/// Collects the four header bytes, then the declared number of payload
/// bytes, then checks the trailing checksum. Any error drops the packet in
/// progress and the next byte must be a START again.
#[derive(Debug, Clone, Default)]
pub struct PacketParser {
    header: [u8; HEADER_LEN],
    header_len: usize,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl PacketParser {
    pub fn new() -> Self {
        Self::default()
    }

    fn declared_len(&self) -> usize {
        usize::from(u16::from_le_bytes([self.header[1], self.header[2]]))
    }

    fn restart(&mut self) {
        self.header_len = 0;
        self.payload.clear();
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(packet))` once the checksum byte of a valid packet
    /// arrives and `Ok(None)` while more bytes are needed.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Packet>, PacketError> {
        if self.header_len < HEADER_LEN {
            if self.header_len == 0 && byte != PACKET_START {
                return Err(PacketError::UnexpectedByte(byte));
            }
            self.header[self.header_len] = byte;
            self.header_len += 1;
            // LENGTH is complete after the third byte
            if self.header_len == 3 && self.declared_len() > MAX_PAYLOAD_SIZE {
                self.restart();
                return Err(PacketError::PayloadTooLarge);
            }
            return Ok(None);
        }

        if self.payload.len() < self.declared_len() {
            // declared_len was bounds-checked, so this always fits
            let _ = self.payload.push(byte);
            return Ok(None);
        }

        let payload = mem::take(&mut self.payload);
        let msg_type = self.header[3];
        let expected = checksum(&self.header[1..], &payload);
        self.restart();
        if byte != expected {
            return Err(PacketError::InvalidChecksum);
        }
        Ok(Some(Packet { msg_type, payload }))
    }

    /// Feed bytes until the first complete packet
    ///
    /// Returns that packet and the number of bytes consumed, so the caller
    /// can continue with the remainder.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<(Option<Packet>, usize), PacketError> {
        for (index, &byte) in bytes.iter().enumerate() {
            if let Some(packet) = self.feed(byte)? {
                return Ok((Some(packet), index + 1));
            }
        }
        Ok((None, bytes.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn packet(msg_type: u8, payload: &[u8]) -> Packet {
        Packet {
            msg_type,
            payload: Vec::from_slice(payload).unwrap(),
        }
    }

    fn encoded(packet: &Packet) -> std::vec::Vec<u8> {
        let mut buffer = [0u8; MAX_PACKET_SIZE];
        let len = packet.encode(&mut buffer).unwrap();
        buffer[..len].to_vec()
    }

    #[test]
    fn test_empty_payload_layout() {
        assert_eq!(encoded(&packet(0x20, &[])), [PACKET_START, 0, 0, 0x20, 0x20]);
    }

    #[test]
    fn test_full_frame_length_bytes() {
        let bytes = encoded(&packet(0x20, &[0u8; MAX_PAYLOAD_SIZE]));
        assert_eq!(bytes.len(), MAX_PACKET_SIZE);
        assert_eq!(&bytes[1..3], &[0x00, 0x04]);
    }

    #[test]
    fn test_encode_needs_room_for_the_checksum() {
        let mut buffer = [0u8; 5];
        assert_eq!(
            packet(0x21, &[1]).encode(&mut buffer),
            Err(PacketError::BufferTooSmall)
        );
    }

    #[test]
    fn test_parser_reads_back_packet() {
        let original = packet(0x21, &[1, 2, 3, 4, 5]);
        let bytes = encoded(&original);

        let mut parser = PacketParser::new();
        let (parsed, consumed) = parser.feed_bytes(&bytes).unwrap();

        assert_eq!(parsed, Some(original));
        assert_eq!(consumed, bytes.len());
    }

    #[test]
    fn test_parser_stops_after_first_packet() {
        let mut stream = encoded(&packet(0x01, &[0x02]));
        let first_len = stream.len();
        stream.extend(encoded(&packet(0x01, &[0x10])));

        let mut parser = PacketParser::new();
        let (first, consumed) = parser.feed_bytes(&stream).unwrap();
        assert_eq!(first.unwrap().payload[0], 0x02);
        assert_eq!(consumed, first_len);

        let (second, _) = parser.feed_bytes(&stream[consumed..]).unwrap();
        assert_eq!(second.unwrap().payload[0], 0x10);
    }

    #[test]
    fn test_bad_checksum_then_next_packet_parses() {
        let mut bytes = encoded(&packet(0x20, &[]));
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;

        let mut parser = PacketParser::new();
        assert_eq!(parser.feed_bytes(&bytes), Err(PacketError::InvalidChecksum));

        let good = packet(0x21, &[9]);
        assert_eq!(parser.feed_bytes(&encoded(&good)), Ok((Some(good), 6)));
    }

    #[test]
    fn test_parser_rejects_stray_bytes() {
        let mut parser = PacketParser::new();
        assert_eq!(parser.feed(0x12), Err(PacketError::UnexpectedByte(0x12)));
    }

    #[test]
    fn test_parser_rejects_oversized_length() {
        let mut parser = PacketParser::new();
        let over = (MAX_PAYLOAD_SIZE as u16 + 1).to_le_bytes();
        assert_eq!(parser.feed(PACKET_START), Ok(None));
        assert_eq!(parser.feed(over[0]), Ok(None));
        assert_eq!(parser.feed(over[1]), Err(PacketError::PayloadTooLarge));
        assert_eq!(parser.feed(0x01), Err(PacketError::UnexpectedByte(0x01)));
    }

    proptest! {
        #[test]
        fn parser_never_panics_on_arbitrary_input(
            bytes in proptest::collection::vec(any::<u8>(), 0..2048),
        ) {
            let mut parser = PacketParser::new();
            for byte in bytes {
                let _ = parser.feed(byte);
            }
        }

        #[test]
        fn single_bit_corruption_is_detected(
            payload in proptest::collection::vec(any::<u8>(), 1..64),
            bit in 0usize..8,
            offset in 0usize..64,
        ) {
            let mut bytes = encoded(&packet(0x21, &payload));
            // Flip one payload bit; length and type bytes stay intact
            let index = HEADER_LEN + offset % payload.len();
            bytes[index] ^= 1 << bit;

            let mut parser = PacketParser::new();
            prop_assert_eq!(parser.feed_bytes(&bytes), Err(PacketError::InvalidChecksum));
        }
    }
}
