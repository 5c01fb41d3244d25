//! Monochrome frame bitmap shared by all screens.
//!
//! Pixels are packed row-major, 8 pixels per byte, most significant bit
//! first. A set bit is a lit (white) pixel.

use core::fmt;

/// Frame width in pixels
pub const FRAME_WIDTH: usize = 128;

/// Frame height in pixels
pub const FRAME_HEIGHT: usize = 64;

/// Size of a packed frame in bytes
pub const FRAME_BYTES: usize = FRAME_WIDTH * FRAME_HEIGHT / 8;

#[inline]
fn bit_position(x: usize, y: usize) -> (usize, u8) {
    let index = y * FRAME_WIDTH + x;
    (index / 8, 0x80 >> (index % 8))
}

/// An immutable rendered frame
///
/// Frames are created once by a renderer and then only read. Rotation
/// produces a new frame.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    bits: [u8; FRAME_BYTES],
}

impl Frame {
    /// A frame with every pixel off
    pub const fn blank() -> Self {
        Self {
            bits: [0; FRAME_BYTES],
        }
    }

    /// Wrap an already packed bitmap
    pub const fn from_raw(bits: [u8; FRAME_BYTES]) -> Self {
        Self { bits }
    }

    /// Build a frame from a wire payload
    ///
    /// Returns `None` unless exactly `FRAME_BYTES` bytes are given.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let bits: [u8; FRAME_BYTES] = bytes.try_into().ok()?;
        Some(Self { bits })
    }

    /// Packed bitmap bytes
    pub fn as_bytes(&self) -> &[u8; FRAME_BYTES] {
        &self.bits
    }

    /// Read one pixel; out of range coordinates read as off
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= FRAME_WIDTH || y >= FRAME_HEIGHT {
            return false;
        }
        let (byte, mask) = bit_position(x, y);
        self.bits[byte] & mask != 0
    }

    /// Number of lit pixels
    pub fn lit_pixels(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Return a copy turned upside down (for panels mounted rotated)
    pub fn rotated_180(&self) -> Frame {
        let mut bits = [0u8; FRAME_BYTES];
        for (dst, src) in bits.iter_mut().zip(self.bits.iter().rev()) {
            *dst = src.reverse_bits();
        }
        Frame { bits }
    }

    /// Short FNV-1a digest, handy for logging which frame went out
    pub fn digest(&self) -> u32 {
        self.bits.iter().fold(0x811C_9DC5u32, |hash, &byte| {
            (hash ^ byte as u32).wrapping_mul(0x0100_0193)
        })
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::blank()
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("lit", &self.lit_pixels())
            .field("digest", &format_args!("{:08x}", self.digest()))
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Frame {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Frame[lit={}, digest={:08x}]", self.lit_pixels(), self.digest());
    }
}

/// Mutable pixel buffer used while rendering a frame
#[derive(Clone)]
pub struct FrameBuffer {
    bits: [u8; FRAME_BYTES],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Create a buffer with every pixel off
    pub const fn new() -> Self {
        Self {
            bits: [0; FRAME_BYTES],
        }
    }

    /// Set every pixel to `on`
    pub fn fill(&mut self, on: bool) {
        self.bits.fill(if on { 0xFF } else { 0x00 });
    }

    /// Set one pixel; out of range coordinates are clipped
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        if x >= FRAME_WIDTH || y >= FRAME_HEIGHT {
            return;
        }
        let (byte, mask) = bit_position(x, y);
        if on {
            self.bits[byte] |= mask;
        } else {
            self.bits[byte] &= !mask;
        }
    }

    /// Read one pixel back
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= FRAME_WIDTH || y >= FRAME_HEIGHT {
            return false;
        }
        let (byte, mask) = bit_position(x, y);
        self.bits[byte] & mask != 0
    }

    /// Finish rendering
    pub fn freeze(self) -> Frame {
        Frame { bits: self.bits }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_packing_is_msb_first() {
        let mut buffer = FrameBuffer::new();
        buffer.set_pixel(0, 0, true);
        buffer.set_pixel(9, 0, true);
        let frame = buffer.freeze();

        assert_eq!(frame.as_bytes()[0], 0x80);
        assert_eq!(frame.as_bytes()[1], 0x40);
        assert!(frame.pixel(0, 0));
        assert!(frame.pixel(9, 0));
        assert!(!frame.pixel(1, 0));
    }

    #[test]
    fn test_out_of_range_is_clipped() {
        let mut buffer = FrameBuffer::new();
        buffer.set_pixel(FRAME_WIDTH, 0, true);
        buffer.set_pixel(0, FRAME_HEIGHT, true);
        let frame = buffer.freeze();
        assert_eq!(frame.lit_pixels(), 0);
        assert!(!frame.pixel(FRAME_WIDTH, FRAME_HEIGHT));
    }

    #[test]
    fn test_rotation_moves_corners() {
        let mut buffer = FrameBuffer::new();
        buffer.set_pixel(0, 0, true);
        buffer.set_pixel(10, 3, true);
        let rotated = buffer.freeze().rotated_180();

        assert!(rotated.pixel(FRAME_WIDTH - 1, FRAME_HEIGHT - 1));
        assert!(rotated.pixel(FRAME_WIDTH - 11, FRAME_HEIGHT - 4));
        assert_eq!(rotated.lit_pixels(), 2);
    }

    #[test]
    fn test_rotating_twice_is_identity() {
        let mut buffer = FrameBuffer::new();
        for x in 0..FRAME_WIDTH {
            buffer.set_pixel(x, x % FRAME_HEIGHT, true);
        }
        let frame = buffer.freeze();
        assert_eq!(frame.rotated_180().rotated_180(), frame);
    }

    #[test]
    fn test_from_bytes_requires_exact_size() {
        assert!(Frame::from_bytes(&[0u8; FRAME_BYTES - 1]).is_none());
        assert!(Frame::from_bytes(&[0u8; FRAME_BYTES + 1]).is_none());
        assert_eq!(Frame::from_bytes(&[0u8; FRAME_BYTES]), Some(Frame::blank()));
    }

    #[test]
    fn test_fill() {
        let mut buffer = FrameBuffer::new();
        buffer.fill(true);
        assert_eq!(buffer.clone().freeze().lit_pixels(), FRAME_WIDTH * FRAME_HEIGHT);
        buffer.fill(false);
        assert_eq!(buffer.freeze().lit_pixels(), 0);
    }
}
