//! LED strip colors

use core::fmt;

/// Number of LEDs on the strip
pub const LED_COUNT: usize = 8;

/// Size of an encoded LED frame in bytes
pub const LED_FRAME_BYTES: usize = LED_COUNT * 3;

/// One LED color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const OFF: Rgb = Rgb::new(0, 0, 0);
    pub const RED: Rgb = Rgb::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn is_off(&self) -> bool {
        *self == Rgb::OFF
    }
}

/// Formats as `#RRGGBB`, the form desktop color swatches accept
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Colors for the whole strip, in strip order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedFrame(pub [Rgb; LED_COUNT]);

impl LedFrame {
    /// Every LED dark
    pub const fn off() -> Self {
        Self([Rgb::OFF; LED_COUNT])
    }

    /// Every LED the same color
    pub const fn uniform(color: Rgb) -> Self {
        Self([color; LED_COUNT])
    }

    pub fn colors(&self) -> &[Rgb; LED_COUNT] {
        &self.0
    }

    pub fn is_dark(&self) -> bool {
        self.0.iter().all(Rgb::is_off)
    }

    /// Encode as `r g b` triples
    pub fn to_bytes(&self) -> [u8; LED_FRAME_BYTES] {
        let mut bytes = [0u8; LED_FRAME_BYTES];
        for (chunk, color) in bytes.chunks_exact_mut(3).zip(self.0.iter()) {
            chunk.copy_from_slice(&[color.r, color.g, color.b]);
        }
        bytes
    }

    /// Decode `r g b` triples; `None` unless exactly 8 triples are given
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != LED_FRAME_BYTES {
            return None;
        }
        let mut colors = [Rgb::OFF; LED_COUNT];
        for (color, chunk) in colors.iter_mut().zip(bytes.chunks_exact(3)) {
            *color = Rgb::new(chunk[0], chunk[1], chunk[2]);
        }
        Some(Self(colors))
    }
}

impl Default for LedFrame {
    fn default() -> Self {
        Self::off()
    }
}
