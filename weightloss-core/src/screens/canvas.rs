//! Drawing surface for screen renderers

use core::convert::Infallible;

use embedded_graphics::mono_font::ascii::FONT_7X14_BOLD;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Polyline, PrimitiveStyle};
use embedded_graphics::text::{Baseline, Text};

use weightloss_protocol::{Frame, FrameBuffer, FRAME_HEIGHT, FRAME_WIDTH};

/// Height of one text line in pixels
pub const LINE_HEIGHT: i32 = 14;

/// Foreground and background colors of a rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub foreground: BinaryColor,
    pub background: BinaryColor,
}

impl Palette {
    /// White text on a black panel
    pub const LIGHT_ON_DARK: Palette = Palette {
        foreground: BinaryColor::On,
        background: BinaryColor::Off,
    };

    /// Black text on a white panel
    pub const DARK_ON_LIGHT: Palette = Palette {
        foreground: BinaryColor::Off,
        background: BinaryColor::On,
    };
}

/// Frame under construction
///
/// Implements [`DrawTarget`] so any embedded-graphics primitive can be
/// drawn onto it. Out of range pixels are clipped.
pub struct Canvas {
    buffer: FrameBuffer,
    palette: Palette,
}

impl Canvas {
    /// Start a frame filled with the palette background
    pub fn new(palette: Palette) -> Self {
        let mut buffer = FrameBuffer::new();
        buffer.fill(palette.background.is_on());
        Self { buffer, palette }
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Draw one line of text with its top left corner at `(x, y)`
    pub fn text(&mut self, x: i32, y: i32, text: &str) {
        let style = MonoTextStyle::new(&FONT_7X14_BOLD, self.palette.foreground);
        let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(self);
    }

    /// Draw connected one pixel wide segments through `points`
    ///
    /// A single point is drawn as a dot.
    pub fn polyline(&mut self, points: &[Point]) {
        if let [point] = points {
            let _ = Pixel(*point, self.palette.foreground).draw(self);
            return;
        }
        let style = PrimitiveStyle::with_stroke(self.palette.foreground, 1);
        let _ = Polyline::new(points).into_styled(style).draw(self);
    }

    pub fn finish(self) -> Frame {
        self.buffer.freeze()
    }
}

impl DrawTarget for Canvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            self.buffer
                .set_pixel(point.x as usize, point.y as usize, color.is_on());
        }
        Ok(())
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(FRAME_WIDTH as u32, FRAME_HEIGHT as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_fill() {
        assert_eq!(Canvas::new(Palette::LIGHT_ON_DARK).finish().lit_pixels(), 0);
        assert_eq!(
            Canvas::new(Palette::DARK_ON_LIGHT).finish().lit_pixels(),
            FRAME_WIDTH * FRAME_HEIGHT
        );
    }

    #[test]
    fn test_text_lights_pixels_in_its_row() {
        let mut canvas = Canvas::new(Palette::LIGHT_ON_DARK);
        canvas.text(0, 0, "88");
        let frame = canvas.finish();
        assert!(frame.lit_pixels() > 0);
        for y in LINE_HEIGHT as usize..FRAME_HEIGHT {
            for x in 0..FRAME_WIDTH {
                assert!(!frame.pixel(x, y));
            }
        }
    }

    #[test]
    fn test_dark_text_clears_pixels() {
        let mut canvas = Canvas::new(Palette::DARK_ON_LIGHT);
        canvas.text(0, 0, "88");
        assert!(canvas.finish().lit_pixels() < FRAME_WIDTH * FRAME_HEIGHT);
    }

    #[test]
    fn test_polyline_is_clipped() {
        let mut canvas = Canvas::new(Palette::LIGHT_ON_DARK);
        canvas.polyline(&[Point::new(-10, -10), Point::new(200, 200)]);
        let frame = canvas.finish();
        assert!(frame.lit_pixels() > 0);
        assert!(frame.pixel(0, 0));
    }
}
