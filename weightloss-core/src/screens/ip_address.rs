//! Network identity screen

use weightloss_protocol::Frame;

use super::cadence::{Cadence, RedrawCounter};
use super::canvas::{Canvas, Palette};
use crate::traits::SharedHostInfo;

pub struct IpAddressScreen {
    redraw: RedrawCounter,
    host: SharedHostInfo,
}

impl IpAddressScreen {
    pub fn new(host: SharedHostInfo) -> Self {
        Self {
            redraw: RedrawCounter::new(Cadence::FirstPollOnly),
            host,
        }
    }

    pub fn does_need_update(&mut self) -> bool {
        self.redraw.poll()
    }

    pub fn create_image(&self) -> Frame {
        let mut canvas = Canvas::new(Palette::LIGHT_ON_DARK);
        canvas.text(0, 0, &self.host.ip_address());
        canvas.text(0, 20, &self.host.hostname());
        canvas.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeHost;
    use alloc::rc::Rc;

    #[test]
    fn test_updates_exactly_once() {
        let mut screen = IpAddressScreen::new(Rc::new(FakeHost::default()));
        let due = (0..20).filter(|_| screen.does_need_update()).count();
        assert_eq!(due, 1);
    }

    #[test]
    fn test_renders_both_lines() {
        let screen = IpAddressScreen::new(Rc::new(FakeHost::default()));
        let frame = screen.create_image();
        let lit_in = |rows: core::ops::Range<usize>| {
            rows.flat_map(|y| (0..128).map(move |x| (x, y)))
                .any(|(x, y)| frame.pixel(x, y))
        };
        assert!(lit_in(0..14));
        assert!(lit_in(20..34));
        assert!(!lit_in(40..64));
    }
}
