//! Screens
//!
//! Every screen owns its redraw cadence and renders a fresh [`Frame`] on
//! request. The set of screens is closed, so dispatch is a `match` over
//! [`Screen`]. Screens that accept input while shown also implement
//! [`InputCapable`].

pub mod cadence;
pub mod canvas;
pub mod ip_address;
pub mod watch;
pub mod weather;
pub mod weight_chart;
pub mod weight_input;

pub use cadence::{Cadence, RedrawCounter};
pub use canvas::{Canvas, Palette};
pub use ip_address::IpAddressScreen;
pub use watch::WatchScreen;
pub use weather::WeatherScreen;
pub use weight_chart::{ChartSeries, WeightChartScreen};
pub use weight_input::WeightInputScreen;

use weightloss_protocol::{Frame, InputEvent, LedFrame};

use crate::led::LedPatternKind;
use crate::registry::ScreenKind;
use crate::traits::CollaboratorError;

/// Capability of screens that take over the input events while in input
/// mode
pub trait InputCapable {
    fn input_mode(&self) -> bool;

    fn set_input_mode(&mut self, mode: bool);

    /// Apply one event received while in input mode
    fn handle_input(&mut self, event: InputEvent) -> Result<(), CollaboratorError>;
}

/// One entry of the screen list
pub enum Screen {
    Watch(WatchScreen),
    IpAddress(IpAddressScreen),
    Weather(WeatherScreen),
    WeightChart(WeightChartScreen),
    WeightInput(WeightInputScreen),
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Watch(_) => ScreenKind::Watch,
            Screen::IpAddress(_) => ScreenKind::IpAddress,
            Screen::Weather(_) => ScreenKind::Weather,
            Screen::WeightChart(_) => ScreenKind::WeightChart,
            Screen::WeightInput(_) => ScreenKind::WeightInput,
        }
    }

    /// Count one poll and report whether the screen wants a redraw
    pub fn does_need_update(&mut self) -> bool {
        match self {
            Screen::Watch(s) => s.does_need_update(),
            Screen::IpAddress(s) => s.does_need_update(),
            Screen::Weather(s) => s.does_need_update(),
            Screen::WeightChart(s) => s.does_need_update(),
            Screen::WeightInput(s) => s.does_need_update(),
        }
    }

    /// Render the current state
    pub fn create_image(&self) -> Frame {
        match self {
            Screen::Watch(s) => s.create_image(),
            Screen::IpAddress(s) => s.create_image(),
            Screen::Weather(s) => s.create_image(),
            Screen::WeightChart(s) => s.create_image(),
            Screen::WeightInput(s) => s.create_image(),
        }
    }

    /// Called when the screen becomes the active one
    pub fn activate(&mut self) -> Result<(), CollaboratorError> {
        match self {
            Screen::WeightChart(s) => s.reload(),
            _ => Ok(()),
        }
    }

    pub fn handles_input(&self) -> bool {
        self.as_input().is_some()
    }

    /// LED frame sent along with each redraw; no screen drives the strip
    /// directly yet
    pub fn create_led_pattern(&mut self) -> Option<LedFrame> {
        None
    }

    /// Pattern the controller should run while this screen is shown
    pub fn preferred_led_pattern(&self) -> Option<LedPatternKind> {
        match self {
            Screen::Watch(s) => s.preferred_led_pattern(),
            _ => None,
        }
    }

    pub fn as_input(&self) -> Option<&dyn InputCapable> {
        match self {
            Screen::WeightInput(s) => Some(s as &dyn InputCapable),
            _ => None,
        }
    }

    pub fn as_input_mut(&mut self) -> Option<&mut dyn InputCapable> {
        match self {
            Screen::WeightInput(s) => Some(s as &mut dyn InputCapable),
            _ => None,
        }
    }

    /// Whether input events currently go to the screen
    pub fn input_mode(&self) -> bool {
        self.as_input().is_some_and(|s| s.input_mode())
    }
}
