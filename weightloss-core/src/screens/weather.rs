//! Current weather screen

use alloc::format;
use alloc::string::String;

use weightloss_protocol::Frame;

use super::cadence::{Cadence, RedrawCounter};
use super::canvas::{Canvas, Palette};
use crate::traits::{CollaboratorError, WeatherQuery, WeatherSnapshot, WeatherSource};

/// City and temperature, fetched once when the screen is built
pub struct WeatherScreen {
    redraw: RedrawCounter,
    snapshot: WeatherSnapshot,
}

impl WeatherScreen {
    /// Fetch the current conditions for `query`
    pub fn new(
        query: &WeatherQuery,
        source: &mut dyn WeatherSource,
    ) -> Result<Self, CollaboratorError> {
        log::debug!(
            "fetching weather for {},{}",
            query.zip_code,
            query.country_code
        );
        let snapshot = source.fetch_current(query)?;
        log::debug!("current weather: {:?}", snapshot);
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn from_snapshot(snapshot: WeatherSnapshot) -> Self {
        Self {
            redraw: RedrawCounter::new(Cadence::FirstPollOnly),
            snapshot,
        }
    }

    pub fn snapshot(&self) -> &WeatherSnapshot {
        &self.snapshot
    }

    pub fn does_need_update(&mut self) -> bool {
        self.redraw.poll()
    }

    /// Temperature line, one decimal
    pub fn temperature_text(&self) -> String {
        format!("{:.1} C", self.snapshot.temperature_c)
    }

    pub fn create_image(&self) -> Frame {
        let mut canvas = Canvas::new(Palette::LIGHT_ON_DARK);
        canvas.text(0, 0, &self.snapshot.city);
        canvas.text(0, 15, &self.temperature_text());
        canvas.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeWeather;

    #[test]
    fn test_fetches_once_at_construction() {
        let mut source = FakeWeather::default();
        let mut screen = WeatherScreen::new(&WeatherQuery::default(), &mut source).unwrap();
        assert_eq!(source.calls, 1);

        assert!(screen.does_need_update());
        assert!(!screen.does_need_update());
        screen.create_image();
        assert_eq!(source.calls, 1);
    }

    #[test]
    fn test_temperature_text() {
        let mut source = FakeWeather::default();
        source.temperature_c = -3.26;
        let screen = WeatherScreen::new(&WeatherQuery::default(), &mut source).unwrap();
        assert_eq!(screen.temperature_text(), "-3.3 C");
    }

    #[test]
    fn test_fetch_failure_propagates() {
        let mut source = FakeWeather::default();
        source.fail = true;
        let err = WeatherScreen::new(&WeatherQuery::default(), &mut source).err().unwrap();
        assert_eq!(err.service(), "weather");
    }
}
