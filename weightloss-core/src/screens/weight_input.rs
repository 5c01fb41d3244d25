//! Weight entry screen
//!
//! In normal mode the screen summarises the last entry of one person. In
//! input mode the step events adjust a pending weight and Confirm writes it
//! for today.

use alloc::format;
use alloc::string::{String, ToString};

use chrono::Days;
use weightloss_protocol::{Frame, InputEvent};

use super::cadence::{Cadence, RedrawCounter};
use super::canvas::{Canvas, Palette};
use super::InputCapable;
use crate::traits::{CollaboratorError, LastUpdates, SharedClock, SharedWeightStore};

/// Pending weight used when a person has no entries yet
pub const DEFAULT_WEIGHT_KG: f32 = 70.0;

pub struct WeightInputScreen {
    redraw: RedrawCounter,
    person: String,
    store: SharedWeightStore,
    clock: SharedClock,
    input_mode: bool,
    last: Option<LastUpdates>,
    /// Pending weight in tenths of a kilogram
    pending_tenths: i32,
    default_tenths: i32,
}

fn to_tenths(weight_kg: f32) -> i32 {
    let scaled = weight_kg * 10.0;
    if scaled >= 0.0 {
        (scaled + 0.5) as i32
    } else {
        (scaled - 0.5) as i32
    }
}

impl WeightInputScreen {
    pub fn new(
        person: &str,
        default_weight_kg: f32,
        store: SharedWeightStore,
        clock: SharedClock,
    ) -> Result<Self, CollaboratorError> {
        let default_tenths = to_tenths(default_weight_kg);
        let mut screen = Self {
            redraw: RedrawCounter::new(Cadence::EveryNth(2)),
            person: person.to_string(),
            store,
            clock,
            input_mode: false,
            last: None,
            pending_tenths: default_tenths,
            default_tenths,
        };
        screen.refresh_current_data()?;
        Ok(screen)
    }

    /// Re-read the last entry and reset the pending weight to it
    pub fn refresh_current_data(&mut self) -> Result<(), CollaboratorError> {
        let last = self.store.borrow_mut().read_last_updates(&self.person)?;
        self.pending_tenths = last.map_or(self.default_tenths, |l| to_tenths(l.weight_kg));
        self.last = last;
        Ok(())
    }

    pub fn person(&self) -> &str {
        &self.person
    }

    pub fn last_updates(&self) -> Option<&LastUpdates> {
        self.last.as_ref()
    }

    pub fn pending_weight_kg(&self) -> f32 {
        self.pending_tenths as f32 / 10.0
    }

    pub fn polls(&self) -> u32 {
        self.redraw.polls()
    }

    pub fn does_need_update(&mut self) -> bool {
        self.redraw.poll()
    }

    /// "Today", "Yesterday" or the ISO date of the last entry
    pub fn formatted_last_date(&self) -> String {
        let Some(last) = self.last else {
            return "No entries yet".to_string();
        };
        let today = self.clock.today();
        if last.last_date == today {
            "Today".to_string()
        } else if today.checked_sub_days(Days::new(1)) == Some(last.last_date) {
            "Yesterday".to_string()
        } else {
            last.last_date.format("%Y-%m-%d").to_string()
        }
    }

    /// Weight line, with the last digit blanked on every third poll while
    /// in input mode
    pub fn weight_text(&self) -> String {
        let mut text = format!("Weight: {:5.1}", self.pending_weight_kg());
        if self.input_mode && self.redraw.polls() % 3 == 0 {
            text.pop();
            text.push(' ');
        }
        text
    }

    pub fn variance_text(&self) -> String {
        let variance = self.last.map_or(0.0, |l| l.variance_kg);
        format!("Trend: {:5.1}", variance)
    }

    pub fn create_image(&self) -> Frame {
        if self.input_mode {
            let mut canvas = Canvas::new(Palette::LIGHT_ON_DARK);
            canvas.text(0, 0, &self.person);
            canvas.text(30, 20, &self.weight_text());
            canvas.finish()
        } else {
            let mut canvas = Canvas::new(Palette::DARK_ON_LIGHT);
            canvas.text(0, 0, &self.person);
            canvas.text(0, 14, &self.formatted_last_date());
            canvas.text(0, 28, &self.weight_text());
            canvas.text(0, 42, &self.variance_text());
            canvas.finish()
        }
    }

    fn commit(&mut self) -> Result<(), CollaboratorError> {
        let weight = self.pending_weight_kg();
        let today = self.clock.today();
        self.store
            .borrow_mut()
            .write_weight(&self.person, weight, today)?;
        log::info!("recorded {:.1} kg for {} on {}", weight, self.person, today);
        self.refresh_current_data()?;
        self.set_input_mode(false);
        Ok(())
    }
}

impl InputCapable for WeightInputScreen {
    fn input_mode(&self) -> bool {
        self.input_mode
    }

    fn set_input_mode(&mut self, mode: bool) {
        self.input_mode = mode;
    }

    fn handle_input(&mut self, event: InputEvent) -> Result<(), CollaboratorError> {
        match event {
            InputEvent::Confirm => self.commit()?,
            InputEvent::StepLeft | InputEvent::StepRight => {
                self.pending_tenths = (self.pending_tenths + i32::from(event.step_delta())).max(0);
            }
            InputEvent::AuxLeft | InputEvent::AuxRight | InputEvent::Shutdown => {
                log::debug!("weight input ignores {:?}", event);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{shared, FailingStore, FixedClock};
    use crate::traits::{MemoryWeightStore, WeightStore};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn screen_with(entries: &[(u32, f32)]) -> (WeightInputScreen, SharedWeightStore) {
        let mut memory = MemoryWeightStore::new();
        for &(d, w) in entries {
            memory.insert("Lukas", day(d), w);
        }
        let store = shared(memory);
        let clock = FixedClock::at(2024, 3, 15, 8, 0, 0);
        let screen =
            WeightInputScreen::new("Lukas", DEFAULT_WEIGHT_KG, store.clone(), clock).unwrap();
        (screen, store)
    }

    #[test]
    fn test_formatted_last_date() {
        assert_eq!(screen_with(&[(15, 80.0)]).0.formatted_last_date(), "Today");
        assert_eq!(screen_with(&[(14, 80.0)]).0.formatted_last_date(), "Yesterday");
        assert_eq!(screen_with(&[(2, 80.0)]).0.formatted_last_date(), "2024-03-02");
        assert_eq!(screen_with(&[]).0.formatted_last_date(), "No entries yet");
    }

    #[test]
    fn test_normal_mode_text() {
        let (screen, _) = screen_with(&[(1, 80.0), (2, 90.0)]);
        assert_eq!(screen.weight_text(), "Weight:  90.0");
        assert_eq!(screen.variance_text(), "Trend:   9.0");
    }

    #[test]
    fn test_defaults_without_entries() {
        let (screen, _) = screen_with(&[]);
        assert_eq!(screen.pending_weight_kg(), DEFAULT_WEIGHT_KG);
        assert!(screen.last_updates().is_none());
    }

    #[test]
    fn test_redraw_every_second_poll() {
        let (mut screen, _) = screen_with(&[(1, 80.0)]);
        for _ in 0..20 {
            let due = screen.does_need_update();
            assert_eq!(due, screen.polls() % 2 == 0);
        }
    }

    #[test]
    fn test_blink_only_in_input_mode() {
        let (mut screen, _) = screen_with(&[(1, 80.5)]);
        for _ in 0..12 {
            screen.does_need_update();
            assert_eq!(screen.weight_text(), "Weight:  80.5");
        }

        screen.set_input_mode(true);
        for _ in 0..12 {
            screen.does_need_update();
            let expected = if screen.polls() % 3 == 0 {
                "Weight:  80. "
            } else {
                "Weight:  80.5"
            };
            assert_eq!(screen.weight_text(), expected);
        }
    }

    #[test]
    fn test_steps_adjust_by_tenths() {
        let (mut screen, _) = screen_with(&[(1, 80.0)]);
        screen.set_input_mode(true);
        for _ in 0..3 {
            screen.handle_input(InputEvent::StepRight).unwrap();
        }
        screen.handle_input(InputEvent::StepLeft).unwrap();
        assert_eq!(screen.pending_weight_kg(), 80.2);
    }

    #[test]
    fn test_confirm_commits_for_today() {
        let (mut screen, store) = screen_with(&[(1, 80.0)]);
        screen.set_input_mode(true);
        screen.handle_input(InputEvent::StepLeft).unwrap();
        screen.handle_input(InputEvent::Confirm).unwrap();

        assert!(!screen.input_mode());
        assert_eq!(store.borrow_mut().read_weight("Lukas", day(15)).unwrap(), Some(79.9));
        assert_eq!(screen.formatted_last_date(), "Today");
        assert_eq!(screen.pending_weight_kg(), 79.9);
    }

    #[test]
    fn test_failed_commit_keeps_input_mode() {
        let mut failing = FailingStore::default();
        failing.inner.insert("Lukas", day(1), 80.0);
        failing.fail_writes = true;
        let store = shared(failing);
        let clock = FixedClock::at(2024, 3, 15, 8, 0, 0);
        let mut screen =
            WeightInputScreen::new("Lukas", DEFAULT_WEIGHT_KG, store.clone(), clock).unwrap();

        screen.set_input_mode(true);
        screen.handle_input(InputEvent::StepRight).unwrap();
        assert!(screen.handle_input(InputEvent::Confirm).is_err());

        assert!(screen.input_mode());
        assert_eq!(screen.pending_weight_kg(), 80.1);
        assert_eq!(store.borrow_mut().read_weight("Lukas", day(15)).unwrap(), None);
        assert_eq!(store.borrow_mut().read_weight("Lukas", day(1)).unwrap(), Some(80.0));
    }

    #[test]
    fn test_input_mode_inverts_polarity() {
        let (mut screen, _) = screen_with(&[(1, 80.0)]);
        let normal = screen.create_image();
        screen.set_input_mode(true);
        let input = screen.create_image();
        assert!(normal.lit_pixels() > input.lit_pixels());
        assert!(normal.pixel(127, 63));
        assert!(!input.pixel(127, 63));
    }
}
