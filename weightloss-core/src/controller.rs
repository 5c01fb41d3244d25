//! Screen-cycling controller
//!
//! The controller is the central brain that:
//! - Owns the screen list and the active screen index
//! - Decides each tick whether the active screen is redrawn
//! - Runs the single LED pattern
//! - Routes input events to navigation or to the active screen
//!
//! It performs no I/O. Messages for the frontend are queued in an outbox
//! that the controller task drains after every tick.

use alloc::collections::vec_deque::{Drain, VecDeque};
use alloc::vec::Vec;

use weightloss_protocol::{ControllerMessage, FrontendMessage, InputEvent};

use crate::config::ControllerSettings;
use crate::led::LedPattern;
use crate::registry::ScreenKind;
use crate::screens::Screen;
use crate::traits::CollaboratorError;

/// Whether the controller loop keeps running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Flow {
    Continue,
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ControllerError {
    #[error("no screens configured")]
    NoScreens,
    #[error("{screen:?} screen failed: {source}")]
    Screen {
        screen: ScreenKind,
        #[source]
        source: CollaboratorError,
    },
}

/// Controller state
pub struct Controller {
    /// Cycling order of the screens
    screens: Vec<Screen>,
    /// Active screen, chosen lazily from the settings
    active: Option<usize>,
    settings: ControllerSettings,
    /// The one running LED pattern, if any
    led_pattern: Option<LedPattern>,
    outbox: VecDeque<ControllerMessage>,
}

impl Controller {
    pub fn new(
        screens: Vec<Screen>,
        settings: ControllerSettings,
    ) -> Result<Self, ControllerError> {
        if screens.is_empty() {
            return Err(ControllerError::NoScreens);
        }
        Ok(Self {
            screens,
            active: None,
            settings,
            led_pattern: None,
            outbox: VecDeque::new(),
        })
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    /// Index of the active screen
    pub fn current_index(&self) -> usize {
        self.active
            .unwrap_or(self.settings.default_screen % self.screens.len())
    }

    /// The active screen; the first call settles on the default screen
    pub fn get_current_screen(&mut self) -> &mut Screen {
        let index = self.current_index();
        self.active = Some(index);
        &mut self.screens[index]
    }

    /// Move `delta` screens forward, wrapping at both ends, and show the new
    /// screen immediately
    pub fn switch_current_screen(&mut self, delta: i32) -> Result<(), ControllerError> {
        let last = self.screens.len() as i32 - 1;
        let mut index = self.current_index() as i32 + delta;
        if index < 0 {
            index = last;
        } else if index > last {
            index = 0;
        }
        self.active = Some(index as usize);
        self.stop_led_pattern();

        let screen = &mut self.screens[index as usize];
        let kind = screen.kind();
        log::debug!("switched to screen {} ({})", index, kind.type_name());
        screen
            .activate()
            .map_err(|source| ControllerError::Screen { screen: kind, source })?;

        self.send_current_frame();
        Ok(())
    }

    pub fn is_led_pattern_set(&self) -> bool {
        self.led_pattern.is_some()
    }

    /// Install `pattern`, replacing any running one
    pub fn set_led_pattern(&mut self, pattern: LedPattern) {
        log::debug!("led pattern {:?} installed", pattern.kind());
        self.led_pattern = Some(pattern);
    }

    pub fn led_pattern(&self) -> Option<&LedPattern> {
        self.led_pattern.as_ref()
    }

    /// One controller loop iteration
    ///
    /// `now_ms` is the time since the controller started.
    pub fn tick(
        &mut self,
        now_ms: u64,
        inbound: Option<FrontendMessage>,
    ) -> Result<Flow, ControllerError> {
        self.refresh(now_ms);
        match inbound {
            Some(message) => self.handle_message(message),
            None => Ok(Flow::Continue),
        }
    }

    /// Redraw the active screen and advance the LED pattern when due
    pub fn refresh(&mut self, now_ms: u64) {
        let screen = self.get_current_screen();
        let preferred = screen.preferred_led_pattern();
        let due = screen.does_need_update();

        if let (false, Some(kind)) = (self.is_led_pattern_set(), preferred) {
            self.set_led_pattern(LedPattern::start(kind, now_ms));
        }

        if due {
            self.send_current_frame();
            if let Some(leds) = self.get_current_screen().create_led_pattern() {
                self.outbox.push_back(ControllerMessage::Leds(leds));
            }
        }

        if let Some(pattern) = self.led_pattern.as_mut() {
            if pattern.does_need_update(now_ms) {
                let leds = pattern.create_led_pattern();
                self.outbox.push_back(ControllerMessage::Leds(leds));
            }
        }
    }

    /// Apply one message from the frontend
    pub fn handle_message(&mut self, message: FrontendMessage) -> Result<Flow, ControllerError> {
        match message {
            FrontendMessage::Input(event) => self.handle_event(event),
        }
    }

    fn handle_event(&mut self, event: InputEvent) -> Result<Flow, ControllerError> {
        if event == InputEvent::Shutdown {
            log::info!("shutdown requested");
            self.shutdown();
            return Ok(Flow::Shutdown);
        }

        let screen = self.get_current_screen();
        let kind = screen.kind();
        if let Some(input) = screen.as_input_mut() {
            if input.input_mode() {
                input
                    .handle_input(event)
                    .map_err(|source| ControllerError::Screen { screen: kind, source })?;
                return Ok(Flow::Continue);
            }
        }

        match event {
            InputEvent::StepLeft | InputEvent::StepRight => {
                self.switch_current_screen(i32::from(event.step_delta()))?;
            }
            InputEvent::Confirm => match self.get_current_screen().as_input_mut() {
                Some(input) => {
                    let mode = !input.input_mode();
                    input.set_input_mode(mode);
                    log::debug!("input mode {}", if mode { "on" } else { "off" });
                }
                None => log::debug!("{} takes no input", kind.type_name()),
            },
            InputEvent::AuxLeft | InputEvent::AuxRight => {
                log::debug!("ignoring {:?}", event);
            }
            InputEvent::Shutdown => {}
        }
        Ok(Flow::Continue)
    }

    /// Stop the LED pattern and queue its final frame
    pub fn shutdown(&mut self) {
        self.stop_led_pattern();
    }

    /// Take every queued message, oldest first
    pub fn drain_outbox(&mut self) -> Drain<'_, ControllerMessage> {
        self.outbox.drain(..)
    }

    fn stop_led_pattern(&mut self) {
        if let Some(mut pattern) = self.led_pattern.take() {
            pattern.stop();
            self.outbox
                .push_back(ControllerMessage::Leds(pattern.end_led_pattern()));
        }
    }

    fn send_current_frame(&mut self) {
        let rotate = self.settings.rotate_screen;
        let frame = self.get_current_screen().create_image();
        let frame = if rotate { frame.rotated_180() } else { frame };
        log::trace!("frame {:08x}", frame.digest());
        self.outbox.push_back(ControllerMessage::Frame(frame));
    }
}
