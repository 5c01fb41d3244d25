//! Input events from the frontend

/// Input event values sent from the frontend to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Step left (encoder counter-clockwise, `<` button)
    StepLeft,
    /// Step right (encoder clockwise, `>` button)
    StepRight,
    /// Confirm (encoder push, `*` button)
    Confirm,
    /// Auxiliary left button (B1)
    AuxLeft,
    /// Auxiliary right button (B2)
    AuxRight,
    /// Frontend is closing, controller must terminate
    Shutdown,
}

// Wire format values
const EVENT_STEP_LEFT: u8 = 0x01;
const EVENT_STEP_RIGHT: u8 = 0x02;
const EVENT_CONFIRM: u8 = 0x10;
const EVENT_AUX_LEFT: u8 = 0x11;
const EVENT_AUX_RIGHT: u8 = 0x12;
const EVENT_SHUTDOWN: u8 = 0x7F;

impl InputEvent {
    /// Parse an event from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            EVENT_STEP_LEFT => Some(InputEvent::StepLeft),
            EVENT_STEP_RIGHT => Some(InputEvent::StepRight),
            EVENT_CONFIRM => Some(InputEvent::Confirm),
            EVENT_AUX_LEFT => Some(InputEvent::AuxLeft),
            EVENT_AUX_RIGHT => Some(InputEvent::AuxRight),
            EVENT_SHUTDOWN => Some(InputEvent::Shutdown),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            InputEvent::StepLeft => EVENT_STEP_LEFT,
            InputEvent::StepRight => EVENT_STEP_RIGHT,
            InputEvent::Confirm => EVENT_CONFIRM,
            InputEvent::AuxLeft => EVENT_AUX_LEFT,
            InputEvent::AuxRight => EVENT_AUX_RIGHT,
            InputEvent::Shutdown => EVENT_SHUTDOWN,
        }
    }

    /// Returns the step direction as a signed delta (-1, 0, or +1)
    pub fn step_delta(&self) -> i8 {
        match self {
            InputEvent::StepRight => 1,
            InputEvent::StepLeft => -1,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_bytes_are_distinct() {
        let events = [
            InputEvent::StepLeft,
            InputEvent::StepRight,
            InputEvent::Confirm,
            InputEvent::AuxLeft,
            InputEvent::AuxRight,
            InputEvent::Shutdown,
        ];

        for event in events {
            assert_eq!(InputEvent::from_byte(event.to_byte()), Some(event));
        }
    }

    #[test]
    fn test_step_delta() {
        assert_eq!(InputEvent::StepRight.step_delta(), 1);
        assert_eq!(InputEvent::StepLeft.step_delta(), -1);
        assert_eq!(InputEvent::Confirm.step_delta(), 0);
    }

    #[test]
    fn test_unknown_event() {
        assert!(InputEvent::from_byte(0xFF).is_none());
        assert!(InputEvent::from_byte(0x00).is_none());
    }
}
