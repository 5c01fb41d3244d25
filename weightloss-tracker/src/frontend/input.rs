//! Input sources for the host frontends

use std::io::BufRead;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::warn;

use weightloss_display::{DisplayError, InputSource};
use weightloss_protocol::InputEvent;

/// Event for a key press, `None` for keys without a binding
pub fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Shutdown)
        }
        KeyCode::Left | KeyCode::Char('a') => Some(InputEvent::StepLeft),
        KeyCode::Right | KeyCode::Char('d') => Some(InputEvent::StepRight),
        KeyCode::Enter | KeyCode::Char(' ') => Some(InputEvent::Confirm),
        KeyCode::Char(',') => Some(InputEvent::AuxLeft),
        KeyCode::Char('.') => Some(InputEvent::AuxRight),
        KeyCode::Esc | KeyCode::Char('q') => Some(InputEvent::Shutdown),
        _ => None,
    }
}

/// Event for one line of the line protocol
pub fn parse_command(line: &str) -> Option<InputEvent> {
    match line.trim().to_ascii_lowercase().as_str() {
        "left" => Some(InputEvent::StepLeft),
        "right" => Some(InputEvent::StepRight),
        "confirm" => Some(InputEvent::Confirm),
        "aux-left" => Some(InputEvent::AuxLeft),
        "aux-right" => Some(InputEvent::AuxRight),
        "quit" => Some(InputEvent::Shutdown),
        _ => None,
    }
}

/// Keys of the controlling terminal (raw mode)
#[derive(Debug, Default)]
pub struct KeyboardInput;

impl InputSource for KeyboardInput {
    fn next_event(&mut self) -> Result<Option<InputEvent>, DisplayError> {
        loop {
            if let Event::Key(key) = event::read().map_err(|_| DisplayError::Communication)? {
                if let Some(input) = map_key(key) {
                    return Ok(Some(input));
                }
            }
        }
    }
}

/// One command per line, for scripted or piped input
pub struct LineInput<R> {
    reader: R,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> InputSource for LineInput<R> {
    fn next_event(&mut self) -> Result<Option<InputEvent>, DisplayError> {
        let mut line = String::new();
        loop {
            line.clear();
            let read = self
                .reader
                .read_line(&mut line)
                .map_err(|_| DisplayError::Communication)?;
            if read == 0 {
                return Ok(None);
            }
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Some(event) => return Ok(Some(event)),
                None => warn!("unknown command {:?}", line.trim()),
            }
        }
    }
}
