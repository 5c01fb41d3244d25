//! Terminal preview frontend
//!
//! Draws frames as half-block characters in the alternate screen and the
//! LED strip as a row of colored dots below them.

use std::io::{self, ErrorKind, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};

use weightloss_display::{preview_row, DisplayBackend, DisplayError, PREVIEW_ROWS};
use weightloss_protocol::{Frame, LedFrame};

/// Set while the terminal is in raw mode
static ACTIVE: AtomicBool = AtomicBool::new(false);

const LED_ROW: u16 = PREVIEW_ROWS as u16 + 1;
const HELP_ROW: u16 = LED_ROW + 2;
const HELP: &str = "<-/a  ->/d  step   enter/space  confirm   , .  aux   q  quit";

/// Writes to a hung-up terminal report `Closed`
fn display_error(e: io::Error) -> DisplayError {
    match e.kind() {
        ErrorKind::BrokenPipe | ErrorKind::WriteZero => DisplayError::Closed,
        _ => DisplayError::Communication,
    }
}

pub struct TerminalBackend<W: Write = Stdout> {
    out: W,
}

impl TerminalBackend<Stdout> {
    /// Switch the terminal to raw mode and the alternate screen
    pub fn open() -> io::Result<Self> {
        enable_raw_mode()?;
        ACTIVE.store(true, Ordering::SeqCst);
        let mut backend = Self::with_writer(io::stdout());
        execute!(backend.out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        queue!(backend.out, MoveTo(0, HELP_ROW), Print(HELP))?;
        backend.out.flush()?;
        Ok(backend)
    }
}

impl<W: Write> TerminalBackend<W> {
    fn with_writer(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> DisplayBackend for TerminalBackend<W> {
    fn show_frame(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        for row in 0..PREVIEW_ROWS {
            queue!(
                self.out,
                MoveTo(0, row as u16),
                Print(preview_row(frame, row).as_str())
            )
            .map_err(display_error)?;
        }
        Ok(())
    }

    fn show_leds(&mut self, leds: &LedFrame) -> Result<(), DisplayError> {
        queue!(self.out, MoveTo(0, LED_ROW)).map_err(display_error)?;
        for color in leds.colors() {
            let glyph = if color.is_off() { "○ " } else { "● " };
            queue!(
                self.out,
                SetForegroundColor(Color::Rgb {
                    r: color.r,
                    g: color.g,
                    b: color.b,
                }),
                Print(glyph)
            )
            .map_err(display_error)?;
        }
        queue!(self.out, ResetColor).map_err(display_error)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.out.flush().map_err(display_error)
    }
}

/// Leave raw mode and the alternate screen, if the terminal backend entered
/// them
pub fn restore_terminal() {
    if ACTIVE.swap(false, Ordering::SeqCst) {
        let _ = execute!(io::stdout(), ResetColor, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}
