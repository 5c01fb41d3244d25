//! Host frontends
//!
//! A frontend is a display backend plus an input source. The backend runs
//! inside the frontend task; the input source blocks on its own thread and
//! hands events to [`INPUT_CHANNEL`](crate::channels::INPUT_CHANNEL).

pub mod headless;
pub mod input;
pub mod terminal;

use std::io;
use std::thread;

use log::{info, warn};
use weightloss_display::{DisplayBackend, InputSource};
use weightloss_protocol::InputEvent;

use crate::channels::INPUT_CHANNEL;
use crate::config::FrontendKind;

pub use headless::HeadlessBackend;
pub use input::{KeyboardInput, LineInput};
pub use terminal::{restore_terminal, TerminalBackend};

/// Open the display backend for `kind`
pub fn open_backend(kind: FrontendKind) -> io::Result<Box<dyn DisplayBackend>> {
    Ok(match kind {
        FrontendKind::Terminal => Box::new(TerminalBackend::open()?),
        FrontendKind::Headless => Box::new(HeadlessBackend::default()),
    })
}

/// Start the input thread matching `kind`
pub fn spawn_input(kind: FrontendKind) -> io::Result<()> {
    thread::Builder::new()
        .name("input".into())
        .spawn(move || match kind {
            FrontendKind::Terminal => forward_input(KeyboardInput),
            // stdin's lock is not Send, so take it on the input thread
            FrontendKind::Headless => forward_input(LineInput::new(io::stdin().lock())),
        })?;
    Ok(())
}

/// Forward events until the source ends, then ask for shutdown
fn forward_input<S: InputSource>(mut source: S) {
    info!("input thread started");
    loop {
        match source.next_event() {
            Ok(Some(InputEvent::Shutdown)) | Ok(None) => break,
            Ok(Some(event)) => {
                if INPUT_CHANNEL.try_send(event).is_err() {
                    warn!("input channel full, dropping {:?}", event);
                }
            }
            Err(e) => {
                warn!("input source failed: {}", e);
                break;
            }
        }
    }
    info!("requesting shutdown");
    while INPUT_CHANNEL.try_send(InputEvent::Shutdown).is_err() {
        thread::sleep(std::time::Duration::from_millis(10));
    }
}
