//! Input source trait

use weightloss_protocol::InputEvent;

use crate::backend::DisplayError;

/// Producer of input events
///
/// Sources block until the user acts, so they run on their own thread (or
/// interrupt context) and forward events to the frontend.
pub trait InputSource {
    /// Wait for the next event
    ///
    /// Returns `Ok(None)` once the source is exhausted, e.g. end of file on
    /// a line reader.
    fn next_event(&mut self) -> Result<Option<InputEvent>, DisplayError>;
}
