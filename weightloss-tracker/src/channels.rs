//! Inter-task communication channels
//!
//! The controller and frontend tasks share nothing but the two byte pipes.
//! Input events cross from the OS input thread through a bounded channel.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::pipe::Pipe;
use embassy_sync::signal::Signal;

use weightloss_protocol::{InputEvent, MAX_PACKET_SIZE};

/// Room for a few full frames in flight
pub const FRONTEND_PIPE_SIZE: usize = MAX_PACKET_SIZE * 4;

/// Input packets are tiny
pub const CONTROLLER_PIPE_SIZE: usize = 64;

/// Channel capacity for input events from the input thread
const INPUT_CHANNEL_SIZE: usize = 8;

pub type FrontendPipe = Pipe<CriticalSectionRawMutex, FRONTEND_PIPE_SIZE>;
pub type ControllerPipe = Pipe<CriticalSectionRawMutex, CONTROLLER_PIPE_SIZE>;
pub type InputChannel = Channel<CriticalSectionRawMutex, InputEvent, INPUT_CHANNEL_SIZE>;

/// Controller → frontend bytes (frames, LED colors)
pub static TO_FRONTEND: FrontendPipe = Pipe::new();

/// Frontend → controller bytes (input events)
pub static TO_CONTROLLER: ControllerPipe = Pipe::new();

/// Input events from the keyboard or stdin reader
pub static INPUT_CHANNEL: InputChannel = Channel::new();

/// Raised once by whichever task ends the run
pub static APP_EXIT: Signal<CriticalSectionRawMutex, ExitReason> = Signal::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Shutdown requested by the user
    Shutdown,
    ControllerFailed,
    FrontendFailed,
}

impl ExitReason {
    /// Process exit code
    pub fn code(self) -> i32 {
        match self {
            ExitReason::Shutdown => 0,
            ExitReason::ControllerFailed => 1,
            ExitReason::FrontendFailed => 2,
        }
    }
}
