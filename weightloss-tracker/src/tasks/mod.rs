//! Embassy async tasks
//!
//! The controller and frontend tasks run on the same executor and talk
//! only through the byte pipes in [`crate::channels`].

pub mod controller;
pub mod frontend;

pub use controller::controller_task;
pub use frontend::frontend_task;
