//! Host network identity

use alloc::rc::Rc;
use alloc::string::String;

/// Network identity of the machine running the controller
pub trait HostInfo {
    /// Primary IPv4 address, dotted quad
    fn ip_address(&self) -> String;

    fn hostname(&self) -> String;
}

pub type SharedHostInfo = Rc<dyn HostInfo>;
