//! Host network identity

use std::env;
use std::fs;
use std::net::{IpAddr, Ipv4Addr, UdpSocket};

use log::warn;

use weightloss_core::HostInfo;

/// Any routable address works; no packet is sent
const PROBE_ADDR: &str = "192.0.2.1:80";

const HOSTNAME_FILE: &str = "/proc/sys/kernel/hostname";

/// Identity of the machine this process runs on
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHost;

/// Address of the interface that routes to the outside world
fn outbound_ip() -> std::io::Result<IpAddr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    socket.connect(PROBE_ADDR)?;
    Ok(socket.local_addr()?.ip())
}

impl HostInfo for SystemHost {
    fn ip_address(&self) -> String {
        match outbound_ip() {
            Ok(ip) => ip.to_string(),
            Err(e) => {
                warn!("no routable address: {}", e);
                Ipv4Addr::LOCALHOST.to_string()
            }
        }
    }

    fn hostname(&self) -> String {
        fs::read_to_string(HOSTNAME_FILE)
            .ok()
            .or_else(|| env::var("HOSTNAME").ok())
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "localhost".to_string())
    }
}
