//! Network interface snapshot model.

use std::net::{IpAddr, Ipv4Addr};

/// One address bound to an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceAddr {
    pub ip: IpAddr,
    pub netmask: IpAddr,
}

/// A local interface and its addresses, in platform enumeration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceBinding {
    /// Interface name (e.g. "eth0", "lo0").
    pub name: String,
    pub addrs: Vec<InterfaceAddr>,
}

impl InterfaceBinding {
    /// Create a binding without addresses.
    pub fn new(name: &str) -> InterfaceBinding {
        InterfaceBinding {
            name: name.to_string(),
            addrs: vec![],
        }
    }

    /// Append an address (builder style).
    pub fn with_addr(mut self, ip: impl Into<IpAddr>, netmask: impl Into<IpAddr>) -> Self {
        self.addrs.push(InterfaceAddr {
            ip: ip.into(),
            netmask: netmask.into(),
        });
        self
    }

    /// First IPv4 address and its netmask; IPv6 entries are skipped.
    pub fn first_ipv4(&self) -> Option<(Ipv4Addr, Ipv4Addr)> {
        self.addrs.iter().find_map(|a| match (a.ip, a.netmask) {
            (IpAddr::V4(ip), IpAddr::V4(netmask)) => Some((ip, netmask)),
            _ => None,
        })
    }

    /// Whether `ip` is bound to this interface.
    pub fn has_addr(&self, ip: Ipv4Addr) -> bool {
        self.addrs.iter().any(|a| a.ip == IpAddr::V4(ip))
    }
}
