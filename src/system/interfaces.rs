//! Local network interface enumeration.
//!
//! [`InterfaceSource`] is the only seam to the operating system; resolver and
//! calculator are generic over it so they can run against [`StaticInterfaces`].

use crate::error::{Result, TerminusError};
use crate::models::{InterfaceAddr, InterfaceBinding};
use colored::Colorize;
use if_addrs::IfAddr;
use std::net::IpAddr;

/// Something that can list the host's interfaces.
pub trait InterfaceSource {
    /// Snapshot of all interfaces, in platform enumeration order, one
    /// binding per interface name.
    fn list_interfaces(&self) -> Result<Vec<InterfaceBinding>>;
}

/// Interfaces of the running host, read through `getifaddrs` or its
/// platform equivalent.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemInterfaces;

impl InterfaceSource for SystemInterfaces {
    fn list_interfaces(&self) -> Result<Vec<InterfaceBinding>> {
        let addrs =
            if_addrs::get_if_addrs().map_err(|source| TerminusError::InterfaceList { source })?;
        log::trace!("get_if_addrs() returned {} addresses", addrs.len());

        let bindings = group_by_name(addrs.into_iter().map(|iface| {
            let addr = match iface.addr {
                IfAddr::V4(v4) => InterfaceAddr {
                    ip: IpAddr::V4(v4.ip),
                    netmask: IpAddr::V4(v4.netmask),
                },
                IfAddr::V6(v6) => InterfaceAddr {
                    ip: IpAddr::V6(v6.ip),
                    netmask: IpAddr::V6(v6.netmask),
                },
            };
            (iface.name, addr)
        }));

        for binding in &bindings {
            log::debug!(
                "interface {name}: {count} address(es)",
                name = binding.name.on_blue(),
                count = binding.addrs.len()
            );
        }
        Ok(bindings)
    }
}

/// Fixed interface list, for tests and embedders that already know their
/// interfaces.
#[derive(Debug, Default, Clone)]
pub struct StaticInterfaces {
    pub interfaces: Vec<InterfaceBinding>,
}

impl StaticInterfaces {
    pub fn new(interfaces: Vec<InterfaceBinding>) -> StaticInterfaces {
        StaticInterfaces { interfaces }
    }
}

impl InterfaceSource for StaticInterfaces {
    fn list_interfaces(&self) -> Result<Vec<InterfaceBinding>> {
        Ok(self.interfaces.clone())
    }
}

/// Fold a flat (name, address) list into one binding per interface.
///
/// Interfaces keep the order of their first appearance, addresses keep
/// their original order.
pub fn group_by_name<I>(addrs: I) -> Vec<InterfaceBinding>
where
    I: IntoIterator<Item = (String, InterfaceAddr)>,
{
    let mut bindings: Vec<InterfaceBinding> = Vec::new();
    for (name, addr) in addrs {
        match bindings.iter_mut().find(|b| b.name == name) {
            Some(binding) => binding.addrs.push(addr),
            None => bindings.push(InterfaceBinding {
                name,
                addrs: vec![addr],
            }),
        }
    }
    bindings
}

/// Look up one interface by exact name.
pub fn find_interface<S: InterfaceSource>(name: &str, source: &S) -> Result<InterfaceBinding> {
    source
        .list_interfaces()?
        .into_iter()
        .find(|b| b.name == name)
        .ok_or_else(|| TerminusError::InterfaceNotFound {
            name: name.to_string(),
        })
}
