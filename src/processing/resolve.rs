//! Argument resolution.
//!
//! Turns a command-line argument (bare address, CIDR or interface name) into
//! an address and prefix length.

use crate::error::{Result, TerminusError};
use crate::models::{default_class_prefix, prefix_from_mask, InterfaceBinding, Ipv4Cidr};
use crate::system::{find_interface, InterfaceSource};
use colored::Colorize;
use std::net::Ipv4Addr;

/// Resolve an argument to an address and prefix length.
///
/// Precedence:
/// 1. bare address, with the classful default prefix (10.0.0.138 -> /8)
/// 2. `address/prefix`
/// 3. interface name, using its first IPv4 address
pub fn resolve<S: InterfaceSource>(arg: &str, source: &S) -> Result<Ipv4Cidr> {
    log::debug!("resolve({arg})", arg = arg.on_blue());

    if let Ok(addr) = arg.parse::<Ipv4Addr>() {
        let prefix = default_class_prefix(addr);
        log::debug!("{arg} is a bare address, classful prefix /{prefix}");
        return Ok(Ipv4Cidr { addr, prefix });
    }

    if arg.contains('/') {
        let cidr = arg.parse::<Ipv4Cidr>()?;
        log::debug!("{arg} is a CIDR");
        return Ok(cidr);
    }

    check_interface_name(arg)?;
    interface_addr(arg, source)
}

/// First IPv4 address of the named interface, with the interface's prefix.
pub fn interface_addr<S: InterfaceSource>(name: &str, source: &S) -> Result<Ipv4Cidr> {
    binding_addr(&find_interface(name, source)?)
}

/// First IPv4 address of an interface snapshot, with its prefix.
pub fn binding_addr(binding: &InterfaceBinding) -> Result<Ipv4Cidr> {
    let (addr, netmask) = binding
        .first_ipv4()
        .ok_or_else(|| TerminusError::NoIpv4Address {
            name: binding.name.clone(),
        })?;
    let prefix = prefix_from_mask(netmask)?;
    log::debug!(
        "interface {name} has {addr}/{prefix}",
        name = binding.name.on_blue()
    );
    Ok(Ipv4Cidr { addr, prefix })
}

fn check_interface_name(arg: &str) -> Result<()> {
    if arg.is_empty() {
        return Err(TerminusError::invalid_format(
            arg,
            "invalid network interface name",
        ));
    }
    if arg.chars().any(char::is_control) {
        return Err(TerminusError::invalid_format(
            arg,
            "network interface name contains control characters",
        ));
    }
    Ok(())
}
