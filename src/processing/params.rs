//! Subnet parameter derivation.
//!
//! Computes every property of a subnet from an address and prefix length and
//! attaches the owning interface name.

use crate::config;
use crate::error::Result;
use crate::models::{
    broadcast_addr, get_cidr_mask, network_addr, subnet_size, usable_hosts, wildcard_mask,
    InterfaceBinding, Ipv4Cidr, Params, SubnetRecord, MAX_LENGTH,
};
use crate::processing::resolve::binding_addr;
use crate::system::InterfaceSource;
use colored::Colorize;
use serde_json::Value;
use std::net::Ipv4Addr;

/// Derive the record for `cidr`, naming the interface it belongs to.
///
/// `source_name` is the argument the address was resolved from. When it is
/// the address itself (with or without a `/prefix`), the interface owning
/// the address is looked up; otherwise it was an interface name and is used
/// as is.
pub fn derive_record<S: InterfaceSource>(
    source_name: &str,
    cidr: Ipv4Cidr,
    source: &S,
) -> Result<SubnetRecord> {
    let mut record = calculate(cidr.addr, cidr.prefix)?;
    record.name = interface_name(source_name, cidr.addr, source);
    log::debug!(
        "derived {cidr} name='{name}' network={network} broadcast={broadcast}",
        name = record.name,
        network = record.network,
        broadcast = record.broadcast
    );
    Ok(record)
}

/// Pure subnet arithmetic; the name is left empty.
///
/// /31 and /32 reserve no network or broadcast address, so first and last
/// are the network and broadcast addresses themselves.
pub fn calculate(addr: Ipv4Addr, prefix: u8) -> Result<SubnetRecord> {
    let netmask = Ipv4Addr::from(get_cidr_mask(prefix)?);
    let network = network_addr(addr, prefix)?;
    let broadcast = broadcast_addr(addr, prefix)?;

    let (first, last) = if prefix < MAX_LENGTH - 1 {
        (
            Ipv4Addr::from(u32::from(network) + 1),
            Ipv4Addr::from(u32::from(broadcast) - 1),
        )
    } else {
        (network, broadcast)
    };

    Ok(SubnetRecord {
        broadcast,
        first,
        ip: addr,
        last,
        name: String::new(),
        netmask,
        network,
        prefix,
        size: subnet_size(prefix)?,
        usable: usable_hosts(prefix)?,
        version: config::IP_VERSION,
        wildcard: wildcard_mask(prefix)?,
    })
}

/// Name of the interface for a resolved argument.
pub fn interface_name<S: InterfaceSource>(source_name: &str, addr: Ipv4Addr, source: &S) -> String {
    let bare = source_name
        .split_once('/')
        .map_or(source_name, |(addr, _)| addr);
    if bare == addr.to_string() {
        find_interface_name(addr, source)
    } else {
        source_name.to_string()
    }
}

/// Reverse lookup: the first interface that has `addr` bound.
///
/// Enumeration failures yield an empty name, the name is informational.
pub fn find_interface_name<S: InterfaceSource>(addr: Ipv4Addr, source: &S) -> String {
    match source.list_interfaces() {
        Ok(interfaces) => interfaces
            .into_iter()
            .find(|i| i.has_addr(addr))
            .map(|i| i.name)
            .unwrap_or_default(),
        Err(e) => {
            log::warn!(
                "reverse lookup of {addr} failed: {e}",
                addr = addr.to_string().on_blue()
            );
            String::new()
        }
    }
}

/// Record of an interface snapshot, named after the interface.
pub fn binding_record(binding: &InterfaceBinding) -> Result<SubnetRecord> {
    let cidr = binding_addr(binding)?;
    let mut record = calculate(cidr.addr, cidr.prefix)?;
    record.name = binding.name.clone();
    Ok(record)
}

/// Params of every interface that has an IPv4 address, keyed by name.
///
/// Backs the `.interfaces` template key.
pub fn interface_params<S: InterfaceSource>(source: &S) -> Result<Params> {
    let mut by_name = Params::new();
    for binding in &source.list_interfaces()? {
        match binding_record(binding) {
            Ok(record) => {
                by_name.insert(binding.name.clone(), Value::Object(record.to_params()?));
            }
            Err(e) => log::debug!("skipping interface {}: {e}", binding.name),
        }
    }
    Ok(by_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TerminusError;
    use crate::system::StaticInterfaces;
    use std::net::Ipv6Addr;

    struct FailingInterfaces;

    impl InterfaceSource for FailingInterfaces {
        fn list_interfaces(&self) -> Result<Vec<InterfaceBinding>> {
            Err(TerminusError::InterfaceList {
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
        }
    }

    fn source() -> StaticInterfaces {
        StaticInterfaces::new(vec![
            InterfaceBinding::new("lo").with_addr(Ipv4Addr::LOCALHOST, Ipv4Addr::new(255, 0, 0, 0)),
            InterfaceBinding::new("eth0")
                .with_addr(Ipv6Addr::LOCALHOST, Ipv6Addr::LOCALHOST)
                .with_addr(Ipv4Addr::new(192, 168, 0, 1), Ipv4Addr::new(255, 255, 255, 0)),
            InterfaceBinding::new("tun6").with_addr(Ipv6Addr::LOCALHOST, Ipv6Addr::LOCALHOST),
        ])
    }

    #[test]
    fn test_calculate_slash_24() {
        let r = calculate(Ipv4Addr::new(192, 168, 0, 1), 24).unwrap();
        assert_eq!(r.ip, Ipv4Addr::new(192, 168, 0, 1));
        assert_eq!(r.netmask, Ipv4Addr::new(255, 255, 255, 0));
        assert_eq!(r.prefix, 24);
        assert_eq!(r.wildcard, Ipv4Addr::new(0, 0, 0, 255));
        assert_eq!(r.network, Ipv4Addr::new(192, 168, 0, 0));
        assert_eq!(r.broadcast, Ipv4Addr::new(192, 168, 0, 255));
        assert_eq!(r.first, Ipv4Addr::new(192, 168, 0, 1));
        assert_eq!(r.last, Ipv4Addr::new(192, 168, 0, 254));
        assert_eq!(r.size, 256);
        assert_eq!(r.usable, 254);
        assert_eq!(r.version, 4);
        assert_eq!(r.name, "");
    }

    #[test]
    fn test_calculate_slash_8() {
        let r = calculate(Ipv4Addr::new(127, 255, 255, 255), 8).unwrap();
        assert_eq!(r.network, Ipv4Addr::new(127, 0, 0, 0));
        assert_eq!(r.broadcast, Ipv4Addr::new(127, 255, 255, 255));
        assert_eq!(r.first, Ipv4Addr::new(127, 0, 0, 1));
        assert_eq!(r.last, Ipv4Addr::new(127, 255, 255, 254));
        assert_eq!(r.netmask, Ipv4Addr::new(255, 0, 0, 0));
        assert_eq!(r.wildcard, Ipv4Addr::new(0, 255, 255, 255));
        assert_eq!(r.size, 1 << 24);
        assert_eq!(r.usable, (1 << 24) - 2);
    }

    #[test]
    fn test_calculate_slash_31() {
        let r = calculate(Ipv4Addr::new(10, 0, 0, 7), 31).unwrap();
        assert_eq!(r.network, Ipv4Addr::new(10, 0, 0, 6));
        assert_eq!(r.broadcast, Ipv4Addr::new(10, 0, 0, 7));
        assert_eq!(r.first, r.network);
        assert_eq!(r.last, r.broadcast);
        assert_eq!(r.size, 2);
        assert_eq!(r.usable, 2);
    }

    #[test]
    fn test_calculate_slash_32() {
        let addr = Ipv4Addr::new(10, 0, 0, 7);
        let r = calculate(addr, 32).unwrap();
        assert_eq!(r.network, addr);
        assert_eq!(r.broadcast, addr);
        assert_eq!(r.first, addr);
        assert_eq!(r.last, addr);
        assert_eq!(r.size, 1);
        assert_eq!(r.usable, 1);
        assert_eq!(r.wildcard, Ipv4Addr::UNSPECIFIED);
    }

    #[test]
    fn test_calculate_slash_0() {
        let r = calculate(Ipv4Addr::new(10, 0, 0, 7), 0).unwrap();
        assert_eq!(r.network, Ipv4Addr::UNSPECIFIED);
        assert_eq!(r.broadcast, Ipv4Addr::BROADCAST);
        assert_eq!(r.first, Ipv4Addr::new(0, 0, 0, 1));
        assert_eq!(r.last, Ipv4Addr::new(255, 255, 255, 254));
        assert_eq!(r.size, 1 << 32);
        assert_eq!(r.usable, (1 << 32) - 2);
    }

    #[test]
    fn test_calculate_invariants() {
        let addrs = [
            Ipv4Addr::new(0, 0, 0, 0),
            Ipv4Addr::new(10, 20, 30, 40),
            Ipv4Addr::new(172, 31, 255, 1),
            Ipv4Addr::new(255, 255, 255, 255),
        ];
        for addr in addrs {
            for prefix in 0..=MAX_LENGTH {
                let r = calculate(addr, prefix).unwrap();
                let network = u32::from(r.network);
                let wildcard = u32::from(r.wildcard);
                assert_eq!(network & wildcard, 0, "{addr}/{prefix}");
                assert_eq!(network | wildcard, u32::from(r.broadcast), "{addr}/{prefix}");
                assert_eq!(u32::from(r.netmask), !wildcard, "{addr}/{prefix}");
                if prefix <= 30 {
                    assert_eq!(r.size, 1u64 << (32 - prefix), "{addr}/{prefix}");
                    assert_eq!(r.usable, r.size - 2, "{addr}/{prefix}");
                }
                assert_eq!(calculate(addr, prefix).unwrap(), r, "not idempotent");
            }
        }
    }

    #[test]
    fn test_calculate_rejects_long_prefix() {
        assert!(calculate(Ipv4Addr::LOCALHOST, 33).is_err());
    }

    #[test]
    fn test_derive_record_passes_interface_name_through() {
        let cidr = Ipv4Cidr {
            addr: Ipv4Addr::new(192, 168, 0, 1),
            prefix: 24,
        };
        let r = derive_record("eth0", cidr, &FailingInterfaces).unwrap();
        assert_eq!(r.name, "eth0");
        assert_eq!(r.network, Ipv4Addr::new(192, 168, 0, 0));
    }

    #[test]
    fn test_derive_record_reverse_lookup() {
        let cidr = Ipv4Cidr {
            addr: Ipv4Addr::new(192, 168, 0, 1),
            prefix: 24,
        };
        assert_eq!(derive_record("192.168.0.1", cidr, &source()).unwrap().name, "eth0");
        assert_eq!(derive_record("192.168.0.1/24", cidr, &source()).unwrap().name, "eth0");

        let cidr = Ipv4Cidr {
            addr: Ipv4Addr::new(192, 168, 0, 2),
            prefix: 24,
        };
        assert_eq!(derive_record("192.168.0.2", cidr, &source()).unwrap().name, "");
    }

    #[test]
    fn test_reverse_lookup_degrades_on_error() {
        assert_eq!(find_interface_name(Ipv4Addr::LOCALHOST, &FailingInterfaces), "");
        assert_eq!(find_interface_name(Ipv4Addr::LOCALHOST, &source()), "lo");
    }

    #[test]
    fn test_interface_params() {
        let by_name = interface_params(&source()).unwrap();
        assert_eq!(by_name.len(), 2);
        assert_eq!(by_name["lo"]["ip"], "127.0.0.1");
        assert_eq!(by_name["lo"]["name"], "lo");
        assert_eq!(by_name["eth0"]["network"], "192.168.0.0");
        assert_eq!(by_name["eth0"]["prefix"], 24);
        assert!(by_name.get("tun6").is_none());
    }
}
