//! IPv4 address and CIDR notation utilities.
//!
//! Provides [`Ipv4Cidr`] for an address paired with a prefix length, along
//! with the bit-level helpers the subnet calculator is built from.

use crate::error::{Result, TerminusError};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use terminus::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32> {
    if len > MAX_LENGTH {
        Err(TerminusError::MalformedMask {
            mask: format!("/{len}"),
        })
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Get the network address for a given IP and prefix length.
pub fn network_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr> {
    let mask = get_cidr_mask(len)?;
    let network_bits = u32::from(addr) & mask;
    let broadcast_bits = network_bits | (!mask);
    Ok(Ipv4Addr::from(broadcast_bits))
}

/// The wildcard (host) mask, i.e. the complement of the subnet mask.
pub fn wildcard_mask(len: u8) -> Result<Ipv4Addr> {
    Ok(Ipv4Addr::from(!get_cidr_mask(len)?))
}

/// Number of leading one-bits in a dot-decimal subnet mask.
///
/// Rejects masks that are not a contiguous run of ones followed by zeros.
pub fn prefix_from_mask(mask: Ipv4Addr) -> Result<u8> {
    let bits = u32::from(mask);
    let ones = bits.leading_ones();
    if ones + bits.trailing_zeros() != u32::from(MAX_LENGTH) {
        return Err(TerminusError::MalformedMask {
            mask: mask.to_string(),
        });
    }
    Ok(ones as u8)
}

/// Historical class-based prefix length (A=8, B=16, C=24).
///
/// Used only for bare addresses. Anything from 192.0.0.0 upwards, class D
/// and E included, gets the class C prefix, as `ifconfig`-era tools did.
pub fn default_class_prefix(addr: Ipv4Addr) -> u8 {
    match addr.octets()[0] {
        0..=127 => 8,
        128..=191 => 16,
        _ => 24,
    }
}

/// Total number of addresses in a subnet.
pub fn subnet_size(len: u8) -> Result<u64> {
    match len {
        32 => Ok(1),
        31 => Ok(2),
        l if l < MAX_LENGTH => Ok(1u64 << (MAX_LENGTH - l)),
        _ => Err(TerminusError::MalformedMask {
            mask: format!("/{len}"),
        }),
    }
}

/// Number of host addresses in a subnet.
///
/// Network and broadcast are only reserved when there is room for them,
/// so /31 and /32 keep every address usable.
pub fn usable_hosts(len: u8) -> Result<u64> {
    let size = subnet_size(len)?;
    if len >= MAX_LENGTH - 1 {
        Ok(size)
    } else {
        Ok(size - 2)
    }
}

/// IPv4 address with a prefix length, e.g. `192.168.0.1/24`.
///
/// The address keeps its host bits; [`Ipv4Cidr::network`] truncates.
#[derive(Eq, Ord, PartialOrd, PartialEq, Debug, Copy, Clone, Hash)]
pub struct Ipv4Cidr {
    /// The IPv4 address.
    pub addr: Ipv4Addr,
    /// The prefix length (0-32).
    pub prefix: u8,
}

impl Ipv4Cidr {
    /// Pair an address with a prefix length, rejecting lengths above 32.
    pub fn new(addr: Ipv4Addr, prefix: u8) -> Result<Ipv4Cidr> {
        get_cidr_mask(prefix)?;
        Ok(Ipv4Cidr { addr, prefix })
    }

    /// Subnet mask in dot-decimal form.
    pub fn netmask(&self) -> Result<Ipv4Addr> {
        Ok(Ipv4Addr::from(get_cidr_mask(self.prefix)?))
    }

    /// Get the lowest (network) address in the subnet.
    pub fn network(&self) -> Result<Ipv4Addr> {
        network_addr(self.addr, self.prefix)
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn broadcast(&self) -> Result<Ipv4Addr> {
        broadcast_addr(self.addr, self.prefix)
    }
}

impl FromStr for Ipv4Cidr {
    type Err = TerminusError;

    fn from_str(addr_cidr: &str) -> Result<Ipv4Cidr> {
        let (addr, prefix) = addr_cidr
            .split_once('/')
            .ok_or_else(|| TerminusError::invalid_format(addr_cidr, "expected address/prefix"))?;
        let addr: Ipv4Addr = addr
            .parse()
            .map_err(|_| TerminusError::invalid_format(addr_cidr, format!("invalid address {addr}")))?;
        // decimal digits only: no sign, no whitespace
        if prefix.is_empty() || prefix.len() > 2 || !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TerminusError::invalid_format(
                addr_cidr,
                format!("invalid prefix length {prefix}"),
            ));
        }
        let prefix: u8 = prefix.parse().map_err(|_| {
            TerminusError::invalid_format(addr_cidr, format!("invalid prefix length {prefix}"))
        })?;
        if prefix > MAX_LENGTH {
            return Err(TerminusError::invalid_format(
                addr_cidr,
                format!("prefix length {prefix} is above {MAX_LENGTH}"),
            ));
        }
        Ok(Ipv4Cidr { addr, prefix })
    }
}

impl std::fmt::Display for Ipv4Cidr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_cidr_mask() {
        assert_eq!(get_cidr_mask(0).unwrap(), 0x00000000);
        assert_eq!(get_cidr_mask(8).unwrap(), 0xFF000000);
        assert_eq!(get_cidr_mask(16).unwrap(), 0xFFFF0000);
        assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
        assert_eq!(get_cidr_mask(31).unwrap(), 0xFFFFFFFE);
        assert_eq!(get_cidr_mask(32).unwrap(), 0xFFFFFFFF);
        assert!(get_cidr_mask(33).is_err());
    }

    #[test]
    fn test_network_addr() {
        let ip = Ipv4Addr::new(192, 168, 1, 42);
        assert_eq!(network_addr(ip, 24).unwrap(), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(network_addr(ip, 16).unwrap(), Ipv4Addr::new(192, 168, 0, 0));
        assert_eq!(network_addr(ip, 8).unwrap(), Ipv4Addr::new(192, 0, 0, 0));
        assert_eq!(network_addr(ip, 0).unwrap(), Ipv4Addr::new(0, 0, 0, 0));
        assert_eq!(network_addr(ip, 32).unwrap(), ip);
        assert!(network_addr(ip, 33).is_err());
    }

    #[test]
    fn test_broadcast_addr() {
        let ip = Ipv4Addr::new(192, 168, 1, 0);
        assert_eq!(
            broadcast_addr(ip, 24).unwrap(),
            Ipv4Addr::new(192, 168, 1, 255)
        );
        assert_eq!(
            broadcast_addr(ip, 16).unwrap(),
            Ipv4Addr::new(192, 168, 255, 255)
        );
        assert_eq!(
            broadcast_addr(ip, 8).unwrap(),
            Ipv4Addr::new(192, 255, 255, 255)
        );
        assert_eq!(broadcast_addr(ip, 0).unwrap(), Ipv4Addr::BROADCAST);
        assert_eq!(broadcast_addr(ip, 32).unwrap(), ip);
        assert!(broadcast_addr(Ipv4Addr::new(255, 255, 255, 255), 24).is_ok());
    }

    #[test]
    fn test_wildcard_mask() {
        assert_eq!(wildcard_mask(24).unwrap(), Ipv4Addr::new(0, 0, 0, 255));
        assert_eq!(wildcard_mask(8).unwrap(), Ipv4Addr::new(0, 255, 255, 255));
        assert_eq!(wildcard_mask(32).unwrap(), Ipv4Addr::UNSPECIFIED);
        assert_eq!(wildcard_mask(0).unwrap(), Ipv4Addr::BROADCAST);
    }

    #[test]
    fn test_prefix_from_mask() {
        assert_eq!(prefix_from_mask(Ipv4Addr::new(255, 0, 0, 0)).unwrap(), 8);
        assert_eq!(prefix_from_mask(Ipv4Addr::new(255, 255, 254, 0)).unwrap(), 23);
        assert_eq!(prefix_from_mask(Ipv4Addr::BROADCAST).unwrap(), 32);
        assert_eq!(prefix_from_mask(Ipv4Addr::UNSPECIFIED).unwrap(), 0);
        assert!(prefix_from_mask(Ipv4Addr::new(255, 0, 255, 0)).is_err());
        assert!(prefix_from_mask(Ipv4Addr::new(0, 0, 0, 255)).is_err());
    }

    #[test]
    fn test_default_class_prefix() {
        // classful defaults are kept on purpose, not replaced by /32
        assert_eq!(default_class_prefix(Ipv4Addr::new(10, 0, 0, 138)), 8);
        assert_eq!(default_class_prefix(Ipv4Addr::new(127, 0, 100, 1)), 8);
        assert_eq!(default_class_prefix(Ipv4Addr::new(0, 1, 2, 3)), 8);
        assert_eq!(default_class_prefix(Ipv4Addr::new(128, 0, 0, 1)), 16);
        assert_eq!(default_class_prefix(Ipv4Addr::new(172, 16, 5, 4)), 16);
        assert_eq!(default_class_prefix(Ipv4Addr::new(192, 168, 0, 1)), 24);
        assert_eq!(default_class_prefix(Ipv4Addr::new(224, 0, 0, 1)), 24);
        assert_eq!(default_class_prefix(Ipv4Addr::new(255, 255, 255, 255)), 24);
    }

    #[test]
    fn test_subnet_size() {
        assert_eq!(subnet_size(0).unwrap(), 4294967296);
        assert_eq!(subnet_size(8).unwrap(), 16777216);
        assert_eq!(subnet_size(24).unwrap(), 256);
        assert_eq!(subnet_size(30).unwrap(), 4);
        assert_eq!(subnet_size(31).unwrap(), 2);
        assert_eq!(subnet_size(32).unwrap(), 1);
        assert!(subnet_size(33).is_err());
    }

    #[test]
    fn test_usable_hosts() {
        for len in 0..=30 {
            assert_eq!(usable_hosts(len).unwrap(), subnet_size(len).unwrap() - 2);
        }
        assert_eq!(usable_hosts(24).unwrap(), 254);
        assert_eq!(usable_hosts(30).unwrap(), 2);
        assert_eq!(usable_hosts(31).unwrap(), 2);
        assert_eq!(usable_hosts(32).unwrap(), 1);
        assert!(usable_hosts(33).is_err());
    }

    #[test]
    fn test_cidr_from_str() {
        let cidr: Ipv4Cidr = "127.0.100.1/24".parse().unwrap();
        assert_eq!(cidr.addr, Ipv4Addr::new(127, 0, 100, 1));
        assert_eq!(cidr.prefix, 24);
        assert_eq!(cidr.network().unwrap(), Ipv4Addr::new(127, 0, 100, 0));
        assert_eq!(cidr.netmask().unwrap(), Ipv4Addr::new(255, 255, 255, 0));
        assert_eq!(cidr.broadcast().unwrap(), Ipv4Addr::new(127, 0, 100, 255));
        assert_eq!(cidr.to_string(), "127.0.100.1/24");

        assert!("10.0.0.1/33".parse::<Ipv4Cidr>().is_err());
        assert!("10.0.0.1/".parse::<Ipv4Cidr>().is_err());
        assert!("10.0.0/8".parse::<Ipv4Cidr>().is_err());
        assert!("10.0.0.1".parse::<Ipv4Cidr>().is_err());
    }

    #[test]
    fn test_cidr_rejects_loose_text() {
        for text in [
            "10.0.0.1/+24",
            " 10.0.0.1/24",
            "10.0.0.1/24 ",
            "10.0.0.1/ 24",
            "10.0.0.1/024",
            "10.0.0.1/-0",
        ] {
            assert!(text.parse::<Ipv4Cidr>().is_err(), "accepted '{text}'");
        }
        assert_eq!("10.0.0.1/08".parse::<Ipv4Cidr>().unwrap().prefix, 8);
    }

    #[test]
    fn test_cidr_new() {
        assert!(Ipv4Cidr::new(Ipv4Addr::LOCALHOST, 32).is_ok());
        assert!(Ipv4Cidr::new(Ipv4Addr::LOCALHOST, 33).is_err());
    }

    #[test]
    fn test_cidr_cmp() {
        let ip1: Ipv4Cidr = "10.0.0.1/24".parse().unwrap();
        let ip2: Ipv4Cidr = "10.0.0.2/24".parse().unwrap();
        let ip3: Ipv4Cidr = "10.0.0.1/24".parse().unwrap();

        assert!(ip1 < ip2);
        assert!(ip1 == ip3);
        assert!(ip2 >= ip3);
    }
}
