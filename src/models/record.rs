//! Subnet record data model.

use crate::error::Result;
use serde::Serialize;
use serde_json::{Map, Value};
use std::net::Ipv4Addr;

/// Named values handed to the renderers, keyed by field name.
pub type Params = Map<String, Value>;

/// Broadcast address
pub const BROADCAST: &str = "broadcast";
/// First usable IP address of the subnet
pub const FIRST: &str = "first";
/// IP address
pub const IP: &str = "ip";
/// Last usable IP address of the subnet
pub const LAST: &str = "last";
/// Name of the interface
pub const NAME: &str = "name";
/// Subnet mask
pub const NETMASK: &str = "netmask";
/// Network address
pub const NETWORK: &str = "network";
/// Prefix in bits
pub const PREFIX: &str = "prefix";
/// Size of the subnet
pub const SIZE: &str = "size";
/// Usable size of the subnet
pub const USABLE: &str = "usable";
/// Version of the IP address
pub const VERSION: &str = "version";
/// Wildcard mask
pub const WILDCARD: &str = "wildcard";

/// Every key of [`SubnetRecord::to_params`], sorted.
pub const PARAM_KEYS: [&str; 12] = [
    BROADCAST, FIRST, IP, LAST, NAME, NETMASK, NETWORK, PREFIX, SIZE, USABLE, VERSION, WILDCARD,
];

/// All properties derived for one address and mask.
///
/// Field names double as the keys of the params map.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SubnetRecord {
    pub broadcast: Ipv4Addr,
    pub first: Ipv4Addr,
    pub ip: Ipv4Addr,
    pub last: Ipv4Addr,
    /// Owning interface, empty when unknown.
    pub name: String,
    pub netmask: Ipv4Addr,
    pub network: Ipv4Addr,
    pub prefix: u8,
    /// Total number of addresses.
    pub size: u64,
    /// Number of host addresses.
    pub usable: u64,
    pub version: u8,
    pub wildcard: Ipv4Addr,
}

impl SubnetRecord {
    /// Convert to the named-value map consumed by the renderers.
    ///
    /// Addresses become dot-decimal strings, counts stay integers.
    pub fn to_params(&self) -> Result<Params> {
        Ok(serde_json::from_value(serde_json::to_value(self)?)?)
    }
}
