//! Domain models for terminus.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Ipv4Cidr`] - IPv4 address with a prefix length, plus subnet bit helpers
//! - [`SubnetRecord`] - every property derived for one address and mask
//! - [`InterfaceBinding`] - a local interface and its bound addresses

mod interface;
mod ipv4;
pub mod record;

// Re-export public types
pub use interface::{InterfaceAddr, InterfaceBinding};
pub use ipv4::{
    broadcast_addr, default_class_prefix, get_cidr_mask, network_addr, prefix_from_mask,
    subnet_size, usable_hosts, wildcard_mask, Ipv4Cidr, MAX_LENGTH,
};
pub use record::{Params, SubnetRecord, PARAM_KEYS};
