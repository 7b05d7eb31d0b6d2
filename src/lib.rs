//! terminus is an IPv4 subnet address calculator.
//!
//! For an address, a CIDR or a network interface name it derives network and
//! broadcast addresses, the usable host range, mask forms and host counts,
//! and renders them through flags or a template.
//!
//! - [`models`] - IPv4 helpers and data structures
//! - [`processing`] - argument resolution and subnet derivation
//! - [`system`] - interface enumeration and stdin
//! - [`output`] - field, listing and template rendering
//! - [`cli`] - command-line entry point

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;
pub mod system;

pub use error::{Result, TerminusError};
pub use models::{Ipv4Cidr, SubnetRecord};
pub use processing::{derive_record, resolve};
pub use system::{InterfaceSource, SystemInterfaces};

/// Resolve `arg` against the host's interfaces and derive its record.
pub fn subnet_record(arg: &str) -> Result<SubnetRecord> {
    let source = SystemInterfaces;
    let cidr = resolve(arg, &source)?;
    derive_record(arg, cidr, &source)
}
