//! Host system access.
//!
//! - [`interfaces`] - enumeration of local network interfaces
//! - [`pipe`] - arguments piped in on stdin

mod interfaces;
mod pipe;

// Re-export public types and functions
pub use interfaces::{find_interface, group_by_name, InterfaceSource, StaticInterfaces, SystemInterfaces};
pub use pipe::{read_from_pipe, split_args};
