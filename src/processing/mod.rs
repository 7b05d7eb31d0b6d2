//! Subnet calculation logic.
//!
//! - [`resolve`] - turning an argument into an address and prefix length
//! - [`params`] - deriving subnet properties and interface names

mod params;
mod resolve;

// Re-export public functions
pub use params::{
    binding_record, calculate, derive_record, find_interface_name, interface_name,
    interface_params,
};
pub use resolve::{binding_addr, interface_addr, resolve};
