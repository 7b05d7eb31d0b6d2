//! Output formatting for subnet data.
//!
//! This module handles formatting subnet data for stdout:
//! - [`fields`] - per-flag field, range and template output
//! - [`listing`] - interface listing
//! - [`template`] - the template renderer

mod fields;
mod listing;
mod template;

pub use fields::{render_output, render_template, OutputItem};
pub use listing::list_interfaces;
pub use template::{format_value, references_interfaces, Func, Template, INTERFACES_KEY};
