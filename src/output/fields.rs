//! Flag-driven output.
//!
//! Each requested item renders to its own line(s), in the order the flags
//! were given.

use super::template::{format_value, Template};
use crate::error::Result;
use crate::models::record::{BROADCAST, NETWORK};
use crate::models::Params;

/// One piece of requested output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputItem {
    /// A single params key, e.g. `broadcast`.
    Field(&'static str),
    /// `network - broadcast`
    Range,
    /// A template expression.
    Template(String),
}

/// Render all items into one string, ready to be written at once.
pub fn render_output(items: &[OutputItem], params: &Params) -> Result<String> {
    let mut out = String::new();
    for item in items {
        match item {
            OutputItem::Field(key) => {
                out.push_str(&format_value(params.get(*key)));
                out.push('\n');
            }
            OutputItem::Range => {
                out.push_str(&format!(
                    "{} - {}\n",
                    format_value(params.get(NETWORK)),
                    format_value(params.get(BROADCAST))
                ));
            }
            OutputItem::Template(text) => out.push_str(&render_template(text, params)?),
        }
    }
    Ok(out)
}

/// Render a template, terminating the output with a newline.
pub fn render_template(text: &str, params: &Params) -> Result<String> {
    let mut text = text.to_string();
    if !text.ends_with('\n') {
        text.push('\n');
    }
    Template::parse(&text)?.render(params)
}
