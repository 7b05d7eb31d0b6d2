//! Template rendering.
//!
//! Supports the subset of Go template syntax the tool documents: actions
//! such as `{{.ip}}` or `{{.interfaces.eth0.network}}`, and pipelines through
//! the functions `toBinary`, `toHex` and `toJson`.
//!
//! ```
//! use terminus::output::Template;
//! use terminus::processing::calculate;
//!
//! let params = calculate("10.197.63.254".parse().unwrap(), 11).unwrap().to_params().unwrap();
//! let out = Template::parse("{{.ip}}/{{.prefix}} ({{.network}} - {{.broadcast}})")
//!     .unwrap()
//!     .render(&params)
//!     .unwrap();
//! assert_eq!(out, "10.197.63.254/11 (10.192.0.0 - 10.223.255.255)");
//! ```

use crate::config::NO_VALUE;
use crate::error::{Result, TerminusError};
use crate::models::Params;
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::OnceLock;

/// Data key holding the params of every interface.
pub const INTERFACES_KEY: &str = "interfaces";

/// Regex matching one `{{ ... }}` action.
static ACTION_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_action_regex() -> &'static Regex {
    ACTION_REGEX.get_or_init(|| Regex::new(r"(?s)\{\{(.*?)\}\}").expect("Invalid Regex"))
}

/// Whether a template needs the `interfaces` key filled in.
pub fn references_interfaces(text: &str) -> bool {
    text.contains(&format!(".{INTERFACES_KEY}"))
}

/// Functions usable in a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    /// 127.0.0.1 -> 01111111.00000000.00000000.00000001
    ToBinary,
    /// 255.255.255.0 -> 0xffffff00
    ToHex,
    /// any value as compact JSON
    ToJson,
}

impl Func {
    fn apply(self, value: Option<&Value>) -> Result<Value> {
        match self {
            Func::ToBinary => {
                let o = self.ipv4_arg(value)?.octets();
                Ok(Value::String(format!(
                    "{:08b}.{:08b}.{:08b}.{:08b}",
                    o[0], o[1], o[2], o[3]
                )))
            }
            Func::ToHex => Ok(Value::String(format!(
                "0x{:08x}",
                u32::from(self.ipv4_arg(value)?)
            ))),
            Func::ToJson => Ok(Value::String(serde_json::to_string(
                value.unwrap_or(&Value::Null),
            )?)),
        }
    }

    fn ipv4_arg(self, value: Option<&Value>) -> Result<Ipv4Addr> {
        value
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| {
                TerminusError::template(format!(
                    "{self} expects an IPv4 address, got {}",
                    format_value(value)
                ))
            })
    }
}

impl FromStr for Func {
    type Err = TerminusError;

    fn from_str(name: &str) -> Result<Func> {
        match name {
            "toBinary" => Ok(Func::ToBinary),
            "toHex" => Ok(Func::ToHex),
            "toJson" => Ok(Func::ToJson),
            _ => Err(TerminusError::template(format!(
                "function \"{name}\" not defined"
            ))),
        }
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Func::ToBinary => "toBinary",
            Func::ToHex => "toHex",
            Func::ToJson => "toJson",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Action {
    /// Keys below the root; empty for `.`
    path: Vec<String>,
    funcs: Vec<Func>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Action(Action),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse template text. Unknown functions and unclosed actions are
    /// rejected here, before any data is looked at.
    pub fn parse(text: &str) -> Result<Template> {
        let mut segments = Vec::new();
        let mut last = 0;

        for caps in get_action_regex().captures_iter(text) {
            let (Some(whole), Some(expr)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if whole.start() > last {
                segments.push(Segment::Text(text[last..whole.start()].to_string()));
            }
            segments.push(Segment::Action(parse_action(expr.as_str())?));
            last = whole.end();
        }

        let rest = &text[last..];
        if rest.contains("{{") {
            return Err(TerminusError::template("unclosed action"));
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }

        log::trace!("parsed template into {} segment(s)", segments.len());
        Ok(Template { segments })
    }

    /// Render against a params map. Missing keys print as `<no value>`.
    pub fn render(&self, params: &Params) -> Result<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Action(action) => {
                    let mut value = lookup(params, &action.path);
                    for func in &action.funcs {
                        value = Some(func.apply(value.as_ref())?);
                    }
                    out.push_str(&format_value(value.as_ref()));
                }
            }
        }
        Ok(out)
    }
}

fn parse_action(expr: &str) -> Result<Action> {
    let mut stages = expr.split('|').map(str::trim);
    let operand = stages.next().unwrap_or_default();
    let path = parse_path(operand)?;
    let funcs = stages.map(Func::from_str).collect::<Result<Vec<Func>>>()?;
    Ok(Action { path, funcs })
}

fn parse_path(operand: &str) -> Result<Vec<String>> {
    if operand == "." {
        return Ok(vec![]);
    }
    let unsupported = || TerminusError::template(format!("unsupported expression \"{operand}\""));
    let keys = operand.strip_prefix('.').ok_or_else(unsupported)?;
    keys.split('.')
        .map(|key| {
            if key.is_empty() || key.chars().any(char::is_whitespace) {
                Err(unsupported())
            } else {
                Ok(key.to_string())
            }
        })
        .collect()
}

fn lookup(params: &Params, path: &[String]) -> Option<Value> {
    let Some((first, rest)) = path.split_first() else {
        return Some(Value::Object(params.clone()));
    };
    let mut value = params.get(first)?;
    for key in rest {
        value = value.get(key.as_str())?;
    }
    Some(value.clone())
}

/// Plain-text form of a value: strings unquoted, numbers as digits,
/// maps and lists as JSON, missing or null as `<no value>`.
pub fn format_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NO_VALUE.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
