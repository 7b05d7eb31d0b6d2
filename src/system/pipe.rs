//! Arguments piped in on stdin.
//!
//! `echo eth0 | terminus -i` behaves like `terminus -i eth0`: piped text is
//! split into words and appended to the command line.

use crate::error::{Result, TerminusError};
use regex::Regex;
use std::io::Read;
use std::sync::OnceLock;

/// Regex for tokenizing piped text the way a POSIX shell splits words.
///
/// Groups: 1 single-quoted, 2 double-quoted, 3 escaped char, 4 plain run,
/// 5 blank separator, 6 stray quote or trailing backslash.
static WORD_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_word_regex() -> &'static Regex {
    WORD_REGEX.get_or_init(|| {
        Regex::new(r#"(?s)'([^']*)'|"((?:[^"\\]|\\.)*)"|\\(.)|([^'"\\\s]+)|(\s+)|(['"\\])"#)
            .expect("Invalid Regex")
    })
}

/// Read and split stdin when it is a pipe; otherwise return no words.
///
/// A terminal or regular file on stdin is left alone, so an interactive
/// invocation never blocks waiting for input.
pub fn read_from_pipe() -> Result<Vec<String>> {
    if !stdin_is_pipe() {
        return Ok(vec![]);
    }

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    let words = split_args(input.trim_end_matches(['\n', '\r']))?;
    log::debug!("read {} argument(s) from pipe: {:?}", words.len(), words);
    Ok(words)
}

#[cfg(unix)]
fn stdin_is_pipe() -> bool {
    use std::os::unix::fs::FileTypeExt;

    std::fs::metadata("/dev/stdin")
        .map(|m| m.file_type().is_fifo())
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn stdin_is_pipe() -> bool {
    false
}

/// Split text into words with shell quoting rules.
///
/// Touching segments join into one word (`a'b c'` is `ab c`). Inside single
/// quotes everything is literal; inside double quotes a backslash escapes
/// only `$`, `` ` ``, `"`, `\\` and newline. An unterminated quote or a
/// trailing backslash is an error.
pub fn split_args(input: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut word: Option<String> = None;

    for caps in get_word_regex().captures_iter(input) {
        if caps.get(5).is_some() {
            words.extend(word.take());
            continue;
        }
        if let Some(stray) = caps.get(6) {
            let reason = match stray.as_str() {
                "\\" => "unterminated backslash escape".to_string(),
                quote => format!("unterminated {quote} quote"),
            };
            return Err(TerminusError::invalid_format(input, reason));
        }

        // backslash-newline continues the line
        if caps.get(3).is_some_and(|m| m.as_str() == "\n") {
            continue;
        }

        let current = word.get_or_insert_with(String::new);
        if let Some(m) = caps.get(1).or(caps.get(3)).or(caps.get(4)) {
            current.push_str(m.as_str());
        } else if let Some(m) = caps.get(2) {
            current.push_str(&unescape_double_quoted(m.as_str()));
        }
    }
    words.extend(word);
    Ok(words)
}

fn unescape_double_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\n') => {}
            Some(e @ ('$' | '`' | '"' | '\\')) => out.push(e),
            Some(e) => {
                out.push('\\');
                out.push(e);
            }
            None => out.push('\\'),
        }
    }
    out
}
