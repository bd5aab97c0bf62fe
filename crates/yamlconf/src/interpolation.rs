//! Environment variable interpolation
//!
//! Resolves placeholders embedded in string values:
//! - `${VAR}` - value of `VAR`, error if unset
//! - `${VAR:default}` - value of `VAR`, or `default` if unset
//! - `${URL:http://localhost:9000}` - only the first `:` separates the default
//! - `${HOST}:${PORT}` - several placeholders concatenated with literal text
//!
//! The substituted string is then handed to the caster.

use std::collections::HashMap;

use crate::cast::{self, Cast};
use crate::document::RawValue;
use crate::error::{Error, Result};

/// Read-only lookup of environment variables
pub trait Environment {
    /// Value of `name`, or `None` when it is unset
    fn var(&self, name: &str) -> Option<String>;
}

/// The process environment
///
/// Variables whose value is not valid unicode count as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        if name.is_empty() {
            return None;
        }
        std::env::var(name).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// A piece of a string with placeholders
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// A placeholder: ${name} or ${name:default}
    Placeholder {
        /// Variable name
        name: String,
        /// Default used when the variable is unset (may be empty)
        default: Option<String>,
    },
}

/// Parser for strings with placeholders
pub struct PlaceholderParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> PlaceholderParser<'a> {
    /// Create a new parser for the given input
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Split the whole input into literal and placeholder segments
    ///
    /// An opening `${` without a closing `}` is kept as literal text.
    pub fn parse(&mut self) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut literal = String::new();

        while !self.is_eof() {
            match self.parse_placeholder() {
                Some(placeholder) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(placeholder);
                }
                None => {
                    literal.push_str(self.collect_literal());
                }
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        segments
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Consume text up to the next `${` (always at least one character)
    fn collect_literal(&mut self) -> &'a str {
        let rest = self.rest();
        let skip = if rest.starts_with("${") { 2 } else { 0 };
        let len = rest[skip..]
            .find("${")
            .map(|idx| idx + skip)
            .unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    /// Parse a placeholder at the current position, if there is a complete one
    fn parse_placeholder(&mut self) -> Option<Segment> {
        let rest = self.rest();
        let body = rest.strip_prefix("${")?;
        let close = body.find('}')?;
        let content = &body[..close];
        self.pos += 2 + close + 1;

        let (name, default) = match content.split_once(':') {
            Some((name, default)) => (name, Some(default.to_string())),
            None => (content, None),
        };

        Some(Segment::Placeholder {
            name: name.to_string(),
            default,
        })
    }
}

/// Parse a string into segments
pub fn parse(input: &str) -> Vec<Segment> {
    PlaceholderParser::new(input).parse()
}

/// Check if a string contains any complete placeholder
pub fn contains_placeholder(input: &str) -> bool {
    parse(input)
        .iter()
        .any(|segment| matches!(segment, Segment::Placeholder { .. }))
}

/// Replace every placeholder in `input` with its resolved value
pub fn substitute(input: &str, env: &dyn Environment) -> Result<String> {
    let mut result = String::with_capacity(input.len());

    for segment in parse(input) {
        match segment {
            Segment::Literal(text) => result.push_str(&text),
            Segment::Placeholder { name, default } => match env.var(&name) {
                Some(value) => {
                    log::trace!("Resolved ${{{}}} from the environment", name);
                    result.push_str(&value);
                }
                None => match default {
                    Some(default) => {
                        log::trace!("${{{}}} is unset, using its default", name);
                        result.push_str(&default);
                    }
                    None => return Err(Error::env_not_found(name)),
                },
            },
        }
    }

    Ok(result)
}

/// Interpolate and cast a raw value against the process environment
pub fn interpolate(raw: &RawValue) -> Result<Option<Cast>> {
    interpolate_with(raw, &ProcessEnv)
}

/// Interpolate and cast a raw value against the given environment
///
/// Only strings are interpolated; other values go straight to the caster.
pub fn interpolate_with(raw: &RawValue, env: &dyn Environment) -> Result<Option<Cast>> {
    match raw {
        RawValue::String(s) => Ok(cast::cast_str(&substitute(s, env)?)),
        other => Ok(cast::cast(other)),
    }
}
