//! Minimal selector vocabulary
//!
//! The engine only ever needs three selector shapes, so this is not a CSS
//! parser: `.class`, `#id` and `[attribute]` (optionally `[attribute^="prefix"]`
//! for anchor links).

use std::fmt;

use crate::error::{EngineError, Result};

/// A parsed element selector
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Selector {
    /// `.name` - elements carrying the class
    Class(String),
    /// `#name` - the element with this id
    Id(String),
    /// `[name]` - elements carrying the attribute
    Attribute(String),
    /// `[name^="prefix"]` - attribute value starts with prefix
    AttributePrefix { name: String, prefix: String },
}

impl Selector {
    /// Parse a selector string
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if let Some(class) = input.strip_prefix('.') {
            return non_empty(class, input).map(|c| Selector::Class(c.to_string()));
        }
        if let Some(id) = input.strip_prefix('#') {
            return non_empty(id, input).map(|i| Selector::Id(i.to_string()));
        }
        if let Some(body) = input.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            if let Some((name, value)) = body.split_once("^=") {
                let prefix = value.trim().trim_matches('"').trim_matches('\'');
                let name = non_empty(name.trim(), input)?;
                return Ok(Selector::AttributePrefix {
                    name: name.to_string(),
                    prefix: prefix.to_string(),
                });
            }
            return non_empty(body.trim(), input).map(|a| Selector::Attribute(a.to_string()));
        }
        Err(EngineError::Selector(input.to_string()))
    }

    /// Shorthand for a class selector
    pub fn class(name: impl Into<String>) -> Self {
        Selector::Class(name.into())
    }

    /// Shorthand for an attribute-presence selector
    pub fn attribute(name: impl Into<String>) -> Self {
        Selector::Attribute(name.into())
    }
}

fn non_empty<'a>(part: &'a str, whole: &str) -> Result<&'a str> {
    if part.is_empty() {
        Err(EngineError::Selector(whole.to_string()))
    } else {
        Ok(part)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Class(c) => write!(f, ".{c}"),
            Selector::Id(i) => write!(f, "#{i}"),
            Selector::Attribute(a) => write!(f, "[{a}]"),
            Selector::AttributePrefix { name, prefix } => write!(f, "[{name}^=\"{prefix}\"]"),
        }
    }
}
