//! JSON path expressions.
//!
//! A small dotted/bracketed addressing scheme into a JSON document:
//! `data.id`, `data[0].name`, `[1]`, with an optional leading `$` or `$.`.
//! An empty expression (or a bare `$`) addresses the whole document.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// One step of a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object member lookup.
    Key(String),
    /// Array element lookup.
    Index(usize),
}

/// A parsed JSON path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JsonPath {
    raw: String,
    segments: Vec<Segment>,
}

impl JsonPath {
    /// Parses a path expression.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidJsonPath` for empty segments, unclosed
    /// brackets or non-numeric indices.
    pub fn parse(expression: &str) -> DomainResult<Self> {
        let raw = expression.trim().to_string();
        let body = raw.strip_prefix('$').unwrap_or(&raw);
        let body = body.strip_prefix('.').unwrap_or(body);

        let invalid = |reason: &str| DomainError::InvalidJsonPath {
            path: raw.clone(),
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        let mut chars = body.chars().peekable();
        let mut key = String::new();
        let mut expect_key = !body.starts_with('[');

        while let Some(ch) = chars.next() {
            match ch {
                '.' => {
                    if key.is_empty() && expect_key {
                        return Err(invalid("empty segment"));
                    }
                    if !key.is_empty() {
                        segments.push(Segment::Key(std::mem::take(&mut key)));
                    }
                    expect_key = true;
                }
                '[' => {
                    if !key.is_empty() {
                        segments.push(Segment::Key(std::mem::take(&mut key)));
                    }
                    let mut index = String::new();
                    let mut closed = false;
                    for inner in chars.by_ref() {
                        if inner == ']' {
                            closed = true;
                            break;
                        }
                        index.push(inner);
                    }
                    if !closed {
                        return Err(invalid("unclosed '['"));
                    }
                    let index = index
                        .trim()
                        .parse::<usize>()
                        .map_err(|_| invalid(&format!("invalid array index '{index}'")))?;
                    segments.push(Segment::Index(index));
                    expect_key = false;
                    if let Some(&next) = chars.peek() {
                        if next != '.' && next != '[' {
                            return Err(invalid("expected '.' or '[' after ']'"));
                        }
                    }
                }
                ']' => return Err(invalid("unexpected ']'")),
                _ => key.push(ch),
            }
        }

        if !key.is_empty() {
            segments.push(Segment::Key(key));
        } else if expect_key && !segments.is_empty() {
            return Err(invalid("trailing '.'"));
        }

        Ok(Self { raw, segments })
    }

    /// Resolves the path against a document. Returns `None` when any step
    /// finds no matching node.
    #[must_use]
    pub fn resolve<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(document, |current, segment| match segment {
                Segment::Key(key) => current.get(key.as_str()),
                Segment::Index(index) => current.get(*index),
            })
    }

    /// The parsed segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The expression as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns true when the path addresses the whole document.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for JsonPath {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for JsonPath {
    type Error = DomainError;

    fn try_from(value: String) -> DomainResult<Self> {
        Self::parse(&value)
    }
}

impl From<JsonPath> for String {
    fn from(path: JsonPath) -> Self {
        path.raw
    }
}
