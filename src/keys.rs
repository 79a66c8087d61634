//! Parsing of SimpleCov branch location keys.
//!
//! SimpleCov identifies each branching construct (a *condition*) and each
//! outcome of it (a *branch arm*) with a bracketed, comma-separated tuple
//! serialized as a JSON object key:
//!
//!   condition:  "[:if, 0, 3, 4, 7, 7]"
//!   branch arm: "[:then, 1, 4, 6, 4, 10]"
//!
//! Fields are positional: type, id, start line, start column, end line,
//! end column. Some emitters write condition keys with only the first
//! three fields; the column fields are never required.
//!
//! Decoding drops the fixed two-character `[:` prefix and the trailing
//! bracket, splits on commas, trims whitespace, and coerces each field to
//! an integer when it parses as one. There is no structural validation
//! beyond that: a well-shaped key with wrong content decodes to wrong
//! values, and only a key whose required line positions are missing or
//! non-numeric is rejected.

use std::fmt;

use crate::error::{CovsetError, Result};

/// One decoded key field: an integer where the text parses as one,
/// otherwise the trimmed text itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Int(i64),
    Text(String),
}

impl Field {
    /// The field as a 1-based line/column number, if it is one.
    #[must_use]
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Field::Int(n) => u32::try_from(*n).ok(),
            Field::Text(_) => None,
        }
    }

    /// The field as a raw integer, if it is one.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Field::Int(n) => Some(*n),
            Field::Text(_) => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Int(n) => write!(f, "{n}"),
            Field::Text(s) => f.write_str(s),
        }
    }
}

/// Decode a bracketed key into its fields.
///
/// Never fails; a key too short to carry any payload yields an empty
/// sequence, which the typed extractors below reject.
#[must_use]
pub fn parse_fields(key: &str) -> Vec<Field> {
    let inner = key
        .get(2..key.len().saturating_sub(1))
        .unwrap_or("");
    if inner.trim().is_empty() {
        return Vec::new();
    }

    inner
        .split(',')
        .map(|raw| {
            let trimmed = raw.trim();
            match trimmed.parse::<i64>() {
                Ok(n) => Field::Int(n),
                Err(_) => Field::Text(trimmed.to_string()),
            }
        })
        .collect()
}

/// A parsed condition key: the branching construct a set of arms belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionKey {
    /// Construct label, e.g. `if`, `case`, `while`.
    pub kind: String,
    /// Emitter-assigned id; `None` when the field is not numeric.
    pub id: Option<i64>,
    /// Start line of the construct.
    pub start_line: u32,
}

impl ConditionKey {
    /// Parse a condition key, e.g. `"[:if, 0, 3, 4, 7, 7]"`.
    ///
    /// Only the first three positions are read; trailing span fields from
    /// newer emitters are ignored.
    pub fn parse(key: &str) -> Result<Self> {
        let fields = parse_fields(key);
        match fields.as_slice() {
            [kind, id, line, ..] => Ok(Self {
                kind: kind.to_string(),
                id: id.as_i64(),
                start_line: line.as_u32().ok_or_else(|| malformed(key))?,
            }),
            _ => Err(malformed(key)),
        }
    }
}

/// A parsed branch-arm key: one outcome of a branching construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchKey {
    /// Arm label, e.g. `then`, `else`, `when`.
    pub kind: String,
    /// Emitter-assigned id; `None` when the field is not numeric.
    pub id: Option<i64>,
    pub start_line: u32,
    pub start_col: Option<u32>,
    pub end_line: u32,
    pub end_col: Option<u32>,
}

impl BranchKey {
    /// Parse a branch-arm key, e.g. `"[:then, 1, 4, 6, 4, 10]"`.
    ///
    /// Start line (position 2) and end line (position 4) are required;
    /// the column fields are `None` when absent or non-numeric.
    pub fn parse(key: &str) -> Result<Self> {
        let fields = parse_fields(key);
        match fields.as_slice() {
            [kind, id, start, rest @ ..] if rest.len() >= 2 => Ok(Self {
                kind: kind.to_string(),
                id: id.as_i64(),
                start_line: start.as_u32().ok_or_else(|| malformed(key))?,
                start_col: rest[0].as_u32(),
                end_line: rest[1].as_u32().ok_or_else(|| malformed(key))?,
                end_col: rest.get(2).and_then(Field::as_u32),
            }),
            _ => Err(malformed(key)),
        }
    }
}

fn malformed(key: &str) -> CovsetError {
    CovsetError::MalformedKey(key.to_string())
}
