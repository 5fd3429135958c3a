//! Pointer-style navigation over raw metadata documents.
//!
//! Pointers use JSON Pointer syntax (`/metadata/platforms/0/name`). A missing
//! key or an out-of-range index is `None`, never an error: raw documents are
//! conventions, not contracts. Only a syntactically broken pointer is an error.

use serde_json::Value;

use crate::{InflateError, Result};

/// A parsed pointer: the decoded reference tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pointer {
    tokens: Vec<String>,
}

impl Pointer {
    /// Parse a pointer string. The empty string addresses the root.
    pub fn parse(pointer: &str) -> Result<Self> {
        if pointer.is_empty() {
            return Ok(Self { tokens: Vec::new() });
        }
        let Some(rest) = pointer.strip_prefix('/') else {
            return Err(malformed(pointer, "must start with '/'"));
        };
        let tokens = rest
            .split('/')
            .map(|raw| unescape(raw).ok_or_else(|| malformed(pointer, "invalid '~' escape")))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { tokens })
    }

    /// Walk `doc` along this pointer.
    pub fn eval<'a>(&self, doc: &'a Value) -> Option<&'a Value> {
        self.tokens.iter().try_fold(doc, |node, token| match node {
            Value::Object(map) => map.get(token),
            Value::Array(items) => parse_index(token).and_then(|i| items.get(i)),
            _ => None,
        })
    }
}

fn malformed(pointer: &str, reason: &str) -> InflateError {
    InflateError::MalformedPointer {
        pointer: pointer.to_string(),
        reason: reason.to_string(),
    }
}

/// Decode `~1` to `/` and `~0` to `~`. Any other escape is malformed.
fn unescape(raw: &str) -> Option<String> {
    if !raw.contains('~') {
        return Some(raw.to_string());
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('~'),
            Some('1') => out.push('/'),
            _ => return None,
        }
    }
    Some(out)
}

/// Sequence indices are canonical decimal: no sign, no leading zeros.
fn parse_index(token: &str) -> Option<usize> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if token.len() > 1 && token.starts_with('0') {
        return None;
    }
    token.parse().ok()
}

/// Evaluate `pointer` against `doc`.
pub fn query<'a>(doc: &'a Value, pointer: &str) -> Result<Option<&'a Value>> {
    Ok(Pointer::parse(pointer)?.eval(doc))
}

/// Like [`query`], but the node must be a string when present.
pub fn query_str<'a>(doc: &'a Value, pointer: &str) -> Result<Option<&'a str>> {
    match query(doc, pointer)? {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(shape(pointer, "string")),
    }
}

/// Like [`query`], but the node must be a sequence when present.
pub fn query_array<'a>(doc: &'a Value, pointer: &str) -> Result<Option<&'a [Value]>> {
    match query(doc, pointer)? {
        None => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items)),
        Some(_) => Err(shape(pointer, "array")),
    }
}

/// Like [`query`], but the node must be a boolean when present.
pub fn query_bool(doc: &Value, pointer: &str) -> Result<Option<bool>> {
    match query(doc, pointer)? {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(shape(pointer, "bool")),
    }
}

fn shape(pointer: &str, expected: &'static str) -> InflateError {
    InflateError::UnexpectedShape {
        pointer: pointer.to_string(),
        expected,
    }
}

/// First element of `items` whose string property `key` equals `value`.
pub fn find_with_prop<'a>(items: &'a [Value], key: &str, value: &str) -> Option<&'a Value> {
    items
        .iter()
        .find(|item| item.get(key).and_then(Value::as_str) == Some(value))
}
