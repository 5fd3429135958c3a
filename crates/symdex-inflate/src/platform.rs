//! Platform availability parsing.

use serde_json::Value;
use symdex_core::Platform;

use crate::pointer::{query_bool, query_str};
use crate::{InflateError, Result};

/// Parse `/metadata/platforms` entries. Absent input yields no platforms.
///
/// `name` and `introducedAt` are required on every entry; the rest default.
pub fn parse_platforms(entries: Option<&[Value]>) -> Result<Vec<Platform>> {
    entries
        .unwrap_or_default()
        .iter()
        .map(parse_platform)
        .collect()
}

fn parse_platform(entry: &Value) -> Result<Platform> {
    let name = query_str(entry, "/name")?.ok_or(InflateError::MissingField {
        field: "name",
        context: "platform",
    })?;
    let introduced_at = query_str(entry, "/introducedAt")?.ok_or(InflateError::MissingField {
        field: "introducedAt",
        context: "platform",
    })?;
    let deprecated = query_bool(entry, "/deprecated")?.unwrap_or(false);
    let deprecated_at = if deprecated {
        query_str(entry, "/deprecatedAt")?.unwrap_or_default()
    } else {
        ""
    };
    Ok(Platform {
        name: name.to_string(),
        introduced_at: introduced_at.to_string(),
        current: query_str(entry, "/current")?.unwrap_or_default().to_string(),
        beta: query_bool(entry, "/beta")?.unwrap_or(false),
        deprecated,
        deprecated_at: deprecated_at.to_string(),
    })
}
