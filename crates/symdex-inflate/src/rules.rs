//! Normalization rules and the known-unavailable set.
//!
//! Example `[rules]` table in `symdex.toml`:
//! ```toml
//! [rules]
//! target_language = "occ"
//! exempt_path_prefixes = ["kernel", "driverkit"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{InflateError, Result};

/// Rule set applied while inflating stubs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InflateRules {
    /// Scheme and authority stripped from cross-reference identifiers.
    pub identifier_prefix: String,
    /// Language tag a declaration variant must carry to be extracted.
    pub target_language: String,
    /// Interface language whose documents skip the declaration check.
    pub secondary_language: String,
    /// Metadata roles exempt from the declaration check.
    pub exempt_roles: Vec<String>,
    /// Path prefixes exempt from the declaration check.
    pub exempt_path_prefixes: Vec<String>,
    /// Constant names are cut at the first occurrence of this separator.
    pub constant_separator: String,
}

impl Default for InflateRules {
    fn default() -> Self {
        Self {
            identifier_prefix: "doc://com.apple.documentation/documentation/".to_string(),
            target_language: "occ".to_string(),
            secondary_language: "swift".to_string(),
            exempt_roles: vec!["collectionGroup".to_string(), "dictionarySymbol".to_string()],
            exempt_path_prefixes: vec!["kernel".to_string()],
            constant_separator: " = ".to_string(),
        }
    }
}

impl InflateRules {
    /// Strip `identifier_prefix` from a documentation identifier.
    pub fn strip_identifier<'a>(&self, identifier: &'a str) -> &'a str {
        identifier
            .strip_prefix(self.identifier_prefix.as_str())
            .unwrap_or(identifier)
    }
}

/// Path prefixes of symbols that have no retrievable raw document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnavailableSet {
    prefixes: Vec<String>,
}

impl UnavailableSet {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.trim().is_empty())
                .collect(),
        }
    }

    /// Parse a newline-delimited prefix list. Blank lines are ignored.
    pub fn parse(content: &str) -> Self {
        Self::new(content.lines().map(str::trim_end))
    }

    /// Load the prefix file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| InflateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&content))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.prefixes.iter().any(|p| path.starts_with(p.as_str()))
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}
