//! Cross-reference resolution.
//!
//! Reference identifiers are documentation URIs whose path segments carry a
//! numeric disambiguator (`1483329-addsubview`). Resolution strips the URI
//! prefix and the disambiguators, then looks the resulting path up in the
//! store. Anything that cannot be found resolves to `[<path>]`.

use crate::{InflateRules, SymbolStore};

/// Resolves reference identifiers against a [`SymbolStore`].
pub struct Resolver<'a> {
    store: &'a dyn SymbolStore,
    rules: &'a InflateRules,
}

impl<'a> Resolver<'a> {
    pub fn new(store: &'a dyn SymbolStore, rules: &'a InflateRules) -> Self {
        Self { store, rules }
    }

    /// Display name for `identifier`, or a bracketed placeholder.
    pub fn resolve(&self, identifier: &str) -> String {
        let path = self.symbol_path(identifier);
        match self.store.get(&path) {
            Some(stub) => stub.name,
            None => {
                tracing::debug!(identifier, path = %path, "unresolved reference");
                format!("[{path}]")
            }
        }
    }

    /// Corpus path an identifier points at.
    pub fn symbol_path(&self, identifier: &str) -> String {
        let relative = self.rules.strip_identifier(identifier);
        relative
            .split('/')
            .filter(|segment| !segment.is_empty())
            .enumerate()
            .map(|(idx, segment)| if idx == 0 { segment } else { strip_disambiguator(segment) })
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Keep only the text after the last hyphen, when both sides are non-empty.
fn strip_disambiguator(segment: &str) -> &str {
    match segment.rfind('-') {
        Some(dash) if dash > 0 && dash < segment.len() - 1 => &segment[dash + 1..],
        _ => segment,
    }
}
