//! Declaration-presence check.
//!
//! Every documented, non-deprecated API symbol is expected to carry a
//! declaration in the target language. A symbol without one is an error
//! unless an exemption in [`InflateRules`] applies.

use serde_json::Value;
use symdex_core::{Symbol, SymbolKind};

use crate::pointer::query_str;
use crate::{InflateError, InflateRules, Result};

/// Why a symbol was let through without a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exemption {
    Role,
    PathPrefix,
    SecondaryLanguage,
}

/// Fail if `symbol` lacks a declaration and no exemption applies.
pub fn validate(symbol: &Symbol, doc: &Value, rules: &InflateRules) -> Result<()> {
    if !requires_declaration(symbol) || symbol.has_declaration() {
        return Ok(());
    }
    if let Some(exemption) = exemption(symbol, doc, rules)? {
        tracing::debug!(path = %symbol.path, ?exemption, "declaration check exempt");
        return Ok(());
    }
    Err(InflateError::MissingDeclaration {
        kind: symbol.kind.to_string(),
    })
}

fn requires_declaration(symbol: &Symbol) -> bool {
    symbol.kind != SymbolKind::Framework && !symbol.deprecated && !symbol.r#type.is_empty()
}

/// First exemption that applies to `symbol`, if any.
pub fn exemption(symbol: &Symbol, doc: &Value, rules: &InflateRules) -> Result<Option<Exemption>> {
    let role = query_str(doc, "/metadata/role")?;
    if role.is_some_and(|role| rules.exempt_roles.iter().any(|r| r == role)) {
        return Ok(Some(Exemption::Role));
    }
    if rules
        .exempt_path_prefixes
        .iter()
        .any(|p| symbol.path.starts_with(p.as_str()))
    {
        return Ok(Some(Exemption::PathPrefix));
    }
    if query_str(doc, "/identifier/interfaceLanguage")? == Some(rules.secondary_language.as_str()) {
        return Ok(Some(Exemption::SecondaryLanguage));
    }
    Ok(None)
}
