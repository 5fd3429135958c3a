//! Declarations, parameters and return values from `/primaryContentSections`.

use serde_json::Value;
use std::collections::BTreeMap;
use symdex_core::Parameter;

use crate::pointer::{find_with_prop, query, query_array, query_str};
use crate::render::Renderer;
use crate::{InflateError, Result};

/// Declaration text after reconciliation: one canonical form, or per platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Reconciled {
    #[default]
    None,
    Canonical(String),
    PerPlatform(BTreeMap<String, String>),
}

/// Collect the declarations tagged with `language`, keyed by lowercase platform.
///
/// A matching declaration without a platform list is an error.
pub fn extract_declarations(
    sections: &[Value],
    language: &str,
) -> Result<BTreeMap<String, String>> {
    let mut by_platform = BTreeMap::new();
    let Some(section) = find_with_prop(sections, "kind", "declarations") else {
        return Ok(by_platform);
    };
    for decl in query_array(section, "/declarations")?.unwrap_or_default() {
        let Some(languages) = query_array(decl, "/languages")? else {
            continue;
        };
        if !languages.iter().any(|l| l.as_str() == Some(language)) {
            continue;
        }
        let text = build_from_tokens(query_array(decl, "/tokens")?.unwrap_or_default())?;
        let platforms = query_array(decl, "/platforms")?
            .filter(|p| !p.is_empty())
            .ok_or(InflateError::MissingDeclarationPlatforms)?;
        for platform in platforms {
            let platform = platform.as_str().ok_or_else(|| InflateError::UnexpectedShape {
                pointer: "/platforms".to_string(),
                expected: "string",
            })?;
            by_platform.insert(platform.to_lowercase(), text.clone());
        }
    }
    Ok(by_platform)
}

/// Concatenate each token's `text`, in order.
pub fn build_from_tokens(tokens: &[Value]) -> Result<String> {
    let mut out = String::new();
    for token in tokens {
        out.push_str(query_str(token, "/text")?.unwrap_or_default());
    }
    Ok(out)
}

/// Collapse identical per-platform declarations into a single one.
pub fn reconcile(by_platform: BTreeMap<String, String>) -> Reconciled {
    let mut values = by_platform.values();
    let Some(first) = values.next() else {
        return Reconciled::None;
    };
    if values.all(|v| v == first) {
        Reconciled::Canonical(first.clone())
    } else {
        Reconciled::PerPlatform(by_platform)
    }
}

/// Render the content section anchored at `return_value`. Last match wins.
pub fn extract_return(sections: &[Value], renderer: &Renderer<'_>) -> Result<String> {
    let mut ret = String::new();
    for section in sections {
        if query_str(section, "/content/0/anchor")? == Some("return_value") {
            ret = renderer.render(query(section, "/content/1/inlineContent")?)?;
        }
    }
    Ok(ret)
}

/// Parameters from the `parameters` section, in document order.
pub fn extract_parameters(sections: &[Value], renderer: &Renderer<'_>) -> Result<Vec<Parameter>> {
    let Some(section) = find_with_prop(sections, "kind", "parameters") else {
        return Ok(Vec::new());
    };
    query_array(section, "/parameters")?
        .unwrap_or_default()
        .iter()
        .map(|param| -> Result<Parameter> {
            let name = query_str(param, "/name")?.ok_or(InflateError::MissingField {
                field: "name",
                context: "parameter",
            })?;
            Ok(Parameter {
                name: name.to_string(),
                description: renderer.render(query(param, "/content/0/inlineContent")?)?,
            })
        })
        .collect()
}
