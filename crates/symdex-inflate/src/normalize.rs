//! Stub + raw document -> normalized symbol.

use serde_json::Value;
use symdex_core::{Stub, Symbol, SymbolKind};

use crate::declaration::{self, Reconciled};
use crate::platform::parse_platforms;
use crate::pointer::{find_with_prop, query, query_array, query_str};
use crate::render::Renderer;
use crate::resolve::Resolver;
use crate::validate::validate;
use crate::{InflateError, InflateRules, RawSource, Result, SymbolStore, UnavailableSet};

/// Normalizes stubs against a corpus under a fixed rule set.
pub struct Normalizer<'a> {
    rules: &'a InflateRules,
    unavailable: &'a UnavailableSet,
    store: &'a dyn SymbolStore,
}

impl<'a> Normalizer<'a> {
    pub fn new(
        rules: &'a InflateRules,
        unavailable: &'a UnavailableSet,
        store: &'a dyn SymbolStore,
    ) -> Self {
        Self {
            rules,
            unavailable,
            store,
        }
    }

    /// Normalize `stub`, loading its raw document from `raw`.
    ///
    /// Stubs under a known-unavailable prefix come back unchanged and their
    /// raw document is never requested. Errors carry the stub's path.
    pub fn normalize(&self, stub: Stub, raw: &dyn RawSource) -> Result<Symbol> {
        if self.unavailable.contains(&stub.path) {
            tracing::debug!(path = %stub.path, "known unavailable, passing through");
            return Ok(Symbol::from(stub));
        }
        let path = stub.path.clone();
        raw.raw(&path)
            .and_then(|doc| self.inflate(stub, &doc))
            .map_err(|e| e.in_symbol(&path))
    }

    /// Populate every derived field of `stub` from `doc`, then validate.
    pub fn inflate(&self, stub: Stub, doc: &Value) -> Result<Symbol> {
        let resolver = Resolver::new(self.store, self.rules);
        let renderer = Renderer::new(&resolver);

        let mut sym = Symbol::from(stub);
        if sym.kind == SymbolKind::Constant {
            sym.name = self.clean_constant_name(&sym.name).to_string();
        }

        sym.description = renderer
            .render(query(doc, "/abstract")?)?
            .trim_matches(' ')
            .to_string();
        sym.r#type = query_str(doc, "/metadata/roleHeading")?
            .unwrap_or_default()
            .to_string();
        sym.platforms = parse_platforms(query_array(doc, "/metadata/platforms")?)?;
        sym.modules = parse_modules(doc)?;
        sym.parent = query_str(doc, "/metadata/parent/title")?
            .unwrap_or_default()
            .to_string();

        if let Some(sections) = query_array(doc, "/primaryContentSections")? {
            sym.parameters = declaration::extract_parameters(sections, &renderer)?;
            sym.r#return = declaration::extract_return(sections, &renderer)?;
            let by_platform =
                declaration::extract_declarations(sections, &self.rules.target_language)?;
            match declaration::reconcile(by_platform) {
                Reconciled::None => {}
                Reconciled::Canonical(text) => sym.declaration = text,
                Reconciled::PerPlatform(map) => sym.declarations = map,
            }
        }

        sym.deprecated = query(doc, "/deprecationSummary")?.is_some();
        sym.inherits_from = self.inherits_from(doc)?;

        validate(&sym, doc, self.rules)?;
        tracing::debug!(path = %sym.path, kind = %sym.kind, "inflated");
        Ok(sym)
    }

    /// Constant names sometimes embed their value (`kFoo = 3`); keep the name.
    fn clean_constant_name<'n>(&self, name: &'n str) -> &'n str {
        match name.split_once(self.rules.constant_separator.as_str()) {
            Some((head, _)) if !self.rules.constant_separator.is_empty() => head,
            _ => name,
        }
    }

    fn inherits_from(&self, doc: &Value) -> Result<String> {
        let Some(sections) = query_array(doc, "/relationshipsSections")? else {
            return Ok(String::new());
        };
        let Some(section) = find_with_prop(sections, "type", "inheritsFrom") else {
            return Ok(String::new());
        };
        Ok(query_str(section, "/identifiers/0")?
            .map(|id| self.rules.strip_identifier(id).to_string())
            .unwrap_or_default())
    }
}

fn parse_modules(doc: &Value) -> Result<Vec<String>> {
    query_array(doc, "/metadata/modules")?
        .unwrap_or_default()
        .iter()
        .map(|module| -> Result<String> {
            query_str(module, "/name")?
                .map(str::to_string)
                .ok_or(InflateError::MissingField {
                    field: "name",
                    context: "module",
                })
        })
        .collect()
}
