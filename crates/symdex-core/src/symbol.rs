//! Stub and normalized symbol records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::SymbolKind;

/// Identity-only record produced upstream, one per symbol path.
///
/// Deserializing a normalized record as a `Stub` ignores the derived fields,
/// which is what lets the reference resolver read records and stubs alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Stub {
    pub name: String,
    pub path: String,
    pub kind: SymbolKind,
}

/// Availability of a symbol on one target platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Platform {
    pub name: String,
    pub introduced_at: String,
    pub current: String,
    pub beta: bool,
    pub deprecated: bool,
    /// Only meaningful when `deprecated` is set; may be empty even then.
    pub deprecated_at: String,
}

/// A documented parameter of a callable symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Parameter {
    pub name: String,
    pub description: String,
}

/// Fully normalized symbol record.
///
/// At most one of `declaration` and `declarations` is populated: identical
/// per-platform declarations collapse into `declaration`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Symbol {
    pub name: String,
    pub path: String,
    pub kind: SymbolKind,

    #[serde(default)]
    pub description: String,
    /// Role heading, e.g. "Instance Method". Empty when the document has none.
    #[serde(default)]
    pub r#type: String,
    /// Display title of the enclosing type.
    #[serde(default)]
    pub parent: String,
    #[serde(default)]
    pub modules: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub declaration: String,
    /// Lowercase platform name to declaration text.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub declarations: BTreeMap<String, String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub r#return: String,
    /// Normalized path of the parent type.
    #[serde(default)]
    pub inherits_from: String,
}

impl Symbol {
    /// True when declaration text was recorded in either form.
    pub fn has_declaration(&self) -> bool {
        !self.declaration.is_empty() || !self.declarations.is_empty()
    }

    /// The identity part of this record.
    pub fn stub(&self) -> Stub {
        Stub {
            name: self.name.clone(),
            path: self.path.clone(),
            kind: self.kind,
        }
    }
}

impl From<Stub> for Symbol {
    fn from(stub: Stub) -> Self {
        Self {
            name: stub.name,
            path: stub.path,
            kind: stub.kind,
            description: String::new(),
            r#type: String::new(),
            parent: String::new(),
            modules: Vec::new(),
            platforms: Vec::new(),
            deprecated: false,
            declaration: String::new(),
            declarations: BTreeMap::new(),
            parameters: Vec::new(),
            r#return: String::new(),
            inherits_from: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stub_field_names() {
        let stub: Stub = serde_json::from_value(json!({
            "Name": "addSubview:",
            "Path": "appkit/nsview/addsubview",
            "Kind": "Method"
        }))
        .unwrap();
        assert_eq!(stub.kind, SymbolKind::Method);
        assert_eq!(stub.path, "appkit/nsview/addsubview");
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let res: Result<Stub, _> = serde_json::from_value(json!({
            "Name": "x",
            "Path": "a/x",
            "Kind": "Sample"
        }));
        assert!(res.is_err());
    }

    #[test]
    fn test_stub_deserializes_as_symbol() {
        let sym: Symbol = serde_json::from_value(json!({
            "Name": "NSView",
            "Path": "appkit/nsview",
            "Kind": "Class"
        }))
        .unwrap();
        assert_eq!(sym, Symbol::from(sym.stub()));
    }

    #[test]
    fn test_record_deserializes_as_stub() {
        let mut sym = Symbol::from(Stub {
            name: "NSView".into(),
            path: "appkit/nsview".into(),
            kind: SymbolKind::Class,
        });
        sym.declaration = "@interface NSView : NSResponder".into();
        sym.r#type = "Class".into();
        let value = serde_json::to_value(&sym).unwrap();
        let stub: Stub = serde_json::from_value(value).unwrap();
        assert_eq!(stub, sym.stub());
    }

    #[test]
    fn test_only_one_declaration_form_serialized() {
        let mut sym = Symbol::from(Stub {
            name: "foo".into(),
            path: "fw/foo".into(),
            kind: SymbolKind::Function,
        });
        let value = serde_json::to_value(&sym).unwrap();
        assert!(value.get("Declaration").is_none());
        assert!(value.get("Declarations").is_none());

        sym.declarations.insert("ios".into(), "void foo(int);".into());
        sym.declarations.insert("macos".into(), "void foo(long);".into());
        let value = serde_json::to_value(&sym).unwrap();
        assert!(value.get("Declaration").is_none());
        assert_eq!(value["Declarations"]["macos"], "void foo(long);");
        assert_eq!(value["Type"], "");
        assert_eq!(value["Return"], "");
    }

    #[test]
    fn test_has_declaration_either_form() {
        let mut sym = Symbol::from(Stub {
            name: "foo".into(),
            path: "fw/foo".into(),
            kind: SymbolKind::Function,
        });
        assert!(!sym.has_declaration());
        sym.declaration = "void foo(void);".into();
        assert!(sym.has_declaration());
        sym.declaration.clear();
        sym.declarations.insert("ios".into(), "void foo(int);".into());
        assert!(sym.has_declaration());
    }
}
