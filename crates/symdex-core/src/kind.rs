//! Symbol kind classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind assigned to a symbol by the stub-generation stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Framework,
    Class,
    Protocol,
    Method,
    Struct,
    Property,
    Union,
    Type,
    Enum,
    Constant,
    Macro,
    Function,
}

impl SymbolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Framework => "Framework",
            SymbolKind::Class => "Class",
            SymbolKind::Protocol => "Protocol",
            SymbolKind::Method => "Method",
            SymbolKind::Struct => "Struct",
            SymbolKind::Property => "Property",
            SymbolKind::Union => "Union",
            SymbolKind::Type => "Type",
            SymbolKind::Enum => "Enum",
            SymbolKind::Constant => "Constant",
            SymbolKind::Macro => "Macro",
            SymbolKind::Function => "Function",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
