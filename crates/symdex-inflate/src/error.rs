//! Inflate errors

use std::path::PathBuf;
use thiserror::Error;

/// Inflate result type
pub type Result<T> = std::result::Result<T, InflateError>;

/// Errors raised while normalizing a symbol.
///
/// Absent fields are never errors; every variant here means either the query
/// was wrong or the document broke an assumption the engine depends on.
#[derive(Debug, Error)]
pub enum InflateError {
    #[error("malformed pointer {pointer:?}: {reason}")]
    MalformedPointer { pointer: String, reason: String },

    #[error("unexpected shape at {pointer}: expected {expected}")]
    UnexpectedShape {
        pointer: String,
        expected: &'static str,
    },

    #[error("missing required field {field} in {context}")]
    MissingField {
        field: &'static str,
        context: &'static str,
    },

    #[error("unknown content node type: {0}")]
    UnknownContentKind(String),

    #[error("declaration has no platforms")]
    MissingDeclarationPlatforms,

    #[error("no declaration for {kind} symbol")]
    MissingDeclaration { kind: String },

    #[error("no raw document for {0}")]
    RawDocumentMissing(String),

    #[error("failed to inflate {path}")]
    Symbol {
        path: String,
        #[source]
        source: Box<InflateError>,
    },

    #[error("failed to read or write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl InflateError {
    /// Attach the path of the symbol being normalized.
    pub fn in_symbol(self, path: &str) -> Self {
        match self {
            already @ InflateError::Symbol { .. } => already,
            other => InflateError::Symbol {
                path: path.to_string(),
                source: Box::new(other),
            },
        }
    }
}
