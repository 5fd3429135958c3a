//! Normalization engine for symdex.
//!
//! Turns a `Stub` plus its raw metadata document into a validated `Symbol`:
//! - [`pointer`] navigates the untyped document
//! - [`render`] flattens rich-content node sequences into plain text
//! - [`resolve`] maps cross-reference identifiers to display names
//! - [`platform`] parses platform availability entries
//! - [`declaration`] extracts and reconciles declarations, parameters, return value
//! - [`validate`] enforces the declaration-presence check
//! - [`normalize`] composes all of the above
//!
//! Rules that used to be hardcoded (exemptions, prefixes, target language) live
//! in [`InflateRules`] and are passed in explicitly.

pub mod declaration;
mod error;
pub mod normalize;
pub mod platform;
pub mod pointer;
pub mod render;
pub mod resolve;
mod rules;
mod store;
pub mod validate;

pub use error::{InflateError, Result};
pub use normalize::Normalizer;
pub use rules::{InflateRules, UnavailableSet};
pub use store::{Corpus, MemoryStore, RawSource, SymbolStore};
