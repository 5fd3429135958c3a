//! Core data types for symdex.
//!
//! This crate defines the vocabulary shared by every stage of the pipeline:
//! - `Stub` is the identity record written by the stub-generation stage
//! - `Symbol` is the normalized, cross-referenced record produced by
//!   `symdex-inflate` and queried by `symdex-archive`
//! - `Platform` and `Parameter` are the typed pieces of a `Symbol`

mod kind;
mod symbol;

pub use kind::SymbolKind;
pub use symbol::{Parameter, Platform, Stub, Symbol};
