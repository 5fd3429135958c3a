//! CLI command implementations.

pub mod inflate;
pub mod lookup;
pub mod pack;
