//! CLI command implementations

pub mod sequences;
pub mod simulate;
