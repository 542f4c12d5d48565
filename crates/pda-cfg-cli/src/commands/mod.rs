//! CLI command implementations.

pub mod config;
pub mod convert;
pub mod graph;
pub mod inspect;
