//! Shared domain types for the IPO risk model.

pub mod types;

pub use types::*;
