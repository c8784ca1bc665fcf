//! CLI command handlers

pub mod assign;
pub mod list;
