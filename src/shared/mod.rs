//! Shared components - common types, errors, config and utilities

pub mod types;
pub mod errors;
pub mod utils;
pub mod config;
