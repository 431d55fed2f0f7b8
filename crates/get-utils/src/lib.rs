//! Filesystem utilities shared across the get package manager crates.

pub mod error;
pub mod fs;
