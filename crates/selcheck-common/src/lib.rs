//! Common utilities for the selcheck tools.
//!
//! This crate provides shared infrastructure used by the selector crates:
//! - **Warning System** - deduplicated, colored terminal output for unsupported features

pub mod warning;
