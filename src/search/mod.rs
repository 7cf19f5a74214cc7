//! Search module - Module discovery pipeline
//!
//! Provides:
//! - paths: Search root resolution (explicit or workspace `node_modules`)
//! - config: Merging of CLI and package.json options
//! - scan: Manifest discovery and revision grouping
//! - verify: Duplicate-module reporting

pub mod config;
pub mod paths;
pub mod scan;
pub mod verify;
