//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Discovery model (revisions, search results, manifests)
//! - Error taxonomy
//! - Path normalization and lookup utilities
//! - Rendering functions for different output formats
//! - Verbose diagnostics

pub mod diag;
pub mod error;
pub mod model;
pub mod paths;
pub mod render;
