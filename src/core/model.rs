//! Discovery Model
//!
//! Types shared by the search pipeline, the resolvers and the renderers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::core::error::AutolinkError;

/// File name of the module manifest
pub const MODULE_MANIFEST: &str = "unimodule.json";

/// File name of the package descriptor
pub const PACKAGE_DESCRIPTOR: &str = "package.json";

/// Target platform a module can be linked into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = AutolinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            _ => Err(AutolinkError::PlatformNotSupported(s.to_string())),
        }
    }
}

/// One merge source for the search configuration.
///
/// Every field is optional; a field that is absent or empty defers to the
/// next source in priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialSearchConfig {
    #[serde(default, alias = "modulesPaths", skip_serializing_if = "Option::is_none")]
    pub search_paths: Option<Vec<PathBuf>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_paths: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
}

/// Fully merged search configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConfig {
    /// Absolute search roots, in priority order
    pub search_paths: Vec<PathBuf>,

    /// Glob patterns (relative to each search root) to skip while walking
    pub ignore_paths: Option<Vec<String>>,

    /// Package names that are never linked
    pub exclude: Option<Vec<String>>,
}

impl SearchConfig {
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude
            .as_ref()
            .map(|names| names.iter().any(|n| n == name))
            .unwrap_or(false)
    }
}

/// A discovered location of a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRevision {
    /// Canonical (symlink-free) absolute directory of the module
    pub path: PathBuf,

    /// Version from the module's package.json
    pub version: String,
}

/// Canonical revision of a module plus every other location it was found at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(flatten)]
    pub revision: ModuleRevision,

    /// Other revisions, in discovery order
    pub duplicates: Vec<ModuleRevision>,
}

impl SearchResult {
    pub fn new(revision: ModuleRevision) -> Self {
        Self {
            revision,
            duplicates: Vec::new(),
        }
    }

    pub fn has_duplicates(&self) -> bool {
        !self.duplicates.is_empty()
    }
}

/// Search results keyed by module name
pub type SearchResults = BTreeMap<String, SearchResult>;

/// Contents of `unimodule.json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModuleManifest {
    /// Supported platforms; missing or `null` supports nothing
    #[serde(default)]
    pub platforms: Option<Vec<String>>,
}

impl ModuleManifest {
    pub fn supports(&self, platform: Platform) -> bool {
        self.platforms
            .iter()
            .flatten()
            .any(|p| p == platform.as_str())
    }
}

/// The subset of `package.json` needed to identify a module
#[derive(Debug, Clone, Deserialize)]
pub struct PackageDescriptor {
    pub name: String,

    #[serde(default)]
    pub version: String,
}
