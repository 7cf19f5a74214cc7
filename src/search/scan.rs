//! Module discovery
//!
//! Walks every search root for `unimodule.json` manifests, loads the
//! adjacent package.json and groups the discovered revisions by module name.

use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::diag;
use crate::core::error::{AutolinkError, Result};
use crate::core::model::{
    ModuleManifest, ModuleRevision, PackageDescriptor, PartialSearchConfig, Platform,
    SearchConfig, SearchResult, SearchResults, MODULE_MANIFEST, PACKAGE_DESCRIPTOR,
};
use crate::search::config::merge_linking_options;

/// A module found under one search root
#[derive(Debug, Clone)]
struct Discovery {
    name: String,
    revision: ModuleRevision,
}

/// Search for modules to link, merging `provided` with the workspace config
pub fn find_modules(
    platform: Platform,
    provided: &PartialSearchConfig,
    cwd: &Path,
) -> Result<SearchResults> {
    let config = merge_linking_options(platform, provided, cwd);
    diag::debug(format!(
        "search config: {}",
        serde_json::to_string(&config).unwrap_or_default()
    ));
    scan_modules(platform, &config)
}

/// Scan the configured search roots for modules supporting `platform`
pub fn scan_modules(platform: Platform, config: &SearchConfig) -> Result<SearchResults> {
    let per_root = discover_all(platform, config)?;

    let mut revisions: BTreeMap<String, Vec<ModuleRevision>> = BTreeMap::new();
    for discovery in per_root.into_iter().flatten() {
        let known = revisions.entry(discovery.name).or_default();
        if known.iter().all(|r| r.path != discovery.revision.path) {
            known.push(discovery.revision);
        }
    }

    Ok(reduce_revisions(revisions))
}

/// Resolve revisions to the canonical one (first found) and duplicates
pub fn reduce_revisions(revisions: BTreeMap<String, Vec<ModuleRevision>>) -> SearchResults {
    revisions
        .into_iter()
        .filter_map(|(name, revisions)| {
            let mut iter = revisions.into_iter();
            let mut result = SearchResult::new(iter.next()?);
            result.duplicates = iter.collect();
            Some((name, result))
        })
        .collect()
}

#[cfg(feature = "parallel")]
fn discover_all(platform: Platform, config: &SearchConfig) -> Result<Vec<Vec<Discovery>>> {
    use rayon::prelude::*;

    config
        .search_paths
        .par_iter()
        .map(|root| discover_in_root(root, platform, config))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn discover_all(platform: Platform, config: &SearchConfig) -> Result<Vec<Vec<Discovery>>> {
    config
        .search_paths
        .iter()
        .map(|root| discover_in_root(root, platform, config))
        .collect()
}

/// Discover modules under a single search root, shallowest manifests first
fn discover_in_root(
    root: &Path,
    platform: Platform,
    config: &SearchConfig,
) -> Result<Vec<Discovery>> {
    if !root.is_dir() {
        diag::debug(format!("skipping missing search path {}", root.display()));
        return Ok(Vec::new());
    }

    let mut manifests = find_manifests(root, config.ignore_paths.as_deref())?;
    manifests.sort_by(|a, b| {
        a.components()
            .count()
            .cmp(&b.components().count())
            .then_with(|| a.cmp(b))
    });

    let mut discoveries = Vec::new();
    for manifest_path in manifests {
        let Some(parent) = manifest_path.parent() else {
            continue;
        };
        let module_path =
            fs::canonicalize(parent).map_err(|e| AutolinkError::filesystem(parent, e))?;

        let manifest: ModuleManifest = read_json(&module_path.join(MODULE_MANIFEST), |path, source| {
            AutolinkError::ManifestParse { path, source }
        })?;
        let descriptor: PackageDescriptor =
            read_json(&module_path.join(PACKAGE_DESCRIPTOR), |path, source| {
                AutolinkError::DescriptorParse { path, source }
            })?;

        if config.is_excluded(&descriptor.name) {
            diag::debug(format!("excluded {}", descriptor.name));
            continue;
        }
        if !manifest.supports(platform) {
            diag::debug(format!("{} does not support {}", descriptor.name, platform));
            continue;
        }

        discoveries.push(Discovery {
            name: descriptor.name,
            revision: ModuleRevision {
                path: module_path,
                version: descriptor.version,
            },
        });
    }

    Ok(discoveries)
}

/// Walk `root` for manifest files, skipping hidden entries and ignore patterns
fn find_manifests(root: &Path, ignore_paths: Option<&[String]>) -> Result<Vec<PathBuf>> {
    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false).hidden(true).follow_links(true);

    if let Some(patterns) = ignore_paths {
        let mut overrides = OverrideBuilder::new(root);
        for pattern in patterns {
            overrides
                .add(&format!("!{}", pattern))
                .map_err(|source| AutolinkError::InvalidIgnorePattern {
                    pattern: pattern.clone(),
                    source,
                })?;
        }
        let overrides = overrides
            .build()
            .map_err(|source| AutolinkError::InvalidIgnorePattern {
                pattern: patterns.join(", "),
                source,
            })?;
        builder.overrides(overrides);
    }

    let mut manifests = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                diag::warn(format!("skipping unreadable entry: {}", e));
                continue;
            }
        };

        if entry.file_name() != MODULE_MANIFEST {
            continue;
        }
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }

        manifests.push(entry.into_path());
    }

    Ok(manifests)
}

fn read_json<T, F>(path: &Path, parse_error: F) -> Result<T>
where
    T: DeserializeOwned,
    F: FnOnce(PathBuf, serde_json::Error) -> AutolinkError,
{
    let content = fs::read_to_string(path).map_err(|e| AutolinkError::filesystem(path, e))?;
    serde_json::from_str(&content).map_err(|e| parse_error(path.to_path_buf(), e))
}
