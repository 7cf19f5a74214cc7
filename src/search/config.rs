//! Linking options merge
//!
//! Options come from three sources, highest priority first:
//! - options provided on the command line
//! - platform-specific options from package.json (e.g. `expoModules.ios`)
//! - options from package.json's `expoModules` field
//!
//! Each field is taken from the first source where it is present, so an
//! explicit empty list overrides lower-priority sources. Missing or malformed
//! sources are skipped.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::diag;
use crate::core::model::{PartialSearchConfig, Platform, SearchConfig, PACKAGE_DESCRIPTOR};
use crate::core::paths::find_up;
use crate::search::paths::resolve_search_paths;

/// Key of the linking options block in package.json
pub const CONFIG_KEY: &str = "expoModules";

/// Key used by older projects for the same block
pub const LEGACY_CONFIG_KEY: &str = "react-native-unimodules";

/// Load the nearest package.json above `cwd` as raw JSON
pub fn load_package_json(cwd: &Path) -> Option<Value> {
    let path = find_up(PACKAGE_DESCRIPTOR, cwd)?;
    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => {
            diag::debug(format!("cannot read {}: {}", path.display(), e));
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            diag::debug(format!("ignoring malformed {}: {}", path.display(), e));
            None
        }
    }
}

/// Extract the base and platform-specific config blocks from a package.json
pub fn config_sources(
    package_json: Option<&Value>,
    platform: Platform,
) -> (Option<PartialSearchConfig>, Option<PartialSearchConfig>) {
    let block = package_json.and_then(|pkg| {
        pkg.get(CONFIG_KEY)
            .filter(|v| !v.is_null())
            .or_else(|| pkg.get(LEGACY_CONFIG_KEY))
    });

    let base = block.and_then(parse_partial);
    let platform_specific = block
        .and_then(|b| b.get(platform.as_str()))
        .and_then(parse_partial);

    (base, platform_specific)
}

fn parse_partial(value: &Value) -> Option<PartialSearchConfig> {
    if !value.is_object() {
        return None;
    }
    match serde_json::from_value(value.clone()) {
        Ok(config) => Some(config),
        Err(e) => {
            diag::debug(format!("ignoring malformed linking options: {}", e));
            None
        }
    }
}

/// Pick the first value present among the sources, in order
fn pick<T>(
    sources: &[Option<&PartialSearchConfig>],
    field: impl Fn(&PartialSearchConfig) -> Option<&Vec<T>>,
) -> Option<Vec<T>>
where
    T: Clone,
{
    sources
        .iter()
        .flatten()
        .find_map(|config| field(config))
        .cloned()
}

/// Merge provided options with the ones in package.json and resolve search roots
pub fn merge_linking_options(
    platform: Platform,
    provided: &PartialSearchConfig,
    cwd: &Path,
) -> SearchConfig {
    let package_json = load_package_json(cwd);
    let (base, platform_specific) = config_sources(package_json.as_ref(), platform);

    let sources = [Some(provided), platform_specific.as_ref(), base.as_ref()];

    let search_paths: Vec<PathBuf> =
        pick(&sources, |c| c.search_paths.as_ref()).unwrap_or_default();

    SearchConfig {
        search_paths: resolve_search_paths(&search_paths, cwd),
        ignore_paths: pick(&sources, |c| c.ignore_paths.as_ref()),
        exclude: pick(&sources, |c| c.exclude.as_ref()),
    }
}
