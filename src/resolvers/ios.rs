//! iOS resolver - Locates the module's podspec for CocoaPods

use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::diag;
use crate::core::error::Result;
use crate::core::model::SearchResult;
use crate::resolvers::{LinkDescriptor, PlatformResolver};

/// What a Podfile needs to install the module's pod
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IosModule {
    /// Package name
    pub name: String,

    /// Pod name (the podspec file stem)
    pub pod_name: String,

    /// Directory containing the podspec
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IosResolver;

impl PlatformResolver for IosResolver {
    fn resolve_module(&self, name: &str, result: &SearchResult) -> Result<Option<LinkDescriptor>> {
        let Some(podspec) = find_podspec(&result.revision.path)? else {
            return Ok(None);
        };

        let pod_name = podspec
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let path = podspec
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| result.revision.path.clone());

        Ok(Some(LinkDescriptor::Ios(IosModule {
            name: name.to_string(),
            pod_name,
            path,
        })))
    }
}

/// First `*/*.podspec` under the module directory, in file-name order
///
/// Unreadable entries are skipped with a warning; a missing module directory
/// has nothing to link.
pub fn find_podspec(module_path: &Path) -> Result<Option<PathBuf>> {
    if !module_path.is_dir() {
        diag::debug(format!("module directory missing: {}", module_path.display()));
        return Ok(None);
    }

    let walker = WalkDir::new(module_path)
        .min_depth(2)
        .max_depth(2)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let path = e.path().unwrap_or(module_path);
                diag::warn(format!("skipping {}: {}", path.display(), e));
                continue;
            }
        };

        let is_podspec = entry.file_type().is_file()
            && entry.path().extension().and_then(|e| e.to_str()) == Some("podspec");
        if is_podspec {
            return Ok(Some(entry.into_path()));
        }
    }

    Ok(None)
}
