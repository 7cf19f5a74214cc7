//! Android resolver - Exposes the module's Gradle project

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::path::PathBuf;

use crate::core::error::Result;
use crate::core::model::SearchResult;
use crate::resolvers::{LinkDescriptor, PlatformResolver};

static NON_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\W+").expect("Invalid NON_WORD_RE regex"));

const BUILD_SCRIPTS: [&str; 2] = ["build.gradle", "build.gradle.kts"];

/// What settings.gradle needs to include the module's project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AndroidModule {
    /// Package name
    pub name: String,

    /// Gradle project name derived from the package name
    pub project_name: String,

    /// The module's `android` directory
    pub source_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AndroidResolver;

impl PlatformResolver for AndroidResolver {
    fn resolve_module(&self, name: &str, result: &SearchResult) -> Result<Option<LinkDescriptor>> {
        let source_dir = result.revision.path.join("android");
        let has_build_script = BUILD_SCRIPTS
            .iter()
            .any(|script| source_dir.join(script).is_file());

        if !has_build_script {
            return Ok(None);
        }

        Ok(Some(LinkDescriptor::Android(AndroidModule {
            name: name.to_string(),
            project_name: project_name(name),
            source_dir,
        })))
    }
}

/// `@scope/my.pkg` -> `scope-my-pkg`
pub fn project_name(package_name: &str) -> String {
    let unscoped = package_name.strip_prefix('@').unwrap_or(package_name);
    NON_WORD_RE.replace_all(unscoped, "-").into_owned()
}
