//! Resolvers module - Platform-specific link descriptors
//!
//! Each platform registers one resolver that turns a module's canonical
//! revision into what the native build tool needs, or nothing when the module
//! has no native code for that platform.

pub mod android;
pub mod ios;

use serde::Serialize;

use crate::core::error::Result;
use crate::core::model::{Platform, SearchResult, SearchResults};

pub use android::{AndroidModule, AndroidResolver};
pub use ios::{IosModule, IosResolver};

/// Link descriptor produced by a platform resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LinkDescriptor {
    Ios(IosModule),
    Android(AndroidModule),
}

impl LinkDescriptor {
    pub fn name(&self) -> &str {
        match self {
            LinkDescriptor::Ios(m) => &m.name,
            LinkDescriptor::Android(m) => &m.name,
        }
    }
}

/// Turns a discovered module into a platform link descriptor
pub trait PlatformResolver: Send + Sync {
    fn resolve_module(&self, name: &str, result: &SearchResult) -> Result<Option<LinkDescriptor>>;
}

static IOS: IosResolver = IosResolver;
static ANDROID: AndroidResolver = AndroidResolver;

/// Look up the resolver registered for `platform`
pub fn resolver_for(platform: Platform) -> &'static dyn PlatformResolver {
    match platform {
        Platform::Ios => &IOS,
        Platform::Android => &ANDROID,
    }
}

/// Resolve every module for `platform`, dropping modules with nothing to link.
///
/// Fails on the first resolver error. Descriptors come back in module-name order.
pub fn resolve_modules(platform: Platform, results: &SearchResults) -> Result<Vec<LinkDescriptor>> {
    resolve_with(resolver_for(platform), results)
}

#[cfg(feature = "parallel")]
fn resolve_with(
    resolver: &dyn PlatformResolver,
    results: &SearchResults,
) -> Result<Vec<LinkDescriptor>> {
    use rayon::prelude::*;

    let entries: Vec<(&String, &SearchResult)> = results.iter().collect();
    let resolved: Vec<Option<LinkDescriptor>> = entries
        .par_iter()
        .map(|(name, result)| resolver.resolve_module(name, result))
        .collect::<Result<_>>()?;

    Ok(resolved.into_iter().flatten().collect())
}

#[cfg(not(feature = "parallel"))]
fn resolve_with(
    resolver: &dyn PlatformResolver,
    results: &SearchResults,
) -> Result<Vec<LinkDescriptor>> {
    let resolved = results
        .iter()
        .map(|(name, result)| resolver.resolve_module(name, result))
        .collect::<Result<Vec<_>>>()?;

    Ok(resolved.into_iter().flatten().collect())
}
