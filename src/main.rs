//! module-autolinking - Discovers native modules in a JavaScript workspace
//!
//! module-autolinking provides:
//! - Search path resolution across workspace `node_modules` directories
//! - Module discovery via `unimodule.json` manifests
//! - Duplicate detection and reporting
//! - Per-platform link descriptors for iOS and Android

use anyhow::Result;
use clap::Parser;

mod cli;
mod core;
mod resolvers;
mod search;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
