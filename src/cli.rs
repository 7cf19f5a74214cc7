//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::diag;
use crate::core::error::AutolinkError;
use crate::core::model::{PartialSearchConfig, Platform, SearchResults};
use crate::core::render::{OutputFormat, RenderConfig, Renderer};
use crate::resolvers::resolve_modules;
use crate::search::scan::find_modules;
use crate::search::verify::verify_search_results;

/// module-autolinking - find native modules in a JavaScript workspace and link them.
#[derive(Parser, Debug)]
#[command(name = "module-autolinking")]
#[command(
    author,
    version,
    about,
    long_about = r#"module-autolinking searches a workspace for native modules (directories
containing a unimodule.json manifest next to a package.json) and prepares them
for autolinking into iOS and Android projects.

Search options are merged from three sources, highest priority first:
- command-line options
- the platform block in package.json (e.g. expoModules.ios)
- the expoModules block in package.json (legacy: react-native-unimodules)

Examples:
    module-autolinking find --platform ios --json
    module-autolinking list ../shared/node_modules
    module-autolinking verify --exclude expo-legacy
"#
)]
pub struct Cli {
    /// Working directory for module lookup.
    #[arg(
        long,
        global = true,
        default_value = ".",
        value_name = "ROOT",
        long_help = "Working directory for module lookup (defaults to the current directory).\n\n\
Relative search paths are resolved against it, the nearest package.json above it\n\
provides the linking options, and verify renders paths relative to it."
    )]
    pub root: PathBuf,

    /// Output format (json/jsonl/md).
    #[arg(
        long,
        global = true,
        default_value = "json",
        value_name = "FORMAT",
        long_help = "Select the output format for find and list.\n\n\
Supported values:\n\
- json (default)\n\
- jsonl: one object per module\n\
- md (markdown)"
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Disable colored output.
    #[arg(
        long,
        global = true,
        long_help = "Disable colored output. This is useful when piping to files or when your\n\
terminal does not support ANSI colors."
    )]
    pub no_color: bool,

    /// Verbose mode (more diagnostics).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Print search diagnostics to stderr: discovered workspace packages, the\n\
merged search config, skipped search paths and filtered modules."
    )]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every searching command
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Paths to search for modules (default: workspace node_modules).
    #[arg(value_name = "PATHS", num_args = 0..)]
    pub paths: Vec<PathBuf>,

    /// The platform that the resulting modules must support.
    #[arg(
        short,
        long,
        default_value = "ios",
        env = "AUTOLINKING_PLATFORM",
        value_name = "PLATFORM",
        long_help = "The platform that the resulting modules must support.\n\n\
Available options: ios, android"
    )]
    pub platform: String,

    /// Paths to ignore when looking up for modules.
    #[arg(
        short,
        long,
        value_name = "GLOB",
        num_args = 1..,
        long_help = "Glob patterns, relative to each search path, that are skipped while\n\
looking up modules.\n\n\
Example: --ignore-paths fixtures '**/e2e/**'"
    )]
    pub ignore_paths: Option<Vec<String>>,

    /// Package names to exclude when looking up for modules.
    #[arg(short, long, value_name = "NAME", num_args = 1..)]
    pub exclude: Option<Vec<String>>,
}

impl SearchArgs {
    fn platform(&self) -> Result<Platform, AutolinkError> {
        self.platform.parse()
    }

    fn to_partial_config(&self) -> PartialSearchConfig {
        PartialSearchConfig {
            search_paths: (!self.paths.is_empty()).then(|| self.paths.clone()),
            ignore_paths: self.ignore_paths.clone(),
            exclude: self.exclude.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for modules and resolve them to platform link descriptors.
    #[command(
        long_about = "Search for modules supporting the platform and resolve each canonical\n\
revision to what the native build tool needs (a podspec on iOS, a Gradle project\n\
on Android). Modules with nothing to link are left out.\n\n\
Examples:\n\
  module-autolinking find --platform ios --json\n\
  module-autolinking find -p android --exclude expo-legacy\n"
    )]
    Find {
        #[command(flatten)]
        search: SearchArgs,

        /// Output the results in plain single-line JSON.
        #[arg(short, long)]
        json: bool,
    },

    /// Search for modules and print the search results.
    #[command(
        long_about = "Print every discovered module with its canonical path and version and\n\
every duplicate location, keyed by module name.\n\n\
Example:\n\
  module-autolinking list --format md\n"
    )]
    List {
        #[command(flatten)]
        search: SearchArgs,
    },

    /// Search for modules and report modules found at multiple directories.
    #[command(
        long_about = "Report every module found at more than one location. The first discovered\n\
location is the one that gets linked.\n\n\
Example:\n\
  module-autolinking verify\n"
    )]
    Verify {
        #[command(flatten)]
        search: SearchArgs,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }
    diag::set_verbose(cli.verbose);

    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let render_config = RenderConfig::with_pretty(format, cli.pretty);

    let root = cli
        .root
        .canonicalize()
        .with_context(|| format!("Invalid root directory: {:?}", cli.root))?;

    match cli.command {
        Commands::Find { search, json } => {
            let config = if json {
                RenderConfig::new(OutputFormat::Json)
            } else {
                render_config
            };
            run_find(&root, &search, config)
        }
        Commands::List { search } => run_list(&root, &search, render_config),
        Commands::Verify { search } => run_verify(&root, &search),
    }
}

fn search(root: &Path, args: &SearchArgs) -> Result<(Platform, SearchResults)> {
    let platform = args.platform().map_err(report)?;
    let results = find_modules(platform, &args.to_partial_config(), root)
        .map_err(report)
        .context("Module search failed")?;
    diag::debug(format!("found {} modules for {}", results.len(), platform));
    Ok((platform, results))
}

fn report(err: AutolinkError) -> AutolinkError {
    diag::debug(format!("error [{}]", err.code()));
    err
}

/// Run the find command
pub fn run_find(root: &Path, args: &SearchArgs, config: RenderConfig) -> Result<()> {
    let (platform, results) = search(root, args)?;
    let descriptors = resolve_modules(platform, &results)
        .map_err(report)
        .with_context(|| format!("Failed to resolve modules for {}", platform))?;
    for descriptor in &descriptors {
        diag::debug(format!("linking {}", descriptor.name()));
    }

    let renderer = Renderer::with_config(config);
    println!("{}", renderer.render_descriptors(&descriptors));
    Ok(())
}

/// Run the list command
pub fn run_list(root: &Path, args: &SearchArgs, config: RenderConfig) -> Result<()> {
    let (_, results) = search(root, args)?;

    let renderer = Renderer::with_config(config);
    let stdout = std::io::stdout();
    renderer
        .write_results(&results, stdout.lock())
        .context("Failed to write search results")?;
    Ok(())
}

/// Run the verify command
pub fn run_verify(root: &Path, args: &SearchArgs) -> Result<()> {
    let (_, results) = search(root, args)?;
    let logs = verify_search_results(&results, root);

    let mut stdout = std::io::stdout().lock();
    if logs.is_empty() {
        writeln!(stdout, "{}", "💪 Duplicated modules not found.".green())?;
    } else {
        writeln!(stdout, "{}", logs)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_find_arguments() {
        let cli = Cli::try_parse_from([
            "module-autolinking",
            "find",
            "../mods",
            "--platform",
            "android",
            "--exclude",
            "a",
            "b",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Commands::Find { search, json } => {
                assert!(json);
                assert_eq!(search.paths, vec![PathBuf::from("../mods")]);
                assert_eq!(search.platform().unwrap(), Platform::Android);
                assert_eq!(
                    search.exclude,
                    Some(vec!["a".to_string(), "b".to_string()])
                );
                assert_eq!(search.ignore_paths, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "module-autolinking",
            "verify",
            "--root",
            "/tmp",
            "--no-color",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.root, PathBuf::from("/tmp"));
        assert!(cli.no_color);
        assert!(cli.verbose);
    }

    #[test]
    fn test_unknown_platform_is_rejected() {
        let cli = Cli::try_parse_from(["module-autolinking", "list", "-p", "web"]).unwrap();
        let Commands::List { search } = cli.command else {
            panic!("expected list");
        };
        assert!(matches!(
            search.platform(),
            Err(AutolinkError::PlatformNotSupported(_))
        ));
    }

    #[test]
    fn test_partial_config_from_args() {
        let cli = Cli::try_parse_from(["module-autolinking", "list", "-i", "fixtures"]).unwrap();
        let Commands::List { search } = cli.command else {
            panic!("expected list");
        };

        let partial = search.to_partial_config();
        // No positional paths: defer to package.json
        assert_eq!(partial.search_paths, None);
        assert_eq!(partial.ignore_paths, Some(vec!["fixtures".to_string()]));
        assert_eq!(partial.exclude, None);
    }
}
