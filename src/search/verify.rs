//! Duplicate-module report
//!
//! Builds the report string only; callers decide whether to print it.

use colored::{ColoredString, Colorize};
use std::path::Path;

use crate::core::model::{SearchResult, SearchResults};
use crate::core::paths::relative_to;

/// Verify search results and return the report, or an empty string when clean.
///
/// Right now this only checks for modules found at more than one location.
pub fn verify_search_results(results: &SearchResults, cwd: &Path) -> String {
    let tables: Vec<String> = results
        .iter()
        .filter(|(_, result)| result.has_duplicates())
        .map(|(name, result)| duplicates_table(name, result, cwd))
        .collect();

    if tables.is_empty() {
        return String::new();
    }

    let count = tables.len();
    let mut lines = tables;
    lines.push(
        format!(
            "⚠️  Found {} duplicated modules, but only the first discovered revision of each will be autolinked.",
            count
        )
        .yellow()
        .to_string(),
    );
    lines.push(
        "⚠️  Make sure to get rid of unnecessary versions as it may introduce side effects, especially on the JavaScript side."
            .yellow()
            .to_string(),
    );
    lines.join("\n")
}

/// Render one module's revisions as a box-drawn table
fn duplicates_table(name: &str, result: &SearchResult, cwd: &Path) -> String {
    let mut rows: Vec<(String, String, bool)> = vec![(
        relative_to(&result.revision.path, cwd),
        result.revision.version.clone(),
        true,
    )];
    rows.extend(
        result
            .duplicates
            .iter()
            .map(|dup| (relative_to(&dup.path, cwd), dup.version.clone(), false)),
    );

    let title = format!("{} found at multiple directories", name);
    // "📦 " occupies three terminal columns
    let title_width = title.chars().count() + 3;

    let version_width = rows
        .iter()
        .map(|(_, v, _)| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(1);
    let mut path_width = rows
        .iter()
        .map(|(p, _, _)| p.chars().count())
        .max()
        .unwrap_or(0)
        .max(1);
    if title_width > path_width + version_width + 3 {
        path_width = title_width - version_width - 3;
    }

    let inner = path_width + version_width + 5;
    let mut out = Vec::new();

    out.push(format!("┌{}┐", "─".repeat(inner)));
    out.push(format!(
        "│ 📦 {}{} │",
        title.replacen(name, &name.green().to_string(), 1),
        pad(title_width, inner - 2)
    ));
    out.push(format!(
        "├{}┬{}┤",
        "─".repeat(path_width + 2),
        "─".repeat(version_width + 2)
    ));

    for (path, version, canonical) in &rows {
        let (path_cell, version_cell): (ColoredString, ColoredString) = if *canonical {
            (path.magenta(), version.cyan())
        } else {
            (path.bright_black(), version.bright_black())
        };
        out.push(format!(
            "│ {}{} │ {}{} │",
            path_cell,
            pad(path.chars().count(), path_width),
            version_cell,
            pad(version.chars().count(), version_width)
        ));
    }

    out.push(format!(
        "└{}┴{}┘",
        "─".repeat(path_width + 2),
        "─".repeat(version_width + 2)
    ));

    out.join("\n")
}

fn pad(used: usize, width: usize) -> String {
    " ".repeat(width.saturating_sub(used))
}
