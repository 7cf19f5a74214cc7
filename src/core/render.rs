//! Renderer module
//!
//! Renders search results and link descriptors to json, jsonl or md

use serde::Serialize;
use serde_json::{json, Value};
use std::io::Write;

use crate::core::model::SearchResults;
use crate::core::paths::normalize_path;
use crate::resolvers::LinkDescriptor;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Jsonl,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for discovery output
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render search results keyed by module name
    pub fn render_results(&self, results: &SearchResults) -> String {
        match self.config.format {
            OutputFormat::Json => self.to_json(results),
            OutputFormat::Jsonl => self.to_jsonl(results.iter().map(|(name, result)| {
                let mut value = serde_json::to_value(result).unwrap_or(Value::Null);
                if let Some(obj) = value.as_object_mut() {
                    obj.insert("name".to_string(), json!(name));
                }
                value
            })),
            OutputFormat::Markdown => results_markdown(results),
        }
    }

    /// Render resolved link descriptors
    pub fn render_descriptors(&self, descriptors: &[LinkDescriptor]) -> String {
        match self.config.format {
            OutputFormat::Json => self.to_json(descriptors),
            OutputFormat::Jsonl => self.to_jsonl(
                descriptors
                    .iter()
                    .map(|d| serde_json::to_value(d).unwrap_or(Value::Null)),
            ),
            OutputFormat::Markdown => descriptors_markdown(descriptors),
        }
    }

    /// Render to a writer
    pub fn write_results<W: Write>(
        &self,
        results: &SearchResults,
        mut writer: W,
    ) -> std::io::Result<()> {
        writeln!(writer, "{}", self.render_results(results))
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> String {
        let rendered = if self.config.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.unwrap_or_else(|_| "null".to_string())
    }

    fn to_jsonl(&self, values: impl Iterator<Item = Value>) -> String {
        values
            .filter_map(|value| {
                if self.config.pretty {
                    serde_json::to_string_pretty(&value).ok()
                } else {
                    serde_json::to_string(&value).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }
}

fn results_markdown(results: &SearchResults) -> String {
    if results.is_empty() {
        return String::new();
    }

    let mut output = String::from("## Modules\n\n");
    for (name, result) in results {
        output.push_str(&format!(
            "- `{}` {} (`{}`)\n",
            name,
            result.revision.version,
            normalize_path(&result.revision.path)
        ));
        for dup in &result.duplicates {
            output.push_str(&format!(
                "  - duplicate {} (`{}`)\n",
                dup.version,
                normalize_path(&dup.path)
            ));
        }
    }
    output
}

fn descriptors_markdown(descriptors: &[LinkDescriptor]) -> String {
    if descriptors.is_empty() {
        return String::new();
    }

    let mut output = String::from("## Linked Modules\n\n");
    for descriptor in descriptors {
        match descriptor {
            LinkDescriptor::Ios(m) => output.push_str(&format!(
                "- `{}`: pod `{}` at `{}`\n",
                m.name,
                m.pod_name,
                normalize_path(&m.path)
            )),
            LinkDescriptor::Android(m) => output.push_str(&format!(
                "- `{}`: project `{}` at `{}`\n",
                m.name,
                m.project_name,
                normalize_path(&m.source_dir)
            )),
        }
    }
    output
}
