//! Page files: one TOML file describing one document.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use docshell::{Content, DocumentConfig, RawHtml};
use serde::Deserialize;

use crate::assets::AssetPipeline;

/// Page file structure.
#[derive(Debug, Deserialize)]
struct PageFile {
    /// Body content file, relative to the page file
    #[serde(default)]
    content: Option<PathBuf>,

    /// Client state, read as TOML so datetimes keep their string form
    #[serde(default)]
    state: Option<toml::Value>,

    #[serde(flatten)]
    document: DocumentConfig,
}

/// Options applied while loading a page.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Minify inline stylesheets
    pub minify: bool,
}

/// Read a page file and its content into a ready-to-render configuration.
pub fn load_page(path: &Path, options: LoadOptions) -> Result<DocumentConfig> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read page {}", path.display()))?;
    let page: PageFile = toml::from_str(&source)
        .with_context(|| format!("Failed to parse page {}", path.display()))?;

    let mut document = page.document;

    if let Some(state) = page.state {
        document.state = toml_to_json(state)
            .with_context(|| format!("Invalid state in page {}", path.display()))?;
    }

    if let Some(content_path) = page.content {
        let base = path.parent().unwrap_or(Path::new(""));
        let content_path = base.join(content_path);
        document.content = Some(load_content(&content_path)?);
    }

    if options.minify {
        AssetPipeline::minify_inline_styles(&mut document.stylesheets);
    }

    Ok(document)
}

/// Load body content, rendering Markdown and passing anything else through.
pub fn load_content(path: &Path) -> Result<Content> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read content {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let markup = if ext == "md" || ext == "markdown" {
        tracing::debug!("Rendering markdown content from {}", path.display());
        render_markdown(&source)
    } else {
        source
    };

    Ok(Content::Markup(RawHtml::new(markup)))
}

/// Convert TOML state to JSON. Datetimes become their RFC 3339 text.
fn toml_to_json(value: toml::Value) -> Result<serde_json::Value> {
    use serde_json::Value as Json;

    Ok(match value {
        toml::Value::String(s) => Json::String(s),
        toml::Value::Integer(i) => Json::from(i),
        toml::Value::Float(f) => match serde_json::Number::from_f64(f) {
            Some(n) => Json::Number(n),
            None => bail!("Float {} has no JSON representation", f),
        },
        toml::Value::Boolean(b) => Json::Bool(b),
        toml::Value::Datetime(dt) => Json::String(dt.to_string()),
        toml::Value::Array(items) => Json::Array(
            items
                .into_iter()
                .map(toml_to_json)
                .collect::<Result<Vec<_>>>()?,
        ),
        toml::Value::Table(table) => {
            let mut map = serde_json::Map::new();
            for (key, value) in table {
                map.insert(key, toml_to_json(value)?);
            }
            Json::Object(map)
        }
    })
}

/// Markdown to HTML renderer.
fn render_markdown(content: &str) -> String {
    use pulldown_cmark::{html, Options, Parser};

    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let parser = Parser::new_ext(content, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}
