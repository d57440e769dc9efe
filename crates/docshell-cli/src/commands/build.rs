//! Batch build command.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::commands::render::{render_page, RenderOptions};
use crate::config::ConfigFile;

/// Configuration for a batch build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory holding page files
    pub pages_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Render options applied to every page
    pub render: RenderOptions,
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of documents written
    pub pages: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// A page to be built.
#[derive(Debug)]
struct PageInfo {
    /// Page file path
    source_path: PathBuf,

    /// Output path
    output_path: PathBuf,
}

/// Build every page under the pages directory.
pub fn build(config: &BuildConfig) -> Result<BuildResult> {
    let start = Instant::now();

    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Failed to create {}", config.output_dir.display()))?;

    let pages = discover_pages(config)?;

    // Pages are independent, so render them in parallel
    pages
        .par_iter()
        .map(|page| build_page(page, config.render))
        .collect::<Result<Vec<()>>>()?;

    Ok(BuildResult {
        pages: pages.len(),
        duration_ms: start.elapsed().as_millis() as u64,
        output_dir: config.output_dir.clone(),
    })
}

/// Discover all page files in the pages directory.
fn discover_pages(config: &BuildConfig) -> Result<Vec<PageInfo>> {
    if !config.pages_dir.exists() {
        bail!("Pages directory not found: {}", config.pages_dir.display());
    }

    let mut pages = Vec::new();

    for entry in WalkDir::new(&config.pages_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext != "toml" {
            continue;
        }

        let relative = path.strip_prefix(&config.pages_dir).unwrap_or(path);

        pages.push(PageInfo {
            source_path: path.to_path_buf(),
            output_path: output_path(&config.output_dir, relative),
        });
    }

    pages.sort_by(|a, b| a.source_path.cmp(&b.source_path));

    // Two pages writing one file would race in the parallel build
    let mut claimed: HashMap<&Path, &Path> = HashMap::new();
    for page in &pages {
        if let Some(other) = claimed.insert(&page.output_path, &page.source_path) {
            bail!(
                "{} and {} both render to {}",
                other.display(),
                page.source_path.display(),
                page.output_path.display()
            );
        }
    }

    tracing::debug!("Discovered {} pages", pages.len());

    Ok(pages)
}

/// Calculate output path for a page.
fn output_path(output_dir: &Path, relative: &Path) -> PathBuf {
    let stem = relative
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("index");
    let parent = relative.parent().unwrap_or(Path::new(""));

    if stem == "index" {
        // pages/index.toml -> dist/index.html
        output_dir.join(parent).join("index.html")
    } else {
        // pages/about.toml -> dist/about/index.html
        output_dir.join(parent).join(stem).join("index.html")
    }
}

/// Render and write a single page.
fn build_page(page: &PageInfo, options: RenderOptions) -> Result<()> {
    let html = render_page(&page.source_path, options)?;

    if let Some(parent) = page.output_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    fs::write(&page.output_path, html)
        .with_context(|| format!("Failed to write {}", page.output_path.display()))?;

    tracing::debug!(
        "{} -> {}",
        page.source_path.display(),
        page.output_path.display()
    );

    Ok(())
}

/// Run the build command.
pub fn run(
    file_config: &ConfigFile,
    pages: Option<PathBuf>,
    output: Option<PathBuf>,
    minify: Option<bool>,
) -> Result<()> {
    tracing::info!("Building pages...");

    let config = BuildConfig {
        pages_dir: pages.unwrap_or_else(|| file_config.pages.dir.clone()),
        output_dir: output.unwrap_or_else(|| file_config.build.output.clone()),
        render: RenderOptions {
            minify: minify.unwrap_or(file_config.build.minify),
            doctype: file_config.build.doctype,
        },
    };

    let result = build(&config)?;

    tracing::info!("Built {} pages in {}ms", result.pages, result.duration_ms);
    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
