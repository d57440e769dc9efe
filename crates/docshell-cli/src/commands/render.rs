//! Single page render command.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::page::{load_page, LoadOptions};

/// Declaration prepended to documents unless disabled.
pub const DOCTYPE: &str = "<!DOCTYPE html>";

/// Options for rendering a page.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Minify inline stylesheets
    pub minify: bool,
    /// Prepend the DOCTYPE declaration
    pub doctype: bool,
}

/// Render a page file to a complete HTML string.
pub fn render_page(page: &Path, options: RenderOptions) -> Result<String> {
    let config = load_page(
        page,
        LoadOptions {
            minify: options.minify,
        },
    )?;

    let html = docshell::render_document(&config)
        .with_context(|| format!("Failed to render {}", page.display()))?;

    Ok(if options.doctype {
        format!("{}{}", DOCTYPE, html)
    } else {
        html
    })
}

/// Run the render command.
pub fn run(page: &Path, output: Option<&Path>, options: RenderOptions) -> Result<()> {
    tracing::debug!("Rendering {}", page.display());

    let html = render_page(page, options)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}
