//! Scaffold a docshell project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing docshell...");

    let root = config_path.parent().unwrap_or(Path::new(""));
    let pages_dir = root.join("pages");

    if !pages_dir.exists() {
        fs::create_dir_all(&pages_dir).context("Failed to create pages directory")?;
    }

    write_file(config_path, DEFAULT_CONFIG, yes)?;
    write_file(&pages_dir.join("index.toml"), DEFAULT_PAGE, yes)?;
    write_file(&pages_dir.join("index.md"), DEFAULT_CONTENT, yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'docshell build' to render your pages.");

    Ok(())
}

/// Write a scaffold file, keeping existing ones unless overwriting.
fn write_file(path: &Path, contents: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        tracing::warn!("{} already exists. Use --yes to overwrite.", path.display());
        return Ok(());
    }

    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created {}", path.display());
    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# docshell configuration

[pages]
# Directory containing page files
dir = "pages"

[build]
# Output directory for rendered documents
output = "dist"

# Minify inline stylesheets
minify = true

# Prepend <!DOCTYPE html>
doctype = true
"#;

const DEFAULT_PAGE: &str = r#"# Rendered to dist/index.html
title = "Home"
content = "index.md"

# Global variable the client reads its state from
state_key = "__state"

# Id of the element wrapping the content
children_container_id = "app"

metatags = [
  { charset = "utf-8" },
  { name = "viewport", content = "width=device-width, initial-scale=1" },
]

stylesheets = [
  "/assets/main.css",
  { inline = "body { margin: 0; }" },
]

scripts = [
  { src = "/assets/client.js", defer = true },
]

[state]
greeting = "Hello"
"#;

const DEFAULT_CONTENT: &str = r#"# Welcome

This page was rendered by **docshell**.
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::render::{render_page, RenderOptions};
    use tempfile::tempdir;

    #[test]
    fn scaffolds_renderable_project() {
        let temp = tempdir().unwrap();
        let config = temp.path().join("docshell.toml");

        run(&config, false).unwrap();

        assert!(config.exists());
        let html = render_page(
            &temp.path().join("pages").join("index.toml"),
            RenderOptions {
                minify: true,
                doctype: true,
            },
        )
        .unwrap();

        assert!(html.contains("<title>Home</title>"));
        assert!(html.contains("<h1>Welcome</h1>"));
        assert!(html.contains(r#"window.__state = {"greeting":"Hello"};"#));
        assert!(html.contains(r#"<script src="/assets/client.js" defer></script>"#));
    }

    #[test]
    fn keeps_existing_files_without_yes() {
        let temp = tempdir().unwrap();
        let config = temp.path().join("docshell.toml");
        fs::write(&config, "# mine\n").unwrap();

        run(&config, false).unwrap();
        assert_eq!(fs::read_to_string(&config).unwrap(), "# mine\n");

        run(&config, true).unwrap();
        assert_eq!(fs::read_to_string(&config).unwrap(), DEFAULT_CONFIG);
    }
}
