//! Asset pipeline for inline stylesheets.

use docshell::{RawHtml, Stylesheet};

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }

    /// Minify every inline stylesheet in place. Linked ones are untouched.
    ///
    /// CSS that fails to parse is kept as written.
    pub fn minify_inline_styles(stylesheets: &mut [Stylesheet]) {
        for sheet in stylesheets.iter_mut() {
            if let Stylesheet::Inline { css, .. } = sheet {
                match Self::minify_css(css.as_str()) {
                    Ok(minified) => *css = RawHtml::new(minified),
                    Err(e) => tracing::warn!("Keeping inline stylesheet unminified: {}", e),
                }
            }
        }
    }
}
