//! Document assembly.
//!
//! [`DocumentAssembler`] turns a [`DocumentConfig`] into a complete
//! `<html>` document: title, metatags and stylesheets in the head, then the
//! wrapped application body, the state script and the user scripts in the
//! body. Rendering is a pure function of the configuration, so one assembler
//! can serve any number of threads at once.

use std::sync::LazyLock;

use crate::attributes::Attributes;
use crate::config::DocumentConfig;
use crate::markup::{escape_html, escape_script_json};
use crate::templates::{Context, TemplateEngine};

/// Errors that can occur while rendering a document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Failed to serialize state: {0}")]
    SerializationError(String),

    #[error("Failed to render document template: {0}")]
    TemplateError(String),
}

impl From<serde_json::Error> for DocumentError {
    fn from(e: serde_json::Error) -> Self {
        DocumentError::SerializationError(e.to_string())
    }
}

impl From<minijinja::Error> for DocumentError {
    fn from(e: minijinja::Error) -> Self {
        DocumentError::TemplateError(e.to_string())
    }
}

/// Assembles full HTML documents.
pub struct DocumentAssembler {
    templates: TemplateEngine,
}

impl DocumentAssembler {
    /// Create an assembler with the document template compiled.
    pub fn new() -> Self {
        Self {
            templates: TemplateEngine::new(),
        }
    }

    /// Render the complete document.
    ///
    /// The DOCTYPE is left to the caller.
    pub fn render(&self, config: &DocumentConfig) -> Result<String, DocumentError> {
        let context = Context {
            title: escape_html(&config.title).into_owned(),
            metatags: self.render_metatags(config),
            stylesheets: self.render_stylesheets(config),
            content: self.render_content(config),
            scripts: self.render_scripts(config)?,
        };

        tracing::debug!(
            metatags = context.metatags.len(),
            stylesheets = context.stylesheets.len(),
            scripts = context.scripts.len(),
            has_content = context.content.is_some(),
            "Rendering document"
        );

        Ok(self.templates.render_document(&context)?)
    }

    /// Wrap the application body in its container, if there is one.
    pub fn render_content(&self, config: &DocumentConfig) -> Option<String> {
        let content = config.content.as_ref()?;
        let markup = content.render(config.render_mode());

        Some(format!(
            r#"<div id="{}">{}</div>"#,
            escape_html(&config.children_container_id),
            markup
        ))
    }

    /// One `<meta>` element per entry, carrying exactly its attributes.
    pub fn render_metatags(&self, config: &DocumentConfig) -> Vec<String> {
        config
            .metatags
            .iter()
            .map(|attrs| format!("<meta{}>", attrs.to_html()))
            .collect()
    }

    /// Linked or inline stylesheets, in input order.
    pub fn render_stylesheets(&self, config: &DocumentConfig) -> Vec<String> {
        config.stylesheets.iter().map(|s| s.to_html()).collect()
    }

    /// Sourced or inline user scripts, in input order.
    pub fn render_user_scripts(&self, config: &DocumentConfig) -> Vec<String> {
        config.scripts.iter().map(|s| s.to_html()).collect()
    }

    /// The script exposing the state as `window.<state_key>`.
    ///
    /// Always emitted, even for empty state, and marked with a bare
    /// `data-<state_key>` attribute so tooling can find it.
    pub fn render_state_script(&self, config: &DocumentConfig) -> Result<String, DocumentError> {
        let json = serde_json::to_string(&config.state)?;
        let marker = Attributes::new().with(format!("data-{}", config.state_key), true);

        Ok(format!(
            "<script{}>window.{} = {};</script>",
            marker.to_html(),
            config.state_key,
            escape_script_json(&json)
        ))
    }

    /// The state script followed by the user scripts.
    pub fn render_scripts(&self, config: &DocumentConfig) -> Result<Vec<String>, DocumentError> {
        let mut scripts = Vec::with_capacity(config.scripts.len() + 1);
        scripts.push(self.render_state_script(config)?);
        scripts.extend(self.render_user_scripts(config));
        Ok(scripts)
    }
}

impl Default for DocumentAssembler {
    fn default() -> Self {
        Self::new()
    }
}

static ASSEMBLER: LazyLock<DocumentAssembler> = LazyLock::new(DocumentAssembler::new);

/// Render a document with the shared assembler.
pub fn render_document(config: &DocumentConfig) -> Result<String, DocumentError> {
    ASSEMBLER.render(config)
}
