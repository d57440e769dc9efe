//! Document skeleton template.

use minijinja::{context, AutoEscape, Environment};

/// Name the skeleton is registered under.
pub const DOCUMENT_TEMPLATE_NAME: &str = "document.html";

/// Fragments filling the document skeleton.
///
/// Every field is finished markup; escaping happens before it gets here.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct Context {
    /// Escaped title text
    pub title: String,
    /// Rendered `<meta>` elements
    pub metatags: Vec<String>,
    /// Rendered `<link>` and `<style>` elements
    pub stylesheets: Vec<String>,
    /// Wrapped application body, if any
    pub content: Option<String>,
    /// Rendered `<script>` elements, state script first
    pub scripts: Vec<String>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a template engine with the document skeleton loaded.
    pub fn new() -> Self {
        let mut env = Environment::new();

        // Fragments are escaped by the assembler, raw ones are trusted.
        env.set_auto_escape_callback(|_| AutoEscape::None);

        env.add_template(DOCUMENT_TEMPLATE_NAME, DOCUMENT_TEMPLATE)
            .expect("Failed to add document template");

        Self { env }
    }

    /// Render the document skeleton.
    pub fn render_document(&self, context: &Context) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(DOCUMENT_TEMPLATE_NAME)?;

        tmpl.render(context! {
            title => &context.title,
            metatags => &context.metatags,
            stylesheets => &context.stylesheets,
            content => &context.content,
            scripts => &context.scripts,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const DOCUMENT_TEMPLATE: &str = r##"<html><head><title>{{ title }}</title>
{%- for meta in metatags %}{{ meta }}{% endfor %}
{%- for sheet in stylesheets %}{{ sheet }}{% endfor -%}
</head><body>
{%- if content is not none %}{{ content }}{% endif %}
{%- for script in scripts %}{{ script }}{% endfor -%}
</body></html>"##;
