//! Application body content and its serialization.
//!
//! Content arrives either already rendered ([`Content::Markup`]) or as a
//! small node tree that is serialized here. Trees can be written in two
//! modes: plain static HTML, or interactive HTML carrying the markers the
//! client needs to hydrate the existing DOM.

use crate::attributes::{AttrValue, Attributes};
use crate::markup::{escape_html, RawHtml};

/// Marker attribute placed on each top-level element in interactive mode.
pub const HYDRATION_ROOT_ATTR: &str = "data-hydrate-root";

/// Separator written between adjacent text nodes in interactive mode.
pub const TEXT_SEPARATOR: &str = "<!-- -->";

/// How a content tree is serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Markup meant to be taken over by client-side hydration
    #[default]
    Interactive,
    /// Plain markup with no hydration markers
    Static,
}

impl RenderMode {
    /// Mode selected by the `should_render_children_statically` flag.
    pub fn from_static_flag(render_statically: bool) -> Self {
        if render_statically {
            RenderMode::Static
        } else {
            RenderMode::Interactive
        }
    }
}

/// The application body placed inside the container element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Already rendered markup, inserted as is in either mode
    Markup(RawHtml),
    /// A tree serialized by the assembler
    Tree(Vec<Node>),
}

impl Content {
    /// Serialize the content to markup.
    pub fn render(&self, mode: RenderMode) -> String {
        match self {
            Content::Markup(markup) => markup.as_str().to_string(),
            Content::Tree(nodes) => render_nodes(nodes, mode),
        }
    }
}

impl From<RawHtml> for Content {
    fn from(markup: RawHtml) -> Self {
        Content::Markup(markup)
    }
}

impl From<Node> for Content {
    fn from(node: Node) -> Self {
        Content::Tree(vec![node])
    }
}

impl From<Vec<Node>> for Content {
    fn from(nodes: Vec<Node>) -> Self {
        Content::Tree(nodes)
    }
}

/// A node in a content tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with attributes and children.
    Element {
        tag: String,
        attributes: Attributes,
        children: Vec<Node>,
    },
    /// Escaped text.
    Text(String),
    /// Trusted markup inserted verbatim.
    Raw(RawHtml),
    /// Children with no wrapper element.
    Fragment(Vec<Node>),
}

impl Node {
    /// Create an element with no attributes or children.
    pub fn element(tag: impl Into<String>) -> Self {
        Node::Element {
            tag: tag.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn raw(markup: impl Into<RawHtml>) -> Self {
        Node::Raw(markup.into())
    }

    /// Add an attribute. No effect on non-element nodes.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        if let Node::Element { attributes, .. } = &mut self {
            attributes.set(name, value);
        }
        self
    }

    /// Append a child. Fragments accept children too.
    pub fn child(mut self, child: Node) -> Self {
        match &mut self {
            Node::Element { children, .. } | Node::Fragment(children) => children.push(child),
            Node::Text(_) | Node::Raw(_) => {}
        }
        self
    }
}

/// Elements that never have a closing tag.
fn is_void(tag: &str) -> bool {
    matches!(
        tag.to_ascii_lowercase().as_str(),
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Serialize a list of top-level nodes.
pub fn render_nodes(nodes: &[Node], mode: RenderMode) -> String {
    let mut output = String::new();
    let roots = flatten(nodes);
    render_siblings(&roots, mode, true, &mut output);
    output
}

/// Expand fragments so siblings are seen at one level.
fn flatten(nodes: &[Node]) -> Vec<&Node> {
    let mut flat = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Fragment(children) => flat.extend(flatten(children)),
            other => flat.push(other),
        }
    }
    flat
}

fn render_siblings(nodes: &[&Node], mode: RenderMode, top_level: bool, output: &mut String) {
    let mut previous_was_text = false;

    for node in nodes {
        let is_text = matches!(node, Node::Text(_));
        if is_text && previous_was_text && mode == RenderMode::Interactive {
            output.push_str(TEXT_SEPARATOR);
        }
        previous_was_text = is_text;

        render_node(node, mode, top_level, output);
    }
}

fn render_node(node: &Node, mode: RenderMode, top_level: bool, output: &mut String) {
    match node {
        Node::Element {
            tag,
            attributes,
            children,
        } => {
            output.push('<');
            output.push_str(tag);
            output.push_str(&attributes.to_html());

            if top_level && mode == RenderMode::Interactive {
                output.push(' ');
                output.push_str(HYDRATION_ROOT_ATTR);
                output.push_str("=\"\"");
            }

            output.push('>');

            if is_void(tag) {
                return;
            }

            let children = flatten(children);
            render_siblings(&children, mode, false, output);

            output.push_str("</");
            output.push_str(tag);
            output.push('>');
        }
        Node::Text(text) => output.push_str(&escape_html(text)),
        Node::Raw(markup) => output.push_str(markup.as_str()),
        // Normally flattened away by the caller.
        Node::Fragment(children) => {
            let children = flatten(children);
            render_siblings(&children, mode, top_level, output);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greeting() -> Node {
        Node::element("p")
            .attr("class", "greeting")
            .child(Node::text("Hello, "))
            .child(Node::text("world"))
    }

    #[test]
    fn renders_static_markup() {
        let html = render_nodes(&[greeting()], RenderMode::Static);

        assert_eq!(html, r#"<p class="greeting">Hello, world</p>"#);
    }

    #[test]
    fn renders_interactive_markers() {
        let html = render_nodes(&[greeting()], RenderMode::Interactive);

        assert_eq!(
            html,
            r#"<p class="greeting" data-hydrate-root="">Hello, <!-- -->world</p>"#
        );
    }

    #[test]
    fn marks_every_top_level_element_through_fragments() {
        let nodes = vec![Node::Fragment(vec![
            Node::element("header"),
            Node::element("main").child(Node::element("section")),
        ])];

        let html = render_nodes(&nodes, RenderMode::Interactive);

        assert_eq!(
            html,
            r#"<header data-hydrate-root=""></header><main data-hydrate-root=""><section></section></main>"#
        );
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let node = Node::element("div")
            .child(Node::element("img").attr("src", "a.png").child(Node::text("ignored")))
            .child(Node::element("br"));

        let html = render_nodes(&[node], RenderMode::Static);

        assert_eq!(html, r#"<div><img src="a.png"><br></div>"#);
    }

    #[test]
    fn escapes_text_but_not_raw() {
        let node = Node::element("div")
            .child(Node::text("<b>"))
            .child(Node::raw("<b>bold</b>"));

        let html = render_nodes(&[node], RenderMode::Static);

        assert_eq!(html, "<div>&lt;b&gt;<b>bold</b></div>");
    }

    #[test]
    fn markup_content_ignores_mode() {
        let content = Content::Markup(RawHtml::new("<p>Hi</p>"));

        assert_eq!(content.render(RenderMode::Static), "<p>Hi</p>");
        assert_eq!(content.render(RenderMode::Interactive), "<p>Hi</p>");
    }

    #[test]
    fn mode_follows_static_flag() {
        assert_eq!(RenderMode::from_static_flag(true), RenderMode::Static);
        assert_eq!(RenderMode::from_static_flag(false), RenderMode::Interactive);
    }
}
