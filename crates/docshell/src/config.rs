//! Per-render document configuration.

use serde::{Deserialize, Serialize};

use crate::assets::{Script, Stylesheet};
use crate::attributes::Attributes;
use crate::content::{Content, RenderMode};
use crate::document::DocumentError;

/// Default id of the element wrapping the application body.
pub const DEFAULT_CONTAINER_ID: &str = "app";

/// Default global variable holding the hydration state.
pub const DEFAULT_STATE_KEY: &str = "__state";

/// Everything needed to render one document.
///
/// Built fresh for each render and never mutated by the assembler.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Text of the `<title>` element
    pub title: String,

    /// One `<meta>` element per entry, in order
    pub metatags: Vec<Attributes>,

    /// Stylesheets emitted in the head, in order
    pub stylesheets: Vec<Stylesheet>,

    /// Scripts emitted after the state script, in order
    pub scripts: Vec<Script>,

    /// Value exposed to the client as `window.<state_key>`
    pub state: serde_json::Value,

    /// Global variable name, also used for the `data-<state_key>` marker
    #[serde(alias = "stateKey")]
    pub state_key: String,

    /// Application body, omitted from the document when `None`
    #[serde(skip)]
    pub content: Option<Content>,

    /// Serialize content trees without hydration markers
    #[serde(alias = "shouldRenderChildrenStatically")]
    pub should_render_children_statically: bool,

    /// Id of the element wrapping the content
    #[serde(alias = "childrenContainerId")]
    pub children_container_id: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            metatags: Vec::new(),
            stylesheets: Vec::new(),
            scripts: Vec::new(),
            state: empty_state(),
            state_key: DEFAULT_STATE_KEY.to_string(),
            content: None,
            should_render_children_statically: false,
            children_container_id: DEFAULT_CONTAINER_ID.to_string(),
        }
    }
}

impl DocumentConfig {
    /// Create a configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hydration state from any serializable value.
    ///
    /// The value is converted immediately, so unserializable state is
    /// reported here rather than at render time.
    pub fn with_state<T: Serialize + ?Sized>(mut self, state: &T) -> Result<Self, DocumentError> {
        self.state = serde_json::to_value(state)?;
        Ok(self)
    }

    /// Set the application body.
    pub fn with_content(mut self, content: impl Into<Content>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Serialization mode for content trees.
    pub fn render_mode(&self) -> RenderMode {
        RenderMode::from_static_flag(self.should_render_children_statically)
    }
}

fn empty_state() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}
