//! HTML document shells for server-side rendering.
//!
//! Composes a page title, metatags, stylesheets, a serialized client-side
//! state blob and script tags around server-rendered application markup,
//! producing the document a client-side hydration step picks up.

pub mod assets;
pub mod attributes;
pub mod config;
pub mod content;
pub mod document;
pub mod markup;
pub mod templates;

pub use assets::{Script, Stylesheet};
pub use attributes::{AttrValue, Attributes};
pub use config::{DocumentConfig, DEFAULT_CONTAINER_ID, DEFAULT_STATE_KEY};
pub use content::{Content, Node, RenderMode};
pub use document::{render_document, DocumentAssembler, DocumentError};
pub use markup::RawHtml;
