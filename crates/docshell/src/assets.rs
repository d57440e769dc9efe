//! Stylesheet and script entries.
//!
//! Both come in two shapes: a reference to an external file, or an inline
//! payload. A plain string is shorthand for the reference form.

use serde::{Deserialize, Deserializer};

use crate::attributes::{AttrValue, Attributes};
use crate::markup::RawHtml;

/// Key holding an inline payload in the expanded entry form.
const INLINE_KEY: &str = "inline";

/// A stylesheet emitted in the document head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stylesheet {
    /// `<link rel="stylesheet" ...>` with these attributes (`href` included)
    Linked(Attributes),
    /// `<style ...>css</style>`
    Inline { css: RawHtml, attributes: Attributes },
}

impl Stylesheet {
    /// Reference an external stylesheet.
    pub fn linked(href: impl Into<String>) -> Self {
        Stylesheet::Linked(Attributes::new().with("href", href.into()))
    }

    /// Embed trusted CSS.
    pub fn inline(css: impl Into<RawHtml>) -> Self {
        Stylesheet::Inline {
            css: css.into(),
            attributes: Attributes::new(),
        }
    }

    /// The `href` of a linked stylesheet.
    pub fn href(&self) -> Option<&str> {
        match self {
            Stylesheet::Linked(attrs) => attrs.get("href").and_then(AttrValue::as_str),
            Stylesheet::Inline { .. } => None,
        }
    }

    /// Render the element for this entry.
    pub fn to_html(&self) -> String {
        match self {
            Stylesheet::Linked(attrs) => {
                let mut attrs = attrs.clone();
                attrs.remove("rel");
                format!(r#"<link rel="stylesheet"{}>"#, attrs.to_html())
            }
            Stylesheet::Inline { css, attributes } => {
                format!("<style{}>{}</style>", attributes.to_html(), css)
            }
        }
    }
}

impl From<&str> for Stylesheet {
    fn from(href: &str) -> Self {
        Stylesheet::linked(href)
    }
}

impl From<String> for Stylesheet {
    fn from(href: String) -> Self {
        Stylesheet::linked(href)
    }
}

impl<'de> Deserialize<'de> for Stylesheet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match AssetEntry::deserialize(deserializer)?.normalize("href") {
            Normalized::Reference(attrs) => Stylesheet::Linked(attrs),
            Normalized::Inline(css, attributes) => Stylesheet::Inline { css, attributes },
        })
    }
}

/// A script emitted at the end of the document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Script {
    /// `<script ...></script>` with these attributes (`src` included)
    Sourced(Attributes),
    /// `<script ...>js</script>`
    Inline { js: RawHtml, attributes: Attributes },
}

impl Script {
    /// Reference an external script.
    pub fn sourced(src: impl Into<String>) -> Self {
        Script::Sourced(Attributes::new().with("src", src.into()))
    }

    /// Embed trusted JavaScript.
    pub fn inline(js: impl Into<RawHtml>) -> Self {
        Script::Inline {
            js: js.into(),
            attributes: Attributes::new(),
        }
    }

    /// The `src` of a sourced script.
    pub fn src(&self) -> Option<&str> {
        match self {
            Script::Sourced(attrs) => attrs.get("src").and_then(AttrValue::as_str),
            Script::Inline { .. } => None,
        }
    }

    /// Render the element for this entry.
    pub fn to_html(&self) -> String {
        match self {
            Script::Sourced(attrs) => format!("<script{}></script>", attrs.to_html()),
            Script::Inline { js, attributes } => {
                format!("<script{}>{}</script>", attributes.to_html(), js)
            }
        }
    }
}

impl From<&str> for Script {
    fn from(src: &str) -> Self {
        Script::sourced(src)
    }
}

impl From<String> for Script {
    fn from(src: String) -> Self {
        Script::sourced(src)
    }
}

impl<'de> Deserialize<'de> for Script {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match AssetEntry::deserialize(deserializer)?.normalize("src") {
            Normalized::Reference(attrs) => Script::Sourced(attrs),
            Normalized::Inline(js, attributes) => Script::Inline { js, attributes },
        })
    }
}

/// Either form an entry can take in a config file.
#[derive(Deserialize)]
#[serde(untagged)]
enum AssetEntry {
    Shorthand(String),
    Expanded(Attributes),
}

enum Normalized {
    Reference(Attributes),
    Inline(RawHtml, Attributes),
}

impl AssetEntry {
    /// Expand the shorthand and let a non-empty inline payload win over the
    /// reference attribute.
    fn normalize(self, reference_key: &str) -> Normalized {
        let mut attrs = match self {
            AssetEntry::Shorthand(reference) => {
                return Normalized::Reference(Attributes::new().with(reference_key, reference));
            }
            AssetEntry::Expanded(attrs) => attrs,
        };

        match attrs.remove(INLINE_KEY) {
            Some(AttrValue::Text(payload)) if !payload.is_empty() => {
                attrs.remove(reference_key);
                Normalized::Inline(RawHtml::new(payload), attrs)
            }
            _ => Normalized::Reference(attrs),
        }
    }
}
