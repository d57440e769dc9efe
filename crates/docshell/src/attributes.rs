//! Ordered HTML attribute lists.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

use crate::markup::escape_html;

/// The value of a single attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Quoted value: name="value"
    Text(String),
    /// Presence flag: `true` renders the bare name, `false` omits it
    Bool(bool),
}

impl AttrValue {
    /// Get as string if it's a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            AttrValue::Bool(_) => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl<'de> Deserialize<'de> for AttrValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AttrValueVisitor;

        impl<'de> Visitor<'de> for AttrValueVisitor {
            type Value = AttrValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, number, boolean or null attribute value")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<AttrValue, E> {
                Ok(AttrValue::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<AttrValue, E> {
                Ok(AttrValue::Text(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<AttrValue, E> {
                Ok(AttrValue::Text(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<AttrValue, E> {
                Ok(AttrValue::Text(v.to_string()))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<AttrValue, E> {
                Ok(AttrValue::Text(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<AttrValue, E> {
                Ok(AttrValue::Text(v))
            }

            fn visit_unit<E: de::Error>(self) -> Result<AttrValue, E> {
                Ok(AttrValue::Bool(false))
            }

            fn visit_none<E: de::Error>(self) -> Result<AttrValue, E> {
                Ok(AttrValue::Bool(false))
            }
        }

        deserializer.deserialize_any(AttrValueVisitor)
    }
}

/// An ordered list of attributes.
///
/// Output order is insertion order. Names are not validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, AttrValue)>,
}

impl Attributes {
    /// Create an empty attribute list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Attributes::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        let name = name.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Look up an attribute by name.
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Remove an attribute, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<AttrValue> {
        let pos = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Render as ` name="value"` pairs, each prefixed by a space.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.entries {
            match value {
                AttrValue::Text(text) => {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_html(text));
                    out.push('"');
                }
                AttrValue::Bool(true) => {
                    out.push(' ');
                    out.push_str(name);
                }
                AttrValue::Bool(false) => {}
            }
        }
        out
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (name, value) in iter {
            attrs.set(name, value);
        }
        attrs
    }
}

impl<'de> Deserialize<'de> for Attributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AttributesVisitor;

        impl<'de> Visitor<'de> for AttributesVisitor {
            type Value = Attributes;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of attribute names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Attributes, A::Error> {
                let mut attrs = Attributes::new();
                while let Some((name, value)) = map.next_entry::<String, AttrValue>()? {
                    attrs.set(name, value);
                }
                Ok(attrs)
            }
        }

        deserializer.deserialize_map(AttributesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_in_insertion_order() {
        let attrs = Attributes::new().with("name", "x").with("content", "y");

        assert_eq!(attrs.to_html(), r#" name="x" content="y""#);
    }

    #[test]
    fn renders_boolean_attributes() {
        let attrs = Attributes::new()
            .with("data-state", true)
            .with("hidden", false)
            .with("id", "a");

        assert_eq!(attrs.to_html(), r#" data-state id="a""#);
    }

    #[test]
    fn escapes_values() {
        let attrs = Attributes::new().with("content", r#"say "hi" & <go>"#);

        assert_eq!(
            attrs.to_html(),
            r#" content="say &quot;hi&quot; &amp; &lt;go&gt;""#
        );
    }

    #[test]
    fn set_replaces_in_place() {
        let mut attrs = Attributes::new().with("a", "1").with("b", "2");
        attrs.set("a", "3");

        let names: Vec<&str> = attrs.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(attrs.get("a"), Some(&AttrValue::Text("3".to_string())));
    }

    #[test]
    fn remove_returns_value() {
        let mut attrs = Attributes::new().with("src", "a.js").with("defer", true);

        assert_eq!(attrs.remove("src"), Some(AttrValue::Text("a.js".to_string())));
        assert_eq!(attrs.len(), 1);
        assert!(!attrs.contains("src"));
        assert!(attrs.remove("src").is_none());
    }

    #[test]
    fn deserializes_preserving_order() {
        let attrs: Attributes =
            serde_json::from_str(r#"{"property":"og:title","content":"Home","data-n":3}"#)
                .unwrap();

        assert_eq!(
            attrs.to_html(),
            r#" property="og:title" content="Home" data-n="3""#
        );
    }

    #[test]
    fn deserializes_null_as_omitted() {
        let attrs: Attributes = serde_json::from_str(r#"{"a":null,"b":true}"#).unwrap();

        assert_eq!(attrs.get("a"), Some(&AttrValue::Bool(false)));
        assert_eq!(attrs.to_html(), " b");
    }
}
