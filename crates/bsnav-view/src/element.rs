//! HTML element assembly.

use std::fmt::Write;
use std::sync::Arc;

use crate::escape::Escaper;

/// Ordered list of HTML attributes.
///
/// Attributes keep insertion order; setting an existing name replaces its
/// value in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// Create an empty attribute list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_owned(), value)),
        }
        self
    }

    /// Set an attribute if a value is given.
    pub fn set_opt(&mut self, name: &str, value: Option<impl Into<String>>) -> &mut Self {
        if let Some(value) = value {
            self.set(name, value);
        }
        self
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Value of an attribute.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Append all attributes of `other`, replacing duplicates.
    pub fn merge(&mut self, other: &Attributes) -> &mut Self {
        for (name, value) in &other.entries {
            self.set(name, value.clone());
        }
        self
    }

    /// Attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// True if no attribute is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds complete HTML elements.
pub trait HtmlElement: Send + Sync {
    /// Render `<tag attrs>content</tag>`.
    ///
    /// Attribute values are escaped; `content` is inserted as given.
    fn to_html(&self, tag: &str, attributes: &Attributes, content: &str) -> String;
}

/// Default [`HtmlElement`] builder.
///
/// Attributes with empty values are dropped.
pub struct ElementBuilder {
    escaper: Arc<dyn Escaper>,
}

impl ElementBuilder {
    /// Create a builder using `escaper` for attribute values.
    #[must_use]
    pub fn new(escaper: Arc<dyn Escaper>) -> Self {
        Self { escaper }
    }
}

impl HtmlElement for ElementBuilder {
    fn to_html(&self, tag: &str, attributes: &Attributes, content: &str) -> String {
        let mut out = format!("<{tag}");
        for (name, value) in attributes.iter().filter(|(_, v)| !v.is_empty()) {
            write!(out, r#" {name}="{}""#, self.escaper.escape_html_attr(value)).unwrap();
        }
        write!(out, ">{content}</{tag}>").unwrap();
        out
    }
}
