//! Label and title translation.

use std::collections::HashMap;

/// Translates messages, optionally within a text domain.
pub trait Translator: Send + Sync {
    /// Translate `message`. Unknown messages are returned unchanged.
    fn translate(&self, message: &str, text_domain: Option<&str>) -> String;
}

/// Translate with an optional translator.
///
/// Without a translator the message passes through untranslated.
#[must_use]
pub fn translate(
    translator: Option<&dyn Translator>,
    message: &str,
    text_domain: Option<&str>,
) -> String {
    match translator {
        Some(t) => t.translate(message, text_domain),
        None => message.to_owned(),
    }
}

/// In-memory [`Translator`] keyed by `(text domain, message)`.
///
/// Messages without a text domain use the `"default"` domain.
#[derive(Debug, Default)]
pub struct MapTranslator {
    messages: HashMap<(String, String), String>,
}

impl MapTranslator {
    /// Domain used when a page has no text domain.
    pub const DEFAULT_DOMAIN: &'static str = "default";

    /// Create an empty translator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a translation.
    #[must_use]
    pub fn with_message(
        mut self,
        text_domain: Option<&str>,
        message: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        let domain = text_domain.unwrap_or(Self::DEFAULT_DOMAIN).to_owned();
        self.messages
            .insert((domain, message.into()), translation.into());
        self
    }
}

impl Translator for MapTranslator {
    fn translate(&self, message: &str, text_domain: Option<&str>) -> String {
        let domain = text_domain.unwrap_or(Self::DEFAULT_DOMAIN);
        self.messages
            .get(&(domain.to_owned(), message.to_owned()))
            .cloned()
            .unwrap_or_else(|| message.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_map_translator_uses_domain() {
        let translator = MapTranslator::new()
            .with_message(None, "Home", "Start")
            .with_message(Some("admin"), "Home", "Dashboard");

        assert_eq!(translator.translate("Home", None), "Start");
        assert_eq!(translator.translate("Home", Some("admin")), "Dashboard");
        assert_eq!(translator.translate("Blog", None), "Blog");
    }

    #[test]
    fn test_translate_without_translator_passes_through() {
        assert_eq!(translate(None, "Home", Some("admin")), "Home");
    }
}
