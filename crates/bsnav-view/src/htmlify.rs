//! Page link rendering.

use std::sync::Arc;

use bsnav_container::{Navigation, PageId};

use crate::element::{Attributes, HtmlElement};
use crate::escape::Escaper;
use crate::translate::{Translator, translate};

/// Options for [`Htmlify::to_html`].
#[derive(Clone, Debug)]
pub struct LinkOptions<'a> {
    /// Escape the translated label.
    pub escape_label: bool,
    /// The page class goes on the list item, so leave it off the link.
    pub add_class_to_list_item: bool,
    /// Attributes appended after the page-derived ones.
    pub attributes: Option<&'a Attributes>,
    /// Render a `<button>` instead of an `<a>`.
    pub convert_to_button: bool,
}

impl Default for LinkOptions<'_> {
    fn default() -> Self {
        Self {
            escape_label: true,
            add_class_to_list_item: false,
            attributes: None,
            convert_to_button: false,
        }
    }
}

/// Renders a page as a complete link element.
pub trait Htmlify: Send + Sync {
    /// Render `page` as a link.
    ///
    /// `prefix` identifies the calling helper and prefixes the element id.
    fn to_html(
        &self,
        prefix: &str,
        nav: &Navigation,
        page: PageId,
        options: &LinkOptions<'_>,
    ) -> String;
}

/// Default [`Htmlify`] built from the other view services.
pub struct LinkBuilder {
    escaper: Arc<dyn Escaper>,
    translator: Option<Arc<dyn Translator>>,
    element: Arc<dyn HtmlElement>,
}

impl LinkBuilder {
    /// Create a link builder.
    #[must_use]
    pub fn new(
        escaper: Arc<dyn Escaper>,
        translator: Option<Arc<dyn Translator>>,
        element: Arc<dyn HtmlElement>,
    ) -> Self {
        Self {
            escaper,
            translator,
            element,
        }
    }
}

impl Htmlify for LinkBuilder {
    fn to_html(
        &self,
        prefix: &str,
        nav: &Navigation,
        page: PageId,
        options: &LinkOptions<'_>,
    ) -> String {
        let data = nav.page(page);
        let domain = data.text_domain.as_deref();

        let mut label = translate(self.translator.as_deref(), &data.label, domain);
        if options.escape_label {
            label = self.escaper.escape_html(&label);
        }

        let mut attributes = Attributes::new();
        attributes.set_opt("id", data.id.as_ref().map(|id| format!("{prefix}-{id}")));
        attributes.set_opt(
            "title",
            data.title
                .as_deref()
                .map(|title| translate(self.translator.as_deref(), title, domain)),
        );
        if !options.add_class_to_list_item {
            attributes.set_opt("class", data.class.as_ref());
        }

        let tag = if options.convert_to_button {
            attributes.set("type", "button");
            "button"
        } else {
            attributes.set_opt("href", data.href.as_ref());
            attributes.set_opt("target", data.target.as_ref());
            "a"
        };

        if let Some(extra) = options.attributes {
            attributes.merge(extra);
        }

        self.element.to_html(tag, &attributes, &label)
    }
}
