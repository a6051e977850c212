//! Breadcrumb trail helper.
//!
//! Renders the chain from the top-level ancestor down to the deepest active
//! page as a Bootstrap breadcrumb:
//!
//! ```html
//! <nav aria-label="breadcrumb">
//! <ul class="breadcrumb">
//! <li class="breadcrumb-item">
//! <a id="breadcrumbs-docs" href="/docs">Docs</a>
//! </li>
//!  &gt;
//! <li class="breadcrumb-item active" aria-current="page">
//! Install
//! </li>
//! </ul>
//! </nav>
//! ```

use std::fmt;
use std::sync::Arc;

use bsnav_container::{ContainerSource, Navigation, PageId};
use bsnav_view::{LinkOptions, Partial};
use serde_json::{Map, Value};

use crate::error::HelperError;
use crate::helper::{HelperState, NavigationHelper, find_active_in, push_line};
use crate::services::NavigationServices;

/// Breadcrumbs view helper.
pub struct Breadcrumbs {
    state: HelperState,
    separator: String,
    link_last: bool,
}

impl NavigationHelper for Breadcrumbs {
    const NAME: &'static str = "breadcrumbs";
    const DEFAULT_MIN_DEPTH: usize = 1;

    fn state(&self) -> &HelperState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut HelperState {
        &mut self.state
    }
}

impl Breadcrumbs {
    /// Create a helper seeded from the services' `[breadcrumbs]` configuration.
    pub(crate) fn new(services: Arc<NavigationServices>) -> Self {
        let config = &services.config().breadcrumbs;
        let separator = config.separator.clone();
        let link_last = config.link_last;
        let indent = config.indent.clone();
        let min_depth = config.min_depth;
        let max_depth = config.max_depth;
        let partial = config.partial.clone().map(Partial::Name);

        let mut state = HelperState::new(services);
        state.indent = indent;
        state.min_depth = min_depth;
        state.max_depth = max_depth;
        state.partial = partial;

        Self {
            state,
            separator,
            link_last,
        }
    }

    /// Set the container and return the helper for chaining.
    pub fn invoke(&mut self, source: impl Into<ContainerSource>) -> Result<&mut Self, HelperError> {
        self.set_container(source.into())?;
        Ok(self)
    }

    /// Set the markup placed between crumbs. It is emitted unescaped.
    pub fn set_separator(&mut self, separator: impl Into<String>) -> &mut Self {
        self.separator = separator.into();
        self
    }

    /// Separator markup.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Render the active page as a link instead of plain text.
    pub fn set_link_last(&mut self, link_last: bool) -> &mut Self {
        self.link_last = link_last;
        self
    }

    /// Whether the active page is rendered as a link.
    pub fn link_last(&self) -> bool {
        self.link_last
    }

    /// Render with the configured partial, or as markup if there is none.
    pub fn render(&self, source: impl Into<ContainerSource>) -> Result<String, HelperError> {
        if self.partial().is_some() {
            self.render_partial(source, None)
        } else {
            self.render_straight(source)
        }
    }

    /// Render the breadcrumb markup. Empty if no page is active.
    pub fn render_straight(
        &self,
        source: impl Into<ContainerSource>,
    ) -> Result<String, HelperError> {
        let nav = self.resolve_container(source.into())?;
        let Some(chain) = self.active_chain(&nav)? else {
            return Ok(String::new());
        };
        let Some((&last, parents)) = chain.split_last() else {
            return Ok(String::new());
        };

        let indent = self.indent();
        let mut html = String::new();
        push_line(&mut html, indent, 0, r#"<nav aria-label="breadcrumb">"#);
        push_line(&mut html, indent, 1, r#"<ul class="breadcrumb">"#);

        for &page in parents {
            push_line(&mut html, indent, 2, r#"<li class="breadcrumb-item">"#);
            let link = self.htmlify(&nav, page, &LinkOptions::default());
            push_line(&mut html, indent, 3, &link);
            push_line(&mut html, indent, 2, "</li>");
            push_line(&mut html, indent, 2, &self.separator);
        }

        let last_html = if self.link_last {
            self.htmlify(&nav, last, &LinkOptions::default())
        } else {
            self.label(&nav, last, true)
        };
        push_line(
            &mut html,
            indent,
            2,
            r#"<li class="breadcrumb-item active" aria-current="page">"#,
        );
        push_line(&mut html, indent, 3, &last_html);
        push_line(&mut html, indent, 2, "</li>");

        push_line(&mut html, indent, 1, "</ul>");
        push_line(&mut html, indent, 0, "</nav>");

        tracing::debug!(crumbs = chain.len(), "Rendered breadcrumbs");
        Ok(html)
    }

    /// Render with a partial, passing `{pages, separator}` as the model.
    ///
    /// `partial` overrides the configured one.
    pub fn render_partial(
        &self,
        source: impl Into<ContainerSource>,
        partial: Option<&Partial>,
    ) -> Result<String, HelperError> {
        let Some(partial) = partial.or_else(|| self.partial()) else {
            return Err(HelperError::InvalidArgument(format!(
                "Unable to render {}: No partial view script provided",
                Self::NAME
            )));
        };

        let nav = self.resolve_container(source.into())?;
        let pages = self
            .active_chain(&nav)?
            .unwrap_or_default()
            .into_iter()
            .map(|page| serde_json::to_value(nav.page(page)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut model = Map::new();
        model.insert("pages".to_owned(), Value::Array(pages));
        let separator = Value::String(self.separator.clone());
        model.insert("separator".to_owned(), separator);

        self.render_partial_model(partial, model)
    }

    /// Pages from the top-level ancestor down to the active page.
    fn active_chain(&self, nav: &Navigation) -> Result<Option<Vec<PageId>>, HelperError> {
        let accept = self.accept_helper()?;
        let active = find_active_in(nav, accept.as_ref(), self.min_depth(), self.max_depth())?;
        Ok(active.map(|active| nav.chain(active.page)))
    }
}

impl fmt::Display for Breadcrumbs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render(ContainerSource::None) {
            Ok(html) => f.write_str(&html),
            Err(e) => {
                tracing::warn!(helper = Self::NAME, error = %e, "Failed to render");
                Ok(())
            }
        }
    }
}
