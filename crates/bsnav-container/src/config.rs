//! Nested page configuration.
//!
//! Navigation trees are usually declared as nested page lists in a
//! configuration file:
//!
//! ```toml
//! [[pages]]
//! label = "Home"
//! href = "/"
//!
//! [[pages]]
//! label = "Docs"
//! href = "/docs"
//!
//! [[pages.pages]]
//! label = "Install"
//! href = "/docs/install"
//! ```

use serde::Deserialize;

use crate::navigation::{Navigation, NavigationBuilder, Page, PageId};

/// Page declaration with nested children.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PageConfig {
    /// Display label.
    pub label: String,
    /// Link title attribute.
    pub title: Option<String>,
    /// Translation text domain.
    #[serde(alias = "textDomain")]
    pub text_domain: Option<String>,
    /// Element id.
    pub id: Option<String>,
    /// CSS class.
    pub class: Option<String>,
    /// Link target URI.
    #[serde(alias = "uri")]
    pub href: Option<String>,
    /// Link target window.
    pub target: Option<String>,
    /// Extra class for the list item.
    #[serde(alias = "liClass")]
    pub li_class: Option<String>,
    /// Visibility flag.
    pub visible: bool,
    /// Explicit active flag.
    pub active: bool,
    /// Authorization resource.
    pub resource: Option<String>,
    /// Authorization privilege.
    pub privilege: Option<String>,
    /// Child pages.
    pub pages: Vec<PageConfig>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            title: None,
            text_domain: None,
            id: None,
            class: None,
            href: None,
            target: None,
            li_class: None,
            visible: true,
            active: false,
            resource: None,
            privilege: None,
            pages: Vec::new(),
        }
    }
}

impl PageConfig {
    fn to_page(&self) -> Page {
        Page {
            label: self.label.clone(),
            title: self.title.clone(),
            text_domain: self.text_domain.clone(),
            id: self.id.clone(),
            class: self.class.clone(),
            href: self.href.clone(),
            target: self.target.clone(),
            li_class: self.li_class.clone(),
            visible: self.visible,
            active: self.active,
            resource: self.resource.clone(),
            privilege: self.privilege.clone(),
        }
    }
}

impl Navigation {
    /// Build a navigation from top-level page declarations.
    #[must_use]
    pub fn from_config(pages: &[PageConfig]) -> Self {
        fn add(builder: &mut NavigationBuilder, config: &PageConfig, parent: Option<PageId>) {
            let id = builder.add_page(config.to_page(), parent);
            for child in &config.pages {
                add(builder, child, Some(id));
            }
        }

        let mut builder = NavigationBuilder::new();
        for config in pages {
            add(&mut builder, config, None);
        }
        builder.build()
    }
}
