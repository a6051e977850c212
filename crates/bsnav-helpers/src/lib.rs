//! Bootstrap menu and breadcrumbs view helpers.
//!
//! Helpers are created per request from a shared [`NavigationServices`]:
//!
//! ```
//! use bsnav_container::{NavigationBuilder, Page};
//! use bsnav_helpers::NavigationServices;
//!
//! let mut builder = NavigationBuilder::new();
//! let docs = builder.add_page(Page::new("Docs", "/docs").with_id("docs"), None);
//! builder.add_page(Page::new("Install", "/docs/install").with_active(true), Some(docs));
//! let nav = builder.build();
//!
//! let services = NavigationServices::builder().build();
//! let breadcrumbs = services.breadcrumbs();
//!
//! let html = breadcrumbs.render(nav).unwrap();
//! assert!(html.contains(r#"<a id="breadcrumbs-docs" href="/docs">Docs</a>"#));
//! assert!(html.contains("\nInstall\n"));
//! ```
//!
//! Rendering errors surface as [`HelperError`]. The `Display` impls of
//! [`Breadcrumbs`] and [`Menu`] log errors and render nothing instead.

mod breadcrumbs;
mod error;
#[cfg(test)]
mod fixtures;
mod helper;
mod menu;
mod services;

pub use breadcrumbs::Breadcrumbs;
pub use error::HelperError;
pub use helper::NavigationHelper;
pub use menu::{Breakpoint, Direction, Indent, Menu, MenuOptions, Sublink, Vertical};
pub use services::{NavigationServices, NavigationServicesBuilder};
