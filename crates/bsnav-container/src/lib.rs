//! Navigation container model for bsnav.
//!
//! This crate provides:
//! - [`Navigation`]: an ordered forest of [`Page`]s stored as an arena
//! - [`PageConfig`]: nested page declarations for configuration files
//! - [`ContainerSource`] / [`ContainerParser`]: container resolution by name
//! - [`find_active`]: deepest active page lookup with depth bounds
//!
//! # Example
//!
//! ```
//! use std::convert::Infallible;
//! use bsnav_container::{NavigationBuilder, Page, find_active};
//!
//! let mut builder = NavigationBuilder::new();
//! let docs = builder.add_page(Page::new("Docs", "/docs"), None);
//! let install = Page::new("Install", "/docs/install").with_active(true);
//! let install = builder.add_page(install, Some(docs));
//! let nav = builder.build();
//!
//! let active = find_active(&nav, |_| Ok::<_, Infallible>(true), 0, None).unwrap().unwrap();
//! assert_eq!(active.page, install);
//! assert_eq!(active.depth, 1);
//! ```

mod config;
mod find_active;
mod navigation;
mod source;

pub use config::PageConfig;
pub use find_active::{ActivePage, exceeds_max_depth, find_active};
pub use navigation::{Navigation, NavigationBuilder, Page, PageId, PageNode, PreOrder};
pub use source::{ContainerError, ContainerParser, ContainerRegistry, ContainerSource};
