//! Shared navigation fixtures for helper tests.

use std::sync::Arc;

use bsnav_container::{Navigation, NavigationBuilder, Page};
use bsnav_view::{Authorization, RecordingPartialRenderer, RoleAuthorization};

use crate::services::NavigationServices;

/// Site navigation used across helper tests.
///
/// ```text
/// Home      /
/// Docs      /docs               class "docs"
///   Install /docs/install       (active with `Some("/docs/install")`)
///     Linux /docs/install/linux
///   Usage   /docs/usage
/// Admin     /admin              resource "admin"
///   Users   /admin/users
/// Hidden    /hidden             invisible
/// ```
pub(crate) fn site(active: Option<&str>) -> Navigation {
    let mut builder = NavigationBuilder::new();
    builder.add_page(Page::new("Home", "/").with_id("home"), None);
    let docs = builder.add_page(
        Page::new("Docs", "/docs")
            .with_id("docs")
            .with_class("docs"),
        None,
    );
    let install = builder.add_page(
        Page::new("Install", "/docs/install").with_id("install"),
        Some(docs),
    );
    builder.add_page(
        Page::new("Linux", "/docs/install/linux").with_id("linux"),
        Some(install),
    );
    builder.add_page(
        Page::new("Usage", "/docs/usage").with_id("usage"),
        Some(docs),
    );
    let admin = builder.add_page(
        Page::new("Admin", "/admin")
            .with_id("admin")
            .with_resource("admin", None),
        None,
    );
    builder.add_page(
        Page::new("Users", "/admin/users").with_id("users"),
        Some(admin),
    );
    builder.add_page(
        Page::new("Hidden", "/hidden")
            .with_id("hidden")
            .with_visible(false),
        None,
    );

    let mut nav = builder.build();
    if let Some(href) = active {
        nav.activate_href(href);
    }
    nav
}

/// Authorization allowing `admin` pages only for the `admin` role.
pub(crate) fn acl() -> Arc<dyn Authorization> {
    Arc::new(RoleAuthorization::new().allow("admin", "admin", None))
}

/// Services with default collaborators.
pub(crate) fn services() -> Arc<NavigationServices> {
    NavigationServices::builder().build()
}

/// Services rendering partials through `renderer`.
pub(crate) fn services_with_partials(
    renderer: &Arc<RecordingPartialRenderer>,
) -> Arc<NavigationServices> {
    let renderer: Arc<RecordingPartialRenderer> = Arc::clone(renderer);
    NavigationServices::builder()
        .partial_renderer(renderer)
        .build()
}
