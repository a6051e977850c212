//! Navigation container with page hierarchy.
//!
//! # Architecture
//!
//! Pages are stored in a flat `Vec<Page>` with parent/children relationships
//! tracked by [`PageId`] indices. This provides:
//! - O(1) page, parent and children lookups
//! - O(d) depth and ancestor queries where d is the page depth
//! - no shared ownership between parent and child pages
//!
//! A [`Navigation`] is immutable once built. Use [`NavigationBuilder`] to
//! assemble one, or [`Navigation::from_config`](crate::PageConfig) to build
//! it from nested page configuration.

use serde::Serialize;

/// Index of a page inside its [`Navigation`].
///
/// Only meaningful for the navigation that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PageId(usize);

impl PageId {
    /// Position of the page in insertion order.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Navigation page data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Display label (translated before rendering).
    pub label: String,
    /// Link title attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Translation text domain for label and title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_domain: Option<String>,
    /// Element id (helpers prefix it, e.g. `menu-{id}`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// CSS class for the link (or the list item, see `addClassToListItem`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Link target URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Link target window (`_blank`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Extra CSS class for the surrounding `<li>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub li_class: Option<String>,
    /// False hides the page unless invisible pages are rendered.
    pub visible: bool,
    /// Explicit active flag. Not propagated to ancestors or descendants.
    pub active: bool,
    /// Authorization resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    /// Authorization privilege on `resource`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privilege: Option<String>,
}

impl Default for Page {
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
        }
    }
}

impl Page {
    /// Create a visible, inactive page with a label and link.
    #[must_use]
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: Some(href.into()),
            ..Self::default()
        }
    }

    /// Set the page id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the link title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the translation text domain.
    #[must_use]
    pub fn with_text_domain(mut self, text_domain: impl Into<String>) -> Self {
        self.text_domain = Some(text_domain.into());
        self
    }

    /// Set the CSS class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Set the link target.
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Set the list item class.
    #[must_use]
    pub fn with_li_class(mut self, li_class: impl Into<String>) -> Self {
        self.li_class = Some(li_class.into());
        self
    }

    /// Set the visibility flag.
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Set the active flag.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Set the authorization resource and optional privilege.
    #[must_use]
    pub fn with_resource(
        mut self,
        resource: impl Into<String>,
        privilege: Option<&str>,
    ) -> Self {
        self.resource = Some(resource.into());
        self.privilege = privilege.map(str::to_owned);
        self
    }
}

/// Nested, serializable view of a page and its children.
///
/// Used as the `container`/`pages` payload handed to partial templates.
#[derive(Debug, Serialize)]
pub struct PageNode<'a> {
    /// Page data.
    #[serde(flatten)]
    pub page: &'a Page,
    /// True if the page or one of its descendants is active.
    pub is_active: bool,
    /// Child pages.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<PageNode<'a>>,
}

/// Ordered forest of navigation pages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Navigation {
    pages: Vec<Page>,
    children: Vec<Vec<PageId>>,
    parents: Vec<Option<PageId>>,
    roots: Vec<PageId>,
}

impl Navigation {
    /// Create an empty navigation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages at all levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True if the navigation has no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Get a page.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this navigation.
    #[must_use]
    pub fn page(&self, id: PageId) -> &Page {
        &self.pages[id.0]
    }

    /// Top-level pages in insertion order.
    #[must_use]
    pub fn roots(&self) -> &[PageId] {
        &self.roots
    }

    /// Direct children of a page in insertion order.
    #[must_use]
    pub fn children(&self, id: PageId) -> &[PageId] {
        &self.children[id.0]
    }

    /// Parent page, `None` for top-level pages.
    #[must_use]
    pub fn parent(&self, id: PageId) -> Option<PageId> {
        self.parents[id.0]
    }

    /// Pages sharing the parent of `id` (top-level pages for roots), `id` included.
    #[must_use]
    pub fn siblings(&self, id: PageId) -> &[PageId] {
        match self.parent(id) {
            Some(parent) => self.children(parent),
            None => &self.roots,
        }
    }

    /// Number of ancestors of a page (0 for top-level pages).
    #[must_use]
    pub fn depth(&self, id: PageId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(parent) = current {
            depth += 1;
            current = self.parent(parent);
        }
        depth
    }

    /// Chain from the top-level ancestor down to `id` (inclusive).
    #[must_use]
    pub fn chain(&self, id: PageId) -> Vec<PageId> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(i) = current {
            chain.push(i);
            current = self.parent(i);
        }
        chain.reverse();
        chain
    }

    /// True if `child` is a direct child of `parent`.
    #[must_use]
    pub fn has_child(&self, parent: PageId, child: PageId) -> bool {
        self.parent(child) == Some(parent)
    }

    /// True if the page has children.
    ///
    /// With `only_visible`, invisible children are ignored.
    #[must_use]
    pub fn has_pages(&self, id: PageId, only_visible: bool) -> bool {
        let children = self.children(id);
        if only_visible {
            children.iter().any(|&c| self.page(c).visible)
        } else {
            !children.is_empty()
        }
    }

    /// Active state of a page.
    ///
    /// Non-recursive checks only the page's own flag. Recursive also
    /// reports pages with an active descendant.
    #[must_use]
    pub fn is_active(&self, id: PageId, recursive: bool) -> bool {
        if self.page(id).active {
            return true;
        }
        recursive && self.children(id).iter().any(|&c| self.is_active(c, true))
    }

    /// Find the first page (pre-order) with the given id attribute.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<PageId> {
        self.iter()
            .map(|(page_id, _)| page_id)
            .find(|&page_id| self.page(page_id).id.as_deref() == Some(id))
    }

    /// Mark pages whose href equals `href` as active, all others inactive.
    ///
    /// Returns the first matching page in pre-order.
    pub fn activate_href(&mut self, href: &str) -> Option<PageId> {
        for page in &mut self.pages {
            page.active = page.href.as_deref() == Some(href);
        }
        // Insertion order is not pre-order when children were added late.
        self.iter()
            .map(|(id, _)| id)
            .find(|&id| self.page(id).active)
    }

    /// Pre-order iterator over `(page, depth)` pairs.
    #[must_use]
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder {
            nav: self,
            stack: self.roots.iter().rev().map(|&id| (id, 0)).collect(),
        }
    }

    /// Nested view of the whole navigation for serialization.
    #[must_use]
    pub fn to_tree(&self) -> Vec<PageNode<'_>> {
        self.roots.iter().map(|&id| self.node(id)).collect()
    }

    /// Nested view of a single page and its descendants.
    #[must_use]
    pub fn node(&self, id: PageId) -> PageNode<'_> {
        PageNode {
            page: self.page(id),
            is_active: self.is_active(id, true),
            pages: self.children(id).iter().map(|&c| self.node(c)).collect(),
        }
    }
}

/// Pre-order traversal of a [`Navigation`].
#[derive(Debug)]
pub struct PreOrder<'a> {
    nav: &'a Navigation,
    stack: Vec<(PageId, usize)>,
}

impl Iterator for PreOrder<'_> {
    type Item = (PageId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        self.stack
            .extend(self.nav.children(id).iter().rev().map(|&c| (c, depth + 1)));
        Some((id, depth))
    }
}

impl<'a> IntoIterator for &'a Navigation {
    type Item = (PageId, usize);
    type IntoIter = PreOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builder for constructing [`Navigation`] instances.
#[derive(Debug, Default)]
pub struct NavigationBuilder {
    nav: Navigation,
}

impl NavigationBuilder {
    /// Create a new navigation builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page.
    ///
    /// # Arguments
    ///
    /// * `page` - Page data
    /// * `parent` - Parent page, `None` for a top-level page
    ///
    /// # Returns
    ///
    /// Id of the added page.
    pub fn add_page(&mut self, page: Page, parent: Option<PageId>) -> PageId {
        let id = PageId(self.nav.pages.len());

        self.nav.pages.push(page);
        self.nav.children.push(Vec::new());
        self.nav.parents.push(parent);

        if let Some(parent) = parent {
            self.nav.children[parent.0].push(id);
        } else {
            self.nav.roots.push(id);
        }

        id
    }

    /// Build the [`Navigation`] instance.
    #[must_use]
    pub fn build(self) -> Navigation {
        self.nav
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    static_assertions::assert_impl_all!(Navigation: Send, Sync);

    fn sample() -> (Navigation, PageId, PageId, PageId) {
        let mut builder = NavigationBuilder::new();
        let home = builder.add_page(Page::new("Home", "/"), None);
        let about = builder.add_page(Page::new("About", "/about"), None);
        let team = builder.add_page(
            Page::new("Team", "/about/team").with_active(true),
            Some(about),
        );
        (builder.build(), home, about, team)
    }

    #[test]
    fn test_add_page_links_parent_and_child() {
        let (nav, home, about, team) = sample();

        assert_eq!(nav.roots(), &[home, about]);
        assert_eq!(nav.children(about), &[team]);
        assert_eq!(nav.parent(team), Some(about));
        assert_eq!(nav.parent(home), None);
        assert!(nav.has_child(about, team));
        assert!(!nav.has_child(home, team));
    }

    #[test]
    fn test_depth_counts_ancestors() {
        let (nav, home, _, team) = sample();

        assert_eq!(nav.depth(home), 0);
        assert_eq!(nav.depth(team), 1);
    }

    #[test]
    fn test_chain_is_root_first() {
        let (nav, _, about, team) = sample();

        assert_eq!(nav.chain(team), vec![about, team]);
    }

    #[test]
    fn test_is_active_recursive_includes_descendants() {
        let (nav, home, about, team) = sample();

        assert!(nav.is_active(team, false));
        assert!(!nav.is_active(about, false));
        assert!(nav.is_active(about, true));
        assert!(!nav.is_active(home, true));
    }

    #[test]
    fn test_has_pages_only_visible() {
        let mut builder = NavigationBuilder::new();
        let parent = builder.add_page(Page::new("Parent", "/p"), None);
        builder.add_page(
            Page::new("Hidden", "/p/h").with_visible(false),
            Some(parent),
        );
        let nav = builder.build();

        assert!(nav.has_pages(parent, false));
        assert!(!nav.has_pages(parent, true));
    }

    #[test]
    fn test_siblings_of_root_are_roots() {
        let (nav, home, about, team) = sample();

        assert_eq!(nav.siblings(home), &[home, about]);
        assert_eq!(nav.siblings(team), &[team]);
    }

    #[test]
    fn test_iter_is_pre_order_with_depth() {
        let mut builder = NavigationBuilder::new();
        let a = builder.add_page(Page::new("A", "/a"), None);
        let b = builder.add_page(Page::new("B", "/b"), None);
        let a1 = builder.add_page(Page::new("A1", "/a/1"), Some(a));
        let nav = builder.build();

        let order: Vec<_> = nav.iter().collect();

        assert_eq!(order, vec![(a, 0), (a1, 1), (b, 0)]);

        let mut depths = Vec::new();
        for (_, depth) in &nav {
            depths.push(depth);
        }
        assert_eq!(depths, vec![0, 1, 0]);
    }

    #[test]
    fn test_activate_href_marks_matching_page() {
        let (mut nav, home, _, team) = sample();

        let found = nav.activate_href("/");

        assert_eq!(found, Some(home));
        assert!(nav.page(home).active);
        assert!(!nav.page(team).active);
    }

    #[test]
    fn test_activate_href_unknown_returns_none() {
        let (mut nav, ..) = sample();

        assert_eq!(nav.activate_href("/missing"), None);
        assert!(nav.iter().all(|(id, _)| !nav.page(id).active));
    }

    #[test]
    fn test_find_by_id() {
        let mut builder = NavigationBuilder::new();
        builder.add_page(Page::new("A", "/a"), None);
        let b = builder.add_page(Page::new("B", "/b").with_id("b"), None);
        let nav = builder.build();

        assert_eq!(nav.find_by_id("b"), Some(b));
        assert_eq!(nav.find_by_id("c"), None);
    }

    #[test]
    fn test_tree_serialization() {
        let (nav, ..) = sample();

        let json = serde_json::to_value(nav.to_tree()).unwrap();

        assert_eq!(json[0]["label"], "Home");
        assert!(json[0].get("pages").is_none());
        assert_eq!(json[1]["is_active"], true);
        assert_eq!(json[1]["pages"][0]["label"], "Team");
        assert_eq!(json[1]["pages"][0]["href"], "/about/team");
    }

    #[test]
    fn test_empty_navigation() {
        let nav = Navigation::new();

        assert!(nav.is_empty());
        assert_eq!(nav.iter().count(), 0);
        assert!(nav.to_tree().is_empty());
    }
}
