//! Deepest active page lookup.

use crate::navigation::{Navigation, PageId};

/// Active page found by [`find_active`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivePage {
    /// The active page (or its ancestor when clamped to a maximum depth).
    pub page: PageId,
    /// Number of ancestors of `page`.
    pub depth: usize,
}

/// Find the deepest active page.
///
/// Walks the navigation depth-first in pre-order. Pages rejected by
/// `accept` are skipped together with their subtree. A page qualifies if
/// its own active flag is set and `depth >= min_depth`; the first page
/// found at the greatest depth wins.
///
/// When the winner is deeper than `max_depth`, its ancestors are used
/// instead, one level at a time, until the depth fits. If that moves
/// above `min_depth` or past a root, nothing is found. A shallower active
/// page later in pre-order never replaces the clamped ancestor, and a
/// negative `max_depth` finds nothing.
///
/// # Errors
///
/// Returns the first error produced by `accept`.
pub fn find_active<F, E>(
    nav: &Navigation,
    mut accept: F,
    min_depth: usize,
    max_depth: Option<i64>,
) -> Result<Option<ActivePage>, E>
where
    F: FnMut(PageId) -> Result<bool, E>,
{
    fn walk<F, E>(
        nav: &Navigation,
        ids: &[PageId],
        depth: usize,
        min_depth: usize,
        accept: &mut F,
        found: &mut Option<ActivePage>,
    ) -> Result<(), E>
    where
        F: FnMut(PageId) -> Result<bool, E>,
    {
        for &id in ids {
            if !accept(id)? {
                continue;
            }
            let deeper = found.is_none_or(|f| depth > f.depth);
            if depth >= min_depth && deeper && nav.is_active(id, false) {
                *found = Some(ActivePage { page: id, depth });
            }
            walk(nav, nav.children(id), depth + 1, min_depth, accept, found)?;
        }
        Ok(())
    }

    let mut found = None;
    walk(nav, nav.roots(), 0, min_depth, &mut accept, &mut found)?;

    let Some(mut active) = found else {
        return Ok(None);
    };

    while exceeds_max_depth(active.depth, max_depth) {
        let Some(parent) = nav.parent(active.page) else {
            return Ok(None);
        };
        active.depth -= 1;
        if active.depth < min_depth {
            return Ok(None);
        }
        active.page = parent;
    }

    debug_assert_eq!(active.depth, nav.depth(active.page));
    Ok(Some(active))
}

/// True if `depth` lies beyond an optional, possibly negative, bound.
pub fn exceeds_max_depth(depth: usize, max_depth: Option<i64>) -> bool {
    max_depth.is_some_and(|max| !i64::try_from(depth).is_ok_and(|depth| depth <= max))
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;
    use crate::navigation::{NavigationBuilder, Page};
    use pretty_assertions::assert_eq;

    #[allow(clippy::unnecessary_wraps)]
    fn accept_all(_: PageId) -> Result<bool, Infallible> {
        Ok(true)
    }

    /// Home, Docs > Guide > Install (active), Blog (active)
    fn tree() -> (Navigation, [PageId; 5]) {
        let mut builder = NavigationBuilder::new();
        let home = builder.add_page(Page::new("Home", "/"), None);
        let docs = builder.add_page(Page::new("Docs", "/docs"), None);
        let guide = builder.add_page(Page::new("Guide", "/docs/guide"), Some(docs));
        let install = builder.add_page(
            Page::new("Install", "/docs/guide/install").with_active(true),
            Some(guide),
        );
        let blog = builder.add_page(Page::new("Blog", "/blog").with_active(true), None);
        (builder.build(), [home, docs, guide, install, blog])
    }

    #[test]
    fn test_empty_navigation_finds_nothing() {
        let nav = Navigation::new();

        let found = find_active(&nav, accept_all, 0, None).unwrap();

        assert_eq!(found, None);
    }

    #[test]
    fn test_no_active_page_finds_nothing() {
        let mut builder = NavigationBuilder::new();
        builder.add_page(Page::new("Home", "/"), None);
        let nav = builder.build();

        assert_eq!(find_active(&nav, accept_all, 0, None).unwrap(), None);
    }

    #[test]
    fn test_deepest_active_page_wins() {
        let (nav, [.., install, _]) = tree();

        let found = find_active(&nav, accept_all, 0, None).unwrap();

        assert_eq!(found, Some(ActivePage { page: install, depth: 2 }));
    }

    #[test]
    fn test_first_in_pre_order_wins_at_equal_depth() {
        let mut builder = NavigationBuilder::new();
        let first = builder.add_page(Page::new("A", "/a").with_active(true), None);
        builder.add_page(Page::new("B", "/b").with_active(true), None);
        let nav = builder.build();

        let found = find_active(&nav, accept_all, 0, None).unwrap().unwrap();

        assert_eq!(found.page, first);
    }

    #[test]
    fn test_max_depth_clamps_to_ancestor() {
        let (nav, [_, docs, guide, ..]) = tree();

        let found = find_active(&nav, accept_all, 0, Some(1)).unwrap();
        assert_eq!(found, Some(ActivePage { page: guide, depth: 1 }));

        let found = find_active(&nav, accept_all, 0, Some(0)).unwrap();
        assert_eq!(found, Some(ActivePage { page: docs, depth: 0 }));
    }

    #[test]
    fn test_clamped_ancestor_beats_later_shallow_active_page() {
        let (nav, [_, docs, .., blog]) = tree();

        let found = find_active(&nav, accept_all, 0, Some(0)).unwrap().unwrap();

        assert_eq!(found.page, docs);
        assert_ne!(found.page, blog);
        assert!(!nav.is_active(found.page, false));
    }

    #[test]
    fn test_negative_max_depth_finds_nothing() {
        let (nav, _) = tree();

        assert_eq!(find_active(&nav, accept_all, 0, Some(-1)).unwrap(), None);
    }

    #[test]
    fn test_exceeds_max_depth() {
        assert!(!exceeds_max_depth(5, None));
        assert!(!exceeds_max_depth(2, Some(2)));
        assert!(exceeds_max_depth(3, Some(2)));
        assert!(exceeds_max_depth(0, Some(-1)));
    }

    #[test]
    fn test_clamping_above_min_depth_finds_nothing() {
        let (nav, _) = tree();

        let found = find_active(&nav, accept_all, 2, Some(1)).unwrap();

        assert_eq!(found, None);
    }

    #[test]
    fn test_min_depth_skips_shallow_active_pages() {
        let mut builder = NavigationBuilder::new();
        builder.add_page(Page::new("Blog", "/blog").with_active(true), None);
        let nav = builder.build();

        assert_eq!(find_active(&nav, accept_all, 1, None).unwrap(), None);
    }

    #[test]
    fn test_rejected_page_hides_subtree() {
        let (nav, [_, docs, _, _, blog]) = tree();

        let found = find_active(&nav, |id| Ok::<_, Infallible>(id != docs), 0, None).unwrap();

        assert_eq!(found, Some(ActivePage { page: blog, depth: 0 }));
    }

    #[test]
    fn test_accept_error_propagates() {
        let (nav, _) = tree();

        let result = find_active(&nav, |_| Err("denied"), 0, None);

        assert_eq!(result, Err("denied"));
    }

    #[test]
    fn test_active_ancestor_does_not_activate_children() {
        let mut builder = NavigationBuilder::new();
        let parent = builder.add_page(Page::new("Parent", "/p").with_active(true), None);
        builder.add_page(Page::new("Child", "/p/c"), Some(parent));
        let nav = builder.build();

        let found = find_active(&nav, accept_all, 0, None).unwrap();

        assert_eq!(found, Some(ActivePage { page: parent, depth: 0 }));
    }
}
