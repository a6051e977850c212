//! Bootstrap navigation menu helper.
//!
//! Renders a navigation as nested `<ul>`/`<li>` markup. Nested pages open
//! as dropdowns or `<details>` disclosures, and the top-level list can be
//! styled as tabs, pills or a navbar list.
//!
//! Every nesting level of the output adds one copy of the indent string.

mod options;

use std::fmt::{self, Write};
use std::sync::Arc;

use bsnav_container::{ActivePage, ContainerSource, Navigation, PageId, exceeds_max_depth};
use bsnav_view::{AcceptOptions, AcceptPage, Attributes, Partial, translate};
use serde_json::{Map, Value};

use crate::error::HelperError;
use crate::helper::{HelperState, NavigationHelper, clamp_min_depth, find_active_in, push_line};
use crate::services::NavigationServices;

pub use options::{Breakpoint, Direction, Indent, MenuOptions, Sublink, Vertical};

/// Menu view helper.
#[allow(clippy::struct_excessive_bools)]
pub struct Menu {
    state: HelperState,
    ul_class: String,
    li_active_class: String,
    only_active_branch: bool,
    render_parents: bool,
    add_class_to_list_item: bool,
    escape_labels: bool,
}

impl NavigationHelper for Menu {
    const NAME: &'static str = "menu";
    const DEFAULT_MIN_DEPTH: usize = 0;

    fn state(&self) -> &HelperState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut HelperState {
        &mut self.state
    }
}

/// Options merged over the helper state for one render call.
#[allow(clippy::struct_excessive_bools)]
struct Settings {
    indent: String,
    min_depth: usize,
    max_depth: Option<i64>,
    only_active_branch: bool,
    render_parents: bool,
    render_invisible: bool,
    add_class_to_list_item: bool,
    escape_labels: bool,
    ul_class: String,
    li_class: String,
    li_active_class: String,
    tabs: bool,
    pills: bool,
    dark: bool,
    in_navbar: bool,
    direction: Direction,
    sublink: Sublink,
    vertical: Option<Vertical>,
}

impl Menu {
    /// Create a helper seeded from the services' `[menu]` configuration.
    pub(crate) fn new(services: Arc<NavigationServices>) -> Self {
        let config = &services.config().menu;
        let ul_class = config.ul_class.clone();
        let li_active_class = config.li_active_class.clone();
        let only_active_branch = config.only_active_branch;
        let render_parents = config.render_parents;
        let add_class_to_list_item = config.add_class_to_list_item;
        let escape_labels = config.escape_labels;
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
            ul_class,
            li_active_class,
            only_active_branch,
            render_parents,
            add_class_to_list_item,
            escape_labels,
        }
    }

    /// Set the container and return the helper for chaining.
    pub fn invoke(&mut self, source: impl Into<ContainerSource>) -> Result<&mut Self, HelperError> {
        self.set_container(source.into())?;
        Ok(self)
    }

    /// Set the class of the top-level list.
    pub fn set_ul_class(&mut self, ul_class: impl Into<String>) -> &mut Self {
        self.ul_class = ul_class.into();
        self
    }

    /// Class of the top-level list.
    pub fn ul_class(&self) -> &str {
        &self.ul_class
    }

    /// Set the class added to list items on the active branch.
    pub fn set_li_active_class(&mut self, li_active_class: impl Into<String>) -> &mut Self {
        self.li_active_class = li_active_class.into();
        self
    }

    /// Class added to list items on the active branch.
    pub fn li_active_class(&self) -> &str {
        &self.li_active_class
    }

    /// Render only the active branch.
    pub fn set_only_active_branch(&mut self, only_active_branch: bool) -> &mut Self {
        self.only_active_branch = only_active_branch;
        self
    }

    /// Whether only the active branch is rendered.
    pub fn only_active_branch(&self) -> bool {
        self.only_active_branch
    }

    /// With `only_active_branch`, also render the active page's parents.
    pub fn set_render_parents(&mut self, render_parents: bool) -> &mut Self {
        self.render_parents = render_parents;
        self
    }

    /// Whether parents of the active page are rendered.
    pub fn render_parents(&self) -> bool {
        self.render_parents
    }

    /// Put the page class on the list item instead of the link.
    pub fn set_add_class_to_list_item(&mut self, add_class_to_list_item: bool) -> &mut Self {
        self.add_class_to_list_item = add_class_to_list_item;
        self
    }

    /// Whether the page class goes on the list item.
    pub fn add_class_to_list_item(&self) -> bool {
        self.add_class_to_list_item
    }

    /// Escape labels.
    pub fn set_escape_labels(&mut self, escape_labels: bool) -> &mut Self {
        self.escape_labels = escape_labels;
        self
    }

    /// Whether labels are escaped.
    pub fn escape_labels(&self) -> bool {
        self.escape_labels
    }

    /// Render with the configured partial, or as a menu if there is none.
    pub fn render(&self, source: impl Into<ContainerSource>) -> Result<String, HelperError> {
        if self.partial().is_some() {
            self.render_partial(source, None)
        } else {
            self.render_menu(source, &MenuOptions::default())
        }
    }

    /// Render an options map, validating it before any markup is produced.
    pub fn render_menu_value(
        &self,
        source: impl Into<ContainerSource>,
        options: &Value,
    ) -> Result<String, HelperError> {
        let options = MenuOptions::from_value(options)?;
        self.render_menu(source, &options)
    }

    /// Render the menu markup.
    ///
    /// Returns an empty string when nothing is renderable, or when
    /// `only_active_branch` is set and no page is active.
    pub fn render_menu(
        &self,
        source: impl Into<ContainerSource>,
        options: &MenuOptions,
    ) -> Result<String, HelperError> {
        if let Some(partial) = &options.partial {
            return self.render_partial(source, Some(partial));
        }

        let settings = self.settings(options);
        let nav = self.resolve_container(source.into())?;
        let accept = self.accept_helper_with(self.menu_accept_options(options, &settings))?;

        let renderer = MenuRenderer {
            menu: self,
            nav: &nav,
            accept: accept.as_ref(),
            settings: &settings,
        };
        renderer.render()
    }

    /// Render the children of the active page as a flat list.
    ///
    /// Depth bounds are lifted for the call. Afterwards min and max depth
    /// are unset and `render_parents` and `add_class_to_list_item` are
    /// false, whatever they were before.
    pub fn render_sub_menu(
        &mut self,
        source: impl Into<ContainerSource>,
        ul_class: Option<&str>,
        indent: Option<&str>,
        li_active_class: Option<&str>,
    ) -> Result<String, HelperError> {
        let options = MenuOptions {
            indent: indent.map(|indent| Indent::Text(indent.to_owned())),
            ul_class: ul_class.map(str::to_owned),
            li_active_class: li_active_class.map(str::to_owned),
            min_depth: Some(None),
            max_depth: Some(None),
            only_active_branch: Some(true),
            render_parents: Some(false),
            escape_labels: Some(true),
            add_class_to_list_item: Some(false),
            ..MenuOptions::default()
        };

        let result = self.render_menu(source, &options);

        self.state.min_depth = None;
        self.state.max_depth = None;
        self.render_parents = false;
        self.add_class_to_list_item = false;

        result
    }

    /// Render with a partial, passing `{container, layout: false}` as the model.
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
        let mut model = Map::new();
        model.insert("container".to_owned(), serde_json::to_value(nav.to_tree())?);
        model.insert("layout".to_owned(), Value::Bool(false));

        self.render_partial_model(partial, model)
    }

    fn settings(&self, options: &MenuOptions) -> Settings {
        let min_depth = match options.min_depth {
            Some(min_depth) => min_depth.map_or(Self::DEFAULT_MIN_DEPTH, clamp_min_depth),
            None => self.min_depth(),
        };

        Settings {
            indent: options
                .indent
                .as_ref()
                .map_or_else(|| self.indent().to_owned(), Indent::to_text),
            min_depth,
            max_depth: options.max_depth.unwrap_or_else(|| self.max_depth()),
            only_active_branch: options
                .only_active_branch
                .unwrap_or(self.only_active_branch),
            render_parents: options.render_parents.unwrap_or(self.render_parents),
            render_invisible: options
                .render_invisible
                .unwrap_or_else(|| self.render_invisible()),
            add_class_to_list_item: options
                .add_class_to_list_item
                .unwrap_or(self.add_class_to_list_item),
            escape_labels: options.escape_labels.unwrap_or(self.escape_labels),
            ul_class: options
                .ul_class
                .clone()
                .unwrap_or_else(|| self.ul_class.clone()),
            li_class: options.li_class.clone().unwrap_or_default(),
            li_active_class: options
                .li_active_class
                .clone()
                .unwrap_or_else(|| self.li_active_class.clone()),
            tabs: options.tabs.unwrap_or(false),
            pills: options.pills.unwrap_or(false),
            dark: options.dark.unwrap_or(false),
            in_navbar: options.in_navbar.unwrap_or(false),
            direction: options.direction.unwrap_or_default(),
            sublink: options.sublink.unwrap_or_default(),
            vertical: options.vertical,
        }
    }

    fn menu_accept_options(&self, options: &MenuOptions, settings: &Settings) -> AcceptOptions {
        let use_authorization = options
            .use_authorization
            .unwrap_or_else(|| self.use_authorization());
        AcceptOptions {
            authorization: if use_authorization {
                options
                    .authorization
                    .clone()
                    .or_else(|| self.authorization())
            } else {
                None
            },
            role: options.role.clone().or_else(|| self.role()),
            render_invisible: settings.render_invisible,
        }
    }
}

impl fmt::Display for Menu {
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

/// One render pass over a resolved navigation.
struct MenuRenderer<'a> {
    menu: &'a Menu,
    nav: &'a Navigation,
    accept: &'a dyn AcceptPage,
    settings: &'a Settings,
}

impl MenuRenderer<'_> {
    fn render(&self) -> Result<String, HelperError> {
        let s = self.settings;

        if !s.only_active_branch {
            let top = self.top_level(None)?;
            return self.render_top(&top, None, true);
        }

        let Some(active) = find_active_in(self.nav, self.accept, 0, s.max_depth)? else {
            tracing::debug!("No active page, menu is empty");
            return Ok(String::new());
        };

        if s.render_parents {
            let top = self.top_level(Some(active))?;
            self.render_top(&top, Some(active), true)
        } else {
            let pages = self.deepest(active)?;
            self.render_top(&pages, Some(active), false)
        }
    }

    fn accepts(&self, page: PageId) -> Result<bool, HelperError> {
        Ok(self.accept.accept(self.nav, page, true)?)
    }

    fn exceeds_max_depth(&self, depth: usize) -> bool {
        exceeds_max_depth(depth, self.settings.max_depth)
    }

    /// Pages of the top-level list. Pages above `min_depth` are left out
    /// and their descendants at `min_depth` take their place.
    fn top_level(&self, active: Option<ActivePage>) -> Result<Vec<PageId>, HelperError> {
        let mut top = Vec::new();
        self.collect(self.nav.roots(), 0, active, &mut top)?;
        Ok(top)
    }

    fn collect(
        &self,
        pages: &[PageId],
        depth: usize,
        active: Option<ActivePage>,
        out: &mut Vec<PageId>,
    ) -> Result<(), HelperError> {
        if self.exceeds_max_depth(depth) {
            return Ok(());
        }
        for &page in pages {
            if !self.accepts(page)? {
                continue;
            }
            if depth < self.settings.min_depth {
                self.collect(self.nav.children(page), depth + 1, active, out)?;
            } else if self.on_branch(page, active) {
                out.push(page);
            }
        }
        Ok(())
    }

    /// Active-branch filter for `only_active_branch` with parents.
    ///
    /// Keeps pages on the active branch and the found page's children.
    /// The found page's siblings are kept too when its own children will
    /// not be rendered.
    fn on_branch(&self, page: PageId, active: Option<ActivePage>) -> bool {
        let nav = self.nav;
        if !self.settings.only_active_branch || nav.is_active(page, true) {
            return true;
        }
        let Some(found) = active else {
            return false;
        };
        if nav.has_child(found.page, page) {
            return true;
        }
        if nav.parent(page) == nav.parent(found.page) {
            return !nav.has_pages(found.page, !self.settings.render_invisible)
                || self.exceeds_max_depth(found.depth + 1);
        }
        false
    }

    /// Flat list for `only_active_branch` without parents.
    fn deepest(&self, active: ActivePage) -> Result<Vec<PageId>, HelperError> {
        let nav = self.nav;
        let has_pages = nav.has_pages(active.page, !self.settings.render_invisible);

        let candidates = if active.depth < self.settings.min_depth {
            if !has_pages {
                return Ok(Vec::new());
            }
            nav.children(active.page)
        } else if !has_pages || self.exceeds_max_depth(active.depth + 1) {
            nav.siblings(active.page)
        } else {
            nav.children(active.page)
        };

        let mut pages = Vec::with_capacity(candidates.len());
        for &page in candidates {
            if self.accepts(page)? {
                pages.push(page);
            }
        }
        Ok(pages)
    }

    /// Renderable children of `page`, which sits at `depth`.
    fn sub_pages(
        &self,
        page: PageId,
        depth: usize,
        active: Option<ActivePage>,
    ) -> Result<Vec<PageId>, HelperError> {
        if self.exceeds_max_depth(depth + 1) {
            return Ok(Vec::new());
        }
        let mut pages = Vec::new();
        for &child in self.nav.children(page) {
            if self.accepts(child)? && self.on_branch(child, active) {
                pages.push(child);
            }
        }
        Ok(pages)
    }

    fn render_top(
        &self,
        pages: &[PageId],
        active: Option<ActivePage>,
        nested: bool,
    ) -> Result<String, HelperError> {
        if pages.is_empty() {
            return Ok(String::new());
        }
        let s = self.settings;
        let services = self.menu.services();

        let mut classes = vec![if s.in_navbar { "navbar-nav" } else { "nav" }];
        if !s.ul_class.is_empty() {
            classes.push(&s.ul_class);
        }
        if s.tabs {
            classes.push("nav-tabs");
        }
        if s.pills {
            classes.push("nav-pills");
        }
        let vertical = s.vertical.map(Vertical::class);
        if let Some(vertical) = &vertical {
            classes.push(vertical);
        }

        let mut open = format!(
            r#"<ul class="{}""#,
            services.escaper().escape_html_attr(&classes.join(" "))
        );
        if s.tabs || s.pills {
            open.push_str(r#" role="tablist""#);
        }
        open.push('>');

        let mut html = String::new();
        push_line(&mut html, &s.indent, 0, &open);
        for &page in pages {
            let depth = self.nav.depth(page);
            let children = if nested {
                self.sub_pages(page, depth, active)?
            } else {
                Vec::new()
            };
            self.render_item(&mut html, page, &children, active, 1, ItemContext::Top)?;
        }
        push_line(&mut html, &s.indent, 0, "</ul>");

        tracing::debug!(
            pages = pages.len(),
            only_active_branch = s.only_active_branch,
            "Rendered menu"
        );
        Ok(html)
    }

    fn render_item(
        &self,
        html: &mut String,
        page: PageId,
        children: &[PageId],
        active: Option<ActivePage>,
        level: usize,
        context: ItemContext,
    ) -> Result<(), HelperError> {
        let s = self.settings;
        let nav = self.nav;
        let data = nav.page(page);
        let services = self.menu.services();
        let indent = s.indent.as_str();

        let has_children = !children.is_empty();
        let dropdown = has_children && s.sublink == Sublink::Dropdown;
        let branch_active = nav.is_active(page, true);
        let tablist = context == ItemContext::Top && (s.tabs || s.pills);

        let mut li_classes: Vec<&str> = Vec::new();
        if context != ItemContext::Dropdown {
            li_classes.push("nav-item");
        }
        if dropdown {
            li_classes.push(s.direction.class());
        }
        if branch_active && !s.li_active_class.is_empty() {
            li_classes.push(&s.li_active_class);
        }
        if !s.li_class.is_empty() {
            li_classes.push(&s.li_class);
        }
        if let Some(li_class) = data.li_class.as_deref() {
            li_classes.push(li_class);
        }
        if s.add_class_to_list_item
            && let Some(class) = data.class.as_deref()
        {
            li_classes.push(class);
        }

        let mut li = "<li".to_owned();
        if !li_classes.is_empty() {
            write!(
                li,
                r#" class="{}""#,
                services.escaper().escape_html_attr(&li_classes.join(" "))
            )
            .unwrap();
        }
        if tablist {
            li.push_str(r#" role="presentation""#);
        }
        li.push('>');

        let link = self.link(page, context, dropdown, branch_active, tablist);

        push_line(html, indent, level, &li);
        if !has_children {
            push_line(html, indent, level + 1, &link);
        } else if dropdown {
            push_line(html, indent, level + 1, &link);
            let mut ul = "dropdown-menu".to_owned();
            if s.dark {
                ul.push_str(" dropdown-menu-dark");
            }
            let mut open = format!(r#"<ul class="{ul}""#);
            if let Some(id) = data.id.as_deref() {
                write!(
                    open,
                    r#" aria-labelledby="{}""#,
                    services.escaper().escape_html_attr(&format!("menu-{id}"))
                )
                .unwrap();
            }
            open.push('>');
            push_line(html, indent, level + 1, &open);
            self.render_children(html, children, active, level + 2, ItemContext::Dropdown)?;
            push_line(html, indent, level + 1, "</ul>");
        } else {
            push_line(html, indent, level + 1, "<details>");
            push_line(html, indent, level + 2, "<summary>");
            push_line(html, indent, level + 3, &link);
            push_line(html, indent, level + 2, "</summary>");
            push_line(html, indent, level + 2, "<ul>");
            self.render_children(html, children, active, level + 3, ItemContext::Details)?;
            push_line(html, indent, level + 2, "</ul>");
            push_line(html, indent, level + 1, "</details>");
        }
        push_line(html, indent, level, "</li>");
        Ok(())
    }

    fn render_children(
        &self,
        html: &mut String,
        pages: &[PageId],
        active: Option<ActivePage>,
        level: usize,
        context: ItemContext,
    ) -> Result<(), HelperError> {
        for &page in pages {
            let children = self.sub_pages(page, self.nav.depth(page), active)?;
            self.render_item(html, page, &children, active, level, context)?;
        }
        Ok(())
    }

    fn link(
        &self,
        page: PageId,
        context: ItemContext,
        dropdown: bool,
        branch_active: bool,
        tablist: bool,
    ) -> String {
        let s = self.settings;
        let data = self.nav.page(page);
        let services = self.menu.services();
        let domain = data.text_domain.as_deref();

        let mut classes = vec![if context == ItemContext::Dropdown {
            "dropdown-item"
        } else {
            "nav-link"
        }];
        if dropdown {
            classes.push("dropdown-toggle");
        }
        if !s.add_class_to_list_item
            && let Some(class) = data.class.as_deref()
        {
            classes.push(class);
        }
        if branch_active {
            classes.push("active");
        }

        let mut attributes = Attributes::new();
        attributes.set_opt("id", data.id.as_ref().map(|id| format!("menu-{id}")));
        attributes.set_opt(
            "title",
            data.title
                .as_deref()
                .map(|title| translate(services.translator(), title, domain)),
        );
        attributes.set("class", classes.join(" "));
        attributes.set_opt("href", data.href.as_ref());
        attributes.set_opt("target", data.target.as_ref());
        if data.active {
            attributes.set("aria-current", "page");
        }
        if dropdown {
            attributes
                .set("role", "button")
                .set("data-bs-toggle", "dropdown")
                .set("aria-expanded", "false");
        } else if tablist {
            attributes.set("role", "tab");
        }

        let label = self.menu.label(self.nav, page, s.escape_labels);
        services.element().to_html("a", &attributes, &label)
    }
}

/// Where a list item sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ItemContext {
    /// Top-level list.
    Top,
    /// Inside a `dropdown-menu`.
    Dropdown,
    /// Inside a `<details>` list.
    Details,
}
