//! State and behavior shared by the navigation helpers.

use std::sync::Arc;

use bsnav_container::{ActivePage, ContainerSource, Navigation, PageId, find_active};
use bsnav_view::{AcceptOptions, AcceptPage, Authorization, LinkOptions, Partial, translate};
use serde_json::{Map, Value};

use crate::error::HelperError;
use crate::services::NavigationServices;

/// Per-instance helper configuration.
#[doc(hidden)]
pub struct HelperState {
    pub(crate) services: Arc<NavigationServices>,
    pub(crate) container: Option<Arc<Navigation>>,
    pub(crate) indent: String,
    pub(crate) min_depth: Option<usize>,
    pub(crate) max_depth: Option<i64>,
    pub(crate) render_invisible: bool,
    pub(crate) use_authorization: bool,
    pub(crate) authorization: Option<Arc<dyn Authorization>>,
    pub(crate) role: Option<String>,
    pub(crate) partial: Option<Partial>,
}

impl HelperState {
    pub(crate) fn new(services: Arc<NavigationServices>) -> Self {
        let authorization = &services.config().authorization;
        let render_invisible = authorization.render_invisible;
        let use_authorization = authorization.use_authorization;
        Self {
            services,
            container: None,
            indent: String::new(),
            min_depth: None,
            max_depth: None,
            render_invisible,
            use_authorization,
            authorization: None,
            role: None,
            partial: None,
        }
    }
}

/// Effective minimum depth for a written value: negatives become 1.
pub(crate) fn clamp_min_depth(min_depth: i64) -> usize {
    usize::try_from(min_depth).unwrap_or(1)
}

/// Write one output line: the indent repeated `level` times, `content`, newline.
pub(crate) fn push_line(out: &mut String, indent: &str, level: usize, content: &str) {
    for _ in 0..level {
        out.push_str(indent);
    }
    out.push_str(content);
    out.push('\n');
}

/// Configuration and shared operations of a navigation helper.
///
/// Implemented by [`Breadcrumbs`](crate::Breadcrumbs) and
/// [`Menu`](crate::Menu).
pub trait NavigationHelper {
    /// Name used in error messages and as the link id prefix.
    const NAME: &'static str;

    /// Minimum depth used while none is set.
    const DEFAULT_MIN_DEPTH: usize;

    #[doc(hidden)]
    fn state(&self) -> &HelperState;

    #[doc(hidden)]
    fn state_mut(&mut self) -> &mut HelperState;

    /// Services this helper was created from.
    fn services(&self) -> &Arc<NavigationServices> {
        &self.state().services
    }

    /// Set the container to render, resolving names immediately.
    ///
    /// [`ContainerSource::None`] resets to the default empty container.
    fn set_container(&mut self, source: ContainerSource) -> Result<(), HelperError> {
        let container = self
            .state()
            .services
            .container_parser()
            .parse_container(source)?;
        self.state_mut().container = container;
        Ok(())
    }

    /// Container to render. An empty navigation if none was set.
    fn container(&self) -> Arc<Navigation> {
        self.state()
            .container
            .clone()
            .unwrap_or_else(|| Arc::new(Navigation::new()))
    }

    /// True if a container was set.
    fn has_container(&self) -> bool {
        self.state().container.is_some()
    }

    /// Resolve a per-call container source, falling back to [`container`](Self::container).
    fn resolve_container(&self, source: ContainerSource) -> Result<Arc<Navigation>, HelperError> {
        let parsed = self
            .state()
            .services
            .container_parser()
            .parse_container(source)?;
        Ok(parsed.unwrap_or_else(|| self.container()))
    }

    /// Set the indentation unit.
    fn set_indent(&mut self, indent: &str) {
        indent.clone_into(&mut self.state_mut().indent);
    }

    /// Set the indentation unit to `width` spaces.
    fn set_indent_width(&mut self, width: usize) {
        self.state_mut().indent = " ".repeat(width);
    }

    /// Indentation unit.
    fn indent(&self) -> &str {
        &self.state().indent
    }

    /// Set the minimum depth. Negative values are stored as 1 and `None`
    /// restores the default.
    fn set_min_depth(&mut self, min_depth: Option<i64>) {
        self.state_mut().min_depth = min_depth.map(clamp_min_depth);
    }

    /// Minimum depth, [`DEFAULT_MIN_DEPTH`](Self::DEFAULT_MIN_DEPTH) while unset.
    fn min_depth(&self) -> usize {
        self.state().min_depth.unwrap_or(Self::DEFAULT_MIN_DEPTH)
    }

    /// Set the maximum depth (`None` for unbounded).
    ///
    /// A negative bound is kept as is. Nothing is active or rendered below it.
    fn set_max_depth(&mut self, max_depth: Option<i64>) {
        self.state_mut().max_depth = max_depth;
    }

    /// Maximum depth.
    fn max_depth(&self) -> Option<i64> {
        self.state().max_depth
    }

    /// Render pages marked invisible.
    fn set_render_invisible(&mut self, render_invisible: bool) {
        self.state_mut().render_invisible = render_invisible;
    }

    /// Whether invisible pages are rendered.
    fn render_invisible(&self) -> bool {
        self.state().render_invisible
    }

    /// Check page resources against the authorization.
    fn set_use_authorization(&mut self, use_authorization: bool) {
        self.state_mut().use_authorization = use_authorization;
    }

    /// Whether authorization is checked.
    fn use_authorization(&self) -> bool {
        self.state().use_authorization
    }

    /// Set the instance authorization.
    fn set_authorization(&mut self, authorization: Option<Arc<dyn Authorization>>) {
        self.state_mut().authorization = authorization;
    }

    /// Instance authorization, else the services' default.
    fn authorization(&self) -> Option<Arc<dyn Authorization>> {
        self.state()
            .authorization
            .clone()
            .or_else(|| self.state().services.default_authorization())
    }

    /// Set the instance role.
    fn set_role(&mut self, role: Option<String>) {
        self.state_mut().role = role;
    }

    /// Instance role, else the services' default.
    fn role(&self) -> Option<String> {
        self.state()
            .role
            .clone()
            .or_else(|| self.state().services.default_role())
    }

    /// Set the partial used by `render`.
    fn set_partial(&mut self, partial: Option<Partial>) {
        self.state_mut().partial = partial;
    }

    /// Set the partial from a loose value: a name or a `[name, module]` pair.
    fn set_partial_value(&mut self, value: &Value) -> Result<(), HelperError> {
        let partial = parse_partial::<Self>(value)?;
        self.set_partial(partial);
        Ok(())
    }

    /// Configured partial.
    fn partial(&self) -> Option<&Partial> {
        self.state().partial.as_ref()
    }

    /// Options for building the accept filter from the current state.
    fn accept_options(&self) -> AcceptOptions {
        AcceptOptions {
            authorization: if self.use_authorization() {
                self.authorization()
            } else {
                None
            },
            role: self.role(),
            render_invisible: self.render_invisible(),
        }
    }

    /// Build the accept filter.
    ///
    /// Construction failures become [`HelperError::Runtime`].
    fn accept_helper(&self) -> Result<Box<dyn AcceptPage>, HelperError> {
        self.accept_helper_with(self.accept_options())
    }

    #[doc(hidden)]
    fn accept_helper_with(
        &self,
        options: AcceptOptions,
    ) -> Result<Box<dyn AcceptPage>, HelperError> {
        self.state()
            .services
            .accept_factory()
            .create(options)
            .map_err(|e| {
                tracing::debug!(helper = Self::NAME, error = %e, "Failed to build accept helper");
                HelperError::from(e)
            })
    }

    /// Whether `page` passes visibility and authorization.
    fn accept(&self, nav: &Navigation, page: PageId, recursive: bool) -> Result<bool, HelperError> {
        Ok(self.accept_helper()?.accept(nav, page, recursive)?)
    }

    /// Find the deepest active page.
    ///
    /// `None` bounds use the helper's own min/max depth.
    fn find_active(
        &self,
        source: ContainerSource,
        min_depth: Option<usize>,
        max_depth: Option<i64>,
    ) -> Result<Option<ActivePage>, HelperError> {
        let nav = self.resolve_container(source)?;
        let accept = self.accept_helper()?;
        find_active_in(
            &nav,
            accept.as_ref(),
            min_depth.unwrap_or_else(|| self.min_depth()),
            max_depth.or_else(|| self.max_depth()),
        )
    }

    /// Render a page as a link with this helper's id prefix.
    fn htmlify(&self, nav: &Navigation, page: PageId, options: &LinkOptions<'_>) -> String {
        self.state()
            .services
            .htmlify()
            .to_html(Self::NAME, nav, page, options)
    }

    /// Translated and escaped page label.
    fn label(&self, nav: &Navigation, page: PageId, escape: bool) -> String {
        let services = &self.state().services;
        let data = nav.page(page);
        let label = translate(
            services.translator(),
            &data.label,
            data.text_domain.as_deref(),
        );
        if escape {
            services.escaper().escape_html(&label)
        } else {
            label
        }
    }

    /// Render a partial with `model` as its variables.
    fn render_partial_model(
        &self,
        partial: &Partial,
        model: Map<String, Value>,
    ) -> Result<String, HelperError> {
        let renderer = self.state().services.partial_renderer();
        let html = match partial {
            Partial::Name(name) | Partial::Namespaced { name, .. } => {
                renderer.render(name, &Value::Object(model))?
            }
            Partial::Model(view_model) => {
                let mut view_model = view_model.clone();
                view_model.set_variables(model);
                renderer.render(
                    view_model.template(),
                    &Value::Object(view_model.variables().clone()),
                )?
            }
        };
        Ok(html)
    }
}

/// [`find_active`] with an accept filter, mapping its errors.
pub(crate) fn find_active_in(
    nav: &Navigation,
    accept: &dyn AcceptPage,
    min_depth: usize,
    max_depth: Option<i64>,
) -> Result<Option<ActivePage>, HelperError> {
    Ok(find_active(
        nav,
        |id| accept.accept(nav, id, true),
        min_depth,
        max_depth,
    )?)
}

/// Parse a partial given as a name or a `[name, module]` array.
pub(crate) fn parse_partial<H: NavigationHelper + ?Sized>(
    value: &Value,
) -> Result<Option<Partial>, HelperError> {
    match value {
        Value::Null => Ok(None),
        Value::String(name) => Ok(Some(Partial::Name(name.clone()))),
        Value::Array(items) => match items.as_slice() {
            [Value::String(name), Value::String(module)] => Ok(Some(Partial::Namespaced {
                name: name.clone(),
                module: module.clone(),
            })),
            _ => Err(HelperError::InvalidArgument(format!(
                "Unable to render {}: A view partial supplied as an array must contain two values: \
                 the partial view script and the module where the script can be found",
                H::NAME
            ))),
        },
        _ => Err(HelperError::InvalidArgument(format!(
            "Unable to render {}: the partial must be a string or an array",
            H::NAME
        ))),
    }
}
