//! Composition root for the navigation helpers.
//!
//! [`NavigationServices`] owns every collaborator the helpers need plus
//! the shared default authorization and role. Helpers are created from it
//! per request with [`NavigationServices::breadcrumbs`] and
//! [`NavigationServices::menu`].

use std::sync::{Arc, RwLock};

use bsnav_config::Config;
use bsnav_container::{ContainerParser, ContainerRegistry, Navigation};
use bsnav_view::{
    AcceptHelperFactory, Authorization, DefaultAcceptHelperFactory, ElementBuilder, Escaper,
    HtmlElement, HtmlEscaper, Htmlify, LinkBuilder, PartialRenderer, TemplateRegistry,
    Translator,
};

use crate::breadcrumbs::Breadcrumbs;
use crate::menu::Menu;

/// Fallback authorization and role for helpers without their own.
#[derive(Default)]
struct Defaults {
    authorization: Option<Arc<dyn Authorization>>,
    role: Option<String>,
}

/// Shared services and defaults for navigation helpers.
///
/// Collaborators are `Send + Sync` and the defaults sit behind an `RwLock`,
/// so one instance can be shared across request workers.
pub struct NavigationServices {
    container_parser: Arc<dyn ContainerParser>,
    escaper: Arc<dyn Escaper>,
    translator: Option<Arc<dyn Translator>>,
    element: Arc<dyn HtmlElement>,
    htmlify: Arc<dyn Htmlify>,
    partial_renderer: Arc<dyn PartialRenderer>,
    accept_factory: Arc<dyn AcceptHelperFactory>,
    defaults: RwLock<Defaults>,
    config: Config,
}

impl NavigationServices {
    /// Start building services.
    #[must_use]
    pub fn builder() -> NavigationServicesBuilder {
        NavigationServicesBuilder::default()
    }

    /// Services wired from configuration with default collaborators.
    #[must_use]
    pub fn from_config(config: Config) -> Arc<Self> {
        Self::builder().config(config).build()
    }

    /// Create a breadcrumbs helper.
    #[must_use]
    pub fn breadcrumbs(self: &Arc<Self>) -> Breadcrumbs {
        Breadcrumbs::new(Arc::clone(self))
    }

    /// Create a menu helper.
    #[must_use]
    pub fn menu(self: &Arc<Self>) -> Menu {
        Menu::new(Arc::clone(self))
    }

    /// Install a default authorization.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    pub fn set_default_authorization(&self, authorization: Option<Arc<dyn Authorization>>) {
        self.defaults.write().unwrap().authorization = authorization;
    }

    /// Install a default role.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    pub fn set_default_role(&self, role: Option<String>) {
        self.defaults.write().unwrap().role = role;
    }

    /// Remove the default authorization and role.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    pub fn clear_defaults(&self) {
        *self.defaults.write().unwrap() = Defaults::default();
    }

    /// Current default authorization.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn default_authorization(&self) -> Option<Arc<dyn Authorization>> {
        self.defaults.read().unwrap().authorization.clone()
    }

    /// Current default role.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn default_role(&self) -> Option<String> {
        self.defaults.read().unwrap().role.clone()
    }

    pub(crate) fn container_parser(&self) -> &dyn ContainerParser {
        self.container_parser.as_ref()
    }

    pub(crate) fn escaper(&self) -> &dyn Escaper {
        self.escaper.as_ref()
    }

    pub(crate) fn translator(&self) -> Option<&dyn Translator> {
        self.translator.as_deref()
    }

    pub(crate) fn element(&self) -> &dyn HtmlElement {
        self.element.as_ref()
    }

    pub(crate) fn htmlify(&self) -> &dyn Htmlify {
        self.htmlify.as_ref()
    }

    pub(crate) fn partial_renderer(&self) -> &dyn PartialRenderer {
        self.partial_renderer.as_ref()
    }

    pub(crate) fn accept_factory(&self) -> &dyn AcceptHelperFactory {
        self.accept_factory.as_ref()
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }
}

/// Builder for [`NavigationServices`].
///
/// Unset collaborators get defaults. Without an explicit container parser,
/// the containers declared in the configuration are registered by name.
#[derive(Default)]
pub struct NavigationServicesBuilder {
    container_parser: Option<Arc<dyn ContainerParser>>,
    escaper: Option<Arc<dyn Escaper>>,
    translator: Option<Arc<dyn Translator>>,
    element: Option<Arc<dyn HtmlElement>>,
    htmlify: Option<Arc<dyn Htmlify>>,
    partial_renderer: Option<Arc<dyn PartialRenderer>>,
    accept_factory: Option<Arc<dyn AcceptHelperFactory>>,
    config: Option<Config>,
}

impl NavigationServicesBuilder {
    /// Use a custom container parser.
    #[must_use]
    pub fn container_parser(mut self, parser: Arc<dyn ContainerParser>) -> Self {
        self.container_parser = Some(parser);
        self
    }

    /// Use a custom escaper.
    #[must_use]
    pub fn escaper(mut self, escaper: Arc<dyn Escaper>) -> Self {
        self.escaper = Some(escaper);
        self
    }

    /// Translate labels and titles. Without a translator they pass through.
    #[must_use]
    pub fn translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Use a custom element builder.
    #[must_use]
    pub fn element(mut self, element: Arc<dyn HtmlElement>) -> Self {
        self.element = Some(element);
        self
    }

    /// Use a custom link builder.
    #[must_use]
    pub fn htmlify(mut self, htmlify: Arc<dyn Htmlify>) -> Self {
        self.htmlify = Some(htmlify);
        self
    }

    /// Use a partial renderer.
    #[must_use]
    pub fn partial_renderer(mut self, renderer: Arc<dyn PartialRenderer>) -> Self {
        self.partial_renderer = Some(renderer);
        self
    }

    /// Use a custom accept helper factory.
    #[must_use]
    pub fn accept_factory(mut self, factory: Arc<dyn AcceptHelperFactory>) -> Self {
        self.accept_factory = Some(factory);
        self
    }

    /// Use configuration for helper defaults and named containers.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the services.
    #[must_use]
    pub fn build(self) -> Arc<NavigationServices> {
        let config = self.config.unwrap_or_default();

        let container_parser = self.container_parser.unwrap_or_else(|| {
            let mut registry = ContainerRegistry::new();
            for (name, pages) in &config.navigation {
                registry.register(name.clone(), Navigation::from_config(pages));
            }
            tracing::debug!(
                containers = config.navigation.len(),
                "Registered configured navigation containers"
            );
            Arc::new(registry)
        });
        let escaper = self.escaper.unwrap_or_else(|| Arc::new(HtmlEscaper));
        let element = self
            .element
            .unwrap_or_else(|| Arc::new(ElementBuilder::new(Arc::clone(&escaper))));
        let htmlify = self.htmlify.unwrap_or_else(|| {
            Arc::new(LinkBuilder::new(
                Arc::clone(&escaper),
                self.translator.clone(),
                Arc::clone(&element),
            ))
        });

        let defaults = Defaults {
            authorization: None,
            role: config.authorization.default_role.clone(),
        };

        Arc::new(NavigationServices {
            container_parser,
            escaper,
            translator: self.translator,
            element,
            htmlify,
            partial_renderer: self
                .partial_renderer
                .unwrap_or_else(|| Arc::new(TemplateRegistry::new())),
            accept_factory: self
                .accept_factory
                .unwrap_or_else(|| Arc::new(DefaultAcceptHelperFactory)),
            defaults: RwLock::new(defaults),
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bsnav_container::ContainerSource;
    use bsnav_view::RoleAuthorization;

    static_assertions::assert_impl_all!(NavigationServices: Send, Sync);

    #[test]
    fn test_defaults_install_and_clear() {
        let services = NavigationServices::builder().build();

        services.set_default_role(Some("member".to_owned()));
        services.set_default_authorization(Some(Arc::new(RoleAuthorization::new())));
        assert_eq!(services.default_role().as_deref(), Some("member"));
        assert!(services.default_authorization().is_some());

        services.clear_defaults();
        assert_eq!(services.default_role(), None);
        assert!(services.default_authorization().is_none());
    }

    #[test]
    fn test_configured_containers_are_registered() {
        let config = Config::from_toml(
            r#"
[[navigation.default]]
label = "Home"
href = "/"
"#,
        )
        .unwrap();

        let services = NavigationServices::from_config(config);
        let nav = services
            .container_parser()
            .parse_container(ContainerSource::from("default"))
            .unwrap()
            .unwrap();

        assert_eq!(nav.len(), 1);
    }

    #[test]
    fn test_configured_default_role() {
        let config = Config::from_toml("[authorization]\ndefault_role = \"guest\"\n").unwrap();

        let services = NavigationServices::from_config(config);

        assert_eq!(services.default_role().as_deref(), Some("guest"));
    }
}
