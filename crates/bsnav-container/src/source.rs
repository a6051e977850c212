//! Container sources and resolution.
//!
//! Helpers accept a container as a registered name, a concrete
//! [`Navigation`], or nothing (use the helper's own container). A
//! [`ContainerParser`] turns a [`ContainerSource`] into a navigation.

use std::collections::HashMap;
use std::sync::Arc;

use crate::navigation::Navigation;

/// Where a helper should take its navigation from.
#[derive(Clone, Debug, Default)]
pub enum ContainerSource {
    /// No container given.
    #[default]
    None,
    /// Name of a registered container.
    Name(String),
    /// Concrete container.
    Container(Arc<Navigation>),
}

impl From<&str> for ContainerSource {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for ContainerSource {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Arc<Navigation>> for ContainerSource {
    fn from(nav: Arc<Navigation>) -> Self {
        Self::Container(nav)
    }
}

impl From<Navigation> for ContainerSource {
    fn from(nav: Navigation) -> Self {
        Self::Container(Arc::new(nav))
    }
}

/// Error returned when a container cannot be resolved.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ContainerError {
    /// No container registered under the name.
    #[error("Could not load Container \"{0}\"")]
    NotFound(String),
}

/// Resolves [`ContainerSource`]s.
pub trait ContainerParser: Send + Sync {
    /// Resolve a container source.
    ///
    /// Returns `Ok(None)` for [`ContainerSource::None`].
    fn parse_container(
        &self,
        source: ContainerSource,
    ) -> Result<Option<Arc<Navigation>>, ContainerError>;
}

/// [`ContainerParser`] backed by a map of named containers.
#[derive(Debug, Default)]
pub struct ContainerRegistry {
    containers: HashMap<String, Arc<Navigation>>,
}

impl ContainerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a container under a name, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, nav: impl Into<Arc<Navigation>>) {
        self.containers.insert(name.into(), nav.into());
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with_container(
        mut self,
        name: impl Into<String>,
        nav: impl Into<Arc<Navigation>>,
    ) -> Self {
        self.register(name, nav);
        self
    }

    /// Registered names, unordered.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.containers.keys().map(String::as_str)
    }
}

impl ContainerParser for ContainerRegistry {
    fn parse_container(
        &self,
        source: ContainerSource,
    ) -> Result<Option<Arc<Navigation>>, ContainerError> {
        match source {
            ContainerSource::None => Ok(None),
            ContainerSource::Container(nav) => Ok(Some(nav)),
            ContainerSource::Name(name) => {
                let nav = self.containers.get(&name).cloned().ok_or_else(|| {
                    tracing::debug!(name = %name, "Container not registered");
                    ContainerError::NotFound(name)
                })?;
                Ok(Some(nav))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::{NavigationBuilder, Page};

    fn nav() -> Navigation {
        let mut builder = NavigationBuilder::new();
        builder.add_page(Page::new("Home", "/"), None);
        builder.build()
    }

    #[test]
    fn test_none_resolves_to_none() {
        let registry = ContainerRegistry::new();

        let result = registry.parse_container(ContainerSource::None).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_container_passes_through() {
        let registry = ContainerRegistry::new();
        let nav = Arc::new(nav());

        let result = registry
            .parse_container(ContainerSource::from(Arc::clone(&nav)))
            .unwrap();

        assert!(Arc::ptr_eq(&result.unwrap(), &nav));
    }

    #[test]
    fn test_name_resolves_registered_container() {
        let registry = ContainerRegistry::new().with_container("default", nav());

        let result = registry.parse_container("default".into()).unwrap();

        assert_eq!(result.unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_name_is_error() {
        let registry = ContainerRegistry::new();

        let err = registry.parse_container("footer".into()).unwrap_err();

        assert!(matches!(err, ContainerError::NotFound(ref name) if name == "footer"));
        assert_eq!(err.to_string(), "Could not load Container \"footer\"");
    }
}
