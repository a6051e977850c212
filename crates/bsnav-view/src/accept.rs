//! Page acceptance: visibility and authorization filtering.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use bsnav_container::{Navigation, PageId};

/// Error raised by a view service (construction or evaluation).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ServiceError {
    /// Human-readable message.
    pub message: String,
    /// Numeric error code (0 when unspecified).
    pub code: i32,
}

impl ServiceError {
    /// Create a service error.
    #[must_use]
    pub fn new(message: impl Into<String>, code: i32) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }
}

/// Decides whether a role may use a resource.
pub trait Authorization: Send + Sync {
    /// Check access of `role` to `privilege` on `resource`.
    fn is_allowed(
        &self,
        role: Option<&str>,
        resource: &str,
        privilege: Option<&str>,
    ) -> Result<bool, ServiceError>;
}

/// Allow-list [`Authorization`]: everything not allowed is denied.
#[derive(Debug, Default)]
pub struct RoleAuthorization {
    /// role -> resource -> privileges (`None` allows every privilege).
    rules: HashMap<String, HashMap<String, Option<HashSet<String>>>>,
}

impl RoleAuthorization {
    /// Create an authorization that denies everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow `role` access to `resource`.
    ///
    /// With `privilege = None` every privilege on the resource is allowed.
    #[must_use]
    pub fn allow(mut self, role: &str, resource: &str, privilege: Option<&str>) -> Self {
        let entry = self
            .rules
            .entry(role.to_owned())
            .or_default()
            .entry(resource.to_owned())
            .or_insert_with(|| Some(HashSet::new()));
        match privilege {
            None => *entry = None,
            Some(privilege) => {
                if let Some(privileges) = entry {
                    privileges.insert(privilege.to_owned());
                }
            }
        }
        self
    }
}

impl Authorization for RoleAuthorization {
    fn is_allowed(
        &self,
        role: Option<&str>,
        resource: &str,
        privilege: Option<&str>,
    ) -> Result<bool, ServiceError> {
        let Some(resources) = role.and_then(|r| self.rules.get(r)) else {
            return Ok(false);
        };
        Ok(match resources.get(resource) {
            None => false,
            Some(None) => true,
            Some(Some(privileges)) => privilege.is_some_and(|p| privileges.contains(p)),
        })
    }
}

/// Options an accept filter is built with.
#[derive(Clone, Default)]
pub struct AcceptOptions {
    /// Authorization to consult; `None` disables authorization checks.
    pub authorization: Option<Arc<dyn Authorization>>,
    /// Role to check.
    pub role: Option<String>,
    /// Accept invisible pages.
    pub render_invisible: bool,
}

impl fmt::Debug for AcceptOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AcceptOptions")
            .field("authorization", &self.authorization.is_some())
            .field("role", &self.role)
            .field("render_invisible", &self.render_invisible)
            .finish()
    }
}

/// Page filter applied to every node before rendering.
pub trait AcceptPage {
    /// Whether `page` may be rendered.
    ///
    /// With `recursive`, ancestors must be accepted too.
    fn accept(&self, nav: &Navigation, page: PageId, recursive: bool) -> Result<bool, ServiceError>;
}

/// Builds [`AcceptPage`] filters for helpers.
pub trait AcceptHelperFactory: Send + Sync {
    /// Build a filter for the given options.
    fn create(&self, options: AcceptOptions) -> Result<Box<dyn AcceptPage>, ServiceError>;
}

/// Visibility + authorization filter.
#[derive(Debug)]
pub struct AcceptHelper {
    options: AcceptOptions,
}

impl AcceptHelper {
    /// Create a filter.
    #[must_use]
    pub fn new(options: AcceptOptions) -> Self {
        Self { options }
    }
}

impl AcceptPage for AcceptHelper {
    fn accept(
        &self,
        nav: &Navigation,
        page: PageId,
        recursive: bool,
    ) -> Result<bool, ServiceError> {
        let data = nav.page(page);

        if !data.visible && !self.options.render_invisible {
            return Ok(false);
        }

        if let (Some(authorization), Some(resource)) =
            (&self.options.authorization, data.resource.as_deref())
            && !authorization.is_allowed(
                self.options.role.as_deref(),
                resource,
                data.privilege.as_deref(),
            )?
        {
            tracing::trace!(href = ?data.href, role = ?self.options.role, "Page not authorized");
            return Ok(false);
        }

        match nav.parent(page) {
            Some(parent) if recursive => self.accept(nav, parent, true),
            _ => Ok(true),
        }
    }
}

/// [`AcceptHelperFactory`] producing [`AcceptHelper`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultAcceptHelperFactory;

impl AcceptHelperFactory for DefaultAcceptHelperFactory {
    fn create(&self, options: AcceptOptions) -> Result<Box<dyn AcceptPage>, ServiceError> {
        Ok(Box::new(AcceptHelper::new(options)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bsnav_container::{NavigationBuilder, Page};
    use pretty_assertions::assert_eq;

    static_assertions::assert_impl_all!(RoleAuthorization: Send, Sync);

    fn options(authorization: Option<RoleAuthorization>, role: Option<&str>) -> AcceptOptions {
        AcceptOptions {
            authorization: authorization.map(|a| Arc::new(a) as Arc<dyn Authorization>),
            role: role.map(str::to_owned),
            render_invisible: false,
        }
    }

    #[test]
    fn test_role_authorization_rules() {
        let acl = RoleAuthorization::new()
            .allow("member", "blog", Some("read"))
            .allow("admin", "blog", None);

        let allowed = |role, privilege| acl.is_allowed(role, "blog", privilege).unwrap();

        assert!(allowed(Some("member"), Some("read")));
        assert!(!allowed(Some("member"), Some("write")));
        assert!(!allowed(Some("member"), None));
        assert!(allowed(Some("admin"), Some("write")));
        assert!(!allowed(None, None));
        assert!(!allowed(Some("guest"), None));
    }

    #[test]
    fn test_invisible_page_rejected_unless_rendered() {
        let mut builder = NavigationBuilder::new();
        let page = builder.add_page(Page::new("Hidden", "/h").with_visible(false), None);
        let nav = builder.build();

        let helper = AcceptHelper::new(options(None, None));
        assert!(!helper.accept(&nav, page, true).unwrap());

        let helper = AcceptHelper::new(AcceptOptions {
            render_invisible: true,
            ..AcceptOptions::default()
        });
        assert!(helper.accept(&nav, page, true).unwrap());
    }

    #[test]
    fn test_resource_checked_only_with_authorization() {
        let mut builder = NavigationBuilder::new();
        let page = builder.add_page(
            Page::new("Admin", "/admin").with_resource("admin", None),
            None,
        );
        let nav = builder.build();

        let helper = AcceptHelper::new(options(None, None));
        assert!(helper.accept(&nav, page, false).unwrap());

        let nobody = RoleAuthorization::new();
        let helper = AcceptHelper::new(options(Some(nobody), Some("guest")));
        assert!(!helper.accept(&nav, page, false).unwrap());

        let acl = RoleAuthorization::new().allow("admin", "admin", None);
        let helper = AcceptHelper::new(options(Some(acl), Some("admin")));
        assert!(helper.accept(&nav, page, false).unwrap());
    }

    #[test]
    fn test_recursive_checks_ancestors() {
        let mut builder = NavigationBuilder::new();
        let parent = builder.add_page(Page::new("Parent", "/p").with_visible(false), None);
        let child = builder.add_page(Page::new("Child", "/p/c"), Some(parent));
        let nav = builder.build();
        let helper = AcceptHelper::new(options(None, None));

        assert!(helper.accept(&nav, child, false).unwrap());
        assert!(!helper.accept(&nav, child, true).unwrap());
    }

    #[test]
    fn test_authorization_error_propagates() {
        struct Failing;
        impl Authorization for Failing {
            fn is_allowed(
                &self,
                _: Option<&str>,
                _: &str,
                _: Option<&str>,
            ) -> Result<bool, ServiceError> {
                Err(ServiceError::new("acl backend down", 7))
            }
        }

        let mut builder = NavigationBuilder::new();
        let page = builder.add_page(Page::new("A", "/a").with_resource("a", None), None);
        let nav = builder.build();
        let helper = AcceptHelper::new(AcceptOptions {
            authorization: Some(Arc::new(Failing)),
            ..AcceptOptions::default()
        });

        let err = helper.accept(&nav, page, false).unwrap_err();

        assert_eq!(err, ServiceError::new("acl backend down", 7));
    }
}
