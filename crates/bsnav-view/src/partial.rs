//! Partial templates.
//!
//! A partial hands full control over markup to an external template. The
//! helper builds a JSON model and a [`PartialRenderer`] turns it into HTML.

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};

/// Error returned when rendering a partial fails.
#[derive(Debug, thiserror::Error)]
pub enum PartialError {
    /// No template registered under the name.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),
    /// Template failed while rendering.
    #[error("Failed to render template {template}: {message}")]
    Render {
        /// Template name.
        template: String,
        /// Failure description.
        message: String,
    },
}

/// Renders a named template with a model.
pub trait PartialRenderer: Send + Sync {
    /// Render `template` with `model` (a JSON object).
    fn render(&self, template: &str, model: &Value) -> Result<String, PartialError>;
}

/// Pre-built view model rendered by its own template.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewModel {
    template: String,
    variables: Map<String, Value>,
}

impl ViewModel {
    /// Create a view model for `template`.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            variables: Map::new(),
        }
    }

    /// Template name.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Current variables.
    #[must_use]
    pub fn variables(&self) -> &Map<String, Value> {
        &self.variables
    }

    /// Set one variable.
    pub fn set_variable(&mut self, name: impl Into<String>, value: Value) {
        self.variables.insert(name.into(), value);
    }

    /// Set several variables, keeping the others.
    pub fn set_variables(&mut self, variables: Map<String, Value>) {
        self.variables.extend(variables);
    }
}

/// The three ways a partial can be given.
#[derive(Clone, Debug, PartialEq)]
pub enum Partial {
    /// Bare template name.
    Name(String),
    /// Template name and the module it lives in. Only the name is rendered.
    Namespaced {
        /// Template name.
        name: String,
        /// Module namespace.
        module: String,
    },
    /// Pre-built view model.
    Model(ViewModel),
}

impl From<&str> for Partial {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for Partial {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<ViewModel> for Partial {
    fn from(model: ViewModel) -> Self {
        Self::Model(model)
    }
}

type TemplateFn = Box<dyn Fn(&Value) -> String + Send + Sync>;

/// [`PartialRenderer`] backed by closures registered per template name.
#[derive(Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, TemplateFn>,
}

impl fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateRegistry")
            .field("templates", &self.templates.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl TemplateRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template.
    #[must_use]
    pub fn with_template(
        mut self,
        name: impl Into<String>,
        template: impl Fn(&Value) -> String + Send + Sync + 'static,
    ) -> Self {
        self.templates.insert(name.into(), Box::new(template));
        self
    }
}

impl PartialRenderer for TemplateRegistry {
    fn render(&self, template: &str, model: &Value) -> Result<String, PartialError> {
        let render = self
            .templates
            .get(template)
            .ok_or_else(|| PartialError::TemplateNotFound(template.to_owned()))?;
        Ok(render(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_registry_renders_registered_template() {
        let registry = TemplateRegistry::new().with_template("crumbs.html", |model| {
            format!("sep={}", model["separator"].as_str().unwrap_or_default())
        });

        let html = registry
            .render("crumbs.html", &json!({"separator": "/"}))
            .unwrap();

        assert_eq!(html, "sep=/");
    }

    #[test]
    fn test_registry_unknown_template() {
        let err = TemplateRegistry::new()
            .render("missing.html", &json!({}))
            .unwrap_err();

        assert_eq!(err.to_string(), "Template not found: missing.html");
    }

    #[test]
    fn test_view_model_keeps_existing_variables() {
        let mut model = ViewModel::new("menu.html");
        model.set_variable("title", json!("Main"));

        let mut extra = Map::new();
        extra.insert("layout".to_owned(), json!(false));
        model.set_variables(extra);

        assert_eq!(model.template(), "menu.html");
        assert_eq!(model.variables()["title"], "Main");
        assert_eq!(model.variables()["layout"], false);
    }
}
