//! Recording partial renderer for testing.
//!
//! Provides [`RecordingPartialRenderer`] for asserting what a helper hands
//! to a partial template.

use std::sync::RwLock;

use serde_json::Value;

use crate::partial::{PartialError, PartialRenderer};

/// Partial renderer that records every call and returns a fixed output.
///
/// # Example
///
/// ```ignore
/// let renderer = RecordingPartialRenderer::new("<nav>partial</nav>");
/// let html = renderer.render("crumbs.html", &json!({}))?;
/// assert_eq!(renderer.calls()[0].0, "crumbs.html");
/// ```
#[derive(Debug)]
pub struct RecordingPartialRenderer {
    output: String,
    calls: RwLock<Vec<(String, Value)>>,
}

impl RecordingPartialRenderer {
    /// Create a renderer returning `output` for every template.
    #[must_use]
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            calls: RwLock::new(Vec::new()),
        }
    }

    /// Recorded `(template, model)` pairs in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.read().unwrap().clone()
    }
}

impl PartialRenderer for RecordingPartialRenderer {
    fn render(&self, template: &str, model: &Value) -> Result<String, PartialError> {
        self.calls
            .write()
            .unwrap()
            .push((template.to_owned(), model.clone()));
        Ok(self.output.clone())
    }
}
