//! Configuration management for bsnav.
//!
//! Parses `bsnav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! ```toml
//! [breadcrumbs]
//! separator = " / "
//! link_last = true
//!
//! [menu]
//! ul_class = "navigation"
//! max_depth = 2
//!
//! [authorization]
//! default_role = "${BSNAV_ROLE:-guest}"
//!
//! [[navigation.default]]
//! label = "Home"
//! href = "/"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `authorization.default_role`, `breadcrumbs.partial` and `menu.partial`
//! support `${VAR}` and `${VAR:-default}`.

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use bsnav_container::PageConfig;
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "bsnav.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Breadcrumbs helper defaults.
    pub breadcrumbs: BreadcrumbsConfig,
    /// Menu helper defaults.
    pub menu: MenuConfig,
    /// Authorization and visibility defaults.
    pub authorization: AuthorizationConfig,
    /// Named navigation containers.
    pub navigation: BTreeMap<String, Vec<PageConfig>>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Breadcrumbs helper defaults.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BreadcrumbsConfig {
    /// Indentation unit.
    pub indent: String,
    /// Markup placed between crumbs.
    pub separator: String,
    /// Render the active page as a link.
    pub link_last: bool,
    /// Minimum depth of the active page.
    pub min_depth: Option<usize>,
    /// Maximum depth of the active page. A negative bound matches nothing.
    pub max_depth: Option<i64>,
    /// Partial template name.
    pub partial: Option<String>,
}

impl Default for BreadcrumbsConfig {
    fn default() -> Self {
        Self {
            indent: String::new(),
            separator: " &gt; ".to_owned(),
            link_last: false,
            min_depth: None,
            max_depth: None,
            partial: None,
        }
    }
}

/// Menu helper defaults.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Indentation unit.
    pub indent: String,
    /// Class of the top-level `<ul>`.
    pub ul_class: String,
    /// Class added to list items on the active branch.
    pub li_active_class: String,
    /// Render only the active branch.
    pub only_active_branch: bool,
    /// With `only_active_branch`, also render the active page's parents.
    pub render_parents: bool,
    /// Put the page class on the `<li>` instead of the link.
    pub add_class_to_list_item: bool,
    /// Escape labels.
    pub escape_labels: bool,
    /// Minimum rendered depth.
    pub min_depth: Option<usize>,
    /// Maximum rendered depth. A negative bound renders nothing.
    pub max_depth: Option<i64>,
    /// Partial template name.
    pub partial: Option<String>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            indent: String::new(),
            ul_class: "navigation".to_owned(),
            li_active_class: "active".to_owned(),
            only_active_branch: false,
            render_parents: true,
            add_class_to_list_item: false,
            escape_labels: true,
            min_depth: None,
            max_depth: None,
            partial: None,
        }
    }
}

/// Authorization and visibility defaults.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AuthorizationConfig {
    /// Role used when a helper has none.
    pub default_role: Option<String>,
    /// Check page resources against the authorization.
    pub use_authorization: bool,
    /// Render pages marked invisible.
    pub render_invisible: bool,
}

impl Default for AuthorizationConfig {
    fn default() -> Self {
        Self {
            default_role: None,
            use_authorization: true,
            render_invisible: false,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`authorization.default_role`").
        field: String,
        /// Error message (e.g., "${`BSNAV_ROLE`} not set").
        message: String,
    },
}

/// Require `min <= max` when both depths are set.
fn require_depth_order(
    min: Option<usize>,
    max: Option<i64>,
    section: &str,
) -> Result<(), ConfigError> {
    if let (Some(min), Some(max)) = (min, max)
        && !i64::try_from(min).is_ok_and(|min| min <= max)
    {
        return Err(ConfigError::Validation(format!(
            "{section}.min_depth ({min}) cannot exceed {section}.max_depth ({max})"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `bsnav.toml` in current directory and parents,
    /// falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.validate()?;
        Ok(config)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_depth_order(
            self.breadcrumbs.min_depth,
            self.breadcrumbs.max_depth,
            "breadcrumbs",
        )?;
        require_depth_order(self.menu.min_depth, self.menu.max_depth, "menu")?;

        if self.navigation.keys().any(String::is_empty) {
            return Err(ConfigError::Validation(
                "navigation container names cannot be empty".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref role) = self.authorization.default_role {
            self.authorization.default_role =
                Some(expand::expand_env(role, "authorization.default_role")?);
        }
        if let Some(ref partial) = self.breadcrumbs.partial {
            self.breadcrumbs.partial = Some(expand::expand_env(partial, "breadcrumbs.partial")?);
        }
        if let Some(ref partial) = self.menu.partial {
            self.menu.partial = Some(expand::expand_env(partial, "menu.partial")?);
        }
        Ok(())
    }
}
