//! Per-call menu options.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use bsnav_view::{Authorization, Partial};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::HelperError;
use crate::helper::{NavigationHelper, parse_partial};
use crate::menu::Menu;

/// Indentation given as text or as a number of spaces.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Indent {
    /// Number of spaces.
    Width(usize),
    /// Literal indent text.
    Text(String),
}

impl Indent {
    /// Indent text.
    pub fn to_text(&self) -> String {
        match self {
            Self::Width(width) => " ".repeat(*width),
            Self::Text(text) => text.clone(),
        }
    }
}

/// Direction a dropdown opens in.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Opens below the toggle.
    #[default]
    Down,
    /// Opens above the toggle.
    Up,
}

impl Direction {
    /// List item class for a dropdown parent.
    pub fn class(self) -> &'static str {
        match self {
            Self::Down => "dropdown",
            Self::Up => "dropup",
        }
    }
}

/// How nested pages are rendered.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sublink {
    /// Dropdown toggle plus a `dropdown-menu` list.
    #[default]
    #[serde(alias = "plain")]
    Dropdown,
    /// `<details>` disclosure with a plain nested list.
    Details,
}

/// Bootstrap responsive breakpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Breakpoint {
    /// `sm`
    Sm,
    /// `md`
    Md,
    /// `lg`
    Lg,
    /// `xl`
    Xl,
    /// `xxl`
    Xxl,
}

impl Breakpoint {
    /// Infix used in responsive class names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
            Self::Xxl => "xxl",
        }
    }
}

impl FromStr for Breakpoint {
    type Err = HelperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sm" => Ok(Self::Sm),
            "md" => Ok(Self::Md),
            "lg" => Ok(Self::Lg),
            "xl" => Ok(Self::Xl),
            "xxl" => Ok(Self::Xxl),
            _ => Err(HelperError::InvalidArgument(format!(
                "Size \"{s}\" does not exist"
            ))),
        }
    }
}

/// Vertical layout of the top-level list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vertical {
    /// Always stacked (`flex-column`).
    Always,
    /// Stacked from a breakpoint up (`flex-{bp}-column`).
    From(Breakpoint),
}

impl Vertical {
    /// Parse an options value: `true`, a breakpoint token, or `false`/`null`.
    pub fn from_value(value: &Value) -> Result<Option<Self>, HelperError> {
        match value {
            Value::Null | Value::Bool(false) => Ok(None),
            Value::Bool(true) => Ok(Some(Self::Always)),
            Value::String(size) => size.parse().map(|bp| Some(Self::From(bp))),
            other => Err(HelperError::InvalidArgument(format!(
                "Size \"{other}\" does not exist"
            ))),
        }
    }

    /// Bootstrap class.
    pub fn class(self) -> String {
        match self {
            Self::Always => "flex-column".to_owned(),
            Self::From(bp) => format!("flex-{}-column", bp.as_str()),
        }
    }
}

/// Per-call menu options.
///
/// Unset fields fall back to the helper's state. Options maps use the
/// camelCase keys of the view layer (`onlyActiveBranch`, `in-navbar`, ...).
///
/// `authorization` has no map form. Set the field directly.
// Absent and null depths mean different things.
#[allow(clippy::option_option)]
#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct MenuOptions {
    /// Indentation unit.
    pub indent: Option<Indent>,
    /// Minimum depth; `Some(None)` selects the default, a negative value means 1.
    #[serde(deserialize_with = "double_option")]
    pub min_depth: Option<Option<i64>>,
    /// Maximum depth; `Some(None)` removes the bound.
    #[serde(deserialize_with = "double_option")]
    pub max_depth: Option<Option<i64>>,
    /// Render only the active branch.
    pub only_active_branch: Option<bool>,
    /// With `only_active_branch`, render the active page's parents too.
    pub render_parents: Option<bool>,
    /// Render invisible pages.
    pub render_invisible: Option<bool>,
    /// Check authorization.
    pub use_authorization: Option<bool>,
    /// Role to authorize.
    pub role: Option<String>,
    /// Authorization to use.
    #[serde(skip)]
    pub authorization: Option<Arc<dyn Authorization>>,
    /// `nav-tabs` style.
    pub tabs: Option<bool>,
    /// `nav-pills` style.
    pub pills: Option<bool>,
    /// Dark dropdown menus.
    pub dark: Option<bool>,
    /// Top-level list sits in a navbar.
    #[serde(rename = "in-navbar")]
    pub in_navbar: Option<bool>,
    /// Dropdown direction.
    pub direction: Option<Direction>,
    /// Nested page style.
    pub sublink: Option<Sublink>,
    /// Vertical layout.
    #[serde(skip)]
    pub vertical: Option<Vertical>,
    /// Class of the top-level list.
    pub ul_class: Option<String>,
    /// Class added to every list item.
    pub li_class: Option<String>,
    /// Class added to list items on the active branch.
    pub li_active_class: Option<String>,
    /// Put the page class on the list item.
    pub add_class_to_list_item: Option<bool>,
    /// Escape labels.
    pub escape_labels: Option<bool>,
    /// Render with this partial instead of markup.
    #[serde(skip)]
    pub partial: Option<Partial>,
}

impl fmt::Debug for MenuOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuOptions")
            .field("indent", &self.indent)
            .field("min_depth", &self.min_depth)
            .field("max_depth", &self.max_depth)
            .field("only_active_branch", &self.only_active_branch)
            .field("render_parents", &self.render_parents)
            .field("render_invisible", &self.render_invisible)
            .field("use_authorization", &self.use_authorization)
            .field("role", &self.role)
            .field("authorization", &self.authorization.is_some())
            .field("tabs", &self.tabs)
            .field("pills", &self.pills)
            .field("dark", &self.dark)
            .field("in_navbar", &self.in_navbar)
            .field("direction", &self.direction)
            .field("sublink", &self.sublink)
            .field("vertical", &self.vertical)
            .field("ul_class", &self.ul_class)
            .field("li_class", &self.li_class)
            .field("li_active_class", &self.li_active_class)
            .field("add_class_to_list_item", &self.add_class_to_list_item)
            .field("escape_labels", &self.escape_labels)
            .field("partial", &self.partial)
            .finish()
    }
}

/// Keep "present but null" apart from "absent".
#[allow(clippy::option_option)]
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl MenuOptions {
    /// Parse an options map.
    ///
    /// Every value is validated here, so a bad map fails before any
    /// markup is produced.
    pub fn from_value(value: &Value) -> Result<Self, HelperError> {
        let Value::Object(map) = value else {
            return Err(HelperError::InvalidArgument(format!(
                "Unable to render {}: options must be a map",
                Menu::NAME
            )));
        };

        if let Some(max_depth) = map.get("maxDepth")
            && !(max_depth.is_null() || max_depth.is_i64())
        {
            return Err(HelperError::InvalidArgument(format!(
                "Unable to render {}: maxDepth must be an integer or null, got {max_depth}",
                Menu::NAME
            )));
        }
        if map.contains_key("authorization") {
            return Err(HelperError::InvalidArgument(format!(
                "Unable to render {}: authorization cannot be given in an options map, \
                 set MenuOptions::authorization instead",
                Menu::NAME
            )));
        }

        let mut map = map.clone();
        let vertical = map.remove("vertical");
        let partial = map.remove("partial");

        let mut options: Self = serde_json::from_value(Value::Object(map)).map_err(|e| {
            HelperError::InvalidArgument(format!("Unable to render {}: {e}", Menu::NAME))
        })?;

        if let Some(vertical) = vertical {
            options.vertical = Vertical::from_value(&vertical)?;
        }
        if let Some(partial) = partial {
            options.partial = parse_partial::<Menu>(&partial)?;
        }

        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_full_options() {
        let options = MenuOptions::from_value(&json!({
            "minDepth": 1,
            "maxDepth": null,
            "onlyActiveBranch": true,
            "in-navbar": true,
            "direction": "up",
            "sublink": "details",
            "vertical": "md",
            "ulClass": "main",
            "indent": 4,
            "partial": "menu.html",
        }))
        .unwrap();

        assert_eq!(options.min_depth, Some(Some(1)));
        assert_eq!(options.max_depth, Some(None));
        assert_eq!(options.only_active_branch, Some(true));
        assert_eq!(options.in_navbar, Some(true));
        assert_eq!(options.direction, Some(Direction::Up));
        assert_eq!(options.sublink, Some(Sublink::Details));
        assert_eq!(options.vertical, Some(Vertical::From(Breakpoint::Md)));
        assert_eq!(options.ul_class.as_deref(), Some("main"));
        assert_eq!(options.indent, Some(Indent::Width(4)));
        assert_eq!(options.partial, Some(Partial::Name("menu.html".to_owned())));
    }

    #[test]
    fn test_absent_keys_stay_unset() {
        let options = MenuOptions::from_value(&json!({})).unwrap();

        assert_eq!(options.min_depth, None);
        assert_eq!(options.max_depth, None);
        assert_eq!(options.vertical, None);
    }

    #[test]
    fn test_plain_is_dropdown_alias() {
        let options = MenuOptions::from_value(&json!({"sublink": "plain"})).unwrap();

        assert_eq!(options.sublink, Some(Sublink::Dropdown));
    }

    #[test]
    fn test_boolean_max_depth_rejected() {
        let err = MenuOptions::from_value(&json!({"maxDepth": true})).unwrap_err();

        assert!(matches!(err, HelperError::InvalidArgument(_)));
        assert!(err.to_string().contains("maxDepth"));
    }

    #[test]
    fn test_negative_max_depth_accepted() {
        let options = MenuOptions::from_value(&json!({"maxDepth": -1})).unwrap();

        assert_eq!(options.max_depth, Some(Some(-1)));
    }

    #[test]
    fn test_authorization_key_explains_field() {
        let err = MenuOptions::from_value(&json!({"authorization": {}})).unwrap_err();

        assert!(matches!(err, HelperError::InvalidArgument(_)));
        let message = err.to_string();
        assert!(message.contains("set MenuOptions::authorization instead"));
    }

    #[test]
    fn test_unknown_vertical_size() {
        let err = MenuOptions::from_value(&json!({"vertical": "xy"})).unwrap_err();

        assert_eq!(err.to_string(), "Size \"xy\" does not exist");
    }

    #[test]
    fn test_vertical_values() {
        assert_eq!(Vertical::from_value(&json!(false)).unwrap(), None);
        let vertical = Vertical::from_value(&json!(true)).unwrap();
        assert_eq!(
            vertical.map(Vertical::class),
            Some("flex-column".to_owned())
        );
        let vertical = Vertical::from_value(&json!("xxl")).unwrap();
        assert_eq!(
            vertical.map(Vertical::class),
            Some("flex-xxl-column".to_owned())
        );
    }

    #[test]
    fn test_bad_partial_shape() {
        let err = MenuOptions::from_value(&json!({"partial": ["a", "b", "c"]})).unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("Unable to render menu: A view partial"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = MenuOptions::from_value(&json!({"colour": "red"})).unwrap_err();

        assert!(matches!(err, HelperError::InvalidArgument(_)));
    }

    #[test]
    fn test_indent_text() {
        let options = MenuOptions::from_value(&json!({"indent": "\t"})).unwrap();

        let indent = options.indent.as_ref().map(Indent::to_text);
        assert_eq!(indent, Some("\t".to_owned()));
    }
}
