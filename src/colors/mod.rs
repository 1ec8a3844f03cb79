//! Project color themes
//!
//! Maps a project name to a stable, project-specific theme and turns the
//! chosen theme into editor chrome color customizations.
//!
//! - [`ColorRegistry`] owns the built-in and custom theme catalogues
//! - [`hash_name`], [`default_theme_name`] and [`build_selection_list`] pick
//!   and present the per-project default
//! - [`ThemeApplier`] maps a theme onto title bar / activity bar slots

mod apply;
mod assign;
mod builtin;
mod registry;

pub use apply::{ChromeSlot, StyleMap, ThemeApplier};
pub use assign::{
    build_selection_list, default_theme, default_theme_name, hash_name, SelectionEntry,
    SelectionList, CUSTOM_SEPARATOR, DEFAULT_DESCRIPTION, DEFAULT_SEPARATOR, FALLBACK_THEME_NAME,
};
pub use builtin::INVERTED_SUFFIX;
pub use registry::{ColorRegistry, ThemeNames};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("Invalid theme '{name}': {field} is missing or not a color")]
    InvalidThemeRecord { name: String, field: &'static str },

    #[error("Invalid color value '{0}' (expected #RGB or #RRGGBB)")]
    InvalidColor(String),

    #[error("Color theme not found: {0}")]
    NotFound(String),
}

/// A `#RGB` or `#RRGGBB` color string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    pub fn parse(value: &str) -> Result<Self, ColorError> {
        let digits = value
            .strip_prefix('#')
            .ok_or_else(|| ColorError::InvalidColor(value.to_string()))?;

        let valid_len = digits.len() == 3 || digits.len() == 6;
        if !valid_len || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidColor(value.to_string()));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        HexColor::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// One named visual theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeRecord {
    /// Chrome background while focused
    pub active_background: HexColor,
    /// Chrome foreground while focused
    pub active_foreground: HexColor,
    /// Separator color, focused or not
    pub border_color: HexColor,
    /// Chrome background while unfocused
    pub inactive_background: HexColor,
    /// Chrome foreground while unfocused
    pub inactive_foreground: HexColor,
}

impl ThemeRecord {
    /// Swap the active background and the border, keep everything else.
    pub fn inverted(&self) -> Self {
        Self {
            active_background: self.border_color.clone(),
            active_foreground: self.active_foreground.clone(),
            border_color: self.active_background.clone(),
            inactive_background: self.inactive_background.clone(),
            inactive_foreground: self.inactive_foreground.clone(),
        }
    }
}

/// A user-supplied theme as read from configuration
///
/// Fields are optional so that an incomplete entry can be reported and
/// skipped instead of failing the whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomThemeInput {
    #[serde(default, deserialize_with = "lenient_name")]
    pub name: String,
    #[serde(
        default,
        alias = "activeBackground",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub active_background: Option<String>,
    #[serde(
        default,
        alias = "activeForeground",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub active_foreground: Option<String>,
    #[serde(
        default,
        alias = "borderColor",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub border_color: Option<String>,
    #[serde(
        default,
        alias = "inactiveBackground",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub inactive_background: Option<String>,
    #[serde(
        default,
        alias = "inactiveForeground",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub inactive_foreground: Option<String>,
}

/// Accept any value; non-strings are kept in their rendered form so that
/// validation rejects them per entry.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<toml::Value>::deserialize(deserializer)?.map(|value| match value {
        toml::Value::String(text) => text,
        other => other.to_string(),
    }))
}

fn lenient_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

impl CustomThemeInput {
    /// Validate every field and build the record.
    ///
    /// A missing or malformed field is reported as
    /// [`ColorError::InvalidThemeRecord`] naming that field.
    pub fn to_record(&self) -> Result<ThemeRecord, ColorError> {
        let field = |value: &Option<String>, field: &'static str| {
            value
                .as_deref()
                .and_then(|v| HexColor::parse(v).ok())
                .ok_or_else(|| ColorError::InvalidThemeRecord {
                    name: self.name.clone(),
                    field,
                })
        };

        if self.name.trim().is_empty() {
            return Err(ColorError::InvalidThemeRecord {
                name: self.name.clone(),
                field: "name",
            });
        }

        Ok(ThemeRecord {
            active_background: field(&self.active_background, "active_background")?,
            active_foreground: field(&self.active_foreground, "active_foreground")?,
            border_color: field(&self.border_color, "border_color")?,
            inactive_background: field(&self.inactive_background, "inactive_background")?,
            inactive_foreground: field(&self.inactive_foreground, "inactive_foreground")?,
        })
    }
}

/// Which theme namespace to enumerate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    BuiltIn,
    Custom,
    All,
}
