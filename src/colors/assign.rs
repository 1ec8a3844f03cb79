//! Deterministic per-project theme assignment

use super::registry::ThemeNames;
use super::{ColorRegistry, Partition};

/// Returned by [`default_theme_name`] when no theme exists; never selectable.
///
/// A custom theme may use the same name, so callers that must tell the two
/// apart use [`default_theme`].
pub const FALLBACK_THEME_NAME: &str = "Default";

pub const CUSTOM_SEPARATOR: &str = "Custom Colors";
pub const DEFAULT_SEPARATOR: &str = "Default Colors";

/// Description shown next to the pinned default entry
pub const DEFAULT_DESCRIPTION: &str = "(default)";

/// Polynomial string hash (multiplier 31) over UTF-16 code units.
///
/// Accumulates in wrapping 32-bit signed arithmetic and returns the absolute
/// value of the result, so `i32::MIN` maps to `2^31`.
pub fn hash_name(name: &str) -> u32 {
    name.encode_utf16()
        .fold(0i32, |hash, unit| {
            hash.wrapping_mul(31).wrapping_add(i32::from(unit))
        })
        .unsigned_abs()
}

fn pick(names: &ThemeNames, project_name: &str) -> Option<String> {
    let len = names.len();
    if len == 0 {
        return None;
    }
    let index = hash_name(project_name) as usize % len;
    names.iter().nth(index).map(str::to_string)
}

/// Default theme for a project: `names[hash(project) % names.len()]`
/// over every theme name, custom first. `None` when the registry is empty.
pub fn default_theme(project_name: &str, registry: &ColorRegistry) -> Option<String> {
    pick(&registry.names(Partition::All), project_name)
}

/// [`default_theme`], with [`FALLBACK_THEME_NAME`] for an empty registry
pub fn default_theme_name(project_name: &str, registry: &ColorRegistry) -> String {
    default_theme(project_name, registry).unwrap_or_else(|| FALLBACK_THEME_NAME.to_string())
}

/// One row of a selection prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEntry {
    /// Unselectable section heading
    Separator(String),
    Item { label: String, is_default: bool },
}

impl SelectionEntry {
    pub fn label(&self) -> &str {
        match self {
            SelectionEntry::Separator(label) => label,
            SelectionEntry::Item { label, .. } => label,
        }
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, SelectionEntry::Separator(_))
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            SelectionEntry::Item { is_default: true, .. } => Some(DEFAULT_DESCRIPTION),
            _ => None,
        }
    }
}

/// Ordered prompt rows with an optional pinned default
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionList {
    entries: Vec<SelectionEntry>,
    default: Option<String>,
}

impl SelectionList {
    /// Plain list of selectable labels with no default
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: labels
                .into_iter()
                .map(|label| SelectionEntry::Item {
                    label: label.into(),
                    is_default: false,
                })
                .collect(),
            default: None,
        }
    }

    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    pub fn default_label(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Selectable labels in display order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| !e.is_separator())
            .map(SelectionEntry::label)
    }

    /// Whether `label` names a selectable entry
    pub fn contains(&self, label: &str) -> bool {
        self.labels().any(|l| l == label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Theme choices for a project: the default first, then the custom
/// section (when any custom theme exists), then the built-in section.
/// The default never appears twice.
pub fn build_selection_list(project_name: &str, registry: &ColorRegistry) -> SelectionList {
    let all = registry.names(Partition::All);
    let Some(default) = pick(&all, project_name) else {
        return SelectionList::default();
    };

    let custom_len = all.within(Partition::Custom).len();
    let names: Vec<&str> = all.iter().collect();
    let (custom, builtin) = names.split_at(custom_len);

    let mut entries = vec![SelectionEntry::Item {
        label: default.clone(),
        is_default: true,
    }];

    let mut section = |heading: &str, names: &[&str]| {
        entries.push(SelectionEntry::Separator(heading.to_string()));
        entries.extend(
            names
                .iter()
                .filter(|name| **name != default)
                .map(|name| SelectionEntry::Item {
                    label: name.to_string(),
                    is_default: false,
                }),
        );
    };

    if !custom.is_empty() {
        section(CUSTOM_SEPARATOR, custom);
    }
    if !builtin.is_empty() {
        section(DEFAULT_SEPARATOR, builtin);
    }

    SelectionList {
        entries,
        default: Some(default),
    }
}
