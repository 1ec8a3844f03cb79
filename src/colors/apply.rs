//! Theme to editor color customization mapping

use super::{HexColor, ThemeRecord};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A chrome color slot understood by the editor's `workbench.colorCustomizations`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChromeSlot {
    TitleBarActiveBackground,
    TitleBarActiveForeground,
    TitleBarBorder,
    TitleBarInactiveBackground,
    TitleBarInactiveForeground,
    ActivityBarBackground,
    ActivityBarForeground,
    ActivityBarBorder,
}

impl ChromeSlot {
    pub fn key(self) -> &'static str {
        match self {
            ChromeSlot::TitleBarActiveBackground => "titleBar.activeBackground",
            ChromeSlot::TitleBarActiveForeground => "titleBar.activeForeground",
            ChromeSlot::TitleBarBorder => "titleBar.border",
            ChromeSlot::TitleBarInactiveBackground => "titleBar.inactiveBackground",
            ChromeSlot::TitleBarInactiveForeground => "titleBar.inactiveForeground",
            ChromeSlot::ActivityBarBackground => "activityBar.background",
            ChromeSlot::ActivityBarForeground => "activityBar.foreground",
            ChromeSlot::ActivityBarBorder => "activityBar.border",
        }
    }
}

/// Flat slot to color overrides, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap(IndexMap<ChromeSlot, HexColor>);

impl StyleMap {
    pub fn get(&self, slot: ChromeSlot) -> Option<&HexColor> {
        self.0.get(&slot)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &HexColor)> {
        self.0.iter().map(|(slot, color)| (slot.key(), color))
    }
}

impl Serialize for StyleMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, color) in self.iter() {
            map.serialize_entry(key, color)?;
        }
        map.end()
    }
}

/// Builds [`StyleMap`]s from themes
#[derive(Debug, Clone, Copy)]
pub struct ThemeApplier {
    activity_bar: bool,
}

impl ThemeApplier {
    /// `activity_bar` enables the secondary chrome slots.
    pub fn new(activity_bar: bool) -> Self {
        Self { activity_bar }
    }

    pub fn to_style_map(&self, theme: &ThemeRecord) -> StyleMap {
        let mut slots = IndexMap::new();
        slots.insert(
            ChromeSlot::TitleBarActiveBackground,
            theme.active_background.clone(),
        );
        slots.insert(
            ChromeSlot::TitleBarActiveForeground,
            theme.active_foreground.clone(),
        );
        slots.insert(ChromeSlot::TitleBarBorder, theme.border_color.clone());
        slots.insert(
            ChromeSlot::TitleBarInactiveBackground,
            theme.inactive_background.clone(),
        );
        slots.insert(
            ChromeSlot::TitleBarInactiveForeground,
            theme.inactive_foreground.clone(),
        );

        // The activity bar has no unfocused state; it always shows the active colors.
        if self.activity_bar {
            slots.insert(
                ChromeSlot::ActivityBarBackground,
                theme.active_background.clone(),
            );
            slots.insert(
                ChromeSlot::ActivityBarForeground,
                theme.active_foreground.clone(),
            );
            slots.insert(ChromeSlot::ActivityBarBorder, theme.border_color.clone());
        }

        StyleMap(slots)
    }
}

impl Default for ThemeApplier {
    fn default() -> Self {
        Self::new(true)
    }
}
