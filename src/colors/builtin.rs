//! Built-in theme table

use super::{HexColor, ThemeRecord};

/// Appended to a built-in theme name to name its inverted variant
pub const INVERTED_SUFFIX: &str = " (inverted)";

pub(crate) struct BuiltinTheme {
    pub name: &'static str,
    active_background: &'static str,
    active_foreground: &'static str,
    border_color: &'static str,
    inactive_background: &'static str,
    inactive_foreground: &'static str,
}

const fn theme(
    name: &'static str,
    active_background: &'static str,
    active_foreground: &'static str,
    border_color: &'static str,
    inactive_background: &'static str,
    inactive_foreground: &'static str,
) -> BuiltinTheme {
    BuiltinTheme {
        name,
        active_background,
        active_foreground,
        border_color,
        inactive_background,
        inactive_foreground,
    }
}

impl BuiltinTheme {
    pub fn record(&self) -> ThemeRecord {
        ThemeRecord {
            active_background: HexColor(self.active_background.to_string()),
            active_foreground: HexColor(self.active_foreground.to_string()),
            border_color: HexColor(self.border_color.to_string()),
            inactive_background: HexColor(self.inactive_background.to_string()),
            inactive_foreground: HexColor(self.inactive_foreground.to_string()),
        }
    }
}

// name, active bg, active fg, border, inactive bg, inactive fg
pub(crate) const BUILTIN_THEMES: &[BuiltinTheme] = &[
    theme("Arizona Cardinals", "#97233F", "#000000", "#FFB612", "#FFFFFF", "#000000"),
    theme("Atlanta Falcons", "#A71930", "#000000", "#A5ACAF", "#FFFFFF", "#000000"),
    theme("Baltimore Ravens", "#241773", "#000000", "#9E7C0C", "#FFFFFF", "#000000"),
    theme("Buffalo Bills", "#00338D", "#FFFFFF", "#C60C30", "#FFFFFF", "#000000"),
    theme("Carolina Panthers", "#0085CA", "#000000", "#BFC0BF", "#FFFFFF", "#000000"),
    theme("Chicago Bears", "#0B162A", "#C83803", "#C83803", "#FFFFFF", "#000000"),
    theme("Cincinnati Bengals", "#FB4F14", "#000000", "#000000", "#FFFFFF", "#000000"),
    theme("Cleveland Browns", "#FF3C00", "#000000", "#311D00", "#FFFFFF", "#000000"),
    theme("Dallas Cowboys", "#041E42", "#FFFFFF", "#869397", "#FFFFFF", "#000000"),
    theme("Denver Broncos", "#FB4F14", "#FFFFFF", "#002244", "#FFFFFF", "#000000"),
    theme("Detroit Lions", "#0076B6", "#FFFFFF", "#B0B7BC", "#FFFFFF", "#000000"),
    theme("Green Bay Packers", "#203731", "#FFFFFF", "#FFB612", "#FFFFFF", "#000000"),
    theme("Houston Texans", "#03202F", "#FFFFFF", "#A71930", "#FFFFFF", "#000000"),
    theme("Indianapolis Colts", "#002C5F", "#FFFFFF", "#A2AAAD", "#FFFFFF", "#000000"),
    theme("Jacksonville Jaguars", "#006778", "#FFFFFF", "#D7A22A", "#FFFFFF", "#000000"),
    theme("Kansas City Chiefs", "#E31837", "#FFFFFF", "#FFB81C", "#FFFFFF", "#000000"),
    theme("L.A. Chargers", "#0080C6", "#FFC20E", "#002A5E", "#FFFFFF", "#000000"),
    theme("L.A. Rams", "#003594", "#FFD100", "#FFA300", "#FFFFFF", "#000000"),
    theme("Miami Dolphins", "#008E97", "#FFFFFF", "#FC4C02", "#FFFFFF", "#000000"),
    theme("Minnesota Vikings", "#4F2683", "#FFFFFF", "#FFC62F", "#FFFFFF", "#000000"),
    theme("New England Patriots", "#002244", "#FFFFFF", "#C60C30", "#FFFFFF", "#000000"),
    theme("New Orleans Saints", "#101820", "#FFFFFF", "#D3BC8D", "#FFFFFF", "#000000"),
    theme("New York Giants", "#0B2265", "#FFFFFF", "#A71930", "#FFFFFF", "#000000"),
    theme("New York Jets", "#125740", "#FFFFFF", "#000000", "#FFFFFF", "#000000"),
    theme("Las Vegas Raiders", "#000000", "#FFFFFF", "#A5ACAF", "#FFFFFF", "#000000"),
    theme("Philadelphia Eagles", "#004C54", "#FFFFFF", "#A5ACAF", "#FFFFFF", "#000000"),
    theme("Pittsburgh Steelers", "#000000", "#FFB612", "#FFB612", "#FFFFFF", "#000000"),
    theme("San Francisco 49ers", "#AA0000", "#FFFFFF", "#B3995D", "#FFFFFF", "#000000"),
    theme("Seattle Seahawks", "#002244", "#FFFFFF", "#69BE28", "#FFFFFF", "#000000"),
    theme("Tampa Bay Buccaneers", "#D50A0A", "#FFFFFF", "#B1BABF", "#FFFFFF", "#000000"),
    theme("Tennessee Titans", "#0C2340", "#8A8D8F", "#4B92DB", "#8A8D8F", "#000000"),
    theme("Washington Commanders", "#773141", "#FFFFFF", "#FFB612", "#FFFFFF", "#000000"),
];

/// Every built-in theme in declaration order, each followed by its inverted variant.
pub(crate) fn builtin_records() -> Vec<(String, ThemeRecord)> {
    let mut records = Vec::with_capacity(BUILTIN_THEMES.len() * 2);
    for entry in BUILTIN_THEMES {
        let base = entry.record();
        let inverted = base.inverted();
        records.push((entry.name.to_string(), base));
        records.push((format!("{}{}", entry.name, INVERTED_SUFFIX), inverted));
    }
    records
}
