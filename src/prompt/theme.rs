//! Terminal colors for prompts

use crossterm::style::Color;

/// Colors used when rendering selection prompts
pub struct PromptTheme {
    /// Color for the input prompt symbol
    pub prompt: Color,
    /// Color for the placeholder / question line
    pub title: Color,
    /// Color for section separators
    pub separator: Color,
    /// Color for item numbers
    pub index: Color,
    /// Color for the "(default)" marker
    pub default: Color,
    /// Color for error messages
    pub error: Color,
}

impl Default for PromptTheme {
    fn default() -> Self {
        Self {
            prompt: Color::Cyan,
            title: Color::Magenta,
            separator: Color::DarkGrey,
            index: Color::Yellow,
            default: Color::Green,
            error: Color::Red,
        }
    }
}
