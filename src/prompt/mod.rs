//! Interactive prompts: pick one entry from a list, or type a value

mod spinner;
mod terminal;
mod theme;

pub use spinner::ProgressSpinner;
pub use terminal::TerminalPrompter;
pub use theme::PromptTheme;

use crate::colors::SelectionList;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Asks the user to choose or type something.
///
/// `Ok(None)` means the user cancelled.
pub trait Prompter: Send {
    /// Choose one selectable label from `list`; separators cannot be chosen
    fn select(
        &mut self,
        placeholder: &str,
        list: &SelectionList,
    ) -> Result<Option<String>, PromptError>;

    /// Free-text input
    fn input(&mut self, placeholder: &str) -> Result<Option<String>, PromptError>;
}
