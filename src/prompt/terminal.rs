//! Line-based prompts on the terminal

use super::{PromptError, PromptTheme, Prompter};
use crate::colors::{SelectionEntry, SelectionList};
use crossterm::style::Stylize;
use std::io::{self, BufRead, BufReader, Write};

/// Prompts on stdin/stdout.
///
/// Items are numbered; enter a number or an exact label, press enter for
/// the default, or `q` to cancel.
pub struct TerminalPrompter {
    input: Box<dyn BufRead + Send>,
    output: Box<dyn Write + Send>,
    theme: PromptTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self::with_io(BufReader::new(io::stdin()), io::stdout())
    }

    pub fn with_io(
        input: impl BufRead + Send + 'static,
        output: impl Write + Send + 'static,
    ) -> Self {
        Self {
            input: Box::new(input),
            output: Box::new(output),
            theme: PromptTheme::default(),
        }
    }

    /// Read one trimmed line; `None` on EOF
    fn read_line(&mut self) -> Result<Option<String>, PromptError> {
        write!(self.output, "{} ", ">".with(self.theme.prompt))?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn render(&mut self, placeholder: &str, list: &SelectionList) -> Result<(), PromptError> {
        writeln!(self.output, "{}", placeholder.with(self.theme.title))?;

        let mut index = 0;
        for entry in list.entries() {
            match entry {
                SelectionEntry::Separator(label) => {
                    let line = format!("── {} ──", label);
                    writeln!(self.output, "  {}", line.with(self.theme.separator))?;
                }
                SelectionEntry::Item { label, .. } => {
                    index += 1;
                    let number = format!("{:>3}", index);
                    match entry.description() {
                        Some(description) => writeln!(
                            self.output,
                            "  {} {} {}",
                            number.with(self.theme.index),
                            label,
                            description.with(self.theme.default)
                        )?,
                        None => writeln!(
                            self.output,
                            "  {} {}",
                            number.with(self.theme.index),
                            label
                        )?,
                    }
                }
            }
        }
        Ok(())
    }

    fn interpret(list: &SelectionList, answer: &str) -> Option<String> {
        if answer.is_empty() {
            return list.default_label().map(str::to_string);
        }
        if list.contains(answer) {
            return Some(answer.to_string());
        }
        answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| list.labels().nth(i))
            .map(str::to_string)
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn select(
        &mut self,
        placeholder: &str,
        list: &SelectionList,
    ) -> Result<Option<String>, PromptError> {
        if list.labels().next().is_none() {
            return Ok(None);
        }
        self.render(placeholder, list)?;

        loop {
            let Some(answer) = self.read_line()? else {
                return Ok(None);
            };
            if let Some(choice) = Self::interpret(list, &answer) {
                return Ok(Some(choice));
            }
            if answer == "q" {
                return Ok(None);
            }
            writeln!(
                self.output,
                "{}",
                format!("Invalid choice '{}'", answer).with(self.theme.error)
            )?;
        }
    }

    fn input(&mut self, placeholder: &str) -> Result<Option<String>, PromptError> {
        writeln!(self.output, "{}", placeholder.with(self.theme.title))?;
        Ok(self.read_line()?.filter(|line| !line.is_empty()))
    }
}
