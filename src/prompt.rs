//! User input handling for appforge.
//! All interaction happens through the [`Prompter`] trait so the collector
//! can be driven by a real terminal or by a scripted answer queue in tests.

use crate::error::{Error, Result};
use dialoguer::Input;
use std::cell::RefCell;
use std::collections::VecDeque;

/// A source of line-based answers.
///
/// Implementations return the default when the user submits an empty line,
/// mirroring terminal behavior.
pub trait Prompter {
    fn read_line(&self, prompt: &str, default: &str) -> Result<String>;
}

/// Interactive prompter backed by dialoguer's line editor.
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        DialoguerPrompter::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn read_line(&self, prompt: &str, default: &str) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
        if !default.is_empty() {
            input = input.default(default.to_string());
        }
        input.interact_text().map_err(|e| Error::Prompt(e.to_string()))
    }
}

/// Prompter fed from a pre-filled answer queue, for non-interactive and
/// test use. An empty or exhausted queue entry resolves to the default,
/// like pressing enter at a terminal.
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<String>>,
}

impl ScriptedPrompter {
    pub fn new<I>(answers: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&self, _prompt: &str, default: &str) -> Result<String> {
        let answer = self.answers.borrow_mut().pop_front().unwrap_or_default();
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }
}

/// Interprets a yes/no answer: empty input resolves to the default, any
/// answer with a leading case-insensitive 'y' means yes, anything else no.
pub fn parse_yes(input: &str, default: bool) -> bool {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        default
    } else {
        trimmed.to_lowercase().starts_with('y')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yes() {
        assert!(parse_yes("yes", false));
        assert!(parse_yes("y", false));
        assert!(parse_yes("Y", false));
        assert!(parse_yes("  Yep", false));
        assert!(!parse_yes("no", true));
        assert!(!parse_yes("n", true));
        assert!(!parse_yes("anything else", true));
        assert!(parse_yes("", true));
        assert!(!parse_yes("", false));
    }

    #[test]
    fn test_scripted_prompter_falls_back_to_default() {
        let prompter = ScriptedPrompter::new(["custom", ""]);
        assert_eq!(prompter.read_line("q1", "d1").unwrap(), "custom");
        assert_eq!(prompter.read_line("q2", "d2").unwrap(), "d2");
        // exhausted queue keeps answering with defaults
        assert_eq!(prompter.read_line("q3", "d3").unwrap(), "d3");
    }
}
