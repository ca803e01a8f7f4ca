/*!
 * Interactive input for values missing from the command line
 */

use std::collections::VecDeque;
use std::path::PathBuf;

use console::Term;

use crate::error::{RepoTxtError, Result};
use crate::selection::FileSelector;

/// Source of interactive answers
pub trait Prompt {
    /// Free text; an empty answer yields `default` when one is given
    fn input(&mut self, title: &str, default: Option<&str>) -> Result<String>;

    /// Text that must not be echoed
    fn secret(&mut self, title: &str) -> Result<String>;

    /// Yes/no question
    fn confirm(&mut self, title: &str, default: bool) -> Result<bool>;

    /// Pick one of `options`, returning its index
    fn select(&mut self, title: &str, options: &[String]) -> Result<usize>;
}

/// Prompt on the controlling terminal
pub struct TermPrompt {
    term: Term,
}

impl TermPrompt {
    /// Prompt on stderr so stdout stays clean
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    fn read_line(&self) -> Result<String> {
        self.term
            .read_line()
            .map_err(|e| RepoTxtError::Prompt(e.to_string()))
    }

    fn say(&self, text: &str) -> Result<()> {
        self.term
            .write_str(text)
            .map_err(|e| RepoTxtError::Prompt(e.to_string()))
    }
}

impl Default for TermPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for TermPrompt {
    fn input(&mut self, title: &str, default: Option<&str>) -> Result<String> {
        match default {
            Some(d) if !d.is_empty() => self.say(&format!("{} [{}]: ", title, d))?,
            _ => self.say(&format!("{}: ", title))?,
        }
        let answer = self.read_line()?;
        let answer = answer.trim();

        match (answer.is_empty(), default) {
            (true, Some(d)) => Ok(d.to_string()),
            (true, None) => Err(RepoTxtError::Prompt(format!("{} cannot be empty", title))),
            (false, _) => Ok(answer.to_string()),
        }
    }

    fn secret(&mut self, title: &str) -> Result<String> {
        self.say(&format!("{}: ", title))?;
        self.term
            .read_secure_line()
            .map_err(|e| RepoTxtError::Prompt(e.to_string()))
    }

    fn confirm(&mut self, title: &str, default: bool) -> Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        self.say(&format!("{} [{}]: ", title, hint))?;
        parse_confirm(&self.read_line()?, default)
    }

    fn select(&mut self, title: &str, options: &[String]) -> Result<usize> {
        let mut menu = format!("{}:\n", title);
        for (i, option) in options.iter().enumerate() {
            menu.push_str(&format!("  {}) {}\n", i + 1, option));
        }
        menu.push_str(&format!("Select a number (1-{}): ", options.len()));
        self.say(&menu)?;
        parse_choice(&self.read_line()?, options.len())
    }
}

/// Prompt that replays canned answers, for scripted and test use
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
}

impl ScriptedPrompt {
    /// Answers are consumed in order, one per question
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether every answer has been used
    pub fn is_exhausted(&self) -> bool {
        self.answers.is_empty()
    }

    fn next(&mut self, title: &str) -> Result<String> {
        self.answers
            .pop_front()
            .ok_or_else(|| RepoTxtError::Prompt(format!("no answer for \"{}\"", title)))
    }
}

impl Prompt for ScriptedPrompt {
    fn input(&mut self, title: &str, default: Option<&str>) -> Result<String> {
        let answer = self.next(title)?;
        match (answer.trim().is_empty(), default) {
            (true, Some(d)) => Ok(d.to_string()),
            _ => Ok(answer.trim().to_string()),
        }
    }

    fn secret(&mut self, title: &str) -> Result<String> {
        self.next(title)
    }

    fn confirm(&mut self, title: &str, default: bool) -> Result<bool> {
        let answer = self.next(title)?;
        parse_confirm(&answer, default)
    }

    fn select(&mut self, title: &str, options: &[String]) -> Result<usize> {
        let answer = self.next(title)?;
        parse_choice(&answer, options.len())
    }
}

/// Resolves ambiguous file names by asking the user
pub struct PromptSelector<'a> {
    prompt: &'a mut dyn Prompt,
}

impl<'a> PromptSelector<'a> {
    /// Wrap a prompt
    pub fn new(prompt: &'a mut dyn Prompt) -> Self {
        Self { prompt }
    }
}

impl FileSelector for PromptSelector<'_> {
    fn select(&mut self, name: &str, candidates: &[PathBuf]) -> Result<PathBuf> {
        let options: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
        let title = format!("Multiple matches found for file '{}'", name);
        let index = self.prompt.select(&title, &options)?;
        Ok(candidates[index].clone())
    }
}

fn parse_confirm(answer: &str, default: bool) -> Result<bool> {
    match answer.trim().to_lowercase().as_str() {
        "" => Ok(default),
        "y" | "yes" | "true" => Ok(true),
        "n" | "no" | "false" => Ok(false),
        other => Err(RepoTxtError::Prompt(format!("expected yes or no, got \"{}\"", other))),
    }
}

/// Parse a 1-based menu choice into an index
fn parse_choice(answer: &str, count: usize) -> Result<usize> {
    let choice: usize = answer
        .trim()
        .parse()
        .map_err(|e| RepoTxtError::Prompt(format!("invalid input: {}", e)))?;
    if choice < 1 || choice > count {
        return Err(RepoTxtError::Prompt("choice out of range".to_string()));
    }
    Ok(choice - 1)
}
