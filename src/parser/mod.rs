//! Turns command text into ready-to-run `Command`s.

pub mod registry;
pub mod syntax;
pub mod tokenizer;
pub mod values;

use std::collections::HashSet;

use tracing::debug;

use crate::commands::{self, system::HELP_USAGE, Command};
use crate::errors::ParseError;

pub use registry::{CommandEntry, CommandRegistry};
pub use tokenizer::{tokenize, ArgumentMap};

/// Word→parser dispatch table plus the set of enabled experimental features.
pub struct LoanBookParser {
    registry: CommandRegistry,
    features: HashSet<String>,
}

impl Default for LoanBookParser {
    fn default() -> Self {
        Self::new(std::iter::empty::<String>())
    }
}

impl LoanBookParser {
    pub fn new<I, S>(features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = CommandRegistry::new();
        for entry in commands::all_definitions() {
            registry.register(entry);
        }
        Self {
            registry,
            features: features.into_iter().map(Into::into).collect(),
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn is_enabled(&self, entry: &CommandEntry) -> bool {
        entry
            .feature
            .map_or(true, |feature| self.features.contains(feature))
    }

    /// Command words the user can currently run.
    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry
            .list()
            .into_iter()
            .filter(|entry| self.is_enabled(entry))
            .map(|entry| entry.name)
            .collect()
    }

    pub fn parse_command(&self, input: &str) -> Result<Command, ParseError> {
        let trimmed = input.trim();
        let (word, arguments) = match trimmed.find(char::is_whitespace) {
            Some(split) => trimmed.split_at(split),
            None => (trimmed, ""),
        };
        if word.is_empty() {
            return Err(ParseError::InvalidFormat { usage: HELP_USAGE });
        }
        debug!(command_word = word, arguments, "parsing command");

        let entry = self
            .registry
            .get(word)
            .ok_or(ParseError::UnknownCommand)?;
        if !self.is_enabled(entry) {
            return Err(ParseError::CommandDisabled);
        }
        (entry.parse)(arguments)
    }
}
