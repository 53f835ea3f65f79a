use std::{
    borrow::Cow,
    env,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use strsim::levenshtein;
use tracing::warn;

use crate::cli::output;
use crate::cli::render;
use crate::config::{Config, ConfigManager};
use crate::core::LoanBookManager;
use crate::errors::{CliError, LoanBookError, ParseError, StorageError};
use crate::loan::LoanBook;
use crate::parser::LoanBookParser;
use crate::storage::JsonStorage;

pub const SCRIPT_ENV: &str = "LOAN_BOOK_CLI_SCRIPT";
const PROMPT: &str = "loan_book> ";
const SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub fn run_cli() -> Result<(), CliError> {
    let mode = if env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let config_manager = ConfigManager::new();
    let config = config_manager.load()?;
    crate::init(&config.log_filter);
    if mode == CliMode::Script {
        output::disable_colors();
    }

    let mut context = ShellContext::new(&config_manager, &config)?;
    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

/// The running shell: the engine plus the bits of terminal state around it.
pub(crate) struct ShellContext {
    manager: LoanBookManager,
}

impl ShellContext {
    pub(crate) fn new(config_manager: &ConfigManager, config: &Config) -> Result<Self, CliError> {
        let storage = JsonStorage::new(config_manager.data_file(config));
        let parser = || LoanBookParser::new(config.enabled_features.iter().cloned());
        let policy = config.persistence_policy;

        let manager = match LoanBookManager::open(parser(), Box::new(storage.clone()), policy) {
            Ok(manager) => manager,
            Err(StorageError::Corrupt(reason)) => {
                warn!(path = %storage.path().display(), %reason, "data file unreadable");
                output::warning(
                    "Data file not in the correct format. Starting with an empty loan book.",
                );
                LoanBookManager::new(LoanBook::new(), parser(), Box::new(storage), policy)
            }
            Err(err) => return Err(err.into()),
        };
        Ok(Self { manager })
    }

    fn command_names(&self) -> Vec<&'static str> {
        self.manager.parser().command_names()
    }

    pub(crate) fn process_line(&mut self, line: &str) -> LoopControl {
        let line = line.trim();
        if line.is_empty() {
            return LoopControl::Continue;
        }
        match self.manager.execute(line) {
            Ok(outcome) => {
                if outcome.show_help {
                    output::section("Help");
                    output::info(&outcome.feedback);
                } else {
                    output::success(&outcome.feedback);
                }
                if outcome.show_loans {
                    self.print_loans();
                }
                if outcome.exit {
                    return LoopControl::Exit;
                }
            }
            Err(LoanBookError::Parse(ParseError::UnknownCommand)) => {
                output::error(ParseError::UnknownCommand);
                self.suggest_command(line.split_whitespace().next().unwrap_or_default());
            }
            Err(err) => output::error(err),
        }
        LoopControl::Continue
    }

    fn print_loans(&self) {
        let loans = self.manager.model().filtered_loans();
        if loans.is_empty() {
            output::info("No loans to show.");
            return;
        }
        for card in render::cards(loans) {
            output::info(card);
        }
    }

    fn suggest_command(&self, input: &str) {
        let mut suggestions: Vec<_> = self
            .command_names()
            .into_iter()
            .map(|name| (levenshtein(name, &input.to_lowercase()), name))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= SUGGESTION_DISTANCE {
                output::info(format!("Suggestion: `{}`?", best));
            }
        }
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new(context.command_names())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
    output::info("Welcome to Loan Book. Type `help` to see the available commands.");

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                if context.process_line(trimmed) == LoopControl::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => {
                output::info("Exiting Loan Book.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if context.process_line(&line) == LoopControl::Exit {
            break;
        }
    }
    Ok(())
}

struct CommandHelper {
    commands: Vec<String>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names.into_iter().map(str::to_string).collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(line, pos))
    }
}

impl CommandHelper {
    /// Only the command word completes; arguments are free text.
    fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let prefix = &line[..pos];
        let start = prefix.len() - prefix.trim_start().len();
        if prefix[start..].contains(char::is_whitespace) {
            return (pos, Vec::new());
        }

        let needle = &prefix[start..];
        let candidates = self
            .commands
            .iter()
            .filter(|name| name.starts_with(needle))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect();
        (start, candidates)
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        let _ = ctx;
        Ok(ValidationResult::Valid(None))
    }
}
