//! One module per command: its usage text, its parser and its execution.

pub mod add;
pub mod amount;
pub mod delete;
pub mod edit;
pub mod find;
pub mod history;
pub mod sort;
pub mod system;

use crate::errors::CommandError;
use crate::loan::Model;
use crate::parser::CommandEntry;

pub use add::AddCommand;
pub use amount::{IncreaseCommand, RepayCommand};
pub use delete::DeleteCommand;
pub use edit::{EditCommand, EditKind, EditLoanDescriptor};
pub use find::FindCommand;
pub use history::{DeleteHistoryCommand, EditHistoryCommand};
pub use sort::SortCommand;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(add::definitions());
    commands.extend(delete::definitions());
    commands.extend(amount::definitions());
    commands.extend(edit::definitions());
    commands.extend(history::definitions());
    commands.extend(find::definitions());
    commands.extend(sort::definitions());
    commands.extend(system::definitions());
    commands
}

/// What a successful command reports back to the shell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    pub feedback: String,
    pub show_help: bool,
    pub show_loans: bool,
    pub exit: bool,
}

impl CommandOutcome {
    pub fn new(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            ..Self::default()
        }
    }

    pub fn with_loans(mut self) -> Self {
        self.show_loans = true;
        self
    }
}

pub type CommandResult = Result<CommandOutcome, CommandError>;

/// A parsed, fully validated command. Single use: built by the parser,
/// executed once, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(AddCommand),
    Delete(DeleteCommand),
    Repay(RepayCommand),
    Increase(IncreaseCommand),
    Edit(EditCommand),
    EditHistory(EditHistoryCommand),
    DeleteHistory(DeleteHistoryCommand),
    Find(FindCommand),
    Sort(SortCommand),
    List,
    Clear,
    Help,
    Exit,
}

impl Command {
    pub fn execute(&self, model: &mut Model) -> CommandResult {
        match self {
            Command::Add(command) => command.execute(model),
            Command::Delete(command) => command.execute(model),
            Command::Repay(command) => command.execute(model),
            Command::Increase(command) => command.execute(model),
            Command::Edit(command) => command.execute(model),
            Command::EditHistory(command) => command.execute(model),
            Command::DeleteHistory(command) => command.execute(model),
            Command::Find(command) => command.execute(model),
            Command::Sort(command) => command.execute(model),
            Command::List => Ok(system::list(model)),
            Command::Clear => Ok(system::clear(model)),
            Command::Help => Ok(system::help()),
            Command::Exit => Ok(system::exit()),
        }
    }

    /// Whether running the command can change what must be persisted.
    pub fn mutates_book(&self) -> bool {
        !matches!(
            self,
            Command::Find(_) | Command::Sort(_) | Command::List | Command::Help | Command::Exit
        )
    }
}
