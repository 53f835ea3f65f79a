use tracing::{info, warn};

use crate::commands::{Command, CommandOutcome};
use crate::config::PersistencePolicy;
use crate::errors::{LoanBookError, StorageError};
use crate::loan::{LoanBook, Model};
use crate::parser::LoanBookParser;
use crate::storage::LoanBookStorage;

/// Facade that owns the loan book and runs command text against it:
/// parse, execute, persist.
pub struct LoanBookManager {
    model: Model,
    parser: LoanBookParser,
    storage: Box<dyn LoanBookStorage>,
    policy: PersistencePolicy,
}

impl LoanBookManager {
    pub fn new(
        book: LoanBook,
        parser: LoanBookParser,
        storage: Box<dyn LoanBookStorage>,
        policy: PersistencePolicy,
    ) -> Self {
        Self {
            model: Model::new(book),
            parser,
            storage,
            policy,
        }
    }

    /// Loads the stored book, starting empty when nothing was saved yet.
    pub fn open(
        parser: LoanBookParser,
        storage: Box<dyn LoanBookStorage>,
        policy: PersistencePolicy,
    ) -> Result<Self, StorageError> {
        let book = storage.load()?.unwrap_or_default();
        info!(loans = book.len(), ?policy, "loan book opened");
        Ok(Self::new(book, parser, storage, policy))
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn parser(&self) -> &LoanBookParser {
        &self.parser
    }

    pub fn policy(&self) -> PersistencePolicy {
        self.policy
    }

    pub fn save(&self) -> Result<(), StorageError> {
        self.storage.save(self.model.book())
    }

    pub fn execute(&mut self, text: &str) -> Result<CommandOutcome, LoanBookError> {
        info!(command = text.trim(), "executing command");
        let command = self.parser.parse_command(text).map_err(|err| {
            warn!(error = %err, "command rejected");
            err
        })?;
        self.run(&command).map_err(|err| {
            warn!(error = %err, "command failed");
            err
        })
    }

    fn run(&mut self, command: &Command) -> Result<CommandOutcome, LoanBookError> {
        if !command.mutates_book() {
            return Ok(command.execute(&mut self.model)?);
        }
        match self.policy {
            PersistencePolicy::MutateThenPersist => {
                let outcome = command.execute(&mut self.model)?;
                self.save()?;
                Ok(outcome)
            }
            PersistencePolicy::PersistThenCommit => {
                let mut staged = self.model.clone();
                let outcome = command.execute(&mut staged)?;
                self.storage.save(staged.book())?;
                self.model = staged;
                Ok(outcome)
            }
        }
    }
}
