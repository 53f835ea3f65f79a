//! `edithist` and `delhist`: retroactive changes to a loan's transactions.

use chrono::NaiveDate;
use tracing::info;

use crate::errors::ParseError;
use crate::ledger::Money;
use crate::loan::{Index, Model};
use crate::parser::syntax::{PREFIX_AMOUNT, PREFIX_DATE, PREFIX_TRANSACTION};
use crate::parser::{tokenize, values, CommandEntry};

use super::{Command, CommandOutcome, CommandResult};

pub const EDIT_HISTORY_USAGE: &str = "edithist: Changes one transaction of the loan identified by the index number used in the displayed loan list.\n\
The transaction keeps its direction; only its amount and date change.\n\
Parameters: INDEX (must be a positive integer) i/TRANSACTION a/AMOUNT [d/DATE]\n\
Example: edithist 1 i/2 a/10.00 d/2024-02-01";

pub const DELETE_HISTORY_USAGE: &str = "delhist: Removes one transaction of the loan identified by the index number used in the displayed loan list.\n\
Parameters: INDEX (must be a positive integer) i/TRANSACTION\n\
Example: delhist 1 i/2";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "edithist",
            "Correct a recorded transaction",
            EDIT_HISTORY_USAGE,
            parse_edit_history,
        ),
        CommandEntry::new(
            "delhist",
            "Remove a recorded transaction",
            DELETE_HISTORY_USAGE,
            parse_delete_history,
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditHistoryCommand {
    target: Index,
    transaction: Index,
    amount: Money,
    date: Option<NaiveDate>,
}

impl EditHistoryCommand {
    pub fn new(target: Index, transaction: Index, amount: Money, date: Option<NaiveDate>) -> Self {
        Self {
            target,
            transaction,
            amount,
            date,
        }
    }

    pub fn execute(&self, model: &mut Model) -> CommandResult {
        let (id, current) = model.resolve(self.target)?;
        let amount = current.amount().edit_transaction(
            self.transaction.zero_based(),
            self.amount,
            self.date,
        )?;
        let edited = current.with_amount(amount);
        let feedback = format!("Transaction {} edited: {edited}", self.transaction);
        model.set_loan(id, edited)?;
        info!(transaction = %self.transaction, "transaction edited");
        Ok(CommandOutcome::new(feedback))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteHistoryCommand {
    target: Index,
    transaction: Index,
}

impl DeleteHistoryCommand {
    pub fn new(target: Index, transaction: Index) -> Self {
        Self {
            target,
            transaction,
        }
    }

    pub fn execute(&self, model: &mut Model) -> CommandResult {
        let (id, current) = model.resolve(self.target)?;
        let amount = current
            .amount()
            .delete_transaction(self.transaction.zero_based())?;
        let edited = current.with_amount(amount);
        let feedback = format!("Transaction {} deleted: {edited}", self.transaction);
        model.set_loan(id, edited)?;
        info!(transaction = %self.transaction, "transaction deleted");
        Ok(CommandOutcome::new(feedback))
    }
}

fn parse_edit_history(args: &str) -> Result<Command, ParseError> {
    let usage = EDIT_HISTORY_USAGE;
    let map = tokenize(args, &[PREFIX_TRANSACTION, PREFIX_AMOUNT, PREFIX_DATE]);
    let (Some(transaction), Some(amount)) =
        (map.value(PREFIX_TRANSACTION), map.value(PREFIX_AMOUNT))
    else {
        return Err(ParseError::InvalidFormat { usage });
    };
    let target = values::parse_target_index(map.preamble(), usage)?;
    map.verify_no_duplicate_prefixes_for(&[PREFIX_TRANSACTION, PREFIX_AMOUNT, PREFIX_DATE])?;
    let transaction = values::parse_index(transaction)?;
    let amount = values::parse_positive_amount(amount)?;
    let date = map.value(PREFIX_DATE).map(values::parse_date).transpose()?;
    Ok(Command::EditHistory(EditHistoryCommand::new(
        target,
        transaction,
        amount,
        date,
    )))
}

fn parse_delete_history(args: &str) -> Result<Command, ParseError> {
    let usage = DELETE_HISTORY_USAGE;
    let map = tokenize(args, &[PREFIX_TRANSACTION]);
    let Some(transaction) = map.value(PREFIX_TRANSACTION) else {
        return Err(ParseError::InvalidFormat { usage });
    };
    let target = values::parse_target_index(map.preamble(), usage)?;
    map.verify_no_duplicate_prefixes_for(&[PREFIX_TRANSACTION])?;
    let transaction = values::parse_index(transaction)?;
    Ok(Command::DeleteHistory(DeleteHistoryCommand::new(
        target,
        transaction,
    )))
}
