//! `repay` and `increase`: the two commands that move a loan's balance.

use chrono::NaiveDate;
use tracing::info;

use crate::errors::ParseError;
use crate::ledger::Money;
use crate::loan::{Index, Model};
use crate::parser::syntax::{PREFIX_AMOUNT, PREFIX_DATE};
use crate::parser::{tokenize, values, CommandEntry};

use super::{Command, CommandOutcome, CommandResult};

pub const REPAY_USAGE: &str = "repay: Repays part or all of the loan identified by the index number used in the displayed loan list.\n\
Parameters: INDEX (must be a positive integer) a/AMOUNT [d/DATE]\n\
Example: repay 1 a/20.00 d/2024-01-31";

pub const INCREASE_USAGE: &str = "increase: Lends more money on the loan identified by the index number used in the displayed loan list.\n\
Parameters: INDEX (must be a positive integer) a/AMOUNT [d/DATE]\n\
Example: increase 1 a/15.50";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("repay", "Record a repayment", REPAY_USAGE, parse_repay),
        CommandEntry::new(
            "increase",
            "Lend more on an existing loan",
            INCREASE_USAGE,
            parse_increase,
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepayCommand {
    target: Index,
    amount: Money,
    date: NaiveDate,
}

impl RepayCommand {
    pub fn new(target: Index, amount: Money, date: NaiveDate) -> Self {
        Self {
            target,
            amount,
            date,
        }
    }

    pub fn execute(&self, model: &mut Model) -> CommandResult {
        let (id, current) = model.resolve(self.target)?;
        let amount = current.amount().repay(self.amount, self.date)?;
        let repaid = current.with_amount(amount);
        let fully_repaid = repaid.amount().is_repaid();
        // A full repayment reports the loan as it stood before it was cleared.
        let feedback = if fully_repaid {
            format!("Loan successfully repaid entirely: {current}")
        } else {
            format!("Loan successfully updated: {repaid}")
        };
        model.set_loan(id, repaid)?;
        info!(amount = %self.amount, fully_repaid, "repayment recorded");
        Ok(CommandOutcome::new(feedback))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncreaseCommand {
    target: Index,
    amount: Money,
    date: NaiveDate,
}

impl IncreaseCommand {
    pub fn new(target: Index, amount: Money, date: NaiveDate) -> Self {
        Self {
            target,
            amount,
            date,
        }
    }

    pub fn execute(&self, model: &mut Model) -> CommandResult {
        let (id, current) = model.resolve(self.target)?;
        let amount = current.amount().increase(self.amount, self.date)?;
        let increased = current.with_amount(amount);
        let feedback = format!("Loan successfully increased: {increased}");
        model.set_loan(id, increased)?;
        info!(amount = %self.amount, "loan increased");
        Ok(CommandOutcome::new(feedback))
    }
}

/// Shared shape of both commands: `INDEX a/AMOUNT [d/DATE]`.
fn parse_movement(args: &str, usage: &'static str) -> Result<(Index, Money, NaiveDate), ParseError> {
    let map = tokenize(args, &[PREFIX_AMOUNT, PREFIX_DATE]);
    let Some(amount) = map.value(PREFIX_AMOUNT) else {
        return Err(ParseError::InvalidFormat { usage });
    };
    let target = values::parse_target_index(map.preamble(), usage)?;
    map.verify_no_duplicate_prefixes_for(&[PREFIX_AMOUNT, PREFIX_DATE])?;
    let amount = values::parse_positive_amount(amount)?;
    let date = values::parse_date_or_today(map.value(PREFIX_DATE))?;
    Ok((target, amount, date))
}

fn parse_repay(args: &str) -> Result<Command, ParseError> {
    let (target, amount, date) = parse_movement(args, REPAY_USAGE)?;
    Ok(Command::Repay(RepayCommand::new(target, amount, date)))
}

fn parse_increase(args: &str) -> Result<Command, ParseError> {
    let (target, amount, date) = parse_movement(args, INCREASE_USAGE)?;
    Ok(Command::Increase(IncreaseCommand::new(target, amount, date)))
}
