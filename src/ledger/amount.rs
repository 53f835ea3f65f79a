use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

use super::money::{Money, MAX_AMOUNT};
use super::transaction::Transaction;

/// Total owed, what is still outstanding, and the history that explains the
/// difference. Every operation returns a fresh `Amount`; the receiver is left
/// untouched when an operation fails.
///
/// `principal` is the opening balance and is not part of `history`, so at all
/// times `total == principal + Σ positive deltas` and
/// `remaining == principal + Σ deltas`, with `0 <= remaining <= total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AmountRecord")]
pub struct Amount {
    principal: Money,
    total: Money,
    remaining: Money,
    history: Vec<Transaction>,
}

/// Shape of an `Amount` on disk. Stored totals are only trusted when they agree
/// with a replay of the history.
#[derive(Deserialize)]
struct AmountRecord {
    principal: Money,
    total: Money,
    remaining: Money,
    #[serde(default)]
    history: Vec<Transaction>,
}

impl TryFrom<AmountRecord> for Amount {
    type Error = String;

    fn try_from(record: AmountRecord) -> Result<Self, Self::Error> {
        let amount =
            Amount::from_history(record.principal, record.history).map_err(|err| err.to_string())?;
        if amount.total != record.total || amount.remaining != record.remaining {
            return Err(format!(
                "stored totals {}/{} disagree with history {}/{}",
                record.remaining, record.total, amount.remaining, amount.total
            ));
        }
        Ok(amount)
    }
}

impl Amount {
    pub fn new(principal: Money) -> Self {
        Self {
            principal,
            total: principal,
            remaining: principal,
            history: Vec::new(),
        }
    }

    /// Rebuilds an amount from a stored principal and history, checking every
    /// ledger invariant along the way.
    pub fn from_history(principal: Money, history: Vec<Transaction>) -> Result<Self, LedgerError> {
        let mut amount = Self::new(principal);
        amount.history = history;
        amount.recompute()?;
        Ok(amount)
    }

    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn remaining(&self) -> Money {
        self.remaining
    }

    pub fn history(&self) -> &[Transaction] {
        &self.history
    }

    pub fn is_repaid(&self) -> bool {
        self.remaining.is_zero()
    }

    pub fn repay(&self, amount: Money, date: NaiveDate) -> Result<Self, LedgerError> {
        if amount > self.remaining {
            return Err(LedgerError::ExceedsRemaining);
        }
        let mut next = self.clone();
        next.remaining = self.remaining - amount;
        next.history.push(Transaction::repayment(amount, date));
        Ok(next)
    }

    pub fn increase(&self, amount: Money, date: NaiveDate) -> Result<Self, LedgerError> {
        let total = self
            .total
            .checked_add(amount)
            .filter(|total| *total <= MAX_AMOUNT)
            .ok_or_else(|| LedgerError::ExceedsMaximum(MAX_AMOUNT.to_string()))?;
        let mut next = self.clone();
        next.total = total;
        next.remaining = self.remaining + amount;
        next.history.push(Transaction::increase(amount, date));
        Ok(next)
    }

    /// Replaces the magnitude (and optionally the date) of the transaction at
    /// `index`, keeping its direction, then recomputes the balance.
    pub fn edit_transaction(
        &self,
        index: usize,
        magnitude: Money,
        date: Option<NaiveDate>,
    ) -> Result<Self, LedgerError> {
        let original = self
            .history
            .get(index)
            .ok_or(LedgerError::InvalidTransactionIndex)?;
        let mut next = self.clone();
        next.history[index] = original.amended(magnitude, date);
        next.recompute()?;
        Ok(next)
    }

    pub fn delete_transaction(&self, index: usize) -> Result<Self, LedgerError> {
        if index >= self.history.len() {
            return Err(LedgerError::InvalidTransactionIndex);
        }
        let mut next = self.clone();
        next.history.remove(index);
        next.recompute()?;
        Ok(next)
    }

    /// Replays the history from the principal. The running balance may never
    /// dip below zero, so a retroactive edit cannot hide an over-repayment.
    fn recompute(&mut self) -> Result<(), LedgerError> {
        if self.principal.is_negative() {
            return Err(LedgerError::NegativeBalance);
        }
        if self.principal > MAX_AMOUNT {
            return Err(LedgerError::ExceedsMaximum(MAX_AMOUNT.to_string()));
        }
        let mut total = self.principal;
        let mut remaining = self.principal;
        for transaction in &self.history {
            if transaction.delta.is_positive() {
                total = total
                    .checked_add(transaction.delta)
                    .filter(|total| *total <= MAX_AMOUNT)
                    .ok_or_else(|| LedgerError::ExceedsMaximum(MAX_AMOUNT.to_string()))?;
            }
            remaining = remaining + transaction.delta;
            if remaining.is_negative() {
                return Err(LedgerError::NegativeBalance);
            }
        }
        self.total = total;
        self.remaining = remaining;
        Ok(())
    }
}
