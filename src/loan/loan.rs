use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ledger::Amount;

use super::fields::{Name, Phone, Tag};

/// A tracked debt. Loans are values: edits build a replacement with the
/// `with_*` methods instead of mutating in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    name: Name,
    #[serde(default)]
    phone: Phone,
    amount: Amount,
    #[serde(default)]
    tags: BTreeSet<Tag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date: Option<NaiveDate>,
}

impl Loan {
    pub fn new(name: Name, phone: Phone, amount: Amount, tags: BTreeSet<Tag>) -> Self {
        Self {
            name,
            phone,
            amount,
            tags,
            date: None,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn amount(&self) -> &Amount {
        &self.amount
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    /// Day the loan was made, when known.
    pub fn loan_date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Two loans are the same debtor when their names match exactly.
    pub fn is_same_loan(&self, other: &Loan) -> bool {
        self.name == other.name
    }

    pub fn with_name(&self, name: Name) -> Self {
        Self {
            name,
            ..self.clone()
        }
    }

    pub fn with_phone(&self, phone: Phone) -> Self {
        Self {
            phone,
            ..self.clone()
        }
    }

    pub fn with_amount(&self, amount: Amount) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }

    pub fn with_tags(&self, tags: BTreeSet<Tag>) -> Self {
        Self {
            tags,
            ..self.clone()
        }
    }

    pub fn with_date(&self, date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..self.clone()
        }
    }
}

impl fmt::Display for Loan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}; Phone: {}; Amount: {}; Tags: ",
            self.name,
            self.phone,
            self.amount.remaining()
        )?;
        for tag in &self.tags {
            write!(f, "{tag}")?;
        }
        Ok(())
    }
}
