//! Plain-text loan cards for the displayed list.

use std::fmt;

use colored::Colorize;

use crate::loan::{Index, Loan, Phone};

const NO_PHONE: &str = "No phone number available";

/// What one row of the displayed list shows for a loan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanCard {
    pub index: Index,
    pub name: String,
    pub phone: String,
    pub amount: String,
    pub repaid: bool,
    pub tags: Vec<String>,
    pub transactions: Vec<String>,
}

impl LoanCard {
    pub fn new(loan: &Loan, index: Index) -> Self {
        let phone = match loan.phone() {
            Phone::Empty => NO_PHONE.to_string(),
            number => format!("Phone number: {number}"),
        };
        // Same case-insensitive order as the loan's own tag set.
        let tags = loan.tags().iter().map(|tag| tag.label().to_string()).collect();
        Self {
            index,
            name: loan.name().to_string(),
            phone,
            amount: format!("Loan Amount: {}", loan.amount().remaining()),
            repaid: loan.amount().is_repaid(),
            tags,
            transactions: loan
                .amount()
                .history()
                .iter()
                .map(|txn| txn.explanation.clone())
                .collect(),
        }
    }

    pub fn status(&self) -> &'static str {
        if self.repaid {
            "Not Wanted"
        } else {
            "Wanted"
        }
    }
}

impl fmt::Display for LoanCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.repaid {
            self.status().green()
        } else {
            self.status().red()
        };
        write!(f, "{}. {} [{}]", self.index, self.name.bold(), status)?;
        if !self.tags.is_empty() {
            write!(f, " {}", self.tags.join(", ").cyan())?;
        }
        write!(f, "\n   {}\n   {}", self.phone, self.amount)?;
        for explanation in &self.transactions {
            write!(f, "\n   - {explanation}")?;
        }
        Ok(())
    }
}

/// Cards for every loan in display order, numbered from 1.
pub fn cards<'a>(loans: impl IntoIterator<Item = &'a Loan>) -> Vec<LoanCard> {
    loans
        .into_iter()
        .enumerate()
        .map(|(position, loan)| LoanCard::new(loan, Index::from_zero_based(position)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Amount, Money};
    use crate::loan::{Name, Tag};
    use chrono::NaiveDate;

    fn loan() -> Loan {
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let amount = Amount::new(Money::from_cents(5000))
            .repay(Money::from_cents(2000), day)
            .unwrap();
        Loan::new(
            Name::parse("Alice Pauline").unwrap(),
            Phone::Empty,
            amount,
            ["work", "Family"].into_iter().filter_map(Tag::parse).collect(),
        )
    }

    #[test]
    fn card_fields() {
        let card = LoanCard::new(&loan(), Index::from_zero_based(0));
        assert_eq!(card.phone, NO_PHONE);
        assert_eq!(card.amount, "Loan Amount: 30.00");
        assert_eq!(card.status(), "Wanted");
        assert_eq!(card.tags, ["Family", "work"]);
        assert_eq!(card.transactions, ["Repaid 20.00 on 2024-01-02"]);
    }

    #[test]
    fn tags_follow_case_insensitive_order() {
        let tagged = loan().with_tags(["Zed", "apple", "Mango"].into_iter().filter_map(Tag::parse).collect());
        let card = LoanCard::new(&tagged, Index::from_zero_based(0));
        assert_eq!(card.tags, ["apple", "Mango", "Zed"]);
        colored::control::set_override(false);
        assert!(card.to_string().contains("[Wanted] apple, Mango, Zed"));
    }

    #[test]
    fn repaid_loan_is_not_wanted() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let original = loan();
        let repaid = original.with_amount(
            original
                .amount()
                .repay(Money::from_cents(3000), day)
                .unwrap(),
        );
        let card = LoanCard::new(&repaid.with_phone(Phone::parse("98765432").unwrap()), Index::from_zero_based(4));
        assert_eq!(card.status(), "Not Wanted");
        assert_eq!(card.phone, "Phone number: 98765432");
        colored::control::set_override(false);
        assert!(card.to_string().starts_with("5. Alice Pauline [Not Wanted]"));
    }

    #[test]
    fn cards_are_numbered_from_one() {
        let loans = [loan(), loan().with_name(Name::parse("Bob").unwrap())];
        let cards = cards(&loans);
        assert_eq!(cards[1].index.one_based(), 2);
        assert_eq!(cards[1].name, "Bob");
    }
}
