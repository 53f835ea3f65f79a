use std::collections::BTreeSet;

use tracing::info;

use crate::errors::{CommandError, ParseError};
use crate::ledger::Amount;
use crate::loan::{Loan, Model, Phone};
use crate::parser::syntax::{PREFIX_AMOUNT, PREFIX_DATE, PREFIX_NAME, PREFIX_PHONE, PREFIX_TAG};
use crate::parser::{tokenize, values, CommandEntry};

use super::{Command, CommandOutcome, CommandResult};

pub const ADD_USAGE: &str = "add: Adds a loan to the loan book.\n\
Parameters: n/NAME a/AMOUNT [p/PHONE] [d/DATE] [t/TAG]...\n\
Example: add n/John Doe a/42.50 p/98765432 t/friends";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "add",
        "Record a new loan",
        ADD_USAGE,
        parse,
    )]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCommand {
    loan: Loan,
}

impl AddCommand {
    pub fn new(loan: Loan) -> Self {
        Self { loan }
    }

    pub fn execute(&self, model: &mut Model) -> CommandResult {
        if model.has_loan(&self.loan) {
            return Err(CommandError::DuplicateLoan);
        }
        model.add_loan(self.loan.clone());
        info!(name = %self.loan.name(), "loan added");
        Ok(CommandOutcome::new(format!("New loan added: {}", self.loan)))
    }
}

fn parse(args: &str) -> Result<Command, ParseError> {
    let map = tokenize(
        args,
        &[PREFIX_NAME, PREFIX_AMOUNT, PREFIX_PHONE, PREFIX_DATE, PREFIX_TAG],
    );
    let (Some(name), Some(amount)) = (map.value(PREFIX_NAME), map.value(PREFIX_AMOUNT)) else {
        return Err(ParseError::InvalidFormat { usage: ADD_USAGE });
    };
    if !map.preamble().is_empty() {
        return Err(ParseError::InvalidFormat { usage: ADD_USAGE });
    }
    map.verify_no_duplicate_prefixes_for(&[PREFIX_NAME, PREFIX_AMOUNT, PREFIX_PHONE, PREFIX_DATE])?;

    let name = values::parse_name(name)?;
    let amount = values::parse_amount(amount)?;
    let phone = map
        .value(PREFIX_PHONE)
        .map(values::parse_phone)
        .transpose()?
        .unwrap_or(Phone::Empty);
    let date = values::parse_date_or_today(map.value(PREFIX_DATE))?;
    let tags: BTreeSet<_> = values::parse_tags(map.all_values(PREFIX_TAG))?;

    let loan = Loan::new(name, phone, Amount::new(amount), tags).with_date(date);
    Ok(Command::Add(AddCommand::new(loan)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{date, loan, typical_model};
    use crate::ledger::Money;
    use chrono::Local;

    #[test]
    fn parses_all_fields() {
        let Ok(Command::Add(command)) =
            parse(" n/Amy Bee a/12.34 p/11111111 t/friends t/colleague")
        else {
            panic!("expected add");
        };
        assert_eq!(command.loan.name().as_str(), "Amy Bee");
        assert_eq!(command.loan.amount().remaining(), Money::from_cents(1234));
        assert_eq!(command.loan.phone().to_string(), "11111111");
        assert_eq!(command.loan.tags().len(), 2);
        assert!(command.loan.amount().history().is_empty());
    }

    #[test]
    fn date_defaults_to_today() {
        let Ok(Command::Add(dated)) = parse(" n/Amy a/12.34 d/2024-01-05") else {
            panic!("expected add");
        };
        assert_eq!(dated.loan.loan_date(), Some(date(5)));

        let Ok(Command::Add(undated)) = parse(" n/Amy a/12.34") else {
            panic!("expected add");
        };
        assert_eq!(undated.loan.loan_date(), Some(Local::now().date_naive()));
    }

    #[test]
    fn missing_fields_and_preamble_are_format_errors() {
        let format = Err(ParseError::InvalidFormat { usage: ADD_USAGE });
        assert_eq!(parse(" n/Amy"), format);
        assert_eq!(parse(" a/1.00"), format);
        assert_eq!(parse(" junk n/Amy a/1.00"), format);
    }

    #[test]
    fn rejects_invalid_values_and_duplicates() {
        assert!(matches!(parse(" n/Amy a/1.0"), Err(ParseError::InvalidValue(_))));
        assert!(matches!(parse(" n/Amy a/1.00 p/12"), Err(ParseError::InvalidValue(_))));
        assert!(matches!(
            parse(" n/Amy a/1.00 t/#x"),
            Err(ParseError::InvalidValue(_))
        ));
        assert!(matches!(
            parse(" n/Amy n/Bob a/1.00"),
            Err(ParseError::DuplicatePrefixes(_))
        ));
    }

    #[test]
    fn execute_appends_and_rejects_duplicates() {
        let mut model = typical_model();
        let outcome = AddCommand::new(loan("Daniel Meier", 700))
            .execute(&mut model)
            .unwrap();
        assert!(outcome.feedback.starts_with("New loan added: Daniel Meier"));
        assert_eq!(
            model.filtered_loans().last().map(|l| l.name().as_str()),
            Some("Daniel Meier")
        );

        assert_eq!(
            AddCommand::new(loan("Alice Pauline", 1)).execute(&mut model),
            Err(CommandError::DuplicateLoan)
        );
    }
}
