use tracing::info;

use crate::errors::{CommandError, ParseError};
use crate::loan::{Index, Model};
use crate::parser::{values, CommandEntry};

use super::{Command, CommandOutcome, CommandResult};

pub const DELETE_USAGE: &str = "delete: Deletes the loan identified by the index number used in the displayed loan list.\n\
Parameters: INDEX (must be a positive integer)\n\
Example: delete 1";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "delete",
        "Remove a loan",
        DELETE_USAGE,
        parse,
    )]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteCommand {
    target: Index,
}

impl DeleteCommand {
    pub fn new(target: Index) -> Self {
        Self { target }
    }

    pub fn execute(&self, model: &mut Model) -> CommandResult {
        let (id, _) = model.resolve(self.target)?;
        let deleted = model
            .delete_loan(id)
            .ok_or(CommandError::InvalidDisplayedIndex)?;
        info!(name = %deleted.name(), "loan deleted");
        Ok(CommandOutcome::new(format!("Deleted Loan: {deleted}")))
    }
}

fn parse(args: &str) -> Result<Command, ParseError> {
    let target = values::parse_target_index(args, DELETE_USAGE)?;
    Ok(Command::Delete(DeleteCommand::new(target)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::typical_model;
    use crate::loan::{LoanPredicate, SortKey};

    #[test]
    fn parses_index_and_rejects_garbage() {
        assert_eq!(
            parse(" 2"),
            Ok(Command::Delete(DeleteCommand::new(Index::from_zero_based(1))))
        );
        assert_eq!(parse(" 0"), Err(ParseError::InvalidIndex));
        assert_eq!(parse(" -3"), Err(ParseError::InvalidIndex));
        assert_eq!(
            parse(" two"),
            Err(ParseError::InvalidFormat { usage: DELETE_USAGE })
        );
        assert_eq!(parse(""), Err(ParseError::InvalidFormat { usage: DELETE_USAGE }));
    }

    #[test]
    fn deletes_the_displayed_loan() {
        let mut model = typical_model();
        model.set_sort_key(SortKey::Amount);
        let outcome = DeleteCommand::new(Index::from_zero_based(0))
            .execute(&mut model)
            .unwrap();
        assert!(outcome.feedback.starts_with("Deleted Loan: Carl Kurz"));
        assert_eq!(model.book().len(), 2);
    }

    #[test]
    fn index_past_the_filtered_view_fails() {
        let mut model = typical_model();
        model.update_predicate(LoanPredicate::name_contains_any(["alice"]));
        assert_eq!(
            DeleteCommand::new(Index::from_zero_based(1)).execute(&mut model),
            Err(CommandError::InvalidDisplayedIndex)
        );
        assert_eq!(model.book().len(), 3);
    }
}
