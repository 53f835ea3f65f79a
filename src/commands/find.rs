use tracing::info;

use crate::errors::ParseError;
use crate::loan::{LoanPredicate, Model};
use crate::parser::CommandEntry;

use super::{Command, CommandOutcome, CommandResult};

pub const FIND_USAGE: &str = "find: Finds all loans whose names contain any of the specified keywords (case-insensitive) and displays them as a list with index numbers.\n\
Parameters: KEYWORD [MORE_KEYWORDS]...\n\
Example: find alice bob charlie";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "find",
        "Show loans whose name matches a keyword",
        FIND_USAGE,
        parse,
    )]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindCommand {
    predicate: LoanPredicate,
}

impl FindCommand {
    pub fn new(predicate: LoanPredicate) -> Self {
        Self { predicate }
    }

    pub fn execute(&self, model: &mut Model) -> CommandResult {
        model.update_predicate(self.predicate.clone());
        let listed = model.view().len();
        info!(listed, "find applied");
        Ok(CommandOutcome::new(format!("{listed} loans listed!")).with_loans())
    }
}

fn parse(args: &str) -> Result<Command, ParseError> {
    let keywords: Vec<&str> = args.split_whitespace().collect();
    if keywords.is_empty() {
        return Err(ParseError::InvalidFormat { usage: FIND_USAGE });
    }
    Ok(Command::Find(FindCommand::new(
        LoanPredicate::name_contains_any(keywords),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::typical_model;

    #[test]
    fn blank_keywords_are_a_format_error() {
        assert_eq!(parse("   "), Err(ParseError::InvalidFormat { usage: FIND_USAGE }));
    }

    #[test]
    fn filters_view_and_counts_matches() {
        let mut model = typical_model();
        let Ok(Command::Find(command)) = parse(" MEIER kurz") else {
            panic!("expected find");
        };
        let outcome = command.execute(&mut model).unwrap();
        assert_eq!(outcome.feedback, "2 loans listed!");
        assert!(outcome.show_loans);
        assert_eq!(model.filtered_loans().len(), 2);
        assert_eq!(model.book().len(), 3);
    }

    #[test]
    fn no_match_lists_nothing() {
        let mut model = typical_model();
        let outcome = FindCommand::new(LoanPredicate::name_contains_any(["zoe"]))
            .execute(&mut model)
            .unwrap();
        assert_eq!(outcome.feedback, "0 loans listed!");
        assert!(model.view().is_empty());
    }
}
