use tracing::info;

use crate::errors::ParseError;
use crate::loan::{Model, SortKey};
use crate::parser::CommandEntry;

use super::{Command, CommandOutcome, CommandResult};

pub const SORT_USAGE: &str = "sort: Orders the displayed loan list. Loans that compare equal keep their current order.\n\
Parameters: name|amount|date\n\
Example: sort amount";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "sort",
        "Order the displayed loans",
        SORT_USAGE,
        parse,
    )]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortCommand {
    key: SortKey,
}

impl SortCommand {
    pub fn new(key: SortKey) -> Self {
        Self { key }
    }

    pub fn execute(&self, model: &mut Model) -> CommandResult {
        model.set_sort_key(self.key);
        info!(key = self.key.label(), "sort applied");
        Ok(CommandOutcome::new(format!("Loans sorted by {}", self.key.label())).with_loans())
    }
}

fn parse(args: &str) -> Result<Command, ParseError> {
    SortKey::parse(args)
        .map(|key| Command::Sort(SortCommand::new(key)))
        .ok_or(ParseError::InvalidFormat { usage: SORT_USAGE })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::typical_model;

    #[test]
    fn parses_known_keys_only() {
        assert_eq!(parse(" Amount "), Ok(Command::Sort(SortCommand::new(SortKey::Amount))));
        assert_eq!(parse(" date"), Ok(Command::Sort(SortCommand::new(SortKey::Date))));
        assert_eq!(parse(""), Err(ParseError::InvalidFormat { usage: SORT_USAGE }));
        assert_eq!(
            parse(" phone"),
            Err(ParseError::InvalidFormat { usage: SORT_USAGE })
        );
    }

    #[test]
    fn orders_view_without_touching_book() {
        let mut model = typical_model();
        let outcome = SortCommand::new(SortKey::Amount).execute(&mut model).unwrap();
        assert_eq!(outcome.feedback, "Loans sorted by amount");
        let names: Vec<_> = model
            .filtered_loans()
            .into_iter()
            .map(|loan| loan.name().to_string())
            .collect();
        assert_eq!(names, ["Carl Kurz", "Benson Meier", "Alice Pauline"]);
        assert_eq!(
            model.book().loans().next().map(|loan| loan.name().as_str()),
            Some("Alice Pauline")
        );
    }
}
