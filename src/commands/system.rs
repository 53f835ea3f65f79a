//! Argument-free commands: `list`, `clear`, `help` and `exit`.

use tracing::info;

use crate::loan::{LoanPredicate, Model};
use crate::parser::CommandEntry;

use super::{all_definitions, Command, CommandOutcome};

pub const LIST_USAGE: &str = "list: Shows every loan in the loan book.\nExample: list";
pub const CLEAR_USAGE: &str = "clear: Removes every loan from the loan book.\nExample: clear";
pub const HELP_USAGE: &str = "help: Shows the available commands.\nExample: help";
pub const EXIT_USAGE: &str = "exit: Saves and exits the program.\nExample: exit";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("list", "Show every loan", LIST_USAGE, |_| Ok(Command::List)),
        CommandEntry::new("clear", "Remove every loan", CLEAR_USAGE, |_| {
            Ok(Command::Clear)
        }),
        CommandEntry::new("help", "Show this overview", HELP_USAGE, |_| Ok(Command::Help)),
        CommandEntry::new("exit", "Leave the program", EXIT_USAGE, |_| Ok(Command::Exit)),
    ]
}

pub fn list(model: &mut Model) -> CommandOutcome {
    model.update_predicate(LoanPredicate::All);
    CommandOutcome::new("Listed all loans").with_loans()
}

pub fn clear(model: &mut Model) -> CommandOutcome {
    let cleared = model.book().len();
    model.clear();
    info!(cleared, "loan book cleared");
    CommandOutcome::new("Loan book has been cleared!")
}

pub fn help() -> CommandOutcome {
    CommandOutcome {
        show_help: true,
        ..CommandOutcome::new(help_overview())
    }
}

pub fn exit() -> CommandOutcome {
    CommandOutcome {
        exit: true,
        ..CommandOutcome::new("Exiting Loan Book as requested ...")
    }
}

/// One line per command word, with its description.
pub fn help_overview() -> String {
    let definitions = all_definitions();
    let width = definitions
        .iter()
        .map(|entry| entry.name.len())
        .max()
        .unwrap_or(0);
    let mut overview = String::from("Available commands:");
    for entry in &definitions {
        overview.push_str(&format!("\n  {:width$}  {}", entry.name, entry.description));
        if let Some(feature) = entry.feature {
            overview.push_str(&format!(" (requires feature '{feature}')"));
        }
    }
    overview
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::typical_model;
    use crate::loan::SortKey;

    #[test]
    fn list_resets_filter_but_keeps_sort() {
        let mut model = typical_model();
        model.update_predicate(LoanPredicate::name_contains_any(["carl"]));
        model.set_sort_key(SortKey::Amount);
        let outcome = list(&mut model);
        assert_eq!(outcome.feedback, "Listed all loans");
        assert!(outcome.show_loans);
        assert_eq!(model.predicate(), &LoanPredicate::All);
        assert_eq!(model.sort_key(), Some(SortKey::Amount));
        assert_eq!(model.view().len(), 3);
    }

    #[test]
    fn clear_empties_the_book() {
        let mut model = typical_model();
        assert_eq!(clear(&mut model).feedback, "Loan book has been cleared!");
        assert!(model.book().is_empty());
    }

    #[test]
    fn help_and_exit_set_flags() {
        let help = help();
        assert!(help.show_help && !help.exit);
        assert!(help.feedback.contains("repay"));
        assert!(help.feedback.contains("requires feature 'edit'"));
        assert!(exit().exit);
    }
}
