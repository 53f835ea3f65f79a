use std::cmp::Ordering;

use crate::errors::CommandError;

use super::book::{EntryId, LoanBook};
use super::index::Index;
use super::loan::Loan;

/// Which loans the displayed list shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoanPredicate {
    #[default]
    All,
    /// Name contains any of the keywords, ignoring case.
    NameContainsAny(Vec<String>),
}

impl LoanPredicate {
    pub fn name_contains_any<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        LoanPredicate::NameContainsAny(
            keywords
                .into_iter()
                .map(|keyword| keyword.as_ref().to_lowercase())
                .collect(),
        )
    }

    pub fn test(&self, loan: &Loan) -> bool {
        match self {
            LoanPredicate::All => true,
            LoanPredicate::NameContainsAny(keywords) => {
                let name = loan.name().as_str().to_lowercase();
                keywords.iter().any(|keyword| name.contains(keyword.as_str()))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Amount,
    Date,
}

impl SortKey {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "name" => Some(SortKey::Name),
            "amount" => Some(SortKey::Amount),
            "date" => Some(SortKey::Date),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Amount => "amount",
            SortKey::Date => "date",
        }
    }

    fn compare(self, a: &Loan, b: &Loan) -> Ordering {
        match self {
            SortKey::Name => a
                .name()
                .as_str()
                .to_lowercase()
                .cmp(&b.name().as_str().to_lowercase()),
            SortKey::Amount => a.amount().remaining().cmp(&b.amount().remaining()),
            SortKey::Date => match (a.loan_date(), b.loan_date()) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

/// The loan book plus the predicate and ordering of its displayed view.
/// The view is recomputed from the book on every access, so it can never go
/// stale after a mutation.
#[derive(Debug, Clone, Default)]
pub struct Model {
    book: LoanBook,
    predicate: LoanPredicate,
    sort_key: Option<SortKey>,
}

impl Model {
    pub fn new(book: LoanBook) -> Self {
        Self {
            book,
            predicate: LoanPredicate::All,
            sort_key: None,
        }
    }

    pub fn book(&self) -> &LoanBook {
        &self.book
    }

    pub fn predicate(&self) -> &LoanPredicate {
        &self.predicate
    }

    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort_key
    }

    /// Entry ids of the displayed list, in display order. Sorting is stable:
    /// loans with equal keys keep their book order.
    pub fn view(&self) -> Vec<EntryId> {
        let mut entries: Vec<(EntryId, &Loan)> = self
            .book
            .iter()
            .filter(|(_, loan)| self.predicate.test(loan))
            .collect();
        if let Some(key) = self.sort_key {
            entries.sort_by(|(_, a), (_, b)| key.compare(a, b));
        }
        entries.into_iter().map(|(id, _)| id).collect()
    }

    pub fn filtered_loans(&self) -> Vec<&Loan> {
        self.view()
            .into_iter()
            .filter_map(|id| self.book.get(id))
            .collect()
    }

    /// Maps a displayed index to the entry it currently shows.
    pub fn resolve(&self, index: Index) -> Result<(EntryId, &Loan), CommandError> {
        self.view()
            .get(index.zero_based())
            .and_then(|id| self.book.get(*id).map(|loan| (*id, loan)))
            .ok_or(CommandError::InvalidDisplayedIndex)
    }

    pub fn has_loan(&self, loan: &Loan) -> bool {
        self.book.contains(loan)
    }

    pub fn add_loan(&mut self, loan: Loan) -> EntryId {
        self.book.add(loan)
    }

    /// Replaces the loan at `id`, rejecting a rename onto another debtor.
    pub fn set_loan(&mut self, id: EntryId, loan: Loan) -> Result<(), CommandError> {
        if self.book.contains_other(&loan, id) {
            return Err(CommandError::DuplicateLoan);
        }
        self.book
            .replace(id, loan)
            .map(|_| ())
            .ok_or(CommandError::InvalidDisplayedIndex)
    }

    pub fn delete_loan(&mut self, id: EntryId) -> Option<Loan> {
        self.book.remove(id)
    }

    pub fn clear(&mut self) {
        self.book.clear();
    }

    pub fn update_predicate(&mut self, predicate: LoanPredicate) {
        self.predicate = predicate;
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = Some(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Amount, Money};
    use crate::loan::fields::{Name, Phone};
    use chrono::NaiveDate;

    fn loan(name: &str, cents: i64) -> Loan {
        Loan::new(
            Name::parse(name).unwrap(),
            Phone::Empty,
            Amount::new(Money::from_cents(cents)),
            Default::default(),
        )
    }

    fn model() -> Model {
        Model::new(
            [
                loan("Carl Kurz", 300),
                loan("alice Pauline", 100),
                loan("Benson Meier", 300),
                loan("Daniel Meier", 200),
            ]
            .into_iter()
            .collect(),
        )
    }

    fn names(model: &Model) -> Vec<String> {
        model
            .filtered_loans()
            .into_iter()
            .map(|l| l.name().to_string())
            .collect()
    }

    #[test]
    fn predicate_matches_substrings_ignoring_case() {
        let mut model = model();
        model.update_predicate(LoanPredicate::name_contains_any(["MEIER"]));
        assert_eq!(names(&model), vec!["Benson Meier", "Daniel Meier"]);

        model.update_predicate(LoanPredicate::name_contains_any(["kur", "pau"]));
        assert_eq!(names(&model), vec!["Carl Kurz", "alice Pauline"]);
    }

    #[test]
    fn sorting_is_stable() {
        let mut model = model();
        model.set_sort_key(SortKey::Amount);
        assert_eq!(
            names(&model),
            vec!["alice Pauline", "Daniel Meier", "Carl Kurz", "Benson Meier"]
        );
        model.set_sort_key(SortKey::Name);
        assert_eq!(
            names(&model),
            vec!["alice Pauline", "Benson Meier", "Carl Kurz", "Daniel Meier"]
        );
    }

    #[test]
    fn date_sort_puts_undated_last() {
        let day = |d| NaiveDate::from_ymd_opt(2023, 1, d).unwrap();
        let mut model = model();
        model.add_loan(loan("Zed", 500).with_date(day(9)));
        model.add_loan(loan("Yann", 500).with_date(day(2)));
        model.set_sort_key(SortKey::Date);
        let names = names(&model);
        assert_eq!(&names[..2], ["Yann", "Zed"]);
        assert_eq!(names.last().map(String::as_str), Some("Daniel Meier"));
    }

    #[test]
    fn resolve_addresses_filtered_view() {
        let mut model = model();
        model.update_predicate(LoanPredicate::name_contains_any(["daniel"]));
        let (_, found) = model.resolve(Index::from_zero_based(0)).unwrap();
        assert_eq!(found.name().as_str(), "Daniel Meier");
        assert_eq!(
            model.resolve(Index::from_zero_based(1)).err(),
            Some(CommandError::InvalidDisplayedIndex)
        );
    }

    #[test]
    fn set_loan_rejects_duplicate_name() {
        let mut model = model();
        let (id, current) = model.resolve(Index::from_zero_based(0)).unwrap();
        let clash = current.with_name(Name::parse("Benson Meier").unwrap());
        assert_eq!(model.set_loan(id, clash), Err(CommandError::DuplicateLoan));

        let (id, current) = model.resolve(Index::from_zero_based(0)).unwrap();
        let same_name = current.with_phone(Phone::parse("98765432").unwrap());
        assert!(model.set_loan(id, same_name).is_ok());
    }
}
