use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::loan::Loan;

/// Stable handle to a loan slot. Survives sorting and filtering; only
/// `remove` and `clear` invalidate it, and a removed slot may be handed out
/// again by a later `add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(usize);

/// Arena of loans plus their insertion order.
#[derive(Debug, Clone, Default)]
pub struct LoanBook {
    slots: Vec<Option<Loan>>,
    order: Vec<EntryId>,
    free: Vec<usize>,
}

impl LoanBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, id: EntryId) -> Option<&Loan> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Loans in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &Loan)> + '_ {
        self.order
            .iter()
            .filter_map(move |id| self.get(*id).map(|loan| (*id, loan)))
    }

    pub fn loans(&self) -> impl Iterator<Item = &Loan> + '_ {
        self.iter().map(|(_, loan)| loan)
    }

    pub fn contains(&self, loan: &Loan) -> bool {
        self.loans().any(|existing| existing.is_same_loan(loan))
    }

    /// True when some loan other than `except` has the same identity as `loan`.
    pub fn contains_other(&self, loan: &Loan, except: EntryId) -> bool {
        self.iter()
            .any(|(id, existing)| id != except && existing.is_same_loan(loan))
    }

    pub fn add(&mut self, loan: Loan) -> EntryId {
        let id = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(loan);
                EntryId(slot)
            }
            None => {
                self.slots.push(Some(loan));
                EntryId(self.slots.len() - 1)
            }
        };
        self.order.push(id);
        id
    }

    /// Swaps in `loan` for the entry at `id`, keeping its position.
    pub fn replace(&mut self, id: EntryId, loan: Loan) -> Option<Loan> {
        self.slots
            .get_mut(id.0)
            .and_then(|slot| slot.as_mut().map(|current| std::mem::replace(current, loan)))
    }

    pub fn remove(&mut self, id: EntryId) -> Option<Loan> {
        let removed = self.slots.get_mut(id.0).and_then(Option::take)?;
        self.order.retain(|entry| *entry != id);
        self.free.push(id.0);
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.order.clear();
        self.free.clear();
    }
}

impl FromIterator<Loan> for LoanBook {
    fn from_iter<I: IntoIterator<Item = Loan>>(iter: I) -> Self {
        let mut book = LoanBook::new();
        for loan in iter {
            book.add(loan);
        }
        book
    }
}

impl PartialEq for LoanBook {
    fn eq(&self, other: &Self) -> bool {
        self.loans().eq(other.loans())
    }
}

#[derive(Serialize)]
struct LoanBookRef<'a> {
    loans: Vec<&'a Loan>,
}

#[derive(Deserialize)]
struct LoanBookRecord {
    #[serde(default)]
    loans: Vec<Loan>,
}

impl Serialize for LoanBook {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        LoanBookRef {
            loans: self.loans().collect(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LoanBook {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = LoanBookRecord::deserialize(deserializer)?;
        let mut book = LoanBook::new();
        for loan in record.loans {
            if book.contains(&loan) {
                return Err(serde::de::Error::custom(format!(
                    "duplicate loan for `{}`",
                    loan.name()
                )));
            }
            book.add(loan);
        }
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Amount, Money};
    use crate::loan::fields::{Name, Phone};

    fn loan(name: &str) -> Loan {
        Loan::new(
            Name::parse(name).unwrap(),
            Phone::Empty,
            Amount::new(Money::from_cents(1000)),
            Default::default(),
        )
    }

    fn names(book: &LoanBook) -> Vec<String> {
        book.loans().map(|l| l.name().to_string()).collect()
    }

    #[test]
    fn replace_keeps_position() {
        let mut book: LoanBook = ["Alice", "Bob", "Carl"].into_iter().map(loan).collect();
        let bob = book.iter().nth(1).map(|(id, _)| id).unwrap();
        book.replace(bob, loan("Bobby"));
        assert_eq!(names(&book), vec!["Alice", "Bobby", "Carl"]);
    }

    #[test]
    fn ids_survive_removal_of_others() {
        let mut book = LoanBook::new();
        let alice = book.add(loan("Alice"));
        let bob = book.add(loan("Bob"));
        assert!(book.remove(alice).is_some());
        assert_eq!(book.get(bob).map(|l| l.name().as_str()), Some("Bob"));
        assert!(book.get(alice).is_none());
        assert!(book.remove(alice).is_none());
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn removed_slots_are_reused() {
        let mut book = LoanBook::new();
        let keep = book.add(loan("Alice"));
        for _ in 0..1000 {
            let id = book.add(loan("Bob"));
            book.remove(id);
        }
        assert_eq!(book.slots.len(), 2);
        assert_eq!(book.len(), 1);

        let carl = book.add(loan("Carl"));
        assert_ne!(carl, keep);
        assert_eq!(book.slots.len(), 2);
        assert_eq!(names(&book), vec!["Alice", "Carl"]);
    }

    #[test]
    fn duplicate_detection_skips_self() {
        let mut book = LoanBook::new();
        let alice = book.add(loan("Alice"));
        book.add(loan("Bob"));
        assert!(book.contains(&loan("Alice")));
        assert!(!book.contains_other(&loan("Alice"), alice));
        assert!(book.contains_other(&loan("Bob"), alice));
    }

    #[test]
    fn serde_keeps_order_and_rejects_duplicates() {
        let book: LoanBook = ["Carl", "Alice"].into_iter().map(loan).collect();
        let json = serde_json::to_string(&book).unwrap();
        let back: LoanBook = serde_json::from_str(&json).unwrap();
        assert_eq!(names(&back), vec!["Carl", "Alice"]);

        let doubled: LoanBook = ["Carl", "Carl"].into_iter().map(loan).collect();
        let json = serde_json::to_string(&doubled).unwrap();
        assert!(serde_json::from_str::<LoanBook>(&json).is_err());
    }
}
