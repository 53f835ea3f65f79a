//! Loans, their validated fields, and the book that holds them.

pub mod book;
pub mod fields;
pub mod index;
#[allow(clippy::module_inception)]
pub mod loan;
pub mod model;

pub use book::{EntryId, LoanBook};
pub use fields::{Name, Phone, Tag};
pub use index::Index;
pub use loan::Loan;
pub use model::{LoanPredicate, Model, SortKey};
