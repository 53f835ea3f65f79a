pub mod json_backend;

use crate::errors::StorageError;
use crate::loan::LoanBook;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Abstraction over where the loan book is persisted.
pub trait LoanBookStorage: Send + Sync {
    /// Writes a full snapshot of the book.
    fn save(&self, book: &LoanBook) -> Result<()>;

    /// Reads the last snapshot; `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<LoanBook>>;
}

pub use json_backend::JsonStorage;
