//! Money, amounts and the transaction history behind each loan.

pub mod amount;
pub mod money;
pub mod transaction;

pub use amount::Amount;
pub use money::{Money, MAX_AMOUNT};
pub use transaction::Transaction;
