#![doc(test(attr(deny(warnings))))]

//! Loan Book keeps track of money lent to other people: who owes what, how
//! much has come back, and when. Commands are typed as text, parsed into
//! `Command` values and run against an in-memory book that is saved to JSON
//! after every change.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod loan;
pub mod parser;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with `log_filter` (unless `RUST_LOG` is set)
/// and emits a startup log. Later calls are no-ops.
pub fn init(log_filter: &str) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(log_filter);
        tracing::info!("Loan Book tracing initialized.");
    });
}
