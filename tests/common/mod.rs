#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use loan_book::{
    config::PersistencePolicy, core::LoanBookManager, parser::LoanBookParser,
    storage::JsonStorage,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a fresh directory that is removed when the test binary exits.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Opens a manager on `<base>/loanbook.json`.
pub fn open_manager(base: &PathBuf, features: &[&str], policy: PersistencePolicy) -> LoanBookManager {
    let storage = JsonStorage::new(base.join("loanbook.json"));
    LoanBookManager::open(
        LoanBookParser::new(features.iter().copied()),
        Box::new(storage),
        policy,
    )
    .expect("open loan book")
}

/// Creates an isolated manager with the default policy and no features.
pub fn setup_test_env() -> (LoanBookManager, PathBuf) {
    let base = temp_base();
    let manager = open_manager(&base, &[], PersistencePolicy::default());
    (manager, base)
}

/// Runs each line, panicking on the first rejected command.
pub fn run_all(manager: &mut LoanBookManager, lines: &[&str]) {
    for line in lines {
        if let Err(err) = manager.execute(line) {
            panic!("`{line}` failed: {err}");
        }
    }
}

pub fn displayed_names(manager: &LoanBookManager) -> Vec<String> {
    manager
        .model()
        .filtered_loans()
        .into_iter()
        .map(|loan| loan.name().to_string())
        .collect()
}
