use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while turning command text into a `Command`. The model is
/// never touched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid command format! \n{usage}")]
    InvalidFormat { usage: &'static str },
    #[error("Unknown command")]
    UnknownCommand,
    #[error("This command is currently disabled")]
    CommandDisabled,
    #[error("Multiple values specified for the following single-valued field(s): {0}")]
    DuplicatePrefixes(String),
    #[error("The loan index provided is invalid")]
    InvalidIndex,
    #[error("{0}")]
    InvalidValue(&'static str),
}

/// Ledger rule violations on a single `Amount`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Amount returned should be less than or equal current amount of loan")]
    ExceedsRemaining,
    #[error("Loan amount cannot exceed {0}")]
    ExceedsMaximum(String),
    #[error("The transaction index provided is invalid")]
    InvalidTransactionIndex,
    #[error("Editing this transaction would leave the loan with a negative balance")]
    NegativeBalance,
}

/// Business-rule failures raised while executing a parsed command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("The loan index provided is invalid")]
    InvalidDisplayedIndex,
    #[error("At least one field to edit must be provided.")]
    NotEdited,
    #[error("This loan already exists in the loan book")]
    DuplicateLoan,
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Persistence failures. Permission problems get their own message so the user
/// knows retrying will not help.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Could not save data to file {} due to insufficient permissions to write to the file or the folder.", .0.display())]
    PermissionDenied(PathBuf),
    #[error("Could not save data due to the following error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not read data from file {} due to insufficient permissions to read the file or the folder.", .0.display())]
    ReadPermissionDenied(PathBuf),
    #[error("Could not read data from file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Data file is corrupt: {0}")]
    Corrupt(String),
}

impl StorageError {
    /// Maps an I/O error raised while touching `path`, singling out permission failures.
    pub fn from_io(err: std::io::Error, path: &std::path::Path) -> Self {
        if err.kind() == std::io::ErrorKind::PermissionDenied {
            StorageError::PermissionDenied(path.to_path_buf())
        } else {
            StorageError::Io(err)
        }
    }

    /// Like `from_io`, for failures while reading `path` back in.
    pub fn from_read_io(err: std::io::Error, path: &std::path::Path) -> Self {
        if err.kind() == std::io::ErrorKind::PermissionDenied {
            StorageError::ReadPermissionDenied(path.to_path_buf())
        } else {
            StorageError::Read {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration format error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Engine-level error returned by `LoanBookManager::execute`.
#[derive(Debug, Error)]
pub enum LoanBookError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failures of the interactive shell itself, as opposed to rejected commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LoanBookError),
    #[error("Input error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

impl From<StorageError> for CliError {
    fn from(err: StorageError) -> Self {
        CliError::Core(err.into())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Core(err.into())
    }
}

impl From<LedgerError> for LoanBookError {
    fn from(err: LedgerError) -> Self {
        LoanBookError::Command(CommandError::Ledger(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_denied_has_distinct_message() {
        let path = PathBuf::from("/data/loanbook.json");
        let denied = StorageError::from_io(
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope"),
            &path,
        );
        assert!(matches!(denied, StorageError::PermissionDenied(_)));
        assert!(denied.to_string().contains("insufficient permissions"));
        assert!(denied.to_string().contains("/data/loanbook.json"));

        let other = StorageError::from_io(
            std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            &path,
        );
        assert_eq!(
            other.to_string(),
            "Could not save data due to the following error: disk full"
        );
    }

    #[test]
    fn read_failures_do_not_mention_saving() {
        let path = PathBuf::from("/data/loanbook.json");
        let denied = StorageError::from_read_io(
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope"),
            &path,
        );
        assert!(matches!(denied, StorageError::ReadPermissionDenied(_)));
        assert_eq!(
            denied.to_string(),
            "Could not read data from file /data/loanbook.json due to insufficient permissions to read the file or the folder."
        );

        let other = StorageError::from_read_io(
            std::io::Error::new(std::io::ErrorKind::Other, "bad sector"),
            &path,
        );
        assert_eq!(
            other.to_string(),
            "Could not read data from file /data/loanbook.json: bad sector"
        );
    }

    #[test]
    fn format_error_carries_usage() {
        let err = ParseError::InvalidFormat {
            usage: "delete: Deletes a loan",
        };
        assert_eq!(
            err.to_string(),
            "Invalid command format! \ndelete: Deletes a loan"
        );
    }

    #[test]
    fn ledger_errors_surface_through_command_error() {
        let err = LoanBookError::from(LedgerError::ExceedsRemaining);
        assert!(matches!(
            err,
            LoanBookError::Command(CommandError::Ledger(LedgerError::ExceedsRemaining))
        ));
    }
}
