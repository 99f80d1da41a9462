use std::fmt;

use migrex_store::StoreError;

use crate::history::MigrationHistoryRecord;

#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    #[error("{0} table already exists")]
    HistoryTableAlreadyExists(String),

    #[error("{}", Records("unsuccessful migrations exist", .0))]
    UnsuccessfulMigrationsExist(Vec<MigrationHistoryRecord>),

    #[error("{}", Records("unknown migrations found", .0))]
    UnknownMigrations(Vec<MigrationHistoryRecord>),

    #[error("{}", Records("incompatible migrations found", .0))]
    IncompatibleMigrations(Vec<MigrationHistoryRecord>),

    #[error("migration {file_name} failed: {reason}")]
    MigrationExecution { file_name: String, reason: String },

    #[error("store `{0}`")]
    Store(#[from] StoreError),

    #[error("io `{0}`")]
    Io(#[from] std::io::Error),

    #[error("collation `{0}`")]
    Collation(String),
}

pub type Result<T> = std::result::Result<T, MigrateError>;

struct Records<'a>(&'a str, &'a [MigrationHistoryRecord]);

impl fmt::Display for Records<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.0)?;

        for record in self.1 {
            write!(f, "\n  - {record}")?;
        }

        Ok(())
    }
}
