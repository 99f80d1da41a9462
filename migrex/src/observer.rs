/// Points of a run reported to an [`Observer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkpoint<'a> {
    HistoryTableInitialized { table: &'a str },
    HistoryTableAlreadyExists { table: &'a str },
    MigrationAlreadyApplied { file_name: &'a str },
    MigrationApplied { file_name: &'a str },
    MigrationFailed { file_name: &'a str, reason: &'a str },
}

pub trait Observer: Send + Sync {
    fn notify(&self, checkpoint: &Checkpoint<'_>);
}

impl<F> Observer for F
where
    F: Fn(&Checkpoint<'_>) + Send + Sync,
{
    fn notify(&self, checkpoint: &Checkpoint<'_>) {
        (self)(checkpoint)
    }
}

/// Default observer, reports through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn notify(&self, checkpoint: &Checkpoint<'_>) {
        match checkpoint {
            Checkpoint::HistoryTableInitialized { table } => {
                tracing::info!("{table} table has been successfully initialized")
            }
            Checkpoint::HistoryTableAlreadyExists { table } => {
                tracing::info!("{table} table already exists")
            }
            Checkpoint::MigrationAlreadyApplied { file_name } => {
                tracing::info!("Migration {file_name} has been already applied")
            }
            Checkpoint::MigrationApplied { file_name } => {
                tracing::info!("New migration {file_name} has been successfully applied")
            }
            Checkpoint::MigrationFailed { file_name, reason } => {
                tracing::error!(reason = %reason, "Migration {file_name} failed")
            }
        }
    }
}
