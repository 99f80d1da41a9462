use std::{path::Path, sync::Arc};

use migrex_store::Client;

use crate::{
    config::{MigratorConfig, OnApplied},
    error::{MigrateError, Result},
    history::{ensure_history_table, load_history, save_history, MigrationHistoryRecord},
    migration::{Failure, MigrationResolver},
    observer::{Checkpoint, Observer, TracingObserver},
    source::{hash_files, list_file_names, migration_path, sort_file_names, FileHashes},
    validate::{validate_existence, validate_hashes, validate_success},
};

/// History and directory state gathered and validated for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub records: Vec<MigrationHistoryRecord>,
    /// Directory entries in execution order.
    pub file_names: Vec<String>,
    pub hashes: FileHashes,
}

impl Reconciliation {
    pub fn is_applied(&self, file_name: &str) -> bool {
        self.records.iter().any(|r| r.file_name == file_name)
    }
}

pub struct Migrator {
    client: Client,
    resolver: Arc<dyn MigrationResolver>,
    observer: Arc<dyn Observer>,
    config: MigratorConfig,
}

impl Migrator {
    pub fn new<R: MigrationResolver + 'static>(client: Client, resolver: R) -> Self {
        Self {
            client,
            resolver: Arc::new(resolver),
            observer: Arc::new(TracingObserver),
            config: MigratorConfig::default(),
        }
    }

    pub fn config(mut self, config: MigratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn observer<O: Observer + 'static>(mut self, observer: O) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    /// [`Migrator::execute`] against the configured history table.
    pub async fn run(&self, dir: impl AsRef<Path>) -> Result<()> {
        self.execute(&self.config.history_table, dir).await
    }

    /// Bootstraps the history table, reconciles it with `dir` and applies
    /// every new migration file.
    ///
    /// The first failing migration is recorded in the history table before
    /// its [`MigrateError::MigrationExecution`] is returned, later files are
    /// left untouched.
    pub async fn execute(&self, history_table: &str, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();

        match ensure_history_table(&self.client, history_table).await {
            Ok(_) => self.observer.notify(&Checkpoint::HistoryTableInitialized {
                table: history_table,
            }),
            Err(MigrateError::HistoryTableAlreadyExists(_)) => {
                self.observer
                    .notify(&Checkpoint::HistoryTableAlreadyExists {
                        table: history_table,
                    })
            }
            Err(e) => return Err(e),
        };

        let state = self.reconcile(history_table, dir).await?;

        self.execute_migrations(history_table, dir, &state).await
    }

    /// Gathers history, file names and hashes, validating each as soon as it
    /// is available.
    pub async fn reconcile(
        &self,
        history_table: &str,
        dir: impl AsRef<Path>,
    ) -> Result<Reconciliation> {
        let dir = dir.as_ref();

        let records = load_history(&self.client, history_table).await?;
        validate_success(&records)?;

        let mut file_names = list_file_names(dir).await?;
        sort_file_names(&mut file_names)?;
        validate_existence(&records, &file_names)?;

        let hashes = hash_files(dir, &file_names).await?;
        validate_hashes(&records, &hashes)?;

        tracing::debug!(
            records = records.len(),
            files = file_names.len(),
            "{history_table} reconciled with {}",
            dir.display()
        );

        Ok(Reconciliation {
            records,
            file_names,
            hashes,
        })
    }

    async fn execute_migrations(
        &self,
        history_table: &str,
        dir: &Path,
        state: &Reconciliation,
    ) -> Result<()> {
        let files = state
            .file_names
            .iter()
            .filter_map(|file_name| Some((file_name, state.hashes.get(file_name)?)));

        for (file_name, hash) in files {
            if state.is_applied(file_name) {
                self.observer
                    .notify(&Checkpoint::MigrationAlreadyApplied { file_name });

                match self.config.on_applied {
                    OnApplied::Stop => return Ok(()),
                    OnApplied::Skip => continue,
                }
            }

            let failure = match self.resolver.resolve(&migration_path(dir, file_name)).await {
                Ok(migration) => migration.run(&self.client).await.err(),
                Err(failure) => Some(failure),
            };

            // An empty reason is not a failure.
            let reason = failure
                .as_ref()
                .map(Failure::reason)
                .filter(|reason| !reason.is_empty());

            let record = match reason {
                Some(reason) => {
                    self.observer.notify(&Checkpoint::MigrationFailed {
                        file_name,
                        reason: &reason,
                    });

                    MigrationHistoryRecord::failed(file_name, hash, reason)
                }
                _ => {
                    self.observer
                        .notify(&Checkpoint::MigrationApplied { file_name });

                    MigrationHistoryRecord::applied(file_name, hash)
                }
            };

            save_history(&self.client, history_table, &record).await?;

            if let Some(reason) = record.failure_reason {
                return Err(MigrateError::MigrationExecution {
                    file_name: file_name.to_owned(),
                    reason,
                });
            }
        }

        Ok(())
    }
}
