#![allow(dead_code)]

use std::{path::Path, sync::Arc};

use migrex::{hash_bytes, Checkpoint, Failure, MigrationHistoryRecord, Observer, Registry};
use migrex_store::Client;
use parking_lot::Mutex;
use tempfile::TempDir;

pub const TABLE: &str = "migration_history";

pub fn migrations_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();

    for (name, content) in files {
        write(dir.path(), name, content);
    }

    dir
}

pub fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

pub fn applied(name: &str, content: &str) -> MigrationHistoryRecord {
    MigrationHistoryRecord::applied(name, hash_bytes(content.as_bytes()))
}

/// Registry whose migrations only log their file name, `failing` ones fail
/// with the given failure.
#[derive(Clone, Default)]
pub struct Runs(Arc<Mutex<Vec<String>>>);

impl Runs {
    pub fn registry(&self, names: &[&str]) -> Registry {
        names.iter().fold(Registry::new(), |registry, name| {
            let runs = self.clone();
            let file_name = name.to_string();

            registry.add(*name, move |_client: Client| {
                let runs = runs.clone();
                let file_name = file_name.clone();

                async move {
                    runs.0.lock().push(file_name);
                    Ok::<_, Failure>(())
                }
            })
        })
    }

    pub fn failing(&self, registry: Registry, name: &str, failure: fn() -> Failure) -> Registry {
        let runs = self.clone();
        let file_name = name.to_owned();

        registry.add(name, move |_client: Client| {
            let runs = runs.clone();
            let file_name = file_name.clone();

            async move {
                runs.0.lock().push(file_name);
                Err::<(), _>(failure())
            }
        })
    }

    pub fn get(&self) -> Vec<String> {
        self.0.lock().clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Initialized(String),
    AlreadyExists(String),
    AlreadyApplied(String),
    Applied(String),
    Failed(String, String),
}

#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Event>>>);

impl Recorder {
    pub fn events(&self) -> Vec<Event> {
        self.0.lock().clone()
    }
}

impl Observer for Recorder {
    fn notify(&self, checkpoint: &Checkpoint<'_>) {
        let event = match *checkpoint {
            Checkpoint::HistoryTableInitialized { table } => Event::Initialized(table.to_owned()),
            Checkpoint::HistoryTableAlreadyExists { table } => {
                Event::AlreadyExists(table.to_owned())
            }
            Checkpoint::MigrationAlreadyApplied { file_name } => {
                Event::AlreadyApplied(file_name.to_owned())
            }
            Checkpoint::MigrationApplied { file_name } => Event::Applied(file_name.to_owned()),
            Checkpoint::MigrationFailed { file_name, reason } => {
                Event::Failed(file_name.to_owned(), reason.to_owned())
            }
        };

        self.0.lock().push(event);
    }
}
