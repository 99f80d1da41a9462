use std::{collections::HashMap, fmt, future::Future, path::Path, sync::Arc};

use async_trait::async_trait;
use migrex_store::{Client, StoreError};

pub const UNKNOWN_REASON: &str = "Unknown reason";

/// Why a migration unit did not complete.
#[derive(Debug)]
pub enum Failure {
    Error(anyhow::Error),
    Message(String),
    Unknown,
}

impl Failure {
    /// Human readable reason recorded in the history table.
    pub fn reason(&self) -> String {
        match self {
            Failure::Error(err) => err.to_string(),
            Failure::Message(message) => message.to_owned(),
            Failure::Unknown => UNKNOWN_REASON.to_owned(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason())
    }
}

impl From<anyhow::Error> for Failure {
    fn from(value: anyhow::Error) -> Self {
        Failure::Error(value)
    }
}

impl From<StoreError> for Failure {
    fn from(value: StoreError) -> Self {
        Failure::Error(value.into())
    }
}

impl From<std::io::Error> for Failure {
    fn from(value: std::io::Error) -> Self {
        Failure::Error(value.into())
    }
}

impl From<serde_json::Error> for Failure {
    fn from(value: serde_json::Error) -> Self {
        Failure::Error(value.into())
    }
}

impl From<String> for Failure {
    fn from(value: String) -> Self {
        Failure::Message(value)
    }
}

impl From<&str> for Failure {
    fn from(value: &str) -> Self {
        Failure::Message(value.to_owned())
    }
}

/// A single executable migration.
#[async_trait]
pub trait Migration: Send + Sync {
    async fn run(&self, client: &Client) -> Result<(), Failure>;
}

#[async_trait]
impl<F, Fut> Migration for F
where
    F: Fn(Client) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), Failure>> + Send + 'static,
{
    async fn run(&self, client: &Client) -> Result<(), Failure> {
        (self)(client.clone()).await
    }
}

/// Turns a migration file path into something that can be run.
///
/// A resolution failure counts as a failed attempt of that file.
#[async_trait]
pub trait MigrationResolver: Send + Sync {
    async fn resolve(&self, path: &Path) -> Result<Arc<dyn Migration>, Failure>;
}

/// Compiled migrations keyed by file name.
#[derive(Clone, Default)]
pub struct Registry {
    migrations: HashMap<String, Arc<dyn Migration>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<M: Migration + 'static>(
        mut self,
        file_name: impl Into<String>,
        migration: M,
    ) -> Self {
        self.migrations.insert(file_name.into(), Arc::new(migration));
        self
    }
}

#[async_trait]
impl MigrationResolver for Registry {
    async fn resolve(&self, path: &Path) -> Result<Arc<dyn Migration>, Failure> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        match self.migrations.get(&file_name) {
            Some(migration) => Ok(migration.clone()),
            _ => Err(Failure::Message(format!(
                "no migration registered for {file_name}"
            ))),
        }
    }
}
