use std::{path::Path, sync::Arc};

use async_trait::async_trait;
use migrex_store::{Client, TableDefinition};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::migration::{Failure, Migration, MigrationResolver};

/// One operation of a JSON migration script.
///
/// ```json
/// [
///   {
///     "op": "create_table",
///     "table": "users",
///     "definition": { "columns": { "id": { "type": "Number", "primary_key": true } } }
///   },
///   { "op": "save", "table": "users", "entity": { "id": 1 } }
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    CreateTable {
        table: String,
        definition: TableDefinition,
    },
    DropTable {
        table: String,
    },
    Save {
        table: String,
        entity: Value,
    },
    Delete {
        table: String,
        key: String,
        value: Value,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    pub fn parse(bytes: &[u8]) -> Result<Self, Failure> {
        let steps = serde_json::from_slice(bytes)?;

        Ok(Self { steps })
    }
}

#[async_trait]
impl Migration for Script {
    async fn run(&self, client: &Client) -> Result<(), Failure> {
        for step in self.steps.iter() {
            match step {
                Step::CreateTable { table, definition } => {
                    client.create_table(table, definition).await?
                }
                Step::DropTable { table } => client.drop_table(table).await?,
                Step::Save { table, entity } => {
                    client.save(table, entity).await?;
                }
                Step::Delete { table, key, value } => client.delete(table, key, value).await?,
            }
        }

        Ok(())
    }
}

/// Interprets every migration file as a JSON [`Script`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptResolver;

#[async_trait]
impl MigrationResolver for ScriptResolver {
    async fn resolve(&self, path: &Path) -> Result<Arc<dyn Migration>, Failure> {
        let bytes = tokio::fs::read(path).await?;

        Ok(Arc::new(Script::parse(&bytes)?))
    }
}
