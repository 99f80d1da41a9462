use std::fmt;

use migrex_store::{Client, ColumnDefinition, TableDefinition};
use serde::{Deserialize, Serialize};

use crate::error::{MigrateError, Result};

/// One attempt at applying a migration file, successful or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationHistoryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub file_name: String,
    pub hash: String,
    pub success: bool,
    #[serde(default)]
    pub failure_reason: Option<String>,
}

impl MigrationHistoryRecord {
    pub fn applied(file_name: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            id: None,
            file_name: file_name.into(),
            hash: hash.into(),
            success: true,
            failure_reason: None,
        }
    }

    pub fn failed(
        file_name: impl Into<String>,
        hash: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            file_name: file_name.into(),
            hash: hash.into(),
            success: false,
            failure_reason: Some(reason.into()),
        }
    }
}

impl fmt::Display for MigrationHistoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (hash: {}, success: {}",
            self.file_name, self.hash, self.success
        )?;

        if let Some(reason) = self.failure_reason.as_deref().filter(|r| !r.is_empty()) {
            write!(f, ", reason: {reason}")?;
        }

        f.write_str(")")
    }
}

/// Fixed schema of the history table.
pub fn history_table_definition() -> TableDefinition {
    TableDefinition::new()
        .column("id", ColumnDefinition::number().primary_key())
        .column("file_name", ColumnDefinition::string().required())
        .column("hash", ColumnDefinition::string().required())
        .column("success", ColumnDefinition::boolean().required())
        .column("failure_reason", ColumnDefinition::string())
        .index_by(["file_name", "hash"])
}

/// Creates the history table, or fails with
/// [`MigrateError::HistoryTableAlreadyExists`] when it is already there.
///
/// The shape of an existing table is not checked.
pub async fn ensure_history_table(client: &Client, table: &str) -> Result<()> {
    if client.is_table_exists(table).await? {
        return Err(MigrateError::HistoryTableAlreadyExists(table.to_owned()));
    }

    client
        .create_table(table, &history_table_definition())
        .await?;

    Ok(())
}

pub async fn load_history(client: &Client, table: &str) -> Result<Vec<MigrationHistoryRecord>> {
    Ok(client.find_all(table).await?)
}

pub async fn save_history(
    client: &Client,
    table: &str,
    record: &MigrationHistoryRecord,
) -> Result<MigrationHistoryRecord> {
    Ok(client.save(table, record).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use migrex_store::MemoryClient;

    #[tokio::test]
    async fn ensure_history_table_once() {
        let client = MemoryClient::new();

        ensure_history_table(&client, "migration_history")
            .await
            .unwrap();

        let err = ensure_history_table(&client, "migration_history")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            MigrateError::HistoryTableAlreadyExists(table) if table == "migration_history"
        ));
    }

    #[tokio::test]
    async fn save_assigns_identity() {
        let client = MemoryClient::new();
        ensure_history_table(&client, "history").await.unwrap();

        let saved = save_history(
            &client,
            "history",
            &MigrationHistoryRecord::failed("0001.json", "abc", "boom"),
        )
        .await
        .unwrap();

        assert_eq!(saved.id, Some(1));
        assert_eq!(saved.failure_reason.as_deref(), Some("boom"));
        assert_eq!(load_history(&client, "history").await.unwrap(), vec![saved]);
    }
}
