use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::{collections::HashMap, sync::Arc};

use crate::{
    client::Client,
    engine::{Engine, Row},
    error::{Result, StoreError},
    schema::{ColumnDataType, TableDefinition},
};

#[derive(Debug, Clone)]
struct MemoryTable {
    definition: TableDefinition,
    rows: Vec<Row>,
    next_id: i64,
}

impl MemoryTable {
    fn check_column(&self, table: &str, column: &str) -> Result<()> {
        if self.definition.get(column).is_none() {
            return Err(StoreError::UnknownColumn {
                table: table.to_owned(),
                column: column.to_owned(),
            });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Memory(Arc<RwLock<HashMap<String, MemoryTable>>>);

pub struct MemoryClient;

impl MemoryClient {
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> Client {
        Client::new(Memory::default())
    }

    pub fn with_engine(engine: &Memory) -> Client {
        Client::new(engine.clone())
    }
}

#[async_trait]
impl Engine for Memory {
    async fn create_table(&self, table: &'_ str, definition: &'_ TableDefinition) -> Result<()> {
        let mut tables = self.0.write();

        if tables.contains_key(table) {
            return Err(StoreError::TableAlreadyExists(table.to_owned()));
        }

        tables.insert(
            table.to_owned(),
            MemoryTable {
                definition: definition.clone(),
                rows: Vec::new(),
                next_id: 1,
            },
        );

        Ok(())
    }

    async fn drop_table(&self, table: &'_ str) -> Result<()> {
        match self.0.write().remove(table) {
            Some(_) => Ok(()),
            _ => Err(StoreError::TableNotFound(table.to_owned())),
        }
    }

    async fn is_table_exists(&self, table: &'_ str) -> Result<bool> {
        Ok(self.0.read().contains_key(table))
    }

    async fn find_many(&self, table: &'_ str, key: &'_ str, value: &'_ Value) -> Result<Vec<Row>> {
        let tables = self.0.read();
        let Some(data) = tables.get(table) else {
            return Err(StoreError::TableNotFound(table.to_owned()));
        };

        data.check_column(table, key)?;

        Ok(data
            .rows
            .iter()
            .filter(|row| row.get(key) == Some(value))
            .cloned()
            .collect())
    }

    async fn find_all(&self, table: &'_ str) -> Result<Vec<Row>> {
        match self.0.read().get(table) {
            Some(data) => Ok(data.rows.clone()),
            _ => Err(StoreError::TableNotFound(table.to_owned())),
        }
    }

    async fn save(&self, table: &'_ str, row: Row) -> Result<Row> {
        let mut tables = self.0.write();
        let Some(data) = tables.get_mut(table) else {
            return Err(StoreError::TableNotFound(table.to_owned()));
        };

        let mut row: Row = row.into_iter().filter(|(_, v)| !v.is_null()).collect();

        for (column, value) in row.iter() {
            let Some(definition) = data.definition.get(column) else {
                return Err(StoreError::UnknownColumn {
                    table: table.to_owned(),
                    column: column.to_owned(),
                });
            };

            if !definition.data_type.accepts(value) {
                return Err(StoreError::InvalidColumnType {
                    table: table.to_owned(),
                    column: column.to_owned(),
                    expected: definition.data_type,
                });
            }
        }

        for (column, definition) in data.definition.columns.iter() {
            if definition.required && !definition.primary_key && !row.contains_key(column) {
                return Err(StoreError::MissingRequiredColumn {
                    table: table.to_owned(),
                    column: column.to_owned(),
                });
            }
        }

        if let Some((column, definition)) = data.definition.primary_key() {
            if definition.data_type == ColumnDataType::Number {
                match row.get(column).and_then(Value::as_i64) {
                    Some(id) => data.next_id = data.next_id.max(id.saturating_add(1)),
                    _ => {
                        row.insert(column.to_owned(), Value::from(data.next_id));
                        data.next_id = data.next_id.saturating_add(1);
                    }
                }
            }
        }

        data.rows.push(row.clone());

        Ok(row)
    }

    async fn delete(&self, table: &'_ str, key: &'_ str, value: &'_ Value) -> Result<()> {
        let mut tables = self.0.write();
        let Some(data) = tables.get_mut(table) else {
            return Err(StoreError::TableNotFound(table.to_owned()));
        };

        data.check_column(table, key)?;
        data.rows.retain(|row| row.get(key) != Some(value));

        Ok(())
    }
}
