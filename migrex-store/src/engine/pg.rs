use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use crate::{
    client::Client,
    engine::{Engine, Row},
    error::{Result, StoreError},
    schema::{ColumnDataType, ColumnDefinition, TableDefinition},
};

const DUPLICATE_TABLE: &str = "42P07";
const UNDEFINED_TABLE: &str = "42P01";

#[derive(Debug, Clone)]
pub struct PgClient {
    pool: PgPool,
}

impl PgClient {
    #[allow(clippy::new_ret_no_self)]
    pub fn new(pool: &PgPool) -> Client {
        Client::new(Self { pool: pool.clone() })
    }
}

/// Quotes `name` after checking it is a plain `[A-Za-z_][A-Za-z0-9_]*` identifier.
fn ident(name: &str) -> Result<String> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if !valid {
        return Err(StoreError::InvalidIdentifier(name.to_owned()));
    }

    Ok(format!("\"{name}\""))
}

fn column_ddl(name: &str, definition: &ColumnDefinition) -> Result<String> {
    let name = ident(name)?;

    if definition.primary_key {
        let data_type = match definition.data_type {
            ColumnDataType::Number => "BIGSERIAL",
            ColumnDataType::String => "TEXT",
            ColumnDataType::Boolean => "BOOLEAN",
        };

        return Ok(format!("{name} {data_type} PRIMARY KEY"));
    }

    let data_type = match definition.data_type {
        ColumnDataType::Number => "BIGINT",
        ColumnDataType::String => "TEXT",
        ColumnDataType::Boolean => "BOOLEAN",
    };

    Ok(match definition.required {
        true => format!("{name} {data_type} NOT NULL"),
        false => format!("{name} {data_type}"),
    })
}

fn map_code(err: sqlx::Error, table: &str) -> StoreError {
    let code = match &err {
        sqlx::Error::Database(db) => db.code().map(|code| code.into_owned()),
        _ => None,
    };

    match code.as_deref() {
        Some(DUPLICATE_TABLE) => StoreError::TableAlreadyExists(table.to_owned()),
        Some(UNDEFINED_TABLE) => StoreError::TableNotFound(table.to_owned()),
        _ => StoreError::Sqlx(err),
    }
}

fn into_row(value: Value) -> Result<Row> {
    match value {
        Value::Object(row) => Ok(row),
        _ => Err(StoreError::EntityInvalidObjectType),
    }
}

#[async_trait]
impl Engine for PgClient {
    async fn create_table(&self, table: &'_ str, definition: &'_ TableDefinition) -> Result<()> {
        let table_ident = ident(table)?;
        let columns = definition
            .columns
            .iter()
            .map(|(name, column)| column_ddl(name, column))
            .collect::<Result<Vec<_>>>()?
            .join(", ");

        let mut tx = self.pool.begin().await?;

        sqlx::query(&format!("CREATE TABLE {table_ident} ({columns})"))
            .execute(&mut *tx)
            .await
            .map_err(|e| map_code(e, table))?;

        if !definition.index_by.is_empty() {
            let index_ident = ident(&format!("{table}_{}_idx", definition.index_by.join("_")))?;
            let index_columns = definition
                .index_by
                .iter()
                .map(|column| ident(column))
                .collect::<Result<Vec<_>>>()?
                .join(", ");

            sqlx::query(&format!(
                "CREATE INDEX {index_ident} ON {table_ident} ({index_columns})"
            ))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn drop_table(&self, table: &'_ str) -> Result<()> {
        let table_ident = ident(table)?;

        sqlx::query(&format!("DROP TABLE {table_ident}"))
            .execute(&self.pool)
            .await
            .map_err(|e| map_code(e, table))?;

        Ok(())
    }

    async fn is_table_exists(&self, table: &'_ str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = current_schema() AND table_name = $1
            )
            "#,
        )
        .bind(table)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_many(&self, table: &'_ str, key: &'_ str, value: &'_ Value) -> Result<Vec<Row>> {
        let table_ident = ident(table)?;
        ident(key)?;

        let rows = sqlx::query_scalar::<_, Value>(&format!(
            "SELECT to_jsonb(t) FROM {table_ident} t WHERE to_jsonb(t) -> $1 = $2"
        ))
        .bind(key)
        .bind(value)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_code(e, table))?;

        rows.into_iter().map(into_row).collect()
    }

    async fn find_all(&self, table: &'_ str) -> Result<Vec<Row>> {
        let table_ident = ident(table)?;

        let rows =
            sqlx::query_scalar::<_, Value>(&format!("SELECT to_jsonb(t) FROM {table_ident} t"))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| map_code(e, table))?;

        rows.into_iter().map(into_row).collect()
    }

    async fn save(&self, table: &'_ str, row: Row) -> Result<Row> {
        let table_ident = ident(table)?;
        let row: Row = row.into_iter().filter(|(_, v)| !v.is_null()).collect();

        let query = if row.is_empty() {
            format!("INSERT INTO {table_ident} AS t DEFAULT VALUES RETURNING to_jsonb(t)")
        } else {
            let columns = row
                .keys()
                .map(|column| ident(column))
                .collect::<Result<Vec<_>>>()?
                .join(", ");

            format!(
                r#"
                INSERT INTO {table_ident} AS t ({columns})
                SELECT {columns} FROM jsonb_populate_record(NULL::{table_ident}, $1)
                RETURNING to_jsonb(t)
                "#
            )
        };

        let saved = sqlx::query_scalar::<_, Value>(&query)
            .bind(Value::Object(row))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_code(e, table))?;

        into_row(saved)
    }

    async fn delete(&self, table: &'_ str, key: &'_ str, value: &'_ Value) -> Result<()> {
        let table_ident = ident(table)?;
        ident(key)?;

        sqlx::query(&format!(
            "DELETE FROM {table_ident} t WHERE to_jsonb(t) -> $1 = $2"
        ))
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| map_code(e, table))?;

        Ok(())
    }
}
