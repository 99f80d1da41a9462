use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    engine::{Engine, Row},
    error::{Result, StoreError},
    schema::TableDefinition,
};

/// Typed facade over an [`Engine`].
///
/// Cloning is cheap enough to hand a client to every migration unit.
#[derive(Clone)]
pub struct Client {
    pub(crate) engine: Box<dyn Engine>,
}

impl Client {
    pub fn new<E: Engine + 'static>(engine: E) -> Self {
        Self {
            engine: Box::new(engine),
        }
    }

    pub async fn create_table(
        &self,
        table: impl AsRef<str>,
        definition: &TableDefinition,
    ) -> Result<()> {
        self.engine.create_table(table.as_ref(), definition).await
    }

    pub async fn drop_table(&self, table: impl AsRef<str>) -> Result<()> {
        self.engine.drop_table(table.as_ref()).await
    }

    pub async fn is_table_exists(&self, table: impl AsRef<str>) -> Result<bool> {
        self.engine.is_table_exists(table.as_ref()).await
    }

    pub async fn find<T: DeserializeOwned, V: Serialize>(
        &self,
        table: impl AsRef<str>,
        key: impl AsRef<str>,
        value: V,
    ) -> Result<Option<T>> {
        let rows = self.find_many::<T, V>(table, key, value).await?;

        Ok(rows.into_iter().next())
    }

    pub async fn find_many<T: DeserializeOwned, V: Serialize>(
        &self,
        table: impl AsRef<str>,
        key: impl AsRef<str>,
        value: V,
    ) -> Result<Vec<T>> {
        let value = serde_json::to_value(value)?;
        let rows = self
            .engine
            .find_many(table.as_ref(), key.as_ref(), &value)
            .await?;

        rows.into_iter().map(from_row).collect()
    }

    pub async fn find_all<T: DeserializeOwned>(&self, table: impl AsRef<str>) -> Result<Vec<T>> {
        let rows = self.engine.find_all(table.as_ref()).await?;

        rows.into_iter().map(from_row).collect()
    }

    pub async fn save<T: Serialize + DeserializeOwned>(
        &self,
        table: impl AsRef<str>,
        entity: &T,
    ) -> Result<T> {
        let row = to_row(entity)?;
        let row = self.engine.save(table.as_ref(), row).await?;

        from_row(row)
    }

    pub async fn delete<V: Serialize>(
        &self,
        table: impl AsRef<str>,
        key: impl AsRef<str>,
        value: V,
    ) -> Result<()> {
        let value = serde_json::to_value(value)?;

        self.engine
            .delete(table.as_ref(), key.as_ref(), &value)
            .await
    }
}

pub fn to_row<T: Serialize>(entity: &T) -> Result<Row> {
    match serde_json::to_value(entity)? {
        Value::Object(row) => Ok(row),
        _ => Err(StoreError::EntityInvalidObjectType),
    }
}

pub fn from_row<T: DeserializeOwned>(row: Row) -> Result<T> {
    Ok(serde_json::from_value(Value::Object(row))?)
}
