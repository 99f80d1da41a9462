use async_trait::async_trait;
use dyn_clone::DynClone;
use serde_json::{Map, Value};

use crate::{error::Result, schema::TableDefinition};

#[cfg(feature = "memory")]
mod memory;
#[cfg(feature = "pg")]
mod pg;

#[cfg(feature = "memory")]
pub use memory::*;
#[cfg(feature = "pg")]
pub use pg::*;

/// A stored row, keyed by column name.
pub type Row = Map<String, Value>;

#[async_trait]
pub trait Engine: DynClone + Send + Sync {
    async fn create_table(&self, table: &'_ str, definition: &'_ TableDefinition) -> Result<()>;

    async fn drop_table(&self, table: &'_ str) -> Result<()>;

    async fn is_table_exists(&self, table: &'_ str) -> Result<bool>;

    async fn find_many(&self, table: &'_ str, key: &'_ str, value: &'_ Value) -> Result<Vec<Row>>;

    async fn find_all(&self, table: &'_ str) -> Result<Vec<Row>>;

    /// Inserts `row` and returns it as stored, store-assigned identity included.
    async fn save(&self, table: &'_ str, row: Row) -> Result<Row>;

    async fn delete(&self, table: &'_ str, key: &'_ str, value: &'_ Value) -> Result<()>;
}

dyn_clone::clone_trait_object!(Engine);
