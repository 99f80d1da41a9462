#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} table already exists")]
    TableAlreadyExists(String),

    #[error("{0} table not found")]
    TableNotFound(String),

    #[error("entity must serialize to an object")]
    EntityInvalidObjectType,

    #[error("unknown column `{column}` in table {table}")]
    UnknownColumn { table: String, column: String },

    #[error("missing required column `{column}` in table {table}")]
    MissingRequiredColumn { table: String, column: String },

    #[error("column `{column}` in table {table} expects a {expected} value")]
    InvalidColumnType {
        table: String,
        column: String,
        expected: crate::ColumnDataType,
    },

    #[error("invalid identifier `{0}`")]
    InvalidIdentifier(String),

    #[cfg(feature = "pg")]
    #[error("sqlx `{0}`")]
    Sqlx(#[from] sqlx::Error),

    #[error("serde_json `{0}`")]
    SerdeJson(#[from] serde_json::Error),

    #[error("{0}")]
    Any(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
