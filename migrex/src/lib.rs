//! Applies a directory of ordered migration files to a data store exactly
//! once each.
//!
//! Applied state lives in a history table managed through a
//! [`migrex_store::Client`]. Every run reconciles that history against the
//! files on disk before anything new is executed:
//!
//! 1. the history table is created unless it already exists;
//! 2. every recorded attempt must have succeeded;
//! 3. every recorded file must still be in the directory;
//! 4. every recorded hash must match the file's current content.
//!
//! Files without a record are then run in root locale collation order
//! (`1_init` before `10_users` before `2_posts`, `a` before `B`), each
//! attempt producing one history record. The first failure is recorded and
//! ends the run.
//!
//! ```rust,ignore
//! use migrex::{Failure, Migrator, Registry};
//! use migrex_store::MemoryClient;
//!
//! let registry = Registry::new().add("0001_users.sql", |client| async move {
//!     client.create_table("users", &users_definition()).await.map_err(Failure::from)
//! });
//!
//! Migrator::new(MemoryClient::new(), registry)
//!     .execute("migration_history", "./migrations")
//!     .await?;
//! ```

#![forbid(unsafe_code)]

mod config;
mod error;
mod hash;
mod history;
mod migration;
mod migrator;
mod observer;
mod script;
mod source;
mod validate;

pub use config::*;
pub use error::*;
pub use hash::*;
pub use history::*;
pub use migration::*;
pub use migrator::*;
pub use observer::*;
pub use script::*;
pub use source::*;
pub use validate::*;

pub use migrex_store as store;
