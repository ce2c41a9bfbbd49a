//! Embedded persistent store for the Lodge staff-housing app.
//!
//! The whole database is an in-memory SQLite instance (via
//! [`tokio_rusqlite`]) whose file image is written to a [`BlockStore`] after
//! every mutating statement. On first use the stored image is loaded and
//! migrated to [`LATEST_VERSION`].
//!
//! [`BlockStore`]: lodge_core::BlockStore

mod activity;
mod auth;
mod backup;
mod blocks;
mod encode;
mod engine;
mod record;
mod repo;
mod store;

pub mod error;
pub mod migrate;

pub use activity::ActivityRecorder;
pub use auth::{AuthGateway, Session, hash_password, verify_password};
pub use backup::{backup_key, backup_time};
pub use blocks::{DirBlockStore, MemoryBlockStore};
pub use engine::{Engine, Row, is_mutating};
pub use error::{AuthError, Error, Result};
pub use migrate::{LATEST_VERSION, MIGRATIONS, Migration};
pub use record::{Column, ColumnKind, Fields, Mutable, Record};
pub use repo::Repository;
pub use store::{Store, StoreConfig};

#[cfg(test)]
mod tests;
