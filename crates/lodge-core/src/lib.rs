//! Core types and trait definitions for the Lodge staff-housing store.
//!
//! This crate has no database dependencies. It defines the entities the store
//! persists and the [`blocks::BlockStore`] abstraction the store serialises
//! itself into.

pub mod activity;
pub mod blocks;
pub mod employee;
pub mod error;
pub mod maintenance;
pub mod occupancy;
pub mod property;
pub mod user;

pub use blocks::BlockStore;
pub use error::StorageError;

/// Engine-assigned row identifier (SQLite rowid).
pub type RecordId = i64;
