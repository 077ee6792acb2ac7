//! Folio Cache - two-tier cache for resume and settings data
//!
//! A client facade keeps a process-local index of entries in front of a
//! gateway that forwards get/set/del to a Redis REST store, so store
//! credentials stay on the server.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod store;
pub mod tasks;

pub use client::{CacheFacade, Lookup, WriteOutcome};
pub use config::Config;
pub use gateway::AppState;
pub use tasks::spawn_cleanup_task;
