//! Store Module
//!
//! Backends the gateway forwards commands to. Each backend executes one
//! Redis-style command per call and returns the raw command result.

mod memory;
mod rest;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

pub use memory::MemoryStore;
pub use rest::RestStore;

// == Store Command ==
/// The subset of Redis commands the gateway issues.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCommand {
    Get { key: String },
    Set { key: String, value: String },
    SetEx { key: String, seconds: u64, value: String },
    Del { key: String },
}

impl StoreCommand {
    /// Redis command name.
    pub fn name(&self) -> &'static str {
        match self {
            StoreCommand::Get { .. } => "GET",
            StoreCommand::Set { .. } => "SET",
            StoreCommand::SetEx { .. } => "SETEX",
            StoreCommand::Del { .. } => "DEL",
        }
    }

    pub fn key(&self) -> &str {
        match self {
            StoreCommand::Get { key }
            | StoreCommand::Set { key, .. }
            | StoreCommand::SetEx { key, .. }
            | StoreCommand::Del { key } => key,
        }
    }

    /// Command name followed by its arguments, in wire order.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![self.name().to_string(), self.key().to_string()];
        match self {
            StoreCommand::Get { .. } | StoreCommand::Del { .. } => {}
            StoreCommand::Set { value, .. } => args.push(value.clone()),
            StoreCommand::SetEx { seconds, value, .. } => {
                args.push(seconds.to_string());
                args.push(value.clone());
            }
        }
        args
    }
}

// == KvStore Trait ==
/// A key-value store reachable by the gateway.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Short backend name for logs and health output.
    fn name(&self) -> &'static str;

    /// Runs one command and returns its result, `None` for a null reply.
    async fn execute(&self, command: StoreCommand) -> Result<Option<Value>, StoreError>;
}
