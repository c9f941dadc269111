//! Graph engine connection contract.
//!
//! The engine is an external collaborator; the repository needs exactly
//! "acquire", "execute", "release". Release is `Drop`: a connection handed
//! out by [`GraphPool::acquire`] is exclusively owned for one logical
//! operation and goes back to the pool when the box is dropped, so every
//! exit path releases it.

use async_trait::async_trait;
use ladle_query::{Query, Row};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of the engine or the connection itself. Every variant is
/// infrastructure, not domain; the repository surfaces them as a retryable
/// unavailability and never retries internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("connect failed: {0}")]
    Connect(String),
    #[error("query execution failed: {0}")]
    Execute(String),
    #[error("query timed out")]
    Timeout,
    #[error("query cancelled")]
    Cancelled,
}

/// One live engine session.
#[async_trait]
pub trait GraphConnection: Send {
    /// Execute one parameterized query and return all result rows.
    async fn run(&mut self, query: &Query) -> Result<Vec<Row>, GraphError>;
}

/// Hands out exclusively-owned connections.
#[async_trait]
pub trait GraphPool: Send + Sync {
    async fn acquire(&self) -> Result<Box<dyn GraphConnection>, GraphError>;
}

/// Settings for pool implementations. Timeout enforcement belongs to the
/// connection; the repository only propagates the resulting failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    pub host: String,
    pub port: u16,
    /// Per-query time budget the connection should enforce, in milliseconds.
    pub fetch_timeout_ms: u64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 7687,
            fetch_timeout_ms: 30_000,
        }
    }
}
