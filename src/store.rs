//! Persistence for [`Message`]s.
//!
//! Handlers only see the [`MessageStore`] trait; `main` constructs a
//! [`mysql::MysqlStore`] and hands it to the router, tests hand in a
//! [`memory::MemoryStore`] instead.

#[cfg(test)]
pub mod memory;
pub mod mysql;

use std::future::Future;

use diesel_async::pooled_connection::deadpool::{BuildError, PoolError};
use thiserror::Error;

use crate::model::{Message, NewMessage};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not build connection pool: {0}")]
    Build(#[from] BuildError),

    #[error("could not get a database connection: {0}")]
    Connection(#[from] PoolError),

    #[error("query failed: {0}")]
    Query(#[from] diesel::result::Error),
}

pub trait MessageStore: Clone + Send + Sync + 'static {
    /// Creates the message table if it is missing. Safe to run on every start.
    fn ensure_schema(&self) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Persists one row and returns it with its generated id.
    fn insert(&self, message: NewMessage)
        -> impl Future<Output = Result<Message, StoreError>> + Send;

    fn find(&self, id: u64) -> impl Future<Output = Result<Option<Message>, StoreError>> + Send;
}
