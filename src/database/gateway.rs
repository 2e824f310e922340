use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::database::manager::DatabaseError;
use crate::filter::Filter;

/// A flat row as it crosses the gateway: column name to JSON value.
pub type Record = Map<String, Value>;

/// The four tables this service touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    ChatRooms,
    Messages,
    Tasks,
    Users,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::ChatRooms => "chat_rooms",
            Table::Messages => "messages",
            Table::Tasks => "tasks",
            Table::Users => "users",
        }
    }

    /// Primary key column. Caller-supplied keys double as idempotency keys.
    pub fn key_column(&self) -> &'static str {
        match self {
            Table::Tasks => "task_id",
            _ => "id",
        }
    }

    /// Whether the store generates the key when the record omits it.
    pub fn generates_key(&self) -> bool {
        matches!(self, Table::ChatRooms)
    }
}

/// Shared abstraction over the relational store used by every handler.
///
/// Implementations are created once per process and shared behind an `Arc`;
/// they must be safe for concurrent use by in-flight requests.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Inserts one row and returns it as stored, generated columns included.
    async fn insert(&self, table: Table, record: Record) -> Result<Record, DatabaseError>;

    /// First row matching the filter. `Ok(None)` is the not-found state.
    async fn select_first(&self, filter: Filter) -> Result<Option<Record>, DatabaseError>;

    /// Round-trips to the store without touching any table.
    async fn ping(&self) -> Result<(), DatabaseError>;

    /// Releases connections. Called once on shutdown.
    async fn close(&self);

    fn backend(&self) -> &'static str;
}
