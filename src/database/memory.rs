use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::gateway::{Gateway, Record, Table};
use crate::database::manager::DatabaseError;
use crate::filter::Filter;

/// In-process gateway used when no database is configured, and by tests.
///
/// Mirrors the Postgres contract: generated keys, primary-key uniqueness and
/// `None` for a missing row.
#[derive(Default)]
pub struct MemoryGateway {
    tables: RwLock<HashMap<Table, Vec<Record>>>,
    failure: RwLock<Option<String>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with `message` until cleared with `None`.
    pub async fn fail_with(&self, message: Option<&str>) {
        *self.failure.write().await = message.map(str::to_string);
    }

    /// Stores a row as-is, bypassing key generation and uniqueness checks.
    pub async fn seed(&self, table: Table, record: Record) {
        self.tables.write().await.entry(table).or_default().push(record);
    }

    pub async fn rows(&self, table: Table) -> Vec<Record> {
        self.tables.read().await.get(&table).cloned().unwrap_or_default()
    }

    async fn check_failure(&self) -> Result<(), DatabaseError> {
        match self.failure.read().await.as_ref() {
            Some(message) => Err(DatabaseError::QueryError(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn insert(&self, table: Table, mut record: Record) -> Result<Record, DatabaseError> {
        self.check_failure().await?;

        let key_column = table.key_column();
        let key = match record.get(key_column) {
            Some(Value::Null) | None if table.generates_key() => {
                let id = Value::String(Uuid::new_v4().to_string());
                record.insert(key_column.to_string(), id.clone());
                id
            }
            Some(Value::Null) | None => {
                return Err(DatabaseError::InvalidRecord(format!(
                    "null value in column \"{}\" of relation \"{}\"",
                    key_column,
                    table.name()
                )))
            }
            Some(value) => value.clone(),
        };

        let mut tables = self.tables.write().await;
        let rows = tables.entry(table).or_default();
        if rows.iter().any(|row| row.get(key_column) == Some(&key)) {
            return Err(DatabaseError::Conflict {
                table: table.name(),
                key: key.to_string(),
            });
        }
        rows.push(record.clone());
        Ok(record)
    }

    async fn select_first(&self, filter: Filter) -> Result<Option<Record>, DatabaseError> {
        self.check_failure().await?;

        let tables = self.tables.read().await;
        Ok(tables
            .get(&filter.table())
            .and_then(|rows| rows.iter().find(|row| filter.matches(row)))
            .cloned())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.check_failure().await
    }

    async fn close(&self) {
        self.tables.write().await.clear();
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn generates_key_for_chat_rooms() {
        let gateway = MemoryGateway::new();
        let row = gateway
            .insert(Table::ChatRooms, record(json!({"name": "General"})))
            .await
            .unwrap();

        let id = row["id"].as_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
        assert_eq!(gateway.rows(Table::ChatRooms).await.len(), 1);
    }

    #[tokio::test]
    async fn requires_caller_key_for_tasks() {
        let gateway = MemoryGateway::new();
        let err = gateway
            .insert(Table::Tasks, record(json!({"status": "pending"})))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidRecord(_)));
    }

    #[tokio::test]
    async fn users_are_never_given_generated_keys() {
        let gateway = MemoryGateway::new();
        let err = gateway
            .insert(Table::Users, record(json!({"username": "alice"})))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidRecord(_)));
        assert!(gateway.rows(Table::Users).await.is_empty());
    }

    #[tokio::test]
    async fn duplicate_keys_conflict() {
        let gateway = MemoryGateway::new();
        let msg = record(json!({"id": "m-1", "content": "hi"}));
        gateway.insert(Table::Messages, msg.clone()).await.unwrap();

        let err = gateway.insert(Table::Messages, msg).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict { table: "messages", .. }));
        assert_eq!(gateway.rows(Table::Messages).await.len(), 1);
    }

    #[tokio::test]
    async fn select_first_returns_none_when_absent() {
        let gateway = MemoryGateway::new();
        gateway
            .seed(Table::Users, record(json!({"id": "u-1", "username": "alice"})))
            .await;

        let hit = Filter::new(Table::Users).where_eq("username", "alice").unwrap();
        assert!(gateway.select_first(hit).await.unwrap().is_some());

        let miss = Filter::new(Table::Users).where_eq("username", "bob").unwrap();
        assert!(gateway.select_first(miss).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn failure_mode_applies_until_cleared() {
        let gateway = MemoryGateway::new();
        gateway.fail_with(Some("connection reset")).await;
        let err = gateway.ping().await.unwrap_err();
        assert_eq!(err.to_string(), "Query error: connection reset");

        gateway.fail_with(None).await;
        assert!(gateway.ping().await.is_ok());
    }
}
