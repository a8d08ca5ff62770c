use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use tokio::sync::Mutex;

use super::{RemoteError, Select, TableClient};
use crate::models::{gallery, menu, reservation};

#[derive(Default)]
struct MemoryState {
    tables: HashMap<String, Vec<Value>>,
    defaults: HashMap<String, Map<String, Value>>,
    failure: Option<String>,
}

/// In-process tables with the same contract as the hosted service.
/// Used by tests and local previews.
#[derive(Default)]
pub struct MemoryTables {
    state: Mutex<MemoryState>,
}

impl MemoryTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tables with the column defaults of the restaurant schema
    pub fn restaurant() -> Self {
        Self::new()
            .with_defaults(reservation::TABLE, json!({ "status": "pending" }))
            .with_defaults(
                menu::TABLE,
                json!({
                    "image_url": null,
                    "is_vegetarian": false,
                    "is_special": false,
                    "spice_level": 0,
                    "is_available": true
                }),
            )
            .with_defaults(
                gallery::TABLE,
                json!({ "is_featured": false, "display_order": 0 }),
            )
    }

    /// Column values filled in when an inserted row leaves them out
    pub fn with_defaults(mut self, table: &str, defaults: Value) -> Self {
        if let Value::Object(map) = defaults {
            self.state
                .get_mut()
                .defaults
                .insert(table.to_string(), map);
        }
        self
    }

    /// Insert rows directly, applying defaults. Returns the stored rows.
    pub async fn seed(&self, table: &str, rows: Vec<Value>) -> Vec<Value> {
        let mut state = self.state.lock().await;
        let mut stored = Vec::with_capacity(rows.len());
        for row in rows {
            if let Value::Object(fields) = row {
                let row = state.complete_row(table, fields);
                state
                    .tables
                    .entry(table.to_string())
                    .or_default()
                    .push(row.clone());
                stored.push(row);
            }
        }
        stored
    }

    /// Current rows of a table in insertion order
    pub async fn rows(&self, table: &str) -> Vec<Value> {
        let state = self.state.lock().await;
        state.tables.get(table).cloned().unwrap_or_default()
    }

    /// Make every following call fail with this message until `recover`
    pub async fn fail_with(&self, message: impl Into<String>) {
        self.state.lock().await.failure = Some(message.into());
    }

    pub async fn recover(&self) {
        self.state.lock().await.failure = None;
    }
}

impl MemoryState {
    fn check(&self) -> Result<(), RemoteError> {
        match &self.failure {
            Some(message) => Err(RemoteError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }

    fn complete_row(&self, table: &str, mut fields: Map<String, Value>) -> Value {
        let now = Value::String(Utc::now().to_rfc3339());
        fields
            .entry("id")
            .or_insert_with(|| Value::String(uuid::Uuid::now_v7().to_string()));
        fields.entry("created_at").or_insert_with(|| now.clone());
        fields.entry("updated_at").or_insert(now);
        if let Some(defaults) = self.defaults.get(table) {
            for (column, value) in defaults {
                fields.entry(column.clone()).or_insert_with(|| value.clone());
            }
        }
        Value::Object(fields)
    }

    fn find_mut(&mut self, table: &str, id: &str) -> Option<&mut Value> {
        self.tables
            .get_mut(table)?
            .iter_mut()
            .find(|row| row.get("id").and_then(Value::as_str) == Some(id))
    }
}

#[async_trait]
impl TableClient for MemoryTables {
    async fn select(&self, table: &str, query: &Select) -> Result<Vec<Value>, RemoteError> {
        let state = self.state.lock().await;
        state.check()?;

        let mut rows: Vec<Value> = state
            .tables
            .get(table)
            .map(|rows| rows.iter().filter(|r| query.matches(r)).cloned().collect())
            .unwrap_or_default();
        query.sort(&mut rows);
        Ok(rows)
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Value, RemoteError> {
        let mut state = self.state.lock().await;
        state.check()?;

        let Value::Object(fields) = row else {
            return Err(RemoteError::Api {
                status: 400,
                message: "Row must be a JSON object".into(),
            });
        };
        let row = state.complete_row(table, fields);
        state
            .tables
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        Ok(row)
    }

    async fn update(&self, table: &str, id: &str, patch: Value) -> Result<Value, RemoteError> {
        let mut state = self.state.lock().await;
        state.check()?;

        let Value::Object(changes) = patch else {
            return Err(RemoteError::Api {
                status: 400,
                message: "Patch must be a JSON object".into(),
            });
        };
        let row = state
            .find_mut(table, id)
            .ok_or_else(|| RemoteError::NoRows {
                table: table.to_string(),
            })?;
        if let Value::Object(fields) = &mut *row {
            fields.extend(changes);
        }
        Ok(row.clone())
    }

    async fn delete(&self, table: &str, id: &str) -> Result<(), RemoteError> {
        let mut state = self.state.lock().await;
        state.check()?;

        if let Some(rows) = state.tables.get_mut(table) {
            rows.retain(|row| row.get("id").and_then(Value::as_str) != Some(id));
        }
        Ok(())
    }
}
