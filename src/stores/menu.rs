use chrono::Utc;
use std::sync::Arc;

use super::{Mutation, Snapshot};
use crate::models::menu::TABLE;
use crate::models::{MenuItem, MenuItemUpdate, NewMenuItem};
use crate::remote::{self, Direction, Select, TableClient};

/// Which rows a menu store fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuScope {
    /// Only items guests can order
    Public,
    /// Every item, so unavailable ones can be switched back on
    Admin,
}

/// Menu items sorted by category
pub struct MenuStore {
    client: Arc<dyn TableClient>,
    scope: MenuScope,
    snapshot: Snapshot<MenuItem>,
}

impl MenuStore {
    pub fn new(client: Arc<dyn TableClient>, scope: MenuScope) -> Self {
        Self {
            client,
            scope,
            snapshot: Snapshot::default(),
        }
    }

    pub async fn load(client: Arc<dyn TableClient>, scope: MenuScope) -> Self {
        let mut store = Self::new(client, scope);
        store.refetch().await;
        store
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.snapshot.items
    }

    pub fn find(&self, id: &str) -> Option<&MenuItem> {
        self.snapshot.items.iter().find(|item| item.id == id)
    }

    pub fn snapshot(&self) -> &Snapshot<MenuItem> {
        &self.snapshot
    }

    pub fn loading(&self) -> bool {
        self.snapshot.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.snapshot.error.as_deref()
    }

    fn query(&self) -> Select {
        let select = match self.scope {
            MenuScope::Public => Select::all().eq("is_available", true),
            MenuScope::Admin => Select::all(),
        };
        select.order("category", Direction::Ascending)
    }

    pub async fn refetch(&mut self) {
        self.snapshot.loading = true;
        match remote::fetch(self.client.as_ref(), TABLE, &self.query()).await {
            Ok(rows) => self.snapshot.replace(rows),
            Err(e) => {
                self.snapshot.record(e, "fetch menu items");
            }
        }
        self.snapshot.loading = false;
    }

    pub async fn create(&mut self, item: NewMenuItem) -> Mutation<MenuItem> {
        self.snapshot.loading = true;
        let result = remote::insert_row::<MenuItem, _>(self.client.as_ref(), TABLE, &item).await;

        let outcome = match result {
            Ok(created) => {
                tracing::info!("Menu item {} ({}) created", created.name, created.id);
                self.refetch().await;
                Ok(created)
            }
            Err(e) => Err(self.snapshot.record(e, "create menu item")),
        };
        self.snapshot.loading = false;
        outcome
    }

    pub async fn update(&mut self, id: &str, mut changes: MenuItemUpdate) -> Mutation<MenuItem> {
        self.snapshot.loading = true;
        changes.updated_at = Some(Utc::now());
        let result =
            remote::update_row::<MenuItem, _>(self.client.as_ref(), TABLE, id, &changes).await;

        let outcome = match result {
            Ok(updated) => {
                tracing::debug!("Menu item {} updated", updated.id);
                self.refetch().await;
                Ok(updated)
            }
            Err(e) => Err(self.snapshot.record(e, "update menu item")),
        };
        self.snapshot.loading = false;
        outcome
    }

    pub async fn delete(&mut self, id: &str) -> Mutation<()> {
        self.snapshot.loading = true;
        let outcome = match self.client.delete(TABLE, id).await {
            Ok(()) => {
                tracing::info!("Menu item {} deleted", id);
                self.refetch().await;
                Ok(())
            }
            Err(e) => Err(self.snapshot.record(e, "delete menu item")),
        };
        self.snapshot.loading = false;
        outcome
    }
}
