// Stores own one snapshot of a remote table each. Every mutation is followed
// by a full refetch so the snapshot always mirrors the service.
pub mod menu;
pub mod reservations;

pub use menu::{MenuScope, MenuStore};
pub use reservations::ReservationStore;

use crate::remote::RemoteError;

/// Outcome of a store mutation. Errors are already reduced to a message.
pub type Mutation<T> = Result<T, String>;

/// Items plus the loading and error flags the pages render from
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

impl<T> Snapshot<T> {
    fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.error = None;
    }

    /// Log the failure and keep its message as the current error
    fn record(&mut self, err: RemoteError, action: &str) -> String {
        tracing::warn!("Failed to {}: {}", action, err);
        let message = err.to_string();
        self.error = Some(message.clone());
        message
    }
}
