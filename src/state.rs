use std::sync::Arc;

use crate::config::Config;
use crate::remote::TableClient;

/// Shared by every request. Stores are built per request on top of `client`.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn TableClient>,
    pub config: Config,
}

impl AppState {
    pub fn new(client: Arc<dyn TableClient>, config: Config) -> Self {
        Self { client, config }
    }
}
