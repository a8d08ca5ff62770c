use chrono::Utc;
use std::sync::Arc;

use super::{Mutation, Snapshot};
use crate::models::reservation::{StatusUpdate, TABLE};
use crate::models::{NewReservation, Reservation, ReservationStatus};
use crate::remote::{self, Direction, Select, TableClient};

/// Reservations, newest first
pub struct ReservationStore {
    client: Arc<dyn TableClient>,
    snapshot: Snapshot<Reservation>,
}

impl ReservationStore {
    /// Store with an empty snapshot still marked as loading
    pub fn new(client: Arc<dyn TableClient>) -> Self {
        Self {
            client,
            snapshot: Snapshot::default(),
        }
    }

    /// Store with its first fetch already done
    pub async fn load(client: Arc<dyn TableClient>) -> Self {
        let mut store = Self::new(client);
        store.refetch().await;
        store
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.snapshot.items
    }

    pub fn snapshot(&self) -> &Snapshot<Reservation> {
        &self.snapshot
    }

    pub fn loading(&self) -> bool {
        self.snapshot.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.snapshot.error.as_deref()
    }

    fn query() -> Select {
        Select::all().order("created_at", Direction::Descending)
    }

    pub async fn refetch(&mut self) {
        self.snapshot.loading = true;
        match remote::fetch(self.client.as_ref(), TABLE, &Self::query()).await {
            Ok(rows) => self.snapshot.replace(rows),
            Err(e) => {
                self.snapshot.record(e, "fetch reservations");
            }
        }
        self.snapshot.loading = false;
    }

    pub async fn create(&mut self, reservation: NewReservation) -> Mutation<Reservation> {
        self.snapshot.loading = true;
        let result = remote::insert_row::<Reservation, _>(self.client.as_ref(), TABLE, &reservation)
            .await;

        let outcome = match result {
            Ok(created) => {
                tracing::info!(
                    "Reservation {} created for {} guests on {}",
                    created.id,
                    created.guests,
                    created.date
                );
                self.refetch().await;
                Ok(created)
            }
            Err(e) => Err(self.snapshot.record(e, "create reservation")),
        };
        self.snapshot.loading = false;
        outcome
    }

    pub async fn update_status(
        &mut self,
        id: &str,
        status: ReservationStatus,
    ) -> Mutation<Reservation> {
        self.snapshot.loading = true;
        let patch = StatusUpdate {
            status,
            updated_at: Utc::now(),
        };
        let result =
            remote::update_row::<Reservation, _>(self.client.as_ref(), TABLE, id, &patch).await;

        let outcome = match result {
            Ok(updated) => {
                tracing::info!("Reservation {} is now {}", updated.id, updated.status);
                self.refetch().await;
                Ok(updated)
            }
            Err(e) => Err(self.snapshot.record(e, "update reservation status")),
        };
        self.snapshot.loading = false;
        outcome
    }
}
