// Reservation rows - pure data and status transitions, no side effects
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const TABLE: &str = "reservations";

/// Lifecycle of a reservation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Submitted through the public form, not yet handled
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

/// A status change the dashboard offers for a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    Confirm,
    Cancel,
    Reconfirm,
}

impl StatusAction {
    /// Status the reservation ends up in after this action
    pub fn target(self) -> ReservationStatus {
        match self {
            Self::Confirm | Self::Reconfirm => ReservationStatus::Confirmed,
            Self::Cancel => ReservationStatus::Cancelled,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Confirm => "Confirm",
            Self::Cancel => "Cancel",
            Self::Reconfirm => "Reconfirm",
        }
    }
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 3] = [Self::Pending, Self::Confirmed, Self::Cancelled];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Single-step transitions offered from this status.
    /// The remote service is the only place a transition could be rejected.
    pub fn actions(self) -> &'static [StatusAction] {
        match self {
            Self::Pending => &[StatusAction::Confirm, StatusAction::Cancel],
            Self::Confirmed => &[StatusAction::Cancel],
            Self::Cancelled => &[StatusAction::Reconfirm],
        }
    }

    pub fn can_become(self, next: ReservationStatus) -> bool {
        self.actions().iter().any(|a| a.target() == next)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown reservation status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for ReservationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub date: NaiveDate,
    pub time: String,
    pub guests: i32,
    #[serde(default)]
    pub special_requests: Option<String>,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload. Identity and timestamps come from the service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReservation {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub date: NaiveDate,
    pub time: String,
    pub guests: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    pub status: ReservationStatus,
}

/// Partial update sent for a status change
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub status: ReservationStatus,
    pub updated_at: DateTime<Utc>,
}
