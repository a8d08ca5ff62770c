use crate::models::{Reservation, ReservationStatus};
use crate::stores::ReservationStore;

/// Status filter of the reservation list. Applied locally to the fetched rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReservationFilter {
    #[default]
    All,
    Only(ReservationStatus),
}

impl ReservationFilter {
    pub const OPTIONS: [ReservationFilter; 4] = [
        Self::All,
        Self::Only(ReservationStatus::Pending),
        Self::Only(ReservationStatus::Confirmed),
        Self::Only(ReservationStatus::Cancelled),
    ];

    /// Unknown or missing values show everything
    pub fn parse(param: Option<&str>) -> Self {
        match param {
            Some("all") | None => Self::All,
            Some(other) => other
                .parse::<ReservationStatus>()
                .map(Self::Only)
                .unwrap_or(Self::All),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(status) => status.as_str(),
        }
    }

    pub fn matches(self, reservation: &Reservation) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => reservation.status == status,
        }
    }

    pub fn apply(self, reservations: &[Reservation]) -> Vec<&Reservation> {
        reservations.iter().filter(|r| self.matches(r)).collect()
    }
}

#[derive(Debug, Clone)]
pub struct FilterTab {
    pub value: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct ActionButton {
    pub label: &'static str,
    pub status: &'static str,
    pub class: &'static str,
}

#[derive(Debug, Clone)]
pub struct ReservationCard {
    pub id: String,
    pub name: String,
    pub status: &'static str,
    pub status_class: &'static str,
    pub date: String,
    pub time: String,
    pub guests: i32,
    pub email: String,
    pub phone: Option<String>,
    pub special_requests: Option<String>,
    pub actions: Vec<ActionButton>,
}

fn status_class(status: ReservationStatus) -> &'static str {
    match status {
        ReservationStatus::Confirmed => "badge-green",
        ReservationStatus::Cancelled => "badge-red",
        ReservationStatus::Pending => "badge-yellow",
    }
}

impl ReservationCard {
    fn from_reservation(reservation: &Reservation) -> Self {
        let actions = reservation
            .status
            .actions()
            .iter()
            .map(|action| {
                let target = action.target();
                ActionButton {
                    label: action.label(),
                    status: target.as_str(),
                    class: match target {
                        ReservationStatus::Cancelled => "btn-danger",
                        _ => "btn-success",
                    },
                }
            })
            .collect();

        Self {
            id: reservation.id.clone(),
            name: reservation.name.clone(),
            status: reservation.status.as_str(),
            status_class: status_class(reservation.status),
            date: reservation.date.format("%a, %d %b %Y").to_string(),
            time: reservation.time.clone(),
            guests: reservation.guests,
            email: reservation.email.clone(),
            phone: reservation.phone.clone().filter(|p| !p.is_empty()),
            special_requests: reservation
                .special_requests
                .clone()
                .filter(|s| !s.is_empty()),
            actions,
        }
    }
}

/// Everything the reservation manager renders
#[derive(Debug, Clone)]
pub struct ReservationPanel {
    pub filter: &'static str,
    pub tabs: Vec<FilterTab>,
    pub cards: Vec<ReservationCard>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ReservationPanel {
    pub fn build(store: &ReservationStore, filter: ReservationFilter) -> Self {
        let tabs = ReservationFilter::OPTIONS
            .iter()
            .map(|option| FilterTab {
                value: option.as_str(),
                active: *option == filter,
            })
            .collect();

        let cards = filter
            .apply(store.reservations())
            .into_iter()
            .map(ReservationCard::from_reservation)
            .collect();

        Self {
            filter: filter.as_str(),
            tabs,
            cards,
            loading: store.loading(),
            error: store.error().map(str::to_string),
        }
    }
}
