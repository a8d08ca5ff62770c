use chrono::NaiveDate;
use serde::Deserialize;

use crate::i18n::Language;
use crate::models::{NewReservation, ReservationStatus};
use crate::stores::ReservationStore;

/// Seatings offered in the time dropdown
pub const TIME_SLOTS: [&str; 12] = [
    "12:00", "12:30", "13:00", "13:30", "14:00", "18:00", "18:30", "19:00", "19:30", "20:00",
    "20:30", "21:00",
];

/// Largest party the dropdown offers; it stands for "9 or more"
pub const MAX_GUESTS: i32 = 9;

const DEFAULT_GUESTS: &str = "2";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Missing required field: {0}")]
    Missing(&'static str),

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Date {0} is in the past")]
    PastDate(NaiveDate),

    #[error("Unknown time slot: {0}")]
    UnknownTime(String),

    #[error("Invalid party size: {0}")]
    InvalidGuests(String),
}

/// Raw values of the public reservation form
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: String,
    pub time: String,
    pub guests: String,
    pub message: String,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            date: String::new(),
            time: String::new(),
            guests: DEFAULT_GUESTS.to_string(),
            message: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// Message shown above the form after a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitStatus {
    pub kind: StatusKind,
    pub message: &'static str,
}

impl SubmitStatus {
    pub fn success(lang: Language) -> Self {
        Self {
            kind: StatusKind::Success,
            message: lang.strings().submit_success,
        }
    }

    pub fn failed(lang: Language) -> Self {
        Self {
            kind: StatusKind::Error,
            message: lang.strings().submit_failed,
        }
    }

    pub fn invalid(lang: Language) -> Self {
        Self {
            kind: StatusKind::Error,
            message: lang.strings().submit_invalid,
        }
    }

    pub fn unexpected(lang: Language) -> Self {
        Self {
            kind: StatusKind::Error,
            message: lang.strings().submit_unexpected,
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == StatusKind::Success
    }
}

/// One `<option>` of a dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::Missing(field));
    }
    Ok(value.to_string())
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

impl ContactForm {
    /// Check the form the way the browser constraints would and build the
    /// insert payload. New reservations always start out pending.
    pub fn validate(&self, today: NaiveDate) -> Result<NewReservation, FormError> {
        let name = required(&self.name, "name")?;
        let email = required(&self.email, "email")?;
        let date = required(&self.date, "date")?;
        let time = required(&self.time, "time")?;
        let guests = required(&self.guests, "guests")?;

        if !looks_like_email(&email) {
            return Err(FormError::InvalidEmail);
        }

        let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|_| FormError::InvalidDate(date.clone()))?;
        if date < today {
            return Err(FormError::PastDate(date));
        }

        if !TIME_SLOTS.contains(&time.as_str()) {
            return Err(FormError::UnknownTime(time));
        }

        let guests = match guests.parse::<i32>() {
            Ok(n) if (1..=MAX_GUESTS).contains(&n) => n,
            _ => return Err(FormError::InvalidGuests(guests)),
        };

        Ok(NewReservation {
            name,
            email,
            phone: optional(&self.phone),
            date,
            time,
            guests,
            special_requests: optional(&self.message),
            status: ReservationStatus::Pending,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validate and create the reservation. Clears the form on success and
    /// leaves every value in place otherwise.
    pub async fn submit(
        &mut self,
        store: &mut ReservationStore,
        lang: Language,
        today: NaiveDate,
    ) -> SubmitStatus {
        let reservation = match self.validate(today) {
            Ok(reservation) => reservation,
            Err(e) => {
                tracing::debug!("Rejected reservation form: {}", e);
                return SubmitStatus::invalid(lang);
            }
        };

        match store.create(reservation).await {
            Ok(_) => {
                self.reset();
                SubmitStatus::success(lang)
            }
            Err(_) => SubmitStatus::failed(lang),
        }
    }

    pub fn time_options(&self) -> Vec<SelectOption> {
        TIME_SLOTS
            .iter()
            .map(|slot| SelectOption {
                value: slot.to_string(),
                label: slot.to_string(),
                selected: self.time == *slot,
            })
            .collect()
    }

    pub fn guest_options(&self, lang: Language) -> Vec<SelectOption> {
        let strings = lang.strings();
        (1..=MAX_GUESTS)
            .map(|n| {
                let label = if n == MAX_GUESTS {
                    strings.nine_plus.to_string()
                } else if n == 1 {
                    format!("{} {}", n, strings.person)
                } else {
                    format!("{} {}", n, strings.people)
                };
                SelectOption {
                    value: n.to_string(),
                    label,
                    selected: self.guests == n.to_string(),
                }
            })
            .collect()
    }
}
