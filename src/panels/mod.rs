// View models for the admin panels. Filtering happens here, on the fetched
// snapshot, never as a query parameter to the service.
pub mod menu;
pub mod reservations;

pub use menu::{MenuFilter, MenuItemForm, MenuPanel};
pub use reservations::{ReservationFilter, ReservationPanel};
