pub mod gallery;
pub mod menu;
pub mod reservation;

pub use gallery::GalleryItem;
pub use menu::{MenuCategory, MenuItem, MenuItemUpdate, NewMenuItem};
pub use reservation::{NewReservation, Reservation, ReservationStatus, StatusAction};
