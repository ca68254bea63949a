//! Terminal front end for the hotel room reservation API.
//!
//! The server owns room allocation and persistence; this crate only
//! decodes its replies, keeps a local copy of rooms, bookings and
//! occupancy, and runs user actions against it.

pub mod clients;
pub mod config;
pub mod controller;
pub mod models;
pub mod render;

pub use clients::{BookingClient, ClientError, HotelApi, ReservationBackend, RoomClient};
pub use config::Config;
pub use controller::{ActionOutcome, ViewController, ViewState};
