pub mod bookings;
pub mod error;
pub mod http;
pub mod rooms;
pub mod traits;
pub mod types;

pub use bookings::BookingClient;
pub use error::ClientError;
pub use http::ApiClient;
pub use rooms::RoomClient;
pub use traits::ReservationBackend;
pub use types::{RetryPolicy, RoomFilter};

use crate::models::{
    Booking, BookingStats, BookingStatus, CancelledBooking, CreatedBooking, InitializeRoomsData,
    OccupancySummary, RandomOccupancy, ResetResult, Room,
};
use async_trait::async_trait;
use std::time::Duration;

/// Both HTTP clients, sharing one connection pool
#[derive(Debug, Clone)]
pub struct HotelApi {
    pub rooms: RoomClient,
    pub bookings: BookingClient,
}

impl HotelApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self::from_api(ApiClient::new(base_url, timeout)?))
    }

    pub fn from_api(api: ApiClient) -> Self {
        Self {
            rooms: RoomClient::new(api.clone()),
            bookings: BookingClient::new(api),
        }
    }
}

#[async_trait]
impl ReservationBackend for HotelApi {
    async fn initialize_rooms(&self) -> Result<InitializeRoomsData, ClientError> {
        Ok(self.rooms.initialize_rooms().await?.data)
    }

    async fn list_rooms(&self, filter: &RoomFilter) -> Result<Vec<Room>, ClientError> {
        Ok(self.rooms.get_all_rooms(filter).await?.data.rooms)
    }

    async fn occupancy_summary(&self) -> Result<OccupancySummary, ClientError> {
        Ok(self.rooms.get_occupancy_summary().await?.data)
    }

    async fn list_bookings(
        &self,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, ClientError> {
        Ok(self.bookings.get_all_bookings(status).await?.data.bookings)
    }

    async fn create_booking(&self, number_of_rooms: u32) -> Result<CreatedBooking, ClientError> {
        Ok(self.bookings.create_booking(number_of_rooms).await?.data)
    }

    async fn cancel_booking(&self, reference: &str) -> Result<CancelledBooking, ClientError> {
        Ok(self.bookings.cancel_booking(reference).await?.data)
    }

    async fn generate_random_occupancy(
        &self,
        percentage: u32,
    ) -> Result<RandomOccupancy, ClientError> {
        Ok(self.bookings.generate_random_occupancy(percentage).await?.data)
    }

    async fn reset_bookings(&self) -> Result<ResetResult, ClientError> {
        Ok(self.bookings.reset_bookings().await?.data)
    }

    async fn booking_stats(&self) -> Result<BookingStats, ClientError> {
        Ok(self.bookings.get_booking_stats().await?.data)
    }
}
