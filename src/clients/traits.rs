use crate::clients::error::ClientError;
use crate::clients::types::RoomFilter;
use crate::models::{
    Booking, BookingStats, BookingStatus, CancelledBooking, CreatedBooking, InitializeRoomsData,
    OccupancySummary, RandomOccupancy, ResetResult, Room,
};
use async_trait::async_trait;

/// Everything the view controller needs from the reservation service.
/// The HTTP clients implement this; tests substitute an in-memory backend.
#[async_trait]
pub trait ReservationBackend: Send + Sync {
    async fn initialize_rooms(&self) -> Result<InitializeRoomsData, ClientError>;

    async fn list_rooms(&self, filter: &RoomFilter) -> Result<Vec<Room>, ClientError>;

    async fn occupancy_summary(&self) -> Result<OccupancySummary, ClientError>;

    async fn list_bookings(
        &self,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, ClientError>;

    async fn create_booking(&self, number_of_rooms: u32) -> Result<CreatedBooking, ClientError>;

    async fn cancel_booking(&self, reference: &str) -> Result<CancelledBooking, ClientError>;

    async fn generate_random_occupancy(
        &self,
        percentage: u32,
    ) -> Result<RandomOccupancy, ClientError>;

    async fn reset_bookings(&self) -> Result<ResetResult, ClientError>;

    async fn booking_stats(&self) -> Result<BookingStats, ClientError>;
}
