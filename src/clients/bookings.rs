use crate::clients::error::ClientError;
use crate::clients::http::ApiClient;
use crate::models::{
    ApiResponse, BookingDetail, BookingList, BookingStats, BookingStatus, CancelledBooking,
    CreatedBooking, RandomOccupancy, ResetResult,
};
use serde_json::json;
use std::ops::RangeInclusive;

/// Rooms a single booking may hold
pub const ROOMS_PER_BOOKING: RangeInclusive<u32> = 1..=5;

/// Client for the `{base}/bookings` endpoints
#[derive(Debug, Clone)]
pub struct BookingClient {
    api: ApiClient,
}

impl BookingClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Book `number_of_rooms` rooms; the server picks which ones
    pub async fn create_booking(
        &self,
        number_of_rooms: u32,
    ) -> Result<ApiResponse<CreatedBooking>, ClientError> {
        if !ROOMS_PER_BOOKING.contains(&number_of_rooms) {
            return Err(ClientError::Validation(format!(
                "numberOfRooms must be between {} and {}, got {}",
                ROOMS_PER_BOOKING.start(),
                ROOMS_PER_BOOKING.end(),
                number_of_rooms
            )));
        }

        self.api
            .post("bookings", json!({ "numberOfRooms": number_of_rooms }))
            .await
    }

    /// List bookings, optionally only those in `status`
    pub async fn get_all_bookings(
        &self,
        status: Option<BookingStatus>,
    ) -> Result<ApiResponse<BookingList>, ClientError> {
        let path = match status {
            Some(status) => format!("bookings/{}", status),
            None => "bookings/".to_string(),
        };
        self.api.get(&path, &[]).await
    }

    pub async fn get_booking_by_reference(
        &self,
        reference: &str,
    ) -> Result<ApiResponse<BookingDetail>, ClientError> {
        self.api
            .get(&format!("bookings/{}", validate_reference(reference)?), &[])
            .await
    }

    pub async fn cancel_booking(
        &self,
        reference: &str,
    ) -> Result<ApiResponse<CancelledBooking>, ClientError> {
        self.api
            .delete(&format!("bookings/{}", validate_reference(reference)?))
            .await
    }

    /// Have the server book roughly `percentage` percent of all rooms
    pub async fn generate_random_occupancy(
        &self,
        percentage: u32,
    ) -> Result<ApiResponse<RandomOccupancy>, ClientError> {
        if percentage > 100 {
            return Err(ClientError::Validation(format!(
                "percentage must be between 0 and 100, got {}",
                percentage
            )));
        }

        self.api
            .post("bookings/random-occupancy", json!({ "percentage": percentage }))
            .await
    }

    pub async fn reset_bookings(&self) -> Result<ApiResponse<ResetResult>, ClientError> {
        self.api.post("bookings/reset", json!({})).await
    }

    pub async fn get_booking_stats(&self) -> Result<ApiResponse<BookingStats>, ClientError> {
        self.api.get("bookings/stats", &[]).await
    }
}

/// References are used as a path segment, so dot segments are refused too
fn validate_reference(reference: &str) -> Result<&str, ClientError> {
    let reference = reference.trim();
    let dot_segment = reference.chars().all(|c| c == '.');
    if reference.is_empty() || dot_segment || reference.contains(['/', '?', '#', '\\', '%']) {
        return Err(ClientError::Validation(format!(
            "invalid booking reference '{}'",
            reference
        )));
    }
    Ok(reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn client() -> BookingClient {
        // Nothing listens here; validation must fail before any request.
        let api = ApiClient::new("http://127.0.0.1:9", Duration::from_millis(50)).unwrap();
        BookingClient::new(api)
    }

    #[tokio::test]
    async fn out_of_range_room_counts_are_rejected_locally() {
        for n in [0, 6, 100] {
            let err = client().create_booking(n).await.unwrap_err();
            assert!(matches!(err, ClientError::Validation(_)), "{n}: {err:?}");
        }
    }

    #[tokio::test]
    async fn percentage_over_100_is_rejected_locally() {
        let err = client().generate_random_occupancy(101).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[test]
    fn references_must_be_a_single_path_segment() {
        assert_eq!(validate_reference(" BK-1 ").unwrap(), "BK-1");
        assert!(validate_reference("").is_err());
        assert!(validate_reference("a/b").is_err());
        assert!(validate_reference("stats?x").is_err());
    }

    #[test]
    fn dot_segments_are_not_references() {
        assert!(validate_reference(".").is_err());
        assert!(validate_reference("..").is_err());
        assert!(validate_reference(" .. ").is_err());
        assert!(validate_reference("a\\..").is_err());
        assert!(validate_reference("%2e%2e").is_err());
        assert_eq!(validate_reference("BK.1").unwrap(), "BK.1");
    }

    #[tokio::test]
    async fn cancel_with_dot_reference_makes_no_request() {
        for reference in [".", ".."] {
            let err = client().cancel_booking(reference).await.unwrap_err();
            assert!(matches!(err, ClientError::Validation(_)), "{reference}: {err:?}");
        }
    }
}
