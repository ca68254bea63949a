//! Typed `data` payloads, one per endpoint.
//!
//! Every field is required unless the backend documents it as optional, so
//! a reply with the wrong shape fails to decode instead of turning into an
//! empty list.

use serde::{Deserialize, Serialize};

use super::{Booking, Room};

/// `POST /rooms/initialize`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InitializeRoomsData {
    pub message: String,
    pub count: u32,
}

/// `GET /rooms`, `GET /rooms/available`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomList {
    pub count: u32,
    pub rooms: Vec<Room>,
}

/// `GET /rooms/floor/{floor}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FloorRooms {
    pub floor: u32,
    pub count: u32,
    pub rooms: Vec<Room>,
}

/// `GET /rooms/{roomNumber}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomDetail {
    pub room: Room,
}

/// `POST /bookings`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatedBooking {
    pub booking: Booking,
    pub message: String,
}

/// `GET /bookings[/{status}]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingList {
    pub count: u32,
    pub bookings: Vec<Booking>,
}

/// `GET /bookings/{reference}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingDetail {
    pub booking: Booking,
}

/// `DELETE /bookings/{reference}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CancelledBooking {
    pub message: String,
    pub booking: Booking,
}

/// `POST /bookings/random-occupancy`
///
/// Only `roomsBooked` is relied on; the rest of the payload is kept as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RandomOccupancy {
    pub rooms_booked: u32,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `POST /bookings/reset`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResetResult {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ApiResponse;
    use serde_json::json;

    #[test]
    fn room_list_without_rooms_is_rejected() {
        let result = serde_json::from_value::<ApiResponse<RoomList>>(json!({
            "success": true,
            "data": {"count": 0},
            "timestamp": "2024-03-01T10:00:00.000Z"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn random_occupancy_keeps_extra_fields() {
        let data: RandomOccupancy = serde_json::from_value(json!({
            "roomsBooked": 42,
            "percentage": 45,
            "message": "done"
        }))
        .unwrap();
        assert_eq!(data.rooms_booked, 42);
        assert_eq!(data.extra.get("percentage"), Some(&json!(45)));
    }
}
