mod responses;

pub use responses::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single hotel room as reported by the rooms endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub room_number: u32,
    pub floor: u32,
    pub position: u32,
    pub is_booked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booked_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Room {
    /// A booked room must point at the booking that holds it
    pub fn is_consistent(&self) -> bool {
        !self.is_booked || self.booking_id.is_some()
    }
}

/// Lifecycle of a booking
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Active,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Active => "active",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(BookingStatus::Active),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            other => Err(format!("unknown booking status '{}'", other)),
        }
    }
}

/// How the server placed the rooms of a booking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingMetadata {
    pub horizontal_distance: f64,
    pub vertical_distance: f64,
    pub booking_strategy: String,
}

/// A reservation of one or more rooms
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub booking_reference: String,
    pub room_numbers: Vec<u32>,
    pub room_ids: Vec<String>,
    pub number_of_rooms: u32,
    pub total_travel_time: f64,
    pub floors: Vec<u32>,
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BookingMetadata>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// Room numbers, room ids and the declared count must agree
    pub fn is_consistent(&self) -> bool {
        let n = self.number_of_rooms as usize;
        self.room_numbers.len() == n && self.room_ids.len() == n
    }
}

/// Hotel-wide occupancy totals
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OverallOccupancy {
    pub total_rooms: u32,
    pub booked_rooms: u32,
    pub available_rooms: u32,
    pub occupancy_rate: f64,
}

/// Occupancy of a single floor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FloorOccupancy {
    pub floor: u32,
    pub total_rooms: u32,
    pub booked_rooms: u32,
    pub available_rooms: u32,
    pub occupancy_rate: f64,
}

impl FloorOccupancy {
    pub fn is_consistent(&self) -> bool {
        self.booked_rooms + self.available_rooms == self.total_rooms
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OccupancySummary {
    pub overall: OverallOccupancy,
    pub floor_wise: Vec<FloorOccupancy>,
}

impl OccupancySummary {
    pub fn is_consistent(&self) -> bool {
        let overall = &self.overall;
        overall.booked_rooms + overall.available_rooms == overall.total_rooms
            && self.floor_wise.iter().all(FloorOccupancy::is_consistent)
    }

    pub fn floor(&self, floor: u32) -> Option<&FloorOccupancy> {
        self.floor_wise.iter().find(|f| f.floor == floor)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingCounts {
    pub total: u32,
    pub active: u32,
    pub cancelled: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoomCounts {
    pub total: u32,
    pub booked: u32,
    pub available: u32,
    pub occupancy_rate: f64,
}

/// Aggregate numbers from the bookings stats endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingStats {
    pub bookings: BookingCounts,
    pub rooms: RoomCounts,
}

impl BookingStats {
    pub fn is_consistent(&self) -> bool {
        let b = &self.bookings;
        b.total == b.active + b.cancelled + b.completed.unwrap_or(0)
            && self.rooms.booked + self.rooms.available == self.rooms.total
    }
}

/// Envelope every server reply is wrapped in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn booking_json() -> serde_json::Value {
        json!({
            "_id": "65a1",
            "bookingReference": "BK-1001",
            "roomNumbers": [101, 102],
            "roomIds": ["r101", "r102"],
            "numberOfRooms": 2,
            "totalTravelTime": 1,
            "floors": [1],
            "status": "active",
            "metadata": {
                "horizontalDistance": 1,
                "verticalDistance": 0,
                "bookingStrategy": "same-floor"
            },
            "createdAt": "2024-03-01T10:00:00.000Z"
        })
    }

    #[test]
    fn room_accepts_mongo_and_plain_ids() {
        let mongo: Room = serde_json::from_value(json!({
            "_id": "a", "roomNumber": 101, "floor": 1, "position": 1, "isBooked": false
        }))
        .unwrap();
        let plain: Room = serde_json::from_value(json!({
            "id": "a", "roomNumber": 101, "floor": 1, "position": 1, "isBooked": false
        }))
        .unwrap();
        assert_eq!(mongo, plain);
        assert!(mongo.booking_id.is_none());
    }

    #[test]
    fn booked_room_without_booking_id_is_inconsistent() {
        let room: Room = serde_json::from_value(json!({
            "_id": "a", "roomNumber": 101, "floor": 1, "position": 1, "isBooked": true
        }))
        .unwrap();
        assert!(!room.is_consistent());
    }

    #[test]
    fn booking_decodes_with_metadata() {
        let booking: Booking = serde_json::from_value(booking_json()).unwrap();
        assert_eq!(booking.status, BookingStatus::Active);
        assert_eq!(booking.metadata.as_ref().unwrap().booking_strategy, "same-floor");
        assert!(booking.is_consistent());
    }

    #[test]
    fn unknown_booking_status_is_rejected() {
        let mut value = booking_json();
        value["status"] = json!("pending");
        assert!(serde_json::from_value::<Booking>(value).is_err());
    }

    #[test]
    fn booking_with_mismatched_room_lists_is_inconsistent() {
        let mut value = booking_json();
        value["numberOfRooms"] = json!(3);
        let booking: Booking = serde_json::from_value(value).unwrap();
        assert!(!booking.is_consistent());
    }

    #[test]
    fn occupancy_summary_checks_every_floor() {
        let summary: OccupancySummary = serde_json::from_value(json!({
            "overall": {"totalRooms": 20, "bookedRooms": 5, "availableRooms": 15, "occupancyRate": 0.25},
            "floorWise": [
                {"floor": 1, "totalRooms": 10, "bookedRooms": 5, "availableRooms": 5, "occupancyRate": 0.5},
                {"floor": 2, "totalRooms": 10, "bookedRooms": 0, "availableRooms": 9, "occupancyRate": 0.0}
            ]
        }))
        .unwrap();
        assert!(!summary.is_consistent());
        assert_eq!(summary.floor(1).unwrap().booked_rooms, 5);
        assert!(summary.floor(3).is_none());
    }

    #[test]
    fn stats_total_includes_completed_when_present() {
        let stats: BookingStats = serde_json::from_value(json!({
            "bookings": {"total": 6, "active": 3, "cancelled": 2, "completed": 1},
            "rooms": {"total": 97, "booked": 10, "available": 87, "occupancyRate": 0.1031}
        }))
        .unwrap();
        assert!(stats.is_consistent());
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Cancelled".parse::<BookingStatus>(), Ok(BookingStatus::Cancelled));
        assert!("gone".parse::<BookingStatus>().is_err());
    }
}
