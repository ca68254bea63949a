//! Pure queries over the cached room list.

use crate::models::Room;
use std::fmt;

/// Display state of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomStatus {
    Booked,
    Available,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Booked => "booked",
            RoomStatus::Available => "available",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn rooms_by_floor(rooms: &[Room], floor: u32) -> Vec<&Room> {
    rooms.iter().filter(|room| room.floor == floor).collect()
}

pub fn free_rooms_by_floor(rooms: &[Room], floor: u32) -> Vec<&Room> {
    rooms
        .iter()
        .filter(|room| room.floor == floor && !room.is_booked)
        .collect()
}

pub fn room_status(room: &Room) -> RoomStatus {
    if room.is_booked {
        RoomStatus::Booked
    } else {
        RoomStatus::Available
    }
}

/// Distinct floors present in `rooms`, lowest first
pub fn floors(rooms: &[Room]) -> Vec<u32> {
    let mut floors: Vec<u32> = rooms.iter().map(|room| room.floor).collect();
    floors.sort_unstable();
    floors.dedup();
    floors
}
