//! Plain-text views of the controller state.

use crate::controller::selectors::{self, RoomStatus};
use crate::controller::ViewState;
use crate::models::{Booking, BookingStats, FloorOccupancy, OccupancySummary, Room};
use std::fmt::Write;

const BOOKED_MARK: char = '#';
const AVAILABLE_MARK: char = '.';

/// Full dashboard: notices, occupancy, floor map and bookings
pub fn dashboard(state: &ViewState) -> String {
    let mut out = String::new();

    if let Some(text) = state.success_text() {
        let _ = writeln!(out, "[ok] {}", text);
    }
    if let Some(text) = state.error_text() {
        let _ = writeln!(out, "[error] {}", text);
    }

    match &state.occupancy {
        Some(summary) => out.push_str(&occupancy(summary)),
        None => out.push_str("Occupancy: unavailable\n"),
    }

    out.push('\n');
    out.push_str(&floor_map(&state.rooms, state.occupancy.as_ref()));
    out.push('\n');
    out.push_str(&bookings(&state.bookings));

    if state.show_booking_details {
        if let Some(booking) = &state.selected_booking {
            out.push('\n');
            out.push_str(&booking_details(booking));
        }
    }

    out
}

pub fn occupancy(summary: &OccupancySummary) -> String {
    let overall = &summary.overall;
    format!(
        "Occupancy: {}/{} rooms booked, {} available ({:.1}%)\n",
        overall.booked_rooms,
        overall.total_rooms,
        overall.available_rooms,
        percent(overall.occupancy_rate)
    )
}

/// One line per floor, top floor first, with a strip of room marks
pub fn floor_map(rooms: &[Room], summary: Option<&OccupancySummary>) -> String {
    let mut out = String::new();
    let floors = selectors::floors(rooms);
    if floors.is_empty() {
        out.push_str("No rooms loaded\n");
        return out;
    }

    for floor in floors.into_iter().rev() {
        let mut on_floor = selectors::rooms_by_floor(rooms, floor);
        on_floor.sort_by_key(|room| room.position);
        let strip: String = on_floor.iter().map(|room| room_mark(room)).collect();
        let free = selectors::free_rooms_by_floor(rooms, floor).len();

        let _ = write!(out, "Floor {:>2} | {} | {:>2} free", floor, strip, free);
        if let Some(stats) = summary.and_then(|s| s.floor(floor)) {
            let _ = write!(out, " {}", floor_rate(stats));
        }
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "          {} {}  {} {}",
        BOOKED_MARK,
        RoomStatus::Booked,
        AVAILABLE_MARK,
        RoomStatus::Available
    );
    out
}

pub fn bookings(bookings: &[Booking]) -> String {
    if bookings.is_empty() {
        return "No bookings\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<16} {:<10} {:>5} {:>7}  {}",
        "REFERENCE", "STATUS", "ROOMS", "TRAVEL", "ROOM NUMBERS"
    );
    for booking in bookings {
        let _ = writeln!(
            out,
            "{:<16} {:<10} {:>5} {:>7}  {}",
            booking.booking_reference,
            booking.status,
            booking.number_of_rooms,
            booking.total_travel_time,
            join(&booking.room_numbers)
        );
    }
    out
}

pub fn booking_details(booking: &Booking) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Booking {}", booking.booking_reference);
    let _ = writeln!(out, "  status:       {}", booking.status);
    let _ = writeln!(out, "  rooms:        {}", join(&booking.room_numbers));
    let _ = writeln!(out, "  floors:       {}", join(&booking.floors));
    let _ = writeln!(out, "  travel time:  {}", booking.total_travel_time);
    if let Some(metadata) = &booking.metadata {
        let _ = writeln!(out, "  strategy:     {}", metadata.booking_strategy);
        let _ = writeln!(out, "  horizontal:   {}", metadata.horizontal_distance);
        let _ = writeln!(out, "  vertical:     {}", metadata.vertical_distance);
    }
    let _ = writeln!(out, "  created:      {}", booking.created_at.to_rfc3339());
    if let Some(updated) = booking.updated_at {
        let _ = writeln!(out, "  updated:      {}", updated.to_rfc3339());
    }
    out
}

pub fn room(room: &Room) -> String {
    let mut out = format!(
        "Room {} (floor {}, position {}): {}",
        room.room_number,
        room.floor,
        room.position,
        selectors::room_status(room)
    );
    if let Some(booking_id) = &room.booking_id {
        let _ = write!(out, ", booking {}", booking_id);
    }
    out.push('\n');
    out
}

pub fn rooms(rooms: &[Room]) -> String {
    let mut out = format!("{} rooms\n", rooms.len());
    for r in rooms {
        out.push_str(&room(r));
    }
    out
}

pub fn stats(stats: &BookingStats) -> String {
    let mut out = String::new();
    let b = &stats.bookings;
    let _ = write!(
        out,
        "Bookings: {} total, {} active, {} cancelled",
        b.total, b.active, b.cancelled
    );
    if let Some(completed) = b.completed {
        let _ = write!(out, ", {} completed", completed);
    }
    out.push('\n');
    let r = &stats.rooms;
    let _ = writeln!(
        out,
        "Rooms:    {} total, {} booked, {} available ({:.1}%)",
        r.total,
        r.booked,
        r.available,
        percent(r.occupancy_rate)
    );
    out
}

fn room_mark(room: &Room) -> char {
    match selectors::room_status(room) {
        RoomStatus::Booked => BOOKED_MARK,
        RoomStatus::Available => AVAILABLE_MARK,
    }
}

fn floor_rate(stats: &FloorOccupancy) -> String {
    format!("({:.0}%)", percent(stats.occupancy_rate))
}

/// Occupancy rates are fractions of total rooms
fn percent(rate: f64) -> f64 {
    rate * 100.0
}

fn join(values: &[u32]) -> String {
    values
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingStatus, OverallOccupancy};
    use chrono::Utc;

    fn room(number: u32, floor: u32, position: u32, is_booked: bool) -> Room {
        Room {
            id: format!("r{}", number),
            room_number: number,
            floor,
            position,
            is_booked,
            booking_id: is_booked.then(|| "b1".to_string()),
            booked_at: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn floor_map_marks_booked_rooms_by_position() {
        let rooms = vec![
            room(103, 1, 3, false),
            room(101, 1, 1, true),
            room(102, 1, 2, false),
            room(201, 2, 1, true),
        ];
        let map = floor_map(&rooms, None);
        let lines: Vec<&str> = map.lines().collect();
        assert_eq!(lines[0], "Floor  2 | # |  0 free");
        assert_eq!(lines[1], "Floor  1 | #.. |  2 free");
    }

    #[test]
    fn floor_map_includes_floor_rate() {
        let rooms = vec![room(101, 1, 1, true), room(102, 1, 2, false)];
        let summary = OccupancySummary {
            overall: OverallOccupancy {
                total_rooms: 2,
                booked_rooms: 1,
                available_rooms: 1,
                occupancy_rate: 0.5,
            },
            floor_wise: vec![FloorOccupancy {
                floor: 1,
                total_rooms: 2,
                booked_rooms: 1,
                available_rooms: 1,
                occupancy_rate: 0.5,
            }],
        };
        assert!(floor_map(&rooms, Some(&summary)).starts_with("Floor  1 | #. |  1 free (50%)"));
        assert_eq!(
            occupancy(&summary),
            "Occupancy: 1/2 rooms booked, 1 available (50.0%)\n"
        );
    }

    #[test]
    fn rates_are_always_fractions() {
        let summary = OccupancySummary {
            overall: OverallOccupancy {
                total_rooms: 100,
                booked_rooms: 1,
                available_rooms: 99,
                occupancy_rate: 0.01,
            },
            floor_wise: vec![],
        };
        assert_eq!(
            occupancy(&summary),
            "Occupancy: 1/100 rooms booked, 99 available (1.0%)\n"
        );
        assert_eq!(percent(1.0), 100.0);
        assert_eq!(percent(0.0), 0.0);
    }

    #[test]
    fn dashboard_shows_notices_and_empty_states() {
        let mut state = ViewState::default();
        state.success = Some(crate::controller::Notice {
            seq: 1,
            text: "Booking created successfully! Reference: BK-1".into(),
        });
        let text = dashboard(&state);
        assert!(text.starts_with("[ok] Booking created successfully! Reference: BK-1\n"));
        assert!(text.contains("Occupancy: unavailable"));
        assert!(text.contains("No rooms loaded"));
        assert!(text.contains("No bookings"));
    }

    #[test]
    fn booking_details_include_strategy() {
        let booking = Booking {
            id: "1".into(),
            booking_reference: "BK-9".into(),
            room_numbers: vec![101, 102],
            room_ids: vec!["a".into(), "b".into()],
            number_of_rooms: 2,
            total_travel_time: 1.0,
            floors: vec![1],
            status: BookingStatus::Active,
            metadata: Some(crate::models::BookingMetadata {
                horizontal_distance: 1.0,
                vertical_distance: 0.0,
                booking_strategy: "same-floor".into(),
            }),
            created_at: Utc::now(),
            updated_at: None,
        };
        let text = booking_details(&booking);
        assert!(text.contains("rooms:        101, 102"));
        assert!(text.contains("strategy:     same-floor"));
        assert!(bookings(&[booking]).contains("BK-9"));
    }
}
