use crate::controller::selectors;
use crate::models::{Booking, OccupancySummary, Room};

/// Where the controller is in its current action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// A transient message. `seq` identifies it to its own expiry timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub seq: u64,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// The three data slices a refresh reloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    Rooms,
    Bookings,
    Occupancy,
}

/// Generation that last wrote each slice
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SliceGenerations {
    rooms: u64,
    bookings: u64,
    occupancy: u64,
}

impl SliceGenerations {
    /// Record `generation` for `slice` unless a newer refresh already wrote it.
    pub fn accept(&mut self, slice: Slice, generation: u64) -> bool {
        let current = match slice {
            Slice::Rooms => &mut self.rooms,
            Slice::Bookings => &mut self.bookings,
            Slice::Occupancy => &mut self.occupancy,
        };
        if generation < *current {
            return false;
        }
        *current = generation;
        true
    }
}

/// Everything the UI shows, owned by the controller
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub rooms: Vec<Room>,
    pub bookings: Vec<Booking>,
    pub occupancy: Option<OccupancySummary>,

    pub phase: Phase,
    pub in_flight: usize,
    pub error: Option<Notice>,
    pub success: Option<Notice>,

    pub selected_booking: Option<Booking>,
    pub show_booking_details: bool,

    pub generations: SliceGenerations,
    next_generation: u64,
    next_notice: u64,
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn rooms_by_floor(&self, floor: u32) -> Vec<&Room> {
        selectors::rooms_by_floor(&self.rooms, floor)
    }

    pub fn free_rooms_by_floor(&self, floor: u32) -> Vec<&Room> {
        selectors::free_rooms_by_floor(&self.rooms, floor)
    }

    pub fn error_text(&self) -> Option<&str> {
        self.error.as_ref().map(|n| n.text.as_str())
    }

    pub fn success_text(&self) -> Option<&str> {
        self.success.as_ref().map(|n| n.text.as_str())
    }

    pub(crate) fn next_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    pub(crate) fn begin_action(&mut self) {
        self.in_flight += 1;
        self.phase = Phase::Loading;
        self.clear_messages();
    }

    pub(crate) fn end_action(&mut self, succeeded: bool) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.phase = if self.in_flight > 0 {
            Phase::Loading
        } else if succeeded {
            Phase::Success
        } else {
            Phase::Error
        };
    }

    /// Input refused before any request; the action ends in `Error` at once
    pub(crate) fn reject(&mut self) {
        self.clear_messages();
        if self.in_flight == 0 {
            self.phase = Phase::Error;
        }
    }

    pub(crate) fn clear_messages(&mut self) {
        self.error = None;
        self.success = None;
    }

    pub(crate) fn set_notice(&mut self, kind: NoticeKind, text: String) -> u64 {
        self.next_notice += 1;
        let notice = Some(Notice {
            seq: self.next_notice,
            text,
        });
        match kind {
            NoticeKind::Success => self.success = notice,
            NoticeKind::Error => self.error = notice,
        }
        self.next_notice
    }

    /// Clear the notice only if it is still the one with `seq`
    pub(crate) fn expire_notice(&mut self, kind: NoticeKind, seq: u64) {
        let slot = match kind {
            NoticeKind::Success => &mut self.success,
            NoticeKind::Error => &mut self.error,
        };
        if slot.as_ref().map(|n| n.seq) == Some(seq) {
            *slot = None;
        }
        if self.error.is_none() && self.success.is_none() && self.in_flight == 0 {
            self.phase = Phase::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn older_generation_cannot_overwrite_newer() {
        let mut generations = SliceGenerations::default();
        assert!(generations.accept(Slice::Rooms, 2));
        assert!(!generations.accept(Slice::Rooms, 1));
        assert!(generations.accept(Slice::Bookings, 1));
        assert!(generations.accept(Slice::Rooms, 3));
    }

    #[test]
    fn expiry_ignores_replaced_notices() {
        let mut state = ViewState::default();
        let first = state.set_notice(NoticeKind::Error, "first".into());
        let second = state.set_notice(NoticeKind::Error, "second".into());

        state.expire_notice(NoticeKind::Error, first);
        assert_eq!(state.error_text(), Some("second"));

        state.expire_notice(NoticeKind::Error, second);
        assert!(state.error.is_none());
    }

    #[test]
    fn phase_returns_to_idle_once_messages_expire() {
        let mut state = ViewState::default();
        state.begin_action();
        assert_eq!(state.phase, Phase::Loading);
        assert!(state.is_loading());

        let seq = state.set_notice(NoticeKind::Success, "done".into());
        state.end_action(true);
        assert_eq!(state.phase, Phase::Success);

        state.expire_notice(NoticeKind::Success, seq);
        assert_eq!(state.phase, Phase::Idle);
    }

    #[test]
    fn rejection_moves_to_error_unless_another_action_runs() {
        let mut state = ViewState::default();
        state.phase = Phase::Success;
        state.reject();
        assert_eq!(state.phase, Phase::Error);

        state.begin_action();
        state.reject();
        assert_eq!(state.phase, Phase::Loading);
    }

    #[test]
    fn overlapping_actions_stay_loading() {
        let mut state = ViewState::default();
        state.begin_action();
        state.begin_action();
        state.end_action(false);
        assert_eq!(state.phase, Phase::Loading);
        state.end_action(false);
        assert_eq!(state.phase, Phase::Error);
    }
}
