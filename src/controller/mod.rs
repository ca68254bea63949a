//! View controller: owns the cached server state and runs user actions.
//!
//! Every action follows the same lifecycle. It clears the notices, marks the
//! view as loading, calls the backend, posts a success or error notice and
//! then reloads rooms, bookings and occupancy. Notices expire on their own
//! after `message_ttl`.

pub mod confirm;
pub mod selectors;
pub mod state;

pub use confirm::{AssumeYes, Confirmation, TerminalPrompt};
pub use selectors::RoomStatus;
pub use state::{Notice, NoticeKind, Phase, Slice, ViewState};

use crate::clients::bookings::ROOMS_PER_BOOKING;
use crate::clients::{ClientError, ReservationBackend, RoomFilter};
use crate::models::{Booking, BookingStats, OccupancySummary, Room};
use parking_lot::Mutex;
use rand::Rng;
use std::future::Future;
use std::ops::Range;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// How long success and error notices stay visible
pub const DEFAULT_MESSAGE_TTL: Duration = Duration::from_secs(5);

/// Occupancy percentages the random generator picks from
pub const RANDOM_OCCUPANCY_RANGE: Range<u32> = 30..80;

pub const ROOM_COUNT_MESSAGE: &str = "Please enter a number between 1 and 5";
pub const RESET_PROMPT: &str = "Are you sure you want to reset all bookings?";
pub const RESET_MESSAGE: &str = "All bookings have been reset";

/// How a user action ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Succeeded,
    /// The backend call failed; the error notice is set
    Failed,
    /// Input was rejected locally; no request was made
    Rejected,
    /// The user declined the confirmation
    Declined,
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ActionOutcome::Succeeded)
    }
}

#[derive(Clone)]
pub struct ViewController {
    backend: Arc<dyn ReservationBackend>,
    confirmation: Arc<dyn Confirmation>,
    state: Arc<Mutex<ViewState>>,
    message_ttl: Duration,
}

impl ViewController {
    pub fn new(
        backend: Arc<dyn ReservationBackend>,
        confirmation: Arc<dyn Confirmation>,
    ) -> Self {
        Self {
            backend,
            confirmation,
            state: Arc::new(Mutex::new(ViewState::default())),
            message_ttl: DEFAULT_MESSAGE_TTL,
        }
    }

    pub fn with_message_ttl(mut self, ttl: Duration) -> Self {
        self.message_ttl = ttl;
        self
    }

    /// Copy of the current state for rendering
    pub fn snapshot(&self) -> ViewState {
        self.state.lock().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().is_loading()
    }

    /// Startup: make sure rooms exist, then load everything
    pub async fn initialize(&self) -> ActionOutcome {
        info!("initializing view");
        self.state.lock().begin_action();

        let succeeded = match self.backend.initialize_rooms().await {
            Ok(data) => {
                info!(count = data.count, "rooms ready: {}", data.message);
                true
            }
            Err(err) => {
                self.show_error(err.user_message());
                false
            }
        };

        self.refresh().await;
        self.finish(succeeded)
    }

    /// Reload rooms, bookings and occupancy concurrently.
    ///
    /// Each load is its own task; a failed load is logged and its slice
    /// keeps its previous value. Results from a refresh that was overtaken
    /// by a newer one are dropped.
    pub async fn refresh(&self) {
        let generation = self.state.lock().next_generation();
        debug!(generation, "refreshing view");

        let backend = self.backend.clone();
        let rooms = self.spawn_load(
            Slice::Rooms,
            generation,
            async move { backend.list_rooms(&RoomFilter::default()).await },
            |state, rooms: Vec<Room>| {
                if let Some(room) = rooms.iter().find(|r| !r.is_consistent()) {
                    warn!(room = room.room_number, "room is booked without a booking id");
                }
                state.rooms = rooms;
            },
        );

        let backend = self.backend.clone();
        let bookings = self.spawn_load(
            Slice::Bookings,
            generation,
            async move { backend.list_bookings(None).await },
            |state, bookings: Vec<Booking>| {
                if let Some(booking) = bookings.iter().find(|b| !b.is_consistent()) {
                    warn!(
                        reference = %booking.booking_reference,
                        "booking room lists do not match its room count"
                    );
                }
                state.bookings = bookings;
            },
        );

        let backend = self.backend.clone();
        let occupancy = self.spawn_load(
            Slice::Occupancy,
            generation,
            async move { backend.occupancy_summary().await },
            |state, summary: OccupancySummary| {
                if !summary.is_consistent() {
                    warn!("occupancy counts do not add up");
                }
                state.occupancy = Some(summary);
            },
        );

        for (slice, handle) in [
            (Slice::Rooms, rooms),
            (Slice::Bookings, bookings),
            (Slice::Occupancy, occupancy),
        ] {
            if let Err(err) = handle.await {
                warn!(?slice, error = %err, "load task did not complete");
            }
        }
    }

    pub async fn create_booking(&self, number_of_rooms: i64) -> ActionOutcome {
        let number_of_rooms = match u32::try_from(number_of_rooms) {
            Ok(n) if ROOMS_PER_BOOKING.contains(&n) => n,
            _ => {
                self.state.lock().reject();
                self.show_error(ROOM_COUNT_MESSAGE.to_string());
                return ActionOutcome::Rejected;
            }
        };

        self.state.lock().begin_action();
        match self.backend.create_booking(number_of_rooms).await {
            Ok(created) => {
                let reference = created.booking.booking_reference;
                info!(%reference, number_of_rooms, "booking created");
                self.show_success(format!(
                    "Booking created successfully! Reference: {}",
                    reference
                ));
                self.refresh().await;
                self.finish(true)
            }
            Err(err) => self.fail(err),
        }
    }

    pub async fn generate_random_occupancy(&self) -> ActionOutcome {
        let percentage = random_percentage();
        self.state.lock().begin_action();

        match self.backend.generate_random_occupancy(percentage).await {
            Ok(result) => {
                info!(percentage, rooms_booked = result.rooms_booked, "random occupancy generated");
                self.show_success(format!(
                    "Random occupancy generated: {} rooms booked",
                    result.rooms_booked
                ));
                self.refresh().await;
                self.finish(true)
            }
            Err(err) => self.fail(err),
        }
    }

    pub async fn reset_bookings(&self) -> ActionOutcome {
        if !self.confirmation.confirm(RESET_PROMPT) {
            info!("reset declined");
            return ActionOutcome::Declined;
        }

        self.state.lock().begin_action();
        match self.backend.reset_bookings().await {
            Ok(result) => {
                info!("{}", result.message);
                self.show_success(RESET_MESSAGE.to_string());
                self.refresh().await;
                self.finish(true)
            }
            Err(err) => self.fail(err),
        }
    }

    pub async fn cancel_booking(&self, reference: &str) -> ActionOutcome {
        self.state.lock().begin_action();

        match self.backend.cancel_booking(reference).await {
            Ok(cancelled) => {
                info!(reference = %cancelled.booking.booking_reference, "booking cancelled");
                {
                    let mut state = self.state.lock();
                    let selected = state
                        .selected_booking
                        .as_ref()
                        .map(|b| b.booking_reference == cancelled.booking.booking_reference);
                    if selected == Some(true) {
                        state.selected_booking = None;
                        state.show_booking_details = false;
                    }
                }
                self.show_success(cancelled.message);
                self.refresh().await;
                self.finish(true)
            }
            Err(err) => self.fail(err),
        }
    }

    /// Fetch aggregate stats; failures are shown as an error notice
    pub async fn booking_stats(&self) -> Result<BookingStats, ClientError> {
        let result = self.backend.booking_stats().await;
        if let Err(err) = &result {
            self.show_error(err.user_message());
        }
        result
    }

    pub fn view_booking_details(&self, booking: Booking) {
        let mut state = self.state.lock();
        state.selected_booking = Some(booking);
        state.show_booking_details = true;
    }

    pub fn close_booking_details(&self) {
        let mut state = self.state.lock();
        state.show_booking_details = false;
        state.selected_booking = None;
    }

    /// Select a cached booking by reference; returns false if it is not cached
    pub fn select_booking(&self, reference: &str) -> bool {
        let booking = self
            .state
            .lock()
            .bookings
            .iter()
            .find(|b| b.booking_reference == reference)
            .cloned();
        match booking {
            Some(booking) => {
                self.view_booking_details(booking);
                true
            }
            None => false,
        }
    }

    pub fn rooms_by_floor(&self, floor: u32) -> Vec<Room> {
        self.state
            .lock()
            .rooms_by_floor(floor)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn free_rooms_by_floor(&self, floor: u32) -> Vec<Room> {
        self.state
            .lock()
            .free_rooms_by_floor(floor)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn room_status(&self, room: &Room) -> RoomStatus {
        selectors::room_status(room)
    }

    fn spawn_load<T, F>(
        &self,
        slice: Slice,
        generation: u64,
        fetch: F,
        apply: impl FnOnce(&mut ViewState, T) + Send + 'static,
    ) -> JoinHandle<()>
    where
        T: Send + 'static,
        F: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        let state = self.state.clone();
        tokio::spawn(async move {
            match fetch.await {
                Ok(value) => {
                    let mut state = state.lock();
                    if state.generations.accept(slice, generation) {
                        apply(&mut *state, value);
                    } else {
                        debug!(?slice, generation, "dropping stale load");
                    }
                }
                Err(err) => {
                    warn!(?slice, error = %err, "failed to load");
                }
            }
        })
    }

    fn fail(&self, err: ClientError) -> ActionOutcome {
        self.show_error(err.user_message());
        self.finish(false);
        ActionOutcome::Failed
    }

    fn finish(&self, succeeded: bool) -> ActionOutcome {
        self.state.lock().end_action(succeeded);
        if succeeded {
            ActionOutcome::Succeeded
        } else {
            ActionOutcome::Failed
        }
    }

    fn show_success(&self, text: String) {
        self.show_notice(NoticeKind::Success, text);
    }

    fn show_error(&self, text: String) {
        warn!(message = %text, "showing error");
        self.show_notice(NoticeKind::Error, text);
    }

    fn show_notice(&self, kind: NoticeKind, text: String) {
        let seq = self.state.lock().set_notice(kind, text);
        let state = self.state.clone();
        let ttl = self.message_ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            state.lock().expire_notice(kind, seq);
        });
    }
}

fn random_percentage() -> u32 {
    rand::thread_rng().gen_range(RANDOM_OCCUPANCY_RANGE)
}
