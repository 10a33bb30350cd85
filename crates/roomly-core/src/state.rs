//! Store state and its transitions.
//!
//! Every store action is `begin` → backend call → `complete_*`. The
//! transitions are plain methods on [`RoomState`] so interleavings of
//! concurrent actions can be replayed without any I/O.

use std::collections::HashMap;

use crate::backend::BackendResult;
use crate::models::{Reservation, Room};
use crate::store::{StoreError, StoreOperation};

/// Handle for one in-flight action.
///
/// Ids grow monotonically per store, so a ticket with a smaller id was
/// issued earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    pub id: u64,
    pub operation: StoreOperation,
}

/// Outcome of a store action.
#[derive(Debug, Clone)]
pub struct ActionResult<T> {
    pub ticket: RequestTicket,
    /// A newer request of the same operation was already applied
    pub stale: bool,
    pub outcome: Result<T, StoreError>,
}

impl<T> ActionResult<T> {
    pub const fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn ok(self) -> Option<T> {
        self.outcome.ok()
    }

    pub fn into_result(self) -> Result<T, StoreError> {
        self.outcome
    }
}

impl<T: Default> ActionResult<T> {
    /// The value, or an empty one when the action failed.
    pub fn value_or_default(self) -> T {
        self.outcome.unwrap_or_default()
    }
}

/// Everything the store holds.
#[derive(Debug, Clone, Default)]
pub struct RoomState {
    /// Rooms from the last applied fetch
    pub rooms: Vec<Room>,
    /// Reservations created during this session, in creation order
    pub reservations: Vec<Reservation>,
    /// Last failure; successes never clear it
    pub error: Option<StoreError>,
    /// Bumped once per successful reservation
    pub refresh_trigger: u64,
    next_request_id: u64,
    in_flight: Vec<RequestTicket>,
    last_applied: HashMap<StoreOperation, u64>,
}

impl RoomState {
    /// True while any action is outstanding.
    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn is_loading_operation(&self, operation: StoreOperation) -> bool {
        self.in_flight
            .iter()
            .any(|ticket| ticket.operation == operation)
    }

    pub fn in_flight(&self) -> &[RequestTicket] {
        &self.in_flight
    }

    /// Start an action.
    pub fn begin(&mut self, operation: StoreOperation) -> RequestTicket {
        self.next_request_id += 1;
        let ticket = RequestTicket {
            id: self.next_request_id,
            operation,
        };
        self.in_flight.push(ticket);
        ticket
    }

    /// Release `ticket` and report whether a newer request of the same
    /// operation was already applied.
    fn finish(&mut self, ticket: RequestTicket) -> bool {
        self.in_flight.retain(|outstanding| *outstanding != ticket);
        self.last_applied
            .get(&ticket.operation)
            .is_some_and(|&applied| applied > ticket.id)
    }

    /// Only called for successful results.
    fn mark_applied(&mut self, ticket: RequestTicket) {
        self.last_applied.insert(ticket.operation, ticket.id);
    }

    fn record_failure(&mut self, operation: StoreOperation, error: StoreError) -> StoreError {
        tracing::error!(
            operation = ?operation,
            kind = ?error.kind(),
            cause = %error.source,
            "{}",
            operation.failure_message()
        );
        self.error = Some(error.clone());
        error
    }

    fn complete<T>(
        &mut self,
        ticket: RequestTicket,
        result: BackendResult<T>,
        apply: impl FnOnce(&mut Self, &T, bool),
    ) -> ActionResult<T> {
        let stale = self.finish(ticket);
        let outcome = match result {
            Ok(value) => {
                if !stale {
                    self.mark_applied(ticket);
                }
                apply(self, &value, stale);
                Ok(value)
            }
            Err(source) => Err(self.record_failure(
                ticket.operation,
                StoreError::new(ticket.operation, source),
            )),
        };
        ActionResult {
            ticket,
            stale,
            outcome,
        }
    }

    /// Apply a rooms fetch. A stale result never replaces newer rooms.
    pub fn complete_fetch_rooms(
        &mut self,
        ticket: RequestTicket,
        result: BackendResult<Vec<Room>>,
    ) -> ActionResult<()> {
        let completed = self.complete(ticket, result, |state, rooms, stale| {
            if stale {
                tracing::warn!(request = ticket.id, "Discarding stale rooms fetch");
            } else {
                state.rooms.clone_from(rooms);
            }
        });
        ActionResult {
            ticket: completed.ticket,
            stale: completed.stale,
            outcome: completed.outcome.map(|_| ()),
        }
    }

    /// Apply a reservation insert. Created records are always kept.
    pub fn complete_create_reservation(
        &mut self,
        ticket: RequestTicket,
        result: BackendResult<Reservation>,
    ) -> ActionResult<Reservation> {
        self.complete(ticket, result, |state, reservation, _| {
            state.reservations.push(reservation.clone());
            state.refresh_trigger += 1;
        })
    }

    /// Finish a read-only query; only a failure touches state.
    pub fn complete_query<T>(
        &mut self,
        ticket: RequestTicket,
        result: BackendResult<T>,
    ) -> ActionResult<T> {
        self.complete(ticket, result, |_, _, _| {})
    }
}
