use std::collections::HashSet;

use tracing::{debug, warn};

use crate::config::RoomInventory;
use crate::dates::StayRange;
use crate::error::EngineError;
use crate::model::{AvailabilityQuery, AvailabilityResult, Conflict, ConflictResult, Reservation};

impl Reservation {
    /// The reservation's nights as a validated range.
    pub fn stay(&self) -> Result<StayRange, EngineError> {
        StayRange::new(
            self.check_in,
            self.check_out,
            &format!("Room {} booking for {}", self.room_number, self.guest_name),
        )
    }
}

/// Active existing reservations with usable ranges. Malformed stored rows are
/// logged and skipped rather than failing the whole check.
fn active_stays(existing: &[Reservation]) -> Vec<(&Reservation, StayRange)> {
    existing
        .iter()
        .filter(|r| r.status.is_active())
        .filter_map(|r| match r.stay() {
            Ok(stay) => Some((r, stay)),
            Err(e) => {
                warn!(room = %r.room_number, error = %e, "skipping malformed existing reservation");
                None
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Conflict detection
// ---------------------------------------------------------------------------

/// Report every (new, existing) pair on the same room whose stays overlap.
///
/// Checked-out reservations never block. All pairs are examined; there is no
/// early exit, so a new booking colliding with several stays yields several
/// conflicts. Fails if any new booking has an inverted or empty range.
pub fn detect_conflicts(
    new_bookings: &[Reservation],
    existing: &[Reservation],
) -> Result<ConflictResult, EngineError> {
    let active = active_stays(existing);
    let mut conflicts: Vec<Conflict> = Vec::new();

    for new_booking in new_bookings {
        let new_stay = new_booking.stay()?;
        for (existing_booking, existing_stay) in &active {
            if new_booking.room_number != existing_booking.room_number {
                continue;
            }
            if new_stay.overlaps(existing_stay) {
                conflicts.push(Conflict {
                    new_booking: new_booking.clone(),
                    existing_booking: (*existing_booking).clone(),
                    overlap_days: new_stay.overlap_days(existing_stay),
                });
            }
        }
    }

    debug!(
        new_bookings = new_bookings.len(),
        existing = existing.len(),
        conflicts = conflicts.len(),
        "conflict check complete"
    );

    Ok(ConflictResult {
        has_conflict: !conflicts.is_empty(),
        conflicts,
    })
}

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

/// Occupancy of the property (or of one room) over the query window.
///
/// With a non-blank `room_number` the result describes a one-room inventory. Without
/// it, `available_rooms` and `occupied_rooms` partition `inventory` in
/// inventory order; reservations for rooms outside the inventory are ignored.
pub fn check_availability(
    query: &AvailabilityQuery,
    existing: &[Reservation],
    inventory: &RoomInventory,
) -> Result<AvailabilityResult, EngineError> {
    let window = StayRange::new(query.start_date, query.end_date, "Availability query")?;
    let active = active_stays(existing);

    let requested_room = query.room_number.as_deref().filter(|r| !r.trim().is_empty());
    if let Some(room) = requested_room {
        let is_occupied = active
            .iter()
            .any(|(r, stay)| r.room_number == room && stay.overlaps(&window));
        if !inventory.contains(room) {
            debug!(room = %room, "availability requested for room outside the inventory");
        }
        return Ok(AvailabilityResult {
            available: !is_occupied,
            available_rooms: if is_occupied { vec![] } else { vec![room.to_string()] },
            occupied_rooms: if is_occupied { vec![room.to_string()] } else { vec![] },
            total_rooms: 1,
            occupancy_rate: if is_occupied { 100.0 } else { 0.0 },
        });
    }

    let mut occupied: HashSet<&str> = HashSet::new();
    for (reservation, stay) in &active {
        if stay.overlaps(&window) {
            occupied.insert(reservation.room_number.as_str());
        }
    }

    let (occupied_rooms, available_rooms): (Vec<String>, Vec<String>) = inventory
        .rooms()
        .iter()
        .cloned()
        .partition(|room| occupied.contains(room.as_str()));

    let total_rooms = inventory.len();
    let occupancy_rate = occupied_rooms.len() as f64 / total_rooms as f64 * 100.0;

    debug!(
        total_rooms,
        occupied = occupied_rooms.len(),
        occupancy_rate,
        "availability check complete"
    );

    Ok(AvailabilityResult {
        available: !available_rooms.is_empty(),
        available_rooms,
        occupied_rooms,
        total_rooms,
        occupancy_rate,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
