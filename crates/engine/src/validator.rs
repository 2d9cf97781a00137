use std::collections::HashSet;

use serde::Serialize;

use crate::dates::{dates_overlap, format_day};
use crate::model::{CalendarEvent, Reservation};

// ---------------------------------------------------------------------------
// Validation result types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Validate implementation
// ---------------------------------------------------------------------------

/// Check booking data before it reaches the engine, returning errors (the
/// engine would reject or skip the data) and warnings (advisory). Errors are
/// listed before warnings.
///
/// `rooms` is the property inventory when known; room membership checks are
/// skipped without it.
pub fn validate_bookings(
    reservations: &[Reservation],
    events: &[CalendarEvent],
    rooms: Option<&[String]>,
) -> ValidationResult {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    // -----------------------------------------------------------------------
    // Error: duplicate inventory rooms
    // -----------------------------------------------------------------------
    let inventory: Option<HashSet<&str>> = rooms.map(|rooms| {
        let mut seen: HashSet<&str> = HashSet::new();
        for room in rooms {
            if !seen.insert(room.as_str()) {
                errors.push(format!(
                    "Room '{}' is listed twice in the inventory -- occupancy would be miscounted",
                    room
                ));
            }
        }
        seen
    });

    // -----------------------------------------------------------------------
    // Per-reservation checks
    // -----------------------------------------------------------------------
    for r in reservations {
        if r.check_in >= r.check_out {
            errors.push(format!(
                "Reservation for {} in Room {} checks out ({}) on or before check-in ({})",
                r.guest_name,
                r.room_number,
                format_day(r.check_out),
                format_day(r.check_in)
            ));
        }

        if let Some(inv) = &inventory {
            if !inv.contains(r.room_number.as_str()) {
                warnings.push(format!(
                    "Reservation for {} references Room {} which isn't in the inventory",
                    r.guest_name, r.room_number
                ));
            }
        }
    }

    // -----------------------------------------------------------------------
    // Warning: active reservations already double-booked
    // -----------------------------------------------------------------------
    let active: Vec<&Reservation> = reservations
        .iter()
        .filter(|r| r.status.is_active() && r.check_in < r.check_out)
        .collect();
    for (i, a) in active.iter().enumerate() {
        for b in &active[i + 1..] {
            if a.room_number == b.room_number
                && dates_overlap(a.check_in, a.check_out, b.check_in, b.check_out)
            {
                warnings.push(format!(
                    "Room {} is already double-booked: {} and {} overlap",
                    a.room_number, a.guest_name, b.guest_name
                ));
            }
        }
    }

    // -----------------------------------------------------------------------
    // Calendar events
    // -----------------------------------------------------------------------
    for e in events {
        if e.check_in == e.check_out {
            warnings.push(format!(
                "Booking #{} in Room {} checks in and out on {} -- arrival, departure and cleaning will all be scheduled",
                e.id,
                e.room_number,
                format_day(e.check_in)
            ));
        } else if e.check_in > e.check_out {
            errors.push(format!(
                "Booking #{} in Room {} checks out before it checks in",
                e.id, e.room_number
            ));
        }
    }

    ValidationResult { errors, warnings }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
