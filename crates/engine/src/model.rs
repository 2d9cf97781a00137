use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::dates::deserialize_day;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Booking lifecycle as seen by the availability engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Confirmed,
    Pending,
    /// The guest has left; the room is no longer held by this booking.
    CheckedOut,
}

impl ReservationStatus {
    /// Confirmed and pending bookings both block their room.
    pub fn is_active(self) -> bool {
        !matches!(self, ReservationStatus::CheckedOut)
    }
}

/// Kind of staff task produced for a day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    Cleaning,
    GuestArrival,
    GuestDeparture,
}

/// Task urgency. Declaration order is sort order: `High` sorts first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

// ---------------------------------------------------------------------------
// Booking inputs
// ---------------------------------------------------------------------------

/// A booking as supplied to the conflict and availability checks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(default)]
    pub id: Option<i64>,
    pub room_number: String,
    pub guest_name: String,
    #[serde(deserialize_with = "deserialize_day")]
    pub check_in: NaiveDate,
    #[serde(deserialize_with = "deserialize_day")]
    pub check_out: NaiveDate,
    pub status: ReservationStatus,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub source: String,
}

/// A booking as supplied to the daily operations generator. The status
/// vocabulary belongs to the caller and is carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: i64,
    pub room_number: String,
    pub guest_name: String,
    #[serde(deserialize_with = "deserialize_day")]
    pub check_in: NaiveDate,
    #[serde(deserialize_with = "deserialize_day")]
    pub check_out: NaiveDate,
    #[serde(default)]
    pub status: String,
}

// ---------------------------------------------------------------------------
// Conflict / availability output
// ---------------------------------------------------------------------------

/// One new booking colliding with one existing active reservation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub new_booking: Reservation,
    pub existing_booking: Reservation,
    pub overlap_days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConflictResult {
    pub has_conflict: bool,
    pub conflicts: Vec<Conflict>,
}

/// Window to check; `room_number` narrows the check to a single unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    #[serde(deserialize_with = "deserialize_day")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "deserialize_day")]
    pub end_date: NaiveDate,
    #[serde(default)]
    pub room_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResult {
    pub available: bool,
    pub available_rooms: Vec<String>,
    pub occupied_rooms: Vec<String>,
    pub total_rooms: usize,
    /// Percentage in `[0, 100]`.
    pub occupancy_rate: f64,
}

// ---------------------------------------------------------------------------
// Daily operations output
// ---------------------------------------------------------------------------

/// A single staff task derived from exactly one calendar event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyOperation {
    #[serde(rename = "type")]
    pub op_type: OperationType,
    pub room_number: String,
    pub guest_name: String,
    pub booking_id: i64,
    pub priority: Priority,
    /// Local hotel time on the target day.
    pub scheduled_for: NaiveDateTime,
    pub description: String,
}

/// Display-ready rendering of a `DailyOperation`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FormattedTask {
    pub title: String,
    pub description: String,
    pub priority: String,
    /// 12-hour clock, e.g. `02:00 PM`.
    pub due_time: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeCounts {
    pub cleaning: usize,
    pub guest_arrival: usize,
    pub guest_departure: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OperationsSummary {
    pub total: usize,
    pub by_type: TypeCounts,
    pub by_priority: PriorityCounts,
    /// Every `High` priority operation, in input order.
    pub urgent: Vec<DailyOperation>,
}
