#![deny(clippy::all)]

use chrono::{NaiveDate, NaiveDateTime};
use napi_derive::napi;
use orbi_ops_engine::model as engine;
use orbi_ops_engine::{normalize_to_day, EngineError, RoomInventory};

// ---------------------------------------------------------------------------
// Date conversions
// ---------------------------------------------------------------------------

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

fn to_napi_err(e: EngineError) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_day(s: &str) -> napi::Result<NaiveDate> {
    normalize_to_day(s).map_err(to_napi_err)
}

fn day_string(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

fn parse_datetime(s: &str) -> napi::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
        .map_err(|e| napi::Error::from_reason(format!("Invalid scheduledFor '{}': {}", s, e)))
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[napi(string_enum = "snake_case")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationStatus {
    Confirmed,
    Pending,
    CheckedOut,
}

#[napi(string_enum = "snake_case")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationType {
    Cleaning,
    GuestArrival,
    GuestDeparture,
}

#[napi(string_enum = "snake_case")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

// ---------------------------------------------------------------------------
// Enum conversions: napi <-> engine
// ---------------------------------------------------------------------------

impl From<ReservationStatus> for engine::ReservationStatus {
    fn from(v: ReservationStatus) -> Self {
        match v {
            ReservationStatus::Confirmed => engine::ReservationStatus::Confirmed,
            ReservationStatus::Pending => engine::ReservationStatus::Pending,
            ReservationStatus::CheckedOut => engine::ReservationStatus::CheckedOut,
        }
    }
}

impl From<engine::ReservationStatus> for ReservationStatus {
    fn from(v: engine::ReservationStatus) -> Self {
        match v {
            engine::ReservationStatus::Confirmed => ReservationStatus::Confirmed,
            engine::ReservationStatus::Pending => ReservationStatus::Pending,
            engine::ReservationStatus::CheckedOut => ReservationStatus::CheckedOut,
        }
    }
}

impl From<OperationType> for engine::OperationType {
    fn from(v: OperationType) -> Self {
        match v {
            OperationType::Cleaning => engine::OperationType::Cleaning,
            OperationType::GuestArrival => engine::OperationType::GuestArrival,
            OperationType::GuestDeparture => engine::OperationType::GuestDeparture,
        }
    }
}

impl From<engine::OperationType> for OperationType {
    fn from(v: engine::OperationType) -> Self {
        match v {
            engine::OperationType::Cleaning => OperationType::Cleaning,
            engine::OperationType::GuestArrival => OperationType::GuestArrival,
            engine::OperationType::GuestDeparture => OperationType::GuestDeparture,
        }
    }
}

impl From<Priority> for engine::Priority {
    fn from(v: Priority) -> Self {
        match v {
            Priority::High => engine::Priority::High,
            Priority::Medium => engine::Priority::Medium,
            Priority::Low => engine::Priority::Low,
        }
    }
}

impl From<engine::Priority> for Priority {
    fn from(v: engine::Priority) -> Self {
        match v {
            engine::Priority::High => Priority::High,
            engine::Priority::Medium => Priority::Medium,
            engine::Priority::Low => Priority::Low,
        }
    }
}

// ---------------------------------------------------------------------------
// Mirror types: input side
// ---------------------------------------------------------------------------

/// Dates are `YYYY-MM-DD` or ISO 8601 datetimes; time-of-day is dropped.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct Reservation {
    pub id: Option<i64>,
    pub room_number: String,
    pub guest_name: String,
    pub check_in: String,
    pub check_out: String,
    pub status: ReservationStatus,
    pub price: Option<f64>,
    pub source: Option<String>,
}

impl TryFrom<Reservation> for engine::Reservation {
    type Error = napi::Error;

    fn try_from(v: Reservation) -> napi::Result<Self> {
        Ok(engine::Reservation {
            id: v.id,
            room_number: v.room_number,
            guest_name: v.guest_name,
            check_in: parse_day(&v.check_in)?,
            check_out: parse_day(&v.check_out)?,
            status: v.status.into(),
            price: v.price.unwrap_or_default(),
            source: v.source.unwrap_or_default(),
        })
    }
}

impl From<engine::Reservation> for Reservation {
    fn from(v: engine::Reservation) -> Self {
        Reservation {
            id: v.id,
            room_number: v.room_number,
            guest_name: v.guest_name,
            check_in: day_string(v.check_in),
            check_out: day_string(v.check_out),
            status: v.status.into(),
            price: Some(v.price),
            source: Some(v.source),
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct CalendarEvent {
    pub id: i64,
    pub room_number: String,
    pub guest_name: String,
    pub check_in: String,
    pub check_out: String,
    pub status: Option<String>,
}

impl TryFrom<CalendarEvent> for engine::CalendarEvent {
    type Error = napi::Error;

    fn try_from(v: CalendarEvent) -> napi::Result<Self> {
        Ok(engine::CalendarEvent {
            id: v.id,
            room_number: v.room_number,
            guest_name: v.guest_name,
            check_in: parse_day(&v.check_in)?,
            check_out: parse_day(&v.check_out)?,
            status: v.status.unwrap_or_default(),
        })
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct AvailabilityQuery {
    pub start_date: String,
    pub end_date: String,
    pub room_number: Option<String>,
}

impl TryFrom<AvailabilityQuery> for engine::AvailabilityQuery {
    type Error = napi::Error;

    fn try_from(v: AvailabilityQuery) -> napi::Result<Self> {
        Ok(engine::AvailabilityQuery {
            start_date: parse_day(&v.start_date)?,
            end_date: parse_day(&v.end_date)?,
            room_number: v.room_number,
        })
    }
}

fn convert_all<T, U>(items: Vec<T>) -> napi::Result<Vec<U>>
where
    U: TryFrom<T, Error = napi::Error>,
{
    items.into_iter().map(U::try_from).collect()
}

// ---------------------------------------------------------------------------
// Mirror types: result side
// ---------------------------------------------------------------------------

#[napi(object)]
#[derive(Debug, Clone)]
pub struct Conflict {
    pub new_booking: Reservation,
    pub existing_booking: Reservation,
    pub overlap_days: i64,
    /// Human-readable warning for staff.
    pub message: String,
}

impl From<engine::Conflict> for Conflict {
    fn from(v: engine::Conflict) -> Self {
        let message = orbi_ops_engine::report::format_conflict_message(&v);
        Conflict {
            new_booking: v.new_booking.into(),
            existing_booking: v.existing_booking.into(),
            overlap_days: v.overlap_days,
            message,
        }
    }
}

impl TryFrom<Conflict> for engine::Conflict {
    type Error = napi::Error;

    fn try_from(v: Conflict) -> napi::Result<Self> {
        Ok(engine::Conflict {
            new_booking: v.new_booking.try_into()?,
            existing_booking: v.existing_booking.try_into()?,
            overlap_days: v.overlap_days,
        })
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct ConflictResult {
    pub has_conflict: bool,
    pub conflicts: Vec<Conflict>,
}

impl From<engine::ConflictResult> for ConflictResult {
    fn from(v: engine::ConflictResult) -> Self {
        ConflictResult {
            has_conflict: v.has_conflict,
            conflicts: v.conflicts.into_iter().map(Into::into).collect(),
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct AvailabilityResult {
    pub available: bool,
    pub available_rooms: Vec<String>,
    pub occupied_rooms: Vec<String>,
    pub total_rooms: u32,
    pub occupancy_rate: f64,
    /// Human-readable summary of the window.
    pub summary: String,
}

impl From<AvailabilityResult> for engine::AvailabilityResult {
    fn from(v: AvailabilityResult) -> Self {
        engine::AvailabilityResult {
            available: v.available,
            available_rooms: v.available_rooms,
            occupied_rooms: v.occupied_rooms,
            total_rooms: v.total_rooms as usize,
            occupancy_rate: v.occupancy_rate,
        }
    }
}

/// `scheduledFor` is `YYYY-MM-DDTHH:MM:SS` in local hotel time.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct DailyOperation {
    #[napi(js_name = "type")]
    pub op_type: OperationType,
    pub room_number: String,
    pub guest_name: String,
    pub booking_id: i64,
    pub priority: Priority,
    pub scheduled_for: String,
    pub description: String,
}

impl From<engine::DailyOperation> for DailyOperation {
    fn from(v: engine::DailyOperation) -> Self {
        DailyOperation {
            op_type: v.op_type.into(),
            room_number: v.room_number,
            guest_name: v.guest_name,
            booking_id: v.booking_id,
            priority: v.priority.into(),
            scheduled_for: v.scheduled_for.format(DATETIME_FORMAT).to_string(),
            description: v.description,
        }
    }
}

impl TryFrom<DailyOperation> for engine::DailyOperation {
    type Error = napi::Error;

    fn try_from(v: DailyOperation) -> napi::Result<Self> {
        Ok(engine::DailyOperation {
            op_type: v.op_type.into(),
            room_number: v.room_number,
            guest_name: v.guest_name,
            booking_id: v.booking_id,
            priority: v.priority.into(),
            scheduled_for: parse_datetime(&v.scheduled_for)?,
            description: v.description,
        })
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct FormattedTask {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub due_time: String,
}

impl From<engine::FormattedTask> for FormattedTask {
    fn from(v: engine::FormattedTask) -> Self {
        FormattedTask {
            title: v.title,
            description: v.description,
            priority: v.priority,
            due_time: v.due_time,
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct TypeCounts {
    pub cleaning: u32,
    pub guest_arrival: u32,
    pub guest_departure: u32,
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct PriorityCounts {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct OperationsSummary {
    pub total: u32,
    pub by_type: TypeCounts,
    pub by_priority: PriorityCounts,
    pub urgent: Vec<DailyOperation>,
}

impl From<engine::OperationsSummary> for OperationsSummary {
    fn from(v: engine::OperationsSummary) -> Self {
        OperationsSummary {
            total: v.total as u32,
            by_type: TypeCounts {
                cleaning: v.by_type.cleaning as u32,
                guest_arrival: v.by_type.guest_arrival as u32,
                guest_departure: v.by_type.guest_departure as u32,
            },
            by_priority: PriorityCounts {
                high: v.by_priority.high as u32,
                medium: v.by_priority.medium as u32,
                low: v.by_priority.low as u32,
            },
            urgent: v.urgent.into_iter().map(Into::into).collect(),
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

// ---------------------------------------------------------------------------
// Exported functions
// ---------------------------------------------------------------------------

/// Report every new booking that overlaps an active reservation on the same room.
#[napi]
pub fn detect_conflicts(
    new_bookings: Vec<Reservation>,
    existing: Vec<Reservation>,
) -> napi::Result<ConflictResult> {
    let new_bookings: Vec<engine::Reservation> = convert_all(new_bookings)?;
    let existing: Vec<engine::Reservation> = convert_all(existing)?;
    orbi_ops_engine::detect_conflicts(&new_bookings, &existing)
        .map(Into::into)
        .map_err(to_napi_err)
}

/// Occupancy over the query window. `rooms` is the full property inventory.
#[napi]
pub fn check_availability(
    query: AvailabilityQuery,
    existing: Vec<Reservation>,
    rooms: Vec<String>,
) -> napi::Result<AvailabilityResult> {
    let query = engine::AvailabilityQuery::try_from(query)?;
    let existing: Vec<engine::Reservation> = convert_all(existing)?;
    let inventory = RoomInventory::new(rooms).map_err(to_napi_err)?;

    let result = orbi_ops_engine::check_availability(&query, &existing, &inventory)
        .map_err(to_napi_err)?;
    let summary = orbi_ops_engine::report::format_availability_summary(&result, &query);
    Ok(AvailabilityResult {
        available: result.available,
        available_rooms: result.available_rooms,
        occupied_rooms: result.occupied_rooms,
        total_rooms: result.total_rooms as u32,
        occupancy_rate: result.occupancy_rate,
        summary,
    })
}

#[napi]
pub fn generate_daily_operations(
    events: Vec<CalendarEvent>,
    target_date: String,
) -> napi::Result<Vec<DailyOperation>> {
    let events: Vec<engine::CalendarEvent> = convert_all(events)?;
    let target = parse_day(&target_date)?;
    Ok(orbi_ops_engine::generate_daily_operations(&events, target)
        .into_iter()
        .map(Into::into)
        .collect())
}

#[napi]
pub fn should_create_task(
    event: CalendarEvent,
    task_type: OperationType,
    target_date: String,
) -> napi::Result<bool> {
    let event = engine::CalendarEvent::try_from(event)?;
    let target = parse_day(&target_date)?;
    Ok(orbi_ops_engine::should_create_task(&event, task_type.into(), target))
}

#[napi]
pub fn format_operation_task(operation: DailyOperation) -> napi::Result<FormattedTask> {
    let operation = engine::DailyOperation::try_from(operation)?;
    Ok(orbi_ops_engine::format_operation_task(&operation).into())
}

#[napi]
pub fn get_operations_summary(operations: Vec<DailyOperation>) -> napi::Result<OperationsSummary> {
    let operations: Vec<engine::DailyOperation> = convert_all(operations)?;
    Ok(orbi_ops_engine::operations_summary(&operations).into())
}

/// Staff-facing text for a single conflict.
#[napi]
pub fn format_conflict_message(conflict: Conflict) -> napi::Result<String> {
    let conflict = engine::Conflict::try_from(conflict)?;
    Ok(orbi_ops_engine::report::format_conflict_message(&conflict))
}

/// Staff-facing text for an availability result over the query window.
#[napi]
pub fn format_availability_summary(
    result: AvailabilityResult,
    query: AvailabilityQuery,
) -> napi::Result<String> {
    let query = engine::AvailabilityQuery::try_from(query)?;
    let result = engine::AvailabilityResult::from(result);
    Ok(orbi_ops_engine::report::format_availability_summary(&result, &query))
}

/// Parse `"10-15 Aug"` or `"10 Aug to 15 Aug"` against the given year.
#[napi]
pub fn parse_natural_date_query(text: String, year: i32) -> Option<DateRange> {
    orbi_ops_engine::query::parse_natural_date_query(&text, year).map(|r| DateRange {
        start_date: day_string(r.start_date),
        end_date: day_string(r.end_date),
    })
}
