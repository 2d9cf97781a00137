use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, warn};

use crate::model::{
    CalendarEvent, DailyOperation, FormattedTask, OperationType, OperationsSummary, Priority,
};

// ---------------------------------------------------------------------------
// Per-type scheduling rules
// ---------------------------------------------------------------------------

impl OperationType {
    /// Local hotel time the task is due.
    pub fn scheduled_time(self) -> NaiveTime {
        let hour = match self {
            OperationType::GuestDeparture => 10,
            OperationType::Cleaning => 11,
            OperationType::GuestArrival => 14,
        };
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default()
    }

    pub fn priority(self) -> Priority {
        match self {
            OperationType::Cleaning | OperationType::GuestArrival => Priority::High,
            OperationType::GuestDeparture => Priority::Medium,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            OperationType::Cleaning => "🧹",
            OperationType::GuestArrival | OperationType::GuestDeparture => "👋",
        }
    }

    fn title(self, room: &str) -> String {
        match self {
            OperationType::Cleaning => format!("Clean Room {}", room),
            OperationType::GuestArrival => format!("Guest Arrival - Room {}", room),
            OperationType::GuestDeparture => format!("Guest Departure - Room {}", room),
        }
    }

    fn describe(self, event: &CalendarEvent) -> String {
        match self {
            OperationType::Cleaning => format!(
                "Clean Room {} after {} check-out",
                event.room_number, event.guest_name
            ),
            OperationType::GuestArrival => format!(
                "Guest arrival: {} to Room {}",
                event.guest_name, event.room_number
            ),
            OperationType::GuestDeparture => format!(
                "Guest departure: {} from Room {}",
                event.guest_name, event.room_number
            ),
        }
    }
}

fn make_operation(op_type: OperationType, event: &CalendarEvent, target: NaiveDate) -> DailyOperation {
    DailyOperation {
        op_type,
        room_number: event.room_number.clone(),
        guest_name: event.guest_name.clone(),
        booking_id: event.id,
        priority: op_type.priority(),
        scheduled_for: target.and_time(op_type.scheduled_time()),
        description: op_type.describe(event),
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Would an operation of `task_type` be generated for `event` on `target`?
///
/// Cleaning and departure follow the check-out day; arrival follows the
/// check-in day.
pub fn should_create_task(event: &CalendarEvent, task_type: OperationType, target: NaiveDate) -> bool {
    match task_type {
        OperationType::Cleaning | OperationType::GuestDeparture => event.check_out == target,
        OperationType::GuestArrival => event.check_in == target,
    }
}

/// Staff tasks for `target`, ordered by priority then due time.
///
/// A check-out emits both cleaning and departure; a check-in emits an arrival.
/// A zero-night event (check-in == check-out == target) emits all three.
pub fn generate_daily_operations(events: &[CalendarEvent], target: NaiveDate) -> Vec<DailyOperation> {
    const ORDER: [OperationType; 3] = [
        OperationType::Cleaning,
        OperationType::GuestDeparture,
        OperationType::GuestArrival,
    ];

    let mut operations: Vec<DailyOperation> = Vec::new();
    for event in events {
        if event.check_in == event.check_out && event.check_in == target {
            warn!(booking_id = event.id, room = %event.room_number, "zero-night event produces arrival and departure tasks");
        }
        for op_type in ORDER {
            if should_create_task(event, op_type, target) {
                operations.push(make_operation(op_type, event, target));
            }
        }
    }

    // Stable: ties keep event order.
    operations.sort_by_key(|op| (op.priority, op.scheduled_for));

    debug!(date = %target, events = events.len(), operations = operations.len(), "daily operations generated");
    operations
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

pub fn format_operation_task(operation: &DailyOperation) -> FormattedTask {
    let op_type = operation.op_type;
    FormattedTask {
        title: format!("{} {}", op_type.icon(), op_type.title(&operation.room_number)),
        description: operation.description.clone(),
        priority: operation.priority.label().to_string(),
        due_time: operation.scheduled_for.format("%I:%M %p").to_string(),
    }
}

/// Counts by type and priority plus the high-priority operations, in one pass.
pub fn operations_summary(operations: &[DailyOperation]) -> OperationsSummary {
    let mut summary = OperationsSummary {
        total: operations.len(),
        by_type: Default::default(),
        by_priority: Default::default(),
        urgent: Vec::new(),
    };

    for op in operations {
        match op.op_type {
            OperationType::Cleaning => summary.by_type.cleaning += 1,
            OperationType::GuestArrival => summary.by_type.guest_arrival += 1,
            OperationType::GuestDeparture => summary.by_type.guest_departure += 1,
        }
        match op.priority {
            Priority::High => {
                summary.by_priority.high += 1;
                summary.urgent.push(op.clone());
            }
            Priority::Medium => summary.by_priority.medium += 1,
            Priority::Low => summary.by_priority.low += 1,
        }
    }

    summary
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
