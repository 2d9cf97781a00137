use std::io::{self, Read, Write};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use orbi_ops_engine::dates::deserialize_day;
use orbi_ops_engine::model::{
    AvailabilityQuery, AvailabilityResult, CalendarEvent, ConflictResult, DailyOperation,
    FormattedTask, OperationType, OperationsSummary, Reservation,
};
use orbi_ops_engine::{
    availability, operations, query, report, validator, EngineError, PropertyConfig,
    RoomInventory,
};

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase", rename_all_fields = "camelCase")]
enum Request {
    DetectConflicts {
        new_bookings: Vec<Reservation>,
        existing: Vec<Reservation>,
    },
    CheckAvailability {
        query: AvailabilityQuery,
        existing: Vec<Reservation>,
        /// Property inventory. Falls back to the `ORBI_PROPERTY_FILE` config.
        rooms: Option<Vec<String>>,
    },
    DailyOperations {
        events: Vec<CalendarEvent>,
        #[serde(deserialize_with = "deserialize_day")]
        target_date: NaiveDate,
    },
    ShouldCreateTask {
        event: CalendarEvent,
        task_type: OperationType,
        #[serde(deserialize_with = "deserialize_day")]
        target_date: NaiveDate,
    },
    ParseDateQuery {
        text: String,
        year: i32,
    },
    Validate {
        #[serde(default)]
        reservations: Vec<Reservation>,
        #[serde(default)]
        events: Vec<CalendarEvent>,
        rooms: Option<Vec<String>>,
    },
}

#[derive(Debug, Serialize)]
struct OkResponse<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Debug, Serialize)]
struct ErrResponse {
    ok: bool,
    error: String,
}

#[derive(Debug, Serialize)]
struct ConflictReport {
    #[serde(flatten)]
    result: ConflictResult,
    messages: Vec<String>,
}

#[derive(Debug, Serialize)]
struct AvailabilityReport {
    #[serde(flatten)]
    result: AvailabilityResult,
    summary: String,
}

#[derive(Debug, Serialize)]
struct FormattedOperation {
    #[serde(flatten)]
    operation: DailyOperation,
    formatted: FormattedTask,
}

#[derive(Debug, Serialize)]
struct DailyOperationsReport {
    date: NaiveDate,
    operations: Vec<FormattedOperation>,
    summary: OperationsSummary,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Inline rooms win; otherwise the property file named by the environment.
fn resolve_inventory(rooms: Option<Vec<String>>) -> Result<RoomInventory, EngineError> {
    match rooms {
        Some(rooms) => RoomInventory::new(rooms),
        None => PropertyConfig::from_env()?.inventory(),
    }
}

fn write_ok<T: Serialize>(data: T) {
    let resp = OkResponse { ok: true, data };
    let json = serde_json::to_string(&resp).unwrap_or_else(|e| {
        format!("{{\"ok\":false,\"error\":\"serialization error: {}\"}}", e)
    });
    println!("{}", json);
    let _ = io::stdout().flush();
}

fn write_err(msg: impl std::fmt::Display) -> ! {
    let resp = ErrResponse {
        ok: false,
        error: msg.to_string(),
    };
    let json = serde_json::to_string(&resp).unwrap_or_else(|_| {
        "{\"ok\":false,\"error\":\"double serialization error\"}".to_string()
    });
    println!("{}", json);
    let _ = io::stdout().flush();
    std::process::exit(1);
}

fn init_tracing() {
    // stdout carries the protocol; logs go to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

fn handle(request: Request) -> Result<(), EngineError> {
    match request {
        Request::DetectConflicts {
            new_bookings,
            existing,
        } => {
            let result = availability::detect_conflicts(&new_bookings, &existing)?;
            let messages = result
                .conflicts
                .iter()
                .map(report::format_conflict_message)
                .collect();
            write_ok(ConflictReport { result, messages });
        }
        Request::CheckAvailability {
            query,
            existing,
            rooms,
        } => {
            let inventory = resolve_inventory(rooms)?;
            let result = availability::check_availability(&query, &existing, &inventory)?;
            let summary = report::format_availability_summary(&result, &query);
            write_ok(AvailabilityReport { result, summary });
        }
        Request::DailyOperations {
            events,
            target_date,
        } => {
            let ops = operations::generate_daily_operations(&events, target_date);
            let summary = operations::operations_summary(&ops);
            let tasks = ops
                .into_iter()
                .map(|operation| FormattedOperation {
                    formatted: operations::format_operation_task(&operation),
                    operation,
                })
                .collect();
            write_ok(DailyOperationsReport {
                date: target_date,
                operations: tasks,
                summary,
            });
        }
        Request::ShouldCreateTask {
            event,
            task_type,
            target_date,
        } => {
            write_ok(operations::should_create_task(&event, task_type, target_date));
        }
        Request::ParseDateQuery { text, year } => {
            write_ok(query::parse_natural_date_query(&text, year));
        }
        Request::Validate {
            reservations,
            events,
            rooms,
        } => {
            write_ok(validator::validate_bookings(
                &reservations,
                &events,
                rooms.as_deref(),
            ));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    init_tracing();

    // Read all of stdin
    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        write_err(format!("Failed to read stdin: {}", e));
    }

    // Parse request
    let request: Request = match serde_json::from_str(&input) {
        Ok(r) => r,
        Err(e) => write_err(format!("Invalid JSON input: {}", e)),
    };

    if let Err(e) = handle(request) {
        write_err(e);
    }
}
