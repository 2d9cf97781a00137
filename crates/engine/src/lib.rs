//! Reservation conflict detection, room availability and daily housekeeping
//! task generation for a single aparthotel property.
//!
//! Every operation is a pure function over caller-supplied snapshots.

pub mod availability;
pub mod config;
pub mod dates;
pub mod error;
pub mod model;
pub mod operations;
pub mod query;
pub mod report;
pub mod validator;

pub use availability::{check_availability, detect_conflicts};
pub use config::{PropertyConfig, RoomInventory};
pub use dates::{calculate_overlap_days, dates_overlap, normalize_to_day, StayRange};
pub use error::EngineError;
pub use operations::{
    format_operation_task, generate_daily_operations, operations_summary, should_create_task,
};
