use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A stay or query window whose start is not strictly before its end.
    #[error("{label}: check-in {start} must be before check-out {end}")]
    InvalidRange {
        label: String,
        start: NaiveDate,
        end: NaiveDate,
    },
    #[error("Invalid date '{0}' -- expected YYYY-MM-DD or an ISO 8601 datetime")]
    InvalidDate(String),
    #[error("Room inventory is empty -- configure at least one room")]
    EmptyInventory,
    #[error("Room '{0}' appears more than once in the inventory")]
    DuplicateRoom(String),
    #[error("Property configuration error: {0}")]
    Config(String),
}
