/// Integration tests for the orbi-ops-engine binary.
///
/// These tests spawn the compiled binary via assert_cmd and verify
/// the JSON stdin/stdout protocol for all key scenarios.
///
/// Run with: cargo test --manifest-path crates/engine/Cargo.toml
use assert_cmd::Command;
use predicates::str::contains;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("orbi-ops-engine").unwrap();
    cmd.env_remove("ORBI_PROPERTY_FILE");
    cmd
}

fn run_ok(input: &str) -> serde_json::Value {
    let output = cmd()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains(r#""ok":true"#))
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    serde_json::from_str(&text).unwrap()
}

// ---------------------------------------------------------------------------
// Test 1: detect_overlapping_booking
// Existing stay Jun 1-5, new stay Jun 4-8 on the same room: one night overlap.
// ---------------------------------------------------------------------------

#[test]
fn detect_overlapping_booking() {
    let input = r#"{
        "command": "detectConflicts",
        "newBookings": [
            { "roomNumber": "A101", "guestName": "Levan", "checkIn": "2025-06-04", "checkOut": "2025-06-08",
              "status": "pending", "price": 95.0, "source": "direct" }
        ],
        "existing": [
            { "id": 11, "roomNumber": "A101", "guestName": "Nino", "checkIn": "2025-06-01", "checkOut": "2025-06-05",
              "status": "confirmed", "price": 120.0, "source": "booking.com" }
        ]
    }"#;

    let parsed = run_ok(input);
    let data = &parsed["data"];
    assert_eq!(data["hasConflict"], true);
    let conflicts = data["conflicts"].as_array().unwrap();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["overlapDays"], 1);
    assert_eq!(conflicts[0]["existingBooking"]["id"], 11);
    assert_eq!(conflicts[0]["existingBooking"]["checkIn"], "2025-06-01");

    let message = data["messages"][0].as_str().unwrap();
    assert!(message.contains("Conflict detected for Room A101"));
    assert!(message.contains("Overlap: 1 day(s)"));
}

// ---------------------------------------------------------------------------
// Test 2: same_day_turnover_allowed
// New stay starts on the existing check-out day. Datetimes are truncated.
// ---------------------------------------------------------------------------

#[test]
fn same_day_turnover_allowed() {
    let input = r#"{
        "command": "detectConflicts",
        "newBookings": [
            { "roomNumber": "A101", "guestName": "Levan", "checkIn": "2025-06-05T15:00:00Z", "checkOut": "2025-06-08",
              "status": "pending" }
        ],
        "existing": [
            { "roomNumber": "A101", "guestName": "Nino", "checkIn": "2025-06-01", "checkOut": "2025-06-05T09:30:00",
              "status": "confirmed" }
        ]
    }"#;

    let parsed = run_ok(input);
    assert_eq!(parsed["data"]["hasConflict"], false);
    assert_eq!(parsed["data"]["conflicts"].as_array().unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// Test 3: inverted_new_booking_rejected
// ---------------------------------------------------------------------------

#[test]
fn inverted_new_booking_rejected() {
    let input = r#"{
        "command": "detectConflicts",
        "newBookings": [
            { "roomNumber": "A101", "guestName": "Levan", "checkIn": "2025-06-08", "checkOut": "2025-06-04",
              "status": "pending" }
        ],
        "existing": []
    }"#;

    cmd()
        .write_stdin(input)
        .assert()
        .failure()
        .stdout(contains(r#""ok":false"#))
        .stdout(contains("must be before check-out"));
}

// ---------------------------------------------------------------------------
// Test 4: availability_with_inline_rooms
// ---------------------------------------------------------------------------

#[test]
fn availability_with_inline_rooms() {
    let input = r#"{
        "command": "checkAvailability",
        "query": { "startDate": "2025-07-01", "endDate": "2025-07-03" },
        "existing": [],
        "rooms": ["101", "102"]
    }"#;

    let parsed = run_ok(input);
    let data = &parsed["data"];
    assert_eq!(data["available"], true);
    assert_eq!(data["availableRooms"], serde_json::json!(["101", "102"]));
    assert_eq!(data["occupiedRooms"], serde_json::json!([]));
    assert_eq!(data["totalRooms"], 2);
    assert_eq!(data["occupancyRate"], 0.0);
    assert_eq!(data["summary"], "✅ All 2 rooms are available for Jul 1, 2025 - Jul 3, 2025!");
}

// ---------------------------------------------------------------------------
// Test 5: availability_ignores_checked_out
// ---------------------------------------------------------------------------

#[test]
fn availability_ignores_checked_out() {
    let input = r#"{
        "command": "checkAvailability",
        "query": { "startDate": "2025-07-01", "endDate": "2025-07-03" },
        "existing": [
            { "roomNumber": "101", "guestName": "Nino", "checkIn": "2025-06-30", "checkOut": "2025-07-02", "status": "checked_out" },
            { "roomNumber": "102", "guestName": "Ana", "checkIn": "2025-06-30", "checkOut": "2025-07-02", "status": "confirmed" }
        ],
        "rooms": ["101", "102"]
    }"#;

    let parsed = run_ok(input);
    let data = &parsed["data"];
    assert_eq!(data["availableRooms"], serde_json::json!(["101"]));
    assert_eq!(data["occupiedRooms"], serde_json::json!(["102"]));
    assert_eq!(data["occupancyRate"], 50.0);
}

// ---------------------------------------------------------------------------
// Test 5b: availability_blank_room_scans_property
// An empty roomNumber means "no room filter", not a room named "".
// ---------------------------------------------------------------------------

#[test]
fn availability_blank_room_scans_property() {
    let input = r#"{
        "command": "checkAvailability",
        "query": { "startDate": "2025-07-01", "endDate": "2025-07-03", "roomNumber": "" },
        "existing": [
            { "roomNumber": "102", "guestName": "Ana", "checkIn": "2025-06-30", "checkOut": "2025-07-02", "status": "confirmed" }
        ],
        "rooms": ["101", "102"]
    }"#;

    let parsed = run_ok(input);
    let data = &parsed["data"];
    assert_eq!(data["totalRooms"], 2);
    assert_eq!(data["availableRooms"], serde_json::json!(["101"]));
    assert_eq!(data["occupiedRooms"], serde_json::json!(["102"]));
}

// ---------------------------------------------------------------------------
// Test 6: availability_from_property_file
// Inventory comes from ORBI_PROPERTY_FILE when the request has no rooms.
// ---------------------------------------------------------------------------

#[test]
fn availability_from_property_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("property.json");
    std::fs::write(
        &path,
        r#"{ "name": "ORBI City", "roomRanges": [{ "first": 501, "last": 560 }] }"#,
    )
    .unwrap();

    let input = r#"{
        "command": "checkAvailability",
        "query": { "startDate": "2025-07-01", "endDate": "2025-07-03" },
        "existing": [
            { "roomNumber": "501", "guestName": "Nino", "checkIn": "2025-07-01", "checkOut": "2025-07-02", "status": "pending" }
        ]
    }"#;

    let output = cmd()
        .env("ORBI_PROPERTY_FILE", &path)
        .write_stdin(input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let parsed: serde_json::Value = serde_json::from_str(&String::from_utf8(output).unwrap()).unwrap();
    let data = &parsed["data"];
    assert_eq!(data["totalRooms"], 60);
    assert_eq!(data["occupiedRooms"], serde_json::json!(["501"]));
    assert_eq!(data["availableRooms"].as_array().unwrap().len(), 59);
}

// ---------------------------------------------------------------------------
// Test 7: availability_without_inventory_fails
// ---------------------------------------------------------------------------

#[test]
fn availability_without_inventory_fails() {
    let input = r#"{
        "command": "checkAvailability",
        "query": { "startDate": "2025-07-01", "endDate": "2025-07-03" },
        "existing": []
    }"#;

    cmd()
        .write_stdin(input)
        .assert()
        .failure()
        .stdout(contains(r#""ok":false"#))
        .stdout(contains("ORBI_PROPERTY_FILE"));
}

// ---------------------------------------------------------------------------
// Test 8: daily_operations_for_checkout
// Cleaning (high, 11:00) sorts before departure (medium, 10:00).
// ---------------------------------------------------------------------------

#[test]
fn daily_operations_for_checkout() {
    let input = r#"{
        "command": "dailyOperations",
        "targetDate": "2025-06-05",
        "events": [
            { "id": 1, "roomNumber": "101", "guestName": "Jane", "checkIn": "2025-06-01", "checkOut": "2025-06-05", "status": "confirmed" }
        ]
    }"#;

    let parsed = run_ok(input);
    let data = &parsed["data"];
    assert_eq!(data["date"], "2025-06-05");

    let ops = data["operations"].as_array().unwrap();
    assert_eq!(ops.len(), 2);
    assert_eq!(ops[0]["type"], "cleaning");
    assert_eq!(ops[0]["priority"], "high");
    assert_eq!(ops[0]["scheduledFor"], "2025-06-05T11:00:00");
    assert_eq!(ops[0]["bookingId"], 1);
    assert_eq!(ops[0]["formatted"]["title"], "🧹 Clean Room 101");
    assert_eq!(ops[0]["formatted"]["dueTime"], "11:00 AM");
    assert_eq!(ops[1]["type"], "guest_departure");
    assert_eq!(ops[1]["priority"], "medium");
    assert_eq!(ops[1]["scheduledFor"], "2025-06-05T10:00:00");
    assert_eq!(ops[1]["bookingId"], 1);

    let summary = &data["summary"];
    assert_eq!(summary["total"], 2);
    assert_eq!(
        summary["byType"],
        serde_json::json!({ "cleaning": 1, "guest_arrival": 0, "guest_departure": 1 })
    );
    assert_eq!(
        summary["byPriority"],
        serde_json::json!({ "high": 1, "medium": 1, "low": 0 })
    );
    assert_eq!(summary["urgent"].as_array().unwrap().len(), 1);
    assert_eq!(summary["urgent"][0]["type"], "cleaning");
}

// ---------------------------------------------------------------------------
// Test 9: should_create_task
// ---------------------------------------------------------------------------

#[test]
fn should_create_task() {
    let request = |task: &str, date: &str| {
        format!(
            r#"{{
                "command": "shouldCreateTask",
                "taskType": "{}",
                "targetDate": "{}",
                "event": {{ "id": 9, "roomNumber": "305", "guestName": "Dato",
                           "checkIn": "2025-06-02", "checkOut": "2025-06-06", "status": "confirmed" }}
            }}"#,
            task, date
        )
    };

    assert_eq!(run_ok(&request("cleaning", "2025-06-06"))["data"], true);
    assert_eq!(run_ok(&request("guest_arrival", "2025-06-06"))["data"], false);
    assert_eq!(run_ok(&request("guest_arrival", "2025-06-02"))["data"], true);
}

// ---------------------------------------------------------------------------
// Test 10: parse_date_query
// ---------------------------------------------------------------------------

#[test]
fn parse_date_query() {
    let parsed = run_ok(r#"{ "command": "parseDateQuery", "text": "free rooms 10-15 Aug?", "year": 2025 }"#);
    assert_eq!(parsed["data"]["startDate"], "2025-08-10");
    assert_eq!(parsed["data"]["endDate"], "2025-08-15");

    let parsed = run_ok(r#"{ "command": "parseDateQuery", "text": "sometime soon", "year": 2025 }"#);
    assert!(parsed["data"].is_null());
}

// ---------------------------------------------------------------------------
// Test 11: validate_reports_errors_and_warnings
// ---------------------------------------------------------------------------

#[test]
fn validate_reports_errors_and_warnings() {
    let input = r#"{
        "command": "validate",
        "reservations": [
            { "roomNumber": "101", "guestName": "Nino", "checkIn": "2025-06-05", "checkOut": "2025-06-01", "status": "confirmed" },
            { "roomNumber": "777", "guestName": "Ana", "checkIn": "2025-06-01", "checkOut": "2025-06-03", "status": "pending" }
        ],
        "events": [
            { "id": 3, "roomNumber": "101", "guestName": "Day Use", "checkIn": "2025-06-05", "checkOut": "2025-06-05" }
        ],
        "rooms": ["101", "102"]
    }"#;

    let parsed = run_ok(input);
    let errors = parsed["data"]["errors"].as_array().unwrap();
    let warnings = parsed["data"]["warnings"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(warnings.len(), 2);
}

// ---------------------------------------------------------------------------
// Test 12: invalid_json_input / invalid_date / unknown_command
// ---------------------------------------------------------------------------

#[test]
fn invalid_json_input() {
    cmd()
        .write_stdin("not json")
        .assert()
        .failure()
        .stdout(contains(r#""ok":false"#))
        .stdout(contains("Invalid JSON input"));
}

#[test]
fn invalid_date_rejected() {
    let input = r#"{
        "command": "dailyOperations",
        "targetDate": "June fifth",
        "events": []
    }"#;

    cmd()
        .write_stdin(input)
        .assert()
        .failure()
        .stdout(contains(r#""ok":false"#))
        .stdout(contains("Invalid date"));
}

#[test]
fn unknown_command() {
    cmd()
        .write_stdin(r#"{ "command": "explode" }"#)
        .assert()
        .failure()
        .stdout(contains(r#""ok":false"#));
}
