use crate::dates::format_day;
use crate::model::{AvailabilityQuery, AvailabilityResult, Conflict, Reservation};

/// At most this many room ids are listed in an availability summary.
const MAX_LISTED_ROOMS: usize = 10;

fn stay_label(r: &Reservation) -> String {
    format!("{} ({} - {})", r.guest_name, format_day(r.check_in), format_day(r.check_out))
}

/// Multi-line warning shown to staff when a booking collides with another.
pub fn format_conflict_message(conflict: &Conflict) -> String {
    format!(
        "⚠️ Conflict detected for Room {}:\nNew booking: {}\nExisting booking: {}\nOverlap: {} day(s)",
        conflict.new_booking.room_number,
        stay_label(&conflict.new_booking),
        stay_label(&conflict.existing_booking),
        conflict.overlap_days
    )
}

pub fn format_availability_summary(result: &AvailabilityResult, query: &AvailabilityQuery) -> String {
    let date_range = format!("{} - {}", format_day(query.start_date), format_day(query.end_date));

    if !result.available {
        return format!(
            "❌ No rooms available for {}.\nAll {} rooms are occupied ({:.1}% occupancy).",
            date_range, result.total_rooms, result.occupancy_rate
        );
    }

    if result.available_rooms.len() == result.total_rooms {
        return format!("✅ All {} rooms are available for {}!", result.total_rooms, date_range);
    }

    let listed: Vec<&str> = result
        .available_rooms
        .iter()
        .take(MAX_LISTED_ROOMS)
        .map(String::as_str)
        .collect();
    let more = if result.available_rooms.len() > MAX_LISTED_ROOMS { "..." } else { "" };
    format!(
        "✅ {} room(s) available for {}:\nAvailable: {}{}\nOccupancy: {:.1}%",
        result.available_rooms.len(),
        date_range,
        listed.join(", "),
        more,
        result.occupancy_rate
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
