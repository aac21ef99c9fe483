use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::domain::models::booking::{is_active_status, Booking};

/// The calendar span a booking blocks: [scheduled_at, end + buffer).
fn occupied_until(booking: &Booking, buffer_min: i64) -> DateTime<Utc> {
    booking.end_time() + Duration::minutes(buffer_min)
}

/// Overlap scan against existing bookings for one staff member.
///
/// Cancelled and no-show bookings do not occupy the calendar. The test is
/// strict `<` on absolute instants, so back-to-back bookings never conflict
/// on their own; the buffer extends the effective end of both sides, which
/// enforces a gap of buffer_min between consecutive bookings when configured.
pub fn has_conflict(
    staff_id: &str,
    proposed_start: DateTime<Utc>,
    proposed_end: DateTime<Utc>,
    existing: &[Booking],
    buffer_min: i64,
) -> bool {
    let padded_end = proposed_end + Duration::minutes(buffer_min);
    existing
        .iter()
        .filter(|b| b.staff_id == staff_id && is_active_status(&b.status))
        .any(|b| proposed_start < occupied_until(b, buffer_min) && b.scheduled_at < padded_end)
}

/// Day grouping uses the timezone snapshotted at creation, not the viewer's
/// zone, so a booking never migrates between days after a location edit.
pub fn falls_on_date(booking: &Booking, date: NaiveDate) -> bool {
    let tz: Tz = booking.location_timezone.parse().unwrap_or(chrono_tz::UTC);
    booking.scheduled_at.with_timezone(&tz).date_naive() == date
}
