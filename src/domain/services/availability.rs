use chrono::{Datelike, NaiveDate};

use crate::domain::models::location::{HoursException, Location, WeeklyHoursRule};
use crate::domain::models::staff::{StaffAvailability, StaffDateAvailability};

pub const MINUTES_PER_DAY: u16 = 1440;

/// Half-open [start_min, end_min) window in minutes since civil midnight.
/// end_min may be 1440 for a window running to the end of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenInterval {
    pub start_min: u16,
    pub end_min: u16,
}

impl OpenInterval {
    pub fn contains(&self, start_min: u16, duration_min: u16) -> bool {
        // Widened sum: duration comes from caller input and may be large.
        self.start_min <= start_min
            && u32::from(start_min) + u32::from(duration_min) <= u32::from(self.end_min)
    }
}

/// "HH:MM" to minutes since midnight. "24:00" is accepted as end-of-day.
pub fn minutes_of_day(time: &str) -> Option<u16> {
    let (h, m) = time.split_once(':')?;
    let h: u16 = h.parse().ok()?;
    let m: u16 = m.parse().ok()?;
    // Bound the hour before multiplying; "1093:00" must not wrap.
    if h > 24 || m >= 60 {
        return None;
    }
    let total = h * 60 + m;
    (total <= MINUTES_PER_DAY).then_some(total)
}

fn window(start: &str, end: &str) -> Option<OpenInterval> {
    let start_min = minutes_of_day(start)?;
    let mut end_min = minutes_of_day(end)?;
    // Tolerate "23:59" meaning end-of-day, a common way to express it in admin UIs.
    if end_min == MINUTES_PER_DAY - 1 {
        end_min = MINUTES_PER_DAY;
    }
    (start_min < end_min).then_some(OpenInterval { start_min, end_min })
}

fn weekday_number(date: NaiveDate) -> i32 {
    date.weekday().num_days_from_sunday() as i32
}

/// The location's open window(s) for a date. Exceptions beat weekly rules;
/// among several exceptions covering the date, the most recently created one
/// wins. No applicable rule means closed.
pub fn location_windows(
    weekly: &[WeeklyHoursRule],
    exceptions: &[HoursException],
    date: NaiveDate,
) -> Vec<OpenInterval> {
    if let Some(exception) = exceptions
        .iter()
        .filter(|e| e.covers(date))
        .max_by_key(|e| e.created_at)
    {
        if exception.closed_all_day {
            return Vec::new();
        }
        return match (&exception.open_time, &exception.close_time) {
            (Some(open), Some(close)) => window(open, close).into_iter().collect(),
            _ => Vec::new(),
        };
    }

    let weekday = weekday_number(date);
    // Invariant: at most one effective rule per weekday on a date. If data
    // drifted, the rule with the latest valid_from wins.
    weekly
        .iter()
        .filter(|r| r.weekday == weekday && r.applies_on(date))
        .max_by_key(|r| r.valid_from)
        .and_then(|r| window(&r.open_time, &r.close_time))
        .into_iter()
        .collect()
}

fn location_scope_matches(scoped: &Option<String>, location_id: &str) -> bool {
    scoped.as_deref().is_none_or(|id| id == location_id)
}

/// The staff member's working window(s) for a date. Any override rows for the
/// date replace the recurring windows entirely; only is_available rows
/// contribute windows, so a lone unavailable row blanks the day.
pub fn staff_windows(
    recurring: &[StaffAvailability],
    overrides: &[StaffDateAvailability],
    location_id: &str,
    date: NaiveDate,
) -> Vec<OpenInterval> {
    let day_overrides: Vec<&StaffDateAvailability> = overrides
        .iter()
        .filter(|o| o.date == date && location_scope_matches(&o.location_id, location_id))
        .collect();

    if !day_overrides.is_empty() {
        let windows = day_overrides
            .iter()
            .filter(|o| o.is_available)
            .filter_map(|o| window(&o.start_time, &o.end_time))
            .collect();
        return merge(windows);
    }

    let weekday = weekday_number(date);
    let windows = recurring
        .iter()
        .filter(|a| {
            a.is_available && a.weekday == weekday && location_scope_matches(&a.location_id, location_id)
        })
        .filter_map(|a| window(&a.start_time, &a.end_time))
        .collect();
    merge(windows)
}

/// Pairwise intersection of two interval sets: max of starts to min of ends,
/// empty results discarded.
pub fn intersect(a: &[OpenInterval], b: &[OpenInterval]) -> Vec<OpenInterval> {
    let mut out = Vec::new();
    for x in a {
        for y in b {
            let start_min = x.start_min.max(y.start_min);
            let end_min = x.end_min.min(y.end_min);
            if start_min < end_min {
                out.push(OpenInterval { start_min, end_min });
            }
        }
    }
    merge(out)
}

/// Sorts and coalesces overlapping or touching intervals into a disjoint set.
pub fn merge(mut intervals: Vec<OpenInterval>) -> Vec<OpenInterval> {
    intervals.sort_by_key(|iv| (iv.start_min, iv.end_min));
    let mut out: Vec<OpenInterval> = Vec::with_capacity(intervals.len());
    for iv in intervals {
        match out.last_mut() {
            Some(last) if iv.start_min <= last.end_min => {
                last.end_min = last.end_min.max(iv.end_min);
            }
            _ => out.push(iv),
        }
    }
    out
}

/// Effective open intervals for (location, staff, date): the intersection of
/// the location layer and the staff layer. When the location does not enforce
/// operating hours only the staff layer applies. Missing schedule data on
/// either layer resolves to closed, never to an error.
pub fn resolve_open_intervals(
    location: &Location,
    weekly: &[WeeklyHoursRule],
    exceptions: &[HoursException],
    recurring: &[StaffAvailability],
    overrides: &[StaffDateAvailability],
    date: NaiveDate,
) -> Vec<OpenInterval> {
    let staff = staff_windows(recurring, overrides, &location.id, date);

    if !location.enforce_operating_hours {
        return staff;
    }

    let location_open = location_windows(weekly, exceptions, date);
    intersect(&location_open, &staff)
}
