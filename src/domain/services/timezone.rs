use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::AppError;

pub fn parse_zone(zone: &str) -> Result<Tz, AppError> {
    zone.parse::<Tz>().map_err(|_| AppError::InvalidTimeZone(zone.to_string()))
}

pub fn parse_time(time: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| AppError::Validation(format!("Invalid time '{}', expected HH:MM", time)))
}

/// Converts a civil date + "HH:MM" wall-clock time in the given zone to an
/// absolute UTC instant using the zone's real transition rules.
pub fn to_absolute(date: NaiveDate, time: &str, zone: &str) -> Result<DateTime<Utc>, AppError> {
    let tz = parse_zone(zone)?;
    let naive = date.and_time(parse_time(time)?);
    resolve_local(tz, naive)
}

/// Converts an absolute instant back to the zone's civil date and "HH:MM".
pub fn to_civil(instant: DateTime<Utc>, zone: &str) -> Result<(NaiveDate, String), AppError> {
    let tz = parse_zone(zone)?;
    let local = instant.with_timezone(&tz);
    Ok((local.date_naive(), local.format("%H:%M").to_string()))
}

/// DST policy for wall-clock times without a unique mapping:
/// - fall-back ambiguity: the earliest mapping, i.e. the pre-transition offset;
/// - spring-forward gap: roll forward to the first wall-clock minute that
///   exists and take its first mapping.
pub fn resolve_local(tz: Tz, naive: NaiveDateTime) -> Result<DateTime<Utc>, AppError> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => {
            let mut probe = naive;
            // Real gaps top out at a few hours; a day is a hard stop.
            for _ in 0..1440 {
                probe += Duration::minutes(1);
                match tz.from_local_datetime(&probe) {
                    LocalResult::Single(dt) => return Ok(dt.with_timezone(&Utc)),
                    LocalResult::Ambiguous(earliest, _) => return Ok(earliest.with_timezone(&Utc)),
                    LocalResult::None => continue,
                }
            }
            Err(AppError::Validation(format!("Unresolvable local time {} in zone {}", naive, tz)))
        }
    }
}

/// Absolute bounds of a civil date in a zone, for day-window queries.
pub fn day_bounds(date: NaiveDate, tz: Tz) -> Result<(DateTime<Utc>, DateTime<Utc>), AppError> {
    let start = resolve_local(tz, date.and_hms_opt(0, 0, 0).ok_or(AppError::Internal)?)?;
    let next_day = date.succ_opt().ok_or(AppError::Validation("Date out of range".into()))?;
    let end = resolve_local(tz, next_day.and_hms_opt(0, 0, 0).ok_or(AppError::Internal)?)?;
    Ok((start, end))
}
