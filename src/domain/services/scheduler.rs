use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::{info, warn};

use crate::domain::models::booking::{
    is_active_status, Booking, NewBookingParams, STATUS_CANCELLED, STATUS_COMPLETED,
    STATUS_NO_SHOW, STATUS_PAID,
};
use crate::domain::models::job::{Job, JOB_CONFIRMATION, JOB_REMINDER};
use crate::domain::ports::{
    BookingRepository, Clock, JobRepository, LocationRepository, ScheduleRepository,
    ServiceRepository, StaffRepository,
};
use crate::domain::services::availability::{
    minutes_of_day, resolve_open_intervals, OpenInterval, MINUTES_PER_DAY,
};
use crate::domain::services::conflict::has_conflict;
use crate::domain::services::slots::slot_starts;
use crate::domain::services::timezone;
use crate::error::AppError;

/// Per-shop scheduling knobs, passed explicitly on every call instead of
/// being read from ambient state.
#[derive(Debug, Clone, Copy)]
pub struct SchedulingPolicy {
    pub slot_interval_min: u16,
    pub booking_buffer_min: u16,
    pub advance_booking_days: i64,
}

pub struct SlotQuery {
    pub shop_id: String,
    pub service_id: String,
    pub staff_id: String,
    pub location_id: String,
    pub date: NaiveDate,
}

pub struct BookingRequest {
    pub shop_id: String,
    pub service_id: String,
    pub staff_id: String,
    pub location_id: String,
    pub date: NaiveDate,
    pub time: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_note: Option<String>,
    pub duration_min: Option<i32>,
}

/// Orchestrating facade over the availability engine: resolves open
/// intervals, generates slots, and validates submissions with a fresh
/// conflict scan immediately before commit.
pub struct BookingScheduler {
    location_repo: Arc<dyn LocationRepository>,
    schedule_repo: Arc<dyn ScheduleRepository>,
    staff_repo: Arc<dyn StaffRepository>,
    service_repo: Arc<dyn ServiceRepository>,
    booking_repo: Arc<dyn BookingRepository>,
    job_repo: Arc<dyn JobRepository>,
    clock: Arc<dyn Clock>,
}

struct ResolvedDay {
    timezone: String,
    intervals: Vec<OpenInterval>,
    existing: Vec<Booking>,
}

impl BookingScheduler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        location_repo: Arc<dyn LocationRepository>,
        schedule_repo: Arc<dyn ScheduleRepository>,
        staff_repo: Arc<dyn StaffRepository>,
        service_repo: Arc<dyn ServiceRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        job_repo: Arc<dyn JobRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            location_repo,
            schedule_repo,
            staff_repo,
            service_repo,
            booking_repo,
            job_repo,
            clock,
        }
    }

    async fn resolve_day(
        &self,
        shop_id: &str,
        staff_id: &str,
        location_id: &str,
        date: NaiveDate,
    ) -> Result<ResolvedDay, AppError> {
        let location = self
            .location_repo
            .find_by_id(shop_id, location_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Location not found".into()))?;
        let staff = self
            .staff_repo
            .find_by_id(shop_id, staff_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Staff member not found".into()))?;

        let tz = timezone::parse_zone(&location.timezone)?;

        let weekly = self.schedule_repo.list_weekly_rules(&location.id).await?;
        let exceptions = self
            .schedule_repo
            .list_exceptions_covering(&location.id, date)
            .await?;
        let recurring = self.staff_repo.list_recurring(&staff.id).await?;
        let overrides = self.staff_repo.list_date_overrides(&staff.id, date).await?;

        let intervals =
            resolve_open_intervals(&location, &weekly, &exceptions, &recurring, &overrides, date);

        let (day_start, day_end) = timezone::day_bounds(date, tz)?;
        let existing = self
            .booking_repo
            .list_active_for_staff(&staff.id, day_start, day_end)
            .await?;

        Ok(ResolvedDay {
            timezone: location.timezone,
            intervals,
            existing,
        })
    }

    fn within_advance_window(&self, date: NaiveDate, timezone: &str, policy: &SchedulingPolicy) -> Result<bool, AppError> {
        let tz = timezone::parse_zone(timezone)?;
        let today = self.clock.now().with_timezone(&tz).date_naive();
        Ok(date <= today + Duration::days(policy.advance_booking_days))
    }

    /// Bookable start instants for (service, staff, location, date). Past
    /// slots and slots colliding with existing bookings are dropped; a date
    /// past the advance-booking window is simply empty.
    pub async fn available_slots(
        &self,
        query: &SlotQuery,
        policy: &SchedulingPolicy,
    ) -> Result<Vec<DateTime<Utc>>, AppError> {
        let service = self
            .service_repo
            .find_by_id(&query.shop_id, &query.service_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Service not found".into()))?;

        let day = self
            .resolve_day(&query.shop_id, &query.staff_id, &query.location_id, query.date)
            .await?;

        let duration_min = service_duration(service.duration_min)?;

        if !self.within_advance_window(query.date, &day.timezone, policy)? {
            return Ok(Vec::new());
        }

        let tz = timezone::parse_zone(&day.timezone)?;
        let now = self.clock.now();
        let mut slots = Vec::new();

        for start_min in slot_starts(&day.intervals, duration_min, policy.slot_interval_min) {
            let Some(naive) = civil_minute(query.date, start_min) else {
                continue;
            };
            let start_utc = timezone::resolve_local(tz, naive)?;
            let end_utc = start_utc + Duration::minutes(i64::from(duration_min));

            if start_utc <= now {
                continue;
            }
            if has_conflict(
                &query.staff_id,
                start_utc,
                end_utc,
                &day.existing,
                i64::from(policy.booking_buffer_min),
            ) {
                continue;
            }
            slots.push(start_utc);
        }

        // A spring-forward gap can map two civil starts onto one instant.
        slots.sort();
        slots.dedup();
        Ok(slots)
    }

    /// Validates and commits a booking request. The conflict scan runs here
    /// against a fresh read, not just at slot-listing time: another booking
    /// may have landed in between, and the storage-level unique constraint on
    /// (staff_id, scheduled_at) is the last-resort guard for the remaining
    /// race window.
    pub async fn submit(
        &self,
        request: BookingRequest,
        policy: &SchedulingPolicy,
    ) -> Result<Booking, AppError> {
        let service = self
            .service_repo
            .find_by_id(&request.shop_id, &request.service_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Service not found".into()))?;
        // Entity lookups come first; a bad time string on an unknown staff
        // member is still a 404.
        let day = self
            .resolve_day(&request.shop_id, &request.staff_id, &request.location_id, request.date)
            .await?;

        let duration_min = service_duration(request.duration_min.unwrap_or(service.duration_min))?;
        let start_min = minutes_of_day(&request.time)
            .ok_or_else(|| AppError::Validation(format!("Invalid time '{}', expected HH:MM", request.time)))?;

        if !self.within_advance_window(request.date, &day.timezone, policy)? {
            return Err(AppError::OutsideAvailability(
                "Date is beyond the advance booking window".into(),
            ));
        }

        if !day.intervals.iter().any(|iv| iv.contains(start_min, duration_min)) {
            warn!(
                "Booking rejected: {} {} not within open intervals {:?}",
                request.date, request.time, day.intervals
            );
            return Err(AppError::OutsideAvailability(
                "Requested time is not within the open hours for this date".into(),
            ));
        }

        let start_utc = timezone::to_absolute(request.date, &request.time, &day.timezone)?;
        let end_utc = start_utc + Duration::minutes(i64::from(duration_min));

        let now = self.clock.now();
        if start_utc <= now {
            return Err(AppError::Validation("Cannot book in the past".into()));
        }

        if has_conflict(
            &request.staff_id,
            start_utc,
            end_utc,
            &day.existing,
            i64::from(policy.booking_buffer_min),
        ) {
            return Err(AppError::Conflict(
                "Requested time overlaps an existing booking".into(),
            ));
        }

        let booking = Booking::new(NewBookingParams {
            shop_id: request.shop_id,
            location_id: request.location_id,
            staff_id: request.staff_id,
            service_id: request.service_id,
            customer_name: request.customer_name,
            customer_email: request.customer_email,
            customer_note: request.customer_note,
            scheduled_at: start_utc,
            duration_min: i32::from(duration_min),
            location_timezone: day.timezone,
        });

        let mut jobs = vec![Job::new(
            JOB_CONFIRMATION,
            booking.id.clone(),
            booking.shop_id.clone(),
            now,
        )];
        let remind_at = start_utc - Duration::hours(24);
        if remind_at > now {
            jobs.push(Job::new(
                JOB_REMINDER,
                booking.id.clone(),
                booking.shop_id.clone(),
                remind_at,
            ));
        }

        let created = self.booking_repo.create_with_jobs(&booking, jobs).await?;
        info!("Booking committed: {} at {}", created.id, created.scheduled_at);
        Ok(created)
    }

    /// POS check-in: the customer arrived and checked out, so the booking
    /// moves to paid.
    pub async fn mark_arrived(&self, shop_id: &str, booking_id: &str) -> Result<Booking, AppError> {
        self.transition(shop_id, booking_id, STATUS_PAID).await
    }

    pub async fn complete(&self, shop_id: &str, booking_id: &str) -> Result<Booking, AppError> {
        self.transition(shop_id, booking_id, STATUS_COMPLETED).await
    }

    pub async fn mark_no_show(&self, shop_id: &str, booking_id: &str) -> Result<Booking, AppError> {
        self.transition(shop_id, booking_id, STATUS_NO_SHOW).await
    }

    /// Cancelling also drops any pending reminder jobs for the booking.
    pub async fn cancel(&self, shop_id: &str, booking_id: &str) -> Result<Booking, AppError> {
        let cancelled = self.transition(shop_id, booking_id, STATUS_CANCELLED).await?;
        self.job_repo.cancel_jobs_for_booking(&cancelled.id).await?;
        info!("Booking cancelled: {}", cancelled.id);
        Ok(cancelled)
    }

    async fn transition(&self, shop_id: &str, booking_id: &str, status: &str) -> Result<Booking, AppError> {
        let booking = self
            .booking_repo
            .find_by_id(shop_id, booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;

        if !is_active_status(&booking.status) {
            return Err(AppError::Conflict(format!(
                "Booking is already {}",
                booking.status
            )));
        }

        self.booking_repo.update_status(shop_id, booking_id, status).await
    }
}

// A booking never spans more than a day; list_active_for_staff relies on this
// when it widens its scan window.
fn service_duration(duration_min: i32) -> Result<u16, AppError> {
    u16::try_from(duration_min)
        .ok()
        .filter(|d| *d > 0 && *d <= MINUTES_PER_DAY)
        .ok_or_else(|| AppError::Validation("duration_min must be between 1 and 1440".into()))
}

fn civil_minute(date: NaiveDate, minute_of_day: u16) -> Option<chrono::NaiveDateTime> {
    let hour = u32::from(minute_of_day) / 60;
    let minute = u32::from(minute_of_day) % 60;
    date.and_hms_opt(hour, minute, 0)
}
