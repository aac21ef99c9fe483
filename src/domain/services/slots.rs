use crate::domain::services::availability::OpenInterval;

/// Candidate slot starts (minutes since civil midnight) across a set of
/// disjoint open intervals. Starts at each interval's start, steps by
/// interval_min, and stops once the service no longer fits. Lazy and
/// recomputed per request; a duration longer than every interval yields an
/// empty sequence rather than an error.
pub fn slot_starts<'a>(
    intervals: &'a [OpenInterval],
    duration_min: u16,
    interval_min: u16,
) -> Box<dyn Iterator<Item = u16> + 'a> {
    if duration_min == 0 || interval_min == 0 {
        return Box::new(std::iter::empty());
    }

    Box::new(intervals.iter().flat_map(move |iv| {
        (iv.start_min..iv.end_min)
            .step_by(interval_min as usize)
            .take_while(move |start| {
                u32::from(*start) + u32::from(duration_min) <= u32::from(iv.end_min)
            })
    }))
}
