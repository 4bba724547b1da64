use crate::core::job::{JobRecord, JobState, TimeLimit};

/// Seconds per unit of the scheduler's time limit field (minutes).
pub const XFACTOR_LIMIT_UNIT_SECS: f64 = 60.0;

/// Lowest expansion factor ever reported.
pub const XFACTOR_FLOOR: f64 = 1.0;

/// Expansion factor: time spent waiting since eligibility relative to the
/// requested limit, floored at 1.0. `None` when the job has no time limit.
pub fn xfactor(job: &JobRecord, now: i64) -> Option<f64> {
    let minutes = match job.time_limit {
        TimeLimit::Minutes(minutes) => minutes,
        TimeLimit::Unlimited => return None,
    };

    let until = if job.state == JobState::Pending {
        now
    } else {
        job.start_time.or(job.end_time).unwrap_or(now)
    };
    let eligible = job.eligible_time.or(job.submit_time).unwrap_or(until);
    let waited = (until - eligible) as f64;
    let factor = waited / (f64::from(minutes) * XFACTOR_LIMIT_UNIT_SECS);

    Some(factor.max(XFACTOR_FLOOR))
}

/// Seconds until a running job hits its end time; negative once overdue.
pub fn remaining_secs(job: &JobRecord, now: i64) -> Option<i64> {
    job.start_time?;
    job.end_time.map(|end| end - now)
}

/// Wall time a finished job actually ran.
pub fn elapsed_secs(job: &JobRecord) -> Option<i64> {
    match (job.start_time, job.end_time) {
        (Some(start), Some(end)) => Some(end - start),
        _ => None,
    }
}

/// Requested wall-clock limit of a queued job, in seconds.
pub fn wall_limit_secs(job: &JobRecord) -> Option<i64> {
    job.time_limit.as_secs()
}
