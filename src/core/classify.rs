use crate::core::job::{JobRecord, JobState, WaitReason};

/// Operator-facing category of a job. Recomputed on every pass, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Running,
    Idle,
    Blocked,
    Completed,
}

/// Pending reasons that put a job in the blocked bucket instead of the idle one.
pub const BLOCKED_REASONS: [WaitReason; 9] = [
    WaitReason::Dependency,
    WaitReason::Held,
    WaitReason::HeldByUser,
    WaitReason::DeferredUntilTime,
    WaitReason::AssociationJobLimit,
    WaitReason::QosMaxCpuPerJob,
    WaitReason::QosMaxCpuMinutesPerJob,
    WaitReason::QosMaxNodePerJob,
    WaitReason::QosMaxWallPerJob,
];

pub fn is_blocking_reason(reason: &WaitReason) -> bool {
    BLOCKED_REASONS.contains(reason)
}

pub fn classify_job(job: &JobRecord) -> Category {
    if job.state == JobState::Running {
        return Category::Running;
    }
    if job.completing || job.state.is_finished() {
        return Category::Completed;
    }
    if job.state == JobState::Pending && is_blocking_reason(&job.wait_reason) {
        return Category::Blocked;
    }

    Category::Idle
}
