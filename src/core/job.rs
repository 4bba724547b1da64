/// Primary scheduler state of a job, mapped once when the record is decoded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JobState {
    #[default]
    Pending,
    Running,
    Suspended,
    Complete,
    Cancelled,
    Failed,
    Timeout,
    NodeFail,
    Preempted,
    BootFail,
    Deadline,
    OutOfMemory,
    Unknown(String),
}

impl JobState {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "PENDING" | "PD" => JobState::Pending,
            "RUNNING" | "R" => JobState::Running,
            "SUSPENDED" | "S" => JobState::Suspended,
            "COMPLETED" | "COMPLETE" | "CD" => JobState::Complete,
            "CANCELLED" | "CA" => JobState::Cancelled,
            "FAILED" | "F" => JobState::Failed,
            "TIMEOUT" | "TO" => JobState::Timeout,
            "NODE_FAIL" | "NF" => JobState::NodeFail,
            "PREEMPTED" | "PR" => JobState::Preempted,
            "BOOT_FAIL" | "BF" => JobState::BootFail,
            "DEADLINE" | "DL" => JobState::Deadline,
            "OUT_OF_MEMORY" | "OOM" => JobState::OutOfMemory,
            _ => JobState::Unknown(value.trim().to_string()),
        }
    }

    /// True for every state a job reaches after it stops executing.
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            JobState::Complete
                | JobState::Cancelled
                | JobState::Failed
                | JobState::Timeout
                | JobState::NodeFail
                | JobState::Preempted
                | JobState::BootFail
                | JobState::Deadline
                | JobState::OutOfMemory
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobState::Pending => "Idle",
            JobState::Running => "Running",
            JobState::Suspended => "Suspended",
            JobState::Complete => "Complete",
            JobState::Cancelled => "Cancelled",
            JobState::Failed => "Failed",
            JobState::Timeout => "TimeOut",
            JobState::NodeFail => "NodeFail",
            JobState::Preempted => "Preempted",
            JobState::BootFail => "BootFail",
            JobState::Deadline => "Deadline",
            JobState::OutOfMemory => "OomError",
            JobState::Unknown(_) => "Unknown",
        }
    }
}

/// Why a pending job has not started yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WaitReason {
    #[default]
    None,
    Priority,
    Resources,
    Dependency,
    Held,
    HeldByUser,
    DeferredUntilTime,
    AssociationJobLimit,
    QosMaxCpuPerJob,
    QosMaxCpuMinutesPerJob,
    QosMaxNodePerJob,
    QosMaxWallPerJob,
    Other(String),
}

impl WaitReason {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "None" => WaitReason::None,
            "Priority" => WaitReason::Priority,
            "Resources" => WaitReason::Resources,
            "Dependency" => WaitReason::Dependency,
            "JobHeldAdmin" | "Held" => WaitReason::Held,
            "JobHeldUser" => WaitReason::HeldByUser,
            "BeginTime" => WaitReason::DeferredUntilTime,
            "AssociationJobLimit" => WaitReason::AssociationJobLimit,
            "QOSMaxCpuPerJobLimit" => WaitReason::QosMaxCpuPerJob,
            "QOSMaxCpuMinutesPerJobLimit" => WaitReason::QosMaxCpuMinutesPerJob,
            "QOSMaxNodePerJobLimit" => WaitReason::QosMaxNodePerJob,
            "QOSMaxWallDurationPerJobLimit" => WaitReason::QosMaxWallPerJob,
            other => WaitReason::Other(other.to_string()),
        }
    }
}

/// Slurm's "value not set" marker for 32-bit numeric fields.
pub const NO_VAL: u64 = 0xffff_fffe;
/// Slurm's "no limit" marker for 32-bit numeric fields.
pub const INFINITE: u64 = 0xffff_ffff;

/// Requested wall-clock limit. Slurm reports "no limit" as zero, unset or infinite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeLimit {
    Minutes(u32),
    #[default]
    Unlimited,
}

impl TimeLimit {
    pub fn from_minutes(minutes: Option<u64>) -> Self {
        match minutes {
            Some(m) if m > 0 && m < NO_VAL => TimeLimit::Minutes(m as u32),
            _ => TimeLimit::Unlimited,
        }
    }

    pub fn as_secs(&self) -> Option<i64> {
        match self {
            TimeLimit::Minutes(m) => Some(i64::from(*m) * 60),
            TimeLimit::Unlimited => None,
        }
    }
}

/// One job as reported by the resource manager. Timestamps are epoch seconds;
/// `None` means the scheduler has not set them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobRecord {
    pub job_id: u64,
    pub user_id: u32,
    pub group_id: u32,
    pub account: String,
    pub qos: String,
    pub partition: String,
    pub reservation: String,
    pub state: JobState,
    pub completing: bool,
    pub wait_reason: WaitReason,
    pub submit_time: Option<i64>,
    pub eligible_time: Option<i64>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub time_limit: TimeLimit,
    pub nodes: String,
    pub batch_host: String,
    pub exit_code: i32,
    pub num_tasks: u32,
    pub priority: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartitionRecord {
    pub name: String,
    pub nodes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_state_names() {
        assert_eq!(JobState::parse("RUNNING"), JobState::Running);
        assert_eq!(JobState::parse("pd"), JobState::Pending);
        assert_eq!(JobState::parse("OUT_OF_MEMORY"), JobState::OutOfMemory);
        assert_eq!(
            JobState::parse("REQUEUE_HOLD"),
            JobState::Unknown("REQUEUE_HOLD".to_string())
        );
    }

    #[test]
    fn labels_follow_showq_wording() {
        assert_eq!(JobState::Pending.label(), "Idle");
        assert_eq!(JobState::Timeout.label(), "TimeOut");
        assert_eq!(JobState::OutOfMemory.label(), "OomError");
    }

    #[test]
    fn maps_scheduler_reason_strings() {
        assert_eq!(WaitReason::parse("JobHeldUser"), WaitReason::HeldByUser);
        assert_eq!(WaitReason::parse("BeginTime"), WaitReason::DeferredUntilTime);
        assert_eq!(WaitReason::parse("None"), WaitReason::None);
        assert_eq!(
            WaitReason::parse("ReqNodeNotAvail"),
            WaitReason::Other("ReqNodeNotAvail".to_string())
        );
    }

    #[test]
    fn running_job_cap_is_not_the_association_job_limit() {
        assert_eq!(
            WaitReason::parse("AssociationJobLimit"),
            WaitReason::AssociationJobLimit
        );
        assert_eq!(
            WaitReason::parse("AssocMaxJobsLimit"),
            WaitReason::Other("AssocMaxJobsLimit".to_string())
        );
    }

    #[test]
    fn zero_and_missing_limits_are_unlimited() {
        assert_eq!(TimeLimit::from_minutes(Some(0)), TimeLimit::Unlimited);
        assert_eq!(TimeLimit::from_minutes(None), TimeLimit::Unlimited);
        assert_eq!(TimeLimit::from_minutes(Some(90)).as_secs(), Some(5400));
    }

    #[test]
    fn unset_and_infinite_markers_are_unlimited() {
        assert_eq!(TimeLimit::from_minutes(Some(NO_VAL)), TimeLimit::Unlimited);
        assert_eq!(TimeLimit::from_minutes(Some(INFINITE)), TimeLimit::Unlimited);
        assert_eq!(
            TimeLimit::from_minutes(Some(NO_VAL - 1)),
            TimeLimit::Minutes(0xffff_fffd)
        );
    }
}
