use crate::core::Buckets;

/// Job counts shown by the summary view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkloadSummary {
    pub active: usize,
    pub eligible: usize,
    pub blocked: usize,
    pub completed: usize,
}

impl WorkloadSummary {
    pub fn from_buckets(buckets: &Buckets<'_>) -> Self {
        Self {
            active: buckets.running.len(),
            eligible: buckets.idle.len(),
            blocked: buckets.blocked.len(),
            completed: buckets.completed.len(),
        }
    }

    /// Jobs still in the system; completed jobs are not counted.
    pub fn total(&self) -> usize {
        self.active + self.eligible + self.blocked
    }
}

pub fn format_summary(summary: &WorkloadSummary) -> String {
    format!(
        "\nactive jobs: {}  eligible jobs: {}  blocked jobs: {}\n\nTotal jobs: {}\n\n",
        summary.active,
        summary.eligible,
        summary.blocked,
        summary.total()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_excludes_completed_jobs() {
        let summary = WorkloadSummary {
            active: 2,
            eligible: 3,
            blocked: 1,
            completed: 9,
        };
        assert_eq!(summary.total(), 6);
        assert_eq!(
            format_summary(&summary),
            "\nactive jobs: 2  eligible jobs: 3  blocked jobs: 1\n\nTotal jobs: 6\n\n"
        );
    }
}
