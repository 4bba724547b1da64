use crate::core::identity::IdentityLookup;
use crate::core::job::{JobRecord, PartitionRecord};

/// Criteria a job must satisfy to be reported. Unset fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub username: Option<String>,
    pub group: Option<String>,
    pub account: Option<String>,
    pub qos: Option<String>,
    /// Substring of the partition name.
    pub partition: Option<String>,
    /// Substring of the reservation name.
    pub reservation: Option<String>,
}

fn is_set(criterion: &Option<String>) -> Option<&str> {
    criterion.as_deref().filter(|value| !value.is_empty())
}

impl JobFilter {
    pub fn is_empty(&self) -> bool {
        [
            &self.username,
            &self.group,
            &self.account,
            &self.qos,
            &self.partition,
            &self.reservation,
        ]
        .into_iter()
        .all(|criterion| is_set(criterion).is_none())
    }

    pub fn matches(&self, job: &JobRecord, identity: &dyn IdentityLookup) -> bool {
        if let Some(account) = is_set(&self.account) {
            if job.account != account {
                return false;
            }
        }
        if let Some(qos) = is_set(&self.qos) {
            if job.qos != qos {
                return false;
            }
        }
        if let Some(partition) = is_set(&self.partition) {
            if !job.partition.contains(partition) {
                return false;
            }
        }
        if let Some(reservation) = is_set(&self.reservation) {
            if !job.reservation.contains(reservation) {
                return false;
            }
        }
        if let Some(username) = is_set(&self.username) {
            if identity.user_name(job.user_id) != username {
                return false;
            }
        }
        if let Some(group) = is_set(&self.group) {
            if identity.group_name(job.group_id) != group {
                return false;
            }
        }

        true
    }

    pub fn matches_partition(&self, partition: &PartitionRecord) -> bool {
        is_set(&self.partition).map_or(true, |needle| partition.name.contains(needle))
    }

    pub fn apply<'a>(
        &self,
        jobs: &'a [JobRecord],
        identity: &dyn IdentityLookup,
    ) -> Vec<&'a JobRecord> {
        jobs.iter().filter(|job| self.matches(job, identity)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::StaticIdentity;

    fn job(job_id: u64, partition: &str, account: &str) -> JobRecord {
        JobRecord {
            job_id,
            partition: partition.to_string(),
            account: account.to_string(),
            ..Default::default()
        }
    }

    fn ids(jobs: &[&JobRecord]) -> Vec<u64> {
        jobs.iter().map(|job| job.job_id).collect()
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let jobs = vec![job(1, "gpu", "physics"), job(2, "cpu", "chem")];
        let filter = JobFilter {
            account: Some(String::new()),
            ..Default::default()
        };
        assert!(filter.is_empty());
        assert_eq!(ids(&filter.apply(&jobs, &StaticIdentity::default())), vec![1, 2]);
    }

    #[test]
    fn partition_substring_and_account_exact_intersect() {
        let jobs = vec![
            job(1, "gpu", "physics"),
            job(2, "gpu-long", "physics"),
            job(3, "gpu", "physics-lab"),
            job(4, "cpu", "physics"),
        ];
        let identity = StaticIdentity::default();
        let both = JobFilter {
            partition: Some("gpu".to_string()),
            account: Some("physics".to_string()),
            ..Default::default()
        };
        let by_partition = JobFilter {
            partition: Some("gpu".to_string()),
            ..Default::default()
        };
        let by_account = JobFilter {
            account: Some("physics".to_string()),
            ..Default::default()
        };

        let partition_then_account: Vec<u64> = by_partition
            .apply(&jobs, &identity)
            .into_iter()
            .filter(|job| by_account.matches(job, &identity))
            .map(|job| job.job_id)
            .collect();
        let account_then_partition: Vec<u64> = by_account
            .apply(&jobs, &identity)
            .into_iter()
            .filter(|job| by_partition.matches(job, &identity))
            .map(|job| job.job_id)
            .collect();

        assert_eq!(ids(&both.apply(&jobs, &identity)), vec![1, 2]);
        assert_eq!(partition_then_account, vec![1, 2]);
        assert_eq!(account_then_partition, vec![1, 2]);
    }

    #[test]
    fn username_filter_compares_resolved_names() {
        let mut alice = job(1, "cpu", "a");
        alice.user_id = 1000;
        let mut unknown = job(2, "cpu", "a");
        unknown.user_id = 4242;
        let jobs = vec![alice, unknown];
        let identity = StaticIdentity::default().with_user(1000, "alice");

        let filter = JobFilter {
            username: Some("alice".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&jobs, &identity)), vec![1]);

        let by_number = JobFilter {
            username: Some("4242".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&by_number.apply(&jobs, &identity)), vec![2]);

        let nobody = JobFilter {
            username: Some("bob".to_string()),
            ..Default::default()
        };
        assert!(nobody.apply(&jobs, &identity).is_empty());
    }

    #[test]
    fn group_qos_and_reservation_filters() {
        let mut first = job(1, "cpu", "a");
        first.group_id = 50;
        first.qos = "normal".to_string();
        first.reservation = "maint_week".to_string();
        let mut second = job(2, "cpu", "a");
        second.group_id = 51;
        second.qos = "long".to_string();
        let jobs = vec![first, second];
        let identity = StaticIdentity::default()
            .with_group(50, "hpc")
            .with_group(51, "bio");

        let by_group = JobFilter {
            group: Some("bio".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&by_group.apply(&jobs, &identity)), vec![2]);

        let by_qos = JobFilter {
            qos: Some("normal".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&by_qos.apply(&jobs, &identity)), vec![1]);

        let by_reservation = JobFilter {
            reservation: Some("maint".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&by_reservation.apply(&jobs, &identity)), vec![1]);
    }

    #[test]
    fn partition_records_use_the_same_substring_rule() {
        let filter = JobFilter {
            partition: Some("gpu".to_string()),
            ..Default::default()
        };
        let gpu = PartitionRecord {
            name: "gpu-a100".to_string(),
            nodes: "g[1-4]".to_string(),
        };
        let cpu = PartitionRecord {
            name: "cpu".to_string(),
            nodes: "c[1-4]".to_string(),
        };
        assert!(filter.matches_partition(&gpu));
        assert!(!filter.matches_partition(&cpu));
        assert!(JobFilter::default().matches_partition(&cpu));
    }
}
