use crate::core::filter::JobFilter;
use crate::core::hostlist::NodeSet;
use crate::core::job::{JobRecord, PartitionRecord};

/// Share of the selected partitions' nodes hosting at least one running job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Utilization {
    Percent(f64),
    /// The selected partitions have no nodes.
    Undefined,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeUtilization {
    pub active_nodes: usize,
    pub partition_nodes: usize,
    pub utilization: Utilization,
}

impl NodeUtilization {
    pub fn from_counts(active_nodes: usize, partition_nodes: usize) -> Self {
        let utilization = if partition_nodes == 0 {
            Utilization::Undefined
        } else {
            Utilization::Percent(active_nodes as f64 * 100.0 / partition_nodes as f64)
        };
        Self {
            active_nodes,
            partition_nodes,
            utilization,
        }
    }
}

pub fn running_node_set<'a, I>(running: I) -> NodeSet
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    running.into_iter().map(|job| job.nodes.as_str()).collect()
}

pub fn partition_node_set(partitions: &[PartitionRecord], filter: &JobFilter) -> NodeSet {
    partitions
        .iter()
        .filter(|partition| filter.matches_partition(partition))
        .map(|partition| partition.nodes.as_str())
        .collect()
}

pub fn node_utilization<'a, I>(
    running: I,
    partitions: &[PartitionRecord],
    filter: &JobFilter,
) -> NodeUtilization
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    let active = running_node_set(running);
    let available = partition_node_set(partitions, filter);
    tracing::debug!(
        active_nodes = active.len(),
        partition_nodes = available.len(),
        "computed node utilization"
    );
    NodeUtilization::from_counts(active.len(), available.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::job::JobState;

    fn running(nodes: &str) -> JobRecord {
        JobRecord {
            state: JobState::Running,
            nodes: nodes.to_string(),
            ..Default::default()
        }
    }

    fn partition(name: &str, nodes: &str) -> PartitionRecord {
        PartitionRecord {
            name: name.to_string(),
            nodes: nodes.to_string(),
        }
    }

    #[test]
    fn three_of_ten_nodes_is_thirty_percent() {
        let jobs = vec![running("n[01-02]"), running("n02"), running("n07")];
        let partitions = vec![partition("cpu", "n[01-10]")];
        let result = node_utilization(&jobs, &partitions, &JobFilter::default());
        assert_eq!(result.active_nodes, 3);
        assert_eq!(result.partition_nodes, 10);
        assert_eq!(result.utilization, Utilization::Percent(30.0));
    }

    #[test]
    fn empty_partition_set_is_undefined() {
        let jobs = vec![running("n01")];
        let result = node_utilization(&jobs, &[], &JobFilter::default());
        assert_eq!(result.partition_nodes, 0);
        assert_eq!(result.utilization, Utilization::Undefined);
    }

    #[test]
    fn overlapping_partitions_count_nodes_once() {
        let partitions = vec![
            partition("gpu", "g[1-4]"),
            partition("gpu-long", "g[3-6]"),
            partition("cpu", "c[1-100]"),
        ];
        let filter = JobFilter {
            partition: Some("gpu".to_string()),
            ..Default::default()
        };
        assert_eq!(partition_node_set(&partitions, &filter).len(), 6);
    }

    #[test]
    fn pending_jobs_without_nodes_add_nothing() {
        let jobs = vec![running(""), running("c1")];
        assert_eq!(running_node_set(&jobs).len(), 1);
    }
}
