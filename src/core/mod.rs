use std::io::Write;

use chrono::Local;

pub mod classify;
pub mod command;
pub mod decode;
pub mod error;
pub mod filter;
pub mod formatter;
pub mod hostlist;
pub mod identity;
pub mod job;
pub mod metrics;
pub mod report;
pub mod runner;
pub mod source;
pub mod summary;
pub mod utilization;

use classify::{classify_job, Category};
use error::ShowqError;
use filter::JobFilter;
use identity::IdentityLookup;
use job::JobRecord;
use report::{Renderer, View};
use source::{ClusterRecords, ClusterSource};
use utilization::{node_utilization, NodeUtilization};

/// Jobs of one pass sorted into their categories, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Buckets<'a> {
    pub running: Vec<&'a JobRecord>,
    pub idle: Vec<&'a JobRecord>,
    pub blocked: Vec<&'a JobRecord>,
    pub completed: Vec<&'a JobRecord>,
}

impl<'a> Buckets<'a> {
    pub fn push(&mut self, job: &'a JobRecord) {
        match classify_job(job) {
            Category::Running => self.running.push(job),
            Category::Idle => self.idle.push(job),
            Category::Blocked => self.blocked.push(job),
            Category::Completed => self.completed.push(job),
        }
    }

    pub fn get(&self, category: Category) -> &[&'a JobRecord] {
        match category {
            Category::Running => &self.running,
            Category::Idle => &self.idle,
            Category::Blocked => &self.blocked,
            Category::Completed => &self.completed,
        }
    }

    pub fn len(&self) -> usize {
        self.running.len() + self.idle.len() + self.blocked.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> FromIterator<&'a JobRecord> for Buckets<'a> {
    fn from_iter<I: IntoIterator<Item = &'a JobRecord>>(iter: I) -> Self {
        let mut buckets = Buckets::default();
        for job in iter {
            buckets.push(job);
        }
        buckets
    }
}

/// Everything the renderer needs for one point-in-time report.
#[derive(Debug, Clone, PartialEq)]
pub struct Report<'a> {
    pub buckets: Buckets<'a>,
    pub nodes: NodeUtilization,
    /// Evaluation instant, epoch seconds.
    pub now: i64,
}

/// Filters, classifies and aggregates one snapshot. Depends only on its inputs.
pub fn build_report<'a>(
    records: &'a ClusterRecords,
    filter: &JobFilter,
    identity: &dyn IdentityLookup,
    now: i64,
) -> Report<'a> {
    let buckets: Buckets<'a> = filter.apply(&records.jobs, identity).into_iter().collect();
    tracing::debug!(
        total = records.jobs.len(),
        filtered = !filter.is_empty(),
        running = buckets.running.len(),
        idle = buckets.idle.len(),
        blocked = buckets.blocked.len(),
        completed = buckets.completed.len(),
        "classified jobs"
    );
    let nodes = node_utilization(
        buckets.running.iter().copied(),
        &records.partitions,
        filter,
    );

    Report {
        buckets,
        nodes,
        now,
    }
}

/// Loads a snapshot and renders the requested view in local time.
pub fn run(
    source: &dyn ClusterSource,
    filter: &JobFilter,
    view: View,
    identity: &dyn IdentityLookup,
) -> Result<String, ShowqError> {
    let records = source.load()?;
    let now = Local::now().timestamp();
    let report = build_report(&records, filter, identity, now);
    Ok(Renderer::new(identity, Local).render(view, &report))
}

/// Writes and flushes a rendered report.
pub fn write_report<W: Write>(out: &mut W, report: &str) -> Result<(), ShowqError> {
    out.write_all(report.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|source| ShowqError::WriteFailed { source })
}
