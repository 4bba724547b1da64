use std::fmt::Display;

use chrono::TimeZone;

use crate::core::formatter::{
    format_node_usage, format_optional_duration, format_timestamp_in, format_xfactor, truncate,
};
use crate::core::identity::IdentityLookup;
use crate::core::job::JobRecord;
use crate::core::metrics::{elapsed_secs, remaining_secs, wall_limit_secs, xfactor};
use crate::core::summary::{format_summary, WorkloadSummary};
use crate::core::Report;

/// The one table layout printed per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Abbreviated running, eligible and blocked tables.
    Overview,
    Summary,
    Running,
    Idle,
    Blocked,
    Completed,
}

/// Renders report tables. Timestamps are shown in `tz`.
pub struct Renderer<'a, Tz: TimeZone> {
    pub identity: &'a dyn IdentityLookup,
    pub tz: Tz,
}

impl<'a, Tz> Renderer<'a, Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    pub fn new(identity: &'a dyn IdentityLookup, tz: Tz) -> Self {
        Self { identity, tz }
    }

    pub fn render(&self, view: View, report: &Report<'_>) -> String {
        match view {
            View::Summary => format_summary(&WorkloadSummary::from_buckets(&report.buckets)),
            View::Running => self.running(report),
            View::Idle => self.idle(report),
            View::Blocked => self.blocked(report),
            View::Completed => self.completed(report),
            View::Overview => self.overview(report),
        }
    }

    fn timestamp(&self, epoch: Option<i64>) -> String {
        format_timestamp_in(&self.tz, epoch)
    }

    fn running(&self, report: &Report<'_>) -> String {
        let jobs = &report.buckets.running;
        let mut out = String::from("\nactive jobs------------------------\n");
        out.push_str(&format!(
            "{:<19} {:<10} {:>3} {:>7} {:>2} {:>9} {:>9} {:>16} {:>5} {:>11}  {:>21}\n\n",
            "JOBID", "STATUS", "PAR", "XFACTOR", "Q", "USERNAME", "GROUP", "MHOST", "PROCS",
            "REMAINING", "STARTTIME"
        ));
        for job in jobs {
            out.push_str(&format!(
                "{:<19} {:<10} {:>3} {:>7} {:>2} {:>9} {:>9} {:>16} {:>5} {:>11}  {:>21}\n",
                job.job_id,
                job.state.label(),
                truncate(&job.partition, 3),
                format_xfactor(xfactor(job, report.now)),
                truncate(&job.qos, 2),
                self.identity.user_name(job.user_id),
                self.identity.group_name(job.group_id),
                job.batch_host,
                job.num_tasks,
                format_optional_duration(remaining_secs(job, report.now)),
                self.timestamp(job.start_time),
            ));
        }
        out.push_str(&format!(
            "\n{} active jobs\t\t{}\n\nTotal jobs: {}\n\n",
            jobs.len(),
            format_node_usage(&report.nodes),
            jobs.len()
        ));
        out
    }

    fn idle(&self, report: &Report<'_>) -> String {
        let jobs = &report.buckets.idle;
        let mut out = String::from("\neligible jobs----------------------\n");
        out.push_str(&format!(
            "{:<19} {:>10} {:>3} {:>7} {:>2} {:>9} {:>9} {:>5} {:>11}  {:>21}\n\n",
            "JOBID", "PRIORITY", "PAR", "XFACTOR", "Q", "USERNAME", "GROUP", "PROCS", "WCLIMIT",
            "SYSTEMQUEUETIME"
        ));
        for job in jobs {
            out.push_str(&format!(
                "{:<19} {:>10} {:>3} {:>7} {:>2} {:>9} {:>9} {:>5} {:>11}  {:>21}\n",
                job.job_id,
                job.priority,
                truncate(&job.partition, 3),
                format_xfactor(xfactor(job, report.now)),
                truncate(&job.qos, 2),
                self.identity.user_name(job.user_id),
                self.identity.group_name(job.group_id),
                job.num_tasks,
                format_optional_duration(wall_limit_secs(job)),
                self.timestamp(job.submit_time),
            ));
        }
        out.push_str(&format!(
            "\n{} eligible jobs\n\nTotal jobs: {}\n\n",
            jobs.len(),
            jobs.len()
        ));
        out
    }

    fn blocked(&self, report: &Report<'_>) -> String {
        let jobs = &report.buckets.blocked;
        let mut out = String::from("\nblocked jobs-----------------------\n");
        out.push_str(&format!(
            "{:<18} {:>8} {:>8} {:>10} {:>5} {:>11}  {:>21}\n\n",
            "JOBID", "USERNAME", "GROUP", "STATE", "PROCS", "WCLIMIT", "QUEUETIME"
        ));
        for job in jobs {
            out.push_str(&format!(
                "{:<18} {:>8} {:>8} {:>10} {:>5} {:>11}  {:>21}\n",
                job.job_id,
                self.identity.user_name(job.user_id),
                self.identity.group_name(job.group_id),
                job.state.label(),
                job.num_tasks,
                format_optional_duration(wall_limit_secs(job)),
                self.timestamp(job.submit_time),
            ));
        }
        out.push_str(&format!(
            "\n{} blocked jobs\n\nTotal jobs: {}\n\n",
            jobs.len(),
            jobs.len()
        ));
        out
    }

    fn completed(&self, report: &Report<'_>) -> String {
        let jobs = &report.buckets.completed;
        let mut out = String::from("\ncompleted jobs---------------------\n");
        out.push_str(&format!(
            "{:<19} {:<10} {:<6} {:>3} {:>7} {:>2} {:>9} {:>9} {:>16} {:>5} {:>11}  {:>21}\n\n",
            "JOBID", "STATUS", "CCODE", "PAR", "XFACTOR", "Q", "USERNAME", "GROUP", "MHOST",
            "PROCS", "WALLTIME", "COMPLETIONTIME"
        ));
        for job in jobs {
            out.push_str(&format!(
                "{:<19} {:<10} {:<6} {:>3} {:>7} {:>2} {:>9} {:>9} {:>16} {:>5} {:>11}  {:>21}\n",
                job.job_id,
                job.state.label(),
                job.exit_code,
                truncate(&job.partition, 3),
                format_xfactor(xfactor(job, report.now)),
                truncate(&job.qos, 2),
                self.identity.user_name(job.user_id),
                self.identity.group_name(job.group_id),
                job.batch_host,
                job.num_tasks,
                format_optional_duration(elapsed_secs(job)),
                self.timestamp(job.end_time),
            ));
        }
        out.push_str(&format!(
            "\n{} completed jobs\n\nTotal jobs: {}\n\n",
            jobs.len(),
            jobs.len()
        ));
        out
    }

    fn brief_header(&self, title: &str, duration_column: &str, time_column: &str) -> String {
        format!(
            "{title}\n{:<18} {:>8} {:>10} {:>5} {:>11}  {:>21}\n\n",
            "JOBID", "USERNAME", "STATE", "PROCS", duration_column, time_column
        )
    }

    fn brief_row(&self, job: &JobRecord, duration: Option<i64>, time: Option<i64>) -> String {
        format!(
            "{:<18} {:>8} {:>10} {:>5} {:>11}  {:>21}\n",
            job.job_id,
            self.identity.user_name(job.user_id),
            job.state.label(),
            job.num_tasks,
            format_optional_duration(duration),
            self.timestamp(time),
        )
    }

    fn overview(&self, report: &Report<'_>) -> String {
        let buckets = &report.buckets;
        let mut out = String::from("\n");

        out.push_str(&self.brief_header(
            "active jobs------------------------",
            "REMAINING",
            "STARTTIME",
        ));
        for job in &buckets.running {
            out.push_str(&self.brief_row(job, remaining_secs(job, report.now), job.start_time));
        }
        out.push_str(&format!(
            "\n{} active jobs\t\t{}",
            buckets.running.len(),
            format_node_usage(&report.nodes)
        ));

        out.push_str("\n\n");
        out.push_str(&self.brief_header(
            "eligible jobs----------------------",
            "WCLIMIT",
            "QUEUETIME",
        ));
        for job in &buckets.idle {
            out.push_str(&self.brief_row(job, wall_limit_secs(job), job.submit_time));
        }
        out.push_str(&format!("\n{} eligible jobs", buckets.idle.len()));

        out.push_str("\n\n");
        out.push_str(&self.brief_header(
            "blocked jobs-----------------------",
            "WCLIMIT",
            "QUEUETIME",
        ));
        for job in &buckets.blocked {
            out.push_str(&self.brief_row(job, wall_limit_secs(job), job.submit_time));
        }
        out.push_str(&format!(
            "\n{} blocked jobs\n\nTotal jobs: {}\n\n",
            buckets.blocked.len(),
            WorkloadSummary::from_buckets(buckets).total()
        ));
        out
    }
}
