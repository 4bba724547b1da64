use std::path::PathBuf;

use clap::Parser;

use crate::core::command::{DEFAULT_SCONTROL, DEFAULT_SQUEUE};
use crate::core::error::ShowqError;
use crate::core::filter::JobFilter;
use crate::core::report::View;
use crate::core::source::{ClusterSource, SlurmCli, SnapshotFiles};

#[derive(Debug, Parser)]
#[command(
    name = "showq",
    version,
    about = "A Slurm-compatible implementation of Maui's showq."
)]
pub struct Cli {
    /// Show blocked jobs
    #[arg(short = 'b', long = "blocking")]
    pub blocking: bool,
    /// Show idle jobs
    #[arg(short = 'i', long = "idle")]
    pub idle: bool,
    /// Show running jobs
    #[arg(short = 'r', long = "running")]
    pub running: bool,
    /// Show completed jobs
    #[arg(short = 'c', long = "completed")]
    pub completed: bool,
    /// Show workload summary
    #[arg(short = 's', long = "summary")]
    pub summary: bool,

    /// Show jobs for a specific user
    #[arg(short = 'u', long = "username")]
    pub username: Option<String>,
    /// Show jobs for a specific group
    #[arg(short = 'g', long = "group")]
    pub group: Option<String>,
    /// Show jobs for a specific account
    #[arg(short = 'a', long = "account")]
    pub account: Option<String>,
    /// Show jobs for a specific partition
    #[arg(short = 'p', long = "partition")]
    pub partition: Option<String>,
    /// Show jobs for a specific QoS
    #[arg(short = 'q', long = "qos")]
    pub qos: Option<String>,
    /// Show jobs for a specific reservation
    #[arg(short = 'R', long = "reservation")]
    pub reservation: Option<String>,

    /// Read jobs from a saved `squeue --json` dump instead of querying Slurm
    #[arg(long = "jobs-file", value_name = "FILE", requires = "partitions_file")]
    pub jobs_file: Option<PathBuf>,
    /// Read partitions from a saved `scontrol show partition --json` dump
    #[arg(long = "partitions-file", value_name = "FILE", requires = "jobs_file")]
    pub partitions_file: Option<PathBuf>,
    /// Command used to list jobs
    #[arg(long = "squeue", env = "SHOWQ_SQUEUE", default_value = DEFAULT_SQUEUE, hide = true)]
    pub squeue: String,
    /// Command used to list partitions
    #[arg(long = "scontrol", env = "SHOWQ_SCONTROL", default_value = DEFAULT_SCONTROL, hide = true)]
    pub scontrol: String,

    /// Log query and classification steps to stderr
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Selected view. When several flags are given the first of summary,
    /// completed, running, idle, blocking wins.
    pub fn view(&self) -> View {
        if self.summary {
            View::Summary
        } else if self.completed {
            View::Completed
        } else if self.running {
            View::Running
        } else if self.idle {
            View::Idle
        } else if self.blocking {
            View::Blocked
        } else {
            View::Overview
        }
    }

    pub fn filter(&self) -> JobFilter {
        JobFilter {
            username: self.username.clone(),
            group: self.group.clone(),
            account: self.account.clone(),
            qos: self.qos.clone(),
            partition: self.partition.clone(),
            reservation: self.reservation.clone(),
        }
    }

    pub fn source(&self) -> Result<Box<dyn ClusterSource>, ShowqError> {
        match (&self.jobs_file, &self.partitions_file) {
            (Some(jobs), Some(partitions)) => Ok(Box::new(SnapshotFiles {
                jobs: jobs.clone(),
                partitions: partitions.clone(),
            })),
            _ => Ok(Box::new(SlurmCli::new(&self.squeue, &self.scontrol)?)),
        }
    }
}
