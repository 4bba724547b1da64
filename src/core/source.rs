use std::fs;
use std::path::{Path, PathBuf};

use crate::core::command::QueryCommand;
use crate::core::decode::{decode_jobs, decode_partitions};
use crate::core::error::ShowqError;
use crate::core::job::{JobRecord, PartitionRecord};
use crate::core::runner::run_query;

/// Point-in-time records as returned by the resource manager.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterRecords {
    pub jobs: Vec<JobRecord>,
    pub partitions: Vec<PartitionRecord>,
}

/// Where job and partition records come from. Loading is all-or-nothing.
pub trait ClusterSource {
    fn load(&self) -> Result<ClusterRecords, ShowqError>;
}

/// Live queries through the Slurm client tools.
#[derive(Debug, Clone)]
pub struct SlurmCli {
    pub jobs: QueryCommand,
    pub partitions: QueryCommand,
}

impl SlurmCli {
    pub fn new(squeue: &str, scontrol: &str) -> Result<Self, ShowqError> {
        Ok(Self {
            jobs: QueryCommand::jobs(squeue)?,
            partitions: QueryCommand::partitions(scontrol)?,
        })
    }
}

impl ClusterSource for SlurmCli {
    fn load(&self) -> Result<ClusterRecords, ShowqError> {
        let partitions = decode_partitions(&run_query(&self.partitions)?)?;
        let jobs = decode_jobs(&run_query(&self.jobs)?)?;
        tracing::debug!(
            jobs = jobs.len(),
            partitions = partitions.len(),
            "loaded cluster records"
        );
        Ok(ClusterRecords { jobs, partitions })
    }
}

/// Saved `squeue --json` and `scontrol show partition --json` dumps.
#[derive(Debug, Clone)]
pub struct SnapshotFiles {
    pub jobs: PathBuf,
    pub partitions: PathBuf,
}

fn read_file(path: &Path) -> Result<String, ShowqError> {
    fs::read_to_string(path).map_err(|source| ShowqError::Io {
        path: path.display().to_string(),
        source,
    })
}

impl ClusterSource for SnapshotFiles {
    fn load(&self) -> Result<ClusterRecords, ShowqError> {
        let jobs = decode_jobs(&read_file(&self.jobs)?)?;
        let partitions = decode_partitions(&read_file(&self.partitions)?)?;
        tracing::debug!(
            jobs = jobs.len(),
            partitions = partitions.len(),
            jobs_file = %self.jobs.display(),
            "loaded cluster records from snapshot"
        );
        Ok(ClusterRecords { jobs, partitions })
    }
}
