use thiserror::Error;

/// Exit status used for every failure to obtain a cluster snapshot.
pub const QUERY_FAILURE_EXIT_CODE: i32 = 3;

#[derive(Debug, Error)]
pub enum ShowqError {
    #[error("{program} binary not found in PATH")]
    BinaryNotFound { program: String },
    #[error("unable to query Slurm information: {program} failed (exit_code={exit_code:?}): {stderr}")]
    QueryFailed {
        program: String,
        exit_code: Option<i32>,
        stderr: String,
    },
    #[error("unable to parse {source_name}: {message}")]
    MalformedOutput {
        source_name: String,
        message: String,
    },
    #[error("unable to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to write report: {source}")]
    WriteFailed {
        #[source]
        source: std::io::Error,
    },
    #[error("invalid command: {message}")]
    InvalidCommand { message: String },
}

impl ShowqError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ShowqError::InvalidCommand { .. } => 2,
            _ => QUERY_FAILURE_EXIT_CODE,
        }
    }
}
