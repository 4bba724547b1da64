use std::process::{Command, Stdio};

use crate::core::command::QueryCommand;
use crate::core::error::ShowqError;

/// Runs a query to completion and returns its standard output.
pub fn run_query(query: &QueryCommand) -> Result<String, ShowqError> {
    tracing::debug!(command = %query.display(), "running resource manager query");

    let mut cmd = Command::new(&query.program);
    cmd.args(query.to_args())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let output = cmd.output().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ShowqError::BinaryNotFound {
                program: query.program.clone(),
            }
        } else {
            ShowqError::QueryFailed {
                program: query.program.clone(),
                exit_code: None,
                stderr: e.to_string(),
            }
        }
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        tracing::error!(
            command = %query.display(),
            exit_code = ?output.status.code(),
            "resource manager query failed"
        );
        return Err(ShowqError::QueryFailed {
            program: query.program.clone(),
            exit_code: output.status.code(),
            stderr,
        });
    }

    String::from_utf8(output.stdout).map_err(|err| ShowqError::MalformedOutput {
        source_name: format!("{} output", query.program),
        message: err.to_string(),
    })
}
