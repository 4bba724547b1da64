use crate::core::error::ShowqError;

pub const DEFAULT_SQUEUE: &str = "squeue";
pub const DEFAULT_SCONTROL: &str = "scontrol";

/// One resource-manager query: a program, a fixed prefix of arguments taken
/// from the configured command line, and the query arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryCommand {
    pub program: String,
    pub prefix_args: Vec<String>,
    pub query_args: Vec<String>,
}

impl QueryCommand {
    /// Splits a configured command line such as `ssh login squeue` into a
    /// program and its leading arguments.
    pub fn from_command_line(command_line: &str, query_args: &[&str]) -> Result<Self, ShowqError> {
        let mut words = shell_words::split(command_line).map_err(|err| {
            ShowqError::InvalidCommand {
                message: format!("{command_line:?}: {err}"),
            }
        })?;
        if words.is_empty() {
            return Err(ShowqError::InvalidCommand {
                message: "empty query command".to_string(),
            });
        }
        let program = words.remove(0);

        Ok(Self {
            program,
            prefix_args: words,
            query_args: query_args.iter().map(|arg| arg.to_string()).collect(),
        })
    }

    pub fn jobs(command_line: &str) -> Result<Self, ShowqError> {
        Self::from_command_line(command_line, &["--all", "--json"])
    }

    pub fn partitions(command_line: &str) -> Result<Self, ShowqError> {
        Self::from_command_line(command_line, &["show", "partition", "--all", "--json"])
    }

    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        args.extend(self.prefix_args.iter().cloned());
        args.extend(self.query_args.iter().cloned());
        args
    }

    pub fn display(&self) -> String {
        let mut words = vec![self.program.clone()];
        words.extend(self.to_args());
        shell_words::join(words)
    }
}
