use std::io;
use thiserror::Error;

use crate::errors::AgentError;

/// Why a tool did not do what it was asked.
///
/// Display text is the observation the model receives, so it reads as a plain sentence.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Missing path or filename.")]
    MissingPathOrFilename,

    #[error("Path does not exist: {0}")]
    PathNotFound(String),

    #[error("File '{name}' already exists in {dir}")]
    FileExists { name: String, dir: String },

    #[error("File does not exist.")]
    FileNotFound,

    #[error("Directory already exists.")]
    DirectoryExists,

    #[error("Directory does not exist.")]
    DirectoryNotFound,

    #[error("Source file not found.")]
    SourceNotFound,

    #[error("Destination path '{0}' already exists")]
    DestinationExists(String),

    #[error("Invalid input format. Expected: {0}")]
    InvalidFormat(&'static str),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("{action}: {source}")]
    Io {
        action: &'static str,
        #[source]
        source: io::Error,
    },

    #[error(
        "Command failed: Command '{command}' returned non-zero exit status {status}.{}",
        output_suffix(.output)
    )]
    CommandFailed {
        command: String,
        status: i32,
        output: String,
    },

    #[error("Command failed: {0}")]
    Spawn(#[source] io::Error),

    #[error("Failed to generate text: {0}")]
    Generation(String),
}

pub type ToolResult<T> = Result<T, ToolError>;

impl ToolError {
    pub(crate) fn io(action: &'static str, source: io::Error) -> Self {
        ToolError::Io { action, source }
    }

    /// True when the arguments could not be understood, as opposed to the operation failing
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            ToolError::InvalidFormat(_) | ToolError::InvalidArguments(_)
        )
    }
}

fn output_suffix(output: &str) -> String {
    if output.trim().is_empty() {
        String::new()
    } else {
        format!("\n{}", output.trim_end())
    }
}

impl From<ToolError> for AgentError {
    fn from(err: ToolError) -> Self {
        if err.is_malformed_input() {
            AgentError::InvalidParameters(err.to_string())
        } else {
            AgentError::ExecutionError(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_includes_output_when_present() {
        let err = ToolError::CommandFailed {
            command: "false".into(),
            status: 1,
            output: String::new(),
        };
        assert_eq!(
            err.to_string(),
            "Command failed: Command 'false' returned non-zero exit status 1."
        );

        let err = ToolError::CommandFailed {
            command: "ls nope".into(),
            status: 2,
            output: "ls: nope: No such file or directory\n".into(),
        };
        assert_eq!(
            err.to_string(),
            "Command failed: Command 'ls nope' returned non-zero exit status 2.\nls: nope: No such file or directory"
        );
    }

    #[test]
    fn test_agent_error_categories() {
        let err: AgentError = ToolError::InvalidFormat("<path>|||<command>").into();
        assert!(matches!(err, AgentError::InvalidParameters(_)));

        let err: AgentError = ToolError::DirectoryNotFound.into();
        assert_eq!(
            err,
            AgentError::ExecutionError("Directory does not exist.".into())
        );
    }
}
