use std::path::Path;
use std::process::{Command, Stdio};

use super::arguments::TerminalArgs;
use super::error::{ToolError, ToolResult};
use super::ToolOutput;

/// Run a command through the system shell inside the given directory.
///
/// stderr is redirected into stdout by the shell so the two interleave in the captured text.
/// Anything the shell itself reports before running the command (syntax errors) is appended.
/// There is no allow-list, timeout or resource limit.
pub fn terminal_tool(args: &TerminalArgs) -> ToolResult<ToolOutput> {
    let directory = Path::new(&args.directory);
    if !directory.is_dir() {
        return Err(ToolError::DirectoryNotFound);
    }
    if args.command.trim().is_empty() {
        return Err(ToolError::InvalidArguments(
            "'command' must not be empty".into(),
        ));
    }

    tracing::debug!(directory = %directory.display(), command = %args.command, "running shell command");

    let output = shell_command(&args.command)
        .current_dir(directory)
        .stdin(Stdio::null())
        .output()
        .map_err(ToolError::Spawn)?;

    let mut output_str = String::from_utf8_lossy(&output.stdout).to_string();
    output_str.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        return Err(ToolError::CommandFailed {
            command: args.command.clone(),
            status: output.status.code().unwrap_or(-1),
            output: output_str,
        });
    }
    Ok(ToolOutput::CommandOutput(output_str))
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    // A brace group keeps the redirect applied to the whole command, even with a trailing comment
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(format!("{{ {}\n}} 2>&1", command));
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(format!("{} 2>&1", command));
    cmd
}
