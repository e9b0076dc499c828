use crate::shared::error::SbomError;
use crate::shared::Result;
use std::ffi::OsString;
use std::process::Stdio;
use tokio::process::Command;

/// Captured result of an external program run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Trimmed stdout, falling back to stderr when stdout is empty
    pub fn diagnostics(&self) -> String {
        let stdout = self.stdout.trim();
        let stderr = self.stderr.trim();
        match (stdout.is_empty(), stderr.is_empty()) {
            (false, false) => format!("{}\n{}", stdout, stderr),
            (false, true) => stdout.to_string(),
            (true, false) => stderr.to_string(),
            (true, true) => "no output".to_string(),
        }
    }
}

/// Runs `program` with `args` and captures its output.
///
/// The child is killed if the returned future is dropped, so an interrupted
/// command does not leave it running. Only a failure to start the program is
/// an error here; callers decide what a non-zero exit means.
pub async fn run_command(program: &str, args: &[OsString]) -> Result<CommandOutput> {
    tracing::debug!(program, args = ?args, "running external program");

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| SbomError::ExternalTool {
            tool: program.to_string(),
            details: format!("failed to start: {}", e),
        })?;

    let result = CommandOutput {
        success: output.status.success(),
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    tracing::debug!(program, code = ?result.code, "external program finished");
    Ok(result)
}
