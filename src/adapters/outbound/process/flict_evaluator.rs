use super::command_runner::run_command;
use crate::compliance::domain::Verdict;
use crate::ports::outbound::CompatibilityEvaluator;
use crate::shared::error::SbomError;
use crate::shared::Result;
use async_trait::async_trait;
use std::ffi::OsString;

pub const DEFAULT_FLICT_PROGRAM: &str = "flict";

/// FlictEvaluator adapter asking flict whether two licenses are compatible
///
/// Runs `flict -of text verify -il <inbound> -ol <outbound>`. flict prints
/// `Yes` or `No`; anything else is treated as unknown.
pub struct FlictEvaluator {
    program: String,
}

impl FlictEvaluator {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for FlictEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_FLICT_PROGRAM)
    }
}

#[async_trait]
impl CompatibilityEvaluator for FlictEvaluator {
    fn name(&self) -> &str {
        &self.program
    }

    async fn evaluate(&self, inbound: &str, outbound: &str) -> Result<Verdict> {
        let args: Vec<OsString> = ["-of", "text", "verify", "-il", inbound, "-ol", outbound]
            .iter()
            .map(OsString::from)
            .collect();

        let output = run_command(&self.program, &args).await?;
        let stdout = output.stdout.trim();

        if !output.success && stdout.is_empty() {
            return Err(SbomError::ExternalTool {
                tool: self.program.clone(),
                details: output.diagnostics(),
            }
            .into());
        }
        if !output.success {
            tracing::warn!(
                inbound,
                outbound,
                code = ?output.code,
                stderr = %output.stderr.trim(),
                "flict exited with an error"
            );
        }

        let verdict = parse_verdict(stdout);
        tracing::debug!(inbound, outbound, %verdict, "evaluated license pair");
        Ok(verdict)
    }
}

/// Maps flict's text answer to a verdict
pub fn parse_verdict(output: &str) -> Verdict {
    match output.trim() {
        "Yes" => Verdict::Compatible,
        "No" => Verdict::Incompatible,
        _ => Verdict::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_verdict() {
        assert_eq!(parse_verdict("Yes"), Verdict::Compatible);
        assert_eq!(parse_verdict("Yes\n"), Verdict::Compatible);
        assert_eq!(parse_verdict("No"), Verdict::Incompatible);
        assert_eq!(parse_verdict("Question"), Verdict::Unknown);
        assert_eq!(parse_verdict(""), Verdict::Unknown);
    }

    #[tokio::test]
    async fn test_missing_flict_is_external_tool_error() {
        let evaluator = FlictEvaluator::new("compliance-assistant-no-such-flict");
        let err = evaluator.evaluate("MIT", "Apache-2.0").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SbomError>(),
            Some(SbomError::ExternalTool { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_evaluate_with_stub_program() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::TempDir::new().unwrap();
        let script = temp_dir.path().join("flict");
        // Answers Yes only for MIT -> Apache-2.0
        std::fs::write(
            &script,
            "#!/bin/sh\nif [ \"$5\" = MIT ] && [ \"$7\" = Apache-2.0 ]; then echo Yes; else echo No; fi\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let evaluator = FlictEvaluator::new(script.to_string_lossy().into_owned());
        assert_eq!(
            evaluator.evaluate("MIT", "Apache-2.0").await.unwrap(),
            Verdict::Compatible
        );
        assert_eq!(
            evaluator.evaluate("Apache-2.0", "MIT").await.unwrap(),
            Verdict::Incompatible
        );
    }
}
