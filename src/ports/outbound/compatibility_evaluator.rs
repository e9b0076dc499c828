use crate::compliance::domain::Verdict;
use crate::shared::Result;
use async_trait::async_trait;

/// CompatibilityEvaluator port for license compatibility checks
///
/// Answers whether code licensed under `inbound` may be distributed under
/// `outbound`. The production adapter shells out to flict.
#[async_trait]
pub trait CompatibilityEvaluator: Send + Sync {
    /// Program name shown in progress messages
    fn name(&self) -> &str;

    /// # Errors
    /// Returns `SbomError::ExternalTool` if the evaluator cannot be run.
    /// An answer the evaluator does not understand is `Verdict::Unknown`,
    /// not an error.
    async fn evaluate(&self, inbound: &str, outbound: &str) -> Result<Verdict>;
}
