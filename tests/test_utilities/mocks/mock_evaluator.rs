use async_trait::async_trait;
use compliance_assistant::prelude::*;
use std::collections::HashMap;

/// Mock CompatibilityEvaluator answering from a verdict table
///
/// Pairs missing from the table are compatible.
#[derive(Default)]
pub struct MockEvaluator {
    verdicts: HashMap<(String, String), Verdict>,
}

#[allow(dead_code)]
impl MockEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verdict(mut self, inbound: &str, outbound: &str, verdict: Verdict) -> Self {
        self.verdicts
            .insert((inbound.to_string(), outbound.to_string()), verdict);
        self
    }
}

#[async_trait]
impl CompatibilityEvaluator for MockEvaluator {
    fn name(&self) -> &str {
        "mock-evaluator"
    }

    async fn evaluate(&self, inbound: &str, outbound: &str) -> Result<Verdict> {
        Ok(self
            .verdicts
            .get(&(inbound.to_string(), outbound.to_string()))
            .copied()
            .unwrap_or(Verdict::Compatible))
    }
}
