use crate::compliance::domain::{LicenseSet, OutboundReport, Verdict};
use crate::compliance::services::{LicenseAggregator, LicensePair, OutboundResolver};
use crate::ports::outbound::{CompatibilityEvaluator, ProgressReporter, SbomReader};
use crate::shared::Result;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::path::Path;

/// Evaluator processes started at the same time
const EVALUATION_CONCURRENCY: usize = 4;

/// OutboundLicensesUseCase - Suggests outbound licenses for an SBOM
///
/// Each ordered pair of distinct licenses is evaluated exactly once; the
/// verdicts are then folded into candidates by `OutboundResolver`.
///
/// # Type Parameters
/// * `R` - SbomReader implementation
/// * `E` - CompatibilityEvaluator implementation
/// * `PR` - ProgressReporter implementation
pub struct OutboundLicensesUseCase<R, E, PR> {
    reader: R,
    evaluator: E,
    progress_reporter: PR,
}

impl<R, E, PR> OutboundLicensesUseCase<R, E, PR>
where
    R: SbomReader,
    E: CompatibilityEvaluator,
    PR: ProgressReporter,
{
    pub fn new(reader: R, evaluator: E, progress_reporter: PR) -> Self {
        Self {
            reader,
            evaluator,
            progress_reporter,
        }
    }

    /// Reads the SBOM at `path` and resolves outbound candidates.
    ///
    /// `extra_candidates` are proposed as outbound licenses in addition to the
    /// licenses found in the document.
    pub async fn execute(&self, path: &Path, extra_candidates: &[String]) -> Result<OutboundReport> {
        let document = self.reader.read_sbom(path)?;
        let set = LicenseAggregator::aggregate(&document);
        self.resolve(&set, extra_candidates).await
    }

    /// Resolves candidates for an already aggregated license set
    pub async fn resolve(&self, set: &LicenseSet, extra_candidates: &[String]) -> Result<OutboundReport> {
        let pairs = OutboundResolver::pairs(set, extra_candidates);
        if !pairs.is_empty() {
            self.progress_reporter.report(&format!(
                "⚖️  Evaluating {} license pair(s) with {}...",
                pairs.len(),
                self.evaluator.name()
            ));
        }

        let verdicts = self.evaluate_pairs(pairs).await?;
        let report = OutboundResolver::resolve(set, extra_candidates, &verdicts);

        let unknown = report
            .matrix
            .iter()
            .filter(|v| v.verdict == Verdict::Unknown)
            .count();
        if unknown > 0 {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: {} compatibility verdict(s) are unknown; candidates relying on them are flagged",
                unknown
            ));
        }
        self.progress_reporter.report_completion(&format!(
            "✅ Outbound analysis complete: {} candidate(s) for {} license(s)",
            report.candidates.len(),
            report.licenses.len()
        ));

        Ok(report)
    }

    async fn evaluate_pairs(&self, pairs: Vec<LicensePair>) -> Result<HashMap<LicensePair, Verdict>> {
        let total = pairs.len();
        let evaluator = &self.evaluator;

        let mut results = stream::iter(pairs)
            .map(|pair| async move {
                let verdict = evaluator.evaluate(&pair.inbound, &pair.outbound).await;
                (pair, verdict)
            })
            .buffer_unordered(EVALUATION_CONCURRENCY);

        let mut verdicts = HashMap::with_capacity(total);
        while let Some((pair, verdict)) = results.next().await {
            verdicts.insert(pair, verdict?);
            self.progress_reporter
                .report_progress(verdicts.len(), total, Some("Evaluating compatibility..."));
        }

        Ok(verdicts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::domain::SbomDocument;
    use crate::shared::error::SbomError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct TableEvaluator {
        incompatible: Vec<(&'static str, &'static str)>,
        unknown: Vec<(&'static str, &'static str)>,
        fail: bool,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl TableEvaluator {
        fn new() -> Self {
            Self {
                incompatible: Vec::new(),
                unknown: Vec::new(),
                fail: false,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompatibilityEvaluator for TableEvaluator {
        fn name(&self) -> &str {
            "table"
        }

        async fn evaluate(&self, inbound: &str, outbound: &str) -> Result<Verdict> {
            self.calls
                .lock()
                .unwrap()
                .push((inbound.to_string(), outbound.to_string()));
            if self.fail {
                return Err(SbomError::ExternalTool {
                    tool: "table".to_string(),
                    details: "failed to start".to_string(),
                }
                .into());
            }
            let key = (inbound, outbound);
            if self.incompatible.iter().any(|p| *p == key) {
                Ok(Verdict::Incompatible)
            } else if self.unknown.iter().any(|p| *p == key) {
                Ok(Verdict::Unknown)
            } else {
                Ok(Verdict::Compatible)
            }
        }
    }

    struct MockReader(&'static str);

    impl SbomReader for MockReader {
        fn read_sbom(&self, _path: &Path) -> Result<SbomDocument> {
            Ok(serde_json::from_str(self.0)?)
        }
    }

    struct SilentReporter;

    impl ProgressReporter for SilentReporter {
        fn report(&self, _message: &str) {}
        fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
        fn report_error(&self, _message: &str) {}
        fn report_completion(&self, _message: &str) {}
    }

    const SBOM: &str = r#"{
        "bomFormat": "CycloneDX",
        "specVersion": "1.5",
        "components": [
            {"name": "a", "licenses": [{"expression": "MIT"}]},
            {"name": "b", "licenses": [{"expression": "GPL-3.0-only"}]}
        ]
    }"#;

    #[tokio::test]
    async fn test_each_pair_evaluated_once() {
        let use_case =
            OutboundLicensesUseCase::new(MockReader(SBOM), TableEvaluator::new(), SilentReporter);

        use_case.execute(Path::new("sbom.json"), &[]).await.unwrap();

        let mut calls = use_case.evaluator.calls.lock().unwrap().clone();
        calls.sort();
        assert_eq!(
            calls,
            vec![
                ("GPL-3.0-only".to_string(), "MIT".to_string()),
                ("MIT".to_string(), "GPL-3.0-only".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_candidates_follow_verdicts() {
        let mut evaluator = TableEvaluator::new();
        evaluator.incompatible.push(("GPL-3.0-only", "MIT"));
        let use_case = OutboundLicensesUseCase::new(MockReader(SBOM), evaluator, SilentReporter);

        let report = use_case.execute(Path::new("sbom.json"), &[]).await.unwrap();

        let candidates: Vec<&str> = report.candidates.iter().map(|c| c.license.as_str()).collect();
        assert_eq!(candidates, vec!["GPL-3.0-only"]);
        assert_eq!(report.matrix.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_verdict_is_flagged() {
        let mut evaluator = TableEvaluator::new();
        evaluator.unknown.push(("MIT", "GPL-3.0-only"));
        evaluator.incompatible.push(("GPL-3.0-only", "MIT"));
        let use_case = OutboundLicensesUseCase::new(MockReader(SBOM), evaluator, SilentReporter);

        let report = use_case.execute(Path::new("sbom.json"), &[]).await.unwrap();

        assert_eq!(report.candidates.len(), 1);
        assert!(report.candidates[0].has_unknown);
    }

    #[tokio::test]
    async fn test_extra_candidate_is_evaluated() {
        let use_case =
            OutboundLicensesUseCase::new(MockReader(SBOM), TableEvaluator::new(), SilentReporter);

        let report = use_case
            .execute(Path::new("sbom.json"), &["AGPL-3.0-only".to_string()])
            .await
            .unwrap();

        assert!(report.candidates.iter().any(|c| c.license == "AGPL-3.0-only"));
        assert!(report
            .licenses
            .iter()
            .all(|l| l.as_str() != "AGPL-3.0-only"));
    }

    #[tokio::test]
    async fn test_evaluator_failure_aborts() {
        let mut evaluator = TableEvaluator::new();
        evaluator.fail = true;
        let use_case = OutboundLicensesUseCase::new(MockReader(SBOM), evaluator, SilentReporter);

        let err = use_case
            .execute(Path::new("sbom.json"), &[])
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SbomError>(),
            Some(SbomError::ExternalTool { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_document_needs_no_evaluator() {
        const EMPTY: &str = r#"{"bomFormat": "CycloneDX", "specVersion": "1.5", "components": []}"#;
        let use_case =
            OutboundLicensesUseCase::new(MockReader(EMPTY), TableEvaluator::new(), SilentReporter);

        let report = use_case.execute(Path::new("sbom.json"), &[]).await.unwrap();

        assert!(report.candidates.is_empty());
        assert!(report.matrix.is_empty());
        assert!(use_case.evaluator.calls.lock().unwrap().is_empty());
    }
}
