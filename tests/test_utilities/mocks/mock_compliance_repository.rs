use async_trait::async_trait;
use compliance_assistant::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock ComplianceDataRepository for testing
///
/// Answers from a table keyed by canonical purl. Identifiers registered with
/// `with_failure` fail the way the real client does after exhausting retries.
#[derive(Default)]
pub struct MockComplianceRepository {
    facts: HashMap<String, LicenseFact>,
    failing: HashMap<String, u32>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl MockComplianceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_license(mut self, purl: &str, license: &str, copyrights: &[&str]) -> Self {
        self.facts.insert(
            purl.to_string(),
            LicenseFact::new(
                Some(license.to_string()),
                copyrights.iter().map(|c| c.to_string()).collect(),
                None,
            ),
        );
        self
    }

    pub fn with_failure(mut self, purl: &str, attempts: u32) -> Self {
        self.failing.insert(purl.to_string(), attempts);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ComplianceDataRepository for MockComplianceRepository {
    async fn fetch_license_fact(&self, identifier: &PackageIdentifier) -> Result<LicenseFact> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(attempts) = self.failing.get(identifier.as_str()) {
            return Err(SbomError::Lookup {
                identifier: identifier.to_string(),
                attempts: *attempts,
                details: "ClearlyDefined API returned status code 503 Service Unavailable"
                    .to_string(),
            }
            .into());
        }

        Ok(self
            .facts
            .get(identifier.as_str())
            .cloned()
            .unwrap_or_else(LicenseFact::empty))
    }
}
