use serde::Serialize;

/// Why a component was not enriched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    /// No package identifier, or one that could not be parsed
    Skipped,
    /// The lookup failed after all retries
    Failed,
}

/// One component that was skipped or whose lookup failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentIssue {
    /// Position of the component in the document
    pub index: usize,
    pub component: String,
    pub kind: IssueKind,
    pub reason: String,
}

/// Summary of one enrichment run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnrichmentReport {
    pub total: usize,
    pub enriched: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Components whose license, copyright or discovered-* properties changed
    pub changed: usize,
    /// Lookups issued through the cache
    pub lookups: usize,
    /// Requests that actually reached the compliance data service
    pub fetches: usize,
    pub issues: Vec<ComponentIssue>,
}

impl EnrichmentReport {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    pub fn record_enriched(&mut self, changed: bool) {
        self.enriched += 1;
        if changed {
            self.changed += 1;
        }
    }

    pub fn record_skipped(&mut self, index: usize, component: String, reason: String) {
        self.skipped += 1;
        self.issues.push(ComponentIssue {
            index,
            component,
            kind: IssueKind::Skipped,
            reason,
        });
    }

    pub fn record_failed(&mut self, index: usize, component: String, reason: String) {
        self.failed += 1;
        self.issues.push(ComponentIssue {
            index,
            component,
            kind: IssueKind::Failed,
            reason,
        });
    }

    /// True when lookups were attempted and none of them succeeded
    pub fn is_incomplete(&self) -> bool {
        self.failed > 0 && self.enriched == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &ComponentIssue> {
        self.issues.iter().filter(|i| i.kind == IssueKind::Failed)
    }
}
