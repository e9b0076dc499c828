use crate::compliance::domain::{EnrichmentReport, SbomDocument};

/// EnrichResponse - Internal response DTO for the enrichment use case
#[derive(Debug, Clone)]
pub struct EnrichResponse {
    /// The enriched document, components in their original order
    pub document: SbomDocument,
    /// Counters and per-component issues of the run
    pub report: EnrichmentReport,
}

impl EnrichResponse {
    pub fn new(document: SbomDocument, report: EnrichmentReport) -> Self {
        Self { document, report }
    }
}
