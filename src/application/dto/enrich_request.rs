use crate::compliance::domain::SbomDocument;
use crate::compliance::policies::MergePolicy;

/// Lookups run concurrently unless configured otherwise
pub const DEFAULT_CONCURRENCY: usize = 4;

/// EnrichRequest - Internal request DTO for the enrichment use case
#[derive(Debug, Clone)]
pub struct EnrichRequest {
    /// Document to enrich; ownership moves into the use case
    pub document: SbomDocument,
    /// How fetched facts are merged into declared data
    pub merge_policy: MergePolicy,
    /// Upper bound on lookups in flight at once (1 means sequential)
    pub concurrency: usize,
}

impl EnrichRequest {
    pub fn new(document: SbomDocument, merge_policy: MergePolicy, concurrency: usize) -> Self {
        Self {
            document,
            merge_policy,
            concurrency: concurrency.max(1),
        }
    }
}
