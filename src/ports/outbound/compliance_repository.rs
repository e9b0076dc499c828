use crate::compliance::domain::{LicenseFact, PackageIdentifier};
use crate::shared::Result;
use async_trait::async_trait;

/// ComplianceDataRepository port for fetching license and copyright facts
///
/// This port abstracts the compliance data service (ClearlyDefined) so the
/// enrichment pipeline can be exercised without network access.
///
/// # Async Support
/// Lookups for different packages run concurrently, so implementations must
/// be `Send + Sync`.
#[async_trait]
pub trait ComplianceDataRepository: Send + Sync {
    /// Fetches the license fact for one package
    ///
    /// # Errors
    /// Returns `SbomError::Lookup` once the retry budget is exhausted, or
    /// `SbomError::InvalidIdentifier` when the package cannot be mapped to a
    /// service key.
    async fn fetch_license_fact(&self, identifier: &PackageIdentifier) -> Result<LicenseFact>;
}
