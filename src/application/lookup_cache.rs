use crate::compliance::domain::{LicenseFact, PackageIdentifier};
use crate::ports::outbound::ComplianceDataRepository;
use crate::shared::error::SbomError;
use crate::shared::Result;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;

type CachedOutcome = std::result::Result<LicenseFact, SbomError>;

/// Per-run memo of compliance lookups, keyed by canonical package identifier
///
/// Concurrent callers asking for the same identifier share a single fetch;
/// the first completion is what every caller sees. Failures are memoised too,
/// so a failing identifier goes through the retry sequence only once per run.
#[derive(Default)]
pub struct LookupCache {
    entries: DashMap<String, Arc<OnceCell<CachedOutcome>>>,
    lookups: AtomicUsize,
    fetches: AtomicUsize,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the fact for `identifier`, asking `repository` only the first
    /// time the identifier is seen.
    pub async fn get_or_fetch<R>(
        &self,
        identifier: &PackageIdentifier,
        repository: &R,
    ) -> Result<LicenseFact>
    where
        R: ComplianceDataRepository + ?Sized,
    {
        self.lookups.fetch_add(1, Ordering::Relaxed);

        // The map guard must not be held across the await below.
        let cell = self
            .entries
            .entry(identifier.as_str().to_string())
            .or_default()
            .value()
            .clone();

        let outcome = cell
            .get_or_init(|| async {
                self.fetches.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(identifier = %identifier, "cache miss, fetching");
                repository
                    .fetch_license_fact(identifier)
                    .await
                    .map_err(|e| into_lookup_error(identifier, e))
            })
            .await;

        outcome.clone().map_err(Into::into)
    }

    /// Number of calls made through the cache
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    /// Number of calls that reached the repository
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn into_lookup_error(identifier: &PackageIdentifier, error: anyhow::Error) -> SbomError {
    match error.downcast::<SbomError>() {
        Ok(typed) => typed,
        Err(other) => SbomError::Lookup {
            identifier: identifier.to_string(),
            attempts: 1,
            details: format!("{:#}", other),
        },
    }
}
