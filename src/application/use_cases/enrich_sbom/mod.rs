use crate::adapters::outbound::console::bar_style;
use crate::application::dto::{EnrichRequest, EnrichResponse};
use crate::application::lookup_cache::LookupCache;
use crate::compliance::domain::{EnrichmentReport, LicenseFact, PackageIdentifier, SbomDocument};
use crate::compliance::policies::{excerpt, MergePolicy};
use crate::compliance::services::MetadataStamper;
use crate::ports::outbound::{ComplianceDataRepository, OutputPresenter, ProgressReporter};
use crate::shared::error::SbomError;
use crate::shared::Result;
use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// What happened to one component during the lookup phase
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentOutcome {
    Fetched(LicenseFact),
    Skipped(String),
    Failed(String),
}

/// EnrichSbomUseCase - Adds license and copyright data to SBOM components
///
/// Every component with a valid package identifier is looked up through a
/// per-run `LookupCache`, so identifiers shared by several components reach
/// the repository once. Lookups run concurrently up to the requested bound and
/// their results are applied in document order. A failed lookup leaves its
/// component untouched and is counted; it never aborts the run.
///
/// # Type Parameters
/// * `REPO` - ComplianceDataRepository implementation
/// * `PR` - ProgressReporter implementation
pub struct EnrichSbomUseCase<REPO, PR> {
    repository: REPO,
    progress_reporter: PR,
}

impl<REPO, PR> EnrichSbomUseCase<REPO, PR>
where
    REPO: ComplianceDataRepository,
    PR: ProgressReporter,
{
    /// Creates a new EnrichSbomUseCase with injected dependencies
    pub fn new(repository: REPO, progress_reporter: PR) -> Self {
        Self {
            repository,
            progress_reporter,
        }
    }

    /// Enriches the document with a fresh lookup cache
    pub async fn execute(&self, request: EnrichRequest) -> Result<EnrichResponse> {
        let cache = LookupCache::new();
        self.execute_with_cache(request, &cache).await
    }

    /// Enriches the document and hands it to `presenter` once every component
    /// has been processed.
    ///
    /// When `cancel` completes first, outstanding lookups are dropped, nothing
    /// is presented and `SbomError::Interrupted` is returned.
    pub async fn execute_and_present<C>(
        &self,
        request: EnrichRequest,
        presenter: &dyn OutputPresenter,
        cancel: C,
    ) -> Result<EnrichmentReport>
    where
        C: Future<Output = ()>,
    {
        let EnrichResponse { document, report } = tokio::select! {
            result = self.execute(request) => result?,
            _ = cancel => return Err(SbomError::Interrupted.into()),
        };

        presenter.present(&document.to_pretty_json()?)?;
        Ok(report)
    }

    /// Enriches the document using a caller-provided lookup cache
    ///
    /// # Returns
    /// The enriched document (version bumped, metadata stamped) and the report
    pub async fn execute_with_cache(
        &self,
        request: EnrichRequest,
        cache: &LookupCache,
    ) -> Result<EnrichResponse> {
        let EnrichRequest {
            mut document,
            merge_policy,
            concurrency,
        } = request;

        // Step 1: Resolve package identifiers
        let (mut outcomes, pending) = Self::resolve_identifiers(&document);

        // Step 2: Look up every resolvable component
        if !pending.is_empty() {
            self.progress_reporter.report(&format!(
                "🔍 Fetching license data for {} component(s) from ClearlyDefined...",
                pending.len()
            ));
            outcomes.extend(self.lookup_with_progress(pending, cache, concurrency).await);
        }
        outcomes.sort_by_key(|(index, _)| *index);

        // Step 3: Merge results in document order
        let mut report = self.apply_outcomes(&mut document, outcomes, merge_policy);
        report.lookups = cache.lookups();
        report.fetches = cache.fetches();

        // Step 4: Record the run in the document metadata
        MetadataStamper::stamp_default(&mut document);

        self.report_summary(&report);
        Ok(EnrichResponse::new(document, report))
    }

    /// Splits components into those that need a lookup and those skipped up front
    #[allow(clippy::type_complexity)]
    fn resolve_identifiers(
        document: &SbomDocument,
    ) -> (
        Vec<(usize, ComponentOutcome)>,
        Vec<(usize, PackageIdentifier)>,
    ) {
        let mut skipped = Vec::new();
        let mut pending = Vec::new();

        for (index, component) in document.components().iter().enumerate() {
            match component.purl.as_deref().map(str::trim) {
                None | Some("") => {
                    skipped.push((
                        index,
                        ComponentOutcome::Skipped("no package identifier".to_string()),
                    ));
                }
                Some(purl) => match PackageIdentifier::parse(purl) {
                    Ok(identifier) => pending.push((index, identifier)),
                    Err(e) => skipped.push((index, ComponentOutcome::Skipped(reason_of(&e)))),
                },
            }
        }

        (skipped, pending)
    }

    /// Runs the lookups with a progress bar on stderr
    ///
    /// Results come back in completion order; the caller reorders them.
    async fn lookup_with_progress(
        &self,
        pending: Vec<(usize, PackageIdentifier)>,
        cache: &LookupCache,
        concurrency: usize,
    ) -> Vec<(usize, ComponentOutcome)> {
        let progress = LookupProgress::start(pending.len());
        let repository = &self.repository;

        stream::iter(pending)
            .map(|(index, identifier)| {
                let completed = progress.counter();
                async move {
                    let outcome = match cache.get_or_fetch(&identifier, repository).await {
                        Ok(fact) => ComponentOutcome::Fetched(fact),
                        // Rejected before any request was made, e.g. no coordinates
                        Err(e) if is_invalid_identifier(&e) => {
                            ComponentOutcome::Skipped(reason_of(&e))
                        }
                        Err(e) => ComponentOutcome::Failed(reason_of(&e)),
                    };
                    completed.fetch_add(1, Ordering::Relaxed);
                    (index, outcome)
                }
            })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await
    }

    fn apply_outcomes(
        &self,
        document: &mut SbomDocument,
        outcomes: Vec<(usize, ComponentOutcome)>,
        merge_policy: MergePolicy,
    ) -> EnrichmentReport {
        let components = document.components_mut();
        let mut report = EnrichmentReport::new(components.len());

        for (index, outcome) in outcomes {
            let Some(component) = components.get_mut(index) else {
                continue;
            };
            match outcome {
                ComponentOutcome::Fetched(fact) => {
                    let changed = merge_policy.apply(component, &fact);
                    if changed {
                        tracing::debug!(
                            component = %component.label(),
                            license = fact.license().unwrap_or(""),
                            copyright = %excerpt(&fact.copyright_text().unwrap_or_default()),
                            "merged license data"
                        );
                    }
                    report.record_enriched(changed);
                }
                ComponentOutcome::Skipped(reason) => {
                    tracing::debug!(component = %component.label(), reason = %reason, "skipped");
                    report.record_skipped(index, component.label(), reason);
                }
                ComponentOutcome::Failed(reason) => {
                    report.record_failed(index, component.label(), reason);
                }
            }
        }

        report
    }

    fn report_summary(&self, report: &EnrichmentReport) {
        for failure in report.failures() {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Failed to fetch license data for {}: {}",
                failure.component, failure.reason
            ));
        }

        self.progress_reporter.report_completion(&format!(
            "✅ Enrichment complete: {} enriched ({} changed), {} skipped, {} failed out of {} component(s); {} request(s) for {} lookup(s)",
            report.enriched,
            report.changed,
            report.skipped,
            report.failed,
            report.total,
            report.fetches,
            report.lookups
        ));
    }
}

/// Extracts the short reason from a typed error, falling back to its message
fn reason_of(error: &anyhow::Error) -> String {
    match error.downcast_ref::<SbomError>() {
        Some(SbomError::InvalidIdentifier { reason, .. }) => reason.clone(),
        Some(SbomError::Lookup {
            attempts, details, ..
        }) => format!("{} (after {} attempt(s))", details, attempts),
        _ => format!("{:#}", error),
    }
}

fn is_invalid_identifier(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<SbomError>(),
        Some(SbomError::InvalidIdentifier { .. })
    )
}

/// Progress bar fed by an atomic counter from a polling thread
///
/// Dropping it stops the thread and clears the bar, so an interrupted run
/// leaves a clean terminal behind.
struct LookupProgress {
    completed: Arc<AtomicUsize>,
    done: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl LookupProgress {
    fn start(total: usize) -> Self {
        let completed = Arc::new(AtomicUsize::new(0));
        let done = Arc::new(AtomicBool::new(false));

        let completed_clone = completed.clone();
        let done_clone = done.clone();
        let handle = thread::spawn(move || {
            let pb = ProgressBar::new(total as u64);
            pb.set_style(bar_style());
            pb.set_message("Fetching license information...");

            while !done_clone.load(Ordering::Relaxed) {
                pb.set_position(completed_clone.load(Ordering::Relaxed) as u64);
                thread::sleep(Duration::from_millis(50));
            }

            pb.finish_and_clear();
        });

        Self {
            completed,
            done,
            handle: Some(handle),
        }
    }

    fn counter(&self) -> Arc<AtomicUsize> {
        self.completed.clone()
    }
}

impl Drop for LookupProgress {
    fn drop(&mut self) {
        self.done.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
