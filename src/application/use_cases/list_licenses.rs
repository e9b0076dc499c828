use crate::compliance::domain::LicenseSet;
use crate::compliance::services::LicenseAggregator;
use crate::ports::outbound::{ProgressReporter, SbomReader};
use crate::shared::Result;
use std::path::Path;

/// ListLicensesUseCase - Collects the distinct licenses of an SBOM
pub struct ListLicensesUseCase<R, PR> {
    reader: R,
    progress_reporter: PR,
}

impl<R, PR> ListLicensesUseCase<R, PR>
where
    R: SbomReader,
    PR: ProgressReporter,
{
    pub fn new(reader: R, progress_reporter: PR) -> Self {
        Self {
            reader,
            progress_reporter,
        }
    }

    /// Reads the SBOM and aggregates its licenses.
    ///
    /// Unparseable values and components without a license are reported as
    /// warnings; they never fail the command.
    pub fn execute(&self, path: &Path) -> Result<LicenseSet> {
        let document = self.reader.read_sbom(path)?;
        let set = LicenseAggregator::aggregate(&document);

        for value in set.unparseable() {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Could not parse license expression '{}'",
                value
            ));
        }
        if set.empty_count() > 0 {
            self.progress_reporter.report(&format!(
                "ℹ️  {} component(s) carry no license information",
                set.empty_count()
            ));
        }

        Ok(set)
    }
}
