use crate::compliance::domain::{LicenseFact, LicenseSet, OutboundReport, Row};
use crate::shared::Result;

/// ReportFormatter port for rendering command results
///
/// One implementation per output format (JSON, Markdown/plain text). The
/// formatter only renders; writing is left to an `OutputPresenter`.
pub trait ReportFormatter {
    /// Renders extracted component rows
    fn format_rows(&self, rows: &[Row]) -> Result<String>;

    /// Renders the licenses found in an SBOM
    fn format_license_set(&self, set: &LicenseSet) -> Result<String>;

    /// Renders outbound candidates and the verdict matrix
    fn format_outbound(&self, report: &OutboundReport) -> Result<String>;

    /// Renders the result of a single compliance data lookup
    fn format_fact(&self, subject: &str, fact: &LicenseFact) -> Result<String>;
}
