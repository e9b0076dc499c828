pub mod enrichment_report;
pub mod license_fact;
pub mod license_set;
pub mod outbound;
pub mod package_identifier;
pub mod row;
pub mod sbom_document;

pub use enrichment_report::{ComponentIssue, EnrichmentReport, IssueKind};
pub use license_fact::{LicenseFact, NOASSERTION};
pub use license_set::LicenseSet;
pub use outbound::{OutboundCandidate, OutboundReport, PairVerdict, Verdict};
pub use package_identifier::PackageIdentifier;
pub use row::Row;
pub use sbom_document::{
    Component, LicenseChoice, LicenseEntry, LicenseValue, Property, SbomDocument,
    DISCOVERED_COPYRIGHT_PROPERTY, DISCOVERED_LICENSE_PROPERTY, SUPPORTED_SPEC_VERSIONS,
};
