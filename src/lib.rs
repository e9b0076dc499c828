//! compliance-assistant - SBOM license compliance tooling
//!
//! This library generates CycloneDX SBOMs through external generators, enriches
//! them with license and copyright data from ClearlyDefined, and derives
//! outbound license candidates from the licenses they contain. It follows a
//! hexagonal architecture.
//!
//! # Architecture
//!
//! - **Domain Layer** (`compliance`): SBOM model, merge policies and pure services
//! - **Application Layer** (`application`): Use cases, DTOs and the lookup cache
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): ClearlyDefined client, external programs, files, console
//! - **Shared** (`shared`): Error types, security checks and the `Result` alias
//!
//! # Example
//!
//! ```no_run
//! use compliance_assistant::prelude::*;
//! use std::path::Path;
//!
//! # async fn example() -> Result<()> {
//! let document = FileSystemReader::new().read_sbom(Path::new("sbom.json"))?;
//!
//! let client = ClearlyDefinedClient::new(ClearlyDefinedConfig::default())?;
//! let use_case = EnrichSbomUseCase::new(client, StderrProgressReporter::new());
//! let response = use_case
//!     .execute(EnrichRequest::new(document, MergePolicy::Supplement, 4))
//!     .await?;
//!
//! FileSystemWriter::new("sbom.enriched.json".into())
//!     .present(&response.document.to_pretty_json()?)?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod compliance;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::adapters::outbound::network::{
        ClearlyDefinedClient, ClearlyDefinedConfig, Coordinates,
    };
    pub use crate::adapters::outbound::process::{
        ExternalSbomGenerator, FlictEvaluator, GeneratorKind,
    };
    pub use crate::application::dto::{EnrichRequest, EnrichResponse, GenerateRequest, OutputFormat};
    pub use crate::application::lookup_cache::LookupCache;
    pub use crate::application::use_cases::{
        EnrichSbomUseCase, GenerateSbomUseCase, ListLicensesUseCase, OutboundLicensesUseCase,
        ParseSbomUseCase,
    };
    pub use crate::compliance::domain::{
        Component, EnrichmentReport, LicenseChoice, LicenseFact, LicenseSet, OutboundReport,
        PackageIdentifier, Row, SbomDocument, Verdict,
    };
    pub use crate::compliance::policies::MergePolicy;
    pub use crate::compliance::services::{
        FieldExtractor, LicenseAggregator, MetadataStamper, OutboundResolver,
    };
    pub use crate::ports::outbound::{
        CompatibilityEvaluator, ComplianceDataRepository, OutputPresenter, ProgressReporter,
        ReportFormatter, SbomGeneratorTool, SbomReader,
    };
    pub use crate::shared::error::{ExitCode, SbomError};
    pub use crate::shared::Result;
}
