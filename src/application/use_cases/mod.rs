/// Use cases module containing application business logic orchestration
mod enrich_sbom;
mod generate_sbom;
mod list_licenses;
mod outbound_licenses;
mod parse_sbom;

pub use enrich_sbom::{ComponentOutcome, EnrichSbomUseCase};
pub use generate_sbom::{validate_project_path, GenerateSbomUseCase};
pub use list_licenses::ListLicensesUseCase;
pub use outbound_licenses::OutboundLicensesUseCase;
pub use parse_sbom::ParseSbomUseCase;
