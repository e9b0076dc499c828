/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses to reach
/// the file system, the compliance data service, external tools and the console.
pub mod compatibility_evaluator;
pub mod compliance_repository;
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;
pub mod sbom_generator;
pub mod sbom_reader;

pub use compatibility_evaluator::CompatibilityEvaluator;
pub use compliance_repository::ComplianceDataRepository;
pub use formatter::ReportFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use sbom_generator::SbomGeneratorTool;
pub use sbom_reader::SbomReader;
