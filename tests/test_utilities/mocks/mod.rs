/// Mock implementations for testing
mod mock_compliance_repository;
mod mock_evaluator;
mod mock_progress_reporter;

pub use mock_compliance_repository::MockComplianceRepository;
pub use mock_evaluator::MockEvaluator;
pub use mock_progress_reporter::MockProgressReporter;
