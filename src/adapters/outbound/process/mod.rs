/// Process adapters for external programs (SBOM generators, flict)
mod command_runner;
mod flict_evaluator;
mod generator;

pub use command_runner::{run_command, CommandOutput};
pub use flict_evaluator::{parse_verdict, FlictEvaluator, DEFAULT_FLICT_PROGRAM};
pub use generator::{ExternalSbomGenerator, GeneratorKind, DEFAULT_DOCKER_IMAGE};
