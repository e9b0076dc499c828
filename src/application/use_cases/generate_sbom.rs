use crate::application::dto::GenerateRequest;
use crate::compliance::domain::SbomDocument;
use crate::ports::outbound::{ProgressReporter, SbomGeneratorTool, SbomReader};
use crate::shared::error::SbomError;
use crate::shared::Result;
use anyhow::Context;
use std::path::Path;

const GENERATED_FILE_NAME: &str = "sbom.cdx.json";

/// GenerateSbomUseCase - Produces a raw SBOM with an external generator
///
/// The generator writes into a private temporary directory which is removed
/// once the document has been read back, whether or not generation succeeded.
///
/// # Type Parameters
/// * `G` - SbomGeneratorTool implementation
/// * `R` - SbomReader implementation
/// * `PR` - ProgressReporter implementation
pub struct GenerateSbomUseCase<G, R, PR> {
    generator: G,
    reader: R,
    progress_reporter: PR,
}

impl<G, R, PR> GenerateSbomUseCase<G, R, PR>
where
    G: SbomGeneratorTool,
    R: SbomReader,
    PR: ProgressReporter,
{
    /// Creates a new GenerateSbomUseCase with injected dependencies
    pub fn new(generator: G, reader: R, progress_reporter: PR) -> Self {
        Self {
            generator,
            reader,
            progress_reporter,
        }
    }

    /// Runs the generator on the requested directory and loads its output
    pub async fn execute(&self, request: GenerateRequest) -> Result<SbomDocument> {
        validate_project_path(&request.directory)?;

        self.progress_reporter.report(&format!(
            "📦 Generating SBOM for {} with {}...",
            request.directory.display(),
            self.generator.name()
        ));

        let workdir = tempfile::TempDir::new()
            .context("Failed to create a temporary directory for the generated SBOM")?;
        let output = workdir.path().join(GENERATED_FILE_NAME);

        self.generator.generate(&request.directory, &output).await?;
        let document = self.reader.read_sbom(&output)?;

        self.progress_reporter.report_completion(&format!(
            "✅ SBOM generated: {} component(s), CycloneDX {}",
            document.components().len(),
            document.spec_version
        ));

        Ok(document)
    }
}

/// Checks that `path` is an existing, non-symlinked directory
pub fn validate_project_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(SbomError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }

    // Security check: Reject symbolic links for project paths
    let metadata = std::fs::symlink_metadata(path).map_err(|e| SbomError::InvalidProjectPath {
        path: path.to_path_buf(),
        reason: format!("Failed to read path metadata: {}", e),
    })?;

    if metadata.is_symlink() {
        return Err(SbomError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Security: Project path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !path.is_dir() {
        return Err(SbomError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}
