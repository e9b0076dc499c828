use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// SbomGeneratorTool port for the external program that scans a directory
/// and writes a raw CycloneDX JSON SBOM.
#[async_trait]
pub trait SbomGeneratorTool: Send + Sync {
    /// Name used in progress messages and errors
    fn name(&self) -> &str;

    /// Scans `directory` and writes the SBOM to `output`
    ///
    /// # Errors
    /// Returns `SbomError::ExternalTool` if the program cannot be started or
    /// exits unsuccessfully. Its output is not interpreted.
    async fn generate(&self, directory: &Path, output: &Path) -> Result<()>;
}
