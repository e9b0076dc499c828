use crate::compliance::domain::SbomDocument;
use crate::shared::Result;
use std::path::Path;

/// SbomReader port for loading CycloneDX documents
pub trait SbomReader {
    /// Reads and validates an SBOM
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist, is a symbolic link or is too large
    /// - The content is not JSON
    /// - The document is not CycloneDX, or uses an unsupported spec version
    fn read_sbom(&self, path: &Path) -> Result<SbomDocument>;
}
