use crate::compliance::domain::SbomDocument;
use crate::ports::outbound::SbomReader;
use crate::shared::error::SbomError;
use crate::shared::security::{validate_input_file, MAX_FILE_SIZE};
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// FileSystemReader adapter for loading CycloneDX JSON documents
///
/// Files are checked before reading: symbolic links, non-regular files and
/// files above the size limit are rejected.
pub struct FileSystemReader {
    max_file_size: u64,
}

impl FileSystemReader {
    pub fn new() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
        }
    }

    pub fn with_max_file_size(max_file_size: u64) -> Self {
        Self { max_file_size }
    }

    fn safe_read_file(&self, path: &Path) -> Result<Vec<u8>> {
        validate_input_file(path, self.max_file_size)?;
        fs::read(path).map_err(|e| {
            SbomError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomReader for FileSystemReader {
    fn read_sbom(&self, path: &Path) -> Result<SbomDocument> {
        let content = self.safe_read_file(path)?;

        // Invalid UTF-8 surfaces here as a JSON syntax error
        let document = SbomDocument::from_json_slice(&content).map_err(|e| SbomError::Format {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        document.check_supported().map_err(|details| SbomError::Format {
            path: path.to_path_buf(),
            details,
        })?;

        tracing::debug!(
            path = %path.display(),
            spec_version = %document.spec_version,
            components = document.components().len(),
            "loaded SBOM"
        );
        Ok(document)
    }
}
