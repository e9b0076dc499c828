use std::path::PathBuf;

/// GenerateRequest - Internal request DTO for SBOM generation
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Repository directory handed to the generator
    pub directory: PathBuf,
}

impl GenerateRequest {
    pub fn new(directory: PathBuf) -> Self {
        Self { directory }
    }
}
