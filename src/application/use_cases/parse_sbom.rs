use crate::compliance::domain::Row;
use crate::compliance::services::FieldExtractor;
use crate::ports::outbound::SbomReader;
use crate::shared::Result;
use std::path::Path;

/// ParseSbomUseCase - Projects selected fields out of every component
pub struct ParseSbomUseCase<R> {
    reader: R,
}

impl<R: SbomReader> ParseSbomUseCase<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Reads the SBOM at `path` and extracts `fields` from each component.
    ///
    /// Field names are checked before the file is touched, so a typo fails
    /// fast even for large documents.
    pub fn execute(&self, path: &Path, fields: &[String]) -> Result<Vec<Row>> {
        FieldExtractor::validate_fields(fields)?;
        let document = self.reader.read_sbom(path)?;
        FieldExtractor::extract(&document, fields)
    }
}
