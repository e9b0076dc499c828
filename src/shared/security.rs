use crate::shared::error::SbomError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Largest SBOM we are willing to load (100 MB)
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Maximum accepted length of a package URL
pub const MAX_IDENTIFIER_LENGTH: usize = 2048;

/// Checks that `path` is an existing regular file that is not a symbolic link
/// and not larger than `max_size`.
///
/// `symlink_metadata()` is used so the link itself is inspected, not its target.
pub fn validate_input_file(path: &Path, max_size: u64) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| SbomError::FileReadError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    if metadata.is_symlink() {
        return Err(SbomError::SecurityError {
            path: path.to_path_buf(),
            reason: "Input file is a symbolic link".to_string(),
            hint: "Pass the path of the real file instead of a link to it".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(SbomError::FileReadError {
            path: path.to_path_buf(),
            details: "Not a regular file".to_string(),
        }
        .into());
    }

    if metadata.len() > max_size {
        return Err(SbomError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "File is too large ({} bytes). Maximum allowed size is {} bytes.",
                metadata.len(),
                max_size
            ),
            hint: "Split the SBOM or check that the right file was passed".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Checks that an output path can be written safely: its parent directory
/// exists and, if the file already exists, it is not a symbolic link.
pub fn validate_output_target(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if parent != Path::new("") && !parent.is_dir() {
            return Err(SbomError::FileWriteError {
                path: path.to_path_buf(),
                details: format!("Parent directory does not exist: {}", parent.display()),
            }
            .into());
        }
    }

    if let Ok(metadata) = fs::symlink_metadata(path) {
        if metadata.is_symlink() {
            return Err(SbomError::SecurityError {
                path: path.to_path_buf(),
                reason: "Output path is a symbolic link".to_string(),
                hint: "Choose an output path that is not a link".to_string(),
            }
            .into());
        }
        if metadata.is_dir() {
            return Err(SbomError::FileWriteError {
                path: path.to_path_buf(),
                details: "Output path is a directory".to_string(),
            }
            .into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_validate_input_file_regular_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("sbom.json");
        fs::write(&file_path, "{}").unwrap();

        assert!(validate_input_file(&file_path, MAX_FILE_SIZE).is_ok());
    }

    #[test]
    fn test_validate_input_file_nonexistent() {
        let path = PathBuf::from("/nonexistent/sbom.json");
        let result = validate_input_file(&path, MAX_FILE_SIZE);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to read file"));
    }

    #[test]
    fn test_validate_input_file_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = validate_input_file(temp_dir.path(), MAX_FILE_SIZE);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Not a regular file"));
    }

    #[test]
    fn test_validate_input_file_too_large() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("big.json");
        fs::write(&file_path, "0123456789").unwrap();

        let result = validate_input_file(&file_path, 5);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too large"));
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_input_file_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target.json");
        let link = temp_dir.path().join("link.json");
        fs::write(&target, "{}").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let result = validate_input_file(&link, MAX_FILE_SIZE);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("symbolic link"));
    }

    #[test]
    fn test_validate_output_target_missing_parent() {
        let result = validate_output_target(Path::new("/nonexistent/dir/out.json"));
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Parent directory does not exist"));
    }

    #[test]
    fn test_validate_output_target_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = validate_output_target(&temp_dir.path().join("out.json"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_output_target_relative_file_name() {
        assert!(validate_output_target(Path::new("out.json")).is_ok());
    }
}
