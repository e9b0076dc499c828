use super::command_runner::run_command;
use crate::ports::outbound::SbomGeneratorTool;
use crate::shared::error::SbomError;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const DEFAULT_DOCKER_IMAGE: &str = "ghcr.io/cyclonedx/cdxgen";

/// Which external program produces the raw SBOM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeneratorKind {
    #[default]
    Syft,
    Cdxgen,
    CdxgenDocker,
}

impl std::str::FromStr for GeneratorKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "syft" => Ok(GeneratorKind::Syft),
            "cdxgen" => Ok(GeneratorKind::Cdxgen),
            "cdxgen-docker" => Ok(GeneratorKind::CdxgenDocker),
            _ => Err(format!(
                "Invalid generator: {}. Please specify 'syft', 'cdxgen' or 'cdxgen-docker'",
                s
            )),
        }
    }
}

impl std::fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneratorKind::Syft => write!(f, "syft"),
            GeneratorKind::Cdxgen => write!(f, "cdxgen"),
            GeneratorKind::CdxgenDocker => write!(f, "cdxgen-docker"),
        }
    }
}

/// ExternalSbomGenerator adapter running syft, cdxgen or the cdxgen container
pub struct ExternalSbomGenerator {
    kind: GeneratorKind,
    docker_image: String,
}

impl ExternalSbomGenerator {
    pub fn new(kind: GeneratorKind, docker_image: impl Into<String>) -> Self {
        Self {
            kind,
            docker_image: docker_image.into(),
        }
    }

    fn program(&self) -> &'static str {
        match self.kind {
            GeneratorKind::Syft => "syft",
            GeneratorKind::Cdxgen => "cdxgen",
            GeneratorKind::CdxgenDocker => "docker",
        }
    }

    /// Command-line arguments for scanning `directory` into `output`.
    /// Both paths are expected to be absolute.
    fn arguments(&self, directory: &Path, output: &Path) -> Result<Vec<OsString>> {
        let args = match self.kind {
            GeneratorKind::Syft => {
                let mut target = OsString::from("dir:");
                target.push(directory);
                let mut destination = OsString::from("cyclonedx-json=");
                destination.push(output);
                vec!["scan".into(), target, "-o".into(), destination]
            }
            GeneratorKind::Cdxgen => vec![
                "-r".into(),
                directory.into(),
                "-o".into(),
                output.into(),
            ],
            GeneratorKind::CdxgenDocker => {
                let (output_dir, file_name) = split_output(output)?;
                let mut source_volume = directory.as_os_str().to_owned();
                source_volume.push(":/app");
                let mut output_volume = output_dir.as_os_str().to_owned();
                output_volume.push(":/sbom_data");
                let mut container_output = OsString::from("/sbom_data/");
                container_output.push(file_name);

                vec![
                    "run".into(),
                    "--rm".into(),
                    "--name".into(),
                    container_name(directory).into(),
                    "-v".into(),
                    source_volume,
                    "-v".into(),
                    output_volume,
                    self.docker_image.clone().into(),
                    "-r".into(),
                    "/app".into(),
                    "-o".into(),
                    container_output,
                ]
            }
        };
        Ok(args)
    }
}

#[async_trait]
impl SbomGeneratorTool for ExternalSbomGenerator {
    fn name(&self) -> &str {
        match self.kind {
            GeneratorKind::Syft => "syft",
            GeneratorKind::Cdxgen => "cdxgen",
            GeneratorKind::CdxgenDocker => "cdxgen (docker)",
        }
    }

    async fn generate(&self, directory: &Path, output: &Path) -> Result<()> {
        let directory = absolute(directory)?;
        let output = absolute(output)?;
        let args = self.arguments(&directory, &output)?;

        let result = run_command(self.program(), &args).await?;
        if !result.success {
            return Err(SbomError::ExternalTool {
                tool: self.program().to_string(),
                details: format!(
                    "exited with status {}: {}",
                    result
                        .code
                        .map_or_else(|| "unknown".to_string(), |c| c.to_string()),
                    result.diagnostics()
                ),
            }
            .into());
        }
        if !output.is_file() {
            return Err(SbomError::ExternalTool {
                tool: self.program().to_string(),
                details: format!("no SBOM was written to {}", output.display()),
            }
            .into());
        }
        Ok(())
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| {
        SbomError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
        .into()
    })
}

fn split_output(output: &Path) -> Result<(&Path, &std::ffi::OsStr)> {
    match (output.parent(), output.file_name()) {
        (Some(dir), Some(name)) => Ok((dir, name)),
        _ => Err(SbomError::Validation {
            message: format!("Invalid SBOM output path: {}", output.display()),
        }
        .into()),
    }
}

/// Docker container name derived from the project directory plus a random
/// suffix, restricted to the characters Docker accepts
fn container_name(directory: &Path) -> String {
    let base = directory
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string());
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    sanitize_container_name(&format!("{}_{}", base, &suffix[..6]))
}

fn sanitize_container_name(name: &str) -> String {
    let mut sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if !sanitized
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric())
    {
        sanitized.insert(0, '0');
    }
    sanitized
}
