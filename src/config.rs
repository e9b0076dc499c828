//! Configuration file support for compliance-assistant.
//!
//! Provides YAML-based configuration through `complassist.config.yml` files,
//! including data structures, file loading, validation and the merge of file
//! values with built-in defaults.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::adapters::outbound::network::{ClearlyDefinedConfig, DEFAULT_API_URL};
use crate::adapters::outbound::process::{GeneratorKind, DEFAULT_DOCKER_IMAGE, DEFAULT_FLICT_PROGRAM};
use crate::application::dto::DEFAULT_CONCURRENCY;
use crate::compliance::policies::MergePolicy;
use crate::shared::error::SbomError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "complassist.config.yml";

type UnknownFields = HashMap<String, serde_yaml_ng::Value>;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub clearlydefined: Option<ClearlyDefinedSection>,
    pub enrichment: Option<EnrichmentSection>,
    pub generator: Option<GeneratorSection>,
    pub evaluator: Option<EvaluatorSection>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: UnknownFields,
}

#[derive(Debug, Deserialize, Default)]
pub struct ClearlyDefinedSection {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub retry_delay_ms: Option<u64>,
    pub concurrency: Option<usize>,
    pub request_harvest: Option<bool>,
    #[serde(flatten)]
    pub unknown_fields: UnknownFields,
}

#[derive(Debug, Deserialize, Default)]
pub struct EnrichmentSection {
    pub merge_policy: Option<MergePolicy>,
    #[serde(flatten)]
    pub unknown_fields: UnknownFields,
}

#[derive(Debug, Deserialize, Default)]
pub struct GeneratorSection {
    pub program: Option<GeneratorKind>,
    pub docker_image: Option<String>,
    #[serde(flatten)]
    pub unknown_fields: UnknownFields,
}

#[derive(Debug, Deserialize, Default)]
pub struct EvaluatorSection {
    pub program: Option<String>,
    #[serde(flatten)]
    pub unknown_fields: UnknownFields,
}

/// Effective settings after applying the config file over the defaults.
/// Command-line flags are applied on top by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub clearlydefined: ClearlyDefinedConfig,
    pub concurrency: usize,
    pub merge_policy: MergePolicy,
    pub generator: GeneratorKind,
    pub docker_image: String,
    pub evaluator_program: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            clearlydefined: ClearlyDefinedConfig::default(),
            concurrency: DEFAULT_CONCURRENCY,
            merge_policy: MergePolicy::default(),
            generator: GeneratorKind::default(),
            docker_image: DEFAULT_DOCKER_IMAGE.to_string(),
            evaluator_program: DEFAULT_FLICT_PROGRAM.to_string(),
        }
    }
}

impl Settings {
    pub fn from_config(config: Option<&ConfigFile>) -> Self {
        let mut settings = Settings::default();
        let Some(config) = config else {
            return settings;
        };

        if let Some(section) = &config.clearlydefined {
            let cd = &mut settings.clearlydefined;
            if let Some(url) = &section.api_url {
                cd.api_url = url.clone();
            }
            if let Some(secs) = section.timeout_secs {
                cd.timeout = Duration::from_secs(secs);
            }
            if let Some(retries) = section.max_retries {
                cd.max_retries = retries;
            }
            if let Some(ms) = section.retry_delay_ms {
                cd.retry_delay = Duration::from_millis(ms);
            }
            if let Some(harvest) = section.request_harvest {
                cd.request_harvest = harvest;
            }
            if let Some(concurrency) = section.concurrency {
                settings.concurrency = concurrency;
            }
        }
        if let Some(policy) = config.enrichment.as_ref().and_then(|s| s.merge_policy) {
            settings.merge_policy = policy;
        }
        if let Some(section) = &config.generator {
            if let Some(program) = section.program {
                settings.generator = program;
            }
            if let Some(image) = &section.docker_image {
                settings.docker_image = image.clone();
            }
        }
        if let Some(program) = config.evaluator.as_ref().and_then(|s| s.program.clone()) {
            settings.evaluator_program = program;
        }

        settings
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn invalid(message: String) -> anyhow::Error {
    SbomError::Validation {
        message: format!(
            "{}\n\n💡 Hint: Fix the value in {} or pass the corresponding command-line flag.",
            message, CONFIG_FILENAME
        ),
    }
    .into()
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    let Some(cd) = &config.clearlydefined else {
        return Ok(());
    };

    if let Some(url) = &cd.api_url {
        let url = url.trim();
        if url.is_empty() || !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(invalid(format!(
                "clearlydefined.api_url must be an http(s) URL such as {}, got '{}'",
                DEFAULT_API_URL, url
            )));
        }
    }
    if cd.max_retries == Some(0) {
        return Err(invalid(
            "clearlydefined.max_retries must be at least 1".to_string(),
        ));
    }
    if cd.concurrency == Some(0) {
        return Err(invalid(
            "clearlydefined.concurrency must be at least 1".to_string(),
        ));
    }
    if cd.timeout_secs == Some(0) {
        return Err(invalid(
            "clearlydefined.timeout_secs must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let sections: [(&str, Option<&UnknownFields>); 4] = [
        ("clearlydefined.", config.clearlydefined.as_ref().map(|s| &s.unknown_fields)),
        ("enrichment.", config.enrichment.as_ref().map(|s| &s.unknown_fields)),
        ("generator.", config.generator.as_ref().map(|s| &s.unknown_fields)),
        ("evaluator.", config.evaluator.as_ref().map(|s| &s.unknown_fields)),
    ];

    let nested = sections
        .into_iter()
        .filter_map(|(prefix, fields)| fields.map(|f| (prefix, f)))
        .flat_map(|(prefix, fields)| fields.keys().map(move |key| format!("{}{}", prefix, key)));

    for key in config.unknown_fields.keys().cloned().chain(nested) {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
