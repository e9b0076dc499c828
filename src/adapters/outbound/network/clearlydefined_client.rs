use super::coordinates::Coordinates;
use super::retry::{AttemptError, RetryPolicy};
use crate::compliance::domain::{LicenseFact, PackageIdentifier};
use crate::ports::outbound::ComplianceDataRepository;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.clearlydefined.io";

/// Connection settings for the ClearlyDefined API
#[derive(Debug, Clone, PartialEq)]
pub struct ClearlyDefinedConfig {
    pub api_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub request_harvest: bool,
}

impl Default for ClearlyDefinedConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(10),
            max_retries: 3,
            retry_delay: Duration::from_millis(500),
            request_harvest: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct Definition {
    #[serde(default)]
    licensed: Option<Licensed>,
    #[serde(default)]
    scores: Option<Scores>,
}

#[derive(Debug, Default, Deserialize)]
struct Licensed {
    #[serde(default)]
    declared: Option<String>,
    #[serde(default)]
    facets: Option<Facets>,
}

#[derive(Debug, Default, Deserialize)]
struct Facets {
    #[serde(default)]
    core: Option<CoreFacet>,
}

#[derive(Debug, Default, Deserialize)]
struct CoreFacet {
    #[serde(default)]
    attribution: Option<Attribution>,
}

#[derive(Debug, Default, Deserialize)]
struct Attribution {
    #[serde(default)]
    parties: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Scores {
    #[serde(default)]
    effective: Option<u32>,
}

/// ClearlyDefinedClient adapter for the ClearlyDefined definitions API
///
/// Implements the ComplianceDataRepository port. Every request is bounded by
/// the configured timeout; transport errors, 429 and 5xx responses are
/// retried with exponential backoff.
pub struct ClearlyDefinedClient {
    client: reqwest::Client,
    config: ClearlyDefinedConfig,
    retry: RetryPolicy,
}

impl ClearlyDefinedClient {
    pub fn new(config: ClearlyDefinedConfig) -> Result<Self> {
        let user_agent = format!("compliance-assistant/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(user_agent)
            .build()?;
        let retry = RetryPolicy::new(config.max_retries, config.retry_delay);

        Ok(Self {
            client,
            config,
            retry,
        })
    }

    fn api_url(&self) -> &str {
        self.config.api_url.trim_end_matches('/')
    }

    /// Fetches the definition for `coordinates` and extracts its license fact.
    /// `label` names the package in errors and log lines.
    pub async fn fetch_definition(
        &self,
        coordinates: &Coordinates,
        label: &str,
    ) -> Result<LicenseFact> {
        let url = format!(
            "{}/definitions/{}?expand=-files",
            self.api_url(),
            coordinates.to_path()
        );

        let body = self
            .retry
            .run(label, |_| self.get_once(&url))
            .await?;

        let fact = parse_definition(&body, label);
        if fact.license().is_none() && self.config.request_harvest {
            self.request_harvest(coordinates).await;
        }
        Ok(fact)
    }

    async fn get_once(&self, url: &str) -> std::result::Result<String, AttemptError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AttemptError::Transient(transport_details(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let details = format!("ClearlyDefined API returned status code {}", status);
            return Err(if is_retryable(status) {
                AttemptError::Transient(details)
            } else {
                AttemptError::Permanent(details)
            });
        }

        response
            .text()
            .await
            .map_err(|e| AttemptError::Transient(transport_details(&e)))
    }

    /// Asks ClearlyDefined to analyse a package it has no license data for.
    /// Failures are logged and otherwise ignored.
    async fn request_harvest(&self, coordinates: &Coordinates) {
        let url = format!("{}/harvest", self.api_url());
        let payload = json!({"tool": "package", "coordinates": coordinates.to_string()});

        tracing::info!(
            coordinates = %coordinates,
            "no declared license, requesting harvest; make sure this version exists and try again later"
        );
        match self.client.post(&url).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {}
            Ok(response) => {
                tracing::debug!(coordinates = %coordinates, status = %response.status(), "harvest request rejected");
            }
            Err(e) => {
                tracing::debug!(coordinates = %coordinates, error = %e, "harvest request failed");
            }
        }
    }
}

#[async_trait]
impl ComplianceDataRepository for ClearlyDefinedClient {
    async fn fetch_license_fact(&self, identifier: &PackageIdentifier) -> Result<LicenseFact> {
        let coordinates = Coordinates::from_identifier(identifier)?;
        self.fetch_definition(&coordinates, identifier.as_str())
            .await
    }
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn transport_details(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("request timed out: {}", error)
    } else {
        error.to_string()
    }
}

/// Extracts the license fact from a definition body. Anything that is not a
/// definition yields an empty fact.
fn parse_definition(body: &str, label: &str) -> LicenseFact {
    let definition: Definition = match serde_json::from_str(body) {
        Ok(definition) => definition,
        Err(e) => {
            tracing::warn!(package = label, error = %e, "unexpected response from ClearlyDefined, treating as no data");
            return LicenseFact::empty();
        }
    };

    let (license, parties) = match definition.licensed {
        Some(licensed) => {
            let parties = licensed
                .facets
                .and_then(|f| f.core)
                .and_then(|c| c.attribution)
                .map(|a| a.parties)
                .unwrap_or_default();
            (licensed.declared, parties)
        }
        None => (None, Vec::new()),
    };
    let score = definition.scores.and_then(|s| s.effective);

    let fact = LicenseFact::new(license, parties, score);
    if fact.license().is_none() {
        tracing::debug!(package = label, "no declared license from ClearlyDefined");
    }
    if fact.copyrights().is_empty() {
        tracing::debug!(package = label, "no copyright attributions from ClearlyDefined");
    }
    fact
}
