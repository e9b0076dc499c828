use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::adapters::outbound::process::GeneratorKind;
use crate::application::dto::OutputFormat;
use crate::compliance::policies::MergePolicy;
use crate::compliance::services::DEFAULT_FIELDS;

/// Generate, enrich and analyse CycloneDX SBOMs for license compliance
#[derive(Parser, Debug)]
#[command(name = "compliance-assistant")]
#[command(version)]
#[command(
    about = "Generate CycloneDX SBOMs, enrich them with ClearlyDefined license data, and check outbound license compatibility",
    long_about = None
)]
pub struct Args {
    /// Show debug output (RUST_LOG takes precedence when set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a config file (defaults to ./complassist.config.yml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate, enrich and parse SBOMs
    #[command(subcommand)]
    Sbom(SbomCommand),

    /// Query ClearlyDefined directly
    #[command(name = "clearlydefined", subcommand)]
    ClearlyDefined(ClearlyDefinedCommand),

    /// Analyse the licenses of an SBOM
    #[command(subcommand)]
    Licensing(LicensingCommand),
}

#[derive(Subcommand, Debug)]
pub enum SbomCommand {
    /// Generate a CycloneDX SBOM for a directory with an external generator
    Generate {
        #[command(flatten)]
        source: SourceArgs,

        /// Output file path ('-' for stdout)
        #[arg(short, long, default_value = "-")]
        output: String,
    },

    /// Enrich an SBOM with license and copyright data from ClearlyDefined
    Enrich {
        /// Input SBOM file
        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,

        /// Output file path ('-' for stdout)
        #[arg(short, long)]
        output: String,

        #[command(flatten)]
        enrichment: EnrichmentArgs,
    },

    /// Generate an SBOM and enrich it in one go
    Full {
        #[command(flatten)]
        source: SourceArgs,

        /// Output file path ('-' for stdout)
        #[arg(short, long)]
        output: String,

        #[command(flatten)]
        enrichment: EnrichmentArgs,
    },

    /// Extract fields from every component of an SBOM
    Parse {
        /// Input SBOM file
        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,

        /// Comma-separated list of fields to extract
        #[arg(short, long, value_name = "FIELDS", default_value = DEFAULT_FIELDS)]
        extract: String,

        /// Output format: json, markdown or none
        #[arg(long, default_value = "json")]
        format: OutputFormat,

        /// Output file path ('-' for stdout)
        #[arg(short, long, default_value = "-")]
        output: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ClearlyDefinedCommand {
    /// Fetch the license and copyright data of one package
    Fetch {
        /// Package URL, e.g. pkg:pypi/requests@2.31.0
        #[arg(short, long, conflicts_with = "coordinates", required_unless_present = "coordinates")]
        purl: Option<String>,

        /// ClearlyDefined coordinates, e.g. pypi/pypi/-/requests/2.31.0
        #[arg(short, long)]
        coordinates: Option<String>,

        /// Output format: json or plain
        #[arg(long, default_value = "plain")]
        format: OutputFormat,
    },

    /// Convert a package URL to ClearlyDefined coordinates
    Coordinates {
        /// Package URL, e.g. pkg:cargo/serde@1.0.0
        #[arg(short, long)]
        purl: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum LicensingCommand {
    /// List the distinct licenses found in an SBOM
    List {
        /// Input SBOM file
        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,

        /// Output format: json or plain
        #[arg(long, default_value = "plain")]
        format: OutputFormat,
    },

    /// Suggest outbound licenses compatible with every license of an SBOM
    Outbound {
        /// Input SBOM file
        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,

        /// Additional outbound license to consider (repeatable)
        #[arg(long = "candidate", value_name = "LICENSE")]
        candidates: Vec<String>,

        /// Output format: json or plain
        #[arg(long, default_value = "plain")]
        format: OutputFormat,
    },
}

/// Where and how a fresh SBOM is produced
#[derive(ClapArgs, Debug)]
pub struct SourceArgs {
    /// Directory to scan
    #[arg(short, long, value_name = "DIR")]
    pub directory: PathBuf,

    /// Generator: syft, cdxgen or cdxgen-docker
    #[arg(short, long)]
    pub generator: Option<GeneratorKind>,
}

/// Overrides for the enrichment settings of the config file
#[derive(ClapArgs, Debug)]
pub struct EnrichmentArgs {
    /// How fetched data is merged: supplement or overwrite
    #[arg(long)]
    pub merge_policy: Option<MergePolicy>,

    /// Maximum number of concurrent lookups
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub concurrency: Option<u32>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
